use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

/// Outcome of a command that does not report a value.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum Status {
    /// The command ran.
    Success,
    /// The line was longer than the command buffer; it was discarded.
    LineOverflow,
    /// The line did not start with the required prefix.
    BadPrefix,
    /// A numeric argument was missing or malformed (strict numbers only).
    InvalidArgument,
    /// The opcode was not recognised.
    UnknownOpcode,
}
impl Status {
    /// Returns the numeric code sent over the wire.
    pub fn code(&self) -> i8 {
        use Status::*;
        match self {
            Success => 0,
            LineOverflow => 1,
            BadPrefix => 2,
            InvalidArgument => 3,
            UnknownOpcode => 5,
        }
    }

    /// Looks up a `Status` from its wire code.
    pub fn from_code(code: i32) -> Option<Status> {
        use Status::*;
        match code {
            0 => Some(Success),
            1 => Some(LineOverflow),
            2 => Some(BadPrefix),
            3 => Some(InvalidArgument),
            5 => Some(UnknownOpcode),
            _ => None,
        }
    }
}

/// Response to one command line.
///
/// Read commands answer with the value they read, and nothing else. Every
/// other line is answered with a status code.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum Reply {
    /// `code <N>`.
    Status(Status),
    /// A value that was read from a pin.
    Value(u16),
}
impl Reply {
    /// Code reported when a value was sent instead of a status.
    pub const VALUE_SENTINEL: i8 = -1;

    /// Returns the status code of the reply.
    ///
    /// For [Reply::Value] this is [Reply::VALUE_SENTINEL], meaning that no
    /// `code` line is sent.
    pub fn code(&self) -> i8 {
        match self {
            Reply::Status(status) => status.code(),
            Reply::Value(_) => Self::VALUE_SENTINEL,
        }
    }
}

impl From<Status> for Reply {
    fn from(status: Status) -> Self {
        Reply::Status(status)
    }
}

impl uDisplay for Reply {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Reply::Status(status) => {
                f.write_str("code ")?;
                status.code().fmt(f)
            }
            Reply::Value(value) => value.fmt(f),
        }
    }
}
