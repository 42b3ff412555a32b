//! The host side of the protocol: writing requests and reading replies.

use ufmt::{uDisplay, uWrite, uwrite, Formatter};
use ufmt_macros::uDebug;
use winnow::ascii::{digit1, space1};
use winnow::combinator::{alt, eof, preceded, terminated};
use winnow::token::{literal, take_while};
use winnow::Parser;

use super::command::{Command, Duty, Level, Pin, PinMode};
use super::numbers::parse_strict_int;
use crate::{Reply, Status, PREFIX};

/// A reply line that could not be understood.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum ReplyError {
    /// The line is neither `code <N>` nor a bare value.
    Malformed,
    /// The line is `code <N>`, but `N` is not a known status.
    UnknownCode,
}

impl Reply {
    /// Parses a reply line sent by the bridge.
    ///
    /// A trailing carriage return is tolerated, so that replies from boards
    /// that end lines with `\r\n` can be read too.
    ///
    /// Examples:
    ///
    /// - `"code 0"` -> `Reply::Status(Status::Success)`
    /// - `"512"` -> `Reply::Value(512)`
    pub fn parse(line: &str) -> Result<Reply, ReplyError> {
        let mut input = line.strip_suffix('\r').unwrap_or(line);
        match terminated(parse_reply, eof).parse_next(&mut input) {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => Err(ReplyError::UnknownCode),
            Err(_) => Err(ReplyError::Malformed),
        }
    }
}

/// Parse a reply; `None` means a `code` line with an unknown code.
fn parse_reply<'s>(input: &mut &'s str) -> winnow::Result<Option<Reply>> {
    alt((
        parse_code.map(|code| Status::from_code(code).map(Reply::Status)),
        digit1
            .try_map(str::parse::<u16>)
            .map(|value| Some(Reply::Value(value))),
    ))
    .parse_next(input)
}

/// Parse `code <N>`.
fn parse_code<'s>(input: &mut &'s str) -> winnow::Result<i32> {
    preceded(
        (literal("code"), space1),
        take_while(1.., |c: char| c == '-' || c.is_ascii_digit()),
    )
    .try_map(|code: &str| parse_strict_int(code.as_bytes()))
    .parse_next(input)
}

impl uDisplay for Pin {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        self.get_value().fmt(f)
    }
}

impl uDisplay for Duty {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        self.get_value().fmt(f)
    }
}

impl uDisplay for PinMode {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.as_token())
    }
}

impl uDisplay for Level {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.as_token())
    }
}

/// Writes the request line for a command, without the newline.
///
/// eg. `VMX PINMODE 13 OUTPUT`
impl uDisplay for Command {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(f, "{} {} {}", PREFIX, self.opcode().as_token(), self.pin())?;
        match self {
            Command::PinMode { mode, .. } => uwrite!(f, " {}", mode),
            Command::DigitalWrite { level, .. } => uwrite!(f, " {}", level),
            Command::AnalogWrite { duty, .. } => uwrite!(f, " {}", duty),
            Command::DigitalRead { .. } | Command::AnalogRead { .. } => Ok(()),
        }
    }
}
