/// Size of the command buffer, in bytes.
pub const COMMAND_BUFFER_CAPACITY: usize = 50;

/// Longest line that will be accepted.
///
/// One slot of the command buffer is reserved, so that a full line and its
/// terminator still fit.
pub const MAX_LINE_LEN: usize = COMMAND_BUFFER_CAPACITY - 1;

/// Leading token that marks a line as a bridge command.
pub const PREFIX: &str = "VMX";

/// Protocol configuration.
///
/// This is fixed when the firmware is built; there is no way to change it
/// over the wire.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Config {
    /// Reject lines whose first token is not [PREFIX].
    pub require_prefix: bool,
    /// Reject malformed numeric arguments instead of reading them as zero.
    pub strict_numbers: bool,
}
impl Config {
    /// Behaves like the original bridge: prefix required, numbers parsed
    /// like C's `atoi`.
    pub const LEGACY: Config = Config::new(true, false);

    /// Creates a new `Config`.
    ///
    /// # Parameters
    ///
    /// - `require_prefix`: Whether the [PREFIX] token is mandatory.
    /// - `strict_numbers`: Whether malformed numbers are rejected.
    pub const fn new(require_prefix: bool, strict_numbers: bool) -> Self {
        Self {
            require_prefix,
            strict_numbers,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::LEGACY
    }
}
