pub(crate) mod command;
mod host;
mod numbers;
mod tokens;

pub use command::Command;
pub use command::Duty;
pub use command::Level;
pub use command::Opcode;
pub use command::Pin;
pub use command::PinMode;
pub use host::ReplyError;
pub use numbers::parse_legacy_int;
pub use numbers::parse_strict_int;
pub use numbers::NumberError;
pub use tokens::Tokens;
pub use tokens::MAX_TOKENS;
