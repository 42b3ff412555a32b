#![cfg_attr(not(test), no_std)]

mod config;
mod dispatch;
mod gpio;
mod line;
pub mod protocol;
mod session;
mod status;

pub use config::Config;
pub use config::COMMAND_BUFFER_CAPACITY;
pub use config::MAX_LINE_LEN;
pub use config::PREFIX;
pub use dispatch::Dispatcher;
pub use gpio::Gpio;
pub use line::LineAccumulator;
pub use line::LineError;
pub use protocol::Command;
pub use protocol::Duty;
pub use protocol::Level;
pub use protocol::Pin;
pub use protocol::PinMode;
pub use session::Session;
pub use status::Reply;
pub use status::Status;

#[cfg(test)]
pub use gpio::{GpioCall, TestGpio};
