use arduino_hal::prelude::*;
use gpiobridge::{Config, Reply, Session, Status, MAX_LINE_LEN};

use crate::uno::{UnoGpio, UnoSerial};

/// Write an info message, when diagnostics are enabled.
macro_rules! info {
    ($serial:expr, $($arg:tt)*) => {{
        if cfg!(feature = "diagnostics") {
            ufmt::uwrite!($serial, "INFO: ").unwrap_infallible();
            ufmt::uwriteln!($serial, $($arg)*).unwrap_infallible();
        }
    }};
}

/// Write an error message, when diagnostics are enabled.
macro_rules! error {
    ($serial:expr, $($arg:tt)*) => {{
        if cfg!(feature = "diagnostics") {
            ufmt::uwrite!($serial, "ERROR: ").unwrap_infallible();
            ufmt::uwriteln!($serial, $($arg)*).unwrap_infallible();
        }
    }};
}

/// Protocol configuration, chosen by Cargo features.
pub const CONFIG: Config = Config::new(
    cfg!(feature = "vmx-only"),
    cfg!(feature = "strict-numbers"),
);

/// Serves the command protocol over the UART.
pub struct Controller {
    serial: UnoSerial,
    session: Session<UnoGpio, MAX_LINE_LEN>,
}
impl Controller {
    pub const BAUD_RATE: u32 = 9600;

    pub fn new(serial: UnoSerial, gpio: UnoGpio) -> Self {
        let mut controller = Self {
            serial,
            session: Session::new(CONFIG, gpio),
        };
        info!(
            &mut controller.serial,
            "GPIO bridge ready. Prefix required: {}. Max line: {}.",
            CONFIG.require_prefix,
            MAX_LINE_LEN
        );
        controller
    }

    /// Handle the next received byte, if there is one.
    ///
    /// This never blocks; when no byte is waiting it returns immediately.
    pub fn poll(&mut self) {
        let byte = match self.serial.read() {
            Ok(byte) => byte,
            Err(nb::Error::WouldBlock) => return,
            Err(nb::Error::Other(never)) => match never {},
        };
        let reply = self
            .session
            .deliver_byte(byte, &mut self.serial)
            .unwrap_infallible();
        if let Some(reply) = reply {
            self.log_reply(reply);
        }
    }

    fn log_reply(&mut self, reply: Reply) {
        match reply {
            Reply::Status(Status::Success) | Reply::Value(_) => {}
            Reply::Status(Status::LineOverflow) => error!(
                &mut self.serial,
                "Line longer than {} bytes was dropped.", MAX_LINE_LEN
            ),
            Reply::Status(Status::BadPrefix) => {
                error!(&mut self.serial, "Line did not start with VMX.")
            }
            Reply::Status(Status::InvalidArgument) => {
                error!(&mut self.serial, "Malformed numeric argument.")
            }
            Reply::Status(Status::UnknownOpcode) => {
                error!(&mut self.serial, "Unknown opcode.")
            }
        }
    }
}
