use crate::{Command, Config, Gpio, Reply, Status};

/// Interprets command lines and runs them against a board.
#[derive(Debug, Copy, Clone, Default)]
pub struct Dispatcher {
    config: Config,
}
impl Dispatcher {
    /// Creates a new dispatcher.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs one command line.
    ///
    /// A line that holds a command makes exactly one call on `gpio`. A line
    /// that does not makes none.
    ///
    /// # Parameters
    ///
    /// - `line`: The raw bytes of the line, without its terminating newline.
    /// - `gpio`: The board to run the command on.
    ///
    /// # Returns
    ///
    /// The reply to send back: the value read for read commands, otherwise
    /// a status.
    pub fn dispatch<G: Gpio>(&self, line: &[u8], gpio: &mut G) -> Reply {
        match Command::parse(line, &self.config) {
            Ok(command) => execute(command, gpio),
            Err(status) => Reply::Status(status),
        }
    }
}

/// Runs a parsed command.
pub fn execute<G: Gpio>(command: Command, gpio: &mut G) -> Reply {
    match command {
        Command::PinMode { pin, mode } => {
            gpio.set_pin_mode(pin, mode);
            Reply::Status(Status::Success)
        }
        Command::DigitalWrite { pin, level } => {
            gpio.digital_write(pin, level);
            Reply::Status(Status::Success)
        }
        Command::DigitalRead { pin } => {
            Reply::Value(gpio.digital_read(pin).as_value())
        }
        Command::AnalogWrite { pin, duty } => {
            gpio.analog_write(pin, duty);
            Reply::Status(Status::Success)
        }
        Command::AnalogRead { pin } => Reply::Value(gpio.analog_read(pin)),
    }
}
