use ufmt_macros::uDebug;

use super::numbers::{parse_legacy_int, parse_strict_int};
use super::tokens::{Tokens, MAX_TOKENS};
use crate::{Config, Status, PREFIX};

/// Pin number, as understood by the board.
///
/// Pin numbers are not checked here; the board ignores pins it does not
/// have.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub struct Pin(u8);
impl Pin {
    /// Creates a new `Pin`.
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the pin number.
    pub fn get_value(&self) -> u8 {
        self.0
    }
}

/// PWM duty cycle, from 0 (always low) to 255 (always high).
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub struct Duty(u8);
impl Duty {
    /// Creates a new `Duty`.
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the duty value.
    pub fn get_value(&self) -> u8 {
        self.0
    }
}

/// Pin modes.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum PinMode {
    Output,
    Input,
    InputPullup,
}
impl PinMode {
    /// Reads a mode token.
    ///
    /// `OUTPUT` and `INPUT` must match exactly. Every other token, including
    /// a missing one, selects [PinMode::InputPullup].
    pub fn from_token(token: Option<&[u8]>) -> PinMode {
        match token {
            Some(b"OUTPUT") => PinMode::Output,
            Some(b"INPUT") => PinMode::Input,
            _ => PinMode::InputPullup,
        }
    }

    /// Returns the canonical token for the mode.
    pub fn as_token(&self) -> &'static str {
        match self {
            PinMode::Output => "OUTPUT",
            PinMode::Input => "INPUT",
            PinMode::InputPullup => "INPUT_PULLUP",
        }
    }
}

/// Digital levels.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum Level {
    Low,
    High,
}
impl Level {
    /// Reads a level token.
    ///
    /// Only an exact `LOW` is low; anything else, including a missing token,
    /// is high.
    pub fn from_token(token: Option<&[u8]>) -> Level {
        match token {
            Some(b"LOW") => Level::Low,
            _ => Level::High,
        }
    }

    /// Returns the canonical token for the level.
    pub fn as_token(&self) -> &'static str {
        match self {
            Level::Low => "LOW",
            Level::High => "HIGH",
        }
    }

    /// Returns the level as it is reported back (`0` or `1`).
    pub fn as_value(&self) -> u16 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Opcodes.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum Opcode {
    PinMode,
    DigitalWrite,
    DigitalRead,
    AnalogWrite,
    AnalogRead,
}
impl Opcode {
    /// Looks up an opcode from its exact token.
    pub fn from_token(token: &[u8]) -> Option<Opcode> {
        use Opcode::*;
        match token {
            b"PINMODE" => Some(PinMode),
            b"DIGITALWRITE" => Some(DigitalWrite),
            b"DIGITALREAD" => Some(DigitalRead),
            b"ANALOGWRITE" => Some(AnalogWrite),
            b"ANALOGREAD" => Some(AnalogRead),
            _ => None,
        }
    }

    /// Returns the token for the opcode.
    pub fn as_token(&self) -> &'static str {
        use Opcode::*;
        match self {
            PinMode => "PINMODE",
            DigitalWrite => "DIGITALWRITE",
            DigitalRead => "DIGITALREAD",
            AnalogWrite => "ANALOGWRITE",
            AnalogRead => "ANALOGREAD",
        }
    }
}

/// Commands.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum Command {
    /// PINMODE: Set the mode of a pin.
    PinMode { pin: Pin, mode: PinMode },
    /// DIGITALWRITE: Drive a pin low or high.
    DigitalWrite { pin: Pin, level: Level },
    /// DIGITALREAD: Read the level of a pin.
    DigitalRead { pin: Pin },
    /// ANALOGWRITE: Write a PWM duty cycle to a pin.
    AnalogWrite { pin: Pin, duty: Duty },
    /// ANALOGREAD: Read the ADC value of a pin.
    AnalogRead { pin: Pin },
}
impl Command {
    /// Parses one command line.
    ///
    /// This only interprets the line; no hardware is touched. Tokens after
    /// the ones a command needs are ignored.
    ///
    /// # Parameters
    ///
    /// - `line`: The raw bytes of the line, without its terminating newline.
    /// - `config`: Protocol configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(command)`: if the line holds a command.
    /// - `Err(status)`: the status to report otherwise.
    pub fn parse(line: &[u8], config: &Config) -> Result<Command, Status> {
        let mut tokens: Tokens<'_, MAX_TOKENS> = Tokens::split(line);
        Self::parse_prefix(&mut tokens, config)?;
        let opcode = tokens
            .next()
            .and_then(Opcode::from_token)
            .ok_or(Status::UnknownOpcode)?;

        let command = match opcode {
            Opcode::PinMode => Command::PinMode {
                pin: parse_pin(tokens.next(), config)?,
                mode: PinMode::from_token(tokens.next()),
            },
            Opcode::DigitalWrite => Command::DigitalWrite {
                pin: parse_pin(tokens.next(), config)?,
                level: Level::from_token(tokens.next()),
            },
            Opcode::DigitalRead => Command::DigitalRead {
                pin: parse_pin(tokens.next(), config)?,
            },
            Opcode::AnalogWrite => Command::AnalogWrite {
                pin: parse_pin(tokens.next(), config)?,
                duty: parse_duty(tokens.next(), config)?,
            },
            Opcode::AnalogRead => Command::AnalogRead {
                pin: parse_pin(tokens.next(), config)?,
            },
        };
        Ok(command)
    }

    /// Returns the opcode of the command.
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::PinMode { .. } => Opcode::PinMode,
            Command::DigitalWrite { .. } => Opcode::DigitalWrite,
            Command::DigitalRead { .. } => Opcode::DigitalRead,
            Command::AnalogWrite { .. } => Opcode::AnalogWrite,
            Command::AnalogRead { .. } => Opcode::AnalogRead,
        }
    }

    /// Returns the pin the command acts on.
    pub fn pin(&self) -> Pin {
        match *self {
            Command::PinMode { pin, .. }
            | Command::DigitalWrite { pin, .. }
            | Command::DigitalRead { pin }
            | Command::AnalogWrite { pin, .. }
            | Command::AnalogRead { pin } => pin,
        }
    }

    /// Consume the prefix token.
    ///
    /// When the prefix is optional, the first token is taken as a prefix of
    /// any value, unless it is already an opcode. A leading opcode always
    /// means the prefix is absent, so `DIGITALWRITE FROBNICATE 3` writes
    /// pin 0 (the legacy value of `FROBNICATE`) high rather than reporting
    /// `FROBNICATE` as an unknown opcode.
    fn parse_prefix(
        tokens: &mut Tokens<'_, MAX_TOKENS>,
        config: &Config,
    ) -> Result<(), Status> {
        if config.require_prefix {
            match tokens.next() {
                Some(token) if token == PREFIX.as_bytes() => Ok(()),
                _ => Err(Status::BadPrefix),
            }
        } else {
            if tokens.peek().and_then(Opcode::from_token).is_none() {
                tokens.next();
            }
            Ok(())
        }
    }
}

/// Convert a numeric token according to the configuration.
fn parse_number(token: Option<&[u8]>, config: &Config) -> Result<i32, Status> {
    if config.strict_numbers {
        token
            .ok_or(Status::InvalidArgument)
            .and_then(|t| {
                parse_strict_int(t).map_err(|_| Status::InvalidArgument)
            })
    } else {
        Ok(token.map_or(0, parse_legacy_int))
    }
}

/// Convert a pin token.
///
/// Legacy numbers are truncated to 8 bits, like the board's `uint8_t` pin
/// argument.
fn parse_pin(token: Option<&[u8]>, config: &Config) -> Result<Pin, Status> {
    let value = parse_number(token, config)?;
    to_u8(value, config).map(Pin::new)
}

/// Convert a PWM duty token.
fn parse_duty(token: Option<&[u8]>, config: &Config) -> Result<Duty, Status> {
    let value = parse_number(token, config)?;
    to_u8(value, config).map(Duty::new)
}

fn to_u8(value: i32, config: &Config) -> Result<u8, Status> {
    if config.strict_numbers {
        u8::try_from(value).map_err(|_| Status::InvalidArgument)
    } else {
        Ok(value as u8)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::config::test::config;
    use proptest::prelude::*;

    const LEGACY: Config = Config::LEGACY;
    const STRICT: Config = Config::new(true, true);
    const OPEN: Config = Config::new(false, false);

    /// Strategy for generating [Pin].
    pub fn pin() -> impl Strategy<Value = Pin> {
        any::<u8>().prop_map(Pin::new)
    }

    /// Strategy for generating [Duty].
    pub fn duty() -> impl Strategy<Value = Duty> {
        any::<u8>().prop_map(Duty::new)
    }

    /// Strategy for generating [PinMode].
    pub fn pin_mode() -> impl Strategy<Value = PinMode> {
        use PinMode::*;
        prop_oneof![Just(Output), Just(Input), Just(InputPullup)]
    }

    /// Strategy for generating [Level].
    pub fn level() -> impl Strategy<Value = Level> {
        prop_oneof![Just(Level::Low), Just(Level::High)]
    }

    /// Strategy for generating [Command].
    pub fn command() -> impl Strategy<Value = Command> {
        prop_oneof![
            (pin(), pin_mode())
                .prop_map(|(pin, mode)| Command::PinMode { pin, mode }),
            (pin(), level())
                .prop_map(|(pin, level)| Command::DigitalWrite { pin, level }),
            pin().prop_map(|pin| Command::DigitalRead { pin }),
            (pin(), duty())
                .prop_map(|(pin, duty)| Command::AnalogWrite { pin, duty }),
            pin().prop_map(|pin| Command::AnalogRead { pin }),
        ]
    }

    /// Strategy for generating tokens that are not opcodes.
    pub fn non_opcode() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_]{1,12}"
            .prop_filter("must not be an opcode", |t| {
                Opcode::from_token(t.as_bytes()).is_none()
            })
    }

    #[test]
    fn test_parse_examples() {
        assert_eq!(
            Ok(Command::PinMode {
                pin: Pin::new(13),
                mode: PinMode::Output
            }),
            Command::parse(b"VMX PINMODE 13 OUTPUT", &LEGACY)
        );
        assert_eq!(
            Ok(Command::DigitalWrite {
                pin: Pin::new(4),
                level: Level::Low
            }),
            Command::parse(b"VMX DIGITALWRITE 4 LOW", &LEGACY)
        );
        assert_eq!(
            Ok(Command::DigitalRead { pin: Pin::new(7) }),
            Command::parse(b"VMX DIGITALREAD 7", &LEGACY)
        );
        assert_eq!(
            Ok(Command::AnalogWrite {
                pin: Pin::new(9),
                duty: Duty::new(128)
            }),
            Command::parse(b"VMX ANALOGWRITE 9 128", &LEGACY)
        );
        assert_eq!(
            Ok(Command::AnalogRead { pin: Pin::new(14) }),
            Command::parse(b"VMX ANALOGREAD 14", &LEGACY)
        );
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(
            Err(Status::BadPrefix),
            Command::parse(b"FOO PINMODE 13 OUTPUT", &LEGACY)
        );
        assert_eq!(
            Err(Status::BadPrefix),
            Command::parse(b"vmx PINMODE 13 OUTPUT", &LEGACY)
        );
        assert_eq!(
            Err(Status::BadPrefix),
            Command::parse(b"PINMODE 13 OUTPUT", &LEGACY)
        );
        assert_eq!(Err(Status::BadPrefix), Command::parse(b"", &LEGACY));
    }

    #[test]
    fn test_parse_optional_prefix() {
        let expected = Ok(Command::DigitalRead { pin: Pin::new(7) });
        assert_eq!(expected, Command::parse(b"VMX DIGITALREAD 7", &OPEN));
        assert_eq!(expected, Command::parse(b"FOO DIGITALREAD 7", &OPEN));
        assert_eq!(expected, Command::parse(b"DIGITALREAD 7", &OPEN));
        assert_eq!(Err(Status::UnknownOpcode), Command::parse(b"", &OPEN));
    }

    #[test]
    fn test_parse_leading_opcode_is_not_a_prefix() {
        assert_eq!(
            Ok(Command::DigitalWrite {
                pin: Pin::new(0),
                level: Level::High
            }),
            Command::parse(b"DIGITALWRITE FROBNICATE 3", &OPEN)
        );
        assert_eq!(
            Ok(Command::DigitalRead { pin: Pin::new(0) }),
            Command::parse(b"DIGITALREAD PINMODE 3", &OPEN)
        );
        assert_eq!(
            Err(Status::UnknownOpcode),
            Command::parse(b"VMX FROBNICATE 3", &OPEN)
        );
    }

    #[test]
    fn test_parse_high_bytes() {
        assert_eq!(
            Err(Status::BadPrefix),
            Command::parse(b"VMX\xA0PINMODE 13 OUTPUT", &LEGACY)
        );
        assert_eq!(
            Err(Status::UnknownOpcode),
            Command::parse(b"VMX PINMODE\xC0 13 OUTPUT", &LEGACY)
        );
        assert_eq!(
            Ok(Command::PinMode {
                pin: Pin::new(13),
                mode: PinMode::InputPullup
            }),
            Command::parse(b"VMX PINMODE 13 OUTPUT\xC0", &LEGACY)
        );
    }

    #[test]
    fn test_parse_unknown_opcode() {
        assert_eq!(
            Err(Status::UnknownOpcode),
            Command::parse(b"VMX FROBNICATE 1 2", &LEGACY)
        );
        assert_eq!(
            Err(Status::UnknownOpcode),
            Command::parse(b"VMX pinmode 1 OUTPUT", &LEGACY)
        );
        assert_eq!(Err(Status::UnknownOpcode), Command::parse(b"VMX", &LEGACY));
    }

    #[test]
    fn test_parse_legacy_numbers() {
        assert_eq!(
            Ok(Command::DigitalRead { pin: Pin::new(0) }),
            Command::parse(b"VMX DIGITALREAD", &LEGACY)
        );
        assert_eq!(
            Ok(Command::DigitalRead { pin: Pin::new(0) }),
            Command::parse(b"VMX DIGITALREAD seven", &LEGACY)
        );
        assert_eq!(
            Ok(Command::AnalogWrite {
                pin: Pin::new(3),
                duty: Duty::new(0)
            }),
            Command::parse(b"VMX ANALOGWRITE 3x", &LEGACY)
        );
        assert_eq!(
            Ok(Command::AnalogWrite {
                pin: Pin::new(3),
                duty: Duty::new(44)
            }),
            Command::parse(b"VMX ANALOGWRITE 3 300", &LEGACY)
        );
    }

    #[test]
    fn test_parse_strict_numbers() {
        assert_eq!(
            Err(Status::InvalidArgument),
            Command::parse(b"VMX DIGITALREAD", &STRICT)
        );
        assert_eq!(
            Err(Status::InvalidArgument),
            Command::parse(b"VMX DIGITALREAD seven", &STRICT)
        );
        assert_eq!(
            Err(Status::InvalidArgument),
            Command::parse(b"VMX ANALOGWRITE 3 300", &STRICT)
        );
        assert_eq!(
            Err(Status::InvalidArgument),
            Command::parse(b"VMX ANALOGWRITE -1 3", &STRICT)
        );
        assert_eq!(
            Ok(Command::AnalogWrite {
                pin: Pin::new(3),
                duty: Duty::new(255)
            }),
            Command::parse(b"VMX ANALOGWRITE 3 255", &STRICT)
        );
    }

    #[test]
    fn test_parse_ignores_trailing_tokens() {
        assert_eq!(
            Ok(Command::DigitalWrite {
                pin: Pin::new(5),
                level: Level::High
            }),
            Command::parse(b"VMX DIGITALWRITE 5 HIGH and more", &STRICT)
        );
    }

    #[test]
    fn test_missing_mode_and_level() {
        assert_eq!(
            Ok(Command::PinMode {
                pin: Pin::new(2),
                mode: PinMode::InputPullup
            }),
            Command::parse(b"VMX PINMODE 2", &LEGACY)
        );
        assert_eq!(
            Ok(Command::DigitalWrite {
                pin: Pin::new(2),
                level: Level::High
            }),
            Command::parse(b"VMX DIGITALWRITE 2", &LEGACY)
        );
    }

    #[test]
    fn test_command_pin() {
        let cmd = Command::AnalogWrite {
            pin: Pin::new(6),
            duty: Duty::new(1),
        };
        assert_eq!(Pin::new(6), cmd.pin());
        assert_eq!(Opcode::AnalogWrite, cmd.opcode());
    }

    proptest! {
        #[test]
        fn test_mode_fallback(token in "[A-Za-z_]{1,14}", pin: u8) {
            let expected = match token.as_str() {
                "OUTPUT" => PinMode::Output,
                "INPUT" => PinMode::Input,
                _ => PinMode::InputPullup,
            };
            let line = format!("VMX PINMODE {} {}", pin, token);
            assert_eq!(
                Ok(Command::PinMode { pin: Pin::new(pin), mode: expected }),
                Command::parse(line.as_bytes(), &LEGACY)
            );
        }
    }

    proptest! {
        #[test]
        fn test_level_fallback(token in "[A-Za-z0-9_]{1,8}", pin: u8) {
            let expected = if token == "LOW" { Level::Low } else { Level::High };
            let line = format!("VMX DIGITALWRITE {} {}", pin, token);
            assert_eq!(
                Ok(Command::DigitalWrite { pin: Pin::new(pin), level: expected }),
                Command::parse(line.as_bytes(), &LEGACY)
            );
        }
    }

    proptest! {
        #[test]
        fn test_prefix_required(
            prefix in non_opcode().prop_filter("not the prefix", |p| p != PREFIX),
            command in command()
        ) {
            let line = format!("{} {} {}", prefix, command.opcode().as_token(), command.pin().get_value());
            assert_eq!(Err(Status::BadPrefix), Command::parse(line.as_bytes(), &LEGACY));
        }
    }

    proptest! {
        #[test]
        fn test_unknown_opcode(
            cfg in config(),
            opcode in non_opcode(),
            pin: u8
        ) {
            let line = format!("{} {} {}", PREFIX, opcode, pin);
            assert_eq!(Err(Status::UnknownOpcode), Command::parse(line.as_bytes(), &cfg));
        }
    }
}
