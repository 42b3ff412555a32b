use arduino_hal::{
    adc::Channel,
    hal::port::{PD0, PD1},
    pac::USART0,
    port::{
        mode::{Floating, Input, Io, Output, PullUp},
        Pin,
    },
    prelude::_unwrap_infallible_UnwrapInfallible,
    Adc, Usart,
};
use embedded_hal::digital::{OutputPin, PinState};
use gpiobridge::{Duty, Gpio, Level, PinMode};

use crate::pwm::UnoPwm;

pub type UnoSerial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

/// First digital pin available to commands; D0 and D1 carry the UART.
const FIRST_DIGITAL: u8 = 2;
/// Number of digital pins available to commands (D2 to D13).
pub const N_DIGITAL: usize = 12;
/// Pin number of A0 when it is addressed as a digital pin.
const FIRST_ANALOG: u8 = 14;
/// Number of analog inputs (A0 to A5).
pub const N_ANALOG: usize = 6;
/// The on-board LED.
const LED_BUILTIN: u8 = 13;

/// A digital pin whose mode is chosen at run time.
enum DynamicPin {
    Output(Pin<Output>),
    Floating(Pin<Input<Floating>>),
    PullUp(Pin<Input<PullUp>>),
}
impl DynamicPin {
    /// Switch the pin to a new mode.
    fn into_mode(self, mode: PinMode) -> Self {
        match self {
            DynamicPin::Output(pin) => convert(pin, mode),
            DynamicPin::Floating(pin) => convert(pin, mode),
            DynamicPin::PullUp(pin) => convert(pin, mode),
        }
    }

    /// Drive the pin.
    ///
    /// Writing to an input switches its pull-up instead, like the Arduino
    /// core does.
    fn write(self, level: Level) -> Self {
        match (self, level) {
            (DynamicPin::Output(mut pin), level) => {
                let state = PinState::from(level == Level::High);
                pin.set_state(state).unwrap_infallible();
                DynamicPin::Output(pin)
            }
            (pin, Level::Low) => pin.into_mode(PinMode::Input),
            (pin, Level::High) => pin.into_mode(PinMode::InputPullup),
        }
    }

    /// Read the pin. An output reads back the level it drives.
    fn read(&self) -> Level {
        let high = match self {
            DynamicPin::Output(pin) => pin.is_set_high(),
            DynamicPin::Floating(pin) => pin.is_high(),
            DynamicPin::PullUp(pin) => pin.is_high(),
        };
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

fn convert<M: Io>(pin: Pin<M>, mode: PinMode) -> DynamicPin {
    match mode {
        PinMode::Output => DynamicPin::Output(pin.into_output()),
        PinMode::Input => DynamicPin::Floating(pin.into_floating_input()),
        PinMode::InputPullup => DynamicPin::PullUp(pin.into_pull_up_input()),
    }
}

/// Pins of the Arduino Uno, addressed by their Arduino pin numbers.
///
/// D2 to D13 are digital pins; D3, D5, D6, D9, D10 and D11 can also be
/// driven by their timers. A0 to A5 are owned by the ADC, and can be read as
/// pin 0 to 5 or 14 to 19. Other pins are ignored, and read as zero.
///
/// Like the Arduino core, any digital access to a pin first hands it back
/// from its timer.
pub struct UnoGpio {
    digital: [Option<DynamicPin>; N_DIGITAL],
    analog: [Channel; N_ANALOG],
    adc: Adc,
    pwm: UnoPwm,
}
impl UnoGpio {
    /// Creates the board, with the on-board LED driven low.
    ///
    /// # Parameters
    ///
    /// - `digital`: D2 to D13, in order.
    /// - `analog`: ADC channels for A0 to A5, in order.
    /// - `adc`: The ADC.
    /// - `pwm`: Timer outputs for the PWM pins.
    pub fn new(
        digital: [Pin<Input<Floating>>; N_DIGITAL],
        analog: [Channel; N_ANALOG],
        adc: Adc,
        pwm: UnoPwm,
    ) -> Self {
        // Setting up the timer outputs made their pins outputs.
        let digital = digital
            .map(|pin| Some(DynamicPin::Floating(pin.into_floating_input())));
        let mut gpio = Self {
            digital,
            analog,
            adc,
            pwm,
        };
        let led = gpiobridge::Pin::new(LED_BUILTIN);
        gpio.set_pin_mode(led, PinMode::Output);
        gpio.digital_write(led, Level::Low);
        gpio
    }

    /// Return the slot holding a digital pin, if the board has that pin.
    fn slot(
        &mut self,
        pin: gpiobridge::Pin,
    ) -> Option<&mut Option<DynamicPin>> {
        let index = pin.get_value().checked_sub(FIRST_DIGITAL)?;
        self.digital.get_mut(usize::from(index))
    }

    /// Make a pin an output, leaving the level of an existing output alone.
    fn make_output(&mut self, pin: gpiobridge::Pin) {
        if let Some(slot) = self.slot(pin) {
            *slot = slot.take().map(|p| match p {
                DynamicPin::Output(_) => p,
                _ => p.into_mode(PinMode::Output),
            });
        }
    }
}

impl Gpio for UnoGpio {
    fn set_pin_mode(&mut self, pin: gpiobridge::Pin, mode: PinMode) {
        self.pwm.stop(pin.get_value());
        if let Some(slot) = self.slot(pin) {
            *slot = slot.take().map(|p| p.into_mode(mode));
        }
    }

    fn digital_write(&mut self, pin: gpiobridge::Pin, level: Level) {
        self.pwm.stop(pin.get_value());
        if let Some(slot) = self.slot(pin) {
            *slot = slot.take().map(|p| p.write(level));
        }
    }

    fn digital_read(&mut self, pin: gpiobridge::Pin) -> Level {
        self.pwm.stop(pin.get_value());
        match self.slot(pin) {
            Some(Some(p)) => p.read(),
            _ => Level::Low,
        }
    }

    /// Duty 0 and 255 hold the pin low or high. Other duty values run the
    /// pin's timer; pins without one are low below 128 and high otherwise.
    fn analog_write(&mut self, pin: gpiobridge::Pin, duty: Duty) {
        self.make_output(pin);
        let value = duty.get_value();
        if value != 0 && value != 255 && self.pwm.start(pin.get_value(), value)
        {
            return;
        }
        let level = if value < 128 { Level::Low } else { Level::High };
        self.digital_write(pin, level);
    }

    fn analog_read(&mut self, pin: gpiobridge::Pin) -> u16 {
        let mut channel = pin.get_value();
        if channel >= FIRST_ANALOG {
            channel -= FIRST_ANALOG;
        }
        match self.analog.get(usize::from(channel)) {
            Some(channel) => self.adc.read_blocking(channel),
            None => 0,
        }
    }
}
