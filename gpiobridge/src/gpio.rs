use crate::{Duty, Level, Pin, PinMode};

/// Access to the pins of a board.
///
/// Every operation is infallible. Pins the board does not have are ignored
/// by writes, and read as zero.
pub trait Gpio {
    /// Sets the mode of a pin.
    fn set_pin_mode(&mut self, pin: Pin, mode: PinMode);

    /// Drives a pin low or high.
    fn digital_write(&mut self, pin: Pin, level: Level);

    /// Reads the level of a pin.
    fn digital_read(&mut self, pin: Pin) -> Level;

    /// Writes a PWM duty cycle to a pin.
    fn analog_write(&mut self, pin: Pin, duty: Duty);

    /// Reads the ADC value of a pin.
    fn analog_read(&mut self, pin: Pin) -> u16;
}

/// A call made on a [TestGpio].
#[cfg(test)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GpioCall {
    SetPinMode(Pin, PinMode),
    DigitalWrite(Pin, Level),
    DigitalRead(Pin),
    AnalogWrite(Pin, Duty),
    AnalogRead(Pin),
}

/// Board to use for testing purposes.
///
/// It records every call, and answers reads with fixed values.
#[cfg(test)]
pub struct TestGpio {
    calls: Vec<GpioCall>,
    digital_level: Level,
    analog_value: u16,
}
#[cfg(test)]
impl TestGpio {
    /// Creates a new test board.
    ///
    /// # Parameters
    ///
    /// - `digital_level`: Level returned by every digital read.
    /// - `analog_value`: Value returned by every analog read.
    pub fn new(digital_level: Level, analog_value: u16) -> Self {
        Self {
            calls: Vec::new(),
            digital_level,
            analog_value,
        }
    }

    /// Returns the calls made so far, oldest first.
    pub fn calls(&self) -> &[GpioCall] {
        &self.calls
    }
}
#[cfg(test)]
impl Default for TestGpio {
    fn default() -> Self {
        Self::new(Level::Low, 0)
    }
}
#[cfg(test)]
impl Gpio for TestGpio {
    fn set_pin_mode(&mut self, pin: Pin, mode: PinMode) {
        self.calls.push(GpioCall::SetPinMode(pin, mode));
    }

    fn digital_write(&mut self, pin: Pin, level: Level) {
        self.calls.push(GpioCall::DigitalWrite(pin, level));
    }

    fn digital_read(&mut self, pin: Pin) -> Level {
        self.calls.push(GpioCall::DigitalRead(pin));
        self.digital_level
    }

    fn analog_write(&mut self, pin: Pin, duty: Duty) {
        self.calls.push(GpioCall::AnalogWrite(pin, duty));
    }

    fn analog_read(&mut self, pin: Pin) -> u16 {
        self.calls.push(GpioCall::AnalogRead(pin));
        self.analog_value
    }
}
