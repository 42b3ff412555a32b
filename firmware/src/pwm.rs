use arduino_hal::{
    port::{mode::PwmOutput, Pin, D10, D11, D3, D5, D6, D9},
    simple_pwm::{IntoPwmPin, Prescaler, Timer0Pwm, Timer1Pwm, Timer2Pwm},
    Peripherals, Pins,
};

/// Timer outputs of the Arduino Uno.
///
/// D5 and D6 run from timer 0, D9 and D10 from timer 1, and D3 and D11 from
/// timer 2. All three timers count at 16MHz / 64, giving the same ~980Hz
/// and ~490Hz frequencies as the Arduino core.
///
/// A pin only follows its timer while its output is enabled. When disabled,
/// the pin is driven by its port like any other digital pin, so the same
/// pins can also be held by [crate::uno::UnoGpio].
pub struct UnoPwm {
    d3: Pin<PwmOutput<Timer2Pwm>, D3>,
    d5: Pin<PwmOutput<Timer0Pwm>, D5>,
    d6: Pin<PwmOutput<Timer0Pwm>, D6>,
    d9: Pin<PwmOutput<Timer1Pwm>, D9>,
    d10: Pin<PwmOutput<Timer1Pwm>, D10>,
    d11: Pin<PwmOutput<Timer2Pwm>, D11>,
}
impl UnoPwm {
    /// Starts the timers, with every timer output disabled.
    pub fn new() -> Self {
        let peripherals: Peripherals =
            unsafe { arduino_hal::Peripherals::steal() };
        let timer0 = Timer0Pwm::new(peripherals.TC0, Prescaler::Prescale64);
        let timer1 = Timer1Pwm::new(peripherals.TC1, Prescaler::Prescale64);
        let timer2 = Timer2Pwm::new(peripherals.TC2, Prescaler::Prescale64);
        let pins: Pins = arduino_hal::pins!(peripherals);

        let mut pwm = UnoPwm {
            d3: pins.d3.into_output().into_pwm(&timer2),
            d5: pins.d5.into_output().into_pwm(&timer0),
            d6: pins.d6.into_output().into_pwm(&timer0),
            d9: pins.d9.into_output().into_pwm(&timer1),
            d10: pins.d10.into_output().into_pwm(&timer1),
            d11: pins.d11.into_output().into_pwm(&timer2),
        };
        for pin in [3, 5, 6, 9, 10, 11] {
            pwm.stop(pin);
        }
        pwm
    }

    /// Drive a pin from its timer.
    ///
    /// The pin must already be an output.
    ///
    /// # Returns
    ///
    /// `false` if the pin has no timer output; nothing is changed then.
    pub fn start(&mut self, pin: u8, duty: u8) -> bool {
        match pin {
            3 => {
                self.d3.set_duty(duty);
                self.d3.enable();
            }
            5 => {
                self.d5.set_duty(duty);
                self.d5.enable();
            }
            6 => {
                self.d6.set_duty(duty);
                self.d6.enable();
            }
            9 => {
                self.d9.set_duty(duty);
                self.d9.enable();
            }
            10 => {
                self.d10.set_duty(duty);
                self.d10.enable();
            }
            11 => {
                self.d11.set_duty(duty);
                self.d11.enable();
            }
            _ => return false,
        }
        true
    }

    /// Hand a pin back to its port. Pins without a timer are ignored.
    pub fn stop(&mut self, pin: u8) {
        match pin {
            3 => self.d3.disable(),
            5 => self.d5.disable(),
            6 => self.d6.disable(),
            9 => self.d9.disable(),
            10 => self.d10.disable(),
            11 => self.d11.disable(),
            _ => {}
        }
    }
}
