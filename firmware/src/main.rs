#![no_std]
#![no_main]

mod controller;
mod pwm;
mod uno;

use controller::Controller;
use panic_halt as _;
use pwm::UnoPwm;
use uno::UnoGpio;

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let serial = arduino_hal::default_serial!(dp, pins, Controller::BAUD_RATE);

    let mut adc = arduino_hal::Adc::new(dp.ADC, Default::default());
    let analog = [
        pins.a0.into_analog_input(&mut adc).into_channel(),
        pins.a1.into_analog_input(&mut adc).into_channel(),
        pins.a2.into_analog_input(&mut adc).into_channel(),
        pins.a3.into_analog_input(&mut adc).into_channel(),
        pins.a4.into_analog_input(&mut adc).into_channel(),
        pins.a5.into_analog_input(&mut adc).into_channel(),
    ];
    let digital = [
        pins.d2.downgrade(),
        pins.d3.downgrade(),
        pins.d4.downgrade(),
        pins.d5.downgrade(),
        pins.d6.downgrade(),
        pins.d7.downgrade(),
        pins.d8.downgrade(),
        pins.d9.downgrade(),
        pins.d10.downgrade(),
        pins.d11.downgrade(),
        pins.d12.downgrade(),
        pins.d13.downgrade(),
    ];

    let gpio = UnoGpio::new(digital, analog, adc, UnoPwm::new());
    let mut controller = Controller::new(serial, gpio);
    loop {
        controller.poll();
    }
}
