//! Control the vibration motor
//!
//! Implementation based upon https://github.com/tstellanova/cst816s/blob/master/examples/touchpad.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Output, peripherals::P0_16};
use embassy_time::Timer;

/// Pulse length in milliseconds
#[allow(unused)]
#[derive(Clone, Copy)]
pub enum PulseLength {
    /// 200ms pulse
    Short = 200,
    /// 400ms pulse
    Long = 400,
}

struct VibratorConfig<'a> {
    /// Motor enable pin (inverted)
    pin_enable: Output<'a, P0_16>,
}

pub struct Vibrator {
    /// Vibrator configuration
    config: VibratorConfig<'static>,
}

impl Vibrator {
    /// Configure vibrator on boot
    pub fn init(enable_pin: Output<'static, P0_16>) -> Self {
        Self {
            config: VibratorConfig {
                pin_enable: enable_pin,
            },
        }
    }

    /// Run the motor for `times` pulses of the given length, with a
    /// matching pause after each pulse.
    pub async fn pulse(&mut self, length: PulseLength, times: u8) {
        for _ in 0..times {
            self.config.pin_enable.set_low();
            Timer::after_millis(length as u64).await;
            self.config.pin_enable.set_high();
            Timer::after_millis(length as u64).await;
        }
    }
}
