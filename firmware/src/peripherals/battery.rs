//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};

/// Snapshot of the battery state.
#[derive(Clone, Copy)]
pub struct BatteryInfo {
    /// Charging state
    pub charging: bool,
    /// Battery percentage, 0–100
    pub percent: u8,
}

/// Battery API
pub struct Battery {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'static, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'static, P0_12>,
    /// Last observed state
    info: BatteryInfo,
}

impl Battery {
    /// Read the initial state and configure battery monitoring on boot
    pub async fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Self {
        let mut battery = Self {
            adc,
            pin_charge_indication: charge_pin,
            info: BatteryInfo {
                charging: false,
                percent: 0,
            },
        };
        battery.info = BatteryInfo {
            charging: battery.is_charging(),
            percent: battery.sample_percent().await,
        };
        battery
    }

    /// Last observed state. Call `update()` to refresh it.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Charging state of the battery
    pub fn is_charging(&self) -> bool {
        self.pin_charge_indication.is_low()
    }

    /// Re-read charge pin and voltage; true if anything changed.
    pub async fn update(&mut self) -> bool {
        let info = BatteryInfo {
            charging: self.is_charging(),
            percent: self.sample_percent().await,
        };
        let changed = info.percent != self.info.percent || info.charging != self.info.charging;
        self.info = info;
        changed
    }

    /// Battery capacity in percent
    async fn sample_percent(&mut self) -> u8 {
        let voltage = self.voltage_millivolts().await;

        // Use fixed data points and linear interpolation in between
        // to estimate battery capacity.
        (match voltage {
            0..=3449 => 0,
            3450..=3699 => (voltage - 3450) / 5,
            3700..=4199 => 50 + (voltage - 3700) / 10,
            _ => 100,
        }) as u8
    }

    /// Battery voltage in millivolts
    async fn voltage_millivolts(&mut self) -> u16 {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
        // Use u32 during calculation to prevent overflow
        (buf[0] as u32 * 2000 / 1241) as u16
    }
}
