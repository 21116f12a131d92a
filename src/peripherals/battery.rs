//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use glyphface::battery::{self, millivolts_from_adc, percent_from_millivolts, BatteryInfo};

/// Battery configuration
struct BatteryConfig<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
}

/// Battery API
pub struct Battery {
    /// Battery configuration
    config: BatteryConfig<'static>,
    /// Last reported state
    info: Option<BatteryInfo>,
}

impl Battery {
    /// Configure battery settings on boot
    pub fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Self {
        Self {
            config: BatteryConfig {
                adc,
                pin_charge_indication: charge_pin,
            },
            info: None,
        }
    }

    /// Charging state of the battery
    pub fn is_charging(&self) -> bool {
        self.config.pin_charge_indication.is_low()
    }

    /// Battery capacity in percent
    pub async fn get_percent(&mut self) -> Result<u8, battery::Error> {
        let voltage = self.get_voltage().await?;
        Ok(percent_from_millivolts(voltage))
    }

    /// Read the current state from the hardware.
    ///
    /// Returns the new state only if it differs from the last one reported.
    pub async fn update(&mut self) -> Result<Option<BatteryInfo>, battery::Error> {
        let info = BatteryInfo {
            percent: self.get_percent().await?,
            charging: self.is_charging(),
        };

        if self.info == Some(info) {
            return Ok(None);
        }
        self.info = Some(info);
        Ok(Some(info))
    }

    /// Battery voltage in millivolts
    async fn get_voltage(&mut self) -> Result<u16, battery::Error> {
        let mut buf = [0; 1];
        self.config.adc.sample(&mut buf).await;
        millivolts_from_adc(buf[0])
    }
}
