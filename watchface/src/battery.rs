//! Battery charge estimation and bar sizing
//!
//! Voltage figures follow https://wiki.pine64.org/wiki/PineTime.

/// Charge state as reported by the battery peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Battery charge in percent (0–100)
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

/// Width in pixels of a bar filled to `percent` of `span`.
///
/// Percentages above 100 are treated as 100.
pub fn bar_width(percent: u8, span: u32) -> u32 {
    percent.min(100) as u32 * span / 100
}

/// Estimate the charge in percent from the battery voltage.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    // Fixed data points with linear interpolation in between
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Convert a 12 bit SAADC sample into the battery voltage in millivolts.
///
/// The battery is measured through a 1:2 divider against a 3.3 V reference,
/// so the voltage is `raw * 2 * 3300 / 4096` (= `raw * 2000 / 1241`).
pub fn millivolts_from_adc(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // Keep as 32 bit for the multiplication
            let adc_val = raw_measurement as u32;
            Ok((adc_val * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidMeasurement,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bar_width_endpoints() {
        assert_eq!(bar_width(0, 114), 0);
        assert_eq!(bar_width(100, 114), 114);
        assert_eq!(bar_width(57, 114), 64);
        assert_eq!(bar_width(50, 200), 100);
    }

    #[test]
    fn test_bar_width_clamps_overfull() {
        assert_eq!(bar_width(150, 114), 114);
        assert_eq!(bar_width(u8::MAX, 200), 200);
    }

    #[test]
    fn test_percent_from_millivolts() {
        assert_eq!(percent_from_millivolts(3000), 0);
        assert_eq!(percent_from_millivolts(3449), 0);
        assert_eq!(percent_from_millivolts(3450), 0);
        assert_eq!(percent_from_millivolts(3600), 30);
        assert_eq!(percent_from_millivolts(3699), 49);
        assert_eq!(percent_from_millivolts(3700), 50);
        assert_eq!(percent_from_millivolts(4000), 80);
        assert_eq!(percent_from_millivolts(4199), 99);
        assert_eq!(percent_from_millivolts(4200), 100);
        assert_eq!(percent_from_millivolts(u16::MAX), 100);
    }

    #[test]
    fn test_adc_conversion() {
        assert_eq!(millivolts_from_adc(0), Ok(0));
        // 3.9 V battery -> 1.95 V at the pin
        assert_eq!(millivolts_from_adc(2420), Ok(3900));
        assert_eq!(millivolts_from_adc(4095), Ok(6599));
    }

    #[test]
    fn test_adc_rejects_out_of_range() {
        assert_eq!(millivolts_from_adc(-1), Err(Error::InvalidMeasurement));
        assert_eq!(millivolts_from_adc(4096), Err(Error::InvalidMeasurement));
    }

    proptest! {
        #[test]
        fn bar_width_is_monotonic(a in 0u8..=100, b in 0u8..=100, span in 1u32..1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bar_width(lo, span) <= bar_width(hi, span));
            prop_assert!(bar_width(hi, span) <= span);
        }

        #[test]
        fn percent_never_exceeds_hundred(mv in any::<u16>()) {
            prop_assert!(percent_from_millivolts(mv) <= 100);
        }
    }
}
