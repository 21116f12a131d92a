//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};
use glyphface::{ColorMode, Layout, WatchfaceConfig};

/// Offset of local time from UTC in seconds
pub const TIMEZONE: i32 = 1 * 3_600;

/// Backlight level after boot (0–7)
pub const INITIAL_BRIGHTNESS: u8 = 2;

pub struct SystemConfig {}

impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Generate default config, required because Config is set as
        // `non_exhaustive`
        let mut config = Config::default();

        // Set high-frequency and low-frequency clock sources to external
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // Enable DC/DC regulator to massively reduce runtime current consumption
        config.dcdc.reg1 = true;

        // Keep priorities 0, 1 and 4 free for a future SoftDevice
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;

        // Allow debugging
        config.debug = Debug::Allowed;

        config
    }

    /// Watchface settings used at boot
    pub fn watchface() -> WatchfaceConfig {
        WatchfaceConfig {
            clock_24h: true,
            header: "PineTime",
            color_mode: ColorMode::Randomized,
            layout: Layout::PINETIME,
        }
    }
}
