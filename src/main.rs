#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::{RNG, SPI2},
    rng::{self, Rng},
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker, Timer};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
    RNG => rng::InterruptHandler<RNG>;
});

// Crate
use peripherals::{backlight::Backlight, battery::Battery, button::Button, display::Display};
use system::{
    config::{SystemConfig, INITIAL_BRIGHTNESS, TIMEZONE},
    time::{Clock, TimeReference},
};

// Others
use chrono::{NaiveDateTime, Timelike};
use glyphface::{clock::MinuteTicker, BatteryInfo, Watchface};
use rand::{rngs::SmallRng, SeedableRng};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryInfo> = Signal::new();
static BUTTON_PRESSED: Signal<ThreadModeRawMutex, ()> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery) {
    loop {
        match battery.update().await {
            Ok(Some(info)) => {
                defmt::debug!("Battery status updated");
                BATTERY_STATUS.signal(info);
            }
            Ok(None) => {}
            Err(err) => defmt::warn!("Battery measurement failed: {}", err),
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Step the backlight on every button press
#[embassy_executor::task(pool_size = 1)]
async fn update_brightness(mut backlight: Backlight) {
    loop {
        BUTTON_PRESSED.wait().await;
        backlight.step();
        defmt::info!("Backlight brightness: {}", backlight.get_brightness());
    }
}

/// Repaint the watchface whenever the time or battery changes
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display<SPI2>, mut face: Watchface<SmallRng>) {
    loop {
        match select(TIME.wait(), BATTERY_STATUS.wait()).await {
            Either::First(time) => {
                defmt::info!("Minute tick: {}:{}", time.hour(), time.minute());
                if let Err(err) = face.on_tick(&time) {
                    defmt::warn!("Failed to update watchface: {}", err);
                }
            }
            Either::Second(status) => {
                defmt::info!(
                    "Battery status: {}% ({})",
                    status.percent,
                    if status.charging {
                        "charging"
                    } else {
                        "discharging"
                    }
                );
                face.on_battery(status);
            }
        }

        if face.is_dirty() {
            defmt::debug!("Repainting with {}", face.scheme());
            if let Err(err) = display.render(&mut face) {
                defmt::error!("Repaint failed: {}", err);
            }
        }
    }
}

/// Signal the current time once per minute.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: Clock) {
    let mut minutes = MinuteTicker::default();
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        let now = clock.now();
        if minutes.tick(&now) {
            TIME.signal(now);
        }

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Polls the button state every 10ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        if button.pressed().await {
            BUTTON_PRESSED.signal(());
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Battery
    let mut battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None));
    match battery.update().await {
        Ok(Some(info)) => BATTERY_STATUS.signal(info),
        Ok(None) => {}
        Err(err) => defmt::warn!("Initial battery measurement failed: {}", err),
    }

    // Initialize Backlight
    let mut backlight = Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        0,
    );

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Seed the colour and glyph randomizer from the hardware RNG
    let mut hw_rng = Rng::new(p.RNG, Irqs);
    let mut seed = [0u8; 8];
    hw_rng.blocking_fill_bytes(&mut seed);
    let rng = SmallRng::seed_from_u64(u64::from_le_bytes(seed));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));
    backlight.set(INITIAL_BRIGHTNESS);

    // Load the watchface
    let config = SystemConfig::watchface();
    defmt::info!("{}", config);
    let face = unwrap!(Watchface::new(config, rng));
    defmt::debug!("Fonts: {}", glyphface::fonts::pair(face.font_index()));

    // Start the clock from the build time
    let reference = TimeReference::from_timestamp(UTC_EPOCH).unwrap_or_default();
    let clock = Clock::init(reference, TIMEZONE);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(update_brightness(backlight)));
    unwrap!(spawner.spawn(update_lcd(display, face)));
    unwrap!(spawner.spawn(update_time(clock)));
}
