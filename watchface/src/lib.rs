//! Board-agnostic watchface logic
//!
//! Everything the watchface decides on a tick lives here, independent of the
//! PineTime peripherals:
//!
//! - Colour scheme generation (random, legibility-driven or fixed palette)
//! - Time and date strings with randomly chosen separator glyphs
//! - Battery bar width and voltage to charge estimation
//! - Font rotation
//! - Minute tick detection
//! - The watchface state itself and its rendering onto any `DrawTarget`

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod battery;
pub mod clock;
pub mod config;
pub mod face;
pub mod fonts;
pub mod palette;
pub mod text;

pub use battery::BatteryInfo;
pub use config::{Layout, WatchfaceConfig};
pub use face::Watchface;
pub use palette::{Color, ColorMode, ColorScheme};
