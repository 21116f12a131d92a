//! Side button on P0.13, powered through P0.15

use debouncr::{debounce_3, Debouncer, Edge, Repeat3};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_13, P0_15},
};
use embassy_time::{Duration, Timer};

/// Time the sense line needs after the button is powered
const SETTLE: Duration = Duration::from_micros(1);

/// Debounced side button.
///
/// The button draws about 34µA while powered, so it is only switched on for
/// the duration of a single read.
pub struct Button {
    sense: Input<'static, P0_13>,
    power: Output<'static, P0_15>,
    filter: Debouncer<u8, Repeat3>,
}

impl Button {
    pub fn init(sense: Input<'static, P0_13>, power: Output<'static, P0_15>) -> Self {
        Self {
            sense,
            power,
            filter: debounce_3(false),
        }
    }

    /// Power the button, read the sense line and power it down again.
    async fn read_level(&mut self) -> bool {
        self.power.set_high();
        Timer::after(SETTLE).await;
        let level = self.sense.is_high();
        self.power.set_low();
        level
    }

    /// Feed one reading into the filter and report a settled level change.
    pub async fn sample(&mut self) -> Option<Edge> {
        let level = self.read_level().await;
        self.filter.update(level)
    }

    /// True once per press, when the filtered level goes high.
    pub async fn pressed(&mut self) -> bool {
        matches!(self.sample().await, Some(Edge::Rising))
    }
}
