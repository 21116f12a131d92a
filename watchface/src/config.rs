//! Watchface configuration and screen layout

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

use crate::palette::ColorMode;

/// Longest header text accepted by [`WatchfaceConfig::validate`]
pub const MAX_HEADER_LEN: usize = 24;

/// Where each element of the face is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Display size in pixels
    pub size: Size,
    /// Header text box
    pub header: Rectangle,
    /// Time text box
    pub time: Rectangle,
    /// Date text box
    pub date: Rectangle,
    /// Full extent of the battery bar
    pub battery: Rectangle,
    /// Corner radius of the battery bar
    pub battery_corner_radius: u32,
}

impl Layout {
    /// 240x240 ST7789 panel of the PineTime
    pub const PINETIME: Layout = Layout {
        size: Size::new(240, 240),
        header: Rectangle::new(Point::new(0, 16), Size::new(240, 28)),
        time: Rectangle::new(Point::new(0, 72), Size::new(240, 56)),
        date: Rectangle::new(Point::new(0, 140), Size::new(240, 28)),
        battery: Rectangle::new(Point::new(20, 200), Size::new(200, 12)),
        battery_corner_radius: 4,
    };

    /// Pixel span of a full battery bar
    pub fn battery_span(&self) -> u32 {
        self.battery.size.width
    }

    fn contains(&self, rect: &Rectangle) -> bool {
        let right = rect.top_left.x as i64 + rect.size.width as i64;
        let bottom = rect.top_left.y as i64 + rect.size.height as i64;

        rect.top_left.x >= 0
            && rect.top_left.y >= 0
            && right <= self.size.width as i64
            && bottom <= self.size.height as i64
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::PINETIME
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Layout {
    fn format(&self, fmt: defmt::Formatter) {
        let rect = |r: &Rectangle| (r.top_left.x, r.top_left.y, r.size.width, r.size.height);
        defmt::write!(
            fmt,
            "Layout {{ size: {}x{}, header: {}, time: {}, date: {}, battery: {}, radius: {} }}",
            self.size.width,
            self.size.height,
            rect(&self.header),
            rect(&self.time),
            rect(&self.date),
            rect(&self.battery),
            self.battery_corner_radius,
        )
    }
}

/// Settings for a [`Watchface`](crate::Watchface)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchfaceConfig {
    /// 24 hour clock, otherwise 12 hour without AM/PM marker
    pub clock_24h: bool,
    /// Static text above the time
    pub header: &'static str,
    /// How colours are chosen on each tick
    pub color_mode: ColorMode,
    pub layout: Layout,
}

#[cfg(feature = "defmt")]
impl defmt::Format for WatchfaceConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "WatchfaceConfig {{ clock_24h: {}, header: {=str}, color_mode: {}, layout: {} }}",
            self.clock_24h,
            self.header,
            self.color_mode,
            self.layout,
        )
    }
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self {
            clock_24h: true,
            header: "glyphface",
            color_mode: ColorMode::Randomized,
            layout: Layout::PINETIME,
        }
    }
}

impl WatchfaceConfig {
    /// Check the configuration for values the face cannot render.
    pub fn validate(&self) -> Result<(), Error> {
        if self.header.is_empty() {
            return Err(Error::EmptyHeader);
        }
        if self.header.len() > MAX_HEADER_LEN {
            return Err(Error::HeaderTooLong);
        }

        let layout = &self.layout;
        if layout.battery_span() == 0 || layout.battery.size.height == 0 {
            return Err(Error::EmptyBatteryBar);
        }

        for (region, rect) in [
            (Region::Header, &layout.header),
            (Region::Time, &layout.time),
            (Region::Date, &layout.date),
            (Region::Battery, &layout.battery),
        ] {
            if !layout.contains(rect) {
                return Err(Error::OutOfBounds(region));
            }
        }

        Ok(())
    }
}

/// Element of the [`Layout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    Header,
    Time,
    Date,
    Battery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    EmptyHeader,
    HeaderTooLong,
    EmptyBatteryBar,
    /// A layout rectangle reaches past the display edge
    OutOfBounds(Region),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(WatchfaceConfig::default().validate(), Ok(()));
        assert_eq!(Layout::default().battery_span(), 200);
    }

    #[test]
    fn test_header_checks() {
        let mut config = WatchfaceConfig::default();

        config.header = "";
        assert_eq!(config.validate(), Err(Error::EmptyHeader));

        config.header = "this header is far too long to fit";
        assert_eq!(config.validate(), Err(Error::HeaderTooLong));
    }

    #[test]
    fn test_empty_battery_bar() {
        let mut config = WatchfaceConfig::default();
        config.layout.battery.size.width = 0;
        assert_eq!(config.validate(), Err(Error::EmptyBatteryBar));
    }

    #[test]
    fn test_out_of_bounds_regions() {
        let mut config = WatchfaceConfig::default();
        config.layout.date = Rectangle::new(Point::new(10, 140), Size::new(240, 28));
        assert_eq!(config.validate(), Err(Error::OutOfBounds(Region::Date)));

        let mut config = WatchfaceConfig::default();
        config.layout.header = Rectangle::new(Point::new(0, -1), Size::new(240, 28));
        assert_eq!(config.validate(), Err(Error::OutOfBounds(Region::Header)));

        let mut config = WatchfaceConfig::default();
        config.layout.battery = Rectangle::new(Point::new(20, 230), Size::new(200, 12));
        assert_eq!(config.validate(), Err(Error::OutOfBounds(Region::Battery)));
    }
}
