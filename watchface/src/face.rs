//! Watchface state and rendering
//!
//! A [`Watchface`] holds everything that changes between repaints: the colour
//! scheme, the font set, the formatted time and date and the battery level.
//! The firmware calls [`Watchface::on_tick`] once a minute and
//! [`Watchface::on_battery`] whenever the charge changes, then repaints while
//! the face reports itself dirty.

use chrono::{Datelike, Timelike};
use embedded_graphics::{
    geometry::Size,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle, RoundedRectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use rand::RngCore;

use crate::{
    battery::{bar_width, BatteryInfo},
    config::{self, WatchfaceConfig},
    fonts::{self, FontCycle, FONT_COUNT},
    palette::{Color, ColorScheme},
    text::{self, random_symbol, Label, DATE_LEN, TIME_LEN},
};

/// Time shown before the first tick
const PLACEHOLDER_TIME: &str = "13/37";

pub struct Watchface<R> {
    config: WatchfaceConfig,
    rng: R,
    scheme: ColorScheme,
    battery_level: u8,
    fonts: FontCycle,
    time_label: Label<TIME_LEN>,
    date_label: Label<DATE_LEN>,
    dirty: bool,
}

impl<R> Watchface<R>
where
    R: RngCore,
{
    /// Set up the face with fresh colours and the first font set.
    pub fn new(config: WatchfaceConfig, rng: R) -> Result<Self, Error> {
        config.validate()?;

        let mut time_label = Label::new();
        time_label.set(format_args!("{}", PLACEHOLDER_TIME))?;

        let mut face = Self {
            config,
            rng,
            scheme: ColorScheme::default(),
            battery_level: 0,
            fonts: FontCycle::new(FONT_COUNT),
            time_label,
            date_label: Label::new(),
            dirty: true,
        };
        face.update_colors();
        face.update_fonts();

        Ok(face)
    }

    /// Minute tick: new colours, next font set, fresh time and date strings.
    pub fn on_tick<T>(&mut self, now: &T) -> Result<(), Error>
    where
        T: Datelike + Timelike,
    {
        self.update_colors();
        self.update_fonts();
        self.update_time(now)?;
        self.dirty = true;
        Ok(())
    }

    /// Store a new battery reading. Only a changed level dirties the face.
    pub fn on_battery(&mut self, info: BatteryInfo) {
        let level = info.percent.min(100);
        if level != self.battery_level {
            self.battery_level = level;
            self.dirty = true;
        }
    }

    fn update_colors(&mut self) {
        self.scheme = ColorScheme::generate(self.config.color_mode, &mut self.rng);
    }

    fn update_fonts(&mut self) {
        self.fonts.advance();
    }

    fn update_time<T>(&mut self, now: &T) -> Result<(), Error>
    where
        T: Datelike + Timelike,
    {
        let sep = random_symbol(&mut self.rng);
        text::format_time(&mut self.time_label, now, self.config.clock_24h, sep)?;

        let seps = [
            random_symbol(&mut self.rng),
            random_symbol(&mut self.rng),
            random_symbol(&mut self.rng),
        ];
        text::format_date(&mut self.date_label, now, seps)?;

        Ok(())
    }

    /// Render the whole face and clear the dirty flag.
    pub fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let layout = self.config.layout;
        let scheme = self.scheme;
        let fonts = fonts::pair(self.font_index());

        target.clear(scheme.background.into())?;

        draw_centered(
            target,
            self.config.header,
            &layout.header,
            fonts.small,
            scheme.detail,
        )?;
        draw_centered(
            target,
            self.time_label.as_str(),
            &layout.time,
            fonts.big,
            scheme.detail,
        )?;
        draw_centered(
            target,
            self.date_label.as_str(),
            &layout.date,
            fonts.small,
            scheme.text,
        )?;

        // Battery bar: detail coloured track, text coloured charge
        let corners = Size::new_equal(layout.battery_corner_radius);
        RoundedRectangle::with_equal_corners(layout.battery, corners)
            .into_styled(PrimitiveStyle::with_fill(scheme.detail.into()))
            .draw(target)?;

        let width = bar_width(self.battery_level, layout.battery_span());
        if width > 0 {
            let charge = Rectangle::new(
                layout.battery.top_left,
                Size::new(width, layout.battery.size.height),
            );
            RoundedRectangle::with_equal_corners(charge, corners)
                .into_styled(PrimitiveStyle::with_fill(scheme.text.into()))
                .draw(target)?;
        }

        self.dirty = false;
        Ok(())
    }

    /// Whether something changed since the last [`draw`](Self::draw)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    pub fn font_index(&self) -> usize {
        self.fonts.current().unwrap_or(0)
    }

    pub fn time_text(&self) -> &str {
        self.time_label.as_str()
    }

    pub fn date_text(&self) -> &str {
        self.date_label.as_str()
    }

    pub fn config(&self) -> &WatchfaceConfig {
        &self.config
    }
}

fn draw_centered<D>(
    target: &mut D,
    text: &str,
    bounds: &Rectangle,
    font: &MonoFont<'_>,
    color: Color,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let character_style = MonoTextStyle::new(font, color.into());
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    Text::with_text_style(text, bounds.center(), character_style, text_style).draw(target)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Config(config::Error),
    Text(text::Error),
}

impl From<config::Error> for Error {
    fn from(err: config::Error) -> Self {
        Self::Config(err)
    }
}

impl From<text::Error> for Error {
    fn from(err: text::Error) -> Self {
        Self::Text(err)
    }
}
