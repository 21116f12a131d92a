//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use glyphface::{Layout, Watchface};
use mipidsi::{models::ST7789, Builder, Orientation};
use rand::RngCore;

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    /// Display instance
    lcd: Lcd<'static, SPI>,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
    ) -> Result<Self, Error> {
        let size = Layout::PINETIME.size;
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(size.width as u16, size.height as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd };
        display.clear(Rgb565::BLACK)?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Draw)
    }

    /// Repaint the whole watchface
    pub fn render<R>(&mut self, face: &mut Watchface<R>) -> Result<(), Error>
    where
        R: RngCore,
    {
        face.draw(&mut self.lcd).map_err(|_| Error::Draw)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Panel did not accept the init sequence
    Init,
    /// Write to the panel failed
    Draw,
}
