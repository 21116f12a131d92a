//! Time and date strings with random separator glyphs

use core::fmt;

use chrono::{Datelike, Timelike};
use rand::Rng;

/// Glyphs a separator is drawn from
pub const SYMBOLS: [char; 14] = [
    ',', '_', ':', '#', '*', '/', '$', '~', ';', '+', '^', '?', '=', '!',
];

/// Capacity of the time label (`HH?MM`)
pub const TIME_LEN: usize = 8;
/// Capacity of the date label (`?DD?MM?`)
pub const DATE_LEN: usize = 8;

/// Pick one separator glyph.
pub fn random_symbol<R: Rng + ?Sized>(rng: &mut R) -> char {
    SYMBOLS[rng.gen_range(0..SYMBOLS.len())]
}

/// Fixed-capacity text buffer backing a drawn label.
#[derive(Debug, Clone)]
pub struct Label<const N: usize> {
    str_buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for Label<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Label<N> {
    /// Create an empty label
    pub const fn new() -> Self {
        Self {
            str_buf: [0; N],
            len: 0,
        }
    }

    /// Replace the contents with formatted text.
    ///
    /// On overflow the previous text is kept.
    pub fn set(&mut self, args: fmt::Arguments) -> Result<(), Error> {
        let mut scratch = [0u8; N];
        let len = format_no_std::show(&mut scratch, args)
            .map_err(|_| Error::Overflow)?
            .len();

        self.str_buf = scratch;
        self.len = len;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        // Only ever filled from a `&str`
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Write `HH<sep>MM` into `label`.
///
/// In 12 hour mode the hour runs 01 to 12.
pub fn format_time<T, const N: usize>(
    label: &mut Label<N>,
    time: &T,
    clock_24h: bool,
    sep: char,
) -> Result<(), Error>
where
    T: Timelike,
{
    let hour = if clock_24h {
        time.hour()
    } else {
        time.hour12().1
    };
    label.set(format_args!("{:02}{}{:02}", hour, sep, time.minute()))
}

/// Write `<s0>DD<s1>MM<s2>` into `label`.
pub fn format_date<D, const N: usize>(
    label: &mut Label<N>,
    date: &D,
    seps: [char; 3],
) -> Result<(), Error>
where
    D: Datelike,
{
    label.set(format_args!(
        "{}{:02}{}{:02}{}",
        seps[0],
        date.day(),
        seps[1],
        date.month(),
        seps[2]
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Formatted text does not fit the label
    Overflow,
}
