//! Font sets rotated through on every tick

use embedded_graphics::mono_font::{
    ascii::{FONT_10X20, FONT_6X13_BOLD, FONT_7X13, FONT_9X18_BOLD},
    MonoFont,
};
use profont::{PROFONT_14_POINT, PROFONT_24_POINT};

/// Number of font sets
pub const FONT_COUNT: usize = 3;

/// A big font for the time and a small one for header and date
#[derive(Clone, Copy)]
pub struct FontPair {
    pub big: &'static MonoFont<'static>,
    pub small: &'static MonoFont<'static>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FontPair {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "FontPair {{ big: {}x{}, small: {}x{} }}",
            self.big.character_size.width,
            self.big.character_size.height,
            self.small.character_size.width,
            self.small.character_size.height,
        )
    }
}

pub const FONTS: [FontPair; FONT_COUNT] = [
    FontPair {
        big: &PROFONT_24_POINT,
        small: &PROFONT_14_POINT,
    },
    FontPair {
        big: &FONT_10X20,
        small: &FONT_7X13,
    },
    FontPair {
        big: &FONT_9X18_BOLD,
        small: &FONT_6X13_BOLD,
    },
];

/// Font set at `index`, wrapping around.
pub fn pair(index: usize) -> FontPair {
    FONTS[index % FONT_COUNT]
}

/// Round-robin index over the font sets.
///
/// Starts before the first set, so the first [`advance`](Self::advance)
/// selects set 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontCycle {
    current: Option<usize>,
    count: usize,
}

impl Default for FontCycle {
    fn default() -> Self {
        Self::new(FONT_COUNT)
    }
}

impl FontCycle {
    pub const fn new(count: usize) -> Self {
        Self {
            current: None,
            count: if count == 0 { 1 } else { count },
        }
    }

    /// Move to the next set and return its index.
    pub fn advance(&mut self) -> usize {
        let next = match self.current {
            Some(index) if index + 1 < self.count => index + 1,
            _ => 0,
        };
        self.current = Some(next);
        next
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_advance_selects_first_set() {
        let mut cycle = FontCycle::default();
        assert_eq!(cycle.current(), None);
        assert_eq!(cycle.advance(), 0);
        assert_eq!(cycle.current(), Some(0));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut cycle = FontCycle::new(FONT_COUNT);
        let indices: [usize; 7] = core::array::from_fn(|_| cycle.advance());
        assert_eq!(indices, [0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_zero_count_stays_on_first_set() {
        let mut cycle = FontCycle::new(0);
        assert_eq!(cycle.advance(), 0);
        assert_eq!(cycle.advance(), 0);
    }

    #[test]
    fn test_big_font_is_taller() {
        for index in 0..FONT_COUNT {
            let fonts = pair(index);
            assert!(fonts.big.character_size.height > fonts.small.character_size.height);
        }
        assert_eq!(
            pair(FONT_COUNT).big.character_size,
            pair(0).big.character_size
        );
    }
}
