//! Colour schemes
//!
//! Every colour the randomizer produces has channels from the four-level set
//! {0x00, 0x55, 0xAA, 0xFF}. Two colours count as equal when they quantize
//! to the same levels.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use rand::Rng;

/// Channel levels of the 2-bit-per-channel colour model.
pub const LEVELS: [u8; 4] = [0x00, 0x55, 0xAA, 0xFF];

/// Dark half of [`LEVELS`]
const DARK_LEVELS: [u8; 2] = [0x00, 0x55];
/// Light half of [`LEVELS`]
const LIGHT_LEVELS: [u8; 2] = [0xAA, 0xFF];

/// Redraws allowed before the detail colour falls back to a fixed choice.
const MAX_DETAIL_ATTEMPTS: usize = 32;

/// An RGB colour with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const GREY: Color = Color::new(0x55, 0x55, 0x55);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Colour as a `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Snap every channel to the nearest of [`LEVELS`].
    pub fn quantized(self) -> Self {
        Self {
            r: quantize(self.r),
            g: quantize(self.g),
            b: quantize(self.b),
        }
    }

    /// Whether both colours render identically once quantized.
    pub fn same_as(self, other: Color) -> bool {
        self.quantized() == other.quantized()
    }

    /// Perceived luminance (ITU-R BT.601 weights) in 0..=255.
    pub fn luminance(self) -> u8 {
        let weighted = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        (weighted / 1000) as u8
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.r, color.g, color.b).into()
    }
}

fn quantize(channel: u8) -> u8 {
    // 85 = 0x55, one step between levels
    ((channel as u16 + 42) / 85 * 85) as u8
}

/// Pick a channel value from the light ({0xAA, 0xFF}) or dark ({0x00, 0x55})
/// half of the level set.
pub fn random_level<R: Rng + ?Sized>(rng: &mut R, light: bool) -> u8 {
    let levels = if light { &LIGHT_LEVELS } else { &DARK_LEVELS };
    levels[rng.gen_range(0..levels.len())]
}

/// Random light or dark colour.
///
/// Two channels are picked (possibly the same one twice) and set to a random
/// level; the rest stay at zero.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R, light: bool) -> Color {
    let mut channels = [0u8; 3];
    let first = rng.gen_range(0..3);
    let second = rng.gen_range(0..3);
    channels[first] = random_level(rng, light);
    channels[second] = random_level(rng, light);

    Color::new(channels[0], channels[1], channels[2])
}

/// Zero the channel of `x` in which `y` is strongest.
///
/// Ties go to red, then green, then blue.
pub fn mute_max_color(x: Color, y: Color) -> Color {
    let mut result = x;
    if y.r >= y.g && y.r >= y.b {
        result.r = 0;
    } else if y.g >= y.b {
        result.g = 0;
    } else {
        result.b = 0;
    }
    result
}

/// Black or white, whichever reads better on `background`.
pub fn legible_over(background: Color) -> Color {
    if background.luminance() > 127 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// How a fresh [`ColorScheme`] is chosen on each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorMode {
    /// Random channels split into a light and a dark half, with the
    /// dominant channel of the text muted in the background (or vice versa)
    #[default]
    Randomized,
    /// Random background, text in black or white for legibility
    Legible,
    /// Uniform pick from [`PALETTE`]
    Palette,
}

/// Background, text and detail colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorScheme {
    pub background: Color,
    pub text: Color,
    pub detail: Color,
}

/// Hand-picked schemes for [`ColorMode::Palette`]
pub const PALETTE: [ColorScheme; 4] = [
    ColorScheme::from_hex(0xFF5500, 0xAAFF00, 0xFFAAFF),
    ColorScheme::from_hex(0x005555, 0xFF5500, 0xFFAA55),
    ColorScheme::from_hex(0xFFAAAA, 0x55FFFF, 0x00AA55),
    ColorScheme::from_hex(0xAA5500, 0x00AA00, 0xFFAA00),
];

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            text: Color::WHITE,
            detail: Color::GREY,
        }
    }
}

impl ColorScheme {
    pub const fn from_hex(background: u32, text: u32, detail: u32) -> Self {
        Self {
            background: Color::from_hex(background),
            text: Color::from_hex(text),
            detail: Color::from_hex(detail),
        }
    }

    /// Generate a new scheme according to `mode`.
    pub fn generate<R: Rng + ?Sized>(mode: ColorMode, rng: &mut R) -> Self {
        match mode {
            ColorMode::Randomized => Self::randomized(rng),
            ColorMode::Legible => Self::legible(rng),
            ColorMode::Palette => Self::from_palette(rng),
        }
    }

    /// Light text on a dark background or the other way round, picked by a
    /// coin flip.
    pub fn randomized<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let light_on_dark = rng.gen_bool(0.5);

        let background = random_color(rng, !light_on_dark);
        let text = random_color(rng, light_on_dark);

        let (background, text) = if light_on_dark {
            (mute_max_color(background, text), text)
        } else {
            (background, mute_max_color(text, background))
        };

        let detail = pick_detail(rng, light_on_dark, text, background);
        Self {
            background,
            text,
            detail,
        }
    }

    /// Any random background, with black or white text on top.
    pub fn legible<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let light_background = rng.gen_bool(0.5);
        let background = random_color(rng, light_background);
        let text = legible_over(background);

        let detail = pick_detail(rng, text == Color::WHITE, text, background);
        Self {
            background,
            text,
            detail,
        }
    }

    /// One of the [`PALETTE`] entries.
    pub fn from_palette<R: Rng + ?Sized>(rng: &mut R) -> Self {
        PALETTE[rng.gen_range(0..PALETTE.len())]
    }

    /// Whether the three colours are pairwise distinct.
    pub fn is_distinct(&self) -> bool {
        !self.text.same_as(self.background)
            && !self.detail.same_as(self.text)
            && !self.detail.same_as(self.background)
    }
}

/// Draw detail colours until one differs from both `text` and `background`.
fn pick_detail<R: Rng + ?Sized>(rng: &mut R, light: bool, text: Color, background: Color) -> Color {
    let differs = |color: Color| !color.same_as(text) && !color.same_as(background);

    for _ in 0..MAX_DETAIL_ATTEMPTS {
        let candidate = random_color(rng, light);
        if differs(candidate) {
            return candidate;
        }
    }

    // Three distinct candidates, so at least one differs from both
    [Color::WHITE, Color::BLACK, Color::GREY]
        .into_iter()
        .find(|&color| differs(color))
        .unwrap_or(Color::GREY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn is_level(channel: u8) -> bool {
        LEVELS.contains(&channel)
    }

    #[test]
    fn test_hex_conversion() {
        let color = Color::from_hex(0xFFAA55);
        assert_eq!(color, Color::new(0xFF, 0xAA, 0x55));
        assert_eq!(color.to_hex(), 0xFFAA55);
    }

    #[test]
    fn test_quantize_snaps_to_nearest_level() {
        assert_eq!(Color::new(0x10, 0x60, 0xF0).quantized(), Color::new(0x00, 0x55, 0xFF));
        assert_eq!(Color::new(0x2A, 0x2B, 0x80).quantized(), Color::new(0x00, 0x55, 0xAA));
        assert!(Color::new(0xFE, 0x01, 0xA9).same_as(Color::new(0xFF, 0x00, 0xAA)));
    }

    #[test]
    fn test_levels_split_by_brightness() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(LIGHT_LEVELS.contains(&random_level(&mut rng, true)));
            assert!(DARK_LEVELS.contains(&random_level(&mut rng, false)));
        }
    }

    #[test]
    fn test_mute_max_zeroes_dominant_channel() {
        let x = Color::new(0xFF, 0xFF, 0xFF);

        assert_eq!(mute_max_color(x, Color::new(0xAA, 0x55, 0x00)), Color::new(0x00, 0xFF, 0xFF));
        assert_eq!(mute_max_color(x, Color::new(0x00, 0xFF, 0x55)), Color::new(0xFF, 0x00, 0xFF));
        assert_eq!(mute_max_color(x, Color::new(0x55, 0x00, 0xAA)), Color::new(0xFF, 0xFF, 0x00));
    }

    #[test]
    fn test_mute_max_tie_order() {
        let x = Color::new(0xAA, 0xAA, 0xAA);

        // red wins ties
        assert_eq!(mute_max_color(x, Color::new(0xFF, 0xFF, 0xFF)), Color::new(0x00, 0xAA, 0xAA));
        // green beats blue
        assert_eq!(mute_max_color(x, Color::new(0x00, 0xFF, 0xFF)), Color::new(0xAA, 0x00, 0xAA));
    }

    #[test]
    fn test_legible_over() {
        assert_eq!(legible_over(Color::WHITE), Color::BLACK);
        assert_eq!(legible_over(Color::BLACK), Color::WHITE);
        assert_eq!(legible_over(Color::from_hex(0xFFFF00)), Color::BLACK);
        assert_eq!(legible_over(Color::from_hex(0x0000AA)), Color::WHITE);
    }

    #[test]
    fn test_palette_entries_are_distinct() {
        for scheme in PALETTE {
            assert!(scheme.is_distinct());
        }
    }

    #[test]
    fn test_palette_pick_comes_from_table() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..50 {
            let scheme = ColorScheme::generate(ColorMode::Palette, &mut rng);
            assert!(PALETTE.contains(&scheme));
        }
    }

    #[test]
    fn test_detail_falls_back_when_rng_is_stuck() {
        // A constant RNG keeps producing the same candidate
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let stuck = random_color(&mut rng, false);

        let detail = pick_detail(&mut rng, false, stuck, Color::WHITE);
        assert!(!detail.same_as(stuck));
        assert!(!detail.same_as(Color::WHITE));
    }

    proptest! {
        #[test]
        fn random_colors_are_quantized(seed in any::<u64>(), light in any::<bool>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let color = random_color(&mut rng, light);
            prop_assert!(is_level(color.r) && is_level(color.g) && is_level(color.b));
            prop_assert_eq!(color.quantized(), color);
        }

        #[test]
        fn light_colors_have_a_bright_channel(seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let color = random_color(&mut rng, true);
            prop_assert!(color.r >= 0xAA || color.g >= 0xAA || color.b >= 0xAA);
        }

        #[test]
        fn generated_schemes_are_distinct(seed in any::<u64>(), mode in 0u8..3) {
            let mode = match mode {
                0 => ColorMode::Randomized,
                1 => ColorMode::Legible,
                _ => ColorMode::Palette,
            };
            let mut rng = SmallRng::seed_from_u64(seed);
            let scheme = ColorScheme::generate(mode, &mut rng);
            prop_assert!(scheme.is_distinct());
        }

        #[test]
        fn legible_text_is_black_or_white(seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let scheme = ColorScheme::legible(&mut rng);
            prop_assert!(scheme.text == Color::BLACK || scheme.text == Color::WHITE);
        }
    }
}
