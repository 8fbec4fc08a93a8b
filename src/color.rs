//! Color math for automatic widget theming.
//!
//! The widget builder derives two things from each state's background
//! color: a slightly darker border, and a readable text color. Readability
//! is judged in sRGB relative luminance space (the WCAG 2.1 definition)
//! while darkening happens on OKLab lightness, because OKLab adjustments
//! are perceptually uniform.
//!
//! Parsing is intentionally small: `#rgb`/`#rrggbb` hex plus the common
//! CSS named colors. Anything else (`rgb(...)`, `hsl(...)`, gradients)
//! passes through the builder untouched; it simply cannot participate in
//! border/text derivation.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Luminance above which black text is more readable than white.
const CONTRAST_THRESHOLD: f64 = 0.5;

/// An 8-bit sRGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Common CSS named colors accepted wherever a widget option takes a color.
static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut put = |name: &'static str, r: u8, g: u8, b: u8| {
        m.insert(name, Color { r, g, b });
    };
    put("black", 0x00, 0x00, 0x00);
    put("silver", 0xc0, 0xc0, 0xc0);
    put("gray", 0x80, 0x80, 0x80);
    put("grey", 0x80, 0x80, 0x80);
    put("white", 0xff, 0xff, 0xff);
    put("maroon", 0x80, 0x00, 0x00);
    put("red", 0xff, 0x00, 0x00);
    put("purple", 0x80, 0x00, 0x80);
    put("fuchsia", 0xff, 0x00, 0xff);
    put("magenta", 0xff, 0x00, 0xff);
    put("green", 0x00, 0x80, 0x00);
    put("lime", 0x00, 0xff, 0x00);
    put("olive", 0x80, 0x80, 0x00);
    put("yellow", 0xff, 0xff, 0x00);
    put("navy", 0x00, 0x00, 0x80);
    put("blue", 0x00, 0x00, 0xff);
    put("teal", 0x00, 0x80, 0x80);
    put("aqua", 0x00, 0xff, 0xff);
    put("cyan", 0x00, 0xff, 0xff);
    put("orange", 0xff, 0xa5, 0x00);
    put("brown", 0xa5, 0x2a, 0x2a);
    put("coral", 0xff, 0x7f, 0x50);
    put("crimson", 0xdc, 0x14, 0x3c);
    put("gold", 0xff, 0xd7, 0x00);
    put("indigo", 0x4b, 0x00, 0x82);
    put("ivory", 0xff, 0xff, 0xf0);
    put("khaki", 0xf0, 0xe6, 0x8c);
    put("lavender", 0xe6, 0xe6, 0xfa);
    put("pink", 0xff, 0xc0, 0xcb);
    put("plum", 0xdd, 0xa0, 0xdd);
    put("salmon", 0xfa, 0x80, 0x72);
    put("tan", 0xd2, 0xb4, 0x8c);
    put("tomato", 0xff, 0x63, 0x47);
    put("turquoise", 0x40, 0xe0, 0xd0);
    put("violet", 0xee, 0x82, 0xee);
    put("wheat", 0xf5, 0xde, 0xb3);
    m
});

/// Decode one sRGB channel to linear light (D65, IEC 61966-2-1).
fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode linear light back to one sRGB channel, clamped to gamut.
fn linear_to_srgb(linear: f64) -> u8 {
    let l = linear.clamp(0.0, 1.0);
    let c = if l <= 0.003_130_8 {
        12.92 * l
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Color {
    /// Parse a CSS color string.
    ///
    /// Accepts `#rgb` and `#rrggbb` hex notation (case-insensitive) and
    /// the common CSS named colors. Returns `None` for anything else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use countdown_widget::color::Color;
    ///
    /// assert_eq!(Color::parse("#fff"), Some(Color { r: 255, g: 255, b: 255 }));
    /// assert_eq!(Color::parse("salmon"), Some(Color { r: 0xfa, g: 0x80, b: 0x72 }));
    /// assert_eq!(Color::parse("rgba(0, 0, 0, 0.5)"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Color> {
        let trimmed = raw.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            // Byte-indexed slicing below requires one byte per digit.
            if !hex.is_ascii() {
                return None;
            }
            return match hex.len() {
                3 => {
                    let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                    let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                    let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                    Some(Color { r, g, b })
                }
                6 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                    Some(Color { r, g, b })
                }
                _ => None,
            };
        }
        NAMED_COLORS.get(trimmed.to_ascii_lowercase().as_str()).copied()
    }

    /// Render as canonical lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance per WCAG 2.1.
    ///
    /// `L = 0.2126 * R_lin + 0.7152 * G_lin + 0.0722 * B_lin` on the
    /// linearized channels; 0.0 is black, 1.0 is white.
    pub fn relative_luminance(self) -> f64 {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);
        0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
    }

    /// Produce a perceptually darker variant of this color.
    ///
    /// OKLab lightness is scaled by `1 - amount` with `amount` in
    /// `[0.0, 1.0]`; `0.0` is a no-op and `1.0` is black. The result is
    /// gamut-clamped back to sRGB.
    pub fn darken(self, amount: f64) -> Color {
        let amount = amount.clamp(0.0, 1.0);
        let (l, a, b) = self.to_oklab();
        Color::from_oklab(l * (1.0 - amount), a, b)
    }

    /// Convert to OKLab (L, a, b).
    fn to_oklab(self) -> (f64, f64, f64) {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
        let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
        let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

        (
            0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
            1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
            0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
        )
    }

    /// Convert from OKLab back to sRGB, clamping out-of-gamut channels.
    fn from_oklab(l: f64, a: f64, b: f64) -> Color {
        let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
        let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
        let s_ = l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

        let l3 = l_ * l_ * l_;
        let m3 = m_ * m_ * m_;
        let s3 = s_ * s_ * s_;

        let r = 4.076_741_662_1 * l3 - 3.307_711_591_3 * m3 + 0.230_969_929_2 * s3;
        let g = -1.268_438_004_6 * l3 + 2.609_757_401_1 * m3 - 0.341_319_396_5 * s3;
        let b = -0.004_196_086_3 * l3 - 0.703_418_614_7 * m3 + 1.707_614_701_0 * s3;

        Color {
            r: linear_to_srgb(r),
            g: linear_to_srgb(g),
            b: linear_to_srgb(b),
        }
    }
}

/// Choose a readable text color for the given background.
///
/// Pure black when the background's relative luminance exceeds the fixed
/// threshold, pure white otherwise. Only consulted when the caller has not
/// supplied an explicit text color for the state.
///
/// # Examples
///
/// ```rust
/// use countdown_widget::color::{contrast_text, Color};
///
/// let on_white = contrast_text(Color { r: 255, g: 255, b: 255 });
/// assert_eq!(on_white.to_hex(), "#000000");
///
/// let on_navy = contrast_text(Color { r: 0, g: 0, b: 0x80 });
/// assert_eq!(on_navy.to_hex(), "#ffffff");
/// ```
pub fn contrast_text(background: Color) -> Color {
    if background.relative_luminance() > CONTRAST_THRESHOLD {
        Color { r: 0, g: 0, b: 0 }
    } else {
        Color {
            r: 0xff,
            g: 0xff,
            b: 0xff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(
            Color::parse("#abc"),
            Some(Color {
                r: 0xaa,
                g: 0xbb,
                b: 0xcc
            })
        );
        assert_eq!(
            Color::parse("#43AC6A"),
            Some(Color {
                r: 0x43,
                g: 0xac,
                b: 0x6a
            })
        );
        assert_eq!(Color::parse("#43ac6a").unwrap().to_hex(), "#43ac6a");
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(Color::parse("White"), Color::parse("#ffffff"));
        assert_eq!(Color::parse("TOMATO"), Color::parse("#ff6347"));
        assert_eq!(Color::parse("grey"), Color::parse("gray"));
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert_eq!(Color::parse(""), None);
        assert_eq!(Color::parse("#abcd"), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
        assert_eq!(Color::parse("rgb(1, 2, 3)"), None);
        assert_eq!(Color::parse("linear-gradient(red, blue)"), None);
        // Multi-byte input after `#` must be rejected, not mis-sliced.
        assert_eq!(Color::parse("#é4"), None);
        assert_eq!(Color::parse("#ééé"), None);
        assert_eq!(Color::parse("#ffé"), None);
    }

    #[test]
    fn luminance_endpoints() {
        let black = Color { r: 0, g: 0, b: 0 };
        let white = Color {
            r: 255,
            g: 255,
            b: 255,
        };
        assert!(black.relative_luminance() < 1e-9);
        assert!((white.relative_luminance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn contrast_picks_per_state_defaults() {
        // The default state palette: white text on the green/red
        // backgrounds, black text on the amber warning background.
        let running = Color::parse("#43ac6a").unwrap();
        let finished = Color::parse("#f04124").unwrap();
        let warning = Color::parse("#e6c229").unwrap();

        assert_eq!(contrast_text(running).to_hex(), "#ffffff");
        assert_eq!(contrast_text(finished).to_hex(), "#ffffff");
        assert_eq!(contrast_text(warning).to_hex(), "#000000");
    }

    #[test]
    fn darken_lowers_luminance_monotonically() {
        let base = Color::parse("#43ac6a").unwrap();
        let mut previous = base.relative_luminance();
        for step in 1..=10 {
            let darker = base.darken(f64::from(step) * 0.1);
            let lum = darker.relative_luminance();
            assert!(
                lum <= previous + 1e-9,
                "darken({}) raised luminance: {lum} > {previous}",
                f64::from(step) * 0.1
            );
            previous = lum;
        }
        assert_eq!(base.darken(1.0).to_hex(), "#000000");
    }

    #[test]
    fn darken_zero_is_identity() {
        for raw in ["#43ac6a", "#f04124", "#e6c229", "#808080"] {
            let c = Color::parse(raw).unwrap();
            let same = c.darken(0.0);
            // Round-tripping through OKLab may wiggle a channel by one.
            assert!(i32::from(c.r).abs_diff(i32::from(same.r)) <= 1);
            assert!(i32::from(c.g).abs_diff(i32::from(same.g)) <= 1);
            assert!(i32::from(c.b).abs_diff(i32::from(same.b)) <= 1);
        }
    }

    #[test]
    fn darken_clamps_amount() {
        let c = Color::parse("#e6c229").unwrap();
        assert_eq!(c.darken(2.0).to_hex(), "#000000");
        let brighter = c.darken(-1.0);
        assert_eq!(brighter.to_hex(), c.darken(0.0).to_hex());
    }
}
