//! RGBA color type, predefined constants, and color-space helpers.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use cardscriber::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new fully opaque color from RGB components.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses a CSS-style hex color string: `#rgb` or `#rrggbb`.
    ///
    /// Returns `None` for anything else; callers decide the fallback.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        let channel = |hi: u32, lo: u32| (hi * 16 + lo) as f64 / 255.0;
        match digits.len() {
            3 => {
                let mut it = digits.chars().map(|c| c.to_digit(16));
                let r = it.next()??;
                let g = it.next()??;
                let b = it.next()??;
                Some(Self::rgb(channel(r, r), channel(g, g), channel(b, b)))
            }
            6 => {
                let mut v = [0u32; 6];
                for (i, c) in digits.chars().enumerate() {
                    v[i] = c.to_digit(16)?;
                }
                Some(Self::rgb(
                    channel(v[0], v[1]),
                    channel(v[2], v[3]),
                    channel(v[4], v[5]),
                ))
            }
            _ => None,
        }
    }

    /// Converts an HSV triple (all components in [0, 1]) to an opaque color.
    ///
    /// Hue wraps; a hue of exactly 1.0 is the same red as 0.0.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.rem_euclid(1.0);
        let i = (h * 6.0).floor();
        let f = h * 6.0 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (i as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::rgb(r, g, b)
    }

    /// Perceptual brightness in [0, 1] using the Rec. 601 luma weights.
    pub fn luminance(&self) -> f64 {
        self.r * 0.299 + self.g * 0.587 + self.b * 0.114
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

/// Predefined yellow color (R=1.0, G=1.0, B=0.0)
pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

/// Predefined orange color (R=1.0, G=0.5, B=0.0)
pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);

/// Predefined pink/magenta color (R=1.0, G=0.0, B=1.0)
pub const PINK: Color = Color::rgb(1.0, 0.0, 1.0);

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_long_and_short_forms() {
        assert_eq!(Color::from_hex("#ff0000"), Some(RED));
        assert_eq!(Color::from_hex("#f00"), Some(RED));
        assert_eq!(Color::from_hex("#fff"), Some(WHITE));

        let gray = Color::from_hex("#808080").unwrap();
        assert!((gray.r - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
    }

    #[test]
    fn hex_parsing_rejects_garbage() {
        assert_eq!(Color::from_hex("ff0000"), None);
        assert_eq!(Color::from_hex("#ff00"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex(""), None);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), RED);
        assert_eq!(Color::from_hsv(1.0 / 3.0, 1.0, 1.0), GREEN);
        assert_eq!(Color::from_hsv(2.0 / 3.0, 1.0, 1.0), BLUE);
        // hue wraps
        assert_eq!(Color::from_hsv(1.0, 1.0, 1.0), RED);
    }

    #[test]
    fn luminance_orders_black_gray_white() {
        assert_eq!(BLACK.luminance(), 0.0);
        assert!((WHITE.luminance() - 1.0).abs() < 1e-12);
        let mid = Color::rgb(0.5, 0.5, 0.5).luminance();
        assert!(mid > 0.0 && mid < 1.0);
    }
}
