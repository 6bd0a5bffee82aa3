//! Small shared helpers: interpolation and named-color lookup.

use crate::draw::{Color, color::*};

/// Linear interpolation between `a` and `b` at parameter `t` in [0, 1].
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Midpoint of two coordinates.
pub fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Maps a color name string to its predefined Color constant.
///
/// Returns `None` for unrecognized names; callers decide the fallback.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
        assert_eq!(midpoint((0.0, 0.0), (4.0, 2.0)), (2.0, 1.0));
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(name_to_color("RED"), Some(RED));
        assert_eq!(name_to_color("Pink"), Some(PINK));
        assert_eq!(name_to_color("mauve"), None);
    }
}
