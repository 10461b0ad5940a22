//! Named-color lookup.
//!
//! A fixed, immutable table mapping human-readable names to [`Rgbw`]
//! constants, with case-insensitive lookup and an optional `*factor`
//! suffix (e.g. `"red*0.5"`) for direct scaling.

use crate::color::Rgbw;

/// The built-in name table. Lookup is ASCII-case-insensitive.
pub const NAMED_COLORS: &[(&str, Rgbw)] = &[
    ("Off", Rgbw::OFF),
    ("Full", Rgbw::FULL),
    ("Red", Rgbw::RED),
    ("Green", Rgbw::GREEN),
    ("Blue", Rgbw::BLUE),
    ("White", Rgbw::NATURAL_WHITE),
    ("CWhite", Rgbw::COOL_WHITE),
    ("WWhite", Rgbw::WARM_WHITE),
    ("Yellow", Rgbw::YELLOW),
    ("Turquoise", Rgbw::TURQUOISE),
    ("Magenta", Rgbw::MAGENTA),
];

/// Looks up a color by name, ignoring ASCII case.
pub fn named_color(name: &str) -> Option<Rgbw> {
    NAMED_COLORS
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

/// Looks up a color by name and scales it by `factor`, clamped to `[0, 1]`.
pub fn scaled_named_color(name: &str, factor: f32) -> Option<Rgbw> {
    named_color(name).map(|color| color * factor.clamp(0.0, 1.0))
}

/// Parses a color string of the form `name` or `name*factor`.
///
/// Returns `None` for unknown names or unparsable factors.
pub fn parse_color(input: &str) -> Option<Rgbw> {
    match input.split_once('*') {
        None => named_color(input.trim()),
        Some((name, factor)) => {
            let factor = factor.trim().parse::<f32>().ok()?;
            scaled_named_color(name.trim(), factor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(named_color("red"), Some(Rgbw::RED));
        assert_eq!(named_color("RED"), Some(Rgbw::RED));
        assert_eq!(named_color("TuRqUoIsE"), Some(Rgbw::TURQUOISE));
        assert_eq!(named_color("chartreuse"), None);
    }

    #[test]
    fn every_table_entry_resolves() {
        for (name, color) in NAMED_COLORS {
            assert_eq!(named_color(name), Some(*color));
        }
    }

    #[test]
    fn scaled_lookup_clamps_factor() {
        assert_eq!(scaled_named_color("red", 2.0), Some(Rgbw::RED));
        assert_eq!(scaled_named_color("red", -1.0), Some(Rgbw::OFF));
        assert_eq!(scaled_named_color("red", 0.5), Some(Rgbw::new(127, 0, 0, 0)));
    }

    #[test]
    fn parse_with_and_without_factor() {
        assert_eq!(parse_color("blue"), Some(Rgbw::BLUE));
        assert_eq!(parse_color("red*0.5"), Some(Rgbw::new(127, 0, 0, 0)));
        assert_eq!(parse_color(" white * 1.0 "), Some(Rgbw::NATURAL_WHITE));
        assert_eq!(parse_color("red*oops"), None);
        assert_eq!(parse_color("nope*0.5"), None);
    }
}
