//! RGBA colors parsed from CSS color strings.

use std::str::FromStr;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// The string was not a color `csscolorparser` understands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}'")]
pub struct ColorError(pub String);

impl FromStr for Color {
    type Err = ColorError;

    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` and CSS color names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ColorError(s.to_owned()));
        }
        let parsed = csscolorparser::parse(trimmed).map_err(|_| ColorError(s.to_owned()))?;
        let [r, g, b, a] = parsed.to_rgba8();
        Ok(Color { r, g, b, a })
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!("#FF0000".parse(), Ok(Color::RED));
        assert_eq!("#f00".parse(), Ok(Color::RED));
        assert_eq!("#00ff0080".parse(), Ok(Color::rgba(0, 255, 0, 128)));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(" #000000 ".parse(), Ok(Color::BLACK));
    }

    #[test]
    fn parse_invalid() {
        assert!("".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn deserialize_from_json_string() {
        let c: Color = serde_json::from_str("\"#ffffff\"").unwrap();
        assert_eq!(c, Color::WHITE);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
