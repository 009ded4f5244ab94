//! Background color parsing and rendering.
//!
//! A background color arrives from the CLI or from `favicons.toml` in one of
//! three shapes:
//!
//! | Form | Example | Notes |
//! |------|---------|-------|
//! | 6-digit hex | `#1a2b3c`, `1A2B3C` | `#` optional, any case |
//! | 3-digit hex | `#1a2`, `fff` | each nibble is doubled: `#1a2` → `#11aa22` |
//! | `rgb()` string | `rgb(17, 170, 34)` | at most one whitespace character after each comma |
//! | three channels | `[17, 170, 34]` | each value must be an integer in 0-255 |
//!
//! Everything else (4- or 5-digit hex, out-of-range channels, collections that
//! are not exactly three integers) is rejected with [`ColorError::Invalid`].
//! A [`Color`] that exists is always a valid RGB triple.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color '{input}' is not a valid color")]
    Invalid { input: String },
}

impl ColorError {
    fn invalid(input: impl Into<String>) -> Self {
        ColorError::Invalid {
            input: input.into(),
        }
    }
}

/// An opaque sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse a hex (`#RRGGBB`, `#RGB`, `#` optional) or `rgb(R, G, B)` string.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let channels = if input.starts_with("rgb(") {
            parse_rgb_function(input)
        } else {
            parse_hex(input)
        };
        channels
            .map(|[red, green, blue]| Self { red, green, blue })
            .ok_or_else(|| ColorError::invalid(input))
    }

    /// Build a color from a collection of exactly three channel values.
    pub fn from_channels<I>(values: I) -> Result<Self, ColorError>
    where
        I: IntoIterator,
        I::Item: Channel + fmt::Debug,
    {
        let values: Vec<I::Item> = values.into_iter().collect();
        let invalid = || ColorError::invalid(format!("{values:?}"));

        if values.len() != 3 {
            return Err(invalid());
        }
        let mut channels = [0u8; 3];
        for (slot, value) in channels.iter_mut().zip(&values) {
            *slot = value
                .to_channel()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(invalid)?;
        }
        let [red, green, blue] = channels;
        Ok(Self { red, green, blue })
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Lowercase, zero-padded `#rrggbb`.
    pub fn as_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// `rgb(r, g, b)` with canonical `, ` separators.
    pub fn as_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }

    /// This color as an RGBA pixel with the given alpha.
    pub fn with_alpha(&self, alpha: u8) -> Rgba<u8> {
        Rgba([self.red, self.green, self.blue, alpha])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

/// `#RGB` / `#RRGGBB` with the `#` optional.
fn parse_hex(input: &str) -> Option<[u8; 3]> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    match digits.len() {
        3 => Some([
            nibble(0)? * 0x11,
            nibble(1)? * 0x11,
            nibble(2)? * 0x11,
        ]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?]),
        _ => None,
    }
}

/// `rgb(R,G,B)`; each comma may be followed by a single whitespace character.
fn parse_rgb_function(input: &str) -> Option<[u8; 3]> {
    let body = input.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = body.split(',');
    let mut channels = [0u8; 3];

    for (i, slot) in channels.iter_mut().enumerate() {
        let mut part = parts.next()?;
        if i > 0 {
            if let Some(c) = part.chars().next().filter(|c| c.is_whitespace()) {
                part = &part[c.len_utf8()..];
            }
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse::<u8>().ok()?;
    }

    if parts.next().is_some() {
        return None;
    }
    Some(channels)
}

/// A value that can stand in for one color channel.
///
/// Implemented for the integer types and for strings holding a decimal
/// integer, so channel lists read from text (`["255", "0", "0"]`) are accepted
/// the same way as numeric ones.
pub trait Channel {
    /// The integer value, or `None` if this is not an integer at all.
    fn to_channel(&self) -> Option<i64>;
}

macro_rules! impl_channel_for_int {
    ($($t:ty),*) => {
        $(impl Channel for $t {
            fn to_channel(&self) -> Option<i64> {
                i64::try_from(*self).ok()
            }
        })*
    };
}

impl_channel_for_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Channel for str {
    fn to_channel(&self) -> Option<i64> {
        self.trim().parse().ok()
    }
}

impl Channel for String {
    fn to_channel(&self) -> Option<i64> {
        self.as_str().to_channel()
    }
}

impl<T: Channel + ?Sized> Channel for &T {
    fn to_channel(&self) -> Option<i64> {
        T::to_channel(*self)
    }
}

/// One entry of a channel list as written in config: an integer or a string
/// holding one.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelValue {
    Int(i64),
    Text(String),
}

impl Channel for ChannelValue {
    fn to_channel(&self) -> Option<i64> {
        match self {
            ChannelValue::Int(n) => n.to_channel(),
            ChannelValue::Text(s) => s.to_channel(),
        }
    }
}

impl fmt::Debug for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelValue::Int(n) => write!(f, "{n}"),
            ChannelValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// A background color as the user wrote it, before validation.
///
/// Deserializes from either a string or an array so `favicons.toml` can say
/// `background_color = "#fff"`, `background_color = [255, 255, 255]` or
/// `background_color = ["255", "255", "255"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Text(String),
    Channels(Vec<ChannelValue>),
}

impl ColorSpec {
    pub fn parse(&self) -> Result<Color, ColorError> {
        match self {
            ColorSpec::Text(s) => Color::parse(s),
            ColorSpec::Channels(values) => Color::from_channels(values),
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Text(Color::BLACK.as_hex())
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Text(s) => f.write_str(s),
            ColorSpec::Channels(values) => write!(f, "{values:?}"),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        ColorSpec::Text(s.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        ColorSpec::Text(s)
    }
}

impl From<[u8; 3]> for ColorSpec {
    fn from(values: [u8; 3]) -> Self {
        ColorSpec::Channels(
            values
                .iter()
                .map(|&v| ChannelValue::Int(i64::from(v)))
                .collect(),
        )
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Text(color.as_hex())
    }
}

impl TryFrom<&ColorSpec> for Color {
    type Error = ColorError;

    fn try_from(spec: &ColorSpec) -> Result<Self, Self::Error> {
        spec.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid(result: Result<Color, ColorError>) -> bool {
        matches!(result, Err(ColorError::Invalid { .. }))
    }

    // =========================================================================
    // Hex strings
    // =========================================================================

    #[test]
    fn six_digit_hex_round_trips_lowercase() {
        assert_eq!(Color::parse("#1A2B3C").unwrap().as_hex(), "#1a2b3c");
        assert_eq!(Color::parse("ff8000").unwrap().as_hex(), "#ff8000");
        assert_eq!(Color::parse("#000000").unwrap(), Color::BLACK);
    }

    #[test]
    fn three_digit_hex_doubles_each_nibble() {
        assert_eq!(Color::parse("#1a2").unwrap().as_hex(), "#11aa22");
        assert_eq!(Color::parse("FFF").unwrap().as_hex(), "#ffffff");
        assert_eq!(Color::parse("#f00").unwrap().channels(), [255, 0, 0]);
    }

    #[test]
    fn hex_output_is_zero_padded() {
        assert_eq!(Color::rgb(1, 2, 3).as_hex(), "#010203");
    }

    #[test]
    fn four_and_five_digit_hex_rejected() {
        assert!(is_invalid(Color::parse("#1234")));
        assert!(is_invalid(Color::parse("12345")));
        assert!(is_invalid(Color::parse("#1234567")));
    }

    #[test]
    fn non_hex_characters_rejected() {
        assert!(is_invalid(Color::parse("#ggg")));
        assert!(is_invalid(Color::parse("")));
        assert!(is_invalid(Color::parse("#")));
        assert!(is_invalid(Color::parse("red")));
        assert!(is_invalid(Color::parse(" #fff")));
    }

    // =========================================================================
    // rgb() strings
    // =========================================================================

    #[test]
    fn rgb_string_round_trips() {
        assert_eq!(
            Color::parse("rgb(17, 170, 34)").unwrap().as_rgb(),
            "rgb(17, 170, 34)"
        );
        assert_eq!(Color::parse("rgb(0,0,0)").unwrap().as_rgb(), "rgb(0, 0, 0)");
        assert_eq!(
            Color::parse("rgb(255,\t255, 255)").unwrap().as_rgb(),
            "rgb(255, 255, 255)"
        );
    }

    #[test]
    fn rgb_string_channel_out_of_range_rejected() {
        assert!(is_invalid(Color::parse("rgb(256, 0, 0)")));
        assert!(is_invalid(Color::parse("rgb(0, 0, 99999999999)")));
    }

    #[test]
    fn rgb_string_malformed_rejected() {
        assert!(is_invalid(Color::parse("rgb(1, 2)")));
        assert!(is_invalid(Color::parse("rgb(1, 2, 3, 4)")));
        assert!(is_invalid(Color::parse("rgb(1,  2, 3)")));
        assert!(is_invalid(Color::parse("rgb( 1, 2, 3)")));
        assert!(is_invalid(Color::parse("rgb(-1, 2, 3)")));
        assert!(is_invalid(Color::parse("rgb(1, 2, 3")));
        assert!(is_invalid(Color::parse("RGB(1, 2, 3)")));
    }

    // =========================================================================
    // Channel collections
    // =========================================================================

    #[test]
    fn three_integers_accepted() {
        let color = Color::from_channels([17, 170, 34]).unwrap();
        assert_eq!(color.as_hex(), "#11aa22");
        let color = Color::from_channels(vec![255u8, 0, 128]).unwrap();
        assert_eq!(color.as_rgb(), "rgb(255, 0, 128)");
    }

    #[test]
    fn numeric_strings_accepted_as_channels() {
        let color = Color::from_channels(["255", "0", "0"]).unwrap();
        assert_eq!(color.as_hex(), "#ff0000");
    }

    #[test]
    fn wrong_channel_count_rejected() {
        assert!(is_invalid(Color::from_channels([1, 2])));
        assert!(is_invalid(Color::from_channels([1, 2, 3, 4])));
        assert!(is_invalid(Color::from_channels(Vec::<i32>::new())));
    }

    #[test]
    fn channel_out_of_range_rejected() {
        assert!(is_invalid(Color::from_channels([0, 256, 0])));
        assert!(is_invalid(Color::from_channels([-1, 0, 0])));
    }

    #[test]
    fn non_numeric_channel_rejected() {
        assert!(is_invalid(Color::from_channels(["red", "0", "0"])));
    }

    #[test]
    fn error_message_names_the_input() {
        let err = Color::parse("#12").unwrap_err();
        assert_eq!(err.to_string(), "Color '#12' is not a valid color");
        let err = Color::from_channels([1, 2]).unwrap_err();
        assert_eq!(err.to_string(), "Color '[1, 2]' is not a valid color");
    }

    // =========================================================================
    // ColorSpec
    // =========================================================================

    #[test]
    fn color_spec_deserializes_from_string_or_array() {
        #[derive(Deserialize)]
        struct Doc {
            color: ColorSpec,
        }
        let doc: Doc = toml::from_str(r##"color = "#abc""##).unwrap();
        assert_eq!(doc.color.parse().unwrap().as_hex(), "#aabbcc");
        let doc: Doc = toml::from_str("color = [1, 2, 3]").unwrap();
        assert_eq!(doc.color.parse().unwrap().channels(), [1, 2, 3]);
    }

    #[test]
    fn color_spec_accepts_numeric_string_channels() {
        #[derive(Deserialize)]
        struct Doc {
            color: ColorSpec,
        }
        let doc: Doc = toml::from_str(r#"color = ["255", "0", " 16 "]"#).unwrap();
        assert_eq!(doc.color.parse().unwrap(), Color::rgb(255, 0, 16));

        let doc: Doc = toml::from_str(r#"color = [255, "128", 0]"#).unwrap();
        assert_eq!(doc.color.parse().unwrap(), Color::rgb(255, 128, 0));
    }

    #[test]
    fn color_spec_rejects_non_numeric_string_channels() {
        #[derive(Deserialize)]
        struct Doc {
            color: ColorSpec,
        }
        let doc: Doc = toml::from_str(r#"color = ["red", "0", "0"]"#).unwrap();
        let err = doc.color.parse().unwrap_err();
        assert_eq!(err.to_string(), r#"Color '["red", "0", "0"]' is not a valid color"#);

        let doc: Doc = toml::from_str(r#"color = ["256", "0", "0"]"#).unwrap();
        assert!(doc.color.parse().is_err());
    }

    #[test]
    fn color_spec_default_is_black() {
        assert_eq!(ColorSpec::default().parse().unwrap(), Color::BLACK);
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let pixel = Color::rgb(10, 20, 30).with_alpha(0);
        assert_eq!(pixel.0, [10, 20, 30, 0]);
    }
}
