//! Style values and unit resolution.
//!
//! A declaration's value is a list of [`StyleValue`] tokens, so
//! `margin: 4px auto` becomes `[Number(4px), Keyword("auto")]`. Values are
//! immutable once parsed. Converting a number to layout pixels needs the
//! containing block width and the node's font size, which only layout knows,
//! so that happens in [`Number::to_pixels`] rather than at parse time.

use std::fmt;
use std::str::FromStr;

use boxwood_common::DiagnosticSink;
use serde::Serialize;
use strum_macros::Display;

use crate::error::ParseError;

/// Unit attached to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum Unit {
    /// `px`
    #[strum(to_string = "px")]
    Pixels,
    /// `%` (also accepted as `pct`)
    #[strum(to_string = "%")]
    Percentage,
    /// `em`, relative to the node's font size
    #[strum(to_string = "em")]
    Em,
    /// A bare number.
    #[strum(to_string = "")]
    None,
    /// A suffix nothing understands, e.g. `vw`.
    #[strum(to_string = "?")]
    Unknown,
}

impl Unit {
    /// Classify a unit suffix. Matching is case-insensitive.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix.to_ascii_lowercase().as_str() {
            "px" => Self::Pixels,
            "%" | "pct" => Self::Percentage,
            "em" => Self::Em,
            "" => Self::None,
            _ => Self::Unknown,
        }
    }
}

/// A number with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Number {
    /// Magnitude as written.
    pub value: f32,
    /// Unit suffix.
    pub unit: Unit,
}

impl Number {
    /// A number with an explicit unit.
    #[must_use]
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A pixel length.
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self::new(value, Unit::Pixels)
    }

    /// Parse `12`, `-1.5em`, `50%`, `3vw`...
    ///
    /// Returns `None` when the text does not start with a number.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut end = 0;
        for (i, c) in raw.char_indices() {
            let numeric = c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'));
            if !numeric {
                break;
            }
            end = i + c.len_utf8();
        }
        let (digits, suffix) = raw.split_at(end);
        let value: f32 = digits.parse().ok()?;
        Some(Self::new(value, Unit::from_suffix(suffix)))
    }

    /// Resolve to whole layout pixels.
    ///
    /// - `px`: rounded
    /// - `%`: of `containing_width`, rounded
    /// - `em`: times `font_size_px`, rounded
    /// - unitless and unknown units: the raw integer value, with a warning
    ///
    /// The result is clamped to [`MAX_LENGTH_PX`] either way.
    #[must_use]
    pub fn to_pixels(self, containing_width: i32, font_size_px: f32, sink: &dyn DiagnosticSink) -> i32 {
        match self.unit {
            Unit::Pixels => round_px(self.value),
            Unit::Percentage => round_px(self.value / 100.0 * containing_width as f32),
            Unit::Em => round_px(self.value * font_size_px),
            Unit::None => {
                sink.warn(
                    "style",
                    &format!("length '{}' has no unit, using it as pixels", self.value),
                );
                clamp_px(self.value)
            }
            Unit::Unknown => {
                sink.warn(
                    "style",
                    &format!("length '{}' has an unknown unit, using it as pixels", self.value),
                );
                clamp_px(self.value)
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Largest magnitude a resolved length may have, in pixels.
///
/// Lengths are clamped to this on resolution so that summing a box's
/// edges can never overflow `i32`.
pub const MAX_LENGTH_PX: i32 = 1 << 24;

/// Round a float to whole pixels, half away from zero, within
/// [`MAX_LENGTH_PX`].
pub(crate) fn round_px(value: f32) -> i32 {
    clamp_px(value.round())
}

/// Truncate a float to whole pixels within [`MAX_LENGTH_PX`]. NaN is 0.
pub(crate) fn clamp_px(value: f32) -> i32 {
    let limit = MAX_LENGTH_PX as f32;
    value.clamp(-limit, limit) as i32
}

/// Clamp an integer length into [`MAX_LENGTH_PX`].
pub(crate) const fn clamp_len(value: i32) -> i32 {
    if value > MAX_LENGTH_PX {
        MAX_LENGTH_PX
    } else if value < -MAX_LENGTH_PX {
        -MAX_LENGTH_PX
    } else {
        value
    }
}

/// sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("lime", Color::rgb(0, 255, 0)),
    ("olive", Color::rgb(128, 128, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("teal", Color::rgb(0, 128, 128)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("transparent", Color::TRANSPARENT),
];

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse 3, 4, 6 or 8 hex digits, with or without a leading `#`.
    ///
    /// Short forms replicate each digit, so `#f80` is `#ff8800`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }

    /// Look up a basic named color, case-insensitively.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
    }

    /// `rgb(r g b)` / `rgba(r, g, b, a)`. Channels are numbers or
    /// percentages; alpha is a fraction or a percentage.
    fn from_function(name: &str, args: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidColorFunction(format!("{name}({args})"));
        let params: Vec<Number> = split_parameters(args)
            .iter()
            .filter(|p| p.as_str() != "/")
            .map(|p| Number::parse(p))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;

        let channel = |n: Number| -> Result<u8, ParseError> {
            let v = match n.unit {
                Unit::Percentage => n.value / 100.0 * 255.0,
                Unit::None => n.value,
                _ => return Err(invalid()),
            };
            Ok(v.round().clamp(0.0, 255.0) as u8)
        };
        let alpha = |n: Number| -> Result<u8, ParseError> {
            let v = match n.unit {
                Unit::Percentage => n.value / 100.0,
                Unit::None => n.value,
                _ => return Err(invalid()),
            };
            Ok((v.clamp(0.0, 1.0) * 255.0).round() as u8)
        };

        match params.as_slice() {
            [r, g, b] => Ok(Self::rgb(channel(*r)?, channel(*g)?, channel(*b)?)),
            [r, g, b, a] => Ok(Self {
                r: channel(*r)?,
                g: channel(*g)?,
                b: channel(*b)?,
                a: alpha(*a)?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// One token of a declaration's value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StyleValue {
    /// A length, percentage or bare number.
    Number(Number),
    /// A hex or functional color. Named colors stay keywords until a
    /// color accessor asks for them.
    Color(Color),
    /// Identifiers and strings, e.g. `auto`, `block`, `"Submit"`.
    Keyword(String),
}

impl StyleValue {
    /// Shorthand for a pixel number.
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self::Number(Number::px(value))
    }

    /// Shorthand for a keyword.
    #[must_use]
    pub fn keyword(text: &str) -> Self {
        Self::Keyword(text.to_string())
    }

    /// Parse one token.
    ///
    /// # Errors
    ///
    /// Fails on empty input, malformed hex colors, and functions other
    /// than `rgb()`/`rgba()`.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        if raw.starts_with('#') {
            return Color::from_hex(raw)
                .map(Self::Color)
                .ok_or_else(|| ParseError::InvalidHexColor(raw.to_string()));
        }

        if let Some(inner) = unquote(raw) {
            return Ok(Self::Keyword(inner.to_string()));
        }

        if let Some((name, args)) = split_function(raw) {
            return if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") {
                Color::from_function(name, args).map(Self::Color)
            } else {
                Err(ParseError::UnsupportedFunction(name.to_string()))
            };
        }

        Ok(Number::parse(raw).map_or_else(|| Self::Keyword(raw.to_string()), Self::Number))
    }

    /// The number, if this is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The color, resolving named-color keywords.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Keyword(k) => Color::from_named(k),
            Self::Number(_) => None,
        }
    }

    /// The keyword text, if this is one.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// Case-insensitive keyword comparison.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.as_keyword()
            .is_some_and(|k| k.eq_ignore_ascii_case(keyword))
    }
}

impl FromStr for StyleValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Color(c) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a),
            Self::Keyword(k) => f.write_str(k),
        }
    }
}

/// Parse a whole declaration value into tokens.
///
/// A trailing `!important` is stripped (it carries no weight here). Tokens
/// that fail to parse are reported to `sink` and dropped.
pub fn parse_values(raw: &str, sink: &dyn DiagnosticSink) -> Vec<StyleValue> {
    const IMPORTANT: &str = "!important";
    let mut raw = raw.trim();
    let cut = raw.len().saturating_sub(IMPORTANT.len());
    if raw.is_char_boundary(cut) && raw[cut..].eq_ignore_ascii_case(IMPORTANT) {
        raw = raw[..cut].trim_end();
    }

    split_parameters(raw)
        .iter()
        .filter_map(|token| match StyleValue::parse(token) {
            Ok(value) => Some(value),
            Err(err) => {
                sink.warn("style", &format!("dropping value: {err}"));
                None
            }
        })
        .collect()
}

/// Split on whitespace and commas that sit outside quotes and parentheses.
#[must_use]
pub fn split_parameters(raw: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for c in raw.chars() {
        if quote.is_none() && depth == 0 && (c == ',' || c.is_whitespace()) {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            continue;
        }
        match c {
            '"' | '\'' if quote == Some(c) => quote = None,
            '"' | '\'' if quote.is_none() => quote = Some(c),
            '(' if quote.is_none() => depth += 1,
            ')' if quote.is_none() => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(c);
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

fn unquote(raw: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        raw.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

/// `name(args)` where name is an identifier.
fn split_function(raw: &str) -> Option<(&str, &str)> {
    let open = raw.find('(')?;
    let name = &raw[..open];
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        || name.starts_with(|c: char| c.is_ascii_digit())
    {
        return None;
    }
    let args = raw[open + 1..].trim();
    Some((name, args.strip_suffix(')').unwrap_or(args)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_function_rejects_numbers() {
        assert_eq!(split_function("rgb(1, 2, 3)"), Some(("rgb", "1, 2, 3")));
        assert_eq!(split_function("12(px)"), None);
        assert_eq!(split_function("(x)"), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"Submit\""), Some("Submit"));
        assert_eq!(unquote("'a b'"), Some("a b"));
        assert_eq!(unquote("\"open"), None);
    }
}
