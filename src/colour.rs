//! Colour type and rgba() expression parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SwatchError};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a CSS-style `rgba()` expression.
    ///
    /// The expression is a single case-insensitive `rgba(...)` call with
    /// exactly four comma-separated parameters, whitespace tolerated
    /// throughout. Each parameter is one of:
    /// - a plain integer, taken directly as the channel byte (`255`)
    /// - a decimal fraction, scaled by 255 (`0.5` → 128)
    /// - a percentage of 255 (`50%` → 128)
    ///
    /// Values outside the byte range wrap rather than clamp. Structural
    /// problems (wrong name, unbalanced parentheses, wrong parameter
    /// count) report a generic error; a parameter that fails to convert
    /// reports an error naming that parameter. Safe to call on partial
    /// input; no input panics.
    pub fn from_rgba_expr(input: &str) -> Result<Self> {
        let tokens = split_rgba_call(input.trim()).ok_or_else(|| SwatchError::Parse {
            message: "Invalid rgba function format".to_string(),
            help: Some(
                "Use rgba(r, g, b, a) with four parameters, e.g. rgba(255, 0, 128, 1.0)"
                    .to_string(),
            ),
        })?;

        let [r, g, b, a] = tokens;
        Ok(Self::new(
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
            parse_channel(a)?,
        ))
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Colour {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_rgba_expr(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Split an `rgba(...)` call into its four raw parameter tokens.
///
/// Returns `None` unless the trimmed input is the case-insensitive
/// function name, one balanced pair of parentheses, and exactly four
/// non-empty comma-separated tokens.
fn split_rgba_call(text: &str) -> Option<[&str; 4]> {
    let name = text.get(..4)?;
    if !name.eq_ignore_ascii_case("rgba") {
        return None;
    }

    let rest = text[4..].trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    if inner.contains('(') || inner.contains(')') {
        return None;
    }

    let mut parts = inner.split(',');
    let tokens = [parts.next()?, parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() || tokens.iter().any(|t| t.trim().is_empty()) {
        return None;
    }

    Some(tokens)
}

/// Convert one parameter token to a channel byte.
///
/// A trailing `%` maps the value through `round(v / 100 * 255)`, a token
/// containing a decimal point through `round(v * 255)`, and a plain
/// integer is the byte value itself. Overflow wraps through u8 narrowing
/// rather than clamping, so `150%` comes out as 127, not 255.
fn parse_channel(token: &str) -> Result<u8> {
    let token = token.trim();
    let (number, percent) = match token.strip_suffix('%') {
        Some(rest) => (rest.trim_end(), true),
        None => (token, false),
    };

    // Channel numbers are digits and a decimal point only; no sign, no
    // exponent.
    let well_formed =
        !number.is_empty() && number.chars().all(|c| c.is_ascii_digit() || c == '.');
    let value: f64 = well_formed
        .then(|| number.parse().ok())
        .flatten()
        .ok_or_else(|| SwatchError::Parse {
            message: format!("Invalid parameter '{}'", token),
            help: Some("Parameters are integers, decimals, or percentages".to_string()),
        })?;

    let scaled = if percent {
        (value / 100.0 * 255.0).round()
    } else if number.contains('.') {
        (value * 255.0).round()
    } else {
        value
    };

    Ok(scaled as u64 as u8)
}
