//! Declared CSS values and property names.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use core::fmt;
use std::borrow::Borrow;
use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// [§ 2 Value Definition Syntax](https://www.w3.org/TR/css-values-4/#value-defs)
///
/// A declared value, as written in the stylesheet.
///
/// Serializes without a tag: a keyword is a bare string and a dimension is
/// a `[number, unit]` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A bare identifier, e.g. `red` or `block`.
    Keyword(String),
    /// [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
    ///
    /// A number immediately followed by a unit, e.g. `1em` -> `(1.0, "em")`.
    /// Units are stored lowercase; percentages use the unit `%`.
    Dimension(f64, String),
    /// A unitless number, e.g. `0` or `1.5`.
    Number(f64),
    /// [§ 5 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
    Color(ColorValue),
    /// A quoted string.
    String(String),
    /// Two or more whitespace-separated components, e.g. `0 auto`.
    List(Vec<Value>),
}

impl Value {
    /// Create a keyword value.
    #[must_use]
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword(value.into())
    }

    /// Create a dimension value; the unit is lowercased.
    #[must_use]
    pub fn dimension(value: f64, unit: &str) -> Self {
        Self::Dimension(value, unit.to_ascii_lowercase())
    }

    /// Returns the keyword text if this is a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => write!(f, "{k}"),
            Self::Dimension(value, unit) => write!(f, "{value}{unit}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Color(color) => write!(f, "{color}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

/// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
///
/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        // [§ 4.2]
        // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
        // by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex.get(i..=i)?.repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: 255,
            }),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: 255,
            }),
            8 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A validated, ASCII-lowercased CSS property name such as `font-size`.
///
/// Borrows as `str`, so a [`PropertyMap`] can be queried with plain string
/// slices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PropertyName(String);

impl PropertyName {
    /// Validate and normalize a property name.
    ///
    /// Returns `None` unless `name` is a non-empty run of letters, digits,
    /// `-` and `_` that does not start with a digit.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        let first = name.chars().next()?;
        if first.is_ascii_digit() {
            return None;
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(Self(name.to_ascii_lowercase()))
    }

    /// The normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PropertyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Property name to declared value, one entry per property.
pub type PropertyMap = HashMap<PropertyName, Value>;
