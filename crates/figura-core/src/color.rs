//! Color tokens and the palette that maps them to CSS colors.
//!
//! Diagrams never name concrete colors. Elements carry an optional
//! [`ColorToken`] from a small closed set; the document turns each token
//! into a CSS class and a set of marker definitions, and the [`Palette`]
//! decides which actual color each class gets. An element without a token
//! is drawn in the palette's default color.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::Deserialize;

/// One of the named colors an element can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Blue,
    Green,
    Red,
    Orange,
    Grey,
}

impl ColorToken {
    /// Number of tokens.
    pub const COUNT: usize = 5;

    /// Every token, in stylesheet order.
    pub const ALL: [ColorToken; Self::COUNT] = [
        ColorToken::Blue,
        ColorToken::Green,
        ColorToken::Red,
        ColorToken::Orange,
        ColorToken::Grey,
    ];

    /// CSS class name used for this token.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Grey => "grey",
        }
    }

    fn default_css(self) -> &'static str {
        match self {
            Self::Blue => "#0969da",
            Self::Green => "#1a7f37",
            Self::Red => "#cf222e",
            Self::Orange => "#bc4c00",
            Self::Grey => "#6e7781",
        }
    }
}

impl FromStr for ColorToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|token| token.class_name() == s)
            .ok_or_else(|| {
                format!("invalid color `{s}`, valid values: blue, green, red, orange, grey")
            })
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A validated CSS color value.
///
/// Wraps [`DynamicColor`] so that palette overrides coming from
/// configuration are rejected early if they are not valid CSS.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CssColor {
    color: DynamicColor,
}

impl CssColor {
    /// Parses a CSS color string such as `"#ff0000"`, `"rgb(255, 0, 0)"`
    /// or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use figura_core::color::CssColor;
    ///
    /// assert!(CssColor::new("#ff0000").is_ok());
    /// assert!(CssColor::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

/// Maps color tokens (and the uncolored default) to CSS colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    default: CssColor,
    colors: [CssColor; ColorToken::COUNT],
}

impl Palette {
    /// Color used for a token, or the default color for `None`.
    pub fn get(&self, token: Option<ColorToken>) -> CssColor {
        match token {
            Some(token) => self.colors[token as usize],
            None => self.default,
        }
    }

    /// Replaces the color of a single token.
    pub fn set(&mut self, token: ColorToken, color: CssColor) {
        self.colors[token as usize] = color;
    }

    /// Replaces the color used for uncolored elements.
    pub fn set_default(&mut self, color: CssColor) {
        self.default = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        let parse = |css: &str| CssColor {
            color: DynamicColor::from_str(css).expect("built-in palette colors are valid CSS"),
        };
        Self {
            default: parse("#24292f"),
            colors: ColorToken::ALL.map(|token| parse(token.default_css())),
        }
    }
}
