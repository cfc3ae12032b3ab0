//! Color handling for node themes and connection strokes.
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Any CSS color string is accepted, so palette entries
//! can be written as the hex literals designers hand out.

use std::str::FromStr;

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use nnsketch_core::color::Color;
    ///
    /// let pre_activation = Color::new("#6699FF").unwrap();
    /// let border = Color::new("black").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as six lowercase hex digits without a leading `#`.
    ///
    /// Image rendering services take colors in this form as part of the
    /// request URL. Alpha is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use nnsketch_core::color::Color;
    ///
    /// let color = Color::new("#FFA41F").unwrap();
    /// assert_eq!(color.to_hex_string(), "ffa41f");
    /// ```
    pub fn to_hex_string(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
