//! Color values for diagram styling.
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate so any CSS
//! color string ("#ff9900", "rgb(255, 153, 0)", "orange") can be used in
//! configuration. Graphviz only understands hex and X11 names, so colors are
//! emitted through [`Color::to_hex`].

use std::str::FromStr;

use color::{DynamicColor, Srgb};

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns a message naming `color_str` if it is not a CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::color::Color;
    ///
    /// let orange = Color::new("#ED7100").unwrap();
    /// assert_eq!(orange.to_hex(), "#ed7100");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
    }
}
