//! Stroke definitions shared by node borders and connection curves.
//!
//! A [`StrokeDefinition`] bundles the two pieces of surface state every
//! outline needs, color and line width, and applies them in one call right
//! before a `stroke`. Nothing is restored afterwards: every draw call in this
//! crate sets the stroke it needs explicitly.

use crate::{color::Color, draw::Surface};

/// A stroke color and width.
///
/// # Examples
///
/// ```
/// use nnsketch_core::draw::StrokeDefinition;
/// use nnsketch_core::color::Color;
///
/// let border = StrokeDefinition::new(Color::new("#333333").unwrap(), 3.0);
/// assert_eq!(border.width(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Sets the stroke width.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Writes line width and stroke color into the surface state.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_line_width(self.width);
        surface.set_stroke_color(self.color);
    }
}
