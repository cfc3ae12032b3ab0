//! The drawing-surface capability that nodes, layers and connections draw onto.
//!
//! [`Surface`] mirrors the immediate-mode primitives of a 2D canvas context:
//! paths are built with `begin_path`/`move_to`/`line_to`/curve segments and
//! then painted with the current fill or stroke style. Style state (colors,
//! line width, global alpha) lives on the surface and persists between calls.
//!
//! Implementations in this crate:
//! - [`SvgSurface`](crate::draw::SvgSurface) turns the command stream into SVG elements.
//! - [`RecordingSurface`](crate::draw::RecordingSurface) records every call for replay or inspection.

use std::ops::{Deref, DerefMut};

use crate::{color::Color, geometry::Point};

/// An externally loaded image, such as a rendered LaTeX label.
///
/// The image is placed at its intrinsic size, which only the viewer knows.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    source: String,
}

impl Image {
    /// Creates an image that refers to `source` (a URL or data URI).
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Immediate-mode 2D drawing primitives.
///
/// Primitives never fail; a surface that cannot honour a call (for example a
/// `stroke` with no current path) simply draws nothing.
pub trait Surface {
    /// Discards the current path and starts a new one.
    fn begin_path(&mut self);

    /// Starts a new sub-path at `point`.
    fn move_to(&mut self, point: Point);

    /// Adds a straight segment to `point`.
    fn line_to(&mut self, point: Point);

    /// Adds a quadratic curve segment through `control` to `end`.
    fn quadratic_curve_to(&mut self, control: Point, end: Point);

    /// Adds a cubic bezier segment through two control points to `end`.
    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point);

    /// Closes the current sub-path back to its starting point.
    fn close_path(&mut self);

    fn set_stroke_color(&mut self, color: Color);

    fn set_fill_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    /// Fills the current path with the current fill color.
    fn fill(&mut self);

    /// Strokes the current path with the current stroke color and line width.
    fn stroke(&mut self);

    /// Returns the transparency applied to everything painted, in `0.0..=1.0`.
    fn global_alpha(&self) -> f32;

    fn set_global_alpha(&mut self, alpha: f32);

    /// Draws `image` with its top-left corner at `position`.
    fn draw_image(&mut self, image: &Image, position: Point);
}

/// Temporarily overrides a surface's global alpha.
///
/// The previous alpha is restored when the scope is dropped, whichever way
/// the enclosing code exits, unwinding included. The scope dereferences to the
/// surface so drawing continues through it.
///
/// # Examples
///
/// ```
/// # use nnsketch_core::draw::{AlphaScope, RecordingSurface, Surface};
/// let mut surface = RecordingSurface::new();
/// {
///     let mut faded = AlphaScope::new(&mut surface, 0.3);
///     assert_eq!(faded.global_alpha(), 0.3);
///     faded.stroke();
/// }
/// assert_eq!(surface.global_alpha(), 1.0);
/// ```
pub struct AlphaScope<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    previous: f32,
}

impl<'a, S: Surface + ?Sized> AlphaScope<'a, S> {
    pub fn new(surface: &'a mut S, alpha: f32) -> Self {
        let previous = surface.global_alpha();
        surface.set_global_alpha(alpha);
        Self { surface, previous }
    }
}

impl<S: Surface + ?Sized> Deref for AlphaScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for AlphaScope<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for AlphaScope<'_, S> {
    fn drop(&mut self) {
        self.surface.set_global_alpha(self.previous);
    }
}
