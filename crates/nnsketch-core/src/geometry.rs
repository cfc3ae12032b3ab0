//! Geometric primitives for node and connection placement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate on the drawing surface
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned box used to size the output document
//!
//! # Coordinate System
//!
//! Coordinates follow the canvas/SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! A node's position is its top-left corner, and layers stack their nodes
//! downward along +Y.

/// A 2D point on the drawing surface.
///
/// # Examples
///
/// ```
/// # use nnsketch_core::geometry::Point;
/// let out_anchor = Point::new(155.0, 25.0);
/// let control = out_anchor.shift_x(100.0);
/// assert_eq!(control.x(), 255.0);
/// assert_eq!(control.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Same point moved to row `y`.
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Same point moved horizontally by `dx`.
    pub fn shift_x(mut self, dx: f32) -> Self {
        self.x += dx;
        self
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a drawn element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// Axis-aligned box given by its minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Box with `top_left` as its minimum corner.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Zero-sized box at `point`.
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Smallest box containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nnsketch_core::geometry::{Bounds, Point, Size};
    /// let first = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(165.0, 50.0));
    /// let second = Bounds::new_from_top_left(Point::new(300.0, 60.0), Size::new(165.0, 50.0));
    ///
    /// let combined = first.merge(&second);
    /// assert_eq!(combined.width(), 465.0);
    /// assert_eq!(combined.height(), 110.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the box so that it contains `point`.
    pub fn extend_to(&self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Grows the box by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}
