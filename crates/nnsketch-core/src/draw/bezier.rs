//! Bezier routing for connections between nodes.
//!
//! A connection is a cubic bezier whose control points stick out
//! horizontally from each endpoint: `curvature_from` to the right of the
//! start and `curvature_to` to the left of the end. The curve therefore
//! leaves and enters nodes horizontally whatever the vertical offset between
//! them, giving the S-shaped "ease" look of layer-to-layer wiring.

use log::trace;

use crate::{
    color::Color,
    draw::{AlphaScope, StrokeDefinition, Surface},
    geometry::Point,
};

/// Visual parameters of one connection curve.
///
/// # Examples
///
/// ```
/// use nnsketch_core::color::Color;
/// use nnsketch_core::draw::ConnectionStyle;
///
/// let style = ConnectionStyle::new(Color::new("#AAAAAA").unwrap())
///     .with_stroke_width(2.0)
///     .with_curvature(100.0, 100.0)
///     .with_opacity(0.5);
/// assert_eq!(style.curvature_from(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionStyle {
    stroke: StrokeDefinition,
    curvature_from: f32,
    curvature_to: f32,
    opacity: f32,
}

impl ConnectionStyle {
    /// Creates a style with the given color and the default width, curvature
    /// and opacity.
    pub fn new(color: Color) -> Self {
        Self {
            stroke: StrokeDefinition::new(color, 3.0),
            ..Self::default()
        }
    }

    /// Sets the line width (builder style).
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke.set_width(width);
        self
    }

    /// Sets how far the control points stick out from the start and the end.
    pub fn with_curvature(mut self, from: f32, to: f32) -> Self {
        self.curvature_from = from;
        self.curvature_to = to;
        self
    }

    /// Sets the global alpha applied while stroking this connection.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn color(&self) -> Color {
        self.stroke.color()
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke.width()
    }

    pub fn curvature_from(&self) -> f32 {
        self.curvature_from
    }

    pub fn curvature_to(&self) -> f32 {
        self.curvature_to
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Control points of the curve from `from` to `to`.
    pub fn control_points(&self, from: Point, to: Point) -> (Point, Point) {
        (
            from.shift_x(self.curvature_from),
            to.shift_x(-self.curvature_to),
        )
    }
}

impl Default for ConnectionStyle {
    /// Red, 3px wide, curvature 50 on both ends, opacity 0.3.
    fn default() -> Self {
        Self {
            stroke: StrokeDefinition::new(
                Color::new("#FF0000").expect("'#FF0000' is a valid CSS color"),
                3.0,
            ),
            curvature_from: 50.0,
            curvature_to: 50.0,
            opacity: 0.3,
        }
    }
}

/// Strokes a connection curve from `from` to `to`.
///
/// The surface's global alpha is replaced by `style.opacity()` only for the
/// duration of the stroke and then restored to its previous value.
pub fn route<S: Surface + ?Sized>(
    surface: &mut S,
    from: Point,
    to: Point,
    style: &ConnectionStyle,
) {
    let (control1, control2) = style.control_points(from, to);
    trace!(
        from:? = from,
        to:? = to,
        opacity = style.opacity();
        "Routing connection"
    );

    surface.begin_path();
    surface.move_to(from);
    surface.bezier_curve_to(control1, control2, to);
    style.stroke().apply(surface);

    let mut scoped = AlphaScope::new(surface, style.opacity());
    scoped.stroke();
}
