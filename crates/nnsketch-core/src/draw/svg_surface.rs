//! An SVG backend for [`Surface`].
//!
//! Every `fill` or `stroke` turns the current path into one `<path>` element
//! carrying the style state in effect at that moment, so paint order in the
//! document matches call order on the surface.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Image, Surface},
    geometry::{Bounds, Point},
};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Collects drawing calls as SVG elements.
///
/// # Examples
///
/// ```
/// # use nnsketch_core::draw::{SvgSurface, Surface};
/// # use nnsketch_core::geometry::Point;
/// let mut surface = SvgSurface::new();
/// surface.begin_path();
/// surface.move_to(Point::new(0.0, 0.0));
/// surface.line_to(Point::new(10.0, 10.0));
/// surface.stroke();
///
/// let nodes = surface.into_nodes();
/// assert_eq!(nodes.len(), 1);
/// assert!(nodes[0].to_string().contains("M 0 0 L 10 10"));
/// ```
#[derive(Debug)]
pub struct SvgSurface {
    nodes: Vec<SvgNode>,
    path: String,
    stroke_color: Color,
    fill_color: Color,
    line_width: f32,
    global_alpha: f32,
    bounds: Option<Bounds>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            path: String::new(),
            stroke_color: Color::default(),
            fill_color: Color::default(),
            line_width: 1.0,
            global_alpha: 1.0,
            bounds: None,
        }
    }

    /// Smallest box containing every point handed to the surface so far,
    /// curve control points included. `None` until something is drawn.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Number of elements emitted so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consumes the surface, returning the emitted elements in paint order.
    pub fn into_nodes(self) -> Vec<SvgNode> {
        self.nodes
    }

    fn track(&mut self, point: Point) {
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.extend_to(point),
            None => Bounds::from_point(point),
        });
    }

    fn push_segment(&mut self, command: char, points: &[Point]) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        self.path.push(command);
        for point in points {
            self.path.push_str(&format!(" {} {}", point.x(), point.y()));
            self.track(*point);
        }
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SvgSurface {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.push_segment('M', &[point]);
    }

    fn line_to(&mut self, point: Point) {
        self.push_segment('L', &[point]);
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        self.push_segment('Q', &[control, end]);
    }

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.push_segment('C', &[control1, control2, end]);
    }

    fn close_path(&mut self) {
        self.push_segment('Z', &[]);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let opacity = self.fill_color.alpha() * self.global_alpha;
        let path = svg_element::Path::new()
            .set("d", self.path.clone())
            .set("fill", &self.fill_color)
            .set("fill-opacity", opacity)
            .set("stroke", "none");
        self.nodes.push(Box::new(path));
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let opacity = self.stroke_color.alpha() * self.global_alpha;
        let path = svg_element::Path::new()
            .set("d", self.path.clone())
            .set("fill", "none")
            .set("stroke", &self.stroke_color)
            .set("stroke-opacity", opacity)
            .set("stroke-width", self.line_width);
        self.nodes.push(Box::new(path));
    }

    fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
    }

    fn draw_image(&mut self, image: &Image, position: Point) {
        let mut element = svg_element::Image::new()
            .set("href", image.source())
            .set("x", position.x())
            .set("y", position.y());
        self.track(position);
        if self.global_alpha < 1.0 {
            element = element.set("opacity", self.global_alpha);
        }
        self.nodes.push(Box::new(element));
    }
}
