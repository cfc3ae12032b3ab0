//! Nodes: the rounded boxes that stand for one unit of a network layer.
//!
//! A node body is split at `mid_x` into a pre-activation region (left) and a
//! post-activation region (right), or drawn as a single homogeneous region.
//! All derived geometry (midpoints and connection anchors) is computed once
//! when the node is built and never changes afterwards.
//!
//! ```text
//!  (x, y)            mid_x              end_x
//!     ╭──────────────────┬──────────────────╮
//!   ● │  pre-activation  │ post-activation  │ ●   ← anchors at input_anchor_x
//!     ╰──────────────────┴──────────────────╯       and output_anchor_x
//!                                          end_y
//! ```

use std::sync::Arc;

use log::trace;

use crate::{
    anchor::anchor_offsets,
    color::Color,
    draw::{ConnectionStyle, StrokeDefinition, Surface, route},
    error::{AnchorSide, DrawError},
    geometry::{Bounds, Point, Size},
    theme::{Dimensions, NodeTheme},
};

/// Where on a node's edge a connection attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// The vertical middle of the node, regardless of its anchors.
    #[default]
    Center,
    /// One of the evenly spaced anchors, counted from the top edge.
    Index(usize),
}

/// Per-node options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeOptions {
    /// Anchors on the left edge for incoming connections.
    pub input_anchors: usize,
    /// Anchors on the right edge for outgoing connections.
    pub output_anchors: usize,
    /// Marks the node as a bias unit (labelled `+1`).
    pub bias: bool,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            input_anchors: 1,
            output_anchors: 1,
            bias: false,
        }
    }
}

/// A positioned node with its cached geometry.
#[derive(Debug, Clone)]
pub struct Node {
    position: Point,
    dimensions: Arc<Dimensions>,
    theme: Arc<NodeTheme>,
    is_bias: bool,
    mid_x: f32,
    end_x: f32,
    mid_y: f32,
    end_y: f32,
    input_anchor_x: f32,
    output_anchor_x: f32,
    input_anchor_ys: Vec<f32>,
    output_anchor_ys: Vec<f32>,
}

impl Node {
    /// Builds a node with its top-left corner at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidArgument`] if the position is not finite.
    /// Dimension validity is guaranteed by [`Dimensions::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use nnsketch_core::draw::{Node, NodeOptions};
    /// use nnsketch_core::geometry::Point;
    /// use nnsketch_core::theme::{Dimensions, NodeTheme};
    ///
    /// let node = Node::new(
    ///     Point::new(0.0, 0.0),
    ///     Arc::new(Dimensions::default()),
    ///     Arc::new(NodeTheme::default()),
    ///     NodeOptions::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(node.mid_x(), 65.0);
    /// assert_eq!(node.end_x(), 165.0);
    /// assert_eq!(node.output_anchor_ys(), &[25.0]);
    /// ```
    pub fn new(
        position: Point,
        dimensions: Arc<Dimensions>,
        theme: Arc<NodeTheme>,
        options: NodeOptions,
    ) -> Result<Self, DrawError> {
        if !position.is_finite() {
            return Err(DrawError::invalid(format!(
                "node position must be finite, got {position:?}"
            )));
        }

        let body = dimensions.body();
        let height = dimensions.height();
        let radius = dimensions.corner_radius();

        let mid_x = position.x() + body.pre_width();
        let end_x = mid_x + body.post_width();

        Ok(Self {
            position,
            is_bias: options.bias,
            mid_x,
            end_x,
            mid_y: position.y() + height / 2.0,
            end_y: position.y() + height,
            input_anchor_x: position.x() + radius,
            output_anchor_x: end_x - radius,
            input_anchor_ys: anchor_offsets(options.input_anchors, height, position.y()),
            output_anchor_ys: anchor_offsets(options.output_anchors, height, position.y()),
            dimensions,
            theme,
        })
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    /// The seam between the two regions.
    pub fn mid_x(&self) -> f32 {
        self.mid_x
    }

    /// The right edge.
    pub fn end_x(&self) -> f32 {
        self.end_x
    }

    pub fn mid_y(&self) -> f32 {
        self.mid_y
    }

    /// The bottom edge.
    pub fn end_y(&self) -> f32 {
        self.end_y
    }

    /// X coordinate where incoming connections end.
    pub fn input_anchor_x(&self) -> f32 {
        self.input_anchor_x
    }

    /// X coordinate where outgoing connections start.
    pub fn output_anchor_x(&self) -> f32 {
        self.output_anchor_x
    }

    pub fn input_anchor_ys(&self) -> &[f32] {
        &self.input_anchor_ys
    }

    pub fn output_anchor_ys(&self) -> &[f32] {
        &self.output_anchor_ys
    }

    pub fn is_bias(&self) -> bool {
        self.is_bias
    }

    pub fn dimensions(&self) -> &Arc<Dimensions> {
        &self.dimensions
    }

    pub fn theme(&self) -> &Arc<NodeTheme> {
        &self.theme
    }

    /// The box covered by the node body, border excluded.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(
            self.position,
            Size::new(self.end_x - self.x(), self.dimensions.height()),
        )
    }

    /// Resolves an anchor on the outgoing (right) edge.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::AnchorOutOfRange`] for an index beyond the
    /// node's output anchors.
    pub fn output_point(&self, anchor: Anchor) -> Result<Point, DrawError> {
        let ys = &self.output_anchor_ys;
        let y = resolve_anchor(anchor, self.mid_y, ys, AnchorSide::Output)?;
        Ok(Point::new(self.output_anchor_x, y))
    }

    /// Resolves an anchor on the incoming (left) edge.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::AnchorOutOfRange`] for an index beyond the
    /// node's input anchors.
    pub fn input_point(&self, anchor: Anchor) -> Result<Point, DrawError> {
        let ys = &self.input_anchor_ys;
        let y = resolve_anchor(anchor, self.mid_y, ys, AnchorSide::Input)?;
        Ok(Point::new(self.input_anchor_x, y))
    }

    /// Draws the node body.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let border = StrokeDefinition::new(self.theme.border(), self.dimensions.border_thickness());
        if self.dimensions.body().is_homogeneous() {
            self.trace_whole_outline(surface);
            paint(surface, self.theme.pre_activation(), &border);
        } else {
            self.trace_pre_activation_outline(surface);
            paint(surface, self.theme.pre_activation(), &border);
            self.trace_post_activation_outline(surface);
            paint(surface, self.theme.post_activation(), &border);
        }
    }

    /// Draws a connection from this node's right edge to `target`'s left edge.
    ///
    /// Both anchors are resolved before anything is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::AnchorOutOfRange`] if `from` exceeds this node's
    /// output anchors or `to` exceeds the target's input anchors.
    pub fn connect_to<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        target: &Node,
        from: Anchor,
        to: Anchor,
        style: &ConnectionStyle,
    ) -> Result<(), DrawError> {
        let start = self.output_point(from)?;
        let end = target.input_point(to)?;
        route(surface, start, end, style);
        Ok(())
    }

    fn trace_whole_outline<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (x, y, end_x, end_y) = (self.x(), self.y(), self.end_x, self.end_y);
        let r = self.dimensions.corner_radius();

        surface.begin_path();
        surface.move_to(Point::new(x + r, y));
        surface.line_to(Point::new(end_x - r, y));
        surface.quadratic_curve_to(Point::new(end_x, y), Point::new(end_x, y + r));
        surface.line_to(Point::new(end_x, end_y - r));
        surface.quadratic_curve_to(Point::new(end_x, end_y), Point::new(end_x - r, end_y));
        surface.line_to(Point::new(x + r, end_y));
        surface.quadratic_curve_to(Point::new(x, end_y), Point::new(x, end_y - r));
        surface.line_to(Point::new(x, y + r));
        surface.quadratic_curve_to(Point::new(x, y), Point::new(x + r, y));
        surface.close_path();
    }

    fn trace_pre_activation_outline<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (x, y, mid_x, end_y) = (self.x(), self.y(), self.mid_x, self.end_y);
        let r = self.dimensions.corner_radius();

        surface.begin_path();
        surface.move_to(Point::new(x + r, y));
        surface.line_to(Point::new(mid_x, y));
        surface.line_to(Point::new(mid_x, end_y));
        surface.line_to(Point::new(x + r, end_y));
        surface.quadratic_curve_to(Point::new(x, end_y), Point::new(x, end_y - r));
        surface.line_to(Point::new(x, y + r));
        surface.quadratic_curve_to(Point::new(x, y), Point::new(x + r, y));
        surface.close_path();
    }

    fn trace_post_activation_outline<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (y, mid_x, end_x, end_y) = (self.y(), self.mid_x, self.end_x, self.end_y);
        let r = self.dimensions.corner_radius();

        surface.begin_path();
        surface.move_to(Point::new(mid_x, y));
        surface.line_to(Point::new(end_x - r, y));
        surface.quadratic_curve_to(Point::new(end_x, y), Point::new(end_x, y + r));
        surface.line_to(Point::new(end_x, end_y - r));
        surface.quadratic_curve_to(Point::new(end_x, end_y), Point::new(end_x - r, end_y));
        surface.line_to(Point::new(mid_x, end_y));
    }
}

fn paint<S: Surface + ?Sized>(surface: &mut S, fill: Color, border: &StrokeDefinition) {
    border.apply(surface);
    surface.set_fill_color(fill);
    surface.fill();
    surface.stroke();
}

fn resolve_anchor(
    anchor: Anchor,
    center: f32,
    anchors: &[f32],
    side: AnchorSide,
) -> Result<f32, DrawError> {
    match anchor {
        Anchor::Center => Ok(center),
        Anchor::Index(index) => anchors.get(index).copied().ok_or_else(|| {
            trace!(side:% = side, index = index; "Anchor index out of range");
            DrawError::AnchorOutOfRange {
                side,
                index,
                count: anchors.len(),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        draw::{Command, RecordingSurface},
        theme::{NodeBody, palette},
    };

    fn node_at(x: f32, y: f32, dims: Dimensions, options: NodeOptions) -> Node {
        Node::new(
            Point::new(x, y),
            Arc::new(dims),
            Arc::new(NodeTheme::default()),
            options,
        )
        .expect("valid node")
    }

    #[test]
    fn test_split_geometry() {
        let dims = Dimensions::new(NodeBody::split(65.0, 100.0), 80.0, 12.0, 3.0).unwrap();
        let node = node_at(10.0, 20.0, dims, NodeOptions::default());

        assert_eq!(node.mid_x(), 75.0);
        assert_eq!(node.end_x(), 175.0);
        assert_eq!(node.mid_y(), 60.0);
        assert_eq!(node.end_y(), 100.0);
        assert_eq!(node.input_anchor_x(), 22.0);
        assert_eq!(node.output_anchor_x(), 163.0);
    }

    #[test]
    fn test_homogeneous_geometry_keeps_requested_width() {
        let dims = Dimensions::new(NodeBody::homogeneous(65.0), 50.0, 10.0, 3.0).unwrap();
        let node = node_at(100.0, 0.0, dims, NodeOptions::default());

        assert_eq!(node.mid_x(), 132.5);
        assert_eq!(node.end_x(), 165.0);
        assert_eq!(node.bounds().width(), 65.0);
    }

    #[test]
    fn test_anchor_arrays_follow_counts() {
        let options = NodeOptions {
            input_anchors: 3,
            output_anchors: 0,
            bias: false,
        };
        let node = node_at(0.0, 100.0, Dimensions::default(), options);

        assert_eq!(node.input_anchor_ys(), &[100.0, 125.0, 150.0]);
        assert!(node.output_anchor_ys().is_empty());
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let result = Node::new(
            Point::new(f32::INFINITY, 0.0),
            Arc::new(Dimensions::default()),
            Arc::new(NodeTheme::default()),
            NodeOptions::default(),
        );
        assert!(matches!(result, Err(DrawError::InvalidArgument(_))));
    }

    #[test]
    fn test_split_draw_paints_two_regions() {
        let node = node_at(0.0, 0.0, Dimensions::default(), NodeOptions::default());
        let mut surface = RecordingSurface::new();

        node.draw(&mut surface);

        let fills: Vec<Color> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                Command::SetFillColor(color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                palette::DEFAULT.pre_activation(),
                palette::DEFAULT.post_activation()
            ]
        );
        assert_eq!(surface.stroke_count(), 2);
        assert!(
            surface
                .commands()
                .contains(&Command::LineTo(Point::new(65.0, 50.0))),
            "seam must run down mid_x"
        );
    }

    #[test]
    fn test_post_activation_outline_leaves_seam_open() {
        let node = node_at(0.0, 0.0, Dimensions::default(), NodeOptions::default());
        let mut surface = RecordingSurface::new();

        node.draw(&mut surface);

        let commands = surface.commands();
        let second_path = commands
            .iter()
            .rposition(|command| *command == Command::BeginPath)
            .unwrap();
        let outline: Vec<&Command> = commands[second_path..]
            .iter()
            .take_while(|command| !matches!(command, Command::SetLineWidth(_)))
            .collect();

        let seam_bottom = Command::LineTo(Point::new(65.0, 50.0));
        assert_eq!(outline[1], &Command::MoveTo(Point::new(65.0, 0.0)));
        assert_eq!(outline.last(), Some(&&seam_bottom));
        assert!(!outline.contains(&&Command::ClosePath));
        assert!(commands[..second_path].contains(&Command::ClosePath));
    }

    #[test]
    fn test_homogeneous_draw_paints_one_region() {
        let dims = Dimensions::new(NodeBody::homogeneous(65.0), 50.0, 10.0, 3.0).unwrap();
        let node = node_at(0.0, 0.0, dims, NodeOptions::default());
        let mut surface = RecordingSurface::new();

        node.draw(&mut surface);

        let commands = surface.commands();
        assert_eq!(surface.stroke_count(), 1);
        assert_eq!(commands[1], Command::MoveTo(Point::new(10.0, 0.0)));
        assert_eq!(commands[2], Command::LineTo(Point::new(55.0, 0.0)));
        assert!(commands.contains(&Command::SetLineWidth(3.0)));
    }

    #[test]
    fn test_connect_to_centers() {
        let source = node_at(0.0, 0.0, Dimensions::default(), NodeOptions::default());
        let target = node_at(300.0, 60.0, Dimensions::default(), NodeOptions::default());
        let mut surface = RecordingSurface::new();

        source
            .connect_to(
                &mut surface,
                &target,
                Anchor::Center,
                Anchor::Center,
                &ConnectionStyle::default(),
            )
            .unwrap();

        let segments = surface.bezier_segments();
        assert_eq!(segments.len(), 1);
        let (start, c1, c2, end) = segments[0];
        assert_eq!(start, Point::new(155.0, 25.0));
        assert_eq!(end, Point::new(310.0, 85.0));
        assert_approx_eq!(f32, c1.x(), 205.0);
        assert_approx_eq!(f32, c2.x(), 260.0);
    }

    #[test]
    fn test_connect_to_indexed_anchors() {
        let options = NodeOptions {
            input_anchors: 2,
            output_anchors: 3,
            bias: false,
        };
        let source = node_at(0.0, 0.0, Dimensions::default(), options);
        let target = node_at(300.0, 0.0, Dimensions::default(), options);
        let mut surface = RecordingSurface::new();

        source
            .connect_to(
                &mut surface,
                &target,
                Anchor::Index(2),
                Anchor::Index(0),
                &ConnectionStyle::default(),
            )
            .unwrap();

        let (start, _, _, end) = surface.bezier_segments()[0];
        assert_eq!(start.y(), 50.0);
        assert_eq!(end.y(), 0.0);
    }

    #[test]
    fn test_connect_to_out_of_range_draws_nothing() {
        let source = node_at(0.0, 0.0, Dimensions::default(), NodeOptions::default());
        let target = node_at(300.0, 0.0, Dimensions::default(), NodeOptions::default());
        let mut surface = RecordingSurface::new();

        let err = source
            .connect_to(
                &mut surface,
                &target,
                Anchor::Center,
                Anchor::Index(1),
                &ConnectionStyle::default(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            DrawError::AnchorOutOfRange {
                side: AnchorSide::Input,
                index: 1,
                count: 1,
            }
        );
        assert!(surface.commands().is_empty());
    }
}
