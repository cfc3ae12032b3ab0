//! Layers: vertical stacks of nodes and the dense wiring between them.
//!
//! A [`Layer`] places its nodes at one shared x coordinate, one below the
//! other with a fixed gap. [`Layer::forward_connections`] wires every node of
//! a layer to every node of the next one, which is what a fully connected
//! network layer looks like on paper.
//!
//! # Example
//!
//! ```
//! # use std::sync::Arc;
//! # use nnsketch_core::draw::{
//! #     ConnectionColors, ForwardOptions, Layer, LayerOptions, RecordingSurface, ThemeSelection,
//! # };
//! # use nnsketch_core::geometry::Point;
//! # use nnsketch_core::theme::{Dimensions, palette};
//! let dims = Arc::new(Dimensions::default());
//! let theme = ThemeSelection::Single(palette::by_name("green").unwrap());
//!
//! let inputs = Layer::new(Point::new(0.0, 0.0), 2, Arc::clone(&dims), theme.clone(), LayerOptions::default()).unwrap();
//! let hidden = Layer::new(Point::new(300.0, 0.0), 3, dims, theme, LayerOptions::default()).unwrap();
//!
//! let mut surface = RecordingSurface::new();
//! let edges = inputs
//!     .forward_connections(&mut surface, &hidden, &ConnectionColors::default(), &ForwardOptions::default())
//!     .unwrap();
//! assert_eq!(edges, 6);
//! ```

use std::sync::Arc;

use log::debug;

use crate::{
    color::Color,
    draw::{Anchor, ConnectionStyle, Node, NodeOptions, Surface, route},
    error::DrawError,
    geometry::Point,
    theme::{Dimensions, NodeTheme},
};

/// How themes are assigned to the nodes of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeSelection {
    /// Every node uses the same theme.
    Single(Arc<NodeTheme>),
    /// One theme per node, in node order.
    PerNode(Vec<Arc<NodeTheme>>),
}

impl ThemeSelection {
    fn resolve(&self, count: usize) -> Result<Vec<Arc<NodeTheme>>, DrawError> {
        match self {
            Self::Single(theme) => Ok(vec![Arc::clone(theme); count]),
            Self::PerNode(themes) if themes.len() == count => Ok(themes.clone()),
            Self::PerNode(themes) => Err(DrawError::invalid(format!(
                "layer has {count} nodes but {} themes were given",
                themes.len()
            ))),
        }
    }
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self::Single(Arc::new(NodeTheme::default()))
    }
}

/// Options shared by every node of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerOptions {
    pub input_anchors: usize,
    pub output_anchors: usize,
    /// Vertical gap between consecutive nodes.
    pub spacing: f32,
    /// Makes node 0 a bias node.
    pub bias: bool,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            input_anchors: 1,
            output_anchors: 1,
            spacing: 10.0,
            bias: false,
        }
    }
}

/// Y coordinates of the nodes of a layer.
///
/// Node 0 sits exactly at `origin_y`; node `i` at
/// `origin_y + i * (height + spacing)`.
///
/// # Examples
///
/// ```
/// # use nnsketch_core::draw::layer_node_ys;
/// assert_eq!(layer_node_ys(3, 50.0, 10.0, 0.0), vec![0.0, 60.0, 120.0]);
/// ```
pub fn layer_node_ys(count: usize, height: f32, spacing: f32, origin_y: f32) -> Vec<f32> {
    let step = height + spacing;
    (0..count)
        .map(|i| {
            if i == 0 {
                origin_y
            } else {
                origin_y + i as f32 * step
            }
        })
        .collect()
}

/// Colors for the edges produced by [`Layer::forward_connections`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionColors {
    /// Every edge gets the same color.
    Single(Color),
    /// One color per target node; every edge into target `i` uses entry `i`.
    PerTarget(Vec<Color>),
}

impl ConnectionColors {
    fn resolve(&self, targets: usize) -> Result<Vec<Color>, DrawError> {
        match self {
            Self::Single(color) => Ok(vec![*color; targets]),
            Self::PerTarget(colors) if colors.len() == targets => Ok(colors.clone()),
            Self::PerTarget(colors) => Err(DrawError::ColorCountMismatch {
                expected: targets,
                got: colors.len(),
            }),
        }
    }
}

impl Default for ConnectionColors {
    fn default() -> Self {
        let gray = Color::new("#AAAAAA").expect("'#AAAAAA' is a valid CSS color");
        Self::Single(gray)
    }
}

/// Style and anchoring of layer-to-layer edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardOptions {
    pub stroke_width: f32,
    pub curvature_from: f32,
    pub curvature_to: f32,
    /// Start the edge to target `i` at output anchor `i` of the source.
    pub fan_source: bool,
    /// End the edge from source `j` at input anchor `j` of the target.
    pub fan_target: bool,
    pub opacity: f32,
    /// Leave bias nodes of the next layer unconnected.
    pub skip_target_bias: bool,
}

impl Default for ForwardOptions {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            curvature_from: 100.0,
            curvature_to: 100.0,
            fan_source: false,
            fan_target: false,
            opacity: 0.3,
            skip_target_bias: false,
        }
    }
}

/// An ordered vertical stack of nodes sharing an x coordinate.
#[derive(Debug, Clone)]
pub struct Layer {
    origin: Point,
    spacing: f32,
    nodes: Vec<Node>,
}

impl Layer {
    /// Lays out `count` nodes below `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidArgument`] if the spacing is negative or
    /// not finite, if a per-node theme list does not have `count` entries, or
    /// if a node cannot be placed.
    pub fn new(
        origin: Point,
        count: usize,
        dimensions: Arc<Dimensions>,
        themes: ThemeSelection,
        options: LayerOptions,
    ) -> Result<Self, DrawError> {
        if !(options.spacing.is_finite() && options.spacing >= 0.0) {
            return Err(DrawError::invalid(format!(
                "layer spacing must not be negative, got {}",
                options.spacing
            )));
        }
        let themes = themes.resolve(count)?;
        let ys = layer_node_ys(count, dimensions.height(), options.spacing, origin.y());

        let nodes = ys
            .into_iter()
            .zip(themes)
            .enumerate()
            .map(|(i, (y, theme))| {
                Node::new(
                    origin.with_y(y),
                    Arc::clone(&dimensions),
                    theme,
                    NodeOptions {
                        input_anchors: options.input_anchors,
                        output_anchors: options.output_anchors,
                        bias: options.bias && i == 0,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            nodes = nodes.len(),
            x = origin.x(),
            y = origin.y(),
            spacing = options.spacing;
            "Layer laid out"
        );

        Ok(Self {
            origin,
            spacing: options.spacing,
            nodes,
        })
    }

    pub fn x(&self) -> f32 {
        self.origin.x()
    }

    pub fn y(&self) -> f32 {
        self.origin.y()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Draws every node in index order.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for node in &self.nodes {
            node.draw(surface);
        }
    }

    /// Connects every node of this layer to every node of `next`.
    ///
    /// Targets form the outer loop and sources the inner loop, so edges are
    /// drawn grouped by target. Returns the number of edges drawn.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::ColorCountMismatch`] if a per-target color list
    /// does not match the size of `next`, and [`DrawError::AnchorOutOfRange`] if a
    /// fanned edge needs an anchor a node does not have. Both are detected
    /// before anything is drawn.
    pub fn forward_connections<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        next: &Layer,
        colors: &ConnectionColors,
        options: &ForwardOptions,
    ) -> Result<usize, DrawError> {
        let colors = colors.resolve(next.len())?;

        let mut edges = Vec::with_capacity(self.len() * next.len());
        for (i, (target, color)) in next.nodes.iter().zip(colors).enumerate() {
            if options.skip_target_bias && target.is_bias() {
                continue;
            }
            for (j, source) in self.nodes.iter().enumerate() {
                let from = if options.fan_source {
                    Anchor::Index(i)
                } else {
                    Anchor::Center
                };
                let to = if options.fan_target {
                    Anchor::Index(j)
                } else {
                    Anchor::Center
                };
                edges.push((source.output_point(from)?, target.input_point(to)?, color));
            }
        }

        for (from, to, color) in &edges {
            let style = ConnectionStyle::new(*color)
                .with_stroke_width(options.stroke_width)
                .with_curvature(options.curvature_from, options.curvature_to)
                .with_opacity(options.opacity);
            route(surface, *from, *to, &style);
        }

        debug!(
            sources = self.len(),
            targets = next.len(),
            edges = edges.len();
            "Forward connections drawn"
        );
        Ok(edges.len())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        draw::{Command, RecordingSurface},
        error::AnchorSide,
        theme::palette,
    };

    fn layer(x: f32, count: usize, options: LayerOptions) -> Layer {
        Layer::new(
            Point::new(x, 0.0),
            count,
            Arc::new(Dimensions::default()),
            ThemeSelection::default(),
            options,
        )
        .expect("valid layer")
    }

    #[test]
    fn test_layer_node_ys() {
        assert!(layer_node_ys(0, 50.0, 10.0, 5.0).is_empty());
        assert_eq!(layer_node_ys(1, 50.0, 10.0, 5.0), vec![5.0]);
        let ys = layer_node_ys(3, 40.0, 0.0, 100.0);
        assert_eq!(ys, vec![100.0, 140.0, 180.0]);
    }

    #[test]
    fn test_nodes_share_x_and_stack_down() {
        let layer = layer(250.0, 3, LayerOptions::default());

        assert_eq!(layer.len(), 3);
        let ys: Vec<f32> = layer.nodes().iter().map(Node::y).collect();
        assert_eq!(ys, vec![0.0, 60.0, 120.0]);
        assert!(layer.nodes().iter().all(|node| node.x() == 250.0));
    }

    #[test]
    fn test_empty_layer() {
        let layer = layer(0.0, 0, LayerOptions::default());
        assert!(layer.is_empty());

        let mut surface = RecordingSurface::new();
        layer.draw(&mut surface);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_bias_marks_only_first_node() {
        let options = LayerOptions {
            bias: true,
            ..LayerOptions::default()
        };
        let layer = layer(0.0, 3, options);

        let flags: Vec<bool> = layer.nodes().iter().map(Node::is_bias).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_per_node_themes() {
        let themes = vec![
            palette::by_name("green").unwrap(),
            palette::by_name("orange").unwrap(),
        ];
        let layer = Layer::new(
            Point::new(0.0, 0.0),
            2,
            Arc::new(Dimensions::default()),
            ThemeSelection::PerNode(themes),
            LayerOptions::default(),
        )
        .unwrap();

        assert_eq!(
            layer.nodes()[1].theme().pre_activation(),
            palette::ORANGE.pre_activation()
        );
    }

    #[test]
    fn test_theme_count_mismatch() {
        let result = Layer::new(
            Point::new(0.0, 0.0),
            3,
            Arc::new(Dimensions::default()),
            ThemeSelection::PerNode(vec![Arc::new(NodeTheme::default())]),
            LayerOptions::default(),
        );
        assert!(matches!(result, Err(DrawError::InvalidArgument(_))));
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let options = LayerOptions {
            spacing: -1.0,
            ..LayerOptions::default()
        };
        let result = Layer::new(
            Point::new(0.0, 0.0),
            2,
            Arc::new(Dimensions::default()),
            ThemeSelection::default(),
            options,
        );
        assert!(matches!(result, Err(DrawError::InvalidArgument(_))));
    }

    #[test]
    fn test_dense_wiring_connects_centers() {
        let source = layer(0.0, 3, LayerOptions::default());
        let target = layer(300.0, 2, LayerOptions::default());
        let mut surface = RecordingSurface::new();

        let edges = source
            .forward_connections(
                &mut surface,
                &target,
                &ConnectionColors::default(),
                &ForwardOptions::default(),
            )
            .unwrap();

        assert_eq!(edges, 6);
        let segments = surface.bezier_segments();
        assert_eq!(segments.len(), 6);
        for (k, (start, _, _, end)) in segments.iter().enumerate() {
            let (i, j) = (k / 3, k % 3);
            assert_eq!(start.y(), source.nodes()[j].mid_y());
            assert_eq!(end.y(), target.nodes()[i].mid_y());
        }
    }

    #[test]
    fn test_two_then_three_nodes_scenario() {
        let first = layer(0.0, 2, LayerOptions::default());
        let second = layer(300.0, 3, LayerOptions::default());
        let radius = Dimensions::default().corner_radius();

        let first_ys: Vec<f32> = first.nodes().iter().map(Node::y).collect();
        let second_ys: Vec<f32> = second.nodes().iter().map(Node::y).collect();
        assert_eq!(first_ys, vec![0.0, 60.0]);
        assert_eq!(second_ys, vec![0.0, 60.0, 120.0]);

        let mut surface = RecordingSurface::new();
        first
            .forward_connections(
                &mut surface,
                &second,
                &ConnectionColors::default(),
                &ForwardOptions::default(),
            )
            .unwrap();

        let segments = surface.bezier_segments();
        assert_eq!(segments.len(), 6);
        for (k, (start, c1, c2, end)) in segments.iter().enumerate() {
            let source = &first.nodes()[k % 2];
            let target = &second.nodes()[k / 2];
            assert_eq!(*start, Point::new(source.end_x() - radius, source.mid_y()));
            assert_eq!(*end, Point::new(target.x() + radius, target.mid_y()));
            assert_approx_eq!(f32, c1.x(), start.x() + 100.0);
            assert_approx_eq!(f32, c2.x(), end.x() - 100.0);
        }
    }

    #[test]
    fn test_color_count_mismatch_draws_nothing() {
        let source = layer(0.0, 3, LayerOptions::default());
        let target = layer(300.0, 2, LayerOptions::default());
        let colors = ConnectionColors::PerTarget(vec![Color::default(); 3]);
        let mut surface = RecordingSurface::new();

        let result =
            source.forward_connections(&mut surface, &target, &colors, &ForwardOptions::default());

        assert_eq!(
            result,
            Err(DrawError::ColorCountMismatch {
                expected: 2,
                got: 3,
            })
        );
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_per_target_colors() {
        let source = layer(0.0, 2, LayerOptions::default());
        let target = layer(300.0, 2, LayerOptions::default());
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();
        let mut surface = RecordingSurface::new();

        source
            .forward_connections(
                &mut surface,
                &target,
                &ConnectionColors::PerTarget(vec![red, blue]),
                &ForwardOptions::default(),
            )
            .unwrap();

        let strokes: Vec<Color> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                Command::SetStrokeColor(color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(strokes, vec![red, red, blue, blue]);
    }

    #[test]
    fn test_fanned_anchors() {
        let source = layer(
            0.0,
            2,
            LayerOptions {
                output_anchors: 3,
                ..LayerOptions::default()
            },
        );
        let target = layer(
            300.0,
            3,
            LayerOptions {
                input_anchors: 2,
                ..LayerOptions::default()
            },
        );
        let options = ForwardOptions {
            fan_source: true,
            fan_target: true,
            ..ForwardOptions::default()
        };
        let colors = ConnectionColors::default();
        let mut surface = RecordingSurface::new();

        source
            .forward_connections(&mut surface, &target, &colors, &options)
            .unwrap();

        let segments = surface.bezier_segments();
        for (k, (start, _, _, end)) in segments.iter().enumerate() {
            let (i, j) = (k / 2, k % 2);
            assert_eq!(start.y(), source.nodes()[j].output_anchor_ys()[i]);
            assert_eq!(end.y(), target.nodes()[i].input_anchor_ys()[j]);
        }
    }

    #[test]
    fn test_fanned_anchor_shortage_draws_nothing() {
        let source = layer(0.0, 2, LayerOptions::default());
        let target = layer(300.0, 3, LayerOptions::default());
        let options = ForwardOptions {
            fan_source: true,
            ..ForwardOptions::default()
        };
        let colors = ConnectionColors::default();
        let mut surface = RecordingSurface::new();

        let err = source
            .forward_connections(&mut surface, &target, &colors, &options)
            .unwrap_err();

        assert_eq!(
            err,
            DrawError::AnchorOutOfRange {
                side: AnchorSide::Output,
                index: 1,
                count: 1,
            }
        );
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_skip_target_bias() {
        let source = layer(0.0, 2, LayerOptions::default());
        let target = layer(
            300.0,
            3,
            LayerOptions {
                bias: true,
                ..LayerOptions::default()
            },
        );
        let options = ForwardOptions {
            skip_target_bias: true,
            ..ForwardOptions::default()
        };
        let colors = ConnectionColors::default();
        let mut surface = RecordingSurface::new();

        let edges = source
            .forward_connections(&mut surface, &target, &colors, &options)
            .unwrap();

        assert_eq!(edges, 4);
        let first_node_mid = target.nodes()[0].mid_y();
        assert!(
            surface
                .bezier_segments()
                .iter()
                .all(|(_, _, _, end)| end.y() != first_node_mid)
        );
    }

    #[test]
    fn test_connections_restore_alpha() {
        let source = layer(0.0, 2, LayerOptions::default());
        let target = layer(300.0, 2, LayerOptions::default());
        let mut surface = RecordingSurface::new();
        surface.set_global_alpha(0.8);

        source
            .forward_connections(
                &mut surface,
                &target,
                &ConnectionColors::default(),
                &ForwardOptions::default(),
            )
            .unwrap();

        assert_eq!(surface.global_alpha(), 0.8);
        assert!(
            surface
                .commands()
                .iter()
                .filter_map(|command| match command {
                    Command::Stroke { alpha } => Some(*alpha),
                    _ => None,
                })
                .all(|alpha| alpha == 0.3)
        );
    }
}
