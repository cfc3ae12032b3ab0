//! nnsketch - Hand-authored neural network diagrams.
//!
//! Turns a declarative description of network layers into a drawn diagram:
//! nodes split into pre- and post-activation regions, dense bezier wiring
//! between consecutive layers, and optional LaTeX labels. The result is
//! rendered to SVG.

pub mod config;
pub mod description;

mod diagram;
mod error;
mod export;

pub use nnsketch_core::error::{AnchorSide, DrawError};
pub use nnsketch_core::{anchor, color, draw, geometry, label, theme};

pub use diagram::{Connections, Diagram, DiagramLayer, DrawSummary};
pub use error::NnsketchError;

use std::sync::Arc;

use log::{debug, info, trace};

use nnsketch_core::{
    draw::{Layer, SvgSurface, ThemeSelection},
    geometry::Point,
    label::LinkedImages,
    theme::{Dimensions, NodeTheme, palette, pre_activation_colors},
};

use config::AppConfig;
use description::{ConnectDescription, DiagramDescription, LayerDescription, ThemeDescription};
use export::SvgDocumentBuilder;

/// Largest `nodes` value a layer may declare.
const MAX_NODES_PER_LAYER: usize = 1_000;

/// Largest `input_anchors` or `output_anchors` value a layer may declare.
const MAX_ANCHORS_PER_NODE: usize = 1_000;

/// Builder for parsing and rendering nnsketch diagrams.
///
/// # Examples
///
/// ```
/// use nnsketch::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
///     [[layers]]
///     nodes = 2
///     connect = {}
///
///     [[layers]]
///     nodes = 3
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let description = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&description).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a TOML diagram description.
    ///
    /// # Errors
    ///
    /// Returns [`NnsketchError::Description`] for malformed TOML, unknown
    /// fields or values of the wrong type.
    pub fn parse(&self, source: &str) -> Result<DiagramDescription, NnsketchError> {
        info!("Parsing diagram description");

        let description: DiagramDescription = toml::from_str(source)?;

        debug!(
            layers = description.layers.len(),
            dimensions = description.dimensions.len();
            "Description parsed successfully"
        );
        trace!(description:?; "Parsed description");

        Ok(description)
    }

    /// Lay out every layer of a description.
    ///
    /// # Errors
    ///
    /// Returns [`NnsketchError::Description`] for unknown theme or dimension
    /// names, invalid colors, node or anchor counts above the supported
    /// maximum, or connections declared on the last layer, and
    /// [`NnsketchError::Draw`] for values the drawing core rejects.
    pub fn build(&self, description: &DiagramDescription) -> Result<Diagram, NnsketchError> {
        info!(layers = description.layers.len(); "Building diagram");

        let mut layers = Vec::with_capacity(description.layers.len());
        let mut next_x = 0.0;
        for (index, layer_desc) in description.layers.iter().enumerate() {
            let x = layer_desc.x.unwrap_or(next_x);
            next_x = x + self.config.layout().layer_gap();

            check_counts(index + 1, layer_desc)?;
            let dimensions = resolve_dimensions(description, layer_desc)?;
            let themes = resolve_themes(&layer_desc.theme)?;
            let layer = Layer::new(
                Point::new(x, layer_desc.y),
                layer_desc.nodes,
                dimensions,
                themes,
                layer_desc.layer_options(),
            )?;
            debug!(
                layer = index + 1,
                nodes = layer.len(),
                x = x,
                spacing = layer.spacing();
                "Layer built"
            );
            layers.push(layer);
        }

        let mut diagram_layers = Vec::with_capacity(layers.len());
        for (index, (layer_desc, layer)) in description.layers.iter().zip(&layers).enumerate() {
            let mut entry = DiagramLayer::new(layer.clone());
            if let Some(labels) = &layer_desc.labels {
                entry = entry.with_labels(labels.to_labels());
            }
            if let Some(connect) = &layer_desc.connect {
                let Some(next) = layers.get(index + 1) else {
                    return Err(NnsketchError::Description(format!(
                        "layer {} connects forward but is the last layer",
                        index + 1
                    )));
                };
                entry = entry.with_connections(resolve_connections(connect, next)?);
            }
            diagram_layers.push(entry);
        }

        info!(layers = diagram_layers.len(); "Diagram built");
        Ok(Diagram::new(diagram_layers))
    }

    /// Render a description to an SVG string.
    ///
    /// Labels are linked by URL; the viewer fetches them from the configured
    /// LaTeX service.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::build`], drawing errors, and
    /// [`NnsketchError::Config`] for an invalid background color.
    pub fn render_svg(&self, description: &DiagramDescription) -> Result<String, NnsketchError> {
        let diagram = self.build(description)?;

        let mut surface = SvgSurface::new();
        let service = self.config.labels().latex_service();
        let summary = diagram.draw(&mut surface, &LinkedImages, &service)?;
        info!(
            nodes = summary.nodes,
            edges = summary.edges,
            labels = summary.labels;
            "Surface populated"
        );

        let document = SvgDocumentBuilder::new(self.config.style()).build(surface)?;

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }
}

fn check_counts(number: usize, layer: &LayerDescription) -> Result<(), NnsketchError> {
    let counts = [
        ("nodes", layer.nodes, MAX_NODES_PER_LAYER),
        ("input_anchors", layer.input_anchors, MAX_ANCHORS_PER_NODE),
        ("output_anchors", layer.output_anchors, MAX_ANCHORS_PER_NODE),
    ];
    for (field, count, max) in counts {
        if count > max {
            return Err(NnsketchError::Description(format!(
                "layer {number} declares {field} = {count}, at most {max} are supported"
            )));
        }
    }
    Ok(())
}

fn resolve_dimensions(
    description: &DiagramDescription,
    layer: &LayerDescription,
) -> Result<Arc<Dimensions>, NnsketchError> {
    let Some(name) = &layer.dimensions else {
        return Ok(Arc::new(Dimensions::default()));
    };
    let Some(dims) = description.dimensions.get(name) else {
        return Err(NnsketchError::Description(format!(
            "unknown dimensions `{name}`"
        )));
    };
    Ok(Arc::new(dims.to_dimensions()?))
}

fn resolve_theme(name: &str) -> Result<Arc<NodeTheme>, NnsketchError> {
    palette::by_name(name).ok_or_else(|| {
        NnsketchError::Description(format!(
            "unknown theme `{name}`, expected one of: {}",
            palette::names().join(", ")
        ))
    })
}

fn resolve_themes(theme: &ThemeDescription) -> Result<ThemeSelection, NnsketchError> {
    match theme {
        ThemeDescription::Single(name) => resolve_theme(name).map(ThemeSelection::Single),
        ThemeDescription::PerNode(names) => names
            .iter()
            .map(|name| resolve_theme(name))
            .collect::<Result<Vec<_>, _>>()
            .map(ThemeSelection::PerNode),
    }
}

fn resolve_connections(
    connect: &ConnectDescription,
    next: &Layer,
) -> Result<Connections, NnsketchError> {
    let colors = match (&connect.colors, connect.target_theme_colors) {
        (Some(_), true) => {
            return Err(NnsketchError::Description(
                "`colors` and `target_theme_colors` cannot be combined".to_string(),
            ));
        }
        (Some(colors), false) => colors.to_colors().map_err(NnsketchError::Description)?,
        (None, true) => {
            let themes: Vec<Arc<NodeTheme>> = next
                .nodes()
                .iter()
                .map(|node| Arc::clone(node.theme()))
                .collect();
            draw::ConnectionColors::PerTarget(pre_activation_colors(&themes))
        }
        (None, false) => draw::ConnectionColors::default(),
    };
    Ok(Connections::new(colors, connect.forward_options()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_advance_by_layer_gap() {
        let builder = DiagramBuilder::default();
        let description = builder
            .parse(
                r#"
                [[layers]]
                nodes = 1

                [[layers]]
                nodes = 1
                x = 1000

                [[layers]]
                nodes = 1
                "#,
            )
            .unwrap();

        let diagram = builder.build(&description).unwrap();
        let xs: Vec<f32> = diagram
            .layers()
            .iter()
            .map(|entry| entry.layer().x())
            .collect();
        assert_eq!(xs, vec![0.0, 1000.0, 1300.0]);
    }

    #[test]
    fn test_target_theme_colors() {
        let builder = DiagramBuilder::default();
        let description = builder
            .parse(
                r#"
                [[layers]]
                nodes = 1
                connect = { target_theme_colors = true }

                [[layers]]
                nodes = 2
                theme = ["green", "purple"]
                "#,
            )
            .unwrap();

        let diagram = builder.build(&description).unwrap();
        let connections = diagram.layers()[0].connections().unwrap();
        match connections.colors() {
            draw::ConnectionColors::PerTarget(colors) => {
                assert_eq!(colors[0].to_hex_string(), "28ae38");
                assert_eq!(colors[1].to_hex_string(), "552dcc");
            }
            other => panic!("unexpected colors {other:?}"),
        }
    }

    #[test]
    fn test_conflicting_color_options() {
        let builder = DiagramBuilder::default();
        let description = builder
            .parse(
                r#"
                [[layers]]
                nodes = 1
                connect = { colors = "red", target_theme_colors = true }

                [[layers]]
                nodes = 1
                "#,
            )
            .unwrap();

        assert!(matches!(
            builder.build(&description),
            Err(NnsketchError::Description(_))
        ));
    }

    #[test]
    fn test_connect_on_last_layer() {
        let builder = DiagramBuilder::default();
        let description = builder
            .parse("[[layers]]\nnodes = 1\nconnect = {}\n")
            .unwrap();

        let err = builder.build(&description).unwrap_err();
        assert!(err.to_string().contains("last layer"), "{err}");
    }

    #[test]
    fn test_oversized_counts_are_rejected() {
        let builder = DiagramBuilder::default();

        let description = builder.parse("[[layers]]\nnodes = 100000000000\n").unwrap();
        let err = builder.build(&description).unwrap_err();
        assert!(matches!(err, NnsketchError::Description(_)));
        let message = err.to_string();
        assert!(message.contains("nodes = 100000000000"), "{message}");

        let description = builder
            .parse("[[layers]]\nnodes = 2\noutput_anchors = 5000\n")
            .unwrap();
        let err = builder.build(&description).unwrap_err().to_string();
        assert!(err.contains("declares output_anchors = 5000"), "{err}");
    }

    #[test]
    fn test_largest_supported_layer_builds() {
        let builder = DiagramBuilder::default();
        let description = builder
            .parse("[[layers]]\nnodes = 1000\ninput_anchors = 1000\n")
            .unwrap();

        let diagram = builder.build(&description).unwrap();
        assert_eq!(diagram.layers()[0].layer().len(), 1000);
    }

    #[test]
    fn test_unknown_names() {
        let builder = DiagramBuilder::default();

        let description = builder
            .parse("[[layers]]\nnodes = 1\ntheme = \"teal\"\n")
            .unwrap();
        let err = builder.build(&description).unwrap_err().to_string();
        assert!(err.contains("unknown theme `teal`"), "{err}");

        let description = builder
            .parse("[[layers]]\nnodes = 1\ndimensions = \"wide\"\n")
            .unwrap();
        let err = builder.build(&description).unwrap_err().to_string();
        assert!(err.contains("unknown dimensions `wide`"), "{err}");
    }
}
