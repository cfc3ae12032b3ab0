//! A diagram built from a description: laid-out layers ready to draw.

use log::debug;

use nnsketch_core::{
    draw::{ConnectionColors, ForwardOptions, Layer, Surface},
    error::DrawError,
    label::{ImageSource, LatexService, LayerLabels, draw_layer_labels},
};

/// Connections from one layer into the next.
#[derive(Debug, Clone)]
pub struct Connections {
    colors: ConnectionColors,
    options: ForwardOptions,
}

impl Connections {
    pub fn new(colors: ConnectionColors, options: ForwardOptions) -> Self {
        Self { colors, options }
    }

    pub fn colors(&self) -> &ConnectionColors {
        &self.colors
    }

    pub fn options(&self) -> &ForwardOptions {
        &self.options
    }
}

/// One layer of a built diagram with its decorations.
#[derive(Debug, Clone)]
pub struct DiagramLayer {
    layer: Layer,
    labels: Option<LayerLabels>,
    connections: Option<Connections>,
}

impl DiagramLayer {
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            labels: None,
            connections: None,
        }
    }

    pub fn with_labels(mut self, labels: LayerLabels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Connects this layer to the one after it.
    pub fn with_connections(mut self, connections: Connections) -> Self {
        self.connections = Some(connections);
        self
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn labels(&self) -> Option<&LayerLabels> {
        self.labels.as_ref()
    }

    pub fn connections(&self) -> Option<&Connections> {
        self.connections.as_ref()
    }
}

/// What a call to [`Diagram::draw`] put on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawSummary {
    pub nodes: usize,
    pub edges: usize,
    pub labels: usize,
}

/// An ordered list of layers, input first.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    layers: Vec<DiagramLayer>,
}

impl Diagram {
    pub fn new(layers: Vec<DiagramLayer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[DiagramLayer] {
        &self.layers
    }

    /// Draws connections, then nodes, then labels.
    ///
    /// Connections declared on the last layer have no target and are ignored.
    /// Layers are numbered from 1 when expanding label templates.
    ///
    /// # Errors
    ///
    /// Returns the first [`DrawError`] from wiring or labelling a layer.
    /// Everything drawn before the failing step stays on the surface.
    pub fn draw<S, I>(
        &self,
        surface: &mut S,
        images: &I,
        service: &LatexService,
    ) -> Result<DrawSummary, DrawError>
    where
        S: Surface + ?Sized,
        I: ImageSource + ?Sized,
    {
        let mut summary = DrawSummary::default();

        for (current, next) in self.layers.iter().zip(self.layers.iter().skip(1)) {
            if let Some(connections) = &current.connections {
                summary.edges += current.layer.forward_connections(
                    surface,
                    &next.layer,
                    &connections.colors,
                    &connections.options,
                )?;
            }
        }

        for entry in &self.layers {
            entry.layer.draw(surface);
            summary.nodes += entry.layer.len();
        }

        for (index, entry) in self.layers.iter().enumerate() {
            if let Some(labels) = &entry.labels {
                summary.labels +=
                    draw_layer_labels(surface, images, service, &entry.layer, index + 1, labels)?;
            }
        }

        debug!(
            nodes = summary.nodes,
            edges = summary.edges,
            labels = summary.labels;
            "Diagram drawn"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nnsketch_core::{
        draw::{Command, LayerOptions, RecordingSurface, ThemeSelection},
        geometry::Point,
        label::LinkedImages,
        theme::Dimensions,
    };

    use super::*;

    fn layer(x: f32, count: usize) -> Layer {
        Layer::new(
            Point::new(x, 0.0),
            count,
            Arc::new(Dimensions::default()),
            ThemeSelection::default(),
            LayerOptions::default(),
        )
        .unwrap()
    }

    fn wired(x: f32, count: usize) -> DiagramLayer {
        DiagramLayer::new(layer(x, count)).with_connections(Connections::new(
            ConnectionColors::default(),
            ForwardOptions::default(),
        ))
    }

    #[test]
    fn test_draw_order_and_summary() {
        let diagram = Diagram::new(vec![
            wired(0.0, 2),
            DiagramLayer::new(layer(300.0, 3)).with_labels(LayerLabels {
                pre_activation: Some("z_{III}".to_string()),
                ..LayerLabels::default()
            }),
        ]);
        let mut surface = RecordingSurface::new();

        let summary = diagram
            .draw(&mut surface, &LinkedImages, &LatexService::default())
            .unwrap();

        assert_eq!(
            summary,
            DrawSummary {
                nodes: 5,
                edges: 6,
                labels: 3,
            }
        );

        let commands = surface.commands();
        let last_curve = commands
            .iter()
            .rposition(|command| matches!(command, Command::BezierCurveTo { .. }))
            .unwrap();
        let first_fill = commands
            .iter()
            .position(|command| matches!(command, Command::Fill))
            .unwrap();
        let first_image = commands
            .iter()
            .position(|command| matches!(command, Command::DrawImage { .. }))
            .unwrap();
        assert!(last_curve < first_fill);
        assert!(first_fill < first_image);
    }

    #[test]
    fn test_connections_on_last_layer_are_ignored() {
        let diagram = Diagram::new(vec![wired(0.0, 2)]);
        let mut surface = RecordingSurface::new();

        let summary = diagram
            .draw(&mut surface, &LinkedImages, &LatexService::default())
            .unwrap();

        assert_eq!(summary.edges, 0);
        assert_eq!(summary.nodes, 2);
    }

    #[test]
    fn test_wiring_error_is_returned() {
        let diagram = Diagram::new(vec![
            DiagramLayer::new(layer(0.0, 2)).with_connections(Connections::new(
                ConnectionColors::PerTarget(vec![]),
                ForwardOptions::default(),
            )),
            DiagramLayer::new(layer(300.0, 2)),
        ]);
        let mut surface = RecordingSurface::new();

        let result = diagram.draw(&mut surface, &LinkedImages, &LatexService::default());
        assert!(matches!(result, Err(DrawError::ColorCountMismatch { .. })));
    }
}
