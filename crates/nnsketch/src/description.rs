//! Declarative diagram descriptions.
//!
//! A description lists named node dimensions and the layers of a network,
//! from input to output. It is usually written in TOML:
//!
//! ```toml
//! [dimensions.input]
//! body = { kind = "homogeneous", width = 65 }
//!
//! [[layers]]
//! nodes = 3
//! dimensions = "input"
//! theme = "input_grey"
//! bias = true
//! labels = { pre = "x_{III}", index_base = 0 }
//! connect = { target_theme_colors = true, skip_target_bias = true }
//!
//! [[layers]]
//! nodes = 4
//! theme = "green"
//! bias = true
//! labels = { pre = "z_{III}^{(LLL)}", post = "a_{III}^{(LLL)}" }
//! ```
//!
//! Every field except `nodes` has a default, so a layer can be as short as
//! `{ nodes = 4 }`.

use std::collections::BTreeMap;

use serde::Deserialize;

use nnsketch_core::{
    color::Color,
    draw::{ConnectionColors, ForwardOptions, LayerOptions},
    error::DrawError,
    label::{LabelSize, LayerLabels},
    theme::{Dimensions, NodeBody},
};

/// A whole diagram.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramDescription {
    /// Named node dimensions, referenced by [`LayerDescription::dimensions`].
    #[serde(default)]
    pub dimensions: BTreeMap<String, DimensionsDescription>,

    /// Layers in network order.
    #[serde(default)]
    pub layers: Vec<LayerDescription>,
}

/// Node sizing. Omitted fields fall back to [`Dimensions::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionsDescription {
    pub body: Option<BodyDescription>,
    pub height: Option<f32>,
    pub corner_radius: Option<f32>,
    pub border_thickness: Option<f32>,
}

impl DimensionsDescription {
    /// Builds validated [`Dimensions`].
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidArgument`] for out-of-range values.
    pub fn to_dimensions(&self) -> Result<Dimensions, DrawError> {
        let defaults = Dimensions::default();
        Dimensions::new(
            self.body.map_or(defaults.body(), BodyDescription::to_body),
            self.height.unwrap_or(defaults.height()),
            self.corner_radius.unwrap_or(defaults.corner_radius()),
            self.border_thickness.unwrap_or(defaults.border_thickness()),
        )
    }
}

/// Node body layout, tagged by `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum BodyDescription {
    Split { pre_width: f32, post_width: f32 },
    Homogeneous { width: f32 },
}

impl BodyDescription {
    pub fn to_body(self) -> NodeBody {
        match self {
            Self::Split {
                pre_width,
                post_width,
            } => NodeBody::split(pre_width, post_width),
            Self::Homogeneous { width } => NodeBody::homogeneous(width),
        }
    }
}

/// Either a single name or one name per node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ThemeDescription {
    Single(String),
    PerNode(Vec<String>),
}

impl Default for ThemeDescription {
    fn default() -> Self {
        Self::Single("default".to_string())
    }
}

/// One layer of the network.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerDescription {
    /// Number of nodes.
    pub nodes: usize,

    /// X coordinate; by default one layer gap right of the previous layer.
    #[serde(default)]
    pub x: Option<f32>,

    /// Y coordinate of the first node.
    #[serde(default)]
    pub y: f32,

    /// Name of an entry in [`DiagramDescription::dimensions`].
    #[serde(default)]
    pub dimensions: Option<String>,

    /// Palette theme name(s).
    #[serde(default)]
    pub theme: ThemeDescription,

    #[serde(default = "one")]
    pub input_anchors: usize,

    #[serde(default = "one")]
    pub output_anchors: usize,

    #[serde(default = "default_spacing")]
    pub spacing: f32,

    /// Makes the first node a bias node.
    #[serde(default)]
    pub bias: bool,

    #[serde(default)]
    pub labels: Option<LabelsDescription>,

    /// Connections from this layer to the next one.
    #[serde(default)]
    pub connect: Option<ConnectDescription>,
}

impl LayerDescription {
    /// A layer of `nodes` nodes with every other field at its default.
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            x: None,
            y: 0.0,
            dimensions: None,
            theme: ThemeDescription::default(),
            input_anchors: 1,
            output_anchors: 1,
            spacing: default_spacing(),
            bias: false,
            labels: None,
            connect: None,
        }
    }

    pub fn layer_options(&self) -> LayerOptions {
        LayerOptions {
            input_anchors: self.input_anchors,
            output_anchors: self.output_anchors,
            spacing: self.spacing,
            bias: self.bias,
        }
    }
}

/// Label templates; `III` is the node index, `LLL` the layer number.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelsDescription {
    #[serde(default)]
    pub pre: Option<String>,

    #[serde(default)]
    pub post: Option<String>,

    /// Font size: one of 5, 9, 10, 12, 18 or 20.
    #[serde(default)]
    pub size: LabelSize,

    #[serde(default = "one")]
    pub index_base: usize,
}

impl LabelsDescription {
    pub fn to_labels(&self) -> LayerLabels {
        LayerLabels {
            pre_activation: self.pre.clone(),
            post_activation: self.post.clone(),
            size: self.size,
            index_base: self.index_base,
        }
    }
}

/// Either one color for every edge or one color per target node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColorsDescription {
    Single(String),
    PerTarget(Vec<String>),
}

impl ColorsDescription {
    /// Parses the color strings.
    ///
    /// # Errors
    ///
    /// Returns the parser message of the first invalid color.
    pub fn to_colors(&self) -> Result<ConnectionColors, String> {
        match self {
            Self::Single(color) => Color::new(color).map(ConnectionColors::Single),
            Self::PerTarget(colors) => colors
                .iter()
                .map(|color| Color::new(color))
                .collect::<Result<Vec<_>, _>>()
                .map(ConnectionColors::PerTarget),
        }
    }
}

/// Style of the edges into the next layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectDescription {
    /// Edge colors; defaults to grey.
    pub colors: Option<ColorsDescription>,

    /// Color every edge by the pre-activation color of its target node.
    pub target_theme_colors: bool,

    pub stroke_width: f32,
    pub curvature_from: f32,
    pub curvature_to: f32,
    pub fan_source: bool,
    pub fan_target: bool,
    pub opacity: f32,
    pub skip_target_bias: bool,
}

impl ConnectDescription {
    pub fn forward_options(&self) -> ForwardOptions {
        ForwardOptions {
            stroke_width: self.stroke_width,
            curvature_from: self.curvature_from,
            curvature_to: self.curvature_to,
            fan_source: self.fan_source,
            fan_target: self.fan_target,
            opacity: self.opacity,
            skip_target_bias: self.skip_target_bias,
        }
    }
}

impl Default for ConnectDescription {
    fn default() -> Self {
        let options = ForwardOptions::default();
        Self {
            colors: None,
            target_theme_colors: false,
            stroke_width: options.stroke_width,
            curvature_from: options.curvature_from,
            curvature_to: options.curvature_to,
            fan_source: options.fan_source,
            fan_target: options.fan_target,
            opacity: options.opacity,
            skip_target_bias: options.skip_target_bias,
        }
    }
}

fn one() -> usize {
    1
}

fn default_spacing() -> f32 {
    LayerOptions::default().spacing
}
