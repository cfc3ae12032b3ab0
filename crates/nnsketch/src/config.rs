//! Configuration types for nnsketch diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining the sections below.
//! - [`LayoutConfig`] - Controls automatic horizontal placement of layers.
//! - [`StyleConfig`] - Controls document styling such as background color and margin.
//! - [`LabelConfig`] - Controls the LaTeX rendering service used for labels.
//!
//! # Example
//!
//! ```
//! # use nnsketch::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.layout().layer_gap(), 300.0);
//! ```

use serde::Deserialize;

use nnsketch_core::{color::Color, label::LatexService};

/// Top-level application configuration.
///
/// Groups [`LayoutConfig`], [`StyleConfig`] and [`LabelConfig`] into a single
/// configuration root. Every section may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Label configuration section.
    #[serde(default)]
    labels: LabelConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, labels: LabelConfig) -> Self {
        Self {
            layout,
            style,
            labels,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the label configuration.
    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }
}

/// Horizontal placement of layers.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Distance between the x coordinates of consecutive layers that do not
    /// set `x` explicitly.
    #[serde(default = "default_layer_gap")]
    layer_gap: f32,
}

impl LayoutConfig {
    pub fn new(layer_gap: f32) -> Self {
        Self { layer_gap }
    }

    pub fn layer_gap(&self) -> f32 {
        self.layer_gap
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_gap: default_layer_gap(),
        }
    }
}

/// Visual styling configuration for rendered documents.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Empty space around the drawing, on every side.
    #[serde(default = "default_margin")]
    margin: f32,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, margin: f32) -> Self {
        Self {
            background_color,
            margin,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            margin: default_margin(),
        }
    }
}

/// LaTeX label rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    /// Endpoint that the formula is appended to.
    #[serde(default = "default_latex_endpoint")]
    latex_endpoint: String,
}

impl LabelConfig {
    pub fn new(latex_endpoint: impl Into<String>) -> Self {
        Self {
            latex_endpoint: latex_endpoint.into(),
        }
    }

    pub fn latex_endpoint(&self) -> &str {
        &self.latex_endpoint
    }

    /// A [`LatexService`] for the configured endpoint.
    pub fn latex_service(&self) -> LatexService {
        LatexService::new(self.latex_endpoint.as_str())
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            latex_endpoint: default_latex_endpoint(),
        }
    }
}

fn default_layer_gap() -> f32 {
    300.0
}

fn default_margin() -> f32 {
    20.0
}

fn default_latex_endpoint() -> String {
    LatexService::DEFAULT_ENDPOINT.to_string()
}
