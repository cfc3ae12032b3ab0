//! LaTeX labels placed on the regions of a layer's nodes.
//!
//! Labels are rendered by a remote LaTeX-to-image service: [`LatexService`]
//! turns a formula, a color and a [`LabelSize`] into a request URL, and an
//! [`ImageSource`] turns that URL into an [`Image`] the surface can place.
//! The default source, [`LinkedImages`], performs no I/O at all and simply
//! links the URL, leaving the fetch to whatever displays the output.
//!
//! Label templates may contain two placeholders:
//!
//! - `III` is replaced by the node index plus [`LayerLabels::index_base`].
//! - `LLL` is replaced by the layer number.
//!
//! ```
//! # use nnsketch_core::label::expand_template;
//! assert_eq!(expand_template("a_{III}^{(LLL)}", 0, 1, 2), "a_{1}^{(2)}");
//! ```

use log::{debug, trace};
use serde::Deserialize;

use crate::{
    color::Color,
    draw::{Image, Layer, Node, Surface},
    error::DrawError,
    geometry::Point,
};

/// Horizontal distance between a region's left edge and its label.
const LABEL_X_OFFSET: f32 = 10.0;

/// Font size buckets understood by the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "u32")]
pub enum LabelSize {
    Tiny,
    Small,
    Normal,
    #[default]
    Large,
    XLarge,
    Huge,
}

impl LabelSize {
    /// Font size in points.
    pub fn font_size(self) -> u32 {
        match self {
            Self::Tiny => 5,
            Self::Small => 9,
            Self::Normal => 10,
            Self::Large => 12,
            Self::XLarge => 18,
            Self::Huge => 20,
        }
    }

    /// The bucket for an exact font size, if there is one.
    pub fn from_font_size(size: u32) -> Option<Self> {
        match size {
            5 => Some(Self::Tiny),
            9 => Some(Self::Small),
            10 => Some(Self::Normal),
            12 => Some(Self::Large),
            18 => Some(Self::XLarge),
            20 => Some(Self::Huge),
            _ => None,
        }
    }

    /// The LaTeX sizing command, without backslash. `Normal` has none.
    pub fn latex_command(self) -> Option<&'static str> {
        match self {
            Self::Tiny => Some("tiny"),
            Self::Small => Some("small"),
            Self::Normal => None,
            Self::Large => Some("large"),
            Self::XLarge => Some("LARGE"),
            Self::Huge => Some("huge"),
        }
    }
}

impl TryFrom<u32> for LabelSize {
    type Error = String;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::from_font_size(size).ok_or_else(|| {
            format!("unsupported label size {size}, expected one of 5, 9, 10, 12, 18, 20")
        })
    }
}

/// Builds request URLs for a LaTeX rendering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexService {
    endpoint: String,
}

impl LatexService {
    pub const DEFAULT_ENDPOINT: &'static str = "http://latex.codecogs.com/png.latex?";

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URL of the image rendering `latex` in `color` at `size`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nnsketch_core::color::Color;
    /// # use nnsketch_core::label::{LabelSize, LatexService};
    /// let service = LatexService::default();
    /// let url = service.url("z_1", Color::new("#FFFFFF").unwrap(), LabelSize::Large);
    /// assert_eq!(
    ///     url,
    ///     "http://latex.codecogs.com/png.latex?\\fg_ffffff&space;\\large&space;z_1"
    /// );
    /// ```
    pub fn url(&self, latex: &str, color: Color, size: LabelSize) -> String {
        let mut url = format!("{}\\fg_{}&space;", self.endpoint, color.to_hex_string());
        if let Some(command) = size.latex_command() {
            url.push_str(&format!("\\{command}&space;"));
        }
        url.push_str(latex);
        url
    }
}

impl Default for LatexService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT)
    }
}

/// Resolves an image URL into something a surface can draw.
pub trait ImageSource {
    /// # Errors
    ///
    /// Returns [`DrawError::ImageUnavailable`] if the image cannot be obtained.
    fn load(&self, url: &str) -> Result<Image, DrawError>;
}

/// Hands out images that merely reference their URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedImages;

impl ImageSource for LinkedImages {
    fn load(&self, url: &str) -> Result<Image, DrawError> {
        if url.trim().is_empty() {
            return Err(DrawError::ImageUnavailable(
                "cannot link an image without a URL".to_string(),
            ));
        }
        Ok(Image::new(url))
    }
}

/// Label templates for one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerLabels {
    /// Template for the pre-activation region, e.g. `z_{III}^{(LLL)}`.
    pub pre_activation: Option<String>,
    /// Template for the post-activation region, e.g. `a_{III}^{(LLL)}`.
    pub post_activation: Option<String>,
    pub size: LabelSize,
    /// Number added to the node index when expanding `III`.
    pub index_base: usize,
}

impl Default for LayerLabels {
    fn default() -> Self {
        Self {
            pre_activation: None,
            post_activation: None,
            size: LabelSize::default(),
            index_base: 1,
        }
    }
}

/// Replaces the `III` and `LLL` placeholders of a label template.
pub fn expand_template(
    template: &str,
    node_index: usize,
    index_base: usize,
    layer_number: usize,
) -> String {
    template
        .replace("III", &(node_index + index_base).to_string())
        .replace("LLL", &layer_number.to_string())
}

/// Draws the labels of every node in `layer`.
///
/// Bias nodes get a single `+1` on their pre-activation region and nothing on
/// the other. All images are loaded before the first one is drawn. Returns
/// the number of labels drawn.
///
/// # Errors
///
/// Propagates the first error from `images`; nothing is drawn in that case.
pub fn draw_layer_labels<S, I>(
    surface: &mut S,
    images: &I,
    service: &LatexService,
    layer: &Layer,
    layer_number: usize,
    labels: &LayerLabels,
) -> Result<usize, DrawError>
where
    S: Surface + ?Sized,
    I: ImageSource + ?Sized,
{
    let mut placed = Vec::new();
    for (i, node) in layer.nodes().iter().enumerate() {
        let y = label_y(node, labels.size);
        let theme = node.theme();

        let expand = |template: &str| expand_template(template, i, labels.index_base, layer_number);

        let pre = if node.is_bias() {
            Some("+1".to_string())
        } else {
            labels.pre_activation.as_deref().map(expand)
        };
        if let Some(latex) = pre {
            let url = service.url(&latex, theme.pre_activation_label(), labels.size);
            trace!(node = i, latex = latex.as_str(); "Pre-activation label");
            let position = Point::new(node.x() + LABEL_X_OFFSET, y);
            placed.push((images.load(&url)?, position));
        }

        if node.is_bias() {
            continue;
        }
        if let Some(template) = labels.post_activation.as_deref() {
            let latex = expand(template);
            let url = service.url(&latex, theme.post_activation_label(), labels.size);
            trace!(node = i, latex = latex.as_str(); "Post-activation label");
            let position = Point::new(node.mid_x() + LABEL_X_OFFSET, y);
            placed.push((images.load(&url)?, position));
        }
    }

    for (image, position) in &placed {
        surface.draw_image(image, *position);
    }

    debug!(layer = layer_number, labels = placed.len(); "Layer labels drawn");
    Ok(placed.len())
}

/// Labels sit on the bottom edge of the node, lifted by the corner radius and
/// one and a half lines of text.
fn label_y(node: &Node, size: LabelSize) -> f32 {
    let radius = node.dimensions().corner_radius();
    node.bounds().max_y() - radius - 1.5 * size.font_size() as f32
}
