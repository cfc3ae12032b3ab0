//! Node dimensions, color themes and the built-in palette.
//!
//! [`Dimensions`] and [`NodeTheme`] are immutable once built and are shared
//! through [`Arc`], so a single palette entry can style every node of every
//! diagram in the process.
//!
//! # Examples
//!
//! ```
//! use nnsketch_core::theme::{palette, Dimensions, NodeBody};
//!
//! let input_dims = Dimensions::new(NodeBody::homogeneous(65.0), 50.0, 10.0, 3.0).unwrap();
//! assert_eq!(input_dims.body().total_width(), 65.0);
//!
//! let theme = palette::by_name("green").unwrap();
//! assert_eq!(theme.pre_activation().to_hex_string(), "28ae38");
//! ```

use std::sync::Arc;

use crate::{color::Color, error::DrawError};

/// Horizontal layout of a node body.
///
/// A split body has a pre-activation region on the left and a post-activation
/// region on the right. A homogeneous body is drawn as one region; its
/// requested width is halved into two equal logical regions so that seam and
/// anchor geometry work the same way for both kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeBody {
    Split { pre_width: f32, post_width: f32 },
    Homogeneous { width: f32 },
}

impl NodeBody {
    /// Creates a split body.
    pub fn split(pre_width: f32, post_width: f32) -> Self {
        Self::Split {
            pre_width,
            post_width,
        }
    }

    /// Creates a homogeneous body with the given total width.
    pub fn homogeneous(width: f32) -> Self {
        Self::Homogeneous { width }
    }

    /// Width of the left (pre-activation) region.
    pub fn pre_width(self) -> f32 {
        match self {
            Self::Split { pre_width, .. } => pre_width,
            Self::Homogeneous { width } => width / 2.0,
        }
    }

    /// Width of the right (post-activation) region.
    pub fn post_width(self) -> f32 {
        match self {
            Self::Split { post_width, .. } => post_width,
            Self::Homogeneous { width } => width / 2.0,
        }
    }

    /// Full visual width of the node.
    pub fn total_width(self) -> f32 {
        self.pre_width() + self.post_width()
    }

    pub fn is_homogeneous(self) -> bool {
        matches!(self, Self::Homogeneous { .. })
    }

    fn validate(self) -> Result<(), DrawError> {
        match self {
            Self::Split {
                pre_width,
                post_width,
            } => {
                if !(pre_width.is_finite() && pre_width > 0.0) {
                    return Err(DrawError::invalid(format!(
                        "pre-activation width must be positive, got {pre_width}"
                    )));
                }
                if !(post_width.is_finite() && post_width >= 0.0) {
                    return Err(DrawError::invalid(format!(
                        "post-activation width must not be negative, got {post_width}"
                    )));
                }
            }
            Self::Homogeneous { width } => {
                if !(width.is_finite() && width > 0.0) {
                    return Err(DrawError::invalid(format!(
                        "node width must be positive, got {width}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for NodeBody {
    fn default() -> Self {
        Self::split(65.0, 100.0)
    }
}

/// Geometric sizing shared by nodes of one visual style.
///
/// The corner radius should stay below half of the smallest region width and
/// of the height; larger radii make the rounded corners overlap. This is not
/// checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    body: NodeBody,
    height: f32,
    corner_radius: f32,
    border_thickness: f32,
}

impl Dimensions {
    /// Creates validated dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidArgument`] for a non-positive width or
    /// height, a negative post-activation width, radius or border, or any
    /// non-finite value.
    pub fn new(
        body: NodeBody,
        height: f32,
        corner_radius: f32,
        border_thickness: f32,
    ) -> Result<Self, DrawError> {
        body.validate()?;
        if !(height.is_finite() && height > 0.0) {
            return Err(DrawError::invalid(format!(
                "node height must be positive, got {height}"
            )));
        }
        if !(corner_radius.is_finite() && corner_radius >= 0.0) {
            return Err(DrawError::invalid(format!(
                "corner radius must not be negative, got {corner_radius}"
            )));
        }
        if !(border_thickness.is_finite() && border_thickness >= 0.0) {
            return Err(DrawError::invalid(format!(
                "border thickness must not be negative, got {border_thickness}"
            )));
        }
        Ok(Self {
            body,
            height,
            corner_radius,
            border_thickness,
        })
    }

    pub fn body(&self) -> NodeBody {
        self.body
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn border_thickness(&self) -> f32 {
        self.border_thickness
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            body: NodeBody::default(),
            height: 50.0,
            corner_radius: 10.0,
            border_thickness: 3.0,
        }
    }
}

/// Colors of a node: fills for both regions, the border, and the foreground
/// colors used for labels drawn on each region.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTheme {
    pre_activation: Color,
    post_activation: Color,
    border: Color,
    pre_activation_label: Color,
    post_activation_label: Color,
}

impl NodeTheme {
    /// Creates a theme with white pre-activation labels and black
    /// post-activation labels.
    pub fn new(pre_activation: Color, post_activation: Color, border: Color) -> Self {
        Self {
            pre_activation,
            post_activation,
            border,
            pre_activation_label: Color::new("#FFFFFF").expect("valid hex literal"),
            post_activation_label: Color::default(),
        }
    }

    /// Replaces both label colors (builder style).
    pub fn with_label_colors(mut self, pre_activation: Color, post_activation: Color) -> Self {
        self.pre_activation_label = pre_activation;
        self.post_activation_label = post_activation;
        self
    }

    /// Fill of the pre-activation (left) region.
    pub fn pre_activation(&self) -> Color {
        self.pre_activation
    }

    /// Fill of the post-activation (right) region.
    pub fn post_activation(&self) -> Color {
        self.post_activation
    }

    pub fn border(&self) -> Color {
        self.border
    }

    pub fn pre_activation_label(&self) -> Color {
        self.pre_activation_label
    }

    pub fn post_activation_label(&self) -> Color {
        self.post_activation_label
    }
}

impl Default for NodeTheme {
    fn default() -> Self {
        (**palette::DEFAULT).clone()
    }
}

/// Collects the pre-activation fill of each theme, in order.
///
/// Handy for coloring the connections into each node of a layer after that
/// node's own theme.
pub fn pre_activation_colors(themes: &[Arc<NodeTheme>]) -> Vec<Color> {
    themes.iter().map(|theme| theme.pre_activation()).collect()
}

/// Built-in themes, initialised on first use and never mutated.
pub mod palette {
    use std::sync::{Arc, LazyLock};

    use super::NodeTheme;
    use crate::color::Color;

    fn theme(a: &str, b: &str, border: &str, fg_a: &str, fg_b: &str) -> Arc<NodeTheme> {
        let hex = |value: &str| Color::new(value).expect("palette colors are valid hex literals");
        let regions = NodeTheme::new(hex(a), hex(b), hex(border));
        Arc::new(regions.with_label_colors(hex(fg_a), hex(fg_b)))
    }

    pub static DEFAULT: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#6699FF", "#ff9900", "#333333", "#FFFFFF", "#000000"));
    pub static BLUE_ORANGE: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#6699FF", "#ff9900", "#333333", "#FFFFFF", "#000000"));
    pub static GREEN: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#28AE38", "#C1F9C8", "#009412", "#FFFFFF", "#176220"));
    pub static ORANGE: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#FFA41F", "#FFE8C6", "#DD8B16", "#FFFFFF", "#813805"));
    pub static PURPLE: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#552DCC", "#D2C5F6", "#30118C", "#FFFFFF", "#1E0469"));
    pub static BLUE: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#5888ED", "#AFC8FF", "#2F6AE9", "#FFFFFF", "#021D54"));
    pub static TANGERINE: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#FF4C00", "#FF9A6F", "#E24300", "#FFFFFF", "#3D1200"));
    pub static FUSCIA: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#CF45D9", "#F7B3FB", "#CA22D5", "#FFFFFF", "#690B70"));
    pub static GREY_DARK: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#424242", "#848484", "#333333", "#FFFFFF", "#222222"));
    pub static GREY_MED: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#7E7E7E", "#D4D4D4", "#505050", "#FFFFFF", "#333333"));
    pub static GREY_LIGHT: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#C6C6C6", "#ECECEC", "#7F7F7F", "#FFFFFF", "#333333"));
    pub static INPUT_GREY: LazyLock<Arc<NodeTheme>> =
        LazyLock::new(|| theme("#D4D4D4", "#D4D4D4", "#505050", "#333333", "#333333"));

    const NAMES: [&str; 12] = [
        "default",
        "blue_orange",
        "green",
        "orange",
        "purple",
        "blue",
        "tangerine",
        "fuscia",
        "grey_dark",
        "grey_med",
        "grey_light",
        "input_grey",
    ];

    /// Looks a theme up by its lowercase name, e.g. `"grey_light"`.
    pub fn by_name(name: &str) -> Option<Arc<NodeTheme>> {
        let theme = match name {
            "default" => &DEFAULT,
            "blue_orange" => &BLUE_ORANGE,
            "green" => &GREEN,
            "orange" => &ORANGE,
            "purple" => &PURPLE,
            "blue" => &BLUE,
            "tangerine" => &TANGERINE,
            "fuscia" => &FUSCIA,
            "grey_dark" => &GREY_DARK,
            "grey_med" => &GREY_MED,
            "grey_light" => &GREY_LIGHT,
            "input_grey" => &INPUT_GREY,
            _ => return None,
        };
        Some(Arc::clone(LazyLock::force(theme)))
    }

    /// Names accepted by [`by_name`].
    pub fn names() -> &'static [&'static str] {
        &NAMES
    }
}
