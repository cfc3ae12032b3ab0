//! Drawing primitives and the diagram elements built on them.
//!
//! Everything in this module draws through the [`Surface`] capability, so the
//! same node, layer and connection code renders to SVG ([`SvgSurface`]) or to
//! an inspectable command log ([`RecordingSurface`]).
//!
//! # Draw Order
//!
//! Elements are painted in call order. A diagram usually draws connections
//! first so that node bodies cover the ends of the curves, then nodes, then
//! labels.

mod bezier;
mod layer;
mod node;
mod recording;
mod stroke;
mod surface;
mod svg_surface;

pub use bezier::{ConnectionStyle, route};
pub use layer::{
    ConnectionColors, ForwardOptions, Layer, LayerOptions, ThemeSelection, layer_node_ys,
};
pub use node::{Anchor, Node, NodeOptions};
pub use recording::{Command, RecordingSurface};
pub use stroke::StrokeDefinition;
pub use surface::{AlphaScope, Image, Surface};
pub use svg_surface::{SvgNode, SvgSurface};
