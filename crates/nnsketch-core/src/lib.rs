//! nnsketch Core Types and Definitions
//!
//! This crate provides the geometry engine for hand-authored neural network
//! diagrams. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Themes**: Node dimensions, color themes and the built-in palette ([`theme`] module)
//! - **Anchors**: Connection point placement along node edges ([`anchor`] module)
//! - **Draw**: Nodes, layers, connections and the surfaces they draw on ([`draw`] module)
//! - **Labels**: LaTeX labels rendered by an external service ([`label`] module)
//!
//! The crate performs no I/O. Errors are reported as [`error::DrawError`].

pub mod anchor;
pub mod color;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod label;
pub mod theme;
