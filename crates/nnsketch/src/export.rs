//! SVG document assembly.
//!
//! The drawing itself happens on an [`SvgSurface`]; this module wraps the
//! emitted elements in a document whose `viewBox` covers everything that was
//! drawn plus the configured margin, with an optional background rectangle
//! underneath.

use log::debug;
use svg::{Document, node::element as svg_element};

use nnsketch_core::{color::Color, draw::SvgSurface, geometry::Bounds};

use crate::{config::StyleConfig, error::NnsketchError};

/// Builds the final SVG document from a drawn surface.
pub struct SvgDocumentBuilder<'a> {
    style: &'a StyleConfig,
}

impl<'a> SvgDocumentBuilder<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Wraps the surface content in a document.
    ///
    /// An empty surface yields a document that covers only the margin.
    ///
    /// # Errors
    ///
    /// Returns [`NnsketchError::Config`] if the configured background color
    /// is invalid.
    pub fn build(&self, surface: SvgSurface) -> Result<Document, NnsketchError> {
        let style = self.style;
        let background = style.background_color().map_err(NnsketchError::Config)?;

        let content = surface.bounds().unwrap_or_default();
        let view = content.expand(style.margin());
        debug!(
            min_x = view.min_x(),
            min_y = view.min_y(),
            width = view.width(),
            height = view.height();
            "Document bounds calculated"
        );

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view.min_x(),
                    view.min_y(),
                    view.width(),
                    view.height()
                ),
            )
            .set("width", view.width())
            .set("height", view.height());

        if let Some(color) = background {
            doc = doc.add(background_rect(view, &color));
        }

        Ok(surface
            .into_nodes()
            .into_iter()
            .fold(doc, |doc, node| doc.add(node)))
    }
}

fn background_rect(view: Bounds, color: &Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", view.min_x())
        .set("y", view.min_y())
        .set("width", view.width())
        .set("height", view.height())
        .set("fill", color)
}
