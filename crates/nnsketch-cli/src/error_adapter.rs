//! Error adapter for converting NnsketchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use nnsketch::{DrawError, NnsketchError};

/// Adapter giving an [`NnsketchError`] a stable diagnostic code and, where
/// one exists, a hint on how to fix it.
pub struct ErrorAdapter<'a>(pub &'a NnsketchError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            NnsketchError::Io(_) => "nnsketch::io",
            NnsketchError::Config(_) => "nnsketch::config",
            NnsketchError::Description(_) => "nnsketch::description",
            NnsketchError::Draw(_) => "nnsketch::draw",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            NnsketchError::Draw(DrawError::AnchorOutOfRange { .. }) => {
                "fanned connections need `output_anchors` on the source layer to be at least the \
                 size of the next layer, and `input_anchors` on the target layer to be at least \
                 the size of the source layer"
            }
            NnsketchError::Draw(DrawError::ColorCountMismatch { .. }) => {
                "per-target `colors` need one entry per node of the next layer"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert an [`NnsketchError`] into a reportable error.
pub fn to_reportable(err: &NnsketchError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
