use std::path::PathBuf;

use thiserror::Error;

use crate::{cfg::CfgError, render::RenderError};

#[derive(Debug, Error)]
pub enum IrGraphError {
    #[error("Unsupported input {}: expected a `.{}` file", .0.display(), crate::IR_EXTENSION)]
    UnsupportedExtension(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to build graph: {0}")]
    GraphError(CfgError),
    #[error("Failed to render graph: {0}")]
    RenderError(RenderError),
}

impl From<CfgError> for IrGraphError {
    fn from(e: CfgError) -> Self {
        IrGraphError::GraphError(e)
    }
}

impl From<RenderError> for IrGraphError {
    fn from(e: RenderError) -> Self {
        IrGraphError::RenderError(e)
    }
}
