use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

use crate::cfg::CfgError;

use super::OutputFormat;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Graph is not renderable: {0}")]
    Graph(#[from] CfgError),
    #[error("Failed to format output: {0}")]
    Fmt(#[from] std::fmt::Error),
    #[error("Failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0:?} is not an image format")]
    NotAnImage(OutputFormat),
    #[error("Failed to run {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        source: std::io::Error,
    },
    #[error("Graphviz exited with {status}: {stderr}")]
    Graphviz { status: ExitStatus, stderr: String },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid render options in {}: {source}", path.display())]
    Options {
        path: PathBuf,
        source: serde_json::Error,
    },
}
