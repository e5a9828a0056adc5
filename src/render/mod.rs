mod dot;
mod error;
mod graphviz;

pub use dot::to_dot;
pub use error::RenderError;
pub use graphviz::render_image;

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};

use crate::cfg::ControlFlowGraph;

/// Suffix put between the input name and the output extension.
pub const OUTPUT_SUFFIX: &str = ".graph";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    /// Graphviz source, no image
    Dot,
    /// The resolved graph as JSON
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
            Self::Json => "json",
        }
    }

    /// Name of the format as passed to `dot -T`, `None` for text outputs.
    pub fn graphviz_format(self) -> Option<&'static str> {
        match self {
            Self::Png | Self::Svg | Self::Pdf => Some(self.extension()),
            Self::Dot | Self::Json => None,
        }
    }
}

/// Presentation settings handed to Graphviz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub font_name: String,
    pub font_size: u32,
    /// Graphviz `rankdir`, `TB` draws the entry block at the top
    pub rank_dir: String,
    pub format: OutputFormat,
    /// Graphviz executable, looked up on `PATH` unless absolute
    pub dot_binary: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_name: "IBM Plex Mono".into(),
            font_size: 18,
            rank_dir: "TB".into(),
            format: OutputFormat::default(),
            dot_binary: "dot".into(),
        }
    }
}

impl RenderOptions {
    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| RenderError::Options {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `<input>.graph.<ext>`, e.g. `prog.ir` becomes `prog.ir.graph.png`.
pub fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(OUTPUT_SUFFIX);
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Pretty-printed JSON of the resolved graph.
pub fn to_json(cfg: &ControlFlowGraph) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(cfg)?)
}

/// Write `cfg` to `output` in the format selected by `options`.
pub fn emit(cfg: &ControlFlowGraph, options: &RenderOptions, output: &Path) -> Result<(), RenderError> {
    let write = |text: String| {
        fs::write(output, text).map_err(|source| RenderError::Io {
            path: output.to_path_buf(),
            source,
        })
    };
    match options.format {
        OutputFormat::Json => write(to_json(cfg)?)?,
        OutputFormat::Dot => write(to_dot(cfg, options)?)?,
        OutputFormat::Png | OutputFormat::Svg | OutputFormat::Pdf => {
            render_image(&to_dot(cfg, options)?, options, output)?
        }
    }
    info!("wrote {}", output.display());
    Ok(())
}
