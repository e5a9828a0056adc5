//! Turn a linear, basic-block IR listing into a control-flow graph and hand
//! it to Graphviz.

use std::{fs, path::Path};

pub mod cfg;
pub mod errors;
pub mod instruction;
pub mod render;

pub use cfg::{BasicBlock, CfgError, ControlFlowGraph, Edge, EdgeKind};
pub use errors::IrGraphError;

/// Extension an input listing must carry.
pub const IR_EXTENSION: &str = "ir";

/// Parse and resolve an IR listing held in memory.
pub fn parse_cfg(source: &str) -> Result<ControlFlowGraph, CfgError> {
    let parsed = cfg::parse(source.lines())?;
    log::debug!(
        "{} blocks, {} labels",
        parsed.blocks.len(),
        parsed.labels.len()
    );
    cfg::resolve(parsed)
}

/// Read a `.ir` file and build its control-flow graph.
pub fn load(path: impl AsRef<Path>) -> Result<ControlFlowGraph, IrGraphError> {
    let path = path.as_ref();
    if path.extension().and_then(|ext| ext.to_str()) != Some(IR_EXTENSION) {
        return Err(IrGraphError::UnsupportedExtension(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(|source| IrGraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::trace!("{}: {} bytes", path.display(), source.len());
    Ok(parse_cfg(&source)?)
}
