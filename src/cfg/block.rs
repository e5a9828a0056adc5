use std::collections::HashMap;

use serde::Serialize;

use super::{CfgError, Edge};

/// A straight-line run of IR lines with a single entry.
///
/// Before resolution `successors` holds label names, afterwards it holds the
/// ids of the blocks owning those labels. Order and count never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicBlock {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "src")]
    pub source_lines: Vec<String>,
    pub successors: Vec<String>,
}

impl BasicBlock {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            source_lines: Vec::new(),
            successors: Vec::new(),
        }
    }
}

/// Resolved control-flow graph, blocks kept in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlFlowGraph {
    blocks: Vec<BasicBlock>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl ControlFlowGraph {
    pub(crate) fn from_blocks(blocks: Vec<BasicBlock>) -> Self {
        let positions = blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (block.id.clone(), i))
            .collect();
        Self { blocks, positions }
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn get(&self, id: &str) -> Option<&BasicBlock> {
        self.positions.get(id).map(|&i| &self.blocks[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The first block of the listing.
    pub fn entry(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    pub fn block_for_label(&self, label: &str) -> Option<&BasicBlock> {
        self.blocks
            .iter()
            .find(|block| block.label.as_deref() == Some(label))
    }

    /// Ids of blocks with an edge into `id`, in block order. A block with two
    /// edges into `id` is listed once.
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.blocks
            .iter()
            .filter(|block| block.successors.iter().any(|s| s == id))
            .map(|block| block.id.as_str())
            .collect()
    }

    /// Every classified edge of the graph, grouped by source block.
    pub fn edges(&self) -> Result<Vec<Edge<'_>>, CfgError> {
        let mut edges = Vec::new();
        for block in &self.blocks {
            edges.extend(block.edges()?);
        }
        Ok(edges)
    }
}
