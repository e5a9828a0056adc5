use thiserror::Error;

use crate::instruction::InstructionError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CfgError {
    #[error("Block {block} references label {label}, which no block defines")]
    UnresolvedLabel { label: String, block: String },
    #[error("Block {id} on line {line} was already opened earlier")]
    DuplicateBlock { id: String, line: usize },
    #[error("Label {label} on line {line} already names block {owner}")]
    DuplicateLabel {
        label: String,
        owner: String,
        line: usize,
    },
    #[error("Block {block} has {count} successors, at most 2 are allowed")]
    TooManySuccessors { block: String, count: usize },
    #[error("Instruction error - {0}")]
    InstructionError(#[from] InstructionError),
}
