use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::instruction::Instruction;

use super::{BasicBlock, CfgError};

/// Label name to the id of the block it opens.
pub type LabelIndex = HashMap<String, String>;

/// Output of the first pass: blocks whose successors are still label names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCfg {
    pub blocks: Vec<BasicBlock>,
    pub labels: LabelIndex,
}

/// Group the lines of an IR listing into basic blocks.
///
/// Every line is stored verbatim (trimmed) in the block that is current when
/// it is read, including the block opening itself. Lines before the first
/// block opening are dropped without being looked at. A block keeps only its
/// first label; later label lines are still part of its source. A block ends
/// up with at most two successors.
pub fn parse<'a, I>(lines: I) -> Result<ParsedCfg, CfgError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed = ParsedCfg::default();
    let mut opened = HashSet::new();
    for (i, raw) in lines.into_iter().enumerate() {
        let line = i + 1;
        let text = raw.trim();
        if parsed.blocks.is_empty() && !Instruction::opens_block(text) {
            debug!("{line}: dropping `{text}`, no block is open");
            continue;
        }
        for insn in Instruction::classify(text, line)? {
            trace!("{line}: {insn:?}");
            match insn {
                Instruction::BlockOpen { id } => {
                    if !opened.insert(id.clone()) {
                        return Err(CfgError::DuplicateBlock { id, line });
                    }
                    parsed.blocks.push(BasicBlock::new(id));
                }
                Instruction::Label { name } => {
                    let Some(block) = parsed.blocks.last_mut() else {
                        continue;
                    };
                    if block.label.is_some() {
                        trace!("{line}: {} already labelled, ignoring {name}", block.id);
                        continue;
                    }
                    if let Some(owner) = parsed.labels.get(&name) {
                        return Err(CfgError::DuplicateLabel {
                            label: name,
                            owner: owner.clone(),
                            line,
                        });
                    }
                    parsed.labels.insert(name.clone(), block.id.clone());
                    block.label = Some(name);
                }
                insn @ (Instruction::Jump { .. } | Instruction::Branch { .. }) => {
                    let Some(block) = parsed.blocks.last_mut() else {
                        continue;
                    };
                    block
                        .successors
                        .extend(insn.targets().into_iter().map(String::from));
                    if block.successors.len() > 2 {
                        return Err(CfgError::TooManySuccessors {
                            block: block.id.clone(),
                            count: block.successors.len(),
                        });
                    }
                }
                Instruction::Other => {}
            }
        }
        if let Some(block) = parsed.blocks.last_mut() {
            block.source_lines.push(text.to_string());
        }
    }
    Ok(parsed)
}
