use log::debug;

use super::{BasicBlock, CfgError, ControlFlowGraph, ParsedCfg};

/// Second pass: replace every successor label with the id of its block.
///
/// Order and count of successors are preserved. Loops and unreachable blocks
/// are left as they are.
pub fn resolve(ParsedCfg { blocks, labels }: ParsedCfg) -> Result<ControlFlowGraph, CfgError> {
    let blocks = blocks
        .into_iter()
        .map(|block| -> Result<BasicBlock, CfgError> {
            let successors = block
                .successors
                .iter()
                .map(|label| match labels.get(label) {
                    Some(target) => {
                        debug!("{} -> {target} ({label})", block.id);
                        Ok(target.clone())
                    }
                    None => Err(CfgError::UnresolvedLabel {
                        label: label.clone(),
                        block: block.id.clone(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(BasicBlock { successors, ..block })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ControlFlowGraph::from_blocks(blocks))
}
