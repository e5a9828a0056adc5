use serde::Serialize;

use super::{BasicBlock, CfgError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// The only way out of a block ending in a jump.
    Unconditional,
    /// Taken when the branch operand holds.
    True,
    /// Taken when the branch operand does not hold.
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub kind: EdgeKind,
}

impl BasicBlock {
    /// Classify the outgoing edges of a resolved block.
    ///
    /// No successor means no edge, one successor is an unconditional edge and
    /// two successors are the true and false sides of a branch, in that order.
    /// Any other count is rejected.
    pub fn edges(&self) -> Result<Vec<Edge<'_>>, CfgError> {
        let from = self.id.as_str();
        match self.successors.as_slice() {
            [] => Ok(vec![]),
            [to] => Ok(vec![Edge {
                from,
                to,
                kind: EdgeKind::Unconditional,
            }]),
            [if_true, if_false] => Ok(vec![
                Edge {
                    from,
                    to: if_true,
                    kind: EdgeKind::True,
                },
                Edge {
                    from,
                    to: if_false,
                    kind: EdgeKind::False,
                },
            ]),
            other => Err(CfgError::TooManySuccessors {
                block: self.id.clone(),
                count: other.len(),
            }),
        }
    }
}
