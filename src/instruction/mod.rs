mod error;

pub use error::InstructionError;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

const JUMP_MARKER: char = 'j';
const BRANCH_MARKER: char = 'b';

lazy_static! {
    /// `BB<n>:` followed by whatever else shares the line
    static ref BLOCK_OPEN: Regex = Regex::new(r"^(BB[^\s:]*):(.*)$").unwrap();
    /// `L<n>:` followed by whatever else shares the line
    static ref LABEL: Regex = Regex::new(r"^(L[^\s:]*):(.*)$").unwrap();
}

/// A single IR instruction, reduced to what matters for block structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    BlockOpen {
        id: String,
    },
    Label {
        name: String,
    },
    Jump {
        target: String,
    },
    Branch {
        operand: String,
        if_true: String,
        if_false: String,
    },
    /// Anything else, kept for display only.
    Other,
}

impl Instruction {
    /// Classify one physical line of an IR listing.
    ///
    /// A line may stack several markers, e.g. `BB1: L1: b v0, L2, L3` opens
    /// a block, labels it and terminates it with a branch. Markers are peeled
    /// off left to right: block openings and labels first, then whatever is
    /// left is a jump, a branch or an opaque instruction.
    ///
    /// ### Arguments
    /// * `text` - the raw line, surrounding whitespace is ignored
    /// * `line` - 1-based line number, used in errors only
    ///
    /// ### Returns
    /// The instructions found on the line in order. Never empty: a blank line
    /// yields a single [`Instruction::Other`].
    pub fn classify(text: &str, line: usize) -> Result<Vec<Self>, InstructionError> {
        let mut insns = Vec::new();
        let mut rest = text.trim();
        while let Some((insn, tail)) = Self::leading_marker(rest) {
            insns.push(insn);
            rest = tail.trim_start();
        }
        if !rest.is_empty() || insns.is_empty() {
            insns.push(Self::terminal(rest, text.trim(), line)?);
        }
        Ok(insns)
    }

    /// Whether `text` starts a new basic block.
    pub fn opens_block(text: &str) -> bool {
        BLOCK_OPEN.is_match(text.trim())
    }

    fn leading_marker(text: &str) -> Option<(Self, &str)> {
        if let Some(caps) = BLOCK_OPEN.captures(text) {
            let id = caps[1].to_string();
            let tail = caps.get(2).map_or("", |m| m.as_str());
            return Some((Self::BlockOpen { id }, tail));
        }
        if let Some(caps) = LABEL.captures(text) {
            let name = caps[1].to_string();
            let tail = caps.get(2).map_or("", |m| m.as_str());
            return Some((Self::Label { name }, tail));
        }
        None
    }

    fn terminal(rest: &str, text: &str, line: usize) -> Result<Self, InstructionError> {
        match rest.chars().next() {
            Some(JUMP_MARKER) => {
                let target = rest.split_whitespace().nth(1).ok_or_else(|| {
                    InstructionError::MalformedJump {
                        line,
                        text: text.to_string(),
                    }
                })?;
                Ok(Self::Jump {
                    target: target.to_string(),
                })
            }
            Some(BRANCH_MARKER) => {
                let malformed = || InstructionError::MalformedBranch {
                    line,
                    text: text.to_string(),
                };
                let fields: Vec<&str> = rest.split(',').map(str::trim).collect();
                let [head, if_true, if_false] = fields.as_slice() else {
                    return Err(malformed());
                };
                if if_true.is_empty() || if_false.is_empty() {
                    return Err(malformed());
                }
                let operand = head
                    .split_once(char::is_whitespace)
                    .map_or("", |(_, operand)| operand.trim());
                Ok(Self::Branch {
                    operand: operand.to_string(),
                    if_true: if_true.to_string(),
                    if_false: if_false.to_string(),
                })
            }
            _ => Ok(Self::Other),
        }
    }

    /// Labels this instruction transfers control to, true-target first.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Jump { target } => vec![target.as_str()],
            Self::Branch {
                if_true, if_false, ..
            } => vec![if_true.as_str(), if_false.as_str()],
            Self::BlockOpen { .. } | Self::Label { .. } | Self::Other => vec![],
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, Self::Jump { .. } | Self::Branch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::{Instruction, InstructionError};

    fn classify(text: &str) -> Vec<Instruction> {
        Instruction::classify(text, 1).unwrap()
    }

    #[test]
    fn block_open_alone() {
        assert_eq!(
            classify("BB0:"),
            vec![Instruction::BlockOpen { id: "BB0".into() }]
        );
    }

    #[test]
    fn stacked_markers() {
        assert_eq!(
            classify("  BB1: L1: b cond, L2, L3  "),
            vec![
                Instruction::BlockOpen { id: "BB1".into() },
                Instruction::Label { name: "L1".into() },
                Instruction::Branch {
                    operand: "cond".into(),
                    if_true: "L2".into(),
                    if_false: "L3".into(),
                },
            ]
        );
    }

    #[test]
    fn jump_takes_second_field() {
        assert_eq!(
            classify("jmp L4"),
            vec![Instruction::Jump {
                target: "L4".into()
            }]
        );
        assert_eq!(
            classify("j L7 ; back edge"),
            vec![Instruction::Jump {
                target: "L7".into()
            }]
        );
    }

    #[test]
    fn branch_targets_are_trimmed() {
        let insns = classify("b v3,L1 ,   L2");
        assert_eq!(insns[0].targets(), vec!["L1", "L2"]);
    }

    #[test]
    fn opaque_lines() {
        assert_eq!(classify("v1 : int = add v0, v2"), vec![Instruction::Other]);
        assert_eq!(classify("ret v1"), vec![Instruction::Other]);
        assert_eq!(classify("; func main"), vec![Instruction::Other]);
        assert_eq!(classify(""), vec![Instruction::Other]);
    }

    #[test]
    fn label_without_colon_is_opaque() {
        assert_eq!(classify("L1"), vec![Instruction::Other]);
    }

    #[test]
    fn malformed_branch() {
        for text in ["b v1, L1", "b v1, L1, L2, L3", "b v1, , L2"] {
            assert_eq!(
                Instruction::classify(text, 9),
                Err(InstructionError::MalformedBranch {
                    line: 9,
                    text: text.into()
                })
            );
        }
    }

    #[test]
    fn malformed_jump() {
        assert_eq!(
            Instruction::classify("BB2: j", 4),
            Err(InstructionError::MalformedJump {
                line: 4,
                text: "BB2: j".into()
            })
        );
    }

    #[test]
    fn block_openings() {
        assert!(Instruction::opens_block("  BB3: j L1"));
        assert!(!Instruction::opens_block("L3:"));
        assert!(!Instruction::opens_block("b v0, L1"));
    }

    #[test]
    fn terminators() {
        assert!(classify("j L1")[0].is_terminator());
        assert!(classify("b v, L1, L2")[0].is_terminator());
        assert!(!classify("L1:")[0].is_terminator());
        assert!(classify("ret")[0].targets().is_empty());
    }
}
