use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstructionError {
    #[error("Malformed branch on line {line}: `{text}`, expected `b <operand>, <true-label>, <false-label>`")]
    MalformedBranch { line: usize, text: String },
    #[error("Malformed jump on line {line}: `{text}`, expected `j <label>`")]
    MalformedJump { line: usize, text: String },
}
