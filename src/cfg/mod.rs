mod block;
mod edge;
mod error;
mod parser;
mod resolver;

pub use block::{BasicBlock, ControlFlowGraph};
pub use edge::{Edge, EdgeKind};
pub use error::CfgError;
pub use parser::{parse, LabelIndex, ParsedCfg};
pub use resolver::resolve;
