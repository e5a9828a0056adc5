use std::fmt::Write;

use crate::cfg::{ControlFlowGraph, EdgeKind};

use super::{RenderError, RenderOptions};

/// Escape text for use inside a double-quoted DOT string.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Block source as a node label, one left-justified row per line.
fn node_label(lines: &[String]) -> String {
    lines.iter().map(|line| escape(line) + "\\l").collect()
}

fn edge_attributes(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::True => r#"color="darkgreen""#,
        EdgeKind::False => r#"color="darkred""#,
        EdgeKind::Unconditional => r#"color="black", weight="0""#,
    }
}

/// Render a resolved graph as Graphviz DOT.
///
/// Nodes are emitted in block order, then the edges of each block. Branch
/// edges are green for the true side and red for the false side.
pub fn to_dot(cfg: &ControlFlowGraph, options: &RenderOptions) -> Result<String, RenderError> {
    let font = escape(&options.font_name);
    let mut out = String::new();
    writeln!(out, "digraph CFG {{")?;
    writeln!(out, "    graph [rankdir=\"{}\"];", escape(&options.rank_dir))?;
    writeln!(
        out,
        "    node [shape=\"box\", fontname=\"{font}\", fontsize=\"{}\"];",
        options.font_size
    )?;
    writeln!(out, "    edge [fontname=\"{font}\"];")?;
    for block in cfg.blocks() {
        writeln!(
            out,
            "    \"{}\" [label=\"{}\"];",
            escape(&block.id),
            node_label(&block.source_lines)
        )?;
    }
    for edge in cfg.edges()? {
        writeln!(
            out,
            "    \"{}\" -> \"{}\" [{}];",
            escape(edge.from),
            escape(edge.to),
            edge_attributes(edge.kind)
        )?;
    }
    writeln!(out, "}}")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{escape, to_dot};
    use crate::{parse_cfg, render::RenderOptions};

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape(r#"a "b" \c"#), r#"a \"b\" \\c"#);
    }

    #[test]
    fn nodes_and_classified_edges() {
        let cfg = parse_cfg("BB0:\nj L1\nBB1:\nL1:\nb v0, L1, L2\nBB2:\nL2:\nret\n").unwrap();
        let dot = to_dot(&cfg, &RenderOptions::default()).unwrap();
        let expected = r#"digraph CFG {
    graph [rankdir="TB"];
    node [shape="box", fontname="IBM Plex Mono", fontsize="18"];
    edge [fontname="IBM Plex Mono"];
    "BB0" [label="BB0:\lj L1\l"];
    "BB1" [label="BB1:\lL1:\lb v0, L1, L2\l"];
    "BB2" [label="BB2:\lL2:\lret\l"];
    "BB0" -> "BB1" [color="black", weight="0"];
    "BB1" -> "BB1" [color="darkgreen"];
    "BB1" -> "BB2" [color="darkred"];
}
"#;
        assert_eq!(dot, expected);
    }

    #[test]
    fn honours_options() {
        let cfg = parse_cfg("BB0:\n").unwrap();
        let options = RenderOptions {
            font_name: "Fira Code".into(),
            font_size: 11,
            rank_dir: "LR".into(),
            ..Default::default()
        };
        let dot = to_dot(&cfg, &options).unwrap();
        assert!(dot.contains(r#"graph [rankdir="LR"];"#));
        assert!(dot.contains(r#"fontname="Fira Code", fontsize="11""#));
        assert!(!dot.contains("->"));
    }
}
