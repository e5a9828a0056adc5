use std::{
    io::Write,
    path::Path,
    process::{Command, Stdio},
    thread,
};

use log::debug;

use super::{RenderError, RenderOptions};

/// Feed DOT text to the Graphviz executable and write the image to `output`.
///
/// Stdin is written from a separate thread while stderr is collected, so a
/// chatty `dot` cannot block on a full pipe. When `dot` fails its exit status
/// and stderr are reported, even if it stopped reading its input early.
pub fn render_image(dot: &str, options: &RenderOptions, output: &Path) -> Result<(), RenderError> {
    let Some(format) = options.format.graphviz_format() else {
        return Err(RenderError::NotAnImage(options.format));
    };
    let binary = &options.dot_binary;
    debug!(
        "{} -T{format} -o {}",
        binary.display(),
        output.display()
    );
    let mut child = Command::new(binary)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RenderError::Spawn {
            binary: binary.clone(),
            source,
        })?;
    let writer = child.stdin.take().map(|mut stdin| {
        let dot = dot.to_owned();
        thread::spawn(move || stdin.write_all(dot.as_bytes()))
    });
    let io_error = |source| RenderError::Io {
        path: binary.clone(),
        source,
    };
    let result = child.wait_with_output().map_err(io_error)?;
    let written = match writer.map(|handle| handle.join()) {
        Some(Ok(written)) => written,
        Some(Err(_)) => Err(std::io::Error::other("stdin writer panicked")),
        None => Ok(()),
    };
    if !result.status.success() {
        return Err(RenderError::Graphviz {
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    written.map_err(io_error)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::render_image;
    use crate::render::{OutputFormat, RenderError, RenderOptions};

    #[test]
    fn refuses_text_formats() {
        let options = RenderOptions {
            format: OutputFormat::Json,
            ..Default::default()
        };
        assert!(matches!(
            render_image("digraph CFG {}", &options, Path::new("out.json")),
            Err(RenderError::NotAnImage(OutputFormat::Json))
        ));
    }

    #[test]
    fn missing_binary_is_reported() {
        let options = RenderOptions {
            dot_binary: "/nonexistent/irgraph-dot".into(),
            ..Default::default()
        };
        assert!(matches!(
            render_image("digraph CFG {}", &options, Path::new("out.png")),
            Err(RenderError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_status() {
        let options = RenderOptions {
            dot_binary: "false".into(),
            ..Default::default()
        };
        let mut dot = String::from("digraph CFG {\n");
        for i in 0..40_000 {
            dot.push_str(&format!("    \"BB{i}\" [label=\"BB{i}:\\lret\\l\"];\n"));
        }
        dot.push_str("}\n");
        assert!(dot.len() > 1 << 20);
        match render_image(&dot, &options, Path::new("out.png")) {
            Err(RenderError::Graphviz { status, .. }) => assert!(!status.success()),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
