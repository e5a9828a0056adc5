use std::{io::Write, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use log::{error, LevelFilter};

use irgraph::{
    render::{self, OutputFormat, RenderOptions},
    IrGraphError,
};

/// Draw the control-flow graph of a basic-block IR listing.
#[derive(Debug, Parser)]
#[command(name = "irgraph", version)]
struct Cli {
    /// IR listing to read, must end in `.ir`
    input: PathBuf,
    /// Output format, `png` unless set here or in the options file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
    /// Output file, defaults to `<input>.graph.<format>`
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON file with render options
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Node and edge font
    #[arg(long)]
    font: Option<String>,
    #[arg(long)]
    font_size: Option<u32>,
    /// Graphviz executable
    #[arg(long)]
    dot: Option<PathBuf>,
    /// More logging, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Result<RenderOptions, IrGraphError> {
        let mut options = match &self.config {
            Some(path) => RenderOptions::from_file(path)?,
            None => RenderOptions::default(),
        };
        if let Some(format) = self.format {
            options.format = format;
        }
        if let Some(font) = &self.font {
            options.font_name = font.clone();
        }
        if let Some(size) = self.font_size {
            options.font_size = size;
        }
        if let Some(dot) = &self.dot {
            options.dot_binary = dot.clone();
        }
        Ok(options)
    }
}

fn run(cli: &Cli) -> Result<PathBuf, IrGraphError> {
    let options = cli.options()?;
    let cfg = irgraph::load(&cli.input)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| render::output_path(&cli.input, options.format));
    render::emit(&cfg, &options, &output)?;
    Ok(output)
}

fn report(e: &IrGraphError, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "irgraph: {e}")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            // stays visible with RUST_LOG=off
            let _ = report(&e, &mut std::io::stderr());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::report;
    use irgraph::IrGraphError;

    #[test]
    fn report_names_the_input() {
        let mut out = Vec::new();
        let e = IrGraphError::UnsupportedExtension(PathBuf::from("prog.txt"));
        report(&e, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "irgraph: Unsupported input prog.txt: expected a `.ir` file\n");
    }

    #[test]
    fn report_carries_io_cause() {
        let mut out = Vec::new();
        let e = irgraph::load("/nonexistent/prog.ir").unwrap_err();
        report(&e, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("irgraph: Failed to read /nonexistent/prog.ir: "));
    }
}
