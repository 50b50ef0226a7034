use std::io::Read;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug};

use erd::{Diagram, Format};

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Mermaid,
    Dot,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Mermaid => Format::Mermaid,
            OutputFormat::Dot => Format::Dot,
        }
    }
}

#[derive(Parser)]
#[command(name = "erd", about = "Render entity relationship diagrams as Mermaid or Graphviz DOT")]
struct Cli {
    /// JSON input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Output notation
    #[arg(long, short = 'f', value_enum, default_value = "mermaid")]
    format: OutputFormat,

    /// Treat the input as scanned type metadata instead of a diagram
    #[arg(long)]
    schema: bool,

    /// Diagram title when building from type metadata
    #[arg(long, default_value = "ERD")]
    title: String,

    /// Only validate; print diagnostics and exit non-zero if any
    #[arg(long)]
    check: bool,

    /// Refuse to render a diagram that fails validation
    #[arg(long)]
    strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let loaded = if cli.schema {
        erd::schema::from_json(&cli.title, &input)
    } else {
        Diagram::from_json(&input)
    };
    let diagram = loaded.unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    });
    debug!("loaded diagram `{}`", diagram.title);

    if cli.check {
        if let Err(erd::Error::Invalid(errors)) = erd::check(&diagram) {
            for err in &errors {
                println!("{err}");
            }
            std::process::exit(1);
        }
        return;
    }

    let format = Format::from(cli.format);
    if cli.strict {
        if let Err(erd::Error::Invalid(errors)) = erd::check(&diagram) {
            for err in &errors {
                eprintln!("ERROR: {err}");
            }
            std::process::exit(1);
        }
    }
    print!("{}", erd::render(&diagram, format));
}
