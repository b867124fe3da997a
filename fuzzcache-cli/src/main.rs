use anyhow::Result;
use clap::{Parser, Subcommand};
use fuzzcache_cli::commands;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fuzzcache")]
#[command(
    about = "Fuzzcache - Move Go fuzz seeds between the fuzz cache and testdata",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge Go fuzz cache entries into consolidated .fuzz files
    Pack {
        /// Go fuzz cache directory (one subdirectory per fuzz target)
        native_dir: String,

        /// Directory holding <target>.fuzz corpus files
        corpus_dir: String,

        /// Write a JSON summary of the run to this file
        #[arg(long)]
        report: Option<String>,
    },

    /// Regenerate Go fuzz cache entries from consolidated .fuzz files
    Unpack {
        /// Go fuzz cache directory (one subdirectory per fuzz target)
        native_dir: String,

        /// Directory holding <target>.fuzz corpus files
        corpus_dir: String,

        /// Remove cache entries that are not in the corpus file
        #[arg(long)]
        prune: bool,

        /// Write a JSON summary of the run to this file
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    // Usage errors exit with status 1; --help and --version exit normally
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            process::exit(1);
        }
        Err(err) => err.exit(),
    };

    // Setup logging; stdout is reserved for progress output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Pack {
            native_dir,
            corpus_dir,
            report,
        } => commands::pack::execute(&native_dir, &corpus_dir, report.as_deref()),

        Commands::Unpack {
            native_dir,
            corpus_dir,
            prune,
            report,
        } => commands::unpack::execute(&native_dir, &corpus_dir, prune, report.as_deref()),
    }
}
