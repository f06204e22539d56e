use anyhow::Result;
use asmid::commands::{classify_command, clean_command, demo_command, fingerprint_command};
use asmid::init_logging;
use asmid_core::demo::DEFAULT_DEMO_COPIES;
use clap::{Parser, Subcommand};

/// Infer the source language of compiled functions from their disassembly.
///
/// This CLI is a thin wrapper around `asmid-core` (exposed in code as `asmid_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "asmid",
    version,
    about = "Infer the source language of a function from its assembly",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on the built-in C / C++ / Python / Go snippets and classify each one.
    Demo {
        /// Copies of each snippet in the training set.
        #[arg(long, default_value_t = DEFAULT_DEMO_COPIES)]
        copies: usize,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Train from a manifest and classify an assembly file.
    ///
    /// The manifest is YAML or JSON and lists labeled samples, either as
    /// paths relative to the manifest or as inline code.
    Classify {
        /// Training manifest (.yaml, .yml, or .json).
        #[arg(long)]
        manifest: String,

        /// Assembly listing to classify.
        #[arg(long)]
        input: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the named fingerprint slots of an assembly file.
    Fingerprint {
        /// Assembly listing to fingerprint.
        #[arg(long)]
        input: String,

        /// Emit JSON (slots plus full counter profile) instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Strip blank, comment (`#`), and directive (`.`) lines from compiler output.
    Clean {
        /// Raw assembly as emitted by the compiler.
        #[arg(long)]
        input: String,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Default to the demo when no command is given.
    match cli.command.unwrap_or(Command::Demo { copies: DEFAULT_DEMO_COPIES, json: false }) {
        Command::Demo { copies, json } => demo_command(copies, json)?,
        Command::Classify { manifest, input, json } => classify_command(&manifest, &input, json)?,
        Command::Fingerprint { input, json } => fingerprint_command(&input, json)?,
        Command::Clean { input, output } => clean_command(&input, output)?,
    }

    Ok(())
}
