//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fireport",
    version,
    about = "Firehose report generator",
    long_about = "Fireport — convert free-text analyzer diagnostics into Firehose XML reports.\n\nConfiguration precedence: CLI > fireport.toml > defaults.",
    after_help = "Examples:\n  fireport convert --input 'klee-out/warnings.txt'\n  fireport convert --input 'logs/*.log' --report out/firehose.xml --output json\n  fireport convert --input messages.txt --no-report",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current fireport version."
    )]
    Version,
    /// Convert diagnostic logs into a Firehose report
    #[command(
        about = "Convert diagnostics to Firehose XML",
        long_about = "Read host diagnostic logs, classify each WARNING/NOTE/ERROR line, and append the corresponding <info>/<failure> element to the report. The document is finalized on completion and on the first fatal error.",
        after_help = "Examples:\n  fireport convert --input 'klee-out/warnings.txt'\n  fireport convert --input 'logs/*.log' --output json"
    )]
    Convert {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Input log glob pattern (repeatable)")]
        input: Vec<String>,
        #[arg(long, help = "Report output path (default: firehose.xml)")]
        report: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Classify and summarize without writing the report")]
        no_report: bool,
    },
}
