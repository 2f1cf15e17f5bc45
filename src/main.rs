//! Fireport CLI binary entry point.
//! Delegates to modules for conversion and prints results.

mod classify;
mod cli;
mod config;
mod convert;
mod emit;
mod models;
mod output;
mod report;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};
use emit::Emitter;
use models::firehose::Generator;
use report::Reporter;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Convert {
            root,
            input,
            report,
            output,
            no_report,
        } => {
            let eff = config::resolve_effective(
                root.as_deref(),
                &input,
                report.as_deref(),
                output.as_deref(),
                if no_report { Some(false) } else { None },
            );
            // Require input patterns to be configured (no default)
            if !eff.input_configured {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    "No input patterns. Pass --input or add fireport.toml."
                );
                std::process::exit(2);
            }
            // Friendly note if no fireport config was found
            if eff.output != "json" && config::load_config(&eff.root).is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No fireport.toml found; using defaults."
                );
            }
            let report_path = eff.root.join(&eff.report_path);
            let generator = Generator::new(&eff.generator_name, &eff.generator_version);
            let emitter = Emitter::new(&report_path, generator, eff.enabled);
            let echo = eff.output != "json";
            let mut reporter = Reporter::new(emitter, echo);
            match convert::run_convert(&eff.root, &eff.input, &mut reporter) {
                Ok((summary, errors)) => {
                    let failed = summary.failures > 0;
                    output::print_convert(&summary, &eff.output, &errors);
                    if failed {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("cannot write report '{}': {}", report_path.display(), e)
                    );
                    std::process::exit(2);
                }
            }
        }
    }
}
