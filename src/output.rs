//! Output rendering for the convert command.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-category counts and a top-level summary.

use crate::models::ConvertSummary;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print conversion results in the requested format.
pub fn print_convert(summary: &ConvertSummary, output: &str, errors: &[String]) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_convert_json(summary, errors)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for e in errors {
                if color {
                    eprintln!("{} {}", "⟦error⟧".red().bold(), e);
                } else {
                    eprintln!("⟦error⟧ {}", e);
                }
            }
            for (id, count) in &summary.categories {
                if color {
                    println!("◆ ❲{}❳ × {}", id.bold(), count);
                } else {
                    println!("◆ ❲{}❳ × {}", id, count);
                }
            }
            if let Some(report) = &summary.report {
                if color {
                    println!("{} {}", "📄 report:".green().bold(), report.bold());
                } else {
                    println!("📄 report: {}", report);
                }
            }
            let line = format!(
                "— Summary — infos={} failures={} messages={} files={}",
                summary.infos, summary.failures, summary.messages, summary.files
            );
            if color {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Compose the convert JSON object (pure) for testing/snapshot purposes.
pub fn compose_convert_json(summary: &ConvertSummary, errors: &[String]) -> JsonVal {
    json!({
        "summary": serde_json::to_value(summary).unwrap(),
        "errors": errors,
    })
}
