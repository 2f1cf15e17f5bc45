//! Supporting helpers for console output.
//!
//! Severity prefixes match the host tool's console palette: warnings in
//! magenta, once-warnings bold magenta, errors bold red, notes bold
//! white. Colors are disabled when `NO_COLOR` is set.

use owo_colors::OwoColorize;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn warning_prefix() -> String {
    if colors_enabled() {
        "WARNING:".magenta().to_string()
    } else {
        "WARNING:".to_string()
    }
}

pub fn warning_once_prefix() -> String {
    if colors_enabled() {
        "WARNING ONCE:".magenta().bold().to_string()
    } else {
        "WARNING ONCE:".to_string()
    }
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "ERROR:".red().bold().to_string()
    } else {
        "ERROR:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "NOTE:".white().bold().to_string()
    } else {
        "NOTE:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "INFO:".blue().bold().to_string()
    } else {
        "INFO:".to_string()
    }
}
