//! Configuration discovery and effective settings resolution.
//!
//! Fireport reads `fireport.toml|yaml|yml` from the start directory (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `output`: `human`
//! - `report.path`: `firehose.xml`
//! - `report.enabled`: true
//! - `generator.name|version`: the fireport crate name and version
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Report emission section under `[report]`.
pub struct ReportCfg {
    pub path: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Generator identity section under `[generator]`.
pub struct GeneratorCfg {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `fireport.toml|yaml`.
pub struct FireportConfig {
    pub output: Option<String>,
    pub input: Option<Vec<String>>,
    pub report: Option<ReportCfg>,
    pub generator: Option<GeneratorCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub output: String,
    pub input: Vec<String>,
    pub input_configured: bool,
    pub report_path: String,
    pub enabled: bool,
    pub generator_name: String,
    pub generator_version: String,
}

/// Walk upward from `start` to detect the working root.
///
/// Stops when a `fireport.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("fireport.toml").exists()
            || cur.join("fireport.yaml").exists()
            || cur.join("fireport.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `FireportConfig` from `fireport.toml` or `fireport.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<FireportConfig> {
    let toml_path = root.join("fireport.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: FireportConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["fireport.yaml", "fireport.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: FireportConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_input: &[String],
    cli_report: Option<&str>,
    cli_output: Option<&str>,
    cli_enabled: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root).unwrap_or_default();

    let (input, input_configured) = if !cli_input.is_empty() {
        (cli_input.to_vec(), true)
    } else {
        match cfg.input {
            Some(pats) if !pats.is_empty() => (pats, true),
            _ => (Vec::new(), false),
        }
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let report_path = cli_report
        .map(|s| s.to_string())
        .or_else(|| cfg.report.as_ref().and_then(|r| r.path.clone()))
        .unwrap_or_else(|| "firehose.xml".to_string());

    let enabled = cli_enabled
        .or_else(|| cfg.report.as_ref().and_then(|r| r.enabled))
        .unwrap_or(true);

    let generator_name = cfg
        .generator
        .as_ref()
        .and_then(|g| g.name.clone())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let generator_version = cfg
        .generator
        .as_ref()
        .and_then(|g| g.version.clone())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    Effective {
        root,
        output,
        input,
        input_configured,
        report_path,
        enabled,
        generator_name,
        generator_version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("fireport.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
input = ["logs/*.log"]
[report]
path = "out/firehose.xml"
enabled = true
[generator]
name = "klee"
version = "1.2.0"
    "#
        )
        .unwrap();

        // Resolve using explicit root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), &[], None, None, None);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.input, vec!["logs/*.log".to_string()]);
        assert!(eff.input_configured);
        assert_eq!(eff.report_path, "out/firehose.xml");
        assert!(eff.enabled);
        assert_eq!(eff.generator_name, "klee");
        assert_eq!(eff.generator_version, "1.2.0");
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("fireport.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
report:
  enabled: false
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), &[], None, None, None);
        assert_eq!(eff.output, "human");
        assert!(!eff.enabled);
        // path and generator fall back to defaults
        assert_eq!(eff.report_path, "firehose.xml");
        assert_eq!(eff.generator_name, "fireport");
        assert!(!eff.input_configured);
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("fireport.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
input = ["warnings.txt"]
[report]
path = "a.xml"
enabled = true
            "#
        )
        .unwrap();

        let cli_input = vec!["messages.txt".to_string()];
        let eff = resolve_effective(
            root.to_str(),
            &cli_input,
            Some("b.xml"),
            Some("human"),
            Some(false),
        );
        assert_eq!(eff.output, "human");
        assert_eq!(eff.input, cli_input);
        assert_eq!(eff.report_path, "b.xml");
        assert!(!eff.enabled);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), &[], None, None, None);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.report_path, "firehose.xml");
        assert!(eff.enabled);
        assert!(!eff.input_configured);
    }
}
