use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::command::Options;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub width: Option<usize>,
    pub scan_window: Option<usize>,
    pub json: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            width: other.width.or(self.width),
            scan_window: other.scan_window.or(self.scan_window),
            json: self.json || other.json,
        }
    }

    /// Command options, with defaults for anything left unset.
    pub fn options(&self) -> Options {
        let defaults = Options::default();
        Options {
            width: self.width.unwrap_or(defaults.width),
            scan_window: self.scan_window.unwrap_or(defaults.scan_window),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("docreflow").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("docreflow")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("docreflow").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("docreflow")
                .join("config");
        }
    }

    PathBuf::from(".docreflowrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".docreflowrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# docreflow defaults (saved with --save)".to_string());
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(window) = flags.scan_window {
        lines.push(format!("--scan-window {window}"));
    }
    if flags.json {
        lines.push("--json".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--json" {
            flags.json = true;
        } else if token == "--width" {
            if let Some(next) = tokens.get(i + 1) {
                flags.width = parse_count(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--width=") {
            flags.width = parse_count(value);
        } else if token == "--scan-window" {
            if let Some(next) = tokens.get(i + 1) {
                flags.scan_window = parse_count(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--scan-window=") {
            flags.scan_window = parse_count(value);
        }
        i += 1;
    }
    flags
}

// Zero would make every scan or wrap degenerate.
fn parse_count(s: &str) -> Option<usize> {
    s.parse().ok().filter(|n| *n > 0)
}
