use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".acdrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Phases known up front. Dependencies on these never count as dangling,
    /// even when no scanned record declares them.
    #[serde(default)]
    pub declared_phases: Vec<String>,
    #[serde(default = "default_required_tags")]
    pub required_tags: Vec<String>,
    #[serde(default = "default_status_values")]
    pub status_values: Vec<String>,
    #[serde(default = "default_complexity_values")]
    pub complexity_values: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    [
        "c", "cpp", "cc", "cxx", "h", "hpp", "hxx", "cu", "cuh", "rs", "py", "js", "ts",
    ]
    .map(String::from)
    .to_vec()
}

fn default_required_tags() -> Vec<String> {
    ["AI_PHASE", "AI_STATUS"].map(String::from).to_vec()
}

fn default_status_values() -> Vec<String> {
    ["IMPLEMENTED", "PARTIAL", "NOT_STARTED", "FIXED", "DEPRECATED"]
        .map(String::from)
        .to_vec()
}

fn default_complexity_values() -> Vec<String> {
    ["LOW", "MEDIUM", "HIGH", "CRITICAL"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: Vec::new(),
            extensions: default_extensions(),
            declared_phases: Vec::new(),
            required_tags: default_required_tags(),
            status_values: default_status_values(),
            complexity_values: default_complexity_values(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Include patterns without wildcards are treated as literal directory
        // paths, so bracketed directory names stay valid without escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
