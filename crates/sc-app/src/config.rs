//! Browser configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

fn default_state_dir() -> PathBuf {
    PathBuf::from(".simcat")
}

/// YAML configuration:
///
/// ```yaml
/// records: data/simulations.json
/// machines: data/machines.json
/// state_dir: .simcat
/// highlight_differences: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub records: PathBuf,
    #[serde(default)]
    pub machines: Option<PathBuf>,
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    #[serde(default)]
    pub highlight_differences: bool,
}

impl BrowserConfig {
    pub fn new(records: PathBuf) -> Self {
        Self {
            records,
            machines: None,
            state_dir: default_state_dir(),
            highlight_differences: false,
        }
    }

    /// Make relative paths relative to `base` instead of the working
    /// directory.
    pub fn resolve_against(mut self, base: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        self.records = resolve(self.records);
        self.machines = self.machines.map(resolve);
        self.state_dir = resolve(self.state_dir);
        self
    }
}

pub fn parse_config(content: &str) -> AppResult<BrowserConfig> {
    let config: BrowserConfig = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    Ok(config)
}

/// Load a config file, resolving its paths against the file's directory.
pub fn load_config(path: &Path) -> AppResult<BrowserConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_against(base))
}
