//! User configuration (`config.toml`).

use directories::ProjectDirs;
use fixgrid_engine::engine::{DEFAULT_MAX_PASSES, ERROR_MARKER, EvalOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Passes a formula may take before it is reported as diverging
    pub max_passes: usize,
    /// Text stored in a cell whose formula fails
    pub error_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_passes: DEFAULT_MAX_PASSES,
            error_marker: ERROR_MARKER.to_string(),
        }
    }
}

impl Config {
    pub fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            max_passes: self.max_passes,
        }
    }
}

/// Load the config from `config_file`, or the user config dir when absent.
///
/// Problems never stop the program: they are returned as warnings and the
/// defaults apply.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let config = match read_config(&path) {
        Ok(config) => config,
        Err(message) => {
            warnings.push(message);
            Config::default()
        }
    };

    if config.max_passes == 0 {
        warnings.push(format!(
            "{}: max_passes must be at least 1, using {}",
            path.display(),
            DEFAULT_MAX_PASSES
        ));
        return (
            Config {
                max_passes: DEFAULT_MAX_PASSES,
                ..config
            },
            warnings,
        );
    }

    (config, warnings)
}

fn read_config(path: &Path) -> Result<Config, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<Config>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "fixgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
