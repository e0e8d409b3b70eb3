use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration for the shim.
///
/// Loaded from `~/.config/cornice/config.toml`. Missing sections fall
/// back to defaults thanks to `#[serde(default)]`. A shim loaded into a
/// host application has no command line, so the config file (plus the
/// `CORNICE_LOG` environment variable) is the whole tuning surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging settings.
    pub log: LogConfig,
}

/// Returns the config directory: `~/.config/cornice/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("cornice"))
}

/// Returns the config file path: `~/.config/cornice/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing what
/// went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let config: Config =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing or malformed file silently yields the defaults; the shim
/// must never fail host startup over its own tuning file.
pub fn load() -> Config {
    try_load().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_logging_disabled() {
        let config = Config::default();

        assert!(!config.log.enabled);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.max_file_mb, 10);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let toml_str = "[log]\nenabled = true\n";

        let config: Config = toml::from_str(toml_str).unwrap();

        assert!(config.log.enabled);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn empty_toml_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(!config.log.enabled);
    }
}
