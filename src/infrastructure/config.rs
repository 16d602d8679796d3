//! Configuration management

use crate::error::{Result, SobrietyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_DATA_FILE: &str = "sobriety_data.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File name of the persisted record inside the data directory
    pub data_file: String,
    /// Where export reports are written (OS temp dir when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Command that receives the export path as its final argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_command: Option<String>,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: DEFAULT_DATA_FILE.to_string(),
            export_dir: None,
            share_command: None,
            log_level: "warn".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load config.toml from the data directory, falling back to defaults when absent
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(SobrietyError::Io(e)),
        };

        toml::from_str(&contents)
            .map_err(|e| SobrietyError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config.toml into the data directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| SobrietyError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Resolve the data directory: explicit flag, then SOBRIETY_HOME, then the platform data dir
    pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Ok(home) = std::env::var("SOBRIETY_HOME") {
            if !home.trim().is_empty() {
                return Ok(PathBuf::from(home));
            }
        }

        dirs::data_dir().map(|dir| dir.join("sobriety")).ok_or_else(|| {
            SobrietyError::Config(
                "Could not determine a data directory. Set SOBRIETY_HOME or pass --data-dir."
                    .to_string(),
            )
        })
    }

    /// Directory export reports are written to
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Get a single config value as displayed by `config <key>`
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "data_file" => Ok(self.data_file.clone()),
            "export_dir" => Ok(self.export_dir().display().to_string()),
            "share_command" => Ok(self.share_command.clone().unwrap_or_default()),
            "log_level" => Ok(self.log_level.clone()),
            "log_format" => Ok(self.log_format.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value; an empty value clears optional keys
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();

        match key {
            "data_file" => {
                let plain = Path::new(value).file_name() == Some(std::ffi::OsStr::new(value));
                if !plain || value.contains(['/', '\\']) {
                    return Err(SobrietyError::Config(format!(
                        "Invalid data_file '{}': expected a plain file name",
                        value
                    )));
                }
                self.data_file = value.to_string();
            }
            "export_dir" => {
                self.export_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "share_command" => {
                self.share_command = (!value.is_empty()).then(|| value.to_string());
            }
            "log_level" => {
                let level = value.to_lowercase();
                if !["error", "warn", "info", "debug", "trace"].contains(&level.as_str()) {
                    return Err(SobrietyError::Config(format!(
                        "Invalid log_level '{}'. Valid levels: error, warn, info, debug, trace",
                        value
                    )));
                }
                self.log_level = level;
            }
            "log_format" => {
                if value != "pretty" && value != "json" {
                    return Err(SobrietyError::Config(format!(
                        "Invalid log_format '{}'. Valid formats: pretty, json",
                        value
                    )));
                }
                self.log_format = value.to_string();
            }
            _ => return Err(unknown_key(key)),
        }

        Ok(())
    }

    /// All keys with their displayed values
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }
}

const KEYS: [&str; 5] = [
    "data_file",
    "export_dir",
    "share_command",
    "log_level",
    "log_format",
];

fn unknown_key(key: &str) -> SobrietyError {
    SobrietyError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        KEYS.join(", ")
    ))
}
