//! Run configuration
//!
//! Everything a run needs, grouped into sections:
//! - Output settings (format, destination, header comments)
//! - Layout settings (resolution, template)
//! - Machine parameters (depth, travel height, bit, feed, dwell, peck policy)
//!
//! Files are TOML or JSON, picked by extension. Missing keys take defaults.

use crate::error::{ConfigError, SettingsError, SettingsResult};
pub use holegrid_camtools::{MachineParameters, PeckPolicy};
use holegrid_core::{Resolution, DEFAULT_DPI};
pub use holegrid_designer::Template;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Output backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// G-Code drilling program
    #[default]
    Nc,
    /// SVG preview
    Svg,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nc => write!(f, "nc"),
            Self::Svg => write!(f, "svg"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nc" | "gcode" | "ngc" => Ok(Self::Nc),
            "svg" => Ok(Self::Svg),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Backend to render with
    pub format: OutputFormat,
    /// Destination file; standard output when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Prefix G-Code output with a comment block
    pub header: bool,
}

/// Layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Drawing units per inch
    pub dpi: i32,
    /// Board template
    pub template: Template,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            template: Template::default(),
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSettings,
    pub layout: LayoutSettings,
    pub machine: MachineParameters,
}

#[derive(Clone, Copy)]
enum FileKind {
    Json,
    Toml,
}

fn file_kind(path: &Path) -> SettingsResult<FileKind> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileKind::Json),
        Some("toml") => Ok(FileKind::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Default config file location (`<config dir>/holegrid/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        Ok(dir.join("holegrid").join("config.toml"))
    }

    /// Load and validate config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config = Self::read_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config from file without validating it, so that further
    /// settings can be layered on top before the final check.
    pub fn read_from_file(path: &Path) -> SettingsResult<Self> {
        let kind = file_kind(path)?;
        let content = std::fs::read_to_string(path)?;
        let load_error = |reason: String| SettingsError::LoadError {
            path: path.display().to_string(),
            reason,
        };

        let config: Self = match kind {
            FileKind::Json => serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?,
            FileKind::Toml => toml::from_str(&content).map_err(|e| load_error(e.to_string()))?,
        };

        debug!(path = %path.display(), "Read config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let kind = file_kind(path)?;
        let save_error = |reason: String| SettingsError::SaveError {
            path: path.display().to_string(),
            reason,
        };

        let content = match kind {
            FileKind::Json => {
                serde_json::to_string_pretty(self).map_err(|e| save_error(e.to_string()))?
            }
            FileKind::Toml => toml::to_string_pretty(self).map_err(|e| save_error(e.to_string()))?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.resolution()?;
        self.machine.validate()?;

        if let Some(path) = &self.output.path {
            if path.as_os_str().is_empty() {
                return Err(SettingsError::InvalidSetting {
                    key: "output.path".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Layout resolution
    pub fn resolution(&self) -> SettingsResult<Resolution> {
        Ok(Resolution::new(self.layout.dpi)?)
    }
}
