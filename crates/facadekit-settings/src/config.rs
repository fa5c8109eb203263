//! Configuration management for FacadeKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, with a default file in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Connection settings (retry schedule, offline document)
//! - Layer assignments (shape sets, default and audit layers)
//! - Facade parameters
//! - Geometry repair, viewport and report settings
//!
//! Each pass receives its own options structure built from these sections.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use facadekit_cadtools::{
    AuditOptions, RepairOptions, ReportOptions, SyncOptions, ViewportOptions,
};
use facadekit_communication::RetryPolicy;
use facadekit_core::DrawingUnits;
use facadekit_designer::{FacadeParameters, ShapeSetKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Connection attempts before giving up, including the first
    pub max_attempts: u32,
    /// Fixed pause between attempts in milliseconds
    pub retry_delay_ms: u64,
    /// Offline document file
    pub document: Option<PathBuf>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay_ms: 2000,
            document: None,
        }
    }
}

/// Layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSettings {
    pub windows: String,
    pub doors: String,
    pub valleys: String,
    pub stair_windows: String,
    pub outline: String,
    /// Layer the auditor empties
    pub default_layer: String,
    /// Layer stray objects are moved to
    pub audit_layer: String,
    /// ACI colour of a newly created audit layer
    pub audit_layer_color: u8,
    /// Create target layers that do not exist before sending
    pub create_missing: bool,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self {
            windows: "A-GLAZ".to_string(),
            doors: "A-DOOR".to_string(),
            valleys: "A-WALL-INT".to_string(),
            stair_windows: "A-GLAZ".to_string(),
            outline: "A-ELEV".to_string(),
            default_layer: "0".to_string(),
            audit_layer: "AUDIT_REQUIRED".to_string(),
            audit_layer_color: 30,
            create_missing: false,
        }
    }
}

impl LayerSettings {
    /// Target layer of a shape set
    pub fn layer_for(&self, kind: ShapeSetKind) -> &str {
        match kind {
            ShapeSetKind::Windows => &self.windows,
            ShapeSetKind::Doors => &self.doors,
            ShapeSetKind::Valleys => &self.valleys,
            ShapeSetKind::StairWindows => &self.stair_windows,
            ShapeSetKind::Outline => &self.outline,
        }
    }

    pub fn assignments(&self) -> BTreeMap<ShapeSetKind, String> {
        ShapeSetKind::ALL
            .iter()
            .map(|&kind| (kind, self.layer_for(kind).to_string()))
            .collect()
    }

    /// Shape sets assigned to `layer`, compared case-insensitively
    pub fn sets_for_layer(&self, layer: &str) -> Vec<ShapeSetKind> {
        ShapeSetKind::ALL
            .iter()
            .copied()
            .filter(|&kind| self.layer_for(kind).eq_ignore_ascii_case(layer))
            .collect()
    }
}

/// Geometry repair settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairSettings {
    /// Command line that runs the bulk join
    pub join_command: String,
    /// Longest wait for the join, in milliseconds
    pub settle_ms: u64,
    /// Completion polling interval, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for RepairSettings {
    fn default() -> Self {
        Self {
            join_command: "_SELALL _JOIN \n".to_string(),
            settle_ms: 2000,
            poll_interval_ms: 250,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Viewports are scaled 1 : scale_denominator
    pub scale_denominator: f64,
    pub lock_display: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            scale_denominator: 50.0,
            lock_display: true,
        }
    }
}

/// Report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub output_directory: PathBuf,
    pub author: String,
    pub drawing_units: DrawingUnits,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_directory: dirs::document_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join("FacadeKit"),
            author: String::new(),
            drawing_units: DrawingUnits::default(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionSettings,
    pub layers: LayerSettings,
    pub facade: FacadeParameters,
    pub repair: RepairSettings,
    pub viewports: ViewportSettings,
    pub report: ReportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file: `<config dir>/facadekit/config.toml`
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("facadekit").join("config.toml"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform("no configuration directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.connection.max_attempts == 0 {
            return Err(ConfigError::out_of_range(
                "connection.max_attempts",
                self.connection.max_attempts,
            ));
        }

        let layers = [
            ("layers.windows", &self.layers.windows),
            ("layers.doors", &self.layers.doors),
            ("layers.valleys", &self.layers.valleys),
            ("layers.stair_windows", &self.layers.stair_windows),
            ("layers.outline", &self.layers.outline),
            ("layers.default_layer", &self.layers.default_layer),
            ("layers.audit_layer", &self.layers.audit_layer),
        ];
        for (key, name) in layers {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "layer name must not be empty".to_string(),
                });
            }
        }
        if self
            .layers
            .audit_layer
            .eq_ignore_ascii_case(&self.layers.default_layer)
        {
            return Err(ConfigError::InvalidValue {
                key: "layers.audit_layer".to_string(),
                reason: "must differ from the default layer".to_string(),
            });
        }

        self.facade.validate()?;

        if self.repair.join_command.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "repair.join_command".to_string(),
                reason: "command must not be empty".to_string(),
            });
        }
        if self.repair.poll_interval_ms == 0 {
            return Err(ConfigError::out_of_range(
                "repair.poll_interval_ms",
                self.repair.poll_interval_ms,
            ));
        }

        let scale = self.viewports.scale_denominator;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::out_of_range("viewports.scale_denominator", scale));
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.connection.max_attempts,
            Duration::from_millis(self.connection.retry_delay_ms),
        )
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            create_missing: self.layers.create_missing,
        }
    }

    pub fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            default_layer: self.layers.default_layer.clone(),
            audit_layer: self.layers.audit_layer.clone(),
            audit_layer_color: Some(self.layers.audit_layer_color),
        }
    }

    pub fn repair_options(&self) -> RepairOptions {
        RepairOptions {
            join_command: self.repair.join_command.clone(),
            settle: Duration::from_millis(self.repair.settle_ms),
            poll_interval: Duration::from_millis(self.repair.poll_interval_ms),
        }
    }

    pub fn viewport_options(&self) -> ViewportOptions {
        ViewportOptions {
            scale_denominator: self.viewports.scale_denominator,
            lock_display: self.viewports.lock_display,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            author: self.report.author.clone(),
            units: self.report.drawing_units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.repair_options(), RepairOptions::default());
        assert_eq!(config.audit_options(), AuditOptions::default());
        assert_eq!(config.viewport_options(), ViewportOptions::default());
    }

    #[test]
    fn test_sets_for_layer() {
        let layers = LayerSettings::default();
        assert_eq!(
            layers.sets_for_layer("a-glaz"),
            vec![ShapeSetKind::Windows, ShapeSetKind::StairWindows]
        );
        assert_eq!(layers.sets_for_layer("A-DOOR"), vec![ShapeSetKind::Doors]);
        assert!(layers.sets_for_layer("FURNITURE").is_empty());
        assert_eq!(layers.assignments()[&ShapeSetKind::Valleys], "A-WALL-INT");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.connection.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { .. })
        ));

        let mut config = Config::default();
        config.layers.doors = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = Config::default();
        config.layers.audit_layer = "0".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.viewports.scale_denominator = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.facade.width = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Facade(_))));
    }
}
