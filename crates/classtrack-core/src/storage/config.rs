//! TOML-based application configuration.
//!
//! Stores display preferences for the timeline widget:
//! - Display window (first and last hour shown)
//! - Lane width mode
//! - Event box padding and minimum height
//! - Canvas size
//!
//! Configuration is stored at `~/.config/classtrack/config.toml`.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::timeline::{DisplayWindow, LaneWidth, Padding, Rect};

/// Timeline range and lane behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_day_start")]
    pub day_start: NaiveTime,
    #[serde(default = "default_day_end")]
    pub day_end: NaiveTime,
    #[serde(default)]
    pub lane_width: LaneWidth,
}

/// Canvas the timeline is drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f64,
    #[serde(default = "default_canvas_height")]
    pub height: f64,
    /// Space kept free around the timeline for hour labels.
    #[serde(default = "default_canvas_margin")]
    pub margin: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/classtrack/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Staff/room directory JSON used to fill secondary labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

fn default_day_start() -> NaiveTime {
    DisplayWindow::default().start()
}
fn default_day_end() -> NaiveTime {
    DisplayWindow::default().end()
}
fn default_canvas_width() -> f64 {
    600.0
}
fn default_canvas_height() -> f64 {
    400.0
}
fn default_canvas_margin() -> f64 {
    50.0
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            day_end: default_day_end(),
            lane_width: LaneWidth::default(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            margin: default_canvas_margin(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: None,
            timeline: TimelineConfig::default(),
            padding: Padding::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let new_value = match obj.get(part) {
                Some(serde_json::Value::Number(_)) => value
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                Some(serde_json::Value::Bool(_)) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                Some(serde_json::Value::Object(_) | serde_json::Value::Array(_)) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                Some(_) => serde_json::Value::String(value.into()),
                // Optional keys are absent from the serialized form when unset.
                None if key == "directory" => serde_json::Value::String(value.into()),
                None => return Err(unknown()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result is not a valid configuration.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window().map_err(|e| ConfigError::InvalidValue {
            key: "timeline.day_end".into(),
            message: e.to_string(),
        })?;
        if self.padding.min_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "padding.min_height".into(),
                message: "must be positive".into(),
            });
        }
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "canvas".into(),
                message: "width and height must be positive".into(),
            });
        }
        Ok(())
    }

    /// The configured display window.
    ///
    /// # Errors
    /// Returns an error if `day_end` is not after `day_start`.
    pub fn window(&self) -> Result<DisplayWindow, ValidationError> {
        DisplayWindow::new(self.timeline.day_start, self.timeline.day_end)
    }

    /// The canvas area left for event boxes once the margin is removed.
    pub fn timeline_rect(&self) -> Rect {
        let margin = self.canvas.margin.max(0.0);
        Rect::new(
            margin,
            margin,
            (self.canvas.width - 2.0 * margin).max(0.0),
            (self.canvas.height - 2.0 * margin).max(0.0),
        )
    }
}
