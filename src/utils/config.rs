//! Session configuration: JSON-backed settings with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::geometry::AxisConvention;
use crate::telemetry::{TelemetryConfig, TransportError};

/// Local-frame construction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameConfig {
    /// How the x axis is derived from the in-plane landmark
    pub axis_convention: AxisConvention,
}

/// Top-level configuration for a guidance session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceConfig {
    /// Feedback receiver settings
    pub telemetry: TelemetryConfig,
    /// Local-frame construction settings
    pub frame: FrameConfig,
    /// Decimal places for the distance read-out label
    pub label_precision: usize,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            telemetry: TelemetryConfig::default(),
            frame: FrameConfig::default(),
            label_precision: 1,
        }
    }
}

impl GuidanceConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: GuidanceConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.telemetry.validate().map_err(ConfigError::from)?;

        if self.label_precision > 6 {
            return Err(ConfigError::InvalidParameter {
                parameter: "label_precision".to_string(),
                value: self.label_precision.to_string(),
                reason: "More than 6 decimal places exceeds tracker resolution".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl From<TransportError> for ConfigError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::ConfigurationError { parameter, value } => {
                ConfigError::InvalidParameter {
                    parameter,
                    value,
                    reason: "Rejected by telemetry transport".to_string(),
                }
            }
            other => ConfigError::InvalidParameter {
                parameter: "telemetry".to_string(),
                value: other.to_string(),
                reason: "Rejected by telemetry transport".to_string(),
            },
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
