//! Configuration schema types for `zenflip.toml`
//!
//! Defines the structure and validation rules for flip settings.

use serde::{Deserialize, Serialize};

use crate::rewrite::STANDARD_KINDS;
use crate::transforms::AxisFlip;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Aligned plain text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{}' (expected text or json)", other)),
        }
    }
}

/// Which axes to mirror
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipConfig {
    /// Axis letters, e.g. "x" or "xz"
    #[serde(default = "default_axes")]
    pub axes: String,
    /// Also reflect rotation matrices and keyframe quaternions
    #[serde(default)]
    pub rotation: bool,
}

fn default_axes() -> String {
    "x".to_string()
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self { axes: default_axes(), rotation: false }
    }
}

/// Field kinds to leave alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldsConfig {
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Reporting settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Log per-match diagnostics
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub format: ReportFormat,
}

/// Complete zenflip.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZenflipConfig {
    #[serde(default)]
    pub flip: FlipConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "flip.axes")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zenflip.toml: '{}' {}", self.field, self.message)
    }
}

impl ZenflipConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = AxisFlip::from_axes(&self.flip.axes) {
            errors.push(ConfigValidationError {
                field: "flip.axes".to_string(),
                message: e.to_string(),
            });
        }

        for name in &self.fields.disabled {
            if !STANDARD_KINDS.contains(&name.as_str()) {
                errors.push(ConfigValidationError {
                    field: "fields.disabled".to_string(),
                    message: format!(
                        "unknown field kind '{}' (known: {})",
                        name,
                        STANDARD_KINDS.join(", ")
                    ),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Flip selection described by the `[flip]` section.
    pub fn axis_flip(&self) -> Result<AxisFlip, crate::transforms::TransformError> {
        Ok(AxisFlip::from_axes(&self.flip.axes)?.with_rotation(self.flip.rotation))
    }
}
