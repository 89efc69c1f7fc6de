//! Copy button options
//!
//! Decoded from a plain JS object (camelCase keys). Every field is optional
//! and falls back to the page-load defaults: `#copy-btn` copies the text of
//! `#plain-data`, flashing green for 100ms.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::errors::WidgetError;
use crate::utils::color::Color;

pub const DEFAULT_TRIGGER_ID: &str = "copy-btn";
pub const DEFAULT_SOURCE_ID: &str = "plain-data";
pub const DEFAULT_RESET_DELAY_MS: u32 = 100;

/// What happens to a reset that is still pending when the button flashes again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// Let every reset fire; an earlier reset can cut a later flash short
    #[default]
    Overlap,
    /// Cancel the earlier reset; the latest flash always lasts the full delay
    CancelPending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub trigger_id: String,
    pub source_id: String,
    pub success_color: Color,
    pub idle_color: Color,
    /// Flash shown when the clipboard rejects the write. `None` keeps the
    /// button unchanged on failure.
    pub failure_color: Option<Color>,
    pub reset_delay_ms: u32,
    pub reset_policy: ResetPolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            trigger_id: DEFAULT_TRIGGER_ID.to_string(),
            source_id: DEFAULT_SOURCE_ID.to_string(),
            success_color: Color::SUCCESS,
            idle_color: Color::IDLE,
            failure_color: None,
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            reset_policy: ResetPolicy::Overlap,
        }
    }
}

impl WidgetConfig {
    /// Decode options passed from JavaScript; `undefined` or `null` means defaults
    pub fn from_js(value: JsValue) -> Result<Self, WidgetError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| WidgetError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.trigger_id.trim().is_empty() {
            return Err(WidgetError::InvalidConfig("triggerId must not be empty".to_string()));
        }
        if self.source_id.trim().is_empty() {
            return Err(WidgetError::InvalidConfig("sourceId must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Console log level from an optional name, defaulting to info
pub fn parse_log_level(level: Option<&str>) -> log::Level {
    level
        .and_then(|name| name.trim().parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info)
}
