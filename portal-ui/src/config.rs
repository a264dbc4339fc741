use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::UiError;

/// Id of the `<script type="application/json">` element carrying overrides
pub const CONFIG_ELEMENT_ID: &str = "portal-config";

fn default_breakpoint() -> u32 {
    portal_common::Breakpoint::DEFAULT_MAX_WIDTH
}

fn default_animation() -> String {
    "flipInX".to_string()
}

fn default_separator() -> String {
    ",".to_string()
}

fn default_speed_ms() -> u32 {
    3000
}

fn default_rotating_selector() -> String {
    "#hero .rotating".to_string()
}

fn default_scroll_duration_ms() -> u32 {
    1500
}

fn default_back_to_top_threshold() -> f64 {
    100.0
}

fn default_tour_storage_key() -> String {
    "portal_tour".to_string()
}

fn default_char_warn_at() -> usize {
    10
}

fn default_char_warn_class() -> String {
    "text-danger".to_string()
}

fn default_preloader_delay_ms() -> u32 {
    100
}

fn default_toggle_open_delay_ms() -> u32 {
    430
}

fn default_toggle_close_delay_ms() -> u32 {
    400
}

/// Hero text rotation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatingConfig {
    #[serde(default = "default_rotating_selector")]
    pub selector: String,
    /// animate.css class applied to each new phrase
    #[serde(default = "default_animation")]
    pub animation: String,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u32,
}

impl Default for RotatingConfig {
    fn default() -> Self {
        Self {
            selector: default_rotating_selector(),
            animation: default_animation(),
            separator: default_separator(),
            speed_ms: default_speed_ms(),
        }
    }
}

/// Page-level settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Widest viewport (CSS px) that gets the off-canvas navigation
    #[serde(default = "default_breakpoint")]
    pub breakpoint: u32,
    #[serde(default)]
    pub rotating: RotatingConfig,
    #[serde(default = "default_scroll_duration_ms")]
    pub scroll_duration_ms: u32,
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: f64,
    #[serde(default = "default_tour_storage_key")]
    pub tour_storage_key: String,
    /// Start the guided tour automatically for first-time visitors
    #[serde(default)]
    pub tour_autostart: bool,
    #[serde(default = "default_char_warn_at")]
    pub char_warn_at: usize,
    #[serde(default = "default_char_warn_class")]
    pub char_warn_class: String,
    #[serde(default = "default_preloader_delay_ms")]
    pub preloader_delay_ms: u32,
    #[serde(default = "default_toggle_open_delay_ms")]
    pub toggle_open_delay_ms: u32,
    #[serde(default = "default_toggle_close_delay_ms")]
    pub toggle_close_delay_ms: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            breakpoint: default_breakpoint(),
            rotating: RotatingConfig::default(),
            scroll_duration_ms: default_scroll_duration_ms(),
            back_to_top_threshold: default_back_to_top_threshold(),
            tour_storage_key: default_tour_storage_key(),
            tour_autostart: false,
            char_warn_at: default_char_warn_at(),
            char_warn_class: default_char_warn_class(),
            preloader_delay_ms: default_preloader_delay_ms(),
            toggle_open_delay_ms: default_toggle_open_delay_ms(),
            toggle_close_delay_ms: default_toggle_close_delay_ms(),
        }
    }
}

impl PortalConfig {
    pub fn from_json(text: &str) -> Result<Self, UiError> {
        serde_json::from_str(text).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Parse `text` if present, falling back to defaults on absence or error.
    pub fn from_json_or_default(text: Option<&str>) -> Self {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(text) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring portal config: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = PortalConfig::from_json("{}").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.breakpoint, 991);
        assert_eq!(config.rotating.animation, "flipInX");
        assert_eq!(config.rotating.speed_ms, 3000);
        assert_eq!(config.tour_storage_key, "portal_tour");
    }

    #[test]
    fn test_partial_override() {
        let config =
            PortalConfig::from_json(r#"{"breakpoint": 767, "rotating": {"speed_ms": 2000}}"#)
                .unwrap();
        assert_eq!(config.breakpoint, 767);
        assert_eq!(config.rotating.speed_ms, 2000);
        assert_eq!(config.rotating.separator, ",");
        assert_eq!(config.scroll_duration_ms, 1500);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = PortalConfig::from_json("{breakpoint:").unwrap_err();
        assert!(matches!(err, UiError::Config(_)));
    }

    #[test]
    fn test_fallback_on_error_or_absence() {
        assert_eq!(PortalConfig::from_json_or_default(None), PortalConfig::default());
        assert_eq!(
            PortalConfig::from_json_or_default(Some("not json")),
            PortalConfig::default()
        );
        assert_eq!(
            PortalConfig::from_json_or_default(Some(r#"{"breakpoint": 500}"#)).breakpoint,
            500
        );
    }
}
