//! Local storage helpers

use portal_ui::UiError;

pub fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn get_string(key: &str) -> Option<String> {
    get_storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Fails when storage is disabled or over quota.
pub fn set_string(key: &str, value: &str) -> Result<(), UiError> {
    let storage =
        get_storage().ok_or_else(|| UiError::Storage("localStorage unavailable".to_string()))?;
    storage
        .set_item(key, value)
        .map_err(|e| UiError::Storage(format!("{e:?}")))
}
