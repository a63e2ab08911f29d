use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::config::{PortalConfig, BASE_URL_PREFERENCE, PREFERENCES_STORE};

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    let value = store.get(key).and_then(|v| v.as_str().map(|s| s.to_string()));
    Ok(value)
}

/// Persist a preference. The API base URL is checked before it is saved and
/// takes effect on the next launch.
#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    if key == BASE_URL_PREFERENCE && !value.trim().is_empty() {
        let candidate = PortalConfig {
            api_base_url: value.to_string(),
            ..PortalConfig::default()
        };
        candidate.base_url()?;
    }

    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })
}

/// The config the running app resolved at startup.
#[tauri::command]
pub fn get_portal_config(config: tauri::State<'_, PortalConfig>) -> PortalConfig {
    config.inner().clone()
}
