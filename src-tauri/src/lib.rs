pub mod api;
mod commands;
pub mod config;
pub mod error;
pub mod portal;

use std::sync::Arc;

pub use api::{HttpTransport, Transport};
pub use config::PortalConfig;
pub use error::PortalError;
pub use portal::{Mutation, Portal, Role, Session, Tab, TabSnapshot, View};

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::session::login,
            commands::session::logout,
            commands::session::current_view,
            commands::tabs::activate_tab,
            commands::tabs::refresh_tab,
            commands::tabs::mutate,
            commands::config::get_preference,
            commands::config::set_preference,
            commands::config::get_portal_config,
        ])
        .setup(|app| {
            use tauri::Manager;
            use tauri_plugin_store::StoreExt;

            let config_dir = app.path().app_config_dir().ok();
            let preference = app.store(config::PREFERENCES_STORE).ok().and_then(|store| {
                store
                    .get(config::BASE_URL_PREFERENCE)
                    .and_then(|v| v.as_str().map(|s| s.to_string()))
            });
            let env_override = std::env::var(config::BASE_URL_ENV).ok();

            let portal_config =
                PortalConfig::resolve(config_dir.as_deref(), preference, env_override);
            tracing::info!(
                "Portal backend at {} (timeout {}s)",
                portal_config.api_base_url,
                portal_config.request_timeout_secs
            );

            let transport = HttpTransport::new(&portal_config)?;
            app.manage(Portal::new(Arc::new(transport)));
            app.manage(portal_config);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
