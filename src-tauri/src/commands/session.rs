//! Sign-in, sign-out and view routing.

use tauri::State;
use tracing::{info, warn};

use crate::portal::{Portal, Role, Session, View};

/// Post credentials for `role`. The error string is shown on the login form.
#[tauri::command(rename_all = "snake_case")]
pub async fn login(
    portal: State<'_, Portal>,
    role: Role,
    id_val: String,
    password: String,
) -> Result<Session, String> {
    info!("Login attempt as {}: {}", role, id_val);
    portal.login(role, &id_val, &password).await.map_err(|e| {
        warn!("Login as {} failed: {}", role, e);
        e.into()
    })
}

/// Clear the session and every tab dataset. Also called when the webview
/// (re)loads, so a reload always lands on the login view.
#[tauri::command]
pub fn logout(portal: State<'_, Portal>) {
    portal.logout();
}

#[tauri::command]
pub fn current_view(portal: State<'_, Portal>) -> View {
    portal.current_view()
}
