use tauri::State;
use tracing::info;

use crate::portal::{Mutation, MutationOutcome, Portal, Tab, TabSnapshot};

/// Switch the dashboard to `tab` and load its dataset.
///
/// A snapshot with `stale: true` means a newer activation overtook this
/// one; the caller should ignore it.
#[tauri::command]
pub async fn activate_tab(portal: State<'_, Portal>, tab: Tab) -> Result<TabSnapshot, String> {
    info!("Activating {}", tab);
    portal.activate(tab).await.map_err(String::from)
}

#[tauri::command]
pub async fn refresh_tab(portal: State<'_, Portal>) -> Result<TabSnapshot, String> {
    portal.refresh().await.map_err(String::from)
}

/// Submit a dashboard action. On success the active tab comes back refreshed.
#[tauri::command]
pub async fn mutate(
    portal: State<'_, Portal>,
    mutation: Mutation,
) -> Result<MutationOutcome, String> {
    portal.mutate(mutation).await.map_err(String::from)
}
