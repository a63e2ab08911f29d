use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use super::loader::{FetchTicket, Resolution, TabLoader, TabSnapshot};
use super::mutation::Mutation;
use super::role::{route, Role, Session, View};
use super::tabs::{load_tab, Tab, TabData};
use crate::api::{PortalClient, Transport};
use crate::error::PortalError;

/// Result of a successful mutation: the toast text and the refreshed tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationOutcome {
    pub message: String,
    pub snapshot: Option<TabSnapshot>,
}

#[derive(Default)]
struct PortalState {
    session: Option<Session>,
    loader: Option<TabLoader>,
    in_flight: Option<AbortHandle>,
    /// Highest generation handed out by any earlier loader.
    retired_generation: u64,
}

impl PortalState {
    /// Drop the session, its tab data and any load still running.
    fn clear(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        if let Some(loader) = self.loader.take() {
            self.retired_generation = loader.generation();
        }
        self.session = None;
    }
}

/// Session controller for the portal window.
///
/// Owns the signed-in session and the active tab's loader. Managed by Tauri
/// and shared by every command; the inner lock is never held across an
/// `.await`.
pub struct Portal {
    client: PortalClient,
    state: Mutex<PortalState>,
}

impl Portal {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            client: PortalClient::new(transport),
            state: Mutex::new(PortalState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PortalState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn current_view(&self) -> View {
        route(self.lock().session.as_ref())
    }

    /// Snapshot of the active tab, if signed in.
    pub fn snapshot(&self) -> Option<TabSnapshot> {
        self.lock().loader.as_ref().map(|l| l.snapshot())
    }

    /// Sign in. Replaces any existing session; on failure the portal stays
    /// signed out.
    pub async fn login(
        &self,
        role: Role,
        id_val: &str,
        password: &str,
    ) -> Result<Session, PortalError> {
        let id_label = match role {
            Role::Admin => "Username",
            Role::Student => "Registration number",
        };
        if id_val.trim().is_empty() {
            return Err(PortalError::Validation(format!("{} is required", id_label)));
        }
        if password.is_empty() {
            return Err(PortalError::Validation("Password is required".to_string()));
        }

        self.lock().clear();
        let session = self.client.login(role, id_val.trim(), password).await?;

        let mut state = self.lock();
        state.clear();
        let seed = state.retired_generation;
        state.loader = Some(TabLoader::new(role.landing_tab(), seed));
        state.session = Some(session.clone());
        Ok(session)
    }

    pub fn logout(&self) {
        let mut state = self.lock();
        if let Some(session) = &state.session {
            info!("Signing out {} #{}", session.role(), session.id());
        }
        state.clear();
    }

    /// Make `tab` the active tab and load its dataset.
    pub async fn activate(&self, tab: Tab) -> Result<TabSnapshot, PortalError> {
        let (ticket, handle) = {
            let mut state = self.lock();
            let session = state.session.clone().ok_or(PortalError::NotSignedIn)?;
            if tab.role() != session.role() {
                return Err(PortalError::WrongRole(format!("Tab {}", tab)));
            }
            let loader = state.loader.as_mut().ok_or(PortalError::NotSignedIn)?;
            let ticket = loader.activate(tab);
            let handle = self.spawn_load(&mut state, ticket, session);
            (ticket, handle)
        };
        self.finish_load(ticket, handle).await
    }

    /// Reload the active tab, keeping its current dataset visible meanwhile.
    pub async fn refresh(&self) -> Result<TabSnapshot, PortalError> {
        let (ticket, handle) = {
            let mut state = self.lock();
            let session = state.session.clone().ok_or(PortalError::NotSignedIn)?;
            let loader = state.loader.as_mut().ok_or(PortalError::NotSignedIn)?;
            let ticket = loader.refresh();
            let handle = self.spawn_load(&mut state, ticket, session);
            (ticket, handle)
        };
        self.finish_load(ticket, handle).await
    }

    /// Submit a command. On success the active tab is re-fetched; on failure
    /// nothing displayed changes and the error carries the message to show.
    pub async fn mutate(&self, mutation: Mutation) -> Result<MutationOutcome, PortalError> {
        let session = self.session().ok_or(PortalError::NotSignedIn)?;
        let request = mutation.to_request(&session)?;

        info!("Submitting {} for #{}", mutation.label(), session.id());
        self.client.submit(request).await.map_err(|e| {
            warn!("{} failed: {}", mutation.label(), e);
            e.with_fallback(mutation.failure_fallback())
        })?;

        let snapshot = if self.session().as_ref() == Some(&session) {
            match self.refresh().await {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!("Refresh after {} failed: {}", mutation.label(), e);
                    None
                }
            }
        } else {
            None
        };

        Ok(MutationOutcome {
            message: mutation.success_message().to_string(),
            snapshot,
        })
    }

    /// Start the fetch for `ticket`, aborting whatever load was still running.
    fn spawn_load(
        &self,
        state: &mut PortalState,
        ticket: FetchTicket,
        session: Session,
    ) -> JoinHandle<Result<TabData, PortalError>> {
        let client = self.client.clone();
        let handle = tokio::spawn(async move { load_tab(&client, &session, ticket.tab).await });
        if let Some(previous) = state.in_flight.replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }

    async fn finish_load(
        &self,
        ticket: FetchTicket,
        handle: JoinHandle<Result<TabData, PortalError>>,
    ) -> Result<TabSnapshot, PortalError> {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                debug!("Load of {} (#{}) was superseded", ticket.tab, ticket.generation);
                return self.stale_snapshot();
            }
            Err(e) => Err(PortalError::Network(format!("Load task failed: {}", e))),
        };

        let mut state = self.lock();
        let loader = state.loader.as_mut().ok_or(PortalError::NotSignedIn)?;
        match loader.resolve(ticket, result) {
            Resolution::Applied => {
                let snapshot = loader.snapshot();
                state.in_flight = None;
                if let Some(error) = &snapshot.error {
                    warn!("Loading {} failed: {}", ticket.tab, error);
                }
                Ok(snapshot)
            }
            Resolution::Stale => {
                let mut snapshot = loader.snapshot();
                snapshot.stale = true;
                Ok(snapshot)
            }
        }
    }

    fn stale_snapshot(&self) -> Result<TabSnapshot, PortalError> {
        let state = self.lock();
        let loader = state.loader.as_ref().ok_or(PortalError::NotSignedIn)?;
        let mut snapshot = loader.snapshot();
        snapshot.stale = true;
        Ok(snapshot)
    }
}
