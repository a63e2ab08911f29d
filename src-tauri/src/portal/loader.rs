//! Per-tab load state.
//!
//! `Idle -> Loading -> {Loaded | Errored}`; every activation or refresh goes
//! back to `Loading` and hands out a [`FetchTicket`]. Only the newest ticket
//! may resolve the loader, so a slow response for a tab the user already
//! left can never overwrite what is on screen.

use serde::Serialize;

use super::tabs::{Tab, TabData};
use crate::error::PortalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Identifies one load. Compared by value against the loader's latest ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub tab: Tab,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

/// What the view renders for the active tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSnapshot {
    pub tab: Tab,
    pub phase: Phase,
    pub data: Option<TabData>,
    pub error: Option<String>,
    /// Set when the call that produced this snapshot was superseded.
    pub stale: bool,
}

#[derive(Debug)]
pub struct TabLoader {
    active: Tab,
    phase: Phase,
    data: Option<TabData>,
    error: Option<String>,
    generation: u64,
}

impl TabLoader {
    /// A loader that has not fetched anything yet. `generation` seeds the ticket
    /// counter so tickets from a previous session never match.
    pub fn new(initial: Tab, generation: u64) -> Self {
        Self {
            active: initial,
            phase: Phase::Idle,
            data: None,
            error: None,
            generation,
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn data(&self) -> Option<&TabData> {
        self.data.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn next_ticket(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.error = None;
        FetchTicket {
            tab: self.active,
            generation: self.generation,
        }
    }

    /// Switch to `tab`, dropping whatever dataset was displayed.
    pub fn activate(&mut self, tab: Tab) -> FetchTicket {
        self.active = tab;
        self.data = None;
        self.next_ticket()
    }

    /// Re-fetch the active tab, keeping the current dataset on screen meanwhile.
    pub fn refresh(&mut self) -> FetchTicket {
        self.next_ticket()
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && ticket.tab == self.active
    }

    /// Apply a finished load. Results for superseded tickets are dropped.
    ///
    /// A failed load keeps any dataset still displayed (the refresh case) and
    /// records the error alongside it.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<TabData, PortalError>,
    ) -> Resolution {
        if !self.is_current(&ticket) {
            return Resolution::Stale;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.phase = Phase::Loaded;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = Phase::Errored;
            }
        }
        Resolution::Applied
    }

    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            tab: self.active,
            phase: self.phase,
            data: self.data.clone(),
            error: self.error.clone(),
            stale: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Announcement, Stats};
    use crate::portal::tabs::{AdminTab, StudentTab};

    fn stats(n: i64) -> TabData {
        TabData::Overview {
            stats: Stats {
                departments: n,
                courses: n,
                students: n,
                offerings: n,
            },
        }
    }

    fn news() -> TabData {
        TabData::Announcements {
            announcements: vec![Announcement {
                id: 1,
                title: "Exams".to_string(),
                body: "Start Monday".to_string(),
                created_at: None,
                author: None,
            }],
        }
    }

    const OVERVIEW: Tab = Tab::Admin(AdminTab::Overview);
    const NEWS: Tab = Tab::Admin(AdminTab::Announcements);

    #[test]
    fn test_starts_idle() {
        let loader = TabLoader::new(OVERVIEW, 0);
        assert_eq!(loader.phase(), Phase::Idle);
        assert!(loader.data().is_none());
    }

    #[test]
    fn test_activate_then_resolve() {
        let mut loader = TabLoader::new(OVERVIEW, 0);
        let ticket = loader.activate(OVERVIEW);
        assert_eq!(loader.phase(), Phase::Loading);
        assert_eq!(loader.resolve(ticket, Ok(stats(3))), Resolution::Applied);
        assert_eq!(loader.phase(), Phase::Loaded);
        assert_eq!(loader.data(), Some(&stats(3)));
    }

    #[test]
    fn test_switch_discards_previous_dataset() {
        let mut loader = TabLoader::new(OVERVIEW, 0);
        let t = loader.activate(OVERVIEW);
        loader.resolve(t, Ok(stats(1)));

        loader.activate(NEWS);
        assert_eq!(loader.active(), NEWS);
        assert!(loader.data().is_none());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut loader = TabLoader::new(OVERVIEW, 0);
        let slow = loader.activate(OVERVIEW);
        let fast = loader.activate(NEWS);

        assert_eq!(loader.resolve(fast, Ok(news())), Resolution::Applied);
        assert_eq!(loader.resolve(slow, Ok(stats(9))), Resolution::Stale);
        assert_eq!(loader.active(), NEWS);
        assert_eq!(loader.data(), Some(&news()));
    }

    #[test]
    fn test_reactivating_same_tab_supersedes_older_ticket() {
        let mut loader = TabLoader::new(OVERVIEW, 0);
        let first = loader.activate(OVERVIEW);
        let second = loader.activate(OVERVIEW);
        assert_eq!(loader.resolve(first, Ok(stats(1))), Resolution::Stale);
        assert_eq!(loader.resolve(second, Ok(stats(2))), Resolution::Applied);
        assert_eq!(loader.data(), Some(&stats(2)));
    }

    #[test]
    fn test_failed_refresh_keeps_dataset() {
        let mut loader = TabLoader::new(OVERVIEW, 0);
        let t = loader.activate(OVERVIEW);
        loader.resolve(t, Ok(stats(4)));

        let r = loader.refresh();
        assert_eq!(loader.phase(), Phase::Loading);
        assert_eq!(loader.data(), Some(&stats(4)));

        loader.resolve(r, Err(PortalError::Network("timed out".to_string())));
        let snap = loader.snapshot();
        assert_eq!(snap.phase, Phase::Errored);
        assert_eq!(snap.data, Some(stats(4)));
        assert_eq!(snap.error.as_deref(), Some("Network error: timed out"));
    }

    #[test]
    fn test_failed_activation_has_no_data() {
        let mut loader = TabLoader::new(Tab::Student(StudentTab::My), 10);
        let t = loader.activate(Tab::Student(StudentTab::Payments));
        assert_eq!(t.generation, 11);
        loader.resolve(
            t,
            Err(PortalError::Server {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert_eq!(loader.phase(), Phase::Errored);
        assert!(loader.data().is_none());
    }
}
