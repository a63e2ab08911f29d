//! Session-gated view state for the portal window.
//!
//! - `role` - the signed-in identity and the view router
//! - `tabs` - the tabs of each dashboard and how their datasets load
//! - `loader` - per-tab load state with superseded-request protection
//! - `mutation` - role-tagged write commands
//! - `controller` - the `Portal` store tying these together
//! - `gpa` - grade point aggregation

pub mod controller;
pub mod gpa;
pub mod loader;
pub mod mutation;
pub mod role;
pub mod tabs;

pub use controller::{MutationOutcome, Portal};
pub use loader::{Phase, TabSnapshot};
pub use mutation::{AdminMutation, Mutation, StudentMutation};
pub use role::{route, AdminIdentity, Role, Session, StudentIdentity, View};
pub use tabs::{AdminTab, StudentTab, Tab, TabData};
