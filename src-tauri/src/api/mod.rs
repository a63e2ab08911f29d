pub mod client;
pub mod drafts;
pub mod endpoints;
pub mod transport;
pub mod types;

pub use client::PortalClient;
pub use endpoints::{AdminCollection, Endpoint};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
