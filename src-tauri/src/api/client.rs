use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::endpoints::Endpoint;
use super::transport::{ApiRequest, Transport};
use crate::error::PortalError;
use crate::portal::{AdminIdentity, Role, Session, StudentIdentity};

#[derive(Serialize)]
struct LoginBody<'a> {
    id_val: &'a str,
    password: &'a str,
}

/// Typed calls on top of a [`Transport`].
#[derive(Clone)]
pub struct PortalClient {
    transport: Arc<dyn Transport>,
}

impl PortalClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Post credentials to the role's login endpoint and build the session.
    ///
    /// Any non-2xx answer becomes `PortalError::Auth` carrying the backend's
    /// message, or "Login failed" when it sent none.
    pub async fn login(
        &self,
        role: Role,
        id_val: &str,
        password: &str,
    ) -> Result<Session, PortalError> {
        let body = serde_json::to_value(LoginBody { id_val, password })?;
        let request = ApiRequest::post(Endpoint::Login(role).path(), body);

        let value = match self.transport.send(request).await {
            Ok(v) => v,
            Err(PortalError::Server { status, message }) => {
                warn!("Login as {} rejected ({})", role, status);
                let err = PortalError::Server { status, message }.with_fallback("Login failed");
                return Err(PortalError::Auth(err.to_string()));
            }
            Err(e) => return Err(e),
        };

        let session = match role {
            Role::Admin => Session::admin(serde_json::from_value::<AdminIdentity>(value)?),
            Role::Student => Session::student(serde_json::from_value::<StudentIdentity>(value)?),
        };
        info!("Signed in {} #{} ({})", role, session.id(), session.name());
        Ok(session)
    }

    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, PortalError> {
        let value = self.transport.send(ApiRequest::get(endpoint.path())).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn submit(&self, request: ApiRequest) -> Result<Value, PortalError> {
        self.transport.send(request).await
    }
}
