use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    /// Rejected credentials. Carries the message shown on the login form.
    #[error("{0}")]
    Auth(String),

    /// A required form field is missing or malformed. Raised before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the backend.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The response arrived but could not be decoded.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("{0} is not available for this session")]
    WrongRole(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl PortalError {
    /// Replace the generic fallback of a server error with an action-specific one.
    ///
    /// Only errors whose body carried no message are rewritten; a message the
    /// backend wrote is always shown as-is.
    pub fn with_fallback(self, fallback: &str) -> Self {
        match self {
            PortalError::Server { status, message } if message == GENERIC_FAILURE => {
                PortalError::Server {
                    status,
                    message: fallback.to_string(),
                }
            }
            other => other,
        }
    }
}

/// Message used when a non-2xx body has no `detail` or `message` field.
pub const GENERIC_FAILURE: &str = "Request failed";

impl From<PortalError> for String {
    fn from(err: PortalError) -> Self {
        err.to_string()
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::Decode(err.to_string())
        } else {
            PortalError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_replaces_generic_message_only() {
        let generic = PortalError::Server {
            status: 500,
            message: GENERIC_FAILURE.to_string(),
        };
        assert_eq!(generic.with_fallback("Drop failed").to_string(), "Drop failed");

        let specific = PortalError::Server {
            status: 400,
            message: "Offering is full".to_string(),
        };
        assert_eq!(
            specific.with_fallback("Registration failed").to_string(),
            "Offering is full"
        );

        let network = PortalError::Network("connection refused".to_string());
        assert_eq!(
            network.with_fallback("Action failed").to_string(),
            "Network error: connection refused"
        );
    }
}
