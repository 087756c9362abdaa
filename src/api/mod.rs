pub mod endpoints;
pub mod mock;
pub mod models;
pub mod transport;

use async_trait::async_trait;

use crate::error::{McssApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A fully built request: substituted URL, headers (API key included) and an
/// optional JSON body. Transports execute it without interpreting anything.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Raw outcome of a round trip: status code and body, uninterpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Executes one HTTP round trip. Implemented by [`transport::HttpTransport`]
/// for real use and [`mock::MockTransport`] for tests.
#[async_trait]
pub trait McssTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Which credential scope a 403 refers to: admin-only endpoints report
/// [`McssApiError::NotAdmin`], per-server endpoints [`McssApiError::NoServerAccess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    Admin,
    Server,
}

/// Fixed status-to-error table, applied to every response before decoding.
/// Any status not explicitly listed is an unrecoverable server-side error.
pub(crate) fn check_status(response: &RawResponse, scope: AccessScope) -> Result<()> {
    match response.status {
        200 | 201 | 207 => Ok(()),
        400 => Err(McssApiError::InvalidInput(response.body.clone())),
        401 => Err(McssApiError::Unauthorized),
        403 => Err(match scope {
            AccessScope::Admin => McssApiError::NotAdmin,
            AccessScope::Server => McssApiError::NoServerAccess,
        }),
        404 => Err(McssApiError::NotFound),
        status => Err(McssApiError::ServerSide(status)),
    }
}

// Re-export useful items
pub use endpoints::{ApiVersion, Endpoint};
pub use mock::MockTransport;
pub use models::*;
pub use transport::HttpTransport;

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> RawResponse {
        RawResponse {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn success_statuses_pass() {
        for status in [200, 201, 207] {
            assert!(check_status(&response(status), AccessScope::Admin).is_ok());
        }
    }

    #[test]
    fn unauthorized_maps_to_unauthorized() {
        let err = check_status(&response(401), AccessScope::Server).unwrap_err();
        assert!(matches!(err, McssApiError::Unauthorized));
    }

    #[test]
    fn forbidden_is_disambiguated_by_scope() {
        let err = check_status(&response(403), AccessScope::Admin).unwrap_err();
        assert!(matches!(err, McssApiError::NotAdmin));

        let err = check_status(&response(403), AccessScope::Server).unwrap_err();
        assert!(matches!(err, McssApiError::NoServerAccess));
    }

    #[test]
    fn not_found_and_invalid_input() {
        let err = check_status(&response(404), AccessScope::Server).unwrap_err();
        assert!(matches!(err, McssApiError::NotFound));

        let err = check_status(&response(400), AccessScope::Admin).unwrap_err();
        assert!(matches!(err, McssApiError::InvalidInput(_)));
    }

    #[test]
    fn unlisted_statuses_are_server_side() {
        for status in [418, 500, 502, 301] {
            let err = check_status(&response(status), AccessScope::Admin).unwrap_err();
            assert!(matches!(err, McssApiError::ServerSide(s) if s == status));
        }
    }
}
