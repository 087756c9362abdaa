//! Server handles and the server-side enumerations.

use serde_json::json;

use crate::api::endpoints::Endpoint;
use crate::api::models::{self, Response, ServerDetails};
use crate::api::{AccessScope, Method};
use crate::backups::Backups;
use crate::client::Mcss;
use crate::error::{McssApiError, Result};
use crate::scheduler::Scheduler;

/// Power actions. Wire values are part of the API contract; `Invalid` is a
/// sentinel that is rejected client-side and never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerAction {
    Invalid = 0,
    Stop = 1,
    Start = 2,
    Kill = 3,
    Restart = 4,
}

impl ServerAction {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Listing semantics for the servers endpoint. `Filter` selects servers of a
/// concrete type and requires one to be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerFilter {
    None = 0,
    Minimal = 1,
    Status = 2,
    Filter = 3,
}

impl ServerFilter {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Counting semantics for the server count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerCountFilter {
    None = 0,
    Online = 1,
    Offline = 2,
    ByServerType = 3,
}

impl ServerCountFilter {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Handle to one remote server, identified by GUID.
///
/// Owns no remote state beyond the id: every accessor that needs fresh data
/// re-issues a request through the owning client.
#[derive(Clone, Debug)]
pub struct Server {
    guid: String,
    client: Mcss,
}

impl Server {
    pub(crate) fn new(guid: String, client: Mcss) -> Self {
        Server { guid, client }
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Fetch the current details of this server.
    pub async fn details(&self) -> Result<ServerDetails> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::Server,
                &[("guid", &self.guid)],
                None,
                AccessScope::Server,
            )
            .await?;
        models::decode(&response.body)
    }

    /// Execute a power action. The `Invalid` sentinel fails locally without a
    /// request.
    pub async fn execute_action(&self, action: ServerAction) -> Result<Response> {
        if action == ServerAction::Invalid {
            return Err(McssApiError::InvalidArgument(
                "the Invalid sentinel action cannot be executed".to_string(),
            ));
        }
        let body = json!({ "action": action.value() });
        let response = self
            .client
            .call(
                Method::Post,
                Endpoint::ExecuteAction,
                &[("guid", &self.guid)],
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    /// Run one console command on this server.
    pub async fn execute_command(&self, command: &str) -> Result<Response> {
        let body = json!({ "command": command });
        let response = self
            .client
            .call(
                Method::Post,
                Endpoint::ExecuteCommand,
                &[("guid", &self.guid)],
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    /// Backups scoped to this server.
    pub fn backups(&self) -> Backups<'_> {
        Backups::new(&self.client, &self.guid)
    }

    /// Scheduler scoped to this server.
    pub fn scheduler(&self) -> Scheduler<'_> {
        Scheduler::new(&self.client, &self.guid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wire_values_are_fixed() {
        assert_eq!(ServerAction::Invalid.value(), 0);
        assert_eq!(ServerAction::Stop.value(), 1);
        assert_eq!(ServerAction::Start.value(), 2);
        assert_eq!(ServerAction::Kill.value(), 3);
        assert_eq!(ServerAction::Restart.value(), 4);
    }

    #[test]
    fn filter_wire_values_are_fixed() {
        assert_eq!(ServerFilter::None.value(), 0);
        assert_eq!(ServerFilter::Minimal.value(), 1);
        assert_eq!(ServerFilter::Status.value(), 2);
        assert_eq!(ServerFilter::Filter.value(), 3);

        assert_eq!(ServerCountFilter::None.value(), 0);
        assert_eq!(ServerCountFilter::Online.value(), 1);
        assert_eq!(ServerCountFilter::Offline.value(), 2);
        assert_eq!(ServerCountFilter::ByServerType.value(), 3);
    }
}
