//! Backup operations, scoped to one server.

use serde_json::json;

use crate::api::endpoints::Endpoint;
use crate::api::models::{self, Backup, NewBackup, Response};
use crate::api::{AccessScope, Method};
use crate::client::Mcss;
use crate::error::{McssApiError, Result};

/// Backup namespace for one server, obtained via `server.backups()`.
pub struct Backups<'a> {
    client: &'a Mcss,
    server_guid: &'a str,
}

impl<'a> Backups<'a> {
    pub(crate) fn new(client: &'a Mcss, server_guid: &'a str) -> Self {
        Backups {
            client,
            server_guid,
        }
    }

    fn params(&self) -> [(&'static str, &'a str); 1] {
        [("guid", self.server_guid)]
    }

    pub async fn list(&self) -> Result<Vec<Backup>> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::Backups,
                &self.params(),
                None,
                AccessScope::Server,
            )
            .await?;
        models::decode(&response.body)
    }

    pub async fn get(&self, backup_id: &str) -> Result<Backup> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::Backup,
                &[("guid", self.server_guid), ("backupId", backup_id)],
                None,
                AccessScope::Server,
            )
            .await?;
        models::decode(&response.body)
    }

    /// Backup statistics for this server. The shape is server-defined, so the
    /// body is returned as raw JSON.
    pub async fn stats(&self) -> Result<serde_json::Value> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::BackupStats,
                &self.params(),
                None,
                AccessScope::Server,
            )
            .await?;
        serde_json::from_str(&response.body).map_err(|e| McssApiError::Decode(e.to_string()))
    }

    pub async fn create(&self, backup: &NewBackup) -> Result<Response> {
        let body =
            serde_json::to_value(backup).map_err(|e| McssApiError::Decode(e.to_string()))?;
        let response = self
            .client
            .call(
                Method::Post,
                Endpoint::Backups,
                &self.params(),
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    pub async fn update(&self, backup_id: &str, backup: &NewBackup) -> Result<Response> {
        let body =
            serde_json::to_value(backup).map_err(|e| McssApiError::Decode(e.to_string()))?;
        let response = self
            .client
            .call(
                Method::Put,
                Endpoint::Backup,
                &[("guid", self.server_guid), ("backupId", backup_id)],
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    pub async fn delete(&self, backup_id: &str) -> Result<Response> {
        let response = self
            .client
            .call(
                Method::Delete,
                Endpoint::Backup,
                &[("guid", self.server_guid), ("backupId", backup_id)],
                None,
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    /// Trigger an existing backup definition to run now.
    pub async fn run(&self, backup_id: &str) -> Result<Response> {
        let response = self
            .client
            .call(
                Method::Post,
                Endpoint::Backup,
                &[("guid", self.server_guid), ("backupId", backup_id)],
                Some(json!({})),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    /// Run history for this server's backups, as raw JSON.
    pub async fn history(&self) -> Result<serde_json::Value> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::BackupHistory,
                &self.params(),
                None,
                AccessScope::Server,
            )
            .await?;
        serde_json::from_str(&response.body).map_err(|e| McssApiError::Decode(e.to_string()))
    }

    pub async fn clear_history(&self) -> Result<Response> {
        let response = self
            .client
            .call(
                Method::Delete,
                Endpoint::BackupHistoryClear,
                &self.params(),
                None,
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }
}
