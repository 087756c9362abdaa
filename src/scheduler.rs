//! Scheduler operations, scoped to one server.

use serde_json::json;

use crate::api::endpoints::Endpoint;
use crate::api::models::{self, NewTask, Response, SchedulerInfo, SchedulerTask};
use crate::api::{AccessScope, Method};
use crate::client::Mcss;
use crate::error::{McssApiError, Result};

/// Scheduler namespace for one server, obtained via `server.scheduler()`.
pub struct Scheduler<'a> {
    client: &'a Mcss,
    server_guid: &'a str,
}

impl<'a> Scheduler<'a> {
    pub(crate) fn new(client: &'a Mcss, server_guid: &'a str) -> Self {
        Scheduler {
            client,
            server_guid,
        }
    }

    /// Task counters for this server's scheduler.
    pub async fn info(&self) -> Result<SchedulerInfo> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::Scheduler,
                &[("guid", self.server_guid)],
                None,
                AccessScope::Server,
            )
            .await?;
        models::decode(&response.body)
    }

    pub async fn list_tasks(&self) -> Result<Vec<SchedulerTask>> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::SchedulerTasks,
                &[("guid", self.server_guid)],
                None,
                AccessScope::Server,
            )
            .await?;
        models::decode(&response.body)
    }

    pub async fn get_task(&self, task_id: &str) -> Result<SchedulerTask> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::SchedulerTask,
                &[("guid", self.server_guid), ("taskId", task_id)],
                None,
                AccessScope::Server,
            )
            .await?;
        models::decode(&response.body)
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Response> {
        let body = serde_json::to_value(task).map_err(|e| McssApiError::Decode(e.to_string()))?;
        let response = self
            .client
            .call(
                Method::Post,
                Endpoint::SchedulerTasks,
                &[("guid", self.server_guid)],
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    pub async fn update_task(&self, task_id: &str, task: &NewTask) -> Result<Response> {
        let body = serde_json::to_value(task).map_err(|e| McssApiError::Decode(e.to_string()))?;
        let response = self
            .client
            .call(
                Method::Put,
                Endpoint::SchedulerTask,
                &[("guid", self.server_guid), ("taskId", task_id)],
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<Response> {
        let response = self
            .client
            .call(
                Method::Delete,
                Endpoint::SchedulerTask,
                &[("guid", self.server_guid), ("taskId", task_id)],
                None,
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    /// Trigger an existing task to run now.
    pub async fn run_task(&self, task_id: &str) -> Result<Response> {
        let response = self
            .client
            .call(
                Method::Post,
                Endpoint::SchedulerTask,
                &[("guid", self.server_guid), ("taskId", task_id)],
                Some(json!({})),
                AccessScope::Server,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }
}
