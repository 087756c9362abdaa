//! The `Mcss` facade: one method per API operation, composing the endpoint
//! registry, the transport and the response decoders.

use std::sync::{Arc, RwLock};

use serde_json::json;
use tracing::debug;

use crate::api::endpoints::{ApiVersion, Endpoint};
use crate::api::models::{
    self, CountResponse, CreateUserRequest, Info, MassOutcome, Response, ServerDetails, Settings,
    UserSummary,
};
use crate::api::transport::HttpTransport;
use crate::api::{check_status, AccessScope, ApiRequest, McssTransport, Method, RawResponse};
use crate::error::{McssApiError, Result};
use crate::servers::{Server, ServerAction, ServerCountFilter, ServerFilter};
use crate::users::{NewUser, User};

/// API version string this client is written against. A server reporting
/// anything else fails construction.
pub const EXPECTED_API_VERSION: &str = "2.0.0";

#[derive(Debug, Clone)]
struct ClientConfig {
    host: String,
    port: i32,
    https: bool,
    api_key: String,
    version: ApiVersion,
    base_url: String,
}

impl ClientConfig {
    fn new(host: &str, port: i32, api_key: &str, https: bool, version: ApiVersion) -> Self {
        let mut config = ClientConfig {
            host: host.to_string(),
            port,
            https,
            api_key: api_key.to_string(),
            version,
            base_url: String::new(),
        };
        config.rebuild_base_url();
        config
    }

    /// Base URL is always derived from protocol + host + port, so mutating
    /// one component never corrupts the others. The port segment is omitted
    /// when port is zero or negative.
    fn rebuild_base_url(&mut self) {
        let protocol = if self.https { "https" } else { "http" };
        let port = if self.port > 0 {
            format!(":{}", self.port)
        } else {
            String::new()
        };
        self.base_url = format!(
            "{protocol}://{host}{port}{base}",
            host = self.host,
            base = self.version.base_path()
        );
    }
}

struct McssInner {
    transport: Box<dyn McssTransport>,
    config: RwLock<ClientConfig>,
}

/// Client for one MCSS install.
///
/// Cheap to clone; clones share the transport and configuration. The
/// configuration setters are safe to call between requests, but mutating the
/// base URL or API key while requests are in flight is caller-synchronized.
#[derive(Clone)]
pub struct Mcss {
    inner: Arc<McssInner>,
}

impl std::fmt::Debug for Mcss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mcss").finish_non_exhaustive()
    }
}

impl Mcss {
    /// Connect and verify API compatibility. Fetches the install info and
    /// refuses to operate when the reported API version differs from
    /// [`EXPECTED_API_VERSION`].
    pub async fn connect(
        host: &str,
        port: i32,
        api_key: &str,
        https: bool,
        version: ApiVersion,
    ) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Self::connect_with_transport(host, port, api_key, https, version, Box::new(transport))
            .await
    }

    /// Like [`Mcss::connect`] but with certificate verification disabled for
    /// this client. Explicit opt-in for self-signed panel installs.
    pub async fn connect_unsafe_ssl(
        host: &str,
        port: i32,
        api_key: &str,
        version: ApiVersion,
    ) -> Result<Self> {
        let transport = HttpTransport::with_unsafe_ssl(true)?;
        Self::connect_with_transport(host, port, api_key, true, version, Box::new(transport)).await
    }

    /// Connect over a caller-supplied transport. Used by tests to script
    /// responses; the version check still runs.
    pub async fn connect_with_transport(
        host: &str,
        port: i32,
        api_key: &str,
        https: bool,
        version: ApiVersion,
        transport: Box<dyn McssTransport>,
    ) -> Result<Self> {
        let config = ClientConfig::new(host, port, api_key, https, version);
        let client = Mcss {
            inner: Arc::new(McssInner {
                transport,
                config: RwLock::new(config),
            }),
        };

        let info = client.get_info().await?;
        if info.mcss_api_version != EXPECTED_API_VERSION {
            return Err(McssApiError::VersionMismatch {
                expected: EXPECTED_API_VERSION.to_string(),
                got: info.mcss_api_version,
            });
        }
        debug!(
            "connected to MCSS {} (api {})",
            info.mcss_version, info.mcss_api_version
        );

        Ok(client)
    }

    fn build_request(
        &self,
        method: Method,
        path: String,
        body: Option<serde_json::Value>,
    ) -> ApiRequest {
        let config = self.inner.config.read().unwrap();
        ApiRequest {
            method,
            url: format!("{}{}", config.base_url, path),
            headers: vec![
                (
                    config.version.api_key_header().to_string(),
                    config.api_key.clone(),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    pub(crate) async fn call(
        &self,
        method: Method,
        endpoint: Endpoint,
        params: &[(&str, &str)],
        body: Option<serde_json::Value>,
        scope: AccessScope,
    ) -> Result<RawResponse> {
        let request = self.build_request(method, endpoint.fill(params), body);
        let response = self.inner.transport.execute(request).await?;
        check_status(&response, scope)?;
        Ok(response)
    }

    // --- configuration ---

    pub fn base_url(&self) -> String {
        self.inner.config.read().unwrap().base_url.clone()
    }

    pub fn port(&self) -> i32 {
        self.inner.config.read().unwrap().port
    }

    pub fn is_https(&self) -> bool {
        self.inner.config.read().unwrap().https
    }

    pub fn api_version(&self) -> ApiVersion {
        self.inner.config.read().unwrap().version
    }

    /// Change the target port and rebuild the base URL. The configured host
    /// is preserved.
    pub fn set_port(&self, port: i32) {
        let mut config = self.inner.config.write().unwrap();
        config.port = port;
        config.rebuild_base_url();
    }

    /// Switch between http and https and rebuild the base URL. The configured
    /// host is preserved.
    pub fn set_https(&self, https: bool) {
        let mut config = self.inner.config.write().unwrap();
        config.https = https;
        config.rebuild_base_url();
    }

    pub fn set_api_key(&self, api_key: &str) {
        let mut config = self.inner.config.write().unwrap();
        config.api_key = api_key.to_string();
    }

    // --- install-wide operations ---

    /// Fetch general information about the MCSS install.
    pub async fn get_info(&self) -> Result<Info> {
        let response = self
            .call(Method::Get, Endpoint::Root, &[], None, AccessScope::Admin)
            .await?;
        models::decode(&response.body)
    }

    /// The v2 root endpoint doubles as the stats endpoint; the payload is the
    /// same [`Info`] identity snapshot, with no richer stats fields.
    pub async fn get_stats(&self) -> Result<Info> {
        self.get_info().await
    }

    pub async fn get_settings(&self) -> Result<Settings> {
        let response = self
            .call(
                Method::Get,
                Endpoint::SettingsAll,
                &[],
                None,
                AccessScope::Admin,
            )
            .await?;
        models::decode(&response.body)
    }

    pub async fn update_settings(&self, delete_old_backups_threshold: i64) -> Result<Response> {
        let body = json!({ "deleteOldBackupsThreshold": delete_old_backups_threshold });
        let response = self
            .call(
                Method::Patch,
                Endpoint::Settings,
                &[],
                Some(body),
                AccessScope::Admin,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    /// Reset all web panel sessions, logging every panel user out.
    pub async fn wipe_sessions(&self) -> Result<Response> {
        let response = self
            .call(
                Method::Post,
                Endpoint::WipeSessions,
                &[],
                None,
                AccessScope::Admin,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }

    // --- servers ---

    /// Handle for a server known by GUID. No request is issued; accessors on
    /// the handle fetch fresh state on demand.
    pub fn server(&self, guid: &str) -> Server {
        Server::new(guid.to_string(), self.clone())
    }

    pub async fn get_servers(&self) -> Result<Vec<Server>> {
        let details = self.get_server_details(ServerFilter::None).await?;
        Ok(details
            .into_iter()
            .map(|d| Server::new(d.guid, self.clone()))
            .collect())
    }

    pub async fn get_server_details(&self, filter: ServerFilter) -> Result<Vec<ServerDetails>> {
        let response = match filter {
            ServerFilter::None => {
                self.call(Method::Get, Endpoint::Servers, &[], None, AccessScope::Server)
                    .await?
            }
            ServerFilter::Filter => {
                return Err(McssApiError::InvalidArgument(
                    "ServerFilter::Filter requires a server type; use get_servers_by_type".to_string(),
                ));
            }
            other => {
                let value = other.value().to_string();
                self.call(
                    Method::Get,
                    Endpoint::ServersFiltered,
                    &[("filter", &value)],
                    None,
                    AccessScope::Server,
                )
                .await?
            }
        };
        models::decode(&response.body)
    }

    pub async fn get_servers_by_type(&self, server_type: &str) -> Result<Vec<ServerDetails>> {
        let value = ServerFilter::Filter.value().to_string();
        let response = self
            .call(
                Method::Get,
                Endpoint::ServersByType,
                &[("filter", &value), ("srvType", server_type)],
                None,
                AccessScope::Server,
            )
            .await?;
        models::decode(&response.body)
    }

    pub async fn get_server_count(&self) -> Result<u64> {
        let response = self
            .call(
                Method::Get,
                Endpoint::ServerCount,
                &[],
                None,
                AccessScope::Server,
            )
            .await?;
        let count: CountResponse = models::decode(&response.body)?;
        Ok(count.count)
    }

    /// Counting by `ByServerType` without a concrete type is intentionally
    /// unimplemented server-side; it fails locally instead of round-tripping.
    pub async fn get_server_count_filtered(&self, filter: ServerCountFilter) -> Result<u64> {
        if filter == ServerCountFilter::ByServerType {
            return Err(McssApiError::InvalidArgument(
                "ServerCountFilter::ByServerType is not supported yet; use get_server_count_by_type"
                    .to_string(),
            ));
        }
        let value = filter.value().to_string();
        let response = self
            .call(
                Method::Get,
                Endpoint::ServerCountFiltered,
                &[("filter", &value)],
                None,
                AccessScope::Server,
            )
            .await?;
        let count: CountResponse = models::decode(&response.body)?;
        Ok(count.count)
    }

    pub async fn get_server_count_by_type(&self, server_type: &str) -> Result<u64> {
        let value = ServerCountFilter::ByServerType.value().to_string();
        let response = self
            .call(
                Method::Get,
                Endpoint::ServerCountByType,
                &[("filter", &value), ("srvType", server_type)],
                None,
                AccessScope::Server,
            )
            .await?;
        let count: CountResponse = models::decode(&response.body)?;
        Ok(count.count)
    }

    // --- mass operations ---

    /// Execute one action on several servers. Fails locally, without a
    /// request, when the action is the `Invalid` sentinel or the server list
    /// is empty.
    pub async fn execute_mass_action(
        &self,
        action: ServerAction,
        servers: &[Server],
    ) -> Result<MassOutcome> {
        if action == ServerAction::Invalid {
            return Err(McssApiError::InvalidArgument(
                "the Invalid sentinel action cannot be executed".to_string(),
            ));
        }
        if servers.is_empty() {
            return Err(McssApiError::InvalidArgument(
                "server list is empty".to_string(),
            ));
        }

        let ids: Vec<&str> = servers.iter().map(|s| s.guid()).collect();
        let body = json!({ "serverIds": ids, "action": action.value() });
        let response = self
            .call(
                Method::Post,
                Endpoint::MassExecuteAction,
                &[],
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Self::mass_outcome(&response)
    }

    /// Execute a list of commands on several servers. Both lists must be
    /// non-empty; violations fail locally without a request.
    pub async fn execute_mass_commands(
        &self,
        commands: &[&str],
        servers: &[Server],
    ) -> Result<MassOutcome> {
        if commands.is_empty() {
            return Err(McssApiError::InvalidArgument(
                "command list is empty".to_string(),
            ));
        }
        if servers.is_empty() {
            return Err(McssApiError::InvalidArgument(
                "server list is empty".to_string(),
            ));
        }

        let ids: Vec<&str> = servers.iter().map(|s| s.guid()).collect();
        let body = json!({ "serverIds": ids, "commands": commands });
        let response = self
            .call(
                Method::Post,
                Endpoint::MassExecuteCommands,
                &[],
                Some(body),
                AccessScope::Server,
            )
            .await?;
        Self::mass_outcome(&response)
    }

    fn mass_outcome(response: &RawResponse) -> Result<MassOutcome> {
        match response.status {
            207 => Ok(MassOutcome::Partial(models::decode_item_statuses(
                &response.body,
            )?)),
            _ => Ok(MassOutcome::AllSucceeded),
        }
    }

    // --- users ---

    pub async fn get_users(&self) -> Result<Vec<User>> {
        let response = self
            .call(Method::Get, Endpoint::Users, &[], None, AccessScope::Admin)
            .await?;
        let summaries: Vec<UserSummary> = models::decode(&response.body)?;
        Ok(summaries
            .into_iter()
            .map(|s| User::new(s.user_id, self.clone()))
            .collect())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let response = self
            .call(
                Method::Get,
                Endpoint::User,
                &[("userId", user_id)],
                None,
                AccessScope::Admin,
            )
            .await?;
        let summary: UserSummary = models::decode(&response.body)?;
        Ok(User::new(summary.user_id, self.clone()))
    }

    /// Create a web panel user. The password is sent once and not retained.
    pub async fn create_user(
        &self,
        user: NewUser,
        password: &str,
        password_repeat: &str,
    ) -> Result<User> {
        let request = CreateUserRequest::from_new_user(user, password, password_repeat);
        let body =
            serde_json::to_value(&request).map_err(|e| McssApiError::Decode(e.to_string()))?;
        let response = self
            .call(
                Method::Post,
                Endpoint::Users,
                &[],
                Some(body),
                AccessScope::Admin,
            )
            .await?;
        let summary: UserSummary = models::decode(&response.body)?;
        Ok(User::new(summary.user_id, self.clone()))
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<Response> {
        let response = self
            .call(
                Method::Delete,
                Endpoint::User,
                &[("userId", user_id)],
                None,
                AccessScope::Admin,
            )
            .await?;
        Ok(Response::from_status(response.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_includes_port_when_positive() {
        let config = ClientConfig::new("panel.example.com", 25560, "key", false, ApiVersion::V2);
        assert_eq!(config.base_url, "http://panel.example.com:25560/api/v2");
    }

    #[test]
    fn base_url_omits_port_when_not_positive() {
        let config = ClientConfig::new("panel.example.com", 0, "key", true, ApiVersion::V2);
        assert_eq!(config.base_url, "https://panel.example.com/api/v2");

        let config = ClientConfig::new("panel.example.com", -1, "key", false, ApiVersion::V1);
        assert_eq!(config.base_url, "http://panel.example.com/api/v1");
    }

    #[test]
    fn base_url_reflects_version_family() {
        let v1 = ClientConfig::new("host", 8080, "key", false, ApiVersion::V1);
        let v2 = ClientConfig::new("host", 8080, "key", false, ApiVersion::V2);
        assert_eq!(v1.base_url, "http://host:8080/api/v1");
        assert_eq!(v2.base_url, "http://host:8080/api/v2");
    }

    #[test]
    fn host_survives_any_mutation_order() {
        let mut config = ClientConfig::new("panel.example.com", 8080, "key", false, ApiVersion::V2);

        config.port = 9090;
        config.rebuild_base_url();
        config.https = true;
        config.rebuild_base_url();
        assert_eq!(config.base_url, "https://panel.example.com:9090/api/v2");

        config.https = false;
        config.rebuild_base_url();
        config.port = 0;
        config.rebuild_base_url();
        assert_eq!(config.base_url, "http://panel.example.com/api/v2");
    }
}
