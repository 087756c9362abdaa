//! Wire models and decoders. Decoders are pure: a parsed JSON body goes in, a
//! domain value or a decode error comes out. List decoders fail wholesale on a
//! single malformed element; there are no partial lists.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{McssApiError, Result};
use crate::users::UserPermission;

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| McssApiError::Decode(e.to_string()))
}

/// Identity snapshot of an MCSS install, fetched from the root endpoint.
/// Consumed once at construction for the version compatibility check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub is_dev_build: bool,
    pub mcss_version: String,
    pub mcss_api_version: String,
    pub unique_identifier: String,
    pub you_are_awesome: bool,
}

/// Minimal wrapper returned by mutation endpoints with no richer payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub success: bool,
}

impl Response {
    pub(crate) fn from_status(status: u16) -> Self {
        Response {
            status,
            success: (200..300).contains(&status),
        }
    }
}

/// One element of the server list. Only `guid` is required; everything else
/// is whatever the selected filter made the server include.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetails {
    pub guid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub creation_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountResponse {
    pub count: u64,
}

/// Outcome of a mass operation. A 207 carries per-server status codes; a 200
/// reports success with no per-item detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MassOutcome {
    AllSucceeded,
    Partial(HashMap<String, u16>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemStatus {
    server_id: String,
    status: u16,
}

#[derive(Debug, Deserialize)]
struct ItemStatusList {
    responses: Vec<ItemStatus>,
}

/// Decode the per-item status map of a 207 body:
/// `{"responses":[{"serverId":"abc","status":200}, ...]}`.
pub(crate) fn decode_item_statuses(body: &str) -> Result<HashMap<String, u16>> {
    let list: ItemStatusList = decode(body)?;
    Ok(list
        .responses
        .into_iter()
        .map(|item| (item.server_id, item.status))
        .collect())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Per-server capability flags, exactly as the wire carries them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPermissions {
    pub view_stats: bool,
    pub view_console: bool,
    pub use_console: bool,
    pub use_server_actions: bool,
}

impl ServerPermissions {
    pub fn from_set(set: &BTreeSet<UserPermission>) -> Self {
        ServerPermissions {
            view_stats: set.contains(&UserPermission::ViewStats),
            view_console: set.contains(&UserPermission::ViewConsole),
            use_console: set.contains(&UserPermission::UseConsole),
            use_server_actions: set.contains(&UserPermission::UseServerActions),
        }
    }

    pub fn to_set(self) -> BTreeSet<UserPermission> {
        let mut set = BTreeSet::new();
        if self.view_stats {
            set.insert(UserPermission::ViewStats);
        }
        if self.view_console {
            set.insert(UserPermission::ViewConsole);
        }
        if self.use_console {
            set.insert(UserPermission::UseConsole);
        }
        if self.use_server_actions {
            set.insert(UserPermission::UseServerActions);
        }
        set
    }
}

/// Request body for user creation. Field names are what the server expects;
/// the password is never retained after the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub password_repeat: String,
    pub enabled: bool,
    pub is_admin: bool,
    pub has_access_to_all_servers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_server_permissions: Option<HashMap<String, ServerPermissions>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub backup_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub suspend: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Payload for creating or updating a backup definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBackup {
    pub name: String,
    pub destination: String,
    #[serde(default)]
    pub suspend: bool,
    #[serde(default)]
    pub delete_old_backups: bool,
}

/// Task counters for a server's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerInfo {
    pub tasks: i64,
    pub interval: i64,
    pub fixed_time: i64,
    pub timeless: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerTask {
    pub task_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    /// Timing and job bodies are server-defined; kept as raw JSON.
    #[serde(default)]
    pub timing: Option<serde_json::Value>,
    #[serde(default)]
    pub job: Option<serde_json::Value>,
}

/// Payload for creating or updating a scheduler task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub enabled: bool,
    pub timing: serde_json::Value,
    pub job: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub delete_old_backups_threshold: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_decodes_all_required_fields() {
        let body = r#"{
            "isDevBuild": false,
            "mcssVersion": "13.0.1",
            "mcssApiVersion": "2.0.0",
            "uniqueIdentifier": "f1c2",
            "youAreAwesome": true
        }"#;
        let info: Info = decode(body).unwrap();
        assert_eq!(info.mcss_api_version, "2.0.0");
        assert!(info.you_are_awesome);
    }

    #[test]
    fn info_missing_field_is_a_decode_error() {
        let body = r#"{"isDevBuild": false, "mcssVersion": "13.0.1"}"#;
        let err = decode::<Info>(body).unwrap_err();
        assert!(matches!(err, McssApiError::Decode(_)));
    }

    #[test]
    fn server_list_with_one_malformed_element_fails_whole_decode() {
        let body = r#"[
            {"guid": "abc", "name": "one"},
            {"name": "missing guid"}
        ]"#;
        let err = decode::<Vec<ServerDetails>>(body).unwrap_err();
        assert!(matches!(err, McssApiError::Decode(_)));
    }

    #[test]
    fn backup_list_with_one_malformed_element_fails_whole_decode() {
        let body = r#"[
            {"backupId": "b1", "name": "daily"},
            {"name": "missing backupId"}
        ]"#;
        let err = decode::<Vec<Backup>>(body).unwrap_err();
        assert!(matches!(err, McssApiError::Decode(_)));
    }

    #[test]
    fn task_list_with_one_malformed_element_fails_whole_decode() {
        let body = r#"[
            {"taskId": "t1", "name": "nightly restart", "enabled": true},
            {"name": "missing taskId"}
        ]"#;
        let err = decode::<Vec<SchedulerTask>>(body).unwrap_err();
        assert!(matches!(err, McssApiError::Decode(_)));
    }

    #[test]
    fn item_statuses_decode_into_a_map() {
        let body =
            r#"{"responses":[{"serverId":"abc","status":200},{"serverId":"def","status":404}]}"#;
        let map = decode_item_statuses(body).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["abc"], 200);
        assert_eq!(map["def"], 404);
    }

    #[test]
    fn permissions_round_trip_through_sets() {
        let mut set = BTreeSet::new();
        set.insert(UserPermission::ViewStats);
        set.insert(UserPermission::UseServerActions);

        let wire = ServerPermissions::from_set(&set);
        assert!(wire.view_stats);
        assert!(!wire.view_console);
        assert!(!wire.use_console);
        assert!(wire.use_server_actions);
        assert_eq!(wire.to_set(), set);
    }

    #[test]
    fn create_user_request_omits_absent_permissions() {
        let request = CreateUserRequest {
            username: "steve".to_string(),
            password: "pw".to_string(),
            password_repeat: "pw".to_string(),
            enabled: true,
            is_admin: false,
            has_access_to_all_servers: true,
            custom_server_permissions: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("customServerPermissions").is_none());
        assert_eq!(json["passwordRepeat"], "pw");
        assert_eq!(json["hasAccessToAllServers"], true);
    }

    #[test]
    fn response_success_tracks_status_class() {
        assert!(Response::from_status(200).success);
        assert!(Response::from_status(207).success);
        assert!(!Response::from_status(404).success);
    }
}
