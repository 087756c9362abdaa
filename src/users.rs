//! User handles, the capability enumeration and the creation payload.

use std::collections::{BTreeSet, HashMap};

use crate::api::endpoints::Endpoint;
use crate::api::models::{self, CreateUserRequest, Response, ServerPermissions, UserSummary};
use crate::api::{AccessScope, Method};
use crate::client::Mcss;
use crate::error::Result;

/// Capabilities a user can hold on a single server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UserPermission {
    ViewStats,
    ViewConsole,
    UseConsole,
    UseServerActions,
}

/// Creation-time description of a web panel user. Only consumed when building
/// the create request; the resulting [`User`] retains just the id.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub enabled: bool,
    pub is_admin: bool,
    pub has_access_to_all_servers: bool,
    pub custom_server_permissions: Option<HashMap<String, BTreeSet<UserPermission>>>,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        NewUser {
            username: username.into(),
            enabled: true,
            ..Default::default()
        }
    }

    /// Grant a per-server permission set, keyed by server GUID.
    pub fn with_permissions(
        mut self,
        server_guid: impl Into<String>,
        permissions: BTreeSet<UserPermission>,
    ) -> Self {
        self.custom_server_permissions
            .get_or_insert_with(HashMap::new)
            .insert(server_guid.into(), permissions);
        self
    }
}

impl CreateUserRequest {
    pub fn from_new_user(user: NewUser, password: &str, password_repeat: &str) -> Self {
        let custom_server_permissions = user.custom_server_permissions.map(|map| {
            map.into_iter()
                .map(|(guid, set)| (guid, ServerPermissions::from_set(&set)))
                .collect()
        });
        CreateUserRequest {
            username: user.username,
            password: password.to_string(),
            password_repeat: password_repeat.to_string(),
            enabled: user.enabled,
            is_admin: user.is_admin,
            has_access_to_all_servers: user.has_access_to_all_servers,
            custom_server_permissions,
        }
    }
}

/// Handle to one panel user, identified by id. Fresh data is always fetched
/// through the owning client.
#[derive(Clone, Debug)]
pub struct User {
    user_id: String,
    client: Mcss,
}

impl User {
    pub(crate) fn new(user_id: String, client: Mcss) -> Self {
        User { user_id, client }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub async fn details(&self) -> Result<UserSummary> {
        let response = self
            .client
            .call(
                Method::Get,
                Endpoint::User,
                &[("userId", &self.user_id)],
                None,
                AccessScope::Admin,
            )
            .await?;
        models::decode(&response.body)
    }

    pub async fn delete(&self) -> Result<Response> {
        self.client.delete_user(&self.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_defaults_to_enabled_non_admin() {
        let user = NewUser::new("steve");
        assert!(user.enabled);
        assert!(!user.is_admin);
        assert!(!user.has_access_to_all_servers);
        assert!(user.custom_server_permissions.is_none());
    }

    #[test]
    fn create_request_carries_per_server_permission_sets() {
        let mut set = BTreeSet::new();
        set.insert(UserPermission::ViewConsole);
        set.insert(UserPermission::UseConsole);

        let user = NewUser::new("alex").with_permissions("guid-1", set.clone());
        let request = CreateUserRequest::from_new_user(user, "pw", "pw");

        let permissions = request.custom_server_permissions.unwrap();
        assert_eq!(permissions["guid-1"].to_set(), set);
    }
}
