//! Endpoint registry: the fixed mapping from logical operation to URL
//! template, and the API-version family selector.

/// The two wire-compatible endpoint families the library targets. They differ
/// only in the base path segment and the casing of the API-key header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub fn base_path(self) -> &'static str {
        match self {
            ApiVersion::V1 => "/api/v1",
            ApiVersion::V2 => "/api/v2",
        }
    }

    /// Header name carrying the API key. The server matches it exactly.
    pub fn api_key_header(self) -> &'static str {
        match self {
            ApiVersion::V1 => "APIKey",
            ApiVersion::V2 => "apiKey",
        }
    }
}

/// One entry per API operation. Pure data: templates contain `{placeholder}`
/// segments filled by [`Endpoint::fill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    WipeSessions,
    Servers,
    ServersFiltered,
    ServersByType,
    Server,
    ServerCount,
    ServerCountFiltered,
    ServerCountByType,
    ExecuteAction,
    ExecuteCommand,
    MassExecuteAction,
    MassExecuteCommands,
    Users,
    User,
    Backups,
    Backup,
    BackupStats,
    BackupHistory,
    BackupHistoryClear,
    Scheduler,
    SchedulerTasks,
    SchedulerTask,
    SettingsAll,
    Settings,
}

impl Endpoint {
    pub fn template(self) -> &'static str {
        match self {
            Endpoint::Root => "/",
            Endpoint::WipeSessions => "/users/wipe/sessions",
            Endpoint::Servers => "/servers",
            Endpoint::ServersFiltered => "/servers?filter={filter}",
            Endpoint::ServersByType => "/servers?filter={filter}&type={srvType}",
            Endpoint::Server => "/servers/{guid}",
            Endpoint::ServerCount => "/servers/count",
            Endpoint::ServerCountFiltered => "/servers/count?filter={filter}",
            Endpoint::ServerCountByType => "/servers/count?filter={filter}&type={srvType}",
            Endpoint::ExecuteAction => "/servers/{guid}/execute/action",
            Endpoint::ExecuteCommand => "/servers/{guid}/execute/command",
            Endpoint::MassExecuteAction => "/servers/execute/action",
            Endpoint::MassExecuteCommands => "/servers/execute/commands",
            Endpoint::Users => "/users",
            Endpoint::User => "/users/{userId}",
            Endpoint::Backups => "/servers/{guid}/backups",
            Endpoint::Backup => "/servers/{guid}/backups/{backupId}",
            Endpoint::BackupStats => "/servers/{guid}/backups/stats",
            Endpoint::BackupHistory => "/servers/{guid}/backups/history",
            Endpoint::BackupHistoryClear => "/servers/{guid}/backups/history/clear",
            Endpoint::Scheduler => "/servers/{guid}/scheduler",
            Endpoint::SchedulerTasks => "/servers/{guid}/scheduler/tasks",
            Endpoint::SchedulerTask => "/servers/{guid}/scheduler/tasks/{taskId}",
            Endpoint::SettingsAll => "/mcss/settings/All",
            Endpoint::Settings => "/mcss/settings",
        }
    }

    /// Substitute every `{placeholder}` in the template. Passing the wrong
    /// parameter set for an endpoint is a programmer error, caught by the
    /// debug assertion rather than at runtime.
    pub fn fill(self, params: &[(&str, &str)]) -> String {
        let mut path = self.template().to_string();
        for (key, value) in params {
            path = path.replace(&format!("{{{key}}}"), value);
        }
        debug_assert!(
            !path.contains('{'),
            "unsubstituted placeholder in endpoint path: {path}"
        );
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_paths_differ_per_family() {
        assert_eq!(ApiVersion::V1.base_path(), "/api/v1");
        assert_eq!(ApiVersion::V2.base_path(), "/api/v2");
    }

    #[test]
    fn api_key_header_casing_is_exact() {
        assert_eq!(ApiVersion::V1.api_key_header(), "APIKey");
        assert_eq!(ApiVersion::V2.api_key_header(), "apiKey");
    }

    #[test]
    fn fill_substitutes_every_placeholder() {
        let path = Endpoint::SchedulerTask.fill(&[("guid", "abc"), ("taskId", "42")]);
        assert_eq!(path, "/servers/abc/scheduler/tasks/42");

        let path = Endpoint::ServerCountByType.fill(&[("filter", "3"), ("srvType", "vanilla")]);
        assert_eq!(path, "/servers/count?filter=3&type=vanilla");
    }

    #[test]
    fn every_registered_template_can_be_filled() {
        let params = [
            ("guid", "g"),
            ("backupId", "b"),
            ("taskId", "t"),
            ("userId", "u"),
            ("filter", "0"),
            ("srvType", "s"),
        ];
        let all = [
            Endpoint::Root,
            Endpoint::WipeSessions,
            Endpoint::Servers,
            Endpoint::ServersFiltered,
            Endpoint::ServersByType,
            Endpoint::Server,
            Endpoint::ServerCount,
            Endpoint::ServerCountFiltered,
            Endpoint::ServerCountByType,
            Endpoint::ExecuteAction,
            Endpoint::ExecuteCommand,
            Endpoint::MassExecuteAction,
            Endpoint::MassExecuteCommands,
            Endpoint::Users,
            Endpoint::User,
            Endpoint::Backups,
            Endpoint::Backup,
            Endpoint::BackupStats,
            Endpoint::BackupHistory,
            Endpoint::BackupHistoryClear,
            Endpoint::Scheduler,
            Endpoint::SchedulerTasks,
            Endpoint::SchedulerTask,
            Endpoint::SettingsAll,
            Endpoint::Settings,
        ];
        for endpoint in all {
            let path = endpoint.fill(&params);
            assert!(!path.contains('{'), "unfilled placeholder in {path}");
        }
    }
}
