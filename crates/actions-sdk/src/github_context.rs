// GitHubContext: a snapshot of the GITHUB_* environment for the current
// workflow run, plus the parsed event payload when one is present.

use serde::Serialize;

use crate::action::Action;
use crate::error::ActionsError;

/// The workflow context, populated from `GITHUB_*` environment variables.
///
/// Numeric fields parse leniently (unset or malformed values become 0), and
/// the URL fields fall back to the github.com defaults when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GitHubContext {
    pub action: String,
    pub action_path: String,
    pub action_repository: String,
    /// True when running under GitHub Actions.
    pub actions: bool,
    pub actor: String,
    pub api_url: String,
    pub base_ref: String,
    /// Path of the `GITHUB_ENV` file command target.
    pub env: String,
    pub event_name: String,
    pub event_path: String,
    pub graphql_url: String,
    pub head_ref: String,
    pub job: String,
    /// Path of the `GITHUB_PATH` file command target.
    pub path: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_name: String,
    pub ref_protected: bool,
    pub ref_type: String,
    /// Owner and repository name, e.g. `octocat/Hello-World`. Prefer
    /// [`GitHubContext::repo`] over reading this directly.
    pub repository: String,
    pub repository_owner: String,
    pub retention_days: i64,
    pub run_attempt: i64,
    pub run_id: i64,
    pub run_number: i64,
    pub server_url: String,
    pub sha: String,
    /// Path of the `GITHUB_STEP_SUMMARY` file command target.
    pub step_summary: String,
    pub workflow: String,
    pub workspace: String,

    /// The event payload parsed from the file at `event_path`, if any.
    pub event: Option<serde_json::Value>,
}

impl GitHubContext {
    /// The repository owner and name.
    ///
    /// Prefers `repository`, then the event payload's `repository` object,
    /// then `repository_owner` with no name.
    pub fn repo(&self) -> (String, String) {
        if !self.repository.is_empty() {
            return match self.repository.split_once('/') {
                Some((owner, name)) => (owner.to_string(), name.to_string()),
                None => (self.repository.clone(), String::new()),
            };
        }

        let mut owner = self.repository_owner.clone();
        let mut name = String::new();
        if let Some(repo) = self.event.as_ref().and_then(|e| e.get("repository")) {
            if let Some(n) = repo.get("name").and_then(|v| v.as_str()) {
                name = n.to_string();
            }
            if let Some(o) = repo
                .get("owner")
                .and_then(|o| o.get("name"))
                .and_then(|v| v.as_str())
            {
                owner = o.to_string();
            }
        }
        (owner, name)
    }
}

impl Action {
    /// Build the [`GitHubContext`] for the current run from the injected
    /// environment, loading the event payload from `GITHUB_EVENT_PATH` when
    /// the file exists.
    pub fn context(&self) -> Result<GitHubContext, ActionsError> {
        let get = |key: &str| self.getenv(key);
        let or_default = |value: String, default: &str| {
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        };

        let event_path = get("GITHUB_EVENT_PATH");
        let event = if event_path.is_empty() {
            None
        } else {
            match std::fs::read(&event_path) {
                Ok(data) => Some(
                    serde_json::from_slice(&data)
                        .map_err(|e| ActionsError::EventPayload(e.to_string()))?,
                ),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(ActionsError::EventPayload(e.to_string())),
            }
        };

        Ok(GitHubContext {
            action: get("GITHUB_ACTION"),
            action_path: get("GITHUB_ACTION_PATH"),
            action_repository: get("GITHUB_ACTION_REPOSITORY"),
            actions: parse_bool(&get("GITHUB_ACTIONS")),
            actor: get("GITHUB_ACTOR"),
            api_url: or_default(get("GITHUB_API_URL"), "https://api.github.com"),
            base_ref: get("GITHUB_BASE_REF"),
            env: get("GITHUB_ENV"),
            event_name: get("GITHUB_EVENT_NAME"),
            event_path,
            graphql_url: or_default(get("GITHUB_GRAPHQL_URL"), "https://api.github.com/graphql"),
            head_ref: get("GITHUB_HEAD_REF"),
            job: get("GITHUB_JOB"),
            path: get("GITHUB_PATH"),
            git_ref: get("GITHUB_REF"),
            ref_name: get("GITHUB_REF_NAME"),
            ref_protected: parse_bool(&get("GITHUB_REF_PROTECTED")),
            ref_type: get("GITHUB_REF_TYPE"),
            repository: get("GITHUB_REPOSITORY"),
            repository_owner: get("GITHUB_REPOSITORY_OWNER"),
            retention_days: parse_i64(&get("GITHUB_RETENTION_DAYS")),
            run_attempt: parse_i64(&get("GITHUB_RUN_ATTEMPT")),
            run_id: parse_i64(&get("GITHUB_RUN_ID")),
            run_number: parse_i64(&get("GITHUB_RUN_NUMBER")),
            server_url: or_default(get("GITHUB_SERVER_URL"), "https://github.com"),
            sha: get("GITHUB_SHA"),
            step_summary: get("GITHUB_STEP_SUMMARY"),
            workflow: get("GITHUB_WORKFLOW"),
            workspace: get("GITHUB_WORKSPACE"),
            event,
        })
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn parse_i64(value: &str) -> i64 {
    value.parse().unwrap_or(0)
}
