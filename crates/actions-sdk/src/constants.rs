// Well-known command names, environment variable names, and wire constants.

// Stream command names.
pub const ADD_MASK: &str = "add-mask";
pub const ADD_MATCHER: &str = "add-matcher";
pub const REMOVE_MATCHER: &str = "remove-matcher";
pub const GROUP: &str = "group";
pub const END_GROUP: &str = "endgroup";
pub const DEBUG: &str = "debug";
pub const NOTICE: &str = "notice";
pub const WARNING: &str = "warning";
pub const ERROR: &str = "error";

// File command logical names. The target file path comes from the
// environment variable `GITHUB_<NAME>` (uppercased, `-` becomes `_`).
pub const ENV: &str = "env";
pub const OUTPUT: &str = "output";
pub const PATH: &str = "path";
pub const STATE: &str = "state";
pub const STEP_SUMMARY: &str = "step-summary";

/// Prefix for file command target environment variables.
pub const FILE_COMMAND_ENV_PREFIX: &str = "GITHUB_";

/// Prefix for action input environment variables.
pub const INPUT_ENV_PREFIX: &str = "INPUT_";

/// Heredoc delimiter for multiline file command values. Matches the
/// reference toolkit byte for byte, historical misspelling included, because
/// the runner looks for this exact token.
pub const MULTILINE_FILE_DELIMITER: &str = "_GitHubActionsFileCommandDelimeter_";

/// Environment variables required to mint an OIDC token.
pub const OIDC_REQUEST_URL_ENV: &str = "ACTIONS_ID_TOKEN_REQUEST_URL";
pub const OIDC_REQUEST_TOKEN_ENV: &str = "ACTIONS_ID_TOKEN_REQUEST_TOKEN";

/// Platform line ending appended to every stream and file command record.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";
