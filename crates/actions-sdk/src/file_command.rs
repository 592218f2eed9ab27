// File command transport: records appended to orchestrator-designated files
// (GITHUB_ENV, GITHUB_OUTPUT, GITHUB_PATH, GITHUB_STATE, GITHUB_STEP_SUMMARY).
// The runner reads these files after the step finishes; multiline values use
// a heredoc frame so a value's own newlines never split a record.

use std::fs::OpenOptions;
use std::io::Write;

use crate::constants::{FILE_COMMAND_ENV_PREFIX, LINE_ENDING, MULTILINE_FILE_DELIMITER};
use crate::error::ActionsError;

/// Derive the environment variable that names a file command's target path.
///
/// Logical name `env` → `GITHUB_ENV`, `step-summary` → `GITHUB_STEP_SUMMARY`.
pub fn target_env_var(command_name: &str) -> String {
    let mut var = command_name.replace('-', "_");
    var.make_ascii_uppercase();
    format!("{}{}", FILE_COMMAND_ENV_PREFIX, var)
}

/// Frame a key and a possibly-multiline value as a heredoc record:
/// `key<<DELIM<EOL>value<EOL>DELIM`.
///
/// Used for env, output, and state assignments, whose values may contain the
/// file's own line terminator.
pub fn multiline_record(key: &str, value: &str) -> String {
    format!(
        "{key}<<{delim}{eol}{value}{eol}{delim}",
        delim = MULTILINE_FILE_DELIMITER,
        eol = LINE_ENDING,
    )
}

/// Append one record (message plus line terminator) to the file at `path`.
///
/// The file is created if absent and opened in append mode; the handle is
/// scoped to this call and released on every exit path. Any open, write, or
/// close failure surfaces as [`ActionsError::FileCommandWrite`] — the record
/// is synced before the handle is dropped, since an error at close would
/// otherwise be lost.
pub fn append_record(path: &str, message: &str) -> Result<(), ActionsError> {
    tracing::debug!(path, bytes = message.len(), "appending file command record");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(ActionsError::FileCommandWrite)?;

    file.write_all(message.as_bytes())
        .and_then(|()| file.write_all(LINE_ENDING.as_bytes()))
        .and_then(|()| file.sync_all())
        .map_err(ActionsError::FileCommandWrite)
}
