// The Action façade: every way a step communicates with the runner.
// Stream commands go to the injected output sink; file commands go to the
// files named by GITHUB_* environment variables. All collaborators (writer,
// environment lookup, HTTP client, process exit) are injected so tests can
// intercept them.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use actions_core::{Command, CommandProperties};

use crate::constants;
use crate::error::ActionsError;
use crate::file_command;
use crate::oidc;

/// Environment lookup function. Returns the empty string for unset keys.
pub type EnvLookup = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Process exit function invoked by [`Action::fatal`].
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Handle for communicating with the GitHub Actions runner.
///
/// Construct one explicitly (usually at process start) with
/// [`Action::builder`] and thread it through the program; there is no global
/// default instance. Derived instances from [`Action::with_fields_map`] share
/// the same writer, environment, and HTTP client but carry their own
/// immutable field bag.
#[derive(Clone)]
pub struct Action {
    writer: SharedWriter,
    getenv: EnvLookup,
    fields: CommandProperties,
    pub(crate) http_client: reqwest::Client,
    exit: ExitFn,
}

impl Action {
    /// Create an action with stdout, the process environment, a default
    /// HTTP client, and `std::process::exit`.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building an action with custom collaborators.
    pub fn builder() -> ActionBuilder {
        ActionBuilder::default()
    }

    // -----------------------------------------------------------------------
    // Command transports
    // -----------------------------------------------------------------------

    /// Issue a stream command: the serialized command plus a line terminator,
    /// written to the output sink. Write failures are unrecoverable for this
    /// call and propagate as [`ActionsError::StreamWrite`].
    pub fn issue_command(&self, cmd: &Command) -> Result<(), ActionsError> {
        let mut writer = self.writer.lock();
        writer
            .write_all(cmd.to_string().as_bytes())
            .and_then(|()| writer.write_all(constants::LINE_ENDING.as_bytes()))
            .and_then(|()| writer.flush())
            .map_err(ActionsError::StreamWrite)
    }

    /// Issue a file command: append the command's message to the file named
    /// by the `GITHUB_*` environment variable derived from the command name
    /// (`env` → `GITHUB_ENV`).
    ///
    /// Properties are ignored for file commands; the record is the message
    /// alone. An unset target variable is
    /// [`ActionsError::MissingFileCommandTarget`]; the deprecated stream
    /// forms (`::set-env`, `::add-path`, `::save-state`) are never emitted
    /// as a fallback.
    pub fn issue_file_command(&self, cmd: &Command) -> Result<(), ActionsError> {
        let env_var = file_command::target_env_var(&cmd.name);
        let path = (self.getenv)(&env_var);
        if path.is_empty() {
            return Err(ActionsError::MissingFileCommandTarget(env_var));
        }
        file_command::append_record(&path, &cmd.message.to_text())
    }

    // -----------------------------------------------------------------------
    // Stream operations
    // -----------------------------------------------------------------------

    /// Mask a value in log output: future occurrences are replaced with `***`.
    pub fn add_mask(&self, value: &str) -> Result<(), ActionsError> {
        // ::add-mask::<value>
        self.issue_command(&Command::new(constants::ADD_MASK).message(value))
    }

    /// Register a problem matcher from the JSON file at `path`.
    pub fn add_matcher(&self, path: &str) -> Result<(), ActionsError> {
        // ::add-matcher::<path>
        self.issue_command(&Command::new(constants::ADD_MATCHER).message(path))
    }

    /// Remove the problem matcher registered under `owner`.
    pub fn remove_matcher(&self, owner: &str) -> Result<(), ActionsError> {
        // ::remove-matcher owner=<owner>::
        self.issue_command(&Command::new(constants::REMOVE_MATCHER).property("owner", owner))
    }

    /// Start a collapsable log group that runs until [`Action::end_group`].
    pub fn group(&self, title: &str) -> Result<(), ActionsError> {
        // ::group::<title>
        self.issue_command(&Command::new(constants::GROUP).message(title))
    }

    /// End the current log group.
    pub fn end_group(&self) -> Result<(), ActionsError> {
        // ::endgroup::
        self.issue_command(&Command::new(constants::END_GROUP))
    }

    /// Print a debug-level message, visible when step debug logging is on.
    pub fn debug(&self, message: &str) -> Result<(), ActionsError> {
        self.log(constants::DEBUG, message)
    }

    /// Print a notice-level annotation.
    pub fn notice(&self, message: &str) -> Result<(), ActionsError> {
        self.log(constants::NOTICE, message)
    }

    /// Print a warning-level annotation.
    pub fn warning(&self, message: &str) -> Result<(), ActionsError> {
        self.log(constants::WARNING, message)
    }

    /// Print an error-level annotation.
    pub fn error(&self, message: &str) -> Result<(), ActionsError> {
        self.log(constants::ERROR, message)
    }

    /// Print an error-level annotation, then invoke the injected exit
    /// function with status 1. The default exit function terminates the
    /// process and never returns.
    pub fn fatal(&self, message: &str) -> Result<(), ActionsError> {
        self.error(message)?;
        (self.exit)(1);
        Ok(())
    }

    /// Print a plain line to the output sink with no command wrapper.
    pub fn info(&self, message: &str) -> Result<(), ActionsError> {
        let mut writer = self.writer.lock();
        writer
            .write_all(message.as_bytes())
            .and_then(|()| writer.write_all(constants::LINE_ENDING.as_bytes()))
            .and_then(|()| writer.flush())
            .map_err(ActionsError::StreamWrite)
    }

    /// Issue a leveled log command carrying this action's field bag.
    fn log(&self, level: &str, message: &str) -> Result<(), ActionsError> {
        // ::<level> <fields>::<message>
        self.issue_command(
            &Command::new(level)
                .message(message)
                .properties(self.fields.clone()),
        )
    }

    // -----------------------------------------------------------------------
    // File operations
    // -----------------------------------------------------------------------

    /// Set an environment variable for subsequent steps in the job.
    pub fn set_env(&self, key: &str, value: &str) -> Result<(), ActionsError> {
        self.issue_file_command(
            &Command::new(constants::ENV).message(file_command::multiline_record(key, value)),
        )
    }

    /// Set a step output parameter.
    pub fn set_output(&self, key: &str, value: &str) -> Result<(), ActionsError> {
        self.issue_file_command(
            &Command::new(constants::OUTPUT).message(file_command::multiline_record(key, value)),
        )
    }

    /// Save state readable from this action's `post` entry point.
    pub fn save_state(&self, key: &str, value: &str) -> Result<(), ActionsError> {
        self.issue_file_command(
            &Command::new(constants::STATE).message(file_command::multiline_record(key, value)),
        )
    }

    /// Prepend a directory to the PATH for subsequent steps.
    pub fn add_path(&self, path: &str) -> Result<(), ActionsError> {
        self.issue_file_command(&Command::new(constants::PATH).message(path))
    }

    /// Append markdown to the job summary shown on the run page.
    pub fn add_step_summary(&self, markdown: &str) -> Result<(), ActionsError> {
        self.issue_file_command(&Command::new(constants::STEP_SUMMARY).message(markdown))
    }

    // -----------------------------------------------------------------------
    // Environment
    // -----------------------------------------------------------------------

    /// Get an action input by name: spaces become underscores, the name is
    /// uppercased and prefixed with `INPUT_`, and the looked-up value is
    /// trimmed. Returns the empty string when the input is not defined.
    pub fn get_input(&self, name: &str) -> String {
        let var = format!(
            "{}{}",
            constants::INPUT_ENV_PREFIX,
            name.replace(' ', "_").to_uppercase()
        );
        (self.getenv)(&var).trim().to_string()
    }

    /// Look up an environment variable through the injected lookup function.
    pub fn getenv(&self, key: &str) -> String {
        (self.getenv)(key)
    }

    // -----------------------------------------------------------------------
    // Derived instances
    // -----------------------------------------------------------------------

    /// Return a derived action whose leveled log commands carry `fields` as
    /// properties. The writer, environment, HTTP client, and exit function
    /// are shared; the field bag is this instance's own.
    pub fn with_fields_map(&self, fields: CommandProperties) -> Action {
        Action {
            fields,
            ..self.clone()
        }
    }

    /// Like [`Action::with_fields_map`], from explicit `key=value` pairs.
    /// A pair without `=` is a caller programming error and fails
    /// construction with [`ActionsError::InvalidFieldPair`].
    pub fn with_fields_slice<S: AsRef<str>>(&self, pairs: &[S]) -> Result<Action, ActionsError> {
        let mut fields = CommandProperties::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ActionsError::InvalidFieldPair(pair.to_string()))?;
            fields.insert(key, value);
        }
        Ok(self.with_fields_map(fields))
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Action`]. Every collaborator has a production default.
#[derive(Default)]
pub struct ActionBuilder {
    writer: Option<SharedWriter>,
    getenv: Option<EnvLookup>,
    fields: Option<CommandProperties>,
    http_client: Option<reqwest::Client>,
    exit: Option<ExitFn>,
}

impl ActionBuilder {
    /// Use `writer` as the output sink instead of stdout.
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Arc::new(Mutex::new(writer)));
        self
    }

    /// Use `getenv` for environment lookups instead of the process
    /// environment. The function returns the empty string for unset keys.
    pub fn getenv(mut self, getenv: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.getenv = Some(Arc::new(getenv));
        self
    }

    /// Attach an initial field bag for leveled log commands.
    pub fn fields(mut self, fields: CommandProperties) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Use a preconfigured HTTP client for outbound requests (OIDC).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Use `exit` in place of `std::process::exit` for [`Action::fatal`].
    pub fn exit(mut self, exit: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.exit = Some(Arc::new(exit));
        self
    }

    /// Build the action, filling unset collaborators with defaults.
    pub fn build(self) -> Action {
        Action {
            writer: self
                .writer
                .unwrap_or_else(|| Arc::new(Mutex::new(std::io::stdout()))),
            getenv: self
                .getenv
                .unwrap_or_else(|| Arc::new(|key: &str| std::env::var(key).unwrap_or_default())),
            fields: self.fields.unwrap_or_default(),
            http_client: self.http_client.unwrap_or_else(oidc::default_client),
            exit: self
                .exit
                .unwrap_or_else(|| Arc::new(|code| std::process::exit(code))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI32, Ordering};

    /// A cloneable writer so tests can keep a handle on the captured output.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn env_fixture(vars: &[(&str, &str)]) -> impl Fn(&str) -> String + Send + Sync + 'static {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned().unwrap_or_default()
    }

    fn action_with_buf() -> (Action, SharedBuf) {
        let buf = SharedBuf::default();
        let action = Action::builder()
            .writer(buf.clone())
            .getenv(env_fixture(&[]))
            .build();
        (action, buf)
    }

    #[test]
    fn add_mask_emits_stream_command() {
        let (action, buf) = action_with_buf();
        action.add_mask("s3cr3t").unwrap();
        assert_eq!(buf.contents(), "::add-mask::s3cr3t\n");
    }

    #[test]
    fn add_matcher_and_remove_matcher() {
        let (action, buf) = action_with_buf();
        action.add_matcher(".github/matcher.json").unwrap();
        action.remove_matcher("eslint").unwrap();
        assert_eq!(
            buf.contents(),
            "::add-matcher::.github/matcher.json\n::remove-matcher owner=eslint::\n"
        );
    }

    #[test]
    fn group_and_end_group() {
        let (action, buf) = action_with_buf();
        action.group("build").unwrap();
        action.end_group().unwrap();
        assert_eq!(buf.contents(), "::group::build\n::endgroup::\n");
    }

    #[test]
    fn leveled_logs() {
        let (action, buf) = action_with_buf();
        action.debug("fetching").unwrap();
        action.notice("heads up").unwrap();
        action.warning("careful").unwrap();
        action.error("broken").unwrap();
        assert_eq!(
            buf.contents(),
            "::debug::fetching\n::notice::heads up\n::warning::careful\n::error::broken\n"
        );
    }

    #[test]
    fn log_messages_are_escaped() {
        let (action, buf) = action_with_buf();
        action.warning("100% a\nb\r").unwrap();
        assert_eq!(buf.contents(), "::warning::100%25 a%0Ab%0D\n");
    }

    #[test]
    fn info_writes_plain_line() {
        let (action, buf) = action_with_buf();
        action.info("hello world").unwrap();
        assert_eq!(buf.contents(), "hello world\n");
    }

    #[test]
    fn fatal_logs_then_invokes_exit() {
        let buf = SharedBuf::default();
        let code = Arc::new(AtomicI32::new(0));
        let seen = code.clone();
        let action = Action::builder()
            .writer(buf.clone())
            .getenv(env_fixture(&[]))
            .exit(move |c| seen.store(c, Ordering::SeqCst))
            .build();

        action.fatal("unrecoverable").unwrap();
        assert_eq!(buf.contents(), "::error::unrecoverable\n");
        assert_eq!(code.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn with_fields_map_attaches_properties_to_logs() {
        let buf = SharedBuf::default();
        let base = Action::builder()
            .writer(buf.clone())
            .getenv(env_fixture(&[]))
            .build();

        let derived =
            base.with_fields_map(CommandProperties::from([("job", "release"), ("line", "9")]));
        derived.error("failed").unwrap();
        // The base instance is unaffected.
        base.error("plain").unwrap();

        assert_eq!(
            buf.contents(),
            "::error job=release,line=9::failed\n::error::plain\n"
        );
    }

    #[test]
    fn with_fields_slice_parses_pairs() {
        let (action, buf) = action_with_buf();
        let derived = action.with_fields_slice(&["key=value", "flag=true"]).unwrap();
        derived.debug("d").unwrap();
        assert_eq!(buf.contents(), "::debug flag=true,key=value::d\n");
    }

    #[test]
    fn with_fields_slice_rejects_malformed_pair() {
        let (action, _buf) = action_with_buf();
        let err = action.with_fields_slice(&["not-a-pair"]).unwrap_err();
        assert!(matches!(err, ActionsError::InvalidFieldPair(p) if p == "not-a-pair"));
    }

    #[test]
    fn get_input_transforms_name_and_trims() {
        let action = Action::builder()
            .writer(SharedBuf::default())
            .getenv(env_fixture(&[("INPUT_MY_VAL", "  trimmed value \t")]))
            .build();
        assert_eq!(action.get_input("my val"), "trimmed value");
    }

    #[test]
    fn get_input_uppercases_beyond_ascii() {
        let action = Action::builder()
            .writer(SharedBuf::default())
            .getenv(env_fixture(&[("INPUT_CAFÉ_MODE", "on")]))
            .build();
        assert_eq!(action.get_input("café mode"), "on");
    }

    #[test]
    fn get_input_missing_is_empty() {
        let (action, _buf) = action_with_buf();
        assert_eq!(action.get_input("nope"), "");
    }

    #[test]
    fn getenv_passes_through() {
        let action = Action::builder()
            .writer(SharedBuf::default())
            .getenv(env_fixture(&[("GITHUB_SHA", "abc123")]))
            .build();
        assert_eq!(action.getenv("GITHUB_SHA"), "abc123");
        assert_eq!(action.getenv("UNSET"), "");
    }

    #[test]
    fn set_env_appends_multiline_record_and_leaves_stdout_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("env");
        std::fs::write(&env_file, "").unwrap();
        let env_path = env_file.to_str().unwrap().to_string();

        let buf = SharedBuf::default();
        let action = Action::builder()
            .writer(buf.clone())
            .getenv(env_fixture(&[("GITHUB_ENV", &env_path)]))
            .build();

        action.set_env("k", "v").unwrap();

        let contents = std::fs::read_to_string(&env_file).unwrap();
        assert_eq!(
            contents,
            format!(
                "k<<{d}{e}v{e}{d}{e}",
                d = crate::constants::MULTILINE_FILE_DELIMITER,
                e = crate::constants::LINE_ENDING
            )
        );
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn set_output_and_save_state_use_their_target_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_file = dir.path().join("output");
        let state_file = dir.path().join("state");
        let out_path = out_file.to_str().unwrap().to_string();
        let state_path = state_file.to_str().unwrap().to_string();

        let action = Action::builder()
            .writer(SharedBuf::default())
            .getenv(env_fixture(&[
                ("GITHUB_OUTPUT", &out_path),
                ("GITHUB_STATE", &state_path),
            ]))
            .build();

        action.set_output("result", "ok").unwrap();
        action.save_state("pid", "42").unwrap();

        let d = crate::constants::MULTILINE_FILE_DELIMITER;
        let e = crate::constants::LINE_ENDING;
        assert_eq!(
            std::fs::read_to_string(&out_file).unwrap(),
            format!("result<<{d}{e}ok{e}{d}{e}")
        );
        assert_eq!(
            std::fs::read_to_string(&state_file).unwrap(),
            format!("pid<<{d}{e}42{e}{d}{e}")
        );
    }

    #[test]
    fn add_path_appends_plain_record() {
        let dir = tempfile::tempdir().unwrap();
        let path_file = dir.path().join("path");
        let path_path = path_file.to_str().unwrap().to_string();

        let action = Action::builder()
            .writer(SharedBuf::default())
            .getenv(env_fixture(&[("GITHUB_PATH", &path_path)]))
            .build();

        action.add_path("/opt/tool/bin").unwrap();
        action.add_path("/usr/local/go/bin").unwrap();

        let e = crate::constants::LINE_ENDING;
        assert_eq!(
            std::fs::read_to_string(&path_file).unwrap(),
            format!("/opt/tool/bin{e}/usr/local/go/bin{e}")
        );
    }

    #[test]
    fn add_step_summary_appends_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let summary_file = dir.path().join("summary");
        let summary_path = summary_file.to_str().unwrap().to_string();

        let action = Action::builder()
            .writer(SharedBuf::default())
            .getenv(env_fixture(&[("GITHUB_STEP_SUMMARY", &summary_path)]))
            .build();

        action.add_step_summary("## Results\n\n- all green").unwrap();

        let e = crate::constants::LINE_ENDING;
        assert_eq!(
            std::fs::read_to_string(&summary_file).unwrap(),
            format!("## Results\n\n- all green{e}")
        );
    }

    #[test]
    fn file_command_without_target_is_an_error() {
        let (action, buf) = action_with_buf();
        let err = action.set_env("k", "v").unwrap_err();
        assert!(
            matches!(err, ActionsError::MissingFileCommandTarget(ref var) if var == "GITHUB_ENV")
        );
        // No deprecated stream fallback is emitted.
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn issue_command_surfaces_write_errors() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("sink closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let action = Action::builder()
            .writer(FailingWriter)
            .getenv(env_fixture(&[]))
            .build();
        let err = action.group("g").unwrap_err();
        assert!(matches!(err, ActionsError::StreamWrite(_)));
    }
}
