// actions-sdk: SDK for authoring GitHub Actions in Rust.
// Wraps the workflow command wire format from `actions-core` with the
// transports and conveniences an action actually needs: stream commands on
// stdout, environment-file records, input lookup, and OIDC token retrieval.

pub mod action;
pub mod constants;
pub mod error;
pub mod file_command;
pub mod github_context;
pub mod oidc;

// ---------------------------------------------------------------------------
// Re-exports for convenient access
// ---------------------------------------------------------------------------

pub use action::{Action, ActionBuilder, EnvLookup, ExitFn};
pub use actions_core::{Command, CommandProperties, CommandValue};
pub use error::ActionsError;
pub use github_context::GitHubContext;
