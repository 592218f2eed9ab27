// Error types for the SDK's transports and the OIDC client.

use thiserror::Error;

/// Errors surfaced by [`Action`](crate::Action) operations.
///
/// Missing inputs are not errors (they yield the empty string); everything
/// here is either a caller programming error, a broken transport, or a
/// failed OIDC exchange.
#[derive(Debug, Error)]
pub enum ActionsError {
    /// A `with_fields_slice` entry did not contain a `=`.
    #[error("{0:?} is not a valid key=value pair")]
    InvalidFieldPair(String),

    /// Writing a stream command to the output sink failed. There is no
    /// fallback for a broken output stream.
    #[error("failed to write command to the output stream")]
    StreamWrite(#[source] std::io::Error),

    /// The environment variable naming a file command's target path is
    /// unset or empty.
    #[error("missing {0} in environment; file commands are unavailable")]
    MissingFileCommandTarget(String),

    /// Opening or appending to a file command target failed.
    #[error("unable to write command to the environment file")]
    FileCommandWrite(#[source] std::io::Error),

    /// One of the OIDC request environment variables is unset.
    #[error("missing {0} in environment")]
    MissingOidcConfig(&'static str),

    /// The OIDC token request could not be built or sent.
    #[error("failed to request OIDC token")]
    OidcRequest(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The OIDC endpoint returned a non-200 status. Carries the (truncated)
    /// response body for context.
    #[error("non-successful response from minting OIDC token (status {status}): {body}")]
    OidcNonSuccessStatus { status: u16, body: String },

    /// The OIDC response body was not the expected JSON shape.
    #[error("failed to process OIDC response as JSON")]
    OidcMalformedResponse(#[source] serde_json::Error),

    /// The workflow event payload file could not be read or parsed.
    #[error("failed to load workflow event payload: {0}")]
    EventPayload(String),
}
