// OIDC token retrieval from the runtime's token endpoint.
// One GET with bearer auth; the endpoint returns `{"value": "<token>"}`.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::action::Action;
use crate::constants::{OIDC_REQUEST_TOKEN_ENV, OIDC_REQUEST_URL_ENV};
use crate::error::ActionsError;

/// Client-level timeout for the token request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on how much of the response body is read before parsing.
const MAX_BODY_BYTES: usize = 64_000;

/// The default HTTP client used when the builder is not given one.
pub(crate) fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct IdTokenResponse {
    #[serde(default)]
    value: String,
}

impl Action {
    /// Mint an OIDC token from the runtime's token endpoint.
    ///
    /// Requires `ACTIONS_ID_TOKEN_REQUEST_URL` and
    /// `ACTIONS_ID_TOKEN_REQUEST_TOKEN` in the environment. A non-empty
    /// `audience` is added as a query parameter. Non-200 responses fail with
    /// the (truncated) body as context.
    pub async fn get_id_token(&self, audience: &str) -> Result<String, ActionsError> {
        let request_url = self.getenv(OIDC_REQUEST_URL_ENV);
        if request_url.is_empty() {
            return Err(ActionsError::MissingOidcConfig(OIDC_REQUEST_URL_ENV));
        }

        let request_token = self.getenv(OIDC_REQUEST_TOKEN_ENV);
        if request_token.is_empty() {
            return Err(ActionsError::MissingOidcConfig(OIDC_REQUEST_TOKEN_ENV));
        }

        let mut url =
            Url::parse(&request_url).map_err(|e| ActionsError::OidcRequest(Box::new(e)))?;
        if !audience.is_empty() {
            url.query_pairs_mut().append_pair("audience", audience);
        }

        tracing::debug!(%url, "requesting OIDC token");

        let mut response = self
            .http_client
            .get(url)
            .bearer_auth(request_token)
            .send()
            .await
            .map_err(|e| ActionsError::OidcRequest(Box::new(e)))?;

        let status = response.status();

        // Read at most MAX_BODY_BYTES of the body.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ActionsError::OidcRequest(Box::new(e)))?
        {
            let remaining = MAX_BODY_BYTES - body.len();
            let take = remaining.min(chunk.len());
            body.extend_from_slice(&chunk[..take]);
            if take < chunk.len() || body.len() == MAX_BODY_BYTES {
                break;
            }
        }
        let body = String::from_utf8_lossy(&body).trim().to_string();

        if status.as_u16() != 200 {
            return Err(ActionsError::OidcNonSuccessStatus {
                status: status.as_u16(),
                body,
            });
        }

        let token: IdTokenResponse =
            serde_json::from_str(&body).map_err(ActionsError::OidcMalformedResponse)?;
        Ok(token.value)
    }
}
