//! Link and cookie helpers.

use anyhow::{Result, anyhow};
use axum::http::{HeaderValue, header::InvalidHeaderValue};
use url::Url;

use super::state::AuthConfig;

pub const SESSION_COOKIE_NAME: &str = "emailtoken_session";

/// Path prefix of the emailed login link.
pub const LOGIN_PATH_PREFIX: &str = "_emailToken";

/// Build `{base}/_emailToken/{email}/{token}` with each segment percent-encoded.
pub(super) fn build_login_url(base_url: &str, email: &str, token: &str) -> Result<String> {
    let mut url =
        Url::parse(base_url).map_err(|err| anyhow!("invalid base URL {base_url}: {err}"))?;
    url.path_segments_mut()
        .map_err(|()| anyhow!("base URL cannot carry a path: {base_url}"))?
        .pop_if_empty()
        .extend([LOGIN_PATH_PREFIX, email, token]);
    Ok(url.to_string())
}

/// Build an `HttpOnly` cookie carrying the session token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}
