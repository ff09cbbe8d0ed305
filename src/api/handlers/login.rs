//! Inbound login link: `GET /_emailToken/:email/:token`.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{error, info};

use super::AuthState;
use super::utils::session_cookie;
use crate::token::Error;

const INVALID_LINK: &str = "This login link is invalid or has expired.";
const SERVICE_DISABLED: &str = "Email token login is currently disabled.";
const LOGIN_FAILED: &str = "Login failed. Please try again later.";

#[utoipa::path(
    get,
    path = "/_emailToken/{email}/{token}",
    params(
        ("email" = String, Path, description = "Email address the token was issued for"),
        ("token" = String, Path, description = "Plaintext login token")
    ),
    responses(
        (status = 303, description = "Logged in; session cookie set, redirect to /"),
        (status = 400, description = "Invalid or expired link", body = String,
            content_type = "text/html"),
        (status = 500, description = "Login failed", body = String, content_type = "text/html"),
        (status = 503, description = "Email token login is disabled", body = String,
            content_type = "text/html")
    ),
    tag = "email-token"
)]
pub async fn login(
    Path((email, token)): Path<(String, String)>,
    auth_state: Extension<Arc<AuthState>>,
) -> Response {
    match auth_state.authenticator().login(&email, &token).await {
        Ok(session) => {
            let cookie = match session_cookie(auth_state.config(), session.token.expose_secret()) {
                Ok(cookie) => cookie,
                Err(err) => {
                    error!("Failed to build session cookie: {err}");
                    return error_view(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
                }
            };
            let mut headers = HeaderMap::new();
            headers.insert(SET_COOKIE, cookie);
            (headers, Redirect::to("/")).into_response()
        }
        // No pending token and a wrong token render the same page.
        Err(err) if err.is_rejection() => {
            info!("Email token login rejected: {err}");
            error_view(StatusCode::BAD_REQUEST, INVALID_LINK)
        }
        Err(Error::ServiceDisabled) => {
            error_view(StatusCode::SERVICE_UNAVAILABLE, SERVICE_DISABLED)
        }
        Err(err) => {
            error!("Email token login failed: {err}");
            error_view(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED)
        }
    }
}

fn error_view(status: StatusCode, reason: &str) -> Response {
    let body = format!(
        "<!doctype html>\n<html><head><title>Login failed</title></head>\
         <body><h1>Login failed</h1><p class=\"error\">{reason}</p>\
         <p><a href=\"/\">Back</a></p></body></html>\n"
    );
    (status, Html(body)).into_response()
}
