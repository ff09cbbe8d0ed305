//! Login link requests.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

use super::AuthState;
use super::utils::build_login_url;
use crate::api::email::{EmailMessage, LOGIN_TEMPLATE};
use crate::token::{Error, identity::normalize_email};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TokenRequest {
    pub email: String,
}

/// Issue a login token and hand the link to the email sender.
///
/// Malformed addresses get the same 204 as accepted ones so the endpoint
/// cannot be used to probe addresses.
#[utoipa::path(
    post,
    path = "/v1/email-token/request",
    request_body = TokenRequest,
    responses(
        (status = 204, description = "Request accepted"),
        (status = 400, description = "Missing payload", body = String),
        (status = 500, description = "Token could not be issued or delivered", body = String),
        (status = 503, description = "Email token login is disabled", body = String)
    ),
    tag = "email-token"
)]
pub async fn request_token(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<TokenRequest>>,
) -> impl IntoResponse {
    let request: TokenRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let token = match auth_state.issuer().issue(&request.email).await {
        Ok(token) => token,
        Err(Error::InvalidEmail) => {
            debug!("ignoring email token request for malformed address");
            return StatusCode::NO_CONTENT.into_response();
        }
        Err(Error::ServiceDisabled) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                "Email token login is disabled".to_string(),
            )
                .into_response();
        }
        Err(err) => {
            error!("Failed to issue email token: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Request failed".to_string())
                .into_response();
        }
    };

    let email = normalize_email(&request.email);
    let link = match build_login_url(auth_state.config().base_url(), &email, token.expose_secret())
    {
        Ok(link) => link,
        Err(err) => {
            error!("Failed to build login link: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Request failed".to_string())
                .into_response();
        }
    };

    let message = EmailMessage {
        to_email: email,
        template: LOGIN_TEMPLATE.to_string(),
        link: SecretString::from(link),
    };

    if let Err(err) = auth_state.sender().send(&message) {
        error!("Failed to send login email: {err}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Request failed".to_string()).into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}
