use axum::{Json, extract::Extension, response::IntoResponse};
use std::sync::Arc;

use super::AuthState;

/// List the login options currently offered to the account UI.
#[utoipa::path(
    get,
    path = "/v1/email-token/services",
    responses(
        (status = 200, description = "Registered login services",
            body = [crate::token::LoginService])
    ),
    tag = "email-token"
)]
pub async fn services(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    Json(auth_state.registry().services())
}
