use utoipa::OpenApi;

use super::handlers::{health, login, request, services};
use crate::token::LoginService;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        services::services,
        request::request_token,
        login::login,
    ),
    components(schemas(health::Health, request::TokenRequest, LoginService)),
    tags(
        (name = "health", description = "Service health"),
        (name = "email-token", description = "Passwordless email + token login")
    )
)]
struct ApiDoc;

/// OpenAPI document for every documented route.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
