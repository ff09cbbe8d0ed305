//! Route handlers for email token login.
//!
//! Handlers receive the shared `AuthState` as an `Extension` and translate
//! `token::Error` into HTTP responses. A missing token and a wrong token are
//! logged separately but answered identically.

pub mod health;
pub mod login;
pub mod request;
pub mod services;
mod state;
mod utils;

pub use state::{AuthConfig, AuthState};
pub use utils::{LOGIN_PATH_PREFIX, SESSION_COOKIE_NAME};
