//! # emailtoken
//!
//! Passwordless login by email. A user asks for a link, the server emails a
//! single-use token and keeps only its SHA-256 digest, keyed by the
//! normalized address. Following the link redeems the token exactly once.
//!
//! ## Token lifecycle
//!
//! - **Issue:** a fresh 256-bit token replaces any pending one for the address.
//! - **Verify:** the pending digest is removed before it is compared, so a
//!   token can never be redeemed twice and a wrong guess burns the link.
//! - **No expiry:** a pending token stays valid until it is used or replaced.
//!
//! ## Service gate
//!
//! Issuing and verifying both require the service to be enabled. Enabling
//! registers the `emailToken` login service with every subscribed listener
//! and disabling deregisters it.

pub mod api;
pub mod cli;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
