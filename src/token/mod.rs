//! Email token lifecycle.
//!
//! A token is 32 random bytes, base64url encoded, sent to the user inside a
//! link and never stored. The store keeps its SHA-256 digest, tagged with the
//! algorithm name, under the normalized email. There is at most one pending
//! digest per email: issuing again replaces it, and any verification attempt
//! (success or failure) removes it.
//!
//! Tokens do not expire on their own; a pending token stays valid until it is
//! redeemed, guessed at, or superseded.

mod error;
pub mod hasher;
pub mod identity;
mod issuer;
pub mod postgres;
pub mod registry;
mod session;
pub mod state;
pub mod store;
mod verifier;

pub use error::{Error, Result};
pub use hasher::{HashAlgorithm, TokenDigest};
pub use issuer::{TOKEN_BYTES, TokenIssuer};
pub use postgres::PgDigestStore;
pub use registry::{LoginService, LoginServiceRegistry};
pub use session::{
    Authenticator, EmailTokenAuthenticator, OpaqueSessionMinter, Session, SessionMinter,
};
pub use state::{SERVICE_ID, SERVICE_LABEL, ServiceListener, ServiceState};
pub use store::{DigestStore, MemoryDigestStore};
pub use verifier::{SessionGrant, TokenVerifier};
