use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("email token login is disabled")]
    ServiceDisabled,
    #[error("no pending token")]
    NoPendingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Digest store, randomness or session minting failed.
    #[error("backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

impl Error {
    /// True for failures the end user sees as one "invalid link" outcome.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NoPendingToken | Self::InvalidToken | Self::UnsupportedAlgorithm(_)
        )
    }
}
