//! One-way token digests.
//!
//! Tokens are never stored in plaintext. The digest is persisted together with
//! the identifier of the algorithm that produced it, so verification can keep
//! working for stored rows after the default scheme changes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};
use subtle::ConstantTimeEq;

use super::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
}

impl HashAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha-256",
        }
    }

    fn digest(self, plaintext: &str) -> String {
        match self {
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(plaintext.as_bytes());
                format!("{:x}", hasher.finalize())
            }
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sha-256" => Ok(Self::Sha256),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Stored representation of a token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDigest {
    pub digest: String,
    pub algorithm: String,
}

impl TokenDigest {
    /// Constant-time comparison of two digests.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        let same_digest: bool = self.digest.as_bytes().ct_eq(other.digest.as_bytes()).into();
        same_digest && self.algorithm == other.algorithm
    }
}

/// Hash a token with the default algorithm.
#[must_use]
pub fn hash(plaintext: &str) -> TokenDigest {
    hash_as(HashAlgorithm::default(), plaintext)
}

#[must_use]
pub fn hash_as(algorithm: HashAlgorithm, plaintext: &str) -> TokenDigest {
    TokenDigest {
        digest: algorithm.digest(plaintext),
        algorithm: algorithm.as_str().to_string(),
    }
}

/// Hash a token with the algorithm named by a stored digest.
///
/// # Errors
/// Returns `Error::UnsupportedAlgorithm` when the name is unknown to this build.
pub fn hash_with(algorithm: &str, plaintext: &str) -> Result<TokenDigest, Error> {
    Ok(hash_as(algorithm.parse()?, plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable() {
        let first = hash("token");
        let second = hash("token");
        let different = hash("other");
        assert_eq!(first, second);
        assert_ne!(first, different);
    }

    #[test]
    fn hash_is_tagged_hex_sha256() {
        let digest = hash("abc");
        assert_eq!(digest.algorithm, "sha-256");
        assert_eq!(
            digest.digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn empty_input_is_valid() {
        let digest = hash("");
        assert_eq!(digest.digest.len(), 64);
    }

    #[test]
    fn hash_with_uses_named_algorithm() {
        let digest = hash_with("sha-256", "token");
        assert_eq!(digest.ok(), Some(hash("token")));
    }

    #[test]
    fn hash_with_rejects_unknown_algorithm() {
        let result = hash_with("md5", "token");
        assert!(matches!(result, Err(Error::UnsupportedAlgorithm(name)) if name == "md5"));
    }

    #[test]
    fn matches_requires_same_algorithm() {
        let stored = hash("token");
        assert!(stored.matches(&hash("token")));
        assert!(!stored.matches(&hash("token2")));

        let relabelled = TokenDigest {
            digest: stored.digest.clone(),
            algorithm: "sha-512".to_string(),
        };
        assert!(!stored.matches(&relabelled));
    }

    #[test]
    fn algorithm_round_trips_through_display() {
        let parsed: Result<HashAlgorithm, _> = HashAlgorithm::Sha256.to_string().parse();
        assert_eq!(parsed.ok(), Some(HashAlgorithm::Sha256));
    }
}
