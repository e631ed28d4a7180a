//! OpenSSH public key lines.
//!
//! A key line is `<algorithm> <base64 material> [comment]`. This module parses
//! such lines, normalizes them to always carry a comment, and compares keys by
//! algorithm and material only.

use std::{fmt, str::FromStr};

pub mod errors;

pub use errors::KeyError;

use crate::constants::SYNC_COMMENT;

/// A parsed OpenSSH public key.
///
/// Equality (`PartialEq`) compares all three fields; use
/// [`SshPublicKey::is_equivalent`] to compare keys regardless of comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshPublicKey {
    algorithm: String,
    material: String,
    comment: Option<String>,
}

impl SshPublicKey {
    /// Parse a raw key line.
    ///
    /// Surrounding whitespace is ignored. The first two whitespace-separated
    /// tokens are the algorithm and key material; anything after them is kept
    /// verbatim (minus surrounding whitespace) as the comment.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let (algorithm, rest) = next_token(raw.trim());
        if algorithm.is_empty() {
            return Err(KeyError::InvalidKeyFormat {
                reason: "key is empty".to_string(),
            });
        }

        let (material, rest) = next_token(rest);
        if material.is_empty() {
            return Err(KeyError::InvalidKeyFormat {
                reason: format!("missing key material after algorithm '{algorithm}'"),
            });
        }

        let comment = (!rest.is_empty()).then(|| rest.to_string());
        Ok(Self {
            algorithm: algorithm.to_string(),
            material: material.to_string(),
            comment,
        })
    }

    /// Parse a raw key line and default its comment to [`SYNC_COMMENT`].
    pub fn normalize(raw: &str) -> Result<Self, KeyError> {
        Self::normalize_with_comment(raw, SYNC_COMMENT)
    }

    /// Parse a raw key line, filling in `default_comment` when the key has none.
    pub fn normalize_with_comment(raw: &str, default_comment: &str) -> Result<Self, KeyError> {
        let mut key = Self::parse(raw)?;
        if key.comment.is_none() {
            key.comment = Some(default_comment.to_string());
        }
        Ok(key)
    }

    /// Build a key from its parts, as Gerrit reports them separately.
    pub fn from_parts(
        algorithm: impl Into<String>,
        material: impl Into<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            material: material.into(),
            comment: comment.filter(|c| !c.trim().is_empty()),
        }
    }

    /// The key algorithm token, e.g. `ssh-ed25519`.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// The base64 key material.
    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Whether `other` is the same key, ignoring comments.
    pub fn is_equivalent(&self, other: &SshPublicKey) -> bool {
        self.algorithm == other.algorithm && self.material == other.material
    }
}

impl fmt::Display for SshPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.algorithm, self.material)?;
        if let Some(comment) = &self.comment {
            write!(f, " {comment}")?;
        }
        Ok(())
    }
}

impl FromStr for SshPublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split off the first whitespace-delimited token, returning it and the trimmed rest.
fn next_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}
