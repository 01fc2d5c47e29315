//! Digest Deriver
//!
//! Identity → MD5 over its base-10 ASCII encoding → 32 lowercase hex chars.
//! MD5 is kept for compatibility with the existing visual scheme, not for
//! any security property.

use crate::{Error, Result};
use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Hex characters in a digest (16 bytes, two chars each)
pub const DIGEST_LEN: usize = 32;

/// Hex characters that fit in a `u32`
const MAX_SLICE_CHARS: usize = 8;

/// Externally-resolved, non-negative account id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(u64);

impl Identity {
    /// Accept a signed id, rejecting negatives
    pub fn new(id: i64) -> Result<Self> {
        u64::try_from(id)
            .map(Self)
            .map_err(|_| Error::InvalidInput(format!("negative identity {}", id)))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Identity {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for Identity {
    type Err = Error;

    /// Decimal digits only. A leading `-` is reported as a negative id
    /// rather than a parse failure.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('-') {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidInput(format!("negative identity {}", s)));
            }
        }
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidInput(format!("not a decimal identity: {:?}", s)));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("{:?}: {}", s, e)))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 32-character lowercase hex MD5 digest
///
/// Can only be built by [`derive_digest`] or [`Digest::parse`], so every
/// value satisfies the shape invariant and downstream derivers are total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Validate an existing hex digest
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != DIGEST_LEN {
            return Err(Error::MalformedDigest(format!(
                "expected {} hex characters, got {}",
                DIGEST_LEN,
                s.len()
            )));
        }
        if let Some(bad) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(Error::MalformedDigest(format!(
                "unexpected character {:?} (lowercase hex only)",
                bad
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the hex character at `index` (< `DIGEST_LEN`)
    pub(crate) fn nibble(&self, index: usize) -> u8 {
        let c = self.0.as_bytes()[index];
        match c {
            b'0'..=b'9' => c - b'0',
            _ => c - b'a' + 10,
        }
    }

    /// Parse a hex character range as an unsigned integer.
    /// At most eight characters fit in a `u32`.
    pub(crate) fn slice_value(&self, range: Range<usize>) -> u32 {
        assert!(
            range.end <= DIGEST_LEN && range.len() <= MAX_SLICE_CHARS,
            "digest slice {:?} out of bounds",
            range
        );
        range.fold(0u32, |acc, i| (acc << 4) | u32::from(self.nibble(i)))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Digest> for String {
    fn from(d: Digest) -> Self {
        d.0
    }
}

/// MD5 of the identity's decimal string, lowercase hex
pub fn derive_digest(identity: Identity) -> Digest {
    let encoded = identity.value().to_string();
    let mut hasher = Md5::new();
    hasher.update(encoded.as_bytes());
    let digest = Digest(hex::encode(hasher.finalize()));
    tracing::debug!(%identity, %digest, "derived digest");
    digest
}

/// Validate a signed id and derive its digest
pub fn digest_for(id: i64) -> Result<Digest> {
    Identity::new(id).map(derive_digest)
}
