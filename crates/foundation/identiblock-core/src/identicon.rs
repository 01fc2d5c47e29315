//! Identicon - the composed result handed to presentation

use crate::color::{Hls, Rgb};
use crate::digest::{derive_digest, Digest, Identity};
use crate::pattern::Pattern;
use crate::resolve::IdentityResolver;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Pattern and color derived from one identity
///
/// Deserializing re-derives pattern and color from `digest`; stored values
/// for those fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredIdenticon")]
pub struct Identicon {
    /// Absent when built straight from a digest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    pub digest: Digest,
    pub pattern: Pattern,
    pub hls: Hls,
    pub color: Rgb,
}

impl Identicon {
    pub fn from_identity(identity: Identity) -> Self {
        let mut identicon = Self::from_digest(derive_digest(identity));
        identicon.identity = Some(identity);
        identicon
    }

    pub fn from_digest(digest: Digest) -> Self {
        let pattern = Pattern::from_digest(&digest);
        let hls = Hls::from_digest(&digest);
        let color = hls.to_rgb();

        Self {
            identity: None,
            digest,
            pattern,
            hls,
            color,
        }
    }
}

#[derive(Deserialize)]
struct StoredIdenticon {
    identity: Option<Identity>,
    digest: Digest,
}

impl TryFrom<StoredIdenticon> for Identicon {
    type Error = Error;

    fn try_from(stored: StoredIdenticon) -> Result<Self> {
        match stored.identity {
            Some(identity) => {
                let identicon = Self::from_identity(identity);
                if identicon.digest != stored.digest {
                    return Err(Error::MalformedDigest(format!(
                        "{} is not the digest of identity {}",
                        stored.digest, identity
                    )));
                }
                Ok(identicon)
            }
            None => Ok(Self::from_digest(stored.digest)),
        }
    }
}

/// Resolve `username` once, then derive its identicon
pub async fn generate(resolver: &dyn IdentityResolver, username: &str) -> Result<Identicon> {
    tracing::info!(resolver = resolver.name(), username, "resolving identity");
    let identity = resolver.resolve(username).await?;
    tracing::info!(username, %identity, "resolved identity");
    Ok(Identicon::from_identity(identity))
}
