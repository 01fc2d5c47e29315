//! # Identiblock Core
//!
//! Deterministic identicon derivation from a numeric account id.
//!
//! ```text
//!   username ──resolve──▶ Identity ──md5──▶ Digest ─┬─▶ Pattern (5x5, mirrored)
//!   (external)                                      └─▶ Hls ──▶ Rgb
//! ```
//!
//! Every step after resolution is a pure function. Two implementations fed
//! the same identity must agree bit-for-bit on the digest and cell-for-cell
//! on the pattern.

pub mod color;
pub mod digest;
pub mod identicon;
pub mod pattern;
pub mod resolve;

pub use color::{hls_to_rgb, Hls, Rgb};
pub use digest::{derive_digest, digest_for, Digest, Identity, DIGEST_LEN};
pub use identicon::{generate, Identicon};
pub use pattern::{Pattern, GRID_SIZE};
pub use resolve::{IdentityResolver, ResolveError, StaticResolver};

/// Result type for identiblock-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in identiblock-core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Negative or malformed identity encoding
    #[error("Invalid identity: {0}")]
    InvalidInput(String),

    /// Digest is not exactly 32 lowercase hex characters
    #[error("Malformed digest: {0}")]
    MalformedDigest(String),

    /// Grid that breaks the column 0/4, 1/3 mirror
    #[error("Pattern is not mirror-symmetric")]
    AsymmetricPattern,

    /// Propagated unchanged from the identity lookup
    #[error("Identity resolution failed: {0}")]
    ResolutionFailed(#[from] ResolveError),
}
