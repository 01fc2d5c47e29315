//! Identity resolution seam
//!
//! Username → numeric account id is the only networked step of the
//! pipeline. It lives behind [`IdentityResolver`] so the deterministic core
//! can run against fixed ids.

use crate::digest::Identity;
use async_trait::async_trait;
use std::collections::HashMap;

/// Failures reported by a resolver, propagated to callers unchanged
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No account named {0:?}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),
}

impl ResolveError {
    /// Worth another attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Resolver trait - username lookups implement this
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolver identifier, for logs
    fn name(&self) -> &str;

    /// Look up the account id for `username`
    async fn resolve(&self, username: &str) -> Result<Identity, ResolveError>;
}

/// Fixed username → id table
///
/// Lookups are case-insensitive, matching how account logins compare.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<String, Identity>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder style)
    pub fn with(mut self, username: &str, id: impl Into<Identity>) -> Self {
        self.insert(username, id);
        self
    }

    pub fn insert(&mut self, username: &str, id: impl Into<Identity>) {
        self.entries.insert(username.to_ascii_lowercase(), id.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for StaticResolver {
    fn name(&self) -> &str {
        "static"
    }

    async fn resolve(&self, username: &str) -> Result<Identity, ResolveError> {
        self.entries
            .get(&username.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| ResolveError::NotFound(username.to_string()))
    }
}
