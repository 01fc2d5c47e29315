//! # Identiblock GitHub Resolver
//!
//! Resolves a GitHub login to its numeric account id via the public REST API
//! (`GET /users/{login}`).
//!
//! ## Usage
//!
//! ```ignore
//! use identiblock_github::{GithubConfig, GithubResolver};
//!
//! let resolver = GithubResolver::new(GithubConfig::from_env())?;
//! let identicon = identiblock_core::generate(&resolver, "octocat").await?;
//! ```

pub mod config;
pub mod resolver;

pub use config::GithubConfig;
pub use resolver::{validate_login, GithubResolver};

/// Result type for GitHub resolver setup
pub type Result<T> = std::result::Result<T, Error>;

/// Errors building the resolver
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
