//! GitHub login → account id
//!
//! Features:
//! - Login validated before any request is made
//! - 404 reported as `NotFound`, never retried
//! - Transient network failures retried with exponential backoff

use crate::{Error, GithubConfig, Result};
use async_trait::async_trait;
use identiblock_core::{Identity, IdentityResolver, ResolveError};
use reqwest::StatusCode;
use std::time::Duration;

/// Longest login GitHub allows
const MAX_LOGIN_LEN: usize = 39;

/// Resolver backed by the GitHub REST API
pub struct GithubResolver {
    config: GithubConfig,
    client: reqwest::Client,
    /// First retry delay, doubled per attempt
    backoff: Duration,
}

impl GithubResolver {
    pub fn new(config: GithubConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::ClientSetup(e.to_string()))?;

        Ok(Self {
            config,
            client,
            backoff: Duration::from_secs(1),
        })
    }

    /// Set the initial retry delay
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    /// `{api_base}/users/{login}`
    pub fn user_url(&self, login: &str) -> String {
        format!("{}/users/{}", self.config.api_base, login)
    }

    async fn resolve_with_retry(&self, login: &str) -> std::result::Result<Identity, ResolveError> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once(login).await {
                Ok(identity) => return Ok(identity),
                Err(e) if e.is_transient() && attempt + 1 < self.config.max_attempts => {
                    let delay = self.backoff * (1u32 << attempt.min(16));
                    tracing::warn!(
                        login,
                        attempt = attempt + 1,
                        max_attempts = self.config.max_attempts,
                        error = %e,
                        "GitHub lookup failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, login: &str) -> std::result::Result<Identity, ResolveError> {
        let mut request = self
            .client
            .get(self.user_url(login))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(ResolveError::NotFound(login.to_string())),
            status => return Err(ResolveError::Network(format!("HTTP {}", status))),
        }

        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        parse_user(&body)
    }
}

#[async_trait]
impl IdentityResolver for GithubResolver {
    fn name(&self) -> &str {
        "github"
    }

    async fn resolve(&self, username: &str) -> std::result::Result<Identity, ResolveError> {
        let login = validate_login(username)?;
        let identity = self.resolve_with_retry(login).await?;
        tracing::debug!(login, %identity, "GitHub lookup succeeded");
        Ok(identity)
    }
}

/// Check a login against GitHub's naming rules, returning it trimmed
pub fn validate_login(username: &str) -> std::result::Result<&str, ResolveError> {
    let login = username.trim();
    let valid = !login.is_empty()
        && login.len() <= MAX_LOGIN_LEN
        && login.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        && !login.starts_with('-')
        && !login.ends_with('-');

    if valid {
        Ok(login)
    } else {
        Err(ResolveError::InvalidUsername(username.to_string()))
    }
}

/// Pull the account id out of a `/users/{login}` response body
fn parse_user(body: &str) -> std::result::Result<Identity, ResolveError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ResolveError::InvalidResponse(format!("not JSON: {}", e)))?;

    let id = value
        .get("id")
        .ok_or_else(|| ResolveError::InvalidResponse("missing \"id\" field".into()))?;

    if let Some(n) = id.as_u64() {
        return Ok(Identity::from(n));
    }
    match id.as_i64() {
        Some(n) => Identity::new(n).map_err(|e| ResolveError::InvalidResponse(e.to_string())),
        None => Err(ResolveError::InvalidResponse(format!("id is not an integer: {}", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// One-shot HTTP server per canned response; yields the raw requests seen
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                loop {
                    let n = socket.read(&mut buf[read..]).await.unwrap();
                    read += n;
                    if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                requests.push(String::from_utf8_lossy(&buf[..read]).to_string());

                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
            requests
        });

        (base, handle)
    }

    fn resolver(base: &str) -> GithubResolver {
        GithubResolver::new(GithubConfig::default().api_base(base))
            .unwrap()
            .backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_validate_login() {
        assert_eq!(validate_login("octocat"), Ok("octocat"));
        assert_eq!(validate_login(" mona-lisa "), Ok("mona-lisa"));
        assert!(validate_login("").is_err());
        assert!(validate_login("-lead").is_err());
        assert!(validate_login("trail-").is_err());
        assert!(validate_login("has space").is_err());
        assert!(validate_login("../etc").is_err());
        assert!(validate_login(&"a".repeat(40)).is_err());
        assert!(validate_login(&"a".repeat(39)).is_ok());
    }

    #[test]
    fn test_parse_user() {
        assert_eq!(
            parse_user(r#"{"login":"octocat","id":583231}"#),
            Ok(Identity::from(583231))
        );
        assert_eq!(parse_user(r#"{"id":0}"#), Ok(Identity::from(0)));
        assert!(matches!(parse_user(r#"{"login":"x"}"#), Err(ResolveError::InvalidResponse(_))));
        assert!(matches!(parse_user(r#"{"id":-5}"#), Err(ResolveError::InvalidResponse(_))));
        assert!(matches!(parse_user(r#"{"id":"12"}"#), Err(ResolveError::InvalidResponse(_))));
        assert!(matches!(parse_user("<html>"), Err(ResolveError::InvalidResponse(_))));
    }

    #[test]
    fn test_user_url() {
        let r = resolver("https://ghe.example.com/api/v3/");
        assert_eq!(r.user_url("octocat"), "https://ghe.example.com/api/v3/users/octocat");
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = GithubConfig::default().max_attempts(0);
        assert!(matches!(GithubResolver::new(config), Err(Error::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let (base, server) = serve(vec![(200, r#"{"login":"octocat","id":583231}"#)]).await;
        let identity = resolver(&base).resolve("octocat").await.unwrap();
        assert_eq!(identity.value(), 583231);

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("GET /users/octocat "));
        assert!(requests[0].to_ascii_lowercase().contains("user-agent: identiblock/"));
    }

    #[tokio::test]
    async fn test_resolve_sends_token() {
        let (base, server) = serve(vec![(200, r#"{"id":1}"#)]).await;
        let r = GithubResolver::new(GithubConfig::default().api_base(&base).token("t0k3n")).unwrap();
        r.resolve("someone").await.unwrap();
        let requests = server.await.unwrap();
        assert!(requests[0].to_ascii_lowercase().contains("authorization: bearer t0k3n"));
    }

    #[tokio::test]
    async fn test_resolve_not_found_not_retried() {
        let (base, server) = serve(vec![(404, r#"{"message":"Not Found"}"#)]).await;
        let r = GithubResolver::new(GithubConfig::default().api_base(&base).max_attempts(3))
            .unwrap()
            .backoff(Duration::from_millis(1));
        let err = r.resolve("ghost").await.unwrap_err();
        assert_eq!(err, ResolveError::NotFound("ghost".into()));
        assert_eq!(server.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_retries_server_errors() {
        let (base, server) = serve(vec![
            (502, r#"{"message":"Bad Gateway"}"#),
            (200, r#"{"id":42}"#),
        ])
        .await;
        let r = GithubResolver::new(GithubConfig::default().api_base(&base).max_attempts(2))
            .unwrap()
            .backoff(Duration::from_millis(1));
        assert_eq!(r.resolve("flaky").await.unwrap().value(), 42);
        assert_eq!(server.await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_single_attempt_by_default() {
        let (base, server) = serve(vec![(500, "{}")]).await;
        let err = resolver(&base).resolve("down").await.unwrap_err();
        assert!(matches!(err, ResolveError::Network(ref m) if m.contains("500")));
        assert_eq!(server.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_login_makes_no_request() {
        let r = resolver("http://127.0.0.1:9");
        let err = r.resolve("not a login").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidUsername(_)));
    }
}
