//! OAuth2 credential lifecycle for the Gmail API
//!
//! Owns the on-disk token cache and decides, once per run, whether the cached
//! credentials can be reused, refreshed against the token endpoint, or have to
//! be replaced through a fresh installed-app consent flow.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;
use yup_oauth2::ApplicationSecret;

use crate::config::AuthConfig;
use crate::error::{ReportError, Result};

/// Read-only scope; listing and fetching messages needs nothing more
pub const GMAIL_SCOPES: &[&str] = &["https://www.googleapis.com/auth/gmail.readonly"];

/// Tokens this close to expiry are treated as already expired
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// Cached OAuth token bundle
///
/// Carries the client id/secret and token endpoint alongside the tokens so a
/// refresh works even when the client-secret file is no longer present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub client_id: String,
    pub client_secret: String,
    pub token_uri: String,
}

impl StoredCredential {
    /// Usable as-is: access token present and not (about to be) expired.
    /// A credential without a recorded expiry is assumed usable.
    pub fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_SKEW_SECONDS) > Utc::now(),
            None => true,
        }
    }
}

/// Where a cached credential sits in the reuse/refresh/re-consent decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    /// No cache file, or the file was unreadable
    NoCache,
    /// Cached and usable as-is, no network I/O needed
    CachedValid,
    /// Expired but carries a refresh token
    CachedExpiredRefreshable,
    /// Expired with no way to refresh; only a new consent flow helps
    CachedInvalid,
}

/// Classify a loaded cache entry
pub fn evaluate(cred: Option<&StoredCredential>) -> CredentialState {
    match cred {
        None => CredentialState::NoCache,
        Some(c) if c.is_valid() => CredentialState::CachedValid,
        Some(c) if c.refresh_token.is_some() => CredentialState::CachedExpiredRefreshable,
        Some(_) => CredentialState::CachedInvalid,
    }
}

/// On-disk credential cache
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached credential. An absent or unreadable file is treated as
    /// no cache; corruption must never abort the run.
    pub async fn load(&self) -> Option<StoredCredential> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Token cache at {:?} is unreadable ({}), ignoring it", self.path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(cred) => Some(cred),
            Err(e) => {
                warn!("Token cache at {:?} is corrupt ({}), ignoring it", self.path, e);
                None
            }
        }
    }

    /// Overwrite the cache with a new credential, creating missing parent
    /// directories first
    pub async fn persist(&self, cred: &StoredCredential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(cred)?;
        tokio::fs::write(&self.path, json).await?;
        secure_token_file(&self.path).await?;

        info!("Saved credentials to {:?}", self.path);
        Ok(())
    }
}

/// Restrict token file permissions to 0600 (owner read/write only)
#[cfg(unix)]
async fn secure_token_file(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path).await?.permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms).await?;
    Ok(())
}

/// Windows uses ACLs instead of Unix permission bits
#[cfg(windows)]
async fn secure_token_file(_path: &Path) -> Result<()> {
    Ok(())
}

/// Body returned by the token endpoint for both refresh and code exchange
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

fn credential_from_response(
    client_id: &str,
    client_secret: &str,
    token_uri: &str,
    previous_refresh_token: Option<String>,
    token: TokenResponse,
) -> StoredCredential {
    StoredCredential {
        access_token: token.access_token,
        // The refresh endpoint usually omits the refresh token; keep the old one
        refresh_token: token.refresh_token.or(previous_refresh_token),
        expiry: token.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        token_type: token.token_type.unwrap_or_else(|| "Bearer".to_string()),
        scopes: token
            .scope
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_else(|| GMAIL_SCOPES.iter().map(|s| s.to_string()).collect()),
        client_id: client_id.to_string(),
        client_secret: client_secret.to_string(),
        token_uri: token_uri.to_string(),
    }
}

/// Credential manager: cache + refresh + installed-app consent flow
pub struct Authenticator {
    credentials_path: PathBuf,
    cache: TokenCache,
    settings: AuthConfig,
    http: reqwest::Client,
}

impl Authenticator {
    pub fn new(
        credentials_path: impl Into<PathBuf>,
        token_cache_path: impl Into<PathBuf>,
        settings: AuthConfig,
    ) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            cache: TokenCache::new(token_cache_path),
            settings,
            http: reqwest::Client::new(),
        }
    }

    /// Produce a usable credential, or fail the run.
    ///
    /// A valid cached credential is returned unchanged without touching the
    /// network. An expired-but-refreshable one is refreshed and persisted. A
    /// failed refresh downgrades to the full consent flow instead of aborting.
    pub async fn authenticate(&self) -> Result<StoredCredential> {
        let cached = self.cache.load().await;
        match (evaluate(cached.as_ref()), cached) {
            (CredentialState::CachedValid, Some(cred)) => {
                info!("Found existing credentials, using them");
                Ok(cred)
            }
            (CredentialState::CachedExpiredRefreshable, Some(cred)) => {
                match self.refresh(&cred).await {
                    Ok(fresh) => {
                        self.cache.persist(&fresh).await?;
                        Ok(fresh)
                    }
                    Err(e) => {
                        warn!("{}; falling back to full authorization", e);
                        self.reauthenticate().await
                    }
                }
            }
            _ => self.reauthenticate().await,
        }
    }

    /// Exchange the refresh token for a new access token
    async fn refresh(&self, cred: &StoredCredential) -> Result<StoredCredential> {
        let refresh_token = cred
            .refresh_token
            .as_deref()
            .ok_or_else(|| ReportError::RefreshFailed("no refresh token available".to_string()))?;

        info!("Refreshing expired credentials");
        let response = self
            .http
            .post(&cred.token_uri)
            .form(&[
                ("client_id", cred.client_id.as_str()),
                ("client_secret", cred.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| ReportError::RefreshFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::RefreshFailed(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ReportError::RefreshFailed(format!("malformed token response: {}", e)))?;

        Ok(credential_from_response(
            &cred.client_id,
            &cred.client_secret,
            &cred.token_uri,
            cred.refresh_token.clone(),
            token,
        ))
    }

    /// Run the full installed-app consent flow and persist the result.
    ///
    /// The consent URL is printed rather than opened; no browser is assumed.
    async fn reauthenticate(&self) -> Result<StoredCredential> {
        if !self.credentials_path.exists() {
            return Err(ReportError::ConfigMissing(self.credentials_path.clone()));
        }

        let secret = yup_oauth2::read_application_secret(&self.credentials_path)
            .await
            .map_err(|e| ReportError::AuthError(format!("Failed to read client secret: {}", e)))?;

        info!("Starting OAuth authorization flow");
        let redirect_uri = format!("http://localhost:{}", self.settings.callback_port);
        let state = Uuid::new_v4().to_string();
        let consent_url = build_consent_url(&secret, &redirect_uri, &state)?;

        println!("Visit this URL in a browser to authorize access:");
        println!("\n{}\n", consent_url);
        info!(
            "Waiting for the authorization redirect on port {}",
            self.settings.callback_port
        );

        let code = self.wait_for_callback(&state).await?;
        let cred = self.exchange_code(&secret, &code, &redirect_uri).await?;
        self.cache.persist(&cred).await?;
        info!("Authorization successful");
        Ok(cred)
    }

    /// Serve exactly one request on the callback port and return the
    /// authorization code it carried
    async fn wait_for_callback(&self, expected_state: &str) -> Result<String> {
        let addr = format!("{}:{}", self.settings.callback_bind, self.settings.callback_port);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            ReportError::AuthError(format!("Failed to bind callback listener on {}: {}", addr, e))
        })?;

        let timeout = std::time::Duration::from_secs(self.settings.callback_timeout_secs);
        match tokio::time::timeout(timeout, accept_redirect(&listener, expected_state)).await {
            Ok(result) => result,
            Err(_) => Err(ReportError::AuthError(format!(
                "no authorization redirect received within {} seconds",
                self.settings.callback_timeout_secs
            ))),
        }
    }

    /// Exchange the authorization code for tokens, requesting offline access
    async fn exchange_code(
        &self,
        secret: &ApplicationSecret,
        code: &str,
        redirect_uri: &str,
    ) -> Result<StoredCredential> {
        let response = self
            .http
            .post(&secret.token_uri)
            .form(&[
                ("client_id", secret.client_id.as_str()),
                ("client_secret", secret.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::AuthError(format!(
                "authorization code exchange failed with HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ReportError::AuthError(format!("malformed token response: {}", e)))?;

        if token.refresh_token.is_none() {
            warn!("Token endpoint did not issue a refresh token; the next run will need consent again");
        }

        Ok(credential_from_response(
            &secret.client_id,
            &secret.client_secret,
            &secret.token_uri,
            None,
            token,
        ))
    }
}

/// Accept one connection and parse the provider redirect out of it
async fn accept_redirect(listener: &TcpListener, expected_state: &str) -> Result<String> {
    let (mut socket, _) = listener.accept().await?;
    let mut reader = BufReader::new(&mut socket);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    match parse_callback_request(&request_line, expected_state) {
        Ok(code) => {
            socket.write_all(success_response().as_bytes()).await?;
            socket.flush().await?;
            Ok(code)
        }
        Err(e) => {
            let _ = socket.write_all(failure_response().as_bytes()).await;
            Err(e)
        }
    }
}

/// Pull the authorization code out of the redirect's request line
fn parse_callback_request(request_line: &str, expected_state: &str) -> Result<String> {
    let target = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ReportError::AuthError("malformed callback request".to_string()))?;
    let query = target.splitn(2, '?').nth(1).unwrap_or("");

    let mut code = None;
    let mut state = None;
    let mut denial = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => denial = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(denial) = denial {
        return Err(ReportError::AuthError(format!("authorization was denied: {}", denial)));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(ReportError::AuthError(
            "state mismatch in authorization redirect".to_string(),
        ));
    }
    code.ok_or_else(|| {
        ReportError::AuthError("redirect did not carry an authorization code".to_string())
    })
}

fn success_response() -> String {
    let body = "<!DOCTYPE html><html><body><h1>Authentication successful!</h1>\
                <p>You may close this window and return to the terminal.</p></body></html>";
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

fn failure_response() -> String {
    let body = "<!DOCTYPE html><html><body><h1>Authentication failed</h1>\
                <p>Return to the terminal for details.</p></body></html>";
    format!(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

/// Build the provider consent URL for the installed-app flow
fn build_consent_url(secret: &ApplicationSecret, redirect_uri: &str, state: &str) -> Result<String> {
    let mut url = Url::parse(&secret.auth_uri)
        .map_err(|e| ReportError::AuthError(format!("invalid auth_uri in client secret: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("client_id", &secret.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &GMAIL_SCOPES.join(" "))
        // Offline access so the provider issues a refresh token
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("state", state);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential(expiry: Option<DateTime<Utc>>, refresh: Option<&str>) -> StoredCredential {
        StoredCredential {
            access_token: "token".to_string(),
            refresh_token: refresh.map(str::to_string),
            expiry,
            token_type: "Bearer".to_string(),
            scopes: GMAIL_SCOPES.iter().map(|s| s.to_string()).collect(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }

    #[test]
    fn test_validity() {
        let fresh = credential(Some(Utc::now() + Duration::hours(1)), None);
        assert!(fresh.is_valid());

        let expired = credential(Some(Utc::now() - Duration::hours(1)), None);
        assert!(!expired.is_valid());

        // Within the skew window counts as expired
        let brink = credential(Some(Utc::now() + Duration::seconds(EXPIRY_SKEW_SECONDS / 2)), None);
        assert!(!brink.is_valid());

        let no_expiry = credential(None, None);
        assert!(no_expiry.is_valid());

        let mut empty = credential(Some(Utc::now() + Duration::hours(1)), None);
        empty.access_token.clear();
        assert!(!empty.is_valid());
    }

    #[test]
    fn test_evaluate_states() {
        assert_eq!(evaluate(None), CredentialState::NoCache);

        let valid = credential(Some(Utc::now() + Duration::hours(1)), None);
        assert_eq!(evaluate(Some(&valid)), CredentialState::CachedValid);

        let refreshable = credential(Some(Utc::now() - Duration::hours(1)), Some("refresh"));
        assert_eq!(
            evaluate(Some(&refreshable)),
            CredentialState::CachedExpiredRefreshable
        );

        let dead = credential(Some(Utc::now() - Duration::hours(1)), None);
        assert_eq!(evaluate(Some(&dead)), CredentialState::CachedInvalid);
    }

    #[tokio::test]
    async fn test_cache_roundtrip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path().join("nested/cache/token.json"));

        let cred = credential(Some(Utc::now() + Duration::hours(1)), Some("refresh"));
        cache.persist(&cred).await.unwrap();

        let loaded = cache.load().await.expect("cache should load");
        assert_eq!(loaded.access_token, cred.access_token);
        assert_eq!(loaded.refresh_token, cred.refresh_token);
        assert_eq!(loaded.client_id, cred.client_id);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(cache.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[tokio::test]
    async fn test_cache_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path().join("token.json"));
        assert!(cache.load().await.is_none());
    }

    #[tokio::test]
    async fn test_cache_corrupt_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        tokio::fs::write(&path, b"\x00\x01 not json at all").await.unwrap();

        let cache = TokenCache::new(&path);
        assert!(cache.load().await.is_none());
    }

    #[test]
    fn test_parse_callback_request() {
        let code =
            parse_callback_request("GET /?state=abc&code=4%2Fxyz HTTP/1.1\r\n", "abc").unwrap();
        assert_eq!(code, "4/xyz");
    }

    #[test]
    fn test_parse_callback_rejects_state_mismatch() {
        let err = parse_callback_request("GET /?state=evil&code=xyz HTTP/1.1\r\n", "abc")
            .unwrap_err();
        assert!(matches!(err, ReportError::AuthError(_)));
        assert!(err.to_string().contains("state mismatch"));
    }

    #[test]
    fn test_parse_callback_reports_denial() {
        let err = parse_callback_request(
            "GET /?state=abc&error=access_denied HTTP/1.1\r\n",
            "abc",
        )
        .unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }

    #[test]
    fn test_parse_callback_without_code() {
        let err = parse_callback_request("GET /?state=abc HTTP/1.1\r\n", "abc").unwrap_err();
        assert!(err.to_string().contains("authorization code"));
    }

    #[test]
    fn test_success_page_wording() {
        let response = success_response();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("You may close this window"));
    }

    #[test]
    fn test_consent_url_parameters() {
        let secret = ApplicationSecret {
            client_id: "my-client".to_string(),
            client_secret: "shh".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            ..Default::default()
        };

        let url_str =
            build_consent_url(&secret, "http://localhost:8080", "state-123").unwrap();
        let url = Url::parse(&url_str).unwrap();
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs.get("client_id").map(String::as_str), Some("my-client"));
        assert_eq!(
            pairs.get("redirect_uri").map(String::as_str),
            Some("http://localhost:8080")
        );
        assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
        assert_eq!(pairs.get("access_type").map(String::as_str), Some("offline"));
        assert_eq!(pairs.get("prompt").map(String::as_str), Some("consent"));
        assert_eq!(pairs.get("state").map(String::as_str), Some("state-123"));
        assert!(pairs.get("scope").unwrap().contains("gmail.readonly"));
    }

    #[tokio::test]
    async fn test_callback_listener_returns_code() {
        use tokio::io::AsyncReadExt;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let accept = tokio::spawn(async move { accept_redirect(&listener, "st").await });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /?state=st&code=the-code HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("Authentication successful"));

        let code = accept.await.unwrap().unwrap();
        assert_eq!(code, "the-code");
    }

    #[tokio::test]
    async fn test_refresh_success_carries_old_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-access",
                "expires_in": 3600,
                "token_type": "Bearer",
                "scope": "https://www.googleapis.com/auth/gmail.readonly"
            })))
            .mount(&server)
            .await;

        let mut cred = credential(Some(Utc::now() - Duration::hours(1)), Some("old-refresh"));
        cred.token_uri = server.uri();

        let dir = tempfile::tempdir().unwrap();
        let auth = Authenticator::new(
            dir.path().join("credentials.json"),
            dir.path().join("token.json"),
            AuthConfig::default(),
        );

        let fresh = auth.refresh(&cred).await.unwrap();
        assert_eq!(fresh.access_token, "new-access");
        assert_eq!(fresh.refresh_token.as_deref(), Some("old-refresh"));
        assert!(fresh.is_valid());
    }

    #[tokio::test]
    async fn test_refresh_rejection_is_recoverable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "invalid_grant"})),
            )
            .mount(&server)
            .await;

        let mut cred = credential(Some(Utc::now() - Duration::hours(1)), Some("old-refresh"));
        cred.token_uri = server.uri();

        let dir = tempfile::tempdir().unwrap();
        let auth = Authenticator::new(
            dir.path().join("credentials.json"),
            dir.path().join("token.json"),
            AuthConfig::default(),
        );

        let err = auth.refresh(&cred).await.unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_exchange_code_requests_offline_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=auth-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access",
                "refresh_token": "refresh",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let secret = ApplicationSecret {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            token_uri: server.uri(),
            ..Default::default()
        };

        let dir = tempfile::tempdir().unwrap();
        let auth = Authenticator::new(
            dir.path().join("credentials.json"),
            dir.path().join("token.json"),
            AuthConfig::default(),
        );

        let cred = auth
            .exchange_code(&secret, "auth-code", "http://localhost:8080")
            .await
            .unwrap();
        assert_eq!(cred.access_token, "access");
        assert_eq!(cred.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(cred.client_id, "cid");
        assert!(cred.is_valid());
    }
}
