//! Common test utilities and fixtures

use chrono::{Duration, Utc};
use gmail_domain_report::auth::StoredCredential;
use gmail_domain_report::client::GmailClient;
use gmail_domain_report::error::Result;
use gmail_domain_report::models::MessageSummary;
use mockall::mock;
use std::path::Path;

/// Create a cached credential; `expired` controls whether it is usable as-is
pub fn create_test_credential(
    expired: bool,
    refresh_token: Option<&str>,
    token_uri: &str,
) -> StoredCredential {
    let expiry = if expired {
        Utc::now() - Duration::hours(1)
    } else {
        Utc::now() + Duration::hours(1)
    };

    StoredCredential {
        access_token: "cached-access-token".to_string(),
        refresh_token: refresh_token.map(|s| s.to_string()),
        expiry: Some(expiry),
        token_type: "Bearer".to_string(),
        scopes: vec!["https://www.googleapis.com/auth/gmail.readonly".to_string()],
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        token_uri: token_uri.to_string(),
    }
}

/// Write a Google installed-app client secret file
pub async fn write_client_secret(path: &Path) {
    let secret = serde_json::json!({
        "installed": {
            "client_id": "test-client-id",
            "project_id": "test-project",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": "https://oauth2.googleapis.com/token",
            "client_secret": "test-client-secret",
            "redirect_uris": ["http://localhost:8080"]
        }
    });
    tokio::fs::write(path, secret.to_string()).await.unwrap();
}

/// Create a fetched message with the given From header
pub fn create_test_message(id: &str, from: &str) -> MessageSummary {
    MessageSummary::new(id, from)
}

// Mock implementation of GmailClient for testing
mock! {
    pub GmailClient {}

    #[async_trait::async_trait]
    impl GmailClient for GmailClient {
        async fn list_unread_message_ids(&self) -> Result<Vec<String>>;
        async fn get_message(&self, id: &str) -> Result<MessageSummary>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_credential() {
        let cred = create_test_credential(false, Some("refresh"), "http://localhost/token");
        assert!(cred.is_valid());
        assert_eq!(cred.refresh_token.as_deref(), Some("refresh"));

        let stale = create_test_credential(true, None, "http://localhost/token");
        assert!(!stale.is_valid());
    }

    #[test]
    fn test_create_test_message() {
        let msg = create_test_message("m1", "a@foo.com");
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.from, "a@foo.com");
    }
}
