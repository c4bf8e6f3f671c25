//! Gmail API client for listing and fetching unread messages

use async_trait::async_trait;
use google_gmail1::{hyper_rustls, hyper_util, Gmail};
use tracing::debug;

use crate::auth::{StoredCredential, GMAIL_SCOPES};
use crate::error::{ReportError, Result};
use crate::models::{MessageSummary, UNKNOWN_SENDER};

/// Type alias for Gmail Hub to simplify type signatures
pub type GmailHub =
    Gmail<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>;

/// Build a Gmail hub authorized with an already-managed access token.
///
/// Credential lifecycle (cache, refresh, consent) lives in `auth`; the hub
/// only needs the resulting token.
pub fn build_hub(credential: &StoredCredential) -> Result<GmailHub> {
    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| ReportError::AuthError(format!("Failed to load TLS roots: {}", e)))?
                .https_or_http()
                .enable_http1()
                .build(),
        );

    Ok(Gmail::new(client, credential.access_token.clone()))
}

/// Trait defining the Gmail operations the aggregator needs, for easier testing
#[async_trait]
pub trait GmailClient: Send + Sync {
    /// Ids of all unread inbox messages, in listing order
    async fn list_unread_message_ids(&self) -> Result<Vec<String>>;

    /// Fetch a single message's From header
    async fn get_message(&self, id: &str) -> Result<MessageSummary>;
}

/// GmailClient backed by the live API
pub struct ApiGmailClient {
    hub: GmailHub,
    user_id: String,
    page_size: u32,
}

impl ApiGmailClient {
    pub fn new(hub: GmailHub, user_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            hub,
            user_id: user_id.into(),
            page_size,
        }
    }
}

#[async_trait]
impl GmailClient for ApiGmailClient {
    async fn list_unread_message_ids(&self) -> Result<Vec<String>> {
        let mut all_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut call = self
                .hub
                .users()
                .messages_list(&self.user_id)
                .add_label_ids("INBOX")
                .add_label_ids("UNREAD")
                .max_results(self.page_size);

            if let Some(token) = page_token.as_ref() {
                call = call.page_token(token);
            }

            let (_, response) = call.add_scope(GMAIL_SCOPES[0]).doit().await?;

            if let Some(messages) = response.messages {
                for msg_ref in messages {
                    if let Some(id) = msg_ref.id {
                        all_ids.push(id);
                    }
                }
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        debug!("Listed {} unread inbox messages", all_ids.len());
        Ok(all_ids)
    }

    async fn get_message(&self, id: &str) -> Result<MessageSummary> {
        let (_, message) = self
            .hub
            .users()
            .messages_get(&self.user_id, id)
            .format("metadata")
            .add_metadata_headers("From")
            .add_scope(GMAIL_SCOPES[0])
            .doit()
            .await?;

        parse_message_summary(message)
    }
}

/// Reduce a Gmail API message to the fields the report needs.
///
/// The From header is located case-insensitively; a message without one gets
/// the "Unknown" placeholder rather than failing.
pub fn parse_message_summary(message: google_gmail1::api::Message) -> Result<MessageSummary> {
    let id = message
        .id
        .ok_or_else(|| ReportError::InvalidMessage("missing message id".to_string()))?;

    let from = message
        .payload
        .as_ref()
        .and_then(|p| p.headers.as_ref())
        .and_then(|headers| {
            headers.iter().find(|h| {
                h.name
                    .as_deref()
                    .map_or(false, |n| n.eq_ignore_ascii_case("From"))
            })
        })
        .and_then(|h| h.value.clone())
        .unwrap_or_else(|| UNKNOWN_SENDER.to_string());

    Ok(MessageSummary { id, from })
}
