//! Gmail Unread Domain Report
//!
//! Authenticates to the Gmail API with an OAuth2 installed-app flow, lists
//! unread inbox messages, groups them by sender domain and prints per-domain
//! counts with deep-link search URLs.
//!
//! # Overview
//!
//! Two components run in sequence:
//! - **Credential management**: cached-token reuse, refresh against the token
//!   endpoint, and fallback to a fresh interactive consent flow served by a
//!   one-shot local callback listener
//! - **Inbox aggregation**: sequential fetching of unread messages, sender
//!   domain extraction, grouping and deterministic ranking
//!
//! # Example Usage
//!
//! ```no_run
//! use gmail_domain_report::aggregator::InboxAggregator;
//! use gmail_domain_report::auth::Authenticator;
//! use gmail_domain_report::client::{build_hub, ApiGmailClient};
//! use gmail_domain_report::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("/data/config.toml".as_ref()).await?;
//!
//!     let credential = Authenticator::new(
//!         "/data/credentials.json",
//!         "/data/token.json",
//!         config.auth.clone(),
//!     )
//!     .authenticate()
//!     .await?;
//!
//!     let hub = build_hub(&credential)?;
//!     let client = ApiGmailClient::new(hub, "me", config.report.page_size);
//!     let aggregator = InboxAggregator::new(Box::new(client), config.report.progress_interval);
//!
//!     let report = aggregator.aggregate().await?;
//!     report.render(&mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 credential cache, refresh and consent flow
//! - [`client`] - Gmail API hub and the client trait the aggregator runs on
//! - [`aggregator`] - domain extraction, grouping and ranking
//! - [`report`] - ranked report rendering with search deep links
//! - [`config`] - configuration management
//! - [`cli`] - command-line arguments and progress display
//! - [`error`] - error types and result alias
//! - [`models`] - core data structures

pub mod aggregator;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod report;

// Re-export commonly used types for convenience
pub use error::{ReportError, Result};

// Core data models
pub use models::{DomainGroup, MessageSummary, UNKNOWN_SENDER};

// Credential management
pub use auth::{Authenticator, CredentialState, StoredCredential, TokenCache};

// Gmail client
pub use client::{build_hub, ApiGmailClient, GmailClient, GmailHub};

// Aggregation
pub use aggregator::{extract_domain, DomainGroups, InboxAggregator};

// Report types
pub use report::{DomainEntry, Report};

// Config types
pub use config::{AuthConfig, Config, ReportConfig};

// CLI types (for binary usage)
pub use cli::{Cli, ProgressReporter};
