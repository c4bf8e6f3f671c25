//! Grouping of unread messages by sender domain

use std::collections::HashMap;

use tracing::info;

use crate::client::GmailClient;
use crate::error::Result;
use crate::models::{DomainGroup, MessageSummary, UNKNOWN_SENDER};
use crate::report::{DomainEntry, Report};

/// Pull the bare address out of a From header value.
///
/// `"Name <a@b.com>"` yields `a@b.com`; a value without angle brackets is the
/// address itself. A `<` without a closing `>` yields everything after it.
fn extract_address(from_header: &str) -> &str {
    match from_header.find('<') {
        Some(start) => {
            let rest = &from_header[start + 1..];
            rest.split('>').next().unwrap_or(rest)
        }
        None => from_header,
    }
}

/// Sender domain of a From header value: the part after the first `@` of the
/// address, case preserved. Addresses without an `@` (including the missing-
/// header placeholder) share the "Unknown" bucket.
pub fn extract_domain(from_header: &str) -> String {
    let address = extract_address(from_header);
    match address.split_once('@') {
        Some((_, domain)) => domain.to_string(),
        None => UNKNOWN_SENDER.to_string(),
    }
}

/// Accumulator that keeps groups in first-encounter order, so that ranking
/// ties resolve to the order domains were first seen in
#[derive(Debug, Default)]
pub struct DomainGroups {
    index: HashMap<String, usize>,
    groups: Vec<(String, DomainGroup)>,
}

impl DomainGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: MessageSummary) {
        let domain = extract_domain(&message.from);
        let slot = match self.index.get(&domain) {
            Some(&slot) => slot,
            None => {
                self.index.insert(domain.clone(), self.groups.len());
                self.groups.push((domain, DomainGroup::default()));
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(message);
    }

    pub fn message_count(&self) -> usize {
        self.groups.iter().map(|(_, g)| g.count).sum()
    }

    /// Rank by count descending; the sort is stable, so equal counts keep
    /// first-encounter order
    pub fn into_report(self) -> Report {
        let mut entries: Vec<DomainEntry> = self
            .groups
            .into_iter()
            .map(|(domain, group)| DomainEntry { domain, group })
            .collect();
        entries.sort_by(|a, b| b.group.count.cmp(&a.group.count));
        Report { entries }
    }
}

/// Fetches every unread message and produces the ranked per-domain report
pub struct InboxAggregator {
    client: Box<dyn GmailClient>,
    progress_interval: usize,
}

impl InboxAggregator {
    pub fn new(client: Box<dyn GmailClient>, progress_interval: usize) -> Self {
        Self {
            client,
            progress_interval: progress_interval.max(1),
        }
    }

    pub async fn aggregate(&self) -> Result<Report> {
        self.aggregate_with_progress(|_, _| {}).await
    }

    /// One sequential API call per message; a single failure aborts the run.
    /// `on_progress` is called with (processed, total) after every fetch.
    pub async fn aggregate_with_progress<F>(&self, on_progress: F) -> Result<Report>
    where
        F: Fn(usize, usize),
    {
        let ids = self.client.list_unread_message_ids().await?;
        if ids.is_empty() {
            info!("No unread messages found in inbox");
            return Ok(Report::default());
        }

        let total = ids.len();
        info!("Found {} unread messages, analyzing", total);

        let mut groups = DomainGroups::new();
        for (i, id) in ids.iter().enumerate() {
            let message = self.client.get_message(id).await?;
            groups.record(message);

            let processed = i + 1;
            if processed % self.progress_interval == 0 {
                info!("Processed {}/{} messages", processed, total);
            }
            on_progress(processed, total);
        }

        Ok(groups.into_report())
    }
}
