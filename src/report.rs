//! Ranked per-domain report and its rendering

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::models::DomainGroup;

/// One ranked report line: a sender domain and its unread messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEntry {
    pub domain: String,
    pub group: DomainGroup,
}

/// Domains sorted by unread count descending; ties in first-encounter order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub entries: Vec<DomainEntry>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deep link that opens the Gmail search for a domain's unread mail
    pub fn search_url(domain: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(domain.as_bytes()).collect();
        format!(
            "https://mail.google.com/mail/u/0/?pli=1#search/from:{}+in:unread",
            encoded
        )
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if self.is_empty() {
            writeln!(out, "No unread messages found in inbox.")?;
            return Ok(());
        }

        writeln!(out, "Analysis Results:")?;
        writeln!(out, "Found emails from {} different domains", self.entries.len())?;

        for entry in &self.entries {
            writeln!(out)?;
            writeln!(out, "From: {} ({})", entry.domain, entry.group.count)?;
            writeln!(out, "{}", Self::search_url(&entry.domain))?;
        }

        Ok(())
    }

    /// Render to a string, mainly for tests and logging
    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.render(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
