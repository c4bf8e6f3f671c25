use serde::{Deserialize, Serialize};

/// Placeholder for a missing From header; also the bucket for sender
/// addresses no domain can be read from
pub const UNKNOWN_SENDER: &str = "Unknown";

/// A fetched unread message, reduced to what the report needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageSummary {
    pub id: String,
    /// Raw value of the From header; "Unknown" when the header is absent
    pub from: String,
}

impl MessageSummary {
    pub fn new(id: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
        }
    }
}

/// All unread messages attributed to one sender domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainGroup {
    pub count: usize,
    /// Members in fetch order
    pub messages: Vec<MessageSummary>,
}

impl DomainGroup {
    pub fn push(&mut self, message: MessageSummary) {
        self.count += 1;
        self.messages.push(message);
    }
}
