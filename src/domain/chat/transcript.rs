//! Chat transcript with explicit placeholder correlation.

use serde::Serialize;

use crate::domain::foundation::{EntryId, Timestamp};

/// Text shown while a reply is being generated.
pub const THINKING_PLACEHOLDER: &str = "Sahayak is thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatEntry {
    pub id: EntryId,
    pub author: Author,
    pub text: String,
    /// True while this entry is a placeholder awaiting its reply.
    pub pending: bool,
    pub created_at: Timestamp,
}

/// Handle to the one placeholder a request must resolve.
///
/// Not `Clone`: each pending request owns exactly one handle and consumes
/// it on resolution.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending reply must be resolved"]
pub struct PendingReply {
    entry: EntryId,
}

impl PendingReply {
    pub fn entry_id(&self) -> EntryId {
        self.entry
    }
}

/// Ordered chat log.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finished assistant message, such as the greeting.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> EntryId {
        self.push(Author::Assistant, text.into(), false)
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> EntryId {
        self.push(Author::User, text.into(), false)
    }

    /// Appends a thinking placeholder and returns the handle that resolves it.
    pub fn push_placeholder(&mut self) -> PendingReply {
        let entry = self.push(Author::Assistant, THINKING_PLACEHOLDER.to_string(), true);
        PendingReply { entry }
    }

    /// Replaces the placeholder owned by `handle` with the final text.
    ///
    /// Returns false if the entry no longer exists (the transcript was
    /// cleared while the request was in flight).
    pub fn resolve(&mut self, handle: PendingReply, text: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == handle.entry) {
            Some(entry) => {
                entry.text = text.into();
                entry.pending = false;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn has_pending(&self) -> bool {
        self.entries.iter().any(|e| e.pending)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, author: Author, text: String, pending: bool) -> EntryId {
        let id = EntryId::new();
        self.entries.push(ChatEntry {
            id,
            author,
            text,
            pending,
            created_at: Timestamp::now(),
        });
        id
    }
}
