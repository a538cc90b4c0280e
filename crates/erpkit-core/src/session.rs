//! # Editing Session
//!
//! Remembers values across the events of one form-editing session (for
//! example the employee code as it was when the form loaded), with explicit
//! open and close boundaries.
//!
//! ## Lifecycle
//! ```text
//! form load ──► EditSession::open("EMP-0001")
//!                    │
//!                    ├── remember("employee_code", "E-17")   first value wins
//!                    ├── has_changed("employee_code", "E-18") → true
//!                    │
//! form close ──► session.close() ──► SessionSummary   (session consumed)
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

/// Per-form state that outlives a single event handler.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: Uuid,
    document: String,
    opened_at: DateTime<Utc>,
    originals: BTreeMap<String, String>,
}

/// What a closed session leaves behind.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub id: String,
    pub document: String,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub closed_at: DateTime<Utc>,
    /// Fields remembered during the session, with their original values.
    pub originals: BTreeMap<String, String>,
}

impl EditSession {
    /// Opens a session for a document (form load).
    pub fn open(document: impl Into<String>) -> Self {
        let session = EditSession {
            id: Uuid::new_v4(),
            document: document.into(),
            opened_at: Utc::now(),
            originals: BTreeMap::new(),
        };
        debug!(session = %session.id, document = %session.document, "Edit session opened");
        session
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[inline]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Records the original value of a field.
    ///
    /// Only the first call per field is kept; later calls return `false`.
    pub fn remember(&mut self, field: impl Into<String>, value: impl Into<String>) -> bool {
        let field = field.into();
        if self.originals.contains_key(&field) {
            return false;
        }
        self.originals.insert(field, value.into());
        true
    }

    /// The value a field had when it was first remembered.
    pub fn original(&self, field: &str) -> Option<&str> {
        self.originals.get(field).map(String::as_str)
    }

    /// True if the field was remembered and `current` differs from it.
    pub fn has_changed(&self, field: &str, current: &str) -> bool {
        self.original(field).is_some_and(|orig| orig != current)
    }

    /// Forgets a field so it can be remembered again.
    pub fn forget(&mut self, field: &str) -> Option<String> {
        self.originals.remove(field)
    }

    /// Ends the session (form close or navigation).
    pub fn close(self) -> SessionSummary {
        debug!(session = %self.id, fields = self.originals.len(), "Edit session closed");
        SessionSummary {
            id: self.id.to_string(),
            document: self.document,
            opened_at: self.opened_at,
            closed_at: Utc::now(),
            originals: self.originals,
        }
    }
}
