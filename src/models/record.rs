use std::fmt;

use serde::{Deserialize, Serialize};

use super::Submission;

/// A stored row. Only `fields` is needed to forward it; the store may omit `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub fields: Submission,
}

/// Opaque, non-empty identifier of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef(String);

impl RecordRef {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(RecordRef(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
