// Memory / Learning Log Domain Model

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of event recorded in the learning log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// A code generation request and its output
    Generation,
    /// User feedback on a generation
    Feedback,
    /// A lesson distilled from previous runs
    Learning,
}

impl MemoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryKind::Generation => "generation",
            MemoryKind::Feedback => "feedback",
            MemoryKind::Learning => "learning",
        }
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generation" => Ok(MemoryKind::Generation),
            "feedback" => Ok(MemoryKind::Feedback),
            "learning" => Ok(MemoryKind::Learning),
            other => Err(DomainError::InvalidParameter {
                name: "kind".to_string(),
                reason: format!("unknown memory kind '{}'", other),
            }),
        }
    }
}

/// Entry as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemoryEntry {
    pub kind: MemoryKind,
    pub content: String,
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn empty_metadata() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Persisted entry (append-only, never updated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub kind: MemoryKind,
    pub content: String,
    pub metadata: serde_json::Value,
    pub created_at: i64, // epoch ms
}

impl NewMemoryEntry {
    pub fn new(kind: MemoryKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            metadata: empty_metadata(),
        }
    }

    /// Reject entries that carry nothing worth remembering
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "memory content cannot be empty".to_string(),
            ));
        }
        if !self.metadata.is_object() {
            return Err(DomainError::ValidationError(
                "memory metadata must be a JSON object".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_entry(self, id: String, created_at: i64) -> MemoryEntry {
        MemoryEntry {
            id,
            kind: self.kind,
            content: self.content,
            metadata: self.metadata,
            created_at,
        }
    }
}
