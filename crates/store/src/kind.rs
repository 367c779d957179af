//! Entity kinds and the raw document shape.

use serde_json::Value;
use std::fmt;

/// The collections the store persists, one per entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Chart of accounts.
    Accounts,
    /// The transaction log.
    Transactions,
    /// Client credits, payments embedded.
    Credits,
    /// Resale investments.
    Investments,
    /// Monthly accounting closures.
    Closures,
}

impl EntityKind {
    /// All kinds, in bootstrap order. Accounts come first so the seed
    /// check can run before anything else loads.
    pub const ALL: [Self; 5] = [
        Self::Accounts,
        Self::Transactions,
        Self::Credits,
        Self::Investments,
        Self::Closures,
    ];

    /// Returns the bare collection name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Transactions => "transactions",
            Self::Credits => "credits",
            Self::Investments => "investments",
            Self::Closures => "closures",
        }
    }

    /// Returns the collection name with the configured prefix applied.
    #[must_use]
    pub fn collection(self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.as_str().to_string()
        } else {
            format!("{prefix}{}", self.as_str())
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw document as the backend holds it: the backend-assigned id plus
/// the serialized entity. The entity's own uuid lives inside `data`.
#[derive(Debug, Clone)]
pub struct Document {
    /// Backend-assigned document id, distinct from the entity uuid.
    pub external_id: String,
    /// The serialized entity.
    pub data: Value,
}
