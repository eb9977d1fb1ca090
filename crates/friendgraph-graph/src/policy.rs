//! Behavior switches for link and delete.
//!
//! The defaults reproduce the long-standing behavior of the service:
//! repeated links pile up duplicate entries, the delete cascade strips a
//! single entry per scan, and listing an empty graph is an error. Each
//! can be changed from the config file.

use serde::{Deserialize, Serialize};

/// What `link` does when the pair is already linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateLinks {
    /// Append again. Linking twice leaves two entries on each side.
    #[default]
    Allow,

    /// Skip the append on a side that already lists the other.
    Ignore,
}

/// How many matching entries the delete cascade removes from a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeRemoval {
    /// Remove the first matching entry per visit.
    #[default]
    FirstOccurrence,

    /// Remove every matching entry.
    AllOccurrences,
}

/// What listing an empty graph returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyList {
    /// Fail with `GraphError::EmptyCollection`.
    #[default]
    NotFound,

    /// Succeed with an empty map.
    EmptyOk,
}

/// Graph behavior policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphPolicy {
    pub duplicate_links: DuplicateLinks,
    pub cascade_removal: CascadeRemoval,
    pub empty_list: EmptyList,
}

impl GraphPolicy {
    /// Set semantics throughout: idempotent links, full cascade cleanup,
    /// empty list is a valid result.
    pub fn strict() -> Self {
        Self {
            duplicate_links: DuplicateLinks::Ignore,
            cascade_removal: CascadeRemoval::AllOccurrences,
            empty_list: EmptyList::EmptyOk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_policy_uses_defaults() {
        let policy: GraphPolicy =
            serde_json::from_str(r#"{"duplicate_links": "ignore"}"#).unwrap();

        assert_eq!(policy.duplicate_links, DuplicateLinks::Ignore);
        assert_eq!(policy.cascade_removal, CascadeRemoval::FirstOccurrence);
        assert_eq!(policy.empty_list, EmptyList::NotFound);
    }

    #[test]
    fn test_policy_serializes_snake_case() {
        let json = serde_json::to_string(&GraphPolicy::strict()).unwrap();
        assert!(json.contains("\"all_occurrences\""));
        assert!(json.contains("\"empty_ok\""));
    }
}
