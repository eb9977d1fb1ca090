//! User records.
//!
//! A user is the only entity in the graph. Friendships are not stored as
//! separate edge values; each side keeps the other's ID in its own
//! `friends` list.

use serde::{Deserialize, Serialize};

/// Opaque user identifier.
///
/// IDs are handed out by the graph as decimal strings ("1", "2", ...),
/// but callers should treat them as opaque.
pub type UserId = String;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,

    /// Age in years. Not validated.
    pub age: i64,

    /// Friend IDs in link order. May contain duplicates.
    pub friends: Vec<UserId>,
}

impl User {
    /// Creates a user with no friends.
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
            friends: Vec::new(),
        }
    }

    /// Creates a user with an initial friend list.
    ///
    /// The list is taken as-is; nothing checks that the IDs exist or
    /// that the other side links back.
    pub fn with_friends(name: impl Into<String>, age: i64, friends: Vec<UserId>) -> Self {
        Self {
            name: name.into(),
            age,
            friends,
        }
    }

    /// Returns true if `id` appears at least once in the friend list.
    pub fn is_friend_of(&self, id: &str) -> bool {
        self.friends.iter().any(|f| f == id)
    }

    /// Counts how many times `id` appears in the friend list.
    pub fn friend_count(&self, id: &str) -> usize {
        self.friends.iter().filter(|f| f.as_str() == id).count()
    }
}
