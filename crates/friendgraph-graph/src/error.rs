use crate::user::UserId;
use thiserror::Error;

/// Precondition failures reported by graph operations.
///
/// Every variant is raised before any mutation happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    #[error("one or both users not found: {source_id}, {target_id}")]
    UnknownPair {
        source_id: UserId,
        target_id: UserId,
    },

    #[error("the user list is empty")]
    EmptyCollection,
}

pub type Result<T> = std::result::Result<T, GraphError>;
