//! Shared user store.
//!
//! One `UserGraph` behind one reader/writer lock. Every operation takes the
//! lock exactly once and holds it for the whole read-modify-write, so a
//! reader never sees one side of a friendship without the other.

use friendgraph_graph::{GraphError, GraphPolicy, GraphStats, User, UserGraph, UserId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Shared graph state across handlers.
pub type SharedGraph = Arc<RwLock<UserGraph>>;

/// Cloneable handle to the process-wide user graph.
#[derive(Clone, Default)]
pub struct UserStore {
    graph: SharedGraph,
}

impl UserStore {
    /// Creates an empty store with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given policy.
    pub fn with_policy(policy: GraphPolicy) -> Self {
        Self::from_graph(UserGraph::with_policy(policy))
    }

    /// Wraps an existing graph.
    pub fn from_graph(graph: UserGraph) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
        }
    }

    pub async fn create_user(&self, name: String, age: i64, friends: Vec<UserId>) -> UserId {
        let mut g = self.graph.write().await;
        let id = g.create_user(name, age, friends);
        let stats = g.stats();
        info!(
            "Created user {} ({} users, {} friend entries)",
            id, stats.user_count, stats.friend_entries
        );
        id
    }

    pub async fn list_users(&self) -> Result<BTreeMap<UserId, User>, GraphError> {
        let g = self.graph.read().await;
        debug!("Listing {} users", g.len());
        g.list_users()
    }

    pub async fn link(&self, source_id: &str, target_id: &str) -> Result<(String, String), GraphError> {
        let mut g = self.graph.write().await;
        let names = g.link(source_id, target_id)?;
        info!(
            "Linked {} <-> {} ({} friend entries)",
            source_id,
            target_id,
            g.stats().friend_entries
        );
        Ok(names)
    }

    pub async fn delete_user(&self, target_id: &str) -> Result<String, GraphError> {
        let mut g = self.graph.write().await;
        let name = g.delete_user(target_id)?;
        let stats = g.stats();
        info!(
            "Deleted user {} ({} users, {} friend entries left)",
            target_id, stats.user_count, stats.friend_entries
        );
        Ok(name)
    }

    pub async fn get_friends(&self, user_id: &str) -> Result<Vec<User>, GraphError> {
        let g = self.graph.read().await;
        let friends = g.get_friends(user_id)?;
        debug!("User {} has {} resolvable friends", user_id, friends.len());
        Ok(friends)
    }

    pub async fn update_age(&self, user_id: &str, new_age: i64) -> Result<(), GraphError> {
        let mut g = self.graph.write().await;
        g.update_age(user_id, new_age)?;
        info!("Updated age of user {} to {}", user_id, new_age);
        Ok(())
    }

    /// Returns user and friend-entry counts.
    pub async fn stats(&self) -> GraphStats {
        self.graph.read().await.stats()
    }

    /// Returns a copy of one user.
    pub async fn get(&self, user_id: &str) -> Option<User> {
        self.graph.read().await.get(user_id).cloned()
    }

    /// Returns the number of users.
    pub async fn len(&self) -> usize {
        self.graph.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.graph.read().await.is_empty()
    }
}
