//! Core graph data structure.
//!
//! The UserGraph owns every user record together with the ID counter.
//! Keeping both in one value means a single lock around the graph covers
//! ID allocation, insertion and the two-sided friendship updates.

use crate::error::{GraphError, Result};
use crate::policy::{CascadeRemoval, DuplicateLinks, EmptyList, GraphPolicy};
use crate::user::{User, UserId};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// The user graph.
///
/// Friendship is symmetric: if A lists B, B lists A. `link` and
/// `delete_user` maintain this on both endpoints in one call.
#[derive(Debug)]
pub struct UserGraph {
    /// All live users by ID.
    users: HashMap<UserId, User>,

    /// Next ID to hand out. Never decreases, never reused.
    next_id: u64,

    policy: GraphPolicy,
}

impl Default for UserGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl UserGraph {
    /// Creates an empty graph with the default policy.
    pub fn new() -> Self {
        Self::with_policy(GraphPolicy::default())
    }

    /// Creates an empty graph with the given policy.
    pub fn with_policy(policy: GraphPolicy) -> Self {
        Self {
            users: HashMap::new(),
            next_id: 1,
            policy,
        }
    }

    /// Adds a user and returns its new ID.
    ///
    /// The initial friend list is stored verbatim.
    pub fn create_user(&mut self, name: impl Into<String>, age: i64, friends: Vec<UserId>) -> UserId {
        let id = self.next_id.to_string();
        self.next_id += 1;

        self.users
            .insert(id.clone(), User::with_friends(name, age, friends));

        id
    }

    /// Returns every user keyed by ID, in ascending key order.
    pub fn list_users(&self) -> Result<BTreeMap<UserId, User>> {
        if self.users.is_empty() && self.policy.empty_list == EmptyList::NotFound {
            return Err(GraphError::EmptyCollection);
        }

        Ok(self
            .users
            .iter()
            .map(|(id, user)| (id.clone(), user.clone()))
            .collect())
    }

    /// Makes two users friends.
    ///
    /// Returns the display names of source and target, in that order.
    pub fn link(&mut self, source_id: &str, target_id: &str) -> Result<(String, String)> {
        if !self.users.contains_key(source_id) || !self.users.contains_key(target_id) {
            return Err(GraphError::UnknownPair {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }

        let dedup = self.policy.duplicate_links == DuplicateLinks::Ignore;

        if source_id == target_id {
            // A self-link is a single entry; there is no second side.
            let user = self.user_mut(source_id)?;
            if !(dedup && user.is_friend_of(source_id)) {
                user.friends.push(source_id.to_string());
            }
            let name = user.name.clone();
            return Ok((name.clone(), name));
        }

        let source = self.user_mut(source_id)?;
        if !(dedup && source.is_friend_of(target_id)) {
            source.friends.push(target_id.to_string());
        }
        let source_name = source.name.clone();

        let target = self.user_mut(target_id)?;
        if !(dedup && target.is_friend_of(source_id)) {
            target.friends.push(source_id.to_string());
        }
        let target_name = target.name.clone();

        Ok((source_name, target_name))
    }

    /// Removes a user and unlinks it from each of its friends.
    ///
    /// The cascade walks the removed user's own friend list, duplicates
    /// included, and strips the removed ID from each neighbor according to
    /// the cascade policy. Returns the removed user's display name.
    pub fn delete_user(&mut self, target_id: &str) -> Result<String> {
        let removed = self
            .users
            .remove(target_id)
            .ok_or_else(|| GraphError::UnknownUser(target_id.to_string()))?;

        let mut touched = 0usize;
        for friend_id in &removed.friends {
            let Some(friend) = self.users.get_mut(friend_id) else {
                continue;
            };

            match self.policy.cascade_removal {
                CascadeRemoval::FirstOccurrence => {
                    if let Some(pos) = friend.friends.iter().position(|id| id == target_id) {
                        friend.friends.remove(pos);
                    }
                }
                CascadeRemoval::AllOccurrences => {
                    friend.friends.retain(|id| id != target_id);
                }
            }
            touched += 1;
        }

        debug!("Deleted user {} ({} neighbor visits)", target_id, touched);

        Ok(removed.name)
    }

    /// Returns the full records of a user's friends, in list order.
    ///
    /// Friend IDs that no longer resolve are skipped.
    pub fn get_friends(&self, user_id: &str) -> Result<Vec<User>> {
        let user = self.user(user_id)?;

        Ok(user
            .friends
            .iter()
            .filter_map(|id| self.users.get(id))
            .cloned()
            .collect())
    }

    /// Overwrites a user's age.
    pub fn update_age(&mut self, user_id: &str, new_age: i64) -> Result<()> {
        self.user_mut(user_id)?.age = new_age;
        Ok(())
    }

    /// Gets a user by ID.
    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Returns true if the user exists.
    pub fn contains(&self, user_id: &str) -> bool {
        self.users.contains_key(user_id)
    }

    /// Returns the number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if there are no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns true if every friendship entry has a matching entry on the
    /// other side, with equal multiplicity. Dangling IDs are ignored.
    #[cfg(test)]
    fn is_symmetric(&self) -> bool {
        self.users.iter().all(|(id, user)| {
            user.friends
                .iter()
                .filter(|f| f.as_str() != id.as_str())
                .filter_map(|f| self.users.get(f).map(|other| (f, other)))
                .all(|(f, other)| user.friend_count(f) == other.friend_count(id))
        })
    }

    fn user(&self, user_id: &str) -> Result<&User> {
        self.users
            .get(user_id)
            .ok_or_else(|| GraphError::UnknownUser(user_id.to_string()))
    }

    fn user_mut(&mut self, user_id: &str) -> Result<&mut User> {
        self.users
            .get_mut(user_id)
            .ok_or_else(|| GraphError::UnknownUser(user_id.to_string()))
    }
}

/// Graph statistics, logged after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub user_count: usize,
    /// Sum of all friend list lengths.
    pub friend_entries: usize,
}

impl UserGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            user_count: self.users.len(),
            friend_entries: self.users.values().map(|u| u.friends.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (UserGraph, UserId, UserId) {
        let mut graph = UserGraph::new();
        let a = graph.create_user("Alice", 30, vec![]);
        let b = graph.create_user("Bob", 25, vec![]);
        (graph, a, b)
    }

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let mut graph = UserGraph::new();
        let a = graph.create_user("a", 1, vec![]);
        let b = graph.create_user("b", 2, vec![]);
        graph.delete_user(&b).unwrap();
        let c = graph.create_user("c", 3, vec![]);

        assert_eq!(a, "1");
        assert_eq!(b, "2");
        assert_eq!(c, "3");
    }

    #[test]
    fn test_link_is_symmetric() {
        let (mut graph, a, b) = pair();

        let names = graph.link(&a, &b).unwrap();

        assert_eq!(names, ("Alice".to_string(), "Bob".to_string()));
        assert_eq!(graph.get(&a).unwrap().friends, vec![b.clone()]);
        assert_eq!(graph.get(&b).unwrap().friends, vec![a.clone()]);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn test_link_twice_appends_twice() {
        let (mut graph, a, b) = pair();

        graph.link(&a, &b).unwrap();
        graph.link(&a, &b).unwrap();

        assert_eq!(graph.get(&a).unwrap().friends, vec![b.clone(), b.clone()]);
        assert_eq!(graph.get(&b).unwrap().friends, vec![a.clone(), a.clone()]);
    }

    #[test]
    fn test_link_twice_with_ignore_policy() {
        let mut graph = UserGraph::with_policy(GraphPolicy {
            duplicate_links: DuplicateLinks::Ignore,
            ..GraphPolicy::default()
        });
        let a = graph.create_user("Alice", 30, vec![]);
        let b = graph.create_user("Bob", 25, vec![]);

        graph.link(&a, &b).unwrap();
        graph.link(&b, &a).unwrap();

        assert_eq!(graph.get(&a).unwrap().friends, vec![b.clone()]);
        assert_eq!(graph.get(&b).unwrap().friends, vec![a.clone()]);
    }

    #[test]
    fn test_link_unknown_user_does_not_mutate() {
        let (mut graph, a, _) = pair();

        let err = graph.link(&a, "99").unwrap_err();

        assert_eq!(
            err,
            GraphError::UnknownPair {
                source_id: a.clone(),
                target_id: "99".to_string()
            }
        );
        assert!(graph.get(&a).unwrap().friends.is_empty());
    }

    #[test]
    fn test_self_link_appends_once() {
        let (mut graph, a, _) = pair();

        let names = graph.link(&a, &a).unwrap();

        assert_eq!(names.0, names.1);
        assert_eq!(graph.get(&a).unwrap().friends, vec![a.clone()]);
    }

    #[test]
    fn test_delete_cascades_to_friends() {
        let mut graph = UserGraph::new();
        let a = graph.create_user("Alice", 30, vec![]);
        let b = graph.create_user("Bob", 25, vec![]);
        let c = graph.create_user("Carol", 41, vec![]);
        graph.link(&a, &b).unwrap();
        graph.link(&c, &b).unwrap();
        graph.link(&a, &c).unwrap();

        let name = graph.delete_user(&b).unwrap();

        assert_eq!(name, "Bob");
        assert!(!graph.contains(&b));
        assert_eq!(graph.get(&a).unwrap().friends, vec![c.clone()]);
        assert_eq!(graph.get(&c).unwrap().friends, vec![a.clone()]);
    }

    #[test]
    fn test_delete_after_double_link_clears_both_entries() {
        let (mut graph, a, b) = pair();
        graph.link(&a, &b).unwrap();
        graph.link(&a, &b).unwrap();

        graph.delete_user(&a).unwrap();

        // A's list held B twice, so B was visited twice.
        assert!(graph.get(&b).unwrap().friends.is_empty());
    }

    #[test]
    fn test_delete_first_occurrence_only_per_visit() {
        let mut graph = UserGraph::new();
        // B lists A twice but A only lists B once.
        let a = graph.create_user("Alice", 30, vec!["2".to_string()]);
        let b = graph.create_user("Bob", 25, vec!["1".to_string(), "1".to_string()]);

        graph.delete_user(&a).unwrap();

        assert_eq!(graph.get(&b).unwrap().friends, vec!["1".to_string()]);
    }

    #[test]
    fn test_delete_all_occurrences_policy() {
        let mut graph = UserGraph::with_policy(GraphPolicy {
            cascade_removal: CascadeRemoval::AllOccurrences,
            ..GraphPolicy::default()
        });
        let a = graph.create_user("Alice", 30, vec!["2".to_string()]);
        let b = graph.create_user("Bob", 25, vec!["1".to_string(), "1".to_string()]);

        graph.delete_user(&a).unwrap();

        assert!(graph.get(&b).unwrap().friends.is_empty());
    }

    #[test]
    fn test_delete_unknown_user() {
        let mut graph = UserGraph::new();
        assert_eq!(
            graph.delete_user("1").unwrap_err(),
            GraphError::UnknownUser("1".to_string())
        );
    }

    #[test]
    fn test_delete_self_linked_user() {
        let (mut graph, a, _) = pair();
        graph.link(&a, &a).unwrap();

        graph.delete_user(&a).unwrap();

        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_get_friends_skips_stale_ids() {
        let mut graph = UserGraph::new();
        let a = graph.create_user("Alice", 30, vec!["42".to_string()]);
        let b = graph.create_user("Bob", 25, vec![]);
        graph.link(&a, &b).unwrap();

        let friends = graph.get_friends(&a).unwrap();

        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].name, "Bob");
    }

    #[test]
    fn test_get_friends_keeps_order_and_duplicates() {
        let mut graph = UserGraph::new();
        let a = graph.create_user("Alice", 30, vec![]);
        let b = graph.create_user("Bob", 25, vec![]);
        let c = graph.create_user("Carol", 41, vec![]);
        graph.link(&a, &c).unwrap();
        graph.link(&a, &b).unwrap();
        graph.link(&a, &c).unwrap();

        let names: Vec<String> = graph
            .get_friends(&a)
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();

        assert_eq!(names, vec!["Carol", "Bob", "Carol"]);
    }

    #[test]
    fn test_get_friends_unknown_user() {
        let graph = UserGraph::new();
        assert!(matches!(
            graph.get_friends("7"),
            Err(GraphError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_update_age() {
        let (mut graph, a, _) = pair();

        graph.update_age(&a, -5).unwrap();

        assert_eq!(graph.get(&a).unwrap().age, -5);
        assert!(graph.update_age("99", 1).is_err());
    }

    #[test]
    fn test_list_users_empty_is_error() {
        let graph = UserGraph::new();
        assert_eq!(graph.list_users().unwrap_err(), GraphError::EmptyCollection);
    }

    #[test]
    fn test_list_users_empty_ok_policy() {
        let graph = UserGraph::with_policy(GraphPolicy::strict());
        assert!(graph.list_users().unwrap().is_empty());
    }

    #[test]
    fn test_list_users_sorted_by_key() {
        let mut graph = UserGraph::new();
        for i in 0..11 {
            graph.create_user(format!("u{i}"), i, vec![]);
        }

        let keys: Vec<String> = graph.list_users().unwrap().into_keys().collect();

        assert_eq!(keys.len(), 11);
        assert_eq!(keys[0], "1");
        assert_eq!(keys[1], "10");
        assert_eq!(keys[2], "11");
    }

    #[test]
    fn test_lifecycle_scenario() {
        let mut graph = UserGraph::new();
        let a = graph.create_user("A", 30, vec![]);
        let b = graph.create_user("B", 25, vec![]);
        assert_eq!((a.as_str(), b.as_str()), ("1", "2"));

        graph.link("1", "2").unwrap();
        assert_eq!(graph.get("1").unwrap().friends, vec!["2"]);
        assert_eq!(graph.get("2").unwrap().friends, vec!["1"]);

        graph.update_age("1", 31).unwrap();
        assert_eq!(graph.get("1").unwrap().age, 31);

        graph.delete_user("2").unwrap();
        let users = graph.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert!(users["1"].friends.is_empty());
    }

    #[test]
    fn test_stats() {
        let (mut graph, a, b) = pair();
        graph.link(&a, &b).unwrap();

        let stats = graph.stats();
        assert_eq!(stats.user_count, 2);
        assert_eq!(stats.friend_entries, 2);
    }
}
