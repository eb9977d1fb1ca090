//! Friendgraph Graph - in-memory user registry
//!
//! This crate holds users and the symmetric friendships between them.
//! It is a plain data structure with no locking of its own; the server
//! crate wraps it in a single reader/writer lock.
//!
//! # Example
//!
//! ```
//! use friendgraph_graph::UserGraph;
//!
//! let mut graph = UserGraph::new();
//! let alice = graph.create_user("Alice", 30, vec![]);
//! let bob = graph.create_user("Bob", 25, vec![]);
//!
//! graph.link(&alice, &bob).unwrap();
//! assert_eq!(graph.get_friends(&alice).unwrap()[0].name, "Bob");
//! ```

mod error;
mod graph;
mod policy;
mod user;

pub use error::{GraphError, Result};
pub use graph::{GraphStats, UserGraph};
pub use policy::{CascadeRemoval, DuplicateLinks, EmptyList, GraphPolicy};
pub use user::{User, UserId};
