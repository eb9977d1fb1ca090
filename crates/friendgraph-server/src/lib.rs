//! Friendgraph Server - HTTP front end for the user graph
//!
//! This crate owns the process-wide `UserStore` and exposes it over HTTP.
//!
//! The server supports:
//! - Multiple concurrent requests over one shared store
//! - Lenient JSON request bodies
//! - Plain-text confirmations in Russian or English

mod error;
mod handlers;
mod messages;
mod protocol;
mod server;
mod store;

pub use error::{ApiError, Rejection, ServerError};
pub use handlers::AppState;
pub use messages::{Language, Messages};
pub use protocol::{CreateUserParams, DeleteUserParams, MakeFriendsParams, UpdateAgeParams};
pub use server::{router, FriendServer, ServerConfig};
pub use store::{SharedGraph, UserStore};
