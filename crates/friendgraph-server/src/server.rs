//! HTTP server implementation.
//!
//! Binds the listener and routes requests to handlers.

use crate::error::ServerError;
use crate::handlers::{
    handle_create, handle_delete_user, handle_get_friends, handle_list_users,
    handle_make_friends, handle_update_age, AppState,
};
use crate::messages::{Language, Messages};
use crate::store::UserStore;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub addr: SocketAddr,

    /// Language of response text.
    pub language: Language,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            language: Language::default(),
        }
    }
}

/// Builds the route table over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/create", post(handle_create))
        .route("/users", get(handle_list_users))
        .route("/make_friends", post(handle_make_friends))
        .route("/user", delete(handle_delete_user))
        .route("/friends/{user_id}", get(handle_get_friends))
        .route("/user_age/{user_id}", put(handle_update_age))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The friendgraph HTTP server.
pub struct FriendServer {
    config: ServerConfig,
    store: UserStore,
}

impl FriendServer {
    /// Creates a new server over the given store.
    pub fn new(store: UserStore, config: ServerConfig) -> Self {
        Self { config, store }
    }

    /// Returns a handle to the shared store.
    pub fn store(&self) -> UserStore {
        self.store.clone()
    }

    /// Returns the router this server would serve.
    pub fn app(&self) -> Router {
        router(AppState::new(
            self.store.clone(),
            Messages::new(self.config.language),
        ))
    }

    /// Runs the server until the process is stopped.
    pub async fn run(&self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.config.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.config.addr.to_string(),
                source,
            })?;
        info!("Friendgraph server listening on http://{}", self.config.addr);
        info!("Response language: {}", self.config.language);

        axum::serve(listener, self.app()).await?;
        Ok(())
    }
}
