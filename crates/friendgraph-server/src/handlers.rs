//! Request handlers for the HTTP routes.
//!
//! Each handler decodes its input, makes exactly one store call, and
//! renders the outcome through the message catalog.

use crate::error::{ApiError, Rejection};
use crate::messages::Messages;
use crate::protocol::{
    parse_body, CreateUserParams, DeleteUserParams, MakeFriendsParams, UpdateAgeParams,
};
use crate::store::UserStore;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, warn};

/// Shared state between handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub messages: Messages,
}

impl AppState {
    pub fn new(store: UserStore, messages: Messages) -> Self {
        Self { store, messages }
    }

    fn reject(&self, err: ApiError) -> Rejection {
        warn!("Request rejected: {}", err);
        self.messages.reject(err)
    }
}

type HandlerResult = Result<Response, Rejection>;

/// Serializes a value as a newline-terminated JSON body.
fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let mut body = serde_json::to_vec(value)?;
    body.push(b'\n');

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Handles `POST /create`.
pub async fn handle_create(State(state): State<AppState>, body: Bytes) -> HandlerResult {
    let params: CreateUserParams = parse_body(&body).map_err(|e| state.reject(e))?;

    let id = state
        .store
        .create_user(params.name, params.age, params.friends)
        .await;

    Ok((StatusCode::CREATED, state.messages.user_created(&id)).into_response())
}

/// Handles `GET /users`.
pub async fn handle_list_users(State(state): State<AppState>) -> HandlerResult {
    let users = state
        .store
        .list_users()
        .await
        .map_err(|e| state.reject(e.into()))?;

    json_response(&users).map_err(|e| state.reject(e))
}

/// Handles `POST /make_friends`.
pub async fn handle_make_friends(State(state): State<AppState>, body: Bytes) -> HandlerResult {
    let params: MakeFriendsParams = parse_body(&body).map_err(|e| state.reject(e))?;

    let (source, target) = state
        .store
        .link(&params.source_id, &params.target_id)
        .await
        .map_err(|e| state.reject(e.into()))?;

    Ok((StatusCode::OK, state.messages.now_friends(&source, &target)).into_response())
}

/// Handles `DELETE /user`.
pub async fn handle_delete_user(State(state): State<AppState>, body: Bytes) -> HandlerResult {
    let params: DeleteUserParams = parse_body(&body).map_err(|e| state.reject(e))?;

    let name = state
        .store
        .delete_user(&params.target_id)
        .await
        .map_err(|e| state.reject(e.into()))?;

    Ok((StatusCode::OK, state.messages.user_deleted(&name)).into_response())
}

/// Handles `GET /friends/{user_id}`.
pub async fn handle_get_friends(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult {
    debug!("Friends query for: {}", user_id);

    let friends = state
        .store
        .get_friends(&user_id)
        .await
        .map_err(|e| state.reject(e.into()))?;

    json_response(&friends).map_err(|e| state.reject(e))
}

/// Handles `PUT /user_age/{user_id}`.
pub async fn handle_update_age(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> HandlerResult {
    let params: UpdateAgeParams = parse_body(&body).map_err(|e| state.reject(e))?;

    state
        .store
        .update_age(&user_id, params.new_age)
        .await
        .map_err(|e| state.reject(e.into()))?;

    Ok((StatusCode::OK, state.messages.age_updated()).into_response())
}
