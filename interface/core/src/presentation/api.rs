// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Backend-for-frontend HTTP routes
//!
//! Each `/api/spawn/*` route unpacks the client payload, relays it through
//! the [`SwarmBackend`] and answers 200 with the upstream body. Any relay
//! failure collapses into a 500 carrying [`INTERNAL_SERVER_ERROR`], and so
//! does a client body that is not the expected JSON.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::application::backend::{ProxyError, SwarmBackend};
use crate::domain::swarm::{
    CreateSwarmRequest, DeleteSwarmRequest, GetSwarmRequest, StartSwarmRequest,
};

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub struct AppState {
    pub backend: Arc<dyn SwarmBackend>,
    pub start_time: Instant,
}

pub fn app(backend: Arc<dyn SwarmBackend>) -> Router {
    let state = Arc::new(AppState {
        backend,
        start_time: Instant::now(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/spawn/createSwarm", post(create_swarm))
        .route("/api/spawn/deleteSwarm", post(delete_swarm))
        .route("/api/spawn/startSwarm", post(start_swarm))
        .route("/api/spawn/getSwarm", post(get_swarm))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": INTERNAL_SERVER_ERROR })),
        )
            .into_response()
    }
}

/// [`Json`] extractor whose rejection is a [`ProxyError`].
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ProxyError::InvalidPayload(rejection.body_text())),
        }
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

async fn create_swarm(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<CreateSwarmRequest>,
) -> Result<Json<Value>, ProxyError> {
    let data = state.backend.create_swarm(&payload.new_swarm_name).await?;
    Ok(Json(data))
}

async fn delete_swarm(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<DeleteSwarmRequest>,
) -> Result<Json<Value>, ProxyError> {
    let data = state.backend.delete_swarm(&payload.swarm_id).await?;
    Ok(Json(data))
}

async fn start_swarm(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<StartSwarmRequest>,
) -> Result<Json<Value>, ProxyError> {
    let data = state
        .backend
        .start_swarm(&payload.swarm_id, &payload.goal)
        .await?;
    Ok(Json(data))
}

async fn get_swarm(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<GetSwarmRequest>,
) -> Result<Json<Value>, ProxyError> {
    let data = state.backend.get_swarm(&payload.swarm_id).await?;
    Ok(Json(data))
}
