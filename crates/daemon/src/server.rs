// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport for the worker polling protocol.
//!
//! Two plain-text routes: `GET /ready` to poll for work and
//! `POST /done` to report a result. The caller's identity is its
//! normalized source address; a request with an unusable address is
//! rejected before any state changes.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use xo_core::WorkOrder;

use crate::identity;
use crate::lifecycle::{self, Shared};

/// Result bodies are raw text, capped at 5 MB.
const RESULT_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Configure the worker-facing routes
pub fn router(shared: Shared) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .route("/done", post(done))
        .layer(DefaultBodyLimit::max(RESULT_BODY_LIMIT))
        .with_state(shared)
}

/// Body handed to a worker: a kind header line, then the raw payload.
fn work_response(order: &WorkOrder) -> String {
    format!("# {}\n{}", order.kind, order.payload)
}

/// `GET /ready` — the machine at the source address polls for work.
/// Empty body means no work; that is the steady state, not an error.
async fn ready(
    State(shared): State<Shared>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<String, (StatusCode, String)> {
    let identity = identity::normalize(addr.ip())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let order = {
        let mut coordinator = shared.coordinator.lock().unwrap_or_else(|e| e.into_inner());
        coordinator.request_work(&identity, &shared.clock)
    };

    Ok(match order {
        Some(order) => work_response(&order),
        None => String::new(),
    })
}

/// `POST /done` — the machine at the source address reports its
/// result. A report with no experiment in flight is a protocol
/// desynchronization and comes back as a conflict.
async fn done(
    State(shared): State<Shared>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: String,
) -> Result<String, (StatusCode, String)> {
    let identity = identity::normalize(addr.ip())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let experiment_id = {
        let mut coordinator = shared.coordinator.lock().unwrap_or_else(|e| e.into_inner());
        coordinator
            .report_done(&identity, body.clone(), &shared.clock)
            .map_err(|e| (StatusCode::CONFLICT, e.to_string()))?
    };

    // Persist outside the lock; the state transition already happened.
    lifecycle::persist_result(&shared.results_dir, experiment_id, &body);

    Ok(String::new())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
