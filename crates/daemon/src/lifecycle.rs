// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: configuration, startup, result persistence.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};
use xo_core::{Coordinator, ExperimentId, SystemClock};

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub addr: SocketAddr,
    /// Directory completed results are written to
    pub results_dir: PathBuf,
}

impl Config {
    /// Build config from the environment. `XO_ADDR` overrides the bind
    /// address, `XO_RESULTS_DIR` the results directory.
    pub fn from_env() -> Result<Self, LifecycleError> {
        let addr = match std::env::var("XO_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| LifecycleError::InvalidAddr(raw))?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };
        let results_dir = std::env::var("XO_RESULTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("results"));
        Ok(Self { addr, results_dir })
    }
}

/// State shared between the HTTP handlers and the console.
///
/// One mutex guards the whole coordinator; every handler holds it for
/// the full protocol operation, so `request_work` and `report_done`
/// are each one critical section.
#[derive(Clone)]
pub struct Shared {
    pub coordinator: Arc<Mutex<Coordinator>>,
    pub clock: SystemClock,
    pub results_dir: PathBuf,
}

impl Shared {
    pub fn new(results_dir: PathBuf) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(Coordinator::new())),
            clock: SystemClock,
            results_dir,
        }
    }
}

/// Daemon state during operation
pub struct DaemonState {
    pub listener: TcpListener,
    pub local_addr: SocketAddr,
    pub shared: Shared,
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("invalid bind address: {0}")]
    InvalidAddr(String),

    #[error("failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon: create the results directory, bind the listener,
/// construct the coordinator.
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    std::fs::create_dir_all(&config.results_dir)?;

    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|e| LifecycleError::BindFailed(config.addr, e))?;
    let local_addr = listener.local_addr()?;

    info!(
        "Results directory: {}",
        config.results_dir.display()
    );

    Ok(DaemonState {
        listener,
        local_addr,
        shared: Shared::new(config.results_dir.clone()),
    })
}

/// Write a completed experiment's result, keyed by experiment id.
///
/// Runs after `report_done` already succeeded; a write failure is
/// logged and does not fail the worker's request.
pub fn persist_result(results_dir: &Path, id: ExperimentId, result: &str) {
    let path = results_dir.join(format!("result{}", id));
    if let Err(e) = std::fs::write(&path, result) {
        warn!("Failed to write {}: {}", path.display(), e);
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
