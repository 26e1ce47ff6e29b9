// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Experiment Orchestrator daemon (xod)
//!
//! Owns the coordinator and serves both external surfaces: the worker
//! polling protocol over HTTP and the operator console on stdin.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod console;
mod identity;
mod lifecycle;
mod server;

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::console::Flow;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = lifecycle::Config::from_env()?;
    let daemon = lifecycle::startup(&config).await?;
    let lifecycle::DaemonState {
        listener,
        local_addr,
        shared,
    } = daemon;

    info!("Orchestrator listening at http://{}", local_addr);

    // HTTP transport runs as its own task; the coordinator mutex is
    // the only coupling to the console below.
    let app = server::router(shared.clone());
    let server = tokio::spawn(async move {
        let service = app.into_make_service_with_connect_info::<SocketAddr>();
        if let Err(e) = axum::serve(listener, service).await {
            error!("HTTP server error: {}", e);
        }
    });

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut console_open = true;
    console::prompt();

    // Main event loop
    loop {
        tokio::select! {
            line = lines.next_line(), if console_open => {
                match line {
                    Ok(Some(line)) => {
                        if console::handle_line(&shared, &line) == Flow::Exit {
                            break;
                        }
                        console::prompt();
                    }
                    Ok(None) => {
                        // stdin closed; keep serving workers without a console
                        console_open = false;
                    }
                    Err(e) => {
                        error!("Console read error: {}", e);
                        console_open = false;
                    }
                }
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
        }
    }

    server.abort();
    info!("Daemon stopped");
    Ok(())
}

/// Logs go to stderr so the console on stdout stays readable.
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
