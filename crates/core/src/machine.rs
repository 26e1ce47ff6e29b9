// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Machine state machine
//!
//! A machine is a worker process identified by its normalized network
//! address. Records are created lazily on first contact and never
//! destroyed; a machine that stops polling is only visible through its
//! stale ping time in reports.

use crate::clock::Clock;
use crate::experiment::ExperimentId;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Identifies a machine in the registry. Sequential, starting at zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MachineId(pub u64);

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Machine status. Deliberately a separate enum from
/// [`ExperimentStatus`](crate::experiment::ExperimentStatus); the two
/// state machines never share a status space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Idle, waiting for work
    Ready,
    /// Running an experiment
    Working,
    /// Reported a result; expected to poll again shortly
    CleaningUp,
}

impl MachineStatus {
    pub fn label(self) -> &'static str {
        match self {
            MachineStatus::Ready => "ready",
            MachineStatus::Working => "working",
            MachineStatus::CleaningUp => "cleaning up",
        }
    }
}

/// A worker machine.
///
/// Invariant: `Working` and `CleaningUp` during a report imply an
/// in-flight experiment; `Ready` implies none. The transitions below
/// are the only mutation points, and each maintains that pairing.
#[derive(Debug, Clone)]
pub struct Machine {
    pub id: MachineId,
    /// Normalized address used for registry lookup, e.g. "10.0.0.5"
    pub identity: String,
    pub status: MachineStatus,
    /// Non-owning reference into the experiment ledger
    pub current_experiment: Option<ExperimentId>,
    pub last_ping: Instant,
}

impl Machine {
    /// Create a machine on first contact: Ready, nothing assigned.
    pub fn new(id: MachineId, identity: String, clock: &impl Clock) -> Self {
        Self {
            id,
            identity,
            status: MachineStatus::Ready,
            current_experiment: None,
            last_ping: clock.now(),
        }
    }

    /// Normalize to Ready: clear any stale assignment and refresh the
    /// ping time. A machine that polls for work is idle from the
    /// server's point of view, whatever it was doing before.
    pub fn ready(&mut self, clock: &impl Clock) {
        self.status = MachineStatus::Ready;
        self.current_experiment = None;
        self.last_ping = clock.now();
    }

    /// Ready -> Working with the given experiment in flight.
    pub fn begin(&mut self, experiment: ExperimentId) {
        self.status = MachineStatus::Working;
        self.current_experiment = Some(experiment);
    }

    /// Working -> CleaningUp after a result is reported. The
    /// assignment reference is cleared; the next poll returns the
    /// machine to Ready.
    pub fn finish(&mut self, clock: &impl Clock) {
        self.status = MachineStatus::CleaningUp;
        self.current_experiment = None;
        self.last_ping = clock.now();
    }

    /// Seconds since the machine last contacted the server.
    pub fn since_ping(&self, clock: &impl Clock) -> f64 {
        clock.now().duration_since(self.last_ping).as_secs_f64()
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
