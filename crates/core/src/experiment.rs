// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Experiment state machine
//!
//! An experiment is one unit of queued work: a named payload plus a
//! kind tag distinguishing which code path a worker should exercise.
//! Status advances Waiting -> Working -> Done and never regresses.

use crate::clock::Clock;
use crate::machine::MachineId;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Identifies an experiment in the ledger. Sequential, starting at zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ExperimentId(pub u64);

impl std::fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Experiment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperimentStatus {
    /// In the backlog, not yet assigned
    Waiting,
    /// Assigned to a machine
    Working,
    /// Result reported
    Done,
}

impl ExperimentStatus {
    pub fn label(self) -> &'static str {
        match self {
            ExperimentStatus::Waiting => "waiting",
            ExperimentStatus::Working => "working",
            ExperimentStatus::Done => "done",
        }
    }
}

/// One unit of work.
///
/// `payload` is loaded once at creation and immutable afterwards.
/// `assigned_machine` and `result` are each set exactly once, at the
/// Waiting->Working and Working->Done transitions respectively, and
/// never cleared.
#[derive(Debug, Clone)]
pub struct Experiment {
    pub id: ExperimentId,
    /// Label; may collide across experiments
    pub name: String,
    /// Free-form tag for the worker-side code path
    pub kind: String,
    pub payload: String,
    pub status: ExperimentStatus,
    pub started_at: Option<Instant>,
    /// Non-owning back-reference into the machine registry
    pub assigned_machine: Option<MachineId>,
    pub result: Option<String>,
}

impl Experiment {
    pub fn new(id: ExperimentId, name: String, kind: String, payload: String) -> Self {
        Self {
            id,
            name,
            kind,
            payload,
            status: ExperimentStatus::Waiting,
            started_at: None,
            assigned_machine: None,
            result: None,
        }
    }

    /// Waiting -> Working: record the machine and the start time.
    pub fn assign(&mut self, machine: MachineId, clock: &impl Clock) {
        self.status = ExperimentStatus::Working;
        self.started_at = Some(clock.now());
        self.assigned_machine = Some(machine);
    }

    /// Working -> Done: store the reported result.
    pub fn finish(&mut self, result: String) {
        self.status = ExperimentStatus::Done;
        self.result = Some(result);
    }

    /// Seconds spent working so far, if the experiment has started.
    pub fn since_start(&self, clock: &impl Clock) -> Option<f64> {
        self.started_at
            .map(|t| clock.now().duration_since(t).as_secs_f64())
    }
}

#[cfg(test)]
#[path = "experiment_tests.rs"]
mod tests;
