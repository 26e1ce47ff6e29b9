// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The coordinator: machine registry, experiment ledger, backlog queue,
//! and the assignment protocol coupling the two state machines.
//!
//! All long-lived state is owned here, constructed once at process
//! start. Callers share one coordinator behind a mutex and hold the
//! lock for a whole `request_work`/`report_done` call, so every
//! operation is a single critical section and no experiment can be
//! handed out twice.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;
use tracing::info;

use crate::clock::Clock;
use crate::experiment::{Experiment, ExperimentId};
use crate::machine::{Machine, MachineId};

/// What a polling machine is handed when an experiment is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrder {
    pub experiment: ExperimentId,
    pub kind: String,
    pub payload: String,
}

/// Coordinator errors
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// A machine reported a result with no experiment in flight. The
    /// server and the worker disagree about state (typically a server
    /// restart while the worker kept running); nothing is mutated and
    /// recovery is manual.
    #[error("machine {identity} has no experiment in flight")]
    NothingInFlight { identity: String },
}

/// Registry, ledger, backlog, and completed list in one place.
#[derive(Debug, Default)]
pub struct Coordinator {
    /// Machine ledger; index equals `MachineId`
    machines: Vec<Machine>,
    /// Identity -> machine id lookup
    machine_index: HashMap<String, MachineId>,
    /// Experiment ledger; index equals `ExperimentId`
    experiments: Vec<Experiment>,
    /// Waiting experiments, FIFO
    backlog: VecDeque<ExperimentId>,
    /// Done experiments, in completion order
    completed: Vec<ExperimentId>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a machine by identity, creating a Ready record on first
    /// contact. Repeated calls with the same identity return the same
    /// id and never grow the ledger.
    pub fn find_or_create(&mut self, identity: &str, clock: &impl Clock) -> MachineId {
        if let Some(&id) = self.machine_index.get(identity) {
            return id;
        }
        let id = MachineId(self.machines.len() as u64);
        self.machines
            .push(Machine::new(id, identity.to_string(), clock));
        self.machine_index.insert(identity.to_string(), id);
        info!(machine = %id, identity, "machine registered");
        id
    }

    /// Create an experiment with the next sequential id and append it
    /// to the ledger and the backlog tail. The payload has already
    /// been read by the caller; a failed read never reaches this point.
    pub fn enqueue(&mut self, name: String, kind: String, payload: String) -> ExperimentId {
        let id = ExperimentId(self.experiments.len() as u64);
        self.experiments
            .push(Experiment::new(id, name, kind, payload));
        self.backlog.push_back(id);
        info!(experiment = %id, "experiment queued");
        id
    }

    /// Hand the backlog head to the polling machine.
    ///
    /// The machine is first normalized to Ready (stale assignment
    /// cleared, ping refreshed). An empty backlog returns `None` and
    /// leaves the machine Ready; that is the steady state, not an
    /// error.
    pub fn request_work(&mut self, identity: &str, clock: &impl Clock) -> Option<WorkOrder> {
        let machine_id = self.find_or_create(identity, clock);
        self.machine_mut(machine_id).ready(clock);

        let experiment_id = self.backlog.pop_front()?;
        self.machine_mut(machine_id).begin(experiment_id);

        let experiment = self.experiment_mut(experiment_id);
        experiment.assign(machine_id, clock);
        let order = WorkOrder {
            experiment: experiment_id,
            kind: experiment.kind.clone(),
            payload: experiment.payload.clone(),
        };
        info!(experiment = %experiment_id, machine = %machine_id, "assigned experiment");
        Some(order)
    }

    /// Record the result for the machine's in-flight experiment.
    ///
    /// The machine moves to CleaningUp with its assignment cleared;
    /// the experiment moves to Done and joins the completed list.
    /// Returns the experiment id so the caller can persist the result
    /// keyed by id. Errors mutate nothing.
    pub fn report_done(
        &mut self,
        identity: &str,
        result: String,
        clock: &impl Clock,
    ) -> Result<ExperimentId, CoordinatorError> {
        let Some(&machine_id) = self.machine_index.get(identity) else {
            return Err(CoordinatorError::NothingInFlight {
                identity: identity.to_string(),
            });
        };
        let Some(experiment_id) = self.machine_mut(machine_id).current_experiment else {
            return Err(CoordinatorError::NothingInFlight {
                identity: identity.to_string(),
            });
        };

        self.machine_mut(machine_id).finish(clock);
        self.experiment_mut(experiment_id).finish(result);
        self.completed.push(experiment_id);
        info!(experiment = %experiment_id, machine = %machine_id, "experiment finished");
        Ok(experiment_id)
    }

    /// The full experiment ledger in creation order.
    pub fn all(&self) -> &[Experiment] {
        &self.experiments
    }

    /// Done experiments in completion order (not ledger order).
    pub fn completed(&self) -> impl Iterator<Item = &Experiment> {
        self.completed.iter().map(|&id| &self.experiments[id.0 as usize])
    }

    /// The machine ledger in creation order.
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn experiment(&self, id: ExperimentId) -> Option<&Experiment> {
        self.experiments.get(id.0 as usize)
    }

    pub fn machine(&self, id: MachineId) -> Option<&Machine> {
        self.machines.get(id.0 as usize)
    }

    /// Number of experiments still waiting for a machine.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    fn machine_mut(&mut self, id: MachineId) -> &mut Machine {
        &mut self.machines[id.0 as usize]
    }

    fn experiment_mut(&mut self, id: ExperimentId) -> &mut Experiment {
        &mut self.experiments[id.0 as usize]
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
