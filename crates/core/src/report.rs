// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status reporting
//!
//! Purely derived, human-readable one-liners for the operator console.
//! Safe to call at any time from any state; nothing here mutates.

use crate::clock::Clock;
use crate::experiment::{Experiment, ExperimentStatus};
use crate::machine::Machine;

/// One line describing a machine.
///
/// `Machine 0, status: ready, last ping: 1.5sec, ip: 10.0.0.1`
pub fn describe_machine(machine: &Machine, clock: &impl Clock) -> String {
    format!(
        "Machine {}, status: {}, last ping: {}sec, ip: {}",
        machine.id,
        machine.status.label(),
        machine.since_ping(clock),
        machine.identity,
    )
}

/// One line describing an experiment. Working experiments show elapsed
/// time since assignment instead of the bare status label.
///
/// `baseline Experiment 2 (load-a), status: working for 3sec, machine: 0`
pub fn describe_experiment(experiment: &Experiment, clock: &impl Clock) -> String {
    let status = match (experiment.status, experiment.since_start(clock)) {
        (ExperimentStatus::Working, Some(secs)) => format!("working for {}sec", secs),
        _ => experiment.status.label().to_string(),
    };
    let mut line = format!(
        "{} Experiment {} ({}), status: {}",
        experiment.kind, experiment.id, experiment.name, status,
    );
    if let Some(machine) = experiment.assigned_machine {
        line.push_str(&format!(", machine: {}", machine));
    }
    line
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
