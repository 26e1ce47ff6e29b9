// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::experiment::ExperimentId;
use crate::machine::MachineId;
use crate::FakeClock;
use std::time::Duration;

#[test]
fn machine_report_shows_status_ping_and_identity() {
    let clock = FakeClock::new();
    let machine = Machine::new(MachineId(0), "10.0.0.1".to_string(), &clock);

    clock.advance(Duration::from_secs(2));
    assert_eq!(
        describe_machine(&machine, &clock),
        "Machine 0, status: ready, last ping: 2sec, ip: 10.0.0.1",
    );
}

#[test]
fn waiting_experiment_reports_status_label() {
    let clock = FakeClock::new();
    let experiment = Experiment::new(
        ExperimentId(1),
        "load-a".to_string(),
        "baseline".to_string(),
        "payload".to_string(),
    );

    assert_eq!(
        describe_experiment(&experiment, &clock),
        "baseline Experiment 1 (load-a), status: waiting",
    );
}

#[test]
fn working_experiment_reports_elapsed_time_and_machine() {
    let clock = FakeClock::new();
    let mut experiment = Experiment::new(
        ExperimentId(2),
        "load-a".to_string(),
        "candidate".to_string(),
        "payload".to_string(),
    );
    experiment.assign(MachineId(0), &clock);
    clock.advance(Duration::from_secs(3));

    assert_eq!(
        describe_experiment(&experiment, &clock),
        "candidate Experiment 2 (load-a), status: working for 3sec, machine: 0",
    );
}

#[test]
fn done_experiment_keeps_machine_reference() {
    let clock = FakeClock::new();
    let mut experiment = Experiment::new(
        ExperimentId(0),
        "load-a".to_string(),
        "baseline".to_string(),
        "payload".to_string(),
    );
    experiment.assign(MachineId(1), &clock);
    experiment.finish("result".to_string());

    assert_eq!(
        describe_experiment(&experiment, &clock),
        "baseline Experiment 0 (load-a), status: done, machine: 1",
    );
}
