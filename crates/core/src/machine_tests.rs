// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::FakeClock;
use std::time::Duration;

#[test]
fn machine_lifecycle() {
    let clock = FakeClock::new();
    let mut machine = Machine::new(MachineId(0), "10.0.0.1".to_string(), &clock);

    assert_eq!(machine.status, MachineStatus::Ready);
    assert!(machine.current_experiment.is_none());

    machine.begin(ExperimentId(3));
    assert_eq!(machine.status, MachineStatus::Working);
    assert_eq!(machine.current_experiment, Some(ExperimentId(3)));

    machine.finish(&clock);
    assert_eq!(machine.status, MachineStatus::CleaningUp);
    assert!(machine.current_experiment.is_none());

    machine.ready(&clock);
    assert_eq!(machine.status, MachineStatus::Ready);
    assert!(machine.current_experiment.is_none());
}

#[test]
fn ready_clears_stale_assignment() {
    let clock = FakeClock::new();
    let mut machine = Machine::new(MachineId(1), "10.0.0.2".to_string(), &clock);

    machine.begin(ExperimentId(0));
    machine.ready(&clock);

    assert_eq!(machine.status, MachineStatus::Ready);
    assert!(machine.current_experiment.is_none());
}

#[test]
fn since_ping_tracks_elapsed_time() {
    let clock = FakeClock::new();
    let mut machine = Machine::new(MachineId(0), "10.0.0.1".to_string(), &clock);

    clock.advance(Duration::from_secs(7));
    assert_eq!(machine.since_ping(&clock), 7.0);

    // Any contact refreshes the ping time
    machine.ready(&clock);
    assert_eq!(machine.since_ping(&clock), 0.0);
}

#[test]
fn status_labels() {
    assert_eq!(MachineStatus::Ready.label(), "ready");
    assert_eq!(MachineStatus::Working.label(), "working");
    assert_eq!(MachineStatus::CleaningUp.label(), "cleaning up");
}

#[test]
fn id_and_status_wire_forms_are_stable() {
    assert_eq!(serde_json::to_string(&MachineId(7)).unwrap(), "7");
    let id: MachineId = serde_json::from_str("7").unwrap();
    assert_eq!(id, MachineId(7));

    assert_eq!(
        serde_json::to_string(&MachineStatus::CleaningUp).unwrap(),
        "\"CleaningUp\""
    );
    let status: MachineStatus = serde_json::from_str("\"Working\"").unwrap();
    assert_eq!(status, MachineStatus::Working);
}
