// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator console: line-oriented commands driving the coordinator.
//!
//! Runs on stdin next to the HTTP server. Command output goes to
//! stdout; structured logs stay on stderr so the console remains
//! readable. Each command takes the coordinator lock for its full
//! duration.

use std::sync::MutexGuard;

use xo_core::{describe_experiment, describe_machine, Coordinator, ExperimentId};

use crate::lifecycle::Shared;

/// Kinds used by the `bench` shorthand: the same payload queued once
/// per side of the comparison.
const BENCH_KINDS: [&str; 2] = ["baseline", "candidate"];

/// Whether the daemon should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Print the console prompt.
pub fn prompt() {
    println!("> ");
}

/// Handle one console line.
pub fn handle_line(shared: &Shared, line: &str) -> Flow {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("help") => print_help(),
        Some("exit") => return Flow::Exit,
        Some("machines") => list_machines(shared),
        Some("experiments") => list_experiments(shared),
        Some("result") => show_result(shared, parts.next()),
        Some("enqueue") => enqueue_file(shared, parts.next(), parts.next(), parts.next()),
        Some("bench") => enqueue_bench(shared, parts.next(), parts.next()),
        Some("load") => enqueue_directory(shared, parts.next(), parts.next()),
        // Unrecognized input falls through to a fresh prompt
        Some(_) | None => {}
    }
    Flow::Continue
}

fn lock(shared: &Shared) -> MutexGuard<'_, Coordinator> {
    shared.coordinator.lock().unwrap_or_else(|e| e.into_inner())
}

fn print_help() {
    println!("Available commands:");
    println!("- exit");
    println!("- machines");
    println!("- experiments");
    println!("- result <experiment id>");
    println!("- enqueue <name> <path/to/load/file> <kind>");
    println!("- bench <name> <path/to/load/file>");
    println!("- load <path/to/dir/containing/loads> <kind>");
}

fn list_machines(shared: &Shared) {
    let coordinator = lock(shared);
    for machine in coordinator.machines() {
        println!("{}", describe_machine(machine, &shared.clock));
    }
}

fn list_experiments(shared: &Shared) {
    let coordinator = lock(shared);
    for experiment in coordinator.all() {
        println!("{}", describe_experiment(experiment, &shared.clock));
    }
}

fn show_result(shared: &Shared, id: Option<&str>) {
    let Some(id) = id.and_then(|raw| raw.parse::<u64>().ok()) else {
        println!("usage: result <experiment id>");
        return;
    };

    let coordinator = lock(shared);
    match coordinator.experiment(ExperimentId(id)) {
        None => println!("Experiment not found"),
        Some(experiment) => {
            println!("{}", describe_experiment(experiment, &shared.clock));
            if let Some(result) = &experiment.result {
                print!("{}", result_banner(result));
            }
        }
    }
}

/// Result block as the operator sees it: three blank lines either
/// side of the banner.
fn result_banner(result: &str) -> String {
    format!(
        "\n\n\nResult ===============\n{}\n======================\n\n\n\n",
        result
    )
}

fn enqueue_file(shared: &Shared, name: Option<&str>, path: Option<&str>, kind: Option<&str>) {
    let (Some(name), Some(path), Some(kind)) = (name, path, kind) else {
        println!("usage: enqueue <name> <path> <kind>");
        return;
    };

    match std::fs::read_to_string(path) {
        Ok(payload) => {
            let mut coordinator = lock(shared);
            let id = coordinator.enqueue(name.to_string(), kind.to_string(), payload);
            if let Some(experiment) = coordinator.experiment(id) {
                println!("{}", describe_experiment(experiment, &shared.clock));
            }
        }
        Err(e) => println!("Failed to read {}: {}", path, e),
    }
}

/// `bench <name> <path>`: read the load file once and queue it under
/// each comparison kind.
fn enqueue_bench(shared: &Shared, name: Option<&str>, path: Option<&str>) {
    let (Some(name), Some(path)) = (name, path) else {
        println!("usage: bench <name> <path>");
        return;
    };

    let payload = match std::fs::read_to_string(path) {
        Ok(payload) => payload,
        Err(e) => {
            println!("Failed to read {}: {}", path, e);
            return;
        }
    };

    let mut coordinator = lock(shared);
    for kind in BENCH_KINDS {
        let id = coordinator.enqueue(name.to_string(), kind.to_string(), payload.clone());
        if let Some(experiment) = coordinator.experiment(id) {
            println!("{}", describe_experiment(experiment, &shared.clock));
        }
    }
}

/// `load <directory> <kind>`: one experiment per regular file, named
/// after the file. Subdirectories and unreadable files are skipped.
fn enqueue_directory(shared: &Shared, dir: Option<&str>, kind: Option<&str>) {
    let (Some(dir), Some(kind)) = (dir, kind) else {
        println!("usage: load <directory> <kind>");
        return;
    };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            println!("Failed to read {}: {}", dir, e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match std::fs::read_to_string(&path) {
            Ok(payload) => {
                let mut coordinator = lock(shared);
                let id = coordinator.enqueue(name, kind.to_string(), payload);
                if let Some(experiment) = coordinator.experiment(id) {
                    println!("{}", describe_experiment(experiment, &shared.clock));
                }
            }
            Err(e) => println!("Skipping {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
