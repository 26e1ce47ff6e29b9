// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn persist_result_writes_one_file_keyed_by_id() {
    let dir = tempfile::tempdir().unwrap();

    persist_result(dir.path(), ExperimentId(3), "timing: 12ms");

    let content = std::fs::read_to_string(dir.path().join("result3")).unwrap();
    assert_eq!(content, "timing: 12ms");
}

#[test]
fn persist_result_into_missing_directory_does_not_panic() {
    persist_result(std::path::Path::new("/no/such/dir"), ExperimentId(0), "r");
}

#[tokio::test]
async fn startup_binds_listener_and_creates_results_dir() {
    let dir = tempfile::tempdir().unwrap();
    let results_dir = dir.path().join("results");
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        results_dir: results_dir.clone(),
    };

    let daemon = startup(&config).await.unwrap();

    assert!(results_dir.is_dir());
    assert_ne!(daemon.local_addr.port(), 0);
    assert!(daemon.shared.coordinator.lock().unwrap().all().is_empty());
}
