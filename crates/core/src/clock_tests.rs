// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_advances() {
    let clock = SystemClock;
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}

#[test]
fn fake_clock_is_frozen_until_advanced() {
    let clock = FakeClock::new();
    let a = clock.now();
    assert_eq!(clock.now(), a);

    clock.advance(Duration::from_secs(5));
    assert_eq!(clock.now(), a + Duration::from_secs(5));
}

#[test]
fn fake_clock_clones_share_time() {
    let clock = FakeClock::new();
    let other = clock.clone();
    clock.advance(Duration::from_secs(1));
    assert_eq!(clock.now(), other.now());
}
