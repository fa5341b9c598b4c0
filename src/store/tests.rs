// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{TripDetails, TripPlan};
use crate::session::Step;

use super::{PersistedState, StateStore, WriteDurability, STATE_VERSION};

struct TempRoot(PathBuf);

impl TempRoot {
    fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let root = std::env::temp_dir().join(format!(
            "tripdeck-store-{label}-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("temp root");
        Self(root)
    }

    fn store(&self) -> StateStore {
        StateStore::new(&self.0)
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn planning_state() -> PersistedState {
    let plan = TripPlan::new(TripDetails::new("Paris", 3).expect("details"));
    PersistedState {
        step: Step::Planning,
        trip_plan: Some(plan),
        ..PersistedState::default()
    }
}

#[test]
fn missing_state_file_loads_defaults() {
    let root = TempRoot::new("missing");

    let state = root.store().load();

    assert_eq!(state, PersistedState::default());
}

#[test]
fn save_then_load_round_trips_the_snapshot() {
    let root = TempRoot::new("roundtrip");
    let store = root.store();
    let state = planning_state();

    store.save(&state).expect("save");

    assert_eq!(store.load(), state);
    // No temp file left behind.
    let leftovers: Vec<_> = fs::read_dir(root.0.as_path())
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn durable_save_round_trips_too() {
    let root = TempRoot::new("durable");
    let store = root.store().with_durability(WriteDurability::Durable);
    let state = planning_state();

    store.save(&state).expect("save");

    assert_eq!(store.load(), state);
}

#[test]
fn corrupt_state_file_degrades_to_defaults() {
    let root = TempRoot::new("corrupt");
    let store = root.store();
    fs::write(store.state_path(), b"{ not json").expect("write corrupt");

    assert_eq!(store.load(), PersistedState::default());
}

#[test]
fn foreign_version_degrades_to_defaults() {
    let root = TempRoot::new("version");
    let store = root.store();
    let mut state = planning_state();
    state.version = STATE_VERSION + 1;
    let json = serde_json::to_string(&state).expect("serialize");
    fs::write(store.state_path(), json).expect("write");

    assert_eq!(store.load(), PersistedState::default());
}

#[test]
fn step_new_with_a_plan_heals_to_planning() {
    let root = TempRoot::new("heal-planning");
    let store = root.store();
    let mut state = planning_state();
    state.step = Step::New;
    store.save(&state).expect("save");

    let loaded = store.load();

    assert_eq!(loaded.step, Step::Planning);
    assert!(loaded.trip_plan.is_some());
}

#[test]
fn non_new_step_without_a_plan_resets() {
    let root = TempRoot::new("heal-reset");
    let store = root.store();
    let state = PersistedState {
        step: Step::Planning,
        ..PersistedState::default()
    };
    store.save(&state).expect("save");

    assert_eq!(store.load(), PersistedState::default());
}

#[test]
fn completed_step_without_an_itinerary_falls_back_to_planning() {
    let root = TempRoot::new("heal-completed");
    let store = root.store();
    let mut state = planning_state();
    state.step = Step::Completed;
    store.save(&state).expect("save");

    let loaded = store.load();

    assert_eq!(loaded.step, Step::Planning);
    assert!(loaded.completed.is_none());
}

#[test]
fn save_overwrites_previous_snapshot() {
    let root = TempRoot::new("overwrite");
    let store = root.store();
    store.save(&planning_state()).expect("first save");
    store.save(&PersistedState::default()).expect("second save");

    assert_eq!(store.load(), PersistedState::default());
}
