// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Tripdeck — terminal trip planner.
//!
//! The crate splits into the domain model (`model`), the partition mutation
//! layer (`ops`), the drag/transfer protocol (`protocol`), the planning
//! backend client (`service`), the session state machine (`session`), the
//! persisted store (`store`), and the terminal UI (`tui`).

pub mod model;
pub mod ops;
pub mod protocol;
pub mod service;
pub mod session;
pub mod store;
pub mod tui;
