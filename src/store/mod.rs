// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Durable snapshot of the planning session.
//!
//! One versioned JSON file per state directory. Loading never fails: a
//! missing, unreadable, foreign-version or inconsistent snapshot degrades to
//! a clean default (with a log line), because losing a cached plan is always
//! better than refusing to start. Writes go through a temp file and rename so
//! a crash mid-write leaves the previous snapshot intact.

use std::fmt;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{Attraction, CompletedItinerary, Restaurant, TripPlan};
use crate::session::Step;

pub const STATE_FILENAME: &str = "tripdeck-state.json";
pub const STATE_VERSION: u32 = 1;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "state file {} i/o error: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "state file {} encode error: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// How hard a write tries to survive power loss.
///
/// `BestEffort` skips fsync; the rename still protects against torn files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    #[default]
    BestEffort,
    Durable,
}

/// Everything worth restoring between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub step: Step,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_plan: Option<TripPlan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Attraction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restaurants: Vec<Restaurant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<CompletedItinerary>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            step: Step::New,
            trip_plan: None,
            landmarks: Vec::new(),
            restaurants: Vec::new(),
            completed: None,
        }
    }
}

impl PersistedState {
    /// Repairs step/payload mismatches instead of rejecting the snapshot.
    ///
    /// A plan with step `new` advances to `planning`; a non-`new` step with
    /// no plan resets entirely; a `completed` step without a completed
    /// itinerary falls back to `planning`.
    fn normalized(mut self) -> Self {
        match (&self.trip_plan, self.step) {
            (Some(plan), _) if !plan.is_consistent() => {
                tracing::warn!("persisted trip plan is inconsistent; starting fresh");
                return Self::default();
            }
            (Some(_), Step::New) => {
                tracing::warn!("persisted step was 'new' despite a plan; resuming planning");
                self.step = Step::Planning;
            }
            (None, step) if step != Step::New => {
                tracing::warn!(?step, "persisted step had no plan behind it; starting fresh");
                return Self::default();
            }
            _ => {}
        }
        if self.step == Step::Completed && self.completed.is_none() {
            tracing::warn!(
                "persisted step was 'completed' without an itinerary; resuming planning"
            );
            self.step = Step::Planning;
        }
        if self.step != Step::Completed {
            self.completed = None;
        }
        self
    }
}

/// Filesystem-backed store for one [`PersistedState`] snapshot.
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
    durability: WriteDurability,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILENAME)
    }

    /// Loads the snapshot, degrading to defaults instead of erroring.
    pub fn load(&self) -> PersistedState {
        let path = self.state_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no persisted state; starting fresh");
                return PersistedState::default();
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "unreadable persisted state; starting fresh"
                );
                return PersistedState::default();
            }
        };

        let state: PersistedState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "corrupt persisted state; starting fresh"
                );
                return PersistedState::default();
            }
        };

        if state.version != STATE_VERSION {
            tracing::warn!(
                path = %path.display(),
                found = state.version,
                expected = STATE_VERSION,
                "persisted state version mismatch; starting fresh"
            );
            return PersistedState::default();
        }

        state.normalized()
    }

    /// Writes the snapshot atomically: temp file in the same directory, then
    /// rename over the previous one.
    pub fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.state_path();
        let json = serde_json::to_vec_pretty(state).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.subsec_nanos())
            .unwrap_or(0);
        let tmp_path = self
            .root
            .join(format!(".tripdeck.tmp.{STATE_FILENAME}.{nanos}"));

        let write_result = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&json)?;
            match self.durability {
                WriteDurability::Durable => file.sync_all()?,
                WriteDurability::BestEffort => {}
            }
            drop(file);
            fs::rename(&tmp_path, &path)
        });

        if let Err(source) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io {
                path: tmp_path,
                source,
            });
        }
        tracing::debug!(path = %path.display(), step = ?state.step, "persisted state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
