// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! The planning session state machine.
//!
//! Steps advance `new -> planning -> completed`, driven by the two backend
//! calls. Calls are split into a `begin_*` half (marks the session busy and
//! issues a request token) and a `finish_*` half (applies the outcome); a
//! finish whose token no longer matches the pending one is stale and is
//! dropped, so an abandoned request can never overwrite state the user has
//! since moved past.

use serde::{Deserialize, Serialize};

use crate::model::{Attraction, CompletedItinerary, Restaurant, TripDetails, TripPlan};
use crate::ops::{apply_plan_op, Applied, PlanOp};
use crate::protocol::{self, DropTarget};
use crate::service::{Recommendations, ServiceError};
use crate::store::{PersistedState, StateStore};

/// User-facing failure messages; intentionally generic, details go to the log.
pub const GENERATE_FAILED_MESSAGE: &str = "Failed to generate trip. Please try again.";
pub const COMPLETE_FAILED_MESSAGE: &str = "Failed to complete itinerary. Please try again.";

/// Where the user is in the planning flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    New,
    Planning,
    Completed,
}

/// Identifies one in-flight backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Outcome of a backend call, delivered back to the session.
#[derive(Debug)]
pub enum SessionEvent {
    GenerateFinished {
        token: RequestToken,
        result: Result<Recommendations, ServiceError>,
    },
    CompleteFinished {
        token: RequestToken,
        result: Result<CompletedItinerary, ServiceError>,
    },
}

/// The whole client-side planning state, persisted after every change.
#[derive(Debug)]
pub struct TripSession {
    step: Step,
    trip_plan: Option<TripPlan>,
    landmarks: Vec<Attraction>,
    restaurants: Vec<Restaurant>,
    completed: Option<CompletedItinerary>,
    error: Option<String>,
    busy: bool,
    next_token: u64,
    pending: Option<RequestToken>,
    pending_details: Option<TripDetails>,
    store: StateStore,
}

impl TripSession {
    /// Restores the previous session from the store, or starts fresh.
    pub fn restore(store: StateStore) -> Self {
        let state = store.load();
        Self {
            step: state.step,
            trip_plan: state.trip_plan,
            landmarks: state.landmarks,
            restaurants: state.restaurants,
            completed: state.completed,
            error: None,
            busy: false,
            next_token: 0,
            pending: None,
            pending_details: None,
            store,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn trip_plan(&self) -> Option<&TripPlan> {
        self.trip_plan.as_ref()
    }

    pub fn landmarks(&self) -> &[Attraction] {
        &self.landmarks
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn completed(&self) -> Option<&CompletedItinerary> {
        self.completed.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Starts a generation request for `details`.
    ///
    /// Returns `None` when the session is not at the form step or a request
    /// is already in flight; the caller performs the actual backend call and
    /// reports back through [`TripSession::finish_generate`].
    pub fn begin_generate(&mut self, details: TripDetails) -> Option<RequestToken> {
        if self.busy || self.step != Step::New {
            return None;
        }
        let token = self.issue_token();
        self.busy = true;
        self.error = None;
        self.pending = Some(token);
        self.pending_details = Some(details);
        Some(token)
    }

    /// Applies the outcome of a generation request.
    pub fn finish_generate(
        &mut self,
        token: RequestToken,
        result: Result<Recommendations, ServiceError>,
    ) {
        if self.pending != Some(token) {
            tracing::debug!(?token, "dropping stale generation result");
            return;
        }
        self.busy = false;
        self.pending = None;
        let Some(details) = self.pending_details.take() else {
            tracing::debug!(?token, "generation result without pending details");
            return;
        };

        match result {
            Ok(recommendations) => {
                let (landmarks, restaurants) = recommendations.into_parts();
                self.landmarks = landmarks;
                self.restaurants = restaurants;
                self.trip_plan = Some(TripPlan::new(details));
                self.completed = None;
                self.error = None;
                self.step = Step::Planning;
                self.save();
            }
            Err(err) => {
                tracing::warn!(error = %err, "trip generation failed");
                self.error = Some(GENERATE_FAILED_MESSAGE.to_owned());
            }
        }
    }

    /// Starts a completion request for the current plan.
    pub fn begin_complete(&mut self) -> Option<RequestToken> {
        if self.busy || self.step != Step::Planning || self.trip_plan.is_none() {
            return None;
        }
        let token = self.issue_token();
        self.busy = true;
        self.error = None;
        self.pending = Some(token);
        Some(token)
    }

    /// Applies the outcome of a completion request.
    ///
    /// A failed completion keeps the session at the planning step so the
    /// user can retry without losing the curated plan.
    pub fn finish_complete(
        &mut self,
        token: RequestToken,
        result: Result<CompletedItinerary, ServiceError>,
    ) {
        if self.pending != Some(token) || self.step != Step::Planning {
            tracing::debug!(?token, "dropping stale completion result");
            return;
        }
        self.busy = false;
        self.pending = None;

        match result {
            Ok(itinerary) => {
                self.completed = Some(itinerary);
                self.error = None;
                self.step = Step::Completed;
                self.save();
            }
            Err(err) => {
                tracing::warn!(error = %err, "itinerary completion failed");
                self.error = Some(COMPLETE_FAILED_MESSAGE.to_owned());
            }
        }
    }

    /// Dispatches a [`SessionEvent`] to the matching `finish_*` half.
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::GenerateFinished { token, result } => {
                self.finish_generate(token, result);
            }
            SessionEvent::CompleteFinished { token, result } => {
                self.finish_complete(token, result);
            }
        }
    }

    /// Steps back one stage.
    ///
    /// Completed drops the finalized itinerary and returns to planning; the
    /// curated plan survives. Planning discards everything and returns to the
    /// form. Any in-flight request is abandoned either way.
    pub fn back(&mut self) {
        self.error = None;
        self.busy = false;
        self.pending = None;
        self.pending_details = None;

        match self.step {
            Step::Completed => {
                self.completed = None;
                self.step = Step::Planning;
                self.save();
            }
            Step::Planning => {
                self.trip_plan = None;
                self.landmarks.clear();
                self.restaurants.clear();
                self.completed = None;
                self.step = Step::New;
                self.save();
            }
            Step::New => {}
        }
    }

    /// Applies one plan operation; persists only when something changed.
    pub fn apply(&mut self, op: PlanOp) -> Applied {
        if self.step != Step::Planning {
            return Applied::Noop;
        }
        let Some(plan) = self.trip_plan.as_mut() else {
            return Applied::Noop;
        };
        let applied = apply_plan_op(plan, op);
        if applied.changed() {
            self.save();
        }
        applied
    }

    /// Decodes a dropped transfer envelope and applies the resulting
    /// operations as one unit, with a single persistence write.
    pub fn handle_drop(&mut self, target: DropTarget, raw: &str) -> Applied {
        if self.step != Step::Planning {
            return Applied::Noop;
        }
        let Some(transfer) = protocol::decode(raw) else {
            return Applied::Noop;
        };
        let Some(plan) = self.trip_plan.as_mut() else {
            return Applied::Noop;
        };

        let mut any_changed = false;
        for op in protocol::resolve_drop(target, transfer) {
            any_changed |= apply_plan_op(plan, op).changed();
        }
        if any_changed {
            self.save();
            Applied::Changed
        } else {
            Applied::Noop
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        token
    }

    fn save(&self) {
        let state = PersistedState {
            step: self.step,
            trip_plan: self.trip_plan.clone(),
            landmarks: self.landmarks.clone(),
            restaurants: self.restaurants.clone(),
            completed: self.completed.clone(),
            ..PersistedState::default()
        };
        if let Err(err) = self.store.save(&state) {
            tracing::warn!(error = %err, "failed to persist session state");
        }
    }
}
