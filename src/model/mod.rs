// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Core data model.
//!
//! A trip plan partitions backend-supplied places into a wishlist plus one
//! ordered list per travel day; the finalized itinerary is a separate
//! read-only structure.

pub mod completed;
pub mod place;
pub mod trip;

pub use completed::{BlockKind, CompletedDay, CompletedItinerary, ItineraryBlock};
pub use place::{Attraction, AttractionKind, Badge, Location, Place, PlaceError, Restaurant};
pub use trip::{
    DayPlan, EntryTag, PlanEntry, TripDetails, TripDetailsError, TripPlan, MAX_KID_AGE,
    MAX_TRAVEL_DAYS, MIN_TRAVEL_DAYS,
};
