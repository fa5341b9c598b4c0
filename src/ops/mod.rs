// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Mutation operations for the trip plan partition.
//!
//! Every change to the wishlist/per-day partition goes through
//! [`apply_plan_op`], the single choke point that keeps the partition
//! invariants enforceable. Malformed targets (unknown day, stale index, dead
//! tag) are deliberately no-ops rather than errors: a drop of a stale drag
//! payload must never crash the UI.

use crate::model::{Attraction, EntryTag, TripPlan};

/// One atomic partition mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOp {
    /// Appends to the wishlist. Duplicate names are allowed; each entry gets
    /// its own instance tag.
    AddToWishlist { attraction: Attraction },
    /// Removes exactly the referenced wishlist instance.
    RemoveFromWishlist { tag: EntryTag },
    /// Appends to a day slot; promotes the place out of the wishlist if a
    /// same-named entry is present there.
    AddToItinerary { attraction: Attraction, day: u8 },
    /// Removes the entry at a positional index within a day.
    RemoveFromItinerary { day: u8, index: usize },
    /// Moves an entry to the end of another day. A same-day source is a
    /// no-op; reordering within a day is `ReorderWithinDay`.
    MoveBetweenDays {
        from_day: u8,
        from_index: usize,
        to_day: u8,
    },
    /// Splice-move within one day: remove at `from_index` first, then insert
    /// at `to_index` relative to the post-removal list.
    ReorderWithinDay {
        day: u8,
        from_index: usize,
        to_index: usize,
    },
}

/// Whether an operation changed the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Noop,
}

impl Applied {
    pub fn changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Applies one operation to the plan.
///
/// On success the plan revision is bumped exactly once, so persistence keyed
/// on the revision fires once per user action.
pub fn apply_plan_op(plan: &mut TripPlan, op: PlanOp) -> Applied {
    let applied = match op {
        PlanOp::AddToWishlist { attraction } => add_to_wishlist(plan, attraction),
        PlanOp::RemoveFromWishlist { tag } => remove_from_wishlist(plan, tag),
        PlanOp::AddToItinerary { attraction, day } => add_to_itinerary(plan, attraction, day),
        PlanOp::RemoveFromItinerary { day, index } => remove_from_itinerary(plan, day, index),
        PlanOp::MoveBetweenDays {
            from_day,
            from_index,
            to_day,
        } => move_between_days(plan, from_day, from_index, to_day),
        PlanOp::ReorderWithinDay {
            day,
            from_index,
            to_index,
        } => reorder_within_day(plan, day, from_index, to_index),
    };

    if applied.changed() {
        plan.bump_rev();
    }
    applied
}

fn add_to_wishlist(plan: &mut TripPlan, attraction: Attraction) -> Applied {
    let entry = plan.attach(attraction);
    plan.wishlist_mut().push(entry);
    Applied::Changed
}

fn remove_from_wishlist(plan: &mut TripPlan, tag: EntryTag) -> Applied {
    let wishlist = plan.wishlist_mut();
    match wishlist.iter().position(|entry| entry.tag() == tag) {
        Some(index) => {
            wishlist.remove(index);
            Applied::Changed
        }
        None => Applied::Noop,
    }
}

fn add_to_itinerary(plan: &mut TripPlan, attraction: Attraction, day: u8) -> Applied {
    if plan.day(day).is_none() {
        return Applied::Noop;
    }

    let name = attraction.name().to_owned();
    let entry = plan.attach(attraction);
    if let Some(day_plan) = plan.day_mut(day) {
        day_plan.entries_mut().push(entry);
    }

    // Promote semantics: the first same-named wishlist entry leaves the
    // wishlist when its place lands in a day slot.
    let wishlist = plan.wishlist_mut();
    if let Some(index) = wishlist.iter().position(|entry| entry.name() == name) {
        wishlist.remove(index);
    }
    Applied::Changed
}

fn remove_from_itinerary(plan: &mut TripPlan, day: u8, index: usize) -> Applied {
    let Some(day_plan) = plan.day_mut(day) else {
        return Applied::Noop;
    };
    let entries = day_plan.entries_mut();
    if index >= entries.len() {
        return Applied::Noop;
    }
    entries.remove(index);
    Applied::Changed
}

fn move_between_days(plan: &mut TripPlan, from_day: u8, from_index: usize, to_day: u8) -> Applied {
    if from_day == to_day || plan.day(to_day).is_none() {
        return Applied::Noop;
    }
    let Some(source) = plan.day_mut(from_day) else {
        return Applied::Noop;
    };
    let entries = source.entries_mut();
    if from_index >= entries.len() {
        return Applied::Noop;
    }
    let entry = entries.remove(from_index);

    match plan.day_mut(to_day) {
        Some(target) => {
            target.entries_mut().push(entry);
            Applied::Changed
        }
        // Unreachable after the range check above; restore rather than lose
        // the entry if it ever happens.
        None => {
            if let Some(source) = plan.day_mut(from_day) {
                source.entries_mut().insert(from_index, entry);
            }
            Applied::Noop
        }
    }
}

fn reorder_within_day(plan: &mut TripPlan, day: u8, from_index: usize, to_index: usize) -> Applied {
    let Some(day_plan) = plan.day_mut(day) else {
        return Applied::Noop;
    };
    let entries = day_plan.entries_mut();
    if from_index >= entries.len() || from_index == to_index {
        return Applied::Noop;
    }
    let entry = entries.remove(from_index);
    let to_index = to_index.min(entries.len());
    entries.insert(to_index, entry);
    Applied::Changed
}
