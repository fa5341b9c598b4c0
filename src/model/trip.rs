// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::place::Attraction;

pub const MIN_TRAVEL_DAYS: u8 = 1;
pub const MAX_TRAVEL_DAYS: u8 = 14;
pub const MAX_KID_AGE: u8 = 17;

/// Instance tag for a wishlist or itinerary entry.
///
/// Tags are allocated by the owning [`TripPlan`] and never reused within a
/// plan, so two entries for the same place name stay distinguishable and
/// removal can target exactly one instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryTag(u64);

impl EntryTag {
    fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e:{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripDetailsError {
    EmptyDestination,
    TravelDaysOutOfRange { days: i64 },
    TravelDaysLockedByDates,
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
    KidsAgesMissing,
    KidAgeOutOfRange { age: u8 },
}

impl fmt::Display for TripDetailsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDestination => f.write_str("destination must not be empty"),
            Self::TravelDaysOutOfRange { days } => write!(
                f,
                "travel days must be between {MIN_TRAVEL_DAYS} and {MAX_TRAVEL_DAYS} (got {days})"
            ),
            Self::TravelDaysLockedByDates => {
                f.write_str("travel days are derived from the date range; change the dates instead")
            }
            Self::InvertedDateRange { start, end } => {
                write!(f, "end date {end} is before start date {start}")
            }
            Self::KidsAgesMissing => {
                f.write_str("at least one kid age is required when travelling with kids")
            }
            Self::KidAgeOutOfRange { age } => {
                write!(f, "kid age must be between 0 and {MAX_KID_AGE} (got {age})")
            }
        }
    }
}

impl std::error::Error for TripDetailsError {}

/// User input for a new trip request.
///
/// `travel_days` and the date pair are mutually derived: while both dates are
/// set, changing either recomputes `travel_days` as the inclusive day count,
/// and `travel_days` cannot be set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    destination: String,
    travel_days: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    with_kids: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    kids_age: Vec<u8>,
    with_elders: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    special_requests: Option<String>,
}

impl TripDetails {
    pub fn new(destination: impl Into<String>, travel_days: u8) -> Result<Self, TripDetailsError> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(TripDetailsError::EmptyDestination);
        }
        validate_travel_days(i64::from(travel_days))?;

        Ok(Self {
            destination,
            travel_days,
            start_date: None,
            end_date: None,
            with_kids: false,
            kids_age: Vec::new(),
            with_elders: false,
            special_requests: None,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn travel_days(&self) -> u8 {
        self.travel_days
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn with_kids(&self) -> bool {
        self.with_kids
    }

    pub fn kids_age(&self) -> &[u8] {
        &self.kids_age
    }

    pub fn with_elders(&self) -> bool {
        self.with_elders
    }

    pub fn special_requests(&self) -> Option<&str> {
        self.special_requests.as_deref()
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) -> Result<(), TripDetailsError> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(TripDetailsError::EmptyDestination);
        }
        self.destination = destination;
        Ok(())
    }

    /// Sets the travel day count directly.
    ///
    /// Only allowed while no dates are set; with dates present the count is
    /// derived from the range.
    pub fn set_travel_days(&mut self, travel_days: u8) -> Result<(), TripDetailsError> {
        if self.start_date.is_some() || self.end_date.is_some() {
            return Err(TripDetailsError::TravelDaysLockedByDates);
        }
        validate_travel_days(i64::from(travel_days))?;
        self.travel_days = travel_days;
        Ok(())
    }

    pub fn set_start_date(&mut self, start_date: Option<NaiveDate>) -> Result<(), TripDetailsError> {
        let previous = self.start_date;
        self.start_date = start_date;
        if let Err(err) = self.rederive_travel_days() {
            self.start_date = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn set_end_date(&mut self, end_date: Option<NaiveDate>) -> Result<(), TripDetailsError> {
        let previous = self.end_date;
        self.end_date = end_date;
        if let Err(err) = self.rederive_travel_days() {
            self.end_date = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Marks the trip as travelling with kids; ages are required, ordered, and
    /// each in `0..=17`.
    pub fn set_kids(&mut self, ages: Vec<u8>) -> Result<(), TripDetailsError> {
        if ages.is_empty() {
            return Err(TripDetailsError::KidsAgesMissing);
        }
        if let Some(&age) = ages.iter().find(|&&age| age > MAX_KID_AGE) {
            return Err(TripDetailsError::KidAgeOutOfRange { age });
        }
        self.with_kids = true;
        self.kids_age = ages;
        Ok(())
    }

    pub fn clear_kids(&mut self) {
        self.with_kids = false;
        self.kids_age.clear();
    }

    pub fn set_with_elders(&mut self, with_elders: bool) {
        self.with_elders = with_elders;
    }

    pub fn set_special_requests(&mut self, special_requests: Option<String>) {
        self.special_requests =
            special_requests.filter(|requests| !requests.trim().is_empty());
    }

    fn rederive_travel_days(&mut self) -> Result<(), TripDetailsError> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Ok(());
        };
        if end < start {
            return Err(TripDetailsError::InvertedDateRange { start, end });
        }
        let days = (end - start).num_days() + 1;
        validate_travel_days(days)?;
        self.travel_days = days as u8;
        Ok(())
    }

    pub(crate) fn is_consistent(&self) -> bool {
        if self.destination.trim().is_empty() {
            return false;
        }
        if !(MIN_TRAVEL_DAYS..=MAX_TRAVEL_DAYS).contains(&self.travel_days) {
            return false;
        }
        if self.with_kids
            && (self.kids_age.is_empty() || self.kids_age.iter().any(|&age| age > MAX_KID_AGE))
        {
            return false;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start || (end - start).num_days() + 1 != i64::from(self.travel_days) {
                return false;
            }
        }
        true
    }
}

fn validate_travel_days(days: i64) -> Result<(), TripDetailsError> {
    if !(i64::from(MIN_TRAVEL_DAYS)..=i64::from(MAX_TRAVEL_DAYS)).contains(&days) {
        return Err(TripDetailsError::TravelDaysOutOfRange { days });
    }
    Ok(())
}

/// One tagged occurrence of an attraction inside the wishlist or a day slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    tag: EntryTag,
    #[serde(flatten)]
    attraction: Attraction,
}

impl PlanEntry {
    fn new(tag: EntryTag, attraction: Attraction) -> Self {
        Self { tag, attraction }
    }

    pub fn tag(&self) -> EntryTag {
        self.tag
    }

    pub fn attraction(&self) -> &Attraction {
        &self.attraction
    }

    pub fn name(&self) -> &str {
        self.attraction.name()
    }
}

/// Ordered attractions for one trip day.
///
/// Entry order is the user's intended sequence for that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    day: u8,
    #[serde(default)]
    entries: Vec<PlanEntry>,
}

impl DayPlan {
    fn new(day: u8) -> Self {
        Self {
            day,
            entries: Vec::new(),
        }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<PlanEntry> {
        &mut self.entries
    }
}

/// The user's full working state: details, wishlist, and per-day itinerary.
///
/// All mutation goes through `crate::ops`; the revision counter is bumped
/// exactly once per successful mutation so the persisted store's change
/// detection fires once per user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    details: TripDetails,
    #[serde(default)]
    wishlist: Vec<PlanEntry>,
    days: Vec<DayPlan>,
    next_tag: u64,
    #[serde(default)]
    rev: u64,
}

impl TripPlan {
    /// Creates a fresh plan: empty wishlist and one empty day plan per travel
    /// day, numbered 1..=travel_days.
    pub fn new(details: TripDetails) -> Self {
        let days = (1..=details.travel_days()).map(DayPlan::new).collect();
        Self {
            details,
            wishlist: Vec::new(),
            days,
            next_tag: 0,
            rev: 0,
        }
    }

    pub fn details(&self) -> &TripDetails {
        &self.details
    }

    pub fn wishlist(&self) -> &[PlanEntry] {
        &self.wishlist
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn day(&self, day: u8) -> Option<&DayPlan> {
        self.days.iter().find(|plan| plan.day() == day)
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn wishlist_mut(&mut self) -> &mut Vec<PlanEntry> {
        &mut self.wishlist
    }

    pub(crate) fn day_mut(&mut self, day: u8) -> Option<&mut DayPlan> {
        self.days.iter_mut().find(|plan| plan.day() == day)
    }

    pub(crate) fn attach(&mut self, attraction: Attraction) -> PlanEntry {
        let tag = EntryTag::new(self.next_tag);
        self.next_tag += 1;
        PlanEntry::new(tag, attraction)
    }

    pub(crate) fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// Structural validity check used when restoring persisted state.
    pub(crate) fn is_consistent(&self) -> bool {
        if !self.details.is_consistent() {
            return false;
        }
        if self.days.len() != usize::from(self.details.travel_days()) {
            return false;
        }
        for (index, day) in self.days.iter().enumerate() {
            if usize::from(day.day()) != index + 1 {
                return false;
            }
        }

        let mut seen = std::collections::BTreeSet::new();
        let all_entries = self
            .wishlist
            .iter()
            .chain(self.days.iter().flat_map(|day| day.entries().iter()));
        for entry in all_entries {
            if entry.tag().raw() >= self.next_tag || !seen.insert(entry.tag()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{TripDetails, TripDetailsError, TripPlan};

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("date literal")
    }

    #[test]
    fn rejects_empty_destination() {
        assert_eq!(
            TripDetails::new("  ", 3),
            Err(TripDetailsError::EmptyDestination)
        );
    }

    #[rstest]
    #[case(0)]
    #[case(15)]
    fn rejects_travel_days_out_of_range(#[case] days: u8) {
        assert_eq!(
            TripDetails::new("Paris", days),
            Err(TripDetailsError::TravelDaysOutOfRange {
                days: i64::from(days)
            })
        );
    }

    #[test]
    fn date_pair_derives_inclusive_day_count() {
        let mut details = TripDetails::new("Paris", 3).expect("details");
        details
            .set_start_date(Some(date("2026-05-01")))
            .expect("start date");
        details
            .set_end_date(Some(date("2026-05-04")))
            .expect("end date");
        assert_eq!(details.travel_days(), 4);

        details
            .set_end_date(Some(date("2026-05-01")))
            .expect("same-day trip");
        assert_eq!(details.travel_days(), 1);
    }

    #[test]
    fn travel_days_locked_while_dates_set() {
        let mut details = TripDetails::new("Paris", 3).expect("details");
        details
            .set_start_date(Some(date("2026-05-01")))
            .expect("start date");
        assert_eq!(
            details.set_travel_days(5),
            Err(TripDetailsError::TravelDaysLockedByDates)
        );

        details.set_start_date(None).expect("clear start date");
        details.set_travel_days(5).expect("days settable again");
        assert_eq!(details.travel_days(), 5);
    }

    #[test]
    fn rejects_inverted_and_oversized_date_ranges() {
        let mut details = TripDetails::new("Paris", 3).expect("details");
        details
            .set_start_date(Some(date("2026-05-10")))
            .expect("start date");

        assert_eq!(
            details.set_end_date(Some(date("2026-05-01"))),
            Err(TripDetailsError::InvertedDateRange {
                start: date("2026-05-10"),
                end: date("2026-05-01"),
            })
        );
        // Failed set must not leave a half-applied range behind.
        assert_eq!(details.end_date(), None);
        assert_eq!(details.travel_days(), 3);

        assert!(matches!(
            details.set_end_date(Some(date("2026-06-30"))),
            Err(TripDetailsError::TravelDaysOutOfRange { days: 51 })
        ));
    }

    #[test]
    fn kids_ages_required_and_bounded() {
        let mut details = TripDetails::new("Paris", 3).expect("details");
        assert_eq!(details.set_kids(vec![]), Err(TripDetailsError::KidsAgesMissing));
        assert_eq!(
            details.set_kids(vec![4, 18]),
            Err(TripDetailsError::KidAgeOutOfRange { age: 18 })
        );

        details.set_kids(vec![4, 9]).expect("valid ages");
        assert!(details.with_kids());
        assert_eq!(details.kids_age(), &[4, 9]);

        details.clear_kids();
        assert!(!details.with_kids());
        assert!(details.kids_age().is_empty());
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(14)]
    fn plan_covers_every_day_exactly_once(#[case] travel_days: u8) {
        let details = TripDetails::new("Kyoto", travel_days).expect("details");
        let plan = TripPlan::new(details);

        assert_eq!(plan.days().len(), usize::from(travel_days));
        for (index, day) in plan.days().iter().enumerate() {
            assert_eq!(usize::from(day.day()), index + 1);
            assert!(day.entries().is_empty());
        }
        assert!(plan.is_consistent());
    }

    #[test]
    fn plan_serde_round_trip_is_deep_equal() {
        let mut details = TripDetails::new("Lisbon", 2).expect("details");
        details.set_kids(vec![6]).expect("kids");
        details.set_special_requests(Some("vegetarian options".to_owned()));
        let plan = TripPlan::new(details);

        let json = serde_json::to_string(&plan).expect("serialize");
        let restored: TripPlan = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, plan);
    }
}
