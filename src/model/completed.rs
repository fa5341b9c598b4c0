// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use super::place::Location;

/// Block classification in a finalized itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Landmark,
    Restaurant,
}

/// One time-sequenced slot in a finalized day.
///
/// `kind`, `name`, `start_time` and `duration` are always present; the rest
/// is whatever enrichment the backend managed to attach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryBlock {
    #[serde(rename = "type")]
    kind: BlockKind,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start_time: String,
    duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mealtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    website: Option<String>,
}

impl ItineraryBlock {
    pub fn new(
        kind: BlockKind,
        name: impl Into<String>,
        start_time: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            start_time: start_time.into(),
            duration: duration.into(),
            mealtime: None,
            place_id: None,
            rating: None,
            location: None,
            address: None,
            photo_url: None,
            notes: None,
            website: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_mealtime(mut self, mealtime: Option<String>) -> Self {
        self.mealtime = mealtime;
        self
    }

    pub fn with_place_id(mut self, place_id: Option<String>) -> Self {
        self.place_id = place_id;
        self
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    pub fn with_photo_url(mut self, photo_url: Option<String>) -> Self {
        self.photo_url = photo_url;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_website(mut self, website: Option<String>) -> Self {
        self.website = website;
        self
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn mealtime(&self) -> Option<&str> {
        self.mealtime.as_deref()
    }

    pub fn place_id(&self) -> Option<&str> {
        self.place_id.as_deref()
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedDay {
    day: u8,
    blocks: Vec<ItineraryBlock>,
}

impl CompletedDay {
    pub fn new(day: u8, blocks: Vec<ItineraryBlock>) -> Self {
        Self { day, blocks }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn blocks(&self) -> &[ItineraryBlock] {
        &self.blocks
    }
}

/// The finalized, read-only itinerary returned by the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedItinerary {
    days: Vec<CompletedDay>,
}

impl CompletedItinerary {
    pub fn new(days: Vec<CompletedDay>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[CompletedDay] {
        &self.days
    }
}
