// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Request/response DTOs for the planning backend.
//!
//! The backend is tolerant about shapes on the way out (lists may arrive as
//! arrays or as name-keyed objects) and sloppy about fields on the way in, so
//! everything is normalized and validated here before it becomes model data.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    Attraction, AttractionKind, Badge, BlockKind, CompletedDay, CompletedItinerary,
    ItineraryBlock, Location, Place, Restaurant, TripDetails, TripPlan,
};

use super::{Recommendations, ServiceError};

#[derive(Debug, Serialize)]
pub(super) struct DetailsRequest<'a> {
    destination: &'a str,
    travel_days: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    with_kids: bool,
    kids_age: &'a [u8],
    with_elderly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    special_requests: Option<&'a str>,
}

pub(super) fn details_request(details: &TripDetails) -> DetailsRequest<'_> {
    DetailsRequest {
        destination: details.destination(),
        travel_days: details.travel_days(),
        start_date: details.start_date(),
        end_date: details.end_date(),
        with_kids: details.with_kids(),
        kids_age: details.kids_age(),
        with_elderly: details.with_elders(),
        special_requests: details.special_requests(),
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponse {
    recommendations: RecommendationSets,
}

#[derive(Debug, Deserialize)]
struct RecommendationSets {
    #[serde(default)]
    landmarks: PlaceSet,
    #[serde(default)]
    restaurants: PlaceSet,
}

/// Either wire shape for a candidate list.
///
/// The object form keys entries by place name; the key only matters when the
/// value itself carries no `name`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlaceSet {
    Listed(Vec<PlaceWire>),
    Named(BTreeMap<String, PlaceWire>),
}

impl Default for PlaceSet {
    fn default() -> Self {
        Self::Listed(Vec::new())
    }
}

impl PlaceSet {
    fn into_entries(self) -> Vec<(Option<String>, PlaceWire)> {
        match self {
            Self::Listed(places) => places.into_iter().map(|place| (None, place)).collect(),
            Self::Named(places) => places
                .into_iter()
                .map(|(name, place)| (Some(name), place))
                .collect(),
        }
    }
}

/// One candidate place, landmark and restaurant fields combined.
#[derive(Debug, Deserialize)]
struct PlaceWire {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<Location>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_ratings_total: Option<u64>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    photos: Option<Vec<String>>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    badge: Option<Badge>,
    #[serde(default)]
    estimated_duration: Option<String>,
    #[serde(default)]
    kid_friendly: Option<bool>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    wheelchair_accessible: Option<bool>,
}

impl PlaceWire {
    fn into_place(self, key: Option<String>) -> Result<(Place, Self), ServiceError> {
        let name = match self.name.clone().or(key) {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(ServiceError::malformed("candidate place without a name")),
        };
        let place = Place::new(name)
            .map_err(|err| ServiceError::malformed(err.to_string()))?
            .with_place_id(self.place_id.clone())
            .with_description(self.description.clone().unwrap_or_default())
            .with_location(self.location)
            .with_rating(self.rating)
            .with_user_ratings_total(self.user_ratings_total)
            .with_address(self.address.clone())
            .with_photos(self.photos.clone().unwrap_or_default())
            .with_photo_url(self.photo_url.clone())
            .with_website(self.website.clone());
        Ok((place, self))
    }

    fn into_landmark(self, key: Option<String>) -> Result<Attraction, ServiceError> {
        let (place, wire) = self.into_place(key)?;
        Ok(Attraction::new(place, AttractionKind::Suggested)
            .with_badge(wire.badge)
            .with_estimated_duration(wire.estimated_duration)
            .with_kid_friendly(wire.kid_friendly))
    }

    fn into_restaurant(self, key: Option<String>) -> Result<Restaurant, ServiceError> {
        let (place, wire) = self.into_place(key)?;
        Ok(Restaurant::new(place)
            .with_price_level(wire.price_level)
            .with_cuisine(wire.cuisine)
            .with_wheelchair_accessible(wire.wheelchair_accessible)
            .with_kid_friendly(wire.kid_friendly))
    }
}

pub(super) fn recommendations_from_response(
    response: GenerateResponse,
) -> Result<Recommendations, ServiceError> {
    let landmarks = response
        .recommendations
        .landmarks
        .into_entries()
        .into_iter()
        .map(|(key, place)| place.into_landmark(key))
        .collect::<Result<Vec<_>, _>>()?;
    let restaurants = response
        .recommendations
        .restaurants
        .into_entries()
        .into_iter()
        .map(|(key, place)| place.into_restaurant(key))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Recommendations::new(landmarks, restaurants))
}

#[derive(Debug, Serialize)]
pub(super) struct CompleteRequest<'a> {
    #[serde(flatten)]
    details: DetailsRequest<'a>,
    wishlist: Vec<PlannedAttraction<'a>>,
    itinerary: Vec<PlannedDay<'a>>,
}

#[derive(Debug, Serialize)]
struct PlannedDay<'a> {
    day: u8,
    attractions: Vec<PlannedAttraction<'a>>,
}

#[derive(Debug, Serialize)]
struct PlannedAttraction<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(rename = "type")]
    kind: &'static str,
}

fn planned(attraction: &Attraction) -> PlannedAttraction<'_> {
    // The completion endpoint understands exactly two categories.
    let kind = match attraction.kind() {
        AttractionKind::Suggested | AttractionKind::Landmark => "landmark",
        AttractionKind::Additional => "restaurant",
    };
    PlannedAttraction {
        name: attraction.name(),
        description: attraction.place().description(),
        location: attraction.place().location(),
        kind,
    }
}

pub(super) fn complete_request(plan: &TripPlan) -> CompleteRequest<'_> {
    CompleteRequest {
        details: details_request(plan.details()),
        wishlist: plan
            .wishlist()
            .iter()
            .map(|entry| planned(entry.attraction()))
            .collect(),
        itinerary: plan
            .days()
            .iter()
            .map(|day| PlannedDay {
                day: day.day(),
                attractions: day
                    .entries()
                    .iter()
                    .map(|entry| planned(entry.attraction()))
                    .collect(),
            })
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CompleteResponse {
    #[serde(default)]
    itinerary: Option<Vec<CompletedDayWire>>,
}

#[derive(Debug, Deserialize)]
struct CompletedDayWire {
    #[serde(default)]
    day: Option<u8>,
    #[serde(default)]
    blocks: Option<Vec<BlockWire>>,
}

#[derive(Debug, Deserialize)]
struct BlockWire {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    mealtime: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    location: Option<Location>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    website: Option<String>,
}

impl BlockWire {
    fn into_block(self, day: u8) -> Result<ItineraryBlock, ServiceError> {
        let kind = match self.kind.as_deref() {
            Some("landmark") => BlockKind::Landmark,
            Some("restaurant") => BlockKind::Restaurant,
            Some(other) => {
                return Err(ServiceError::malformed(format!(
                    "day {day} block with unknown type {other:?}"
                )))
            }
            None => {
                return Err(ServiceError::malformed(format!(
                    "day {day} block without a type"
                )))
            }
        };
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ServiceError::malformed(format!("day {day} block without a name")))?;
        let start_time = self.start_time.ok_or_else(|| {
            ServiceError::malformed(format!("day {day} block {name:?} without a start time"))
        })?;
        let duration = self.duration.ok_or_else(|| {
            ServiceError::malformed(format!("day {day} block {name:?} without a duration"))
        })?;

        Ok(ItineraryBlock::new(kind, name, start_time, duration)
            .with_description(self.description)
            .with_mealtime(self.mealtime)
            .with_place_id(self.place_id)
            .with_rating(self.rating)
            .with_location(self.location)
            .with_address(self.address)
            .with_photo_url(self.photo_url)
            .with_notes(self.notes)
            .with_website(self.website))
    }
}

pub(super) fn completed_from_response(
    response: CompleteResponse,
) -> Result<CompletedItinerary, ServiceError> {
    let days_wire = response
        .itinerary
        .ok_or_else(|| ServiceError::malformed("completion response without an itinerary"))?;

    let mut days = Vec::with_capacity(days_wire.len());
    for day_wire in days_wire {
        let day = day_wire
            .day
            .ok_or_else(|| ServiceError::malformed("itinerary day without a day number"))?;
        if day == 0 {
            return Err(ServiceError::malformed("itinerary day numbered 0"));
        }
        let blocks_wire = day_wire
            .blocks
            .ok_or_else(|| ServiceError::malformed(format!("day {day} without blocks")))?;
        let blocks = blocks_wire
            .into_iter()
            .map(|block| block.into_block(day))
            .collect::<Result<Vec<_>, _>>()?;
        days.push(CompletedDay::new(day, blocks));
    }
    Ok(CompletedItinerary::new(days))
}
