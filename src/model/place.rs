// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

/// Geographic coordinates as returned by the planning backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Immutable landmark/restaurant data returned by the planning backend.
///
/// The client never edits these fields after construction; it only moves a
/// place between containers. `name` is the fallback identity key and must be
/// non-empty; `place_id` is the preferred identity key when the backend
/// supplies one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    place_id: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_ratings_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    website: Option<String>,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Result<Self, PlaceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlaceError::EmptyName);
        }
        Ok(Self {
            name,
            place_id: None,
            description: String::new(),
            location: None,
            rating: None,
            user_ratings_total: None,
            address: None,
            photos: Vec::new(),
            photo_url: None,
            website: None,
        })
    }

    pub fn with_place_id(mut self, place_id: Option<String>) -> Self {
        self.place_id = place_id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_user_ratings_total(mut self, total: Option<u64>) -> Self {
        self.user_ratings_total = total;
        self
    }

    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    pub fn with_photos(mut self, photos: Vec<String>) -> Self {
        self.photos = photos;
        self
    }

    pub fn with_photo_url(mut self, photo_url: Option<String>) -> Self {
        self.photo_url = photo_url;
        self
    }

    pub fn with_website(mut self, website: Option<String>) -> Self {
        self.website = website;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn place_id(&self) -> Option<&str> {
        self.place_id.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn user_ratings_total(&self) -> Option<u64> {
        self.user_ratings_total
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    EmptyName,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("place name must not be empty"),
        }
    }
}

impl std::error::Error for PlaceError {}

/// How an attraction ended up in the plan.
///
/// `Suggested` and `Landmark` both denote landmarks (the backend uses either
/// tag depending on endpoint); `Additional` marks a restaurant that was
/// retagged when it was dropped into the wishlist or a day slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttractionKind {
    Suggested,
    Additional,
    Landmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    New,
    Trending,
}

/// A [`Place`] tagged for itinerary use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    #[serde(flatten)]
    place: Place,
    #[serde(rename = "type")]
    kind: AttractionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    badge: Option<Badge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kid_friendly: Option<bool>,
}

impl Attraction {
    pub fn new(place: Place, kind: AttractionKind) -> Self {
        Self {
            place,
            kind,
            badge: None,
            estimated_duration: None,
            kid_friendly: None,
        }
    }

    /// Retags a restaurant for itinerary placement.
    ///
    /// Restaurants are not a separate container once placed; they become
    /// `additional` attractions at the transfer point.
    pub fn from_restaurant(restaurant: Restaurant) -> Self {
        Self {
            place: restaurant.place,
            kind: AttractionKind::Additional,
            badge: None,
            estimated_duration: None,
            kid_friendly: restaurant.kid_friendly,
        }
    }

    pub fn with_badge(mut self, badge: Option<Badge>) -> Self {
        self.badge = badge;
        self
    }

    pub fn with_estimated_duration(mut self, estimated_duration: Option<String>) -> Self {
        self.estimated_duration = estimated_duration;
        self
    }

    pub fn with_kid_friendly(mut self, kid_friendly: Option<bool>) -> Self {
        self.kid_friendly = kid_friendly;
        self
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn name(&self) -> &str {
        self.place.name()
    }

    pub fn kind(&self) -> AttractionKind {
        self.kind
    }

    pub fn badge(&self) -> Option<Badge> {
        self.badge
    }

    pub fn estimated_duration(&self) -> Option<&str> {
        self.estimated_duration.as_deref()
    }

    pub fn kid_friendly(&self) -> Option<bool> {
        self.kid_friendly
    }
}

/// A restaurant candidate as served by the generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(flatten)]
    place: Place,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wheelchair_accessible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kid_friendly: Option<bool>,
}

impl Restaurant {
    pub fn new(place: Place) -> Self {
        Self {
            place,
            price_level: None,
            cuisine: None,
            wheelchair_accessible: None,
            kid_friendly: None,
        }
    }

    pub fn with_price_level(mut self, price_level: Option<u8>) -> Self {
        self.price_level = price_level;
        self
    }

    pub fn with_cuisine(mut self, cuisine: Option<String>) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn with_wheelchair_accessible(mut self, accessible: Option<bool>) -> Self {
        self.wheelchair_accessible = accessible;
        self
    }

    pub fn with_kid_friendly(mut self, kid_friendly: Option<bool>) -> Self {
        self.kid_friendly = kid_friendly;
        self
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn name(&self) -> &str {
        self.place.name()
    }

    pub fn price_level(&self) -> Option<u8> {
        self.price_level
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }

    pub fn wheelchair_accessible(&self) -> Option<bool> {
        self.wheelchair_accessible
    }

    pub fn kid_friendly(&self) -> Option<bool> {
        self.kid_friendly
    }
}
