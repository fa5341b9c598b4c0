// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Client for the remote planning service.
//!
//! The backend is consumed strictly through its request/response contract:
//! `POST /generate` for candidate landmarks/restaurants and
//! `POST /complete-itinerary` for the finalized schedule. Responses are
//! normalized and validated here; everything past this boundary is typed
//! model data.

use std::fmt;
use std::time::Duration;

use crate::model::{Attraction, CompletedItinerary, Restaurant, TripDetails, TripPlan};

mod wire;

/// Default end-to-end timeout for planning calls; exceeding it is treated
/// identically to a network failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub enum ServiceError {
    Http { source: reqwest::Error },
    Timeout,
    Status { status: reqwest::StatusCode },
    MalformedResponse { reason: String },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { source } => write!(f, "planning service request failed: {source}"),
            Self::Timeout => f.write_str("planning service did not answer within the timeout"),
            Self::Status { status } => write!(f, "planning service returned HTTP {status}"),
            Self::MalformedResponse { reason } => {
                write!(f, "malformed planning service response: {reason}")
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { source } => Some(source),
            Self::Timeout | Self::Status { .. } | Self::MalformedResponse { .. } => None,
        }
    }
}

impl ServiceError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Candidate places returned by the generation endpoint, normalized to
/// arrays regardless of which wire shape the backend picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    landmarks: Vec<Attraction>,
    restaurants: Vec<Restaurant>,
}

impl Recommendations {
    pub fn new(landmarks: Vec<Attraction>, restaurants: Vec<Restaurant>) -> Self {
        Self {
            landmarks,
            restaurants,
        }
    }

    pub fn landmarks(&self) -> &[Attraction] {
        &self.landmarks
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn into_parts(self) -> (Vec<Attraction>, Vec<Restaurant>) {
        (self.landmarks, self.restaurants)
    }
}

/// HTTP client for the planning backend.
///
/// Use [`PlannerClient::new`] for production or point `base_url` at a mock
/// server in tests. Cloning is cheap; the underlying connection pool is
/// shared.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl PlannerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("tripdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ServiceError::Http { source })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests candidate landmarks and restaurants for the trip.
    pub async fn generate(&self, details: &TripDetails) -> Result<Recommendations, ServiceError> {
        let url = format!("{}/generate", self.base_url);
        let request = wire::details_request(details);

        tracing::debug!(destination = details.destination(), "requesting candidates");
        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status { status });
        }

        let body: wire::GenerateResponse = response.json().await.map_err(map_decode_error)?;
        wire::recommendations_from_response(body)
    }

    /// Submits the curated plan and returns the finalized itinerary.
    pub async fn complete_itinerary(
        &self,
        plan: &TripPlan,
    ) -> Result<CompletedItinerary, ServiceError> {
        let url = format!("{}/complete-itinerary", self.base_url);
        let request = wire::complete_request(plan);

        tracing::debug!(
            destination = plan.details().destination(),
            days = plan.days().len(),
            "requesting finalized itinerary"
        );
        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status { status });
        }

        let body: wire::CompleteResponse = response.json().await.map_err(map_decode_error)?;
        wire::completed_from_response(body)
    }

    /// Best-effort warm-up ping to reduce backend cold-start latency.
    ///
    /// Failures are logged and swallowed; they never reach the user.
    pub async fn warmup(&self) {
        let url = format!("{}/", self.base_url);
        match self.http.get(&url).timeout(self.timeout).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "planning service warm-up ping");
            }
            Err(err) => {
                tracing::warn!(error = %err, "planning service warm-up failed");
            }
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Http { source: err }
    }
}

fn map_decode_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else if err.is_decode() {
        ServiceError::malformed(err.to_string())
    } else {
        ServiceError::Http { source: err }
    }
}
