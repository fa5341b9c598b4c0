// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! End-to-end planning flows against a mock backend: generate, curate the
//! board, complete, and restart with persisted state.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tripdeck::model::BlockKind;
use tripdeck::ops::PlanOp;
use tripdeck::protocol::{self, DropTarget, ItinerarySource, Transfer};
use tripdeck::service::PlannerClient;
use tripdeck::session::{Step, TripSession};
use tripdeck::store::StateStore;

struct TempRoot(PathBuf);

impl TempRoot {
    fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let root = std::env::temp_dir().join(format!(
            "tripdeck-e2e-{label}-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("temp root");
        Self(root)
    }

    fn store(&self) -> StateStore {
        StateStore::new(&self.0)
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn details(travel_days: u8) -> tripdeck::model::TripDetails {
    tripdeck::model::TripDetails::new("Paris", travel_days).expect("details")
}

async fn mock_generate(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommendations": {
                "landmarks": [
                    {"name": "Louvre", "description": "Art museum"},
                    {"name": "Eiffel Tower"},
                    {"name": "Musée d'Orsay"},
                ],
                "restaurants": [
                    {"name": "Chez Janou", "cuisine": "Provencal"},
                ],
            }
        })))
        .mount(server)
        .await;
}

async fn mock_complete(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/complete-itinerary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "itinerary": [
                {"day": 1, "blocks": [
                    {"type": "landmark", "name": "Louvre", "start_time": "09:00", "duration": "3h"},
                    {"type": "restaurant", "name": "Chez Janou", "start_time": "12:30", "duration": "1h 30m"},
                ]},
                {"day": 2, "blocks": [
                    {"type": "landmark", "name": "Eiffel Tower", "start_time": "10:00", "duration": "2h"},
                ]},
            ]
        })))
        .mount(server)
        .await;
}

async fn generate_into_planning(session: &mut TripSession, client: &PlannerClient, travel_days: u8) {
    let token = session.begin_generate(details(travel_days)).expect("token");
    let result = client.generate(&details(travel_days)).await;
    session.finish_generate(token, result);
    assert_eq!(session.step(), Step::Planning);
}

#[tokio::test]
async fn wishlist_then_promote_then_complete() {
    let server = MockServer::start().await;
    mock_generate(&server).await;
    mock_complete(&server).await;
    let client = PlannerClient::new(server.uri()).expect("client");
    let root = TempRoot::new("promote");

    let mut session = TripSession::restore(root.store());
    generate_into_planning(&mut session, &client, 2).await;

    // Collect two candidates on the wishlist, then promote one to day 1.
    let louvre = session.landmarks()[0].clone();
    let tower = session.landmarks()[1].clone();
    session.apply(PlanOp::AddToWishlist { attraction: louvre });
    session.apply(PlanOp::AddToWishlist { attraction: tower });

    let promote = protocol::encode(&Transfer::Attraction(session.landmarks()[0].clone()))
        .expect("encode");
    session.handle_drop(DropTarget::Day { day: 1, index: None }, &promote);

    let plan = session.trip_plan().expect("plan");
    assert_eq!(plan.wishlist().len(), 1);
    assert_eq!(plan.wishlist()[0].name(), "Eiffel Tower");
    assert_eq!(plan.day(1).expect("day 1").entries()[0].name(), "Louvre");

    // Restaurants land as retagged attractions.
    let restaurant = protocol::encode(&Transfer::Restaurant(session.restaurants()[0].clone()))
        .expect("encode");
    session.handle_drop(DropTarget::Day { day: 1, index: None }, &restaurant);

    let token = session.begin_complete().expect("token");
    let plan = session.trip_plan().expect("plan").clone();
    let result = client.complete_itinerary(&plan).await;
    session.finish_complete(token, result);

    assert_eq!(session.step(), Step::Completed);
    let completed = session.completed().expect("itinerary");
    assert_eq!(completed.days().len(), 2);
    assert_eq!(completed.days()[0].blocks()[1].kind(), BlockKind::Restaurant);
}

#[tokio::test]
async fn board_rearrangement_via_transfer_envelopes() {
    let server = MockServer::start().await;
    mock_generate(&server).await;
    let client = PlannerClient::new(server.uri()).expect("client");
    let root = TempRoot::new("rearrange");

    let mut session = TripSession::restore(root.store());
    generate_into_planning(&mut session, &client, 3).await;

    for index in 0..3 {
        let raw = protocol::encode(&Transfer::Attraction(session.landmarks()[index].clone()))
            .expect("encode");
        session.handle_drop(DropTarget::Day { day: 1, index: None }, &raw);
    }
    let names = |session: &TripSession, day: u8| -> Vec<String> {
        session
            .trip_plan()
            .expect("plan")
            .day(day)
            .expect("day")
            .entries()
            .iter()
            .map(|entry| entry.name().to_owned())
            .collect()
    };
    assert_eq!(names(&session, 1).len(), 3);

    // Reorder within day 1: first entry to the last hovered slot.
    let first = session.trip_plan().expect("plan").day(1).expect("day").entries()[0]
        .attraction()
        .clone();
    let reorder = protocol::encode(&Transfer::ItineraryItem(ItinerarySource::new(1, 0, first)))
        .expect("encode");
    session.handle_drop(
        DropTarget::Day {
            day: 1,
            index: Some(2),
        },
        &reorder,
    );
    assert_eq!(
        names(&session, 1),
        vec!["Eiffel Tower", "Musée d'Orsay", "Louvre"]
    );

    // Move the tail entry across to day 3.
    let tail = session.trip_plan().expect("plan").day(1).expect("day").entries()[2]
        .attraction()
        .clone();
    let cross = protocol::encode(&Transfer::ItineraryItem(ItinerarySource::new(1, 2, tail)))
        .expect("encode");
    session.handle_drop(DropTarget::Day { day: 3, index: None }, &cross);
    assert_eq!(names(&session, 1), vec!["Eiffel Tower", "Musée d'Orsay"]);
    assert_eq!(names(&session, 3), vec!["Louvre"]);

    // And back to the wishlist.
    let back = session.trip_plan().expect("plan").day(3).expect("day").entries()[0]
        .attraction()
        .clone();
    let to_wishlist = protocol::encode(&Transfer::ItineraryItem(ItinerarySource::new(3, 0, back)))
        .expect("encode");
    session.handle_drop(DropTarget::Wishlist, &to_wishlist);
    assert!(names(&session, 3).is_empty());
    assert_eq!(session.trip_plan().expect("plan").wishlist()[0].name(), "Louvre");
}

#[tokio::test]
async fn curated_board_survives_a_restart() {
    let server = MockServer::start().await;
    mock_generate(&server).await;
    let client = PlannerClient::new(server.uri()).expect("client");
    let root = TempRoot::new("restart");

    {
        let mut session = TripSession::restore(root.store());
        generate_into_planning(&mut session, &client, 2).await;
        let louvre = session.landmarks()[0].clone();
        session.apply(PlanOp::AddToItinerary {
            attraction: louvre,
            day: 2,
        });
    }

    let restored = TripSession::restore(root.store());

    assert_eq!(restored.step(), Step::Planning);
    assert_eq!(restored.landmarks().len(), 3);
    let plan = restored.trip_plan().expect("plan");
    assert_eq!(plan.day(2).expect("day").entries()[0].name(), "Louvre");
}

#[tokio::test]
async fn backend_failure_leaves_a_retryable_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = PlannerClient::new(server.uri()).expect("client");
    let root = TempRoot::new("fail");

    let mut session = TripSession::restore(root.store());
    let token = session.begin_generate(details(2)).expect("token");
    let result = client.generate(&details(2)).await;
    session.finish_generate(token, result);

    assert_eq!(session.step(), Step::New);
    assert!(session.error().is_some());
    assert!(session.begin_generate(details(2)).is_some());
}
