// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Drag/transfer protocol.
//!
//! Every draggable surface (candidate card, wishlist row, itinerary row)
//! describes itself with one self-contained [`Transfer`] envelope, and every
//! drop target interprets envelopes through [`resolve_drop`]. Validation
//! happens once, here: an undecodable or unknown envelope resolves to
//! nothing, so foreign or stale payloads can never corrupt the plan.

use serde::{Deserialize, Serialize};

use crate::model::{Attraction, Restaurant};
use crate::ops::PlanOp;

/// Source coordinates of a transfer that originates from an itinerary slot.
///
/// Captured at drop time, not drag-start time; the attraction travels inside
/// the envelope so the target never has to look the source up again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySource {
    from_day: u8,
    from_index: usize,
    attraction: Attraction,
}

impl ItinerarySource {
    pub fn new(from_day: u8, from_index: usize, attraction: Attraction) -> Self {
        Self {
            from_day,
            from_index,
            attraction,
        }
    }

    pub fn from_day(&self) -> u8 {
        self.from_day
    }

    pub fn from_index(&self) -> usize {
        self.from_index
    }

    pub fn attraction(&self) -> &Attraction {
        &self.attraction
    }
}

/// The self-describing transfer envelope.
///
/// `attraction`/`restaurant` transfers copy candidate data (the source list
/// is untouched); `itinerary-item` transfers move an existing slot entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum Transfer {
    Attraction(Attraction),
    Restaurant(Restaurant),
    ItineraryItem(ItinerarySource),
}

/// Encodes an envelope for handoff between drag source and drop target.
pub fn encode(transfer: &Transfer) -> Option<String> {
    serde_json::to_string(transfer).ok()
}

/// Decodes an envelope.
///
/// Unknown kinds and shape mismatches yield `None`; dropping arbitrary
/// content onto a target is not an error.
pub fn decode(raw: &str) -> Option<Transfer> {
    serde_json::from_str(raw).ok()
}

/// Where an envelope was dropped.
///
/// `index` is the specific slot hovered at the instant of release, when the
/// target surface tracks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Day { day: u8, index: Option<usize> },
    Wishlist,
}

/// Resolves a drop into partition operations.
///
/// This is the single place where cross-feature drop behavior is defined:
/// same-day drops with a hovered slot become reorders, cross-day drops
/// become moves, candidate drops become copies, and restaurants are retagged
/// to `additional` attractions at this boundary.
pub fn resolve_drop(target: DropTarget, transfer: Transfer) -> Vec<PlanOp> {
    match (target, transfer) {
        (DropTarget::Day { day, index }, Transfer::ItineraryItem(source)) => {
            match index {
                Some(to_index) if source.from_day() == day => vec![PlanOp::ReorderWithinDay {
                    day,
                    from_index: source.from_index(),
                    to_index,
                }],
                _ => vec![PlanOp::MoveBetweenDays {
                    from_day: source.from_day(),
                    from_index: source.from_index(),
                    to_day: day,
                }],
            }
        }
        (DropTarget::Day { day, .. }, Transfer::Attraction(attraction)) => {
            vec![PlanOp::AddToItinerary { attraction, day }]
        }
        (DropTarget::Day { day, .. }, Transfer::Restaurant(restaurant)) => {
            vec![PlanOp::AddToItinerary {
                attraction: Attraction::from_restaurant(restaurant),
                day,
            }]
        }
        (DropTarget::Wishlist, Transfer::ItineraryItem(source)) => {
            // Add before remove; only the transient UI frame differs, the
            // final state does not.
            vec![
                PlanOp::AddToWishlist {
                    attraction: source.attraction().clone(),
                },
                PlanOp::RemoveFromItinerary {
                    day: source.from_day(),
                    index: source.from_index(),
                },
            ]
        }
        (DropTarget::Wishlist, Transfer::Attraction(attraction)) => {
            vec![PlanOp::AddToWishlist { attraction }]
        }
        (DropTarget::Wishlist, Transfer::Restaurant(restaurant)) => {
            vec![PlanOp::AddToWishlist {
                attraction: Attraction::from_restaurant(restaurant),
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Attraction, AttractionKind, Place, Restaurant};
    use crate::ops::PlanOp;

    use super::{decode, encode, resolve_drop, DropTarget, ItinerarySource, Transfer};

    fn attraction(name: &str) -> Attraction {
        Attraction::new(Place::new(name).expect("place"), AttractionKind::Suggested)
    }

    #[test]
    fn envelope_round_trips_through_the_wire_shape() {
        let transfer = Transfer::ItineraryItem(ItinerarySource::new(2, 1, attraction("Louvre")));

        let raw = encode(&transfer).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["kind"], "itinerary-item");
        assert_eq!(value["payload"]["from_day"], 2);

        assert_eq!(decode(&raw), Some(transfer));
    }

    #[test]
    fn unknown_kind_and_malformed_payload_decode_to_none() {
        assert_eq!(decode("not json at all"), None);
        assert_eq!(decode(r#"{"kind":"teleport","payload":{}}"#), None);
        assert_eq!(
            decode(r#"{"kind":"itinerary-item","payload":{"from_day":"x"}}"#),
            None
        );
    }

    #[test]
    fn same_day_drop_on_a_hovered_slot_is_a_reorder() {
        let transfer = Transfer::ItineraryItem(ItinerarySource::new(2, 0, attraction("Louvre")));

        let ops = resolve_drop(
            DropTarget::Day {
                day: 2,
                index: Some(2),
            },
            transfer,
        );

        assert_eq!(
            ops,
            vec![PlanOp::ReorderWithinDay {
                day: 2,
                from_index: 0,
                to_index: 2,
            }]
        );
    }

    #[test]
    fn same_day_drop_without_slot_and_cross_day_drop_are_moves() {
        let cross = resolve_drop(
            DropTarget::Day { day: 3, index: Some(0) },
            Transfer::ItineraryItem(ItinerarySource::new(1, 2, attraction("Louvre"))),
        );
        assert_eq!(
            cross,
            vec![PlanOp::MoveBetweenDays {
                from_day: 1,
                from_index: 2,
                to_day: 3,
            }]
        );

        let same_no_slot = resolve_drop(
            DropTarget::Day { day: 1, index: None },
            Transfer::ItineraryItem(ItinerarySource::new(1, 2, attraction("Louvre"))),
        );
        assert_eq!(
            same_no_slot,
            vec![PlanOp::MoveBetweenDays {
                from_day: 1,
                from_index: 2,
                to_day: 1,
            }]
        );
    }

    #[test]
    fn restaurant_is_retagged_at_the_transfer_point() {
        let restaurant = Restaurant::new(Place::new("Chez Panisse").expect("place"));

        let ops = resolve_drop(
            DropTarget::Day { day: 1, index: None },
            Transfer::Restaurant(restaurant),
        );

        let [PlanOp::AddToItinerary { attraction, day: 1 }] = ops.as_slice() else {
            panic!("expected a single add-to-itinerary op, got {ops:?}");
        };
        assert_eq!(attraction.kind(), AttractionKind::Additional);
    }

    #[test]
    fn itinerary_item_dropped_on_wishlist_adds_then_removes() {
        let transfer = Transfer::ItineraryItem(ItinerarySource::new(2, 1, attraction("Louvre")));

        let ops = resolve_drop(DropTarget::Wishlist, transfer);

        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], PlanOp::AddToWishlist { .. }));
        assert_eq!(
            ops[1],
            PlanOp::RemoveFromItinerary { day: 2, index: 1 }
        );
    }
}
