// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

use chrono::NaiveDate;
use ratatui::widgets::ListState;
use rstest::rstest;

use super::{
    build_details, clamp_selection, day_label, next_focus, occurrence_labels, parse_date_field,
    parse_kids_ages, prev_focus, CandidatesTab, PlanFocus, TripForm,
};

fn date(s: &str) -> NaiveDate {
    s.parse().expect("date literal")
}

fn filled_form() -> TripForm {
    TripForm {
        destination: "Paris".to_owned(),
        travel_days: "3".to_owned(),
        ..TripForm::default()
    }
}

#[test]
fn form_builds_minimal_details() {
    let details = build_details(&filled_form()).expect("details");

    assert_eq!(details.destination(), "Paris");
    assert_eq!(details.travel_days(), 3);
    assert!(!details.with_kids());
    assert_eq!(details.special_requests(), None);
}

#[test]
fn form_derives_travel_days_from_dates_when_blank() {
    let mut form = filled_form();
    form.travel_days = String::new();
    form.start_date = "2026-05-01".to_owned();
    form.end_date = "2026-05-04".to_owned();

    let details = build_details(&form).expect("details");

    assert_eq!(details.travel_days(), 4);
    assert_eq!(details.start_date(), Some(date("2026-05-01")));
}

#[test]
fn form_requires_days_or_a_full_date_pair() {
    let mut form = filled_form();
    form.travel_days = String::new();
    form.start_date = "2026-05-01".to_owned();

    let err = build_details(&form).expect_err("incomplete");
    assert!(err.contains("travel days"));
}

#[test]
fn form_rejects_garbage_in_typed_fields() {
    let mut form = filled_form();
    form.travel_days = "many".to_owned();
    assert!(build_details(&form).is_err());

    let mut form = filled_form();
    form.start_date = "May 1st".to_owned();
    assert!(build_details(&form).is_err());

    let mut form = filled_form();
    form.kids_ages = "4, lots".to_owned();
    assert!(build_details(&form).is_err());
}

#[test]
fn form_passes_kids_elders_and_requests_through() {
    let mut form = filled_form();
    form.kids_ages = "4, 9".to_owned();
    form.elders = true;
    form.special_requests = "vegetarian options".to_owned();

    let details = build_details(&form).expect("details");

    assert!(details.with_kids());
    assert_eq!(details.kids_age(), &[4, 9]);
    assert!(details.with_elders());
    assert_eq!(details.special_requests(), Some("vegetarian options"));
}

#[rstest]
#[case("", Ok(vec![]))]
#[case("4", Ok(vec![4]))]
#[case("4, 9 12", Ok(vec![4, 9, 12]))]
fn kids_ages_parse_from_loose_lists(
    #[case] raw: &str,
    #[case] expected: Result<Vec<u8>, ()>,
) {
    assert_eq!(parse_kids_ages(raw).map_err(|_| ()), expected);
}

#[test]
fn empty_date_field_is_simply_absent() {
    assert_eq!(parse_date_field("   "), Ok(None));
    assert_eq!(
        parse_date_field("2026-05-01"),
        Ok(Some(date("2026-05-01")))
    );
    assert!(parse_date_field("01/05/2026").is_err());
}

#[test]
fn day_labels_include_calendar_dates_when_known() {
    assert_eq!(day_label(2, None), "Day 2");
    assert_eq!(
        day_label(2, Some(date("2026-05-01"))),
        "Day 2 — Sat, May 2"
    );
}

#[test]
fn repeated_entry_names_get_an_occurrence_marker() {
    let labels = occurrence_labels(["Louvre", "Chez Janou", "Louvre", "Louvre"].into_iter());
    assert_eq!(labels, vec!["Louvre", "Chez Janou", "Louvre (2)", "Louvre (3)"]);
}

#[test]
fn unique_entry_names_stay_unmarked() {
    let labels = occurrence_labels(["Louvre", "Orsay"].into_iter());
    assert_eq!(labels, vec!["Louvre", "Orsay"]);
}

// Day numbers come from the backend, so labelling must tolerate values the
// model never produces.
#[test]
fn day_labels_tolerate_out_of_range_day_numbers() {
    assert_eq!(
        day_label(0, Some(date("2026-05-01"))),
        "Day 0 — Fri, May 1"
    );
    assert_eq!(day_label(0, None), "Day 0");
}

#[test]
fn focus_cycles_through_all_panes_and_back() {
    let day_count = 3;
    let mut focus = PlanFocus::Candidates;
    let mut seen = vec![focus];
    loop {
        focus = next_focus(focus, day_count);
        if focus == PlanFocus::Candidates {
            break;
        }
        seen.push(focus);
    }
    assert_eq!(
        seen,
        vec![
            PlanFocus::Candidates,
            PlanFocus::Wishlist,
            PlanFocus::Day(0),
            PlanFocus::Day(1),
            PlanFocus::Day(2),
        ]
    );

    // prev is the exact inverse.
    for &pane in &seen {
        assert_eq!(prev_focus(next_focus(pane, day_count), day_count), pane);
    }
}

#[test]
fn candidates_tab_toggles_between_the_two_lists() {
    assert_eq!(
        CandidatesTab::Landmarks.toggled(),
        CandidatesTab::Restaurants
    );
    assert_eq!(
        CandidatesTab::Restaurants.toggled().toggled(),
        CandidatesTab::Restaurants
    );
}

#[test]
fn selection_clamps_to_shrinking_lists() {
    let mut state = ListState::default();
    state.select(Some(5));

    clamp_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));

    clamp_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
}
