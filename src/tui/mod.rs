// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! Three screens follow the session steps: the trip form, the planning board
//! (candidates, wishlist, one column per day), and the finalized itinerary.
//! On the board a grab-and-drop flow moves places between containers: Enter
//! grabs the highlighted item into a transfer envelope, Enter on the target
//! drops it, Esc cancels.

use std::collections::HashMap;
use std::error::Error;
use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::model::{Attraction, BlockKind, CompletedItinerary, TripDetails, TripDetailsError};
use crate::ops::PlanOp;
use crate::protocol::{self, DropTarget, ItinerarySource, Transfer};
use crate::service::PlannerClient;
use crate::session::{Step, TripSession};

mod worker;

use worker::{Request, Worker};

#[cfg(test)]
mod tests;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const FOCUS_COLOR: Color = Color::LightGreen;
const GRAB_COLOR: Color = Color::LightYellow;
const ERROR_COLOR: Color = Color::LightRed;
const HINT_KEY_COLOR: Color = Color::Cyan;
const HINT_LABEL_COLOR: Color = Color::Gray;

/// Runs the interactive planner until the user quits.
pub fn run(session: TripSession, client: PlannerClient) -> Result<(), Box<dyn Error>> {
    let worker = Worker::spawn(client)?;
    // Wake the backend early; cold starts otherwise eat into the first
    // generation request.
    worker.submit(Request::Warmup);

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session, worker);

    while !app.should_quit {
        while let Some(event) = app.worker.try_next_event() {
            app.session.handle_event(event);
            app.sync_widgets();
        }

        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Destination,
    TravelDays,
    StartDate,
    EndDate,
    KidsAges,
    Elders,
    SpecialRequests,
}

impl FormField {
    const ALL: [FormField; 7] = [
        Self::Destination,
        Self::TravelDays,
        Self::StartDate,
        Self::EndDate,
        Self::KidsAges,
        Self::Elders,
        Self::SpecialRequests,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Destination => "Destination",
            Self::TravelDays => "Travel days (1-14)",
            Self::StartDate => "Start date (YYYY-MM-DD, optional)",
            Self::EndDate => "End date (YYYY-MM-DD, optional)",
            Self::KidsAges => "Kids ages (comma separated, optional)",
            Self::Elders => "Travelling with elders",
            Self::SpecialRequests => "Special requests (optional)",
        }
    }
}

/// Editable buffers for the new-trip form.
#[derive(Debug, Default)]
struct TripForm {
    field: usize,
    destination: String,
    travel_days: String,
    start_date: String,
    end_date: String,
    kids_ages: String,
    elders: bool,
    special_requests: String,
}

impl TripForm {
    fn current(&self) -> FormField {
        FormField::ALL[self.field]
    }

    fn next_field(&mut self) {
        self.field = (self.field + 1) % FormField::ALL.len();
    }

    fn prev_field(&mut self) {
        self.field = (self.field + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.current() {
            FormField::Destination => Some(&mut self.destination),
            FormField::TravelDays => Some(&mut self.travel_days),
            FormField::StartDate => Some(&mut self.start_date),
            FormField::EndDate => Some(&mut self.end_date),
            FormField::KidsAges => Some(&mut self.kids_ages),
            FormField::SpecialRequests => Some(&mut self.special_requests),
            FormField::Elders => None,
        }
    }

    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Destination => self.destination.clone(),
            FormField::TravelDays => self.travel_days.clone(),
            FormField::StartDate => self.start_date.clone(),
            FormField::EndDate => self.end_date.clone(),
            FormField::KidsAges => self.kids_ages.clone(),
            FormField::Elders => if self.elders { "yes" } else { "no" }.to_owned(),
            FormField::SpecialRequests => self.special_requests.clone(),
        }
    }
}

/// Builds validated trip details out of the raw form buffers.
fn build_details(form: &TripForm) -> Result<TripDetails, String> {
    let describe = |err: TripDetailsError| err.to_string();

    let start_date = parse_date_field(&form.start_date)?;
    let end_date = parse_date_field(&form.end_date)?;

    let travel_days = if form.travel_days.trim().is_empty() {
        if start_date.is_none() || end_date.is_none() {
            return Err("enter travel days or both dates".to_owned());
        }
        // Placeholder; the date pair rederives the real count below.
        1
    } else {
        form.travel_days
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("travel days is not a number: {:?}", form.travel_days.trim()))?
    };

    let mut details = TripDetails::new(form.destination.trim(), travel_days).map_err(describe)?;
    details.set_start_date(start_date).map_err(describe)?;
    details.set_end_date(end_date).map_err(describe)?;

    let ages = parse_kids_ages(&form.kids_ages)?;
    if !ages.is_empty() {
        details.set_kids(ages).map_err(describe)?;
    }
    details.set_with_elders(form.elders);
    details.set_special_requests(Some(form.special_requests.clone()));
    Ok(details)
}

fn parse_date_field(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("not a date (expected YYYY-MM-DD): {raw:?}"))
}

fn parse_kids_ages(raw: &str) -> Result<Vec<u8>, String> {
    raw.split([',', ' '])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .map_err(|_| format!("not a kid age: {part:?}"))
        })
        .collect()
}

/// Display labels for a run of entry names. Duplicates are legal (entries are
/// distinguished by instance tag), so repeats get an occurrence marker:
/// "Louvre", "Louvre (2)".
fn occurrence_labels<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    names
        .map(|name| {
            let n = seen.entry(name).or_insert(0);
            *n += 1;
            if *n > 1 {
                format!("{name} ({n})")
            } else {
                name.to_owned()
            }
        })
        .collect()
}

/// Header label for a day column; includes the calendar date once the trip
/// has one.
fn day_label(day: u8, start_date: Option<NaiveDate>) -> String {
    let offset = chrono::Days::new(u64::from(day).saturating_sub(1));
    match start_date.and_then(|start| start.checked_add_days(offset)) {
        Some(date) => format!("Day {day} — {}", date.format("%a, %b %-d")),
        None => format!("Day {day}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidatesTab {
    Landmarks,
    Restaurants,
}

impl CandidatesTab {
    fn toggled(self) -> Self {
        match self {
            Self::Landmarks => Self::Restaurants,
            Self::Restaurants => Self::Landmarks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanFocus {
    Candidates,
    Wishlist,
    Day(usize),
}

fn next_focus(focus: PlanFocus, day_count: usize) -> PlanFocus {
    match focus {
        PlanFocus::Candidates => PlanFocus::Wishlist,
        PlanFocus::Wishlist if day_count > 0 => PlanFocus::Day(0),
        PlanFocus::Wishlist => PlanFocus::Candidates,
        PlanFocus::Day(idx) if idx + 1 < day_count => PlanFocus::Day(idx + 1),
        PlanFocus::Day(_) => PlanFocus::Candidates,
    }
}

fn prev_focus(focus: PlanFocus, day_count: usize) -> PlanFocus {
    match focus {
        PlanFocus::Candidates if day_count > 0 => PlanFocus::Day(day_count - 1),
        PlanFocus::Candidates => PlanFocus::Wishlist,
        PlanFocus::Wishlist => PlanFocus::Candidates,
        PlanFocus::Day(0) => PlanFocus::Wishlist,
        PlanFocus::Day(idx) => PlanFocus::Day(idx - 1),
    }
}

struct App {
    session: TripSession,
    worker: Worker,
    should_quit: bool,
    form: TripForm,
    form_error: Option<String>,
    focus: PlanFocus,
    candidates_tab: CandidatesTab,
    candidates_state: ListState,
    wishlist_state: ListState,
    day_states: Vec<ListState>,
    grabbed: Option<String>,
    grabbed_label: Option<String>,
    completed_scroll: u16,
}

impl App {
    fn new(session: TripSession, worker: Worker) -> Self {
        let mut app = Self {
            session,
            worker,
            should_quit: false,
            form: TripForm::default(),
            form_error: None,
            focus: PlanFocus::Candidates,
            candidates_tab: CandidatesTab::Landmarks,
            candidates_state: ListState::default(),
            wishlist_state: ListState::default(),
            day_states: Vec::new(),
            grabbed: None,
            grabbed_label: None,
            completed_scroll: 0,
        };
        app.sync_widgets();
        app
    }

    /// Realigns list widgets with the session after any state change.
    fn sync_widgets(&mut self) {
        let day_count = self
            .session
            .trip_plan()
            .map(|plan| plan.days().len())
            .unwrap_or(0);
        self.day_states.resize_with(day_count, ListState::default);
        if let PlanFocus::Day(idx) = self.focus {
            if idx >= day_count {
                self.focus = PlanFocus::Candidates;
            }
        }
        self.clamp_cursors();
    }

    fn clamp_cursors(&mut self) {
        let candidates_len = self.candidates_len();
        clamp_selection(&mut self.candidates_state, candidates_len);
        let wishlist_len = self
            .session
            .trip_plan()
            .map(|plan| plan.wishlist().len())
            .unwrap_or(0);
        clamp_selection(&mut self.wishlist_state, wishlist_len);
        let day_lens: Vec<usize> = self
            .session
            .trip_plan()
            .map(|plan| plan.days().iter().map(|day| day.entries().len()).collect())
            .unwrap_or_default();
        for (state, len) in self.day_states.iter_mut().zip(day_lens) {
            clamp_selection(state, len);
        }
    }

    fn candidates_len(&self) -> usize {
        match self.candidates_tab {
            CandidatesTab::Landmarks => self.session.landmarks().len(),
            CandidatesTab::Restaurants => self.session.restaurants().len(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.session.step() {
            Step::New => self.handle_form_key(key),
            Step::Planning => self.handle_board_key(key),
            Step::Completed => self.handle_completed_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => {
                if let Some(buffer) = self.form.buffer_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Char(' ') if self.form.current() == FormField::Elders => {
                self.form.elders = !self.form.elders;
            }
            KeyCode::Char(ch) => {
                if let Some(buffer) = self.form.buffer_mut() {
                    buffer.push(ch);
                }
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        if self.session.is_busy() {
            return;
        }
        match build_details(&self.form) {
            Ok(details) => {
                self.form_error = None;
                if let Some(token) = self.session.begin_generate(details.clone()) {
                    self.worker.submit(Request::Generate { token, details });
                }
            }
            Err(message) => self.form_error = Some(message),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        let day_count = self.day_states.len();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => {
                self.focus = next_focus(self.focus, day_count);
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.focus = prev_focus(self.focus, day_count);
            }
            KeyCode::Char('t') if self.focus == PlanFocus::Candidates => {
                self.candidates_tab = self.candidates_tab.toggled();
                self.clamp_cursors();
            }
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => {
                if self.grabbed.is_some() {
                    self.drop_grabbed();
                } else {
                    self.grab_selected();
                }
            }
            KeyCode::Esc => {
                self.grabbed = None;
                self.grabbed_label = None;
            }
            KeyCode::Char('x') => self.remove_selected(),
            KeyCode::Char('c') => {
                if let Some(token) = self.session.begin_complete() {
                    if let Some(plan) = self.session.trip_plan() {
                        self.worker.submit(Request::Complete {
                            token,
                            plan: Box::new(plan.clone()),
                        });
                    }
                }
            }
            KeyCode::Char('b') => {
                self.session.back();
                self.grabbed = None;
                self.grabbed_label = None;
                self.sync_widgets();
            }
            _ => {}
        }
    }

    fn handle_completed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.completed_scroll = self.completed_scroll.saturating_sub(1),
            KeyCode::Down => self.completed_scroll = self.completed_scroll.saturating_add(1),
            KeyCode::Char('b') => {
                self.session.back();
                self.completed_scroll = 0;
                self.sync_widgets();
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let candidates_len = self.candidates_len();
        let (state, len) = match self.focus {
            PlanFocus::Candidates => (&mut self.candidates_state, candidates_len),
            PlanFocus::Wishlist => {
                let len = self
                    .session
                    .trip_plan()
                    .map(|plan| plan.wishlist().len())
                    .unwrap_or(0);
                (&mut self.wishlist_state, len)
            }
            PlanFocus::Day(idx) => {
                let len = self
                    .session
                    .trip_plan()
                    .and_then(|plan| plan.days().get(idx))
                    .map(|day| day.entries().len())
                    .unwrap_or(0);
                match self.day_states.get_mut(idx) {
                    Some(state) => (state, len),
                    None => return,
                }
            }
        };
        if len == 0 {
            state.select(None);
            return;
        }
        let current = state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        state.select(Some(next as usize));
    }

    /// Encodes the highlighted item into a transfer envelope.
    fn grab_selected(&mut self) {
        let Some(plan) = self.session.trip_plan() else {
            return;
        };
        let transfer = match self.focus {
            PlanFocus::Candidates => {
                let index = self.candidates_state.selected().unwrap_or(0);
                match self.candidates_tab {
                    CandidatesTab::Landmarks => self
                        .session
                        .landmarks()
                        .get(index)
                        .cloned()
                        .map(Transfer::Attraction),
                    CandidatesTab::Restaurants => self
                        .session
                        .restaurants()
                        .get(index)
                        .cloned()
                        .map(Transfer::Restaurant),
                }
            }
            PlanFocus::Wishlist => {
                let index = self.wishlist_state.selected().unwrap_or(0);
                plan.wishlist()
                    .get(index)
                    .map(|entry| Transfer::Attraction(entry.attraction().clone()))
            }
            PlanFocus::Day(idx) => {
                let state_index = self.day_states.get(idx).and_then(ListState::selected);
                plan.days().get(idx).and_then(|day| {
                    let index = state_index?;
                    let entry = day.entries().get(index)?;
                    Some(Transfer::ItineraryItem(ItinerarySource::new(
                        day.day(),
                        index,
                        entry.attraction().clone(),
                    )))
                })
            }
        };

        let Some(transfer) = transfer else {
            return;
        };
        self.grabbed_label = Some(transfer_label(&transfer).to_owned());
        self.grabbed = protocol::encode(&transfer);
    }

    /// Drops the grabbed envelope onto the focused container.
    fn drop_grabbed(&mut self) {
        let Some(raw) = self.grabbed.take() else {
            return;
        };
        self.grabbed_label = None;

        let target = match self.focus {
            PlanFocus::Candidates => return,
            PlanFocus::Wishlist => DropTarget::Wishlist,
            PlanFocus::Day(idx) => {
                let Some(day) = self
                    .session
                    .trip_plan()
                    .and_then(|plan| plan.days().get(idx))
                else {
                    return;
                };
                let index = self
                    .day_states
                    .get(idx)
                    .and_then(ListState::selected)
                    .filter(|_| !day.entries().is_empty());
                DropTarget::Day {
                    day: day.day(),
                    index,
                }
            }
        };
        self.session.handle_drop(target, &raw);
        self.sync_widgets();
    }

    fn remove_selected(&mut self) {
        let op = match self.focus {
            PlanFocus::Candidates => return,
            PlanFocus::Wishlist => {
                let Some(tag) = self
                    .wishlist_state
                    .selected()
                    .and_then(|index| {
                        self.session
                            .trip_plan()
                            .and_then(|plan| plan.wishlist().get(index))
                    })
                    .map(|entry| entry.tag())
                else {
                    return;
                };
                PlanOp::RemoveFromWishlist { tag }
            }
            PlanFocus::Day(idx) => {
                let Some((day, index)) = self
                    .day_states
                    .get(idx)
                    .and_then(ListState::selected)
                    .and_then(|index| {
                        let day = self.session.trip_plan()?.days().get(idx)?.day();
                        Some((day, index))
                    })
                else {
                    return;
                };
                PlanOp::RemoveFromItinerary { day, index }
            }
        };
        self.session.apply(op);
        self.sync_widgets();
    }
}

fn clamp_selection(state: &mut ListState, len: usize) {
    match len {
        0 => state.select(None),
        _ => {
            let selected = state.selected().unwrap_or(0).min(len - 1);
            state.select(Some(selected));
        }
    }
}

fn transfer_label(transfer: &Transfer) -> &str {
    match transfer {
        Transfer::Attraction(attraction) => attraction.name(),
        Transfer::Restaurant(restaurant) => restaurant.name(),
        Transfer::ItineraryItem(source) => source.attraction().name(),
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    match app.session.step() {
        Step::New => draw_form(frame, app),
        Step::Planning => draw_board(frame, app),
        Step::Completed => draw_completed(frame, app),
    }
}

fn draw_form(frame: &mut Frame<'_>, app: &App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        "Plan a new trip",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::default());
    for (idx, field) in FormField::ALL.into_iter().enumerate() {
        let focused = idx == app.form.field;
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(FOCUS_COLOR)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{}: ", field.label()), style),
            Span::styled(app.form.value(field), style.add_modifier(Modifier::BOLD)),
        ]));
    }
    lines.push(Line::default());
    if app.session.is_busy() {
        lines.push(Line::from(Span::styled(
            "Generating trip…",
            Style::default().fg(GRAB_COLOR),
        )));
    }
    if let Some(message) = app.form_error.as_deref().or(app.session.error()) {
        lines.push(Line::from(Span::styled(
            message.to_owned(),
            Style::default().fg(ERROR_COLOR),
        )));
    }

    let form = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Tripdeck"));
    frame.render_widget(form, layout[0]);

    frame.render_widget(
        hints_line(&[
            ("Tab/↑↓", "field"),
            ("Space", "toggle"),
            ("Enter", "generate"),
            ("Esc", "quit"),
        ]),
        layout[1],
    );
}

fn draw_board(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let Some(plan) = app.session.trip_plan() else {
        return;
    };
    let day_count = plan.days().len().max(1);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(22),
            Constraint::Percentage(50),
        ])
        .split(main_area);

    let day_constraints = vec![Constraint::Ratio(1, day_count as u32); day_count];
    let day_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(day_constraints)
        .split(panes[2]);

    // Candidates pane.
    let candidates_title = match app.candidates_tab {
        CandidatesTab::Landmarks => "Landmarks [t]",
        CandidatesTab::Restaurants => "Restaurants [t]",
    };
    let candidate_items: Vec<ListItem<'_>> = match app.candidates_tab {
        CandidatesTab::Landmarks => app
            .session
            .landmarks()
            .iter()
            .map(|landmark| ListItem::new(candidate_line(landmark)))
            .collect(),
        CandidatesTab::Restaurants => app
            .session
            .restaurants()
            .iter()
            .map(|restaurant| {
                let mut label = restaurant.name().to_owned();
                if let Some(cuisine) = restaurant.cuisine() {
                    label.push_str(&format!("  ({cuisine})"));
                }
                ListItem::new(Line::from(label))
            })
            .collect(),
    };
    let candidates = List::new(candidate_items)
        .block(pane_block(
            candidates_title,
            app.focus == PlanFocus::Candidates,
        ))
        .highlight_style(selection_style(app.grabbed.is_some()));
    frame.render_stateful_widget(candidates, panes[0], &mut app.candidates_state);

    // Wishlist pane.
    let wishlist_items: Vec<ListItem<'_>> =
        occurrence_labels(plan.wishlist().iter().map(|entry| entry.name()))
            .into_iter()
            .map(|label| ListItem::new(Line::from(label)))
            .collect();
    let wishlist = List::new(wishlist_items)
        .block(pane_block("Wishlist", app.focus == PlanFocus::Wishlist))
        .highlight_style(selection_style(app.grabbed.is_some()));
    frame.render_stateful_widget(wishlist, panes[1], &mut app.wishlist_state);

    // One column per day.
    let start_date = plan.details().start_date();
    for (idx, day) in plan.days().iter().enumerate() {
        let items: Vec<ListItem<'_>> =
            occurrence_labels(day.entries().iter().map(|entry| entry.name()))
                .into_iter()
                .map(|label| ListItem::new(Line::from(label)))
                .collect();
        let title = day_label(day.day(), start_date);
        let list = List::new(items)
            .block(pane_block(&title, app.focus == PlanFocus::Day(idx)))
            .highlight_style(selection_style(app.grabbed.is_some()));
        if let (Some(area), Some(state)) = (day_areas.get(idx), app.day_states.get_mut(idx)) {
            frame.render_stateful_widget(list, *area, state);
        }
    }

    let status = board_status_line(
        app.session.is_busy(),
        app.session.error(),
        app.grabbed_label.as_deref(),
    );
    frame.render_widget(status, status_area);
}

fn board_status_line<'a>(
    busy: bool,
    error: Option<&'a str>,
    grabbed: Option<&'a str>,
) -> Paragraph<'a> {
    if busy {
        return Paragraph::new(Line::from(Span::styled(
            "Completing itinerary…",
            Style::default().fg(GRAB_COLOR),
        )));
    }
    if let Some(message) = error {
        return Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(ERROR_COLOR),
        )));
    }
    if let Some(name) = grabbed {
        return Paragraph::new(Line::from(vec![
            Span::styled("Holding: ", Style::default().fg(HINT_LABEL_COLOR)),
            Span::styled(name, Style::default().fg(GRAB_COLOR)),
            Span::styled(
                "  Enter drop · Esc cancel",
                Style::default().fg(HINT_LABEL_COLOR),
            ),
        ]));
    }
    hints_line(&[
        ("Tab/←→", "pane"),
        ("↑↓", "select"),
        ("Enter", "grab/drop"),
        ("x", "remove"),
        ("c", "complete"),
        ("b", "back"),
        ("q", "quit"),
    ])
}

fn candidate_line(attraction: &Attraction) -> Line<'static> {
    let mut spans = vec![Span::raw(attraction.name().to_owned())];
    if let Some(badge) = attraction.badge() {
        spans.push(Span::styled(
            format!("  [{badge:?}]"),
            Style::default().fg(GRAB_COLOR),
        ));
    }
    if let Some(duration) = attraction.estimated_duration() {
        spans.push(Span::styled(
            format!("  {duration}"),
            Style::default().fg(HINT_LABEL_COLOR),
        ));
    }
    Line::from(spans)
}

fn draw_completed(frame: &mut Frame<'_>, app: &App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let destination = app
        .session
        .trip_plan()
        .map(|plan| plan.details().destination().to_owned())
        .unwrap_or_default();
    let start_date = app
        .session
        .trip_plan()
        .and_then(|plan| plan.details().start_date());

    let mut lines = Vec::new();
    if let Some(completed) = app.session.completed() {
        lines.extend(completed_lines(completed, start_date));
    }

    let title = format!("Your itinerary — {destination}");
    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((app.completed_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(body, layout[0]);

    frame.render_widget(
        hints_line(&[("↑↓", "scroll"), ("b", "back to planning"), ("q", "quit")]),
        layout[1],
    );
}

fn completed_lines(
    completed: &CompletedItinerary,
    start_date: Option<NaiveDate>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for day in completed.days() {
        lines.push(Line::from(Span::styled(
            day_label(day.day(), start_date),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for block in day.blocks() {
            let marker = match block.kind() {
                BlockKind::Landmark => "◆",
                BlockKind::Restaurant => "○",
            };
            let mut text = format!(
                "  {marker} {}  ({})  {}",
                block.start_time(),
                block.duration(),
                block.name()
            );
            if let Some(mealtime) = block.mealtime() {
                text.push_str(&format!(" — {mealtime}"));
            }
            lines.push(Line::from(text));
            if let Some(description) = block.description() {
                lines.push(Line::from(Span::styled(
                    format!("      {description}"),
                    Style::default().fg(HINT_LABEL_COLOR),
                )));
            }
        }
        lines.push(Line::default());
    }
    lines
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_owned())
        .border_style(style)
}

fn selection_style(grabbing: bool) -> Style {
    let color = if grabbing { GRAB_COLOR } else { FOCUS_COLOR };
    Style::default()
        .fg(color)
        .add_modifier(Modifier::REVERSED)
}

fn hints_line(hints: &[(&'static str, &'static str)]) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (idx, (key, label)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(HINT_LABEL_COLOR)));
        }
        spans.push(Span::styled(*key, Style::default().fg(HINT_KEY_COLOR)));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(HINT_LABEL_COLOR),
        ));
    }
    Paragraph::new(Line::from(spans))
}
