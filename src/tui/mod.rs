// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive terminal front end: the match form, stats, and history.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local, Utc};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::focus::{Activation, Command, Direction, ItemKey, Navigator, SurfaceItem, Zone};
use crate::format::{LastMatchType, StoredSession};
use crate::model::{LogScope, MatchRecord, Outcome, RecordId, SessionSummary};
use crate::ops;
use crate::query::{history_page, stats_for, HistoryPage};
use crate::state::AppState;
use crate::store::{DataFolder, StoreError};

mod layout;
mod theme;

use layout::button_text;
pub use layout::{TuiRenderer, DEFAULT_FORM_WIDTH};
use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "matchtally";
const TOAST_DURATION: Duration = Duration::from_millis(2500);
const SESSION_TOAST_DURATION: Duration = Duration::from_millis(3500);
const SIDEBAR_MIN_WIDTH: u16 = 90;
const DELETE_MARKER: &str = " ✕";

/// Runs the interactive terminal UI until the user quits.
///
/// `ended_session` is the session an auto reset closed at launch, announced once.
pub fn run(
    state: AppState,
    folder: Option<DataFolder>,
    ended_session: Option<SessionSummary>,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::resolve(state.settings.theme)?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(state, folder, theme);
    if let Some(previous) = ended_session {
        app.announce_new_session(previous);
    }

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    app.persist(DataFolder::save_state);
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let status_area = rows[1];

    let (form_area, side_area) = if main_area.width >= SIDEBAR_MIN_WIDTH {
        let panes = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main_area);
        (panes[0], Some(panes[1]))
    } else {
        (main_area, None)
    };

    render_form(frame, app, form_area);
    match side_area {
        Some(side_area) => {
            let side = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Length(7), Constraint::Min(0)])
                .split(side_area);
            render_stats(frame, app, side[0]);
            render_history(frame, app, side[1]);
        }
        None => app.history_rows.clear(),
    }

    let toast_message = match app.toast.as_ref() {
        Some(toast) if toast.expires_at > Instant::now() => Some(toast.message.clone()),
        Some(_) => {
            app.toast = None;
            None
        }
        None => None,
    };
    let status = Paragraph::new(footer_line(app, toast_message.as_deref()));
    frame.render_widget(status, status_area);
    if app.pending.is_none() {
        let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
        frame.render_widget(brand, status_area);
    }

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

// Panel, footer, and help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// A destructive action waiting for `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingConfirm {
    DeleteMatch(RecordId),
    ClearAll,
}

impl PendingConfirm {
    fn prompt(self) -> &'static str {
        match self {
            Self::DeleteMatch(_) => "Delete this match?",
            Self::ClearAll => "Clear ALL match data? This cannot be undone!",
        }
    }
}

struct App {
    state: AppState,
    renderer: TuiRenderer,
    folder: Option<DataFolder>,
    theme: TuiTheme,
    clock: fn() -> DateTime<Utc>,
    form_area: Rect,
    form_scroll: u16,
    /// Screen row and record of every drawn history line.
    history_rows: Vec<(u16, RecordId)>,
    history_area: Rect,
    pending: Option<PendingConfirm>,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, folder: Option<DataFolder>, theme: TuiTheme) -> Self {
        let renderer = TuiRenderer::new(&state, DEFAULT_FORM_WIDTH);
        Self {
            state,
            renderer,
            folder,
            theme,
            clock: Utc::now,
            form_area: Rect::default(),
            form_scroll: 0,
            history_rows: Vec::new(),
            history_area: Rect::default(),
            pending: None,
            show_help: false,
            toast: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if let Some(pending) = self.pending.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.confirm(pending);
            } else {
                self.set_toast("Cancelled");
            }
            return;
        }
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }
        if let Some(command) = self.form_command(key) {
            self.dispatch(command);
            return;
        }
        self.handle_app_key(key.code);
    }

    /// Maps a key to a navigator command, honoring the keyboard settings.
    fn form_command(&self, key: KeyEvent) -> Option<Command> {
        let settings = &self.state.settings;
        if !settings.keyboard_shortcuts_enabled {
            return None;
        }

        let code = match key.code {
            KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
            other => other,
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (settings.hotkeys_enabled && code == KeyCode::Char('z'))
                .then_some(Command::UndoLastMatch);
        }

        if settings.navigation_keys_enabled {
            let step = match code {
                KeyCode::Char('w') | KeyCode::Up => Some(Command::PrimaryMove(Direction::Previous)),
                KeyCode::Char('s') | KeyCode::Down => Some(Command::PrimaryMove(Direction::Next)),
                KeyCode::Char('a') | KeyCode::Left => {
                    Some(Command::SecondaryMove(Direction::Previous))
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    Some(Command::SecondaryMove(Direction::Next))
                }
                _ => None,
            };
            if step.is_some() {
                return step;
            }
        }

        if settings.hotkeys_enabled {
            let hotkey = match code {
                KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Activate),
                KeyCode::Char('t') => Some(Command::ToggleMatchTypes),
                KeyCode::Char('e') => Some(Command::ToggleCharacters),
                KeyCode::Char('c') => Some(Command::ClearCharacters),
                _ => None,
            };
            if hotkey.is_some() {
                return hotkey;
            }
        }

        if settings.number_keys_enabled {
            if let KeyCode::Char(ch) = code {
                if self.state.catalog.parent_for_hotkey(ch).is_some() {
                    return Some(Command::SelectParentHotkey(ch));
                }
            }
        }

        (code == KeyCode::Esc).then_some(Command::Defocus)
    }

    fn handle_app_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('v') => {
                self.state.ui.stats_view = self.state.ui.stats_view.toggled();
                self.persist_session();
            }
            KeyCode::Char('h') => {
                self.state.ui.history_view = self.state.ui.history_view.toggled();
                self.state.ui.history_page = 0;
                self.persist_session();
            }
            KeyCode::Char('n') => {
                let previous = ops::start_new_session(&mut self.state, (self.clock)());
                self.persist_session();
                self.announce_new_session(previous);
            }
            KeyCode::Char('[') => {
                self.state.ui.history_page = self.state.ui.history_page.saturating_sub(1);
            }
            KeyCode::Char(']') => {
                let next = {
                    let page = self.history();
                    page.has_next().then_some(page.page + 1)
                };
                if let Some(next) = next {
                    self.state.ui.history_page = next;
                }
            }
            KeyCode::Char('p') => {
                self.state.settings.matches_per_page = self.state.settings.next_matches_per_page();
                self.state.ui.history_page = 0;
                self.persist(|folder, state| folder.save_settings(&state.settings));
                let message = format!("{} matches per page", self.state.settings.matches_per_page);
                self.set_toast(message);
            }
            KeyCode::Char('X') => self.pending = Some(PendingConfirm::ClearAll),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help || self.pending.is_some() {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            MouseEventKind::ScrollDown => {
                self.form_scroll = self.form_scroll.saturating_add(1);
            }
            MouseEventKind::ScrollUp => {
                self.form_scroll = self.form_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        if let Some(id) = self.history_delete_target(column, row) {
            self.pending = Some(PendingConfirm::DeleteMatch(id));
            return;
        }
        let Some((zone, index)) = self.form_hit(column, row) else {
            self.dispatch(Command::Defocus);
            return;
        };

        self.dispatch(Command::DirectClick { zone, index });
        if !self.state.focus.is_on(zone, index) {
            return;
        }
        self.dispatch(Command::Activate);
        // A click leaves the cursor on what was clicked when it still exists.
        let _ = Navigator::new(&mut self.state, &mut self.renderer).on_direct_click(zone, index);
    }

    fn form_hit(&self, column: u16, row: u16) -> Option<(Zone, usize)> {
        let area = self.form_area;
        if !rect_contains(area, column, row) {
            return None;
        }
        let y = (row - area.y).saturating_add(self.form_scroll);
        self.renderer.hit_test(column - area.x, y)
    }

    fn history_delete_target(&self, column: u16, row: u16) -> Option<RecordId> {
        let area = self.history_area;
        if !rect_contains(area, column, row) {
            return None;
        }
        let marker_width = DELETE_MARKER.chars().count() as u16;
        if column < area.right().saturating_sub(marker_width) {
            return None;
        }
        self.history_rows
            .iter()
            .find(|(y, _)| *y == row)
            .map(|(_, id)| *id)
    }

    fn dispatch(&mut self, command: Command) {
        let now = (self.clock)();
        let activation = Navigator::new(&mut self.state, &mut self.renderer)
            .at(now)
            .dispatch(command);
        self.after_activation(activation);
    }

    fn after_activation(&mut self, activation: Activation) {
        match activation {
            Activation::None | Activation::SectionToggled | Activation::SelectionChanged => {}
            Activation::MatchTypeChanged => self.persist(|folder, state| {
                folder.save_last_match_type(LastMatchType::from_state(state).as_ref())
            }),
            Activation::Saved(record) => {
                self.persist(DataFolder::save_after_match_change);
                if self.state.settings.show_match_saved_notification {
                    let message = format!("Match saved! {}", self.record_summary(&record));
                    self.set_toast(message);
                }
            }
            Activation::Undone(record) => {
                self.persist(DataFolder::save_after_match_change);
                let message = format!("Undid {}", self.record_summary(&record));
                self.set_toast(message);
            }
        }
    }

    fn confirm(&mut self, pending: PendingConfirm) {
        match pending {
            PendingConfirm::DeleteMatch(id) => {
                if self.state.log.remove_by_id(id).is_none() {
                    return;
                }
                self.state.ui.history_page = 0;
                tracing::info!(%id, "deleted match");
                self.set_toast("Match deleted");
            }
            PendingConfirm::ClearAll => {
                let removed = self.state.log.clear_all();
                self.state.ui.history_page = 0;
                tracing::info!(removed, "cleared all matches");
                self.set_toast(format!("Cleared {removed} matches"));
            }
        }
        self.persist(|folder, state| folder.save_matches(&state.log));
    }

    fn record_summary(&self, record: &MatchRecord) -> String {
        let label = self.state.catalog.match_type_label(
            record.parent.as_str(),
            record.child.as_ref().map(|child| child.as_str()),
        );
        let result = record
            .result
            .label(self.state.settings.outcome_style_text);
        format!("{label} - {result}")
    }

    fn announce_new_session(&mut self, previous: SessionSummary) {
        if !self.state.settings.show_session_notification {
            return;
        }
        if previous.matches > 0 {
            let message = format!(
                "New session started! Previous: {} matches ({:.1}% WR)",
                previous.matches,
                previous.win_rate_percent()
            );
            self.set_toast_for(message, SESSION_TOAST_DURATION);
        } else {
            self.set_toast("New session started!");
        }
    }

    fn history(&self) -> HistoryPage<'_> {
        history_page(
            &self.state.log,
            self.state.ui.history_view,
            &self.state.session,
            self.state.settings.matches_per_page,
            self.state.ui.history_page,
        )
    }

    fn persist_session(&mut self) {
        self.persist(|folder, state| folder.save_session(&StoredSession::from_state(state)));
    }

    /// Runs `save` against the data folder, if there is one; failures become a toast.
    fn persist(&mut self, save: impl FnOnce(&DataFolder, &AppState) -> Result<(), StoreError>) {
        let Some(folder) = self.folder.as_ref() else {
            return;
        };
        if let Err(err) = save(folder, &self.state) {
            tracing::error!(error = %err, "failed to persist state");
            self.set_toast(format!("Save failed: {err}"));
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.set_toast_for(message, TOAST_DURATION);
    }

    fn set_toast_for(&mut self, message: impl Into<String>, duration: Duration) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + duration,
        });
    }
}

fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

fn local_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%m-%d %H:%M")
        .to_string()
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
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
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
