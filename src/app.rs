use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use crate::dates::{self, ElapsedDuration};
use crate::storage::StateStore;
use crate::theme::ThemeId;
use arboard::Clipboard;

/// The date-entry field commits only once it holds a full YYYY-MM-DD shape.
const DATE_INPUT_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Setup,
    Dashboard,
    ThemeSelect,
}

pub struct App {
    pub should_quit: bool,
    pub mode: Mode,
    pub status: Option<String>,
    pub input: String,
    pub start_date: Option<NaiveDate>,
    pub theme: ThemeId,
    pub theme_state: ListState,
    pub show_help: bool,
    store: Box<dyn StateStore>,
    toast: Option<Toast>,
}

impl App {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        let persisted = store.load();
        let mode = if persisted.start_date.is_some() {
            Mode::Dashboard
        } else {
            Mode::Setup
        };
        let mut theme_state = ListState::default();
        theme_state.select(Some(0));

        App {
            should_quit: false,
            mode,
            status: None,
            input: String::new(),
            start_date: persisted.start_date,
            theme: persisted.theme,
            theme_state,
            show_help: false,
            store,
            toast: None,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.show_help {
            match key.code {
                KeyCode::Char('h') | KeyCode::Esc => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match self.mode {
            Mode::Setup => self.handle_setup_input(key),
            Mode::Dashboard => self.handle_dashboard_input(key),
            Mode::ThemeSelect => self.handle_theme_input(key),
        }
    }

    /// Elapsed duration against the wall clock, recomputed per render pass.
    pub fn elapsed_now(&self) -> Option<ElapsedDuration> {
        let start = self.start_date?;
        Some(dates::elapsed(start, Local::now().date_naive()))
    }

    pub fn formatted_start(&self) -> Option<String> {
        self.start_date.map(dates::format_long_date)
    }

    pub fn input_is_complete(&self) -> bool {
        self.input.chars().count() == DATE_INPUT_LEN
    }

    /// Applies a raw theme identifier. Unrecognized ids are ignored; neither
    /// the in-memory theme nor durable storage changes.
    pub fn apply_theme(&mut self, value: &str) {
        let Some(id) = ThemeId::parse(value) else {
            return;
        };
        self.theme = id;
        if let Err(err) = self.store.save_theme(id) {
            self.status = Some(format!("Failed to save theme: {err}"));
        }
    }

    /// Parses and commits the pending date text. No-op until the input is
    /// exactly ten characters, matching the original's disabled save button.
    pub fn commit_date(&mut self) {
        if !self.input_is_complete() {
            return;
        }
        match dates::parse_date(self.input.trim()) {
            Ok(date) => {
                if let Err(err) = self.store.save_start_date(date) {
                    self.status = Some(format!("Failed to save date: {err}"));
                    return;
                }
                self.start_date = Some(date);
                self.input.clear();
                self.status = None;
                self.mode = Mode::Dashboard;
            }
            Err(err) => {
                self.status = Some(err);
            }
        }
    }

    /// Clears the start date but keeps the theme, returning to Setup.
    pub fn change_date(&mut self) {
        if let Err(err) = self.store.clear_start_date() {
            self.status = Some(format!("Failed to clear date: {err}"));
            return;
        }
        self.start_date = None;
        self.input.clear();
        self.status = None;
        self.mode = Mode::Setup;
    }

    /// Clears everything: date, pending input, theme, and both stored keys.
    pub fn reset_all(&mut self) {
        if let Err(err) = self.store.clear_all() {
            self.status = Some(format!("Failed to reset: {err}"));
            return;
        }
        self.start_date = None;
        self.input.clear();
        self.theme = ThemeId::default();
        self.status = None;
        self.mode = Mode::Setup;
        self.set_toast("Everything reset.", false);
    }

    fn handle_setup_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.commit_date(),
            KeyCode::Tab => self.enter_theme_select(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    self.input.push(ch);
                }
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_dashboard_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('h') => self.show_help = true,
            KeyCode::Char('t') | KeyCode::Tab => self.enter_theme_select(),
            KeyCode::Char('c') => self.change_date(),
            KeyCode::Char('r') => self.reset_all(),
            KeyCode::Enter => self.copy_milestone_to_clipboard(),
            _ => {}
        }
    }

    fn handle_theme_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.select_previous_theme(),
            KeyCode::Down => self.select_next_theme(),
            KeyCode::Enter => {
                if let Some(id) = self
                    .theme_state
                    .selected()
                    .and_then(|index| ThemeId::ALL.get(index))
                {
                    self.apply_theme(id.as_str());
                }
                self.mode = self.display_mode();
            }
            KeyCode::Esc => {
                self.mode = self.display_mode();
            }
            _ => {}
        }
    }

    /// The display mode is derived purely from whether a start date exists.
    fn display_mode(&self) -> Mode {
        if self.start_date.is_some() {
            Mode::Dashboard
        } else {
            Mode::Setup
        }
    }

    fn enter_theme_select(&mut self) {
        let current = ThemeId::ALL
            .iter()
            .position(|id| *id == self.theme)
            .unwrap_or(0);
        self.theme_state.select(Some(current));
        self.mode = Mode::ThemeSelect;
        self.status = None;
    }

    fn select_previous_theme(&mut self) {
        let selected = self.theme_state.selected().unwrap_or(0);
        let new_index = if selected == 0 {
            ThemeId::ALL.len() - 1
        } else {
            selected - 1
        };
        self.theme_state.select(Some(new_index));
    }

    fn select_next_theme(&mut self) {
        let selected = self.theme_state.selected().unwrap_or(0);
        let new_index = if selected + 1 >= ThemeId::ALL.len() {
            0
        } else {
            selected + 1
        };
        self.theme_state.select(Some(new_index));
    }

    fn copy_milestone_to_clipboard(&mut self) {
        let Some(start) = self.start_date else {
            return;
        };
        let counter = dates::elapsed(start, Local::now().date_naive());
        let text = format!(
            "💕 Together since {} — {}",
            dates::format_long_date(start),
            counter
        );
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(_) => self.set_toast("Copied milestone to clipboard.", false),
            Err(err) => self.set_toast(format!("Clipboard error: {err}"), true),
        }
    }

    pub fn active_toast(&mut self) -> Option<ToastView> {
        let toast = self.toast.as_ref()?;
        if toast.created_at.elapsed() > Duration::from_secs(2) {
            self.toast = None;
            return None;
        }
        Some(ToastView {
            message: toast.message.clone(),
            is_error: toast.is_error,
        })
    }

    fn set_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast {
            message: message.into(),
            created_at: Instant::now(),
            is_error,
        });
    }
}

struct Toast {
    message: String,
    created_at: Instant,
    is_error: bool,
}

pub struct ToastView {
    pub message: String,
    pub is_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crossterm::event::KeyModifiers;

    fn app_with(store: &MemoryStore) -> App {
        App::new(Box::new(store.clone()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key_event(key(KeyCode::Char(ch)));
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn starts_in_setup_without_a_saved_date() {
        let store = MemoryStore::default();
        let app = app_with(&store);
        assert_eq!(app.mode, Mode::Setup);
        assert_eq!(app.start_date, None);
        assert_eq!(app.theme, ThemeId::Blossom);
    }

    #[test]
    fn commit_is_a_no_op_until_input_has_ten_chars() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);

        type_text(&mut app, "2020-1-5");
        app.commit_date();
        assert_eq!(app.start_date, None);
        assert_eq!(app.mode, Mode::Setup);
        assert_eq!(app.input, "2020-1-5");

        type_text(&mut app, "000");
        assert_eq!(app.input.chars().count(), 11);
        app.commit_date();
        assert_eq!(app.start_date, None);
        assert_eq!(app.status, None);
    }

    #[test]
    fn committing_a_full_date_enters_dashboard_and_persists() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);

        type_text(&mut app, "2020-01-15");
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.start_date, Some(date(2020, 1, 15)));
        assert_eq!(app.mode, Mode::Dashboard);
        assert!(app.input.is_empty());

        // Simulated restart over the same store.
        let reopened = app_with(&store);
        assert_eq!(reopened.start_date, Some(date(2020, 1, 15)));
        assert_eq!(reopened.mode, Mode::Dashboard);
    }

    #[test]
    fn ten_chars_of_nonsense_sets_status_and_stays_in_setup() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);

        type_text(&mut app, "yyyy-mm-dd");
        app.commit_date();
        assert_eq!(app.start_date, None);
        assert_eq!(app.mode, Mode::Setup);
        assert!(app.status.is_some());
    }

    #[test]
    fn theme_change_persists_across_restart() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        app.apply_theme("starry");
        assert_eq!(app.theme, ThemeId::Starry);

        let reopened = app_with(&store);
        assert_eq!(reopened.theme, ThemeId::Starry);
    }

    #[test]
    fn unknown_theme_id_is_ignored() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        app.apply_theme("starry");

        app.apply_theme("bogus");
        assert_eq!(app.theme, ThemeId::Starry);
        assert_eq!(store.raw_theme(), Some("starry".to_string()));
    }

    #[test]
    fn theme_picker_enter_applies_the_highlighted_theme() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);

        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.mode, Mode::ThemeSelect);
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.theme, ThemeId::Starry);
        assert_eq!(app.mode, Mode::Setup);
    }

    #[test]
    fn theme_picker_esc_keeps_the_current_theme() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);

        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Esc));

        assert_eq!(app.theme, ThemeId::Blossom);
        assert_eq!(store.raw_theme(), None);
    }

    #[test]
    fn change_date_clears_the_date_but_keeps_the_theme() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        type_text(&mut app, "2020-01-15");
        app.commit_date();
        app.apply_theme("winter");

        app.handle_key_event(key(KeyCode::Char('c')));

        assert_eq!(app.start_date, None);
        assert_eq!(app.mode, Mode::Setup);
        assert_eq!(app.theme, ThemeId::Winter);
        assert_eq!(store.raw_start_date(), None);
        assert_eq!(store.raw_theme(), Some("winter".to_string()));
    }

    #[test]
    fn reset_all_clears_date_theme_and_both_stored_keys() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        type_text(&mut app, "2020-01-15");
        app.commit_date();
        app.apply_theme("sunset");

        app.handle_key_event(key(KeyCode::Char('r')));

        assert_eq!(app.start_date, None);
        assert_eq!(app.theme, ThemeId::Blossom);
        assert_eq!(app.mode, Mode::Setup);
        assert!(app.input.is_empty());
        assert_eq!(store.raw_start_date(), None);
        assert_eq!(store.raw_theme(), None);
    }

    #[test]
    fn backspace_edits_the_pending_input() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        type_text(&mut app, "2020-01-16");
        app.handle_key_event(key(KeyCode::Backspace));
        type_text(&mut app, "5");
        app.commit_date();
        assert_eq!(app.start_date, Some(date(2020, 1, 15)));
    }

    #[test]
    fn elapsed_now_is_absent_until_a_date_is_committed() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        assert!(app.elapsed_now().is_none());
        assert!(app.formatted_start().is_none());

        type_text(&mut app, "2020-01-15");
        app.commit_date();
        assert!(app.elapsed_now().is_some());
        assert_eq!(app.formatted_start(), Some("15 January 2020".to_string()));
    }
}
