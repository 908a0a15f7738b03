use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::theme::ThemeId;

/// The two persisted values, decoded with defaults already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub start_date: Option<NaiveDate>,
    pub theme: ThemeId,
}

/// Durable key-value store for the start date and theme choice.
///
/// Writes are synchronous and fire-and-forget from the caller's view;
/// loading never fails, it substitutes defaults for anything missing or
/// malformed.
pub trait StateStore {
    fn load(&self) -> PersistedState;
    fn save_start_date(&mut self, date: NaiveDate) -> io::Result<()>;
    fn clear_start_date(&mut self) -> io::Result<()>;
    fn save_theme(&mut self, theme: ThemeId) -> io::Result<()>;
    fn clear_all(&mut self) -> io::Result<()>;
}

/// On-disk shape. Both fields stay raw strings so an unrecognized value
/// degrades on load instead of failing the whole document.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
struct StateFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

fn decode(file: &StateFile) -> PersistedState {
    PersistedState {
        start_date: file.start_date.as_deref().and_then(decode_start_date),
        theme: file
            .theme
            .as_deref()
            .and_then(ThemeId::parse)
            .unwrap_or_default(),
    }
}

/// Accepts any value whose first ten characters are a `YYYY-MM-DD` date,
/// which covers both the stored date-time form and a bare date.
fn decode_start_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// ISO-8601-ish local midnight, mirroring the original persisted form.
fn encode_start_date(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_home() -> Option<Self> {
        let mut path = dirs::home_dir()?;
        path.push(".ourdays.json");
        Some(Self::new(path))
    }

    fn read_file(&self) -> Option<StateFile> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    fn write_file(&self, state: &StateFile) -> io::Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        fs::write(&self.path, json)
    }

    fn update(&mut self, apply: impl FnOnce(&mut StateFile)) -> io::Result<()> {
        let mut state = self.read_file().unwrap_or_default();
        apply(&mut state);
        self.write_file(&state)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> PersistedState {
        decode(&self.read_file().unwrap_or_default())
    }

    fn save_start_date(&mut self, date: NaiveDate) -> io::Result<()> {
        self.update(|state| state.start_date = Some(encode_start_date(date)))
    }

    fn clear_start_date(&mut self) -> io::Result<()> {
        self.update(|state| state.start_date = None)
    }

    fn save_theme(&mut self, theme: ThemeId) -> io::Result<()> {
        self.update(|state| state.theme = Some(theme.as_str().to_string()))
    }

    fn clear_all(&mut self) -> io::Result<()> {
        self.update(|state| {
            state.start_date = None;
            state.theme = None;
        })
    }
}

/// In-memory fake. Clones share the same map, so a "process restart" is
/// simulated by handing a clone to a fresh app.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: std::rc::Rc<std::cell::RefCell<StateFile>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn raw_theme(&self) -> Option<String> {
        self.state.borrow().theme.clone()
    }

    pub fn raw_start_date(&self) -> Option<String> {
        self.state.borrow().start_date.clone()
    }
}

#[cfg(test)]
impl StateStore for MemoryStore {
    fn load(&self) -> PersistedState {
        decode(&self.state.borrow())
    }

    fn save_start_date(&mut self, date: NaiveDate) -> io::Result<()> {
        self.state.borrow_mut().start_date = Some(encode_start_date(date));
        Ok(())
    }

    fn clear_start_date(&mut self) -> io::Result<()> {
        self.state.borrow_mut().start_date = None;
        Ok(())
    }

    fn save_theme(&mut self, theme: ThemeId) -> io::Result<()> {
        self.state.borrow_mut().theme = Some(theme.as_str().to_string());
        Ok(())
    }

    fn clear_all(&mut self) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.start_date = None;
        state.theme = None;
        Ok(())
    }
}
