//! Application state for the profile form demo

use crate::cells::{SelectorDatePickerCell, TextFieldCell};
use crate::config::{ConfigError, FormerConfig, Palette};
use crate::controls::{DatePicker, DatePickerMode, Label};
use crate::former::{
    FormOwner, Former, InstantiateType, SelectorDatePickerRowFormer, TextFieldRowFormer,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// Titles of the profile rows, in row order
pub const ROW_TITLES: [&str; 5] = ["Name", "Email", "Nickname", "Birthday", "Start time"];

const NICKNAME_ROW: usize = 2;
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

type StatusLine = Rc<RefCell<Option<String>>>;

/// Main application struct
pub struct App {
    former: Rc<Former>,
    cursor: usize,
    /// Status message, also written by row callbacks
    status: StatusLine,
    quit: bool,
}

impl App {
    /// Build the profile form from the user's configuration
    pub fn new(config: &FormerConfig) -> Result<Self, ConfigError> {
        let palette = config.palette()?;
        let status: StatusLine = Rc::new(RefCell::new(None));
        let former = Former::new();

        let name = text_row("Name", &palette, config, &status);
        name.borrow_mut().on_validate =
            Some(Box::new(|text: Option<&str>| text.is_some_and(|t| !t.trim().is_empty())));
        former.append(name);

        let email = text_row("Email", &palette, config, &status);
        {
            let mut email = email.borrow_mut();
            email.placeholder = Some("name@example.com".to_string());
            email.on_validate =
                Some(Box::new(|text: Option<&str>| text.is_some_and(|t| t.contains('@'))));
        }
        former.append(email);

        let nickname = text_row("Nickname", &palette, config, &status);
        nickname.borrow_mut().placeholder = Some("optional".to_string());
        former.append(nickname);
        former.set_enabled(NICKNAME_ROW, false);

        let birthday_config = config.clone();
        let birthday = date_row("Birthday", &palette, &status, move |date| {
            birthday_config
                .format_date(date)
                .unwrap_or_else(|_| date.to_string())
        });
        {
            let mut birthday = birthday.borrow_mut();
            birthday.date = Utc
                .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now);
            birthday.input_view_update = Some(Box::new(|picker: &mut DatePicker| {
                picker.mode = DatePickerMode::Date;
                picker.maximum_date = Some(Utc::now());
            }));
            birthday.on_validate = Some(Box::new(|date: &DateTime<Utc>| *date < Utc::now()));
        }
        former.append(birthday);

        let start = date_row("Start time", &palette, &status, |date| {
            date.format(START_TIME_FORMAT).to_string()
        });
        {
            let mut start = start.borrow_mut();
            start.date = next_quarter_hour(Utc::now());
            start.input_accessory_view = Some(Label::new("↑/↓ ±15 min  PgUp/PgDn ±105 min"));
            start.input_view_update = Some(Box::new(|picker: &mut DatePicker| {
                picker.mode = DatePickerMode::DateAndTime;
                picker.minute_interval = 15;
            }));
        }
        former.append(start);

        tracing::info!(rows = former.row_count(), "profile form ready");
        Ok(Self {
            former,
            cursor: 0,
            status,
            quit: false,
        })
    }

    pub fn former(&self) -> &Former {
        &self.former
    }

    /// Row highlighted in the form
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_editing(&self) -> bool {
        self.former.editing_index().is_some()
    }

    pub fn status_message(&self) -> Option<String> {
        self.status.try_borrow().ok().and_then(|status| status.clone())
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.is_editing() {
            self.handle_editing_key(key);
        } else {
            self.handle_browse_key(key);
        }
        if let Some(index) = self.former.editing_index() {
            self.cursor = index;
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab {
            if self.former.can_become_editing_next() {
                self.former.become_editing_next();
            } else {
                self.former.end_editing();
            }
            return;
        }
        self.former.handle_key(key);
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        self.set_status(None);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                let last = self.former.row_count().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.former.select(self.cursor);
                if !self.is_editing() {
                    self.set_status(Some(format!("{} is disabled", self.row_title())));
                }
            }
            KeyCode::Char('d') => self.toggle_enabled(),
            KeyCode::Char('v') => self.validate(),
            _ => {}
        }
    }

    fn toggle_enabled(&mut self) {
        let Some(row) = self.former.row(self.cursor) else {
            return;
        };
        let enabled = row.try_borrow().map_or(true, |row| row.enabled());
        self.former.set_enabled(self.cursor, !enabled);
        let state = if enabled { "disabled" } else { "enabled" };
        self.set_status(Some(format!("{} {state}", self.row_title())));
    }

    fn validate(&mut self) {
        let failing = self.former.validate();
        let message = if failing.is_empty() {
            "All fields valid".to_string()
        } else {
            let titles: Vec<&str> = failing
                .iter()
                .filter_map(|index| ROW_TITLES.get(*index).copied())
                .collect();
            format!("Invalid: {}", titles.join(", "))
        };
        tracing::debug!(failing = failing.len(), "form validated");
        self.set_status(Some(message));
    }

    fn row_title(&self) -> &'static str {
        ROW_TITLES.get(self.cursor).copied().unwrap_or("Row")
    }

    fn set_status(&self, message: Option<String>) {
        if let Ok(mut status) = self.status.try_borrow_mut() {
            *status = message;
        }
    }
}

fn text_row(
    title: &'static str,
    palette: &Palette,
    config: &FormerConfig,
    status: &StatusLine,
) -> Rc<RefCell<TextFieldRowFormer>> {
    let status = Rc::clone(status);
    let row = TextFieldRowFormer::new::<TextFieldCell>(
        InstantiateType::Factory(Box::new(move || TextFieldCell::new(title))),
        Some(Box::new(move |text: &str| {
            if let Ok(mut status) = status.try_borrow_mut() {
                *status = Some(format!("{title}: {text}"));
            }
        })),
        None,
    );
    {
        let mut row = row.borrow_mut();
        row.text_disabled_color = Some(palette.disabled);
        row.title_disabled_color = Some(palette.disabled);
        row.title_editing_color = palette.editing;
        row.return_to_next_row = config.return_to_next_row();
    }
    row
}

fn date_row(
    title: &'static str,
    palette: &Palette,
    status: &StatusLine,
    format: impl Fn(&DateTime<Utc>) -> String + Clone + 'static,
) -> Rc<RefCell<SelectorDatePickerRowFormer>> {
    let status = Rc::clone(status);
    let status_format = format.clone();
    let row = SelectorDatePickerRowFormer::new::<SelectorDatePickerCell>(
        InstantiateType::Factory(Box::new(move || SelectorDatePickerCell::new(title))),
        Some(Box::new(move |date: DateTime<Utc>| {
            if let Ok(mut status) = status.try_borrow_mut() {
                *status = Some(format!("{title}: {}", status_format(&date)));
            }
        })),
        None,
    );
    {
        let mut row = row.borrow_mut();
        row.display_text_from_date = Some(Box::new(format));
        row.title_disabled_color = Some(palette.disabled);
        row.display_disabled_color = Some(palette.disabled);
    }
    row
}

fn next_quarter_hour(now: DateTime<Utc>) -> DateTime<Utc> {
    let seconds = now.timestamp();
    let rounded = seconds - seconds.rem_euclid(900) + 900;
    Utc.timestamp_opt(rounded, 0)
        .single()
        .unwrap_or(now + Duration::minutes(15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(&FormerConfig::default()).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    mod setup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_profile_rows() {
            let app = app();
            assert_eq!(app.former().row_count(), ROW_TITLES.len());
            assert_eq!(app.cursor(), 0);
            assert!(!app.is_editing());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_nickname_starts_disabled() {
            let app = app();
            let row = app.former().row(NICKNAME_ROW).unwrap();
            assert!(!row.borrow().enabled());
        }

        #[test]
        fn test_bad_palette_is_reported() {
            let config = FormerConfig {
                editing_color: Some("sparkly".to_string()),
                ..Default::default()
            };
            assert!(App::new(&config).is_err());
        }

        #[test]
        fn test_next_quarter_hour() {
            let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 7, 30).unwrap();
            assert_eq!(
                next_quarter_hour(now),
                Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 0).unwrap()
            );
        }
    }

    mod browsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_cursor_stays_in_bounds() {
            let mut app = app();
            app.handle_key(key(KeyCode::Up));
            assert_eq!(app.cursor(), 0);
            for _ in 0..10 {
                app.handle_key(key(KeyCode::Down));
            }
            assert_eq!(app.cursor(), ROW_TITLES.len() - 1);
        }

        #[test]
        fn test_quit_keys() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('q')));
            assert!(app.should_quit());
        }

        #[test]
        fn test_selecting_disabled_row_reports_it() {
            let mut app = app();
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Enter));
            assert!(!app.is_editing());
            assert_eq!(app.status_message().as_deref(), Some("Nickname is disabled"));
        }

        #[test]
        fn test_toggle_enabled() {
            let mut app = app();
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Char('d')));
            assert_eq!(app.status_message().as_deref(), Some("Nickname enabled"));

            app.handle_key(key(KeyCode::Enter));
            assert!(app.is_editing());
            assert_eq!(app.cursor(), NICKNAME_ROW);
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_updates_status() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter));
            assert!(app.is_editing());

            type_text(&mut app, "Ryo");

            assert_eq!(app.status_message().as_deref(), Some("Name: Ryo"));
        }

        #[test]
        fn test_tab_skips_disabled_row() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Tab));
            assert_eq!(app.cursor(), 1);
            app.handle_key(key(KeyCode::Tab));
            assert_eq!(app.cursor(), 3);
            assert_eq!(app.former().editing_index(), Some(3));
        }

        #[test]
        fn test_return_on_last_row_finishes() {
            let mut app = app();
            for _ in 0..4 {
                app.handle_key(key(KeyCode::Down));
            }
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.former().editing_index(), Some(4));

            app.handle_key(key(KeyCode::Up));
            assert!(app.status_message().is_some_and(|s| s.starts_with("Start time: ")));

            app.handle_key(key(KeyCode::Enter));
            assert!(!app.is_editing());
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_validate_lists_invalid_rows() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('v')));
            assert_eq!(app.status_message().as_deref(), Some("Invalid: Name, Email"));
        }

        #[test]
        fn test_validate_after_filling_in() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "Ryo");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "ryo@example.com");
            app.handle_key(key(KeyCode::Esc));
            assert!(!app.is_editing());

            app.handle_key(key(KeyCode::Char('v')));
            assert_eq!(app.status_message().as_deref(), Some("All fields valid"));
        }
    }
}
