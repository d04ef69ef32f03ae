//! Application state and event handling
//!
//! Owns the converter panel and translates keyboard input into panel
//! operations:
//! - focus movement across the widget row
//! - currency selection (stepping or via the dropdown list)
//! - amount editing
//! - swap and theme switching

use crate::config::{Config, ThemeName};
use crate::panel::ConverterPanel;
use crate::rates::RateTable;
use crate::types::{Focus, Side, MAX_AMOUNT, MIN_AMOUNT};
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub panel: ConverterPanel<RateTable>,
    pub theme: Theme,
    pub focus: Focus,
    pub popup: PopupState,

    // Text typed into the amount field; may be empty mid-edit
    pub amount_edit: Option<String>,
}

/// Popup overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    None,
    Dropdown { side: Side, cursor: usize },
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    DropdownOpen,
}

impl App {
    /// Create a new App instance
    pub fn new(rates: RateTable, config: &Config) -> Self {
        let panel = ConverterPanel::with_defaults(
            rates,
            &config.default_currency,
            config.default_amount,
            config.theme,
        );
        let theme = Theme::from_name(panel.state().theme);

        Self {
            should_quit: false,
            panel,
            theme,
            focus: Focus::default(),
            popup: PopupState::None,
            amount_edit: None,
        }
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        match self.popup {
            PopupState::None => AppState::Normal,
            PopupState::Dropdown { .. } => AppState::DropdownOpen,
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state() {
            AppState::DropdownOpen => self.handle_dropdown_key(key),
            AppState::Normal => self.handle_normal_key(key),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) {
        // Global keys (work regardless of focus)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.amount_edit = None;
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.amount_edit = None;
                self.focus = self.focus.prev();
                return;
            }
            KeyCode::Char('s') => {
                self.panel.swap();
                return;
            }
            KeyCode::Char('l') => {
                self.set_theme(ThemeName::Light);
                return;
            }
            KeyCode::Char('d') => {
                self.set_theme(ThemeName::Dark);
                return;
            }
            _ => {}
        }

        // Focus-specific handling
        match self.focus {
            Focus::Source => self.handle_selector_key(Side::Source, key),
            Focus::Target => self.handle_selector_key(Side::Target, key),
            Focus::Amount => self.handle_amount_key(key),
            Focus::Swap => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.panel.swap();
                }
            }
            Focus::LightTheme | Focus::DarkTheme => self.handle_theme_key(key),
        }
    }

    /// Handle keys on a currency selector
    fn handle_selector_key(&mut self, side: Side, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.panel.step(side, 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.panel.step(side, -1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.popup = PopupState::Dropdown {
                    side,
                    cursor: self.panel.selected_index(side),
                };
            }
            _ => {}
        }
    }

    /// Text shown in the amount field
    pub fn amount_text(&self) -> String {
        match &self.amount_edit {
            Some(text) => text.clone(),
            None => self.panel.state().amount.to_string(),
        }
    }

    /// Handle keys on the amount field
    ///
    /// Typing edits a text buffer that may be empty; the panel amount
    /// follows the buffer whenever it holds a value in range.
    fn handle_amount_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let mut text = self.amount_text();
                text.push(c);
                let text = text.trim_start_matches('0').to_string();

                match text.parse::<u32>() {
                    Ok(value) if value > MAX_AMOUNT => {}
                    Ok(value) => {
                        self.amount_edit = Some(text);
                        self.panel.set_amount(value);
                    }
                    Err(_) => self.amount_edit = Some(text),
                }
            }
            KeyCode::Backspace => {
                let mut text = self.amount_text();
                text.pop();

                if let Ok(value) = text.parse::<u32>() {
                    if value >= MIN_AMOUNT {
                        self.panel.set_amount(value);
                    }
                }
                self.amount_edit = Some(text);
            }
            KeyCode::Char('k') | KeyCode::Up => self.step_amount(1),
            KeyCode::Char('j') | KeyCode::Down => self.step_amount(-1),
            KeyCode::PageUp => self.step_amount(100),
            KeyCode::PageDown => self.step_amount(-100),
            _ => {}
        }
    }

    /// Step the amount, leaving text editing
    fn step_amount(&mut self, delta: i64) {
        self.amount_edit = None;
        let amount = self.panel.state().amount as i64;
        let stepped = (amount + delta).clamp(MIN_AMOUNT as i64, MAX_AMOUNT as i64);
        self.panel.set_amount(stepped as u32);
    }

    /// Handle keys on the theme radio buttons
    fn handle_theme_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let choice = if self.focus == Focus::LightTheme {
                    ThemeName::Light
                } else {
                    ThemeName::Dark
                };
                self.set_theme(choice);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus = Focus::LightTheme;
                self.set_theme(ThemeName::Light);
            }
            KeyCode::Right => {
                self.focus = Focus::DarkTheme;
                self.set_theme(ThemeName::Dark);
            }
            _ => {}
        }
    }

    /// Handle keys while the currency dropdown is open
    fn handle_dropdown_key(&mut self, key: KeyEvent) {
        let PopupState::Dropdown { side, cursor } = self.popup.clone() else {
            return;
        };
        let last = self.panel.currencies().len().saturating_sub(1);

        let cursor = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.popup = PopupState::None;
                return;
            }
            KeyCode::Enter => {
                if let Some(code) = self.panel.currencies().get(cursor).cloned() {
                    self.panel.select(side, &code);
                }
                self.popup = PopupState::None;
                return;
            }
            KeyCode::Char('j') | KeyCode::Down => (cursor + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => cursor.saturating_sub(1),
            KeyCode::Home => 0,
            KeyCode::End => last,
            KeyCode::PageDown => (cursor + 10).min(last),
            KeyCode::PageUp => cursor.saturating_sub(10),
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                self.jump_to_letter(cursor, c).unwrap_or(cursor)
            }
            _ => cursor,
        };

        self.popup = PopupState::Dropdown { side, cursor };
    }

    /// Next code after `cursor` starting with `letter`, wrapping around
    fn jump_to_letter(&self, cursor: usize, letter: char) -> Option<usize> {
        let codes = self.panel.currencies();
        let len = codes.len();

        (1..=len)
            .map(|offset| (cursor + offset) % len)
            .find(|&idx| codes[idx].starts_with(letter))
    }

    /// Switch theme, replacing the whole palette
    fn set_theme(&mut self, name: ThemeName) {
        self.panel.set_theme(name);
        self.theme = Theme::from_name(name);
    }
}
