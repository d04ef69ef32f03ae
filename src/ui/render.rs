//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with title and rate table date
//! - The converter row (selectors, amount fields, swap, theme radios)
//! - Dropdown overlay
//! - Status bar

use crate::app::{App, PopupState};
use crate::config::ThemeName;
use crate::types::{Focus, Side};
use crate::ui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Widths of the row widgets, in display order
const ROW_WIDTHS: [u16; 7] = [10, 14, 10, 14, 19, 11, 11];

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Paint the whole window with the active theme first
    frame.render_widget(Block::default().style(app.theme.text()), area);

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3),  // Header
        Constraint::Min(3),     // Converter row
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);

    let cells = render_panel(frame, app, layout[1]);

    render_status_bar(frame, app, layout[2]);

    render_popups(frame, app, &cells, area);
}

/// Render header with title and rate table info
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let rates = app.panel.provider();

    let header_block = Block::default()
        .style(theme.text())
        .title(" Currency converter ")
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    // Info line sits on the second header row
    if area.height < 2 {
        return;
    }

    let info = Paragraph::new(format!("rates of {} · base {}", rates.date(), rates.base()))
        .style(theme.text_dim())
        .alignment(Alignment::Right);

    let info_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    }
    .intersection(area);
    frame.render_widget(info, info_area);
}

/// Render the converter row, returning the area of each widget
fn render_panel(frame: &mut Frame, app: &App, area: Rect) -> Vec<Rect> {
    let theme = &app.theme;
    let state = app.panel.state();

    let row_width: u16 = ROW_WIDTHS.iter().sum();
    let row_area = widgets::centered_rect(row_width.min(area.width), area.height.min(3), area);
    let cells = widgets::horizontal_row(row_area, &ROW_WIDTHS);

    let focused = |f: Focus| app.focus == f;

    widgets::render_field(
        frame,
        Side::Source.label(),
        &format!("{} ▾", state.source),
        focused(Focus::Source),
        theme,
        cells[0],
    );
    widgets::render_field(
        frame,
        "Amount",
        &app.amount_text(),
        focused(Focus::Amount),
        theme,
        cells[1],
    );
    widgets::render_field(
        frame,
        Side::Target.label(),
        &format!("{} ▾", state.target),
        focused(Focus::Target),
        theme,
        cells[2],
    );
    widgets::render_field(frame, "Converted", &state.output.to_string(), false, theme, cells[3]);
    widgets::render_button(frame, "Swap currencies", focused(Focus::Swap), theme, cells[4]);
    widgets::render_radio(
        frame,
        ThemeName::Light.as_str(),
        state.theme == ThemeName::Light,
        focused(Focus::LightTheme),
        theme,
        cells[5],
    );
    widgets::render_radio(
        frame,
        ThemeName::Dark.as_str(),
        state.theme == ThemeName::Dark,
        focused(Focus::DarkTheme),
        theme,
        cells[6],
    );

    cells
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints = match (&app.popup, app.focus) {
        (PopupState::Dropdown { .. }, _) => "[j/k] Navigate  [A-Z] Jump  [Enter] Select  [Esc] Cancel",
        (_, Focus::Source | Focus::Target) => "[Tab] Next  [j/k] Change  [Enter] List  [s] Swap  [l/d] Theme  [q] Quit",
        (_, Focus::Amount) => "[Tab] Next  [0-9] Type  [Backspace] Delete  [↑/↓] ±1  [PgUp/PgDn] ±100  [q] Quit",
        (_, Focus::Swap) => "[Tab] Next  [Enter] Swap  [l/d] Theme  [q] Quit",
        (_, Focus::LightTheme | Focus::DarkTheme) => "[Tab] Next  [←/→] Choose theme  [s] Swap  [q] Quit",
    };

    widgets::render_status_bar(frame, hints, "", theme, area);
}

/// Render the dropdown overlay if open
fn render_popups(frame: &mut Frame, app: &App, cells: &[Rect], area: Rect) {
    if let PopupState::Dropdown { side, cursor } = &app.popup {
        let anchor = match side {
            Side::Source => cells[0],
            Side::Target => cells[2],
        };

        widgets::render_dropdown(
            frame,
            side.label(),
            app.panel.currencies(),
            *cursor,
            &app.theme,
            anchor,
            area,
        );
    }
}
