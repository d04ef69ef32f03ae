//! Reusable UI widgets
//!
//! Contains the building blocks of the converter row:
//! - Labelled fields (currency selectors, amount fields)
//! - Push button and radio buttons
//! - Dropdown list popup
//! - Status bar

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render a bordered field with a title and a single value line
pub fn render_field(
    frame: &mut Frame,
    title: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(if focused { theme.title() } else { theme.text_dim() })
        .borders(Borders::ALL)
        .border_style(theme.border_for(focused))
        .style(theme.field());

    let field = Paragraph::new(Line::from(value.to_string()))
        .style(theme.field())
        .alignment(Alignment::Right)
        .block(block);

    frame.render_widget(field, area);
}

/// Render a push button
pub fn render_button(
    frame: &mut Frame,
    label: &str,
    focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_for(focused))
        .style(theme.text());

    let button = Paragraph::new(Line::styled(format!(" {} ", label), theme.button()))
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(button, area);
}

/// Render a radio button, `(•)` when checked
pub fn render_radio(
    frame: &mut Frame,
    label: &str,
    checked: bool,
    focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let mark = if checked { "(•) " } else { "( ) " };
    let mark_style = if checked { theme.title() } else { theme.text_dim() };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_for(focused))
        .style(theme.text());

    let radio = Paragraph::new(Line::from(vec![
        Span::styled(mark, mark_style),
        Span::styled(label.to_string(), theme.text()),
    ]))
    .block(block);

    frame.render_widget(radio, area);
}

/// Render a dropdown list of currency codes below (or over) its selector
pub fn render_dropdown(
    frame: &mut Frame,
    title: &str,
    items: &[String],
    cursor: usize,
    theme: &Theme,
    anchor: Rect,
    screen: Rect,
) {
    let height = (items.len() as u16 + 2)
        .min(12)
        .min(screen.height.saturating_sub(anchor.y + anchor.height))
        .max(3);
    let y = if anchor.y + anchor.height + height <= screen.y + screen.height {
        anchor.y + anchor.height
    } else {
        anchor.y
    };

    let popup_area = Rect {
        x: anchor.x,
        y,
        width: anchor.width.max(12).min(screen.width.saturating_sub(anchor.x)),
        height,
    }
    .intersection(screen);

    if popup_area.is_empty() {
        return;
    }

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|code| ListItem::new(Line::from(format!(" {}", code))))
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .title_style(theme.title())
                .borders(Borders::ALL)
                .border_style(theme.border_focused())
                .style(theme.text()),
        )
        .style(theme.text())
        .highlight_style(theme.selected());

    let mut state = ListState::default();
    state.select(Some(cursor));

    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    if area.is_empty() {
        return;
    }

    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    let left_widget = Paragraph::new(left_content)
        .style(theme.text_dim());

    let right_len = right_content.len() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content)
        .style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

/// Helper: Create a left-packed horizontal layout with given fixed widths
pub fn horizontal_row(area: Rect, widths: &[u16]) -> Vec<Rect> {
    let constraints: Vec<Constraint> = widths
        .iter()
        .map(|w| Constraint::Length(*w))
        .collect();

    Layout::horizontal(constraints)
        .flex(Flex::Start)
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_horizontal_row() {
        let area = Rect::new(0, 0, 100, 3);
        let cells = horizontal_row(area, &[10, 12, 10]);

        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].width, 10);
        assert_eq!(cells[1].x, 10);
        assert_eq!(cells[1].width, 12);
        assert_eq!(cells[2].x, 22);
        assert_eq!(cells[2].width, 10);
    }
}
