//! Demo data screen: loading indicator, error with retry hint, or the list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::{TestDataState, Theme};

pub fn render_test_data(f: &mut Frame, area: Rect, state: &TestDataState, theme: &Theme) {
    let block = Block::default()
        .title("Server data")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    if state.loading {
        let p = Paragraph::new("Loading data...").style(Style::default().fg(theme.muted)).block(block);
        f.render_widget(p, area);
        return;
    }

    if let Some(error) = &state.error {
        let p = Paragraph::new(vec![
            Line::styled(format!("Error: {error}"), Style::default().fg(theme.error)),
            Line::from(""),
            Line::styled("Press r to retry", Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        ])
        .wrap(Wrap { trim: false })
        .block(block);
        f.render_widget(p, area);
        return;
    }

    if state.data.is_empty() {
        let p = Paragraph::new("No data available").style(Style::default().fg(theme.muted)).block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = state
        .data
        .iter()
        .map(|item| ListItem::new(item.name.clone()).style(Style::default().fg(theme.text)))
        .collect();
    f.render_widget(List::new(items).block(block), area);
}
