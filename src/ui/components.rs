//! Shared UI components (status bar, error banner) and display formatting.
//!
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::test_data::TestDataSource;
use crate::api::users::UserRepository;
use crate::app::{ActiveTab, AppState, Theme, UsersFocus};

/// Render the bottom status bar with focus, counts and the keys that apply.
pub fn render_status_bar<R: UserRepository, S: TestDataSource>(f: &mut Frame, area: Rect, app: &AppState<R, S>) {
    let users = app.users.state();
    let (mode, keys) = match (app.active_tab, app.users_focus) {
        (ActiveTab::Users, UsersFocus::Form) => ("FORM", "Up/Down: field; Enter: add; Esc: list"),
        (ActiveTab::Users, UsersFocus::List) => ("LIST", "j/k: select; d: delete; r: reload; Shift-Tab: form; q: quit"),
        (ActiveTab::Data, _) => ("DATA", "r: retry; q: quit"),
    };
    let mut flags = Vec::new();
    if users.is_loading || app.test_data.state().loading {
        flags.push("loading");
    }
    if users.is_submitting {
        flags.push("submitting");
    }
    let flags = if flags.is_empty() { String::new() } else { format!("  [{}]", flags.join(",")) };
    let msg = format!("mode: {mode}  users:{}{flags}  {keys}", users.users.len());
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// The single API error line shown above the form and list.
pub fn render_error_banner(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let p = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error)),
        );
    f.render_widget(p, area);
}

/// `1990-01-31` → `31/01/1990`; anything else is shown as sent.
pub fn format_birth_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Day of registration as `d/m/yyyy`. Accepts RFC 3339 or a naive timestamp.
pub fn format_registered(raw: &str) -> String {
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(d) => d.format("%-d/%-m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
