use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::api::test_data::TestDataSource;
use crate::api::users::UserRepository;
use crate::app::{AppState, UsersFocus};
use crate::model::UserField;
use crate::ui::components::{format_birth_date, format_registered};

/// Input boxes for the draft, each followed by its validation message.
pub fn render_user_form<R: UserRepository, S: TestDataSource>(f: &mut Frame, area: Rect, app: &AppState<R, S>) {
    let state = app.users.state();
    let focused = app.users_focus == UsersFocus::Form;
    let outer = Block::default()
        .title("Add new user")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { app.theme.title } else { app.theme.border }));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    for (idx, field) in UserField::ALL.into_iter().enumerate() {
        let active = focused && app.form_field == field;
        let error = state.errors.get(field);
        let slot = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(rows[idx]);

        let border = if error.is_some() {
            app.theme.error
        } else if active {
            app.theme.highlight_fg
        } else {
            app.theme.border
        };
        let mut value = state.draft.get(field).to_string();
        if active {
            value.push('▏');
        }
        let input = Paragraph::new(value)
            .style(Style::default().fg(app.theme.text))
            .block(Block::default().title(field.label()).borders(Borders::ALL).border_style(Style::default().fg(border)));
        f.render_widget(input, slot[0]);

        if let Some(message) = error {
            f.render_widget(Paragraph::new(message).style(Style::default().fg(app.theme.error)), slot[1]);
        }
    }

    let (label, style) = if state.is_submitting {
        ("[ Adding... ]", Style::default().fg(app.theme.muted))
    } else {
        ("[ Add user ]  (Enter)", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
    };
    f.render_widget(Paragraph::new(label).style(style), rows[3]);
}

/// Registered users: loading indicator, empty state, or a paged table.
pub fn render_user_list<R: UserRepository, S: TestDataSource>(f: &mut Frame, area: Rect, app: &mut AppState<R, S>) {
    let focused = app.users_focus == UsersFocus::List;
    let users = &app.users.state().users;
    let block = Block::default()
        .title(format!("Registered users ({})", users.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { app.theme.title } else { app.theme.border }));

    if app.users.state().is_loading {
        let p = Paragraph::new("Loading data...").style(Style::default().fg(app.theme.muted)).block(block);
        f.render_widget(p, area);
        return;
    }
    if users.is_empty() {
        let p = Paragraph::new(vec![
            Line::from("No users registered"),
            Line::from(Span::styled(
                "Add a user with the form on the left",
                Style::default().fg(app.theme.muted),
            )),
        ])
        .style(Style::default().fg(app.theme.text))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    let users = &app.users.state().users;
    let selected = app.selected_user_index.min(users.len() - 1);
    let start = (selected / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(users.len());

    let rows = users[start..end].iter().enumerate().map(|(i, u)| {
        let style = if focused && start + i == selected {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(format_birth_date(&u.birth_date)),
            Cell::from(u.age.to_string()),
            Cell::from(format_registered(&u.created_at)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(24),
        Constraint::Percentage(32),
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(12),
    ];
    let header = Row::new(vec!["NAME", "EMAIL", "BIRTH DATE", "AGE", "REGISTERED"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));
    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}
