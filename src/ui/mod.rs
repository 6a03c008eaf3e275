pub mod components;
pub mod data;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::test_data::TestDataSource;
use crate::api::users::UserRepository;
use crate::app::{ActiveTab, AppState};

pub fn render<R: UserRepository, S: TestDataSource>(f: &mut Frame, app: &mut AppState<R, S>) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());

    let tabs = match app.active_tab {
        ActiveTab::Users => "[Users]  Data",
        ActiveTab::Data => "Users  [Data]",
    };
    let header = Paragraph::new(format!("User management  {tabs}  Tab: switch tab; Ctrl-C: quit"))
        .block(
            Block::default()
                .title("user-registry")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(header, root[0]);

    match app.active_tab {
        ActiveTab::Users => render_users_tab(f, root[1], app),
        ActiveTab::Data => data::render_test_data(f, root[1], app.test_data.state(), &app.theme),
    }

    components::render_status_bar(f, root[2], app);
}

fn render_users_tab<R: UserRepository, S: TestDataSource>(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState<R, S>,
) {
    let banner_height = if app.users.state().api_error.is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(5)])
        .split(area);
    if let Some(message) = &app.users.state().api_error {
        components::render_error_banner(f, rows[0], message, &app.theme);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);
    users::render_user_form(f, body[0], app);
    users::render_user_list(f, body[1], app);
}
