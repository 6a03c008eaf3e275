//! Event loop: key handling, background requests and folding their results
//! back into controller state.
//!
//! Keys mutate state synchronously and may yield [`Command`]s. Each command
//! runs on the tokio runtime; its [`Completion`] comes back over a channel and
//! is applied on the next tick. Nothing is cancelled: a late completion is
//! applied over whatever happened in between.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::api::test_data::TestDataSource;
use crate::api::users::UserRepository;
use crate::app::{ActiveTab, AppState, FormEvent, UsersFocus};
use crate::error::ApiResult;
use crate::model::{TestDataItem, UserDraft, UserRecord};
use crate::ui;

/// Network work requested by a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    LoadUsers,
    CreateUser(UserDraft),
    RemoveUser(i64),
    FetchTestData,
}

/// Outcome of a [`Command`].
#[derive(Debug)]
pub enum Completion {
    UsersLoaded(ApiResult<Vec<UserRecord>>),
    UserCreated(ApiResult<UserRecord>),
    UserRemoved(i64, ApiResult<()>),
    TestDataLoaded(ApiResult<Vec<TestDataItem>>),
}

pub fn run_app<R, S>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState<R, S>,
    runtime: &Handle,
) -> Result<()>
where
    R: UserRepository + 'static,
    S: TestDataSource + 'static,
{
    let (tx, mut rx) = unbounded_channel();

    for cmd in activate_tab(app) {
        dispatch(runtime, app, cmd, tx.clone());
    }

    loop {
        drain_completions(app, &mut rx);

        terminal.draw(|f| ui::render(f, app))?;
        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    for cmd in handle_key(app, key) {
                        dispatch(runtime, app, cmd, tx.clone());
                    }
                }
            }
        }
    }

    // Dropping the receiver here makes in-flight tasks discard their results.
    tracing::info!(uptime = ?app.started_at.elapsed(), "leaving event loop");
    Ok(())
}

/// Apply every completion that has arrived so far.
pub fn drain_completions<R: UserRepository, S: TestDataSource>(
    app: &mut AppState<R, S>,
    rx: &mut UnboundedReceiver<Completion>,
) {
    while let Ok(done) = rx.try_recv() {
        apply_completion(app, done);
    }
}

/// First visit of the active tab owes its initial load.
pub fn activate_tab<R: UserRepository, S: TestDataSource>(app: &mut AppState<R, S>) -> Vec<Command> {
    match app.active_tab {
        ActiveTab::Users if app.users.activate() => {
            app.users.begin_load();
            vec![Command::LoadUsers]
        }
        ActiveTab::Data if app.test_data.activate() => {
            app.test_data.begin_fetch();
            vec![Command::FetchTestData]
        }
        _ => Vec::new(),
    }
}

pub fn apply_completion<R: UserRepository, S: TestDataSource>(app: &mut AppState<R, S>, done: Completion) {
    match done {
        Completion::UsersLoaded(result) => app.users.finish_load(result),
        Completion::UserCreated(result) => app.users.finish_submit(result),
        Completion::UserRemoved(id, result) => app.users.finish_remove(id, result),
        Completion::TestDataLoaded(result) => app.test_data.finish_fetch(result),
    }
    app.clamp_selection();
}

pub fn handle_key<R: UserRepository, S: TestDataSource>(app: &mut AppState<R, S>, key: KeyEvent) -> Vec<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Vec::new();
    }
    if key.code == KeyCode::Tab {
        app.active_tab = match app.active_tab {
            ActiveTab::Users => ActiveTab::Data,
            ActiveTab::Data => ActiveTab::Users,
        };
        return activate_tab(app);
    }

    match (app.active_tab, app.users_focus) {
        (ActiveTab::Users, UsersFocus::Form) => handle_form_key(app, key),
        (ActiveTab::Users, UsersFocus::List) => handle_list_key(app, key),
        (ActiveTab::Data, _) => handle_data_key(app, key),
    }
}

fn handle_form_key<R: UserRepository, S: TestDataSource>(app: &mut AppState<R, S>, key: KeyEvent) -> Vec<Command> {
    let field = app.form_field;
    match key.code {
        KeyCode::Esc | KeyCode::BackTab => app.users_focus = UsersFocus::List,
        KeyCode::Up => app.form_field = field.prev(),
        KeyCode::Down => app.form_field = field.next(),
        KeyCode::Backspace => app.users.pop_char(field),
        // The submit button is disabled while a create is in flight.
        KeyCode::Enter if !app.users.state().is_submitting => {
            let mut event = FormEvent::new();
            if let Some(draft) = app.users.begin_submit(&mut event) {
                return vec![Command::CreateUser(draft)];
            }
            if let Some((first, _)) = app.users.state().errors.iter().next() {
                app.form_field = first;
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.users.push_char(field, c),
        _ => {}
    }
    Vec::new()
}

fn handle_list_key<R: UserRepository, S: TestDataSource>(app: &mut AppState<R, S>, key: KeyEvent) -> Vec<Command> {
    let len = app.users.state().users.len();
    let rpp = app.rows_per_page.max(1);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::BackTab | KeyCode::Char('i') => app.users_focus = UsersFocus::Form,
        KeyCode::Up | KeyCode::Char('k') => app.selected_user_index = app.selected_user_index.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => {
            if app.selected_user_index + 1 < len {
                app.selected_user_index += 1;
            }
        }
        KeyCode::Left | KeyCode::Char('h') => app.selected_user_index = app.selected_user_index.saturating_sub(rpp),
        KeyCode::Right | KeyCode::Char('l') => {
            app.selected_user_index = app.selected_user_index.saturating_add(rpp).min(len.saturating_sub(1));
        }
        KeyCode::Char('r') => {
            app.users.begin_load();
            return vec![Command::LoadUsers];
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.users.state().users.get(app.selected_user_index).map(|u| u.id) {
                app.users.begin_remove();
                return vec![Command::RemoveUser(id)];
            }
        }
        _ => {}
    }
    Vec::new()
}

fn handle_data_key<R: UserRepository, S: TestDataSource>(app: &mut AppState<R, S>, key: KeyEvent) -> Vec<Command> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('r') => {
            app.test_data.begin_fetch();
            return vec![Command::FetchTestData];
        }
        _ => {}
    }
    Vec::new()
}

/// Run `cmd` on the runtime and report its completion on `tx`.
pub fn dispatch<R, S>(runtime: &Handle, app: &AppState<R, S>, cmd: Command, tx: UnboundedSender<Completion>)
where
    R: UserRepository + 'static,
    S: TestDataSource + 'static,
{
    tracing::debug!(?cmd, "dispatching");
    match cmd {
        Command::LoadUsers => {
            let service = app.users.service().clone();
            runtime.spawn(async move {
                deliver(&tx, Completion::UsersLoaded(service.get_users().await));
            });
        }
        Command::CreateUser(draft) => {
            let service = app.users.service().clone();
            runtime.spawn(async move {
                deliver(&tx, Completion::UserCreated(service.create_user(&draft).await));
            });
        }
        Command::RemoveUser(id) => {
            let service = app.users.service().clone();
            runtime.spawn(async move {
                deliver(&tx, Completion::UserRemoved(id, service.delete_user(id).await));
            });
        }
        Command::FetchTestData => {
            let source = app.test_data.source();
            runtime.spawn(async move {
                deliver(&tx, Completion::TestDataLoaded(source.fetch_test_data().await));
            });
        }
    }
}

fn deliver(tx: &UnboundedSender<Completion>, done: Completion) {
    if tx.send(done).is_err() {
        tracing::debug!("event loop gone, dropping result");
    }
}
