// Unit tests for user-registry
// These drive the controllers and the key handling through the public API,
// with in-memory fakes standing in for the HTTP-backed implementations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use user_registry_tui::api::test_data::TestDataSource;
use user_registry_tui::api::users::UserRepository;
use user_registry_tui::error::{ApiError, ApiResult, TransportError, UNKNOWN_ERROR_MESSAGE};
use user_registry_tui::model::{TestDataItem, UserDraft, UserField, UserRecord};
use user_registry_tui::service::UserService;

/// How the fake answers every call.
#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    FailStructured,
    FailUnknown,
}

struct FakeUserRepository {
    users: Mutex<Vec<UserRecord>>,
    next_id: AtomicUsize,
    behavior: Behavior,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl FakeUserRepository {
    fn new(users: Vec<UserRecord>, behavior: Behavior) -> Self {
        Self {
            next_id: AtomicUsize::new(users.len() + 1),
            users: Mutex::new(users),
            behavior,
            create_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    fn failure(&self, message: &str) -> ApiError {
        match self.behavior {
            Behavior::FailUnknown => ApiError::Unknown(message.to_string()),
            _ => TransportError::new(message, 400).into(),
        }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn create_user(&self, draft: &UserDraft) -> ApiResult<UserRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if !matches!(self.behavior, Behavior::Succeed) {
            return Err(self.failure("Error de API"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let record = UserRecord {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            birth_date: draft.birth_date.clone(),
            created_at: "2024-01-01T00:00:00Z".into(),
            age: 34,
        };
        self.users.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_users(&self) -> ApiResult<Vec<UserRecord>> {
        if !matches!(self.behavior, Behavior::Succeed) {
            return Err(self.failure("Error al cargar"));
        }
        Ok(self.users.lock().unwrap().clone())
    }

    async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if !matches!(self.behavior, Behavior::Succeed) {
            return Err(self.failure("Error al eliminar"));
        }
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

struct FakeTestData {
    calls: AtomicUsize,
}

#[async_trait]
impl TestDataSource for FakeTestData {
    async fn fetch_test_data(&self) -> ApiResult<Vec<TestDataItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![TestDataItem { name: "0".into(), id: Some(0) }])
    }
}

fn record(id: i64, name: &str, email: &str) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
        birth_date: "1990-01-01".to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        age: 34,
    }
}

fn seed() -> Vec<UserRecord> {
    vec![
        record(1, "Juan Pérez", "juan@example.com"),
        record(2, "María García", "maria@example.com"),
    ]
}

#[cfg(test)]
mod controller_tests {
    use super::*;
    use user_registry_tui::app::{FormEvent, UserFormController};

    fn controller(users: Vec<UserRecord>, behavior: Behavior) -> UserFormController<FakeUserRepository> {
        UserFormController::new(UserService::new(FakeUserRepository::new(users, behavior)))
    }

    fn fill(c: &mut UserFormController<FakeUserRepository>, name: &str, email: &str, birth: &str) {
        c.handle_input_change(UserField::Name, name);
        c.handle_input_change(UserField::Email, email);
        c.handle_input_change(UserField::BirthDate, birth);
    }

    #[tokio::test]
    async fn test_initialize_loads_server_list() {
        let mut c = controller(seed(), Behavior::Succeed);
        c.initialize().await;
        assert_eq!(c.state().users, seed());
        assert!(!c.state().is_loading);
        assert_eq!(c.state().api_error, None);
    }

    #[tokio::test]
    async fn test_submit_appends_server_record_and_resets_draft() {
        let mut c = controller(Vec::new(), Behavior::Succeed);
        fill(&mut c, "Ana", "ana@x.com", "1990-01-01");

        c.submit(&mut FormEvent::new()).await;

        let users = &c.state().users;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ana");
        assert_eq!(users[0].birth_date, "1990-01-01");
        assert_eq!(c.state().draft, UserDraft::new("", "", ""));
        assert!(c.state().errors.is_empty());
        assert!(!c.state().is_submitting);
    }

    #[tokio::test]
    async fn test_submit_failure_sets_api_error() {
        let mut c = controller(seed(), Behavior::FailStructured);
        fill(&mut c, "Ana", "ana@x.com", "1990-01-01");

        c.submit(&mut FormEvent::new()).await;

        assert_eq!(c.state().api_error.as_deref(), Some("Error de API"));
        assert!(c.state().users.is_empty());
        assert!(!c.state().is_submitting);
        assert_eq!(c.state().draft.email, "ana@x.com");
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_call() {
        let mut c = controller(Vec::new(), Behavior::Succeed);
        fill(&mut c, "", "test@example.com", "1990-01-01");

        c.submit(&mut FormEvent::new()).await;

        assert_eq!(c.service().repository().create_calls.load(Ordering::SeqCst), 0);
        assert!(c.state().errors.contains(UserField::Name));
    }

    #[tokio::test]
    async fn test_remove_preserves_order_of_others() {
        let mut users = seed();
        users.push(record(3, "Nuevo Usuario", "nuevo@example.com"));
        let mut c = controller(users, Behavior::Succeed);
        c.load_users().await;

        c.remove_user(1).await;

        let ids: Vec<i64> = c.state().users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_list() {
        let mut c = controller(Vec::new(), Behavior::FailStructured);
        c.finish_load(Ok(seed()));

        c.remove_user(1).await;

        assert_eq!(c.state().users.len(), 2);
        assert_eq!(c.state().api_error.as_deref(), Some("Error al eliminar"));
        assert_eq!(c.service().repository().delete_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_with_unknown_failure_uses_fixed_message() {
        let mut c = controller(seed(), Behavior::FailUnknown);
        c.load_users().await;
        assert_eq!(c.state().api_error.as_deref(), Some(UNKNOWN_ERROR_MESSAGE));
        assert!(!c.state().is_loading);
        assert!(c.state().users.is_empty());
    }

    #[tokio::test]
    async fn test_field_and_api_errors_coexist() {
        let mut c = controller(Vec::new(), Behavior::FailStructured);
        c.load_users().await;
        c.submit(&mut FormEvent::new()).await;
        // The submit cleared the API error; the load is redone to set it again.
        c.load_users().await;
        assert_eq!(c.state().errors.len(), 3);
        assert_eq!(c.state().api_error.as_deref(), Some("Error al cargar"));
    }

    #[test]
    fn test_stale_load_wins_over_earlier_removal() {
        let mut c = controller(Vec::new(), Behavior::Succeed);
        c.finish_load(Ok(seed()));

        c.begin_load();
        c.begin_remove();
        c.finish_remove(1, Ok(()));
        assert_eq!(c.state().users.len(), 1);
        // The load was answered before the delete reached the server.
        c.finish_load(Ok(seed()));
        assert_eq!(c.state().users.len(), 2);
    }
}

#[cfg(test)]
mod update_tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use user_registry_tui::app::update::{Command, Completion, activate_tab, apply_completion, handle_key};
    use user_registry_tui::app::{
        ActiveTab, AppState, TestDataController, Theme, UserFormController, UsersFocus,
    };

    type TestApp = AppState<FakeUserRepository, FakeTestData>;

    fn create_test_app(users: Vec<UserRecord>) -> TestApp {
        let users = UserFormController::new(UserService::new(FakeUserRepository::new(users, Behavior::Succeed)));
        let data = TestDataController::new(FakeTestData { calls: AtomicUsize::new(0) });
        AppState::new(users, data, Theme::dark())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut TestApp, s: &str) {
        for c in s.chars() {
            assert!(handle_key(app, key(KeyCode::Char(c))).is_empty());
        }
    }

    #[test]
    fn test_startup_activation_requests_one_load() {
        let mut app = create_test_app(Vec::new());
        assert_eq!(activate_tab(&mut app), vec![Command::LoadUsers]);
        assert!(app.users.state().is_loading);
        assert!(activate_tab(&mut app).is_empty());
    }

    #[test]
    fn test_typing_fills_the_focused_field() {
        let mut app = create_test_app(Vec::new());
        type_str(&mut app, "Ana");
        handle_key(&mut app, key(KeyCode::Down));
        type_str(&mut app, "ana@x.com");
        handle_key(&mut app, key(KeyCode::Down));
        type_str(&mut app, "1990-01-01x");
        handle_key(&mut app, key(KeyCode::Backspace));

        assert_eq!(app.users.state().draft, UserDraft::new("Ana", "ana@x.com", "1990-01-01"));
    }

    #[test]
    fn test_enter_with_valid_draft_emits_create() {
        let mut app = create_test_app(Vec::new());
        type_str(&mut app, "Ana");
        handle_key(&mut app, key(KeyCode::Down));
        type_str(&mut app, "ana@x.com");
        handle_key(&mut app, key(KeyCode::Down));
        type_str(&mut app, "1990-01-01");

        let cmds = handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(cmds, vec![Command::CreateUser(UserDraft::new("Ana", "ana@x.com", "1990-01-01"))]);
        assert!(app.users.state().is_submitting);
        // Disabled while the create is in flight.
        assert!(handle_key(&mut app, key(KeyCode::Enter)).is_empty());

        apply_completion(&mut app, Completion::UserCreated(Ok(record(5, "Ana", "ana@x.com"))));
        assert!(!app.users.state().is_submitting);
        assert_eq!(app.users.state().users.len(), 1);
        assert_eq!(app.users.state().draft, UserDraft::default());
    }

    #[test]
    fn test_enter_with_invalid_draft_focuses_first_error() {
        let mut app = create_test_app(Vec::new());
        handle_key(&mut app, key(KeyCode::Down));
        type_str(&mut app, "not-an-email");
        handle_key(&mut app, key(KeyCode::Down));

        assert!(handle_key(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(app.form_field, UserField::Name);
        assert_eq!(app.users.state().errors.len(), 3);
        assert!(!app.users.state().is_submitting);
    }

    #[test]
    fn test_list_delete_targets_selected_user() {
        let mut app = create_test_app(Vec::new());
        apply_completion(&mut app, Completion::UsersLoaded(Ok(seed())));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.users_focus, UsersFocus::List);

        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('d'))), vec![Command::RemoveUser(2)]);

        apply_completion(&mut app, Completion::UserRemoved(2, Ok(())));
        assert_eq!(app.users.state().users.len(), 1);
        assert_eq!(app.selected_user_index, 0);
    }

    #[test]
    fn test_delete_on_empty_list_does_nothing() {
        let mut app = create_test_app(Vec::new());
        app.users_focus = UsersFocus::List;
        assert!(handle_key(&mut app, key(KeyCode::Delete)).is_empty());
    }

    #[test]
    fn test_data_tab_fetches_on_first_visit_only() {
        let mut app = create_test_app(Vec::new());
        assert_eq!(handle_key(&mut app, key(KeyCode::Tab)), vec![Command::FetchTestData]);
        assert_eq!(app.active_tab, ActiveTab::Data);
        assert!(app.test_data.state().loading);

        apply_completion(
            &mut app,
            Completion::TestDataLoaded(Err(TransportError::new("connection refused", 0).into())),
        );
        assert_eq!(app.test_data.state().error.as_deref(), Some("connection refused"));

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(handle_key(&mut app, key(KeyCode::Tab)), Vec::new());
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('r'))), vec![Command::FetchTestData]);
        assert_eq!(app.test_data.state().error, None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app(Vec::new());
        type_str(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.users.state().draft.name, "q");

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_reload_from_list() {
        let mut app = create_test_app(Vec::new());
        app.users_focus = UsersFocus::List;
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('r'))), vec![Command::LoadUsers]);
        assert!(app.users.state().is_loading);
        apply_completion(&mut app, Completion::UsersLoaded(Err(ApiError::Unknown("x".into()))));
        assert!(!app.users.state().is_loading);
        assert_eq!(app.users.state().api_error.as_deref(), Some(UNKNOWN_ERROR_MESSAGE));
    }
}
