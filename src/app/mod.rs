//! Application state types and entry glue.
//!
//! [`AppState`] pairs the two controllers with the view-only state the
//! terminal front end needs (active tab, focus, selection, theme). The event
//! loop lives in [`update`] and is re-exported as `run`.
//!
pub mod controller;
pub mod test_data;
pub mod update;

use std::path::Path;
use std::time::Instant;

use ratatui::style::Color;

use crate::api::test_data::TestDataSource;
use crate::api::users::UserRepository;
use crate::model::UserField;

pub use controller::{FormEvent, UserFormController, UserFormState};
pub use test_data::{TestDataController, TestDataState};

/// Top-level active tab in the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveTab {
    Users,
    Data,
}

/// Which half of the Users screen receives keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UsersFocus {
    Form,
    List,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

const THEME_KEYS: [&str; 11] = [
    "text",
    "muted",
    "title",
    "border",
    "header_bg",
    "header_fg",
    "status_bg",
    "status_fg",
    "highlight_fg",
    "highlight_bg",
    "error",
];

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha. Default when no theme file exists.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "error" => &mut self.error,
            _ => return None,
        })
    }

    /// Parse `key = color` lines over the `mocha` defaults.
    /// Comments, unknown keys and unparsable colors are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (Some(slot), Ok(color)) = (theme.slot(key.trim()), value.trim().parse::<Color>()) else {
                tracing::debug!(line, "ignoring theme line");
                continue;
            };
            *slot = color;
        }
        theme
    }

    pub fn to_config_string(&self) -> String {
        let mut copy = *self;
        let mut out = String::from("# user-registry theme\n# Colors: #RRGGBB, a color name, or 'reset'\n\n");
        for key in THEME_KEYS {
            if let Some(color) = copy.slot(key) {
                out.push_str(&format!("{key} = {color}\n"));
            }
        }
        out
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        std::fs::read_to_string(path).map(|contents| Self::parse(&contents))
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_config_string())
    }

    /// Load `path`, or write the defaults there when it does not exist yet.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "unreadable theme file, using defaults");
                Self::mocha()
            });
        }
        let theme = Self::mocha();
        if let Err(err) = theme.write_file(path) {
            tracing::warn!(path = %path.display(), %err, "could not write default theme");
        }
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

pub struct AppState<R: UserRepository, S: TestDataSource> {
    pub started_at: Instant,
    pub active_tab: ActiveTab,
    pub users_focus: UsersFocus,
    pub form_field: UserField,
    pub selected_user_index: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub should_quit: bool,
    pub users: UserFormController<R>,
    pub test_data: TestDataController<S>,
}

impl<R: UserRepository, S: TestDataSource> AppState<R, S> {
    pub fn new(users: UserFormController<R>, test_data: TestDataController<S>, theme: Theme) -> Self {
        Self {
            started_at: Instant::now(),
            active_tab: ActiveTab::Users,
            users_focus: UsersFocus::Form,
            form_field: UserField::Name,
            selected_user_index: 0,
            rows_per_page: 10,
            theme,
            should_quit: false,
            users,
            test_data,
        }
    }

    /// Keep the list selection inside the current list.
    pub fn clamp_selection(&mut self) {
        let len = self.users.state().users.len();
        self.selected_user_index = self.selected_user_index.min(len.saturating_sub(1));
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
