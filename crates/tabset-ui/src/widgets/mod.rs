//! Terminal widgets for settings screens
//!
//! - [`TabBar`] - Page titles read from the manager's tab strip
//! - [`SettingsView`] - Controls of the active page, one row each
//! - [`StatusBar`] - Mode, latest [`Notice`] and key hints

pub mod settings_view;
pub mod status_bar;
pub mod tab_bar;

pub use settings_view::SettingsView;
pub use status_bar::{Notice, NoticeKind, StatusBar};
pub use tab_bar::TabBar;
