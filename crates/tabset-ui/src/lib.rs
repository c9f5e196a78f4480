//! # tabset-ui
//!
//! Settings tab manager and a terminal host for [`tabset_core`].
//!
//! - [`SettingsTabManager`] - Pages, the active page and tab switching
//! - [`Surface`] - Retained element tree implementing
//!   [`tabset_core::WidgetHost`]
//! - [`SettingsApp`] - Keyboard-driven coordinator drawing a `Surface`
//!   with ratatui
//! - [`widgets`] - [`TabBar`], [`SettingsView`] and [`StatusBar`]
//! - [`AppLayout`] - Screen regions
//!
//! ## Example
//!
//! ```
//! use tabset_core::{ElementAttrs, Message, WidgetHost};
//! use tabset_ui::{AppLayout, Surface};
//! use ratatui::prelude::Rect;
//!
//! let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
//! assert_eq!(layout.content.height, 22);
//!
//! let mut surface = Surface::new();
//! let root = surface.root();
//! let button = surface.create_child(root, "button", ElementAttrs::text("General"))?;
//! surface.on_click(button, Message::SwitchTab(0))?;
//! assert_eq!(surface.click(button)?, Some(Message::SwitchTab(0)));
//! # Ok::<(), tabset_core::CoreError>(())
//! ```

pub mod app;
pub mod renderer;
pub mod surface;
pub mod tab_manager;
pub mod widgets;

pub use app::{InputMode, SettingsApp};
pub use renderer::{popup_area, AppLayout};
pub use surface::{Control, Surface};
pub use tab_manager::SettingsTabManager;
pub use widgets::{Notice, NoticeKind, SettingsView, StatusBar, TabBar};
