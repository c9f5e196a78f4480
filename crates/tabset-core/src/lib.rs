//! # tabset-core
//!
//! Core traits and types for building tabbed settings screens.
//!
//! ## Overview
//!
//! A settings screen is a set of pages. Each page renders a handful of
//! setting bindings through a widget host. This crate holds everything
//! that does not depend on a particular host:
//!
//! - [`SettingBinding`] - Typed binding between a control and a value
//! - [`DropdownOptions`] - Key/value resolution for dropdowns
//! - [`SettingsTabPage`] - Trait for pages
//! - [`WidgetHost`] - What a toolkit must provide to draw controls
//! - [`SettingsStore`] - Load/save boundary for persisted settings
//! - [`LoggerRegistry`] - Named, leveled loggers
//! - [`Message`] / [`MessageBus`] - Events between widgets and the app
//! - [`Theme`] - Colour palettes
//! - [`CoreError`] - Error type for all of the above
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tabset_core::{Accessor, SettingBinding, SettingDescriptor};
//!
//! #[derive(Default)]
//! struct Settings {
//!     sync: bool,
//! }
//!
//! let settings = Rc::new(RefCell::new(Settings::default()));
//! let sync = SettingBinding::toggle(
//!     SettingDescriptor::new("Sync", "Synchronise across devices"),
//!     false,
//!     Accessor::field(&settings, |s| s.sync, |s, v| s.sync = v),
//! )
//! .on_change(|enabled| println!("sync is now {enabled}"));
//!
//! sync.set_value(true);
//! assert!(settings.borrow().sync);
//! ```

pub mod dropdown;
pub mod error;
pub mod event;
pub mod host;
pub mod logger;
pub mod page;
pub mod setting;
pub mod storage;
pub mod theme;

pub use dropdown::{DropdownOption, DropdownOptions};
pub use error::{CoreError, CoreResult};
pub use event::{Message, MessageBus};
pub use host::{ChangeHandler, ControlKind, ControlValue, ElementAttrs, ElementId, WidgetHost};
pub use logger::{LogLevel, Logger, LoggerRegistry};
pub use page::SettingsTabPage;
pub use setting::{
    display_settings, Accessor, Setting, SettingBinding, SettingDescriptor, SettingKind,
    SettingValue, SliderLimits,
};
pub use storage::{load_settings, save_settings, JsonFileStore, MemoryStore, SettingsStore};
pub use theme::{Theme, ThemeColors, ThemeName};
