//! Persisted settings and the bindings that edit them

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tabset_core::{
    Accessor, CoreResult, DropdownOption, DropdownOptions, LogLevel, Message, MessageBus, Setting,
    SettingBinding, SettingDescriptor, SettingValue, SliderLimits, ThemeName,
};

/// Persisted option keys, so a key of a removed option still loads.
type OptionKey = String;

/// Settings shared by every page
pub type SharedSettings = Rc<RefCell<DemoSettings>>;

/// How eagerly changes are pushed to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Manual,
    OnSave,
    Continuous,
}

impl SyncMode {
    pub fn options() -> CoreResult<DropdownOptions<SyncMode>> {
        DropdownOptions::new(vec![
            DropdownOption::new("manual", "Manual", SyncMode::Manual),
            DropdownOption::new("onsave", "On save", SyncMode::OnSave),
            DropdownOption::new("continuous", "Continuous", SyncMode::Continuous),
        ])
    }
}

/// Everything the settings screen persists
///
/// Dropdown choices are stored as their option keys. A key that no
/// longer names an option loads unchanged; the control shows the first
/// option and the key is kept until the user picks another one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub sync_enabled: bool,
    pub sync_mode: OptionKey,
    pub theme: OptionKey,
    pub sync_interval: f64,
    pub cache_size_mb: f64,
    pub server_url: String,
    pub notes: String,
    pub log_level: OptionKey,
}

impl Default for DemoSettings {
    fn default() -> Self {
        DemoSettings {
            sync_enabled: true,
            sync_mode: "manual".to_string(),
            theme: ThemeName::default().key().to_string(),
            sync_interval: 30.0,
            cache_size_mb: 256.0,
            server_url: String::new(),
            notes: String::new(),
            log_level: LogLevel::Info.to_string(),
        }
    }
}

impl DemoSettings {
    /// Theme to draw with; unknown keys fall back to the default theme.
    pub fn theme_name(&self) -> ThemeName {
        resolve(ThemeName::options(), &self.theme).unwrap_or_default()
    }

    /// Level for the logger registry; unknown keys fall back to info.
    pub fn logger_level(&self) -> LogLevel {
        resolve(LogLevel::options(), &self.log_level).unwrap_or_default()
    }
}

fn resolve<T: Clone>(options: CoreResult<DropdownOptions<T>>, key: &str) -> Option<T> {
    options.ok()?.value_for_key(key).ok()
}

/// Options whose bound values are their own keys
fn keyed<T>(options: DropdownOptions<T>) -> CoreResult<DropdownOptions<OptionKey>> {
    DropdownOptions::new(options.iter().map(|option| {
        DropdownOption::new(option.key.clone(), option.label.clone(), option.key.clone())
    }))
}

/// Builds the observer every binding uses: announce the change on the bus.
fn announce<T: 'static>(bus: &MessageBus, name: &str) -> impl Fn(&T) + 'static {
    let bus = bus.clone();
    let name = name.to_string();
    move |_| {
        // The event loop persists on SettingsChanged; nobody listening is fine.
        let _ = bus.send(Message::settings_changed(name.clone()));
    }
}

fn named<T: SettingValue>(binding: SettingBinding<T>, bus: &MessageBus) -> Box<dyn Setting> {
    let observer = announce::<T>(bus, binding.descriptor().name());
    Box::new(binding.on_change(observer))
}

pub fn general_bindings(
    settings: &SharedSettings,
    bus: &MessageBus,
) -> CoreResult<Vec<Box<dyn Setting>>> {
    let defaults = DemoSettings::default();
    Ok(vec![
        named(
            SettingBinding::toggle(
                SettingDescriptor::new("Sync", "Synchronise settings with the server"),
                defaults.sync_enabled,
                Accessor::field(settings, |s| s.sync_enabled, |s, v| s.sync_enabled = v),
            ),
            bus,
        ),
        named(
            SettingBinding::dropdown(
                SettingDescriptor::new("Sync mode", "When changes are pushed"),
                keyed(SyncMode::options()?)?,
                defaults.sync_mode,
                Accessor::field(settings, |s| s.sync_mode.clone(), |s, v| s.sync_mode = v),
            ),
            bus,
        ),
        named(
            SettingBinding::dropdown(
                SettingDescriptor::new("Theme", "Colour palette of this screen"),
                keyed(ThemeName::options()?)?,
                defaults.theme,
                Accessor::field(settings, |s| s.theme.clone(), |s, v| s.theme = v),
            ),
            bus,
        ),
    ])
}

pub fn performance_bindings(
    settings: &SharedSettings,
    bus: &MessageBus,
) -> CoreResult<Vec<Box<dyn Setting>>> {
    let defaults = DemoSettings::default();
    Ok(vec![
        named(
            SettingBinding::slider(
                SettingDescriptor::new("Sync interval", "Seconds between background syncs"),
                SliderLimits::new(5.0, 300.0, 5.0)?,
                defaults.sync_interval,
                Accessor::field(settings, |s| s.sync_interval, |s, v| s.sync_interval = v),
            ),
            bus,
        ),
        named(
            SettingBinding::slider(
                SettingDescriptor::new("Cache size", "Megabytes kept on disk"),
                SliderLimits::new(64.0, 2048.0, 64.0)?,
                defaults.cache_size_mb,
                Accessor::field(settings, |s| s.cache_size_mb, |s, v| s.cache_size_mb = v),
            ),
            bus,
        ),
    ])
}

pub fn advanced_bindings(
    settings: &SharedSettings,
    bus: &MessageBus,
) -> CoreResult<Vec<Box<dyn Setting>>> {
    let defaults = DemoSettings::default();
    Ok(vec![
        named(
            SettingBinding::text(
                SettingDescriptor::new("Server URL", "Leave empty to use the default server"),
                defaults.server_url,
                Accessor::field(
                    settings,
                    |s| s.server_url.clone(),
                    |s, v| s.server_url = v,
                ),
            )
            .with_placeholder("https://sync.example.com"),
            bus,
        ),
        named(
            SettingBinding::text_area(
                SettingDescriptor::new("Notes", ""),
                defaults.notes,
                Accessor::field(settings, |s| s.notes.clone(), |s, v| s.notes = v),
            )
            .with_placeholder("Anything worth remembering"),
            bus,
        ),
        named(
            SettingBinding::dropdown(
                SettingDescriptor::new("Log level", "Verbosity of the log file"),
                keyed(LogLevel::options()?)?,
                defaults.log_level,
                Accessor::field(settings, |s| s.log_level.clone(), |s, v| s.log_level = v),
            ),
            bus,
        ),
    ])
}

/// Every binding of every page, in page order
pub fn all_bindings(
    settings: &SharedSettings,
    bus: &MessageBus,
) -> CoreResult<Vec<Box<dyn Setting>>> {
    let mut all = general_bindings(settings, bus)?;
    all.extend(performance_bindings(settings, bus)?);
    all.extend(advanced_bindings(settings, bus)?);
    Ok(all)
}

/// Restores every setting to its default, notifying as each one changes.
pub fn reset_all(settings: &SharedSettings, bus: &MessageBus) -> CoreResult<()> {
    for binding in all_bindings(settings, bus)? {
        binding.reset();
    }
    Ok(())
}
