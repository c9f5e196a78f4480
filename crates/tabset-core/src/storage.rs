//! Settings persistence
//!
//! A [`SettingsStore`] loads and saves the whole settings object as a
//! JSON value. [`load_settings`] layers whatever was persisted on top of
//! the type's defaults, so settings added in a newer version pick up
//! their default value instead of failing to load.

use crate::error::CoreResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

/// Load/save boundary with wherever settings are persisted.
pub trait SettingsStore {
    /// Returns the persisted settings object, or `None` on first run.
    fn load_data(&self) -> CoreResult<Option<Value>>;

    /// Persists the full settings object.
    fn save_data(&self, data: &Value) -> CoreResult<()>;
}

/// Loads settings, merging persisted keys over `S::default()`.
///
/// Persisted keys win; keys missing from the persisted object keep
/// their defaults. A persisted value that is not a JSON object is
/// ignored with a warning.
///
/// # Errors
///
/// Propagates store errors, and `CoreError::Json` if the merged object
/// does not deserialize into `S`.
pub fn load_settings<S, St>(store: &St) -> CoreResult<S>
where
    S: Serialize + DeserializeOwned + Default,
    St: SettingsStore + ?Sized,
{
    let mut merged = serde_json::to_value(S::default())?;

    match store.load_data()? {
        None | Some(Value::Null) => {}
        Some(Value::Object(persisted)) => {
            if let Value::Object(defaults) = &mut merged {
                for (key, value) in persisted {
                    defaults.insert(key, value);
                }
            } else {
                merged = Value::Object(persisted);
            }
        }
        Some(other) => {
            tracing::warn!(
                "persisted settings are not an object ({}), using defaults",
                json_type(&other)
            );
        }
    }

    Ok(serde_json::from_value(merged)?)
}

/// Saves the full settings object, not a delta.
pub fn save_settings<S, St>(store: &St, settings: &S) -> CoreResult<()>
where
    S: Serialize,
    St: SettingsStore + ?Sized,
{
    store.save_data(&serde_json::to_value(settings)?)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Stores settings as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load_data(&self) -> CoreResult<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save_data(&self, data: &Value) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, contents)?;
        tracing::debug!("saved settings to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store, mainly for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<Value>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `data`
    pub fn with_data(data: Value) -> Self {
        MemoryStore {
            data: RefCell::new(Some(data)),
            saves: Cell::new(0),
        }
    }

    /// The last saved (or seeded) value
    #[must_use]
    pub fn data(&self) -> Option<Value> {
        self.data.borrow().clone()
    }

    /// How many times `save_data` was called
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl SettingsStore for MemoryStore {
    fn load_data(&self) -> CoreResult<Option<Value>> {
        Ok(self.data.borrow().clone())
    }

    fn save_data(&self, data: &Value) -> CoreResult<()> {
        *self.data.borrow_mut() = Some(data.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
