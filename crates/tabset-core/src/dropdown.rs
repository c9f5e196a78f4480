//! Dropdown options and key resolution
//!
//! A dropdown control only knows option keys. [`DropdownOptions`]
//! translates between those keys and the bound values in both
//! directions.

use crate::error::{CoreError, CoreResult};
use std::collections::HashSet;

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption<T> {
    /// Stable identifier reported by the control
    pub key: String,
    /// Text shown to the user
    pub label: String,
    /// Value written to the bound setting when selected
    pub value: T,
}

impl<T> DropdownOption<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: T) -> Self {
        DropdownOption {
            key: key.into(),
            label: label.into(),
            value,
        }
    }
}

/// Ordered dropdown options with unique keys
///
/// # Example
///
/// ```
/// use tabset_core::{DropdownOption, DropdownOptions};
///
/// let options = DropdownOptions::new(vec![
///     DropdownOption::new("low", "Low", 1),
///     DropdownOption::new("high", "High", 10),
/// ])?;
///
/// assert_eq!(options.key_for_value(&10), Some("high"));
/// assert_eq!(options.key_for_value(&99), Some("low"));
/// assert_eq!(options.value_for_key("low")?, 1);
/// # Ok::<(), tabset_core::CoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOptions<T> {
    options: Vec<DropdownOption<T>>,
}

impl<T> DropdownOptions<T> {
    /// Builds the option list, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateOptionKey` if two options share a key.
    pub fn new(options: impl IntoIterator<Item = DropdownOption<T>>) -> CoreResult<Self> {
        let options: Vec<_> = options.into_iter().collect();
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.key.as_str()) {
                return Err(CoreError::DuplicateOptionKey(option.key.clone()));
            }
        }
        Ok(DropdownOptions { options })
    }

    /// Options in display order
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, DropdownOption<T>> {
        self.options.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<T: PartialEq> DropdownOptions<T> {
    /// Returns the key of the first option holding `value`.
    ///
    /// Falls back to the first option's key when no option matches, and
    /// to `None` only when there are no options at all. The fallback is
    /// for display: callers decide whether to write it back.
    #[must_use]
    pub fn key_for_value(&self, value: &T) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == *value)
            .or_else(|| self.options.first())
            .map(|option| option.key.as_str())
    }

    /// Whether some option holds exactly `value`
    #[must_use]
    pub fn contains_value(&self, value: &T) -> bool {
        self.options.iter().any(|option| option.value == *value)
    }
}

impl<T: Clone> DropdownOptions<T> {
    /// Returns the value of the option with key `key`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownOptionKey` if no option has that key.
    pub fn value_for_key(&self, key: &str) -> CoreResult<T> {
        self.options
            .iter()
            .find(|option| option.key == key)
            .map(|option| option.value.clone())
            .ok_or_else(|| CoreError::UnknownOptionKey(key.to_string()))
    }
}

impl<'a, T> IntoIterator for &'a DropdownOptions<T> {
    type Item = &'a DropdownOption<T>;
    type IntoIter = std::slice::Iter<'a, DropdownOption<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
