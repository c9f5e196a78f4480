//! Settings page trait
//!
//! This module defines [`SettingsTabPage`], the unit a settings tab
//! manager switches between. A page knows its name and how to fill a
//! content area with setting controls; whether it is active is tracked
//! by the manager, not by the page.

use crate::error::CoreResult;
use crate::host::{ElementId, WidgetHost};

/// Builds the id slug of a page name.
///
/// The name is lowercased and every run of whitespace becomes a single
/// hyphen; leading and trailing whitespace is dropped.
///
/// # Example
///
/// ```
/// use tabset_core::page::slugify;
///
/// assert_eq!(slugify("General"), "general");
/// assert_eq!(slugify("Keyboard  Shortcuts"), "keyboard-shortcuts");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Trait that all settings pages implement.
///
/// Pages are used from the UI thread only, so there is no `Send + Sync`
/// requirement.
///
/// # Example
///
/// ```ignore
/// use tabset_core::{SettingsTabPage, WidgetHost, ElementId, CoreResult};
///
/// struct GeneralPage {
///     settings: Rc<RefCell<Settings>>,
/// }
///
/// impl SettingsTabPage for GeneralPage {
///     fn name(&self) -> &str { "General" }
///
///     fn display(&mut self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<()> {
///         enabled_binding(&self.settings).display(host, container)?;
///         Ok(())
///     }
/// }
/// ```
pub trait SettingsTabPage {
    /// Display name shown on the page's tab button.
    fn name(&self) -> &str;

    /// Stable id derived from the name.
    ///
    /// Ids must be unique within one manager.
    fn id(&self) -> String {
        slugify(self.name())
    }

    /// Called when the page becomes the active page.
    ///
    /// Use this for side effects such as logging or acquiring resources.
    fn on_activate(&mut self) {}

    /// Called when another page replaces this one, or the screen is hidden.
    fn on_deactivate(&mut self) {}

    /// Fills `container` with this page's settings.
    ///
    /// Called on every activation with an emptied container, so pages
    /// can rebuild their bindings from scratch each time.
    fn display(&mut self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedPage {
        name: String,
        activations: u32,
    }

    impl SettingsTabPage for NamedPage {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_activate(&mut self) {
            self.activations += 1;
        }

        fn display(&mut self, _host: &mut dyn WidgetHost, _container: ElementId) -> CoreResult<()> {
            Ok(())
        }
    }

    fn page(name: &str) -> NamedPage {
        NamedPage {
            name: name.to_string(),
            activations: 0,
        }
    }

    #[test]
    fn test_slugify_lowercases() {
        assert_eq!(slugify("Performance"), "performance");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("  Key \t Bindings\n"), "key-bindings");
    }

    #[test]
    fn test_slugify_keeps_punctuation() {
        assert_eq!(slugify("Sync & Backup"), "sync-&-backup");
    }

    #[test]
    fn test_default_id_is_slug_of_name() {
        assert_eq!(page("Advanced Options").id(), "advanced-options");
    }

    #[test]
    fn test_default_deactivate_is_noop() {
        let mut p = page("General");
        p.on_deactivate();
        assert_eq!(p.activations, 0);
        p.on_activate();
        assert_eq!(p.activations, 1);
    }

    #[test]
    fn test_page_trait_is_object_safe() {
        fn accept_page(_page: &dyn SettingsTabPage) {}
        accept_page(&page("General"));
    }
}
