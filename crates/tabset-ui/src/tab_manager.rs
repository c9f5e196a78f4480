//! Tab management for settings screens
//!
//! The [`SettingsTabManager`] owns an ordered set of pages, draws one
//! button per page into a tab strip and shows the active page in a
//! content region. Exactly one page is active once the manager has been
//! displayed.
//!
//! # Example
//!
//! ```
//! use tabset_core::{CoreResult, ElementAttrs, ElementId, SettingsTabPage, WidgetHost};
//! use tabset_ui::{SettingsTabManager, Surface};
//!
//! struct AboutPage;
//!
//! impl SettingsTabPage for AboutPage {
//!     fn name(&self) -> &str {
//!         "About"
//!     }
//!
//!     fn display(&mut self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<()> {
//!         host.create_child(container, "p", ElementAttrs::text("tabset"))?;
//!         Ok(())
//!     }
//! }
//!
//! let mut surface = Surface::new();
//! let root = surface.root();
//! let mut manager = SettingsTabManager::new();
//! manager.add_tab(Box::new(AboutPage))?;
//! manager.display(&mut surface, root)?;
//!
//! assert_eq!(manager.active_id().as_deref(), Some("about"));
//! # Ok::<(), tabset_core::CoreError>(())
//! ```

use std::collections::HashSet;

use tabset_core::{
    CoreError, CoreResult, ElementAttrs, ElementId, Message, SettingsTabPage, WidgetHost,
};

/// Class of the region holding the tab buttons
pub const TAB_STRIP_CLASS: &str = "settings-tab-strip";
/// Class of the region holding the active page
pub const CONTENT_CLASS: &str = "settings-tab-content";
/// Class of every tab button
pub const TAB_BUTTON_CLASS: &str = "settings-tab";
/// Class carried by the active page's button only
pub const ACTIVE_CLASS: &str = "is-active";

struct PageEntry {
    page: Box<dyn SettingsTabPage>,
    id: String,
    active: bool,
    button: Option<ElementId>,
}

#[derive(Debug, Clone, Copy)]
struct Regions {
    tab_strip: ElementId,
    content: ElementId,
}

/// Manages the pages of one settings screen.
///
/// Pages are registered with [`add_tab`](Self::add_tab) before the first
/// [`display`](Self::display); the registry is append-only. Switching is
/// driven either directly ([`set_active_tab`](Self::set_active_tab)) or by
/// routing messages emitted by the tab buttons through
/// [`handle_message`](Self::handle_message).
pub struct SettingsTabManager {
    pages: Vec<PageEntry>,
    active: Option<usize>,
    pending: Option<usize>,
    regions: Option<Regions>,
}

impl SettingsTabManager {
    #[must_use]
    pub fn new() -> Self {
        SettingsTabManager {
            pages: Vec::new(),
            active: None,
            pending: None,
            regions: None,
        }
    }

    /// Registers a page and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::TabsAlreadyDisplayed` once the manager has been
    /// displayed, and `CoreError::DuplicateTabId` if a page with the same
    /// id is already registered.
    pub fn add_tab(&mut self, page: Box<dyn SettingsTabPage>) -> CoreResult<usize> {
        if self.regions.is_some() {
            return Err(CoreError::TabsAlreadyDisplayed);
        }
        let id = page.id();
        if self.pages.iter().any(|entry| entry.id == id) {
            return Err(CoreError::DuplicateTabId(id));
        }

        let index = self.pages.len();
        tracing::debug!("registered settings page {} at {}", id, index);
        self.pages.push(PageEntry {
            page,
            id,
            active: false,
            button: None,
        });
        Ok(index)
    }

    /// Registers several pages in order.
    ///
    /// Either every page is registered or none is.
    ///
    /// # Errors
    ///
    /// Same as [`add_tab`](Self::add_tab), checked for the whole batch
    /// before anything is registered.
    pub fn add_tabs(
        &mut self,
        pages: impl IntoIterator<Item = Box<dyn SettingsTabPage>>,
    ) -> CoreResult<()> {
        if self.regions.is_some() {
            return Err(CoreError::TabsAlreadyDisplayed);
        }
        let pages: Vec<Box<dyn SettingsTabPage>> = pages.into_iter().collect();

        let mut seen: HashSet<String> = self.pages.iter().map(|e| e.id.clone()).collect();
        for page in &pages {
            let id = page.id();
            if !seen.insert(id.clone()) {
                return Err(CoreError::DuplicateTabId(id));
            }
        }

        for page in pages {
            self.add_tab(page)?;
        }
        Ok(())
    }

    /// Renders the tab strip and the active page into `container`.
    ///
    /// The container is emptied first. The page requested with
    /// [`set_active_tab`](Self::set_active_tab) before this call is
    /// activated, otherwise the first page.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoTabsRegistered` without touching the host
    /// when no page is registered. Host and page errors are propagated.
    pub fn display(&mut self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<()> {
        if self.pages.is_empty() {
            return Err(CoreError::NoTabsRegistered);
        }

        host.empty(container)?;
        let tab_strip = host.create_child(container, "nav", ElementAttrs::class(TAB_STRIP_CLASS))?;
        let content = host.create_child(container, "div", ElementAttrs::class(CONTENT_CLASS))?;

        for (index, entry) in self.pages.iter_mut().enumerate() {
            let button = host.create_child(
                tab_strip,
                "button",
                ElementAttrs::text(entry.page.name()).with_class(TAB_BUTTON_CLASS),
            )?;
            host.on_click(button, Message::SwitchTab(index))?;
            entry.button = Some(button);
        }

        self.regions = Some(Regions { tab_strip, content });
        let first = self.pending.take().unwrap_or(0);
        self.activate_tab(host, first)
    }

    /// Makes the page at `index` the active page and renders it.
    fn activate_tab(&mut self, host: &mut dyn WidgetHost, index: usize) -> CoreResult<()> {
        let Some(regions) = self.regions else {
            self.pending = Some(index);
            return Ok(());
        };

        if let Some(current) = self.active.filter(|&current| current != index) {
            let previous = &mut self.pages[current];
            previous.active = false;
            previous.page.on_deactivate();
        }

        self.active = Some(index);
        let entry = &mut self.pages[index];
        entry.active = true;
        entry.page.on_activate();
        tracing::debug!("activated settings page {}", entry.id);

        for entry in &self.pages {
            if let Some(button) = entry.button {
                if entry.active {
                    host.add_class(button, ACTIVE_CLASS)?;
                } else {
                    host.remove_class(button, ACTIVE_CLASS)?;
                }
            }
        }

        host.empty(regions.content)?;
        self.pages[index].page.display(host, regions.content)
    }

    /// Activates the page at `index`.
    ///
    /// Out-of-range indices are ignored. Before [`display`](Self::display)
    /// the request is remembered and honoured by the next display.
    pub fn set_active_tab(&mut self, host: &mut dyn WidgetHost, index: usize) -> CoreResult<()> {
        if index >= self.pages.len() {
            tracing::debug!("ignoring activation of missing page {}", index);
            return Ok(());
        }
        self.activate_tab(host, index)
    }

    /// Activates the page whose id is `id`; unknown ids are ignored.
    pub fn set_active_tab_by_id(&mut self, host: &mut dyn WidgetHost, id: &str) -> CoreResult<()> {
        match self.pages.iter().position(|entry| entry.id == id) {
            Some(index) => self.activate_tab(host, index),
            None => {
                tracing::debug!("ignoring activation of unknown page {}", id);
                Ok(())
            }
        }
    }

    /// Deactivates the active page, if any. Rendered regions stay.
    pub fn hide(&mut self) {
        if let Some(index) = self.active.take() {
            let entry = &mut self.pages[index];
            entry.active = false;
            entry.page.on_deactivate();
            tracing::debug!("hid settings page {}", entry.id);
        }
    }

    /// Activates the next page, wrapping around.
    ///
    /// No-op until displayed or with fewer than two pages.
    pub fn next_tab(&mut self, host: &mut dyn WidgetHost) -> CoreResult<()> {
        match self.active {
            Some(current) if self.pages.len() > 1 => {
                self.activate_tab(host, (current + 1) % self.pages.len())
            }
            _ => Ok(()),
        }
    }

    /// Activates the previous page, wrapping around.
    pub fn prev_tab(&mut self, host: &mut dyn WidgetHost) -> CoreResult<()> {
        match self.active {
            Some(current) if self.pages.len() > 1 => {
                let previous = if current == 0 {
                    self.pages.len() - 1
                } else {
                    current - 1
                };
                self.activate_tab(host, previous)
            }
            _ => Ok(()),
        }
    }

    /// Handles a tab-related message.
    ///
    /// Consumes `SwitchTab`, `SwitchTabById`, `NextTab` and `PrevTab`,
    /// returning `None`. Any other message is returned for further
    /// processing.
    pub fn handle_message(
        &mut self,
        host: &mut dyn WidgetHost,
        msg: &Message,
    ) -> CoreResult<Option<Message>> {
        match msg {
            Message::SwitchTab(index) => self.set_active_tab(host, *index)?,
            Message::SwitchTabById(id) => self.set_active_tab_by_id(host, id)?,
            Message::NextTab => self.next_tab(host)?,
            Message::PrevTab => self.prev_tab(host)?,
            _ => return Ok(Some(msg.clone())),
        }
        Ok(None)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether [`display`](Self::display) has run
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.regions.is_some()
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active_id(&self) -> Option<String> {
        self.active.map(|index| self.pages[index].id.clone())
    }

    /// Name of the active page
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.map(|index| self.pages[index].page.name())
    }

    /// Active flag of the page at `index`; false when out of range
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.pages.get(index).is_some_and(|entry| entry.active)
    }

    #[must_use]
    pub fn page_ids(&self) -> Vec<&str> {
        self.pages.iter().map(|entry| entry.id.as_str()).collect()
    }

    #[must_use]
    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|entry| entry.page.name()).collect()
    }

    /// Button of the page at `index`, once displayed
    #[must_use]
    pub fn tab_button(&self, index: usize) -> Option<ElementId> {
        self.pages.get(index).and_then(|entry| entry.button)
    }

    #[must_use]
    pub fn tab_strip(&self) -> Option<ElementId> {
        self.regions.map(|r| r.tab_strip)
    }

    #[must_use]
    pub fn content_region(&self) -> Option<ElementId> {
        self.regions.map(|r| r.content)
    }
}

impl Default for SettingsTabManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    type EventLog = Rc<RefCell<Vec<String>>>;

    /// Mock page recording its lifecycle calls
    struct MockPage {
        name: String,
        events: EventLog,
        activate_count: Arc<AtomicU32>,
        deactivate_count: Arc<AtomicU32>,
        display_count: Arc<AtomicU32>,
    }

    impl MockPage {
        fn new(name: &str, events: &EventLog) -> Self {
            MockPage {
                name: name.to_string(),
                events: Rc::clone(events),
                activate_count: Arc::new(AtomicU32::new(0)),
                deactivate_count: Arc::new(AtomicU32::new(0)),
                display_count: Arc::new(AtomicU32::new(0)),
            }
        }
    }

    impl SettingsTabPage for MockPage {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_activate(&mut self) {
            self.activate_count.fetch_add(1, Ordering::SeqCst);
            self.events.borrow_mut().push(format!("activate {}", self.name));
        }

        fn on_deactivate(&mut self) {
            self.deactivate_count.fetch_add(1, Ordering::SeqCst);
            self.events
                .borrow_mut()
                .push(format!("deactivate {}", self.name));
        }

        fn display(&mut self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<()> {
            self.display_count.fetch_add(1, Ordering::SeqCst);
            self.events.borrow_mut().push(format!("display {}", self.name));
            host.create_child(
                container,
                "p",
                ElementAttrs::text(format!("{} content", self.name)),
            )?;
            Ok(())
        }
    }

    /// Page whose display always fails
    struct BrokenPage;

    impl SettingsTabPage for BrokenPage {
        fn name(&self) -> &str {
            "Broken"
        }

        fn display(&mut self, _host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<()> {
            Err(CoreError::ElementNotFound(container))
        }
    }

    fn events() -> EventLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn manager_with(names: &[&str], log: &EventLog) -> SettingsTabManager {
        let mut manager = SettingsTabManager::new();
        for name in names {
            manager
                .add_tab(Box::new(MockPage::new(name, log)))
                .expect("unique page");
        }
        manager
    }

    fn displayed(names: &[&str], log: &EventLog) -> (SettingsTabManager, Surface) {
        let mut manager = manager_with(names, log);
        let mut surface = Surface::new();
        let root = surface.root();
        manager.display(&mut surface, root).expect("display");
        (manager, surface)
    }

    fn content_texts(manager: &SettingsTabManager, surface: &Surface) -> Vec<String> {
        let content = manager.content_region().expect("displayed");
        surface
            .texts_in(content)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn active_flags(manager: &SettingsTabManager) -> Vec<bool> {
        (0..manager.len()).map(|i| manager.is_active(i)).collect()
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_creates_empty_manager() {
        let manager = SettingsTabManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
        assert_eq!(manager.active_index(), None);
        assert!(!manager.is_displayed());
    }

    #[test]
    fn test_default_creates_empty_manager() {
        let manager = SettingsTabManager::default();
        assert!(manager.is_empty());
    }

    // ==================== Registration Tests ====================

    #[test]
    fn test_add_tab_returns_index_and_derives_id() {
        let log = events();
        let mut manager = SettingsTabManager::new();
        let first = manager
            .add_tab(Box::new(MockPage::new("General", &log)))
            .expect("add");
        let second = manager
            .add_tab(Box::new(MockPage::new("Network  Proxy", &log)))
            .expect("add");

        assert_eq!((first, second), (0, 1));
        assert_eq!(manager.page_ids(), vec!["general", "network-proxy"]);
        assert_eq!(manager.page_names(), vec!["General", "Network  Proxy"]);
    }

    #[test]
    fn test_add_tab_rejects_duplicate_id() {
        let log = events();
        let mut manager = manager_with(&["General"], &log);
        let result = manager.add_tab(Box::new(MockPage::new("general", &log)));

        assert!(matches!(result, Err(CoreError::DuplicateTabId(id)) if id == "general"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_add_tabs_is_all_or_nothing() {
        let log = events();
        let mut manager = manager_with(&["General"], &log);
        let batch: Vec<Box<dyn SettingsTabPage>> = vec![
            Box::new(MockPage::new("Performance", &log)),
            Box::new(MockPage::new("General", &log)),
        ];

        assert!(matches!(
            manager.add_tabs(batch),
            Err(CoreError::DuplicateTabId(_))
        ));
        assert_eq!(manager.len(), 1);

        let batch: Vec<Box<dyn SettingsTabPage>> = vec![
            Box::new(MockPage::new("Performance", &log)),
            Box::new(MockPage::new("Advanced", &log)),
        ];
        manager.add_tabs(batch).expect("unique batch");
        assert_eq!(manager.page_ids(), vec!["general", "performance", "advanced"]);
    }

    #[test]
    fn test_add_tab_after_display_is_rejected() {
        let log = events();
        let (mut manager, _surface) = displayed(&["General"], &log);

        let result = manager.add_tab(Box::new(MockPage::new("Late", &log)));

        assert!(matches!(result, Err(CoreError::TabsAlreadyDisplayed)));
        assert!(matches!(
            manager.add_tabs(Vec::<Box<dyn SettingsTabPage>>::new()),
            Err(CoreError::TabsAlreadyDisplayed)
        ));
        assert_eq!(manager.len(), 1);
    }

    // ==================== Display Tests ====================

    #[test]
    fn test_display_without_pages_fails_before_touching_host() {
        let mut manager = SettingsTabManager::new();
        let mut surface = Surface::new();
        let root = surface.root();
        surface
            .create_child(root, "p", ElementAttrs::text("previous"))
            .expect("create");

        let result = manager.display(&mut surface, root);

        assert!(matches!(result, Err(CoreError::NoTabsRegistered)));
        assert_eq!(surface.texts_in(root), vec!["previous"]);
        assert!(!manager.is_displayed());
    }

    #[test]
    fn test_display_builds_strip_and_activates_first_page() {
        let log = events();
        let (manager, surface) = displayed(&["General", "Performance", "Advanced"], &log);

        let strip = manager.tab_strip().expect("strip");
        let buttons = surface.children(strip);
        let labels: Vec<&str> = buttons.iter().filter_map(|b| surface.text(*b)).collect();
        assert_eq!(labels, vec!["General", "Performance", "Advanced"]);

        let active: Vec<bool> = buttons
            .iter()
            .map(|b| surface.has_class(*b, ACTIVE_CLASS))
            .collect();
        assert_eq!(active, vec![true, false, false]);
        assert_eq!(active_flags(&manager), vec![true, false, false]);
        assert_eq!(content_texts(&manager, &surface), vec!["General content"]);
        assert_eq!(
            *log.borrow(),
            vec!["activate General".to_string(), "display General".to_string()]
        );
    }

    #[test]
    fn test_display_empties_container() {
        let log = events();
        let mut manager = manager_with(&["General"], &log);
        let mut surface = Surface::new();
        let root = surface.root();
        surface
            .create_child(root, "p", ElementAttrs::text("stale"))
            .expect("create");

        manager.display(&mut surface, root).expect("display");

        assert!(!surface.texts_in(root).contains(&"stale"));
        assert_eq!(surface.children(root).len(), 2);
    }

    #[test]
    fn test_buttons_emit_switch_messages() {
        let log = events();
        let (manager, surface) = displayed(&["General", "Performance"], &log);

        let button = manager.tab_button(1).expect("button");
        assert_eq!(surface.click(button).ok(), Some(Some(Message::SwitchTab(1))));
        assert!(surface.has_class(button, TAB_BUTTON_CLASS));
    }

    #[test]
    fn test_pending_activation_is_honoured_by_display() {
        let log = events();
        let mut manager = manager_with(&["General", "Performance", "Advanced"], &log);
        let mut surface = Surface::new();
        let root = surface.root();

        manager
            .set_active_tab_by_id(&mut surface, "advanced")
            .expect("pending");
        assert_eq!(manager.active_index(), None);
        assert!(log.borrow().is_empty());

        manager.display(&mut surface, root).expect("display");

        assert_eq!(manager.active_id().as_deref(), Some("advanced"));
        assert_eq!(content_texts(&manager, &surface), vec!["Advanced content"]);
    }

    #[test]
    fn test_display_propagates_page_error() {
        let mut manager = SettingsTabManager::new();
        manager.add_tab(Box::new(BrokenPage)).expect("add");
        let mut surface = Surface::new();
        let root = surface.root();

        assert!(manager.display(&mut surface, root).is_err());
        assert!(manager.is_active(0));
    }

    // ==================== Switching Tests ====================

    #[test]
    fn test_switch_deactivates_then_activates_then_displays() {
        let log = events();
        let (mut manager, mut surface) = displayed(&["General", "Performance"], &log);
        log.borrow_mut().clear();

        manager.set_active_tab(&mut surface, 1).expect("switch");

        assert_eq!(
            *log.borrow(),
            vec![
                "deactivate General".to_string(),
                "activate Performance".to_string(),
                "display Performance".to_string(),
            ]
        );
        assert_eq!(active_flags(&manager), vec![false, true]);
    }

    #[test]
    fn test_reactivating_active_page_rerenders_without_deactivate() {
        let log = events();
        let page = MockPage::new("General", &log);
        let activations = Arc::clone(&page.activate_count);
        let deactivations = Arc::clone(&page.deactivate_count);
        let displays = Arc::clone(&page.display_count);

        let mut manager = SettingsTabManager::new();
        manager.add_tab(Box::new(page)).expect("add");
        let mut surface = Surface::new();
        let root = surface.root();
        manager.display(&mut surface, root).expect("display");

        manager.set_active_tab(&mut surface, 0).expect("again");

        assert_eq!(activations.load(Ordering::SeqCst), 2);
        assert_eq!(deactivations.load(Ordering::SeqCst), 0);
        assert_eq!(displays.load(Ordering::SeqCst), 2);
        assert_eq!(content_texts(&manager, &surface), vec!["General content"]);
    }

    #[test]
    fn test_out_of_range_and_unknown_ids_are_ignored() {
        let log = events();
        let (mut manager, mut surface) = displayed(&["General", "Performance"], &log);
        log.borrow_mut().clear();

        manager.set_active_tab(&mut surface, 7).expect("ignored");
        manager
            .set_active_tab_by_id(&mut surface, "missing")
            .expect("ignored");

        assert!(log.borrow().is_empty());
        assert_eq!(manager.active_index(), Some(0));
    }

    #[test]
    fn test_general_performance_advanced_scenario() {
        let log = events();
        let general = MockPage::new("General", &log);
        let performance = MockPage::new("Performance", &log);
        let advanced = MockPage::new("Advanced", &log);
        let general_deactivations = Arc::clone(&general.deactivate_count);
        let general_activations = Arc::clone(&general.activate_count);
        let advanced_activations = Arc::clone(&advanced.activate_count);
        let advanced_displays = Arc::clone(&advanced.display_count);
        let performance_activations = Arc::clone(&performance.activate_count);

        let mut manager = SettingsTabManager::new();
        manager
            .add_tabs(vec![
                Box::new(general) as Box<dyn SettingsTabPage>,
                Box::new(performance),
                Box::new(advanced),
            ])
            .expect("register");
        let mut surface = Surface::new();
        let root = surface.root();
        manager.display(&mut surface, root).expect("display");
        assert_eq!(manager.active_id().as_deref(), Some("general"));

        manager
            .set_active_tab_by_id(&mut surface, "advanced")
            .expect("switch");

        assert_eq!(general_activations.load(Ordering::SeqCst), 1);
        assert_eq!(general_deactivations.load(Ordering::SeqCst), 1);
        assert_eq!(advanced_activations.load(Ordering::SeqCst), 1);
        assert_eq!(advanced_displays.load(Ordering::SeqCst), 1);
        assert_eq!(performance_activations.load(Ordering::SeqCst), 0);
        assert_eq!(active_flags(&manager), vec![false, false, true]);

        let strip = manager.tab_strip().expect("strip");
        let classes: Vec<bool> = surface
            .children(strip)
            .iter()
            .map(|b| surface.has_class(*b, ACTIVE_CLASS))
            .collect();
        assert_eq!(classes, vec![false, false, true]);
        assert_eq!(content_texts(&manager, &surface), vec!["Advanced content"]);
    }

    #[test]
    fn test_clicking_tab_button_switches_page() {
        let log = events();
        let (mut manager, mut surface) =
            displayed(&["General", "Performance", "Advanced"], &log);
        let strip = manager.tab_strip().expect("strip");

        let advanced = surface.children(strip)[2];
        let msg = surface.click(advanced).expect("click").expect("wired");
        let rest = manager.handle_message(&mut surface, &msg).expect("switch");

        assert_eq!(rest, None);
        assert_eq!(manager.active_index(), Some(2));
        assert_eq!(content_texts(&manager, &surface), vec!["Advanced content"]);
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let log = events();
        let (mut manager, mut surface) = displayed(&["A", "B", "C"], &log);

        manager.prev_tab(&mut surface).expect("prev");
        assert_eq!(manager.active_index(), Some(2));

        manager.next_tab(&mut surface).expect("next");
        assert_eq!(manager.active_index(), Some(0));

        manager.next_tab(&mut surface).expect("next");
        assert_eq!(manager.active_index(), Some(1));
    }

    #[test]
    fn test_next_tab_single_page_is_noop() {
        let log = events();
        let (mut manager, mut surface) = displayed(&["Only"], &log);
        log.borrow_mut().clear();

        manager.next_tab(&mut surface).expect("next");
        manager.prev_tab(&mut surface).expect("prev");

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_next_tab_before_display_is_noop() {
        let log = events();
        let mut manager = manager_with(&["A", "B"], &log);
        let mut surface = Surface::new();

        manager.next_tab(&mut surface).expect("next");

        assert_eq!(manager.active_index(), None);
        assert!(log.borrow().is_empty());
    }

    // ==================== Hide Tests ====================

    #[test]
    fn test_hide_deactivates_and_keeps_regions() {
        let log = events();
        let (mut manager, surface) = displayed(&["General", "Performance"], &log);
        log.borrow_mut().clear();

        manager.hide();

        assert_eq!(*log.borrow(), vec!["deactivate General".to_string()]);
        assert_eq!(active_flags(&manager), vec![false, false]);
        assert_eq!(manager.active_index(), None);
        assert!(manager.is_displayed());
        assert_eq!(content_texts(&manager, &surface), vec!["General content"]);
    }

    #[test]
    fn test_hide_twice_deactivates_once() {
        let log = events();
        let (mut manager, _surface) = displayed(&["General"], &log);
        log.borrow_mut().clear();

        manager.hide();
        manager.hide();

        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_switch_after_hide_skips_deactivate() {
        let log = events();
        let (mut manager, mut surface) = displayed(&["General", "Performance"], &log);
        manager.hide();
        log.borrow_mut().clear();

        manager.set_active_tab(&mut surface, 1).expect("switch");

        assert_eq!(
            *log.borrow(),
            vec![
                "activate Performance".to_string(),
                "display Performance".to_string()
            ]
        );
    }

    // ==================== Message Handling Tests ====================

    #[test]
    fn test_handle_message_consumes_navigation() {
        let log = events();
        let (mut manager, mut surface) = displayed(&["General", "Performance"], &log);

        let unhandled = manager
            .handle_message(&mut surface, &Message::SwitchTabById("performance".into()))
            .expect("handle");
        assert_eq!(unhandled, None);
        assert_eq!(manager.active_index(), Some(1));

        let unhandled = manager
            .handle_message(&mut surface, &Message::NextTab)
            .expect("handle");
        assert_eq!(unhandled, None);
        assert_eq!(manager.active_index(), Some(0));
    }

    #[test]
    fn test_handle_message_passes_through_others() {
        let log = events();
        let (mut manager, mut surface) = displayed(&["General"], &log);

        let unhandled = manager
            .handle_message(&mut surface, &Message::Quit)
            .expect("handle");

        assert_eq!(unhandled, Some(Message::Quit));
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_exactly_one_active_after_any_switch(
            page_count in 1usize..6,
            switches in proptest::collection::vec(0usize..8, 0..20),
        ) {
            let log = events();
            let names: Vec<String> = (0..page_count).map(|i| format!("Page {}", i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut manager, mut surface) = displayed(&refs, &log);
            let mut expected = 0;

            for index in switches {
                manager.set_active_tab(&mut surface, index).expect("switch");
                if index < page_count {
                    expected = index;
                }
                prop_assert_eq!(manager.active_index(), Some(expected));
                let flags = active_flags(&manager);
                prop_assert_eq!(flags.iter().filter(|f| **f).count(), 1);

                let strip = manager.tab_strip().expect("strip");
                let marked = surface
                    .children(strip)
                    .iter()
                    .filter(|b| surface.has_class(**b, ACTIVE_CLASS))
                    .count();
                prop_assert_eq!(marked, 1);
                prop_assert!(surface.has_class(surface.children(strip)[expected], ACTIVE_CLASS));
            }
        }
    }
}
