//! Tab bar widget for settings pages
//!
//! The [`TabBar`] draws the tab strip a [`crate::SettingsTabManager`]
//! rendered into a [`Surface`]: one title per button, with the button
//! carrying the `is-active` class highlighted.
//!
//! ## Example
//!
//! ```ignore
//! use tabset_ui::widgets::TabBar;
//!
//! if let Some(strip) = manager.tab_strip() {
//!     frame.render_widget(TabBar::new(&surface, strip, &theme), area);
//! }
//! ```

use ratatui::prelude::*;
use ratatui::widgets::{Tabs, Widget};
use tabset_core::{ElementId, Theme};

use crate::surface::Surface;
use crate::tab_manager::ACTIVE_CLASS;

/// Horizontal list of page titles
pub struct TabBar<'a> {
    titles: Vec<&'a str>,
    active_index: Option<usize>,
    numbered: bool,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    /// Reads the buttons below `strip` in order.
    pub fn new(surface: &'a Surface, strip: ElementId, theme: &'a Theme) -> Self {
        let buttons = surface.children(strip);
        let titles = buttons
            .iter()
            .map(|button| surface.text(*button).unwrap_or(""))
            .collect();
        let active_index = buttons
            .iter()
            .position(|button| surface.has_class(*button, ACTIVE_CLASS));

        TabBar {
            titles,
            active_index,
            numbered: false,
            theme,
        }
    }

    /// Prefixes each title with its 1-based shortcut number.
    #[must_use]
    pub fn numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    pub fn tab_count(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Index of the highlighted title, if any page is active
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.titles.is_empty() {
            return;
        }

        let titles: Vec<Line> = self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let content = if self.numbered && i < 9 {
                    format!(" {}:{} ", i + 1, title)
                } else {
                    format!(" {} ", title)
                };

                if Some(i) == self.active_index {
                    Line::from(content).style(
                        Style::default()
                            .fg(self.theme.colors.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::from(content).style(Style::default().fg(self.theme.colors.muted))
                }
            })
            .collect();

        let mut tabs_widget = Tabs::new(titles)
            .divider(" | ")
            .style(Style::default().bg(self.theme.colors.background));
        if let Some(active) = self.active_index {
            tabs_widget = tabs_widget.select(active);
        }

        tabs_widget.render(area, buf);
    }
}
