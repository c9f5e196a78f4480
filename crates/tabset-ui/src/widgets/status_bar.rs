//! Status bar widget for the settings screen
//!
//! The [`StatusBar`] renders a three-section bar at the bottom of the
//! terminal: the current mode on the left, the latest [`Notice`] in the
//! center and key hints on the right.
//!
//! ## Example
//!
//! ```ignore
//! use tabset_ui::widgets::{Notice, StatusBar};
//!
//! let notice = Notice::success("Saved");
//! let status = StatusBar::new(&theme)
//!     .left("General")
//!     .notice(Some(&notice))
//!     .right("q:quit");
//! frame.render_widget(status, area);
//! ```

use ratatui::prelude::*;
use ratatui::widgets::Widget;
use tabset_core::Theme;

/// Severity of a status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One-line message shown in the middle of the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    fn color(&self, theme: &Theme) -> Color {
        match self.kind {
            NoticeKind::Info => theme.colors.foreground,
            NoticeKind::Success => theme.colors.success,
            NoticeKind::Error => theme.colors.error,
        }
    }
}

/// Status bar with mode, notice and hint sections
pub struct StatusBar<'a> {
    left: &'a str,
    notice: Option<&'a Notice>,
    right: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        StatusBar {
            left: "",
            notice: None,
            right: "",
            theme,
        }
    }

    /// Sets the left section, drawn bold in the accent colour
    pub fn left(mut self, text: &'a str) -> Self {
        self.left = text;
        self
    }

    /// Sets the centered notice, coloured by its kind
    pub fn notice(mut self, notice: Option<&'a Notice>) -> Self {
        self.notice = notice;
        self
    }

    /// Sets the right-aligned hints, drawn muted
    pub fn right(mut self, text: &'a str) -> Self {
        self.right = text;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg = self.theme.colors.selection;
        buf.set_style(area, Style::default().bg(bg));

        let width = area.width as usize;

        if !self.left.is_empty() {
            let text = format!(" {} ", self.left);
            if text.chars().count() <= width {
                let style = Style::default()
                    .fg(self.theme.colors.accent)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD);
                buf.set_string(area.x, area.y, &text, style);
            }
        }

        if let Some(notice) = self.notice.filter(|n| !n.text.is_empty()) {
            let len = notice.text.chars().count();
            if len < width {
                let start_x = area.x + (width.saturating_sub(len) / 2) as u16;
                let style = Style::default().fg(notice.color(self.theme)).bg(bg);
                buf.set_string(start_x, area.y, &notice.text, style);
            }
        }

        if !self.right.is_empty() {
            let text = format!(" {} ", self.right);
            let len = text.chars().count();
            if len <= width {
                let start_x = area.right().saturating_sub(len as u16);
                let style = Style::default().fg(self.theme.colors.muted).bg(bg);
                buf.set_string(start_x, area.y, &text, style);
            }
        }
    }
}
