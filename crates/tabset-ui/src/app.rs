//! Terminal settings application
//!
//! [`SettingsApp`] ties a [`SettingsTabManager`] to a [`Surface`] and
//! turns key presses into tab switches and control changes. Every
//! non-input message it dispatches is re-broadcast on its
//! [`MessageBus`], so an event loop can react to `SettingsChanged`.
//!
//! # Example
//!
//! ```ignore
//! use tabset_ui::{SettingsApp, SettingsTabManager};
//! use tabset_core::Message;
//!
//! let mut app = SettingsApp::new(manager);
//! app.open(None)?;
//!
//! loop {
//!     terminal.draw(|f| app.render(f))?;
//!
//!     if let Event::Key(key) = event::read()? {
//!         app.dispatch(Message::Key(key));
//!     }
//!
//!     if app.should_quit() {
//!         break;
//!     }
//! }
//! ```

use crate::renderer::{popup_area, AppLayout};
use crate::surface::{Control, Surface};
use crate::tab_manager::SettingsTabManager;
use crate::widgets::{Notice, SettingsView, StatusBar, TabBar};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tabset_core::{
    ControlKind, ControlValue, CoreError, CoreResult, ElementId, Message, MessageBus, Theme,
};

const BROWSE_HINTS: &str = "?:help  q:quit";
const EDIT_HINTS: &str = "Enter:save  Esc:cancel";

const HELP_LINES: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / previous page"),
    ("1-9", "jump to page"),
    ("j/k or Up/Down", "move between settings"),
    ("h/l or Left/Right", "adjust slider, dropdown or toggle"),
    ("Enter / Space", "toggle, cycle or edit text"),
    ("Alt-Enter", "new line while editing a text area"),
    ("?", "close this help"),
    ("q", "quit"),
];

/// What keyboard input currently goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Moving between pages and controls
    Browse,
    /// Typing into a text control
    Edit {
        control: ElementId,
        buffer: String,
    },
}

/// Settings screen driven by terminal input
pub struct SettingsApp {
    manager: SettingsTabManager,
    surface: Surface,
    theme: Theme,
    message_bus: MessageBus,
    mode: InputMode,
    focus: usize,
    notice: Option<Notice>,
    show_help: bool,
    should_quit: bool,
}

impl SettingsApp {
    /// Wraps a manager whose pages are already registered.
    #[must_use]
    pub fn new(manager: SettingsTabManager) -> Self {
        SettingsApp {
            manager,
            surface: Surface::new(),
            theme: Theme::default(),
            message_bus: MessageBus::default(),
            mode: InputMode::Browse,
            focus: 0,
            notice: None,
            show_help: false,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Uses `bus` instead of a private one, so setting observers and the
    /// app publish on the same channel.
    #[must_use]
    pub fn with_message_bus(mut self, bus: MessageBus) -> Self {
        self.message_bus = bus;
        self
    }

    /// Displays the pages, starting on `initial` when it names a page.
    ///
    /// # Errors
    ///
    /// Propagates `CoreError::NoTabsRegistered` and page display errors.
    pub fn open(&mut self, initial: Option<&str>) -> CoreResult<()> {
        if let Some(id) = initial {
            self.manager.set_active_tab_by_id(&mut self.surface, id)?;
        }
        let root = self.surface.root();
        self.manager.display(&mut self.surface, root)?;
        self.focus = 0;
        self.mode = InputMode::Browse;
        Ok(())
    }

    /// Re-renders the active page from the current setting values.
    pub fn refresh(&mut self) -> CoreResult<()> {
        if let Some(index) = self.manager.active_index() {
            self.mode = InputMode::Browse;
            self.manager.set_active_tab(&mut self.surface, index)?;
            let count = self.controls().len();
            self.focus = self.focus.min(count.saturating_sub(1));
        }
        Ok(())
    }

    /// Processes one message.
    ///
    /// Errors raised while handling it are logged and shown in the
    /// status bar rather than returned.
    pub fn dispatch(&mut self, msg: Message) {
        match msg {
            Message::None | Message::Mouse(_) | Message::Resize(..) => return,
            batch @ Message::Batch(_) => {
                for m in batch.flatten() {
                    self.dispatch(m);
                }
                return;
            }
            Message::Key(key) => {
                self.handle_key(key);
                return;
            }
            _ => {}
        }

        match &msg {
            Message::Quit => {
                self.manager.hide();
                self.should_quit = true;
            }
            Message::Hide => self.manager.hide(),
            Message::ToggleHelp => self.show_help = !self.show_help,
            Message::SettingsChanged { setting } => {
                tracing::debug!("setting changed: {}", setting);
            }
            _ => {
                self.mode = InputMode::Browse;
                match self.manager.handle_message(&mut self.surface, &msg) {
                    Ok(None) => self.focus = 0,
                    Ok(Some(unhandled)) => {
                        tracing::trace!("unhandled message {:?}", unhandled);
                    }
                    Err(err) => self.report(err),
                }
            }
        }

        // Nobody listening is fine.
        let _ = self.message_bus.send(msg);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.dispatch(Message::Quit);
            return;
        }
        if matches!(self.mode, InputMode::Edit { .. }) {
            self.handle_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc if self.show_help => self.show_help = false,
            KeyCode::Char('q') | KeyCode::Esc => self.dispatch(Message::Quit),
            KeyCode::Char('?') => self.dispatch(Message::ToggleHelp),
            KeyCode::Tab => self.dispatch(Message::NextTab),
            KeyCode::BackTab => self.dispatch(Message::PrevTab),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.click_tab(digit as usize - 1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(-1),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_control(),
            KeyCode::Right | KeyCode::Char('l') => self.adjust_control(1),
            KeyCode::Left | KeyCode::Char('h') => self.adjust_control(-1),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let InputMode::Edit { control, buffer } = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.mode = InputMode::Browse,
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                let multiline = self
                    .surface
                    .control(*control)
                    .is_some_and(|c| c.kind() == ControlKind::TextArea);
                if multiline {
                    buffer.push('\n');
                }
            }
            KeyCode::Enter => {
                let control = *control;
                let text = std::mem::take(buffer);
                self.mode = InputMode::Browse;
                self.change(control, ControlValue::Text(text));
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    /// Clicks the button of the page at `index`, as a mouse would.
    fn click_tab(&mut self, index: usize) {
        let Some(button) = self.manager.tab_button(index) else {
            return;
        };
        match self.surface.click(button) {
            Ok(Some(msg)) => self.dispatch(msg),
            Ok(None) => {}
            Err(err) => self.report(err),
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let count = self.controls().len();
        if count == 0 {
            return;
        }
        self.focus = (self.focus as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn activate_control(&mut self) {
        let Some(id) = self.focused_control() else {
            return;
        };
        let Some(control) = self.surface.control(id) else {
            return;
        };

        let next = match control.kind() {
            ControlKind::Toggle => Some(ControlValue::Bool(!matches!(
                control.value(),
                Some(ControlValue::Bool(true))
            ))),
            ControlKind::Dropdown => stepped(control, 1),
            ControlKind::Slider => None,
            ControlKind::Text | ControlKind::TextArea => {
                let buffer = match control.value() {
                    Some(ControlValue::Text(text)) => text.clone(),
                    _ => String::new(),
                };
                self.mode = InputMode::Edit {
                    control: id,
                    buffer,
                };
                None
            }
        };

        if let Some(value) = next {
            self.change(id, value);
        }
    }

    fn adjust_control(&mut self, direction: i8) {
        let Some(id) = self.focused_control() else {
            return;
        };
        if let Some(value) = self.surface.control(id).and_then(|c| stepped(c, direction)) {
            self.change(id, value);
        }
    }

    fn change(&mut self, control: ElementId, value: ControlValue) {
        if let Err(err) = self.surface.emit_change(control, value) {
            self.report(err);
        }
    }

    fn report(&mut self, err: CoreError) {
        tracing::warn!("settings action failed: {}", err);
        self.notice = Some(Notice::error(err.to_string()));
    }

    /// Controls of the active page in display order
    #[must_use]
    pub fn controls(&self) -> Vec<ElementId> {
        self.manager
            .content_region()
            .map(|content| self.surface.controls_in(content))
            .unwrap_or_default()
    }

    /// The control keyboard input goes to
    #[must_use]
    pub fn focused_control(&self) -> Option<ElementId> {
        self.controls().get(self.focus).copied()
    }

    /// Draws tab strip, active page, status bar and, if open, the help.
    pub fn render(&self, frame: &mut Frame) {
        let layout = AppLayout::new(frame.area());

        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.background)),
            frame.area(),
        );

        if let Some(strip) = self.manager.tab_strip() {
            let tab_bar = TabBar::new(&self.surface, strip, &self.theme).numbered(true);
            frame.render_widget(tab_bar, layout.tab_bar);
        }

        if let Some(content) = self.manager.content_region() {
            let editing = match &self.mode {
                InputMode::Edit { buffer, .. } => Some(buffer.as_str()),
                InputMode::Browse => None,
            };
            let view = SettingsView::new(&self.surface, content, &self.theme)
                .focused(self.focused_control())
                .editing(editing);
            frame.render_widget(view, layout.page);
        }

        let (left, right) = match self.mode {
            InputMode::Edit { .. } => ("EDIT", EDIT_HINTS),
            InputMode::Browse => (self.manager.active_name().unwrap_or(""), BROWSE_HINTS),
        };
        let status = StatusBar::new(&self.theme)
            .left(left)
            .notice(self.notice.as_ref())
            .right(right);
        frame.render_widget(status, layout.status_bar);

        if self.show_help {
            self.render_help(frame);
        }
    }

    fn render_help(&self, frame: &mut Frame) {
        let colors = &self.theme.colors;
        let height = u16::try_from(HELP_LINES.len() + 2).unwrap_or(u16::MAX);
        let area = popup_area(frame.area(), 70, height);

        let lines: Vec<Line> = HELP_LINES
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(format!("{:<20}", keys), Style::default().fg(colors.accent)),
                    Span::styled(*action, Style::default().fg(colors.foreground)),
                ])
            })
            .collect();

        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys ")
                .border_style(Style::default().fg(colors.accent))
                .style(Style::default().bg(colors.background)),
        );

        frame.render_widget(Clear, area);
        frame.render_widget(help, area);
    }

    #[must_use]
    pub fn manager(&self) -> &SettingsTabManager {
        &self.manager
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[must_use]
    pub fn message_bus(&self) -> &MessageBus {
        &self.message_bus
    }

    #[must_use]
    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Replaces the status bar notice.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// The value one step away from the control's current one, if the
/// control can be stepped.
fn stepped(control: &Control, direction: i8) -> Option<ControlValue> {
    match control.kind() {
        ControlKind::Toggle => Some(ControlValue::Bool(direction > 0)),
        ControlKind::Slider => {
            let current = match control.value() {
                Some(ControlValue::Number(n)) => *n,
                _ => control.limits().map_or(0.0, |l| l.minimum),
            };
            let next = match control.limits() {
                Some(limits) => limits.snap(current + limits.step * f64::from(direction)),
                None => current + f64::from(direction),
            };
            Some(ControlValue::Number(next))
        }
        ControlKind::Dropdown => {
            let options = control.options();
            if options.is_empty() {
                return None;
            }
            let current = match control.value() {
                Some(ControlValue::Key(key)) => options.iter().position(|(k, _)| k == key),
                _ => None,
            };
            let len = options.len() as isize;
            let next = match current {
                Some(index) => (index as isize + isize::from(direction)).rem_euclid(len),
                None => 0,
            };
            Some(ControlValue::Key(options[next as usize].0.clone()))
        }
        ControlKind::Text | ControlKind::TextArea => None,
    }
}
