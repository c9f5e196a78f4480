//! Content widget drawing the active settings page
//!
//! [`SettingsView`] walks the content region of a [`Surface`] in document
//! order. Plain elements become heading lines, controls become a
//! name/value row followed by a muted description line. The focused
//! control is marked and kept in view.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};
use tabset_core::{ControlKind, ControlValue, ElementId, Theme};

use crate::surface::{Control, Surface};

const FOCUS_MARKER: &str = "▶ ";
const NO_MARKER: &str = "  ";

/// Renders the controls of one region
pub struct SettingsView<'a> {
    surface: &'a Surface,
    region: ElementId,
    focused: Option<ElementId>,
    editing: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> SettingsView<'a> {
    pub fn new(surface: &'a Surface, region: ElementId, theme: &'a Theme) -> Self {
        SettingsView {
            surface,
            region,
            focused: None,
            editing: None,
            theme,
        }
    }

    /// Marks `control` as the one keyboard input goes to.
    #[must_use]
    pub fn focused(mut self, control: Option<ElementId>) -> Self {
        self.focused = control;
        self
    }

    /// Shows `buffer` in place of the focused control's value.
    #[must_use]
    pub fn editing(mut self, buffer: Option<&'a str>) -> Self {
        self.editing = buffer;
        self
    }

    /// Builds the lines to draw and the index of the focused line.
    fn lines(&self) -> (Vec<Line<'a>>, Option<usize>) {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();
        let mut focused_line = None;

        for id in self.surface.descendants(self.region) {
            match self.surface.control(id) {
                Some(control) => {
                    let focused = Some(id) == self.focused;
                    if focused {
                        focused_line = Some(lines.len());
                    }
                    lines.push(self.control_line(control, focused));
                    if !control.description().is_empty() {
                        lines.push(Line::from(Span::styled(
                            format!("    {}", control.description()),
                            Style::default().fg(colors.muted),
                        )));
                    }
                }
                None => {
                    if let Some(text) = self.surface.text(id) {
                        if !lines.is_empty() {
                            lines.push(Line::from(""));
                        }
                        lines.push(Line::from(Span::styled(
                            text.to_string(),
                            Style::default()
                                .fg(colors.accent)
                                .add_modifier(Modifier::BOLD),
                        )));
                    }
                }
            }
        }

        (lines, focused_line)
    }

    fn control_line(&self, control: &'a Control, focused: bool) -> Line<'a> {
        let colors = &self.theme.colors;
        let marker = if focused { FOCUS_MARKER } else { NO_MARKER };
        let name_style = if focused {
            Style::default()
                .fg(colors.foreground)
                .bg(colors.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.foreground)
        };

        let value = match self.editing.filter(|_| focused) {
            Some(buffer) => Span::styled(
                format!("{}▏", single_line(buffer)),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            None => value_span(control, self.theme),
        };

        Line::from(vec![
            Span::styled(marker, Style::default().fg(colors.accent)),
            Span::styled(control.name().to_string(), name_style),
            Span::styled(": ", Style::default().fg(colors.muted)),
            value,
        ])
    }
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (lines, focused_line) = self.lines();

        // Keep the focused row (and its description) on screen.
        let height = usize::from(area.height);
        let offset = focused_line
            .map(|line| (line + 2).saturating_sub(height))
            .unwrap_or(0);

        Paragraph::new(lines)
            .style(Style::default().bg(self.theme.colors.background))
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}

/// Human-readable value of a control
fn value_span<'a>(control: &'a Control, theme: &Theme) -> Span<'a> {
    let colors = &theme.colors;
    let value_style = Style::default().fg(colors.success);

    match (control.kind(), control.value()) {
        (ControlKind::Toggle, Some(ControlValue::Bool(on))) => {
            Span::styled(if *on { "[x]" } else { "[ ]" }, value_style)
        }
        (ControlKind::Slider, Some(ControlValue::Number(n))) => {
            let text = match control.limits() {
                Some(limits) => format!(
                    "< {} >  ({}-{})",
                    format_number(*n),
                    format_number(limits.minimum),
                    format_number(limits.maximum)
                ),
                None => format!("< {} >", format_number(*n)),
            };
            Span::styled(text, value_style)
        }
        (ControlKind::Dropdown, Some(ControlValue::Key(key))) => {
            let label = control.selected_label().unwrap_or(key.as_str());
            Span::styled(format!("< {} >", label), value_style)
        }
        (ControlKind::Text | ControlKind::TextArea, Some(ControlValue::Text(text)))
            if !text.is_empty() =>
        {
            Span::styled(single_line(text), value_style)
        }
        (ControlKind::Text | ControlKind::TextArea, _) => Span::styled(
            control.placeholder().unwrap_or("").to_string(),
            Style::default()
                .fg(colors.muted)
                .add_modifier(Modifier::ITALIC),
        ),
        (_, Some(other)) => Span::styled(other.to_string(), value_style),
        (_, None) => Span::raw(""),
    }
}

/// Formats whole numbers without a trailing `.0`
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn single_line(text: &str) -> String {
    text.replace('\n', " ⏎ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabset_core::{ElementAttrs, WidgetHost};

    fn buffer_lines(buf: &Buffer, area: Rect) -> Vec<String> {
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn sample() -> (Surface, ElementId, Vec<ElementId>) {
        let mut surface = Surface::new();
        let root = surface.root();
        let region = surface
            .create_child(root, "div", ElementAttrs::default())
            .expect("region");
        surface
            .create_child(region, "h2", ElementAttrs::text("Sync"))
            .expect("heading");

        let toggle = surface
            .create_labeled_control(ControlKind::Toggle, region, "Enabled", "Sync on save")
            .expect("toggle");
        surface
            .set_value(toggle, ControlValue::Bool(true))
            .expect("value");

        let slider = surface
            .create_labeled_control(ControlKind::Slider, region, "Interval", "")
            .expect("slider");
        surface.set_limits(slider, 5.0, 300.0, 5.0).expect("limits");
        surface
            .set_value(slider, ControlValue::Number(30.0))
            .expect("value");

        let dropdown = surface
            .create_labeled_control(ControlKind::Dropdown, region, "Theme", "")
            .expect("dropdown");
        surface.add_option(dropdown, "dark", "Dark").expect("opt");
        surface.add_option(dropdown, "nord", "Nord").expect("opt");
        surface
            .set_value(dropdown, ControlValue::Key("nord".into()))
            .expect("value");

        let text = surface
            .create_labeled_control(ControlKind::Text, region, "Server", "")
            .expect("text");
        surface
            .set_placeholder(text, "https://example.com")
            .expect("placeholder");
        surface
            .set_value(text, ControlValue::Text(String::new()))
            .expect("value");

        (surface, region, vec![toggle, slider, dropdown, text])
    }

    #[test]
    fn test_renders_controls_and_values() {
        let (surface, region, _) = sample();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);

        SettingsView::new(&surface, region, &theme).render(area, &mut buf);

        let lines = buffer_lines(&buf, area);
        assert_eq!(lines[0], "Sync");
        assert_eq!(lines[1], "  Enabled: [x]");
        assert_eq!(lines[2], "    Sync on save");
        assert_eq!(lines[3], "  Interval: < 30 >  (5-300)");
        assert_eq!(lines[4], "  Theme: < Nord >");
        assert_eq!(lines[5], "  Server: https://example.com");
    }

    #[test]
    fn test_placeholder_is_muted() {
        let (surface, region, _) = sample();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);

        SettingsView::new(&surface, region, &theme).render(area, &mut buf);

        let x = buffer_lines(&buf, area)[5]
            .find("https")
            .expect("placeholder shown") as u16;
        assert_eq!(buf[(x, 5)].fg, theme.colors.muted);
    }

    #[test]
    fn test_focused_control_is_marked() {
        let (surface, region, controls) = sample();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);

        SettingsView::new(&surface, region, &theme)
            .focused(Some(controls[1]))
            .render(area, &mut buf);

        let lines = buffer_lines(&buf, area);
        assert!(lines[3].starts_with("▶ Interval"));
        assert!(lines[1].starts_with("  Enabled"));
    }

    #[test]
    fn test_editing_buffer_replaces_value() {
        let (surface, region, controls) = sample();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);

        SettingsView::new(&surface, region, &theme)
            .focused(Some(controls[3]))
            .editing(Some("http://lo"))
            .render(area, &mut buf);

        assert_eq!(buffer_lines(&buf, area)[5], "▶ Server: http://lo▏");
    }

    #[test]
    fn test_scrolls_to_focused_control() {
        let (surface, region, controls) = sample();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);

        SettingsView::new(&surface, region, &theme)
            .focused(Some(controls[3]))
            .render(area, &mut buf);

        let lines = buffer_lines(&buf, area);
        assert!(lines.iter().any(|l| l.starts_with("▶ Server")));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(35.0), "35");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-5.0), "-5");
    }
}
