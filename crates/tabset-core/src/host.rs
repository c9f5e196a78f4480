//! Widget host contract
//!
//! The [`WidgetHost`] trait is the boundary between settings code and
//! whatever actually draws controls. Setting bindings and pages only
//! ever talk to a host through this trait, so the same page can be
//! shown by a terminal surface, a test double, or any other toolkit.

use crate::error::CoreResult;
use crate::event::Message;
use std::fmt;

/// Identifier of an element (container, button or control) owned by a host.
pub type ElementId = usize;

/// Callback invoked by a host when a control's value changes.
///
/// The result is returned to whoever delivered the event, so binding
/// errors surface at the call site instead of being swallowed.
pub type ChangeHandler = Box<dyn FnMut(ControlValue) -> CoreResult<()>>;

/// Kinds of labeled control a host can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Boolean on/off switch
    Toggle,
    /// Numeric value constrained by limits
    Slider,
    /// Single-line text input
    Text,
    /// Multi-line text input
    TextArea,
    /// Enumerated choice keyed by option key
    Dropdown,
}

impl ControlKind {
    /// Short lowercase name used in logs and element tags
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Toggle => "toggle",
            ControlKind::Slider => "slider",
            ControlKind::Text => "text",
            ControlKind::TextArea => "textarea",
            ControlKind::Dropdown => "dropdown",
        }
    }
}

/// A value as seen by a control
///
/// Dropdowns exchange option keys, never the bound values themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Key(String),
}

impl ControlValue {
    /// Name of the variant, for error reporting
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            ControlValue::Bool(_) => "bool",
            ControlValue::Number(_) => "number",
            ControlValue::Text(_) => "text",
            ControlValue::Key(_) => "key",
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Bool(true) => write!(f, "on"),
            ControlValue::Bool(false) => write!(f, "off"),
            ControlValue::Number(n) => write!(f, "{}", n),
            ControlValue::Text(s) | ControlValue::Key(s) => write!(f, "{}", s),
        }
    }
}

/// Optional attributes for a plain child element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAttrs {
    /// Text content of the element
    pub text: Option<String>,
    /// CSS-like class attached at creation
    pub class: Option<String>,
}

impl ElementAttrs {
    /// Attributes with only text content
    pub fn text(text: impl Into<String>) -> Self {
        ElementAttrs {
            text: Some(text.into()),
            class: None,
        }
    }

    /// Attributes with only a class
    pub fn class(class: impl Into<String>) -> Self {
        ElementAttrs {
            text: None,
            class: Some(class.into()),
        }
    }

    /// Adds a class to existing attributes
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Primitives a host must expose to render settings screens.
///
/// Hosts are driven from a single UI thread, so implementations are
/// not required to be `Send` or `Sync`.
pub trait WidgetHost {
    /// Creates a labeled control of `kind` inside `container`.
    fn create_labeled_control(
        &mut self,
        kind: ControlKind,
        container: ElementId,
        name: &str,
        description: &str,
    ) -> CoreResult<ElementId>;

    /// Sets the value currently displayed by a control.
    fn set_value(&mut self, control: ElementId, value: ControlValue) -> CoreResult<()>;

    /// Sets the range and granularity of a slider.
    fn set_limits(&mut self, control: ElementId, min: f64, max: f64, step: f64) -> CoreResult<()>;

    /// Sets the empty-state hint of a text control.
    fn set_placeholder(&mut self, control: ElementId, placeholder: &str) -> CoreResult<()>;

    /// Appends an option to a dropdown.
    fn add_option(&mut self, control: ElementId, key: &str, label: &str) -> CoreResult<()>;

    /// Registers the single change handler of a control, replacing any prior one.
    fn on_change(&mut self, control: ElementId, handler: ChangeHandler) -> CoreResult<()>;

    /// Removes every child of `container`.
    fn empty(&mut self, container: ElementId) -> CoreResult<()>;

    /// Creates a plain child element such as a region or a button.
    fn create_child(
        &mut self,
        container: ElementId,
        tag: &str,
        attrs: ElementAttrs,
    ) -> CoreResult<ElementId>;

    /// Makes `element` emit `message` when clicked.
    fn on_click(&mut self, element: ElementId, message: Message) -> CoreResult<()>;

    /// Adds a class to an element.
    fn add_class(&mut self, element: ElementId, class: &str) -> CoreResult<()>;

    /// Removes a class from an element.
    fn remove_class(&mut self, element: ElementId, class: &str) -> CoreResult<()>;
}
