//! Setting bindings
//!
//! A [`SettingBinding`] ties a [`SettingDescriptor`] to a value that
//! lives somewhere else (usually a field of the application's settings
//! struct). The binding never stores the value itself; it reads and
//! writes through an [`Accessor`] and renders a control for it through
//! a [`WidgetHost`].
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tabset_core::{Accessor, SettingBinding, SettingDescriptor, SliderLimits};
//!
//! #[derive(Default)]
//! struct Settings {
//!     interval: f64,
//! }
//!
//! let settings = Rc::new(RefCell::new(Settings { interval: 30.0 }));
//! let binding = SettingBinding::slider(
//!     SettingDescriptor::new("Interval", "Seconds between refreshes"),
//!     SliderLimits::new(5.0, 300.0, 5.0)?,
//!     60.0,
//!     Accessor::field(&settings, |s| s.interval, |s, v| s.interval = v),
//! );
//!
//! assert_eq!(binding.value(), 30.0);
//! binding.set_value(45.0);
//! assert_eq!(settings.borrow().interval, 45.0);
//! # Ok::<(), tabset_core::CoreError>(())
//! ```

use crate::dropdown::DropdownOptions;
use crate::error::{CoreError, CoreResult};
use crate::host::{ChangeHandler, ControlKind, ControlValue, ElementId, WidgetHost};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Display label and help text of a setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDescriptor {
    name: String,
    description: String,
}

impl SettingDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        SettingDescriptor {
            name: name.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Range and granularity of a slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderLimits {
    pub minimum: f64,
    pub maximum: f64,
    pub step: f64,
}

impl SliderLimits {
    /// Validates and builds slider limits.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSliderLimits` unless
    /// `minimum <= maximum` and `step > 0` (NaN fails both).
    pub fn new(minimum: f64, maximum: f64, step: f64) -> CoreResult<Self> {
        let ordered = minimum.partial_cmp(&maximum).is_some_and(|o| o.is_le());
        if !ordered || step.is_nan() || step <= 0.0 {
            return Err(CoreError::InvalidSliderLimits {
                minimum,
                maximum,
                step,
            });
        }
        Ok(SliderLimits {
            minimum,
            maximum,
            step,
        })
    }

    /// Clamps `value` into range and snaps it to the nearest step from `minimum`.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.minimum, self.maximum);
        let steps = ((clamped - self.minimum) / self.step).round();
        (self.minimum + steps * self.step).min(self.maximum)
    }
}

/// Variant of a setting and its kind-specific metadata
#[derive(Debug, Clone, PartialEq)]
pub enum SettingKind<T> {
    Toggle,
    Slider(SliderLimits),
    Text { placeholder: Option<String> },
    TextArea { placeholder: Option<String> },
    Dropdown(DropdownOptions<T>),
}

impl<T> SettingKind<T> {
    /// The control a host should create for this kind
    #[must_use]
    pub fn control_kind(&self) -> ControlKind {
        match self {
            SettingKind::Toggle => ControlKind::Toggle,
            SettingKind::Slider(_) => ControlKind::Slider,
            SettingKind::Text { .. } => ControlKind::Text,
            SettingKind::TextArea { .. } => ControlKind::TextArea,
            SettingKind::Dropdown(_) => ControlKind::Dropdown,
        }
    }
}

/// Values that can be bound to a setting.
///
/// Scalar types convert directly to and from a [`ControlValue`].
/// Types that are only ever shown through a dropdown can use the
/// default methods, because dropdowns translate through option keys:
///
/// ```
/// use tabset_core::SettingValue;
///
/// #[derive(Clone, PartialEq)]
/// enum Quality { Low, High }
///
/// impl SettingValue for Quality {}
/// ```
pub trait SettingValue: Clone + PartialEq + 'static {
    /// Converts the value for display in a scalar control
    fn to_control(&self) -> Option<ControlValue> {
        None
    }

    /// Converts a scalar control value back
    fn from_control(_value: ControlValue) -> Option<Self> {
        None
    }
}

impl SettingValue for bool {
    fn to_control(&self) -> Option<ControlValue> {
        Some(ControlValue::Bool(*self))
    }

    fn from_control(value: ControlValue) -> Option<Self> {
        match value {
            ControlValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl SettingValue for f64 {
    fn to_control(&self) -> Option<ControlValue> {
        Some(ControlValue::Number(*self))
    }

    fn from_control(value: ControlValue) -> Option<Self> {
        match value {
            ControlValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl SettingValue for String {
    fn to_control(&self) -> Option<ControlValue> {
        Some(ControlValue::Text(self.clone()))
    }

    fn from_control(value: ControlValue) -> Option<Self> {
        match value {
            ControlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Getter/setter pair over externally owned storage
pub struct Accessor<T> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
}

impl<T: 'static> Accessor<T> {
    pub fn new(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Accessor {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Binds one field of a shared settings struct.
    ///
    /// The `RefCell` is only borrowed for the duration of each read or
    /// write, never across an observer call.
    pub fn field<S: 'static>(
        shared: &Rc<RefCell<S>>,
        read: impl Fn(&S) -> T + 'static,
        write: impl Fn(&mut S, T) + 'static,
    ) -> Self {
        let reader = Rc::clone(shared);
        let writer = Rc::clone(shared);
        Accessor::new(
            move || read(&reader.borrow()),
            move |value| write(&mut writer.borrow_mut(), value),
        )
    }

    #[must_use]
    pub fn get(&self) -> T {
        (self.get)()
    }

    pub fn set(&self, value: T) {
        (self.set)(value)
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Accessor {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

type Observer<T> = Rc<dyn Fn(&T)>;

/// A setting bound to externally owned storage
///
/// Bindings are cheap and meant to be rebuilt every time a page is
/// displayed.
pub struct SettingBinding<T> {
    descriptor: SettingDescriptor,
    kind: Rc<SettingKind<T>>,
    default: T,
    accessor: Accessor<T>,
    observer: Rc<RefCell<Option<Observer<T>>>>,
}

impl<T: SettingValue> SettingBinding<T> {
    /// Builds a binding of any kind.
    ///
    /// Prefer the typed constructors ([`SettingBinding::toggle`],
    /// [`SettingBinding::slider`], ...) which tie the kind to a value
    /// type the control can carry.
    pub fn new(
        descriptor: SettingDescriptor,
        kind: SettingKind<T>,
        default: T,
        accessor: Accessor<T>,
    ) -> Self {
        SettingBinding {
            descriptor,
            kind: Rc::new(kind),
            default,
            accessor,
            observer: Rc::new(RefCell::new(None)),
        }
    }

    /// Builds a dropdown over `options`.
    pub fn dropdown(
        descriptor: SettingDescriptor,
        options: DropdownOptions<T>,
        default: T,
        accessor: Accessor<T>,
    ) -> Self {
        SettingBinding::new(descriptor, SettingKind::Dropdown(options), default, accessor)
    }

    #[must_use]
    pub fn descriptor(&self) -> &SettingDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn kind(&self) -> &SettingKind<T> {
        &self.kind
    }

    /// Reads the bound value.
    #[must_use]
    pub fn value(&self) -> T {
        self.accessor.get()
    }

    /// Writes the bound value without notifying the observer.
    pub fn set_value(&self, value: T) {
        self.accessor.set(value);
    }

    /// The value callers should restore on reset.
    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Registers the change observer, replacing any previous one.
    #[must_use]
    pub fn on_change(self, observer: impl Fn(&T) + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    /// In-place form of [`SettingBinding::on_change`].
    ///
    /// Controls already displayed pick up the new observer too.
    pub fn set_observer(&self, observer: impl Fn(&T) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    /// Writes the default value and notifies the observer.
    pub fn reset(&self) {
        commit(&self.accessor, &self.observer, self.default.clone());
    }

    /// Renders the control into `container` and wires its change handler.
    ///
    /// # Errors
    ///
    /// Propagates host errors, and returns
    /// `CoreError::ControlValueMismatch` if the bound type cannot be shown
    /// by this kind of control.
    pub fn display(&self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<ElementId> {
        let kind = self.kind.control_kind();
        let control = host.create_labeled_control(
            kind,
            container,
            self.descriptor.name(),
            self.descriptor.description(),
        )?;

        match &*self.kind {
            SettingKind::Toggle => {}
            SettingKind::Slider(limits) => {
                host.set_limits(control, limits.minimum, limits.maximum, limits.step)?;
            }
            SettingKind::Text { placeholder } | SettingKind::TextArea { placeholder } => {
                if let Some(placeholder) = placeholder {
                    host.set_placeholder(control, placeholder)?;
                }
            }
            SettingKind::Dropdown(options) => {
                for option in options {
                    host.add_option(control, &option.key, &option.label)?;
                }
            }
        }

        if let Some(initial) = self.control_value()? {
            host.set_value(control, initial)?;
        }
        host.on_change(control, self.change_handler())?;

        Ok(control)
    }

    /// The current value as the control should display it.
    ///
    /// For a dropdown whose bound value matches no option this is the
    /// first option's key; the bound value itself is left alone.
    fn control_value(&self) -> CoreResult<Option<ControlValue>> {
        let value = self.value();
        match &*self.kind {
            SettingKind::Dropdown(options) => {
                if !options.contains_value(&value) {
                    tracing::debug!(
                        setting = self.descriptor.name(),
                        "bound value matches no option, showing first option"
                    );
                }
                Ok(options
                    .key_for_value(&value)
                    .map(|key| ControlValue::Key(key.to_string())))
            }
            kind => value
                .to_control()
                .map(Some)
                .ok_or_else(|| CoreError::ControlValueMismatch {
                    kind: kind.control_kind(),
                    found: "unsupported bound type".to_string(),
                }),
        }
    }

    fn change_handler(&self) -> ChangeHandler {
        let kind = Rc::clone(&self.kind);
        let accessor = self.accessor.clone();
        let observer = Rc::clone(&self.observer);
        Box::new(move |value| {
            let next = decode(&kind, value)?;
            commit(&accessor, &observer, next);
            Ok(())
        })
    }
}

impl SettingBinding<bool> {
    /// Builds an on/off toggle.
    pub fn toggle(descriptor: SettingDescriptor, default: bool, accessor: Accessor<bool>) -> Self {
        SettingBinding::new(descriptor, SettingKind::Toggle, default, accessor)
    }
}

impl SettingBinding<f64> {
    /// Builds a numeric slider.
    pub fn slider(
        descriptor: SettingDescriptor,
        limits: SliderLimits,
        default: f64,
        accessor: Accessor<f64>,
    ) -> Self {
        SettingBinding::new(descriptor, SettingKind::Slider(limits), default, accessor)
    }
}

impl SettingBinding<String> {
    /// Builds a single-line text input.
    pub fn text(descriptor: SettingDescriptor, default: String, accessor: Accessor<String>) -> Self {
        SettingBinding::new(
            descriptor,
            SettingKind::Text { placeholder: None },
            default,
            accessor,
        )
    }

    /// Builds a multi-line text input.
    pub fn text_area(
        descriptor: SettingDescriptor,
        default: String,
        accessor: Accessor<String>,
    ) -> Self {
        SettingBinding::new(
            descriptor,
            SettingKind::TextArea { placeholder: None },
            default,
            accessor,
        )
    }

    /// Sets the empty-state hint shown by text controls.
    #[must_use]
    pub fn with_placeholder(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        let kind = match &*self.kind {
            SettingKind::Text { .. } => SettingKind::Text {
                placeholder: Some(hint),
            },
            SettingKind::TextArea { .. } => SettingKind::TextArea {
                placeholder: Some(hint),
            },
            other => other.clone(),
        };
        self.kind = Rc::new(kind);
        self
    }
}

impl<T> fmt::Debug for SettingBinding<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingBinding")
            .field("descriptor", &self.descriptor)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("has_observer", &self.observer.borrow().is_some())
            .finish()
    }
}

/// Type-erased view of a binding, so a page can hold a mixed list.
pub trait Setting {
    fn descriptor(&self) -> &SettingDescriptor;

    fn display(&self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<ElementId>;

    fn reset(&self);
}

impl<T: SettingValue> Setting for SettingBinding<T> {
    fn descriptor(&self) -> &SettingDescriptor {
        SettingBinding::descriptor(self)
    }

    fn display(&self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<ElementId> {
        SettingBinding::display(self, host, container)
    }

    fn reset(&self) {
        SettingBinding::reset(self)
    }
}

/// Displays each setting into `container` in order.
pub fn display_settings(
    settings: &[Box<dyn Setting>],
    host: &mut dyn WidgetHost,
    container: ElementId,
) -> CoreResult<Vec<ElementId>> {
    settings
        .iter()
        .map(|setting| setting.display(host, container))
        .collect()
}

fn decode<T: SettingValue>(kind: &SettingKind<T>, value: ControlValue) -> CoreResult<T> {
    match (kind, value) {
        (SettingKind::Dropdown(options), ControlValue::Key(key)) => options.value_for_key(&key),
        (SettingKind::Dropdown(_), other) => Err(CoreError::ControlValueMismatch {
            kind: ControlKind::Dropdown,
            found: other.shape().to_string(),
        }),
        (kind, other) => {
            let found = other.shape();
            T::from_control(other).ok_or_else(|| CoreError::ControlValueMismatch {
                kind: kind.control_kind(),
                found: found.to_string(),
            })
        }
    }
}

// Observers always receive the value re-read after the write.
fn commit<T>(accessor: &Accessor<T>, observer: &RefCell<Option<Observer<T>>>, value: T)
where
    T: 'static,
{
    accessor.set(value);
    let observer = observer.borrow().clone();
    if let Some(observer) = observer {
        let committed = accessor.get();
        observer(&committed);
    }
}
