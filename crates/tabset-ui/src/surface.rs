//! Retained element tree implementing [`WidgetHost`]
//!
//! [`Surface`] keeps every container, button and control a settings
//! screen creates in an arena. The terminal widgets read it to draw a
//! frame, the [`crate::SettingsApp`] feeds user input back into it with
//! [`Surface::click`] and [`Surface::emit_change`], and tests inspect it
//! directly.
//!
//! # Example
//!
//! ```
//! use tabset_core::{ControlKind, ControlValue, ElementAttrs, WidgetHost};
//! use tabset_ui::Surface;
//!
//! let mut surface = Surface::new();
//! let root = surface.root();
//! let region = surface.create_child(root, "div", ElementAttrs::class("content"))?;
//! let toggle = surface.create_labeled_control(ControlKind::Toggle, region, "Sync", "")?;
//! surface.set_value(toggle, ControlValue::Bool(false))?;
//!
//! assert_eq!(surface.controls_in(region), vec![toggle]);
//! # Ok::<(), tabset_core::CoreError>(())
//! ```

use tabset_core::{
    ChangeHandler, ControlKind, ControlValue, CoreError, CoreResult, ElementAttrs, ElementId,
    Message, SliderLimits, WidgetHost,
};

/// A labeled control and the state the host keeps for it
pub struct Control {
    kind: ControlKind,
    name: String,
    description: String,
    value: Option<ControlValue>,
    limits: Option<SliderLimits>,
    placeholder: Option<String>,
    options: Vec<(String, String)>,
    handler: Option<ChangeHandler>,
}

impl Control {
    fn new(kind: ControlKind, name: &str, description: &str) -> Self {
        Control {
            kind,
            name: name.to_string(),
            description: description.to_string(),
            value: None,
            limits: None,
            placeholder: None,
            options: Vec::new(),
            handler: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Value currently displayed by the control
    #[must_use]
    pub fn value(&self) -> Option<&ControlValue> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn limits(&self) -> Option<SliderLimits> {
        self.limits
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Dropdown `(key, label)` pairs in insertion order
    #[must_use]
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Label of the selected dropdown option, if any
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        match &self.value {
            Some(ControlValue::Key(key)) => self
                .options
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, label)| label.as_str()),
            _ => None,
        }
    }
}

struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    tag: String,
    text: Option<String>,
    classes: Vec<String>,
    click: Option<Message>,
    control: Option<Control>,
}

impl Node {
    fn new(parent: Option<ElementId>, tag: &str) -> Self {
        Node {
            parent,
            children: Vec::new(),
            tag: tag.to_string(),
            text: None,
            classes: Vec::new(),
            click: None,
            control: None,
        }
    }
}

/// Arena-backed element tree
pub struct Surface {
    nodes: Vec<Option<Node>>,
    free: Vec<ElementId>,
    root: ElementId,
}

impl Surface {
    /// Creates a surface holding only a root container.
    #[must_use]
    pub fn new() -> Self {
        Surface {
            nodes: vec![Some(Node::new(None, "root"))],
            free: Vec::new(),
            root: 0,
        }
    }

    /// The top-level container
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Whether `id` refers to a live element
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        matches!(self.nodes.get(id), Some(Some(_)))
    }

    /// Number of live elements, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Children of `id` in creation order; empty for unknown ids
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).ok().and_then(|n| n.parent)
    }

    #[must_use]
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.node(id).ok().map(|n| n.tag.as_str())
    }

    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.node(id).ok().and_then(|n| n.text.as_deref())
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// The control stored at `id`, if it is one
    #[must_use]
    pub fn control(&self, id: ElementId) -> Option<&Control> {
        self.node(id).ok().and_then(|n| n.control.as_ref())
    }

    /// Every control below `container`, in depth-first document order
    #[must_use]
    pub fn controls_in(&self, container: ElementId) -> Vec<ElementId> {
        self.descendants(container)
            .into_iter()
            .filter(|id| self.control(*id).is_some())
            .collect()
    }

    /// Every element below `container` carrying `class`, in document order
    #[must_use]
    pub fn find_by_class(&self, container: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(container)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// Text of every element below `container`, in document order
    #[must_use]
    pub fn texts_in(&self, container: ElementId) -> Vec<&str> {
        self.descendants(container)
            .into_iter()
            .filter_map(|id| self.text(id))
            .collect()
    }

    /// Simulates a click, returning the message wired to the element.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ElementNotFound` for unknown ids.
    pub fn click(&self, id: ElementId) -> CoreResult<Option<Message>> {
        Ok(self.node(id)?.click.clone())
    }

    /// Delivers a change event to a control.
    ///
    /// Slider values are clamped to the limits and snapped to the step
    /// first, as an interactive slider would. The displayed value is
    /// updated only when the handler accepts the change.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ElementNotFound` if `id` is not a control and
    /// propagates whatever the change handler returns.
    pub fn emit_change(&mut self, id: ElementId, value: ControlValue) -> CoreResult<()> {
        let control = self.control_mut(id)?;
        let value = match (value, control.limits) {
            (ControlValue::Number(n), Some(limits)) => ControlValue::Number(limits.snap(n)),
            (other, _) => other,
        };

        if let Some(handler) = control.handler.as_mut() {
            handler(value.clone())?;
        }
        control.value = Some(value);
        Ok(())
    }

    /// Every element below `container`, in depth-first document order
    #[must_use]
    pub fn descendants(&self, container: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(container).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn node(&self, id: ElementId) -> CoreResult<&Node> {
        self.nodes
            .get(id)
            .and_then(Option::as_ref)
            .ok_or(CoreError::ElementNotFound(id))
    }

    fn node_mut(&mut self, id: ElementId) -> CoreResult<&mut Node> {
        self.nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or(CoreError::ElementNotFound(id))
    }

    fn control_mut(&mut self, id: ElementId) -> CoreResult<&mut Control> {
        self.node_mut(id)?
            .control
            .as_mut()
            .ok_or(CoreError::ElementNotFound(id))
    }

    fn insert(&mut self, parent: ElementId, node: Node) -> CoreResult<ElementId> {
        // Validate the parent before allocating.
        self.node(parent)?;
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn remove_subtree(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.get_mut(id).and_then(Option::take) {
            for child in node.children {
                self.remove_subtree(child);
            }
            self.free.push(id);
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetHost for Surface {
    fn create_labeled_control(
        &mut self,
        kind: ControlKind,
        container: ElementId,
        name: &str,
        description: &str,
    ) -> CoreResult<ElementId> {
        let mut node = Node::new(Some(container), kind.as_str());
        node.text = Some(name.to_string());
        node.classes.push("setting-item".to_string());
        node.control = Some(Control::new(kind, name, description));
        self.insert(container, node)
    }

    fn set_value(&mut self, control: ElementId, value: ControlValue) -> CoreResult<()> {
        self.control_mut(control)?.value = Some(value);
        Ok(())
    }

    fn set_limits(&mut self, control: ElementId, min: f64, max: f64, step: f64) -> CoreResult<()> {
        let limits = SliderLimits::new(min, max, step)?;
        self.control_mut(control)?.limits = Some(limits);
        Ok(())
    }

    fn set_placeholder(&mut self, control: ElementId, placeholder: &str) -> CoreResult<()> {
        self.control_mut(control)?.placeholder = Some(placeholder.to_string());
        Ok(())
    }

    fn add_option(&mut self, control: ElementId, key: &str, label: &str) -> CoreResult<()> {
        self.control_mut(control)?
            .options
            .push((key.to_string(), label.to_string()));
        Ok(())
    }

    fn on_change(&mut self, control: ElementId, handler: ChangeHandler) -> CoreResult<()> {
        self.control_mut(control)?.handler = Some(handler);
        Ok(())
    }

    fn empty(&mut self, container: ElementId) -> CoreResult<()> {
        let children = std::mem::take(&mut self.node_mut(container)?.children);
        for child in children {
            self.remove_subtree(child);
        }
        Ok(())
    }

    fn create_child(
        &mut self,
        container: ElementId,
        tag: &str,
        attrs: ElementAttrs,
    ) -> CoreResult<ElementId> {
        let mut node = Node::new(Some(container), tag);
        node.text = attrs.text;
        node.classes.extend(attrs.class);
        self.insert(container, node)
    }

    fn on_click(&mut self, element: ElementId, message: Message) -> CoreResult<()> {
        self.node_mut(element)?.click = Some(message);
        Ok(())
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> CoreResult<()> {
        let node = self.node_mut(element)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> CoreResult<()> {
        self.node_mut(element)?.classes.retain(|c| c != class);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn region(surface: &mut Surface) -> ElementId {
        let root = surface.root();
        surface
            .create_child(root, "div", ElementAttrs::class("content"))
            .expect("root exists")
    }

    #[test]
    fn test_new_surface_has_only_root() {
        let surface = Surface::new();
        assert!(surface.is_empty());
        assert_eq!(surface.len(), 1);
        assert_eq!(surface.tag(surface.root()), Some("root"));
    }

    #[test]
    fn test_create_child_records_attrs() {
        let mut surface = Surface::new();
        let root = surface.root();
        let button = surface
            .create_child(root, "button", ElementAttrs::text("General").with_class("tab"))
            .expect("create");

        assert_eq!(surface.children(root), &[button]);
        assert_eq!(surface.parent(button), Some(root));
        assert_eq!(surface.text(button), Some("General"));
        assert!(surface.has_class(button, "tab"));
    }

    #[test]
    fn test_create_child_unknown_parent_errors() {
        let mut surface = Surface::new();
        let result = surface.create_child(42, "div", ElementAttrs::default());
        assert!(matches!(result, Err(CoreError::ElementNotFound(42))));
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_add_and_remove_class() {
        let mut surface = Surface::new();
        let root = surface.root();
        let el = surface
            .create_child(root, "button", ElementAttrs::default())
            .expect("create");

        surface.add_class(el, "is-active").expect("add");
        surface.add_class(el, "is-active").expect("add twice");
        assert!(surface.has_class(el, "is-active"));

        surface.remove_class(el, "is-active").expect("remove");
        assert!(!surface.has_class(el, "is-active"));
    }

    #[test]
    fn test_empty_removes_descendants_and_reuses_slots() {
        let mut surface = Surface::new();
        let content = region(&mut surface);
        let inner = surface
            .create_child(content, "div", ElementAttrs::default())
            .expect("create");
        let control = surface
            .create_labeled_control(ControlKind::Toggle, inner, "Sync", "")
            .expect("create");

        surface.empty(content).expect("empty");

        assert!(surface.children(content).is_empty());
        assert!(!surface.contains(inner));
        assert!(!surface.contains(control));
        assert!(surface.contains(content));

        let reused = surface
            .create_child(content, "p", ElementAttrs::text("again"))
            .expect("create");
        assert!(reused == inner || reused == control);
    }

    #[test]
    fn test_click_returns_wired_message() {
        let mut surface = Surface::new();
        let root = surface.root();
        let button = surface
            .create_child(root, "button", ElementAttrs::text("Advanced"))
            .expect("create");
        surface
            .on_click(button, Message::SwitchTab(2))
            .expect("wire");

        assert_eq!(surface.click(button).ok(), Some(Some(Message::SwitchTab(2))));
        assert_eq!(surface.click(root).ok(), Some(None));
        assert!(surface.click(99).is_err());
    }

    #[test]
    fn test_controls_in_document_order() {
        let mut surface = Surface::new();
        let content = region(&mut surface);
        let a = surface
            .create_labeled_control(ControlKind::Toggle, content, "A", "")
            .expect("a");
        let group = surface
            .create_child(content, "section", ElementAttrs::text("Group"))
            .expect("group");
        let b = surface
            .create_labeled_control(ControlKind::Slider, group, "B", "")
            .expect("b");
        let c = surface
            .create_labeled_control(ControlKind::Text, content, "C", "")
            .expect("c");

        assert_eq!(surface.controls_in(content), vec![a, b, c]);
        assert_eq!(surface.texts_in(content), vec!["A", "Group", "B", "C"]);
        assert_eq!(surface.find_by_class(content, "setting-item"), vec![a, b, c]);
    }

    #[test]
    fn test_control_setters() {
        let mut surface = Surface::new();
        let content = region(&mut surface);
        let dropdown = surface
            .create_labeled_control(ControlKind::Dropdown, content, "Theme", "Colours")
            .expect("create");
        surface.add_option(dropdown, "dark", "Dark").expect("opt");
        surface.add_option(dropdown, "light", "Light").expect("opt");
        surface
            .set_value(dropdown, ControlValue::Key("light".into()))
            .expect("value");

        let control = surface.control(dropdown).expect("is a control");
        assert_eq!(control.kind(), ControlKind::Dropdown);
        assert_eq!(control.name(), "Theme");
        assert_eq!(control.description(), "Colours");
        assert_eq!(control.options().len(), 2);
        assert_eq!(control.selected_label(), Some("Light"));
        assert!(!control.has_handler());
    }

    #[test]
    fn test_set_value_on_plain_element_errors() {
        let mut surface = Surface::new();
        let content = region(&mut surface);
        let result = surface.set_value(content, ControlValue::Bool(true));
        assert!(matches!(result, Err(CoreError::ElementNotFound(_))));
    }

    #[test]
    fn test_set_limits_rejects_invalid_range() {
        let mut surface = Surface::new();
        let content = region(&mut surface);
        let slider = surface
            .create_labeled_control(ControlKind::Slider, content, "Size", "")
            .expect("create");
        assert!(matches!(
            surface.set_limits(slider, 10.0, 1.0, 1.0),
            Err(CoreError::InvalidSliderLimits { .. })
        ));
    }

    #[test]
    fn test_emit_change_snaps_slider_values() {
        let mut surface = Surface::new();
        let content = region(&mut surface);
        let slider = surface
            .create_labeled_control(ControlKind::Slider, content, "Interval", "")
            .expect("create");
        surface.set_limits(slider, 5.0, 300.0, 5.0).expect("limits");
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        surface
            .on_change(
                slider,
                Box::new(move |v| {
                    sink.borrow_mut().push(v);
                    Ok(())
                }),
            )
            .expect("wire");

        surface
            .emit_change(slider, ControlValue::Number(999.0))
            .expect("change");
        surface
            .emit_change(slider, ControlValue::Number(37.0))
            .expect("change");

        assert_eq!(
            *received.borrow(),
            vec![ControlValue::Number(300.0), ControlValue::Number(35.0)]
        );
        assert_eq!(
            surface.control(slider).and_then(Control::value),
            Some(&ControlValue::Number(35.0))
        );
    }

    #[test]
    fn test_emit_change_failure_keeps_displayed_value() {
        let mut surface = Surface::new();
        let content = region(&mut surface);
        let dropdown = surface
            .create_labeled_control(ControlKind::Dropdown, content, "Mode", "")
            .expect("create");
        surface
            .set_value(dropdown, ControlValue::Key("fast".into()))
            .expect("value");
        surface
            .on_change(
                dropdown,
                Box::new(|v| Err(CoreError::UnknownOptionKey(v.to_string()))),
            )
            .expect("wire");

        let result = surface.emit_change(dropdown, ControlValue::Key("bogus".into()));

        assert!(matches!(result, Err(CoreError::UnknownOptionKey(_))));
        assert_eq!(
            surface.control(dropdown).and_then(Control::value),
            Some(&ControlValue::Key("fast".into()))
        );
    }

    #[test]
    fn test_emit_change_on_non_control_errors() {
        let mut surface = Surface::new();
        let root = surface.root();
        assert!(surface
            .emit_change(root, ControlValue::Bool(true))
            .is_err());
    }
}
