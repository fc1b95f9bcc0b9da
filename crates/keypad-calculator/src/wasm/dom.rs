//! Mock DOM for the calculator markup
//!
//! Stands in for the browser document so the presentation glue (display
//! updates, press flashes, active-instance marking) is testable natively.

use std::collections::HashMap;

/// ID of the live entry field
pub const DISPLAY_CURRENT_ID: &str = "display-current";
/// ID of the expression trace field
pub const DISPLAY_HISTORY_ID: &str = "display-history";
/// ID of the calculator container
pub const CALCULATOR_ID: &str = "calculator";

/// A DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements. On an element registered in a [`MockDom`] this is a
    /// snapshot taken when the child was appended; read live state through
    /// [`MockDom::children_of`] or the ID lookups.
    pub children: Vec<DomElement>,
}

impl DomElement {
    /// Creates an element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a class unless already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks for a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Events delivered to a calculator's markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Pointer click on an element inside the calculator
    Click {
        /// The clicked element's ID
        element_id: String,
    },
    /// Document-level key press
    KeyDown {
        /// The `KeyboardEvent.key` value
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock document holding one calculator's markup
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator shell: container plus both display regions
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();
        dom.register_element(DomElement::new("div").with_id(CALCULATOR_ID).with_class("calculator"));
        dom.append_child(
            CALCULATOR_ID,
            DomElement::new("div")
                .with_id(DISPLAY_HISTORY_ID)
                .with_class("display-history"),
        );
        dom.append_child(
            CALCULATOR_ID,
            DomElement::new("input")
                .with_id(DISPLAY_CURRENT_ID)
                .with_class("display-current")
                .with_attr("readonly", "true")
                .with_attr("value", ""),
        );
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Appends a child to a registered parent and registers the child.
    ///
    /// The parent keeps a snapshot in `children`; later updates by ID only
    /// reach the registered copy.
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.clone());
        }
        self.register_element(child);
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Live registered copies of a parent's children, in append order
    #[must_use]
    pub fn children_of(&self, parent_id: &str) -> Vec<&DomElement> {
        self.elements.get(parent_id).map_or_else(Vec::new, |parent| {
            parent
                .children
                .iter()
                .filter_map(|child| self.elements.get(&child.id))
                .collect()
        })
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Sets element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.text_content = text.to_string();
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Sets an input element's `value`
    pub fn set_element_value(&mut self, id: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.attributes.insert("value".to_string(), value.to_string());
        }
    }

    /// Gets an input element's `value`
    #[must_use]
    pub fn get_element_value(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.get_attr("value"))
    }

    /// Adds a class to an element by ID
    pub fn add_class(&mut self, id: &str, class: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.add_class(class);
        }
    }

    /// Removes a class from an element by ID
    pub fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.remove_class(class);
        }
    }

    /// Checks an element's class by ID
    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }
}
