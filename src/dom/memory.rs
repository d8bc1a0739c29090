//! In-memory [`Host`] with a virtual clock.
//!
//! Elements live in an arena and are addressed by [`NodeId`]. Timers never
//! fire on their own: [`Document::advance`] moves the clock forward and runs
//! every timer that comes due, in due-time order (ties broken by scheduling
//! order). Clicks dispatched with [`Document::click`] bubble from the target
//! up through its ancestors, like a browser's bubbling phase.
//!
//! ```text
//! html
//! └── body        ← Document::body()
//!     └── ...     ← everything built by callers
//! ```

use super::{ClickEvent, ClickListener, Host, TimerCallback, TimerId};
use crate::selector::Selector;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

pub struct Document {
    elements: Vec<Element>,
    root: NodeId,
    body: NodeId,
    listeners: Vec<(NodeId, ClickListener<Document>)>,
    /// Keyed by `(due, id)` so iteration order is firing order.
    timers: BTreeMap<(u64, TimerId), TimerCallback<Document>>,
    now: u64,
    next_timer: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            elements: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            listeners: Vec::new(),
            timers: BTreeMap::new(),
            now: 0,
            next_timer: 1,
        };
        doc.root = doc.create_element("html");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.body);
        doc
    }

    /// Create a detached element with the given attributes. A `class`
    /// attribute is split into the element's class list.
    pub fn element(&mut self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(node, name, value);
        }
        node
    }

    /// Shorthand for [`Host::append_child`].
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.append_child(parent, child);
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.elements[node.0].children
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.elements[node.0].style.get(property).map(String::as_str)
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest pending timer.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.keys().next().map(|&(due, _)| due)
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.iter().filter(|(n, _)| *n == node).count()
    }

    /// Move the clock forward by `ms`, running every timer that comes due.
    /// Timers scheduled by those callbacks run too if they fall in the window.
    pub fn advance(&mut self, ms: u64) {
        self.advance_to(self.now.saturating_add(ms));
    }

    /// Move the clock to `time` (never backwards), running due timers.
    pub fn advance_to(&mut self, time: u64) {
        let target = time.max(self.now);
        while let Some(entry) = self.timers.first_entry() {
            if entry.key().0 > target {
                break;
            }
            let ((due, _), callback) = entry.remove_entry();
            self.now = due;
            callback(self);
        }
        self.now = target;
    }

    /// Dispatch a click on `target`, bubbling through its ancestors.
    pub fn click(&mut self, target: NodeId) -> ClickEvent<NodeId> {
        let mut event = ClickEvent::new(target);
        let mut current = Some(target);
        while let Some(node) = current {
            let listeners: Vec<ClickListener<Document>> = self
                .listeners
                .iter()
                .filter(|(n, _)| *n == node)
                .map(|(_, l)| l.clone())
                .collect();
            event.current_target = node;
            for listener in listeners {
                listener(self, &mut event);
            }
            current = self.elements[node.0].parent;
        }
        event
    }

    fn descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.elements[node.0].children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.elements[child.0].parent.take() {
            self.elements[parent.0].children.retain(|&c| c != child);
        }
    }
}

impl Host for Document {
    type Node = NodeId;

    fn query_selector_all(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let mut candidates = Vec::new();
        match scope {
            Some(node) => self.descendants(node, &mut candidates),
            None => {
                candidates.push(self.root);
                self.descendants(self.root, &mut candidates);
            }
        }
        candidates
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.elements[node.0].tag.clone()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements[node.0].parent
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let element = &self.elements[node.0];
        if name == "class" {
            return (!element.classes.is_empty()).then(|| element.classes.join(" "));
        }
        element.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let element = &mut self.elements[node.0];
        if name == "class" {
            element.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.elements[node.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.elements[node.0].classes.retain(|c| c != class);
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.elements[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        NodeId(self.elements.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn add_click_listener(&mut self, node: NodeId, listener: ClickListener<Self>) {
        self.listeners.push((node, listener));
    }

    fn set_timeout(&mut self, delay_ms: u64, callback: TimerCallback<Self>) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert((self.now.saturating_add(delay_ms), id), callback);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|&(_, timer), _| timer != id);
    }
}
