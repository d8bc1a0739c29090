//! The UI capability set a [`Gallery`](crate::gallery::Gallery) runs against.
//!
//! [`Host`] is the minimal surface the widget needs from a rendering
//! environment: query by selector, read and write attributes, toggle classes,
//! create and attach elements, listen for clicks, and schedule deferred work.
//! A browser binding would implement it over the real DOM.
//! [`memory::Document`] is the in-process implementation used by the tests and
//! the `simulate` command.
//!
//! The model is single threaded. Listener and timer callbacks receive the host
//! by `&mut` and may freely mutate it; nothing is ever invoked re-entrantly from
//! inside another host call.

pub mod memory;

use crate::selector::Selector;
use std::fmt;
use std::rc::Rc;

/// Click listener registered on an element. Shared (`Rc`) so a host can clone
/// the list of listeners before dispatching into them.
pub type ClickListener<H> = Rc<dyn Fn(&mut H, &mut ClickEvent<<H as Host>::Node>)>;

/// One-shot callback run when a timer fires.
pub type TimerCallback<H> = Box<dyn FnOnce(&mut H)>;

/// Handle returned by [`Host::set_timeout`], accepted by [`Host::clear_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// A click delivered to a listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent<N> {
    /// The element actually struck.
    pub target: N,
    /// The element whose listener is running (the target or an ancestor).
    pub current_target: N,
    default_prevented: bool,
}

impl<N: Copy> ClickEvent<N> {
    pub fn new(target: N) -> Self {
        Self {
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    /// Suppress the host's default action, e.g. following a link.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub trait Host: Sized + 'static {
    type Node: Copy + Eq + fmt::Debug + 'static;

    /// All elements matching `selector`, in document order. With a scope, only
    /// descendants of the scope are returned (the scope itself is excluded).
    fn query_selector_all(&self, scope: Option<Self::Node>, selector: &Selector)
    -> Vec<Self::Node>;

    /// First element matching `selector`, in document order.
    fn query_selector(&self, scope: Option<Self::Node>, selector: &Selector) -> Option<Self::Node> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    fn tag_name(&self, node: Self::Node) -> String;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: Self::Node, class: &str);

    fn remove_class(&mut self, node: Self::Node, class: &str);

    fn set_style(&mut self, node: Self::Node, property: &str, value: &str);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    fn body(&self) -> Self::Node;

    fn add_click_listener(&mut self, node: Self::Node, listener: ClickListener<Self>);

    /// Run `callback` once, `delay_ms` milliseconds from now. Never runs the
    /// callback synchronously, even with a zero delay.
    fn set_timeout(&mut self, delay_ms: u64, callback: TimerCallback<Self>) -> TimerId;

    /// Cancel a pending timer. Unknown or already fired ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);
}
