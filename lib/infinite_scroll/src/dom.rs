//! Capabilities the infinite scroll core needs from its host document.
//!
//! The core never touches a rendering surface directly: it walks nodes, reads attributes and metrics,
//! subscribes to events and schedules work through these traits. [`crate::web::WebDom`] implements them
//! on top of `web-sys`, tests implement them with an in-memory tree and a virtual clock.

use std::rc::Rc;
use std::time::Duration;

use crate::errors::InfiniteScrollError;
use crate::threshold::ScrollMetrics;

/// Computed `overflow` and `overflow-y` style values of a node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overflow {
    pub overflow: String,
    pub overflow_y: String,
}

impl Overflow {
    pub fn new(overflow: impl Into<String>, overflow_y: impl Into<String>) -> Self {
        Self {
            overflow: overflow.into(),
            overflow_y: overflow_y.into(),
        }
    }
}

/// Ancestor traversal and computed style lookup.
pub trait NodeTree {
    type Node: Clone + PartialEq + 'static;

    /// Parent link of `node`, `None` once the top of the tree is reached.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` is the root document.
    fn is_document(&self, node: &Self::Node) -> bool;

    /// Computed overflow of `node`, `None` for nodes without computed style.
    fn computed_overflow(&self, node: &Self::Node) -> Option<Overflow>;
}

/// Declarative per-element configuration.
pub trait AttributeSource: NodeTree {
    /// Value of attribute `name` on `node`, `None` when the attribute is absent.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
}

/// Scroll metrics, scroll events and subtree mutation notifications of a container.
pub trait ScrollSurface: NodeTree {
    type Listener;
    type Watch;

    fn scroll_metrics(&self, node: &Self::Node) -> ScrollMetrics;

    fn add_scroll_listener(
        &self,
        node: &Self::Node,
        handler: Rc<dyn Fn()>,
    ) -> Result<Self::Listener, InfiniteScrollError>;

    fn remove_scroll_listener(&self, node: &Self::Node, listener: Self::Listener);

    /// Calls `handler` whenever the child list of `node` or of any of its descendants changes.
    fn observe_subtree(
        &self,
        node: &Self::Node,
        handler: Rc<dyn Fn()>,
    ) -> Result<Self::Watch, InfiniteScrollError>;

    fn disconnect(&self, watch: Self::Watch);
}

/// Deferred execution on the host's event loop.
pub trait Scheduler {
    type Timer;

    /// Runs `task` once the current render pass has settled and elements have their final position.
    fn after_render(&self, task: Box<dyn FnOnce()>);

    /// Runs `task` after `delay`. Never runs it synchronously, even for a zero delay.
    fn set_timeout(
        &self,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> Result<Self::Timer, InfiniteScrollError>;

    fn clear_timeout(&self, timer: Self::Timer);
}

/// Everything the attachment lifecycle needs from a host.
pub trait ScrollDom: AttributeSource + ScrollSurface + Scheduler + Clone + 'static {}

impl<T> ScrollDom for T where T: AttributeSource + ScrollSurface + Scheduler + Clone + 'static {}
