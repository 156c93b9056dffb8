#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use infinite_scroll::dom::{AttributeSource, NodeTree, Overflow, Scheduler, ScrollSurface};
use infinite_scroll::errors::InfiniteScrollError;
use infinite_scroll::threshold::ScrollMetrics;

pub type NodeId = usize;

struct FakeNode {
    parent: Option<NodeId>,
    is_document: bool,
    overflow: Option<Overflow>,
    attributes: HashMap<String, String>,
    metrics: ScrollMetrics,
}

struct Timer {
    id: u64,
    at: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct FakeState {
    nodes: Vec<FakeNode>,
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
    render_queue: Vec<Box<dyn FnOnce()>>,
    listeners: Vec<(u64, NodeId, Rc<dyn Fn()>)>,
    watches: Vec<(u64, NodeId, Rc<dyn Fn()>)>,
    fail_subscriptions: bool,
}

impl FakeState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory document with a virtual clock.
///
/// Tasks scheduled after render only run on `settle_render`, timers only run on `advance`.
#[derive(Clone, Default)]
pub struct FakeDom {
    state: Rc<RefCell<FakeState>>,
}

impl FakeDom {
    pub fn new() -> Self {
        let dom = FakeDom::default();
        dom.add_node(None, true, None);
        dom
    }

    pub fn document(&self) -> NodeId {
        0
    }

    fn add_node(&self, parent: Option<NodeId>, is_document: bool, overflow: Option<Overflow>) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.nodes.push(FakeNode {
            parent,
            is_document,
            overflow,
            attributes: HashMap::new(),
            metrics: ScrollMetrics::new(0.0, 0.0, 0.0),
        });
        state.nodes.len() - 1
    }

    /// Element with `overflow: visible` below `parent`, or detached when `parent` is `None`.
    pub fn element(&self, parent: Option<NodeId>) -> NodeId {
        self.add_node(parent, false, Some(Overflow::new("visible", "visible")))
    }

    /// Element with `overflow-y: auto` and the given visible and content heights.
    pub fn scroll_container(&self, parent: NodeId, visible_height: f64, content_height: f64) -> NodeId {
        let node = self.add_node(Some(parent), false, Some(Overflow::new("visible", "auto")));
        self.state.borrow_mut().nodes[node].metrics = ScrollMetrics::new(visible_height, 0.0, content_height);
        node
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.state.borrow_mut().nodes[node].attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) {
        self.state.borrow_mut().nodes[node].attributes.remove(name);
    }

    pub fn metrics(&self, node: NodeId) -> ScrollMetrics {
        self.state.borrow().nodes[node].metrics
    }

    pub fn fail_subscriptions(&self) {
        self.state.borrow_mut().fail_subscriptions = true;
    }

    /// Scrolls `node` to `offset` and dispatches its scroll event.
    pub fn scroll_to(&self, node: NodeId, offset: f64) {
        self.state.borrow_mut().nodes[node].metrics.scroll_offset = offset;
        let handlers: Vec<Rc<dyn Fn()>> = self.state.borrow().listeners.iter()
            .filter(|(_, target, _)| *target == node)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Appends content of the given height to `node` and notifies the observers of `node` and its ancestors.
    pub fn append_content(&self, node: NodeId, height: f64) {
        let handlers: Vec<Rc<dyn Fn()>> = {
            let mut state = self.state.borrow_mut();
            state.nodes[node].metrics.content_height += height;
            let mut observed = vec![node];
            let mut current = state.nodes[node].parent;
            while let Some(parent) = current {
                observed.push(parent);
                current = state.nodes[parent].parent;
            }
            state.watches.iter()
                .filter(|(_, target, _)| observed.contains(target))
                .map(|(_, _, handler)| handler.clone())
                .collect()
        };
        for handler in handlers {
            handler();
        }
    }

    /// Runs the tasks waiting for the render to settle.
    pub fn settle_render(&self) {
        let tasks: Vec<Box<dyn FnOnce()>> = self.state.borrow_mut().render_queue.drain(..).collect();
        for task in tasks {
            task();
        }
    }

    /// Moves the clock forward, running due timers in order.
    pub fn advance(&self, duration: Duration) {
        let target = self.state.borrow().now + duration;
        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state.timers.iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.at <= target)
                    .min_by_key(|(_, timer)| (timer.at, timer.id))
                    .map(|(index, _)| index);
                next.map(|index| state.timers.remove(index))
            };
            match due {
                Some(timer) => {
                    self.state.borrow_mut().now = timer.at;
                    (timer.task)();
                }
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.state.borrow().listeners.iter().filter(|(_, target, _)| *target == node).count()
    }

    pub fn watch_count(&self, node: NodeId) -> usize {
        self.state.borrow().watches.iter().filter(|(_, target, _)| *target == node).count()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }
}

impl NodeTree for FakeDom {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.state.borrow().nodes[*node].parent
    }

    fn is_document(&self, node: &NodeId) -> bool {
        self.state.borrow().nodes[*node].is_document
    }

    fn computed_overflow(&self, node: &NodeId) -> Option<Overflow> {
        self.state.borrow().nodes[*node].overflow.clone()
    }
}

impl AttributeSource for FakeDom {
    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.state.borrow().nodes[*node].attributes.get(name).cloned()
    }
}

impl ScrollSurface for FakeDom {
    type Listener = u64;
    type Watch = u64;

    fn scroll_metrics(&self, node: &NodeId) -> ScrollMetrics {
        self.state.borrow().nodes[*node].metrics
    }

    fn add_scroll_listener(&self, node: &NodeId, handler: Rc<dyn Fn()>) -> Result<u64, InfiniteScrollError> {
        let mut state = self.state.borrow_mut();
        if state.fail_subscriptions {
            return Err(InfiniteScrollError::Subscription(String::from("listener refused")));
        }
        let id = state.next_id();
        state.listeners.push((id, *node, handler));
        Ok(id)
    }

    fn remove_scroll_listener(&self, _node: &NodeId, listener: u64) {
        self.state.borrow_mut().listeners.retain(|(id, _, _)| *id != listener);
    }

    fn observe_subtree(&self, node: &NodeId, handler: Rc<dyn Fn()>) -> Result<u64, InfiniteScrollError> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.watches.push((id, *node, handler));
        Ok(id)
    }

    fn disconnect(&self, watch: u64) {
        self.state.borrow_mut().watches.retain(|(id, _, _)| *id != watch);
    }
}

impl Scheduler for FakeDom {
    type Timer = u64;

    fn after_render(&self, task: Box<dyn FnOnce()>) {
        self.state.borrow_mut().render_queue.push(task);
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<u64, InfiniteScrollError> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let at = state.now + delay;
        state.timers.push(Timer { id, at, task });
        Ok(id)
    }

    fn clear_timeout(&self, timer: u64) {
        self.state.borrow_mut().timers.retain(|pending| pending.id != timer);
    }
}
