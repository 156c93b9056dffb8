use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::wasm_bindgen::closure::Closure;
use leptos::wasm_bindgen::JsCast;
use send_wrapper::SendWrapper;
use web_sys::{Document, Element, HtmlElement, MutationObserver, MutationObserverInit, Node};

use crate::constants::{MAX_DELAY_MS, SCROLL_EVENT};
use crate::directive::InfiniteScroll;
use crate::dom::{AttributeSource, NodeTree, Overflow, Scheduler, ScrollSurface};
use crate::errors::InfiniteScrollError;
use crate::loader::Loader;
use crate::threshold::ScrollMetrics;

/// Browser document, accessed through `web-sys`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebDom;

/// Registered scroll listener, removing it requires the same callback.
pub struct ScrollListener {
    callback: Closure<dyn Fn()>,
}

/// Subtree observer of a container, the callback must outlive the observer.
pub struct MutationWatch {
    observer: MutationObserver,
    _callback: Closure<dyn Fn()>,
}

impl NodeTree for WebDom {
    type Node = Node;

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn is_document(&self, node: &Node) -> bool {
        node.node_type() == Node::DOCUMENT_NODE
    }

    fn computed_overflow(&self, node: &Node) -> Option<Overflow> {
        let element = node.dyn_ref::<Element>()?;
        let style = window().get_computed_style(element).ok().flatten()?;
        Some(Overflow::new(
            style.get_property_value("overflow").unwrap_or_default(),
            style.get_property_value("overflow-y").unwrap_or_default(),
        ))
    }
}

impl AttributeSource for WebDom {
    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        node.dyn_ref::<Element>().and_then(|element| element.get_attribute(name))
    }
}

impl ScrollSurface for WebDom {
    type Listener = ScrollListener;
    type Watch = MutationWatch;

    fn scroll_metrics(&self, node: &Node) -> ScrollMetrics {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            ScrollMetrics::new(
                f64::from(element.offset_height()),
                f64::from(element.scroll_top()),
                f64::from(element.scroll_height()),
            )
        } else if let Some(document) = node.dyn_ref::<Document>() {
            match document.scrolling_element().or_else(|| document.document_element()) {
                Some(root) => ScrollMetrics::new(
                    f64::from(root.client_height()),
                    f64::from(root.scroll_top()),
                    f64::from(root.scroll_height()),
                ),
                None => ScrollMetrics::UNKNOWN,
            }
        } else {
            ScrollMetrics::UNKNOWN
        }
    }

    fn add_scroll_listener(&self, node: &Node, handler: Rc<dyn Fn()>) -> Result<ScrollListener, InfiniteScrollError> {
        let callback = Closure::<dyn Fn()>::new(move || handler());
        node.add_event_listener_with_callback(SCROLL_EVENT, callback.as_ref().unchecked_ref())
            .map_err(|e| InfiniteScrollError::Subscription(format!("{e:?}")))?;
        Ok(ScrollListener { callback })
    }

    fn remove_scroll_listener(&self, node: &Node, listener: ScrollListener) {
        if let Err(e) = node.remove_event_listener_with_callback(SCROLL_EVENT, listener.callback.as_ref().unchecked_ref()) {
            log::error!("Failed to remove scroll listener: {e:?}");
        }
    }

    fn observe_subtree(&self, node: &Node, handler: Rc<dyn Fn()>) -> Result<MutationWatch, InfiniteScrollError> {
        let callback = Closure::<dyn Fn()>::new(move || handler());
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| InfiniteScrollError::Subscription(format!("{e:?}")))?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(node, &init)
            .map_err(|e| InfiniteScrollError::Subscription(format!("{e:?}")))?;
        Ok(MutationWatch { observer, _callback: callback })
    }

    fn disconnect(&self, watch: MutationWatch) {
        watch.observer.disconnect();
    }
}

impl Scheduler for WebDom {
    type Timer = TimeoutHandle;

    fn after_render(&self, task: Box<dyn FnOnce()>) {
        request_animation_frame(task);
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<TimeoutHandle, InfiniteScrollError> {
        // browser timers take the delay as an i32 of milliseconds
        if delay.as_millis() > u128::from(MAX_DELAY_MS) {
            return Err(InfiniteScrollError::Scheduling(format!("delay of {delay:?} exceeds {MAX_DELAY_MS}ms")));
        }
        set_timeout_with_handle(task, delay).map_err(|e| InfiniteScrollError::Scheduling(format!("{e:?}")))
    }

    fn clear_timeout(&self, timer: TimeoutHandle) {
        timer.clear();
    }
}

thread_local! {
    static INFINITE_SCROLL: InfiniteScroll<WebDom> = InfiniteScroll::new(WebDom);
}

/// Directive calling `loader` when the closest scrollable ancestor of the element is scrolled near its end.
///
/// Configured through the `infinite-scroll-disabled`, `infinite-scroll-distance`, `infinite-scroll-immediate` and
/// `infinite-scroll-delay` attributes of the element.
///
/// ```ignore
/// view! {
///     <ul
///         use:infinite_scroll=Loader::new(move || load_count.update(|count| *count += 1))
///         infinite-scroll-disabled=move || is_loading.get()
///     >
///         ...
///     </ul>
/// }
/// ```
pub fn infinite_scroll(el: Element, loader: Loader) {
    let node: Node = el.into();
    INFINITE_SCROLL.with(|infinite_scroll| infinite_scroll.attach(node.clone(), loader));
    let node = SendWrapper::new(node);
    on_cleanup(move || {
        let node = node.take();
        INFINITE_SCROLL.with(|infinite_scroll| infinite_scroll.detach(&node));
    });
}
