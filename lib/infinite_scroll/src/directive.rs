//! Attachment lifecycle of the infinite scroll behaviour.
//!
//! `attach` defers the binding to the host's next render-settled tick, so the element has its final place in the
//! tree before its container is resolved. Every attachment owns its throttled check, its scroll listener and, in
//! immediate mode, a watch on the container's subtree. Several attachments can share one container.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::container::get_container;
use crate::dom::ScrollDom;
use crate::errors::InfiniteScrollError;
use crate::loader::Loader;
use crate::options::ScrollOptions;
use crate::threshold::ThresholdCheck;
use crate::throttle::Throttle;

/// Lifecycle state of an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentState {
    /// Never attached, or detached
    Unattached,
    /// Waiting for the render-settled tick
    Attaching,
    /// Listening to its container
    Attached,
    /// Attach failed, nothing is bound
    Inert(InfiniteScrollError),
}

struct AttachmentRecord<D: ScrollDom> {
    container: D::Node,
    handler: Throttle<D>,
    listener: D::Listener,
    watch: Option<D::Watch>,
}

impl<D: ScrollDom> AttachmentRecord<D> {
    fn release(self, dom: &D) {
        self.handler.cancel();
        dom.remove_scroll_listener(&self.container, self.listener);
        if let Some(watch) = self.watch {
            dom.disconnect(watch);
        }
    }
}

enum Attachment<D: ScrollDom> {
    Pending(u64),
    Bound(AttachmentRecord<D>),
    Inert(InfiniteScrollError),
}

struct Registry<D: ScrollDom> {
    dom: D,
    defaults: ScrollOptions,
    next_token: Cell<u64>,
    // side table keyed by element identity
    records: RefCell<Vec<(D::Node, Attachment<D>)>>,
}

/// Infinite scroll behaviour attachable to any number of elements.
///
/// ```ignore
/// let infinite_scroll = InfiniteScroll::new(dom);
/// infinite_scroll.attach(list_element.clone(), Loader::new(move || load_more()));
/// // ...
/// infinite_scroll.detach(&list_element);
/// ```
pub struct InfiniteScroll<D: ScrollDom> {
    registry: Rc<Registry<D>>,
}

impl<D: ScrollDom> Clone for InfiniteScroll<D> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<D: ScrollDom> InfiniteScroll<D> {
    pub fn new(dom: D) -> Self {
        Self::with_defaults(dom, ScrollOptions::default())
    }

    /// Creates the behaviour with custom fallback options, element attributes still take precedence.
    pub fn with_defaults(dom: D, defaults: ScrollOptions) -> Self {
        Self {
            registry: Rc::new(Registry {
                dom,
                defaults,
                next_token: Cell::new(0),
                records: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn defaults(&self) -> &ScrollOptions {
        &self.registry.defaults
    }

    /// Attaches the behaviour to `element`, calling `loader` whenever its container is scrolled near the end.
    ///
    /// The binding happens after the current render pass. Attaching an attached element rebinds it.
    pub fn attach(&self, element: D::Node, loader: impl Into<Loader>) {
        if self.position(&element).is_some() {
            log::debug!("Element already has an infinite scroll attachment, rebind it.");
            self.detach(&element);
        }
        let token = self.registry.next_token.get();
        self.registry.next_token.set(token + 1);
        self.registry.records.borrow_mut().push((element.clone(), Attachment::Pending(token)));

        let loader = loader.into();
        let this = self.clone();
        self.registry.dom.after_render(Box::new(move || this.complete_attach(element, token, loader)));
    }

    /// Detaches the behaviour from `element`. Safe to call for elements that were never attached or whose attach
    /// did not complete.
    pub fn detach(&self, element: &D::Node) {
        let attachment = match self.position(element) {
            Some(index) => self.registry.records.borrow_mut().remove(index).1,
            None => {
                log::trace!("No infinite scroll attachment to detach.");
                return;
            }
        };
        match attachment {
            Attachment::Bound(record) => {
                record.release(&self.registry.dom);
                log::debug!("Infinite scroll detached.");
            }
            Attachment::Pending(_) => log::debug!("Infinite scroll detached before its attach completed."),
            Attachment::Inert(_) => (),
        }
    }

    pub fn state(&self, element: &D::Node) -> AttachmentState {
        let records = self.registry.records.borrow();
        match records.iter().find(|(node, _)| node == element) {
            None => AttachmentState::Unattached,
            Some((_, Attachment::Pending(_))) => AttachmentState::Attaching,
            Some((_, Attachment::Bound(_))) => AttachmentState::Attached,
            Some((_, Attachment::Inert(error))) => AttachmentState::Inert(error.clone()),
        }
    }

    /// Scroll container the element is bound to.
    pub fn container(&self, element: &D::Node) -> Option<D::Node> {
        let records = self.registry.records.borrow();
        records.iter().find_map(|(node, attachment)| match attachment {
            Attachment::Bound(record) if node == element => Some(record.container.clone()),
            _ => None,
        })
    }

    /// Number of elements with an attachment, whatever its state.
    pub fn len(&self) -> usize {
        self.registry.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position(&self, element: &D::Node) -> Option<usize> {
        self.registry.records.borrow().iter().position(|(node, _)| node == element)
    }

    fn complete_attach(&self, element: D::Node, token: u64, loader: Loader) {
        let index = self.registry.records.borrow().iter().position(|(node, attachment)| {
            node == &element && matches!(attachment, Attachment::Pending(pending) if *pending == token)
        });
        let Some(index) = index else {
            log::trace!("Element detached before the render settled, skip attach.");
            return;
        };

        match self.bind(&element, loader) {
            Ok((record, immediate)) => {
                let handler = record.handler.clone();
                self.registry.records.borrow_mut()[index].1 = Attachment::Bound(record);
                log::debug!("Infinite scroll attached, immediate: {immediate}, delay: {:?}.", handler.delay());
                if immediate {
                    handler.call();
                }
            }
            Err(e) => {
                log::warn!("Infinite scroll inert: {e}");
                self.registry.records.borrow_mut()[index].1 = Attachment::Inert(e);
            }
        }
    }

    /// Resolves the container and subscribes a throttled threshold check to it.
    fn bind(&self, element: &D::Node, loader: Loader) -> Result<(AttachmentRecord<D>, bool), InfiniteScrollError> {
        let dom = &self.registry.dom;
        let options = ScrollOptions::read(dom, element, &self.registry.defaults)?;
        let container = get_container(dom, element)?;

        let check = ThresholdCheck {
            dom: dom.clone(),
            element: element.clone(),
            container: container.clone(),
            loader,
            defaults: self.registry.defaults,
        };
        let handler = Throttle::new(dom.clone(), options.delay, move || {
            check.run();
        });
        let on_change: Rc<dyn Fn()> = {
            let handler = handler.clone();
            Rc::new(move || handler.call())
        };

        let watch = match options.immediate {
            true => Some(dom.observe_subtree(&container, on_change.clone())?),
            false => None,
        };
        let listener = match dom.add_scroll_listener(&container, on_change) {
            Ok(listener) => listener,
            Err(e) => {
                if let Some(watch) = watch {
                    dom.disconnect(watch);
                }
                return Err(e);
            }
        };

        Ok((
            AttachmentRecord {
                container,
                handler,
                listener,
                watch,
            },
            options.immediate,
        ))
    }
}

impl<D: ScrollDom> Drop for Registry<D> {
    fn drop(&mut self) {
        for (_, attachment) in self.records.get_mut().drain(..) {
            if let Attachment::Bound(record) = attachment {
                record.release(&self.dom);
            }
        }
    }
}
