use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::dom::Scheduler;

struct ThrottleState<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    task: Box<dyn Fn()>,
    pending: RefCell<Option<S::Timer>>,
}

/// Rate limiter running its task at most once per `delay` window.
///
/// The first call of a burst arms a timer and the task runs when it fires. Calls made while the timer is armed
/// are dropped, they are neither queued nor replayed. The task is bound at construction and receives no arguments.
pub struct Throttle<S: Scheduler> {
    state: Rc<ThrottleState<S>>,
}

impl<S: Scheduler> Clone for Throttle<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<S: Scheduler + 'static> Throttle<S> {
    pub fn new(scheduler: S, delay: Duration, task: impl Fn() + 'static) -> Self {
        Self {
            state: Rc::new(ThrottleState {
                scheduler,
                delay,
                task: Box::new(task),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.state.delay
    }

    /// Whether a timer is armed and further calls are dropped.
    pub fn is_pending(&self) -> bool {
        self.state.pending.borrow().is_some()
    }

    /// Arms the throttle window unless it is already armed.
    pub fn call(&self) {
        if self.is_pending() {
            log::trace!("Throttle window active, drop call.");
            return;
        }
        let state = Rc::downgrade(&self.state);
        match self.state.scheduler.set_timeout(self.state.delay, Box::new(move || fire(state))) {
            Ok(timer) => *self.state.pending.borrow_mut() = Some(timer),
            Err(e) => log::error!("Failed to arm throttle window: {e}"),
        }
    }

    /// Clears the armed timer, if any. The task will not run for the current window.
    pub fn cancel(&self) {
        let timer = self.state.pending.borrow_mut().take();
        if let Some(timer) = timer {
            self.state.scheduler.clear_timeout(timer);
        }
    }
}

fn fire<S: Scheduler>(state: Weak<ThrottleState<S>>) {
    // a dropped throttle has been torn down, its task must not run anymore
    let Some(state) = state.upgrade() else {
        return;
    };
    state.pending.borrow_mut().take();
    (state.task)();
}
