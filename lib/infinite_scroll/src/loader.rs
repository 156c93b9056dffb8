use std::fmt;
use std::rc::Rc;

/// Caller supplied action loading more content. Not awaited, the caller keeps track of its own loading state.
#[derive(Clone)]
pub struct Loader(Rc<dyn Fn()>);

impl Loader {
    pub fn new(load: impl Fn() + 'static) -> Self {
        Self(Rc::new(load))
    }

    pub fn load(&self) {
        (self.0)()
    }
}

impl<F: Fn() + 'static> From<F> for Loader {
    fn from(load: F) -> Self {
        Loader::new(load)
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Loader")
    }
}
