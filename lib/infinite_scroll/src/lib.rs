pub mod constants;
pub mod container;
pub mod directive;
pub mod dom;
pub mod errors;
pub mod loader;
pub mod options;
pub mod threshold;
pub mod throttle;
pub mod web;

pub use directive::{AttachmentState, InfiniteScroll};
pub use loader::Loader;
pub use options::ScrollOptions;
pub use web::{infinite_scroll, WebDom};
