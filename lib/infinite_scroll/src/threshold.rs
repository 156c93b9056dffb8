use crate::constants::{DISABLED_ATTRIBUTE, DISTANCE_ATTRIBUTE};
use crate::dom::{AttributeSource, ScrollSurface};
use crate::loader::Loader;
use crate::options::{read_flag, read_number, ScrollOptions};

/// Scroll metrics of a container, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Height of the visible part of the container
    pub visible_height: f64,
    /// Current vertical scroll offset
    pub scroll_offset: f64,
    /// Total height of the scrollable content
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Metrics of a node that cannot be measured, they never reach the threshold.
    pub const UNKNOWN: ScrollMetrics = ScrollMetrics {
        visible_height: f64::NAN,
        scroll_offset: f64::NAN,
        content_height: f64::NAN,
    };

    pub fn new(visible_height: f64, scroll_offset: f64, content_height: f64) -> Self {
        Self {
            visible_height,
            scroll_offset,
            content_height,
        }
    }
}

/// # Returns whether the end of the content is within `distance` pixels of the bottom of the visible area
///
/// The bound is inclusive. Any `NaN` input never reaches the threshold.
///
/// ```
/// use infinite_scroll::threshold::{should_load, ScrollMetrics};
///
/// assert!(should_load(&ScrollMetrics::new(500.0, 70.0, 600.0), 40.0));
/// assert!(should_load(&ScrollMetrics::new(500.0, 60.0, 600.0), 40.0));
/// assert!(!should_load(&ScrollMetrics::new(500.0, 59.0, 600.0), 40.0));
/// assert!(!should_load(&ScrollMetrics::new(500.0, 0.0, 600.0), f64::NAN));
/// ```
pub fn should_load(metrics: &ScrollMetrics, distance: f64) -> bool {
    let load_height = metrics.visible_height + distance + metrics.scroll_offset;
    metrics.content_height <= load_height
}

/// Threshold check of one attachment, evaluated fresh on every scroll event and content mutation.
pub struct ThresholdCheck<D: AttributeSource + ScrollSurface> {
    pub dom: D,
    pub element: D::Node,
    pub container: D::Node,
    pub loader: Loader,
    /// Fallbacks for attributes that are absent at check time
    pub defaults: ScrollOptions,
}

impl<D: AttributeSource + ScrollSurface> ThresholdCheck<D> {
    /// Calls the loader if the element is enabled and its container is scrolled close enough to the end.
    /// Returns whether the loader was called.
    pub fn run(&self) -> bool {
        if read_flag(&self.dom, &self.element, DISABLED_ATTRIBUTE, self.defaults.disabled) {
            log::trace!("Infinite scroll disabled, skip check.");
            return false;
        }
        let distance = match read_number(&self.dom, &self.element, DISTANCE_ATTRIBUTE, self.defaults.distance) {
            Ok(distance) => distance,
            Err(e) => {
                log::warn!("Skip infinite scroll check: {e}");
                return false;
            }
        };
        let metrics = self.dom.scroll_metrics(&self.container);
        if should_load(&metrics, distance) {
            log::trace!("Scroll threshold reached with {metrics:?}, call loader.");
            self.loader.load();
            true
        } else {
            false
        }
    }
}
