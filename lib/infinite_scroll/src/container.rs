use crate::constants::SCROLLABLE_OVERFLOW_VALUES;
use crate::dom::{NodeTree, Overflow};
use crate::errors::InfiniteScrollError;

/// # Returns whether an overflow style value lets a node scroll its content
///
/// ```
/// use infinite_scroll::container::is_scrollable_overflow;
///
/// assert!(is_scrollable_overflow("auto"));
/// assert!(is_scrollable_overflow("hidden scroll"));
/// assert!(!is_scrollable_overflow("visible"));
/// assert!(!is_scrollable_overflow("AUTO"));
/// ```
pub fn is_scrollable_overflow(value: &str) -> bool {
    SCROLLABLE_OVERFLOW_VALUES.iter().any(|scrollable| value.contains(scrollable))
}

impl Overflow {
    pub fn is_scrollable(&self) -> bool {
        is_scrollable_overflow(&self.overflow) || is_scrollable_overflow(&self.overflow_y)
    }
}

/// Finds the scroll container of `element`: the element itself or its closest scrollable ancestor, or the document.
///
/// Fails with [`InfiniteScrollError::NoScrollableAncestor`] when the element is not part of a document and none of
/// its ancestors scrolls.
pub fn get_container<T: NodeTree>(tree: &T, element: &T::Node) -> Result<T::Node, InfiniteScrollError> {
    let mut current = Some(element.clone());
    while let Some(node) = current {
        if tree.is_document(&node) {
            return Ok(node);
        }
        if tree.computed_overflow(&node).is_some_and(|overflow| overflow.is_scrollable()) {
            return Ok(node);
        }
        current = tree.parent(&node);
    }
    Err(InfiniteScrollError::NoScrollableAncestor)
}
