use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dom::AttributeSource;
use crate::errors::InfiniteScrollError;

/// Options of one infinite scroll attachment.
///
/// `disabled` and `distance` are re-read from the element at every check, `immediate` and `delay` only act at attach time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    pub disabled: bool,
    /// Distance in pixels from the end of the content under which the loader is called
    pub distance: f64,
    /// Whether the loader keeps being called until the container is filled
    pub immediate: bool,
    /// Throttle window of the loader, in milliseconds when serialized
    #[serde(with = "milliseconds")]
    pub delay: Duration,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            disabled: DEFAULT_DISABLED,
            distance: DEFAULT_DISTANCE,
            immediate: DEFAULT_IMMEDIATE,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl ScrollOptions {
    /// # Reads the options declared on `node`, falling back to `defaults` for absent attributes.
    ///
    /// Fails with [`InfiniteScrollError::InvalidOption`] when `distance` or `delay` is not a non-negative number, or
    /// when `delay` exceeds [`MAX_DELAY_MS`].
    pub fn read<S: AttributeSource>(
        source: &S,
        node: &S::Node,
        defaults: &ScrollOptions,
    ) -> Result<ScrollOptions, InfiniteScrollError> {
        let delay_ms = read_number(source, node, DELAY_ATTRIBUTE, defaults.delay.as_micros() as f64 / 1000.0)?;
        if delay_ms > MAX_DELAY_MS as f64 {
            return Err(InfiniteScrollError::invalid_option(DELAY_KEY, delay_ms));
        }
        Ok(ScrollOptions {
            disabled: read_flag(source, node, DISABLED_ATTRIBUTE, defaults.disabled),
            distance: read_number(source, node, DISTANCE_ATTRIBUTE, defaults.distance)?,
            immediate: read_flag(source, node, IMMEDIATE_ATTRIBUTE, defaults.immediate),
            delay: Duration::from_micros((delay_ms * 1000.0).round() as u64),
        })
    }
}

/// Reads the boolean option declared by attribute `name`, any declared value counts as `true`.
pub fn read_flag<S: AttributeSource>(source: &S, node: &S::Node, name: &str, default: bool) -> bool {
    match source.attribute(node, name) {
        Some(_) => true,
        None => default,
    }
}

/// Reads the numeric option declared by attribute `name`, `default` when the attribute is absent.
pub fn read_number<S: AttributeSource>(
    source: &S,
    node: &S::Node,
    name: &str,
    default: f64,
) -> Result<f64, InfiniteScrollError> {
    match source.attribute(node, name) {
        Some(value) => parse_number(option_key(name), &value),
        None => Ok(default),
    }
}

/// # Returns the option key of an attribute name
///
/// ```
/// use infinite_scroll::constants::{DISTANCE_ATTRIBUTE, DISTANCE_KEY};
/// use infinite_scroll::options::option_key;
///
/// assert_eq!(option_key(DISTANCE_ATTRIBUTE), DISTANCE_KEY);
/// assert_eq!(option_key("data-other"), "data-other");
/// ```
pub fn option_key(name: &str) -> &str {
    name.strip_prefix(ATTRIBUTE_PREFIX).unwrap_or(name)
}

/// # Parses the value of a numeric option, rejecting non-finite and negative numbers
///
/// ```
/// use infinite_scroll::options::parse_number;
/// use infinite_scroll::errors::InfiniteScrollError;
///
/// assert_eq!(parse_number("distance", " 80 "), Ok(80.0));
/// assert_eq!(parse_number("delay", "12.5"), Ok(12.5));
/// assert_eq!(parse_number("distance", "far"), Err(InfiniteScrollError::invalid_option("distance", "far")));
/// assert!(parse_number("distance", "-1").is_err());
/// assert!(parse_number("delay", "NaN").is_err());
/// ```
pub fn parse_number(key: &str, value: &str) -> Result<f64, InfiniteScrollError> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(number),
        _ => Err(InfiniteScrollError::invalid_option(key, value)),
    }
}

mod milliseconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(delay.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
