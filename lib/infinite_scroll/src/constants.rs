use const_format::formatcp;

pub const ATTRIBUTE_PREFIX: &str = "infinite-scroll-";

pub const DISABLED_KEY: &str = "disabled";
pub const DISTANCE_KEY: &str = "distance";
pub const IMMEDIATE_KEY: &str = "immediate";
pub const DELAY_KEY: &str = "delay";

pub const DISABLED_ATTRIBUTE: &str = formatcp!("{ATTRIBUTE_PREFIX}{DISABLED_KEY}");
pub const DISTANCE_ATTRIBUTE: &str = formatcp!("{ATTRIBUTE_PREFIX}{DISTANCE_KEY}");
pub const IMMEDIATE_ATTRIBUTE: &str = formatcp!("{ATTRIBUTE_PREFIX}{IMMEDIATE_KEY}");
pub const DELAY_ATTRIBUTE: &str = formatcp!("{ATTRIBUTE_PREFIX}{DELAY_KEY}");

pub const DEFAULT_DISABLED: bool = false;
pub const DEFAULT_DISTANCE: f64 = 40.0;
pub const DEFAULT_IMMEDIATE: bool = true;
pub const DEFAULT_DELAY_MS: u64 = 300;
/// Longest delay browser timers accept
pub const MAX_DELAY_MS: u64 = i32::MAX as u64;

pub const SCROLL_EVENT: &str = "scroll";
pub const SCROLLABLE_OVERFLOW_VALUES: [&str; 2] = ["auto", "scroll"];
