//! Display resolution.

/// The `display` property and per-tag defaults.
pub mod display;

pub use display::{DisplayType, default_display_for_tag, parse_display_value};
