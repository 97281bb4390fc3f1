//! Engine warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the style resolver and the CLI to report input that was ignored.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning, returning `true` the first time a given
/// `[component] message` pair is seen.
fn record(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about ignored input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("CSS", "unrecognized display value 'flexbox'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(component, message) {
        eprintln!("{}", format!("[Toy {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call before styling a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so that clearing cannot race with the dedup checks.
    #[test]
    fn test_record_deduplicates_until_cleared() {
        assert!(record("Test", "dedup-unique-message"));
        assert!(!record("Test", "dedup-unique-message"));
        // Same message from a different component is a distinct warning
        assert!(record("Other", "dedup-unique-message"));

        clear_warnings();
        assert!(record("Test", "dedup-unique-message"));
    }
}
