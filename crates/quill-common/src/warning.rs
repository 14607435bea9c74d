//! Diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the CSS tokenizer, HTML tokenizer and HTML tree builder to report
//! parse errors.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings reach stderr at all.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// A poisoned lock only means another thread panicked mid-insert; the set is
/// still a valid set of strings.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about a parse error or unsupported construct (prints once per unique message)
///
/// # Example
/// ```
/// use quill_common::warning::warn_once;
///
/// warn_once("HTML Tokenizer", "eof-in-tag at position 7");
/// ```
pub fn warn_once(component: &str, message: &str) {
    warn_once_keyed(component, message, message);
}

/// Like [`warn_once`], but deduplicates on `key` instead of the printed
/// message, so repeats that only differ in detail (such as a position) print
/// once.
pub fn warn_once_keyed(component: &str, key: &str, message: &str) {
    if !ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let key = format!("[{component}] {key}");
    let should_print = warned().get_or_insert_with(HashSet::new).insert(key);

    if should_print {
        eprintln!("{}", format!("[Quill {component}] ⚠ {message}").yellow());
    }
}

/// Turn warning output on or off for the whole process.
pub fn set_warnings_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Clear all recorded warnings (call before scanning a new document)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

/// Number of distinct warnings printed since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    warned().as_ref().map_or(0, HashSet::len)
}

/// Tests touching the global warning set hold this lock so they don't race.
#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn serial() -> MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_repeated_message_is_recorded_once() {
        let _guard = serial();
        clear_warnings();
        warn_once("Test", "eof-in-tag at position 3");
        warn_once("Test", "eof-in-tag at position 3");
        assert_eq!(warning_count(), 1);

        warn_once("Other", "eof-in-tag at position 3");
        assert_eq!(warning_count(), 2);
    }

    #[test]
    fn test_keyed_warnings_dedupe_on_key() {
        let _guard = serial();
        clear_warnings();
        warn_once_keyed("Test", "eof-in-tag", "eof-in-tag at position 3");
        warn_once_keyed("Test", "eof-in-tag", "eof-in-tag at position 9");
        assert_eq!(warning_count(), 1);
    }

    #[test]
    fn test_clear_warnings_allows_reprinting() {
        let _guard = serial();
        clear_warnings();
        warn_once("Test", "missing-doctype");
        assert_eq!(warning_count(), 1);

        clear_warnings();
        assert_eq!(warning_count(), 0);
        warn_once("Test", "missing-doctype");
        assert_eq!(warning_count(), 1);
    }

    #[test]
    fn test_disabled_warnings_are_not_recorded() {
        let _guard = serial();
        clear_warnings();
        set_warnings_enabled(false);
        warn_once("Test", "unexpected-null-character");
        set_warnings_enabled(true);
        assert_eq!(warning_count(), 0);

        warn_once("Test", "unexpected-null-character");
        assert_eq!(warning_count(), 1);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let _guard = serial();
        let result = std::thread::spawn(|| {
            let _held = warned();
            panic!("poison the warning set");
        })
        .join();
        assert!(result.is_err());

        clear_warnings();
        warn_once("Test", "after poison");
        assert_eq!(warning_count(), 1);
    }
}
