use core::fmt;

use thiserror::Error;

use crate::warning::warn_once_keyed;

/// A parse error reported by a tokenizer.
///
/// Parse errors never stop a scan. The tokenizer records one, takes its
/// recovery path and carries on; callers inspect the collected list when
/// they care about conformance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{code} at position {position}")]
pub struct ParseError<C: fmt::Debug + fmt::Display> {
    /// The named error code.
    pub code: C,
    /// Code-point index at which the error was detected.
    pub position: usize,
}

impl<C: fmt::Debug + fmt::Display> ParseError<C> {
    /// Create a new parse error.
    #[must_use]
    pub const fn new(code: C, position: usize) -> Self {
        Self { code, position }
    }

    /// Print this error through the warning reporter.
    ///
    /// Repeats of the same code print once; the position only appears in the
    /// printed line.
    pub fn report(&self, component: &str) {
        warn_once_keyed(component, &self.code.to_string(), &self.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::{TEST_LOCK, clear_warnings, warning_count};
    use std::sync::PoisonError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Code;

    impl fmt::Display for Code {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("eof-in-tag")
        }
    }

    #[test]
    fn test_display_carries_code_and_position() {
        let error = ParseError::new(Code, 12);
        assert_eq!(error.to_string(), "eof-in-tag at position 12");
    }

    #[test]
    fn test_report_dedupes_on_code_not_position() {
        let _guard = TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        clear_warnings();
        ParseError::new(Code, 4).report("Test");
        ParseError::new(Code, 17).report("Test");
        assert_eq!(warning_count(), 1);
    }
}
