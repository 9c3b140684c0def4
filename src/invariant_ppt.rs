//! Runtime invariant checks with contract-test support.
//!
//! Analyzers call [`assert_invariant!`] for the structural properties they
//! rely on (buffer sizes, zeroed borders, contour bookkeeping). Each checked
//! invariant is recorded in a thread-local set, so a test can afterwards
//! demand that a given contract was really exercised.
//!
//! ```rust,ignore
//! use tonguecam::assert_invariant;
//! use tonguecam::invariant_ppt::contract_test;
//!
//! assert_invariant!(
//!     gray.len() == width * height,
//!     "Grayscale buffer has one sample per pixel",
//!     "quality::blur"
//! );
//!
//! #[test]
//! fn contract_sharpness() {
//!     contract_test("sharpness", &["Grayscale buffer has one sample per pixel"]);
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::thread_local;

thread_local! {
    static CHECKED: RefCell<HashSet<&'static str>> = RefCell::new(HashSet::new());
}

/// Assert an invariant and record it for contract testing.
///
/// Panics with `INVARIANT VIOLATION [context]: message` when the condition
/// does not hold. A malformed frame reaching an analyzer is a programming
/// error, so there is no recoverable path here.
#[macro_export]
macro_rules! assert_invariant {
    ($condition:expr, $message:expr) => {
        $crate::invariant_ppt::__assert_invariant_impl($condition, $message, None)
    };
    ($condition:expr, $message:expr, $context:expr) => {
        $crate::invariant_ppt::__assert_invariant_impl($condition, $message, Some($context))
    };
}

#[doc(hidden)]
pub fn __assert_invariant_impl(condition: bool, message: &'static str, context: Option<&str>) {
    CHECKED.with(|checked| {
        checked.borrow_mut().insert(message);
    });

    if !condition {
        panic!(
            "INVARIANT VIOLATION [{}]: {}",
            context.unwrap_or("unknown"),
            message
        );
    }
}

/// Panic unless every listed invariant was checked on this thread.
pub fn contract_test(test_name: &str, required_invariants: &[&str]) {
    let missing: Vec<&str> = CHECKED.with(|checked| {
        let checked = checked.borrow();
        required_invariants
            .iter()
            .copied()
            .filter(|inv| !checked.contains(inv))
            .collect()
    });

    if !missing.is_empty() {
        panic!(
            "CONTRACT FAILURE [{}]: The following invariants were not checked:\n  - {}",
            test_name,
            missing.join("\n  - ")
        );
    }
}

/// Number of distinct invariants checked on this thread so far.
pub fn checked_invariant_count() -> usize {
    CHECKED.with(|checked| checked.borrow().len())
}

/// Forget everything recorded on this thread.
pub fn clear_invariant_log() {
    CHECKED.with(|checked| checked.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_checked_invariants() {
        clear_invariant_log();
        assert_invariant!(true, "always holds", "tests");
        assert_eq!(checked_invariant_count(), 1);
        contract_test("record", &["always holds"]);
    }

    #[test]
    #[should_panic(expected = "INVARIANT VIOLATION [tests]: never holds")]
    fn panics_on_violation() {
        assert_invariant!(false, "never holds", "tests");
    }

    #[test]
    #[should_panic(expected = "CONTRACT FAILURE")]
    fn contract_reports_missing() {
        clear_invariant_log();
        contract_test("missing", &["was never checked"]);
    }
}
