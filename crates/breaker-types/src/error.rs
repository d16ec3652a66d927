//! Unified error interface for Breaker.
//!
//! Every Breaker error type implements [`ErrorCode`] so that
//! embedders can branch on a stable machine-readable code instead of
//! matching on display strings.
//!
//! # Code Format
//!
//! - **UPPER_SNAKE_CASE**: e.g. `"SOLVER_CANCELLED"`
//! - **Prefixed per crate**: `CIRCUIT_` for the data model,
//!   `SOLVER_` for the runtime
//! - **Stable**: a code is an API contract and must not change
//!
//! # Example
//!
//! ```
//! use breaker_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LeafError {
//!     Unavailable,
//! }
//!
//! impl ErrorCode for LeafError {
//!     fn code(&self) -> &'static str {
//!         "LEAF_UNAVAILABLE"
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let err = LeafError::Unavailable;
//! assert_eq!(err.code(), "LEAF_UNAVAILABLE");
//! assert!(err.is_recoverable());
//! ```

/// Machine-readable error code contract.
///
/// An error is **recoverable** when retrying the failed operation may
/// succeed. A cancelled evaluation is not recoverable: the value is
/// gone and resubmitting the circuit is a new computation, not a
/// retry.
pub trait ErrorCode {
    /// Returns the stable, machine-readable code for this error.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows the workspace conventions.
///
/// # Checks
///
/// 1. Code is non-empty
/// 2. Code starts with `expected_prefix`
/// 3. Code is UPPER_SNAKE_CASE
///
/// # Panics
///
/// Panics with a descriptive message when any check fails. Intended
/// for use in tests.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Asserts every variant of an error enum at once.
///
/// # Example
///
/// ```
/// use breaker_types::{assert_error_codes, ErrorCode};
///
/// #[derive(Debug)]
/// enum MyError { A, B }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::A => "MY_A",
///             Self::B => "MY_B",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[MyError::A, MyError::B], "MY_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestError {
        Soft,
        Hard,
    }

    impl ErrorCode for TestError {
        fn code(&self) -> &'static str {
            match self {
                Self::Soft => "TEST_SOFT",
                Self::Hard => "TEST_HARD",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Soft)
        }
    }

    #[test]
    fn trait_contract() {
        assert_eq!(TestError::Soft.code(), "TEST_SOFT");
        assert!(TestError::Soft.is_recoverable());
        assert!(!TestError::Hard.is_recoverable());
    }

    #[test]
    fn valid_codes_pass() {
        assert_error_codes(&[TestError::Soft, TestError::Hard], "TEST_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn wrong_prefix_panics() {
        assert_error_code(&TestError::Soft, "OTHER_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("SOLVER_CANCELLED"));
        assert!(is_upper_snake_case("CODE_2"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("solver_cancelled"));
        assert!(!is_upper_snake_case("_SOLVER"));
        assert!(!is_upper_snake_case("SOLVER_"));
        assert!(!is_upper_snake_case("SOLVER__CANCELLED"));
    }
}
