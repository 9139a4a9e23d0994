//! Control Signals
//!
//! A test body returns `TestResult`. The `Err` side is not a domain error but
//! an instruction to the runner: the test already reported a failure, it asked
//! to be skipped, or an error escaped from the code under test.

use std::any::TypeId;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Return type of every test entry point
pub type TestResult = Result<(), Signal>;

/// Early-return reasons understood by the runner
#[derive(Debug)]
pub enum Signal {
    /// A check failed and its diagnostic was already printed
    Failed,
    /// The test skipped itself with the given message
    Skipped(String),
    /// An error escaped the test body through `?`
    Raised(RaisedError),
}

impl Signal {
    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Failed => "failed",
            Signal::Skipped(_) => "skipped",
            Signal::Raised(_) => "raised",
        }
    }
}

// Signal must not implement `Error`: this conversion would overlap `From<T> for T`
impl<E> From<E> for Signal
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Signal::Raised(RaisedError::new(error))
    }
}

/// An error value that escaped a test body, with its concrete type remembered
#[derive(Debug)]
pub struct RaisedError {
    type_id: TypeId,
    type_name: &'static str,
    message: String,
}

impl RaisedError {
    /// Capture `error` and its type
    pub fn new<E: StdError + Send + Sync + 'static>(error: E) -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: std::any::type_name::<E>(),
            message: error.to_string(),
        }
    }

    /// `TypeId` of the original error type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full path of the original error type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `Display` rendering of the original error
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RaisedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Why a test ended up counted as failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// A comparison or check did not hold
    #[error("assertion failed")]
    AssertionFailure,

    /// A panic or error escaped that nobody expected
    #[error("unexpected error: {0}")]
    UnexpectedException(String),

    /// The test was marked as expected to fail but passed
    #[error("This test should have failed but didn't. Check the code!")]
    ExpectedFailureViolated,

    /// The test expected an error of the named type which never came
    #[error("expected {0} to be raised, but nothing was")]
    ExceptionNotThrown(String),

    /// The test expected an error of one type and got another
    #[error("expected {expected} to be raised, but got: {actual}")]
    WrongException {
        /// Full path of the expected type
        expected: String,
        /// Type and message of what escaped instead
        actual: String,
    },
}

/// Leave the current test as skipped
///
/// Used as `return skip("no AVX on this machine");` or through `skip!`.
pub fn skip(message: impl Into<String>) -> TestResult {
    Err(Signal::Skipped(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("bad input: {0}")]
    struct BadInput(u32);

    fn parse(raw: u32) -> Result<u32, BadInput> {
        if raw > 5 {
            Err(BadInput(raw))
        } else {
            Ok(raw)
        }
    }

    fn raising() -> TestResult {
        let value = parse(7)?;
        assert_eq!(value, 7);
        Ok(())
    }

    #[test]
    fn test_question_mark_captures_type() {
        match raising() {
            Err(Signal::Raised(raised)) => {
                assert_eq!(raised.type_id(), TypeId::of::<BadInput>());
                assert!(raised.type_name().ends_with("BadInput"));
                assert_eq!(raised.message(), "bad input: 7");
                assert_eq!(raised.to_string(), "bad input: 7");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_io_error_converts() {
        let signal: Signal = std::io::Error::other("disk gone").into();
        assert_eq!(signal.label(), "raised");
    }

    #[test]
    fn test_skip_helper() {
        match skip("needs AVX") {
            Err(Signal::Skipped(msg)) => assert_eq!(msg, "needs AVX"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            FailureKind::ExpectedFailureViolated.to_string(),
            "This test should have failed but didn't. Check the code!"
        );
        assert_eq!(
            FailureKind::UnexpectedException("boom".into()).to_string(),
            "unexpected error: boom"
        );
        let wrong = FailureKind::WrongException {
            expected: "core::fmt::Error".into(),
            actual: "ParseIntError: invalid digit".into(),
        };
        assert_eq!(
            wrong.to_string(),
            "expected core::fmt::Error to be raised, but got: ParseIntError: invalid digit"
        );
    }
}
