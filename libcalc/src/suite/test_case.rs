use std::fmt;
use crate::error::{ErrorKind, Failure};

pub type TestResult = Result<(), Failure>;

pub type Body<F> = Box<dyn Fn(&F) -> TestResult>;

/// Error a test declares it must raise in order to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Any error except a failed assertion.
    Any,
    Kind(ErrorKind),
}

impl Expected {
    pub fn matches(&self, failure: &Failure) -> bool {
        match *self {
            Expected::Any => failure.kind() != ErrorKind::Assertion,
            Expected::Kind(kind) => failure.kind() == kind,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Expected::Any => write!(f, "an error"),
            Expected::Kind(kind) => write!(f, "a {} error", kind),
        }
    }
}

/// Whether a case runs, decided when the case is built.
pub enum Status<F> {
    Active {
        body: Body<F>,
        expected: Option<Expected>,
    },
    Skipped {
        reason: Option<String>,
    },
}

pub struct TestCase<F> {
    name: String,
    status: Status<F>,
}

impl<F> TestCase<F> {
    pub fn new<B>(name: &str, body: B) -> TestCase<F>
        where B: Fn(&F) -> TestResult + 'static
    {
        TestCase {
            name: name.to_string(),
            status: Status::Active {
                body: Box::new(body),
                expected: None,
            },
        }
    }

    /// The case passes only if its body raises a matching error.
    /// Has no effect on an ignored case.
    pub fn expect_failure(mut self, expected: Expected) -> TestCase<F> {
        if let Status::Active { expected: ref mut slot, .. } = self.status {
            *slot = Some(expected);
        }
        self
    }

    /// Drops the body: an ignored case is reported but never evaluated.
    pub fn ignore(self) -> TestCase<F> {
        self.skip_with(None)
    }

    pub fn ignore_because(self, reason: &str) -> TestCase<F> {
        self.skip_with(Some(reason.to_string()))
    }

    fn skip_with(self, reason: Option<String>) -> TestCase<F> {
        TestCase {
            name: self.name,
            status: Status::Skipped { reason: reason },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &Status<F> {
        &self.status
    }

    pub fn is_skipped(&self) -> bool {
        match self.status {
            Status::Skipped { .. } => true,
            Status::Active { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed,
    Failed(Failure),
    Skipped(Option<String>),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        match *self {
            Outcome::Failed(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Passed => write!(f, "ok"),
            Outcome::Failed(ref failure) => write!(f, "FAILED: {}", failure),
            Outcome::Skipped(None) => write!(f, "ignored"),
            Outcome::Skipped(Some(ref reason)) => write!(f, "ignored, {}", reason),
        }
    }
}
