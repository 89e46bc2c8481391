use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DivisionError {
    #[error("attempt to divide {dividend} by zero")]
    DivideByZero { dividend: i64 },
    #[error("quotient of {dividend} / {divisor} does not fit in an i64")]
    Overflow { dividend: i64, divisor: i64 },
}

/// Lifecycle slot a hook was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    BeforeAll,
    BeforeEach,
    AfterEach,
    AfterAll,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            HookKind::BeforeAll => "before-all",
            HookKind::BeforeEach => "before-each",
            HookKind::AfterEach => "after-each",
            HookKind::AfterAll => "after-all",
        };
        f.write_str(name)
    }
}

/// Anything a hook or a test body can hand back to the runner.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Failure {
    #[error(transparent)]
    Division(#[from] DivisionError),
    #[error("assertion failed: {0}")]
    Assertion(String),
    #[error("panicked: {0}")]
    Panic(String),
    #[error("shared fixture unavailable: {0}")]
    Fixture(Box<Failure>),
    #[error("{hook} hook failed: {failure}")]
    Hook { hook: HookKind, failure: Box<Failure> },
}

/// Fieldless view of a `Failure`, used to declare expected errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Division,
    Assertion,
    Panic,
    Fixture,
    Hook,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            ErrorKind::Division => "division",
            ErrorKind::Assertion => "assertion",
            ErrorKind::Panic => "panic",
            ErrorKind::Fixture => "fixture",
            ErrorKind::Hook => "hook",
        };
        f.write_str(name)
    }
}

impl Failure {
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Failure::Division(_) => ErrorKind::Division,
            Failure::Assertion(_) => ErrorKind::Assertion,
            Failure::Panic(_) => ErrorKind::Panic,
            Failure::Fixture(_) => ErrorKind::Fixture,
            Failure::Hook { .. } => ErrorKind::Hook,
        }
    }

    pub fn hook(hook: HookKind, failure: Failure) -> Self {
        Failure::Hook {
            hook: hook,
            failure: Box::new(failure),
        }
    }
}

#[test]
fn test_division_error_converts_into_failure() {
    let failure: Failure = DivisionError::DivideByZero { dividend: 10 }.into();
    assert_eq!(failure.kind(), ErrorKind::Division);
    assert_eq!(failure.to_string(), "attempt to divide 10 by zero");
}

#[test]
fn test_hook_failure_message_names_the_hook() {
    let failure = Failure::hook(HookKind::AfterEach, Failure::Assertion("closed".to_string()));
    assert_eq!(failure.kind(), ErrorKind::Hook);
    assert_eq!(failure.to_string(), "after-each hook failed: assertion failed: closed");
}
