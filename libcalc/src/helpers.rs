use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use crate::error::Failure;

thread_local! {
    static GUARDING: Cell<bool> = Cell::new(false);
}

static QUIET_HOOK: Once = Once::new();

/// Returns `Err(Failure::Assertion)` from the enclosing function unless the
/// condition holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr) => {
        $crate::ensure!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return ::std::result::Result::Err(
                $crate::error::Failure::Assertion(format!($($arg)+)));
        }
    };
}

#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return ::std::result::Result::Err(
                        $crate::error::Failure::Assertion(format!(
                            "`{} == {}` (left: `{:?}`, right: `{:?}`)",
                            stringify!($left), stringify!($right), left, right)));
                }
            }
        }
    };
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Wraps the process panic hook once so it stays silent on threads that are
/// inside `guarded`; other panics still reach the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !GUARDING.with(|guarding| guarding.get()) {
                previous(info);
            }
        }));
    });
}

fn is_guarding() -> bool {
    GUARDING.with(|guarding| guarding.get())
}

/// Runs `call`, turning a panic into `Failure::Panic`.
pub fn guarded<T, C>(call: C) -> Result<T, Failure>
    where C: FnOnce() -> Result<T, Failure>
{
    install_quiet_hook();
    let outer = GUARDING.with(|guarding| guarding.replace(true));
    let caught = panic::catch_unwind(AssertUnwindSafe(call));
    GUARDING.with(|guarding| guarding.set(outer));
    match caught {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            debug!("caught panic: {}", message);
            Err(Failure::Panic(message))
        }
    }
}

#[cfg(test)]
fn compare(left: i64, right: i64) -> Result<(), Failure> {
    ensure_eq!(left, right);
    ensure!(left >= 0, "{} is negative", left);
    Ok(())
}

#[test]
fn test_ensure_macros() {
    assert_eq!(compare(3, 3), Ok(()));
    assert_eq!(
        compare(3, 4),
        Err(Failure::Assertion("`left == right` (left: `3`, right: `4`)".to_string())));
    assert_eq!(compare(-1, -1), Err(Failure::Assertion("-1 is negative".to_string())));
}

#[test]
fn test_guarded_catches_panics() {
    let caught: Result<(), Failure> = guarded(|| panic!("boom {}", 7));
    assert_eq!(caught, Err(Failure::Panic("boom 7".to_string())));

    let passed = guarded(|| Ok(5));
    assert_eq!(passed, Ok(5));
}

#[test]
fn test_guarded_restores_panic_reporting() {
    assert!(!is_guarding());
    let nested: Result<(), Failure> = guarded(|| {
        assert!(is_guarding());
        let inner: Result<(), Failure> = guarded(|| panic!("inner"));
        assert_eq!(inner, Err(Failure::Panic("inner".to_string())));
        assert!(is_guarding());
        panic!("outer")
    });
    assert_eq!(nested, Err(Failure::Panic("outer".to_string())));
    assert!(!is_guarding());
}
