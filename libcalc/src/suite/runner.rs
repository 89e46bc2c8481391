use crate::error::{Failure, HookKind};
use crate::helpers::guarded;
use super::{Hook, Suite};
use super::fixture::Fixture;
use super::report::Report;
use super::test_case::{Body, Expected, Outcome, Status, TestResult};

#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Only run cases whose name contains this string.
    pub filter: Option<String>,
    /// Stop a suite at its first failed case. Active cases after the stop
    /// count as `not_run`; ignored ones are still reported as skipped.
    pub fail_fast: bool,
}

impl RunConfig {
    pub fn selects(&self, name: &str) -> bool {
        match self.filter {
            Some(ref filter) => name.contains(filter.as_str()),
            None => true,
        }
    }
}

pub struct Runner<'c> {
    config: &'c RunConfig,
}

impl<'c> Runner<'c> {
    pub fn new(config: &'c RunConfig) -> Runner<'c> {
        Runner { config: config }
    }

    pub fn run<F>(&self, suite: &Suite<F>) -> Report {
        info!("running suite `{}` ({} cases)", suite.name, suite.cases.len());
        let fixture = Fixture::new(&*suite.before_all);
        let mut report = Report::new(&suite.name);
        let mut halted = false;

        for case in &suite.cases {
            if !self.config.selects(case.name()) {
                report.filtered_out += 1;
                continue;
            }
            let outcome = match *case.status() {
                Status::Skipped { ref reason } => Outcome::Skipped(reason.clone()),
                Status::Active { .. } if halted => {
                    report.not_run += 1;
                    continue;
                }
                Status::Active { ref body, expected } =>
                    self.execute(suite, &fixture, case.name(), body, expected),
            };
            debug!("{}::{} ... {}", suite.name, case.name(), outcome);
            halted = self.config.fail_fast && outcome.is_failure();
            report.record(case.name(), outcome);
        }

        if let Some(shared) = fixture.into_inner() {
            if let Err(failure) = run_hook(suite.after_all.as_ref(), HookKind::AfterAll, &shared) {
                warn!("suite `{}`: {}", suite.name, failure);
                report.teardown_failure = Some(failure);
            }
        }

        info!("suite `{}` finished: {}", suite.name, report.summary());
        report
    }

    fn execute<F>(&self,
                  suite: &Suite<F>,
                  fixture: &Fixture<F>,
                  name: &str,
                  body: &Body<F>,
                  expected: Option<Expected>) -> Outcome
    {
        let shared = match fixture.get() {
            Ok(shared) => shared,
            Err(failure) => return Outcome::Failed(failure),
        };

        let outcome = match run_hook(suite.before_each.as_ref(), HookKind::BeforeEach, shared) {
            Ok(()) => {
                debug!("running `{}`", name);
                judge(guarded(|| body(shared)), expected)
            }
            Err(failure) => Outcome::Failed(failure),
        };

        match run_hook(suite.after_each.as_ref(), HookKind::AfterEach, shared) {
            Ok(()) => outcome,
            Err(failure) => {
                if outcome.is_failure() {
                    warn!("`{}` already failed, dropping {}", name, failure);
                    outcome
                } else {
                    Outcome::Failed(failure)
                }
            }
        }
    }
}

fn run_hook<F>(hook: Option<&Hook<F>>, kind: HookKind, shared: &F) -> TestResult {
    match hook {
        Some(hook) => {
            debug!("running {} hook", kind);
            guarded(|| hook(shared)).map_err(|failure| Failure::hook(kind, failure))
        }
        None => Ok(()),
    }
}

fn judge(result: TestResult, expected: Option<Expected>) -> Outcome {
    match (result, expected) {
        (Ok(()), None) => Outcome::Passed,
        (Err(failure), None) => Outcome::Failed(failure),
        (Ok(()), Some(expected)) => Outcome::Failed(Failure::Assertion(
            format!("expected {} but the test completed", expected))),
        (Err(failure), Some(expected)) => {
            if expected.matches(&failure) {
                Outcome::Passed
            } else {
                Outcome::Failed(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::calculator::{BasicCalculator, Calculator};
    use crate::error::{DivisionError, ErrorKind, Failure, HookKind};
    use super::*;
    use super::super::TestCase;

    type Trace = Rc<RefCell<Vec<String>>>;

    fn record(trace: &Trace, event: &str) {
        trace.borrow_mut().push(event.to_string());
    }

    fn traced_suite(trace: &Trace) -> Suite<()> {
        let (all, before, after, teardown) =
            (trace.clone(), trace.clone(), trace.clone(), trace.clone());
        Suite::new("traced", move || {
            record(&all, "before_all");
            Ok(())
        })
        .before_each(move |_| {
            record(&before, "before");
            Ok(())
        })
        .after_each(move |_| {
            record(&after, "after");
            Ok(())
        })
        .after_all(move |_| {
            record(&teardown, "after_all");
            Ok(())
        })
    }

    fn traced_case(trace: &Trace, name: &'static str) -> TestCase<()> {
        let trace = trace.clone();
        TestCase::new(name, move |_: &()| {
            record(&trace, name);
            Ok(())
        })
    }

    fn run(suite: &Suite<()>) -> Report {
        Runner::new(&RunConfig::default()).run(suite)
    }

    fn events(trace: &Trace) -> Vec<String> {
        trace.borrow().clone()
    }

    #[test]
    fn test_lifecycle_order() {
        let trace = Trace::default();
        let suite = traced_suite(&trace)
            .case(traced_case(&trace, "test1"))
            .case(traced_case(&trace, "test2"));

        let report = run(&suite);

        assert_eq!(
            events(&trace),
            vec!["before_all", "before", "test1", "after", "before", "test2", "after", "after_all"]);
        assert_eq!(report.passed, 2);
        assert!(report.is_success());
    }

    #[test]
    fn test_skipped_case_touches_no_hook() {
        let trace = Trace::default();
        let suite = traced_suite(&trace)
            .case(traced_case(&trace, "skipped").ignore_because("not ready"))
            .case(traced_case(&trace, "test1"));

        let report = run(&suite);

        assert_eq!(events(&trace), vec!["before_all", "before", "test1", "after", "after_all"]);
        assert_eq!((report.passed, report.failed, report.skipped), (1, 0, 1));
        assert_eq!(
            report.outcome_of("skipped"),
            Some(&Outcome::Skipped(Some("not ready".to_string()))));
    }

    #[test]
    fn test_all_ignored_suite_never_builds_fixture() {
        let trace = Trace::default();
        let suite = traced_suite(&trace)
            .case(traced_case(&trace, "test1").ignore())
            .case(traced_case(&trace, "test2").ignore());

        let report = run(&suite);

        assert!(events(&trace).is_empty());
        assert_eq!(report.skipped, 2);
        assert!(report.is_success());
    }

    #[test]
    fn test_after_each_runs_when_before_each_fails() {
        let trace = Trace::default();
        let after = trace.clone();
        let suite: Suite<()> = Suite::with_default_fixture("broken-setup")
            .before_each(|_| Err(Failure::Assertion("no connection".to_string())))
            .after_each(move |_| {
                record(&after, "after");
                Ok(())
            })
            .case(traced_case(&trace, "test1"));

        let report = run(&suite);

        assert_eq!(events(&trace), vec!["after"]);
        assert_eq!(
            report.outcome_of("test1"),
            Some(&Outcome::Failed(Failure::hook(
                HookKind::BeforeEach,
                Failure::Assertion("no connection".to_string())))));
    }

    #[test]
    fn test_after_each_runs_when_body_panics() {
        let trace = Trace::default();
        let after = trace.clone();
        let suite: Suite<()> = Suite::with_default_fixture("panicking")
            .after_each(move |_| {
                record(&after, "after");
                Ok(())
            })
            .case(TestCase::new("boom", |_: &()| panic!("index out of range")));

        let report = run(&suite);

        assert_eq!(events(&trace), vec!["after"]);
        assert_eq!(
            report.outcome_of("boom"),
            Some(&Outcome::Failed(Failure::Panic("index out of range".to_string()))));
    }

    #[test]
    fn test_expected_failure() {
        let divide = |_: &()| -> TestResult {
            Err(DivisionError::DivideByZero { dividend: 10 }.into())
        };
        let suite: Suite<()> = Suite::with_default_fixture("expected")
            .case(TestCase::new("matching", divide)
                .expect_failure(Expected::Kind(ErrorKind::Division)))
            .case(TestCase::new("wildcard", divide).expect_failure(Expected::Any))
            .case(TestCase::new("completes", |_: &()| Ok(()))
                .expect_failure(Expected::Kind(ErrorKind::Division)))
            .case(TestCase::new("wrong-kind", |_: &()| Err(Failure::Panic("boom".to_string())))
                .expect_failure(Expected::Kind(ErrorKind::Division)))
            .case(TestCase::new("assertion", |_: &()| {
                ensure!(1 + 1 == 3);
                Ok(())
            }).expect_failure(Expected::Any));

        let report = run(&suite);

        assert_eq!(report.outcome_of("matching"), Some(&Outcome::Passed));
        assert_eq!(report.outcome_of("wildcard"), Some(&Outcome::Passed));
        assert_eq!(
            report.outcome_of("completes"),
            Some(&Outcome::Failed(Failure::Assertion(
                "expected a division error but the test completed".to_string()))));
        assert_eq!(
            report.outcome_of("wrong-kind"),
            Some(&Outcome::Failed(Failure::Panic("boom".to_string()))));
        assert_eq!(
            report.outcome_of("assertion"),
            Some(&Outcome::Failed(Failure::Assertion("1 + 1 == 3".to_string()))));
        assert_eq!((report.passed, report.failed), (2, 3));
    }

    #[test]
    fn test_expected_failure_raised_by_before_each_does_not_pass() {
        let suite: Suite<()> = Suite::with_default_fixture("hooked")
            .before_each(|_| Err(DivisionError::DivideByZero { dividend: 1 }.into()))
            .case(TestCase::new("divide", |_: &()| Ok(()))
                .expect_failure(Expected::Kind(ErrorKind::Division)));

        let report = run(&suite);

        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_before_all_runs_once() {
        let builds = Rc::new(RefCell::new(0));
        let counter = builds.clone();
        let suite: Suite<i32> = Suite::new("counted", move || {
            *counter.borrow_mut() += 1;
            Ok(7)
        })
        .case(TestCase::new("first", |n: &i32| {
            ensure_eq!(*n, 7);
            Ok(())
        }))
        .case(TestCase::new("second", |n: &i32| {
            ensure_eq!(*n, 7);
            Ok(())
        }));

        let report = Runner::new(&RunConfig::default()).run(&suite);

        assert_eq!(*builds.borrow(), 1);
        assert_eq!(report.passed, 2);
    }

    #[test]
    fn test_before_all_failure_fails_every_active_case() {
        let trace = Trace::default();
        let (before, teardown) = (trace.clone(), trace.clone());
        let suite = Suite::new("unreachable", || -> Result<(), Failure> {
            Err(Failure::Assertion("database offline".to_string()))
        })
        .before_each(move |_| {
            record(&before, "before");
            Ok(())
        })
        .after_all(move |_| {
            record(&teardown, "after_all");
            Ok(())
        })
        .case(traced_case(&trace, "test1"))
        .case(traced_case(&trace, "test2"))
        .case(traced_case(&trace, "test3").ignore());

        let report = run(&suite);

        let expected = Outcome::Failed(Failure::Fixture(Box::new(Failure::hook(
            HookKind::BeforeAll,
            Failure::Assertion("database offline".to_string())))));
        assert!(events(&trace).is_empty());
        assert_eq!(report.outcome_of("test1"), Some(&expected));
        assert_eq!(report.outcome_of("test2"), Some(&expected));
        assert_eq!((report.passed, report.failed, report.skipped), (0, 2, 1));
    }

    #[test]
    fn test_after_each_failure() {
        let suite: Suite<()> = Suite::with_default_fixture("leaky")
            .after_each(|_| Err(Failure::Assertion("file still open".to_string())))
            .case(TestCase::new("passes", |_: &()| Ok(())))
            .case(TestCase::new("fails", |_: &()| Err(Failure::Assertion("5 != 4".to_string()))));

        let report = run(&suite);

        assert_eq!(
            report.outcome_of("passes"),
            Some(&Outcome::Failed(Failure::hook(
                HookKind::AfterEach,
                Failure::Assertion("file still open".to_string())))));
        assert_eq!(
            report.outcome_of("fails"),
            Some(&Outcome::Failed(Failure::Assertion("5 != 4".to_string()))));
    }

    #[test]
    fn test_after_all_failure_is_reported() {
        let suite: Suite<()> = Suite::with_default_fixture("teardown")
            .after_all(|_| Err(Failure::Panic("double free".to_string())))
            .case(TestCase::new("passes", |_: &()| Ok(())));

        let report = run(&suite);

        assert_eq!(report.passed, 1);
        assert!(!report.is_success());
        assert_eq!(
            report.teardown_failure,
            Some(Failure::hook(HookKind::AfterAll, Failure::Panic("double free".to_string()))));
    }

    #[test]
    fn test_swallowed_error_reports_passed() {
        let suite: Suite<()> = Suite::with_default_fixture("swallowing")
            .case(TestCase::new("catches", |_: &()| {
                let checked = || -> TestResult {
                    BasicCalculator.divide(10, 0)?;
                    ensure_eq!(1, 2);
                    Ok(())
                };
                if let Err(failure) = checked() {
                    debug!("ignoring {}", failure);
                }
                Ok(())
            }));

        assert_eq!(run(&suite).outcome_of("catches"), Some(&Outcome::Passed));
    }

    #[test]
    fn test_filter_and_fail_fast() {
        let trace = Trace::default();
        let suite = traced_suite(&trace)
            .case(TestCase::new("divide_first", |_: &()| Err(Failure::Assertion("1 != 2".to_string()))))
            .case(traced_case(&trace, "divide_second"))
            .case(traced_case(&trace, "sum"));
        let config = RunConfig {
            filter: Some("divide".to_string()),
            fail_fast: true,
        };

        let report = Runner::new(&config).run(&suite);

        assert_eq!(report.failed, 1);
        assert_eq!(report.filtered_out, 1);
        assert_eq!(report.not_run, 1);
        assert_eq!(report.total(), 1);
        assert_eq!(events(&trace), vec!["before_all", "before", "after", "after_all"]);
    }

    #[test]
    fn test_ignored_cases_after_fail_fast_stop_stay_skipped() {
        let trace = Trace::default();
        let suite = traced_suite(&trace)
            .case(traced_case(&trace, "equal").ignore())
            .case(TestCase::new("division", |_: &()| Err(Failure::Assertion("5 != 4".to_string()))))
            .case(traced_case(&trace, "sum"))
            .case(traced_case(&trace, "subtraction").ignore_because("not ready"));
        let config = RunConfig {
            filter: None,
            fail_fast: true,
        };

        let report = Runner::new(&config).run(&suite);

        assert_eq!((report.passed, report.failed, report.skipped), (0, 1, 2));
        assert_eq!(report.not_run, 1);
        assert_eq!(report.outcome_of("sum"), None);
        assert_eq!(
            report.outcome_of("subtraction"),
            Some(&Outcome::Skipped(Some("not ready".to_string()))));
        assert_eq!(events(&trace), vec!["before_all", "before", "after", "after_all"]);
    }
}
