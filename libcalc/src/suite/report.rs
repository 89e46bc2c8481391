use crate::error::Failure;
use super::test_case::Outcome;

#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub name: String,
    pub outcome: Outcome,
}

/// Result of running one suite.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub suite: String,
    pub cases: Vec<CaseReport>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Cases excluded by the name filter.
    pub filtered_out: usize,
    /// Cases left unexecuted after a fail-fast stop.
    pub not_run: usize,
    /// Error raised by the after-all hook.
    pub teardown_failure: Option<Failure>,
}

impl Report {
    pub fn new(suite: &str) -> Report {
        Report {
            suite: suite.to_string(),
            ..Report::default()
        }
    }

    pub fn record(&mut self, name: &str, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed(_) => self.failed += 1,
            Outcome::Skipped(_) => self.skipped += 1,
        }
        self.cases.push(CaseReport {
            name: name.to_string(),
            outcome: outcome,
        });
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.teardown_failure.is_none()
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn outcome_of(&self, name: &str) -> Option<&Outcome> {
        self.cases.iter()
            .find(|case| case.name == name)
            .map(|case| &case.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|case| case.outcome.is_failure())
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} passed; {} failed; {} skipped",
            self.passed, self.failed, self.skipped);
        if self.filtered_out > 0 {
            summary.push_str(&format!("; {} filtered out", self.filtered_out));
        }
        if self.not_run > 0 {
            summary.push_str(&format!("; {} not run", self.not_run));
        }
        summary
    }
}

#[test]
fn test_record_counts_outcomes() {
    let mut report = Report::new("calculator");
    report.record("sum", Outcome::Passed);
    report.record("division", Outcome::Failed(Failure::Assertion("5 != 4".to_string())));
    report.record("equal", Outcome::Skipped(None));

    assert_eq!((report.passed, report.failed, report.skipped), (1, 1, 1));
    assert_eq!(report.total(), 3);
    assert!(!report.is_success());
    assert_eq!(report.failures().map(|case| case.name.as_str()).collect::<Vec<_>>(), vec!["division"]);
    assert_eq!(report.outcome_of("equal"), Some(&Outcome::Skipped(None)));
    assert_eq!(report.outcome_of("missing"), None);
    assert_eq!(report.summary(), "1 passed; 1 failed; 1 skipped");
}

#[test]
fn test_teardown_failure_fails_report() {
    let mut report = Report::new("calculator");
    report.record("sum", Outcome::Passed);
    report.filtered_out = 2;
    assert!(report.is_success());
    report.teardown_failure = Some(Failure::Panic("socket".to_string()));
    assert!(!report.is_success());
    assert_eq!(report.summary(), "1 passed; 0 failed; 0 skipped; 2 filtered out");
}
