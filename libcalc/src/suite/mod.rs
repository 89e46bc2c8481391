//! Lifecycle-driven test suites.
//!
//! A `Suite` owns an ordered list of `TestCase`s over a shared fixture `F`
//! plus four hook slots. The `Runner` builds the fixture with the before-all
//! hook on first use, then wraps every active case in the before-each and
//! after-each hooks. After-each always runs, even when the before-each hook
//! or the body failed. Ignored cases are reported without touching any hook,
//! including those that follow a fail-fast stop.

mod fixture;
mod report;
mod runner;
mod test_case;

pub use self::fixture::{Fixture, Setup};
pub use self::report::{CaseReport, Report};
pub use self::runner::{RunConfig, Runner};
pub use self::test_case::{Body, Expected, Outcome, Status, TestCase, TestResult};

use crate::error::Failure;

pub type Hook<F> = Box<dyn Fn(&F) -> TestResult>;

pub struct Suite<F> {
    name: String,
    before_all: Setup<F>,
    after_all: Option<Hook<F>>,
    before_each: Option<Hook<F>>,
    after_each: Option<Hook<F>>,
    cases: Vec<TestCase<F>>,
}

impl<F: 'static> Suite<F> {
    /// `before_all` builds the fixture shared by every case of a run.
    pub fn new<S>(name: &str, before_all: S) -> Suite<F>
        where S: Fn() -> Result<F, Failure> + 'static
    {
        Suite {
            name: name.to_string(),
            before_all: Box::new(before_all),
            after_all: None,
            before_each: None,
            after_each: None,
            cases: Vec::new(),
        }
    }

    pub fn before_each<H>(mut self, hook: H) -> Suite<F>
        where H: Fn(&F) -> TestResult + 'static
    {
        self.before_each = Some(Box::new(hook));
        self
    }

    pub fn after_each<H>(mut self, hook: H) -> Suite<F>
        where H: Fn(&F) -> TestResult + 'static
    {
        self.after_each = Some(Box::new(hook));
        self
    }

    /// Runs once after the last case, only if the fixture was built.
    pub fn after_all<H>(mut self, hook: H) -> Suite<F>
        where H: Fn(&F) -> TestResult + 'static
    {
        self.after_all = Some(Box::new(hook));
        self
    }

    pub fn case(mut self, case: TestCase<F>) -> Suite<F> {
        self.cases.push(case);
        self
    }
}

impl<F: Default + 'static> Suite<F> {
    /// A suite without a before-all hook; the fixture is `F::default()`.
    pub fn with_default_fixture(name: &str) -> Suite<F> {
        Suite::new(name, || Ok(F::default()))
    }
}

/// Type-erased suite, so suites over different fixtures can be collected together.
pub trait Runnable {
    fn name(&self) -> &str;

    /// Case names paired with whether the case is ignored.
    fn list(&self) -> Vec<(&str, bool)>;

    fn run(&self, config: &RunConfig) -> Report;
}

impl<F: 'static> Runnable for Suite<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&self) -> Vec<(&str, bool)> {
        self.cases.iter()
            .map(|case| (case.name(), case.is_skipped()))
            .collect()
    }

    fn run(&self, config: &RunConfig) -> Report {
        Runner::new(config).run(self)
    }
}
