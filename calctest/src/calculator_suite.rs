use libcalc::calculator::{BasicCalculator, Calculator};
use libcalc::error::ErrorKind;
use libcalc::suite::{Expected, Suite, TestCase};

type SharedCalculator = Box<dyn Calculator>;

/// Drives one shared `BasicCalculator` through sum, division and equality checks.
pub fn calculator_suite() -> Suite<SharedCalculator> {
    Suite::new("calculator", || {
        debug!("creating the shared calculator");
        Ok(Box::new(BasicCalculator::new()) as SharedCalculator)
    })
    .before_each(|_| {
        info!("executed before each test");
        Ok(())
    })
    .after_each(|_| {
        info!("executed after each test");
        Ok(())
    })
    .case(TestCase::new("sum", |calculator: &SharedCalculator| {
        ensure_eq!(calculator.sum(3, 4), 7);
        Ok(())
    }))
    .case(TestCase::new("division", |calculator: &SharedCalculator| {
        ensure_eq!(calculator.divide(10, 2)?, 5);
        Ok(())
    }))
    .case(TestCase::new("division_by_zero", |calculator: &SharedCalculator| {
        calculator.divide(10, 0)?;
        Ok(())
    }).expect_failure(Expected::Kind(ErrorKind::Division)))
    .case(TestCase::new("equal", |calculator: &SharedCalculator| {
        ensure!(!calculator.equal_integers(20, 20));
        Ok(())
    }).ignore())
    .case(TestCase::new("subtraction", |_: &SharedCalculator| {
        let result = 10 - 3;
        ensure!(result == 9);
        Ok(())
    }).ignore())
}
