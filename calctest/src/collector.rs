use libcalc::suite::Runnable;
use super::calculator_suite::calculator_suite;

type SuiteCollection = Vec<Box<dyn Runnable>>;

pub fn collect_suites() -> SuiteCollection {
    let mut v: SuiteCollection = Vec::new();
    v.push(Box::new(calculator_suite()));
    v
}

#[test]
fn test_collects_calculator_suite() {
    let names: Vec<String> = collect_suites().iter()
        .map(|suite| suite.name().to_string())
        .collect();
    assert_eq!(names, vec!["calculator"]);
}
