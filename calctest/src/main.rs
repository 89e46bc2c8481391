extern crate clap;
extern crate colored;
extern crate env_logger;
extern crate itertools;
#[macro_use] extern crate libcalc;
#[macro_use] extern crate log;

mod calculator_suite;
mod collector;

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use itertools::Itertools;
use libcalc::suite::{Report, RunConfig, Runnable};
#[cfg(test)]
use libcalc::error::Failure;
#[cfg(test)]
use libcalc::suite::{Suite, TestCase};
use std::process;
use self::collector::collect_suites;

fn cli() -> Command {
    Command::new("calctest")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs the calculator lifecycle suites")
        .arg(Arg::new("FILTER")
            .help("Only run cases whose name contains FILTER"))
        .arg(Arg::new("list")
            .long("list")
            .action(ArgAction::SetTrue)
            .help("List the cases of every suite without running them"))
        .arg(Arg::new("fail-fast")
            .long("fail-fast")
            .action(ArgAction::SetTrue)
            .help("Stop a suite at its first failed case"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Log hook invocations and case outcomes (ignored when RUST_LOG is set)"))
}

fn run_config(matches: &ArgMatches) -> RunConfig {
    RunConfig {
        filter: matches.get_one::<String>("FILTER").cloned(),
        fail_fast: matches.get_flag("fail-fast"),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn list_suites(suites: &[Box<dyn Runnable>], config: &RunConfig) -> String {
    let mut out = String::new();
    for suite in suites {
        for (name, ignored) in suite.list() {
            if !config.selects(name) {
                continue;
            }
            let status = if ignored { "ignored".yellow() } else { "active".green() };
            out.push_str(&format!("{}::{}: {}\n", suite.name(), name, status));
        }
    }
    out
}

fn format_report(report: &Report) -> String {
    let mut out = String::new();
    for case in report.failures() {
        out.push_str(&format!("{}\n", format!("Error in `{}::{}`:", report.suite, case.name).red().bold()));
        out.push_str(&format!("{}\n\n", case.outcome));
    }
    if let Some(ref failure) = report.teardown_failure {
        out.push_str(&format!("{}\n", format!("Error tearing down `{}`:", report.suite).red().bold()));
        out.push_str(&format!("{}\n\n", failure));
    }
    let summary = format!("{}: {}", report.suite, report.summary());
    if report.is_success() {
        out.push_str(&format!("{}\n", summary.green().bold()));
    } else {
        out.push_str(&format!("{}\n", summary.red().bold()));
        let failed = report.failures().map(|case| case.name.as_str()).join(", ");
        if !failed.is_empty() {
            out.push_str(&format!("\t{}\n", failed.red()));
        }
    }
    out
}

/// Runs every suite, printing each report; false if any suite failed.
fn run_suites(suites: &[Box<dyn Runnable>], config: &RunConfig) -> bool {
    let mut success = true;
    for suite in suites {
        let report = suite.run(config);
        println!("{}", format_report(&report));
        success &= report.is_success();
    }
    success
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));
    let config = run_config(&matches);
    let suites = collect_suites();

    if matches.get_flag("list") {
        print!("{}", list_suites(&suites, &config));
        return;
    }

    println!("{}", "Running calculator lifecycle suites...".blue().bold());
    println!("");
    if !run_suites(&suites, &config) {
        error!("at least one suite failed");
        process::exit(1);
    }
}

#[test]
fn test_cli_builds_run_config() {
    cli().debug_assert();
    let matches = cli().get_matches_from(vec!["calctest", "--fail-fast", "division"]);
    let config = run_config(&matches);
    assert_eq!(config.filter, Some("division".to_string()));
    assert!(config.fail_fast);
    assert!(!matches.get_flag("list"));
}

#[cfg(test)]
fn broken_suites() -> Vec<Box<dyn Runnable>> {
    let suite: Suite<()> = Suite::with_default_fixture("broken")
        .case(TestCase::new("fine", |_: &()| Ok(())))
        .case(TestCase::new("fails", |_: &()| Err(Failure::Assertion("5 != 4".to_string()))));
    let boxed: Box<dyn Runnable> = Box::new(suite);
    vec![boxed]
}

#[test]
fn test_run_suites_reports_failure() {
    let config = RunConfig::default();
    assert!(!run_suites(&broken_suites(), &config));
    assert!(run_suites(&collect_suites(), &config));
}

#[test]
fn test_failure_text_names_suite_and_case() {
    let suites = broken_suites();
    let report = suites[0].run(&RunConfig::default());
    let text = format_report(&report);
    assert!(text.contains("Error in `broken::fails`:"));
    assert!(text.contains("FAILED: assertion failed: 5 != 4"));
    assert!(text.contains("broken: 1 passed; 1 failed; 0 skipped"));
    assert!(!text.contains("broken::fine"));
}

#[test]
fn test_list_honors_filter() {
    let matches = cli().get_matches_from(vec!["calctest", "--list", "division"]);
    assert!(matches.get_flag("list"));
    let listing = list_suites(&collect_suites(), &run_config(&matches));
    assert!(listing.contains("calculator::division: "));
    assert!(listing.contains("calculator::division_by_zero: "));
    assert!(!listing.contains("calculator::sum"));
    assert!(!listing.contains("calculator::equal"));
    assert_eq!(listing.lines().count(), 2);
}
