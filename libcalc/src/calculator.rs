//! Integer arithmetic exercised by the calculator suite.

use crate::error::DivisionError;

pub trait Calculator {
    fn sum(&self, a: i64, b: i64) -> i64;

    /// Quotient truncated toward zero.
    fn divide(&self, a: i64, b: i64) -> Result<i64, DivisionError>;

    fn equal_integers(&self, a: i64, b: i64) -> bool;
}

/// Stateless calculator; one instance is shared by a whole suite run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCalculator;

impl BasicCalculator {
    pub fn new() -> BasicCalculator {
        BasicCalculator
    }
}

impl Calculator for BasicCalculator {
    fn sum(&self, a: i64, b: i64) -> i64 {
        a.wrapping_add(b)
    }

    fn divide(&self, a: i64, b: i64) -> Result<i64, DivisionError> {
        if b == 0 {
            return Err(DivisionError::DivideByZero { dividend: a });
        }
        a.checked_div(b)
            .ok_or(DivisionError::Overflow { dividend: a, divisor: b })
    }

    fn equal_integers(&self, a: i64, b: i64) -> bool {
        a == b
    }
}
