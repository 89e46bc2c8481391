#[macro_use] extern crate log;

#[macro_use] pub mod helpers;
pub mod calculator;
pub mod error;
pub mod suite;
