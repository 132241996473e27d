//! Reusable test suites

pub mod constant_time;
