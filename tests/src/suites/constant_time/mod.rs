//! Timing-based constant-time checks
//!
//! Two workloads that must take the same time are measured alternately and
//! compared with Welch's t-test. The verdict is a combined score built from
//! the mean ratio, the t statistic and the relative spread of the samples.

pub mod config;
pub mod tester;

pub use config::TestConfig;
pub use tester::{assert_constant_time, generate_test_insights, TimingAnalysis, TimingTester};
