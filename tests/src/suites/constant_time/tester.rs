//! Welch t-test harness for comparing two timing distributions
//!
//! Each workload is run `num_iterations` times per sample and the average
//! per-call time is recorded. Two workloads that differ only in secret data
//! should produce distributions that the analysis cannot tell apart.

use statrs::distribution::{ContinuousCDF, StudentsT};
use std::hint::black_box;
use std::time::Instant;

use super::config::TestConfig;

/// Summary statistics for one pair of timing distributions
#[derive(Debug, Clone)]
pub struct TimingAnalysis {
    pub mean_a: f64,
    pub mean_b: f64,
    pub std_dev_a: f64,
    pub std_dev_b: f64,
    /// Ratio of the larger mean over the smaller one, always >= 1
    pub mean_ratio: f64,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub combined_score: f64,
    pub cohens_d: f64,
    pub is_constant_time: bool,
}

impl TimingAnalysis {
    /// Mean difference as a percentage of the faster workload
    pub fn difference_percent(&self) -> f64 {
        (self.mean_a - self.mean_b).abs() / self.mean_a.min(self.mean_b) * 100.0
    }

    fn rel_std_devs(&self) -> (f64, f64) {
        (self.std_dev_a / self.mean_a, self.std_dev_b / self.mean_b)
    }
}

/// Collects per-sample timings
pub struct TimingTester {
    pub num_samples: usize,
    pub num_iterations: usize,
}

impl TimingTester {
    pub fn new(num_samples: usize, num_iterations: usize) -> Self {
        Self {
            num_samples,
            num_iterations,
        }
    }

    pub fn from_config(config: &TestConfig) -> Self {
        Self::new(config.num_samples, config.num_iterations)
    }

    /// Runs `f` untimed so caches and branch predictors settle
    pub fn warm_up<F: FnMut()>(iterations: usize, mut f: F) {
        for _ in 0..iterations {
            f();
        }
    }

    /// Average nanoseconds per call, one entry per sample
    pub fn measure<F>(&self, mut f: F) -> Vec<u128>
    where
        F: FnMut(),
    {
        let iterations = self.num_iterations.max(1) as u128;
        (0..self.num_samples)
            .map(|_| {
                let start = Instant::now();
                for _ in 0..self.num_iterations {
                    black_box(f());
                }
                start.elapsed().as_nanos() / iterations
            })
            .collect()
    }

    /// Interleaves two workloads sample by sample
    ///
    /// Alternating keeps slow drifts (frequency scaling, other load) from
    /// landing on only one side.
    pub fn measure_pair<A, B>(&self, mut a: A, mut b: B) -> (Vec<u128>, Vec<u128>)
    where
        A: FnMut(),
        B: FnMut(),
    {
        let single = Self::new(1, self.num_iterations);
        let mut times_a = Vec::with_capacity(self.num_samples);
        let mut times_b = Vec::with_capacity(self.num_samples);
        for round in 0..self.num_samples {
            if round % 2 == 0 {
                times_a.extend(single.measure(&mut a));
                times_b.extend(single.measure(&mut b));
            } else {
                times_b.extend(single.measure(&mut b));
                times_a.extend(single.measure(&mut a));
            }
        }
        (times_a, times_b)
    }

    pub fn mean(times: &[u128]) -> f64 {
        let sum: u128 = times.iter().sum();
        sum as f64 / times.len() as f64
    }

    /// Sample variance (n - 1 denominator)
    pub fn variance(times: &[u128], mean: f64) -> f64 {
        if times.len() < 2 {
            return 0.0;
        }
        let ss: f64 = times
            .iter()
            .map(|&t| {
                let d = t as f64 - mean;
                d * d
            })
            .sum();
        ss / (times.len() as f64 - 1.0)
    }

    /// Drops samples outside 1.5 IQR of the quartiles
    pub fn remove_outliers(times: &[u128]) -> Vec<u128> {
        if times.len() < 4 {
            return times.to_vec();
        }

        let mut sorted = times.to_vec();
        sorted.sort_unstable();
        let q1 = sorted[sorted.len() / 4] as f64;
        let q3 = sorted[sorted.len() * 3 / 4] as f64;
        let iqr = q3 - q1;
        let (lo, hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        times
            .iter()
            .copied()
            .filter(|&t| (t as f64) >= lo && (t as f64) <= hi)
            .collect()
    }

    /// Welch's t-statistic (absolute value)
    pub fn t_statistic(times_a: &[u128], times_b: &[u128]) -> f64 {
        let (mean_a, mean_b) = (Self::mean(times_a), Self::mean(times_b));
        let se = (Self::variance(times_a, mean_a) / times_a.len() as f64
            + Self::variance(times_b, mean_b) / times_b.len() as f64)
            .sqrt();
        if se == 0.0 {
            return if mean_a == mean_b { 0.0 } else { f64::INFINITY };
        }
        (mean_a - mean_b).abs() / se
    }

    /// Welch-Satterthwaite degrees of freedom
    pub fn degrees_of_freedom(times_a: &[u128], times_b: &[u128]) -> f64 {
        let n_a = times_a.len() as f64;
        let n_b = times_b.len() as f64;
        let term_a = Self::variance(times_a, Self::mean(times_a)) / n_a;
        let term_b = Self::variance(times_b, Self::mean(times_b)) / n_b;

        (term_a + term_b).powi(2) / (term_a.powi(2) / (n_a - 1.0) + term_b.powi(2) / (n_b - 1.0))
    }

    /// Two-tailed p-value from Student's t distribution
    pub fn p_value(t_stat: f64, df: f64) -> f64 {
        if !df.is_finite() || df < 1.0 {
            return if t_stat == 0.0 { 1.0 } else { 0.0 };
        }
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => (2.0 * (1.0 - dist.cdf(t_stat.abs()))).clamp(0.0, 1.0),
            Err(_) => 0.0,
        }
    }

    /// Cohen's d with a pooled standard deviation
    pub fn cohens_d(times_a: &[u128], times_b: &[u128]) -> f64 {
        let (mean_a, mean_b) = (Self::mean(times_a), Self::mean(times_b));
        let n_a = times_a.len() as f64;
        let n_b = times_b.len() as f64;
        let pooled = ((Self::variance(times_a, mean_a) * (n_a - 1.0)
            + Self::variance(times_b, mean_b) * (n_b - 1.0))
            / (n_a + n_b - 2.0))
            .sqrt();
        if pooled == 0.0 {
            return 0.0;
        }
        (mean_a - mean_b).abs() / pooled
    }

    /// Weighted blend of mean ratio, t-statistic and spread
    ///
    /// A perfectly matched pair scores 1.0 plus its noise floor.
    pub fn combined_score(mean_ratio: f64, t_stat: f64, rel_std_dev: f64) -> f64 {
        let t_component = if t_stat.is_finite() { t_stat / 10.0 } else { 1.0 };
        let score = 1.0 + 0.5 * (mean_ratio - 1.0) + 0.2 * t_component + 0.3 * rel_std_dev;
        if score.is_finite() && score >= 1.0 {
            score
        } else {
            mean_ratio
        }
    }

    /// Compares two timing distributions against the config thresholds
    ///
    /// A pair passes when the combined score stays under its threshold, or
    /// when both the mean ratio and the t-statistic stay inside theirs.
    pub fn analyze_constant_time(
        &self,
        times_a: &[u128],
        times_b: &[u128],
        config: &TestConfig,
    ) -> Result<TimingAnalysis, String> {
        let clean_a = Self::remove_outliers(times_a);
        let clean_b = Self::remove_outliers(times_b);
        if clean_a.len() < 2 || clean_b.len() < 2 {
            return Err("not enough samples left after outlier removal".to_string());
        }

        let mean_a = Self::mean(&clean_a);
        let mean_b = Self::mean(&clean_b);
        if mean_a == 0.0 || mean_b == 0.0 {
            return Err("timer resolution too coarse for this workload".to_string());
        }
        let std_dev_a = Self::variance(&clean_a, mean_a).sqrt();
        let std_dev_b = Self::variance(&clean_b, mean_b).sqrt();

        let mean_ratio = mean_a.max(mean_b) / mean_a.min(mean_b);
        let t_statistic = Self::t_statistic(&clean_a, &clean_b);
        let degrees_of_freedom = Self::degrees_of_freedom(&clean_a, &clean_b);
        let p_value = Self::p_value(t_statistic, degrees_of_freedom);
        let rel_std_dev = (std_dev_a / mean_a).max(std_dev_b / mean_b);
        let combined_score = Self::combined_score(mean_ratio, t_statistic, rel_std_dev);

        let within_ratio = mean_ratio <= config.mean_ratio_max;
        let within_t = t_statistic <= config.t_stat_threshold;
        let is_constant_time =
            combined_score <= config.combined_score_threshold || (within_ratio && within_t);

        Ok(TimingAnalysis {
            mean_a,
            mean_b,
            std_dev_a,
            std_dev_b,
            mean_ratio,
            t_statistic,
            degrees_of_freedom,
            p_value,
            combined_score,
            cohens_d: Self::cohens_d(&clean_a, &clean_b),
            is_constant_time,
        })
    }
}

/// Human-readable report for a timing analysis
pub fn generate_test_insights(
    analysis: &TimingAnalysis,
    config: &TestConfig,
    primitive_name: &str,
) -> String {
    if analysis.is_constant_time {
        return format!(
            "PASS: {} shows no distinguishable timing (ratio {:.3}, t {:.2})\n",
            primitive_name, analysis.mean_ratio, analysis.t_statistic
        );
    }

    let (rel_a, rel_b) = analysis.rel_std_devs();
    let mut out = format!("FAIL: {} timing differs between inputs\n", primitive_name);
    out.push_str(&format!(
        "  mean {:.0} ns vs {:.0} ns ({:.1}%)\n",
        analysis.mean_a,
        analysis.mean_b,
        analysis.difference_percent()
    ));
    out.push_str(&format!(
        "  t {:.2} (limit {:.2}), p {:.2e}, d {:.2}, score {:.3} (limit {:.3})\n",
        analysis.t_statistic,
        config.t_stat_threshold,
        analysis.p_value,
        analysis.cohens_d,
        analysis.combined_score,
        config.combined_score_threshold
    ));

    if rel_a.max(rel_b) > config.std_dev_threshold {
        out.push_str("  samples are noisy; rerun on an idle machine before drawing conclusions\n");
    }
    if analysis.mean_ratio > config.mean_ratio_max && analysis.cohens_d > 5.0 {
        out.push_str("  large consistent gap: look for early exits on secret data\n");
    } else if rel_a < 0.05 && rel_b < 0.05 && analysis.mean_ratio > 1.2 {
        out.push_str("  stable gap with low spread: look for secret-dependent memory access\n");
    }
    out
}

/// Analyzes a pair of timings and panics with a report if they differ
pub fn assert_constant_time(
    name: &str,
    config: &TestConfig,
    times_a: &[u128],
    times_b: &[u128],
) -> TimingAnalysis {
    let tester = TimingTester::from_config(config);
    let analysis = match tester.analyze_constant_time(times_a, times_b, config) {
        Ok(analysis) => analysis,
        Err(reason) => panic!("{}: timing analysis failed: {}", name, reason),
    };
    let report = generate_test_insights(&analysis, config, name);
    println!("{}", report);
    assert!(analysis.is_constant_time, "{}", report);
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_distributions_pass() {
        let times = vec![100u128, 101, 99, 100, 102, 98, 100, 101];
        let config = TestConfig::default();
        let analysis = assert_constant_time("identical", &config, &times, &times);
        assert_eq!(analysis.mean_ratio, 1.0);
        assert_eq!(analysis.t_statistic, 0.0);
    }

    #[test]
    fn test_separated_distributions_fail() {
        let fast = vec![100u128, 101, 99, 100, 102, 98, 100, 101];
        let slow: Vec<u128> = fast.iter().map(|t| t * 3).collect();
        let config = TestConfig::default();
        let analysis = TimingTester::from_config(&config)
            .analyze_constant_time(&fast, &slow, &config)
            .unwrap();
        assert!(!analysis.is_constant_time);
        assert!(generate_test_insights(&analysis, &config, "slow").starts_with("FAIL"));
    }

    #[test]
    fn test_outliers_removed() {
        let times = vec![10u128, 11, 10, 12, 11, 10, 1000];
        let clean = TimingTester::remove_outliers(&times);
        assert!(!clean.contains(&1000));
        assert_eq!(clean.len(), 6);
    }

    #[test]
    fn test_p_value_bounds() {
        assert!((TimingTester::p_value(0.0, 10.0) - 1.0).abs() < 1e-9);
        assert!(TimingTester::p_value(10.0, 10.0) < 0.001);
    }
}
