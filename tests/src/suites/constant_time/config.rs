//! Thresholds and sample sizes for timing analysis

/// Configuration for one constant-time check
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Lower bound accepted for the ratio of mean timings
    pub mean_ratio_min: f64,
    /// Upper bound accepted for the ratio of mean timings
    pub mean_ratio_max: f64,
    /// Relative standard deviation threshold (diagnostics only)
    pub std_dev_threshold: f64,
    /// Welch t-statistic threshold
    pub t_stat_threshold: f64,
    /// Combined score above which a check fails
    pub combined_score_threshold: f64,
    /// Untimed iterations run before measuring
    pub num_warmup: usize,
    /// Number of timing samples per workload
    pub num_samples: usize,
    /// Iterations averaged into each sample
    pub num_iterations: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            mean_ratio_min: 0.80,
            mean_ratio_max: 1.25,
            std_dev_threshold: 0.20,
            t_stat_threshold: 1.7,
            combined_score_threshold: 1.8,
            num_warmup: 1000,
            num_samples: 25,
            num_iterations: 1000,
        }
    }
}

// Builder methods
impl TestConfig {
    /// Sets the accepted mean-ratio range
    pub fn with_mean_ratio_range(mut self, min: f64, max: f64) -> Self {
        self.mean_ratio_min = min;
        self.mean_ratio_max = max;
        self
    }

    /// Sets the diagnostic spread threshold
    pub fn with_std_dev_threshold(mut self, threshold: f64) -> Self {
        self.std_dev_threshold = threshold;
        self
    }

    /// Sets the number of warm-up iterations
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.num_warmup = warmup;
        self
    }

    /// Sets samples per workload and iterations per sample
    pub fn with_samples_and_iterations(mut self, samples: usize, iterations: usize) -> Self {
        self.num_samples = samples;
        self.num_iterations = iterations;
        self
    }

    /// Sets the t-statistic threshold
    pub fn with_t_stat_threshold(mut self, threshold: f64) -> Self {
        self.t_stat_threshold = threshold;
        self
    }

    /// Sets the combined score threshold
    pub fn with_combined_score_threshold(mut self, threshold: f64) -> Self {
        self.combined_score_threshold = threshold;
        self
    }
}

// Presets per primitive family
impl TestConfig {
    /// Byte comparison and selection helpers
    pub fn for_ct_ops() -> Self {
        Self::default()
            .with_mean_ratio_range(0.80, 1.35)
            .with_warmup(5000)
            .with_samples_and_iterations(30, 5000)
            .with_t_stat_threshold(2.0)
            .with_combined_score_threshold(2.0)
    }

    /// Single-block AES operations
    pub fn for_block_cipher() -> Self {
        Self::default()
            .with_t_stat_threshold(1.7)
            .with_combined_score_threshold(1.8)
    }

    /// AES-GCM seal/open
    pub fn for_aead() -> Self {
        Self::default()
            .with_mean_ratio_range(0.80, 1.35)
            .with_t_stat_threshold(1.9)
            .with_combined_score_threshold(1.9)
    }

    /// HMAC computation and verification
    pub fn for_mac() -> Self {
        Self::default()
            .with_mean_ratio_range(0.80, 1.6)
            .with_t_stat_threshold(1.8)
            .with_combined_score_threshold(2.0)
    }

    /// HKDF derivation
    pub fn for_hkdf() -> Self {
        Self::default()
            .with_mean_ratio_range(0.80, 1.5)
            .with_std_dev_threshold(0.30)
            .with_samples_and_iterations(25, 200)
            .with_t_stat_threshold(1.9)
            .with_combined_score_threshold(2.0)
    }
}
