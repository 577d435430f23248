//! Held-Karp solver configuration.

use crate::subset::MAX_CITIES;

/// Default refusal threshold. Peak memory at 25 cities is already in the
/// gigabytes.
pub const DEFAULT_MAX_CITIES: usize = 25;

/// Configuration for [`HeldKarpRunner`](super::HeldKarpRunner).
///
/// # Examples
///
/// ```
/// use u_heldkarp::heldkarp::HeldKarpConfig;
///
/// let config = HeldKarpConfig::default()
///     .with_reconstruct_tour(false)
///     .with_parallel(true)
///     .with_time_limit_ms(5_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct HeldKarpConfig {
    /// Keep every layer's predecessor column so the optimal tour can be
    /// walked back after the final step.
    ///
    /// When `false`, only the previous and current layers are alive at any
    /// time and the result carries the cost alone.
    pub reconstruct_tour: bool,

    /// Whether to build the rows of each layer in parallel using rayon.
    ///
    /// Rows are independent, so results are identical either way.
    pub parallel: bool,

    /// Inputs with more cities than this are rejected before any work.
    ///
    /// Must not exceed [`MAX_CITIES`].
    pub max_cities: usize,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked once per subset size, so the run may overshoot by one
    /// layer's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self {
            reconstruct_tour: true,
            parallel: false,
            max_cities: DEFAULT_MAX_CITIES,
            time_limit_ms: None,
        }
    }
}

impl HeldKarpConfig {
    pub fn with_reconstruct_tour(mut self, reconstruct: bool) -> Self {
        self.reconstruct_tour = reconstruct;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_cities(mut self, n: usize) -> Self {
        self.max_cities = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cities == 0 {
            return Err("max_cities must be at least 1".into());
        }
        if self.max_cities > MAX_CITIES {
            return Err(format!(
                "max_cities must be at most {MAX_CITIES}, got {}",
                self.max_cities
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
