/*!
Run configuration for the sampler.

A [`RunConfig`] is fixed for the lifetime of a run. It is built from
[`RunConfig::default`] and adjusted with consuming setters, then checked once with
[`RunConfig::validate`] before any iteration happens.

```rust
use toy_metro::config::RunConfig;

let config = RunConfig::default().set_iterations(1_000).set_seed(42);
assert!(config.validate().is_ok());
assert_eq!(config.resolve_seed().unwrap(), 42);
```
*/

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, SamplerError};

/// Widest proposal for which one reflection is always enough.
///
/// With `|δ| <= w / 2 <= 1` and `x` in `[0, 1]`, the raw proposal lies in `[-1, 2]`,
/// and each wall can push it back into the unit interval on its own.
pub const MAX_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Starting value of the chain.
    pub initial_state: f64,
    /// Full width of the uniform perturbation.
    pub width: f64,
    /// Number of sampler steps.
    pub iterations: usize,
    /// Iterations between diagnostic records.
    pub report_interval: usize,
    /// Explicit seed; `None` means the current time.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_state: 0.5,
            width: 0.4,
            iterations: 100_000,
            report_interval: 100,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn set_initial_state(mut self, initial_state: f64) -> Self {
        self.initial_state = initial_state;
        self
    }

    pub fn set_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn set_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn set_report_interval(mut self, report_interval: usize) -> Self {
        self.report_interval = report_interval;
        self
    }

    /// Fixes the seed so that runs are reproducible.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /**
    Checks the preconditions of a run.

    # Errors

    * [`SamplerError::InvalidWidth`] if the width is not finite, not positive, or wider
      than [`MAX_WIDTH`].
    * [`SamplerError::ZeroIterations`] / [`SamplerError::ZeroReportInterval`] for zero counts.
    * [`SamplerError::InvalidInitialState`] unless `0 < x0 <= 1`. A start at exactly zero
      would make the very first Metropolis ratio undefined.
    */
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 || self.width > MAX_WIDTH {
            return Err(SamplerError::InvalidWidth {
                width: self.width,
                max: MAX_WIDTH,
            });
        }
        if self.iterations == 0 {
            return Err(SamplerError::ZeroIterations);
        }
        if self.report_interval == 0 {
            return Err(SamplerError::ZeroReportInterval);
        }
        // Written so that NaN falls through to the error.
        if !(self.initial_state > 0.0 && self.initial_state <= 1.0) {
            return Err(SamplerError::InvalidInitialState(self.initial_state));
        }
        Ok(())
    }

    /// Returns the configured seed, or one taken from the system clock.
    pub fn resolve_seed(&self) -> Result<u64> {
        match self.seed {
            Some(seed) => Ok(seed),
            None => {
                let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
                Ok(now.as_nanos() as u64)
            }
        }
    }
}
