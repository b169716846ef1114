//! Running statistics of a single chain.

/// Accumulates the running sum of chain values and the number of accepted proposals.
///
/// Both accumulators only grow; a fresh tracker is created for every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainTracker {
    n: usize,
    xsum: f64,
    nacpt: usize,
}

/// A snapshot of a [`ChainTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    pub n: usize,
    pub mean: f64,
    pub nacpt: usize,
    pub p_accept: f64,
}

impl ChainTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the chain value after one iteration.
    pub fn step(&mut self, x: f64, accepted: bool) {
        self.n += 1;
        self.xsum += x;
        if accepted {
            self.nacpt += 1;
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn nacpt(&self) -> usize {
        self.nacpt
    }

    /// Running mean `xsum / n`; NaN before the first step.
    pub fn mean(&self) -> f64 {
        self.xsum / self.n as f64
    }

    pub fn acceptance_rate(&self) -> f64 {
        self.nacpt as f64 / self.n as f64
    }

    pub fn stats(&self) -> ChainStats {
        ChainStats {
            n: self.n,
            mean: self.mean(),
            nacpt: self.nacpt,
            p_accept: self.acceptance_rate(),
        }
    }
}
