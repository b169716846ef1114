/*!
# Metropolis sampler for the coin posterior

[`MetropolisSampler`] runs a single Markov chain on `[0, 1]` whose stationary density
is `2p` (see [`CoinPosterior`]). Each iteration

1. perturbs the current value `x` by `δ = w (u₁ − 0.5)` and reflects the result `y`
   into the unit interval ([`ReflectedUniform`]),
2. computes the Metropolis ratio `mr = y / x`,
3. accepts if `mr >= 1`, and otherwise draws `u₂` and accepts if `u₂ <= mr`,
4. adds the (possibly new) `x` to the running sum.

Every `report_interval` iterations a [`Diagnostic`] goes to the [`Report`], and after
the last iteration the report receives a [`RunSummary`].

The random generator is owned by the sampler and is the only source of randomness, so
a seeded generator gives a reproducible run. `u₂` is only drawn when `mr < 1`.

## Example

```rust
use rand::rngs::SmallRng;
use toy_metro::config::RunConfig;
use toy_metro::metropolis::MetropolisSampler;
use toy_metro::report::Diagnostic;

let config = RunConfig::default().set_iterations(1_000).set_seed(42);
let mut sampler = MetropolisSampler::<SmallRng>::new(config).unwrap();

let mut records: Vec<Diagnostic> = Vec::new();
let summary = sampler.run(&mut records).unwrap();

assert_eq!(records.len(), 10);
assert_eq!(summary.iterations, 1_000);
```
*/

use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use log::{debug, info};
use rand::{Rng, SeedableRng};

use crate::config::RunConfig;
use crate::core::MarkovChain;
use crate::distributions::{CoinPosterior, ReflectedUniform};
use crate::error::{Result, SamplerError};
use crate::report::{Diagnostic, Report, RunSummary};
use crate::stats::ChainTracker;

/// The outcome of a single iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// 1-based index of the iteration.
    pub iteration: usize,
    /// Reflected proposal `y`.
    pub proposal: f64,
    /// Metropolis ratio `y / x`.
    pub ratio: f64,
    pub accepted: bool,
    /// Chain value after the iteration.
    pub state: f64,
}

/**
A single-chain Metropolis sampler targeting the density `2p` on `[0, 1]`.

The chain is *running* until `config.iterations` transitions have been made and
*terminated* afterwards. [`run`](Self::run) drives it from wherever it is to
termination.
*/
#[derive(Debug, Clone)]
pub struct MetropolisSampler<R> {
    /// The target density.
    pub target: CoinPosterior,
    proposal: ReflectedUniform,
    config: RunConfig,
    /// Current value of the chain.
    pub current_state: f64,
    tracker: ChainTracker,
    rng: R,
}

impl<R: Rng + SeedableRng> MetropolisSampler<R> {
    /**
    Creates a sampler whose generator is seeded from `config.seed`, or from the system
    clock when no seed is set. The seed that was used is stored back into
    [`config`](Self::config), so a run can be repeated.

    # Errors

    Any precondition violation from [`RunConfig::validate`], or
    [`SamplerError::Seed`] if the clock cannot provide a seed.
    */
    pub fn new(config: RunConfig) -> Result<Self> {
        let seed = config.resolve_seed()?;
        debug!("seeding sampler with {seed}");
        Self::with_rng(config.set_seed(seed), R::seed_from_u64(seed))
    }
}

impl<R: Rng> MetropolisSampler<R> {
    const UPDATE_INTERVAL: Duration = Duration::from_millis(500);

    /// Creates a sampler around an existing generator.
    pub fn with_rng(config: RunConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            target: CoinPosterior,
            proposal: ReflectedUniform::new(config.width),
            config,
            current_state: config.initial_state,
            tracker: ChainTracker::new(),
            rng,
        })
    }

    /// The configuration the sampler was validated against.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The reflected random-walk proposal, of width `config().width`.
    pub fn proposal(&self) -> &ReflectedUniform {
        &self.proposal
    }

    /// Running statistics of the chain so far.
    pub fn tracker(&self) -> &ChainTracker {
        &self.tracker
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.tracker.n()
    }

    pub fn is_terminated(&self) -> bool {
        self.iteration() >= self.config.iterations
    }

    /**
    Performs one Metropolis iteration and returns what happened.

    # Errors

    [`SamplerError::DegenerateState`] if the chain sits at exactly 0, where the ratio
    `y / x` is undefined, or if this iteration would move it there. The latter takes a
    proposal of exactly `0.0` together with an acceptance draw of exactly `0.0`. In both
    cases the error carries the failing iteration, the chain keeps its previous value
    and nothing is accumulated.
    */
    pub fn transition(&mut self) -> Result<Transition> {
        let iteration = self.iteration() + 1;
        let x = self.current_state;
        let proposal = self.proposal.sample(x, &mut self.rng);
        let ratio = self
            .target
            .metropolis_ratio(x, proposal)
            .ok_or(SamplerError::DegenerateState { iteration })?;

        let accepted = ratio >= 1.0 || self.rng.gen::<f64>() <= ratio;
        if accepted && proposal == 0.0 {
            return Err(SamplerError::DegenerateState { iteration });
        }
        if accepted {
            self.current_state = proposal;
        }
        self.tracker.step(self.current_state, accepted);

        Ok(Transition {
            iteration,
            proposal,
            ratio,
            accepted,
            state: self.current_state,
        })
    }

    /// Runs the chain to termination, reporting every `report_interval` iterations.
    pub fn run<P: Report + ?Sized>(&mut self, report: &mut P) -> Result<RunSummary> {
        self.drive(report, None)
    }

    /**
    Like [`run`](Self::run), but also advances `pb`.

    The bar's position and acceptance rate are refreshed at most every 500 ms and once
    at the end, so that drawing does not dominate the loop.
    */
    pub fn run_with_progress<P: Report + ?Sized>(
        &mut self,
        report: &mut P,
        pb: &ProgressBar,
    ) -> Result<RunSummary> {
        self.drive(report, Some(pb))
    }

    fn drive<P: Report + ?Sized>(
        &mut self,
        report: &mut P,
        pb: Option<&ProgressBar>,
    ) -> Result<RunSummary> {
        info!(
            "running {} iterations from x0 = {} with proposal width {}",
            self.config.iterations, self.config.initial_state, self.config.width
        );
        if let Some(pb) = pb {
            pb.set_length(self.config.iterations as u64);
        }
        let mut last_update = Instant::now();

        report.header()?;
        while !self.is_terminated() {
            let transition = self.transition()?;

            if transition.iteration % self.config.report_interval == 0 {
                report.record(&Diagnostic {
                    iteration: transition.iteration,
                    x: transition.state,
                    mean: self.tracker.mean(),
                    nacpt: self.tracker.nacpt(),
                })?;
            }

            if let Some(pb) = pb {
                if last_update.elapsed() >= Self::UPDATE_INTERVAL || self.is_terminated() {
                    pb.set_position(transition.iteration as u64);
                    pb.set_message(format!(
                        "AcceptRate={:.3}",
                        self.tracker.acceptance_rate()
                    ));
                    last_update = Instant::now();
                }
            }
        }

        let stats = self.tracker.stats();
        info!(
            "observed mean {:.6} (theoretical {:.6}), acceptance rate {:.3} after {} iterations",
            stats.mean,
            self.target.mean(),
            stats.p_accept,
            stats.n
        );
        let summary = self.summary();
        report.summary(&summary)?;
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            iterations: self.iteration(),
            final_state: self.current_state,
            mean: self.tracker.mean(),
            nacpt: self.tracker.nacpt(),
            theoretical_mean: self.target.mean(),
        }
    }
}

impl<R: Rng> MarkovChain<f64> for MetropolisSampler<R> {
    fn step(&mut self) -> Result<&f64> {
        self.transition()?;
        Ok(&self.current_state)
    }

    fn current_state(&self) -> &f64 {
        &self.current_state
    }
}
