//! The chain abstraction and a helper to drive a chain for a fixed number of steps.

use crate::error::Result;

pub trait MarkovChain<S> {
    /// Does one iteration of the chain, returning the new current state.
    fn step(&mut self) -> Result<&S>;

    /// Get the current state without stepping.
    fn current_state(&self) -> &S;
}

/// Runs `chain` for `n_steps`, collecting the state after every step.
pub fn run_chain<S, M>(chain: &mut M, n_steps: usize) -> Result<Vec<S>>
where
    M: MarkovChain<S>,
    S: Clone,
{
    let mut out = Vec::with_capacity(n_steps);
    for _ in 0..n_steps {
        out.push(chain.step()?.clone());
    }
    Ok(out)
}
