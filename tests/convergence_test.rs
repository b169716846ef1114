//! Long-run behaviour of the sampler under the default configuration.
//!
//! The chain should settle on the density `2p`: its running mean approaches 2/3 and a
//! thinned sample is indistinguishable from exact draws.

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use toy_metro::config::RunConfig;
use toy_metro::core::run_chain;
use toy_metro::distributions::CoinPosterior;
use toy_metro::metropolis::MetropolisSampler;
use toy_metro::report::Diagnostic;
use toy_metro::rng::Drand48;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const THEORETICAL_MEAN: f64 = 2.0 / 3.0;

    #[test]
    fn running_mean_converges_for_fixed_seeds() {
        for seed in [1, 7, 42, 2001, 12345] {
            let mut sampler =
                MetropolisSampler::with_rng(RunConfig::default(), Drand48::new(seed)).unwrap();
            let mut records: Vec<Diagnostic> = Vec::new();
            let summary = sampler.run(&mut records).unwrap();

            assert_eq!(records.len(), 1_000);
            assert_eq!(records.last().unwrap().iteration, 100_000);
            assert!(
                (summary.mean - THEORETICAL_MEAN).abs() < 0.01,
                "seed {seed}: mean {} too far from 2/3",
                summary.mean
            );
        }
    }

    #[test]
    fn running_mean_converges_with_small_rng() {
        for seed in 0..4 {
            let config = RunConfig::default().set_seed(seed);
            let mut sampler = MetropolisSampler::<SmallRng>::new(config).unwrap();
            let mut records: Vec<Diagnostic> = Vec::new();
            let summary = sampler.run(&mut records).unwrap();
            assert_abs_diff_eq!(summary.mean, THEORETICAL_MEAN, epsilon = 0.03);
            assert!(summary.acceptance_rate() > 0.8);
        }
    }

    #[test]
    fn thinned_chain_matches_exact_draws() {
        let mut sampler =
            MetropolisSampler::with_rng(RunConfig::default(), Drand48::new(42)).unwrap();
        let chain = run_chain(&mut sampler, 100_000).unwrap();
        let thinned: Vec<f64> = chain.into_iter().step_by(50).collect();

        let mut rng = Drand48::new(7);
        let exact: Vec<f64> = (0..thinned.len())
            .map(|_| CoinPosterior.sample(&mut rng))
            .collect();

        let result = kolmogorov_smirnov::test_f64(&thinned, &exact, 0.95);
        println!(
            "KS statistic {}, reject probability {}",
            result.statistic, result.reject_probability
        );
        assert!(
            !result.is_rejected,
            "chain does not look like draws from 2p"
        );
    }
}
