/*!
Target and proposal distributions of the toy model.

The data is a single coin toss that came up heads. With a uniform prior on the
probability of heads `p`, the posterior is

```text
                    p
Pr[p | heads] = ---------- = 2p,     0 <= p <= 1
                 ∫₀¹ p dp
```

which is what [`CoinPosterior`] describes. Proposals come from [`ReflectedUniform`]:
a uniform step of width `w` centred on the current value, folded back into `[0, 1]`
at the walls. Folding keeps the kernel symmetric, so the plain Metropolis ratio
applies without a Hastings correction.

# Examples

```rust
use toy_metro::distributions::{CoinPosterior, ReflectedUniform};

let target = CoinPosterior;
assert_eq!(target.density(0.25), 0.5);
assert_eq!(target.metropolis_ratio(0.5, 0.25), Some(0.5));

let proposal = ReflectedUniform::new(0.4);
assert_eq!(ReflectedUniform::reflect(1.25), 0.75);
assert_eq!(proposal.density(0.5, 0.6), proposal.density(0.6, 0.5));
```
*/

use log::trace;
use rand::distributions::Distribution;
use rand::Rng;

/// The posterior density `2p` on the unit interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoinPosterior;

impl CoinPosterior {
    /// Density `2p` on `[0, 1]`, zero elsewhere.
    pub fn density(&self, p: f64) -> f64 {
        if (0.0..=1.0).contains(&p) {
            2.0 * p
        } else {
            0.0
        }
    }

    /// The theoretical mean, `∫ p · 2p dp = 2/3`.
    pub fn mean(&self) -> f64 {
        2.0 / 3.0
    }

    /**
    The Metropolis ratio `π(to) / π(from)`.

    Because the density is proportional to `p`, this is just `to / from`. The ratio is
    undefined when the chain sits at `from == 0`; `None` is returned so that the caller
    can report it instead of carrying a NaN or infinity forward.
    */
    pub fn metropolis_ratio(&self, from: f64, to: f64) -> Option<f64> {
        if from > 0.0 {
            Some(to / from)
        } else {
            None
        }
    }
}

/// Exact draws by inversion of the CDF: `p = sqrt(u)`.
impl Distribution<f64> for CoinPosterior {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen::<f64>().sqrt()
    }
}

/**
A uniform random-walk proposal of full width `width`, reflected at 0 and 1.

The random source is not owned by the proposal: the sampler passes its generator in,
so that the perturbation and the acceptance test consume one stream in a fixed order.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectedUniform {
    pub width: f64,
}

impl ReflectedUniform {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    /// Moves `current` by `width * (u - 0.5)`, where `u` is a uniform draw on `[0, 1)`.
    pub fn perturb(&self, current: f64, u: f64) -> f64 {
        current + self.width * (u - 0.5)
    }

    /**
    Folds a raw proposal back into `[0, 1]`.

    Both walls are checked unconditionally, upper first. For proposals in `[-1, 2]`,
    which is everything a width of at most 2 can produce, at most one of them fires and
    the result is in `[0, 1]`. Anything further out is a caller error and trips a debug
    assertion.
    */
    pub fn reflect(proposed: f64) -> f64 {
        let mut y = proposed;
        if y > 1.0 {
            trace!("reflecting {y} at upper wall");
            y = 2.0 - y;
        }
        if y < 0.0 {
            trace!("reflecting {y} at lower wall");
            y = -y;
        }
        debug_assert!(
            (0.0..=1.0).contains(&y),
            "reflected proposal {y} (from {proposed}) left the unit interval"
        );
        y
    }

    /// Draws one reflected proposal from `current`.
    pub fn sample<R: Rng + ?Sized>(&self, current: f64, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        Self::reflect(self.perturb(current, u))
    }

    /**
    Density `q(to | from)` of the reflected proposal.

    A value `to` can be reached from three raw proposals: `to` itself, its mirror image
    above the upper wall `2 - to`, and its mirror image below the lower wall `-to`. Each
    one within `width / 2` of `from` contributes `1 / width`. Every term depends on
    `from` and `to` only through `|to - from|`, `|2 - to - from|` or `to + from`, which
    is why `q(to | from) == q(from | to)`.
    */
    pub fn density(&self, from: f64, to: f64) -> f64 {
        if !(0.0..=1.0).contains(&from) || !(0.0..=1.0).contains(&to) {
            return 0.0;
        }
        let half = self.width / 2.0;
        let within = |distance: f64| if distance <= half { 1.0 } else { 0.0 };

        let mut hits = within((to - from).abs());
        if to < 1.0 {
            hits += within((2.0 - (to + from)).abs());
        }
        if to > 0.0 {
            hits += within(to + from);
        }
        hits / self.width
    }
}

#[cfg(test)]
mod distributions_tests {
    use super::*;
    use crate::rng::Drand48;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn posterior_density_and_mean() {
        let target = CoinPosterior;
        assert_eq!(target.density(0.0), 0.0);
        assert_eq!(target.density(1.0), 2.0);
        assert_eq!(target.density(1.5), 0.0);
        assert_eq!(target.density(-0.1), 0.0);
        assert_abs_diff_eq!(target.mean(), 0.6666666666666666);
    }

    #[test]
    fn ratio_is_density_ratio() {
        let target = CoinPosterior;
        for (from, to) in [(0.5, 0.25), (0.2, 0.9), (1.0, 0.001)] {
            let expected = target.density(to) / target.density(from);
            assert_abs_diff_eq!(
                target.metropolis_ratio(from, to).unwrap(),
                expected,
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn ratio_undefined_at_zero() {
        assert_eq!(CoinPosterior.metropolis_ratio(0.0, 0.3), None);
    }

    #[test]
    fn exact_draws_have_mean_two_thirds() {
        let mut rng = Drand48::new(3);
        let n = 50_000;
        let mean = (0..n).map(|_| CoinPosterior.sample(&mut rng)).sum::<f64>() / n as f64;
        assert_abs_diff_eq!(mean, 2.0 / 3.0, epsilon = 0.01);
    }

    #[test]
    fn reflect_leaves_interior_alone() {
        for y in [0.0, 0.3, 1.0] {
            assert_eq!(ReflectedUniform::reflect(y), y);
        }
    }

    #[test]
    fn reflect_at_each_wall() {
        assert_abs_diff_eq!(ReflectedUniform::reflect(1.2), 0.8, epsilon = 1e-15);
        assert_abs_diff_eq!(ReflectedUniform::reflect(-0.15), 0.15, epsilon = 1e-15);
        assert_eq!(ReflectedUniform::reflect(2.0), 0.0);
        assert_eq!(ReflectedUniform::reflect(-1.0), 1.0);
    }

    #[test]
    fn both_walls_fire_past_the_documented_range() {
        // Upper wall maps 2.5 to -0.5, the lower wall then to 0.5.
        assert_eq!(ReflectedUniform::reflect(2.5), 0.5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "left the unit interval")]
    fn far_outside_proposal_trips_assertion() {
        ReflectedUniform::reflect(3.5);
    }

    #[test]
    fn perturbation_is_centred() {
        let proposal = ReflectedUniform::new(0.4);
        assert_eq!(proposal.perturb(0.5, 0.5), 0.5);
        assert_abs_diff_eq!(proposal.perturb(0.5, 0.0), 0.3, epsilon = 1e-15);
    }

    #[test]
    fn proposal_density_integrates_to_one() {
        let proposal = ReflectedUniform::new(0.4);
        let n = 200_000;
        let dt = 1.0 / n as f64;
        for from in [0.05, 0.5, 0.93, 1.0] {
            let mass: f64 = (0..n)
                .map(|i| proposal.density(from, (i as f64 + 0.5) * dt) * dt)
                .sum();
            assert_abs_diff_eq!(mass, 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn proposal_density_outside_support() {
        let proposal = ReflectedUniform::new(0.4);
        assert_eq!(proposal.density(0.5, 0.95), 0.0);
        assert_eq!(proposal.density(0.5, 1.2), 0.0);
        assert_eq!(proposal.density(-0.1, 0.1), 0.0);
    }

    proptest! {
        #[test]
        fn reflection_stays_in_unit_interval(y in -1.0f64..=2.0) {
            let z = ReflectedUniform::reflect(y);
            prop_assert!((0.0..=1.0).contains(&z));
        }

        #[test]
        fn reflection_preserves_distance_to_wall(y in -1.0f64..=2.0) {
            let z = ReflectedUniform::reflect(y);
            if y > 1.0 {
                prop_assert!(((z - 1.0).abs() - (y - 1.0).abs()).abs() < 1e-12);
            } else if y < 0.0 {
                prop_assert_eq!(z.abs(), y.abs());
            } else {
                prop_assert_eq!(z, y);
            }
        }

        #[test]
        fn sample_stays_in_unit_interval(x in 0.0f64..=1.0, seed in any::<u32>(), width in 0.01f64..=2.0) {
            let mut rng = Drand48::new(seed);
            let y = ReflectedUniform::new(width).sample(x, &mut rng);
            prop_assert!((0.0..=1.0).contains(&y));
        }

        #[test]
        fn proposal_kernel_is_symmetric(
            from in 0.001f64..0.999,
            to in 0.001f64..0.999,
            width in 0.01f64..=2.0,
        ) {
            let proposal = ReflectedUniform::new(width);
            prop_assert_eq!(proposal.density(from, to), proposal.density(to, from));
        }
    }
}
