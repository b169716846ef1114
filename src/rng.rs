/*!
A `drand48`-compatible random number generator.

The POSIX `drand48` family is a 48-bit linear congruential generator

```text
X[n+1] = (a * X[n] + c) mod 2^48,   a = 0x5DEECE66D, c = 0xB
```

seeded by `srand48(s)` as `X[0] = (s << 16) | 0x330E`, and `drand48()` returns
`X[n+1] / 2^48`. [`Drand48`] plugs this sequence into `rand`: `next_u64` returns the
state shifted into the top 48 bits, so `rng.gen::<f64>()` reproduces `drand48()`
exactly. This lets the sampler replay traces recorded by the classic C toy program.

It is not a good general-purpose generator; use [`rand::rngs::SmallRng`] otherwise.

```rust
use rand::Rng;
use toy_metro::rng::Drand48;

let mut rng = Drand48::new(0);
let u: f64 = rng.gen();
assert_eq!(u, 0.17082803610628972);
```
*/

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;
const SEED_LOW_BITS: u64 = 0x330E;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drand48 {
    state: u64,
}

impl Drand48 {
    /// Seeds the generator the way `srand48` does; only the low 32 bits are used.
    pub fn new(seed: u32) -> Self {
        Self {
            state: ((seed as u64) << 16) | SEED_LOW_BITS,
        }
    }

    fn advance(&mut self) -> u64 {
        self.state = MULTIPLIER.wrapping_mul(self.state).wrapping_add(INCREMENT) & MASK;
        self.state
    }
}

impl RngCore for Drand48 {
    /// Upper 32 bits of the 48-bit state, as `jrand48` returns them.
    fn next_u32(&mut self) -> u32 {
        (self.advance() >> 16) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.advance() << 16
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Drand48 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Truncates to the low 32 bits, like `srand48((long) seed)`.
    fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed as u32)
    }
}
