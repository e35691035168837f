use crate::float_trait::Float;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Gaussian white noise addressable by sample index
///
/// Every sample owns a generator seeded from the global seed and the sample index, so a value
/// does not depend on the order in which samples are evaluated or on the number of threads.
/// Per-sample seeds are mixed with SplitMix64, so they do not depend on the toolchain; the values
/// are reproducible for as long as the `rand` version of [`StdRng`] is unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedNoise<T> {
    amplitude: T,
    seed: u64,
}

impl<T> IndexedNoise<T>
where
    T: Float,
{
    pub fn new(amplitude: T, seed: u64) -> Self {
        Self { amplitude, seed }
    }

    pub fn amplitude(&self) -> T {
        self.amplitude
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Noise value for the sample `index`, exactly zero for zero amplitude
    pub fn sample(&self, index: usize) -> T {
        if self.amplitude.is_zero() {
            return T::zero();
        }
        let mut rng = StdRng::seed_from_u64(sample_seed(self.seed, index));
        self.amplitude * T::standard_normal(&mut rng)
    }
}

/// SplitMix64 output function
fn mix(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn sample_seed(seed: u64, index: usize) -> u64 {
    mix(seed ^ mix(index as u64))
}
