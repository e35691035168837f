use ndarray::NdFloat;
use num_traits::FloatConst;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Floating point type used for light curves and model parameters, implemented for `f32` and
/// `f64`
pub trait Float:
    NdFloat + FloatConst + Default + Serialize + DeserializeOwned + JsonSchema + 'static
{
    /// Convert a (possibly lossy) `f64` literal or physical constant
    fn value(x: f64) -> Self;

    /// Convert a sample count, used as a divisor in means
    fn from_count(n: usize) -> Self;

    /// Draw a single value from the standard normal distribution
    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;

    #[inline]
    fn half() -> Self {
        Self::value(0.5)
    }

    #[inline]
    fn two() -> Self {
        Self::value(2.0)
    }

    #[inline]
    fn four() -> Self {
        Self::value(4.0)
    }
}

impl Float for f32 {
    #[inline]
    fn value(x: f64) -> Self {
        x as f32
    }

    #[inline]
    fn from_count(n: usize) -> Self {
        n as f32
    }

    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardNormal.sample(rng)
    }
}

impl Float for f64 {
    #[inline]
    fn value(x: f64) -> Self {
        x
    }

    #[inline]
    fn from_count(n: usize) -> Self {
        n as f64
    }

    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardNormal.sample(rng)
    }
}
