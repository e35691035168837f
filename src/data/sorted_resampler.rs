use crate::error::ResamplerError;
use crate::float_trait::Float;

use itertools::Itertools;
use ndarray::Array1;
use std::cmp::Ordering;

/// Piecewise-linear interpolator over samples sorted by the abscissa
///
/// Underlying arrays are guaranteed to be sorted by `x` in ascending order. Sorting is stable, so
/// samples sharing the same `x` keep their input order.
#[derive(Clone, Debug, PartialEq)]
pub struct SortedResampler<T> {
    x: Array1<T>,
    y: Array1<T>,
}

impl<T> SortedResampler<T>
where
    T: Float,
{
    /// Minimum number of samples defining an interpolation segment
    pub const MIN_SAMPLES: usize = 2;

    /// Sort `(x, y)` pairs by `x` and build the resampler
    pub fn build(samples: impl IntoIterator<Item = (T, T)>) -> Result<Self, ResamplerError> {
        let mut samples: Vec<_> = samples.into_iter().collect();
        if samples.len() < Self::MIN_SAMPLES {
            return Err(ResamplerError::TooFewSamples {
                actual: samples.len(),
                minimum: Self::MIN_SAMPLES,
            });
        }
        if samples.iter().any(|(x, _)| x.is_nan()) {
            return Err(ResamplerError::NanAbscissa);
        }
        // slice::sort_by is stable
        samples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        let (x, y): (Vec<_>, Vec<_>) = samples.into_iter().unzip();
        Ok(Self {
            x: x.into(),
            y: y.into(),
        })
    }

    /// Build the resampler from separate abscissa and ordinate arrays
    pub fn from_xy(x: &[T], y: &[T]) -> Result<Self, ResamplerError> {
        if x.len() != y.len() {
            return Err(ResamplerError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        Self::build(x.iter().copied().zip_eq(y.iter().copied()))
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &Array1<T> {
        &self.x
    }

    pub fn y(&self) -> &Array1<T> {
        &self.y
    }

    /// Interpolate at `x`
    ///
    /// Inside the sampled range two neighbouring samples are linearly interpolated, a query
    /// equal to a sample abscissa returns its ordinate. Outside the range the first or the last
    /// segment is extrapolated. NaN query gives NaN.
    pub fn query(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        let n = self.x.len();
        // number of samples with abscissa not greater than x
        let i = self.x.as_slice().map_or_else(
            || self.x.iter().take_while(|&&xi| xi <= x).count(),
            |s| s.partition_point(|&xi| xi <= x),
        );
        let (left, right) = match i {
            0 => (0, 1),
            i if i >= n => (n - 2, n - 1),
            i => (i - 1, i),
        };
        let (x0, y0) = (self.x[left], self.y[left]);
        let (x1, y1) = (self.x[right], self.y[right]);
        if x == x0 {
            return y0;
        }
        if x == x1 {
            return y1;
        }
        if x1 == x0 {
            return y0;
        }
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }

    /// Interpolate at every point of `x`
    pub fn query_many(&self, x: &[T]) -> Array1<T> {
        x.iter().map(|&x| self.query(x)).collect()
    }
}

#[allow(clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use super::*;

    use light_curve_common::{all_close, linspace};
    use rand::prelude::*;

    #[test]
    fn line_interpolation_and_extrapolation() {
        let r = SortedResampler::build([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert_eq!(r.query(0.5), 0.5);
        assert_eq!(r.query(1.5), 1.5);
        assert_eq!(r.query(-1.0), -1.0);
        assert_eq!(r.query(3.0), 3.0);
    }

    #[test]
    fn exact_sample_returns_its_value() {
        let r = SortedResampler::build([(0.1, 3.0), (0.7, -2.0), (0.3, 5.0), (1.1, 0.25)]).unwrap();
        assert_eq!(r.query(0.1), 3.0);
        assert_eq!(r.query(0.3), 5.0);
        assert_eq!(r.query(0.7), -2.0);
        assert_eq!(r.query(1.1), 0.25);
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut x = linspace(-0.5, 0.5, 101);
        x.shuffle(&mut rng);
        let y: Vec<_> = x.iter().map(|&x| 3.0 * x - 1.0).collect();
        let r = SortedResampler::from_xy(&x, &y).unwrap();
        assert!(r.x().as_slice().unwrap().is_sorted());

        let q: Vec<_> = (0..100).map(|_| rng.random_range(-0.7..0.7)).collect();
        let desired: Vec<_> = q.iter().map(|&x| 3.0 * x - 1.0).collect();
        all_close(r.query_many(&q).as_slice().unwrap(), &desired, 1e-12);
    }

    #[test]
    fn stable_sort_keeps_duplicate_order() {
        let r = SortedResampler::build([(1.0, 10.0), (0.0, 0.0), (1.0, 20.0), (2.0, 30.0)]).unwrap();
        assert_eq!(r.y().as_slice().unwrap(), &[0.0, 10.0, 20.0, 30.0]);
        // the last of the duplicates opens the right-hand segment
        assert_eq!(r.query(1.0), 20.0);
        assert_eq!(r.query(1.5), 25.0);
        assert_eq!(r.query(0.5), 5.0);
    }

    #[test]
    fn nan_query_gives_nan() {
        let r = SortedResampler::build([(0.0, 0.0), (1.0, 1.0)]).unwrap();
        assert!(r.query(f64::NAN).is_nan());
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert_eq!(
            SortedResampler::<f64>::build([(0.0, 1.0)]),
            Err(ResamplerError::TooFewSamples {
                actual: 1,
                minimum: 2
            })
        );
        assert_eq!(
            SortedResampler::build([(0.0, 1.0), (f64::NAN, 1.0)]),
            Err(ResamplerError::NanAbscissa)
        );
        assert_eq!(
            SortedResampler::from_xy(&[0.0, 1.0], &[1.0]),
            Err(ResamplerError::LengthMismatch { x: 2, y: 1 })
        );
    }
}
