use crate::error::LightCurveError;
use crate::float_trait::Float;
use crate::phase::{DateSystem, Ephemeris};

use ndarray::{Array1, ArrayView1, Zip};
use serde::Serialize;

/// Photometric time series with its orbital bookkeeping
///
/// Time, flux and flux error arrays always have the same length, any of their entries may be NaN
/// to mark a missing value. Time is given in [`DateSystem`] units, the ephemeris period is in
/// seconds and the epoch is a Julian date, `radius` is the companion radius in Jupiter radii.
///
/// Serializes into any serde sink, missing values are written as the format represents NaN.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound = "T: Float")]
pub struct LightCurve<T> {
    t: Array1<T>,
    flux: Array1<T>,
    flux_err: Array1<T>,
    pub ephemeris: Ephemeris<T>,
    pub radius: T,
    pub date_system: DateSystem,
}

impl<T> LightCurve<T>
where
    T: Float,
{
    /// Construct `LightCurve` from time, flux and flux error arrays of the same length
    ///
    /// Ephemeris and radius are zero and time is a Julian date, use [`LightCurve::with_ephemeris`]
    /// and friends to set them.
    pub fn new(
        t: impl Into<Array1<T>>,
        flux: impl Into<Array1<T>>,
        flux_err: impl Into<Array1<T>>,
    ) -> Result<Self, LightCurveError> {
        let t = t.into();
        let flux = flux.into();
        let flux_err = flux_err.into();
        if t.len() != flux.len() || flux.len() != flux_err.len() {
            return Err(LightCurveError::LengthMismatch {
                t: t.len(),
                flux: flux.len(),
                flux_err: flux_err.len(),
            });
        }
        Ok(Self {
            t,
            flux,
            flux_err,
            ephemeris: Ephemeris::default(),
            radius: T::zero(),
            date_system: DateSystem::default(),
        })
    }

    /// Same as [`LightCurve::new`], but with zero flux errors
    pub fn from_time_flux(
        t: impl Into<Array1<T>>,
        flux: impl Into<Array1<T>>,
    ) -> Result<Self, LightCurveError> {
        let t = t.into();
        let flux_err = Array1::zeros(t.len());
        Self::new(t, flux, flux_err)
    }

    /// Zero flux errors, `t` and `flux` must be of the same length
    pub(crate) fn from_columns(t: Array1<T>, flux: Array1<T>) -> Self {
        debug_assert_eq!(t.len(), flux.len());
        Self {
            flux_err: Array1::zeros(t.len()),
            t,
            flux,
            ephemeris: Ephemeris::default(),
            radius: T::zero(),
            date_system: DateSystem::default(),
        }
    }

    pub fn with_ephemeris(mut self, ephemeris: Ephemeris<T>) -> Self {
        self.ephemeris = ephemeris;
        self
    }

    pub fn with_date_system(mut self, date_system: DateSystem) -> Self {
        self.date_system = date_system;
        self
    }

    pub fn with_radius(mut self, radius: T) -> Self {
        self.radius = radius;
        self
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn t(&self) -> ArrayView1<'_, T> {
        self.t.view()
    }

    pub fn flux(&self) -> ArrayView1<'_, T> {
        self.flux.view()
    }

    pub fn flux_err(&self) -> ArrayView1<'_, T> {
        self.flux_err.view()
    }

    /// Replace the flux array keeping time grid, errors and bookkeeping
    pub fn with_flux(mut self, flux: impl Into<Array1<T>>) -> Result<Self, LightCurveError> {
        let flux = flux.into();
        if flux.len() != self.len() {
            return Err(LightCurveError::LengthMismatch {
                t: self.t.len(),
                flux: flux.len(),
                flux_err: self.flux_err.len(),
            });
        }
        self.flux = flux;
        Ok(self)
    }

    pub fn uses_alternate_date_system(&self) -> bool {
        self.date_system.is_alternate()
    }

    /// Drop all samples in place, bookkeeping is kept
    pub fn clear(&mut self) {
        self.t = Array1::zeros(0);
        self.flux = Array1::zeros(0);
        self.flux_err = Array1::zeros(0);
    }

    /// Orbital phase of every sample, see [`crate::phase::phase`]
    pub fn phase(&self) -> Array1<T> {
        self.t
            .mapv(|t| self.ephemeris.phase(t, self.date_system))
    }

    /// Mean of non-missing flux values, NaN if every value is missing
    pub fn mean_flux(&self) -> T {
        let (sum, count) = self
            .flux
            .iter()
            .filter(|x| !x.is_nan())
            .fold((T::zero(), 0_usize), |(sum, count), &x| (sum + x, count + 1));
        sum / T::from_count(count)
    }

    /// Number of samples with both time and flux present
    pub fn count_observed(&self) -> usize {
        Zip::from(&self.t)
            .and(&self.flux)
            .fold(0, |acc, t, flux| {
                if t.is_nan() || flux.is_nan() {
                    acc
                } else {
                    acc + 1
                }
            })
    }
}
