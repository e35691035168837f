use crate::error::ParameterError;
use crate::float_trait::Float;
use crate::phase::Ephemeris;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Physical parameters of a star with a single transiting companion
///
/// Units: seconds for the period, meters for radii and the semi-major axis, radians for the
/// inclination. The epoch is the Julian date of mid-transit. `radial_step` is the integration
/// step in units of the stellar radius and `noise` is the standard deviation of the Gaussian
/// noise added to the normalized flux.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
#[schemars(bound = "T: Float")]
pub struct OrbitalParameters<T> {
    pub period: T,
    pub epoch: T,
    pub semi_major_axis: T,
    pub planet_radius: T,
    pub star_radius: T,
    pub inclination: T,
    pub limb_darkening: Vec<T>,
    pub radial_step: T,
    #[serde(default)]
    pub noise: T,
}

impl<T> OrbitalParameters<T>
where
    T: Float,
{
    /// Check the parameters which would make synthesis meaningless
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.period.is_finite() && self.period > T::zero()) {
            return Err(ParameterError::NonPositivePeriod);
        }
        match self.limb_darkening.first() {
            None => return Err(ParameterError::EmptyLimbDarkening),
            Some(&c0) if !(c0 > T::zero()) => {
                return Err(ParameterError::NonPositiveCentralIntensity);
            }
            Some(_) => {}
        }
        if !(self.radial_step.is_finite() && self.radial_step > T::zero()) {
            return Err(ParameterError::NonPositiveRadialStep);
        }
        if !(self.star_radius.is_finite() && self.star_radius > T::zero()) {
            return Err(ParameterError::NonPositiveLength("stellar radius"));
        }
        if !(self.noise.is_finite() && self.noise >= T::zero()) {
            return Err(ParameterError::InvalidNoiseAmplitude);
        }
        Ok(())
    }

    pub fn ephemeris(&self) -> Ephemeris<T> {
        Ephemeris::new(self.period, self.epoch)
    }

    /// Planet to star radius ratio, $p$
    pub fn radius_ratio(&self) -> T {
        self.planet_radius / self.star_radius
    }

    /// Semi-major axis in units of the stellar radius
    pub fn scaled_semi_major_axis(&self) -> T {
        self.semi_major_axis / self.star_radius
    }

    /// Orbital angular frequency, rad/s
    pub fn angular_frequency(&self) -> T {
        T::two() * T::PI() / self.period
    }
}

/// Uniform grid of time offsets from mid-transit, seconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct SimulationGrid<T> {
    pub max_time: T,
    pub time_step: T,
}

impl<T> SimulationGrid<T>
where
    T: Float,
{
    pub fn new(max_time: T, time_step: T) -> Self {
        Self {
            max_time,
            time_step,
        }
    }

    /// Offsets `0, dt, 2 dt, ...` strictly below `max_time`
    pub fn offsets(&self) -> Result<Vec<T>, ParameterError> {
        if !(self.time_step.is_finite() && self.time_step > T::zero()) {
            return Err(ParameterError::NonPositiveTimeStep);
        }
        Ok((0..)
            .map(|i| T::from_count(i) * self.time_step)
            .take_while(|&t| t < self.max_time)
            .collect())
    }
}
