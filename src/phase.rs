use crate::constants::{SECONDS_IN_DAY, WASP_ZERO_POINT_JD};
use crate::float_trait::Float;

use macro_const::macro_const;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const PHASE_DOC: &'static str = r"Fold onto orbital phase

The fractional part of the number of elapsed periods is taken by magnitude, $|\{x\}|$, and
values above one half are shifted down by unity, so the phase lies in $[-1/2, 1/2]$ with the
reference epoch at zero. The fold is symmetric: times before and after the epoch by the same
amount share the phase. NaN propagates.
";
}

/// Time representation of a light-curve time array
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DateSystem {
    /// Julian date, days
    #[default]
    Julian,
    /// WASP date: seconds since 2004-01-01T00:00:00
    Wasp,
}

impl DateSystem {
    pub fn is_alternate(self) -> bool {
        matches!(self, Self::Wasp)
    }

    /// Convert a time value in this system to Julian date
    pub fn to_julian<T: Float>(self, t: T) -> T {
        match self {
            Self::Julian => t,
            Self::Wasp => t / T::value(SECONDS_IN_DAY) + T::value(WASP_ZERO_POINT_JD),
        }
    }

    /// Convert a Julian date to this system
    pub fn from_julian<T: Float>(self, jd: T) -> T {
        match self {
            Self::Julian => jd,
            Self::Wasp => (jd - T::value(WASP_ZERO_POINT_JD)) * T::value(SECONDS_IN_DAY),
        }
    }
}

/// Orbital ephemeris: period in seconds and reference (mid-transit) epoch as Julian date
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct Ephemeris<T> {
    pub period: T,
    pub epoch: T,
}

impl<T> Ephemeris<T>
where
    T: Float,
{
    pub fn new(period: T, epoch: T) -> Self {
        Self { period, epoch }
    }

    /// Period in days
    pub fn period_days(&self) -> T {
        self.period / T::value(SECONDS_IN_DAY)
    }

    #[doc = PHASE_DOC!()]
    pub fn phase(&self, t: T, date_system: DateSystem) -> T {
        phase(t, self.period, self.epoch, date_system)
    }
}

#[doc = PHASE_DOC!()]
///
/// `cycles` is the elapsed time in units of the period.
pub fn fold_phase<T: Float>(cycles: T) -> T {
    let remainder = cycles.fract().abs();
    if remainder > T::half() {
        remainder - T::one()
    } else {
        remainder
    }
}

#[doc = PHASE_DOC!()]
///
/// `t` is given in `date_system` units, `period` in seconds and `epoch` as Julian date.
pub fn phase<T: Float>(t: T, period: T, epoch: T, date_system: DateSystem) -> T {
    let jd = date_system.to_julian(t);
    fold_phase((jd - epoch) / (period / T::value(SECONDS_IN_DAY)))
}
