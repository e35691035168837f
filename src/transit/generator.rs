use crate::constants::{JUPITER_RADIUS, SECONDS_IN_DAY, SOLAR_RADIUS};
use crate::data::LightCurve;
use crate::error::ParameterError;
use crate::float_trait::Float;
use crate::limb_darkening::LimbDarkening;
use crate::phase::{DateSystem, fold_phase};
use crate::transit::noise::IndexedNoise;
use crate::transit::parameters::{OrbitalParameters, SimulationGrid};
use crate::transit::regime::{NoOverlap, OcclusionTrait, Regime};

use ndarray::Array1;
use rayon::prelude::*;

/// Half-width of the phase window around mid-transit where the occultation is evaluated, the
/// opposite conjunction would otherwise produce a second, spurious transit
const PRIMARY_PHASE_WINDOW: f64 = 0.25;

/// Synthetic transit light-curve generator
///
/// Time offsets are seconds since mid-transit. Each offset is mapped to the projected separation
/// $z = (a / R_\star)\sqrt{\sin^2 \omega t + \cos^2 i \cos^2 \omega t}$, $\omega = 2\pi / P$,
/// the overlap [`Regime`] is selected for it and the flux is computed with the limb-darkening
/// profile. Samples are evaluated in parallel, the noise of every sample comes from its own
/// generator, see [`IndexedNoise`], so the output is the same for the serial and parallel paths.
#[derive(Clone, Debug)]
pub struct TransitModel<T> {
    params: OrbitalParameters<T>,
    profile: LimbDarkening<T>,
    noise: IndexedNoise<T>,
}

impl<T> TransitModel<T>
where
    T: Float,
{
    /// Validate parameters and precompute the limb-darkening normalization
    ///
    /// Noise seed is random, use [`TransitModel::with_seed`] for reproducible output.
    pub fn new(params: OrbitalParameters<T>) -> Result<Self, ParameterError> {
        params.validate()?;
        let profile = LimbDarkening::new(params.limb_darkening.clone(), params.radial_step)?;
        let noise = IndexedNoise::new(params.noise, rand::random());
        log::debug!(
            "transit model: a/R* = {}, angular frequency = {} rad/s, p = {}, omega = {}, \
             integration step = {} m, noise = {}%",
            params.scaled_semi_major_axis(),
            params.angular_frequency(),
            params.radius_ratio(),
            profile.omega(),
            params.radial_step * T::value(SOLAR_RADIUS),
            params.noise * T::value(100.0),
        );
        Ok(Self {
            params,
            profile,
            noise,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.noise = IndexedNoise::new(self.params.noise, seed);
        self
    }

    pub fn params(&self) -> &OrbitalParameters<T> {
        &self.params
    }

    pub fn profile(&self) -> &LimbDarkening<T> {
        &self.profile
    }

    pub fn noise(&self) -> &IndexedNoise<T> {
        &self.noise
    }

    /// Projected star-planet separation in stellar radii
    pub fn separation(&self, t: T) -> T {
        let (sin, cos) = (self.params.angular_frequency() * t).sin_cos();
        let cos_i = self.params.inclination.cos();
        self.params.scaled_semi_major_axis() * (sin * sin + (cos_i * cos).powi(2)).sqrt()
    }

    /// Overlap regime at time offset `t`, outside the primary phase window it is always
    /// [`NoOverlap`]
    pub fn regime(&self, t: T) -> Regime<T> {
        let phase = fold_phase(t / self.params.period);
        let window = T::value(PRIMARY_PHASE_WINDOW);
        if phase > -window && phase < window {
            Regime::select(self.separation(t), self.params.radius_ratio())
        } else {
            NoOverlap.into()
        }
    }

    /// Noiseless normalized flux at time offset `t`
    pub fn flux_at(&self, t: T) -> T {
        self.regime(t).flux(&self.profile)
    }

    fn sample(&self, index: usize, t: T) -> (T, T) {
        let jd = t / T::value(SECONDS_IN_DAY) + self.params.epoch;
        let flux = self.flux_at(t) + self.noise.sample(index);
        (jd, flux)
    }

    fn assemble(&self, t: Vec<T>, flux: Vec<T>) -> LightCurve<T> {
        LightCurve::from_columns(Array1::from_vec(t), Array1::from_vec(flux))
            .with_ephemeris(self.params.ephemeris())
            .with_radius(self.params.planet_radius / T::value(JUPITER_RADIUS))
            .with_date_system(DateSystem::Julian)
    }

    /// Light curve at the given offsets, computed in parallel
    ///
    /// Output time is a Julian date, `offset / 86400 + epoch`.
    pub fn generate(&self, offsets: &[T]) -> LightCurve<T> {
        let (t, flux): (Vec<_>, Vec<_>) = offsets
            .par_iter()
            .enumerate()
            .map(|(i, &offset)| self.sample(i, offset))
            .unzip();
        self.assemble(t, flux)
    }

    /// Same as [`TransitModel::generate`] on the current thread
    pub fn generate_serial(&self, offsets: &[T]) -> LightCurve<T> {
        let (t, flux): (Vec<_>, Vec<_>) = offsets
            .iter()
            .enumerate()
            .map(|(i, &offset)| self.sample(i, offset))
            .unzip();
        self.assemble(t, flux)
    }

    /// Light curve on a uniform grid of offsets starting at mid-transit
    pub fn generate_on_grid(
        &self,
        grid: &SimulationGrid<T>,
    ) -> Result<LightCurve<T>, ParameterError> {
        Ok(self.generate(&grid.offsets()?))
    }

    /// Light curve sampled at the observation times of `data`
    ///
    /// Observation times are converted to offsets from this model's epoch, see
    /// [`offsets_from_light_curve`]. Missing observation times stay missing.
    pub fn generate_for(&self, data: &LightCurve<T>) -> LightCurve<T> {
        self.generate(&offsets_from_light_curve(data, self.params.epoch))
    }
}

/// Convert a light curve time array to seconds since the Julian date `epoch`
pub fn offsets_from_light_curve<T: Float>(data: &LightCurve<T>, epoch: T) -> Vec<T> {
    match data.date_system {
        // already in seconds
        DateSystem::Wasp => {
            let epoch = DateSystem::Wasp.from_julian(epoch);
            data.t().iter().map(|&t| t - epoch).collect()
        }
        DateSystem::Julian => {
            let day = T::value(SECONDS_IN_DAY);
            data.t().iter().map(|&t| (t - epoch) * day).collect()
        }
    }
}

/// Validate `params` and generate a noisy light curve at `offsets` with a random noise seed
pub fn generate<T: Float>(
    offsets: &[T],
    params: &OrbitalParameters<T>,
) -> Result<LightCurve<T>, ParameterError> {
    Ok(TransitModel::new(params.clone())?.generate(offsets))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use crate::tests::*;

    use approx::assert_relative_eq;

    #[test]
    fn uniform_disk_transit_depth() {
        let params = uniform_disk_parameters();
        let model = TransitModel::new(params.clone()).unwrap();
        let p = params.radius_ratio();
        assert_relative_eq!(model.separation(0.0), 0.0, epsilon = 1e-14);
        assert_relative_eq!(model.flux_at(0.0), 1.0 - p * p, epsilon = 1e-12);

        let lc = model.generate(&[0.0]);
        assert_relative_eq!(lc.flux()[0], 1.0 - p * p, epsilon = 1e-12);
        assert_eq!(lc.t()[0], params.epoch);
    }

    #[test]
    fn out_of_transit_is_unity() {
        let params = uniform_disk_parameters();
        let model = TransitModel::new(params.clone()).unwrap();
        // a tenth of the period: z = 10 sin(0.2 pi) > 1 + p, while phase is inside the window
        let t = 0.1 * params.period;
        assert!(model.separation(t) > 1.0 + params.radius_ratio());
        assert!(matches!(model.regime(t), Regime::NoOverlap(_)));
        assert_eq!(model.flux_at(t), 1.0);
    }

    #[test]
    fn secondary_eclipse_is_excluded() {
        let params = OrbitalParameters {
            semi_major_axis: 1.05 * SOLAR_RADIUS,
            ..uniform_disk_parameters()
        };
        let model = TransitModel::new(params.clone()).unwrap();
        let t = 0.5 * params.period;
        // behind the star the projected separation is small, but no eclipse is produced
        assert!(model.separation(t) < 1.0);
        assert_eq!(model.flux_at(t), 1.0);
        assert!(model.flux_at(0.0) < 1.0);
    }

    #[test]
    fn noiseless_generation_is_reproducible() {
        let params = limb_darkened_parameters();
        let offsets = transit_offsets(&params, 2000);
        let first = generate(&offsets, &params).unwrap();
        let second = generate(&offsets, &params).unwrap();
        assert_eq!(first, second);
        assert!(first.flux().iter().any(|&f| f < 1.0));
    }

    #[test]
    fn parallel_and_serial_paths_agree() {
        let params = OrbitalParameters {
            noise: 1e-3,
            ..limb_darkened_parameters()
        };
        let offsets = transit_offsets(&params, 5000);
        let model = TransitModel::new(params).unwrap().with_seed(2024);
        let parallel = model.generate(&offsets);
        let serial = model.generate_serial(&offsets);
        assert_eq!(parallel, serial);
        assert_eq!(parallel, model.generate(&offsets));

        let other_seed = model.clone().with_seed(2025).generate(&offsets);
        assert_ne!(parallel.flux(), other_seed.flux());
    }

    #[test]
    fn light_curve_bookkeeping() {
        let params = limb_darkened_parameters();
        let model = TransitModel::new(params.clone()).unwrap();
        let lc = model.generate(&[-SECONDS_IN_DAY, 0.0, 0.5 * SECONDS_IN_DAY]);
        assert_eq!(lc.ephemeris, params.ephemeris());
        assert_relative_eq!(lc.radius, params.planet_radius / JUPITER_RADIUS);
        assert_eq!(lc.date_system, DateSystem::Julian);
        assert_relative_eq!(lc.t()[0], params.epoch - 1.0);
        assert_relative_eq!(lc.t()[2], params.epoch + 0.5);
        assert!(lc.flux_err().iter().all(|&e| e == 0.0));
    }

    #[test]
    fn configuration_error_aborts_before_synthesis() {
        let params = OrbitalParameters {
            limb_darkening: vec![0.0, 0.5],
            ..uniform_disk_parameters()
        };
        assert_eq!(
            generate(&[0.0, 1.0], &params).unwrap_err(),
            ParameterError::NonPositiveCentralIntensity
        );
    }

    #[test]
    fn grid_and_data_offsets() {
        let params = uniform_disk_parameters();
        let model = TransitModel::new(params.clone()).unwrap();
        let grid = SimulationGrid::new(3600.0, 60.0);
        let lc = model.generate_on_grid(&grid).unwrap();
        assert_eq!(lc.len(), 60);

        let jd = vec![params.epoch - 0.5, params.epoch, params.epoch + 0.25];
        let data = LightCurve::from_time_flux(jd.clone(), vec![1.0; 3]).unwrap();
        let offsets = offsets_from_light_curve(&data, params.epoch);
        assert_relative_eq!(offsets[0], -0.5 * SECONDS_IN_DAY, epsilon = 1e-4);
        assert_eq!(offsets[1], 0.0);

        let wd: Vec<_> = jd.iter().map(|&x| DateSystem::Wasp.from_julian(x)).collect();
        let wasp = LightCurve::from_time_flux(wd, vec![1.0; 3])
            .unwrap()
            .with_date_system(DateSystem::Wasp);
        let wasp_offsets = offsets_from_light_curve(&wasp, params.epoch);
        for (a, b) in offsets.iter().zip(wasp_offsets.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-3);
        }

        let model_on_data = model.generate_for(&wasp);
        for (a, b) in model_on_data.t().iter().zip(jd.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-8);
        }
    }

    #[test]
    fn missing_observation_time_stays_missing() {
        let params = uniform_disk_parameters();
        let model = TransitModel::new(params.clone()).unwrap();
        let data =
            LightCurve::from_time_flux(vec![params.epoch, f64::NAN], vec![1.0, 1.0]).unwrap();
        let lc = model.generate_for(&data);
        assert!(lc.t()[1].is_nan());
        assert_eq!(lc.flux()[1], 1.0);
    }
}
