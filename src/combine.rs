use crate::data::{LightCurve, SortedResampler};
use crate::error::CombineError;
use crate::float_trait::Float;

use itertools::izip;
use ndarray::Array1;
use rayon::prelude::*;

/// Direction of the model alteration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Divide the model transit out of the data
    Remove,
    /// Inject the model transit into the data
    Add,
}

/// Receiver of the intermediate values of [`TransitCombiner::combine`]
///
/// All methods do nothing by default.
pub trait CombineObserver: Send + Sync {
    /// Called for every sample with both time and flux present
    fn on_sample<T: Float>(&self, _index: usize, _phase: T, _normalized: T, _model: T, _flux: T) {}

    /// Called once the output light curve is ready
    fn on_complete<T: Float>(&self, _summary: &CombineSummary<T>) {}
}

/// Per-run statistics passed to [`CombineObserver::on_complete`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombineSummary<T> {
    pub mode: CombineMode,
    /// Mean of non-missing data flux used as the normalization
    pub data_mean: T,
    /// Number of model samples used by the resampler
    pub model_samples: usize,
    /// Number of output samples marked missing
    pub missing: usize,
    pub total: usize,
}

/// Writes per-run summaries at `debug` and per-sample values at `trace` level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl CombineObserver for LogObserver {
    fn on_sample<T: Float>(&self, index: usize, phase: T, normalized: T, model: T, flux: T) {
        log::trace!(
            "sample {index}: phase = {phase}, normalized flux = {normalized}, model = {model}, \
             result = {flux}"
        );
    }

    fn on_complete<T: Float>(&self, summary: &CombineSummary<T>) {
        log::debug!(
            "{:?}: data mean flux = {}, {} model samples, {} of {} samples missing",
            summary.mode,
            summary.data_mean,
            summary.model_samples,
            summary.missing,
            summary.total,
        );
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SilentObserver;

impl CombineObserver for SilentObserver {}

/// Removes or injects a model transit into observed data
///
/// Both light curves are folded onto orbital phase with their own ephemerides and the model flux
/// is linearly interpolated at the data phases. Data flux is normalized by its mean $\bar{f}$
/// over non-missing values, and the output is
/// $$
/// f' = \left(\frac{f}{\bar{f}} \mp (m - 1)\right)\bar{f},
/// $$
/// with minus for [`CombineMode::Remove`] and plus for [`CombineMode::Add`]. Missing time or flux
/// gives missing output. If every data flux value is missing the mean is NaN and so is every
/// output value.
#[derive(Clone, Debug, Default)]
pub struct TransitCombiner<O = LogObserver> {
    observer: O,
}

impl TransitCombiner<LogObserver> {
    pub fn new() -> Self {
        Self {
            observer: LogObserver,
        }
    }
}

impl<O> TransitCombiner<O>
where
    O: CombineObserver,
{
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Combine `model` into `data`
    ///
    /// Output shares time grid, flux errors, ephemeris and date system with `data`. Its radius is
    /// the model radius for [`CombineMode::Add`] and the data radius otherwise. Model samples with
    /// missing phase or flux are skipped, at least two must remain.
    pub fn combine<T: Float>(
        &self,
        data: &LightCurve<T>,
        model: &LightCurve<T>,
        mode: CombineMode,
    ) -> Result<LightCurve<T>, CombineError> {
        let model_phase = model.phase();
        let resampler = SortedResampler::build(
            izip!(model_phase.iter(), model.flux().iter())
                .filter(|(phase, flux)| !(phase.is_nan() || flux.is_nan()))
                .map(|(&phase, &flux)| (phase, flux)),
        )?;

        let data_mean = data.mean_flux();
        let data_phase = data.phase();
        let mut missing = 0;
        let flux: Array1<T> = izip!(data_phase.iter(), data.flux().iter())
            .enumerate()
            .map(|(i, (&phase, &flux))| {
                if phase.is_nan() || flux.is_nan() {
                    missing += 1;
                    return T::nan();
                }
                let normalized = flux / data_mean;
                let m = resampler.query(phase);
                let result = match mode {
                    CombineMode::Remove => (normalized - m + T::one()) * data_mean,
                    CombineMode::Add => (normalized + m - T::one()) * data_mean,
                };
                self.observer.on_sample(i, phase, normalized, m, result);
                result
            })
            .collect();

        self.observer.on_complete(&CombineSummary {
            mode,
            data_mean,
            model_samples: resampler.len(),
            missing,
            total: data.len(),
        });

        let radius = match mode {
            CombineMode::Remove => data.radius,
            CombineMode::Add => model.radius,
        };
        Ok(LightCurve::new(data.t().to_owned(), flux, data.flux_err().to_owned())?
            .with_ephemeris(data.ephemeris)
            .with_date_system(data.date_system)
            .with_radius(radius))
    }

    pub fn remove<T: Float>(
        &self,
        data: &LightCurve<T>,
        model: &LightCurve<T>,
    ) -> Result<LightCurve<T>, CombineError> {
        self.combine(data, model, CombineMode::Remove)
    }

    pub fn add<T: Float>(
        &self,
        data: &LightCurve<T>,
        model: &LightCurve<T>,
    ) -> Result<LightCurve<T>, CombineError> {
        self.combine(data, model, CombineMode::Add)
    }

    /// Remove `sub_model` and then inject `add_model`
    ///
    /// Both steps fold `data` with its own ephemeris, see [`TransitCombiner::alter_many`] for
    /// models on different orbits.
    pub fn alter<T: Float>(
        &self,
        data: &LightCurve<T>,
        sub_model: &LightCurve<T>,
        add_model: &LightCurve<T>,
    ) -> Result<LightCurve<T>, CombineError> {
        let cleaned = self.remove(data, sub_model)?;
        self.add(&cleaned, add_model)
    }

    /// Remove `sub_model` once and inject every one of `add_models` into the cleaned data
    ///
    /// Before an injection the cleaned data adopts the ephemeris of the injected model, so every
    /// transit lands at its own mid-transit times and every output carries its model ephemeris.
    /// Injections are independent and run in parallel, output order follows `add_models`.
    pub fn alter_many<T: Float>(
        &self,
        data: &LightCurve<T>,
        sub_model: &LightCurve<T>,
        add_models: &[LightCurve<T>],
    ) -> Result<Vec<LightCurve<T>>, CombineError> {
        let cleaned = self.remove(data, sub_model)?;
        add_models
            .par_iter()
            .map(|model| {
                let target = cleaned.clone().with_ephemeris(model.ephemeris);
                self.add(&target, model)
            })
            .collect()
    }
}
