//! Transit replacement on observed data: remove a known transit and inject model ones.

use crate::combine::{CombineObserver, TransitCombiner};
use crate::data::LightCurve;
use crate::error::CombineError;
use crate::float_trait::Float;
use crate::transit::TransitModel;

use rayon::prelude::*;

/// Outputs of [`replace_transit`]
#[derive(Clone, Debug, PartialEq)]
pub struct Replacement<T> {
    /// Data with the subtraction model removed, its ephemeris is the subtraction model one
    pub cleaned: LightCurve<T>,
    /// Cleaned data with every injection model added, in the order of the models, each carries the
    /// ephemeris of its model
    pub injected: Vec<LightCurve<T>>,
}

/// Replace the transit described by `sub` with each of the transits `adds`
///
/// 1. `data` adopts the ephemeris of `sub`, so it is folded with the period and epoch of the
///    transit being removed.
/// 2. `sub` is synthesized at the observation times and removed.
/// 3. For every model of `adds` the cleaned data adopts the model ephemeris, the model is
///    synthesized at the observation times and injected. Injections run in parallel.
pub fn replace_transit<T, O>(
    combiner: &TransitCombiner<O>,
    data: &LightCurve<T>,
    sub: &TransitModel<T>,
    adds: &[TransitModel<T>],
) -> Result<Replacement<T>, CombineError>
where
    T: Float,
    O: CombineObserver,
{
    let data = data.clone().with_ephemeris(sub.params().ephemeris());
    let sub_curve = sub.generate_for(&data);
    let cleaned = combiner.remove(&data, &sub_curve)?;
    log::debug!(
        "removed transit with period {} d, injecting {} models",
        data.ephemeris.period_days(),
        adds.len()
    );

    let injected = adds
        .par_iter()
        .map(|model| {
            let target = cleaned.clone().with_ephemeris(model.params().ephemeris());
            let curve = model.generate_for(&target);
            combiner.add(&target, &curve)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Replacement { cleaned, injected })
}
