/// Invalid physical or numerical configuration, detected before any per-sample work starts
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("limb-darkening coefficient vector is empty")]
    EmptyLimbDarkening,

    #[error("leading limb-darkening coefficient (central intensity) must be positive")]
    NonPositiveCentralIntensity,

    #[error("radial integration step must be a positive finite number")]
    NonPositiveRadialStep,

    #[error("orbital period must be a positive finite number")]
    NonPositivePeriod,

    #[error("{0} must be a positive finite number")]
    NonPositiveLength(&'static str),

    #[error("noise amplitude must be a non-negative finite number")]
    InvalidNoiseAmplitude,

    #[error("simulation time step must be a positive finite number")]
    NonPositiveTimeStep,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LightCurveError {
    #[error("time, flux and flux error arrays must have the same length, got {t}, {flux} and {flux_err}")]
    LengthMismatch {
        t: usize,
        flux: usize,
        flux_err: usize,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResamplerError {
    #[error("x and y should have the same size, got {x} and {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("resampler needs at least {minimum} samples, got {actual}")]
    TooFewSamples { actual: usize, minimum: usize },

    #[error("resampler abscissa contains NaN")]
    NanAbscissa,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CombineError {
    #[error("model light curve cannot be resampled: {0}")]
    ModelResampling(#[from] ResamplerError),

    #[error(transparent)]
    LightCurve(#[from] LightCurveError),
}
