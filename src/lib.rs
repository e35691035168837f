#![doc = include_str!("../README.md")]


mod combine;
pub use combine::{
    CombineMode, CombineObserver, CombineSummary, LogObserver, SilentObserver, TransitCombiner,
};

pub mod constants;

mod data;
pub use data::{LightCurve, SortedResampler};

mod error;
pub use error::{CombineError, LightCurveError, ParameterError, ResamplerError};

mod float_trait;
pub use float_trait::Float;

mod limb_darkening;
pub use limb_darkening::LimbDarkening;

mod phase;
pub use phase::{DateSystem, Ephemeris, fold_phase, phase};

pub mod pipeline;

pub mod prelude;

pub mod transit;
pub use transit::{OrbitalParameters, SimulationGrid, TransitModel};

pub use ndarray;
