mod generator;
pub use generator::{TransitModel, generate, offsets_from_light_curve};

mod noise;
pub use noise::IndexedNoise;

mod parameters;
pub use parameters::{OrbitalParameters, SimulationGrid};

mod regime;
pub use regime::{FullOverlap, NoOverlap, OcclusionTrait, PartialOverlap, Regime};
