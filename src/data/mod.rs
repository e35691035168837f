mod light_curve;
pub use light_curve::LightCurve;

mod sorted_resampler;
pub use sorted_resampler::SortedResampler;
