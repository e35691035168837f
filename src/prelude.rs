pub use crate::combine::CombineObserver;
pub use crate::float_trait::Float;
pub use crate::transit::OcclusionTrait;
