//! Day classification and workload weighting.
//!
//! [`DayClassifier`] tags each date with a [`DayType`](crate::models::DayType);
//! [`WeightModel`] turns that tag into a workload weight. Both are pure:
//! they hold configuration only and can be used outside a rotation run
//! wherever a date needs pricing.

mod classifier;
mod weights;

pub use classifier::{is_weekend, DayClassifier};
pub use weights::{DayWeights, WeightModel};
