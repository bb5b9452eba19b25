pub mod envelope;
pub mod observation;
pub mod thresholds;

pub use envelope::{Bounds, Envelope};
pub use observation::{ObservationSet, SurfaceObservation};
pub use thresholds::{Rgb, ThresholdSchedule};
