pub mod bucket;
pub mod convert;
pub mod report;

pub use bucket::{bucket_by_thresholds, BinLayer, BottomBinPolicy};
pub use convert::{celsius_to_fahrenheit, convert_observations, is_undefined, mask_sentinel};
pub use report::ClassificationReport;
