pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::parse_bbox;
pub use filename::generate_default_plot_filename;
pub use progress::ProgressReporter;
