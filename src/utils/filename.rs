use chrono::Utc;
use std::path::PathBuf;

/// Generate a default output filename like `metar-air_temperature-250830-1412.png`
pub fn generate_default_plot_filename(variable: &str) -> PathBuf {
    let stamp = Utc::now().format("%y%m%d-%H%M");
    PathBuf::from(format!("metar-{}-{}.png", variable, stamp))
}
