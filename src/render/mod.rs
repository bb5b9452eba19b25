pub mod station_plot;

pub use station_plot::{render_station_plot, RenderOptions, StationPlotCanvas};
