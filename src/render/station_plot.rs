//! Station-plot rendering on a shared canvas.
//!
//! The canvas is an explicit resource with a scoped lifetime: built once
//! over a drawing area with a lon/lat extent, drawn onto once per bin layer
//! in schedule order, finalized once. Layer order matters when bins overlap
//! under the literal bottom-bin policy.

use std::path::Path;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::classify::{is_undefined, BinLayer};
use crate::error::{MetarError, Result};
use crate::models::Bounds;
use crate::utils::constants::{DEFAULT_FONT_SIZE, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH};

/// Plotters error types are generic over the backend, so they are collapsed
/// to strings at this boundary.
fn render_err<E: std::fmt::Display>(e: E) -> MetarError {
    MetarError::Render(e.to_string())
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLOT_WIDTH,
            height: DEFAULT_PLOT_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            title: "METAR surface temperature (F)".to_string(),
        }
    }
}

/// A station-plot canvas over one drawing area, with a plate-carree style
/// lon/lat coordinate system taken from the envelope bounds.
pub struct StationPlotCanvas<'a, 'b> {
    chart: ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    font_size: u32,
}

impl<'a, 'b> StationPlotCanvas<'a, 'b> {
    pub fn new(
        root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
        bounds: Bounds,
        options: &RenderOptions,
    ) -> Result<Self> {
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&options.title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(45)
            .build_cartesian_2d(bounds.west..bounds.east, bounds.south..bounds.north)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Longitude")
            .y_desc("Latitude")
            .draw()
            .map_err(render_err)?;

        Ok(Self {
            chart,
            font_size: options.font_size,
        })
    }

    /// Draw one bin layer: a text label per defined entry, in the bin's
    /// color, at the observation's coordinates. Undefined entries are
    /// skipped; coordinates must be parallel to the layer's value array.
    pub fn draw_layer(&mut self, layer: &BinLayer, lons: &[f64], lats: &[f64]) -> Result<()> {
        if lons.len() != layer.values.len() || lats.len() != layer.values.len() {
            return Err(MetarError::InvalidFormat(format!(
                "Layer has {} values but {} lon / {} lat coordinates",
                layer.values.len(),
                lons.len(),
                lats.len()
            )));
        }

        let color = RGBColor(layer.color.r, layer.color.g, layer.color.b);
        let style = TextStyle::from(("sans-serif", self.font_size as i32).into_font()).color(&color);

        self.chart
            .draw_series(
                layer
                    .values
                    .iter()
                    .zip(lons.iter().zip(lats.iter()))
                    .filter(|(v, _)| !is_undefined(**v))
                    .map(|(v, (&lon, &lat))| {
                        Text::new(format!("{:.0}", v), (lon, lat), style.clone())
                    }),
            )
            .map_err(render_err)?;

        Ok(())
    }
}

/// Run the full canvas lifecycle: create once, draw each layer in schedule
/// order, finalize once.
pub fn render_station_plot(
    path: &Path,
    bounds: Bounds,
    layers: &[BinLayer],
    lons: &[f64],
    lats: &[f64],
    options: &RenderOptions,
) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();

    let mut canvas = StationPlotCanvas::new(&root, bounds, options)?;
    for layer in layers {
        canvas.draw_layer(layer, lons, lats)?;
    }

    root.present().map_err(render_err)?;
    tracing::info!(message = "station plot written", path = %path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{bucket_by_thresholds, BottomBinPolicy};
    use crate::models::{Rgb, ThresholdSchedule};
    use tempfile::TempDir;

    fn schedule() -> ThresholdSchedule {
        ThresholdSchedule::new(
            vec![0.0, 40.0, 70.0],
            vec![Rgb::new(0, 0, 255), Rgb::new(0, 255, 0), Rgb::new(255, 0, 0)],
        )
        .unwrap()
    }

    #[test]
    fn test_render_station_plot_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("plot.png");

        let values = [41.0, 77.0, f64::NAN];
        let lons = [-104.67, -71.01, -122.31];
        let lats = [39.86, 42.36, 47.45];
        let layers = bucket_by_thresholds(&values, &schedule(), BottomBinPolicy::Literal);

        let bounds = Bounds {
            west: -125.0,
            east: -65.0,
            south: 23.0,
            north: 52.0,
        };

        render_station_plot(
            &output,
            bounds,
            &layers,
            &lons,
            &lats,
            &RenderOptions::default(),
        )
        .unwrap();

        assert!(output.exists());
        assert!(std::fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn test_draw_layer_rejects_ragged_coordinates() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("plot.png");

        let layers = bucket_by_thresholds(&[41.0, 77.0], &schedule(), BottomBinPolicy::Literal);
        let bounds = Bounds {
            west: -125.0,
            east: -65.0,
            south: 23.0,
            north: 52.0,
        };

        let result = render_station_plot(
            &output,
            bounds,
            &layers,
            &[-104.67], // one lon for two values
            &[39.86, 42.36],
            &RenderOptions::default(),
        );

        assert!(matches!(result, Err(MetarError::InvalidFormat(_))));
    }
}
