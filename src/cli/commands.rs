use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use tracing::Level;

use crate::classify::{
    bucket_by_thresholds, convert_observations, BottomBinPolicy, ClassificationReport,
};
use crate::cli::args::{Cli, Commands};
use crate::client::{parse_csv_table, MetarRequest, NcssClient};
use crate::error::{MetarError, Result};
use crate::models::{Envelope, ObservationSet, ThresholdSchedule};
use crate::render::{render_station_plot, RenderOptions};
use crate::utils::constants::MISSING_SENTINEL;
use crate::utils::coordinates::parse_bbox;
use crate::utils::filename::generate_default_plot_filename;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plot {
            bbox,
            hours_back,
            start,
            end,
            server,
            variable,
            levels,
            colors,
            style_file,
            corrected_bottom_bin,
            output_file,
            width,
            height,
            font_size,
        } => {
            let envelope = parse_bbox(&bbox)?;
            let (start, end) = resolve_window(hours_back, start, end)?;
            let schedule = resolve_schedule(levels, colors, style_file)?;
            let policy = bottom_bin_policy(corrected_bottom_bin);

            println!("Fetching METAR observations...");
            println!("Envelope: {}", bbox);
            println!("Window: {} to {}", start, end);

            let progress = ProgressReporter::new_spinner("Requesting subset...", false);
            let observations = fetch_observations(&server, &envelope, &variable, start, end).await?;
            progress.finish_with_message(&format!("Fetched {} observations", observations.len()));

            if observations.is_empty() {
                println!("No observations to plot");
                return Ok(());
            }

            let converted = convert_observations(&observations.temperatures(), MISSING_SENTINEL);
            let layers = bucket_by_thresholds(&converted, &schedule, policy);

            let report = ClassificationReport::from_layers(&converted, &layers);
            println!("\n{}", report.summary());

            let output = output_file.unwrap_or_else(|| generate_default_plot_filename(&variable));
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let options = RenderOptions {
                width,
                height,
                font_size,
                title: format!("METAR {} ({} to {})", variable, start, end),
            };

            println!("\nRendering {} layers...", layers.len());
            render_station_plot(
                &output,
                envelope.bounds(),
                &layers,
                &observations.longitudes(),
                &observations.latitudes(),
                &options,
            )?;

            println!("Plot written to {}", output.display());
        }

        Commands::Classify {
            bbox,
            hours_back,
            start,
            end,
            server,
            variable,
            levels,
            colors,
            style_file,
            corrected_bottom_bin,
            input,
        } => {
            let envelope = parse_bbox(&bbox)?;
            let (start, end) = resolve_window(hours_back, start, end)?;
            let schedule = resolve_schedule(levels, colors, style_file)?;
            let policy = bottom_bin_policy(corrected_bottom_bin);

            let observations = match input {
                Some(path) => {
                    println!("Reading observations from {}...", path.display());
                    read_local_observations(&path, &variable, &envelope, start, end)?
                }
                None => {
                    println!("Fetching METAR observations...");
                    let progress = ProgressReporter::new_spinner("Requesting subset...", false);
                    let observations =
                        fetch_observations(&server, &envelope, &variable, start, end).await?;
                    progress
                        .finish_with_message(&format!("Fetched {} observations", observations.len()));
                    observations
                }
            };

            if observations.is_empty() {
                println!("No observations in the envelope and window");
                return Ok(());
            }

            let converted = convert_observations(&observations.temperatures(), MISSING_SENTINEL);
            let layers = bucket_by_thresholds(&converted, &schedule, policy);

            let report = ClassificationReport::from_layers(&converted, &layers);
            println!("\n{}", report.summary());

            if report.unclassified > 0 {
                println!(
                    "\n⚠️  {} observations fall in no bin (legacy bottom-bin comparison; \
                     rerun with --corrected-bottom-bin to band them)",
                    report.unclassified
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .finish(),
    )
    .expect("failed to set tracing subscriber");
}

fn bottom_bin_policy(corrected: bool) -> BottomBinPolicy {
    if corrected {
        BottomBinPolicy::Corrected
    } else {
        BottomBinPolicy::Literal
    }
}

/// Resolve the threshold schedule from CLI flags: a style file wins, then an
/// explicit levels/colors pair, then the built-in default.
fn resolve_schedule(
    levels: Option<String>,
    colors: Option<String>,
    style_file: Option<PathBuf>,
) -> Result<ThresholdSchedule> {
    match (style_file, levels, colors) {
        (Some(path), _, _) => ThresholdSchedule::from_json_file(&path),
        (None, Some(levels), Some(colors)) => ThresholdSchedule::from_strings(&levels, &colors),
        (None, None, None) => Ok(ThresholdSchedule::default()),
        _ => Err(MetarError::Config(
            "--levels and --colors must be given together".to_string(),
        )),
    }
}

fn resolve_window(
    hours_back: i64,
    start: Option<String>,
    end: Option<String>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if hours_back <= 0 {
        return Err(MetarError::Config(format!(
            "--hours-back must be positive, got {}",
            hours_back
        )));
    }

    let end = match end {
        Some(s) => DateTime::parse_from_rfc3339(&s)?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let start = match start {
        Some(s) => DateTime::parse_from_rfc3339(&s)?.with_timezone(&Utc),
        None => end - Duration::hours(hours_back),
    };

    if start >= end {
        return Err(MetarError::Config(format!(
            "Window start {} must precede end {}",
            start, end
        )));
    }

    Ok((start, end))
}

async fn fetch_observations(
    server: &str,
    envelope: &Envelope,
    variable: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ObservationSet> {
    let request = MetarRequest::new(envelope.clone(), vec![variable.to_string()], start, end)?;
    let client = NcssClient::new(reqwest::Client::new(), server)?;
    client.fetch(&request).await
}

/// Read a saved subset response from disk, applying the same client-side
/// envelope and window refinement the network path gets.
fn read_local_observations(
    path: &std::path::Path,
    variable: &str,
    envelope: &Envelope,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ObservationSet> {
    let body = std::fs::read_to_string(path)?;
    let mut observations = parse_csv_table(&body, variable)?;

    observations.retain_within(envelope);
    observations.retain_between(start, end);

    Ok(observations)
}
