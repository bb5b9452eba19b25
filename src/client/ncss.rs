//! Client for a THREDDS NetCDF Subset Service (NCSS) point-data endpoint.
//!
//! The service accepts a variable list, a bounding box, and a time range,
//! and returns a CSV table with one column per requested parameter. Requests
//! carry no retry or timeout policy beyond reqwest defaults; failures
//! surface to the caller unmodified.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode, Url};

use crate::error::{MetarError, Result};
use crate::models::{Envelope, ObservationSet, SurfaceObservation};
use crate::utils::constants::{COL_LATITUDE, COL_LONGITUDE, COL_STATION, COL_TIME, MISSING_SENTINEL};

/// One subset request: what to fetch, where, and when.
///
/// The first entry in `variables` is the measurement column parsed into the
/// observation set; any further entries are passed through to the service
/// untouched.
#[derive(Debug, Clone)]
pub struct MetarRequest {
    pub envelope: Envelope,
    pub variables: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MetarRequest {
    pub fn new(
        envelope: Envelope,
        variables: Vec<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        if variables.is_empty() {
            return Err(MetarError::Config(
                "Subset request needs at least one variable".to_string(),
            ));
        }

        if start >= end {
            return Err(MetarError::Config(format!(
                "Time window start {} must precede end {}",
                start, end
            )));
        }

        Ok(Self {
            envelope,
            variables,
            start,
            end,
        })
    }

    pub fn measurement_variable(&self) -> &str {
        &self.variables[0]
    }
}

#[derive(Debug)]
pub struct NcssClient {
    client: Client,
    base_url: Url,
}

impl NcssClient {
    const USER_AGENT: &'static str =
        "metar-plotter (https://github.com/rjl-climate/metar-plotter)";
    const CSV_RESPONSE: &'static str = "text/csv";

    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| MetarError::Config(format!("Invalid server URL '{}': {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    /// Fetch observations for the request, then refine client-side: the
    /// service subsets by bounding box only, so polygon containment and the
    /// exact time window are applied to the returned table.
    pub async fn fetch(&self, request: &MetarRequest) -> Result<ObservationSet> {
        let url = self.subset_url(request);
        tracing::debug!(message = "making subset request", url = %url);

        let res = self
            .client
            .get(url.clone())
            .header(USER_AGENT, Self::USER_AGENT)
            .header(ACCEPT, Self::CSV_RESPONSE)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(MetarError::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = res.text().await?;
        let mut observations = parse_csv_table(&body, request.measurement_variable())?;

        observations.retain_within(&request.envelope);
        observations.retain_between(request.start, request.end);

        tracing::info!(
            message = "subset request complete",
            observations = observations.len()
        );

        Ok(observations)
    }

    fn subset_url(&self, request: &MetarRequest) -> Url {
        let bounds = request.envelope.bounds();
        let mut url = self.base_url.clone();

        url.query_pairs_mut()
            .append_pair("var", &request.variables.join(","))
            .append_pair("west", &bounds.west.to_string())
            .append_pair("east", &bounds.east.to_string())
            .append_pair("south", &bounds.south.to_string())
            .append_pair("north", &bounds.north.to_string())
            .append_pair(
                "time_start",
                &request.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair(
                "time_end",
                &request.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair("accept", "csv");

        url
    }
}

/// Locate a column by name. NCSS headers may carry a unit suffix, e.g.
/// `air_temperature[unit="Celsius"]`, so a prefix match on `name[` counts.
fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| {
            let h = h.trim();
            h == name || h.starts_with(&format!("{}[", name))
        })
        .ok_or_else(|| MetarError::MissingData(format!("Response has no '{}' column", name)))
}

/// Parse an NCSS CSV body into an observation set.
///
/// Rows with unparseable station, time, or coordinate fields are skipped
/// with a warning rather than failing the whole table. An empty measurement
/// field is treated as the missing-value sentinel; a `-9999.0` transmitted
/// by the service is preserved verbatim.
pub fn parse_csv_table(body: &str, variable: &str) -> Result<ObservationSet> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let station_col = column_index(&headers, COL_STATION)?;
    let time_col = column_index(&headers, COL_TIME)?;
    let lat_col = column_index(&headers, COL_LATITUDE)?;
    let lon_col = column_index(&headers, COL_LONGITUDE)?;
    let value_col = column_index(&headers, variable)?;

    let mut observations = ObservationSet::new();

    for record in reader.records() {
        let record = record?;

        let Some(parsed) = parse_row(&record, station_col, time_col, lat_col, lon_col, value_col)
        else {
            tracing::warn!(message = "skipping malformed row", row = ?record);
            continue;
        };

        observations.push(parsed);
    }

    Ok(observations)
}

fn parse_row(
    record: &csv::StringRecord,
    station_col: usize,
    time_col: usize,
    lat_col: usize,
    lon_col: usize,
    value_col: usize,
) -> Option<SurfaceObservation> {
    let station = record.get(station_col)?.to_string();
    if station.is_empty() {
        return None;
    }

    let time = DateTime::parse_from_rfc3339(record.get(time_col)?)
        .ok()?
        .with_timezone(&Utc);

    let latitude = record.get(lat_col)?.parse::<f64>().ok()?;
    let longitude = record.get(lon_col)?.parse::<f64>().ok()?;

    let value_field = record.get(value_col)?;
    let temperature = if value_field.is_empty() {
        MISSING_SENTINEL
    } else {
        value_field.parse::<f64>().ok()?
    };

    let observation = SurfaceObservation::new(station, time, latitude, longitude, temperature);

    // Out-of-range coordinates mean a corrupt row, not a bad request
    validator::Validate::validate(&observation).ok()?;

    Some(observation)
}
