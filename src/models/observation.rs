use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Envelope;
use crate::utils::constants::MISSING_SENTINEL;

/// One decoded METAR surface report.
///
/// Temperature is in degrees Celsius as transmitted and may hold the
/// missing-value sentinel verbatim. Sentinel handling belongs to the
/// classification pass, not the model.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SurfaceObservation {
    pub station: String,

    pub time: DateTime<Utc>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub temperature: f64,
}

impl SurfaceObservation {
    pub fn new(
        station: String,
        time: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        temperature: f64,
    ) -> Self {
        Self {
            station,
            time,
            latitude,
            longitude,
            temperature,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.temperature == MISSING_SENTINEL
    }
}

/// An ordered collection of surface reports.
///
/// Column accessors return parallel arrays: same length, same index
/// correspondence. The invariant holds by construction because every
/// column is projected from the same record vector.
#[derive(Debug, Clone, Default)]
pub struct ObservationSet {
    observations: Vec<SurfaceObservation>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    pub fn from_observations(observations: Vec<SurfaceObservation>) -> Self {
        Self { observations }
    }

    pub fn push(&mut self, observation: SurfaceObservation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceObservation> {
        self.observations.iter()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.temperature).collect()
    }

    pub fn latitudes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.latitude).collect()
    }

    pub fn longitudes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.longitude).collect()
    }

    /// Drop reports outside the envelope polygon. The subset service only
    /// filters by bounding box, so polygon refinement happens client-side.
    pub fn retain_within(&mut self, envelope: &Envelope) {
        self.observations
            .retain(|o| envelope.contains(o.longitude, o.latitude));
    }

    /// Drop reports outside the half-open window `[start, end)`.
    pub fn retain_between(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.observations.retain(|o| o.time >= start && o.time < end);
    }
}
