use crate::error::{MetarError, Result};
use crate::models::Envelope;

/// Validate that a latitude/longitude pair is on the globe
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(MetarError::InvalidCoordinate(format!(
            "Latitude {} is outside valid range [-90, 90]",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(MetarError::InvalidCoordinate(format!(
            "Longitude {} is outside valid range [-180, 180]",
            longitude
        )));
    }

    Ok(())
}

/// Parse a single coordinate value
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    trimmed.parse::<f64>().map_err(|_| {
        MetarError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
    })
}

/// Parse a bounding box given as "west,east,south,north" into a closed
/// rectangular envelope
pub fn parse_bbox(bbox: &str) -> Result<Envelope> {
    let parts: Vec<&str> = bbox.split(',').collect();

    if parts.len() != 4 {
        return Err(MetarError::InvalidCoordinate(format!(
            "Invalid bounding box: '{}'. Expected format: 'west,east,south,north'",
            bbox
        )));
    }

    let west = parse_coordinate(parts[0])?;
    let east = parse_coordinate(parts[1])?;
    let south = parse_coordinate(parts[2])?;
    let north = parse_coordinate(parts[3])?;

    Envelope::from_bounds(west, east, south, north)
}
