use serde::{Deserialize, Serialize};

use crate::error::{MetarError, Result};
use crate::utils::coordinates::validate_coordinates;

/// Axis-aligned bounding box of an envelope, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

/// A closed polygon of (longitude, latitude) vertices describing the
/// geographic region of interest.
///
/// The ring is stored closed: the last vertex equals the first. Constructors
/// close it if the caller did not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    vertices: Vec<(f64, f64)>,
}

impl Envelope {
    pub fn new(mut vertices: Vec<(f64, f64)>) -> Result<Self> {
        if vertices.first() == vertices.last() {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(MetarError::InvalidCoordinate(format!(
                "Envelope needs at least 3 distinct vertices, got {}",
                vertices.len()
            )));
        }

        for &(lon, lat) in &vertices {
            validate_coordinates(lat, lon)?;
        }

        let first = vertices[0];
        vertices.push(first);

        Ok(Self { vertices })
    }

    /// Build a closed rectangular envelope from bounding-box edges.
    pub fn from_bounds(west: f64, east: f64, south: f64, north: f64) -> Result<Self> {
        if west >= east {
            return Err(MetarError::InvalidCoordinate(format!(
                "West edge {} must be less than east edge {}",
                west, east
            )));
        }

        if south >= north {
            return Err(MetarError::InvalidCoordinate(format!(
                "South edge {} must be less than north edge {}",
                south, north
            )));
        }

        Self::new(vec![
            (west, south),
            (east, south),
            (east, north),
            (west, north),
        ])
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// Point-in-polygon test by ray casting. Points exactly on an edge may
    /// fall either way, which is acceptable at observation precision.
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        let mut inside = false;
        let n = self.vertices.len() - 1; // ring is closed, skip the duplicate

        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];

            if ((yi > latitude) != (yj > latitude))
                && (longitude < (xj - xi) * (latitude - yi) / (yj - yi) + xi)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Bounding box of the polygon, used for the subset request and for the
    /// plot extent.
    pub fn bounds(&self) -> Bounds {
        let mut west = f64::INFINITY;
        let mut east = f64::NEG_INFINITY;
        let mut south = f64::INFINITY;
        let mut north = f64::NEG_INFINITY;

        for &(lon, lat) in &self.vertices {
            west = west.min(lon);
            east = east.max(lon);
            south = south.min(lat);
            north = north.max(lat);
        }

        Bounds {
            west,
            east,
            south,
            north,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_closes_ring() {
        let envelope = Envelope::from_bounds(-110.0, -100.0, 35.0, 45.0).unwrap();
        let vertices = envelope.vertices();

        assert_eq!(vertices.len(), 5);
        assert_eq!(vertices.first(), vertices.last());
    }

    #[test]
    fn test_from_bounds_rejects_inverted_edges() {
        assert!(Envelope::from_bounds(-100.0, -110.0, 35.0, 45.0).is_err());
        assert!(Envelope::from_bounds(-110.0, -100.0, 45.0, 35.0).is_err());
    }

    #[test]
    fn test_new_rejects_degenerate_polygon() {
        assert!(Envelope::new(vec![(0.0, 0.0), (1.0, 1.0)]).is_err());
        // Closed two-vertex ring is still degenerate
        assert!(Envelope::new(vec![(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range_vertex() {
        assert!(Envelope::new(vec![(0.0, 0.0), (200.0, 1.0), (1.0, 2.0)]).is_err());
    }

    #[test]
    fn test_contains_rectangle() {
        let envelope = Envelope::from_bounds(-110.0, -100.0, 35.0, 45.0).unwrap();

        assert!(envelope.contains(-104.67, 39.86)); // Denver
        assert!(!envelope.contains(-71.01, 42.36)); // Boston
        assert!(!envelope.contains(-104.67, 50.0)); // north of box
    }

    #[test]
    fn test_contains_triangle() {
        let envelope = Envelope::new(vec![(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]).unwrap();

        assert!(envelope.contains(5.0, 2.0));
        assert!(!envelope.contains(0.5, 9.0));
    }

    #[test]
    fn test_bounds() {
        let envelope = Envelope::new(vec![(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]).unwrap();
        let bounds = envelope.bounds();

        assert_eq!(bounds.west, 0.0);
        assert_eq!(bounds.east, 10.0);
        assert_eq!(bounds.south, 0.0);
        assert_eq!(bounds.north, 10.0);
    }
}
