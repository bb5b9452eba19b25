use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetarError, Result};
use crate::utils::constants::{DEFAULT_COLORS, DEFAULT_LEVELS};

/// Marker color for one threshold bin.
///
/// Serialized as a color name or `#rrggbb` string so style files stay
/// human-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        match trimmed.to_lowercase().as_str() {
            "black" => Ok(Self::new(0, 0, 0)),
            "white" => Ok(Self::new(255, 255, 255)),
            "red" => Ok(Self::new(214, 39, 40)),
            "orange" => Ok(Self::new(255, 127, 14)),
            "yellow" => Ok(Self::new(219, 219, 20)),
            "green" => Ok(Self::new(44, 160, 44)),
            "cyan" => Ok(Self::new(23, 190, 207)),
            "blue" => Ok(Self::new(31, 119, 180)),
            "purple" => Ok(Self::new(148, 103, 189)),
            "magenta" => Ok(Self::new(227, 119, 194)),
            "brown" => Ok(Self::new(140, 86, 75)),
            "grey" | "gray" => Ok(Self::new(127, 127, 127)),
            _ => Err(MetarError::Config(format!("Unknown color name: '{}'", name))),
        }
    }

    fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 6 {
            return Err(MetarError::Config(format!(
                "Hex color must be 6 digits, got '#{}'",
                hex
            )));
        }

        let parse = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|_| MetarError::Config(format!("Invalid hex color: '#{}'", hex)))
        };

        Ok(Self::new(
            parse(&hex[0..2])?,
            parse(&hex[2..4])?,
            parse(&hex[4..6])?,
        ))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = MetarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = MetarError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_name(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Raw shape of a JSON style file.
#[derive(Debug, Deserialize)]
struct ScheduleFile {
    levels: Vec<f64>,
    colors: Vec<Rgb>,
}

/// An ordered, strictly increasing sequence of threshold boundary values
/// paired one-to-one with marker colors.
///
/// Immutable once constructed; all schedule validation happens here so the
/// bucketing pass itself cannot fail partway through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSchedule {
    levels: Vec<f64>,
    colors: Vec<Rgb>,
}

impl ThresholdSchedule {
    pub fn new(levels: Vec<f64>, colors: Vec<Rgb>) -> Result<Self> {
        if levels.len() != colors.len() {
            return Err(MetarError::Config(format!(
                "Threshold schedule has {} levels but {} colors",
                levels.len(),
                colors.len()
            )));
        }

        if levels.len() < 2 {
            return Err(MetarError::Config(format!(
                "Threshold schedule needs at least 2 levels, got {}",
                levels.len()
            )));
        }

        for pair in levels.windows(2) {
            if pair[0] >= pair[1] {
                return Err(MetarError::Config(format!(
                    "Threshold levels must be strictly increasing: {} >= {}",
                    pair[0], pair[1]
                )));
            }
        }

        Ok(Self { levels, colors })
    }

    /// Parse levels and colors given as comma-separated CLI strings.
    pub fn from_strings(levels: &str, colors: &str) -> Result<Self> {
        let levels = levels
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| MetarError::Config(format!("Invalid threshold level: '{}'", s)))
            })
            .collect::<Result<Vec<_>>>()?;

        let colors = colors
            .split(',')
            .map(Rgb::from_name)
            .collect::<Result<Vec<_>>>()?;

        Self::new(levels, colors)
    }

    /// Load a schedule from a JSON style file:
    /// `{"levels": [0, 10], "colors": ["blue", "#d62728"]}`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: ScheduleFile = serde_json::from_str(&content)?;
        Self::new(raw.levels, raw.colors)
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for ThresholdSchedule {
    fn default() -> Self {
        // Constants are checked by test_default_schedule_is_valid
        Self {
            levels: DEFAULT_LEVELS.to_vec(),
            colors: DEFAULT_COLORS
                .iter()
                .filter_map(|name| Rgb::from_name(name).ok())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn colors(n: usize) -> Vec<Rgb> {
        (0..n).map(|i| Rgb::new(i as u8, 0, 0)).collect()
    }

    #[test]
    fn test_rgb_from_name() {
        assert_eq!(Rgb::from_name("black").unwrap(), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::from_name("  Red ").unwrap(), Rgb::new(214, 39, 40));
        assert_eq!(Rgb::from_name("#0a0b0c").unwrap(), Rgb::new(10, 11, 12));
        assert!(Rgb::from_name("chartreuse-ish").is_err());
        assert!(Rgb::from_name("#12345").is_err());
    }

    #[test]
    fn test_rgb_hex_round_trip() {
        let color = Rgb::new(214, 39, 40);
        assert_eq!(Rgb::from_name(&color.to_hex()).unwrap(), color);
    }

    #[test]
    fn test_schedule_length_mismatch() {
        // 7 levels, 8 colors: must fail before any data is touched
        let levels = vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        assert!(ThresholdSchedule::new(levels, colors(8)).is_err());
    }

    #[test]
    fn test_schedule_not_increasing() {
        assert!(ThresholdSchedule::new(vec![0.0, 10.0, 10.0], colors(3)).is_err());
        assert!(ThresholdSchedule::new(vec![0.0, 20.0, 10.0], colors(3)).is_err());
    }

    #[test]
    fn test_schedule_too_short() {
        assert!(ThresholdSchedule::new(vec![0.0], colors(1)).is_err());
    }

    #[test]
    fn test_schedule_valid() {
        let schedule = ThresholdSchedule::new(vec![0.0, 10.0, 20.0], colors(3)).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.levels(), &[0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_from_strings() {
        let schedule = ThresholdSchedule::from_strings("0, 10, 20", "blue,green,red").unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.colors()[2], Rgb::from_name("red").unwrap());

        assert!(ThresholdSchedule::from_strings("0,ten,20", "blue,green,red").is_err());
        assert!(ThresholdSchedule::from_strings("0,10,20", "blue,green").is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{"levels": [0, 10, 20], "colors": ["blue", "green", "#d62728"]}}"##
        )
        .unwrap();

        let schedule = ThresholdSchedule::from_json_file(file.path()).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.colors()[2], Rgb::new(214, 39, 40));
    }

    #[test]
    fn test_from_json_file_rejects_mismatch() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"levels": [0, 10, 20], "colors": ["blue"]}}"#).unwrap();

        assert!(ThresholdSchedule::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_default_schedule_is_valid() {
        let schedule = ThresholdSchedule::default();
        assert_eq!(schedule.levels().len(), schedule.colors().len());
        assert_eq!(schedule.len(), 8);
        // Re-validate through the constructor
        assert!(
            ThresholdSchedule::new(schedule.levels().to_vec(), schedule.colors().to_vec()).is_ok()
        );
    }
}
