//! Drawing unit handling
//!
//! Documents may be drawn in millimetres or metres. Reports always show
//! areas in square metres.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear unit of the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingUnits {
    /// Millimetres
    Millimeters,
    /// Metres
    Meters,
}

impl Default for DrawingUnits {
    fn default() -> Self {
        Self::Millimeters
    }
}

impl DrawingUnits {
    /// Square drawing units per square metre
    pub fn per_square_meter(&self) -> f64 {
        match self {
            Self::Millimeters => 1_000_000.0,
            Self::Meters => 1.0,
        }
    }

    /// Convert an area in square drawing units to square metres
    pub fn area_to_square_meters(&self, area: f64) -> f64 {
        area / self.per_square_meter()
    }
}

impl fmt::Display for DrawingUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "mm"),
            Self::Meters => write!(f, "m"),
        }
    }
}

impl FromStr for DrawingUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "millimeters" | "millimetres" => Ok(Self::Millimeters),
            "m" | "meters" | "metres" => Ok(Self::Meters),
            _ => Err(format!("Unknown drawing units: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_conversion() {
        assert_eq!(DrawingUnits::Millimeters.area_to_square_meters(2_500_000.0), 2.5);
        assert_eq!(DrawingUnits::Meters.area_to_square_meters(2.5), 2.5);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("MM".parse::<DrawingUnits>(), Ok(DrawingUnits::Millimeters));
        assert_eq!("metres".parse::<DrawingUnits>(), Ok(DrawingUnits::Meters));
        assert!("furlong".parse::<DrawingUnits>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&DrawingUnits::Millimeters).unwrap(),
            "\"millimeters\""
        );
        let units: DrawingUnits = serde_json::from_str("\"meters\"").unwrap();
        assert_eq!(units, DrawingUnits::Meters);
    }
}
