//! Named habitat seasons and their hemisphere-dependent months.

/// A named local season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// Local summer.
    Summer,
    /// Local winter.
    Winter,
}

/// Hemisphere of a site, derived from the sign of its latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    /// Latitude >= 0 (the equator counts as northern).
    Northern,
    /// Latitude < 0.
    Southern,
}

impl Hemisphere {
    /// Classifies a latitude in degrees north.
    pub fn from_latitude(lat: f64) -> Self {
        if lat < 0.0 {
            Self::Southern
        } else {
            Self::Northern
        }
    }
}

const JJA: [u8; 3] = [6, 7, 8];
const DJF: [u8; 3] = [12, 1, 2];

/// Returns the calendar months of a local season at the given latitude.
///
/// Northern summer and southern winter are June-August; northern winter and
/// southern summer are December-February.
pub fn season_months(season: Season, lat: f64) -> [u8; 3] {
    match (season, Hemisphere::from_latitude(lat)) {
        (Season::Summer, Hemisphere::Northern) | (Season::Winter, Hemisphere::Southern) => JJA,
        (Season::Winter, Hemisphere::Northern) | (Season::Summer, Hemisphere::Southern) => DJF,
    }
}
