//! Proxy sites and the chronology source seam.

use crate::chronology::KiloyearEnsemble;
use crate::error::ChronError;

/// Geographic position of a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Longitude in degrees east.
    pub lon: f64,
    /// Latitude in degrees north.
    pub lat: f64,
    /// Elevation in metres, if known.
    pub elevation: Option<f64>,
}

impl Coordinates {
    /// Creates coordinates without an elevation.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            elevation: None,
        }
    }

    /// Attaches an elevation.
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }
}

/// Anything that can describe a proxy site and hand out its age model.
///
/// The mapper only needs these three things from an archive, so readers
/// for different archive formats plug in here.
pub trait ChronologySource {
    /// Stable identifier of the site, used in output metadata and logs.
    fn site_name(&self) -> &str;

    /// Position of the site.
    fn coordinates(&self) -> Coordinates;

    /// Loads the chronology ensemble with ages in kiloyears.
    fn load_chron_data(&self) -> Result<KiloyearEnsemble, ChronError>;
}

/// An in-memory site.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    name: String,
    coordinates: Coordinates,
    chronology: KiloyearEnsemble,
}

impl Site {
    /// Creates a site from its name, position and age model.
    pub fn new(
        name: impl Into<String>,
        coordinates: Coordinates,
        chronology: KiloyearEnsemble,
    ) -> Self {
        Self {
            name: name.into(),
            coordinates,
            chronology,
        }
    }
}

impl ChronologySource for Site {
    fn site_name(&self) -> &str {
        &self.name
    }

    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Returns the age model with repeated depth rows dropped.
    fn load_chron_data(&self) -> Result<KiloyearEnsemble, ChronError> {
        Ok(self.chronology.clone().dedup_depths())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::DepthUnit;
    use ndarray::array;

    #[test]
    fn site_exposes_metadata() {
        let chron = KiloyearEnsemble::new(vec![0.5], DepthUnit::Meters, array![[1.0]]).unwrap();
        let site = Site::new(
            "GeoB1023-5",
            Coordinates::new(11.5, -17.2).with_elevation(-1978.0),
            chron,
        );
        assert_eq!(site.site_name(), "GeoB1023-5");
        assert_eq!(site.coordinates().lat, -17.2);
        assert_eq!(site.coordinates().elevation, Some(-1978.0));
    }

    #[test]
    fn loading_drops_duplicate_depths() {
        let chron = KiloyearEnsemble::new(
            vec![0.1, 0.2, 0.2],
            DepthUnit::Meters,
            array![[1.0], [2.0], [3.0]],
        )
        .unwrap();
        assert_eq!(chron.n_depths(), 3);
        let site = Site::new("s", Coordinates::new(0.0, 0.0), chron);
        assert_eq!(site.load_chron_data().unwrap().n_depths(), 2);
    }
}
