//! Geographical coordinates resolved for a configured city.

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use city_weather::LatLon;
///
/// let warsaw = LatLon(52.2319, 21.0067);
/// assert_eq!(warsaw.0, 52.2319); // Latitude
/// assert_eq!(warsaw.1, 21.0067); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

/// A city name together with the coordinates the geocoder resolved it to.
///
/// Created once per run by [`crate::Geocoder::locate_all`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCoordinate {
    /// The city name exactly as configured. Unique within a run.
    pub city: String,
    pub location: LatLon,
}

impl CityCoordinate {
    pub fn new(city: impl Into<String>, location: LatLon) -> Self {
        Self {
            city: city.into(),
            location,
        }
    }
}
