use crate::types::city_coordinate::CityCoordinate;
use crate::types::weather_condition::WeatherCondition;
use chrono::NaiveDateTime;

/// One weather entry reported for one hour at one city.
///
/// The API may attach several weather entries to a single hour; each of them
/// becomes its own `HourlyRecord`. The timestamp is timezone-naive UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: NaiveDateTime,
    pub condition: WeatherCondition,
}

impl HourlyRecord {
    pub fn new(
        coordinate: &CityCoordinate,
        timestamp: NaiveDateTime,
        condition: WeatherCondition,
    ) -> Self {
        Self {
            city: coordinate.city.clone(),
            latitude: coordinate.location.latitude(),
            longitude: coordinate.location.longitude(),
            timestamp,
            condition,
        }
    }
}
