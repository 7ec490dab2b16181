//! Defines the `WeatherCondition` enum, mapping the `main` field of OpenWeatherMap
//! weather entries to descriptive variants.

use std::fmt;

/// Represents the weather condition group reported by OpenWeatherMap.
///
/// Only the groups that take part in the sun/rain classification get their own
/// variant. Every other group (`"Snow"`, `"Mist"`, `"Thunderstorm"`, ...) is kept
/// verbatim in [`WeatherCondition::Other`], so nothing reported by the API is lost.
///
/// See the [OpenWeatherMap documentation](https://openweathermap.org/weather-conditions)
/// for the list of condition groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    /// `"Clear"`: clear sky. Counts as a sun-hour.
    Clear,
    /// `"Clouds"`: any amount of cloud cover. Counts as a sun-hour.
    Clouds,
    /// `"Rain"`: rain of any intensity. Counts as a rain-hour.
    Rain,
    /// Any other condition group, passed through unchanged.
    Other(String),
}

impl WeatherCondition {
    /// Condition groups counted as sun-hours by [`crate::HourlyLazyFrame::aggregate_daily`].
    pub const SUN_CONDITIONS: [&'static str; 2] = ["Clear", "Clouds"];
    /// Condition groups counted as rain-hours by [`crate::HourlyLazyFrame::aggregate_daily`].
    pub const RAIN_CONDITIONS: [&'static str; 1] = ["Rain"];

    /// Converts the `main` field of a weather entry into a `WeatherCondition`.
    ///
    /// Matching is exact (case-sensitive), as the API always reports the
    /// capitalised group name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use city_weather::WeatherCondition;
    ///
    /// assert_eq!(WeatherCondition::from_main("Rain"), WeatherCondition::Rain);
    /// assert_eq!(
    ///     WeatherCondition::from_main("Drizzle"),
    ///     WeatherCondition::Other("Drizzle".to_string())
    /// );
    /// ```
    pub fn from_main(value: &str) -> Self {
        match value {
            "Clear" => WeatherCondition::Clear,
            "Clouds" => WeatherCondition::Clouds,
            "Rain" => WeatherCondition::Rain,
            other => WeatherCondition::Other(other.to_string()),
        }
    }

    /// The condition group name as reported by the API.
    pub fn as_str(&self) -> &str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Other(name) => name,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
