//! Run configuration: API credential, city list, date window and service endpoints.
//!
//! A [`Config`] is built once and passed into [`crate::CityWeather`]. It can be
//! assembled in code with [`Config::builder`] or loaded from a TOML file and
//! environment variables with [`Config::load`].

use bon::Builder;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CITIES: [&str; 10] = [
    "Warsaw", "London", "Berlin", "Paris", "Rome", "Athens", "Dublin", "Lisbon", "Moscow",
    "Madrid",
];
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/search";

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const CITIES_VAR: &str = "CITY_WEATHER_CITIES";
pub const DAYS_BEFORE_VAR: &str = "CITY_WEATHER_DAYS_BEFORE";
pub const DAYS_AFTER_VAR: &str = "CITY_WEATHER_DAYS_AFTER";
pub const CONFIG_PATH_VAR: &str = "CITY_WEATHER_CONFIG";

const CONFIG_DIR_NAME: &str = "city_weather";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key configured (set OPENWEATHER_API_KEY or `api_key` in the config file)")]
    MissingApiKey,

    #[error("The city list is empty")]
    NoCities,

    #[error("The city list contains a blank name")]
    BlankCityName,

    #[error("City '{0}' is listed more than once")]
    DuplicateCity(String),

    #[error("Failed to read config file '{0}'")]
    ReadFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    ParseFile(PathBuf, #[source] toml::de::Error),

    #[error("Invalid value '{value}' for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// The rolling window of days to fetch, relative to today.
///
/// The window covers `days_before` days in the past, today, and `days_after`
/// days in the future, all inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateWindow {
    pub days_before: u32,
    pub days_after: u32,
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            days_before: 5,
            days_after: 2,
        }
    }
}

impl DateWindow {
    pub fn new(days_before: u32, days_after: u32) -> Self {
        Self {
            days_before,
            days_after,
        }
    }

    /// Day offsets from today, oldest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use city_weather::DateWindow;
    ///
    /// let offsets: Vec<i64> = DateWindow::default().offsets().collect();
    /// assert_eq!(offsets, vec![-5, -4, -3, -2, -1, 0, 1, 2]);
    /// ```
    pub fn offsets(&self) -> impl Iterator<Item = i64> {
        -i64::from(self.days_before)..=i64::from(self.days_after)
    }

    pub fn day_count(&self) -> usize {
        self.days_before as usize + self.days_after as usize + 1
    }
}

/// Everything a run needs to know that isn't hardcoded.
///
/// # Examples
///
/// ```
/// use city_weather::{Config, DateWindow};
///
/// let config = Config::builder()
///     .api_key("secret")
///     .cities(vec!["Warsaw".to_string(), "Lisbon".to_string()])
///     .window(DateWindow::new(1, 1))
///     .build();
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.window.day_count(), 3);
/// assert!(!format!("{config:?}").contains("secret"));
/// ```
#[derive(Clone, Builder)]
pub struct Config {
    /// OpenWeatherMap API key, sent as the `appid` query parameter.
    #[builder(into)]
    pub api_key: String,
    #[builder(default = default_cities())]
    pub cities: Vec<String>,
    #[builder(default)]
    pub window: DateWindow,
    #[builder(default = DEFAULT_WEATHER_BASE_URL.to_string())]
    pub weather_base_url: String,
    #[builder(default = DEFAULT_GEOCODING_URL.to_string())]
    pub geocoding_url: String,
    #[builder(default = default_user_agent())]
    pub user_agent: String,
    /// Skip a city/day whose weather fetch fails instead of aborting the run.
    #[builder(default)]
    pub continue_on_error: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("cities", &self.cities)
            .field("window", &self.window)
            .field("weather_base_url", &self.weather_base_url)
            .field("geocoding_url", &self.geocoding_url)
            .field("user_agent", &self.user_agent)
            .field("continue_on_error", &self.continue_on_error)
            .finish()
    }
}

/// On-disk representation; every field is optional so a file may override only part of the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_key: Option<String>,
    cities: Option<Vec<String>>,
    window: Option<DateWindow>,
    weather_base_url: Option<String>,
    geocoding_url: Option<String>,
    user_agent: Option<String>,
    continue_on_error: Option<bool>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseFile(path.to_path_buf(), e))
    }
}

impl Config {
    /// Loads the configuration from the process environment and an optional TOML file.
    ///
    /// The file is taken from `path` if given, otherwise from `$CITY_WEATHER_CONFIG`,
    /// otherwise from `<config dir>/city_weather/config.toml` when that file exists.
    /// Environment variables override values from the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let path = config_file_path(path, env, default_config_path());
        Self::from_sources(path.as_deref(), env)
    }

    /// Builds a configuration from an optional TOML file and an environment lookup function.
    pub fn from_sources(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                log::debug!("Reading config file {}", path.display());
                ConfigFile::read(path)?
            }
            None => ConfigFile::default(),
        };

        let api_key = env(API_KEY_VAR)
            .or(file.api_key)
            .ok_or(ConfigError::MissingApiKey)?;
        let cities = env(CITIES_VAR)
            .map(|value| parse_city_list(&value))
            .or(file.cities)
            .unwrap_or_else(default_cities);

        let mut window = file.window.unwrap_or_default();
        if let Some(value) = env(DAYS_BEFORE_VAR) {
            window.days_before = parse_days(DAYS_BEFORE_VAR, value)?;
        }
        if let Some(value) = env(DAYS_AFTER_VAR) {
            window.days_after = parse_days(DAYS_AFTER_VAR, value)?;
        }

        let config = Config {
            api_key,
            cities,
            window,
            weather_base_url: file
                .weather_base_url
                .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string()),
            geocoding_url: file
                .geocoding_url
                .unwrap_or_else(|| DEFAULT_GEOCODING_URL.to_string()),
            user_agent: file.user_agent.unwrap_or_else(default_user_agent),
            continue_on_error: file.continue_on_error.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the pipeline relies on: a non-empty key and a
    /// non-empty list of unique, non-blank city names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.cities.is_empty() {
            return Err(ConfigError::NoCities);
        }
        let mut seen = HashSet::new();
        for city in &self.cities {
            if city.trim().is_empty() {
                return Err(ConfigError::BlankCityName);
            }
            if !seen.insert(city.as_str()) {
                return Err(ConfigError::DuplicateCity(city.clone()));
            }
        }
        Ok(())
    }
}

pub fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Picks the config file: `explicit`, then `$CITY_WEATHER_CONFIG`, then `default` if it exists.
fn config_file_path(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    default: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_PATH_VAR).map(PathBuf::from))
        .or_else(|| default.filter(|p| p.is_file()))
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

pub(crate) fn parse_city_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

fn parse_days(var: &'static str, value: String) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults_from_env_only() {
        let config = Config::from_sources(None, env_from(&[(API_KEY_VAR, "abc")])).unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.cities, default_cities());
        assert_eq!(config.cities.len(), 10);
        assert_eq!(config.window, DateWindow::new(5, 2));
        assert_eq!(config.window.day_count(), 8);
        assert_eq!(config.weather_base_url, DEFAULT_WEATHER_BASE_URL);
        assert!(!config.continue_on_error);
    }

    #[test]
    fn test_config_file_path_precedence() {
        let default_file = write_config("api_key = \"k\"\n");
        let default = Some(default_file.path().to_path_buf());
        let from_env = env_from(&[(CONFIG_PATH_VAR, "/etc/city_weather.toml")]);

        assert_eq!(
            config_file_path(Some(Path::new("cli.toml")), &from_env, default.clone()),
            Some(PathBuf::from("cli.toml"))
        );
        assert_eq!(
            config_file_path(None, &from_env, default.clone()),
            Some(PathBuf::from("/etc/city_weather.toml"))
        );
        assert_eq!(config_file_path(None, env_from(&[]), default.clone()), default);

        let missing = default_file.path().with_extension("missing");
        assert_eq!(config_file_path(None, env_from(&[]), Some(missing)), None);
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let file = write_config(
            r#"
api_key = "from-file"
cities = ["Valletta", "Reykjavik"]
"#,
        );

        let config = Config::load(Some(file.path())).unwrap();

        assert!(!config.api_key.is_empty());
        if std::env::var_os(CITIES_VAR).is_none() {
            assert_eq!(config.cities, vec!["Valletta", "Reykjavik"]);
        }
    }

    #[test]
    fn test_load_reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::ReadFile(ref p, _) if *p == path));
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_sources(None, env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_file_values_and_env_overrides() {
        let file = write_config(
            r#"
api_key = "from-file"
cities = ["Oslo", "Bergen"]
continue_on_error = true

[window]
days_before = 1
"#,
        );

        let config = Config::from_sources(
            Some(file.path()),
            env_from(&[(API_KEY_VAR, "from-env"), (DAYS_AFTER_VAR, "4")]),
        )
        .unwrap();

        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.cities, vec!["Oslo", "Bergen"]);
        assert_eq!(config.window, DateWindow::new(1, 4));
        assert!(config.continue_on_error);
    }

    #[test]
    fn test_cities_from_env() {
        let config = Config::from_sources(
            None,
            env_from(&[(API_KEY_VAR, "k"), (CITIES_VAR, " Rome , Madrid,")]),
        )
        .unwrap();
        assert_eq!(config.cities, vec!["Rome", "Madrid"]);
    }

    #[test]
    fn test_invalid_days_env() {
        let err = Config::from_sources(
            None,
            env_from(&[(API_KEY_VAR, "k"), (DAYS_BEFORE_VAR, "-3")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: DAYS_BEFORE_VAR, .. }));
    }

    #[test]
    fn test_unknown_file_key_is_rejected() {
        let file = write_config("api_key = \"k\"\ncity_list = [\"Rome\"]\n");
        let err = Config::from_sources(Some(file.path()), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFile(..)));
    }

    #[test]
    fn test_validate_rejects_bad_city_lists() {
        let empty = Config::builder().api_key("k").cities(vec![]).build();
        assert!(matches!(empty.validate(), Err(ConfigError::NoCities)));

        let blank = Config::builder()
            .api_key("k")
            .cities(vec!["Rome".to_string(), "  ".to_string()])
            .build();
        assert!(matches!(blank.validate(), Err(ConfigError::BlankCityName)));

        let duplicate = Config::builder()
            .api_key("k")
            .cities(vec!["Rome".to_string(), "Rome".to_string()])
            .build();
        assert!(matches!(
            duplicate.validate(),
            Err(ConfigError::DuplicateCity(city)) if city == "Rome"
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::builder().api_key("super-secret").build();
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
