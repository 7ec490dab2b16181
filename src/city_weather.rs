//! This module provides the main entry point: the [`CityWeather`] client that
//! geocodes the configured cities, fetches their hourly weather over the date
//! window and classifies every city/day as sunny and/or rainy.

use crate::config::Config;
use crate::error::CityWeatherError;
use crate::frames::daily_frame::DailyLazyFrame;
use crate::frames::hourly_frame::HourlyLazyFrame;
use crate::geocoding::geocoder::Geocoder;
use crate::types::city_coordinate::CityCoordinate;
use crate::types::daily_record::DailyRecord;
use crate::weather_data::fetcher::HourlyFetcher;
use crate::weather_data::request_url::RequestUrlBuilder;
use bon::bon;
use chrono::{DateTime, TimeDelta, Utc};
use log::info;
use reqwest::Client;

/// The main client.
///
/// Every call to [`CityWeather::daily_summary`] is one independent run: cities are
/// geocoded, then each day of the window is fetched city by city, and the
/// accumulated hourly rows are deduplicated and aggregated once at the end.
/// All requests are issued one after another.
///
/// # Examples
///
/// ```no_run
/// # use city_weather::{CityWeather, CityWeatherError, Config};
/// # #[tokio::main]
/// # async fn main() -> Result<(), CityWeatherError> {
/// let config = Config::load(None)?;
/// let client = CityWeather::new(config)?;
///
/// let daily = client.daily_summary().call().await?;
/// println!("{}", daily.frame.collect().map_err(city_weather::FrameError::from)?);
/// # Ok(())
/// # }
/// ```
pub struct CityWeather {
    config: Config,
    geocoder: Geocoder,
    fetcher: HourlyFetcher,
}

#[bon]
impl CityWeather {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CityWeatherError::Config`] if the configuration is invalid and
    /// [`CityWeatherError::HttpClient`] if the HTTP client can't be built.
    pub fn new(config: Config) -> Result<Self, CityWeatherError> {
        config.validate()?;
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CityWeatherError::HttpClient)?;

        Ok(Self {
            geocoder: Geocoder::new(client.clone(), config.geocoding_url.as_str()),
            fetcher: HourlyFetcher::new(
                client,
                RequestUrlBuilder::new(config.weather_base_url.as_str(), config.api_key.as_str()),
                config.continue_on_error,
            ),
            config,
        })
    }

    /// Resolves every configured city to coordinates, in configuration order.
    pub async fn locate_cities(&self) -> Result<Vec<CityCoordinate>, CityWeatherError> {
        Ok(self.geocoder.locate_all(&self.config.cities).await?)
    }

    /// Runs the whole pipeline and returns the daily sun/rain table, sorted by date.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.now(DateTime<Utc>)`: Optional. The moment the window is anchored on.
    ///   Defaults to the current time. Target dates are `now` shifted by each day
    ///   offset of the window; dates before `now`'s calendar date are fetched from
    ///   the historical endpoint, the rest from the forecast endpoint.
    ///
    /// # Errors
    ///
    /// * [`CityWeatherError::Geocoding`] if any city can't be resolved.
    /// * [`CityWeatherError::WeatherFetch`] on the first failed city/day, unless
    ///   `continue_on_error` is set.
    /// * [`CityWeatherError::Frame`] if building the table fails.
    #[builder]
    pub async fn daily_summary(
        &self,
        now: Option<DateTime<Utc>>,
    ) -> Result<DailyLazyFrame, CityWeatherError> {
        let now = now.unwrap_or_else(Utc::now);
        let today = now.date_naive();
        info!(
            "Classifying {} cities over {} days around {}",
            self.config.cities.len(),
            self.config.window.day_count(),
            today
        );

        let cities = self.locate_cities().await?;

        let mut records = Vec::new();
        for offset in self.config.window.offsets() {
            let target = TimeDelta::try_days(offset)
                .and_then(|delta| now.checked_add_signed(delta))
                .ok_or(CityWeatherError::DateOutOfRange(offset))?;
            records.extend(self.fetcher.fetch_day(&cities, target, today).await?);
        }
        info!("Fetched {} hourly rows", records.len());

        Ok(HourlyLazyFrame::from_records(&records)?
            .deduplicate()
            .aggregate_daily()
            .sort_by_date())
    }

    /// Same as [`CityWeather::daily_summary`], collected into [`DailyRecord`]s.
    #[builder]
    pub async fn daily_records(
        &self,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<DailyRecord>, CityWeatherError> {
        let daily = self.daily_summary().maybe_now(now).call().await?;
        Ok(daily.collect_records()?)
    }
}
