//! Builds OpenWeatherMap One Call request URLs.
//!
//! Dates strictly before today go to the `timemachine` (historical) endpoint with
//! the target as a Unix timestamp in `dt`. Today and later dates go to the plain
//! forecast endpoint, which takes no date at all.

use crate::types::city_coordinate::LatLon;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Historical,
    Forecast,
}

impl Endpoint {
    /// Picks the endpoint for `target`. Only calendar dates are compared, so any
    /// time on `today` itself still counts as forecast.
    pub fn for_date(target: NaiveDate, today: NaiveDate) -> Self {
        if target < today {
            Endpoint::Historical
        } else {
            Endpoint::Forecast
        }
    }

    fn path_segment(&self) -> &'static str {
        match self {
            Endpoint::Historical => "onecall/timemachine",
            Endpoint::Forecast => "onecall",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Historical => f.write_str("historical"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

#[derive(Clone)]
pub struct RequestUrlBuilder {
    base_url: String,
    api_key: String,
}

impl RequestUrlBuilder {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds the request URL for `location` on `target`.
    ///
    /// Query parameters are, in order: `lat`, `lon`, `dt` (historical only),
    /// `appid` and `units=metric`.
    pub fn build(
        &self,
        location: LatLon,
        target: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Url, url::ParseError> {
        let endpoint = Endpoint::for_date(target.date_naive(), today);
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path_segment()
        ))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("lat", &location.latitude().to_string());
            query.append_pair("lon", &location.longitude().to_string());
            if endpoint == Endpoint::Historical {
                query.append_pair("dt", &target.timestamp().to_string());
            }
            query.append_pair("appid", &self.api_key);
            query.append_pair("units", "metric");
        }
        Ok(url)
    }
}

/// Renders `url` with the `appid` value masked, for logging.
pub fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "appid" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BASE: &str = "https://api.openweathermap.org/data/2.5";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn query(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_yesterday_routes_to_historical() {
        let builder = RequestUrlBuilder::new(BASE, "key");
        let target = Utc.with_ymd_and_hms(2024, 6, 14, 23, 59, 0).unwrap();

        let url = builder.build(LatLon(52.23, 21.01), target, today()).unwrap();

        assert_eq!(url.path(), "/data/2.5/onecall/timemachine");
        assert_eq!(
            query(&url),
            vec![
                ("lat".to_string(), "52.23".to_string()),
                ("lon".to_string(), "21.01".to_string()),
                ("dt".to_string(), target.timestamp().to_string()),
                ("appid".to_string(), "key".to_string()),
                ("units".to_string(), "metric".to_string()),
            ]
        );
    }

    #[test]
    fn test_today_and_tomorrow_route_to_forecast() {
        let builder = RequestUrlBuilder::new(BASE, "key");
        for target in [
            Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 16, 12, 0, 0).unwrap(),
        ] {
            let url = builder.build(LatLon(1.5, -2.5), target, today()).unwrap();

            assert_eq!(url.path(), "/data/2.5/onecall");
            let params = query(&url);
            assert!(params.iter().all(|(k, _)| k != "dt"));
            assert!(params.contains(&("units".to_string(), "metric".to_string())));
            assert!(params.contains(&("appid".to_string(), "key".to_string())));
        }
    }

    #[test]
    fn test_endpoint_ignores_time_of_day() {
        let day = today();
        assert_eq!(Endpoint::for_date(day.pred_opt().unwrap(), day), Endpoint::Historical);
        assert_eq!(Endpoint::for_date(day, day), Endpoint::Forecast);
        assert_eq!(Endpoint::for_date(day.succ_opt().unwrap(), day), Endpoint::Forecast);
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let builder = RequestUrlBuilder::new(format!("{BASE}/"), "key");
        let target = Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
        let url = builder.build(LatLon(0.0, 0.0), target, today()).unwrap();
        assert_eq!(url.path(), "/data/2.5/onecall");
    }

    #[test]
    fn test_redact_api_key() {
        let builder = RequestUrlBuilder::new(BASE, "very-secret");
        let target = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        let url = builder.build(LatLon(0.0, 0.0), target, today()).unwrap();

        let logged = redact_api_key(&url);

        assert!(!logged.contains("very-secret"));
        assert!(logged.contains("appid=***") || logged.contains("appid=%2A%2A%2A"));
        assert!(logged.contains("units=metric"));
    }
}
