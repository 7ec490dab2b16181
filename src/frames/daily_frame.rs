// daily_frame.rs

//! Contains the `DailyLazyFrame` structure holding per-city, per-day sun/rain flags.

use crate::frames::error::FrameError;
use crate::types::daily_record::DailyRecord;
use chrono::NaiveDate;
use polars::prelude::*;

/// A wrapper around a Polars `LazyFrame` with one row per city and calendar day.
///
/// Columns: `city` (str), `latitude` (f64), `longitude` (f64), `date` (date),
/// `sun` (bool) and `rain` (bool).
///
/// Instances are normally produced by [`crate::HourlyLazyFrame::aggregate_daily`].
#[derive(Clone)]
pub struct DailyLazyFrame {
    /// The underlying Polars LazyFrame containing the daily rows.
    pub frame: LazyFrame,
}

impl DailyLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    pub fn from_records(records: &[DailyRecord]) -> Result<Self, FrameError> {
        let cities: Vec<&str> = records.iter().map(|r| r.city.as_str()).collect();
        let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
        let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        let sun: Vec<bool> = records.iter().map(|r| r.sun).collect();
        let rain: Vec<bool> = records.iter().map(|r| r.rain).collect();

        let df = DataFrame::new(vec![
            Column::new("city".into(), cities),
            Column::new("latitude".into(), latitudes),
            Column::new("longitude".into(), longitudes),
            Column::new("date".into(), dates),
            Column::new("sun".into(), sun),
            Column::new("rain".into(), rain),
        ])?;
        Ok(Self::new(df.lazy()))
    }

    /// Sorts ascending by date. Rows sharing a date are ordered by city name.
    pub fn sort_by_date(&self) -> DailyLazyFrame {
        DailyLazyFrame::new(self.frame.clone().sort(
            ["date", "city"],
            SortMultipleOptions::default().with_maintain_order(true),
        ))
    }

    /// Executes the query and returns the rows as [`DailyRecord`]s, in frame order.
    pub fn collect_records(&self) -> Result<Vec<DailyRecord>, FrameError> {
        let df = self.frame.clone().collect()?;

        let city = df.column("city")?.str()?;
        let latitude = df.column("latitude")?.f64()?;
        let longitude = df.column("longitude")?.f64()?;
        let dates: Vec<Option<NaiveDate>> = df
            .column("date")?
            .as_materialized_series()
            .date()?
            .as_date_iter()
            .collect();
        let sun = df.column("sun")?.bool()?;
        let rain = df.column("rain")?.bool()?;

        (0..df.height())
            .map(|row| {
                Ok(DailyRecord {
                    city: required(city.get(row), "city", row)?.to_string(),
                    latitude: required(latitude.get(row), "latitude", row)?,
                    longitude: required(longitude.get(row), "longitude", row)?,
                    date: required(dates[row], "date", row)?,
                    sun: required(sun.get(row), "sun", row)?,
                    rain: required(rain.get(row), "rain", row)?,
                })
            })
            .collect()
    }
}

fn required<T>(value: Option<T>, column: &'static str, row: usize) -> Result<T, FrameError> {
    value.ok_or(FrameError::UnexpectedNull { column, row })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, day: u32, sun: bool, rain: bool) -> DailyRecord {
        DailyRecord {
            city: city.to_string(),
            latitude: 10.0,
            longitude: 20.0,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            sun,
            rain,
        }
    }

    #[test]
    fn test_sort_by_date_ascending() -> Result<(), Box<dyn std::error::Error>> {
        let unsorted = vec![
            record("Testville", 3, true, false),
            record("Testville", 1, false, true),
            record("Testville", 2, true, true),
        ];

        let sorted = DailyLazyFrame::from_records(&unsorted)?
            .sort_by_date()
            .collect_records()?;

        let dates: Vec<NaiveDate> = sorted.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![unsorted[1].date, unsorted[2].date, unsorted[0].date]
        );
        assert_eq!(sorted[0], unsorted[1]);
        Ok(())
    }

    #[test]
    fn test_same_date_sorted_by_city() -> Result<(), Box<dyn std::error::Error>> {
        let records = vec![
            record("Warsaw", 2, false, false),
            record("Athens", 2, true, false),
            record("Madrid", 1, true, false),
        ];

        let sorted = DailyLazyFrame::from_records(&records)?
            .sort_by_date()
            .collect_records()?;

        let cities: Vec<&str> = sorted.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Madrid", "Athens", "Warsaw"]);
        Ok(())
    }

    #[test]
    fn test_schema() -> Result<(), Box<dyn std::error::Error>> {
        let df = DailyLazyFrame::from_records(&[record("Testville", 1, true, false)])?
            .frame
            .collect()?;

        let columns: Vec<&str> = df.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(
            columns,
            ["city", "latitude", "longitude", "date", "sun", "rain"]
        );
        assert_eq!(df.column("date")?.dtype(), &DataType::Date);
        assert_eq!(df.column("sun")?.dtype(), &DataType::Boolean);
        Ok(())
    }
}
