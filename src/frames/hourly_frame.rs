// hourly_frame.rs

//! Contains the `HourlyLazyFrame` structure, the working table of hourly weather rows
//! accumulated over a run, and the daily sun/rain aggregation built on top of it.

use crate::frames::daily_frame::DailyLazyFrame;
use crate::frames::error::FrameError;
use crate::types::hourly_record::HourlyRecord;
use crate::types::weather_condition::WeatherCondition;
use chrono::NaiveDateTime;
use polars::prelude::*;

/// Minimum number of qualifying hours for a day to be flagged sunny or rainy.
pub const DAILY_THRESHOLD: u32 = 2;

/// A wrapper around a Polars `LazyFrame` holding hourly weather rows.
///
/// Columns: `city` (str), `latitude` (f64), `longitude` (f64),
/// `timestamp` (naive UTC datetime) and `condition` (str).
#[derive(Clone)]
pub struct HourlyLazyFrame {
    /// The underlying Polars LazyFrame containing the hourly rows.
    pub frame: LazyFrame,
}

impl HourlyLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Materialises the accumulated records into a single frame in one go.
    pub fn from_records(records: &[HourlyRecord]) -> Result<Self, FrameError> {
        let cities: Vec<&str> = records.iter().map(|r| r.city.as_str()).collect();
        let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
        let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
        let timestamps: Vec<NaiveDateTime> = records.iter().map(|r| r.timestamp).collect();
        let conditions: Vec<&str> = records.iter().map(|r| r.condition.as_str()).collect();

        let df = DataFrame::new(vec![
            Column::new("city".into(), cities),
            Column::new("latitude".into(), latitudes),
            Column::new("longitude".into(), longitudes),
            Column::new("timestamp".into(), timestamps),
            Column::new("condition".into(), conditions),
        ])?;
        Ok(Self::new(df.lazy()))
    }

    /// Drops rows that are identical in every column, keeping the first occurrence.
    ///
    /// Forecast responses for consecutive days overlap, so the same hour can be
    /// fetched several times in one run.
    pub fn deduplicate(&self) -> HourlyLazyFrame {
        HourlyLazyFrame::new(
            self.frame
                .clone()
                .unique_stable(None, UniqueKeepStrategy::First),
        )
    }

    /// Groups rows by city, coordinates and calendar date and classifies each day.
    ///
    /// An hour counts towards `sun` when its condition is `Clear` or `Clouds`, and
    /// towards `rain` when it is `Rain`. A flag is set when its tally reaches
    /// [`DAILY_THRESHOLD`]. Days with no qualifying hours get a tally of zero, never null.
    ///
    /// The result has the columns `city`, `latitude`, `longitude`, `date`, `sun`, `rain`
    /// and one row per (city, latitude, longitude, date).
    pub fn aggregate_daily(&self) -> DailyLazyFrame {
        let frame = self
            .frame
            .clone()
            .with_columns([
                col("timestamp").dt().date().alias("date"),
                condition_hours(&WeatherCondition::SUN_CONDITIONS, "sun_hours"),
                condition_hours(&WeatherCondition::RAIN_CONDITIONS, "rain_hours"),
            ])
            .group_by_stable([col("city"), col("latitude"), col("longitude"), col("date")])
            .agg([col("sun_hours").sum(), col("rain_hours").sum()])
            .with_columns([
                col("sun_hours")
                    .fill_null(lit(0u32))
                    .gt_eq(lit(DAILY_THRESHOLD))
                    .alias("sun"),
                col("rain_hours")
                    .fill_null(lit(0u32))
                    .gt_eq(lit(DAILY_THRESHOLD))
                    .alias("rain"),
            ])
            .select([
                col("city"),
                col("latitude"),
                col("longitude"),
                col("date"),
                col("sun"),
                col("rain"),
            ]);
        DailyLazyFrame::new(frame)
    }
}

/// 1 for rows whose condition is one of `conditions`, else 0.
fn condition_hours(conditions: &[&str], name: &str) -> Expr {
    let matches = conditions
        .iter()
        .map(|c| col("condition").eq(lit(*c)))
        .reduce(|a, b| a.or(b))
        .unwrap_or_else(|| lit(false));
    when(matches)
        .then(lit(1u32))
        .otherwise(lit(0u32))
        .alias(name)
}
