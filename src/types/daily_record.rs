use chrono::NaiveDate;
use serde::Serialize;

/// The sun/rain classification of one city on one calendar day.
///
/// `sun` and `rain` are independent: a day can be both, either or neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    /// At least two hours reported `Clear` or `Clouds`.
    pub sun: bool,
    /// At least two hours reported `Rain`.
    pub rain: bool,
}
