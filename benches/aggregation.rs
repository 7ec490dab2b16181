use chrono::{NaiveDate, TimeDelta};
use city_weather::{
    default_cities, CityCoordinate, HourlyLazyFrame, HourlyRecord, LatLon, WeatherCondition,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const CONDITIONS: [&str; 4] = ["Clear", "Clouds", "Rain", "Snow"];

/// 10 cities x 8 days x 48 forecast hours, so roughly half the rows are overlap duplicates.
fn synthetic_records() -> Vec<HourlyRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    let mut records = Vec::new();
    for (i, name) in default_cities().iter().enumerate() {
        let city = CityCoordinate::new(name.as_str(), LatLon(i as f64, -(i as f64)));
        for day in 0..8 {
            for hour in 0..48 {
                let timestamp = start + TimeDelta::days(day) + TimeDelta::hours(hour);
                let condition =
                    WeatherCondition::from_main(CONDITIONS[(i + hour as usize) % CONDITIONS.len()]);
                records.push(HourlyRecord::new(&city, timestamp, condition));
            }
        }
    }
    records
}

fn bench_aggregation(c: &mut Criterion) {
    let records = synthetic_records();
    c.bench_function("aggregate_daily", |b| {
        b.iter(|| {
            HourlyLazyFrame::from_records(black_box(&records))
                .unwrap()
                .deduplicate()
                .aggregate_daily()
                .sort_by_date()
                .collect_records()
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
