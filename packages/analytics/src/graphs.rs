//! Time-distribution chart aggregation.
//!
//! Each series reports an average count per unit rather than a raw total,
//! so spans of data with uneven underlying coverage produce comparable
//! magnitudes: hourly counts divide by the number of distinct calendar
//! dates, daily counts by the number of distinct ISO weeks, monthly
//! counts by the number of distinct years.

use std::collections::BTreeSet;

use chrono::Datelike as _;
use sf_crime_analytics_models::{GraphData, GraphSeries};
use sf_crime_dataset_models::{DayOfWeek, NormalizedDataset};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Builds one averaged series. A `distinct_units` of zero only occurs for
/// an empty dataset, which yields an all-zero series instead of dividing.
fn average_series(counts: &[u64], distinct_units: usize, labels: Vec<String>) -> GraphSeries {
    #[allow(clippy::cast_precision_loss)]
    let data = if distinct_units == 0 {
        vec![0.0; counts.len()]
    } else {
        counts
            .iter()
            .map(|&count| round1(count as f64 / distinct_units as f64))
            .collect()
    };
    GraphSeries { labels, data }
}

/// Computes the hourly, daily, and monthly average series.
///
/// An empty dataset returns all-zero series of the full expected lengths
/// (24, 7, and 12 points) rather than failing.
#[must_use]
pub fn generate_graph_data(dataset: &NormalizedDataset) -> GraphData {
    let mut hourly_counts = [0u64; 24];
    let mut daily_counts = [0u64; 7];
    let mut monthly_counts = [0u64; 12];

    let mut dates = BTreeSet::new();
    let mut weeks = BTreeSet::new();
    let mut years = BTreeSet::new();

    for record in dataset.records() {
        hourly_counts[usize::from(record.hour)] += 1;
        daily_counts[record.day_of_week.index()] += 1;
        monthly_counts[usize::from(record.month - 1)] += 1;

        dates.insert(record.datetime.date());
        weeks.insert(record.datetime.iso_week().week());
        years.insert(record.datetime.year());
    }

    GraphData {
        hourly: average_series(
            &hourly_counts,
            dates.len(),
            (0..24).map(|h| format!("{h}:00")).collect(),
        ),
        daily: average_series(
            &daily_counts,
            weeks.len(),
            DayOfWeek::all().iter().map(ToString::to_string).collect(),
        ),
        monthly: average_series(
            &monthly_counts,
            years.len(),
            MONTH_LABELS.iter().map(ToString::to_string).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike as _, NaiveDate, NaiveDateTime, Timelike as _};
    use sf_crime_dataset_models::IncidentRecord;

    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn record(datetime: NaiveDateTime) -> IncidentRecord {
        let days = [
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
            DayOfWeek::Saturday,
            DayOfWeek::Sunday,
        ];
        IncidentRecord {
            datetime,
            day_of_week: days[datetime.weekday().num_days_from_monday() as usize],
            hour: datetime.hour() as u8,
            month: datetime.month() as u8,
            category: "Larceny Theft".to_string(),
            district: "Mission".to_string(),
            latitude: 37.76,
            longitude: -122.42,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_dataset_returns_zero_series_of_expected_lengths() {
        let graphs = generate_graph_data(&NormalizedDataset::default());

        assert_eq!(graphs.hourly.labels.len(), 24);
        assert_eq!(graphs.daily.labels.len(), 7);
        assert_eq!(graphs.monthly.labels.len(), 12);
        assert!(graphs.hourly.data.iter().all(|&v| v == 0.0));
        assert!(graphs.daily.data.iter().all(|&v| v == 0.0));
        assert!(graphs.monthly.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_record_produces_unit_hourly_average() {
        let dataset = NormalizedDataset::new(vec![record(at(2024, 3, 15, 14))]);
        let graphs = generate_graph_data(&dataset);

        let idx = graphs
            .hourly
            .labels
            .iter()
            .position(|l| l == "14:00")
            .unwrap();
        assert!((graphs.hourly.data[idx] - 1.0).abs() < f64::EPSILON);
        for (i, &value) in graphs.hourly.data.iter().enumerate() {
            if i != idx {
                assert!(value == 0.0, "hour {i} should be 0.0, got {value}");
            }
        }
    }

    #[test]
    fn hourly_average_divides_by_distinct_dates() {
        // 4 incidents at 08:00 across 2 distinct dates -> 2.0
        let dataset = NormalizedDataset::new(vec![
            record(at(2024, 3, 15, 8)),
            record(at(2024, 3, 15, 8)),
            record(at(2024, 3, 16, 8)),
            record(at(2024, 3, 16, 8)),
        ]);
        let graphs = generate_graph_data(&dataset);

        assert!((graphs.hourly.data[8] - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn daily_average_divides_by_distinct_iso_weeks() {
        // Two Mondays in different ISO weeks -> 1.0 for Monday
        let dataset = NormalizedDataset::new(vec![
            record(at(2024, 3, 11, 10)),
            record(at(2024, 3, 18, 10)),
        ]);
        let graphs = generate_graph_data(&dataset);

        assert_eq!(graphs.daily.labels[0], "Monday");
        assert!((graphs.daily.data[0] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn monthly_average_divides_by_distinct_years() {
        // 3 March incidents across 2 distinct years -> 1.5
        let dataset = NormalizedDataset::new(vec![
            record(at(2023, 3, 15, 10)),
            record(at(2024, 3, 15, 10)),
            record(at(2024, 3, 16, 10)),
        ]);
        let graphs = generate_graph_data(&dataset);

        assert_eq!(graphs.monthly.labels[2], "Mar");
        assert!((graphs.monthly.data[2] - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn averages_are_non_negative_and_one_decimal() {
        let dataset = NormalizedDataset::new(vec![
            record(at(2024, 1, 1, 3)),
            record(at(2024, 1, 2, 3)),
            record(at(2024, 1, 3, 3)),
            record(at(2024, 2, 5, 17)),
            record(at(2024, 2, 6, 17)),
        ]);
        let graphs = generate_graph_data(&dataset);

        for series in [&graphs.hourly, &graphs.daily, &graphs.monthly] {
            assert_eq!(series.labels.len(), series.data.len());
            for &value in &series.data {
                assert!(value >= 0.0);
                let scaled = value * 10.0;
                assert!(
                    (scaled - scaled.round()).abs() < 1e-9,
                    "{value} is not rounded to 1 decimal"
                );
            }
        }
    }
}
