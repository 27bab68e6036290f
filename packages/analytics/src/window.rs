//! Time-window selection for the spatial heatmap.
//!
//! Picks a window that is recent enough to be relevant but large enough
//! to be statistically meaningful: the last 3 months of data, widened to
//! 6 and then 12 months when too sparse, and capped at 50 000 records by
//! seeded uniform sampling.

use chrono::{Months, NaiveDateTime};
use rand::prelude::*;
use sf_crime_dataset_models::{IncidentRecord, NormalizedDataset};

/// Minimum record count for the 3-month window before widening to 6 months.
pub const PRIMARY_WINDOW_MIN: usize = 1000;

/// Minimum record count for the 6-month window before widening to 12 months.
pub const FALLBACK_WINDOW_MIN: usize = 500;

/// Maximum number of records passed on to the heatmap aggregation.
pub const MAX_WINDOW_RECORDS: usize = 50_000;

/// Seed for the size-cap sampler. Fixed so that repeated requests and
/// test runs select the same subset.
pub const SAMPLE_SEED: u64 = 42;

fn records_since(
    dataset: &NormalizedDataset,
    anchor: NaiveDateTime,
    months: u32,
) -> Vec<&IncidentRecord> {
    let threshold = anchor
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDateTime::MIN);
    dataset
        .records()
        .iter()
        .filter(|r| r.datetime >= threshold)
        .collect()
}

/// Selects the recent working subset of the dataset.
///
/// The window anchors to the dataset's maximum timestamp rather than
/// wall-clock time, so a stale dataset still produces a populated window.
/// An empty dataset has no anchor and yields an empty subset.
#[must_use]
pub fn select_recent(dataset: &NormalizedDataset) -> Vec<&IncidentRecord> {
    let Some(anchor) = dataset.max_datetime() else {
        return Vec::new();
    };

    let mut subset = records_since(dataset, anchor, 3);

    if subset.len() < PRIMARY_WINDOW_MIN {
        subset = records_since(dataset, anchor, 6);
        log::info!("Using 6 months of data (count: {})", subset.len());
    }

    if subset.len() < FALLBACK_WINDOW_MIN {
        subset = records_since(dataset, anchor, 12);
        log::info!("Using 12 months of data (count: {})", subset.len());
    }

    if subset.len() > MAX_WINDOW_RECORDS {
        let total = subset.len();
        let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
        let (sampled, _) = subset.partial_shuffle(&mut rng, MAX_WINDOW_RECORDS);
        let sampled = sampled.to_vec();
        log::info!("Sampled {} records from {total} in window", sampled.len());
        return sampled;
    }

    subset
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike as _, NaiveDate};
    use sf_crime_dataset_models::DayOfWeek;

    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn record(datetime: NaiveDateTime, district: &str) -> IncidentRecord {
        IncidentRecord {
            datetime,
            day_of_week: DayOfWeek::Friday,
            hour: 12,
            month: datetime.month() as u8,
            category: "Larceny Theft".to_string(),
            district: district.to_string(),
            latitude: 37.76,
            longitude: -122.42,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn many(datetime: NaiveDateTime, n: usize) -> Vec<IncidentRecord> {
        (0..n).map(|_| record(datetime, "Mission")).collect()
    }

    #[test]
    fn dense_recent_data_stays_in_three_month_window() {
        let mut records = many(at(2024, 5, 15), 1500);
        // Older records that must be excluded
        records.extend(many(at(2023, 9, 1), 300));
        let dataset = NormalizedDataset::new(records);

        let subset = select_recent(&dataset);
        assert_eq!(subset.len(), 1500);
        assert!(subset.iter().all(|r| r.datetime >= at(2024, 2, 15)));
    }

    #[test]
    fn sparse_data_widens_to_twelve_months() {
        // 100 records in the last 3 months, 400 more only reachable at
        // 12 months: the 3- and 6-month windows are both too sparse.
        let mut records = many(at(2024, 5, 15), 100);
        records.extend(many(at(2023, 9, 1), 400));
        let dataset = NormalizedDataset::new(records);

        let subset = select_recent(&dataset);
        assert_eq!(subset.len(), 500);
    }

    #[test]
    fn six_month_window_used_when_it_is_large_enough() {
        let mut records = many(at(2024, 5, 15), 100);
        records.extend(many(at(2024, 1, 10), 700));
        let dataset = NormalizedDataset::new(records);

        let subset = select_recent(&dataset);
        assert_eq!(subset.len(), 800);
    }

    #[test]
    fn oversized_window_is_sampled_to_cap_deterministically() {
        let records = many(at(2024, 5, 15), MAX_WINDOW_RECORDS + 5000);
        let dataset = NormalizedDataset::new(records);

        let first = select_recent(&dataset);
        assert_eq!(first.len(), MAX_WINDOW_RECORDS);

        let second = select_recent(&dataset);
        let first_ptrs: Vec<*const IncidentRecord> =
            first.iter().map(|r| std::ptr::from_ref(*r)).collect();
        let second_ptrs: Vec<*const IncidentRecord> =
            second.iter().map(|r| std::ptr::from_ref(*r)).collect();
        assert_eq!(first_ptrs, second_ptrs);
    }

    #[test]
    fn empty_dataset_yields_empty_subset() {
        assert!(select_recent(&NormalizedDataset::default()).is_empty());
    }
}
