//! District ranking aggregation.

use std::collections::HashMap;

use sf_crime_analytics_models::{DistrictCount, TopDistricts};
use sf_crime_dataset_models::NormalizedDataset;

/// Default number of districts returned by [`get_top_districts`].
pub const DEFAULT_TOP_N: usize = 5;

/// Counts incidents per district and returns the `top_n` districts by
/// descending count. Ties keep the order the tied districts were first
/// encountered in the dataset, so repeated calls over the same dataset
/// rank identically.
#[must_use]
pub fn get_top_districts(dataset: &NormalizedDataset, top_n: usize) -> TopDistricts {
    // (count, index of first occurrence) per district
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();

    for (idx, record) in dataset.records().iter().enumerate() {
        let entry = counts.entry(record.district.as_str()).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(district, (count, first_seen))| (district, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(top_n);

    TopDistricts::new(
        ranked
            .into_iter()
            .map(|(district, count, _)| DistrictCount {
                district: district.to_owned(),
                count,
            })
            .collect(),
    )
}
