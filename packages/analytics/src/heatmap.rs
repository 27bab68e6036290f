//! Spatial heatmap aggregation.
//!
//! Groups the recent working subset (see [`crate::window`]) into buckets
//! of coordinates rounded to 3 decimal places (~110 m grid) per district
//! and category, then assigns each bucket a color/radius tier from the
//! 70th and 90th percentiles of the bucket counts.

use std::collections::BTreeMap;

use sf_crime_analytics_models::{DensityTier, HeatPoint};
use sf_crime_dataset_models::NormalizedDataset;

use crate::{AggregationError, window};

/// Default maximum number of heatmap buckets returned.
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

/// Percentile thresholds used when no buckets exist at all.
const FALLBACK_P70: f64 = 1.0;
const FALLBACK_P90: f64 = 2.0;

/// Grouping key: coordinates rounded to 3 decimal places (scaled to
/// integers so the key is `Ord`), plus district and category. `BTreeMap`
/// iteration over these keys gives the deterministic sorted bucket order
/// that the output truncation relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct BucketKey {
    lat_grid: i64,
    lng_grid: i64,
    district: String,
    category: String,
}

#[derive(Debug, Default)]
struct BucketAccum {
    lat_sum: f64,
    lng_sum: f64,
    count: u64,
}

#[allow(clippy::cast_possible_truncation)]
fn grid(coord: f64) -> i64 {
    (coord * 1000.0).round() as i64
}

/// Linear-interpolated percentile of an ascending-sorted slice.
///
/// `sorted` must be non-empty and `p` in [0, 100].
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * p / 100.0;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - rank.floor();
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[allow(clippy::cast_precision_loss)]
fn compute(
    dataset: &NormalizedDataset,
    sample_size: usize,
) -> Result<Vec<HeatPoint>, AggregationError> {
    let recent = window::select_recent(dataset);
    if recent.is_empty() {
        log::warn!("Empty dataset received for heatmap");
        return Ok(Vec::new());
    }

    let mut buckets: BTreeMap<BucketKey, BucketAccum> = BTreeMap::new();
    for record in recent {
        let key = BucketKey {
            lat_grid: grid(record.latitude),
            lng_grid: grid(record.longitude),
            district: record.district.clone(),
            category: record.category.clone(),
        };
        let acc = buckets.entry(key).or_default();
        acc.lat_sum += record.latitude;
        acc.lng_sum += record.longitude;
        acc.count += 1;
    }

    let mut counts: Vec<f64> = buckets.values().map(|b| b.count as f64).collect();
    counts.sort_by(f64::total_cmp);
    let (p70, p90) = if counts.is_empty() {
        (FALLBACK_P70, FALLBACK_P90)
    } else {
        (percentile(&counts, 70.0), percentile(&counts, 90.0))
    };

    let mut points = Vec::with_capacity(buckets.len().min(sample_size));
    for (key, acc) in buckets {
        let count = acc.count as f64;
        let lat = acc.lat_sum / count;
        let lng = acc.lng_sum / count;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(AggregationError::NonFinite {
                message: format!(
                    "bucket mean for {}/{} is not finite",
                    key.district, key.category
                ),
            });
        }

        let tier = DensityTier::from_count(count, p70, p90);
        points.push(HeatPoint {
            lat,
            lng,
            color: tier.color().to_string(),
            radius: tier.radius(),
            district: key.district,
            category: key.category,
            count: acc.count,
        });
    }

    points.truncate(sample_size);
    Ok(points)
}

/// Aggregates recent incidents into colored heatmap buckets.
///
/// Feeds a best-effort visualization: any interior failure degrades to an
/// empty list with a logged diagnostic instead of propagating.
#[must_use]
pub fn prepare_heatmap_data(dataset: &NormalizedDataset, sample_size: usize) -> Vec<HeatPoint> {
    match compute(dataset, sample_size) {
        Ok(points) => points,
        Err(e) => {
            log::error!("Heatmap processing error: {e}");
            Vec::new()
        }
    }
}
