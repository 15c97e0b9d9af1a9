use rand::Rng;
use tracing::debug;

use crate::domain::{PERCENTILE_POINTS, Sample};

/// Points in the global percentile list.
pub const FINAL_RESOLUTION: usize = PERCENTILE_POINTS;
/// Size of the pooled resample before downsampling.
pub const SAMPLE_SIZE: usize = 100 * FINAL_RESOLUTION;

/// Per-worker draw counts: `floor(complete_w / total * SAMPLE_SIZE)`.
///
/// Workers with no completed requests get zero.
#[must_use]
pub fn resampling_quotas(samples: &[&Sample]) -> Vec<usize> {
    let total = total_complete(samples);
    samples
        .iter()
        .map(|sample| {
            let quota = u128::from(sample.complete_requests)
                .saturating_mul(SAMPLE_SIZE as u128)
                .checked_div(total)
                .unwrap_or(0);
            usize::try_from(quota).unwrap_or(SAMPLE_SIZE)
        })
        .collect()
}

/// Rebuilds the global latency distribution by drawing from each worker's
/// percentile list in proportion to its share of completed requests.
///
/// Returns an empty list when no requests completed. A single contributing
/// worker yields its own list unchanged.
pub fn resample_percentiles<R>(samples: &[&Sample], rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    if total_complete(samples) == 0 {
        return Vec::new();
    }

    let mut quotas = resampling_quotas(samples);
    if quotas.iter().sum::<usize>() < FINAL_RESOLUTION {
        // Only reachable with thousands of tiny workers: every floor hit zero.
        quotas = largest_remainder_quotas(samples);
    }
    debug!("Resampling quotas: {:?}", quotas);

    let mut contributing = samples
        .iter()
        .zip(&quotas)
        .filter(|(_, quota)| **quota > 0)
        .map(|(sample, _)| *sample);
    if let (Some(only), None) = (contributing.next(), contributing.next()) {
        return only.latency_percentiles.as_slice().to_vec();
    }

    let mut pool: Vec<f64> = Vec::with_capacity(quotas.iter().sum());
    for (sample, quota) in samples.iter().zip(&quotas) {
        let points = sample.latency_percentiles.as_slice();
        if points.is_empty() {
            continue;
        }
        for _ in 0..*quota {
            let idx = rng.gen_range(0..points.len());
            if let Some(value) = points.get(idx) {
                pool.push(*value);
            }
        }
    }
    pool.sort_unstable_by(f64::total_cmp);

    downsample(&pool)
}

fn downsample(pool: &[f64]) -> Vec<f64> {
    // With a full pool this is every SAMPLE_SIZE / FINAL_RESOLUTION-th value.
    (0..FINAL_RESOLUTION)
        .filter_map(|idx| {
            let position = idx
                .saturating_mul(pool.len())
                .checked_div(FINAL_RESOLUTION)
                .unwrap_or(0);
            pool.get(position).copied()
        })
        .collect()
}

fn total_complete(samples: &[&Sample]) -> u128 {
    samples
        .iter()
        .map(|sample| u128::from(sample.complete_requests))
        .sum()
}

fn largest_remainder_quotas(samples: &[&Sample]) -> Vec<usize> {
    let total = total_complete(samples);
    let mut quotas = resampling_quotas(samples);
    let mut remainders: Vec<(usize, u128)> = samples
        .iter()
        .enumerate()
        .map(|(idx, sample)| {
            let remainder = u128::from(sample.complete_requests)
                .saturating_mul(SAMPLE_SIZE as u128)
                .checked_rem(total)
                .unwrap_or(0);
            (idx, remainder)
        })
        .collect();
    remainders.sort_by(|left, right| right.1.cmp(&left.1).then(left.0.cmp(&right.0)));

    let mut missing = SAMPLE_SIZE.saturating_sub(quotas.iter().sum());
    for (idx, remainder) in remainders {
        if missing == 0 || remainder == 0 {
            break;
        }
        if let Some(slot) = quotas.get_mut(idx) {
            *slot = slot.saturating_add(1);
            missing = missing.saturating_sub(1);
        }
    }
    quotas
}
