use crate::domain::{PERCENTILE_POINTS, Sample};

/// Geometric bins spanning the observed latency range.
pub const LOG_BINS: usize = 1000;
/// Lower clamp so the log scale is defined when a worker reports 0ms.
const MIN_LATENCY_MS: f64 = 1e-3;
/// Probability mass carried by one percentile interval.
const INTERVAL_MASS: f64 = 1.0 / PERCENTILE_POINTS as f64;

#[derive(Debug, Clone, Copy)]
struct Bin {
    lower: f64,
    upper: f64,
    mass: f64,
}

struct BinGrid {
    bins: Vec<Bin>,
    min: f64,
    ln_factor: f64,
}

impl BinGrid {
    fn new(min: f64, max: f64) -> Self {
        let ln_factor = (max.ln() - min.ln()) / LOG_BINS as f64;
        let factor = ln_factor.exp();
        let mut bins = Vec::with_capacity(LOG_BINS);
        let mut lower = min;
        for _ in 0..LOG_BINS {
            let upper = lower * factor;
            bins.push(Bin {
                lower,
                upper,
                mass: 0.0,
            });
            lower = upper;
        }
        Self {
            bins,
            min,
            ln_factor,
        }
    }

    fn index_of(&self, latency: f64) -> usize {
        let position = ((latency.max(self.min) / self.min).ln() / self.ln_factor).floor();
        if position.is_finite() && position > 0.0 {
            (position as usize).min(LOG_BINS.saturating_sub(1))
        } else {
            0
        }
    }

    /// Spreads `mass` uniformly over `[low, high]`.
    fn spread(&mut self, low: f64, high: f64, mass: f64) {
        let width = high - low;
        if width <= 0.0 {
            let idx = self.index_of(low);
            if let Some(bin) = self.bins.get_mut(idx) {
                bin.mass += mass;
            }
            return;
        }
        let first = self.index_of(low);
        let last = self.index_of(high);
        for idx in first..=last {
            let Some(bin) = self.bins.get_mut(idx) else {
                break;
            };
            let overlap = bin.upper.min(high) - bin.lower.max(low);
            if overlap > 0.0 {
                bin.mass += overlap / width * mass;
            }
        }
    }

    fn invert(&self, first: f64, max: f64) -> Vec<f64> {
        let total_mass: f64 = self.bins.iter().map(|bin| bin.mass).sum();
        let mut cut_points = Vec::with_capacity(PERCENTILE_POINTS);
        cut_points.push(first);
        if total_mass > 0.0 {
            let mut cumulative = 0.0;
            for bin in &self.bins {
                cumulative += bin.mass;
                while cut_points.len() < PERCENTILE_POINTS
                    && cumulative / total_mass * (PERCENTILE_POINTS as f64)
                        > cut_points.len() as f64
                {
                    cut_points.push(bin.upper.min(max));
                }
            }
        }
        cut_points.resize(PERCENTILE_POINTS, max);
        cut_points
    }
}

/// Rebuilds the global latency distribution by binning each worker's
/// percentile intervals on a log scale, weighting by its share of completed
/// requests, and reading the cumulative mass back out at each percent.
///
/// Returns an empty list when no requests completed.
#[must_use]
pub fn log_binned_percentiles(samples: &[&Sample]) -> Vec<f64> {
    let weighted: Vec<&Sample> = samples
        .iter()
        .copied()
        .filter(|sample| sample.complete_requests > 0)
        .collect();
    let total: u64 = weighted
        .iter()
        .fold(0u64, |acc, sample| acc.saturating_add(sample.complete_requests));
    if total == 0 {
        return Vec::new();
    }

    let observed_min = weighted
        .iter()
        .map(|sample| sample.latency_percentiles.min())
        .fold(f64::INFINITY, f64::min);
    let observed_max = weighted
        .iter()
        .map(|sample| sample.latency_percentiles.max())
        .fold(0.0, f64::max);

    let min = observed_min.max(MIN_LATENCY_MS);
    if observed_max <= min {
        return vec![observed_max.max(observed_min); PERCENTILE_POINTS];
    }

    let mut grid = BinGrid::new(min, observed_max);
    for sample in weighted {
        let share = sample.complete_requests as f64 / total as f64;
        let points = sample.latency_percentiles.as_slice();
        for pair in points.windows(2) {
            if let [low, high] = pair {
                grid.spread(*low, *high, share * INTERVAL_MASS);
            }
        }
    }

    grid.invert(observed_min, observed_max)
}
