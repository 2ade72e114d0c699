use crate::domain::model::{Histogram, HistogramBucket, Temperature};
use crate::utils::error::{HistogramError, Result};

/// Upper bound on the number of buckets in one report.
pub const MAX_BUCKETS: usize = 100_000;

/// Equal-width histogram over the observed range of `temperatures`.
///
/// Every bucket is half-open `[min, max)` except the last, which also holds
/// the maximum. When all values are equal the range is widened by 0.5 on
/// each side so the buckets keep a non-zero width.
pub fn build_histogram(temperatures: &[Temperature], buckets: usize) -> Result<Histogram> {
    let edge_count = buckets
        .checked_add(1)
        .filter(|_| (1..=MAX_BUCKETS).contains(&buckets))
        .ok_or(HistogramError::InvalidBucketCount(buckets))?;
    if let Some(&bad) = temperatures.iter().find(|t| !t.is_finite()) {
        return Err(HistogramError::NonFiniteTemperature(bad));
    }

    let (mut low, mut high) = temperatures
        .iter()
        .fold(None, |range: Option<(f64, f64)>, &t| match range {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
        .ok_or(HistogramError::EmptyInput)?;

    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let edges = linspace(low, high, edge_count);
    let mut counts = vec![0usize; buckets];
    for &t in temperatures {
        counts[bucket_index(&edges, t)] += 1;
    }

    let buckets = edges
        .windows(2)
        .zip(counts)
        .map(|(pair, count)| HistogramBucket {
            minimum: pair[0],
            maximum: pair[1],
            count,
        })
        .collect();

    Ok(Histogram { buckets, edges })
}

fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    let intervals = (points - 1) as f64;
    let step = (stop - start) / intervals;
    let mut edges: Vec<f64> = (0..points).map(|i| start + i as f64 * step).collect();
    // Pin the last edge so the maximum always lands in the closed final bucket.
    if let Some(last) = edges.last_mut() {
        *last = stop;
    }
    edges
}

/// `value` must lie within `[edges[0], edges[last]]`.
fn bucket_index(edges: &[f64], value: f64) -> usize {
    let last_bucket = edges.len() - 2;
    let upper = edges.partition_point(|&edge| edge <= value);
    upper.saturating_sub(1).min(last_bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_values_two_buckets() {
        let histogram = build_histogram(&[10.0, 20.0, 30.0, 40.0, 50.0], 2).unwrap();

        assert_eq!(histogram.edges, vec![10.0, 30.0, 50.0]);
        assert_eq!(
            histogram.buckets,
            vec![
                HistogramBucket {
                    minimum: 10.0,
                    maximum: 30.0,
                    count: 2
                },
                HistogramBucket {
                    minimum: 30.0,
                    maximum: 50.0,
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn test_bucket_count_and_total() {
        let temps = [71.3, 55.0, 88.8, 62.1, 62.1, 99.9, 40.2, 70.0];
        for buckets in 1..=10 {
            let histogram = build_histogram(&temps, buckets).unwrap();
            assert_eq!(histogram.buckets.len(), buckets);
            assert_eq!(histogram.edges.len(), buckets + 1);
            assert_eq!(histogram.total_count(), temps.len());
        }
    }

    #[test]
    fn test_edges_span_observed_range() {
        let temps = [12.5, -3.25, 40.0, 7.0];
        let histogram = build_histogram(&temps, 3).unwrap();

        assert_eq!(histogram.buckets.first().unwrap().minimum, -3.25);
        assert_eq!(histogram.buckets.last().unwrap().maximum, 40.0);
        assert!(histogram.edges.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_single_bucket_holds_everything() {
        let histogram = build_histogram(&[1.0, 2.0, 3.0], 1).unwrap();
        assert_eq!(histogram.buckets.len(), 1);
        assert_eq!(histogram.buckets[0].count, 3);
    }

    #[test]
    fn test_identical_values_widen_range() {
        let histogram = build_histogram(&[70.0, 70.0], 2).unwrap();

        assert_eq!(histogram.edges, vec![69.5, 70.0, 70.5]);
        assert_eq!(histogram.buckets[0].count, 0);
        assert_eq!(histogram.buckets[1].count, 2);
    }

    #[test]
    fn test_oversized_bucket_count_is_rejected() {
        for buckets in [MAX_BUCKETS + 1, usize::MAX - 1, usize::MAX] {
            assert!(matches!(
                build_histogram(&[1.0, 2.0], buckets),
                Err(HistogramError::InvalidBucketCount(b)) if b == buckets
            ));
        }
        assert_eq!(build_histogram(&[1.0, 2.0], MAX_BUCKETS).unwrap().buckets.len(), MAX_BUCKETS);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            build_histogram(&[1.0], 0),
            Err(HistogramError::InvalidBucketCount(0))
        ));
        assert!(matches!(
            build_histogram(&[], 3),
            Err(HistogramError::EmptyInput)
        ));
        assert!(matches!(
            build_histogram(&[1.0, f64::NAN], 3),
            Err(HistogramError::NonFiniteTemperature(_))
        ));
    }
}
