//! Uniform resampling of the reference waveform.

/// Number of samples taken over `duration_s` seconds; truncates like an integer cast.
pub fn sample_count(duration_s: f64, rate_hz: f64) -> usize {
    let count = duration_s * rate_hz;
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}
/// `count` evenly spaced points from `start` to `end`, both ends included.
pub fn sample_grid(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut grid: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // Pin the last point so float drift never leaves the source range.
            grid[count - 1] = end;
            grid
        }
    }
}
/// Piecewise-linear interpolation of `(xs, ys)` at every point of `at`.
///
/// `xs` must be strictly increasing. Queries outside `[xs[0], xs[last]]`
/// take the nearest end value.
pub fn interpolate_linear(xs: &[f64], ys: &[f64], at: &[f64]) -> Vec<f64> {
    if xs.is_empty() {
        return Vec::new();
    }
    let last = xs.len() - 1;
    at.iter()
        .map(|&x| {
            if x <= xs[0] {
                return ys[0];
            }
            if x >= xs[last] {
                return ys[last];
            }
            // First knot strictly greater than x; x lies in [xs[hi - 1], xs[hi]).
            let hi = xs.partition_point(|&k| k <= x);
            let lo = hi - 1;
            let frac = (x - xs[lo]) / (xs[hi] - xs[lo]);
            ys[lo] + (ys[hi] - ys[lo]) * frac
        })
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn count_truncates() {
        assert_eq!(sample_count(0.02, 8000.0), 160);
        assert_eq!(sample_count(0.0199, 400.0), 7);
        assert_eq!(sample_count(0.0, 44100.0), 0);
    }
    #[test]
    fn grid_includes_both_ends() {
        let grid = sample_grid(1.0, 2.0, 5);
        assert_eq!(grid, vec![1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(sample_grid(3.0, 4.0, 1), vec![3.0]);
        assert!(sample_grid(3.0, 4.0, 0).is_empty());
    }
    #[test]
    fn linear_interpolation_hits_knots_and_midpoints() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [0.0, 2.0, -2.0];
        let out = interpolate_linear(&xs, &ys, &[0.0, 0.5, 1.0, 2.0, 3.0]);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 0.0, -2.0]);
    }
    #[test]
    fn out_of_range_queries_clamp() {
        let out = interpolate_linear(&[0.0, 1.0], &[5.0, 7.0], &[-1.0, 2.0]);
        assert_eq!(out, vec![5.0, 7.0]);
    }
}
