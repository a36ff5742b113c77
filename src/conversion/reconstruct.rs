//! Reconstruction of a continuous curve from quantized samples.

use crate::conversion::resample::{interpolate_linear, sample_grid};
/// Stair-step (zero-order hold) coordinates: each value is held until the next sample time.
///
/// N samples produce 2N - 1 points.
pub fn zero_order_hold(times: &[f64], values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = times.len().min(values.len());
    let mut xs = Vec::with_capacity((2 * n).saturating_sub(1));
    let mut ys = Vec::with_capacity((2 * n).saturating_sub(1));
    for i in 0..n {
        xs.push(times[i]);
        ys.push(values[i]);
        if i + 1 < n {
            xs.push(times[i + 1]);
            ys.push(values[i]);
        }
    }
    (xs, ys)
}
/// Interpolating cubic spline with not-a-knot end conditions.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    // Second derivative at each knot.
    m: Vec<f64>,
}
impl CubicSpline {
    /// Needs at least 4 strictly increasing knots.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        let n = xs.len();
        if n < 4 || ys.len() != n {
            return None;
        }
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        if h.iter().any(|&d| d <= 0.0) {
            return None;
        }
        let slope: Vec<f64> = ys
            .windows(2)
            .zip(&h)
            .map(|(w, &d)| (w[1] - w[0]) / d)
            .collect();
        // Interior unknowns m[1..n-1]; the end values follow from the not-a-knot rows.
        let k = n - 2;
        let mut sub = vec![0.0; k];
        let mut diag = vec![0.0; k];
        let mut sup = vec![0.0; k];
        let mut rhs = vec![0.0; k];
        for j in 0..k {
            let i = j + 1;
            sub[j] = h[i - 1];
            diag[j] = 2.0 * (h[i - 1] + h[i]);
            sup[j] = h[i];
            rhs[j] = 6.0 * (slope[i] - slope[i - 1]);
        }
        let (h0, h1) = (h[0], h[1]);
        diag[0] += h0 * (h0 + h1) / h1;
        sup[0] -= h0 * h0 / h1;
        let (ha, hb) = (h[n - 3], h[n - 2]);
        diag[k - 1] += hb * (ha + hb) / ha;
        sub[k - 1] -= hb * hb / ha;
        let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;
        let mut m = Vec::with_capacity(n);
        m.push(((h0 + h1) * interior[0] - h0 * interior[1]) / h1);
        m.extend_from_slice(&interior);
        m.push(((ha + hb) * interior[k - 1] - hb * interior[k - 2]) / ha);
        Some(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m,
        })
    }
    pub fn eval(&self, x: f64) -> f64 {
        let last = self.xs.len() - 1;
        let seg = self.xs.partition_point(|&k| k <= x).clamp(1, last) - 1;
        let h = self.xs[seg + 1] - self.xs[seg];
        let t = x - self.xs[seg];
        let (m0, m1) = (self.m[seg], self.m[seg + 1]);
        let b = (self.ys[seg + 1] - self.ys[seg]) / h - h * (2.0 * m0 + m1) / 6.0;
        self.ys[seg] + t * (b + t * (m0 / 2.0 + t * (m1 - m0) / (6.0 * h)))
    }
}
// Thomas algorithm.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Option<Vec<f64>> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];
    let mut denom = diag[0];
    if denom.abs() < f64::EPSILON {
        return None;
    }
    c[0] = sup[0] / denom;
    d[0] = rhs[0] / denom;
    for i in 1..n {
        denom = diag[i] - sub[i] * c[i - 1];
        if denom.abs() < f64::EPSILON {
            return None;
        }
        c[i] = sup[i] / denom;
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / denom;
    }
    let mut x = d;
    for i in (0..n.saturating_sub(1)).rev() {
        x[i] -= c[i] * x[i + 1];
    }
    Some(x)
}
/// Smooth curve through the quantized samples, evaluated on `points` evenly spaced times.
///
/// Fewer than four samples cannot carry a cubic; those fall back to linear
/// (two or three samples) or a constant (one sample).
pub fn smooth(times: &[f64], values: &[f64], points: usize) -> (Vec<f64>, Vec<f64>) {
    let Some((&start, &end)) = times.first().zip(times.last()) else {
        return (Vec::new(), Vec::new());
    };
    let grid = sample_grid(start, end, points);
    let curve = match CubicSpline::fit(times, values) {
        Some(spline) => grid.iter().map(|&x| spline.eval(x)).collect(),
        None => {
            log::warn!(
                "{} samples are too few for a cubic reconstruction, using linear",
                times.len()
            );
            interpolate_linear(times, values, &grid)
        }
    };
    (grid, curve)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn stair_has_two_n_minus_one_points() {
        let (xs, ys) = zero_order_hold(&[0.0, 1.0, 2.0], &[0.5, -0.5, 1.0]);
        assert_eq!(xs, vec![0.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(ys, vec![0.5, 0.5, -0.5, -0.5, 1.0]);
        for n in 0..20usize {
            let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let (xs, _) = zero_order_hold(&t, &t);
            assert_eq!(xs.len(), (2 * n).saturating_sub(1));
        }
    }
    #[test]
    fn spline_reproduces_cubic_polynomial() {
        let f = |x: f64| 0.5 * x * x * x - x * x + 2.0 * x - 3.0;
        let xs = [0.0, 0.7, 1.5, 2.0, 3.1, 4.0];
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
        let spline = CubicSpline::fit(&xs, &ys).unwrap();
        for i in 0..=40 {
            let x = 4.0 * i as f64 / 40.0;
            assert!((spline.eval(x) - f(x)).abs() < 1e-9, "x = {x}");
        }
    }
    #[test]
    fn spline_passes_through_knots() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64 * 0.1).collect();
        let ys = [0.0, 1.0, -1.0, 0.5, 0.5, -0.25, 0.0, 1.0, 1.0, -1.0];
        let spline = CubicSpline::fit(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys) {
            assert!((spline.eval(*x) - y).abs() < 1e-9);
        }
    }
    #[test]
    fn smooth_uses_requested_resolution() {
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        let v = [0.0, 1.0, 0.0, -1.0, 0.0];
        let (xs, ys) = smooth(&t, &v, 1000);
        assert_eq!(xs.len(), 1000);
        assert_eq!(ys.len(), 1000);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[999], 4.0);
        assert!(ys[999].abs() < 1e-9);
    }
    #[test]
    fn smooth_degrades_with_few_samples() {
        let (xs, ys) = smooth(&[0.0, 2.0], &[0.0, 1.0], 5);
        assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(ys, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        let (xs, ys) = smooth(&[1.0], &[0.25], 3);
        assert_eq!(xs, vec![1.0, 1.0, 1.0]);
        assert_eq!(ys, vec![0.25, 0.25, 0.25]);
        let (xs, ys) = smooth(&[], &[], 10);
        assert!(xs.is_empty() && ys.is_empty());
    }
}
