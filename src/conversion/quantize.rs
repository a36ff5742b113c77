/// Evenly spaced amplitude levels covering [-1, 1], one per code word.
#[derive(Clone, Debug)]
pub struct QuantizationLevels {
    bit_depth: u32,
    levels: Vec<f64>,
}
impl QuantizationLevels {
    pub fn new(bit_depth: u32) -> Self {
        let count = 1usize << bit_depth;
        let levels = if count == 1 {
            vec![-1.0]
        } else {
            let step = 2.0 / (count - 1) as f64;
            let mut levels: Vec<f64> = (0..count).map(|i| -1.0 + step * i as f64).collect();
            levels[count - 1] = 1.0;
            levels
        };
        Self { bit_depth, levels }
    }
    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }
    pub fn len(&self) -> usize {
        self.levels.len()
    }
    /// Distance between adjacent levels.
    pub fn step(&self) -> f64 {
        if self.levels.len() < 2 {
            0.0
        } else {
            2.0 / (self.levels.len() - 1) as f64
        }
    }
    /// Index of the level closest to `value`. Ties go to the lower level.
    pub fn nearest(&self, value: f64) -> usize {
        let upper = self.levels.partition_point(|&l| l < value);
        if upper == 0 {
            return 0;
        }
        if upper == self.levels.len() {
            return self.levels.len() - 1;
        }
        let below = value - self.levels[upper - 1];
        let above = self.levels[upper] - value;
        if above < below {
            upper
        } else {
            upper - 1
        }
    }
    pub fn binary_code(&self, index: usize) -> String {
        binary_code(index, self.bit_depth)
    }
}
/// `index` as a zero-padded binary word `bit_depth` characters wide.
pub fn binary_code(index: usize, bit_depth: u32) -> String {
    format!("{:0width$b}", index, width = bit_depth as usize)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn levels_span_unit_range() {
        let q = QuantizationLevels::new(2);
        assert_eq!(q.len(), 4);
        assert_eq!(q.levels()[0], -1.0);
        assert_eq!(q.levels()[3], 1.0);
        assert!((q.levels()[1] + 1.0 / 3.0).abs() < 1e-12);
        assert!((q.step() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(QuantizationLevels::new(8).len(), 256);
    }
    #[test]
    fn quantized_values_are_always_levels() {
        for bits in 2..=8 {
            let q = QuantizationLevels::new(bits);
            for i in 0..=400 {
                let v = -1.3 + 2.6 * i as f64 / 400.0;
                let out = q.levels()[q.nearest(v)];
                assert!(q.levels().contains(&out));
                assert!((out - v.clamp(-1.0, 1.0)).abs() <= q.step() / 2.0 + 1e-12);
            }
        }
    }
    #[test]
    fn ties_resolve_to_lower_level() {
        let q = QuantizationLevels::new(1);
        assert_eq!(q.levels(), &[-1.0, 1.0]);
        assert_eq!(q.nearest(0.0), 0);
        assert_eq!(q.nearest(0.01), 1);
    }
    #[test]
    fn codes_are_zero_padded() {
        assert_eq!(binary_code(5, 8), "00000101");
        assert_eq!(binary_code(3, 2), "11");
        let q = QuantizationLevels::new(3);
        assert_eq!(q.binary_code(q.nearest(1.0)), "111");
        assert_eq!(q.binary_code(q.nearest(-1.0)), "000");
    }
}
