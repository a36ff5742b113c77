use std::ops::RangeInclusive;
use crate::conversion::error::ConversionError;
use crate::conversion::quantize::QuantizationLevels;
use crate::conversion::reconstruct::{smooth, zero_order_hold};
use crate::conversion::resample::{interpolate_linear, sample_count, sample_grid};
use crate::conversion::source::Waveform;
pub const SAMPLING_RATE_RANGE_HZ: RangeInclusive<u32> = 400..=44_100;
pub const SAMPLING_RATE_STEP_HZ: u32 = 100;
pub const BIT_DEPTH_RANGE: RangeInclusive<u32> = 2..=8;
pub const DEFAULT_SMOOTH_POINTS: usize = 1000;
/// User-selected converter settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionParams {
    pub sampling_rate_hz: u32,
    pub bit_depth: u32,
}
impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            sampling_rate_hz: 8000,
            bit_depth: 8,
        }
    }
}
impl ConversionParams {
    pub fn validate(&self) -> Result<(), ConversionError> {
        if !SAMPLING_RATE_RANGE_HZ.contains(&self.sampling_rate_hz) {
            return Err(ConversionError::SamplingRateOutOfRange {
                actual: self.sampling_rate_hz,
                min: *SAMPLING_RATE_RANGE_HZ.start(),
                max: *SAMPLING_RATE_RANGE_HZ.end(),
            });
        }
        if !BIT_DEPTH_RANGE.contains(&self.bit_depth) {
            return Err(ConversionError::BitDepthOutOfRange {
                actual: self.bit_depth,
                min: *BIT_DEPTH_RANGE.start(),
                max: *BIT_DEPTH_RANGE.end(),
            });
        }
        Ok(())
    }
}
/// Error introduced by quantization, measured against the sampled (unquantized) values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuantizationStats {
    pub step: f64,
    pub max_abs_error: f64,
    pub rms_error: f64,
    /// Measured SQNR in dB; infinite when quantization is lossless.
    pub sqnr_db: f64,
    /// Ideal full-scale sine SQNR, 6.02 b + 1.76 dB.
    pub theoretical_sqnr_db: f64,
}
impl QuantizationStats {
    fn measure(sampled: &[f64], quantized: &[f64], levels: &QuantizationLevels) -> Self {
        let theoretical_sqnr_db = 6.02 * levels.bit_depth() as f64 + 1.76;
        if sampled.is_empty() {
            return Self {
                step: levels.step(),
                theoretical_sqnr_db,
                ..Self::default()
            };
        }
        let mut max_abs_error = 0.0f64;
        let mut noise_power = 0.0;
        let mut signal_power = 0.0;
        for (&s, &q) in sampled.iter().zip(quantized) {
            let err = q - s;
            max_abs_error = max_abs_error.max(err.abs());
            noise_power += err * err;
            signal_power += s * s;
        }
        let n = sampled.len() as f64;
        let sqnr_db = if noise_power == 0.0 {
            f64::INFINITY
        } else {
            10.0 * (signal_power / noise_power).log10()
        };
        Self {
            step: levels.step(),
            max_abs_error,
            rms_error: (noise_power / n).sqrt(),
            sqnr_db,
            theoretical_sqnr_db,
        }
    }
}
/// Every derived sequence for one parameter setting, computed in a single pass.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub params: ConversionParams,
    pub levels: QuantizationLevels,
    pub sample_times: Vec<f64>,
    pub sampled: Vec<f64>,
    pub quantized: Vec<f64>,
    pub level_indices: Vec<usize>,
    pub binary_codes: Vec<String>,
    pub stair_x: Vec<f64>,
    pub stair_y: Vec<f64>,
    pub smooth_x: Vec<f64>,
    pub smooth_y: Vec<f64>,
    pub stats: QuantizationStats,
}
impl Conversion {
    pub fn compute(waveform: &Waveform, params: ConversionParams) -> Result<Self, ConversionError> {
        Self::compute_with_resolution(waveform, params, DEFAULT_SMOOTH_POINTS)
    }
    pub fn compute_with_resolution(
        waveform: &Waveform,
        params: ConversionParams,
        smooth_points: usize,
    ) -> Result<Self, ConversionError> {
        params.validate()?;
        let count = sample_count(waveform.duration(), params.sampling_rate_hz as f64);
        let sample_times = sample_grid(waveform.start(), waveform.end(), count);
        let sampled = interpolate_linear(waveform.time(), waveform.amplitude(), &sample_times);
        let levels = QuantizationLevels::new(params.bit_depth);
        let level_indices: Vec<usize> = sampled.iter().map(|&v| levels.nearest(v)).collect();
        let quantized: Vec<f64> = level_indices.iter().map(|&i| levels.levels()[i]).collect();
        let binary_codes = level_indices
            .iter()
            .map(|&i| levels.binary_code(i))
            .collect();
        let (stair_x, stair_y) = zero_order_hold(&sample_times, &quantized);
        let (smooth_x, smooth_y) = smooth(&sample_times, &quantized, smooth_points);
        let stats = QuantizationStats::measure(&sampled, &quantized, &levels);
        log::debug!(
            "converted at {} Hz / {} bits: {} samples, SQNR {:.1} dB",
            params.sampling_rate_hz,
            params.bit_depth,
            sample_times.len(),
            stats.sqnr_db
        );
        Ok(Self {
            params,
            levels,
            sample_times,
            sampled,
            quantized,
            level_indices,
            binary_codes,
            stair_x,
            stair_y,
            smooth_x,
            smooth_y,
            stats,
        })
    }
    pub fn sample_count(&self) -> usize {
        self.sample_times.len()
    }
    fn zip(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
        xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect()
    }
    pub fn sampled_points(&self) -> Vec<[f64; 2]> {
        Self::zip(&self.sample_times, &self.sampled)
    }
    pub fn quantized_points(&self) -> Vec<[f64; 2]> {
        Self::zip(&self.sample_times, &self.quantized)
    }
    pub fn stair_points(&self) -> Vec<[f64; 2]> {
        Self::zip(&self.stair_x, &self.stair_y)
    }
    pub fn smooth_points(&self) -> Vec<[f64; 2]> {
        Self::zip(&self.smooth_x, &self.smooth_y)
    }
}
