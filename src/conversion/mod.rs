// 采样 -> 量化 -> 重建 的数值流水线
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod quantize;
pub mod reconstruct;
pub mod resample;
pub mod source;
// 公开导出常用类型
pub use error::ConversionError;
pub use pipeline::{
    Conversion, ConversionParams, BIT_DEPTH_RANGE, DEFAULT_SMOOTH_POINTS, SAMPLING_RATE_RANGE_HZ,
    SAMPLING_RATE_STEP_HZ,
};
pub use plot::{render_conversion_png, PlotStyle};
pub use source::Waveform;
