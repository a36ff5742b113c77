use thiserror::Error;
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to read waveform: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv header is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("csv line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("{time} time values but {amplitude} amplitude values")]
    LengthMismatch { time: usize, amplitude: usize },
    #[error("non-finite value at row {row}")]
    NonFinite { row: usize },
    #[error("synthetic waveform needs at least one tone")]
    NoTones,
    #[error("waveform needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("time must be strictly increasing (row {row})")]
    NonIncreasingTime { row: usize },
    #[error("sampling rate {actual} Hz is outside {min}..={max} Hz")]
    SamplingRateOutOfRange { actual: u32, min: u32, max: u32 },
    #[error("bit depth {actual} is outside {min}..={max}")]
    BitDepthOutOfRange { actual: u32, min: u32, max: u32 },
    #[error("export size {width}x{height} is outside 1..={max} per side")]
    ExportSizeOutOfRange { width: u32, height: u32, max: u32 },
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ConversionError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ConversionError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ConversionError {
    fn from(value: image::ImageError) -> Self {
        ConversionError::Plot(value.to_string())
    }
}
