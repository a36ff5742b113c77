use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::conversion::{
    Conversion, ConversionError, ConversionParams, Waveform, DEFAULT_SMOOTH_POINTS,
};
use crate::types::DisplayToggles;
pub const DEFAULT_CSV_PATH: &str = "data/signal_original_20ms.csv";
pub const MAX_EXPORT_SIDE: u32 = 8192;
/// Startup settings, read from an optional JSON file. Missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub csv_path: PathBuf,
    pub sampling_rate_hz: u32,
    pub bit_depth: u32,
    pub smooth_points: usize,
    pub display: DisplayToggles,
    pub export_width: u32,
    pub export_height: u32,
}
impl Default for Settings {
    fn default() -> Self {
        let params = ConversionParams::default();
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            sampling_rate_hz: params.sampling_rate_hz,
            bit_depth: params.bit_depth,
            smooth_points: DEFAULT_SMOOTH_POINTS,
            display: DisplayToggles::default(),
            export_width: 1200,
            export_height: 500,
        }
    }
}
impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }
    pub fn from_json(text: &str) -> Result<Self, ConversionError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }
    pub fn validate(&self) -> Result<(), ConversionError> {
        self.params().validate()?;
        let side = 1..=MAX_EXPORT_SIDE;
        if !side.contains(&self.export_width) || !side.contains(&self.export_height) {
            return Err(ConversionError::ExportSizeOutOfRange {
                width: self.export_width,
                height: self.export_height,
                max: MAX_EXPORT_SIDE,
            });
        }
        Ok(())
    }
    /// Runs the conversion at the configured smoothing resolution.
    pub fn convert(&self, waveform: &Waveform) -> Result<Conversion, ConversionError> {
        convert(waveform, self.params(), self.smooth_points)
    }
    pub fn params(&self) -> ConversionParams {
        ConversionParams {
            sampling_rate_hz: self.sampling_rate_hz,
            bit_depth: self.bit_depth,
        }
    }
}
/// Default resolution goes through `Conversion::compute`; anything else sets it explicitly.
pub fn convert(
    waveform: &Waveform,
    params: ConversionParams,
    smooth_points: usize,
) -> Result<Conversion, ConversionError> {
    if smooth_points == DEFAULT_SMOOTH_POINTS {
        Conversion::compute(waveform, params)
    } else {
        Conversion::compute_with_resolution(waveform, params, smooth_points)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn empty_object_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.params(), ConversionParams::default());
        assert_eq!(settings.smooth_points, 1000);
    }
    #[test]
    fn partial_display_section_keeps_other_toggles() {
        let settings =
            Settings::from_json(r#"{"bit_depth": 4, "display": {"smoothed": true}}"#).unwrap();
        assert_eq!(settings.bit_depth, 4);
        assert!(settings.display.smoothed);
        assert!(settings.display.original);
        assert_eq!(settings.sampling_rate_hz, 8000);
    }
    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"bit_depth": 9}"#),
            Err(ConversionError::BitDepthOutOfRange { actual: 9, .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"bit_depth": "eight"}"#),
            Err(ConversionError::Settings(_))
        ));
    }
    #[test]
    fn export_size_is_bounded() {
        assert!(matches!(
            Settings::from_json(r#"{"export_width": 40000, "export_height": 40000}"#),
            Err(ConversionError::ExportSizeOutOfRange {
                width: 40000,
                height: 40000,
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"export_height": 0}"#),
            Err(ConversionError::ExportSizeOutOfRange { height: 0, .. })
        ));
        let ok = Settings::from_json(r#"{"export_width": 1920, "export_height": 1080}"#).unwrap();
        assert_eq!((ok.export_width, ok.export_height), (1920, 1080));
    }
    #[test]
    fn convert_honours_smoothing_resolution() {
        let wave = Waveform::demo().unwrap();
        let default = Settings::default().convert(&wave).unwrap();
        assert_eq!(default.smooth_x.len(), DEFAULT_SMOOTH_POINTS);
        let coarse = Settings {
            smooth_points: 50,
            ..Settings::default()
        };
        assert_eq!(coarse.convert(&wave).unwrap().smooth_x.len(), 50);
    }
}
