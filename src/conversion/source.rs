use std::f64::consts::TAU;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::conversion::ConversionError;
const TIME_COLUMN: &str = "time";
const AMPLITUDE_COLUMN: &str = "amplitude";
/// The analog reference signal, sampled densely enough to stand in for a continuous waveform.
#[derive(Clone, Debug)]
pub struct Waveform {
    time: Vec<f64>,
    amplitude: Vec<f64>,
}
/// One sinusoidal component of a synthetic waveform.
#[derive(Clone, Copy, Debug)]
pub struct Tone {
    pub frequency_hz: f64,
    pub amplitude: f64,
    pub phase: f64,
}
impl Waveform {
    pub fn new(time: Vec<f64>, amplitude: Vec<f64>) -> Result<Self, ConversionError> {
        if time.len() != amplitude.len() {
            return Err(ConversionError::LengthMismatch {
                time: time.len(),
                amplitude: amplitude.len(),
            });
        }
        if let Some(row) = time
            .iter()
            .zip(&amplitude)
            .position(|(t, a)| !t.is_finite() || !a.is_finite())
        {
            return Err(ConversionError::NonFinite { row });
        }
        if time.len() < 2 {
            return Err(ConversionError::TooFewSamples(time.len()));
        }
        for (row, pair) in time.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConversionError::NonIncreasingTime { row: row + 1 });
            }
        }
        Ok(Self { time, amplitude })
    }
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file))
    }
    /// Parses a headed CSV; only the `time` and `amplitude` columns are read.
    pub fn from_csv_reader(reader: impl BufRead) -> Result<Self, ConversionError> {
        let mut lines = reader.lines().enumerate();
        let (time_idx, amp_idx) = loop {
            let Some((_, line)) = lines.next() else {
                return Err(ConversionError::MissingColumn(TIME_COLUMN));
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let headers: Vec<&str> = line
                .split(',')
                .map(|h| h.trim().trim_matches('"').trim())
                .collect();
            let find = |name: &'static str| {
                headers
                    .iter()
                    .position(|h| *h == name)
                    .ok_or(ConversionError::MissingColumn(name))
            };
            break (find(TIME_COLUMN)?, find(AMPLITUDE_COLUMN)?);
        };
        let mut time = Vec::new();
        let mut amplitude = Vec::new();
        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            time.push(parse_field(&fields, time_idx, TIME_COLUMN, idx + 1)?);
            amplitude.push(parse_field(&fields, amp_idx, AMPLITUDE_COLUMN, idx + 1)?);
        }
        Self::new(time, amplitude)
    }
    /// Deterministic sum of sines, used for demos and tests.
    pub fn synthetic(duration_s: f64, rate_hz: f64, tones: &[Tone]) -> Result<Self, ConversionError> {
        if tones.is_empty() {
            return Err(ConversionError::NoTones);
        }
        let count = (duration_s * rate_hz).round() as usize + 1;
        let time: Vec<f64> = (0..count).map(|i| i as f64 / rate_hz).collect();
        let amplitude = time
            .iter()
            .map(|&t| {
                tones
                    .iter()
                    .map(|tone| tone.amplitude * (TAU * tone.frequency_hz * t + tone.phase).sin())
                    .sum::<f64>()
            })
            .collect();
        Self::new(time, amplitude)
    }
    /// Two-tone signal spanning 20 ms, similar in shape to the bundled CSV.
    pub fn demo() -> Result<Self, ConversionError> {
        Self::synthetic(
            0.02,
            96_000.0,
            &[
                Tone {
                    frequency_hz: 150.0,
                    amplitude: 0.6,
                    phase: 0.0,
                },
                Tone {
                    frequency_hz: 420.0,
                    amplitude: 0.3,
                    phase: 0.5,
                },
            ],
        )
    }
    pub fn time(&self) -> &[f64] {
        &self.time
    }
    pub fn amplitude(&self) -> &[f64] {
        &self.amplitude
    }
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn start(&self) -> f64 {
        self.time[0]
    }
    pub fn end(&self) -> f64 {
        self.time[self.time.len() - 1]
    }
    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.time
            .iter()
            .zip(&self.amplitude)
            .map(|(&t, &a)| [t, a])
            .collect()
    }
}
fn parse_field(
    fields: &[&str],
    idx: usize,
    column: &str,
    line: usize,
) -> Result<f64, ConversionError> {
    let raw = fields.get(idx).map(|f| f.trim()).ok_or_else(|| ConversionError::Parse {
        line,
        message: format!("missing `{column}` value"),
    })?;
    let value: f64 = raw.parse().map_err(|_| ConversionError::Parse {
        line,
        message: format!("`{raw}` is not a number"),
    })?;
    if !value.is_finite() {
        return Err(ConversionError::Parse {
            line,
            message: format!("`{column}` is not finite"),
        });
    }
    Ok(value)
}
