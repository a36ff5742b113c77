use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::conversion::error::ConversionError;
use crate::conversion::pipeline::Conversion;
use crate::conversion::source::Waveform;
use crate::types::{DisplayToggles, Trace};
const Y_RANGE: (f64, f64) = (-1.1, 1.1);
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub original: RGBColor,
    pub sampled: RGBColor,
    pub quantized: RGBColor,
    pub reconstructed: RGBColor,
    pub smoothed: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
            background: WHITE,
            foreground: BLACK,
            original: RGBColor(211, 211, 211),
            sampled: BLUE,
            quantized: RGBColor(0, 128, 0),
            reconstructed: RED,
            smoothed: RGBColor(255, 165, 0),
        }
    }
}
impl PlotStyle {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
    fn color(&self, trace: Trace) -> RGBColor {
        match trace {
            Trace::Original => self.original,
            Trace::Sampled => self.sampled,
            Trace::Quantized => self.quantized,
            Trace::Reconstructed => self.reconstructed,
            Trace::Smoothed => self.smoothed,
        }
    }
}
fn pairs(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}
/// Renders the selected traces into a PNG, mirroring the interactive chart.
pub fn render_conversion_png(
    waveform: &Waveform,
    conversion: &Conversion,
    toggles: &DisplayToggles,
    style: &PlotStyle,
) -> Result<Vec<u8>, ConversionError> {
    if style.width == 0 || style.height == 0 {
        return Err(ConversionError::Plot("image size must be non-zero".into()));
    }
    let len = (style.width as usize)
        .checked_mul(style.height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or_else(|| {
            ConversionError::Plot(format!("image {}x{} is too large", style.width, style.height))
        })?;
    let mut buffer = vec![0u8; len];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                "Signal Digitization Process",
                ("sans-serif", 22).into_font().color(&style.foreground),
            )
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d(waveform.start()..waveform.end(), Y_RANGE.0..Y_RANGE.1)?;
        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Amplitude")
            .light_line_style(&style.foreground.mix(0.05))
            .draw()?;
        let bits = conversion.params.bit_depth;
        for trace in Trace::ALL.into_iter().filter(|t| toggles.shows(*t)) {
            let color = style.color(trace);
            let line = color.stroke_width(2);
            let annotation = match trace {
                Trace::Original => chart.draw_series(LineSeries::new(
                    pairs(waveform.time(), waveform.amplitude()),
                    line,
                ))?,
                Trace::Sampled => chart.draw_series(
                    pairs(&conversion.sample_times, &conversion.sampled)
                        .into_iter()
                        .map(|p| Circle::new(p, 3, color.filled())),
                )?,
                Trace::Quantized => {
                    chart.draw_series(
                        pairs(&conversion.sample_times, &conversion.quantized)
                            .into_iter()
                            .map(|p| Circle::new(p, 3, color.filled())),
                    )?;
                    chart.draw_series(LineSeries::new(
                        pairs(&conversion.stair_x, &conversion.stair_y),
                        line,
                    ))?
                }
                Trace::Reconstructed => chart.draw_series(LineSeries::new(
                    pairs(&conversion.stair_x, &conversion.stair_y),
                    line,
                ))?,
                Trace::Smoothed => {
                    // Dotted: draw every other short run of the curve.
                    let curve = pairs(&conversion.smooth_x, &conversion.smooth_y);
                    let dashes: Vec<Vec<(f64, f64)>> = curve
                        .chunks(4)
                        .step_by(2)
                        .filter(|run| run.len() > 1)
                        .map(|run| run.to_vec())
                        .collect();
                    chart.draw_series(dashes.into_iter().map(|run| PathElement::new(run, line)))?
                }
            };
            annotation
                .label(trace.legend(bits))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(&style.foreground.mix(0.3))
            .background_style(&style.background.mix(0.8))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ConversionError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ConversionError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::pipeline::ConversionParams;
    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    #[test]
    fn renders_all_traces_to_png() {
        let wave = Waveform::demo().unwrap();
        let conv = Conversion::compute(&wave, ConversionParams::default()).unwrap();
        let toggles = DisplayToggles {
            smoothed: true,
            ..DisplayToggles::default()
        };
        let png = render_conversion_png(&wave, &conv, &toggles, &PlotStyle::with_size(640, 320))
            .unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }
    #[test]
    fn zero_sized_image_is_an_error() {
        let wave = Waveform::demo().unwrap();
        let conv = Conversion::compute(&wave, ConversionParams::default()).unwrap();
        let err = render_conversion_png(
            &wave,
            &conv,
            &DisplayToggles::default(),
            &PlotStyle::with_size(0, 100),
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::Plot(_)));
    }
    #[test]
    fn oversized_image_is_an_error() {
        let wave = Waveform::demo().unwrap();
        let conv = Conversion::compute(&wave, ConversionParams::default()).unwrap();
        let style = PlotStyle::with_size(u32::MAX, u32::MAX);
        let err = render_conversion_png(&wave, &conv, &DisplayToggles::default(), &style)
            .unwrap_err();
        assert!(matches!(err, ConversionError::Plot(_)));
    }
}
