// src/gui.rs
use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};
use std::fs;

use crate::config::{self, Settings};
use crate::conversion::{
    render_conversion_png, Conversion, ConversionParams, PlotStyle, Waveform, BIT_DEPTH_RANGE,
    SAMPLING_RATE_RANGE_HZ, SAMPLING_RATE_STEP_HZ,
};
use crate::types::{DisplayToggles, Trace};

const LOG_LIMIT: usize = 8;
const CODE_TABLE_ROWS: usize = 64;

pub struct AdcVisualizerApp {
    // 原始信号 (启动时读取一次)
    waveform: Waveform,

    // 参数与显示开关
    params: ConversionParams,
    toggles: DisplayToggles,
    smooth_points: usize,

    // 当前参数下的计算结果
    conversion: Option<Conversion>,

    // 导出
    export_path: String,
    export_size: (u32, u32),

    // 界面日志
    log_messages: Vec<String>,
}

impl AdcVisualizerApp {
    pub fn new(waveform: Waveform, settings: &Settings) -> Self {
        let mut app = Self {
            waveform,
            params: settings.params(),
            toggles: settings.display,
            smooth_points: settings.smooth_points,
            conversion: None,
            export_path: "signal_digitization.png".to_owned(),
            export_size: (settings.export_width, settings.export_height),
            log_messages: vec!["ADC Visualizer ready.".to_owned()],
        };
        app.recompute();
        app
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > LOG_LIMIT {
            self.log_messages.remove(0);
        }
    }

    // 参数变化后整体重算
    fn recompute(&mut self) {
        match config::convert(&self.waveform, self.params, self.smooth_points) {
            Ok(conversion) => self.conversion = Some(conversion),
            Err(e) => {
                log::error!("conversion failed: {e}");
                self.conversion = None;
                self.log(&format!("Conversion failed: {e}"));
            }
        }
    }

    fn export_png(&mut self) {
        let Some(conversion) = &self.conversion else {
            self.log("Nothing to export.");
            return;
        };
        let style = PlotStyle::with_size(self.export_size.0, self.export_size.1);
        let result = render_conversion_png(&self.waveform, conversion, &self.toggles, &style)
            .and_then(|png| fs::write(&self.export_path, png).map_err(Into::into));
        match result {
            Ok(()) => {
                log::info!("exported chart to {}", self.export_path);
                let msg = format!("Saved {}", self.export_path);
                self.log(&msg);
            }
            Err(e) => {
                log::error!("export failed: {e}");
                self.log(&format!("Export failed: {e}"));
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.heading("Controls");
        ui.separator();

        let rate = ui.add(
            egui::Slider::new(&mut self.params.sampling_rate_hz, SAMPLING_RATE_RANGE_HZ)
                .step_by(SAMPLING_RATE_STEP_HZ as f64)
                .text("Sampling Rate (Hz)"),
        );
        let bits = ui.add(egui::Slider::new(&mut self.params.bit_depth, BIT_DEPTH_RANGE).text("Bit Depth"));
        if rate.changed() || bits.changed() {
            log::debug!(
                "parameters changed: {} Hz, {} bits",
                self.params.sampling_rate_hz,
                self.params.bit_depth
            );
            self.recompute();
        }

        ui.add_space(8.0);
        for trace in Trace::ALL {
            ui.checkbox(self.toggles.get_mut(trace), trace.toggle_label());
        }

        ui.add_space(12.0);
        ui.separator();
        ui.label("QUANTIZATION");
        if let Some(conv) = &self.conversion {
            let s = &conv.stats;
            egui::Grid::new("stats").num_columns(2).show(ui, |ui| {
                ui.label("Samples");
                ui.monospace(conv.sample_count().to_string());
                ui.end_row();
                ui.label("Levels");
                ui.monospace(conv.levels.len().to_string());
                ui.end_row();
                ui.label("Step");
                ui.monospace(format!("{:.5}", s.step));
                ui.end_row();
                ui.label("Max |error|");
                ui.monospace(format!("{:.5}", s.max_abs_error));
                ui.end_row();
                ui.label("RMS error");
                ui.monospace(format!("{:.5}", s.rms_error));
                ui.end_row();
                ui.label("SQNR");
                ui.monospace(format!("{:.1} dB", s.sqnr_db));
                ui.end_row();
                ui.label("Ideal SQNR");
                ui.monospace(format!("{:.1} dB", s.theoretical_sqnr_db));
                ui.end_row();
            });
        }

        ui.add_space(12.0);
        ui.separator();
        ui.label("EXPORT");
        ui.text_edit_singleline(&mut self.export_path);
        if ui.button("💾 Export PNG").clicked() {
            self.export_png();
        }

        ui.add_space(10.0);
        egui::ScrollArea::vertical()
            .id_source("log")
            .max_height(120.0)
            .show(ui, |ui| {
                for m in &self.log_messages {
                    ui.monospace(m);
                }
            });
    }

    fn chart(&self, ui: &mut egui::Ui) {
        let Some(conv) = &self.conversion else {
            ui.label(RichText::new("No conversion available.").color(Color32::YELLOW));
            return;
        };
        let bits = conv.params.bit_depth;
        Plot::new("conversion_plot")
            .legend(Legend::default())
            .height(500.0)
            .include_y(-1.1)
            .include_y(1.1)
            .x_axis_label("Time (s)")
            .y_axis_label("Amplitude")
            .show(ui, |plot_ui| {
                for trace in Trace::ALL.into_iter().filter(|t| self.toggles.shows(*t)) {
                    let name = trace.legend(bits);
                    match trace {
                        Trace::Original => plot_ui.line(
                            Line::new(PlotPoints::new(self.waveform.points()))
                                .name(name)
                                .color(Color32::LIGHT_GRAY),
                        ),
                        Trace::Sampled => plot_ui.points(
                            Points::new(PlotPoints::new(conv.sampled_points()))
                                .name(name)
                                .radius(3.0)
                                .color(Color32::BLUE),
                        ),
                        Trace::Quantized => {
                            let green = Color32::from_rgb(0, 128, 0);
                            plot_ui.line(
                                Line::new(PlotPoints::new(conv.stair_points()))
                                    .name(&name)
                                    .color(green),
                            );
                            plot_ui.points(
                                Points::new(PlotPoints::new(conv.quantized_points()))
                                    .name(name)
                                    .radius(3.0)
                                    .color(green),
                            );
                        }
                        Trace::Reconstructed => plot_ui.line(
                            Line::new(PlotPoints::new(conv.stair_points()))
                                .name(name)
                                .color(Color32::RED),
                        ),
                        Trace::Smoothed => plot_ui.line(
                            Line::new(PlotPoints::new(conv.smooth_points()))
                                .name(name)
                                .style(LineStyle::dotted_dense())
                                .color(Color32::from_rgb(255, 165, 0)),
                        ),
                    }
                }
            });
    }

    fn code_table(&self, ui: &mut egui::Ui) {
        let Some(conv) = &self.conversion else {
            return;
        };
        egui::CollapsingHeader::new(format!("Binary codes ({} samples)", conv.sample_count()))
            .default_open(false)
            .show(ui, |ui| {
                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    egui::Grid::new("codes").striped(true).num_columns(4).show(ui, |ui| {
                        ui.strong("t (ms)");
                        ui.strong("sampled");
                        ui.strong("quantized");
                        ui.strong("code");
                        ui.end_row();
                        for i in 0..conv.sample_count().min(CODE_TABLE_ROWS) {
                            ui.monospace(format!("{:.4}", conv.sample_times[i] * 1000.0));
                            ui.monospace(format!("{:+.4}", conv.sampled[i]));
                            ui.monospace(format!("{:+.4}", conv.quantized[i]));
                            ui.monospace(conv.binary_codes[i].as_str());
                            ui.end_row();
                        }
                    });
                    if conv.sample_count() > CODE_TABLE_ROWS {
                        ui.label(format!("… {} more", conv.sample_count() - CODE_TABLE_ROWS));
                    }
                });
            });
    }
}

impl eframe::App for AdcVisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls").min_width(280.0).show(ctx, |ui| {
            self.controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Analog to Digital Signal Conversion – Interactive Sample");
            ui.label(
                RichText::new(format!(
                    "{} source points over {:.1} ms",
                    self.waveform.len(),
                    self.waveform.duration() * 1000.0
                ))
                .small(),
            );
            ui.separator();
            ui.label(RichText::new("Signal Digitization Process").strong());
            self.chart(ui);
            ui.add_space(8.0);
            self.code_table(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_computes_on_construction() {
        let app = AdcVisualizerApp::new(Waveform::demo().unwrap(), &Settings::default());
        let conv = app.conversion.as_ref().unwrap();
        assert_eq!(conv.params, ConversionParams::default());
        assert_eq!(conv.sample_count(), 160);
    }

    #[test]
    fn log_is_bounded() {
        let mut app = AdcVisualizerApp::new(Waveform::demo().unwrap(), &Settings::default());
        for i in 0..20 {
            app.log(&format!("line {i}"));
        }
        assert_eq!(app.log_messages.len(), LOG_LIMIT);
        assert_eq!(app.log_messages.last().unwrap(), "> line 19");
    }

    #[test]
    fn recompute_follows_parameter_changes() {
        let mut app = AdcVisualizerApp::new(Waveform::demo().unwrap(), &Settings::default());
        app.params.bit_depth = 2;
        app.params.sampling_rate_hz = 400;
        app.recompute();
        let conv = app.conversion.as_ref().unwrap();
        assert_eq!(conv.levels.len(), 4);
        assert_eq!(conv.sample_count(), 8);
        assert_eq!(conv.stair_x.len(), 15);
    }
}
