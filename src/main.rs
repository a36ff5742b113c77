// src/main.rs
mod config;
mod conversion;
mod gui;
mod types;
use std::env;
use std::fs;
use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use eframe::egui;
use config::Settings;
use conversion::{render_conversion_png, PlotStyle, Waveform};
// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    csv: Option<PathBuf>,
    config: Option<PathBuf>,
    rate: Option<u32>,
    bits: Option<u32>,
    export: Option<PathBuf>,
    demo: bool,
    help: bool,
}
fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--csv" => {
                i += 1;
                cli.csv = Some(args.get(i).ok_or_else(|| anyhow!("missing csv path"))?.into());
            }
            "--config" => {
                i += 1;
                cli.config = Some(args.get(i).ok_or_else(|| anyhow!("missing config path"))?.into());
            }
            "--rate" => {
                i += 1;
                cli.rate = Some(
                    args.get(i)
                        .ok_or_else(|| anyhow!("missing sampling rate"))?
                        .parse::<u32>()?,
                );
            }
            "--bits" => {
                i += 1;
                cli.bits = Some(
                    args.get(i)
                        .ok_or_else(|| anyhow!("missing bit depth"))?
                        .parse::<u32>()?,
                );
            }
            "--export" => {
                i += 1;
                cli.export = Some(args.get(i).ok_or_else(|| anyhow!("missing export path"))?.into());
            }
            "--demo" => cli.demo = true,
            "-h" | "--help" => cli.help = true,
            other => return Err(anyhow!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(cli)
}
fn print_usage() {
    println!("adc-visualizer [options]");
    println!("  --csv PATH      waveform CSV with `time` and `amplitude` columns");
    println!("  --config PATH   JSON settings file");
    println!("  --rate HZ       sampling rate (400..=44100)");
    println!("  --bits N        bit depth (2..=8)");
    println!("  --export PNG    render the chart to a PNG and exit");
    println!("  --demo          use a built-in two-tone signal instead of a CSV");
}
fn resolve_settings(cli: &CliArgs) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(csv) = &cli.csv {
        settings.csv_path = csv.clone();
    }
    if let Some(rate) = cli.rate {
        settings.sampling_rate_hz = rate;
    }
    if let Some(bits) = cli.bits {
        settings.bit_depth = bits;
    }
    settings.validate()?;
    Ok(settings)
}
fn load_waveform(cli: &CliArgs, settings: &Settings) -> Result<Waveform> {
    let waveform = if cli.demo {
        Waveform::demo()?
    } else {
        Waveform::from_csv_path(&settings.csv_path)
            .with_context(|| format!("loading waveform from {}", settings.csv_path.display()))?
    };
    log::info!(
        "loaded {} points spanning {:.3} ms",
        waveform.len(),
        waveform.duration() * 1000.0
    );
    Ok(waveform)
}
// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }
    let settings = resolve_settings(&cli)?;
    let waveform = load_waveform(&cli, &settings)?;
    // 无界面导出模式
    if let Some(out) = &cli.export {
        let conversion = settings.convert(&waveform)?;
        let style = PlotStyle::with_size(settings.export_width, settings.export_height);
        let png = render_conversion_png(&waveform, &conversion, &settings.display, &style)?;
        fs::write(out, png).with_context(|| format!("writing {}", out.display()))?;
        log::info!("exported chart to {}", out.display());
        return Ok(());
    }
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1400.0, 820.0])
        .with_min_inner_size([1000.0, 640.0])
        .with_title("Analog to Digital Signal Conversion");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "adc-visualizer",
        options,
        Box::new(move |_cc| Box::new(gui::AdcVisualizerApp::new(waveform, &settings))),
    )
    .map_err(|e| anyhow!("failed to start GUI: {e}"))
}
#[cfg(test)]
mod tests {
    use super::*;
    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("adc-visualizer")
            .chain(items.iter().copied())
            .map(String::from)
            .collect()
    }
    #[test]
    fn parses_all_flags() {
        let cli = parse_args(&argv(&[
            "--csv", "a.csv", "--rate", "16000", "--bits", "4", "--export", "out.png", "--demo",
        ]))
        .unwrap();
        assert_eq!(cli.csv, Some(PathBuf::from("a.csv")));
        assert_eq!(cli.rate, Some(16000));
        assert_eq!(cli.bits, Some(4));
        assert_eq!(cli.export, Some(PathBuf::from("out.png")));
        assert!(cli.demo);
        assert!(!cli.help);
    }
    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        assert!(parse_args(&argv(&["--frobnicate"])).is_err());
        assert!(parse_args(&argv(&["--rate"])).is_err());
        assert!(parse_args(&argv(&["--bits", "many"])).is_err());
    }
    #[test]
    fn cli_overrides_defaults_and_is_validated() {
        let cli = parse_args(&argv(&["--rate", "22000", "--bits", "3"])).unwrap();
        let settings = resolve_settings(&cli).unwrap();
        assert_eq!(settings.sampling_rate_hz, 22000);
        assert_eq!(settings.bit_depth, 3);
        let bad = parse_args(&argv(&["--bits", "1"])).unwrap();
        assert!(resolve_settings(&bad).is_err());
    }
}
