// src/main.rs
use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use clap::Parser;
use lfp_figures::render::{
    render_lfp_overview_png, render_morphology_lfp_png, render_spike_shapes_png,
    render_spike_waveforms_png,
};
use lfp_figures::{FigureConfig, FigureError, PlotStyle, SimulationRecord};
use log::{info, warn};
type Renderer = fn(&SimulationRecord, &FigureConfig, &PlotStyle) -> Result<Vec<u8>, FigureError>;
const FIGURES: [(&str, Renderer); 4] = [
    ("morphology_lfp.png", render_morphology_lfp_png),
    ("spike_shapes.png", render_spike_shapes_png),
    ("lfp_overview.png", render_lfp_overview_png),
    ("spike_waveforms.png", render_spike_waveforms_png),
];
#[derive(Parser, Debug)]
#[command(name = "lfp-figures", version, about = "Render LFP example figures from a simulation record")]
struct Args {
    /// Simulation record (JSON)
    record: PathBuf,
    /// Directory the PNG files are written to
    #[arg(default_value = ".")]
    out_dir: PathBuf,
    /// Figure configuration (JSON); defaults are used when omitted
    config: Option<PathBuf>,
}
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => FigureConfig::from_json_file(path)
            .with_context(|| format!("loading figure config {}", path.display()))?,
        None => FigureConfig::default(),
    };
    let record = SimulationRecord::from_json_file(&args.record)
        .with_context(|| format!("loading simulation record {}", args.record.display()))?;
    let out_dir = args.out_dir;
    info!(
        "loaded {} compartments, {} contacts, {} samples",
        record.cell.morphology.len(),
        record.electrode.contacts().len(),
        record.cell.time.len()
    );
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let style = PlotStyle::default();
    let mut written = 0;
    for (name, render) in FIGURES {
        match render(&record, &config, &style) {
            Ok(png) => {
                write_figure(&out_dir.join(name), &png)?;
                written += 1;
            }
            // contacts off a regular mesh only rule out the LFP map
            Err(err) => warn!("skipping {name}: {err}"),
        }
    }
    if written == 0 {
        bail!("no figure could be rendered");
    }
    Ok(())
}
fn write_figure(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
    info!("💾 saved {}", path.display());
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn positional_arguments_with_defaults() {
        let args = Args::try_parse_from(["lfp-figures", "record.json"]).unwrap();
        assert_eq!(args.record, PathBuf::from("record.json"));
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(args.config.is_none());
        let args = Args::try_parse_from(["lfp-figures", "r.json", "out", "cfg.json"]).unwrap();
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
    }
    #[test]
    fn record_is_required() {
        assert!(Args::try_parse_from(["lfp-figures"]).is_err());
    }
}
