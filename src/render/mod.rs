// src/render/mod.rs
// Figure builders: derived series in, PNG bytes out.
pub mod canvas;
pub mod colormap;
pub mod lfp;
pub mod spikes;
pub mod style;
pub use colormap::Colormap;
pub use lfp::{render_lfp_overview_png, render_morphology_lfp_png};
pub use spikes::{render_spike_shapes_png, render_spike_waveforms_png};
pub use style::PlotStyle;
