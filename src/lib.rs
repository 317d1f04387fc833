//! Figures for compartmental neuron simulations: morphology, LFP maps and
//! extracellular spike waveforms.
//!
//! [`derive`] holds the pure array transformations (resampling, peak
//! normalization, windowing, amplitude bucketing, extremum search) and
//! [`render`] turns their output into PNG figures with `plotters`.
pub mod config;
pub mod derive;
pub mod error;
pub mod model;
pub mod render;
pub use config::FigureConfig;
pub use error::FigureError;
pub use model::{
    CellRecord, Compartment, ElectrodeRecording, Morphology, Point3, RecordingSource,
    SimulationRecord, Synapse, TimeSeries,
};
pub use render::PlotStyle;
