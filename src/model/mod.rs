// src/model/mod.rs
// Read-only simulation outputs consumed by the derivation and rendering layers.
pub mod morphology;
pub mod recording;
pub mod source;
pub use morphology::{Compartment, Morphology, Point3};
pub use recording::{
    validate_time_vector, CellRecord, ElectrodeRecording, SimulationRecord, Synapse, TimeSeries,
};
pub use source::RecordingSource;
