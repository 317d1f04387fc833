use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use crate::error::FigureError;
use crate::model::morphology::{Morphology, Point3};
/// Checks that a time vector is non-negative and strictly increasing.
pub fn validate_time_vector(time: &[f64]) -> Result<(), FigureError> {
    if let Some(first) = time.first() {
        if !(*first >= 0.0) {
            return Err(FigureError::invalid(format!(
                "time vector starts at {first}, expected a non-negative value"
            )));
        }
    }
    if let Some(idx) = time.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(FigureError::invalid(format!(
            "time vector is not strictly increasing at index {}",
            idx + 1
        )));
    }
    Ok(())
}
/// A scalar series sampled on a time vector.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    time: Vec<f64>,
    values: Vec<f64>,
}
impl TimeSeries {
    pub fn new(time: Vec<f64>, values: Vec<f64>) -> Result<Self, FigureError> {
        validate_time_vector(&time)?;
        FigureError::check_len(time.len(), values.len())?;
        Ok(Self { time, values })
    }
    pub fn time(&self) -> &[f64] {
        &self.time
    }
    pub fn values(&self) -> &[f64] {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Synapse {
    /// Index of the compartment the synapse sits on.
    pub compartment: usize,
    pub position: Point3,
    /// Reversal potential `e` (mV).
    pub reversal_potential: f64,
    /// Synaptic current (nA) on the cell's time vector.
    pub current: Vec<f64>,
}
impl Synapse {
    pub fn is_excitatory(&self, v_init: f64) -> bool {
        self.reversal_potential > v_init
    }
}
/// Output of one simulated cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCellRecord")]
pub struct CellRecord {
    pub time: Vec<f64>,
    pub morphology: Morphology,
    pub soma_potential: Vec<f64>,
    pub synapses: Vec<Synapse>,
    pub v_init: f64,
}
#[derive(Deserialize)]
struct RawCellRecord {
    time: Vec<f64>,
    morphology: Morphology,
    soma_potential: Vec<f64>,
    #[serde(default)]
    synapses: Vec<Synapse>,
    #[serde(default = "default_v_init")]
    v_init: f64,
}
fn default_v_init() -> f64 {
    -65.0
}
impl TryFrom<RawCellRecord> for CellRecord {
    type Error = FigureError;
    fn try_from(raw: RawCellRecord) -> Result<Self, Self::Error> {
        CellRecord::new(
            raw.time,
            raw.morphology,
            raw.soma_potential,
            raw.synapses,
            raw.v_init,
        )
    }
}
impl CellRecord {
    pub fn new(
        time: Vec<f64>,
        morphology: Morphology,
        soma_potential: Vec<f64>,
        synapses: Vec<Synapse>,
        v_init: f64,
    ) -> Result<Self, FigureError> {
        validate_time_vector(&time)?;
        FigureError::check_len(time.len(), soma_potential.len())?;
        for syn in &synapses {
            FigureError::check_len(time.len(), syn.current.len())?;
            if syn.compartment >= morphology.len() {
                return Err(FigureError::invalid(format!(
                    "synapse refers to compartment {} but the morphology has {}",
                    syn.compartment,
                    morphology.len()
                )));
            }
        }
        Ok(Self {
            time,
            morphology,
            soma_potential,
            synapses,
            v_init,
        })
    }
    pub fn soma_trace(&self) -> TimeSeries {
        TimeSeries {
            time: self.time.clone(),
            values: self.soma_potential.clone(),
        }
    }
}
/// Extracellular potentials at fixed contact points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElectrode", into = "RawElectrode")]
pub struct ElectrodeRecording {
    contacts: Vec<Point3>,
    time: Vec<f64>,
    data: Array2<f64>, // contacts x samples
}
#[derive(Serialize, Deserialize)]
struct RawElectrode {
    contacts: Vec<Point3>,
    time: Vec<f64>,
    data: Vec<Vec<f64>>,
}
impl TryFrom<RawElectrode> for ElectrodeRecording {
    type Error = FigureError;
    fn try_from(raw: RawElectrode) -> Result<Self, Self::Error> {
        let samples = raw.time.len();
        FigureError::check_len(raw.contacts.len(), raw.data.len())?;
        let mut flat = Vec::with_capacity(raw.contacts.len() * samples);
        for row in &raw.data {
            FigureError::check_len(samples, row.len())?;
            flat.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((raw.contacts.len(), samples), flat)
            .map_err(|e| FigureError::invalid(e.to_string()))?;
        ElectrodeRecording::new(raw.contacts, raw.time, data)
    }
}
impl From<ElectrodeRecording> for RawElectrode {
    fn from(value: ElectrodeRecording) -> Self {
        RawElectrode {
            data: value.data.outer_iter().map(|row| row.to_vec()).collect(),
            contacts: value.contacts,
            time: value.time,
        }
    }
}
impl ElectrodeRecording {
    pub fn new(
        contacts: Vec<Point3>,
        time: Vec<f64>,
        data: Array2<f64>,
    ) -> Result<Self, FigureError> {
        validate_time_vector(&time)?;
        FigureError::check_len(contacts.len(), data.nrows())?;
        FigureError::check_len(time.len(), data.ncols())?;
        Ok(Self {
            contacts,
            time,
            data,
        })
    }
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
    pub fn contacts(&self) -> &[Point3] {
        &self.contacts
    }
    pub fn time(&self) -> &[f64] {
        &self.time
    }
    pub fn channel(&self, idx: usize) -> Option<ArrayView1<'_, f64>> {
        (idx < self.data.nrows()).then(|| self.data.row(idx))
    }
}
/// Everything one figure run needs.
///
/// The cell and the electrode share one time vector, sample for sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationRecord")]
pub struct SimulationRecord {
    pub cell: CellRecord,
    pub electrode: ElectrodeRecording,
}
#[derive(Deserialize)]
struct RawSimulationRecord {
    cell: CellRecord,
    electrode: ElectrodeRecording,
}
impl TryFrom<RawSimulationRecord> for SimulationRecord {
    type Error = FigureError;
    fn try_from(raw: RawSimulationRecord) -> Result<Self, Self::Error> {
        SimulationRecord::new(raw.cell, raw.electrode)
    }
}
impl SimulationRecord {
    pub fn new(cell: CellRecord, electrode: ElectrodeRecording) -> Result<Self, FigureError> {
        FigureError::check_len(cell.time.len(), electrode.time.len())?;
        if let Some(idx) = cell
            .time
            .iter()
            .zip(&electrode.time)
            .position(|(a, b)| a != b)
        {
            return Err(FigureError::invalid(format!(
                "cell and electrode time vectors differ at sample {idx} ({} vs {} ms)",
                cell.time[idx], electrode.time[idx]
            )));
        }
        Ok(Self { cell, electrode })
    }
    pub fn from_json_str(text: &str) -> Result<Self, FigureError> {
        Ok(serde_json::from_str(text)?)
    }
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, FigureError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
