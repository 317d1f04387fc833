use serde::{Deserialize, Serialize};
use crate::error::FigureError;
use crate::model::Point3;
/// How a trace is laid over the morphology plane next to its contact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TracePlacement {
    /// µm of horizontal extent per ms.
    pub time_scale: f64,
    /// Horizontal gap between the contact and the trace start (µm).
    pub x_offset: f64,
    /// µm of vertical extent per unit of the series.
    pub value_scale: f64,
}
impl TracePlacement {
    pub fn with_value_scale(self, value_scale: f64) -> Self {
        Self {
            value_scale,
            ..self
        }
    }
}
/// `x = t * time_scale + contact.x + x_offset`, `y = v * value_scale + contact.z`.
pub fn place_trace<'a>(
    time: &[f64],
    series: impl IntoIterator<Item = &'a f64>,
    contact: &Point3,
    placement: &TracePlacement,
) -> Result<Vec<(f64, f64)>, FigureError> {
    let placed: Vec<(f64, f64)> = time
        .iter()
        .zip(series)
        .map(|(t, v)| {
            (
                t * placement.time_scale + contact.x + placement.x_offset,
                v * placement.value_scale + contact.z,
            )
        })
        .collect();
    FigureError::check_len(time.len(), placed.len())?;
    Ok(placed)
}
