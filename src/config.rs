use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::derive::{AmplitudeThresholds, PlaneBounds, TimeWindow, TracePlacement};
use crate::error::FigureError;
/// Numeric knobs for every figure, loaded from JSON or left at the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Instant (ms) shown on the LFP map.
    pub t_show: f64,
    /// Allowed distance (ms) between `t_show` and the nearest sample.
    pub t_tolerance: f64,
    /// `(rows, cols)` of the LFP contact mesh; inferred from the contacts when absent.
    pub grid_shape: Option<(usize, usize)>,
    /// Colour limits of the LFP map, in `asinh` units.
    pub contour_limits: (f64, f64),
    /// Resampled points per µm of compartment.
    pub resample_density: f64,
    pub morphology_bounds: PlaneBounds,
    pub marker_area_scale: f64,
    pub amplitude_thresholds: AmplitudeThresholds,
    /// Placement of the amplitude-scaled spike shapes; `value_scale` is taken from the bucket.
    pub spike_placement: TracePlacement,
    /// Placement of the peak-normalized waveforms.
    pub waveform_placement: TracePlacement,
    /// Axis box `(x_min, x_max, z_min, z_max)` of the spike shape panel.
    pub spike_view: (f64, f64, f64, f64),
    /// Time range shown on the detailed soma / extracellular panels.
    pub detail_window: TimeWindow,
    /// Diverging colour limit in standard deviations.
    pub limit_sigma: f64,
}
impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            t_show: 30.0,
            t_tolerance: 1e-6,
            grid_shape: None,
            contour_limits: (-0.00007, 0.00002),
            resample_density: 3.0,
            morphology_bounds: PlaneBounds::symmetric(100.0),
            marker_area_scale: 20.0,
            amplitude_thresholds: AmplitudeThresholds::default(),
            spike_placement: TracePlacement {
                time_scale: 0.6,
                x_offset: 2.0,
                value_scale: 1.0,
            },
            waveform_placement: TracePlacement {
                time_scale: 1.6,
                x_offset: 2.0,
                value_scale: 12.0,
            },
            spike_view: (-61.0, 61.0, -61.0, 61.0),
            detail_window: TimeWindow::new(0.0, 10.0),
            limit_sigma: 3.0,
        }
    }
}
impl FigureConfig {
    pub fn from_json_str(text: &str) -> Result<Self, FigureError> {
        let config: FigureConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FigureError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
    pub fn validate(&self) -> Result<(), FigureError> {
        if !(self.resample_density > 0.0) {
            return Err(FigureError::invalid("resample_density must be positive"));
        }
        if !(self.limit_sigma > 0.0) {
            return Err(FigureError::invalid("limit_sigma must be positive"));
        }
        if !(self.contour_limits.0 < self.contour_limits.1) {
            return Err(FigureError::invalid("contour_limits must be (low, high)"));
        }
        if !(self.spike_view.0 < self.spike_view.1 && self.spike_view.2 < self.spike_view.3) {
            return Err(FigureError::invalid("spike_view must be (x_min, x_max, z_min, z_max)"));
        }
        if !(self.detail_window.low < self.detail_window.high) {
            return Err(FigureError::invalid("detail_window must have low < high"));
        }
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn partial_json_keeps_defaults() {
        let config = FigureConfig::from_json_str(r#"{"t_show": 12.5, "grid_shape": [3, 4]}"#).unwrap();
        assert_eq!(config.t_show, 12.5);
        assert_eq!(config.grid_shape, Some((3, 4)));
        assert_eq!(config.resample_density, 3.0);
        assert_eq!(config.amplitude_thresholds, AmplitudeThresholds::default());
    }
    #[test]
    fn custom_thresholds_are_loaded() {
        let json = r#"{"amplitude_thresholds": [
            {"cutoff": 2.0, "scale": 1.0, "color": "red"},
            {"cutoff": 0.5, "scale": 5.0, "color": "blue"}
        ]}"#;
        let config = FigureConfig::from_json_str(json).unwrap();
        assert_eq!(config.amplitude_thresholds.buckets().len(), 2);
    }
    #[test]
    fn rejects_bad_values() {
        assert!(FigureConfig::from_json_str(r#"{"resample_density": 0}"#).is_err());
        assert!(FigureConfig::from_json_str(r#"{"contour_limits": [1, -1]}"#).is_err());
        assert!(FigureConfig::from_json_str("not json").is_err());
    }
}
