use serde::{Deserialize, Serialize};
use crate::error::FigureError;
/// Display emphasis for traces whose peak magnitude reaches `cutoff`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeBucket {
    /// Lower bound (mV), inclusive.
    pub cutoff: f64,
    /// Vertical scale applied to the trace before plotting.
    pub scale: f64,
    /// Colour tag resolved by the plot style.
    pub color: String,
    /// Potential (mV) drawn as this bucket's scale bar, if any.
    #[serde(default)]
    pub legend_mv: Option<f64>,
}
impl AmplitudeBucket {
    pub fn new(cutoff: f64, scale: f64, color: impl Into<String>) -> Self {
        Self {
            cutoff,
            scale,
            color: color.into(),
            legend_mv: None,
        }
    }
    pub fn with_legend(mut self, mv: f64) -> Self {
        self.legend_mv = Some(mv);
        self
    }
    /// On-screen length of the scale bar once the trace scale is applied.
    pub fn legend_length(&self) -> Option<f64> {
        self.legend_mv.map(|mv| mv * self.scale)
    }
}
/// Buckets ordered from the largest cutoff to the smallest.
///
/// The last bucket doubles as the fallback for anything below every cutoff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AmplitudeBucket>", into = "Vec<AmplitudeBucket>")]
pub struct AmplitudeThresholds {
    buckets: Vec<AmplitudeBucket>,
}
impl AmplitudeThresholds {
    pub fn new(buckets: Vec<AmplitudeBucket>) -> Result<Self, FigureError> {
        if buckets.is_empty() {
            return Err(FigureError::invalid("amplitude thresholds need at least one bucket"));
        }
        if buckets.windows(2).any(|w| !(w[0].cutoff > w[1].cutoff)) {
            return Err(FigureError::invalid(
                "amplitude buckets must be ordered by strictly descending cutoff",
            ));
        }
        Ok(Self { buckets })
    }
    pub fn buckets(&self) -> &[AmplitudeBucket] {
        &self.buckets
    }
}
impl Default for AmplitudeThresholds {
    fn default() -> Self {
        // >= 1 mV, >= 0.25 mV, everything smaller.
        Self {
            buckets: vec![
                AmplitudeBucket::new(1.0, 2.0, "red").with_legend(5.0),
                AmplitudeBucket::new(0.25, 10.0, "green").with_legend(1.0),
                AmplitudeBucket::new(0.0, 50.0, "blue").with_legend(0.1),
            ],
        }
    }
}
impl TryFrom<Vec<AmplitudeBucket>> for AmplitudeThresholds {
    type Error = FigureError;
    fn try_from(value: Vec<AmplitudeBucket>) -> Result<Self, Self::Error> {
        AmplitudeThresholds::new(value)
    }
}
impl From<AmplitudeThresholds> for Vec<AmplitudeBucket> {
    fn from(value: AmplitudeThresholds) -> Self {
        value.buckets
    }
}
/// First bucket whose cutoff `peak_magnitude` reaches, else the smallest bucket.
pub fn classify_amplitude(peak_magnitude: f64, thresholds: &AmplitudeThresholds) -> &AmplitudeBucket {
    let buckets = thresholds.buckets();
    buckets
        .iter()
        .find(|bucket| peak_magnitude >= bucket.cutoff)
        .unwrap_or(&buckets[buckets.len() - 1])
}
