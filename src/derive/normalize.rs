use ndarray::{Array1, Array2, ArrayView1, Axis};
use crate::error::FigureError;
fn row_min(row: ArrayView1<'_, f64>) -> f64 {
    row.iter().copied().fold(f64::INFINITY, f64::min)
}
/// Scales every channel so that its most negative sample becomes -1.
///
/// Each row is mapped to `-x / min(row)`. A row whose minimum is exactly zero
/// has no extremum to normalize against and is rejected; callers are expected
/// to drop such channels beforehand.
pub fn normalize_by_peak(series: &Array2<f64>) -> Result<Array2<f64>, FigureError> {
    let mut out = series.clone();
    for (channel, mut row) in out.axis_iter_mut(Axis(0)).enumerate() {
        let min = row_min(row.view());
        if min == 0.0 {
            return Err(FigureError::DegenerateNormalization { channel });
        }
        row.mapv_inplace(|v| -v / min);
    }
    Ok(out)
}
/// `max |x|` of one channel, 0 for an empty slice.
pub fn peak_magnitude(row: ArrayView1<'_, f64>) -> f64 {
    row.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
}
/// Per-channel `max |x|`.
pub fn peak_magnitudes(series: &Array2<f64>) -> Array1<f64> {
    series.map_axis(Axis(1), peak_magnitude)
}
/// `log10(-min)` per channel, the colour value for spike amplitude maps.
pub fn log_peak_amplitude(series: &Array2<f64>) -> Result<Array1<f64>, FigureError> {
    let mut out = Array1::zeros(series.nrows());
    for (channel, row) in series.outer_iter().enumerate() {
        let min = row_min(row);
        if !(min < 0.0) {
            return Err(FigureError::DegenerateNormalization { channel });
        }
        out[channel] = (-min).log10();
    }
    Ok(out)
}
/// Channels whose minimum is strictly negative, i.e. safe to normalize.
pub fn channels_with_trough(series: &Array2<f64>) -> Vec<usize> {
    series
        .outer_iter()
        .enumerate()
        .filter(|(_, row)| row_min(row.view()) < 0.0)
        .map(|(idx, _)| idx)
        .collect()
}
pub fn arcsinh_scale(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.asinh()).collect()
}
/// `k` population standard deviations of all samples, a symmetric colour limit.
pub fn symmetric_limit(series: &Array2<f64>, k: f64) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.std(0.0) * k
}
