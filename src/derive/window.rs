use crate::error::FigureError;
/// Inclusive time interval `[low, high]` (ms).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    pub low: f64,
    pub high: f64,
}
impl TimeWindow {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
    pub fn contains(&self, t: f64) -> bool {
        self.low <= t && t <= self.high
    }
}
pub fn window_mask(time: &[f64], low: f64, high: f64) -> Vec<bool> {
    let window = TimeWindow::new(low, high);
    time.iter().map(|&t| window.contains(t)).collect()
}
/// Samples of `series` whose time lies in `[low, high]`, in original order.
///
/// An empty result is valid and just means nothing falls in the window.
pub fn select_window(
    time: &[f64],
    series: &[f64],
    low: f64,
    high: f64,
) -> Result<Vec<f64>, FigureError> {
    FigureError::check_len(time.len(), series.len())?;
    let window = TimeWindow::new(low, high);
    Ok(time
        .iter()
        .zip(series)
        .filter(|(t, _)| window.contains(**t))
        .map(|(_, v)| *v)
        .collect())
}
/// Like [`select_window`] but keeps the time stamps, ready for plotting.
pub fn select_window_points(
    time: &[f64],
    series: &[f64],
    window: TimeWindow,
) -> Result<Vec<(f64, f64)>, FigureError> {
    FigureError::check_len(time.len(), series.len())?;
    Ok(time
        .iter()
        .copied()
        .zip(series.iter().copied())
        .filter(|(t, _)| window.contains(*t))
        .collect())
}
fn time_of<F: Fn(f64, f64) -> bool>(time: &[f64], series: &[f64], better: F) -> Option<f64> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in series.iter().enumerate().take(time.len()) {
        match best {
            Some((_, b)) if !better(v, b) => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| time[idx])
}
/// First time at which `series` reaches its minimum.
pub fn time_of_min(time: &[f64], series: &[f64]) -> Option<f64> {
    time_of(time, series, |v, best| v < best)
}
/// First time at which `series` reaches its maximum.
pub fn time_of_max(time: &[f64], series: &[f64]) -> Option<f64> {
    time_of(time, series, |v, best| v > best)
}
/// Index of the sample closest to `t`, when no further away than `tolerance`.
pub fn time_index(time: &[f64], t: f64, tolerance: f64) -> Option<usize> {
    let idx = time
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - t).abs().total_cmp(&(b.1 - t).abs()))
        .map(|(idx, _)| idx)?;
    ((time[idx] - t).abs() <= tolerance).then_some(idx)
}
