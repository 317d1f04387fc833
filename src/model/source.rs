use ndarray::{Array2, ArrayView1};
use crate::error::FigureError;
use crate::model::morphology::Point3;
use crate::model::recording::ElectrodeRecording;
/// Anything that exposes per-channel series on a shared time vector at fixed coordinates.
///
/// Every channel is expected to hold one sample per entry of `time_vector`; consumers
/// check this and report `InvalidDimension` instead of trusting the implementor.
pub trait RecordingSource {
    fn time_vector(&self) -> &[f64];
    fn channel_count(&self) -> usize;
    fn channel_series(&self, channel: usize) -> Option<ArrayView1<'_, f64>>;
    fn coordinates(&self) -> &[Point3];
    /// Channels stacked into a `channels x samples` matrix.
    fn series_matrix(&self) -> Result<Array2<f64>, FigureError> {
        let samples = self.time_vector().len();
        let mut matrix = Array2::zeros((self.channel_count(), samples));
        for (idx, mut row) in matrix.outer_iter_mut().enumerate() {
            let series = channel_checked(self, idx)?;
            row.assign(&series);
        }
        Ok(matrix)
    }
}
/// Series of `channel`, rejected when it is missing or off the time vector.
pub(crate) fn channel_checked<S: RecordingSource + ?Sized>(
    source: &S,
    channel: usize,
) -> Result<ArrayView1<'_, f64>, FigureError> {
    let series = source
        .channel_series(channel)
        .ok_or_else(|| FigureError::invalid(format!("channel {channel} has no series")))?;
    FigureError::check_len(source.time_vector().len(), series.len())?;
    Ok(series)
}
impl RecordingSource for ElectrodeRecording {
    fn time_vector(&self) -> &[f64] {
        self.time()
    }
    fn channel_count(&self) -> usize {
        self.data().nrows()
    }
    fn channel_series(&self, channel: usize) -> Option<ArrayView1<'_, f64>> {
        self.channel(channel)
    }
    fn coordinates(&self) -> &[Point3] {
        self.contacts()
    }
    fn series_matrix(&self) -> Result<Array2<f64>, FigureError> {
        Ok(self.data().clone())
    }
}
#[cfg(test)]
mod tests {
    use super::fixtures::VecSource;
    use super::*;
    use ndarray::array;
    #[test]
    fn default_matrix_matches_electrode_data() {
        let source = VecSource {
            time: vec![0.0, 1.0, 2.0],
            channels: vec![vec![1.0, 2.0, 3.0], vec![-1.0, -2.0, -3.0]],
            coords: vec![Point3::default(); 2],
        };
        let electrode = ElectrodeRecording::new(
            source.coords.clone(),
            source.time.clone(),
            array![[1.0, 2.0, 3.0], [-1.0, -2.0, -3.0]],
        )
        .unwrap();
        assert_eq!(source.series_matrix().unwrap(), electrode.series_matrix().unwrap());
        assert_eq!(electrode.channel_count(), 2);
    }
    #[test]
    fn short_channel_is_not_broadcast() {
        let source = VecSource {
            time: vec![0.0, 1.0, 2.0],
            channels: vec![vec![7.0]],
            coords: vec![Point3::default()],
        };
        let err = source.series_matrix().unwrap_err();
        assert!(matches!(
            err,
            FigureError::InvalidDimension {
                expected: 3,
                actual: 1
            }
        ));
    }
    #[test]
    fn missing_channel_is_reported() {
        struct Gappy(Vec<f64>, Vec<Point3>);
        impl RecordingSource for Gappy {
            fn time_vector(&self) -> &[f64] {
                &self.0
            }
            fn channel_count(&self) -> usize {
                1
            }
            fn channel_series(&self, _channel: usize) -> Option<ArrayView1<'_, f64>> {
                None
            }
            fn coordinates(&self) -> &[Point3] {
                &self.1
            }
        }
        let source = Gappy(vec![0.0], vec![Point3::default()]);
        assert!(matches!(
            source.series_matrix(),
            Err(FigureError::InvalidParameter(_))
        ));
    }
}
