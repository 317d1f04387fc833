use ndarray::{Array2, ArrayView1, Axis};
use crate::derive::normalize::arcsinh_scale;
use crate::derive::window::time_index;
use crate::error::FigureError;
use crate::model::source::channel_checked;
use crate::model::{Point3, RecordingSource};
/// Contacts laid out on a regular x/z mesh with the potential at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct LfpGrid {
    pub x: Array2<f64>,
    pub z: Array2<f64>,
    /// `asinh` of the potential, which keeps both the near-field and far-field visible.
    pub values: Array2<f64>,
}
impl LfpGrid {
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
    }
}
/// `(rows, cols)` of a contact mesh: one column per distinct x, one row per distinct z.
///
/// Returns `None` when the contacts do not fill such a mesh.
pub fn infer_grid_shape(coords: &[Point3]) -> Option<(usize, usize)> {
    let distinct = |mut values: Vec<f64>| {
        values.sort_by(f64::total_cmp);
        values.dedup();
        values.len()
    };
    let cols = distinct(coords.iter().map(|p| p.x).collect());
    let rows = distinct(coords.iter().map(|p| p.z).collect());
    (rows * cols == coords.len() && !coords.is_empty()).then_some((rows, cols))
}
/// Samples every channel at `t` and reshapes the result to `shape` (rows, cols).
pub fn lfp_grid(
    source: &impl RecordingSource,
    shape: (usize, usize),
    t: f64,
    tolerance: f64,
) -> Result<LfpGrid, FigureError> {
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 {
        return Err(FigureError::invalid(format!("empty grid shape {rows}x{cols}")));
    }
    FigureError::check_len(rows * cols, source.channel_count())?;
    FigureError::check_len(source.channel_count(), source.coordinates().len())?;
    let tidx = time_index(source.time_vector(), t, tolerance).ok_or_else(|| {
        FigureError::invalid(format!("time {t} ms is not on the recording's time vector"))
    })?;
    let mut snapshot = Vec::with_capacity(source.channel_count());
    for ch in 0..source.channel_count() {
        snapshot.push(channel_checked(source, ch)?[tidx]);
    }
    let coords = source.coordinates();
    let reshape = |flat: Vec<f64>| {
        Array2::from_shape_vec(shape, flat).map_err(|e| FigureError::invalid(e.to_string()))
    };
    let x = reshape(coords.iter().map(|p| p.x).collect())?;
    let z = reshape(coords.iter().map(|p| p.z).collect())?;
    // contacts must be stored row by row: x varies across a row, z down a column
    if !x.columns().into_iter().all(is_constant) || !z.rows().into_iter().all(is_constant) {
        return Err(FigureError::invalid(
            "electrode contacts are not stored row-major (x across columns, z across rows)",
        ));
    }
    Ok(LfpGrid {
        x,
        z,
        values: reshape(arcsinh_scale(&snapshot))?,
    })
}
fn is_constant(lane: ArrayView1<'_, f64>) -> bool {
    let mut values = lane.iter();
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}
/// Channels averaged per distinct contact depth.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthProfile {
    /// Distinct contact depths (z), ascending.
    pub depths: Vec<f64>,
    /// `depths x samples`; row `i` is the mean of every channel at `depths[i]`.
    pub values: Array2<f64>,
}
/// Collapses contacts that share a depth so every image row has a non-zero height.
///
/// A linear probe comes out unchanged apart from the ordering.
pub fn depth_profile(source: &impl RecordingSource) -> Result<DepthProfile, FigureError> {
    let data = source.series_matrix()?;
    let coords = source.coordinates();
    FigureError::check_len(data.nrows(), coords.len())?;
    let mut depths: Vec<f64> = coords.iter().map(|p| p.z).filter(|z| z.is_finite()).collect();
    depths.sort_by(f64::total_cmp);
    depths.dedup();
    let mut values = Array2::zeros((depths.len(), data.ncols()));
    for (row, &depth) in depths.iter().enumerate() {
        let members: Vec<usize> = coords
            .iter()
            .enumerate()
            .filter(|(_, p)| p.z == depth)
            .map(|(idx, _)| idx)
            .collect();
        if let Some(mean) = data.select(Axis(0), &members).mean_axis(Axis(0)) {
            values.row_mut(row).assign(&mean);
        }
    }
    Ok(DepthProfile { depths, values })
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::source::fixtures::VecSource;
    use crate::model::ElectrodeRecording;
    use ndarray::array;
    fn mesh() -> ElectrodeRecording {
        let contacts = vec![
            Point3::new(-10.0, 0.0, -10.0),
            Point3::new(10.0, 0.0, -10.0),
            Point3::new(-10.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
        ];
        ElectrodeRecording::new(
            contacts,
            vec![0.0, 1.0],
            array![[0.0, 1.0], [0.0, -1.0], [0.0, 0.5], [0.0, 0.0]],
        )
        .unwrap()
    }
    #[test]
    fn reshapes_snapshot_onto_mesh() {
        let grid = lfp_grid(&mesh(), (2, 2), 1.0, 1e-9).unwrap();
        assert_eq!(grid.shape(), (2, 2));
        assert_eq!(grid.x, array![[-10.0, 10.0], [-10.0, 10.0]]);
        assert_eq!(grid.z[[1, 0]], 10.0);
        assert!((grid.values[[0, 0]] - 1.0f64.asinh()).abs() < 1e-12);
        let (lo, hi) = grid.value_range();
        assert!((lo + 1.0f64.asinh()).abs() < 1e-12);
        assert!((hi - 1.0f64.asinh()).abs() < 1e-12);
    }
    #[test]
    fn infers_mesh_shape() {
        assert_eq!(infer_grid_shape(mesh().contacts()), Some((2, 2)));
        let ragged = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 1.0)];
        assert_eq!(infer_grid_shape(&ragged), None);
        assert_eq!(infer_grid_shape(&[]), None);
    }
    #[test]
    fn wrong_shape_or_time_fails() {
        let err = lfp_grid(&mesh(), (3, 2), 1.0, 1e-9).unwrap_err();
        assert!(matches!(err, FigureError::InvalidDimension { .. }));
        let err = lfp_grid(&mesh(), (2, 2), 30.0, 1e-9).unwrap_err();
        assert!(matches!(err, FigureError::InvalidParameter(_)));
    }
    #[test]
    fn column_major_contacts_are_rejected() {
        let mut contacts = Vec::new();
        for x in [-10.0, 10.0] {
            for z in [-10.0, 0.0, 10.0] {
                contacts.push(Point3::new(x, 0.0, z));
            }
        }
        let shape = infer_grid_shape(&contacts).unwrap();
        assert_eq!(shape, (3, 2));
        let data = Array2::zeros((contacts.len(), 2));
        let electrode = ElectrodeRecording::new(contacts, vec![0.0, 1.0], data).unwrap();
        let err = lfp_grid(&electrode, shape, 1.0, 1e-9).unwrap_err();
        assert!(matches!(err, FigureError::InvalidParameter(_)));
    }
    #[test]
    fn short_channel_is_an_error_not_a_panic() {
        let source = VecSource {
            time: vec![0.0, 1.0, 2.0],
            channels: vec![vec![1.0]],
            coords: vec![Point3::default()],
        };
        let err = lfp_grid(&source, (1, 1), 2.0, 1e-9).unwrap_err();
        assert!(matches!(
            err,
            FigureError::InvalidDimension {
                expected: 3,
                actual: 1
            }
        ));
    }
    #[test]
    fn depth_profile_averages_shared_depths() {
        let profile = depth_profile(&mesh()).unwrap();
        assert_eq!(profile.depths, vec![-10.0, 10.0]);
        assert_eq!(profile.values, array![[0.0, 0.0], [0.0, 0.25]]);
        let probe = ElectrodeRecording::new(
            vec![Point3::new(0.0, 0.0, 20.0), Point3::new(0.0, 0.0, -20.0)],
            vec![0.0, 1.0],
            array![[1.0, 2.0], [3.0, 4.0]],
        )
        .unwrap();
        let profile = depth_profile(&probe).unwrap();
        assert_eq!(profile.depths, vec![-20.0, 20.0]);
        assert_eq!(profile.values, array![[3.0, 4.0], [1.0, 2.0]]);
    }
}
