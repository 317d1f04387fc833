use ndarray::Array2;
/// Row-major flat index of the global minimum, first occurrence on ties.
pub fn find_extremum_index(series: &Array2<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (flat, &v) in series.iter().enumerate() {
        match best {
            Some((_, b)) if !(v < b) => {}
            _ => best = Some((flat, v)),
        }
    }
    best.map(|(idx, _)| idx)
}
/// `(row, col)` of a row-major flat index for a matrix with `ncols` columns.
pub fn unravel_index(flat: usize, ncols: usize) -> (usize, usize) {
    if ncols == 0 {
        return (0, 0);
    }
    (flat / ncols, flat % ncols)
}
/// Channel holding the global minimum, the trace shown in detail.
pub fn extremum_channel(series: &Array2<f64>) -> Option<usize> {
    find_extremum_index(series).map(|flat| unravel_index(flat, series.ncols()).0)
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use rand::Rng;
    #[test]
    fn scenario_row_minimum() {
        let row = array![[5.0, 3.0, 1.0, -2.0, -8.0, -1.0, 2.0, 4.0, 6.0, 3.0, 0.0]];
        assert_eq!(find_extremum_index(&row), Some(4));
        assert_eq!(extremum_channel(&row), Some(0));
    }
    #[test]
    fn index_is_row_major_and_first_on_ties() {
        let m = array![[0.0, 1.0, 2.0], [3.0, -4.0, -4.0]];
        assert_eq!(find_extremum_index(&m), Some(4));
        assert_eq!(unravel_index(4, 3), (1, 1));
        assert_eq!(extremum_channel(&m), Some(1));
        assert_eq!(find_extremum_index(&Array2::<f64>::zeros((0, 3))), None);
    }
    #[test]
    fn matches_brute_force_scan() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let rows = rng.gen_range(1..6);
            let cols = rng.gen_range(1..40);
            let m = Array2::from_shape_fn((rows, cols), |_| rng.gen_range(-1.0..1.0));
            let idx = find_extremum_index(&m).unwrap();
            let min = m.iter().copied().fold(f64::INFINITY, f64::min);
            let (r, c) = unravel_index(idx, cols);
            assert_eq!(m[[r, c]], min);
        }
    }
}
