use log::debug;
use serde::{Deserialize, Serialize};
use crate::error::FigureError;
use crate::model::{Compartment, Morphology, Point3};
/// Open rectangle in the x/z plane; a point is inside when strictly between both edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneBounds {
    pub x: (f64, f64),
    pub z: (f64, f64),
}
impl PlaneBounds {
    pub fn symmetric(half_width: f64) -> Self {
        Self {
            x: (-half_width, half_width),
            z: (-half_width, half_width),
        }
    }
    pub fn contains(&self, p: &Point3) -> bool {
        p.x > self.x.0 && p.x < self.x.1 && p.z > self.z.0 && p.z < self.z.1
    }
}
/// Points sampled along the morphology, each tagged with its compartment diameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MorphologyPointCloud {
    pub points: Vec<Point3>,
    pub diameters: Vec<f64>,
}
impl MorphologyPointCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Scatter marker areas, `diameter² * scale`.
    pub fn marker_areas(&self, scale: f64) -> Vec<f64> {
        self.diameters.iter().map(|d| d * d * scale).collect()
    }
}
/// `round(length * density)` evenly spaced points from `start` to `end`, both included.
///
/// A zero-length segment yields `start` alone.
pub fn resample_segment(
    start: Point3,
    end: Point3,
    density: f64,
) -> Result<Vec<Point3>, FigureError> {
    if !(density > 0.0) || !density.is_finite() {
        return Err(FigureError::invalid(format!(
            "resample density must be positive, got {density}"
        )));
    }
    let length = start.distance(&end);
    if length == 0.0 {
        return Ok(vec![start]);
    }
    let count = (length * density).round() as usize;
    let points = match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| start.lerp(&end, i as f64 / last)).collect()
        }
    };
    Ok(points)
}
/// Point cloud for density-scaled scatter rendering, sorted by depth (`y`).
///
/// The first compartment is the soma and contributes its midpoint only. Other
/// compartments are resampled when their midpoint falls inside `bounds`.
pub fn resample_morphology(
    morphology: &Morphology,
    density: f64,
    bounds: Option<&PlaneBounds>,
) -> Result<MorphologyPointCloud, FigureError> {
    let mut points = Vec::new();
    let mut diameters = Vec::new();
    for (idx, comp) in morphology.compartments().iter().enumerate() {
        if idx == 0 {
            points.push(comp.midpoint());
            diameters.push(comp.diameter);
            continue;
        }
        if let Some(bounds) = bounds {
            if !bounds.contains(&comp.midpoint()) {
                continue;
            }
        }
        let sampled = resample_segment(comp.start, comp.end, density)?;
        diameters.extend(std::iter::repeat(comp.diameter).take(sampled.len()));
        points.extend(sampled);
    }
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[a].y.total_cmp(&points[b].y));
    debug!(
        "resampled {} compartments into {} points",
        morphology.len(),
        order.len()
    );
    Ok(MorphologyPointCloud {
        points: order.iter().map(|&i| points[i]).collect(),
        diameters: order.iter().map(|&i| diameters[i]).collect(),
    })
}
/// Quadrilateral outline of a compartment projected onto the x/z plane.
pub fn segment_outline(comp: &Compartment) -> [(f64, f64); 4] {
    let dx = comp.end.x - comp.start.x;
    let dz = comp.end.z - comp.start.z;
    let planar = (dx * dx + dz * dz).sqrt();
    let (nx, nz) = if planar > 0.0 {
        (-dz / planar, dx / planar)
    } else {
        (1.0, 0.0)
    };
    let r = comp.diameter / 2.0;
    let (ox, oz) = (nx * r, nz * r);
    if planar > 0.0 {
        [
            (comp.start.x + ox, comp.start.z + oz),
            (comp.end.x + ox, comp.end.z + oz),
            (comp.end.x - ox, comp.end.z - oz),
            (comp.start.x - ox, comp.start.z - oz),
        ]
    } else {
        // Seen end-on: draw a square of side `diameter`.
        let (cx, cz) = (comp.start.x, comp.start.z);
        [
            (cx - r, cz - r),
            (cx + r, cz - r),
            (cx + r, cz + r),
            (cx - r, cz + r),
        ]
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn collinear(p: &Point3, a: &Point3, b: &Point3) -> bool {
        (a.distance(p) + p.distance(b) - a.distance(b)).abs() < 1e-9
    }
    #[test]
    fn resample_count_and_collinearity() {
        let cases = [
            (Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0), 3.0),
            (Point3::new(1.0, -2.0, 3.0), Point3::new(4.0, 2.0, 3.0), 0.7),
            (Point3::new(0.0, 0.0, 0.0), Point3::new(3.3, 0.0, 0.0), 1.5),
        ];
        for (start, end, density) in cases {
            let points = resample_segment(start, end, density).unwrap();
            let expected = (start.distance(&end) * density).round() as usize;
            assert_eq!(points.len(), expected);
            assert_eq!(points[0], start);
            assert!(points.last().unwrap().distance(&end) < 1e-9);
            assert!(points.iter().all(|p| collinear(p, &start, &end)));
        }
    }
    #[test]
    fn zero_length_segment_is_single_point() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(resample_segment(p, p, 3.0).unwrap(), vec![p]);
    }
    #[test]
    fn tiny_segment_can_round_to_nothing() {
        let points =
            resample_segment(Point3::default(), Point3::new(0.1, 0.0, 0.0), 1.0).unwrap();
        assert!(points.is_empty());
    }
    #[test]
    fn rejects_bad_density() {
        let a = Point3::default();
        let b = Point3::new(1.0, 0.0, 0.0);
        assert!(resample_segment(a, b, 0.0).is_err());
        assert!(resample_segment(a, b, -1.0).is_err());
        assert!(resample_segment(a, b, f64::NAN).is_err());
    }
    fn comp(section: &str, start: Point3, end: Point3, diameter: f64) -> Compartment {
        Compartment {
            section: section.into(),
            start,
            end,
            diameter,
        }
    }
    #[test]
    fn morphology_cloud_filters_and_sorts_by_depth() {
        let morph = Morphology::new(vec![
            comp("soma", Point3::new(0.0, 5.0, -5.0), Point3::new(0.0, 5.0, 5.0), 10.0),
            comp("dend", Point3::new(0.0, 2.0, 5.0), Point3::new(0.0, -2.0, 6.0), 2.0),
            comp("dend", Point3::new(0.0, 0.0, 500.0), Point3::new(0.0, 0.0, 510.0), 1.0),
        ])
        .unwrap();
        let bounds = PlaneBounds::symmetric(100.0);
        let cloud = resample_morphology(&morph, 3.0, Some(&bounds)).unwrap();
        let dend_len = morph.compartments()[1].length();
        assert_eq!(cloud.len(), 1 + (dend_len * 3.0).round() as usize);
        assert!(cloud.points.windows(2).all(|w| w[0].y <= w[1].y));
        // soma is the deepest y and lands last
        assert_eq!(*cloud.diameters.last().unwrap(), 10.0);
        assert_eq!(cloud.marker_areas(20.0).last().copied(), Some(2000.0));
        let unbounded = resample_morphology(&morph, 3.0, None).unwrap();
        assert!(unbounded.len() > cloud.len());
    }
    #[test]
    fn outline_is_offset_by_radius() {
        let c = comp("dend", Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0), 4.0);
        let outline = segment_outline(&c);
        assert_eq!(outline[0], (-2.0, 0.0));
        assert_eq!(outline[1], (-2.0, 10.0));
        assert_eq!(outline[2], (2.0, 10.0));
        assert_eq!(outline[3], (2.0, 0.0));
    }
}
