use serde::{Deserialize, Serialize};
use crate::error::FigureError;
/// A point in cell coordinates (µm).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
    /// Linear interpolation, `frac = 0` gives `self`, `frac = 1` gives `other`.
    pub fn lerp(&self, other: &Point3, frac: f64) -> Point3 {
        Point3 {
            x: self.x + (other.x - self.x) * frac,
            y: self.y + (other.y - self.y) * frac,
            z: self.z + (other.z - self.z) * frac,
        }
    }
}
/// One discretized segment of the simulated morphology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    pub section: String,
    pub start: Point3,
    pub end: Point3,
    pub diameter: f64,
}
impl Compartment {
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
    pub fn midpoint(&self) -> Point3 {
        self.start.lerp(&self.end, 0.5)
    }
}
/// Ordered compartments of a single cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Compartment>", into = "Vec<Compartment>")]
pub struct Morphology {
    compartments: Vec<Compartment>,
}
impl Morphology {
    pub fn new(compartments: Vec<Compartment>) -> Result<Self, FigureError> {
        for (idx, comp) in compartments.iter().enumerate() {
            if !(comp.diameter > 0.0) {
                return Err(FigureError::invalid(format!(
                    "compartment {idx} has non-positive diameter {}",
                    comp.diameter
                )));
            }
        }
        Ok(Self { compartments })
    }
    /// Builds a morphology from the column arrays a simulator usually exposes.
    pub fn from_arrays(
        sections: &[String],
        starts: &[Point3],
        ends: &[Point3],
        diameters: &[f64],
    ) -> Result<Self, FigureError> {
        FigureError::check_len(starts.len(), ends.len())?;
        FigureError::check_len(starts.len(), diameters.len())?;
        FigureError::check_len(starts.len(), sections.len())?;
        let compartments = sections
            .iter()
            .zip(starts)
            .zip(ends)
            .zip(diameters)
            .map(|(((section, start), end), diameter)| Compartment {
                section: section.clone(),
                start: *start,
                end: *end,
                diameter: *diameter,
            })
            .collect();
        Self::new(compartments)
    }
    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }
    pub fn len(&self) -> usize {
        self.compartments.len()
    }
    pub fn is_empty(&self) -> bool {
        self.compartments.is_empty()
    }
    pub fn get(&self, idx: usize) -> Option<&Compartment> {
        self.compartments.get(idx)
    }
    /// Section names in order of first appearance.
    pub fn sections(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for comp in &self.compartments {
            if !names.contains(&comp.section.as_str()) {
                names.push(comp.section.as_str());
            }
        }
        names
    }
    /// Polyline through a section: every compartment start, then the last end.
    pub fn section_path(&self, section: &str) -> Vec<Point3> {
        let members: Vec<&Compartment> = self
            .compartments
            .iter()
            .filter(|c| c.section == section)
            .collect();
        let mut path: Vec<Point3> = members.iter().map(|c| c.start).collect();
        if let Some(last) = members.last() {
            path.push(last.end);
        }
        path
    }
}
impl TryFrom<Vec<Compartment>> for Morphology {
    type Error = FigureError;
    fn try_from(value: Vec<Compartment>) -> Result<Self, Self::Error> {
        Morphology::new(value)
    }
}
impl From<Morphology> for Vec<Compartment> {
    fn from(value: Morphology) -> Self {
        value.compartments
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn names(n: usize, name: &str) -> Vec<String> {
        vec![name.to_owned(); n]
    }
    #[test]
    fn from_arrays_rejects_mismatched_lengths() {
        let starts = [Point3::default(); 3];
        let ends = [Point3::default(); 2];
        let err = Morphology::from_arrays(&names(3, "soma"), &starts, &ends, &[1.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            FigureError::InvalidDimension {
                expected: 3,
                actual: 2
            }
        ));
    }
    #[test]
    fn rejects_non_positive_diameter() {
        let starts = [Point3::default(); 2];
        let ends = [Point3::new(0.0, 0.0, 1.0); 2];
        let err = Morphology::from_arrays(&names(2, "dend"), &starts, &ends, &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, FigureError::InvalidParameter(_)));
    }
    #[test]
    fn section_path_chains_compartments() {
        let sections = vec!["soma".to_owned(), "dend".to_owned(), "dend".to_owned()];
        let starts = [
            Point3::new(0.0, 0.0, -10.0),
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(0.0, 0.0, 20.0),
        ];
        let ends = [
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(0.0, 0.0, 20.0),
            Point3::new(0.0, 0.0, 30.0),
        ];
        let morph = Morphology::from_arrays(&sections, &starts, &ends, &[20.0, 2.0, 2.0]).unwrap();
        assert_eq!(morph.sections(), vec!["soma", "dend"]);
        let path = morph.section_path("dend");
        let zs: Vec<f64> = path.iter().map(|p| p.z).collect();
        assert_eq!(zs, vec![10.0, 20.0, 30.0]);
        assert!((morph.compartments()[0].length() - 20.0).abs() < 1e-12);
        assert_eq!(morph.compartments()[0].midpoint(), Point3::new(0.0, 0.0, 0.0));
    }
    #[test]
    fn deserializing_validates_diameters() {
        let json = r#"[{"section":"soma","start":{"x":0,"y":0,"z":0},"end":{"x":0,"y":0,"z":1},"diameter":-1}]"#;
        assert!(serde_json::from_str::<Morphology>(json).is_err());
    }
}
