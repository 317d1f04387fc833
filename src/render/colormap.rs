use plotters::prelude::RGBColor;
/// Piecewise-linear colour gradient over `[0, 1]`.
#[derive(Clone, Copy, Debug)]
pub struct Colormap {
    stops: &'static [(f64, RGBColor)],
}
pub const GRAY: Colormap = Colormap {
    stops: &[(0.0, RGBColor(0, 0, 0)), (1.0, RGBColor(255, 255, 255))],
};
pub const VIRIDIS: Colormap = Colormap {
    stops: &[
        (0.0, RGBColor(68, 1, 84)),
        (0.25, RGBColor(59, 82, 139)),
        (0.5, RGBColor(33, 145, 140)),
        (0.75, RGBColor(94, 201, 98)),
        (1.0, RGBColor(253, 231, 37)),
    ],
};
/// Purple to white to green, for signed data.
pub const PRGN: Colormap = Colormap {
    stops: &[
        (0.0, RGBColor(64, 0, 75)),
        (0.25, RGBColor(153, 112, 171)),
        (0.5, RGBColor(247, 247, 247)),
        (0.75, RGBColor(90, 174, 97)),
        (1.0, RGBColor(0, 68, 27)),
    ],
};
pub const SPECTRAL: Colormap = Colormap {
    stops: &[
        (0.0, RGBColor(0, 0, 0)),
        (0.15, RGBColor(120, 0, 150)),
        (0.3, RGBColor(0, 0, 220)),
        (0.45, RGBColor(0, 160, 200)),
        (0.6, RGBColor(0, 180, 0)),
        (0.75, RGBColor(230, 230, 0)),
        (0.9, RGBColor(255, 60, 0)),
        (1.0, RGBColor(204, 204, 204)),
    ],
};
impl Colormap {
    /// Colour at `value` in `[0, 1]`; out-of-range values are clamped.
    pub fn sample(&self, value: f64) -> RGBColor {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let Some(&(first_pos, first)) = self.stops.first() else {
            return RGBColor(255, 255, 255);
        };
        if v <= first_pos {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (p0, c0) = pair[0];
            let (p1, c1) = pair[1];
            if v <= p1 {
                let frac = if p1 > p0 { (v - p0) / (p1 - p0) } else { 0.0 };
                return lerp_rgb(c0, c1, frac);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
    /// Colour for `value` mapped linearly from `[lo, hi]`.
    pub fn sample_between(&self, value: f64, lo: f64, hi: f64) -> RGBColor {
        if !(hi > lo) {
            return self.sample(0.5);
        }
        self.sample((value - lo) / (hi - lo))
    }
}
fn lerp_rgb(a: RGBColor, b: RGBColor, frac: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
