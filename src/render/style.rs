use plotters::prelude::*;
/// Cosmetic defaults handed to every renderer; nothing here is process-wide.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    /// Cycle used for series without a dedicated colour (`C0`, `C1`, ...).
    pub palette: Vec<RGBColor>,
    /// Neutral fill for morphology outlines.
    pub morphology: RGBColor,
    pub margin: u32,
    /// Draw captions, axis descriptions and tick labels.
    pub labels: bool,
    pub font: &'static str,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: WHITE,
            foreground: BLACK,
            palette: vec![
                RGBColor(31, 119, 180),
                RGBColor(255, 127, 14),
                RGBColor(44, 160, 44),
                RGBColor(214, 39, 40),
                RGBColor(148, 103, 189),
                RGBColor(140, 86, 75),
            ],
            morphology: RGBColor(128, 128, 128),
            margin: 10,
            labels: true,
            font: "sans-serif",
        }
    }
}
impl PlotStyle {
    /// Same style without any text; useful where no fonts are installed.
    pub fn unlabeled() -> Self {
        Self {
            labels: false,
            ..Self::default()
        }
    }
    pub fn series_color(&self, idx: usize) -> RGBColor {
        if self.palette.is_empty() {
            return self.foreground;
        }
        self.palette[idx % self.palette.len()]
    }
    /// Resolves a colour tag such as `"red"` or `"C2"`.
    pub fn color_for(&self, tag: &str) -> RGBColor {
        match tag {
            "red" | "r" => RGBColor(220, 30, 30),
            "green" | "g" => RGBColor(30, 150, 30),
            "blue" | "b" => RGBColor(30, 60, 220),
            "black" | "k" => BLACK,
            "gray" | "grey" => self.morphology,
            _ => tag
                .strip_prefix('C')
                .and_then(|n| n.parse::<usize>().ok())
                .map(|n| self.series_color(n))
                .unwrap_or(self.foreground),
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn resolves_tags() {
        let style = PlotStyle::default();
        assert_eq!(style.color_for("C1"), style.palette[1]);
        assert_eq!(style.color_for("C7"), style.palette[1]);
        assert_eq!(style.color_for("red"), RGBColor(220, 30, 30));
        assert_eq!(style.color_for("no-such-colour"), style.foreground);
        assert!(!PlotStyle::unlabeled().labels);
    }
}
