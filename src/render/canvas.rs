use std::io::Cursor;
use std::ops::Range;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::error::FigureError;
use crate::model::Morphology;
use crate::render::colormap::Colormap;
use crate::render::style::PlotStyle;
pub(crate) type Area<'b> = DrawingArea<BitMapBackend<'b>, Shift>;
pub(crate) type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
/// Draws into an RGB buffer sized for `style` and returns the encoded PNG.
pub(crate) fn render_png<F>(style: &PlotStyle, draw: F) -> Result<Vec<u8>, FigureError>
where
    F: FnOnce(&Area<'_>) -> Result<(), FigureError>,
{
    if style.width == 0 || style.height == 0 {
        return Err(FigureError::invalid("plot size must be non-zero"));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        draw(&root)?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub(crate) fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, FigureError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| FigureError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
/// Cartesian panel; captions and the mesh are only drawn when the style has labels.
pub(crate) fn cartesian<'a, 'b>(
    area: &'a Area<'b>,
    style: &PlotStyle,
    caption: &str,
    (x_desc, y_desc): (&str, &str),
    x: Range<f64>,
    y: Range<f64>,
) -> Result<Chart<'a, 'b>, FigureError> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(style.margin);
    if style.labels {
        builder
            .caption(caption, (style.font, 16).into_font().color(&style.foreground))
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 35);
    }
    let mut chart = builder.build_cartesian_2d(x, y)?;
    if style.labels {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()?;
    }
    Ok(chart)
}
/// `min..max` of the finite values, padded so the range is never empty.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>, pad_frac: f64) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return -1.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        return (lo - 1.0)..(hi + 1.0);
    }
    (lo - span * pad_frac)..(hi + span * pad_frac)
}
/// Cell edges for sample centres, halfway between neighbours.
pub(crate) fn cell_edges(centres: &[f64]) -> Vec<f64> {
    match centres.len() {
        0 => Vec::new(),
        1 => vec![centres[0] - 0.5, centres[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centres[0] - (centres[1] - centres[0]) / 2.0);
            for w in centres.windows(2) {
                edges.push((w[0] + w[1]) / 2.0);
            }
            edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) / 2.0);
            edges
        }
    }
}
/// One black polyline per section, in the x/z plane.
pub(crate) fn draw_sections(
    chart: &mut Chart<'_, '_>,
    morphology: &Morphology,
    color: RGBColor,
) -> Result<(), FigureError> {
    for section in morphology.sections() {
        let path: Vec<(f64, f64)> = morphology
            .section_path(section)
            .iter()
            .map(|p| (p.x, p.z))
            .collect();
        chart.draw_series(std::iter::once(PathElement::new(path, color)))?;
    }
    Ok(())
}
/// Colour bar for `colormap` over `[lo, hi]`, drawn into its own area.
pub(crate) fn draw_colorbar(
    area: &Area<'_>,
    style: &PlotStyle,
    colormap: &Colormap,
    (lo, hi): (f64, f64),
    horizontal: bool,
    label: &str,
) -> Result<(), FigureError> {
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 1.0, lo + 1.0) };
    let steps = 64;
    let step = (hi - lo) / steps as f64;
    let (x, y) = if horizontal {
        (lo..hi, 0.0..1.0)
    } else {
        (0.0..1.0, lo..hi)
    };
    let mut chart = cartesian(area, style, label, ("", ""), x, y)?;
    chart.draw_series((0..steps).map(|i| {
        let v0 = lo + step * i as f64;
        let v1 = v0 + step;
        let corners = if horizontal {
            [(v0, 0.0), (v1, 1.0)]
        } else {
            [(0.0, v0), (1.0, v1)]
        };
        Rectangle::new(corners, colormap.sample_between(v0 + step / 2.0, lo, hi).filled())
    }))?;
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ranges_are_padded_and_never_empty() {
        let r = padded_range([0.0, 10.0], 0.1);
        assert!((r.start + 1.0).abs() < 1e-12 && (r.end - 11.0).abs() < 1e-12);
        assert_eq!(padded_range([3.0, 3.0], 0.1), 2.0..4.0);
        assert_eq!(padded_range(Vec::new(), 0.1), -1.0..1.0);
        assert_eq!(padded_range([f64::NAN, 1.0], 0.0), 0.0..2.0);
    }
    #[test]
    fn edges_bracket_centres() {
        assert_eq!(cell_edges(&[0.0, 1.0, 3.0]), vec![-0.5, 0.5, 2.0, 4.0]);
        assert_eq!(cell_edges(&[2.0]), vec![1.5, 2.5]);
        assert!(cell_edges(&[]).is_empty());
    }
    #[test]
    fn encodes_png_signature() {
        let png = encode_png(&[255u8; 2 * 2 * 3], 2, 2).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert!(encode_png(&[0u8; 3], 2, 2).is_err());
    }
}
