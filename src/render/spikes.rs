use log::{debug, warn};
use ndarray::Axis;
use plotters::prelude::*;
use crate::config::FigureConfig;
use crate::derive::{
    channels_with_trough, AmplitudeThresholds, classify_amplitude, extremum_channel, log_peak_amplitude,
    normalize_by_peak, peak_magnitude, place_trace, resample_morphology, segment_outline,
    select_window_points, time_of_max, time_of_min,
};
use crate::error::FigureError;
use crate::model::{RecordingSource, SimulationRecord};
use crate::render::canvas::{cartesian, draw_colorbar, padded_range, render_png, Area, Chart};
use crate::render::colormap::{GRAY, SPECTRAL};
use crate::render::style::PlotStyle;
/// Location-dependent extracellular spike shapes around a resampled morphology.
pub fn render_spike_shapes_png(
    record: &SimulationRecord,
    config: &FigureConfig,
    style: &PlotStyle,
) -> Result<Vec<u8>, FigureError> {
    let cell = &record.cell;
    let electrode = &record.electrode;
    let cloud = resample_morphology(
        &cell.morphology,
        config.resample_density,
        Some(&config.morphology_bounds),
    )?;
    let areas = cloud.marker_areas(config.marker_area_scale);
    let depth = padded_range(cloud.points.iter().map(|p| p.y), 0.0);
    let mut traces = Vec::with_capacity(electrode.channel_count());
    for (ch, contact) in electrode.coordinates().iter().enumerate() {
        let Some(series) = electrode.channel_series(ch) else {
            continue;
        };
        let bucket = classify_amplitude(peak_magnitude(series), &config.amplitude_thresholds);
        let placement = config.spike_placement.with_value_scale(bucket.scale);
        let points = place_trace(electrode.time_vector(), series.iter(), contact, &placement)?;
        traces.push((points, style.color_for(&bucket.color)));
    }
    debug!(
        "spike shapes: {} cloud points, {} traces",
        cloud.len(),
        traces.len()
    );
    let (x_min, x_max, z_min, z_max) = config.spike_view;
    render_png(style, |root| {
        let (main_area, side_area) = root.split_horizontally(style.width * 2 / 3);
        let mut main = cartesian(
            &main_area,
            style,
            "Location-dependent extracellular spike shapes",
            ("x (µm)", "z (µm)"),
            x_min..x_max,
            z_min..z_max,
        )?;
        main.draw_series(cloud.points.iter().zip(&areas).map(|(p, area)| {
            let radius = (area.sqrt() / 2.0).max(1.0) as u32;
            let shade = GRAY.sample_between(p.y, depth.start, depth.end);
            Circle::new((p.x, p.z), radius, shade.filled())
        }))?;
        main.draw_series(
            electrode
                .coordinates()
                .iter()
                .map(|p| Circle::new((p.x, p.z), 3u32, style.foreground.filled())),
        )?;
        for (points, color) in &traces {
            main.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        }
        draw_time_bar(&mut main, style, (x_min, z_min), config.spike_placement.time_scale)?;
        let anchor = (x_max - 1.0, (z_min + z_max) / 2.0);
        for bar in &amplitude_scale_bars(&config.amplitude_thresholds, anchor) {
            let color = style.color_for(&bar.color);
            main.draw_series(std::iter::once(PathElement::new(
                vec![bar.start, bar.end],
                color.stroke_width(2),
            )))?;
            if style.labels {
                main.draw_series(std::iter::once(Text::new(
                    format!("{} mV", bar.mv),
                    (bar.start.0 - 14.0, bar.end.1),
                    (style.font, 12).into_font().color(&color),
                )))?;
            }
        }
        draw_soma_and_synapse(&side_area, record, style)?;
        Ok(())
    })
}
/// Peak-normalized waveforms coloured by spike amplitude, with the largest spike in detail.
pub fn render_spike_waveforms_png(
    record: &SimulationRecord,
    config: &FigureConfig,
    style: &PlotStyle,
) -> Result<Vec<u8>, FigureError> {
    let cell = &record.cell;
    let electrode = &record.electrode;
    let data = electrode.series_matrix()?;
    let kept = channels_with_trough(&data);
    if kept.len() < electrode.channel_count() {
        warn!(
            "skipping {} channel(s) without a negative peak",
            electrode.channel_count() - kept.len()
        );
    }
    let subset = data.select(Axis(0), &kept);
    let normalized = normalize_by_peak(&subset)?;
    let log_amp = log_peak_amplitude(&subset)?;
    let amp_range = (
        log_amp.iter().copied().fold(f64::INFINITY, f64::min),
        log_amp.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );
    let time = electrode.time_vector();
    let contacts = electrode.coordinates();
    let mut traces = Vec::with_capacity(kept.len());
    for (row, &ch) in kept.iter().enumerate() {
        let points = place_trace(
            time,
            normalized.row(row).iter(),
            &contacts[ch],
            &config.waveform_placement,
        )?;
        let color = SPECTRAL.sample_between(log_amp[row], amp_range.0, amp_range.1);
        traces.push((points, color));
    }
    let outlines: Vec<Vec<(f64, f64)>> = cell
        .morphology
        .compartments()
        .iter()
        .map(|c| segment_outline(c).to_vec())
        .collect();
    let detail = extremum_channel(&data);
    debug!("spike waveforms: {} traces, detail channel {detail:?}", traces.len());
    render_png(style, |root| {
        let (left, right) = root.split_horizontally(style.width * 3 / 5);
        let (main_area, bar_area) = left.split_vertically(style.height * 9 / 10);
        let x_range = padded_range(
            traces
                .iter()
                .flat_map(|(pts, _)| pts.iter().map(|p| p.0))
                .chain(outlines.iter().flatten().map(|p| p.0)),
            0.02,
        );
        let z_range = padded_range(
            traces
                .iter()
                .flat_map(|(pts, _)| pts.iter().map(|p| p.1))
                .chain(outlines.iter().flatten().map(|p| p.1)),
            0.02,
        );
        let mut main = cartesian(
            &main_area,
            style,
            "extracellular spike waveforms",
            ("x (µm)", "z (µm)"),
            x_range,
            z_range,
        )?;
        main.draw_series(
            outlines
                .iter()
                .map(|poly| Polygon::new(poly.clone(), style.morphology.filled())),
        )?;
        main.draw_series(
            contacts
                .iter()
                .map(|p| Circle::new((p.x, p.z), 1u32, style.foreground.filled())),
        )?;
        for (points, color) in &traces {
            main.draw_series(LineSeries::new(points.iter().copied(), color))?;
        }
        if let Some(ch) = detail {
            let p = contacts[ch];
            main.draw_series(std::iter::once(Circle::new(
                (p.x, p.z),
                4u32,
                style.color_for("red").filled(),
            )))?;
        }
        if amp_range.0.is_finite() {
            draw_colorbar(
                &bar_area,
                style,
                &SPECTRAL,
                amp_range,
                true,
                "spike amplitude (log10 mV)",
            )?;
        }
        if let Some(ch) = detail {
            draw_detail_panels(&right, record, ch, config, style)?;
        }
        Ok(())
    })
}
/// Windowed soma potential and extracellular trace of one channel, with marker lines at
/// the soma peak, the extracellular trough and the extracellular peak.
fn draw_detail_panels(
    area: &Area<'_>,
    record: &SimulationRecord,
    channel: usize,
    config: &FigureConfig,
    style: &PlotStyle,
) -> Result<(), FigureError> {
    let cell = &record.cell;
    let electrode = &record.electrode;
    let lfp: Vec<f64> = electrode
        .channel_series(channel)
        .map(|s| s.to_vec())
        .unwrap_or_default();
    let markers: Vec<(f64, RGBAColor)> = [
        (time_of_max(&cell.time, &cell.soma_potential), 0.8),
        (time_of_min(electrode.time_vector(), &lfp), 0.55),
        (time_of_max(electrode.time_vector(), &lfp), 0.3),
    ]
    .into_iter()
    .filter_map(|(t, alpha)| t.map(|t| (t, style.foreground.mix(alpha))))
    .filter(|(t, _)| config.detail_window.contains(*t))
    .collect();
    let soma = select_window_points(&cell.time, &cell.soma_potential, config.detail_window)?;
    let spike = select_window_points(electrode.time_vector(), &lfp, config.detail_window)?;
    let window = config.detail_window;
    let panels = area.split_evenly((2, 1));
    for (panel, (points, caption, y_desc)) in panels.iter().zip([
        (soma, "somatic potential", "V_soma (mV)"),
        (spike, "extracellular spike", "Φ(r, t) (mV)"),
    ]) {
        // an empty window is valid: leave the panel blank
        if points.is_empty() {
            continue;
        }
        let y_range = padded_range(points.iter().map(|p| p.1), 0.05);
        let (lo, hi) = (y_range.start, y_range.end);
        let mut chart = cartesian(
            panel,
            style,
            caption,
            ("t (ms)", y_desc),
            window.low..window.high,
            y_range,
        )?;
        chart.draw_series(LineSeries::new(points, &style.foreground))?;
        chart.draw_series(
            markers
                .iter()
                .map(|(t, color)| PathElement::new(vec![(*t, lo), (*t, hi)], *color)),
        )?;
    }
    Ok(())
}
fn draw_soma_and_synapse(
    area: &Area<'_>,
    record: &SimulationRecord,
    style: &PlotStyle,
) -> Result<(), FigureError> {
    let cell = &record.cell;
    let panels = area.split_evenly((2, 1));
    let mut soma = cartesian(
        &panels[0],
        style,
        "Somatic action-potential",
        ("time (ms)", "V_membrane (mV)"),
        padded_range(cell.time.iter().copied(), 0.0),
        padded_range(cell.soma_potential.iter().copied(), 0.05),
    )?;
    soma.draw_series(LineSeries::new(
        cell.time
            .iter()
            .copied()
            .zip(cell.soma_potential.iter().copied()),
        &style.series_color(0),
    ))?;
    let current: Vec<f64> = cell
        .synapses
        .first()
        .map(|s| s.current.clone())
        .unwrap_or_default();
    let mut syn = cartesian(
        &panels[1],
        style,
        "Synaptic current",
        ("time (ms)", "i_synapse (nA)"),
        padded_range(cell.time.iter().copied(), 0.0),
        padded_range(current.iter().copied(), 0.05),
    )?;
    syn.draw_series(LineSeries::new(
        cell.time.iter().copied().zip(current.iter().copied()),
        &style.series_color(0),
    ))?;
    Ok(())
}
/// Vertical bar showing what `mv` millivolts look like at one bucket's trace scale.
#[derive(Clone, Debug)]
struct ScaleBar {
    mv: f64,
    color: String,
    start: (f64, f64),
    end: (f64, f64),
}
/// One bar per bucket with a legend, stacked 20 µm apart downwards from 20 µm above `anchor`.
fn amplitude_scale_bars(thresholds: &AmplitudeThresholds, (x, z): (f64, f64)) -> Vec<ScaleBar> {
    thresholds
        .buckets()
        .iter()
        .filter_map(|bucket| Some((bucket, bucket.legend_mv?, bucket.legend_length()?)))
        .enumerate()
        .map(|(i, (bucket, mv, length))| {
            let base = z + 20.0 - 20.0 * i as f64;
            ScaleBar {
                mv,
                color: bucket.color.clone(),
                start: (x, base),
                end: (x, base + length),
            }
        })
        .collect()
}
/// Horizontal bar worth 10 ms of trace, anchored near the lower-left corner.
fn draw_time_bar(
    chart: &mut Chart<'_, '_>,
    style: &PlotStyle,
    (x0, z0): (f64, f64),
    time_scale: f64,
) -> Result<(), FigureError> {
    let start = (x0 + 5.0, z0 + 3.0);
    let end = (start.0 + 10.0 * time_scale, start.1);
    chart.draw_series(std::iter::once(PathElement::new(
        vec![start, end],
        style.foreground.stroke_width(3),
    )))?;
    if style.labels {
        chart.draw_series(std::iter::once(Text::new(
            "10 ms".to_owned(),
            (start.0, start.1 + 2.0),
            (style.font, 12).into_font().color(&style.foreground),
        )))?;
    }
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::small_record;
    use crate::derive::TimeWindow;
    fn style() -> PlotStyle {
        PlotStyle {
            width: 320,
            height: 240,
            ..PlotStyle::unlabeled()
        }
    }
    #[test]
    fn spike_shapes_render_png() {
        let record = small_record();
        let png = render_spike_shapes_png(&record, &FigureConfig::default(), &style()).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
    #[test]
    fn waveforms_skip_flat_channel() {
        let record = small_record();
        // the fixture's last contact is flat and must not trip the normalization
        let png = render_spike_waveforms_png(&record, &FigureConfig::default(), &style()).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
    #[test]
    fn scale_bars_follow_bucket_scales() {
        let bars = amplitude_scale_bars(&AmplitudeThresholds::default(), (60.0, 0.0));
        let summary: Vec<(f64, &str, f64, f64)> = bars
            .iter()
            .map(|b| (b.mv, b.color.as_str(), b.start.1, b.end.1 - b.start.1))
            .collect();
        assert_eq!(
            summary,
            vec![(5.0, "red", 20.0, 10.0), (1.0, "green", 0.0, 10.0), (0.1, "blue", -20.0, 5.0)]
        );
        assert!(bars.iter().all(|b| b.start.0 == 60.0 && b.end.0 == 60.0));
    }
    #[test]
    fn buckets_without_legend_draw_no_bar() {
        let thresholds = AmplitudeThresholds::new(vec![
            crate::derive::AmplitudeBucket::new(1.0, 2.0, "red"),
            crate::derive::AmplitudeBucket::new(0.0, 4.0, "blue").with_legend(2.0),
        ])
        .unwrap();
        let bars = amplitude_scale_bars(&thresholds, (0.0, 0.0));
        assert_eq!(bars.len(), 1);
        assert_eq!((bars[0].start.1, bars[0].end.1), (20.0, 28.0));
    }
    #[test]
    fn empty_detail_window_still_renders() {
        let record = small_record();
        let config = FigureConfig {
            detail_window: TimeWindow::new(500.0, 600.0),
            ..FigureConfig::default()
        };
        assert!(render_spike_waveforms_png(&record, &config, &style()).is_ok());
    }
}
