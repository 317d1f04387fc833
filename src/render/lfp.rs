use log::debug;
use plotters::prelude::*;
use crate::config::FigureConfig;
use crate::derive::{depth_profile, infer_grid_shape, lfp_grid, symmetric_limit};
use crate::error::FigureError;
use crate::model::{RecordingSource, SimulationRecord};
use crate::render::canvas::{
    cartesian, cell_edges, draw_colorbar, draw_sections, padded_range, render_png,
};
use crate::render::colormap::{PRGN, VIRIDIS};
use crate::render::style::PlotStyle;
/// Morphology over the LFP map at `t_show`, plus synaptic current and soma potential.
pub fn render_morphology_lfp_png(
    record: &SimulationRecord,
    config: &FigureConfig,
    style: &PlotStyle,
) -> Result<Vec<u8>, FigureError> {
    let electrode = &record.electrode;
    let cell = &record.cell;
    let shape = config
        .grid_shape
        .or_else(|| infer_grid_shape(electrode.coordinates()))
        .ok_or_else(|| FigureError::invalid("electrode contacts do not form a regular x/z mesh"))?;
    let grid = lfp_grid(electrode, shape, config.t_show, config.t_tolerance)?;
    debug!("lfp grid {:?} at t={} ms", grid.shape(), config.t_show);
    let x_edges = cell_edges(&grid.x.row(0).to_vec());
    let z_edges = cell_edges(&grid.z.column(0).to_vec());
    let (clim_lo, clim_hi) = config.contour_limits;
    render_png(style, |root| {
        let (map_area, traces_area) = root.split_horizontally(style.width / 2);
        let (syn_area, soma_area) = traces_area.split_vertically(style.height / 2);
        let x_range = padded_range(x_edges.iter().copied(), 0.0);
        let z_range = padded_range(z_edges.iter().copied(), 0.0);
        let mut map = cartesian(
            &map_area,
            style,
            &format!("LFP at t={} ms", config.t_show),
            ("x (µm)", "z (µm)"),
            x_range,
            z_range,
        )?;
        let (rows, cols) = grid.shape();
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let color = VIRIDIS.sample_between(grid.values[[r, c]], clim_lo, clim_hi);
                cells.push(Rectangle::new(
                    [(x_edges[c], z_edges[r]), (x_edges[c + 1], z_edges[r + 1])],
                    color.filled(),
                ));
            }
        }
        map.draw_series(cells)?;
        draw_sections(&mut map, &cell.morphology, style.foreground)?;
        map.draw_series(cell.synapses.iter().enumerate().map(|(idx, syn)| {
            Circle::new(
                (syn.position.x, syn.position.z),
                5u32,
                style.series_color(idx).filled(),
            )
        }))?;
        let mut syn_chart = cartesian(
            &syn_area,
            style,
            "synaptic input current",
            ("time (ms)", "(nA)"),
            padded_range(cell.time.iter().copied(), 0.0),
            padded_range(
                cell.synapses
                    .first()
                    .map(|s| s.current.clone())
                    .unwrap_or_default(),
                0.05,
            ),
        )?;
        if let Some(syn) = cell.synapses.first() {
            syn_chart.draw_series(LineSeries::new(
                cell.time.iter().copied().zip(syn.current.iter().copied()),
                &style.series_color(0),
            ))?;
        }
        let mut soma_chart = cartesian(
            &soma_area,
            style,
            "somatic membrane potential",
            ("time (ms)", "(mV)"),
            padded_range(cell.time.iter().copied(), 0.0),
            padded_range(cell.soma_potential.iter().copied(), 0.05),
        )?;
        soma_chart.draw_series(LineSeries::new(
            cell.time
                .iter()
                .copied()
                .zip(cell.soma_potential.iter().copied()),
            &style.series_color(0),
        ))?;
        Ok(())
    })
}
/// Soma trace, synaptic currents, depth/time LFP image and the morphology with contacts.
pub fn render_lfp_overview_png(
    record: &SimulationRecord,
    config: &FigureConfig,
    style: &PlotStyle,
) -> Result<Vec<u8>, FigureError> {
    let electrode = &record.electrode;
    let cell = &record.cell;
    let limit = symmetric_limit(&electrode.series_matrix()?, config.limit_sigma);
    let profile = depth_profile(electrode)?;
    debug!(
        "lfp colour limit ±{limit}, {} depth rows from {} contacts",
        profile.depths.len(),
        electrode.channel_count()
    );
    let contacts = electrode.coordinates();
    let z_edges = cell_edges(&profile.depths);
    let t_edges = cell_edges(electrode.time_vector());
    render_png(style, |root| {
        let (left, morph_area) = root.split_horizontally(style.width * 13 / 20);
        let panels = left.split_evenly((3, 1));
        let mut soma_chart = cartesian(
            &panels[0],
            style,
            "somatic potential",
            ("Time (ms)", "Soma pot. (mV)"),
            padded_range(cell.time.iter().copied(), 0.0),
            padded_range(cell.soma_potential.iter().copied(), 0.05),
        )?;
        soma_chart.draw_series(LineSeries::new(
            cell.time
                .iter()
                .copied()
                .zip(cell.soma_potential.iter().copied()),
            &style.series_color(0),
        ))?;
        let mut syn_chart = cartesian(
            &panels[1],
            style,
            "synaptic currents",
            ("Time (ms)", "Syn. i (nA)"),
            padded_range(cell.time.iter().copied(), 0.0),
            padded_range(
                cell.synapses.iter().flat_map(|s| s.current.iter().copied()),
                0.05,
            ),
        )?;
        for syn in &cell.synapses {
            let color = synapse_color(style, syn.is_excitatory(cell.v_init));
            syn_chart.draw_series(LineSeries::new(
                cell.time.iter().copied().zip(syn.current.iter().copied()),
                &color,
            ))?;
        }
        let (image_area, bar_area) = panels[2].split_horizontally(panels[2].dim_in_pixel().0 * 9 / 10);
        let mut lfp_image = cartesian(
            &image_area,
            style,
            "LFP",
            ("Time (ms)", "z (µm)"),
            padded_range(t_edges.iter().copied(), 0.0),
            padded_range(z_edges.iter().copied(), 0.0),
        )?;
        for (row, series) in profile.values.outer_iter().enumerate() {
            lfp_image.draw_series(series.iter().enumerate().map(|(col, v)| {
                Rectangle::new(
                    [(t_edges[col], z_edges[row]), (t_edges[col + 1], z_edges[row + 1])],
                    PRGN.sample_between(*v, -limit, limit).filled(),
                )
            }))?;
        }
        draw_colorbar(&bar_area, style, &PRGN, (-limit, limit), false, "LFP (mV)")?;
        let mut morph = cartesian(
            &morph_area,
            style,
            "morphology",
            ("x (µm)", "z (µm)"),
            padded_range(
                cell.morphology
                    .compartments()
                    .iter()
                    .flat_map(|c| [c.start.x, c.end.x])
                    .chain(contacts.iter().map(|p| p.x)),
                0.05,
            ),
            padded_range(
                cell.morphology
                    .compartments()
                    .iter()
                    .flat_map(|c| [c.start.z, c.end.z])
                    .chain(contacts.iter().map(|p| p.z)),
                0.05,
            ),
        )?;
        draw_sections(&mut morph, &cell.morphology, style.foreground)?;
        morph.draw_series(cell.synapses.iter().map(|syn| {
            let color = synapse_color(style, syn.is_excitatory(cell.v_init));
            Circle::new((syn.position.x, syn.position.z), 3u32, color.filled())
        }))?;
        morph.draw_series(
            contacts
                .iter()
                .map(|p| Circle::new((p.x, p.z), 4u32, style.series_color(2).filled())),
        )?;
        Ok(())
    })
}
fn synapse_color(style: &PlotStyle, excitatory: bool) -> RGBColor {
    if excitatory {
        style.series_color(0)
    } else {
        style.series_color(1)
    }
}
