// src/derive/mod.rs
// Pure array transformations between simulation outputs and the renderers.
// Nothing here keeps state between calls; inputs are never modified.
pub mod classify;
pub mod extremum;
pub mod grid;
pub mod normalize;
pub mod placement;
pub mod resample;
pub mod window;
pub use classify::{classify_amplitude, AmplitudeBucket, AmplitudeThresholds};
pub use extremum::{extremum_channel, find_extremum_index, unravel_index};
pub use grid::{depth_profile, infer_grid_shape, lfp_grid, DepthProfile, LfpGrid};
pub use normalize::{
    arcsinh_scale, channels_with_trough, log_peak_amplitude, normalize_by_peak, peak_magnitude,
    peak_magnitudes, symmetric_limit,
};
pub use placement::{place_trace, TracePlacement};
pub use resample::{
    resample_morphology, resample_segment, segment_outline, MorphologyPointCloud, PlaneBounds,
};
pub use window::{
    select_window, select_window_points, time_index, time_of_max, time_of_min, window_mask,
    TimeWindow,
};
