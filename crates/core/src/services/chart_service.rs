use crate::models::series::SeriesPoint;

/// Produces chart-ready series from raw buffers.
///
/// The core computes the points — the frontend only renders. The single
/// job here is decimation: bounding the number of points handed to the
/// renderer via uniform subsampling (no averaging or binning).
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Reduce a series to at most `max_points` points.
    ///
    /// Series already within the budget are returned as-is. Otherwise
    /// every stride-th point is kept starting at index 0, with the stride
    /// chosen by ceiling division so the result never exceeds the budget.
    /// The first point is always kept and relative order is preserved.
    /// The source series is never mutated — this is a lossy reduction
    /// for rendering only.
    pub fn decimate(&self, series: &[SeriesPoint], max_points: usize) -> Vec<SeriesPoint> {
        assert!(max_points > 0, "max_points must be positive");

        if series.len() <= max_points {
            return series.to_vec();
        }

        let stride = series.len().div_ceil(max_points);
        series.iter().step_by(stride).cloned().collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
