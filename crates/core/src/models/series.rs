use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of raw points retained in the live buffer.
/// Matches the feed's own retention: it keeps the most recent 100 samples.
pub const LIVE_SERIES_CAP: usize = 100;

/// Maximum number of raw points retained in the historical buffer
/// (a year of daily closes fits comfortably).
pub const HISTORICAL_SERIES_CAP: usize = 400;

/// A single (timestamp, price) sample in a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Which chart window to render: the short intra-session window or the
/// long historical one. Each carries its own decimation budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartWindow {
    /// Recent intra-session samples, one per update batch
    Live,
    /// Long-range daily history
    Historical,
}

impl ChartWindow {
    /// Maximum number of points handed to the renderer for this window.
    #[must_use]
    pub fn max_points(&self) -> usize {
        match self {
            ChartWindow::Live => 50,
            ChartWindow::Historical => 100,
        }
    }
}

impl std::fmt::Display for ChartWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartWindow::Live => write!(f, "Live"),
            ChartWindow::Historical => write!(f, "Historical"),
        }
    }
}

/// Raw chart buffers for one asset: an append-only live buffer with
/// bounded retention, and a historical buffer replaced wholesale whenever
/// the feed delivers long-range data.
///
/// Points are ascending by timestamp within each buffer; the dashboard
/// only ever appends newer samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetSeries {
    live: Vec<SeriesPoint>,
    historical: Vec<SeriesPoint>,
}

impl AssetSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to the live buffer, evicting the oldest points
    /// once the retention cap is reached.
    pub fn push_live(&mut self, point: SeriesPoint) {
        self.live.push(point);
        if self.live.len() > LIVE_SERIES_CAP {
            let excess = self.live.len() - LIVE_SERIES_CAP;
            self.live.drain(..excess);
        }
    }

    /// Replace the live buffer with feed-supplied raw samples,
    /// keeping only the newest points within the cap.
    pub fn replace_live(&mut self, mut points: Vec<SeriesPoint>) {
        if points.len() > LIVE_SERIES_CAP {
            points.drain(..points.len() - LIVE_SERIES_CAP);
        }
        self.live = points;
    }

    /// Replace the historical buffer with feed-supplied long-range samples,
    /// keeping only the newest points within the cap.
    pub fn replace_historical(&mut self, mut points: Vec<SeriesPoint>) {
        if points.len() > HISTORICAL_SERIES_CAP {
            points.drain(..points.len() - HISTORICAL_SERIES_CAP);
        }
        self.historical = points;
    }

    /// The raw buffer backing a chart window.
    #[must_use]
    pub fn window(&self, window: ChartWindow) -> &[SeriesPoint] {
        match window {
            ChartWindow::Live => &self.live,
            ChartWindow::Historical => &self.historical,
        }
    }
}
