use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::asset::AssetId;
use super::series::SeriesPoint;
use super::snapshot::PriceSnapshot;

/// One update delivered by the transport layer: a set of per-asset
/// updates observed at a single point in time.
///
/// The shape mirrors the feed's JSON (`{"type": "crypto_update",
/// "data": {...}, "timestamp": ...}` minus the envelope): every field an
/// asset entry may or may not carry is an explicit `Option` or defaulted
/// list — presence is checked, never probed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotBatch {
    /// Per-asset updates, keyed by asset id
    #[serde(default)]
    pub assets: HashMap<AssetId, AssetUpdate>,

    /// When the batch was observed (stamped onto every snapshot)
    #[serde(default = "Utc::now")]
    pub observed_at: DateTime<Utc>,
}

impl SnapshotBatch {
    pub fn new(observed_at: DateTime<Utc>) -> Self {
        Self {
            assets: HashMap::new(),
            observed_at,
        }
    }
}

/// Update for a single asset within a batch.
///
/// `current` is required for the entry to be usable; `stats` and the raw
/// series arrays are optional extras the feed sends when it has them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetUpdate {
    /// Latest quote. An entry without it (or without a price inside it)
    /// is malformed and skipped.
    #[serde(default)]
    pub current: Option<CurrentQuote>,

    /// Year-range and market-cap figures, when the feed has refreshed them
    #[serde(default)]
    pub stats: Option<AssetStats>,

    /// Raw live-window samples (parallel to `timestamps`), replacing the
    /// live buffer when non-empty
    #[serde(default)]
    pub prices: Vec<f64>,
    #[serde(default)]
    pub timestamps: Vec<DateTime<Utc>>,

    /// Raw long-range samples (parallel to `historical_timestamps`),
    /// replacing the historical buffer when non-empty
    #[serde(default)]
    pub historical_prices: Vec<f64>,
    #[serde(default)]
    pub historical_timestamps: Vec<DateTime<Utc>>,
}

/// The feed's current-quote block. Field names match the wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentQuote {
    /// Price in USD. Absent on malformed entries.
    #[serde(default)]
    pub usd: Option<f64>,

    /// 24h change in percent
    #[serde(default)]
    pub usd_24h_change: f64,

    /// 24h volume in USD
    #[serde(default)]
    pub usd_24h_vol: f64,
}

/// The feed's optional stats block. Field names match the wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetStats {
    #[serde(default)]
    pub year_high: f64,
    #[serde(default)]
    pub year_low: f64,
    #[serde(default)]
    pub year_change: f64,
    #[serde(default)]
    pub market_cap: f64,
}

impl AssetUpdate {
    /// Build the snapshot this update describes, or `None` when the entry
    /// is malformed (no current price).
    ///
    /// Stats fall back to the previous snapshot so a feed that only
    /// refreshes quotes doesn't blank out year-range figures.
    #[must_use]
    pub fn to_snapshot(
        &self,
        asset_id: &AssetId,
        observed_at: DateTime<Utc>,
        previous: Option<&PriceSnapshot>,
    ) -> Option<PriceSnapshot> {
        let current = self.current.as_ref()?;
        let price_usd = current.usd?;

        let (market_cap_usd, year_high, year_low, year_change_pct) = match &self.stats {
            Some(stats) => (
                stats.market_cap,
                stats.year_high,
                stats.year_low,
                stats.year_change,
            ),
            None => previous.map_or((0.0, 0.0, 0.0, 0.0), |prev| {
                (
                    prev.market_cap_usd,
                    prev.year_high,
                    prev.year_low,
                    prev.year_change_pct,
                )
            }),
        };

        Some(PriceSnapshot {
            asset_id: asset_id.clone(),
            price_usd,
            change_24h_pct: current.usd_24h_change,
            volume_24h_usd: current.usd_24h_vol,
            market_cap_usd,
            year_high,
            year_low,
            year_change_pct,
            observed_at,
        })
    }

    /// Zip the live-window arrays into series points, dropping any
    /// unpaired trailing values.
    #[must_use]
    pub fn live_points(&self) -> Vec<SeriesPoint> {
        Self::zip_points(&self.prices, &self.timestamps)
    }

    /// Zip the long-range arrays into series points.
    #[must_use]
    pub fn historical_points(&self) -> Vec<SeriesPoint> {
        Self::zip_points(&self.historical_prices, &self.historical_timestamps)
    }

    fn zip_points(prices: &[f64], timestamps: &[DateTime<Utc>]) -> Vec<SeriesPoint> {
        timestamps
            .iter()
            .zip(prices.iter())
            .map(|(&timestamp, &price)| SeriesPoint { timestamp, price })
            .collect()
    }
}
