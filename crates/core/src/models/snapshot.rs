use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::asset::AssetId;

/// The latest known market data for one asset at one point in time.
///
/// A snapshot fully supersedes the previous one for the same asset.
/// The year/market-cap figures come from the optional `stats` block of the
/// transport feed; when a batch entry omits it, the previous snapshot's
/// values are carried forward (see `CryptoDashboard::on_snapshot_batch`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub asset_id: AssetId,

    /// Current price in USD
    pub price_usd: f64,

    /// 24-hour price change, in percent (may be negative)
    pub change_24h_pct: f64,

    /// 24-hour traded volume in USD
    pub volume_24h_usd: f64,

    /// Market capitalization in USD
    pub market_cap_usd: f64,

    /// 52-week high in USD
    pub year_high: f64,

    /// 52-week low in USD
    pub year_low: f64,

    /// 1-year price change, in percent
    pub year_change_pct: f64,

    /// When this snapshot was observed (the batch timestamp)
    pub observed_at: DateTime<Utc>,
}

/// Holds the latest snapshot per asset. Pure data holder — updated by the
/// dashboard on each batch, read by valuation and alert evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotStore {
    entries: HashMap<AssetId, PriceSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the snapshot for an asset.
    pub fn insert(&mut self, snapshot: PriceSnapshot) {
        self.entries.insert(snapshot.asset_id.clone(), snapshot);
    }

    /// Get the latest snapshot for an asset, if any has been streamed.
    #[must_use]
    pub fn get(&self, asset_id: &AssetId) -> Option<&PriceSnapshot> {
        self.entries.get(asset_id)
    }

    /// Iterate over all current snapshots.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &PriceSnapshot)> {
        self.entries.iter()
    }

    /// Asset ids with a known snapshot, sorted for deterministic display.
    #[must_use]
    pub fn asset_ids(&self) -> Vec<&AssetId> {
        let mut ids: Vec<&AssetId> = self.entries.keys().collect();
        ids.sort();
        ids
    }

    /// Number of assets with a known snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
