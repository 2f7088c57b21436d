use std::collections::HashMap;

use crate::models::asset::AssetId;
use crate::models::holding::Holding;
use crate::models::snapshot::SnapshotStore;
use crate::models::summary::{PortfolioSummary, PositionSummary};

/// Combines holdings with the latest snapshots into an aggregate
/// portfolio valuation.
///
/// Side-effect-free: every call builds a fresh summary from its inputs.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value the holdings against the snapshot store.
    ///
    /// Holdings without a streamed snapshot are skipped — they contribute
    /// zero to every total (and get no position row) until their first
    /// snapshot arrives, but they remain in the holdings map itself.
    ///
    /// All percentages are defined as 0 when the denominator is 0, so the
    /// summary is always renderable.
    pub fn summarize(
        &self,
        holdings: &HashMap<AssetId, Holding>,
        snapshots: &SnapshotStore,
    ) -> PortfolioSummary {
        let mut positions = Vec::new();
        let mut total_value_usd = 0.0;
        let mut total_cost_usd = 0.0;
        let mut total_change_24h_usd = 0.0;

        for (asset_id, holding) in holdings {
            let Some(snapshot) = snapshots.get(asset_id) else {
                continue; // not yet streamed
            };

            let value_usd = holding.quantity * snapshot.price_usd;
            let cost_basis_usd = holding.quantity * holding.average_cost;
            let change_24h_usd = value_usd * (snapshot.change_24h_pct / 100.0);

            total_value_usd += value_usd;
            total_cost_usd += cost_basis_usd;
            total_change_24h_usd += change_24h_usd;

            let unrealized_pnl_usd = value_usd - cost_basis_usd;
            positions.push(PositionSummary {
                asset_id: asset_id.clone(),
                quantity: holding.quantity,
                average_cost: holding.average_cost,
                cost_basis_usd,
                value_usd,
                unrealized_pnl_usd,
                unrealized_pnl_pct: if cost_basis_usd > 0.0 {
                    (unrealized_pnl_usd / cost_basis_usd) * 100.0
                } else {
                    0.0
                },
                change_24h_usd,
                allocation_pct: 0.0, // filled below, once the total is known
            });
        }

        for position in &mut positions {
            position.allocation_pct = if total_value_usd > 0.0 {
                (position.value_usd / total_value_usd) * 100.0
            } else {
                0.0
            };
        }

        // Largest positions first
        positions.sort_by(|a, b| {
            b.value_usd
                .partial_cmp(&a.value_usd)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_unrealized_pnl_usd = total_value_usd - total_cost_usd;
        PortfolioSummary {
            total_value_usd,
            total_cost_usd,
            total_unrealized_pnl_usd,
            total_unrealized_pnl_pct: if total_cost_usd > 0.0 {
                (total_unrealized_pnl_usd / total_cost_usd) * 100.0
            } else {
                0.0
            },
            total_change_24h_usd,
            positions,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
