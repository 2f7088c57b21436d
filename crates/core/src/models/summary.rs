use serde::{Deserialize, Serialize};

use super::asset::AssetId;

/// Aggregate valuation of the portfolio against the latest snapshots.
///
/// Recomputed from scratch on every batch and every ledger mutation,
/// never persisted. All percentage fields are defined as 0 when their
/// denominator is 0, so the summary is always renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Market value of all priced holdings, in USD
    pub total_value_usd: f64,

    /// Cost basis of all priced holdings, in USD
    pub total_cost_usd: f64,

    /// `total_value_usd - total_cost_usd`
    pub total_unrealized_pnl_usd: f64,

    /// Unrealized P&L as a percentage of cost (0 when cost is 0)
    pub total_unrealized_pnl_pct: f64,

    /// Portfolio value change over the last 24h, in USD
    pub total_change_24h_usd: f64,

    /// Per-asset breakdown, sorted by value (largest first)
    pub positions: Vec<PositionSummary>,
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self {
            total_value_usd: 0.0,
            total_cost_usd: 0.0,
            total_unrealized_pnl_usd: 0.0,
            total_unrealized_pnl_pct: 0.0,
            total_change_24h_usd: 0.0,
            positions: Vec::new(),
        }
    }
}

/// Valuation of a single held asset. Only holdings with a streamed
/// snapshot appear here — unpriced holdings contribute zero to the totals
/// and are omitted until their first snapshot arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub asset_id: AssetId,

    /// Units held
    pub quantity: f64,

    /// Weighted-average cost per unit
    pub average_cost: f64,

    /// Cost basis of the position (`quantity × average_cost`)
    pub cost_basis_usd: f64,

    /// Market value (`quantity × snapshot price`)
    pub value_usd: f64,

    /// `value_usd - cost_basis_usd`
    pub unrealized_pnl_usd: f64,

    /// Unrealized P&L as a percentage of cost (0 when cost is 0)
    pub unrealized_pnl_pct: f64,

    /// Position value change over the last 24h, in USD
    pub change_24h_usd: f64,

    /// This position's share of total portfolio value, in percent
    pub allocation_pct: f64,
}
