use serde::{Deserialize, Serialize};

use super::asset::AssetId;

/// Current position in one asset, derived from the transaction ledger.
///
/// Invariant: `average_cost = total_cost_basis / quantity` when
/// `quantity > 0`, else 0. Positions whose quantity drops to zero or
/// below are removed from the holdings map entirely — a zero row is
/// never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub asset_id: AssetId,

    /// Units currently held
    pub quantity: f64,

    /// Weighted-average acquisition cost of the position, in USD
    /// (buy fees included)
    pub total_cost_basis: f64,

    /// Cost per unit: `total_cost_basis / quantity`
    pub average_cost: f64,
}
