use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::asset::AssetId;
use crate::models::holding::Holding;
use crate::models::transaction::{Transaction, TransactionKind};

/// Projects the transaction ledger into current holdings with
/// weighted-average cost basis.
///
/// Pure business logic — no I/O, no clocks. The projection is always a
/// full rebuild from the ordered ledger, never an incremental patch, so
/// holdings can never drift from the transaction history regardless of
/// how the ledger was edited or replayed.
pub struct LedgerService;

/// Quantities below this are treated as a closed position
/// (guards float residue after selling a full position).
const QUANTITY_EPSILON: f64 = 1e-9;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a transaction before it enters the ledger.
    ///
    /// Rules:
    /// - Quantity must be positive
    /// - Unit price and fees must not be negative
    ///
    /// Oversells are deliberately not rejected: the projection defines
    /// their outcome (the position closes and drops out of holdings).
    pub fn validate(&self, tx: &Transaction) -> Result<(), CoreError> {
        if tx.quantity <= 0.0 || !tx.quantity.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Transaction quantity must be positive, got {}",
                tx.quantity
            )));
        }
        if tx.unit_price < 0.0 || !tx.unit_price.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Transaction unit price must not be negative, got {}",
                tx.unit_price
            )));
        }
        if tx.fees < 0.0 || !tx.fees.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Transaction fees must not be negative, got {}",
                tx.fees
            )));
        }
        Ok(())
    }

    /// Rebuild current holdings from the full ledger.
    ///
    /// Transactions are processed in the order supplied — the caller keeps
    /// the ledger in chronological order; no sorting happens here.
    ///
    /// - Buy: `quantity += qty`, `basis += qty × unit_price + fees`
    /// - Sell: `basis -= qty × average_cost` (average cost *before* the
    ///   sale), then `quantity -= qty`. Realized gain/loss from the sale
    ///   is not tracked at this layer.
    ///
    /// Assets whose final quantity is zero or below are excluded from the
    /// returned mapping. O(transactions); assumes validated input.
    pub fn project_holdings(&self, transactions: &[Transaction]) -> HashMap<AssetId, Holding> {
        let mut quantities: HashMap<AssetId, f64> = HashMap::new();
        let mut bases: HashMap<AssetId, f64> = HashMap::new();

        for tx in transactions {
            let quantity = quantities.entry(tx.asset_id.clone()).or_insert(0.0);
            let basis = bases.entry(tx.asset_id.clone()).or_insert(0.0);

            match tx.kind {
                TransactionKind::Buy => {
                    *quantity += tx.quantity;
                    *basis += tx.quantity * tx.unit_price + tx.fees;
                }
                TransactionKind::Sell => {
                    // Average cost at the moment of the sale
                    let average_cost = if *quantity > QUANTITY_EPSILON {
                        *basis / *quantity
                    } else {
                        0.0
                    };
                    *basis -= tx.quantity * average_cost;
                    *quantity -= tx.quantity;
                }
            }
        }

        let mut holdings = HashMap::new();
        for (asset_id, quantity) in quantities {
            if quantity <= QUANTITY_EPSILON {
                continue; // position closed (or oversold) — no zero rows
            }
            let total_cost_basis = bases.get(&asset_id).copied().unwrap_or(0.0).max(0.0);
            holdings.insert(
                asset_id.clone(),
                Holding {
                    asset_id,
                    quantity,
                    total_cost_basis,
                    average_cost: total_cost_basis / quantity,
                },
            );
        }
        holdings
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
