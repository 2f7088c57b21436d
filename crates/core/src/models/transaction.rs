use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::AssetId;

/// Kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Buying / acquiring an asset
    Buy,
    /// Selling / disposing of an asset
    Sell,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "Buy"),
            TransactionKind::Sell => write!(f, "Sell"),
        }
    }
}

/// A single buy/sell entry in the portfolio ledger.
///
/// Transactions are immutable once recorded. The ordered ledger is the
/// single source of truth for holdings — holdings are always re-derived
/// from the full ledger, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, monotonically increasing across the ledger
    pub id: u64,

    /// The asset bought or sold
    pub asset_id: AssetId,

    /// Buy or Sell
    pub kind: TransactionKind,

    /// Amount of the asset (always positive)
    pub quantity: f64,

    /// Price paid/received per unit, in USD
    pub unit_price: f64,

    /// Exchange/network fees in USD (buy fees enter the cost basis)
    pub fees: f64,

    /// When the transaction occurred
    pub occurred_at: DateTime<Utc>,

    /// Optional free-text notes (e.g., exchange, memo)
    #[serde(default)]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        id: u64,
        asset_id: AssetId,
        kind: TransactionKind,
        quantity: f64,
        unit_price: f64,
        fees: f64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            asset_id,
            kind,
            quantity,
            unit_price,
            fees,
            occurred_at,
            notes: None,
        }
    }

    /// Create a transaction with notes attached.
    #[allow(clippy::too_many_arguments)]
    pub fn with_notes(
        id: u64,
        asset_id: AssetId,
        kind: TransactionKind,
        quantity: f64,
        unit_price: f64,
        fees: f64,
        occurred_at: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id,
            asset_id,
            kind,
            quantity,
            unit_price,
            fees,
            occurred_at,
            notes: Some(notes.into()),
        }
    }
}
