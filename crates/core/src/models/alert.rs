use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::AssetId;

/// Trigger direction of a price alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCondition {
    /// Fires when the price reaches or exceeds the target
    Above,
    /// Fires when the price reaches or falls below the target
    Below,
}

impl std::fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertCondition::Above => write!(f, "Above"),
            AlertCondition::Below => write!(f, "Below"),
        }
    }
}

/// A one-shot price alert.
///
/// Lifecycle: created active; once the condition is satisfied it is
/// marked inactive (fired) and never evaluated again. There is no
/// automatic re-arm — the user creates a new alert instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique identifier
    pub id: Uuid,

    /// The asset this alert watches
    pub asset_id: AssetId,

    /// Price threshold in USD (always positive)
    pub target_price: f64,

    /// Trigger direction
    pub condition: AlertCondition,

    /// `true` until the alert fires
    pub active: bool,

    /// When the alert was created
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        asset_id: AssetId,
        condition: AlertCondition,
        target_price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id,
            target_price,
            condition,
            active: true,
            created_at,
        }
    }
}

/// Record of an alert firing, exposed to the presentation layer.
///
/// `seq` increases monotonically across the session and serves as the
/// cursor for `fired_alerts_since`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredAlert {
    /// Session-wide monotonic sequence number (starts at 1)
    pub seq: u64,

    /// Id of the alert that fired
    pub alert_id: Uuid,

    /// The watched asset
    pub asset_id: AssetId,

    /// Trigger direction of the alert
    pub condition: AlertCondition,

    /// The configured threshold
    pub target_price: f64,

    /// The snapshot price that satisfied the condition
    pub price_usd: f64,

    /// When the triggering snapshot was observed
    pub fired_at: DateTime<Utc>,
}
