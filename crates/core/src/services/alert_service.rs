use crate::errors::CoreError;
use crate::models::alert::{Alert, AlertCondition};
use crate::models::snapshot::PriceSnapshot;

/// Outcome of evaluating one alert against one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    /// The alert did not trigger (inactive, wrong asset, or condition unmet)
    NoChange,
    /// The condition is satisfied — the caller must deactivate the alert
    /// and emit the fired event exactly once
    Fired,
}

/// Evaluates one-shot price alerts against incoming snapshots.
///
/// Each alert is independent; evaluation order across alerts carries no
/// meaning. State transitions (Active → Fired) belong to the caller —
/// this service only decides.
pub struct AlertService;

impl AlertService {
    pub fn new() -> Self {
        Self
    }

    /// Validate an alert's threshold before creation.
    pub fn validate_target(&self, target_price: f64) -> Result<(), CoreError> {
        if target_price <= 0.0 || !target_price.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Alert target price must be positive, got {target_price}"
            )));
        }
        Ok(())
    }

    /// Evaluate an alert against a snapshot.
    ///
    /// Returns `NoChange` unless the alert is active, watches the
    /// snapshot's asset, and its threshold is met. Both boundaries are
    /// inclusive: a price exactly at the target triggers in either
    /// direction.
    pub fn evaluate(&self, alert: &Alert, snapshot: &PriceSnapshot) -> AlertOutcome {
        if !alert.active || alert.asset_id != snapshot.asset_id {
            return AlertOutcome::NoChange;
        }

        let satisfied = match alert.condition {
            AlertCondition::Above => snapshot.price_usd >= alert.target_price,
            AlertCondition::Below => snapshot.price_usd <= alert.target_price,
        };

        if satisfied {
            AlertOutcome::Fired
        } else {
            AlertOutcome::NoChange
        }
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}
