pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use errors::CoreError;
use models::{
    alert::{Alert, AlertCondition, FiredAlert},
    asset::AssetId,
    batch::SnapshotBatch,
    holding::Holding,
    series::{AssetSeries, ChartWindow, SeriesPoint},
    snapshot::{PriceSnapshot, SnapshotStore},
    summary::PortfolioSummary,
    transaction::{Transaction, TransactionKind},
};
use services::{
    alert_service::{AlertOutcome, AlertService},
    chart_service::ChartService,
    ledger_service::LedgerService,
    valuation_service::ValuationService,
};
use storage::format::{self, StateDocument};
use storage::keyvalue::KeyValueStore;

/// Main entry point for the crypto dashboard core.
///
/// Owns all mutable state — the snapshot store, per-asset chart buffers,
/// the transaction ledger, the alert list, and the derived holdings and
/// summary caches. The transport collaborator pushes snapshot batches in;
/// the presentation collaborator reads the query methods back out.
///
/// Processing is single-threaded and synchronous: each batch runs to
/// completion (store → ledger projection → valuation → alerts) before the
/// next is accepted. A multi-threaded embedding must serialize access to
/// this struct behind a single writer lock.
#[must_use]
pub struct CryptoDashboard {
    snapshots: SnapshotStore,
    series: HashMap<AssetId, AssetSeries>,
    transactions: Vec<Transaction>,
    alerts: Vec<Alert>,
    fired_alerts: Vec<FiredAlert>,

    /// Derived caches, rebuilt from the ledger on every relevant change —
    /// never patched incrementally.
    holdings: HashMap<AssetId, Holding>,
    summary: PortfolioSummary,

    ledger_service: LedgerService,
    valuation_service: ValuationService,
    alert_service: AlertService,
    chart_service: ChartService,

    next_transaction_id: u64,
    next_fired_seq: u64,

    /// Tracks whether persisted state (ledger/alerts) changed since the
    /// last save/load.
    dirty: bool,
}

impl std::fmt::Debug for CryptoDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoDashboard")
            .field("assets", &self.snapshots.len())
            .field("transactions", &self.transactions.len())
            .field("alerts", &self.alerts.len())
            .field("fired_alerts", &self.fired_alerts.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl CryptoDashboard {
    /// Create a dashboard with an empty ledger and no alerts.
    pub fn new() -> Self {
        Self::build(Vec::new(), Vec::new())
    }

    /// Seed the dashboard from persisted state (the ordered transaction
    /// ledger and the alert list). All transactions are validated first;
    /// if any fails, nothing is loaded (all-or-nothing).
    pub fn with_state(
        transactions: Vec<Transaction>,
        alerts: Vec<Alert>,
    ) -> Result<Self, CoreError> {
        let ledger_service = LedgerService::new();
        for tx in &transactions {
            ledger_service.validate(tx)?;
        }
        Ok(Self::build(transactions, alerts))
    }

    /// Load persisted state from the key-value collaborator.
    /// A store with no saved document yields an empty dashboard.
    pub fn load_from_store(store: &dyn KeyValueStore) -> Result<Self, CoreError> {
        match store.load(format::STATE_KEY)? {
            Some(raw) => {
                let document = format::read_document(&raw)?;
                Self::with_state(document.transactions, document.alerts)
            }
            None => Ok(Self::new()),
        }
    }

    /// Save the ledger and alert list to the key-value collaborator.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_store(&mut self, store: &mut dyn KeyValueStore) -> Result<(), CoreError> {
        let document = StateDocument::new(self.transactions.clone(), self.alerts.clone());
        let raw = format::write_document(&document)?;
        store.save(format::STATE_KEY, &raw)?;
        self.dirty = false;
        Ok(())
    }

    // ── Snapshot Ingestion ──────────────────────────────────────────

    /// Apply one snapshot batch from the transport layer.
    ///
    /// Per asset entry: a missing current price marks the entry malformed
    /// and it is skipped — the rest of the batch still applies. Valid
    /// entries update the snapshot store and the chart buffers. The
    /// portfolio summary is then recomputed and every active alert is
    /// evaluated against the latest snapshot of its asset.
    ///
    /// Returns the alerts fired by this batch, in addition to recording
    /// them for `fired_alerts_since`.
    pub fn on_snapshot_batch(&mut self, batch: SnapshotBatch) -> Vec<FiredAlert> {
        for (asset_id, update) in &batch.assets {
            let previous = self.snapshots.get(asset_id);
            let Some(snapshot) = update.to_snapshot(asset_id, batch.observed_at, previous) else {
                continue; // malformed entry — skip, keep the rest of the batch
            };

            let series = self.series.entry(asset_id.clone()).or_default();
            let live_points = update.live_points();
            if live_points.is_empty() {
                series.push_live(SeriesPoint {
                    timestamp: batch.observed_at,
                    price: snapshot.price_usd,
                });
            } else {
                series.replace_live(live_points);
            }
            let historical_points = update.historical_points();
            if !historical_points.is_empty() {
                series.replace_historical(historical_points);
            }

            self.snapshots.insert(snapshot);
        }

        self.rebuild_derived_state();
        self.evaluate_alerts()
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// Record a buy/sell transaction. Returns its assigned id.
    ///
    /// The transaction is validated, inserted at its chronological
    /// position, and holdings plus summary are rebuilt from the full
    /// ledger.
    pub fn add_transaction(
        &mut self,
        asset_id: AssetId,
        kind: TransactionKind,
        quantity: f64,
        unit_price: f64,
        fees: f64,
        occurred_at: DateTime<Utc>,
    ) -> Result<u64, CoreError> {
        let tx = Transaction::new(
            self.next_transaction_id,
            asset_id,
            kind,
            quantity,
            unit_price,
            fees,
            occurred_at,
        );
        self.commit_transaction(tx)
    }

    /// Record a transaction with notes attached.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transaction_with_notes(
        &mut self,
        asset_id: AssetId,
        kind: TransactionKind,
        quantity: f64,
        unit_price: f64,
        fees: f64,
        occurred_at: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> Result<u64, CoreError> {
        let tx = Transaction::with_notes(
            self.next_transaction_id,
            asset_id,
            kind,
            quantity,
            unit_price,
            fees,
            occurred_at,
            notes,
        );
        self.commit_transaction(tx)
    }

    /// Remove a transaction by id. Safe at any position in the ledger —
    /// holdings are re-projected from the remaining transactions.
    pub fn remove_transaction(&mut self, id: u64) -> Result<(), CoreError> {
        let idx = self
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        self.transactions.remove(idx);
        self.rebuild_derived_state();
        self.dirty = true;
        Ok(())
    }

    /// Get a single transaction by id.
    #[must_use]
    pub fn get_transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// The full ledger, oldest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    // ── Alerts ──────────────────────────────────────────────────────

    /// Create a price alert. Returns its id. The alert starts active and
    /// fires at most once; create a new alert to re-arm.
    pub fn create_alert(
        &mut self,
        asset_id: AssetId,
        condition: AlertCondition,
        target_price: f64,
    ) -> Result<Uuid, CoreError> {
        self.alert_service.validate_target(target_price)?;
        let alert = Alert::new(asset_id, condition, target_price, Utc::now());
        let id = alert.id;
        self.alerts.push(alert);
        self.dirty = true;
        Ok(id)
    }

    /// Remove an alert by id.
    pub fn remove_alert(&mut self, id: Uuid) -> Result<(), CoreError> {
        let idx = self
            .alerts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CoreError::AlertNotFound(id.to_string()))?;
        self.alerts.remove(idx);
        self.dirty = true;
        Ok(())
    }

    /// All alerts, fired ones included (listed as inactive).
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Fired-alert events with a sequence number greater than `cursor`.
    /// Pass 0 for all events of the session; pass the last seen `seq`
    /// to receive only newer ones.
    #[must_use]
    pub fn fired_alerts_since(&self, cursor: u64) -> Vec<FiredAlert> {
        let start = self.fired_alerts.partition_point(|f| f.seq <= cursor);
        self.fired_alerts[start..].to_vec()
    }

    /// Sequence number of the most recent fired alert (0 when none fired).
    #[must_use]
    pub fn fired_alert_cursor(&self) -> u64 {
        self.next_fired_seq - 1
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Latest snapshot for an asset, if one has been streamed.
    #[must_use]
    pub fn current_snapshot(&self, asset_id: &AssetId) -> Option<&PriceSnapshot> {
        self.snapshots.get(asset_id)
    }

    /// Asset ids with a known snapshot, sorted.
    #[must_use]
    pub fn tracked_assets(&self) -> Vec<&AssetId> {
        self.snapshots.asset_ids()
    }

    /// Current holdings, as projected from the ledger.
    #[must_use]
    pub fn holdings(&self) -> &HashMap<AssetId, Holding> {
        &self.holdings
    }

    /// The portfolio summary as of the last batch or ledger mutation.
    #[must_use]
    pub fn summary(&self) -> &PortfolioSummary {
        &self.summary
    }

    /// Chart-ready series for one asset and window, decimated to the
    /// window's point budget. Unknown assets yield an empty series.
    #[must_use]
    pub fn chart_series(&self, asset_id: &AssetId, window: ChartWindow) -> Vec<SeriesPoint> {
        match self.series.get(asset_id) {
            Some(series) => self
                .chart_service
                .decimate(series.window(window), window.max_points()),
            None => Vec::new(),
        }
    }

    /// Returns `true` if ledger or alert state changed since the last
    /// save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(transactions: Vec<Transaction>, alerts: Vec<Alert>) -> Self {
        let next_transaction_id = transactions.iter().map(|tx| tx.id).max().map_or(1, |m| m + 1);

        let mut dashboard = Self {
            snapshots: SnapshotStore::new(),
            series: HashMap::new(),
            transactions,
            alerts,
            fired_alerts: Vec::new(),
            holdings: HashMap::new(),
            summary: PortfolioSummary::default(),
            ledger_service: LedgerService::new(),
            valuation_service: ValuationService::new(),
            alert_service: AlertService::new(),
            chart_service: ChartService::new(),
            next_transaction_id,
            next_fired_seq: 1,
            dirty: false,
        };
        dashboard.rebuild_derived_state();
        dashboard
    }

    fn commit_transaction(&mut self, tx: Transaction) -> Result<u64, CoreError> {
        self.ledger_service.validate(&tx)?;
        let id = tx.id;
        // Binary insert keeps the ledger chronological (O(log n) search)
        let pos = self
            .transactions
            .binary_search_by_key(&tx.occurred_at, |t| t.occurred_at)
            .unwrap_or_else(|pos| pos);
        self.transactions.insert(pos, tx);
        self.next_transaction_id += 1;
        self.rebuild_derived_state();
        self.dirty = true;
        Ok(id)
    }

    /// Rebuild the holdings projection and the summary from the ledger
    /// and the current snapshots. Full rebuild only — the caches must
    /// never drift from the ledger.
    fn rebuild_derived_state(&mut self) {
        self.holdings = self.ledger_service.project_holdings(&self.transactions);
        self.summary = self
            .valuation_service
            .summarize(&self.holdings, &self.snapshots);
    }

    /// Evaluate all active alerts against the latest snapshots.
    /// Firing deactivates the alert and records the event exactly once.
    fn evaluate_alerts(&mut self) -> Vec<FiredAlert> {
        let mut fired = Vec::new();

        for alert in &mut self.alerts {
            if !alert.active {
                continue;
            }
            let Some(snapshot) = self.snapshots.get(&alert.asset_id) else {
                continue;
            };
            if self.alert_service.evaluate(alert, snapshot) == AlertOutcome::Fired {
                alert.active = false;
                let event = FiredAlert {
                    seq: self.next_fired_seq,
                    alert_id: alert.id,
                    asset_id: alert.asset_id.clone(),
                    condition: alert.condition,
                    target_price: alert.target_price,
                    price_usd: snapshot.price_usd,
                    fired_at: snapshot.observed_at,
                };
                self.next_fired_seq += 1;
                self.fired_alerts.push(event.clone());
                fired.push(event);
                self.dirty = true;
            }
        }

        fired
    }
}

impl Default for CryptoDashboard {
    fn default() -> Self {
        Self::new()
    }
}
