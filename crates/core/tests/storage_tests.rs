// ═══════════════════════════════════════════════════════════════════
// Storage Tests — KeyValueStore, state document format, and the
// save/load cycle through the facade
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, TimeZone, Utc};

use crypto_dashboard_core::errors::CoreError;
use crypto_dashboard_core::models::alert::AlertCondition;
use crypto_dashboard_core::models::asset::AssetId;
use crypto_dashboard_core::models::batch::{AssetUpdate, CurrentQuote, SnapshotBatch};
use crypto_dashboard_core::models::transaction::TransactionKind;
use crypto_dashboard_core::storage::format::{self, StateDocument, CURRENT_VERSION, STATE_KEY};
use crypto_dashboard_core::storage::keyvalue::{KeyValueStore, MemoryStore};
use crypto_dashboard_core::CryptoDashboard;

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn load_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.load("anything").unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        store.save("k", "v1").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v1"));
        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  State document format
// ═══════════════════════════════════════════════════════════════════

mod state_document {
    use super::*;

    #[test]
    fn roundtrip_empty_document() {
        let doc = StateDocument::new(Vec::new(), Vec::new());
        let raw = format::write_document(&doc).unwrap();
        let back = format::read_document(&raw).unwrap();
        assert_eq!(back.version, CURRENT_VERSION);
        assert!(back.transactions.is_empty());
        assert!(back.alerts.is_empty());
    }

    #[test]
    fn rejects_future_version() {
        let raw = r#"{"version": 999, "transactions": [], "alerts": []}"#;
        assert!(matches!(
            format::read_document(raw),
            Err(CoreError::UnsupportedVersion(999))
        ));
    }

    #[test]
    fn rejects_version_zero() {
        let raw = r#"{"version": 0, "transactions": [], "alerts": []}"#;
        assert!(matches!(
            format::read_document(raw),
            Err(CoreError::UnsupportedVersion(0))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            format::read_document("not json at all"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let raw = r#"{"version": 1}"#;
        let doc = format::read_document(raw).unwrap();
        assert!(doc.transactions.is_empty());
        assert!(doc.alerts.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Facade save/load cycle
// ═══════════════════════════════════════════════════════════════════

mod save_load {
    use super::*;

    #[test]
    fn empty_store_yields_empty_dashboard() {
        let store = MemoryStore::new();
        let dashboard = CryptoDashboard::load_from_store(&store).unwrap();
        assert!(dashboard.transactions().is_empty());
        assert!(dashboard.alerts().is_empty());
        assert!(!dashboard.has_unsaved_changes());
    }

    #[test]
    fn roundtrip_preserves_ledger_and_alerts() {
        let mut dashboard = CryptoDashboard::new();
        dashboard
            .add_transaction_with_notes(
                AssetId::from("bitcoin"),
                TransactionKind::Buy,
                1.0,
                50_000.0,
                10.0,
                ts(1),
                "cold wallet",
            )
            .unwrap();
        dashboard
            .add_transaction(
                AssetId::from("ethereum"),
                TransactionKind::Buy,
                4.0,
                2_000.0,
                5.0,
                ts(2),
            )
            .unwrap();
        let alert_id = dashboard
            .create_alert(AssetId::from("bitcoin"), AlertCondition::Above, 100_000.0)
            .unwrap();

        assert!(dashboard.has_unsaved_changes());
        let mut store = MemoryStore::new();
        dashboard.save_to_store(&mut store).unwrap();
        assert!(!dashboard.has_unsaved_changes());
        assert!(store.load(STATE_KEY).unwrap().is_some());

        let restored = CryptoDashboard::load_from_store(&store).unwrap();
        assert_eq!(restored.transactions(), dashboard.transactions());
        assert_eq!(restored.alerts().len(), 1);
        assert_eq!(restored.alerts()[0].id, alert_id);

        // Holdings are rebuilt on load, not persisted
        let btc = &restored.holdings()[&AssetId::from("bitcoin")];
        assert!((btc.total_cost_basis - 50_010.0).abs() < 1e-6);
    }

    #[test]
    fn fired_state_survives_roundtrip() {
        let mut dashboard = CryptoDashboard::new();
        dashboard
            .create_alert(AssetId::from("bitcoin"), AlertCondition::Above, 80_000.0)
            .unwrap();

        let mut batch = SnapshotBatch::new(ts(10));
        batch.assets.insert(
            AssetId::from("bitcoin"),
            AssetUpdate {
                current: Some(CurrentQuote {
                    usd: Some(85_000.0),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        dashboard.on_snapshot_batch(batch);
        assert!(!dashboard.alerts()[0].active);

        let mut store = MemoryStore::new();
        dashboard.save_to_store(&mut store).unwrap();

        // A fired alert must stay fired after restart — no re-trigger
        let restored = CryptoDashboard::load_from_store(&store).unwrap();
        assert!(!restored.alerts()[0].active);
    }

    #[test]
    fn transaction_ids_continue_after_reload() {
        let mut dashboard = CryptoDashboard::new();
        let first = dashboard
            .add_transaction(
                AssetId::from("bitcoin"),
                TransactionKind::Buy,
                1.0,
                50_000.0,
                0.0,
                ts(1),
            )
            .unwrap();
        let mut store = MemoryStore::new();
        dashboard.save_to_store(&mut store).unwrap();

        let mut restored = CryptoDashboard::load_from_store(&store).unwrap();
        let next = restored
            .add_transaction(
                AssetId::from("bitcoin"),
                TransactionKind::Buy,
                1.0,
                60_000.0,
                0.0,
                ts(2),
            )
            .unwrap();
        assert!(next > first);
    }

    #[test]
    fn corrupt_document_does_not_load() {
        let mut store = MemoryStore::new();
        store.save(STATE_KEY, "{{{{").unwrap();
        assert!(CryptoDashboard::load_from_store(&store).is_err());
    }

    #[test]
    fn invalid_persisted_transaction_rejected_wholesale() {
        // A hand-edited document with a bad quantity must not half-load.
        let raw = r#"{
            "version": 1,
            "transactions": [
                {
                    "id": 1, "asset_id": "bitcoin", "kind": "Buy",
                    "quantity": 1.0, "unit_price": 50000.0, "fees": 0.0,
                    "occurred_at": "2024-01-01T00:00:00Z"
                },
                {
                    "id": 2, "asset_id": "bitcoin", "kind": "Buy",
                    "quantity": -5.0, "unit_price": 50000.0, "fees": 0.0,
                    "occurred_at": "2024-01-02T00:00:00Z"
                }
            ],
            "alerts": []
        }"#;
        let mut store = MemoryStore::new();
        store.save(STATE_KEY, raw).unwrap();
        assert!(matches!(
            CryptoDashboard::load_from_store(&store),
            Err(CoreError::ValidationError(_))
        ));
    }
}
