use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::alert::Alert;
use crate::models::transaction::Transaction;

/// Store key under which the dashboard state document lives.
pub const STATE_KEY: &str = "dashboard_state";

/// Current state document version.
pub const CURRENT_VERSION: u16 = 1;

/// The persisted portion of dashboard state: the transaction ledger and
/// the alert list. Everything else (snapshots, series buffers, holdings,
/// summary) is session state re-derivable from the stream and the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDocument {
    /// Document format version
    pub version: u16,

    /// The ordered transaction ledger
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// All alerts, fired ones included (they stay listed as inactive)
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl StateDocument {
    pub fn new(transactions: Vec<Transaction>, alerts: Vec<Alert>) -> Self {
        Self {
            version: CURRENT_VERSION,
            transactions,
            alerts,
        }
    }
}

/// Serialize a state document to the stored JSON string.
pub fn write_document(document: &StateDocument) -> Result<String, CoreError> {
    serde_json::to_string(document)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize state document: {e}")))
}

/// Parse a stored JSON string back into a state document.
/// Rejects versions this build does not understand.
pub fn read_document(raw: &str) -> Result<StateDocument, CoreError> {
    let document: StateDocument = serde_json::from_str(raw)?;
    if document.version == 0 || document.version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(document.version));
    }
    Ok(document)
}
