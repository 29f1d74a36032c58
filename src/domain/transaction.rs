use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of a hex-encoded transaction hash.
pub const TRANSACTION_HASH_LEN: usize = 64;

/// A transaction committed to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub ledger: u32,
    pub created_at: DateTime<Utc>,
    pub source_account: String,
    /// Fee actually charged, in stroops.
    pub fee_charged: u64,
    pub memo: Option<String>,
    pub successful: bool,
    pub operation_count: u32,
}

/// Check that `hash` is exactly 64 hexadecimal characters.
pub fn is_valid_transaction_hash(hash: &str) -> bool {
    hash.len() == TRANSACTION_HASH_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit())
}
