use serde::{Deserialize, Serialize};

use super::Asset;

/// Length of a strkey-encoded public account address.
pub const ACCOUNT_ADDRESS_LEN: usize = 56;

/// Snapshot of a ledger account as returned by a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub sequence: i64,
    pub subentry_count: u32,
    pub home_domain: Option<String>,
    pub balances: Vec<Balance>,
    pub signers: Vec<Signer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: Asset,
    /// Decimal amount string, e.g. "100.0000000"
    pub amount: String,
    /// Trustline limit; absent for the native balance.
    pub limit: Option<String>,
}

impl Balance {
    pub fn native(amount: impl Into<String>) -> Self {
        Self {
            asset: Asset::Native,
            amount: amount.into(),
            limit: None,
        }
    }

    pub fn trustline(asset: Asset, amount: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            asset,
            amount: amount.into(),
            limit: Some(limit.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub key: String,
    pub weight: u32,
}

/// Check that `address` looks like a public account address:
/// 56 characters of the base32 alphabet starting with `G`.
pub fn is_valid_account_address(address: &str) -> bool {
    address.len() == ACCOUNT_ADDRESS_LEN
        && address.starts_with('G')
        && address
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
}
