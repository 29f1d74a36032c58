use serde::{Deserialize, Serialize};

use super::{is_zero_amount, Account};

/// One non-native balance line of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustlineEntry {
    pub asset: String,
    pub balance: String,
    pub limit: String,
    pub zero_balance: bool,
}

/// List the account's trustlines in the order the ledger returned them.
/// The native balance is not a trustline and is skipped.
pub fn audit_trustlines(account: &Account) -> Vec<TrustlineEntry> {
    account
        .balances
        .iter()
        .filter(|b| !b.asset.is_native())
        .map(|b| TrustlineEntry {
            asset: b.asset.to_string(),
            balance: b.amount.clone(),
            limit: b.limit.clone().unwrap_or_default(),
            zero_balance: is_zero_amount(&b.amount),
        })
        .collect()
}
