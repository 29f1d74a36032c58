use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    audit_trustlines, normalize, Account, NormalizedOperation, Operation, Signer, Transaction,
    TrustlineEntry,
};

/// Number of most recent operations scanned when counting payments.
pub const PAYMENT_WINDOW: usize = 200;

/// Number of recent transactions included in an account report.
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    pub account: String,
    pub sequence: i64,
    pub subentry_count: u32,
    pub home_domain: Option<String>,
    pub balances: Vec<BalanceLine>,
    pub signers: Vec<Signer>,
    /// Payments among the most recent `PAYMENT_WINDOW` operations.
    /// An approximation for busy accounts, not a lifetime count.
    pub total_payments: usize,
    /// Present only when recent transactions were requested.
    pub transactions: Option<Vec<TransactionSummary>>,
}

impl AccountReport {
    /// Signers are worth showing unless the account is only signed by its
    /// own master key.
    pub fn shows_signers(&self) -> bool {
        !matches!(self.signers.as_slice(), [only] if only.key == self.account)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    pub asset: String,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub hash: String,
    pub created_at: DateTime<Utc>,
    pub fee_charged: u64,
    pub successful: bool,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReport {
    pub hash: String,
    pub ledger: u32,
    pub created_at: DateTime<Utc>,
    pub source_account: String,
    pub fee_charged: u64,
    pub memo: Option<String>,
    pub successful: bool,
    pub operation_count: u32,
    pub operations: Vec<NormalizedOperation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustlineReport {
    pub account: String,
    pub network: String,
    pub trustlines: Vec<TrustlineEntry>,
}

impl TrustlineReport {
    pub fn zero_balance_count(&self) -> usize {
        self.trustlines.iter().filter(|t| t.zero_balance).count()
    }
}

/// Public key derived from a secret seed, optionally compared with an
/// expected address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyReport {
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
}

impl PublicKeyReport {
    /// True when an expected address was given and differs.
    pub fn is_mismatch(&self) -> bool {
        self.matches == Some(false)
    }
}

/// Summarise an account from its snapshot and a window of recent activity.
///
/// `recent_ops` is expected newest first; only the first `PAYMENT_WINDOW`
/// entries are counted.
pub fn build_account_report(
    account: &Account,
    recent_ops: &[Operation],
    recent_txs: Option<&[Transaction]>,
) -> AccountReport {
    let total_payments = recent_ops
        .iter()
        .take(PAYMENT_WINDOW)
        .filter(|op| op.is_payment())
        .count();

    let transactions = recent_txs.map(|txs| {
        let mut newest_first: Vec<&Transaction> = txs.iter().collect();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        newest_first
            .into_iter()
            .take(RECENT_TRANSACTIONS)
            .map(|tx| TransactionSummary {
                hash: tx.hash.clone(),
                created_at: tx.created_at,
                fee_charged: tx.fee_charged,
                successful: tx.successful,
                memo: tx.memo.clone(),
            })
            .collect()
    });

    AccountReport {
        account: account.id.clone(),
        sequence: account.sequence,
        subentry_count: account.subentry_count,
        home_domain: account.home_domain.clone(),
        balances: account
            .balances
            .iter()
            .map(|b| BalanceLine {
                asset: b.asset.to_string(),
                balance: b.amount.clone(),
            })
            .collect(),
        signers: account.signers.clone(),
        total_payments,
        transactions,
    }
}

/// Describe a transaction and its operations in ledger apply order.
pub fn build_transaction_report(tx: &Transaction, ops: &[Operation]) -> TransactionReport {
    TransactionReport {
        hash: tx.hash.clone(),
        ledger: tx.ledger,
        created_at: tx.created_at,
        source_account: tx.source_account.clone(),
        fee_charged: tx.fee_charged,
        memo: tx.memo.clone(),
        successful: tx.successful,
        operation_count: tx.operation_count,
        operations: ops
            .iter()
            .map(|op| normalize(op, &tx.source_account))
            .collect(),
    }
}

pub fn build_trustline_report(account: &Account, network: &str) -> TrustlineReport {
    TrustlineReport {
        account: account.id.clone(),
        network: network.to_string(),
        trustlines: audit_trustlines(account),
    }
}
