use std::time::Duration;

use tracing::{debug, info};

use crate::domain::{
    is_valid_account_address, is_valid_transaction_hash, public_key_from_secret,
};
use crate::horizon::{
    HorizonClient, LedgerQuery, Network, OperationScope, Order, MAX_PAGE_LIMIT,
};

use super::{
    build_account_report, build_transaction_report, build_trustline_report, AccountReport,
    AppError, PublicKeyReport, TransactionReport, TrustlineReport, PAYMENT_WINDOW,
    RECENT_TRANSACTIONS,
};

/// Application service that validates identifiers, queries the ledger and
/// builds reports. This is the primary interface for any client (CLI, tests).
///
/// Every query failure aborts the report being built; nothing is retried.
pub struct InspectorService<Q> {
    query: Q,
    network: String,
}

impl InspectorService<HorizonClient> {
    /// Connect to the Horizon server of the given network.
    pub fn connect(network: &Network, timeout: Duration) -> Result<Self, AppError> {
        let client = HorizonClient::new(network, timeout)?;
        debug!(url = client.base_url(), "using horizon server");
        Ok(Self::new(client, network.to_string()))
    }
}

impl<Q: LedgerQuery> InspectorService<Q> {
    /// Create a new service over any ledger query implementation.
    pub fn new(query: Q, network: impl Into<String>) -> Self {
        Self {
            query,
            network: network.into(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// Give back the underlying query implementation.
    pub fn into_query(self) -> Q {
        self.query
    }

    /// Account summary: balances, signers, payment count over the recent
    /// operation window and, optionally, the latest transactions.
    pub async fn account_report(
        &self,
        address: &str,
        include_transactions: bool,
    ) -> Result<AccountReport, AppError> {
        validate_account(address)?;

        let account = self.query.load_account(address).await?;
        let recent_ops = self
            .query
            .list_operations(
                &OperationScope::ForAccount(address.to_string()),
                Order::Desc,
                PAYMENT_WINDOW as u32,
            )
            .await?;

        let recent_txs = if include_transactions {
            Some(
                self.query
                    .list_transactions(address, Order::Desc, RECENT_TRANSACTIONS as u32)
                    .await?,
            )
        } else {
            None
        };

        let report = build_account_report(&account, &recent_ops, recent_txs.as_deref());
        info!(
            account = %report.account,
            balances = report.balances.len(),
            payments = report.total_payments,
            "built account report"
        );
        Ok(report)
    }

    /// Transaction details with every operation normalized.
    pub async fn transaction_report(&self, hash: &str) -> Result<TransactionReport, AppError> {
        if !is_valid_transaction_hash(hash) {
            return Err(AppError::InvalidTransactionHash(hash.to_string()));
        }
        let hash = hash.to_lowercase();

        let tx = self.query.get_transaction(&hash).await?;
        let ops = self
            .query
            .list_operations(
                &OperationScope::ForTransaction(hash.clone()),
                Order::Asc,
                MAX_PAGE_LIMIT,
            )
            .await?;

        let report = build_transaction_report(&tx, &ops);
        info!(
            hash = %report.hash,
            operations = report.operations.len(),
            "built transaction report"
        );
        Ok(report)
    }

    /// Non-native trustlines of an account, flagging zero balances.
    pub async fn trustline_report(&self, address: &str) -> Result<TrustlineReport, AppError> {
        validate_account(address)?;

        let account = self.query.load_account(address).await?;
        let report = build_trustline_report(&account, &self.network);
        info!(
            account = %report.account,
            trustlines = report.trustlines.len(),
            zero_balance = report.zero_balance_count(),
            "built trustline report"
        );
        Ok(report)
    }
}

/// Derive the public address of `secret` and compare it with `expected` when
/// one is given. Works offline; no ledger query is made.
pub fn public_key_report(
    secret: &str,
    expected: Option<&str>,
) -> Result<PublicKeyReport, AppError> {
    let expected = expected.map(str::trim).filter(|e| !e.is_empty());
    if let Some(address) = expected {
        validate_account(address)?;
    }

    let public_key = public_key_from_secret(secret).ok_or(AppError::InvalidSecretKey)?;
    let matches = expected.map(|address| address == public_key);
    debug!(public_key = %public_key, ?matches, "derived public key");

    Ok(PublicKeyReport {
        public_key,
        expected: expected.map(str::to_string),
        matches,
    })
}

fn validate_account(address: &str) -> Result<(), AppError> {
    if is_valid_account_address(address) {
        Ok(())
    } else {
        Err(AppError::InvalidAccountAddress(address.to_string()))
    }
}
