use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Account, Operation, Transaction};

use super::wire::{decode_operation, AccountRecord, Page, Problem, TransactionRecord};
use super::{LedgerQuery, Network, OperationScope, Order, QueryError, MAX_PAGE_LIMIT};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for a Horizon server.
pub struct HorizonClient {
    base_url: String,
    client: Client,
}

impl HorizonClient {
    /// Create a client for the given network.
    pub fn new(network: &Network, timeout: Duration) -> Result<Self, QueryError> {
        Self::with_base_url(network.horizon_url(), timeout)
    }

    /// Create a client for an explicit base URL.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stellar-inspect/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QueryError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, QueryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "horizon request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let problem: Problem = response.json().await.unwrap_or_default();

            if status == StatusCode::NOT_FOUND {
                debug!(%url, "horizon resource missing");
                return Err(QueryError::NotFound(match problem.detail {
                    Some(detail) => format!("{}: {}", what, detail),
                    None => what.to_string(),
                }));
            }

            // Prefer the problem detail over the bare status line
            let message = problem
                .detail
                .or(problem.title)
                .unwrap_or_else(|| status.to_string());
            warn!(%url, %status, %message, "horizon request failed");
            return Err(QueryError::Network(format!("{} ({})", message, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| QueryError::Decode(e.to_string()))
    }
}

fn page_query(order: Order, limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("order", order.to_string()),
        ("limit", limit.clamp(1, MAX_PAGE_LIMIT).to_string()),
    ]
}

#[async_trait]
impl LedgerQuery for HorizonClient {
    async fn load_account(&self, address: &str) -> Result<Account, QueryError> {
        let record: AccountRecord = self
            .get(
                &format!("/accounts/{}", address),
                &[],
                &format!("account {}", address),
            )
            .await?;
        record.into_account()
    }

    async fn list_operations(
        &self,
        scope: &OperationScope,
        order: Order,
        limit: u32,
    ) -> Result<Vec<Operation>, QueryError> {
        let (path, what) = match scope {
            OperationScope::ForAccount(id) => {
                (format!("/accounts/{}/operations", id), format!("account {}", id))
            }
            OperationScope::ForTransaction(hash) => (
                format!("/transactions/{}/operations", hash),
                format!("transaction {}", hash),
            ),
        };

        let page: Page<Value> = self.get(&path, &page_query(order, limit), &what).await?;
        Ok(page
            .embedded
            .records
            .into_iter()
            .map(decode_operation)
            .collect())
    }

    async fn list_transactions(
        &self,
        account: &str,
        order: Order,
        limit: u32,
    ) -> Result<Vec<Transaction>, QueryError> {
        let page: Page<TransactionRecord> = self
            .get(
                &format!("/accounts/{}/transactions", account),
                &page_query(order, limit),
                &format!("account {}", account),
            )
            .await?;
        Ok(page
            .embedded
            .records
            .into_iter()
            .map(Transaction::from)
            .collect())
    }

    async fn get_transaction(&self, hash: &str) -> Result<Transaction, QueryError> {
        let record: TransactionRecord = self
            .get(
                &format!("/transactions/{}", hash),
                &[],
                &format!("transaction {}", hash),
            )
            .await?;
        Ok(record.into())
    }
}
