//! Read access to the ledger's public query API.
//!
//! [`LedgerQuery`] is the seam the application layer depends on;
//! [`HorizonClient`] implements it over HTTP.

mod client;
mod network;
mod wire;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Account, Operation, Transaction};

pub use client::*;
pub use network::*;
pub use wire::decode_operation;

/// Largest page size the query API serves in one request.
pub const MAX_PAGE_LIMIT: u32 = 200;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Sort order for collection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which records an operation listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationScope {
    ForAccount(String),
    ForTransaction(String),
}

/// Capability to read ledger state. Each call is a single bounded request;
/// implementations decide on transport, timeouts and authentication.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    async fn load_account(&self, address: &str) -> Result<Account, QueryError>;

    async fn list_operations(
        &self,
        scope: &OperationScope,
        order: Order,
        limit: u32,
    ) -> Result<Vec<Operation>, QueryError>;

    async fn list_transactions(
        &self,
        account: &str,
        order: Order,
        limit: u32,
    ) -> Result<Vec<Transaction>, QueryError>;

    async fn get_transaction(&self, hash: &str) -> Result<Transaction, QueryError>;
}
