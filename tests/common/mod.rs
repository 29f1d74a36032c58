// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use stellar_inspect::domain::{
    Account, Asset, Balance, Operation, OperationKind, Signer, Transaction,
};
use stellar_inspect::horizon::{LedgerQuery, OperationScope, Order, QueryError};

pub const ALICE: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";
pub const BOB: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";
pub const TX_HASH: &str = "3389e9f0f1a65f19736cacf544c2e825313e8447f569233bb8db39aa607c8889";

/// In-memory ledger that records every query it receives.
#[derive(Default)]
pub struct FakeLedger {
    accounts: HashMap<String, Account>,
    account_ops: HashMap<String, Vec<Operation>>,
    account_txs: HashMap<String, Vec<Transaction>>,
    transactions: HashMap<String, Transaction>,
    transaction_ops: HashMap<String, Vec<Operation>>,
    failure: Option<QueryError>,
    calls: Mutex<Vec<String>>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.id.clone(), account);
        self
    }

    /// Operations for an account, newest first.
    pub fn with_account_operations(mut self, account: &str, ops: Vec<Operation>) -> Self {
        self.account_ops.insert(account.to_string(), ops);
        self
    }

    /// Transactions for an account, newest first.
    pub fn with_account_transactions(mut self, account: &str, txs: Vec<Transaction>) -> Self {
        self.account_txs.insert(account.to_string(), txs);
        self
    }

    pub fn with_transaction(mut self, tx: Transaction, ops: Vec<Operation>) -> Self {
        self.transaction_ops.insert(tx.hash.clone(), ops);
        self.transactions.insert(tx.hash.clone(), tx);
        self
    }

    /// Make every query fail with `err`.
    pub fn failing_with(mut self, err: QueryError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), QueryError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LedgerQuery for FakeLedger {
    async fn load_account(&self, address: &str) -> Result<Account, QueryError> {
        self.record(format!("load_account {}", address))?;
        self.accounts
            .get(address)
            .cloned()
            .ok_or_else(|| QueryError::NotFound(format!("account {}", address)))
    }

    async fn list_operations(
        &self,
        scope: &OperationScope,
        order: Order,
        limit: u32,
    ) -> Result<Vec<Operation>, QueryError> {
        let (ops, key) = match scope {
            OperationScope::ForAccount(id) => (self.account_ops.get(id), id),
            OperationScope::ForTransaction(hash) => (self.transaction_ops.get(hash), hash),
        };
        self.record(format!("list_operations {} {} {}", key, order, limit))?;
        Ok(ops
            .map(|ops| ops.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn list_transactions(
        &self,
        account: &str,
        order: Order,
        limit: u32,
    ) -> Result<Vec<Transaction>, QueryError> {
        self.record(format!("list_transactions {} {} {}", account, order, limit))?;
        Ok(self
            .account_txs
            .get(account)
            .map(|txs| txs.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_transaction(&self, hash: &str) -> Result<Transaction, QueryError> {
        self.record(format!("get_transaction {}", hash))?;
        self.transactions
            .get(hash)
            .cloned()
            .ok_or_else(|| QueryError::NotFound(format!("transaction {}", hash)))
    }
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Account fixture: the given trustlines followed by a native balance.
pub fn account(id: &str, trustlines: Vec<Balance>) -> Account {
    let mut balances = trustlines;
    balances.push(Balance::native("100.0000000"));
    Account {
        id: id.to_string(),
        sequence: 1234,
        subentry_count: balances.len() as u32 - 1,
        home_domain: None,
        balances,
        signers: vec![Signer {
            key: id.to_string(),
            weight: 1,
        }],
    }
}

pub fn transaction(hash: &str, source: &str, created_at: DateTime<Utc>) -> Transaction {
    Transaction {
        hash: hash.to_string(),
        ledger: 5000,
        created_at,
        source_account: source.to_string(),
        fee_charged: 100,
        memo: None,
        successful: true,
        operation_count: 1,
    }
}

pub fn payment(to: &str, amount: &str) -> Operation {
    Operation {
        source: None,
        kind: OperationKind::Payment {
            to: to.to_string(),
            amount: amount.to_string(),
            asset: Asset::Native,
        },
    }
}

pub fn create_account(account: &str, starting_balance: &str) -> Operation {
    Operation {
        source: None,
        kind: OperationKind::CreateAccount {
            account: account.to_string(),
            starting_balance: starting_balance.to_string(),
        },
    }
}

pub fn change_trust(code: &str, issuer: &str) -> Operation {
    Operation {
        source: None,
        kind: OperationKind::ChangeTrust {
            asset: Asset::issued(code, issuer),
            limit: "1000".to_string(),
        },
    }
}
