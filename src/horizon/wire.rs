//! JSON shapes served by Horizon and their conversion into domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Account, Asset, Balance, Operation, OperationKind, PathPayment, Signer, Transaction};

use super::QueryError;

/// Collection responses wrap their records in `_embedded.records`.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Embedded<T> {
    pub records: Vec<T>,
}

/// RFC 7807 problem document returned on errors.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Problem {
    pub title: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountRecord {
    pub account_id: String,
    #[serde(deserialize_with = "number_from_string")]
    pub sequence: i64,
    pub subentry_count: u32,
    #[serde(default)]
    pub home_domain: Option<String>,
    pub balances: Vec<BalanceRecord>,
    pub signers: Vec<SignerRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceRecord {
    pub balance: String,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(flatten)]
    pub asset: AssetFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignerRecord {
    pub key: String,
    pub weight: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionRecord {
    pub hash: String,
    pub ledger: u32,
    pub created_at: DateTime<Utc>,
    pub source_account: String,
    #[serde(deserialize_with = "number_from_string")]
    pub fee_charged: u64,
    #[serde(default)]
    pub memo: Option<String>,
    pub successful: bool,
    pub operation_count: u32,
}

/// The flat asset triple embedded in balances and operations.
#[derive(Debug, Deserialize)]
pub(crate) struct AssetFields {
    pub asset_type: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_issuer: Option<String>,
    #[serde(default)]
    pub liquidity_pool_id: Option<String>,
}

impl AssetFields {
    fn to_asset(&self) -> Option<Asset> {
        Asset::from_parts(
            &self.asset_type,
            self.asset_code.as_deref(),
            self.asset_issuer.as_deref(),
            self.liquidity_pool_id.as_deref(),
        )
    }
}

impl AccountRecord {
    pub fn into_account(self) -> Result<Account, QueryError> {
        let balances = self
            .balances
            .into_iter()
            .map(|b| {
                let asset = b.asset.to_asset().ok_or_else(|| {
                    QueryError::Decode(format!(
                        "balance with unrecognised asset type '{}'",
                        b.asset.asset_type
                    ))
                })?;
                // The native balance never has a limit
                let limit = if asset.is_native() { None } else { b.limit };
                Ok(Balance {
                    asset,
                    amount: b.balance,
                    limit,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        Ok(Account {
            id: self.account_id,
            sequence: self.sequence,
            subentry_count: self.subentry_count,
            home_domain: self.home_domain.filter(|d| !d.is_empty()),
            balances,
            signers: self
                .signers
                .into_iter()
                .map(|s| Signer {
                    key: s.key,
                    weight: s.weight,
                })
                .collect(),
        })
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Transaction {
            hash: record.hash,
            ledger: record.ledger,
            created_at: record.created_at,
            source_account: record.source_account,
            fee_charged: record.fee_charged,
            memo: record.memo.filter(|m| !m.is_empty()),
            successful: record.successful,
            operation_count: record.operation_count,
        }
    }
}

// ========================
// Operations
// ========================

#[derive(Debug, Default, Deserialize)]
struct OperationHeader {
    #[serde(default)]
    source_account: Option<String>,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
}

#[derive(Deserialize)]
struct PaymentFields {
    to: String,
    amount: String,
    #[serde(flatten)]
    asset: AssetFields,
}

#[derive(Deserialize)]
struct CreateAccountFields {
    account: String,
    starting_balance: String,
}

#[derive(Deserialize)]
struct ChangeTrustFields {
    limit: String,
    #[serde(flatten)]
    asset: AssetFields,
}

#[derive(Deserialize)]
struct AllowTrustFields {
    trustor: String,
    authorize: bool,
    #[serde(flatten)]
    asset: AssetFields,
}

#[derive(Deserialize)]
struct SetOptionsFields {
    #[serde(default)]
    home_domain: Option<String>,
    #[serde(default)]
    inflation_dest: Option<String>,
    #[serde(default)]
    signer_key: Option<String>,
    #[serde(default)]
    signer_weight: Option<u32>,
    #[serde(default)]
    master_key_weight: Option<u32>,
}

#[derive(Deserialize)]
struct ManageDataFields {
    name: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Deserialize)]
struct StrictReceiveFields {
    to: String,
    amount: String,
    source_max: String,
    #[serde(flatten)]
    asset: AssetFields,
}

#[derive(Deserialize)]
struct StrictSendFields {
    to: String,
    amount: String,
    source_amount: String,
    #[serde(flatten)]
    asset: AssetFields,
}

#[derive(Deserialize)]
struct AccountMergeFields {
    into: String,
}

/// Decode one raw operation record.
///
/// Never fails: a record of unknown kind, or of a known kind whose fields do
/// not match the expected shape, is kept verbatim as [`OperationKind::Other`].
pub fn decode_operation(raw: Value) -> Operation {
    let header = OperationHeader::deserialize(&raw).unwrap_or_default();
    let type_name = header.type_name.unwrap_or_default();

    let kind = decode_kind(&type_name, &raw).unwrap_or(OperationKind::Other {
        type_name,
        raw,
    });

    Operation {
        source: header.source_account,
        kind,
    }
}

fn decode_kind(type_name: &str, raw: &Value) -> Option<OperationKind> {
    let kind = match type_name {
        "payment" => {
            let f: PaymentFields = fields(raw)?;
            OperationKind::Payment {
                to: f.to,
                amount: f.amount,
                asset: f.asset.to_asset()?,
            }
        }
        "create_account" => {
            let f: CreateAccountFields = fields(raw)?;
            OperationKind::CreateAccount {
                account: f.account,
                starting_balance: f.starting_balance,
            }
        }
        "change_trust" => {
            let f: ChangeTrustFields = fields(raw)?;
            OperationKind::ChangeTrust {
                asset: f.asset.to_asset()?,
                limit: f.limit,
            }
        }
        "allow_trust" => {
            let f: AllowTrustFields = fields(raw)?;
            OperationKind::AllowTrust {
                trustor: f.trustor,
                asset: f.asset.to_asset()?,
                authorize: f.authorize,
            }
        }
        "set_options" => {
            let f: SetOptionsFields = fields(raw)?;
            OperationKind::SetOptions {
                home_domain: f.home_domain,
                inflation_dest: f.inflation_dest,
                signer_key: f.signer_key,
                signer_weight: f.signer_weight,
                master_key_weight: f.master_key_weight,
            }
        }
        "manage_data" => {
            let f: ManageDataFields = fields(raw)?;
            OperationKind::ManageData {
                name: f.name,
                value: f.value,
            }
        }
        "path_payment_strict_receive" => {
            let f: StrictReceiveFields = fields(raw)?;
            OperationKind::PathPaymentStrictReceive(PathPayment {
                to: f.to,
                amount: f.amount,
                source_max: f.source_max,
                asset: f.asset.to_asset()?,
            })
        }
        "path_payment_strict_send" => {
            let f: StrictSendFields = fields(raw)?;
            OperationKind::PathPaymentStrictSend(PathPayment {
                to: f.to,
                amount: f.amount,
                source_max: f.source_amount,
                asset: f.asset.to_asset()?,
            })
        }
        "account_merge" => {
            let f: AccountMergeFields = fields(raw)?;
            OperationKind::AccountMerge { into: f.into }
        }
        _ => return None,
    };
    Some(kind)
}

fn fields<T: DeserializeOwned>(raw: &Value) -> Option<T> {
    T::deserialize(raw).ok()
}

/// Horizon serialises 64-bit integers as strings; accept either form.
fn number_from_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber<T> {
        Number(T),
        String(String),
    }

    match StringOrNumber::<T>::deserialize(deserializer)? {
        StringOrNumber::Number(n) => Ok(n),
        StringOrNumber::String(s) => s.parse().map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_payment() {
        let op = decode_operation(json!({
            "id": "1",
            "type": "payment",
            "type_i": 1,
            "source_account": "GSRC",
            "asset_type": "credit_alphanum4",
            "asset_code": "USD",
            "asset_issuer": "GISS",
            "from": "GSRC",
            "to": "GDEST",
            "amount": "12.0000000"
        }));

        assert_eq!(op.source.as_deref(), Some("GSRC"));
        assert_eq!(
            op.kind,
            OperationKind::Payment {
                to: "GDEST".into(),
                amount: "12.0000000".into(),
                asset: Asset::issued("USD", "GISS"),
            }
        );
    }

    #[test]
    fn test_decode_strict_send_uses_source_amount() {
        let op = decode_operation(json!({
            "type": "path_payment_strict_send",
            "asset_type": "native",
            "source_asset_type": "credit_alphanum4",
            "source_asset_code": "USD",
            "source_asset_issuer": "GISS",
            "source_amount": "10.0000000",
            "destination_min": "9.0000000",
            "to": "GDEST",
            "amount": "9.5000000"
        }));

        match op.kind {
            OperationKind::PathPaymentStrictSend(p) => {
                assert_eq!(p.source_max, "10.0000000");
                assert_eq!(p.asset, Asset::Native);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_decode_horizon_records_of_each_kind() {
        let issuer = "GDUKMGUGDZQK6YHYA5Z6AY2G4XDSZPSZ3SW5UN3ARVMO6QSRDWP5YLEX";
        let cases = vec![
            (
                json!({
                    "id": "12884905985",
                    "paging_token": "12884905985",
                    "transaction_successful": true,
                    "source_account": "GSRC",
                    "type": "change_trust",
                    "type_i": 6,
                    "created_at": "2024-03-01T12:00:00Z",
                    "transaction_hash": "ab".repeat(32),
                    "asset_type": "credit_alphanum4",
                    "asset_code": "USDC",
                    "asset_issuer": issuer,
                    "limit": "922337203685.4775807",
                    "trustee": issuer,
                    "trustor": "GSRC"
                }),
                OperationKind::ChangeTrust {
                    asset: Asset::issued("USDC", issuer),
                    limit: "922337203685.4775807".into(),
                },
            ),
            (
                json!({
                    "id": "12884905986",
                    "source_account": issuer,
                    "type": "allow_trust",
                    "type_i": 7,
                    "asset_type": "credit_alphanum4",
                    "asset_code": "USDC",
                    "asset_issuer": issuer,
                    "trustee": issuer,
                    "trustor": "GTRUSTOR",
                    "authorize": true,
                    "authorize_to_maintain_liabilities": false
                }),
                OperationKind::AllowTrust {
                    trustor: "GTRUSTOR".into(),
                    asset: Asset::issued("USDC", issuer),
                    authorize: true,
                },
            ),
            (
                json!({
                    "id": "12884905987",
                    "source_account": "GSRC",
                    "type": "set_options",
                    "type_i": 5,
                    "signer_key": "GSIGNER",
                    "signer_weight": 1,
                    "master_key_weight": 2,
                    "low_threshold": 0,
                    "med_threshold": 0,
                    "high_threshold": 0,
                    "home_domain": "example.org",
                    "set_flags": [1, 2],
                    "set_flags_s": ["auth_required_flag", "auth_revocable_flag"]
                }),
                OperationKind::SetOptions {
                    home_domain: Some("example.org".into()),
                    inflation_dest: None,
                    signer_key: Some("GSIGNER".into()),
                    signer_weight: Some(1),
                    master_key_weight: Some(2),
                },
            ),
            (
                json!({
                    "id": "12884905988",
                    "source_account": "GSRC",
                    "type": "account_merge",
                    "type_i": 8,
                    "account": "GSRC",
                    "into": "GDEST"
                }),
                OperationKind::AccountMerge {
                    into: "GDEST".into(),
                },
            ),
            (
                json!({
                    "id": "12884905989",
                    "source_account": "GSRC",
                    "type": "path_payment_strict_receive",
                    "type_i": 2,
                    "asset_type": "credit_alphanum4",
                    "asset_code": "USDC",
                    "asset_issuer": issuer,
                    "from": "GSRC",
                    "to": "GDEST",
                    "amount": "25.0000000",
                    "path": [],
                    "source_amount": "101.2500000",
                    "source_max": "110.0000000",
                    "source_asset_type": "native"
                }),
                OperationKind::PathPaymentStrictReceive(PathPayment {
                    to: "GDEST".into(),
                    amount: "25.0000000".into(),
                    source_max: "110.0000000".into(),
                    asset: Asset::issued("USDC", issuer),
                }),
            ),
        ];

        for (raw, expected) in cases {
            let op = decode_operation(raw);
            assert_eq!(op.kind, expected);
        }
    }

    #[test]
    fn test_decode_manage_data_null_value() {
        let op = decode_operation(json!({
            "type": "manage_data",
            "name": "config",
            "value": null
        }));
        assert_eq!(
            op.kind,
            OperationKind::ManageData {
                name: "config".into(),
                value: None,
            }
        );
    }

    #[test]
    fn test_unknown_type_is_kept_verbatim() {
        let raw = json!({
            "id": "99",
            "type": "claim_claimable_balance",
            "balance_id": "00000000abc",
            "claimant": "GCLAIM"
        });
        let op = decode_operation(raw.clone());

        assert_eq!(
            op.kind,
            OperationKind::Other {
                type_name: "claim_claimable_balance".into(),
                raw,
            }
        );
    }

    #[test]
    fn test_malformed_known_type_falls_back() {
        let raw = json!({ "type": "payment", "to": "GDEST" });
        let op = decode_operation(raw.clone());
        assert_eq!(
            op.kind,
            OperationKind::Other {
                type_name: "payment".into(),
                raw,
            }
        );
    }

    #[test]
    fn test_account_record_conversion() {
        let record: AccountRecord = serde_json::from_value(json!({
            "id": "GACC",
            "account_id": "GACC",
            "sequence": "123456789012",
            "subentry_count": 1,
            "home_domain": "",
            "balances": [
                { "balance": "0.0000000", "limit": "1000.0000000", "asset_type": "credit_alphanum4", "asset_code": "USD", "asset_issuer": "GISS" },
                { "balance": "100.0000000", "asset_type": "native" }
            ],
            "signers": [{ "key": "GACC", "weight": 1, "type": "ed25519_public_key" }]
        }))
        .unwrap();

        let account = record.into_account().unwrap();
        assert_eq!(account.id, "GACC");
        assert_eq!(account.sequence, 123_456_789_012);
        assert_eq!(account.home_domain, None);
        assert_eq!(
            account.balances,
            vec![
                Balance::trustline(Asset::issued("USD", "GISS"), "0.0000000", "1000.0000000"),
                Balance::native("100.0000000"),
            ]
        );
        assert_eq!(
            account.signers,
            vec![Signer {
                key: "GACC".into(),
                weight: 1
            }]
        );
    }

    #[test]
    fn test_transaction_record_conversion() {
        let record: TransactionRecord = serde_json::from_value(json!({
            "hash": "ab".repeat(32),
            "ledger": 4242,
            "created_at": "2024-03-01T12:00:00Z",
            "source_account": "GSRC",
            "fee_charged": "100",
            "memo_type": "none",
            "successful": true,
            "operation_count": 2
        }))
        .unwrap();

        let tx = Transaction::from(record);
        assert_eq!(tx.fee_charged, 100);
        assert_eq!(tx.memo, None);
        assert_eq!(tx.ledger, 4242);
        assert_eq!(tx.created_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }
}
