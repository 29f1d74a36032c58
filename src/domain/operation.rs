use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::Asset;

/// Placeholder shown for a `manage_data` entry that was removed.
pub const DELETED_DATA_VALUE: &str = "DELETED";

/// One operation inside a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Operation-level source account; falls back to the transaction source.
    pub source: Option<String>,
    pub kind: OperationKind,
}

/// Known operation kinds, plus an open fallback so that new kinds added to
/// the ledger pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    Payment {
        to: String,
        amount: String,
        asset: Asset,
    },
    CreateAccount {
        account: String,
        starting_balance: String,
    },
    ChangeTrust {
        asset: Asset,
        limit: String,
    },
    AllowTrust {
        trustor: String,
        asset: Asset,
        authorize: bool,
    },
    SetOptions {
        home_domain: Option<String>,
        inflation_dest: Option<String>,
        signer_key: Option<String>,
        signer_weight: Option<u32>,
        master_key_weight: Option<u32>,
    },
    ManageData {
        name: String,
        /// Base64 encoded value; `None` when the entry is deleted.
        value: Option<String>,
    },
    PathPaymentStrictSend(PathPayment),
    PathPaymentStrictReceive(PathPayment),
    AccountMerge {
        into: String,
    },
    Other {
        type_name: String,
        raw: Value,
    },
}

/// Fields shared by both path payment kinds. `asset` is the destination asset.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPayment {
    pub to: String,
    pub amount: String,
    /// Upper bound on what the sender spends. For strict-send this is the
    /// exact send amount.
    pub source_max: String,
    pub asset: Asset,
}

impl OperationKind {
    pub fn type_name(&self) -> &str {
        match self {
            OperationKind::Payment { .. } => "payment",
            OperationKind::CreateAccount { .. } => "create_account",
            OperationKind::ChangeTrust { .. } => "change_trust",
            OperationKind::AllowTrust { .. } => "allow_trust",
            OperationKind::SetOptions { .. } => "set_options",
            OperationKind::ManageData { .. } => "manage_data",
            OperationKind::PathPaymentStrictSend(_) => "path_payment_strict_send",
            OperationKind::PathPaymentStrictReceive(_) => "path_payment_strict_receive",
            OperationKind::AccountMerge { .. } => "account_merge",
            OperationKind::Other { type_name, .. } => type_name.as_str(),
        }
    }
}

impl Operation {
    pub fn is_payment(&self) -> bool {
        matches!(self.kind, OperationKind::Payment { .. })
    }
}

/// Flat, display-safe projection of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedOperation {
    #[serde(rename = "type")]
    pub op_type: String,
    pub source: String,
    pub fields: Map<String, Value>,
}

/// Project an operation into its canonical record.
///
/// `tx_source` is used when the operation carries no source of its own.
/// Unknown operation kinds keep the raw record under `raw`.
pub fn normalize(op: &Operation, tx_source: &str) -> NormalizedOperation {
    let mut fields = Map::new();
    let mut put = |key: &str, value: Value| {
        fields.insert(key.to_string(), value);
    };

    match &op.kind {
        OperationKind::Payment { to, amount, asset } => {
            put("to", json!(to));
            put("amount", json!(amount));
            put("asset", json!(asset.to_string()));
        }
        OperationKind::CreateAccount {
            account,
            starting_balance,
        } => {
            put("newAccount", json!(account));
            put("startingBalance", json!(starting_balance));
        }
        OperationKind::ChangeTrust { asset, limit } => {
            put("asset", json!(asset.to_string()));
            put("limit", json!(limit));
        }
        OperationKind::AllowTrust {
            trustor,
            asset,
            authorize,
        } => {
            put("trustor", json!(trustor));
            put("asset", json!(asset.to_string()));
            put("authorize", json!(authorize));
        }
        OperationKind::SetOptions {
            home_domain,
            inflation_dest,
            signer_key,
            signer_weight,
            master_key_weight,
        } => {
            // Only the options the operation actually touched
            if let Some(v) = home_domain {
                put("homeDomain", json!(v));
            }
            if let Some(v) = inflation_dest {
                put("inflationDest", json!(v));
            }
            if let Some(v) = signer_key {
                put("signerKey", json!(v));
            }
            if let Some(v) = signer_weight {
                put("signerWeight", json!(v));
            }
            if let Some(v) = master_key_weight {
                put("masterKeyWeight", json!(v));
            }
        }
        OperationKind::ManageData { name, value } => {
            put("name", json!(name));
            put("value", json!(decode_data_value(value.as_deref())));
        }
        OperationKind::PathPaymentStrictSend(p) | OperationKind::PathPaymentStrictReceive(p) => {
            put("to", json!(p.to));
            put("amount", json!(p.amount));
            put("sourceMax", json!(p.source_max));
            put("asset", json!(p.asset.to_string()));
        }
        OperationKind::AccountMerge { into } => {
            put("into", json!(into));
        }
        OperationKind::Other { raw, .. } => {
            put("raw", raw.clone());
        }
    }

    NormalizedOperation {
        op_type: op.kind.type_name().to_string(),
        source: op.source.clone().unwrap_or_else(|| tx_source.to_string()),
        fields,
    }
}

/// Decode a `manage_data` value for display.
/// Deleted entries become "DELETED"; values that are not valid base64 are
/// shown as they are.
pub fn decode_data_value(value: Option<&str>) -> String {
    match value {
        None => DELETED_DATA_VALUE.to_string(),
        Some(encoded) => match STANDARD.decode(encoded) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => encoded.to_string(),
        },
    }
}
