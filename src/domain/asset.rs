use serde::{Deserialize, Serialize};
use std::fmt;

/// Display code of the network's native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

/// An asset held or moved on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Asset {
    Native,
    Issued { code: String, issuer: String },
    PoolShare { pool_id: String },
}

impl Asset {
    pub fn issued(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Asset::Issued {
            code: code.into(),
            issuer: issuer.into(),
        }
    }

    /// Build an asset from the flat `asset_type`/`asset_code`/`asset_issuer`
    /// triple the ledger API uses on balances and operations.
    /// Returns `None` when the parts do not describe a valid asset.
    pub fn from_parts(
        asset_type: &str,
        code: Option<&str>,
        issuer: Option<&str>,
        pool_id: Option<&str>,
    ) -> Option<Self> {
        match (asset_type, code, issuer, pool_id) {
            ("native", _, _, _) => Some(Asset::Native),
            ("liquidity_pool_shares", _, _, Some(id)) => Some(Asset::PoolShare {
                pool_id: id.to_string(),
            }),
            (_, Some(code), Some(issuer), _) => Some(Asset::issued(code, issuer)),
            _ => None,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }
}

/// Native -> "XLM", issued -> "CODE:ISSUER", pool share -> "pool:ID"
impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "{}", NATIVE_ASSET_CODE),
            Asset::Issued { code, issuer } => write!(f, "{}:{}", code, issuer),
            Asset::PoolShare { pool_id } => write!(f, "pool:{}", pool_id),
        }
    }
}
