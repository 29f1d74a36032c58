use std::fmt;
use std::str::FromStr;

pub const PUBLIC_HORIZON_URL: &str = "https://horizon.stellar.org";
pub const TESTNET_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";

/// Network to query: one of the well-known ones or a custom Horizon URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Public,
    Testnet,
    Custom(String),
}

impl Network {
    pub fn horizon_url(&self) -> &str {
        match self {
            Network::Public => PUBLIC_HORIZON_URL,
            Network::Testnet => TESTNET_HORIZON_URL,
            Network::Custom(url) => url,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Public => write!(f, "public"),
            Network::Testnet => write!(f, "testnet"),
            Network::Custom(url) => write!(f, "{}", url),
        }
    }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "public" | "mainnet" | "pubnet" => Ok(Network::Public),
            "testnet" => Ok(Network::Testnet),
            _ if s.starts_with("http://") || s.starts_with("https://") => {
                Ok(Network::Custom(s.trim_end_matches('/').to_string()))
            }
            _ => Err(ParseNetworkError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError(String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown network '{}': use public, testnet or a Horizon URL",
            self.0
        )
    }
}

impl std::error::Error for ParseNetworkError {}
