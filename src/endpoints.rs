//! Cluster naming and RPC endpoint selection
//!
//! Maps a named cluster to its default public RPC endpoint. Defaults can be
//! overridden per cluster with TXLENS_RPC_<CLUSTER>_URL environment variables,
//! and an explicit endpoint supplied by the caller always wins. No URL syntax
//! validation happens here; a bad endpoint surfaces as a transport fault.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// A named Solana network deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cluster {
    #[serde(rename = "mainnet-beta")]
    MainnetBeta,
    #[serde(rename = "devnet")]
    Devnet,
    #[serde(rename = "testnet")]
    Testnet,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
        }
    }

    /// Environment variable consulted before falling back to the public endpoint
    fn env_override_key(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "TXLENS_RPC_MAINNET_URL",
            Cluster::Devnet => "TXLENS_RPC_DEVNET_URL",
            Cluster::Testnet => "TXLENS_RPC_TESTNET_URL",
        }
    }

    fn public_endpoint(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            other => Err(format!("unknown cluster: {}", other)),
        }
    }
}

/// Default endpoint for a cluster (env override, then public endpoint)
pub fn default_endpoint(cluster: Cluster) -> String {
    match env::var(cluster.env_override_key()) {
        Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => cluster.public_endpoint().to_string(),
    }
}

/// Resolve the endpoint for a lookup: an explicit non-blank override wins,
/// otherwise the cluster default is used
pub fn resolve_endpoint(cluster: Cluster, endpoint_override: Option<&str>) -> String {
    match endpoint_override {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => default_endpoint(cluster),
    }
}
