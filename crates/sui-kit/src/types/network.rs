//! Well-known Sui networks and their endpoints.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The Sui network the client is connected to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Sui mainnet.
    Mainnet,
    /// Sui testnet.
    Testnet,
    /// Sui devnet.
    #[default]
    Devnet,
    /// A node started with `sui start` on this machine.
    Localnet,
    /// Any other endpoint.
    Custom,
}

impl Network {
    /// Public full node JSON-RPC URL, if the network has one.
    pub fn rpc_url(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => Some("https://fullnode.mainnet.sui.io:443"),
            Network::Testnet => Some("https://fullnode.testnet.sui.io:443"),
            Network::Devnet => Some("https://fullnode.devnet.sui.io:443"),
            Network::Localnet => Some("http://127.0.0.1:9000"),
            Network::Custom => None,
        }
    }

    /// Faucet gas endpoint. Mainnet has none.
    pub fn faucet_url(&self) -> Option<&'static str> {
        match self {
            Network::Testnet => Some("https://faucet.testnet.sui.io/gas"),
            Network::Devnet => Some("https://faucet.devnet.sui.io/gas"),
            Network::Localnet => Some("http://127.0.0.1:9123/gas"),
            Network::Mainnet | Network::Custom => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
            Network::Custom => "custom",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "localnet" | "local" => Ok(Network::Localnet),
            other => Err(Error::Config(format!("Unknown network '{other}'"))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display_and_parse() {
        for net in [
            Network::Mainnet,
            Network::Testnet,
            Network::Devnet,
            Network::Localnet,
        ] {
            assert_eq!(net.to_string().parse::<Network>().unwrap(), net);
        }
        assert!("moonnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_endpoints() {
        assert!(Network::Mainnet.faucet_url().is_none());
        assert!(Network::Devnet.faucet_url().unwrap().ends_with("/gas"));
        assert_eq!(Network::Localnet.rpc_url(), Some("http://127.0.0.1:9000"));
        assert!(Network::Custom.rpc_url().is_none());
    }
}
