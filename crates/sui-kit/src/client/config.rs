//! Client configuration.

use std::path::Path;
use std::time::Duration;

use super::signer::{Keyring, Signer};
use super::transport::DEFAULT_TIMEOUT;
use crate::error::Error;
use crate::types::{KeyPair, Network, SuiAddress};

/// Page size most providers cap list results at.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 50;

/// Everything a [`SuiClient`](super::SuiClient) needs to know about its
/// environment: endpoints, keys and limits.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sui_kit::{KeyPair, SuiConfig};
///
/// let config = SuiConfig::devnet()
///     .keypair(KeyPair::generate_ed25519())
///     .max_page_size(25)
///     .request_timeout(Duration::from_secs(30))
///     .build();
///
/// assert!(config.active_address().is_some());
/// assert!(config.faucet_url().is_some());
/// assert_eq!(config.max_page_size(), 25);
/// ```
#[derive(Clone)]
pub struct SuiConfig {
    network: Network,
    rpc_url: String,
    faucet_url: Option<String>,
    active_address: Option<SuiAddress>,
    keyring: Keyring,
    max_page_size: usize,
    request_timeout: Duration,
}

impl SuiConfig {
    /// Sui mainnet. There is no faucet.
    pub fn mainnet() -> SuiConfigBuilder {
        SuiConfigBuilder::preset(Network::Mainnet)
    }

    pub fn testnet() -> SuiConfigBuilder {
        SuiConfigBuilder::preset(Network::Testnet)
    }

    pub fn devnet() -> SuiConfigBuilder {
        SuiConfigBuilder::preset(Network::Devnet)
    }

    /// A local node started with `sui start`.
    pub fn localnet() -> SuiConfigBuilder {
        SuiConfigBuilder::preset(Network::Localnet)
    }

    /// Any JSON-RPC endpoint. No faucet is configured.
    pub fn custom(rpc_url: impl Into<String>) -> SuiConfigBuilder {
        SuiConfigBuilder::new(Network::Custom, rpc_url)
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads:
    /// - `SUI_NETWORK` - `mainnet`, `testnet`, `devnet`, `localnet` or an RPC URL (default: devnet)
    /// - `SUI_KEYSTORE` - path to a `sui.keystore` file
    /// - `SUI_PRIVATE_KEY` - a keystore-encoded key (base64 `flag || secret`)
    /// - `SUI_ACTIVE_ADDRESS` - the address used when an operation names none
    ///
    /// Without `SUI_ACTIVE_ADDRESS` the active address is the private key's
    /// address, else the first keystore address.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SUI_NETWORK`, `SUI_PRIVATE_KEY` or `SUI_ACTIVE_ADDRESS` cannot be parsed
    /// - `SUI_KEYSTORE` cannot be loaded
    /// - `SUI_ACTIVE_ADDRESS` is set alongside keys but none of them signs for it
    pub fn from_env() -> Result<SuiConfig, Error> {
        let network = std::env::var("SUI_NETWORK").ok();
        let keystore = std::env::var("SUI_KEYSTORE").ok();
        let private_key = std::env::var("SUI_PRIVATE_KEY").ok();
        let active = std::env::var("SUI_ACTIVE_ADDRESS").ok();

        let mut builder = match network.as_deref() {
            None => SuiConfig::devnet(),
            Some(url) if url.contains("://") => SuiConfig::custom(url),
            Some(name) => SuiConfigBuilder::preset(name.parse()?),
        };

        if let Some(path) = keystore {
            builder = builder.keystore_file(path)?;
        }
        if let Some(key) = private_key {
            let keypair: KeyPair = key.parse()?;
            let address = keypair.address();
            builder = builder.keypair(keypair).active_address(address);
        }

        if let Some(active) = active {
            let address: SuiAddress = active.parse()?;
            if !builder.keyring.is_empty() && !builder.keyring.contains(&address) {
                return Err(Error::Config(format!(
                    "SUI_ACTIVE_ADDRESS {address} has no key in SUI_PRIVATE_KEY or SUI_KEYSTORE"
                )));
            }
            builder = builder.active_address(address);
        }

        Ok(builder.build())
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn faucet_url(&self) -> Option<&str> {
        self.faucet_url.as_deref()
    }

    /// The address used when an operation names none.
    pub fn active_address(&self) -> Option<SuiAddress> {
        self.active_address
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.rpc_url.is_empty() {
            return Err(Error::Config("rpc_url must not be empty".to_string()));
        }
        if self.max_page_size == 0 {
            return Err(Error::Config("max_page_size must be positive".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SuiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiConfig")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("faucet_url", &self.faucet_url)
            .field("active_address", &self.active_address)
            .field("keyring", &self.keyring)
            .field("max_page_size", &self.max_page_size)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

// ============================================================================
// SuiConfigBuilder
// ============================================================================

/// Builder for [`SuiConfig`].
pub struct SuiConfigBuilder {
    network: Network,
    rpc_url: String,
    faucet_url: Option<String>,
    active_address: Option<SuiAddress>,
    keyring: Keyring,
    max_page_size: usize,
    request_timeout: Duration,
}

impl SuiConfigBuilder {
    fn new(network: Network, rpc_url: impl Into<String>) -> Self {
        Self {
            network,
            rpc_url: rpc_url.into(),
            faucet_url: network.faucet_url().map(String::from),
            active_address: None,
            keyring: Keyring::new(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    fn preset(network: Network) -> Self {
        Self::new(network, network.rpc_url().unwrap_or_default())
    }

    /// Set the faucet endpoint.
    pub fn faucet_url(mut self, url: impl Into<String>) -> Self {
        self.faucet_url = Some(url.into());
        self
    }

    /// Set the address used when an operation names none.
    pub fn active_address(mut self, address: SuiAddress) -> Self {
        self.active_address = Some(address);
        self
    }

    /// Provider page limit. Decides when listings paginate and how
    /// multi-object reads are chunked.
    pub fn max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Per-request timeout (default: 120 seconds).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Add a key pair. The first key added becomes the active address.
    pub fn keypair(self, keypair: KeyPair) -> Self {
        self.signer(keypair)
    }

    /// Add a signer. The first signer added becomes the active address.
    pub fn signer(mut self, signer: impl Signer + 'static) -> Self {
        let address = self.keyring.add_signer(signer);
        self.active_address.get_or_insert(address);
        self
    }

    /// Add every signer of `keyring`.
    pub fn keyring(mut self, keyring: &Keyring) -> Self {
        for address in keyring.addresses() {
            if let Ok(signer) = keyring.get(&address) {
                self = self.signer(signer);
            }
        }
        self
    }

    /// Add every key in a Sui CLI keystore file.
    pub fn keystore_file(self, path: impl AsRef<Path>) -> Result<Self, Error> {
        let loaded = Keyring::from_keystore_file(path.as_ref())?;
        Ok(self.keyring(&loaded))
    }

    /// Build the configuration.
    pub fn build(self) -> SuiConfig {
        SuiConfig {
            network: self.network,
            rpc_url: self.rpc_url,
            faucet_url: self.faucet_url,
            active_address: self.active_address,
            keyring: self.keyring,
            max_page_size: self.max_page_size,
            request_timeout: self.request_timeout,
        }
    }
}

impl From<SuiConfigBuilder> for SuiConfig {
    fn from(builder: SuiConfigBuilder) -> Self {
        builder.build()
    }
}
