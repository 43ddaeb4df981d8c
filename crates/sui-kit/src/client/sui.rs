//! The main Sui client.

use tracing::Dispatch;

use super::config::SuiConfig;
use super::rpc::RpcClient;
use super::transport::{HttpTransport, Transport};
use crate::error::Error;
use crate::types::{ExecuteRequestType, SuiAddress};

/// The main client for the Sui JSON-RPC API.
///
/// `SuiClient` owns one long-lived transport. Every operation performs its
/// round trips synchronously and returns a [`SuiRpcResult`](crate::SuiRpcResult);
/// failures never panic and never escape as `Err` from the facade.
///
/// # Example
///
/// ```rust,no_run
/// use sui_kit::*;
///
/// let keypair = KeyPair::generate_ed25519();
/// let mut client = SuiConfig::devnet().keypair(keypair).build().client()?;
///
/// let faucet = client.get_gas_from_faucet(None);
/// if faucet.is_ok() {
///     let gas = client.get_gas(None, true);
///     println!("{} gas coins", gas.result_data().data.len());
/// }
///
/// client.close();
/// # Ok::<(), sui_kit::Error>(())
/// ```
pub struct SuiClient {
    config: SuiConfig,
    request_type: ExecuteRequestType,
    rpc: RpcClient,
    dispatch: Option<Dispatch>,
}

impl SuiClient {
    /// Create a client over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty RPC URL or a zero page size, and
    /// a transport error if the HTTP client cannot be built.
    pub fn new(
        config: impl Into<SuiConfig>,
        request_type: ExecuteRequestType,
    ) -> Result<Self, Error> {
        let config = config.into();
        config.validate()?;
        let transport = HttpTransport::new(config.request_timeout())?;
        Ok(Self::assemble(config, request_type, Box::new(transport)))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(
        config: impl Into<SuiConfig>,
        request_type: ExecuteRequestType,
        transport: impl Transport + 'static,
    ) -> Result<Self, Error> {
        let config = config.into();
        config.validate()?;
        Ok(Self::assemble(config, request_type, Box::new(transport)))
    }

    fn assemble(
        config: SuiConfig,
        request_type: ExecuteRequestType,
        transport: Box<dyn Transport>,
    ) -> Self {
        tracing::info!(
            network = %config.network(),
            rpc_url = config.rpc_url(),
            request_type = request_type.as_str(),
            "created Sui client"
        );
        let rpc = RpcClient::new(config.rpc_url(), transport);
        Self {
            config,
            request_type,
            rpc,
            dispatch: None,
        }
    }

    /// Route this client's log events to `dispatch` instead of the global
    /// default subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn config(&self) -> &SuiConfig {
        &self.config
    }

    /// Request type used when submitting signed transactions.
    pub fn request_type(&self) -> ExecuteRequestType {
        self.request_type
    }

    pub fn rpc_url(&self) -> &str {
        self.rpc.url()
    }

    pub fn is_closed(&self) -> bool {
        self.rpc.is_closed()
    }

    /// Release the transport.
    ///
    /// Closing twice is a no-op. Every request made after close fails with
    /// [`RpcError::TransportClosed`](crate::RpcError::TransportClosed) without
    /// touching the network.
    pub fn close(&mut self) {
        if self.rpc.is_closed() {
            return;
        }
        self.scoped(|| tracing::info!(rpc_url = self.rpc.url(), "closing Sui client"));
        self.rpc.close();
    }

    pub(crate) fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Run `f` with the injected dispatcher as the default, if there is one.
    pub(crate) fn scoped<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    /// `address`, or the configured active address.
    pub(crate) fn resolve_address(&self, address: Option<SuiAddress>) -> Result<SuiAddress, Error> {
        address
            .or_else(|| self.config.active_address())
            .ok_or(Error::NoActiveAddress)
    }
}

impl SuiConfig {
    /// Build a [`SuiClient`] over HTTP with the default request type.
    pub fn client(self) -> Result<SuiClient, Error> {
        SuiClient::new(self, ExecuteRequestType::default())
    }
}

impl std::fmt::Debug for SuiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiClient")
            .field("config", &self.config)
            .field("request_type", &self.request_type)
            .field("rpc", &self.rpc)
            .field("dispatch", &self.dispatch.is_some())
            .finish()
    }
}
