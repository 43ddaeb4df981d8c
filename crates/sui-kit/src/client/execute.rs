//! The execution pipeline: round trips, signing and submission.

use std::sync::Arc;

use serde_json::Value;

use super::signer::{Signer, sign_multisig, sign_transaction};
use super::sui::SuiClient;
use crate::builders::{Builder, DryRunTransaction, ExecuteTransaction};
use crate::error::Error;
use crate::result::SuiRpcResult;
use crate::types::{
    DryRunResponse, ExecuteRequestType, MultiSig, PreExecutionResult, PublicKey, SuiAddress,
    TransactionBlockResponse, TransactionBytes, TxBytes,
};

impl SuiClient {
    /// Run a builder.
    ///
    /// Query builders take one round trip. Transaction builders take two:
    /// the node returns unsigned bytes, the client signs them with the
    /// builder's [`authority`](Builder::authority) from the keyring, and
    /// submits them with the client's request type.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sui_kit::builders::TransferSui;
    /// use sui_kit::*;
    ///
    /// let keypair = KeyPair::generate_ed25519();
    /// let me = keypair.address();
    /// let client = SuiConfig::testnet().keypair(keypair).build().client()?;
    ///
    /// let coin: ObjectID = "0x7".parse()?;
    /// let recipient: SuiAddress = "0x8".parse()?;
    /// let result = client.execute(&TransferSui::new(me, coin, recipient, 2_000_000).amount(10));
    /// match result.error() {
    ///     None => println!("digest {}", result.result_data().digest),
    ///     Some(e) => println!("failed ({:?}): {e}", result.kind()),
    /// }
    /// # Ok::<(), sui_kit::Error>(())
    /// ```
    pub fn execute<B: Builder>(&self, builder: &B) -> SuiRpcResult<B::Output> {
        self.execute_with_signers(builder, &[])
    }

    /// Like [`execute`](Self::execute), with more signers after the authority.
    ///
    /// Every signer is resolved through the keyring before the first round
    /// trip, so an unknown address costs no network call.
    pub fn execute_with_signers<B: Builder>(
        &self,
        builder: &B,
        additional_signers: &[SuiAddress],
    ) -> SuiRpcResult<B::Output> {
        self.scoped(|| self.try_execute(builder, additional_signers).into())
    }

    /// Fetch the unsigned transaction bytes of a transaction builder.
    pub fn execute_no_sign<B: Builder>(&self, builder: &B) -> SuiRpcResult<PreExecutionResult> {
        self.scoped(|| self.try_execute_no_sign(builder, "execute_no_sign").into())
    }

    /// Simulate a transaction builder without committing it.
    pub fn dry_run<B: Builder>(&self, builder: &B) -> SuiRpcResult<DryRunResponse> {
        self.scoped(|| {
            self.try_execute_no_sign(builder, "dry_run")
                .and_then(|pre| self.submit(&DryRunTransaction::new(pre.tx_bytes.tx_bytes)))
                .into()
        })
    }

    /// Sign already-built transaction bytes with keyring signers and submit them.
    pub fn sign_and_submit(
        &self,
        signer: SuiAddress,
        tx_bytes: &TxBytes,
        additional_signers: &[SuiAddress],
    ) -> SuiRpcResult<TransactionBlockResponse> {
        self.scoped(|| {
            let run = || -> Result<TransactionBlockResponse, Error> {
                let signers = self.lookup_signers(signer, additional_signers)?;
                self.sign_and_execute(tx_bytes, &signers, self.request_type())
            };
            run().into()
        })
    }

    /// Execute a transaction builder signed by a multisig account.
    ///
    /// `pub_keys` picks which multisig members sign. Signatures of
    /// `signers` follow the aggregated signature in order. The transaction
    /// is submitted with [`ExecuteRequestType::WaitForLocalExecution`].
    /// Query builders are executed directly.
    pub fn execute_with_multisig<B: Builder>(
        &self,
        builder: &B,
        multisig: &MultiSig,
        pub_keys: &[PublicKey],
        signers: &[&dyn Signer],
    ) -> SuiRpcResult<B::Output> {
        self.scoped(|| {
            if !builder.requires_signing() {
                return self.submit(builder).into();
            }
            let run = || -> Result<B::Output, Error> {
                let pre = self.try_execute_no_sign(builder, "execute_with_multisig")?;
                let tx_bytes = pre.tx_bytes.tx_bytes;
                let signatures = sign_multisig(&tx_bytes, multisig, pub_keys, signers)?;
                tracing::debug!(
                    multisig = %multisig.address(),
                    signatures = signatures.len(),
                    "submitting multisig transaction"
                );
                let execute = ExecuteTransaction::new(
                    tx_bytes,
                    signatures,
                    ExecuteRequestType::WaitForLocalExecution,
                );
                builder.interpret(self.round_trip(&execute)?)
            };
            run().into()
        })
    }

    fn try_execute<B: Builder>(
        &self,
        builder: &B,
        additional_signers: &[SuiAddress],
    ) -> Result<B::Output, Error> {
        if !builder.requires_signing() {
            return self.submit(builder);
        }
        let authority = self.resolve_address(builder.authority())?;
        let signers = self.lookup_signers(authority, additional_signers)?;
        let pre = self.try_execute_no_sign(builder, "execute")?;
        let raw = self.sign_and_submit_raw(&pre.tx_bytes.tx_bytes, &signers, self.request_type())?;
        builder.interpret(raw)
    }

    /// The no-sign round trip. Its response is never a final result.
    fn try_execute_no_sign<B: Builder>(
        &self,
        builder: &B,
        operation: &'static str,
    ) -> Result<PreExecutionResult, Error> {
        if !builder.requires_signing() {
            return Err(Error::NotTransactional(operation));
        }
        let authority = self.resolve_address(builder.authority())?;
        let raw = self.round_trip(builder)?;
        let tx_bytes: TransactionBytes = serde_json::from_value(raw)?;
        Ok(PreExecutionResult {
            authority,
            tx_bytes,
        })
    }

    fn lookup_signers(
        &self,
        authority: SuiAddress,
        additional: &[SuiAddress],
    ) -> Result<Vec<Arc<dyn Signer>>, Error> {
        let keyring = self.config().keyring();
        std::iter::once(&authority)
            .chain(additional)
            .map(|address| keyring.get(address))
            .collect()
    }

    fn sign_and_execute(
        &self,
        tx_bytes: &TxBytes,
        signers: &[Arc<dyn Signer>],
        request_type: ExecuteRequestType,
    ) -> Result<TransactionBlockResponse, Error> {
        let raw = self.sign_and_submit_raw(tx_bytes, signers, request_type)?;
        Ok(serde_json::from_value(raw)?)
    }

    fn sign_and_submit_raw(
        &self,
        tx_bytes: &TxBytes,
        signers: &[Arc<dyn Signer>],
        request_type: ExecuteRequestType,
    ) -> Result<Value, Error> {
        let refs: Vec<&dyn Signer> = signers.iter().map(|s| s.as_ref()).collect();
        let signatures = sign_transaction(tx_bytes, &refs)?;
        tracing::debug!(signatures = signatures.len(), "submitting signed transaction");
        self.round_trip(&ExecuteTransaction::new(
            tx_bytes.clone(),
            signatures,
            request_type,
        ))
    }

    /// One round trip, interpreted by the builder.
    pub(crate) fn submit<B: Builder>(&self, builder: &B) -> Result<B::Output, Error> {
        let raw = self.round_trip(builder)?;
        builder.interpret(raw)
    }

    /// One round trip, raw `result` member.
    pub(crate) fn round_trip<B: Builder>(&self, builder: &B) -> Result<Value, Error> {
        let params = builder.params()?;
        Ok(self
            .rpc()
            .call(builder.method(), &params, &builder.header())?)
    }
}
