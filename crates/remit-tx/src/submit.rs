//! One-shot sign-and-submit path.

use solana_signature::Signature;
use solana_signer::{SignerError, signers::Signers};
use thiserror::Error;

use crate::{
    builder::UnsignedTransfer,
    node::{NodeClient, SendConfig, TransportError},
};

/// Submission-level errors.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Signing the compiled message failed.
    #[error("failed to sign transfer: {source}")]
    Sign {
        /// Underlying signer error.
        source: SignerError,
    },
    /// Signed transaction could not be serialized for the wire.
    #[error("failed to encode signed transaction: {source}")]
    Encode {
        /// Bincode encode error.
        source: Box<bincode::ErrorKind>,
    },
    /// Node rejected the queueing call itself.
    #[error("node rejected transaction submission: {source}")]
    Rejected {
        /// Transport-level failure.
        source: TransportError,
    },
}

/// Signs a compiled transfer and submits it to the node, each exactly once.
///
/// Submission is never retried here: a resubmission would be built against a
/// different blockhash and carry a different signature, breaking the 1:1
/// mapping the confirmation poller depends on.
///
/// # Errors
///
/// Returns [`SubmitError`] when signing, encoding, or the queueing call
/// fails. A failed queueing call means no signature exists to confirm.
pub async fn sign_and_submit<T>(
    node: &dyn NodeClient,
    unsigned: UnsignedTransfer,
    signers: &T,
    config: &SendConfig,
) -> Result<Signature, SubmitError>
where
    T: Signers + ?Sized,
{
    let tx = unsigned
        .sign(signers)
        .map_err(|source| SubmitError::Sign { source })?;
    let tx_bytes = bincode::serialize(&tx).map_err(|source| SubmitError::Encode { source })?;
    node.send_transaction(&tx_bytes, config)
        .await
        .map_err(|source| SubmitError::Rejected { source })
}
