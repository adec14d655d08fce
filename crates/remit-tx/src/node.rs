//! Node collaborator traits and shared transport types.

use async_trait::async_trait;
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use thiserror::Error;

/// Transport-level errors surfaced by node client implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Invalid client configuration.
    #[error("node client configuration invalid: {message}")]
    Config {
        /// Human-readable description.
        message: String,
    },
    /// Request failed before a response was decoded.
    #[error("node request failed: {message}")]
    Failure {
        /// Human-readable description.
        message: String,
    },
    /// Node returned a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Human-readable message.
        message: String,
    },
    /// Node returned a response this client cannot interpret.
    #[error("malformed node response: {message}")]
    InvalidResponse {
        /// Human-readable description.
        message: String,
    },
}

/// Submission tuning passed through to `sendTransaction`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SendConfig {
    /// Skip preflight simulation when true.
    pub skip_preflight: bool,
    /// Optional preflight commitment string.
    pub preflight_commitment: Option<String>,
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            skip_preflight: true,
            preflight_commitment: None,
        }
    }
}

/// Recorded on-chain status of a submitted transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransactionStatus {
    /// Transaction is not visible at the queried commitment level.
    NotFound,
    /// Transaction landed; `err` carries the recorded failure when present.
    Landed {
        /// Ledger-recorded error payload, absent on success.
        err: Option<String>,
    },
}

/// Ledger node interface consumed by the transfer pipeline.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Returns the lamport balance of an account.
    async fn balance(&self, account: &Pubkey) -> Result<u64, TransportError>;

    /// Returns the latest blockhash.
    async fn latest_blockhash(&self) -> Result<Hash, TransportError>;

    /// Submits signed transaction bytes and returns the accepted signature.
    async fn send_transaction(
        &self,
        tx_bytes: &[u8],
        config: &SendConfig,
    ) -> Result<Signature, TransportError>;

    /// Returns the recorded status of a submitted transaction at `confirmed`
    /// commitment.
    async fn transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<TransactionStatus, TransportError>;
}
