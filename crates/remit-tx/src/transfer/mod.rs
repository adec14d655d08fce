//! Transfer pipeline entry points and outcome types.

/// Pipeline orchestration.
mod pipeline;

use std::time::Duration;

use solana_message::CompileError;
use solana_signature::Signature;
use solana_signer::SignerError;
use thiserror::Error;

pub use pipeline::{transfer, transfer_with_client};

use crate::{
    amount::AmountError,
    config,
    confirm::ConfirmConfig,
    node::{SendConfig, TransportError},
    rpc::DEFAULT_RPC_TIMEOUT,
};

/// Default priority fee in micro-lamports per compute unit.
pub const DEFAULT_PRIORITY_FEE_MICRO_LAMPORTS: u64 = 100_000;

/// Failures that abort a transfer attempt before anything is submitted.
#[derive(Debug, Error)]
pub enum BuildError {
    /// User-facing amount was rejected.
    #[error("invalid transfer amount: {source}")]
    Amount {
        /// Amount validation failure.
        source: AmountError,
    },
    /// Sender signing identity could not be resolved.
    #[error("failed to resolve sender signing identity: {source}")]
    Signer {
        /// Underlying signer error.
        source: SignerError,
    },
    /// RPC client construction failed.
    #[error("failed to construct rpc client: {source}")]
    Client {
        /// Transport-level failure.
        source: TransportError,
    },
    /// Sender balance could not be read for the precondition check.
    #[error("failed to read sender balance: {source}")]
    FetchBalance {
        /// Transport-level failure.
        source: TransportError,
    },
    /// Recent blockhash could not be fetched.
    #[error("failed to fetch recent blockhash: {source}")]
    FetchBlockhash {
        /// Transport-level failure.
        source: TransportError,
    },
    /// Instruction set could not be compiled into a message.
    #[error("failed to compile transfer message: {source}")]
    Compile {
        /// Message compilation failure.
        source: CompileError,
    },
}

/// Terminal result of one transfer attempt.
///
/// A closed set: every path through the pipeline maps to exactly one
/// variant, and no variant doubles as another.
#[derive(Debug)]
pub enum TransferOutcome {
    /// Transaction landed and executed without error.
    Confirmed {
        /// Accepted transaction signature.
        signature: Signature,
    },
    /// Transaction landed but the ledger rejected its effects. A normal
    /// outcome, not a system error.
    Failed {
        /// Accepted transaction signature.
        signature: Signature,
        /// Ledger-recorded error payload.
        error: String,
    },
    /// Sender balance is below the requested amount; nothing was submitted.
    InsufficientFunds {
        /// Sender balance in lamports at check time.
        balance: u64,
        /// Requested amount in lamports.
        required: u64,
    },
    /// Attempt aborted before submission.
    Build {
        /// Pre-submission failure.
        source: BuildError,
    },
    /// Node rejected the queueing call; no signature exists.
    Submit {
        /// Submission failure.
        source: crate::submit::SubmitError,
    },
    /// Retry budget exhausted with status unknown. Not a failure: the
    /// transaction may still confirm, and the signature supports later
    /// re-query.
    TimedOut {
        /// Accepted transaction signature.
        signature: Signature,
        /// Status queries performed before giving up.
        attempts: u32,
    },
}

impl TransferOutcome {
    /// Returns true only for a confirmed successful transfer.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// Returns the transaction signature when one was obtained.
    #[must_use]
    pub const fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Confirmed { signature }
            | Self::Failed { signature, .. }
            | Self::TimedOut { signature, .. } => Some(signature),
            Self::InsufficientFunds { .. } | Self::Build { .. } | Self::Submit { .. } => None,
        }
    }
}

/// Transfer pipeline tuning.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Priority fee in micro-lamports per compute unit.
    pub priority_fee_micro_lamports: u64,
    /// Optional compute unit limit.
    pub compute_unit_limit: Option<u32>,
    /// HTTP timeout for the constructed RPC client.
    pub rpc_timeout: Duration,
    /// Submission tuning.
    pub send: SendConfig,
    /// Confirmation polling tuning.
    pub confirm: ConfirmConfig,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            priority_fee_micro_lamports: DEFAULT_PRIORITY_FEE_MICRO_LAMPORTS,
            compute_unit_limit: None,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            send: SendConfig::default(),
            confirm: ConfirmConfig::default(),
        }
    }
}

impl TransferConfig {
    /// Builds a config from environment overrides, falling back to
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            priority_fee_micro_lamports: config::read_priority_fee_micro_lamports(),
            compute_unit_limit: config::read_compute_unit_limit(),
            rpc_timeout: Duration::from_secs(config::read_rpc_timeout_secs()),
            send: SendConfig::default(),
            confirm: ConfirmConfig {
                max_attempts: config::read_confirm_max_attempts(),
                retry_delay: Duration::from_secs(config::read_confirm_retry_delay_secs()),
            },
        }
    }
}
