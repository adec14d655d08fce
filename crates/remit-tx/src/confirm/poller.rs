//! Async polling driver.

use std::time::Duration;

use solana_signature::Signature;

use super::{
    cancel::CancelHandle,
    state::{Observation, PollState},
};
use crate::node::{NodeClient, TransactionStatus};

/// Default maximum number of status queries.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Default pause between status queries.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Confirmation polling tuning.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConfirmConfig {
    /// Maximum number of status queries; a zero is treated as one.
    pub max_attempts: u32,
    /// Fixed pause between queries.
    pub retry_delay: Duration,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Terminal confirmation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Transaction landed without a recorded error.
    Confirmed,
    /// Transaction landed and the ledger rejected its effects.
    Failed {
        /// Ledger-recorded error payload.
        error: String,
    },
    /// No definitive status within the budget. The transaction may still
    /// confirm after the caller stops watching.
    TimedOut {
        /// Status queries actually performed; fewer than the budget when
        /// cancelled.
        attempts: u32,
    },
}

/// Polls the node until the transaction resolves, fails, or the attempt
/// budget is exhausted.
///
/// Transport failures during polling are logged and counted against the
/// budget; they never propagate. The inter-attempt pause is cooperative and
/// is skipped after the final attempt. A triggered `cancel` handle makes the
/// poll return [`ConfirmOutcome::TimedOut`] immediately, mid-pause included.
pub async fn await_confirmation(
    node: &dyn NodeClient,
    signature: &Signature,
    config: &ConfirmConfig,
    cancel: Option<&CancelHandle>,
) -> ConfirmOutcome {
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1_u32;
    loop {
        if cancel.is_some_and(CancelHandle::is_cancelled) {
            let attempts = attempt.saturating_sub(1);
            tracing::warn!(%signature, attempts, "confirmation cancelled");
            return ConfirmOutcome::TimedOut { attempts };
        }
        let observation = observe(node, signature, attempt, max_attempts).await;
        match (PollState::Waiting { attempt }).advance(observation, max_attempts) {
            PollState::Succeeded => {
                tracing::info!(%signature, attempt, "transaction confirmed");
                return ConfirmOutcome::Confirmed;
            }
            PollState::Failed { error } => {
                tracing::warn!(%signature, attempt, error = %error, "transaction failed on chain");
                return ConfirmOutcome::Failed { error };
            }
            PollState::TimedOut => {
                tracing::warn!(
                    %signature,
                    attempts = max_attempts,
                    "confirmation attempts exhausted; status unknown"
                );
                return ConfirmOutcome::TimedOut {
                    attempts: max_attempts,
                };
            }
            PollState::Waiting { attempt: next } => {
                if !pause(config.retry_delay, cancel).await {
                    tracing::warn!(%signature, attempts = attempt, "confirmation cancelled");
                    return ConfirmOutcome::TimedOut { attempts: attempt };
                }
                attempt = next;
            }
        }
    }
}

/// Performs one status query and classifies it for the state machine.
async fn observe(
    node: &dyn NodeClient,
    signature: &Signature,
    attempt: u32,
    max_attempts: u32,
) -> Observation {
    match node.transaction_status(signature).await {
        Ok(TransactionStatus::Landed { err }) => Observation::Landed { err },
        Ok(TransactionStatus::NotFound) => {
            tracing::debug!(%signature, attempt, max_attempts, "transaction not yet visible");
            Observation::NotVisible
        }
        Err(error) => {
            tracing::debug!(
                %signature,
                attempt,
                max_attempts,
                error = %error,
                "status query failed; attempt counted"
            );
            Observation::Transport { error }
        }
    }
}

/// Sleeps the inter-attempt delay. Returns false when cancelled mid-pause.
async fn pause(delay: Duration, cancel: Option<&CancelHandle>) -> bool {
    match cancel {
        Some(cancel) => {
            tokio::select! {
                () = cancel.cancelled() => false,
                () = tokio::time::sleep(delay) => true,
            }
        }
        None => {
            tokio::time::sleep(delay).await;
            true
        }
    }
}
