//! Pipeline orchestration.

use solana_pubkey::Pubkey;
use solana_signer::Signer;

use super::{BuildError, TransferConfig, TransferOutcome};
use crate::{
    amount::{lamports_to_sol, sol_to_lamports},
    builder::TransferBuilder,
    confirm::{CancelHandle, ConfirmOutcome, await_confirmation},
    node::NodeClient,
    rpc::JsonRpcNodeClient,
    submit::sign_and_submit,
};

/// Runs the transfer pipeline against an injected node client.
///
/// Stages run strictly forward: balance precondition, build against a fresh
/// blockhash, one-shot sign-and-submit, bounded confirmation. Every exit
/// path maps to one [`TransferOutcome`] variant.
pub async fn transfer_with_client<S>(
    node: &dyn NodeClient,
    sender: &S,
    recipient: Pubkey,
    sol_amount: f64,
    config: &TransferConfig,
    cancel: Option<&CancelHandle>,
) -> TransferOutcome
where
    S: Signer,
{
    let required = match sol_to_lamports(sol_amount) {
        Ok(lamports) => lamports,
        Err(source) => {
            return TransferOutcome::Build {
                source: BuildError::Amount { source },
            };
        }
    };
    let sender_pubkey = match sender.try_pubkey() {
        Ok(pubkey) => pubkey,
        Err(source) => {
            return TransferOutcome::Build {
                source: BuildError::Signer { source },
            };
        }
    };
    tracing::info!(
        sender = %sender_pubkey,
        recipient = %recipient,
        sol = sol_amount,
        lamports = required,
        "starting transfer"
    );

    // Advisory precondition: the balance can still change before the
    // transaction lands, and an on-chain insufficient-funds failure remains
    // a legitimate confirmed failure.
    let balance = match node.balance(&sender_pubkey).await {
        Ok(balance) => balance,
        Err(source) => {
            return TransferOutcome::Build {
                source: BuildError::FetchBalance { source },
            };
        }
    };
    tracing::info!(
        balance_lamports = balance,
        balance_sol = lamports_to_sol(balance),
        "sender balance"
    );
    if balance < required {
        tracing::warn!(
            balance,
            required,
            "insufficient balance; aborting before submission"
        );
        return TransferOutcome::InsufficientFunds { balance, required };
    }

    let mut builder = TransferBuilder::new(sender_pubkey, recipient, required)
        .with_priority_fee_micro_lamports(config.priority_fee_micro_lamports);
    if let Some(units) = config.compute_unit_limit {
        builder = builder.with_compute_unit_limit(units);
    }
    // Blockhashes expire within a narrow window; fetch right before compile
    // and never reuse one across attempts.
    let recent_blockhash = match node.latest_blockhash().await {
        Ok(blockhash) => blockhash,
        Err(source) => {
            return TransferOutcome::Build {
                source: BuildError::FetchBlockhash { source },
            };
        }
    };
    let unsigned = match builder.compile(recent_blockhash) {
        Ok(unsigned) => unsigned,
        Err(source) => {
            return TransferOutcome::Build {
                source: BuildError::Compile { source },
            };
        }
    };

    let signature = match sign_and_submit(node, unsigned, &[sender], &config.send).await {
        Ok(signature) => signature,
        Err(source) => {
            tracing::warn!(error = %source, "submission rejected");
            return TransferOutcome::Submit { source };
        }
    };
    tracing::info!(%signature, "transaction accepted into the queue");

    match await_confirmation(node, &signature, &config.confirm, cancel).await {
        ConfirmOutcome::Confirmed => TransferOutcome::Confirmed { signature },
        ConfirmOutcome::Failed { error } => TransferOutcome::Failed { signature, error },
        ConfirmOutcome::TimedOut { attempts } => TransferOutcome::TimedOut {
            signature,
            attempts,
        },
    }
}

/// Runs the transfer pipeline against a JSON-RPC endpoint.
pub async fn transfer<S>(
    endpoint: &str,
    sender: &S,
    recipient: Pubkey,
    sol_amount: f64,
    config: &TransferConfig,
    cancel: Option<&CancelHandle>,
) -> TransferOutcome
where
    S: Signer,
{
    let node = match JsonRpcNodeClient::with_timeout(endpoint, config.rpc_timeout) {
        Ok(node) => node,
        Err(source) => {
            return TransferOutcome::Build {
                source: BuildError::Client { source },
            };
        }
    };
    transfer_with_client(&node, sender, recipient, sol_amount, config, cancel).await
}
