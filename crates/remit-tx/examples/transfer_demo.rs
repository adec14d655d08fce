//! Environment-driven SOL transfer demo.
#![doc(hidden)]

use std::str::FromStr;

use remit_tx::{TransferConfig, TransferOutcome, logging};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
enum TransferDemoError {
    #[error("missing required environment variable `{name}`")]
    MissingEnv { name: &'static str },
    #[error("invalid recipient pubkey: {source}")]
    InvalidRecipient {
        source: solana_pubkey::ParsePubkeyError,
    },
    #[error("invalid SOL amount `{value}`: {source}")]
    InvalidAmount {
        value: String,
        source: std::num::ParseFloatError,
    },
}

fn read_required_env(name: &'static str) -> Result<String, TransferDemoError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(TransferDemoError::MissingEnv { name })
}

#[tokio::main]
async fn main() -> Result<(), TransferDemoError> {
    logging::init_tracing();

    let rpc_url = read_required_env("REMIT_RPC_URL")?;
    // Base58-encoded 64-byte keypair, as exported by common wallet tooling.
    let sender = Keypair::from_base58_string(&read_required_env("REMIT_SENDER_KEYPAIR")?);
    let recipient = Pubkey::from_str(&read_required_env("REMIT_RECIPIENT")?)
        .map_err(|source| TransferDemoError::InvalidRecipient { source })?;
    let amount_raw = read_required_env("REMIT_SOL_AMOUNT")?;
    let sol_amount =
        amount_raw
            .parse::<f64>()
            .map_err(|source| TransferDemoError::InvalidAmount {
                value: amount_raw.clone(),
                source,
            })?;

    let outcome = remit_tx::transfer(
        &rpc_url,
        &sender,
        recipient,
        sol_amount,
        &TransferConfig::from_env(),
        None,
    )
    .await;

    match outcome {
        TransferOutcome::Confirmed { signature } => {
            tracing::info!(%signature, "transfer confirmed");
        }
        TransferOutcome::Failed { signature, error } => {
            tracing::warn!(%signature, error = %error, "transfer failed on chain");
        }
        TransferOutcome::InsufficientFunds { balance, required } => {
            tracing::warn!(balance, required, "insufficient balance");
        }
        TransferOutcome::Build { source } => {
            tracing::error!(error = %source, "transfer aborted before submission");
        }
        TransferOutcome::Submit { source } => {
            tracing::error!(error = %source, "submission rejected");
        }
        TransferOutcome::TimedOut {
            signature,
            attempts,
        } => {
            tracing::warn!(
                %signature,
                attempts,
                "confirmation timed out; status can be re-queried with the signature"
            );
        }
    }
    Ok(())
}
