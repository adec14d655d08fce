#![forbid(unsafe_code)]

//! Transfer SDK for building, signing, submitting, and confirming SOL
//! transfers against a JSON-RPC node.

/// SOL/lamport amount conversion.
pub mod amount;
/// Transfer message builder.
pub mod builder;
/// Environment-driven configuration overrides.
pub mod config;
/// Confirmation poller and cancellation handle.
pub mod confirm;
/// Tracing subscriber bootstrap.
pub mod logging;
/// Node collaborator traits and transport types.
pub mod node;
/// JSON-RPC node client implementation.
pub mod rpc;
/// One-shot sign-and-submit path.
pub mod submit;
/// Transfer pipeline entry points and outcome types.
pub mod transfer;

pub use amount::{AmountError, LAMPORTS_PER_SOL, lamports_to_sol, sol_to_lamports};
pub use builder::{TransferBuilder, UnsignedTransfer};
pub use confirm::{CancelHandle, ConfirmConfig, ConfirmOutcome, await_confirmation};
pub use node::{NodeClient, SendConfig, TransactionStatus, TransportError};
pub use rpc::JsonRpcNodeClient;
pub use submit::{SubmitError, sign_and_submit};
pub use transfer::{BuildError, TransferConfig, TransferOutcome, transfer, transfer_with_client};
