//! Confirmation poller: bounded status polling over an explicit state
//! machine.

/// Cooperative cancellation handle.
mod cancel;
/// Async polling driver.
mod poller;
/// Pure poll state machine.
mod state;

pub use cancel::CancelHandle;
pub use poller::{
    ConfirmConfig, ConfirmOutcome, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, await_confirmation,
};
pub use state::{Observation, PollState};
