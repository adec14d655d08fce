//! Environment-driven configuration overrides.

use crate::{
    confirm::DEFAULT_MAX_ATTEMPTS, rpc::DEFAULT_RPC_TIMEOUT,
    transfer::DEFAULT_PRIORITY_FEE_MICRO_LAMPORTS,
};

fn read_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Priority fee rate in micro-lamports per compute unit.
pub fn read_priority_fee_micro_lamports() -> u64 {
    read_env_var("REMIT_PRIORITY_FEE_MICRO_LAMPORTS")
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_PRIORITY_FEE_MICRO_LAMPORTS)
}

/// Optional compute unit limit; unset by default.
pub fn read_compute_unit_limit() -> Option<u32> {
    read_env_var("REMIT_COMPUTE_UNIT_LIMIT")
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
}

/// Confirmation attempt budget.
pub fn read_confirm_max_attempts() -> u32 {
    read_env_var("REMIT_CONFIRM_MAX_ATTEMPTS")
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_MAX_ATTEMPTS)
}

/// Pause between confirmation attempts, in seconds.
pub fn read_confirm_retry_delay_secs() -> u64 {
    read_env_var("REMIT_CONFIRM_RETRY_DELAY_SECS")
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(3)
}

/// HTTP timeout for RPC calls, in seconds.
pub fn read_rpc_timeout_secs() -> u64 {
    read_env_var("REMIT_RPC_TIMEOUT_SECS")
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_RPC_TIMEOUT.as_secs())
}
