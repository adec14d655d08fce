//! JSON-RPC node client implementation.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use solana_signature::Signature;

use crate::node::{NodeClient, SendConfig, TransactionStatus, TransportError};

/// Default HTTP timeout for RPC calls.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-RPC 2.0 node client backed by an HTTP transport.
#[derive(Debug, Clone)]
pub struct JsonRpcNodeClient {
    /// HTTP client used for RPC calls.
    client: reqwest::Client,
    /// Target JSON-RPC endpoint URL.
    rpc_url: String,
}

/// JSON-RPC envelope for calls whose result is always present on success.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    /// Result value for successful calls.
    result: Option<T>,
    /// Error payload for failed calls.
    error: Option<JsonRpcError>,
}

/// JSON-RPC envelope for calls whose result may legitimately be `null`.
#[derive(Debug, Deserialize)]
struct JsonRpcNullableResponse {
    /// Result value; `Null` when the node has nothing recorded.
    #[serde(default)]
    result: serde_json::Value,
    /// Error payload for failed calls.
    error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    /// JSON-RPC error code.
    code: i64,
    /// Human-readable message.
    message: String,
}

/// `getBalance`/`getLatestBlockhash` context envelope.
#[derive(Debug, Deserialize)]
struct RpcContextValue<T> {
    /// Commitment-scoped value.
    value: T,
}

/// `getLatestBlockhash` value payload.
#[derive(Debug, Deserialize)]
struct LatestBlockhashValue {
    /// Base58 blockhash.
    blockhash: String,
    /// Last block height at which the blockhash is valid.
    #[serde(rename = "lastValidBlockHeight")]
    last_valid_block_height: u64,
}

/// `getTransaction` result payload, reduced to the fields the poller reads.
#[derive(Debug, Deserialize)]
struct TransactionResponse {
    /// Execution metadata; absent while the node is still backfilling.
    meta: Option<TransactionMeta>,
}

/// `getTransaction` execution metadata.
#[derive(Debug, Deserialize)]
struct TransactionMeta {
    /// Ledger-recorded error payload, `null` on success.
    err: Option<serde_json::Value>,
}

impl JsonRpcNodeClient {
    /// Creates a node client with the default HTTP timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`] when HTTP client creation fails.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(rpc_url, DEFAULT_RPC_TIMEOUT)
    }

    /// Creates a node client with an explicit HTTP timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`] when HTTP client creation fails.
    pub fn with_timeout(
        rpc_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| TransportError::Config {
                message: error.to_string(),
            })?;
        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
        })
    }

    /// Posts one JSON-RPC request and returns the raw response body.
    async fn post(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<reqwest::Response, TransportError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await
            .map_err(|error| TransportError::Failure {
                message: format!("{method}: {error}"),
            })?;
        response
            .error_for_status()
            .map_err(|error| TransportError::Failure {
                message: format!("{method}: {error}"),
            })
    }

    /// Calls a method whose result is always present on success.
    async fn rpc_call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<T, TransportError> {
        let parsed: JsonRpcResponse<T> = self.post(method, params).await?.json().await.map_err(
            |error| TransportError::InvalidResponse {
                message: format!("{method}: {error}"),
            },
        )?;
        if let Some(result) = parsed.result {
            return Ok(result);
        }
        if let Some(error) = parsed.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Err(TransportError::InvalidResponse {
            message: format!("{method}: neither result nor error"),
        })
    }

    /// Calls a method whose result may legitimately be `null`.
    async fn rpc_call_nullable(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        let parsed: JsonRpcNullableResponse =
            self.post(method, params)
                .await?
                .json()
                .await
                .map_err(|error| TransportError::InvalidResponse {
                    message: format!("{method}: {error}"),
                })?;
        if let Some(error) = parsed.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(parsed.result)
    }
}

#[async_trait]
impl NodeClient for JsonRpcNodeClient {
    async fn balance(&self, account: &Pubkey) -> Result<u64, TransportError> {
        let envelope: RpcContextValue<u64> = self
            .rpc_call("getBalance", serde_json::json!([account.to_string()]))
            .await?;
        Ok(envelope.value)
    }

    async fn latest_blockhash(&self) -> Result<Hash, TransportError> {
        let envelope: RpcContextValue<LatestBlockhashValue> = self
            .rpc_call("getLatestBlockhash", serde_json::json!([]))
            .await?;
        tracing::debug!(
            last_valid_block_height = envelope.value.last_valid_block_height,
            "fetched latest blockhash"
        );
        Hash::from_str(&envelope.value.blockhash).map_err(|error| {
            TransportError::InvalidResponse {
                message: format!("getLatestBlockhash: invalid blockhash: {error}"),
            }
        })
    }

    async fn send_transaction(
        &self,
        tx_bytes: &[u8],
        config: &SendConfig,
    ) -> Result<Signature, TransportError> {
        #[derive(Debug, Serialize)]
        struct RpcSendConfig<'config> {
            /// Transaction encoding format.
            encoding: &'config str,
            /// Preflight skip flag.
            #[serde(rename = "skipPreflight")]
            skip_preflight: bool,
            /// Optional preflight commitment.
            #[serde(
                rename = "preflightCommitment",
                skip_serializing_if = "Option::is_none"
            )]
            preflight_commitment: Option<&'config str>,
        }

        let encoded_tx = BASE64_STANDARD.encode(tx_bytes);
        let signature: String = self
            .rpc_call(
                "sendTransaction",
                serde_json::json!([
                    encoded_tx,
                    RpcSendConfig {
                        encoding: "base64",
                        skip_preflight: config.skip_preflight,
                        preflight_commitment: config.preflight_commitment.as_deref(),
                    }
                ]),
            )
            .await?;
        Signature::from_str(&signature).map_err(|error| TransportError::InvalidResponse {
            message: format!("sendTransaction: invalid signature: {error}"),
        })
    }

    async fn transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<TransactionStatus, TransportError> {
        let result = self
            .rpc_call_nullable(
                "getTransaction",
                serde_json::json!([
                    signature.to_string(),
                    {
                        "encoding": "json",
                        "commitment": "confirmed",
                        "maxSupportedTransactionVersion": 0,
                    }
                ]),
            )
            .await?;
        if result.is_null() {
            return Ok(TransactionStatus::NotFound);
        }
        let response: TransactionResponse =
            serde_json::from_value(result).map_err(|error| TransportError::InvalidResponse {
                message: format!("getTransaction: {error}"),
            })?;
        // Meta can lag the transaction record itself; treat it as not yet
        // visible rather than inventing a verdict.
        Ok(response.meta.map_or(TransactionStatus::NotFound, |meta| {
            TransactionStatus::Landed {
                err: meta.err.map(|err| err.to_string()),
            }
        }))
    }
}
