//! Live RPC client bound to a single node endpoint.
//!
//! Origination is submitted through the node's own helpers: the operation is
//! forged remotely, signed locally, validated via preapply, then injected.
//! Binary encoding of operations therefore never happens client-side.

use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    client::{OriginationClient, OriginationRequest, PendingOrigination},
    constants::{
        CONFIRMATION_POLL_INTERVAL_MS, MAX_CONFIRMATION_POLLS, ORIGINATION_FEE_MUTEZ,
        ORIGINATION_GAS_LIMIT, ORIGINATION_STORAGE_LIMIT,
    },
    errors::ScriptError,
    signer::InMemorySigner,
};

/// The head block header fields used when assembling an operation
#[derive(Debug, Deserialize)]
struct BlockHeader {
    /// The block hash, used as the operation branch
    hash: String,
    /// The protocol the block was baked under, required by preapply
    protocol: String,
}

/// An RPC client bound to one node endpoint, owning the signer whose key
/// pays for and authorizes the operations it submits
pub struct RpcClient {
    /// The underlying HTTP client
    http: reqwest::Client,
    /// The node's RPC base URL
    endpoint: String,
    /// The attached signer
    signer: InMemorySigner,
}

impl RpcClient {
    /// Build a client for the given node endpoint with the given signer
    /// attached
    pub fn new(rpc_url: &str, signer: InMemorySigner) -> Result<Self, ScriptError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: rpc_url.trim_end_matches('/').to_string(),
            signer,
        })
    }

    /// GET a JSON value from the node
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = self
            .http
            .get(format!("{}{}", self.endpoint, path))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Self::parse_response(response).await
    }

    /// POST a JSON body to the node, returning the JSON response
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = self
            .http
            .post(format!("{}{}", self.endpoint, path))
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Self::parse_response(response).await
    }

    /// Deserialize a response body, surfacing non-2xx bodies verbatim
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{}: {}", status, body));
        }

        response.json::<T>().await.map_err(|e| e.to_string())
    }

    /// Fetch the counter of the given manager contract
    async fn fetch_counter(&self, source: &str) -> Result<u64, ScriptError> {
        let counter: String = self
            .get(&format!(
                "/chains/main/blocks/head/context/contracts/{}/counter",
                source
            ))
            .await
            .map_err(ScriptError::Rpc)?;

        counter
            .parse()
            .map_err(|_| ScriptError::Rpc(format!("malformed counter: {}", counter)))
    }
}

impl OriginationClient for RpcClient {
    async fn originate(
        &self,
        request: &OriginationRequest,
    ) -> Result<PendingOrigination, ScriptError> {
        let source = self.signer.public_key_hash();

        let header: BlockHeader = self
            .get("/chains/main/blocks/head/header")
            .await
            .map_err(ScriptError::Rpc)?;
        let counter = self.fetch_counter(&source).await?;

        let contents = json!([{
            "kind": "origination",
            "source": source,
            "fee": ORIGINATION_FEE_MUTEZ.to_string(),
            "counter": (counter + 1).to_string(),
            "gas_limit": ORIGINATION_GAS_LIMIT.to_string(),
            "storage_limit": ORIGINATION_STORAGE_LIMIT.to_string(),
            "balance": request.balance.to_string(),
            "script": {
                "code": request.code,
                "storage": request.storage,
            },
        }]);

        // Forge remotely, sign the watermarked bytes locally
        let forged_hex: String = self
            .post(
                "/chains/main/blocks/head/helpers/forge/operations",
                &json!({ "branch": header.hash, "contents": contents }),
            )
            .await
            .map_err(ScriptError::Origination)?;
        let forged =
            hex::decode(&forged_hex).map_err(|e| ScriptError::Origination(e.to_string()))?;
        let signature = self.signer.sign_operation(&forged);
        debug!("signed {} forged bytes", forged.len());

        // Preapply surfaces node-side rejections before injection and
        // reports the address the origination will create
        let preapplied: Value = self
            .post(
                "/chains/main/blocks/head/helpers/preapply/operations",
                &json!([{
                    "protocol": header.protocol,
                    "branch": header.hash,
                    "contents": contents,
                    "signature": signature.to_edsig(),
                }]),
            )
            .await
            .map_err(ScriptError::Origination)?;

        let result = preapplied
            .pointer("/0/contents/0/metadata/operation_result")
            .ok_or_else(|| ScriptError::Origination("malformed preapply response".to_string()))?;
        if result["status"] != "applied" {
            return Err(ScriptError::Origination(result.to_string()));
        }
        let contract_address = result
            .pointer("/originated_contracts/0")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ScriptError::Origination("no originated contract in preapply result".to_string())
            })?
            .to_string();

        let signed_hex = format!("{}{}", forged_hex, signature.to_hex());
        let operation_hash: String = self
            .post("/injection/operation?chain=main", &signed_hex)
            .await
            .map_err(ScriptError::Origination)?;
        info!(operation_hash = %operation_hash, "operation injected");

        Ok(PendingOrigination {
            operation_hash,
            contract_address,
        })
    }

    async fn wait_for_confirmation(
        &self,
        pending: &PendingOrigination,
    ) -> Result<String, ScriptError> {
        for _ in 0..MAX_CONFIRMATION_POLLS {
            let hashes: Vec<Vec<String>> = self
                .get("/chains/main/blocks/head/operation_hashes")
                .await
                .map_err(ScriptError::Confirmation)?;

            if hashes
                .iter()
                .flatten()
                .any(|hash| hash == &pending.operation_hash)
            {
                return Ok(pending.contract_address.clone());
            }

            tokio::time::sleep(Duration::from_millis(CONFIRMATION_POLL_INTERVAL_MS)).await;
        }

        Err(ScriptError::Confirmation(format!(
            "operation {} not included after {} polls",
            pending.operation_hash, MAX_CONFIRMATION_POLLS
        )))
    }
}
