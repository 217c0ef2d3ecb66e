//! Implementation of the deploy script

use serde_json::Value;
use tracing::info;

use crate::{
    client::{OriginationClient, OriginationRequest},
    constants::{ORIGINATION_BALANCE_MUTEZ, TOKEN_CONTRACT_CODE},
    errors::ScriptError,
    storage::{metadata_document, InitialStorage},
};

/// Originate the taco shop token contract with the given admin, returning
/// the originated contract's address.
///
/// Exactly one origination is attempted: there are no retries, and a failure
/// at any stage aborts the deploy.
pub async fn deploy_token_contract(
    client: &impl OriginationClient,
    admin: &str,
) -> Result<String, ScriptError> {
    let code: Value = serde_json::from_str(TOKEN_CONTRACT_CODE)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
    let metadata = metadata_document()?;

    let storage = InitialStorage::new(admin, &metadata)?;

    let request = OriginationRequest {
        code,
        storage: storage.to_micheline(),
        balance: ORIGINATION_BALANCE_MUTEZ,
    };

    info!(admin = %admin, "submitting origination");
    let pending = client.originate(&request).await?;

    info!(
        operation_hash = %pending.operation_hash,
        "awaiting confirmation"
    );
    client.wait_for_confirmation(&pending).await
}
