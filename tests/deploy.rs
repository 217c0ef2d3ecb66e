//! Tests of the deploy routine against a mock node

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use serde_json::Value;
use taco_shop_scripts::{
    client::{OriginationClient, OriginationRequest, PendingOrigination},
    constants::{CONTRACT_METADATA, TOKEN_CONTRACT_CODE},
    deploy_token_contract,
    errors::ScriptError,
    signer::InMemorySigner,
};

/// The admin address used across the deploy tests
const ADMIN: &str = "tz1VSUr8wWNhLAzempoch5d6hLRiTh8Cjcjb";

/// A mock node recording the originations submitted to it
#[derive(Default)]
struct MockNode {
    /// Whether to reject originations, as a node would on e.g. an
    /// insufficient balance
    reject_origination: bool,
    /// Whether to report the operation as never included
    time_out_confirmation: bool,
    /// The number of originations accepted so far
    originations: AtomicUsize,
    /// The requests submitted to the node
    requests: Mutex<Vec<OriginationRequest>>,
}

impl OriginationClient for MockNode {
    async fn originate(
        &self,
        request: &OriginationRequest,
    ) -> Result<PendingOrigination, ScriptError> {
        if self.reject_origination {
            return Err(ScriptError::Origination(
                "balance of deployer too low".to_string(),
            ));
        }

        let n = self.originations.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        Ok(PendingOrigination {
            operation_hash: format!("onMock{}", n),
            contract_address: format!("KT1Mock{}", n),
        })
    }

    async fn wait_for_confirmation(
        &self,
        pending: &PendingOrigination,
    ) -> Result<String, ScriptError> {
        if self.time_out_confirmation {
            tokio::time::sleep(Duration::from_millis(10)).await;
            return Err(ScriptError::Confirmation(format!(
                "operation {} not included",
                pending.operation_hash
            )));
        }

        Ok(pending.contract_address.clone())
    }
}

#[tokio::test]
async fn test_deploy_submits_matching_storage() {
    let node = MockNode::default();

    let address = deploy_token_contract(&node, ADMIN).await.unwrap();
    assert_eq!(address, "KT1Mock0");

    // Exactly one origination was submitted
    let requests = node.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    // The compiled code is passed through verbatim, with no balance attached
    let expected_code: Value = serde_json::from_str(TOKEN_CONTRACT_CODE).unwrap();
    assert_eq!(request.code, expected_code);
    assert_eq!(request.balance, 0);

    // The metadata big map holds exactly the pointer and contents entries
    let metadata = request.storage.pointer("/args/0").unwrap().as_array().unwrap();
    assert_eq!(metadata.len(), 2);

    assert_eq!(metadata[0].pointer("/args/0/string").unwrap(), "");
    assert_eq!(
        metadata[0].pointer("/args/1/bytes").unwrap(),
        hex::encode("tezos-storage:contents").as_str()
    );

    assert_eq!(metadata[1].pointer("/args/0/string").unwrap(), "contents");
    let contents_hex = metadata[1]
        .pointer("/args/1/bytes")
        .and_then(Value::as_str)
        .unwrap();
    let document: Value = serde_json::from_slice(&hex::decode(contents_hex).unwrap()).unwrap();
    let expected: Value = serde_json::from_str(CONTRACT_METADATA).unwrap();
    assert_eq!(document, expected);

    // The admin lands in the extension record
    assert_eq!(
        request
            .storage
            .pointer("/args/1/args/1/args/1/args/1/args/0/string")
            .unwrap(),
        ADMIN
    );
}

#[tokio::test]
async fn test_rejected_origination_surfaces_error() {
    let node = MockNode {
        reject_origination: true,
        ..Default::default()
    };

    let result = deploy_token_contract(&node, ADMIN).await;
    assert!(matches!(result, Err(ScriptError::Origination(_))));
    assert_eq!(node.originations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_confirmation_timeout_surfaces_error() {
    let node = MockNode {
        time_out_confirmation: true,
        ..Default::default()
    };

    // The routine must fail rather than hang on a node that never
    // includes the operation
    let result = tokio::time::timeout(
        Duration::from_secs(1),
        deploy_token_contract(&node, ADMIN),
    )
    .await
    .expect("deploy did not terminate under a stalled confirmation");

    assert!(matches!(result, Err(ScriptError::Confirmation(_))));
}

#[tokio::test]
async fn test_repeat_deploys_originate_distinct_contracts() {
    let node = MockNode::default();

    // Origination is not idempotent: each invocation creates a new contract
    let first = deploy_token_contract(&node, ADMIN).await.unwrap();
    let second = deploy_token_contract(&node, ADMIN).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(node.originations.load(Ordering::SeqCst), 2);
}

#[test]
fn test_malformed_secret_key_fails_at_signer_construction() {
    // The entry point builds the signer before constructing any client, so
    // a malformed key never reaches the network
    assert!(matches!(
        InMemorySigner::from_secret_key("definitely-not-an-edsk"),
        Err(ScriptError::SignerCreation(_))
    ));
}
