//! The client interface through which originations are submitted.
//!
//! The deploy routine takes the client as an explicit parameter rather than
//! configuring a shared global provider, so tests can substitute a mock node
//! for the live RPC implementation in [`crate::rpc`].

use serde_json::Value;

use crate::errors::ScriptError;

/// A request to originate a contract from its code and initial storage
#[derive(Clone, Debug)]
pub struct OriginationRequest {
    /// The compiled contract code, as Micheline JSON
    pub code: Value,
    /// The initial storage literal, as Micheline JSON
    pub storage: Value,
    /// The balance transferred to the new contract, in mutez
    pub balance: u64,
}

/// A broadcast origination awaiting inclusion in a block
#[derive(Clone, Debug)]
pub struct PendingOrigination {
    /// The injected operation's hash
    pub operation_hash: String,
    /// The originated contract's address, as reported by the node's
    /// validation of the operation
    pub contract_address: String,
}

/// A client capable of originating contracts on a chain
#[allow(async_fn_in_trait)]
pub trait OriginationClient {
    /// Sign and broadcast a single origination operation
    async fn originate(
        &self,
        request: &OriginationRequest,
    ) -> Result<PendingOrigination, ScriptError>;

    /// Wait for the origination to be included in a block, resolving to the
    /// originated contract's address
    async fn wait_for_confirmation(
        &self,
        pending: &PendingOrigination,
    ) -> Result<String, ScriptError>;
}
