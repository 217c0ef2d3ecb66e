//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error parsing the compiled contract artifact or the metadata document
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error constructing the signer from the configured secret key
    SignerCreation(String),
    /// Error in an RPC round-trip to the node
    Rpc(String),
    /// Error originating the contract, i.e. the node rejected the operation
    Origination(String),
    /// Error awaiting confirmation of the origination
    Confirmation(String),
    /// Error de/serializing a JSON value
    Serde(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::SignerCreation(s) => write!(f, "error creating signer: {}", s),
            ScriptError::Rpc(s) => write!(f, "error in node RPC: {}", s),
            ScriptError::Origination(s) => write!(f, "error originating contract: {}", s),
            ScriptError::Confirmation(s) => write!(f, "error confirming origination: {}", s),
            ScriptError::Serde(s) => write!(f, "error de/serializing value: {}", s),
        }
    }
}

impl Error for ScriptError {}
