//! Scripts for deploying the taco shop FA2 permit token contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod client;
mod commands;
pub mod constants;
pub mod errors;
pub mod rpc;
pub mod signer;
pub mod storage;

pub use commands::deploy_token_contract;
