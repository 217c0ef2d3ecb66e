//! Definitions of CLI arguments for the deploy script

use clap::Parser;

/// Deploy the taco shop token contract to a Tezos node
#[derive(Parser)]
pub struct Cli {
    /// URL of the node's RPC endpoint
    #[arg(long, env = "NODE_URL")]
    pub node_url: String,

    /// Secret key of the deployer (`edsk...`)
    // TODO: Better key management
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Address assigned as the contract admin
    #[arg(long, env = "ADMIN")]
    pub admin: String,
}
