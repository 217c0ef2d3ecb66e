use clap::Parser;
use taco_shop_scripts::{
    cli::Cli, deploy_token_contract, errors::ScriptError, rpc::RpcClient, signer::InMemorySigner,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let Cli {
        node_url,
        secret_key,
        admin,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    // Best-effort single attempt: any failure is printed and swallowed
    match deploy(&node_url, &secret_key, &admin).await {
        Ok(address) => println!("[OK] {}", address),
        Err(e) => println!("{}", e),
    }
}

async fn deploy(node_url: &str, secret_key: &str, admin: &str) -> Result<String, ScriptError> {
    let signer = InMemorySigner::from_secret_key(secret_key)?;
    let client = RpcClient::new(node_url, signer)?;

    deploy_token_contract(&client, admin).await
}
