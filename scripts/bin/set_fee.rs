//! Deploy the fee contract and set its fee percentage

use alloy::dyn_abi::DynSolValue;
use anyhow::Result;
use helpers::{
    deploy_fee_contract, encode_function_call, read_fee_percentage, send_call, setup_script,
    Config,
};
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("set_fee=info".parse().unwrap()),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env();

    // instantiate client
    let setup = setup_script(&config).await?;
    info!("Sender account: {}", setup.sender);

    // deploy the contract
    info!("Deploying FeeContract...");
    let contract = deploy_fee_contract(&setup).await?;
    info!("Contract deployed at: {contract}");

    // encode the call data for setFeePercentage
    let call_data = encode_function_call(
        "setFeePercentage(uint256 newFeePercentage)",
        &[DynSolValue::Uint(config.fee_percentage, 256)],
    )?;

    // send the transaction carrying the encoded call data
    info!("Calling setFeePercentage with {}...", config.fee_percentage);
    let receipt = send_call(&setup, contract, call_data).await?;
    info!("Transaction hash: {}", receipt.transaction_hash);

    // read back the new fee
    let new_fee = read_fee_percentage(&setup, contract).await?;
    info!("New fee percentage: {new_fee}");

    Ok(())
}
