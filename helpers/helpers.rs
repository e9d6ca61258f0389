//! Common helper functions for scripts and tests

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
    json_abi::Function,
    network::{EthereumWallet, TransactionBuilder},
    node_bindings::{Anvil, AnvilInstance},
    primitives::{Address, Bytes, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use anyhow::{anyhow, bail, Context, Result};

const FEE_PERCENTAGE_SIGNATURE: &str = "feePercentage() returns (uint256)";

/// Environment configuration for scripts and tests
pub struct Config {
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub fee_percentage: U256,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            rpc_url: std::env::var("RPC_URL").ok(),
            private_key: std::env::var("PRIVATE_KEY").ok(),
            fee_percentage: std::env::var("FEE_PERCENTAGE")
                .ok()
                .and_then(|value| value.parse::<U256>().ok())
                .unwrap_or_else(|| U256::from(500)),
        }
    }
}

/// Script setup with a provider, the signing account, and the dev node (if spawned)
pub struct ScriptSetup {
    pub provider: DynProvider,
    pub sender: Address,
    /// Keeps a spawned dev node alive for as long as the setup is in use.
    pub anvil: Option<AnvilInstance>,
}

/// Initialize a provider with a funded signer.
///
/// Connects to `RPC_URL` with `PRIVATE_KEY` when both are configured,
/// otherwise spawns a throwaway local dev node and uses its first key.
pub async fn setup_script(config: &Config) -> Result<ScriptSetup> {
    match (&config.rpc_url, &config.private_key) {
        (Some(rpc_url), Some(private_key)) => {
            let signer: PrivateKeySigner = private_key
                .parse()
                .context("PRIVATE_KEY is not a valid private key")?;
            let sender = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect(rpc_url)
                .await
                .with_context(|| format!("failed to connect to {rpc_url}"))?
                .erased();

            Ok(ScriptSetup {
                provider,
                sender,
                anvil: None,
            })
        }
        _ => {
            let anvil = Anvil::new().try_spawn().context(
                "failed to spawn a local dev node; set RPC_URL and PRIVATE_KEY to use an external node",
            )?;
            let signer: PrivateKeySigner = anvil.keys()[0].clone().into();
            let sender = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_http(anvil.endpoint_url())
                .erased();

            Ok(ScriptSetup {
                provider,
                sender,
                anvil: Some(anvil),
            })
        }
    }
}

/// Encode a function call from a Solidity-style signature and its arguments.
///
/// Returns the 4-byte selector followed by the ABI-packed arguments. Fails if
/// the signature does not parse or the arguments do not match the declared
/// parameter types and arity.
pub fn encode_function_call(signature: &str, args: &[DynSolValue]) -> Result<Bytes> {
    let function = Function::parse(signature)
        .with_context(|| format!("invalid function signature `{signature}`"))?;
    let call_data = function
        .abi_encode_input(args)
        .with_context(|| format!("arguments do not match `{}`", function.signature()))?;

    Ok(call_data.into())
}

/// Decode return data against the signature's declared outputs.
pub fn decode_function_output(signature: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
    let function = Function::parse(signature)
        .with_context(|| format!("invalid function signature `{signature}`"))?;
    let values = function
        .abi_decode_output(data)
        .with_context(|| format!("failed to decode output of `{}`", function.signature()))?;

    Ok(values)
}

/// Creation bytecode of the fee contract, embedded from the checked-in artifact.
pub fn fee_contract_bytecode() -> Result<Bytes> {
    let artifact = include_str!("../contracts/fee-contract/FeeContract.bin");
    let bytecode = hex::decode(artifact.trim()).context("contract artifact is not valid hex")?;

    Ok(bytecode.into())
}

/// Deploy the fee contract and return its address.
pub async fn deploy_fee_contract(setup: &ScriptSetup) -> Result<Address> {
    let tx = TransactionRequest::default().with_deploy_code(fee_contract_bytecode()?);
    let receipt = setup
        .provider
        .send_transaction(tx)
        .await
        .context("failed to send deployment transaction")?
        .get_receipt()
        .await
        .context("deployment transaction was not confirmed")?;

    receipt
        .contract_address
        .ok_or_else(|| anyhow!("deployment receipt carries no contract address"))
}

/// Send a transaction with the given call data and await its receipt.
pub async fn send_call(
    setup: &ScriptSetup,
    to: Address,
    call_data: Bytes,
) -> Result<alloy::rpc::types::TransactionReceipt> {
    let tx = TransactionRequest::default()
        .with_from(setup.sender)
        .with_to(to)
        .with_input(call_data);
    let receipt = setup
        .provider
        .send_transaction(tx)
        .await
        .context("failed to send transaction")?
        .get_receipt()
        .await
        .context("transaction was not confirmed")?;

    if !receipt.status() {
        bail!("transaction {} reverted", receipt.transaction_hash);
    }

    Ok(receipt)
}

/// Read the current fee percentage from the contract.
pub async fn read_fee_percentage(setup: &ScriptSetup, contract: Address) -> Result<U256> {
    let call_data = encode_function_call(FEE_PERCENTAGE_SIGNATURE, &[])?;
    let tx = TransactionRequest::default()
        .with_to(contract)
        .with_input(call_data);
    let raw = setup
        .provider
        .call(tx)
        .await
        .context("feePercentage call failed")?;

    let values = decode_function_output(FEE_PERCENTAGE_SIGNATURE, &raw)?;
    match values.as_slice() {
        [value] => value
            .as_uint()
            .map(|(fee, _)| fee)
            .ok_or_else(|| anyhow!("feePercentage returned a non-uint value")),
        other => bail!("feePercentage returned {} values, expected 1", other.len()),
    }
}
