//! Shared setup for the integration tests

use alloy::primitives::U256;
use helpers::{setup_script, Config, ScriptSetup};

pub const SET_FEE_SIGNATURE: &str = "setFeePercentage(uint256 newFeePercentage)";

/// Config pinned to a locally spawned dev node, ignoring the environment.
pub fn local_config() -> Config {
    Config {
        rpc_url: None,
        private_key: None,
        fee_percentage: U256::from(500),
    }
}

/// Set up against a local dev node, or `None` (with a notice) when none can
/// be spawned on this machine.
pub async fn local_setup() -> Option<ScriptSetup> {
    match setup_script(&local_config()).await {
        Ok(setup) => Some(setup),
        Err(err) => {
            eprintln!("skipping test, local dev node unavailable: {err:#}");
            None
        }
    }
}
