use std::{path::PathBuf, time::Duration};

use interest_client::rpc::RetryConfig;

use crate::{cli::RunArgs, scenario::ScenarioConfig};

#[derive(Debug, Clone)]
pub struct InterestMintConfig {
    pub rpc_url: String,
    pub keypair_path: Option<PathBuf>,
    pub retry_config: RetryConfig,
    pub scenario: ScenarioConfig,
}

impl InterestMintConfig {
    pub fn new_for_run(args: &RunArgs) -> Self {
        Self {
            rpc_url: args.rpc_url.clone(),
            keypair_path: args.keypair.clone(),
            retry_config: RetryConfig {
                max_retries: args.max_retries,
                retry_delay: Duration::from_millis(args.retry_delay),
                timeout: Duration::from_millis(args.retry_timeout),
            },
            scenario: ScenarioConfig {
                initial_rate: args.initial_rate,
                updated_rate: args.updated_rate,
                new_authority_rate: args.new_authority_rate,
                mint_amount: args.mint_amount,
                mint_iterations: args.mint_iterations as usize,
            },
        }
    }
}
