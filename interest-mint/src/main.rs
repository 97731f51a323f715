use clap::Parser;
use interest_client::rpc::{RpcConnection, SolanaRpcConnection};
use interest_mint::{
    cli::{Cli, Commands},
    config::InterestMintConfig,
    constants::{MINIMUM_PAYER_BALANCE, PAYER_AIRDROP_AMOUNT},
    errors::InterestMintError,
    get_interest_bearing_mint_config, initialize_keypair, run_scenario,
    telemetry::setup_telemetry,
    InterestConfigView,
};
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signer};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_telemetry();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => {
            let config = InterestMintConfig::new_for_run(&args);
            debug!("Config: {:?}", config);

            let mut rpc = SolanaRpcConnection::new_with_retry(
                &config.rpc_url,
                Some(CommitmentConfig::confirmed()),
                Some(config.retry_config),
            );
            let payer = initialize_keypair(
                &mut rpc,
                config.keypair_path.as_deref(),
                MINIMUM_PAYER_BALANCE,
                PAYER_AIRDROP_AMOUNT,
            )
            .await?;
            info!("Payer: {}", payer.pubkey());

            let report = run_scenario(&mut rpc, &payer, &config.scenario).await?;
            info!(
                "Scenario finished for mint {}: {}",
                report.mint,
                serde_json::to_string(&report)?
            );
        }
        Commands::ShowConfig(args) => {
            let mut rpc =
                SolanaRpcConnection::new(&args.rpc_url, Some(CommitmentConfig::confirmed()));
            let config = get_interest_bearing_mint_config(&mut rpc, &args.mint)
                .await?
                .ok_or(InterestMintError::MissingInterestBearingConfig(args.mint))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&InterestConfigView::from(&config))?
            );
        }
    }
    Ok(())
}
