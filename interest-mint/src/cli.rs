use std::path::PathBuf;

use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{DEFAULT_RPC_URL, MAX_MINT_ITERATIONS};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an interest bearing mint and exercise its rate authority.
    Run(RunArgs),
    /// Print the interest bearing config of an existing mint as JSON.
    ShowConfig(ShowConfigArgs),
}

#[derive(Parser, Clone, Debug)]
pub struct RunArgs {
    #[arg(long, env = "INTEREST_MINT_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Fee payer keypair file. Defaults to the Solana CLI keypair, or a fresh
    /// keypair if none exists.
    #[arg(long, env = "INTEREST_MINT_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    #[arg(
        long,
        env = "INTEREST_MINT_INITIAL_RATE",
        default_value = "32767",
        allow_hyphen_values = true
    )]
    pub initial_rate: i16,

    #[arg(
        long,
        env = "INTEREST_MINT_UPDATED_RATE",
        default_value = "0",
        allow_hyphen_values = true
    )]
    pub updated_rate: i16,

    #[arg(
        long,
        env = "INTEREST_MINT_NEW_AUTHORITY_RATE",
        default_value = "10",
        allow_hyphen_values = true
    )]
    pub new_authority_rate: i16,

    #[arg(long, env = "INTEREST_MINT_MINT_AMOUNT", default_value = "100")]
    pub mint_amount: u64,

    #[arg(
        long,
        env = "INTEREST_MINT_MINT_ITERATIONS",
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=MAX_MINT_ITERATIONS)
    )]
    pub mint_iterations: u32,

    #[arg(long, env = "INTEREST_MINT_MAX_RETRIES", default_value = "3")]
    pub max_retries: u32,

    #[arg(long, env = "INTEREST_MINT_RETRY_DELAY", default_value = "1000")]
    pub retry_delay: u64,

    #[arg(long, env = "INTEREST_MINT_RETRY_TIMEOUT", default_value = "30000")]
    pub retry_timeout: u64,
}

#[derive(Parser, Clone, Debug)]
pub struct ShowConfigArgs {
    #[arg(long, env = "INTEREST_MINT_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    #[arg(long)]
    pub mint: Pubkey,
}
