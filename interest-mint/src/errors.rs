use interest_client::rpc::RpcError;
use solana_program::program_error::ProgramError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterestMintError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Program error: {0}")]
    Program(#[from] ProgramError),

    #[error("Mint account {0} not found")]
    MintNotFound(Pubkey),

    #[error("Token account {0} not found")]
    TokenAccountNotFound(Pubkey),

    #[error("Mint {0} has no interest bearing config")]
    MissingInterestBearingConfig(Pubkey),

    #[error("Expected the transaction to fail: {0}")]
    UnexpectedSuccess(String),

    #[error("Expectation failed: {0}")]
    Expectation(String),

    #[error("Invalid keypair: {0}")]
    Keypair(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InterestMintError>;
