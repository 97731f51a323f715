use std::io;

use solana_banks_client::BanksClientError;
use solana_client::client_error::ClientError;
use solana_program::instruction::InstructionError;
use solana_sdk::transaction::TransactionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("BanksError: {0}")]
    BanksError(#[from] BanksClientError),

    #[error("TransactionError: {0}")]
    TransactionError(#[from] TransactionError),

    #[error("ClientError: {0}")]
    ClientError(#[from] ClientError),

    #[error("IoError: {0}")]
    IoError(#[from] io::Error),

    #[error("Error: `{0}`")]
    CustomError(String),

    #[error("Assert Rpc Error: {0}")]
    AssertRpcError(String),
}

impl RpcError {
    /// Returns the transaction error the cluster reported, regardless of
    /// which backend surfaced it. Rpc nodes report failed preflight
    /// simulations inside the client error, banks report them directly.
    pub fn transaction_error(&self) -> Option<TransactionError> {
        match self {
            RpcError::TransactionError(err) => Some(err.clone()),
            RpcError::BanksError(BanksClientError::TransactionError(err)) => Some(err.clone()),
            RpcError::BanksError(BanksClientError::SimulationError { err, .. }) => {
                Some(err.clone())
            }
            RpcError::ClientError(err) => err.get_transaction_error(),
            _ => None,
        }
    }

    /// Custom program error code and the index of the failing instruction.
    pub fn custom_error_code(&self) -> Option<(u8, u32)> {
        match self.transaction_error()? {
            TransactionError::InstructionError(index, InstructionError::Custom(code)) => {
                Some((index, code))
            }
            _ => None,
        }
    }
}

pub fn assert_rpc_error<T>(
    result: Result<T, RpcError>,
    i: u8,
    expected_error_code: u32,
) -> Result<(), RpcError> {
    let error = match result {
        Ok(_) => {
            return Err(RpcError::AssertRpcError(format!(
                "Expected error code {} at instruction {}, but the transaction succeeded",
                expected_error_code, i
            )))
        }
        Err(error) => error,
    };
    match error.custom_error_code() {
        Some((index, error_code)) if index == i && error_code == expected_error_code => Ok(()),
        Some((index, error_code)) => Err(RpcError::AssertRpcError(format!(
            "Expected error code: {} at instruction {}, got: {} at instruction {} error: {}",
            expected_error_code, i, error_code, index, error
        ))),
        None => Err(RpcError::AssertRpcError(format!(
            "Unexpected error type: {:?}",
            error
        ))),
    }
}
