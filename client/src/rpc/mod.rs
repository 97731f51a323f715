pub mod errors;
pub mod rpc_connection;
pub mod solana_rpc;
#[cfg(feature = "program-test")]
pub mod test_rpc;

pub use errors::{assert_rpc_error, RpcError};
pub use rpc_connection::RpcConnection;
pub use solana_rpc::{RetryConfig, SolanaRpcConnection, SolanaRpcUrl};
#[cfg(feature = "program-test")]
pub use test_rpc::ProgramTestRpcConnection;
