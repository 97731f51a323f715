pub mod local_test_validator;
pub mod rpc;

/// Reexport so downstream crates share a single solana-sdk version.
pub use solana_sdk;
