use std::{
    fmt::{Debug, Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use solana_client::{client_error::ClientErrorKind, rpc_client::RpcClient};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use tokio::time::{sleep, Instant};
use tracing::warn;

use crate::rpc::{errors::RpcError, rpc_connection::RpcConnection};

pub enum SolanaRpcUrl {
    Testnet,
    Devnet,
    Localnet,
    Custom(String),
}

impl Display for SolanaRpcUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            SolanaRpcUrl::Testnet => "https://api.testnet.solana.com".to_string(),
            SolanaRpcUrl::Devnet => "https://api.devnet.solana.com".to_string(),
            SolanaRpcUrl::Localnet => "http://127.0.0.1:8899".to_string(),
            SolanaRpcUrl::Custom(url) => url.clone(),
        };
        write!(f, "{}", str)
    }
}

#[derive(Clone, Debug, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct SolanaRpcConnection {
    pub client: RpcClient,
    pub retry_config: RetryConfig,
}

impl Debug for SolanaRpcConnection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolanaRpcConnection {{ client: {:?} }}",
            self.client.url()
        )
    }
}

impl SolanaRpcConnection {
    pub fn new_with_retry<U: ToString>(
        url: U,
        commitment_config: Option<CommitmentConfig>,
        retry_config: Option<RetryConfig>,
    ) -> Self {
        let commitment_config = commitment_config.unwrap_or(CommitmentConfig::confirmed());
        let client = RpcClient::new_with_commitment(url.to_string(), commitment_config);
        let retry_config = retry_config.unwrap_or_default();
        Self {
            client,
            retry_config,
        }
    }

    async fn retry<F, Fut, T>(&self, operation: F) -> Result<T, RpcError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, RpcError>>,
    {
        let mut attempts = 0;
        let start_time = Instant::now();
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !Self::should_retry(&e) {
                        return Err(e);
                    }
                    attempts += 1;
                    if attempts >= self.retry_config.max_retries
                        || start_time.elapsed() >= self.retry_config.timeout
                    {
                        return Err(e);
                    }
                    warn!(
                        "Operation failed, retrying in {:?} (attempt {}/{}): {:?}",
                        self.retry_config.retry_delay,
                        attempts,
                        self.retry_config.max_retries,
                        e
                    );
                    tokio::task::yield_now().await;
                    sleep(self.retry_config.retry_delay).await;
                }
            }
        }
    }

    /// Only transport failures are retried. A transaction the cluster
    /// rejected fails the same way on every attempt.
    fn should_retry(error: &RpcError) -> bool {
        if error.transaction_error().is_some() {
            return false;
        }
        match error {
            RpcError::ClientError(client_error) => matches!(
                client_error.kind(),
                ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_)
            ),
            RpcError::IoError(_) => true,
            _ => false,
        }
    }
}

/// Calls `check` every `retry_delay` until it reports `true` or `timeout`
/// elapses. Transport failures of a single check are retried, anything
/// else is returned.
pub(crate) async fn poll_until_confirmed<F, Fut>(
    retry_config: &RetryConfig,
    check: F,
) -> Result<(), RpcError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<bool, RpcError>>,
{
    let start_time = Instant::now();
    let mut checks = 0;
    loop {
        checks += 1;
        match check().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) if SolanaRpcConnection::should_retry(&e) => {
                warn!("Confirmation check {} failed: {:?}", checks, e);
            }
            Err(e) => return Err(e),
        }
        if start_time.elapsed() >= retry_config.timeout {
            return Err(RpcError::CustomError(format!(
                "Not confirmed after {} checks in {:?}",
                checks, retry_config.timeout
            )));
        }
        sleep(retry_config.retry_delay).await;
    }
}

#[async_trait]
impl RpcConnection for SolanaRpcConnection {
    fn new<U: ToString>(url: U, commitment_config: Option<CommitmentConfig>) -> Self
    where
        Self: Sized,
    {
        Self::new_with_retry(url, commitment_config, None)
    }

    fn get_url(&self) -> String {
        self.client.url()
    }

    async fn health(&self) -> Result<(), RpcError> {
        self.retry(|| async { self.client.get_health().map_err(RpcError::from) })
            .await
    }

    async fn process_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, RpcError> {
        self.retry(|| async {
            self.client
                .send_and_confirm_transaction(&transaction)
                .map_err(RpcError::from)
        })
        .await
    }

    async fn get_account(&mut self, address: Pubkey) -> Result<Option<Account>, RpcError> {
        self.retry(|| async {
            self.client
                .get_account_with_commitment(&address, self.client.commitment())
                .map(|response| response.value)
                .map_err(RpcError::from)
        })
        .await
    }

    async fn get_minimum_balance_for_rent_exemption(
        &mut self,
        data_len: usize,
    ) -> Result<u64, RpcError> {
        self.retry(|| async {
            self.client
                .get_minimum_balance_for_rent_exemption(data_len)
                .map_err(RpcError::from)
        })
        .await
    }

    async fn airdrop_lamports(
        &mut self,
        to: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, RpcError> {
        let signature = self
            .retry(|| async {
                self.client
                    .request_airdrop(to, lamports)
                    .map_err(RpcError::from)
            })
            .await?;
        let client = &self.client;
        let commitment = client.commitment();
        poll_until_confirmed(&self.retry_config, || async move {
            client
                .confirm_transaction_with_commitment(&signature, commitment)
                .map(|response| response.value)
                .map_err(RpcError::from)
        })
        .await?;
        Ok(signature)
    }

    async fn get_balance(&mut self, pubkey: &Pubkey) -> Result<u64, RpcError> {
        self.retry(|| async { self.client.get_balance(pubkey).map_err(RpcError::from) })
            .await
    }

    async fn get_latest_blockhash(&mut self) -> Result<Hash, RpcError> {
        self.retry(|| async {
            self.client
                .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
                .map(|(hash, _)| hash)
                .map_err(RpcError::from)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use solana_sdk::{instruction::InstructionError, transaction::TransactionError};

    use super::*;

    fn fast_retry_config(timeout_ms: u64) -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            retry_delay: Duration::from_millis(1),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[test]
    fn test_solana_rpc_url_display() {
        assert_eq!(SolanaRpcUrl::Localnet.to_string(), "http://127.0.0.1:8899");
        assert_eq!(
            SolanaRpcUrl::Custom("http://validator:8899".to_string()).to_string(),
            "http://validator:8899"
        );
    }

    #[test]
    fn test_transaction_errors_are_not_retried() {
        let error = RpcError::TransactionError(TransactionError::InstructionError(
            0,
            InstructionError::Custom(4),
        ));
        assert!(!SolanaRpcConnection::should_retry(&error));
        assert!(!SolanaRpcConnection::should_retry(&RpcError::CustomError(
            "x".to_string()
        )));
        assert!(SolanaRpcConnection::should_retry(&RpcError::IoError(
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused")
        )));
    }

    #[test]
    fn test_new_connection_uses_confirmed_commitment() {
        let rpc = SolanaRpcConnection::new(SolanaRpcUrl::Localnet, None);
        assert_eq!(rpc.get_url(), "http://127.0.0.1:8899");
        assert_eq!(rpc.client.commitment(), CommitmentConfig::confirmed());
        assert_eq!(rpc.retry_config.max_retries, 3);
    }

    #[tokio::test]
    async fn test_poll_until_confirmed_waits_for_confirmation() {
        let checks = &AtomicU32::new(0);
        poll_until_confirmed(&fast_retry_config(5_000), || async move {
            // Unconfirmed twice, then confirmed.
            Ok::<_, RpcError>(checks.fetch_add(1, Ordering::SeqCst) >= 2)
        })
        .await
        .unwrap();
        assert_eq!(checks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_poll_until_confirmed_tolerates_transport_errors() {
        let checks = &AtomicU32::new(0);
        poll_until_confirmed(&fast_retry_config(5_000), || async move {
            if checks.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(RpcError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "reset",
                )))
            } else {
                Ok(true)
            }
        })
        .await
        .unwrap();
        assert_eq!(checks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_poll_until_confirmed_times_out() {
        let checks = &AtomicU32::new(0);
        let result = poll_until_confirmed(&fast_retry_config(20), || async move {
            checks.fetch_add(1, Ordering::SeqCst);
            Ok::<_, RpcError>(false)
        })
        .await;
        assert!(matches!(result, Err(RpcError::CustomError(_))));
        assert!(checks.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_poll_until_confirmed_returns_transaction_errors() {
        let checks = &AtomicU32::new(0);
        let result = poll_until_confirmed(&fast_retry_config(5_000), || async move {
            checks.fetch_add(1, Ordering::SeqCst);
            Err::<bool, _>(RpcError::TransactionError(TransactionError::AccountNotFound))
        })
        .await;
        assert!(matches!(result, Err(RpcError::TransactionError(_))));
        assert_eq!(checks.load(Ordering::SeqCst), 1);
    }
}
