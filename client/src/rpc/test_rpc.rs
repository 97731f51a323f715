use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use solana_program_test::{ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    clock::Clock,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
    transaction::Transaction,
};

use super::{RpcConnection, RpcError};

/// In-process bank with the SPL programs (Token, Token-2022, Associated
/// Token Account) preloaded.
pub struct ProgramTestRpcConnection {
    pub context: ProgramTestContext,
}

impl Debug for ProgramTestRpcConnection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProgramTestRpcConnection")
    }
}

impl ProgramTestRpcConnection {
    pub async fn start() -> Self {
        let context = ProgramTest::default().start_with_context().await;
        Self { context }
    }

    pub fn get_payer(&self) -> &Keypair {
        &self.context.payer
    }

    /// Moves the cluster clock forward without producing slots.
    pub async fn advance_clock(&mut self, seconds: i64) -> Result<Clock, RpcError> {
        let mut clock = self.context.banks_client.get_sysvar::<Clock>().await?;
        clock.unix_timestamp = clock.unix_timestamp.saturating_add(seconds);
        self.context.set_sysvar(&clock);
        Ok(clock)
    }
}

#[async_trait]
impl RpcConnection for ProgramTestRpcConnection {
    fn new<U: ToString>(_url: U, _commitment_config: Option<CommitmentConfig>) -> Self
    where
        Self: Sized,
    {
        unimplemented!("use ProgramTestRpcConnection::start")
    }

    fn get_url(&self) -> String {
        unimplemented!("get_url doesn't make sense for ProgramTestRpcConnection")
    }

    async fn health(&self) -> Result<(), RpcError> {
        Ok(())
    }

    async fn process_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, RpcError> {
        let sig = *transaction
            .signatures
            .first()
            .ok_or_else(|| RpcError::CustomError("Transaction is not signed".to_string()))?;
        let result = self
            .context
            .banks_client
            .process_transaction_with_metadata(transaction)
            .await
            .map_err(RpcError::from)?;
        result.result.map_err(RpcError::TransactionError)?;
        Ok(sig)
    }

    async fn get_account(&mut self, address: Pubkey) -> Result<Option<Account>, RpcError> {
        self.context
            .banks_client
            .get_account(address)
            .await
            .map_err(RpcError::from)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &mut self,
        data_len: usize,
    ) -> Result<u64, RpcError> {
        let rent = self
            .context
            .banks_client
            .get_rent()
            .await
            .map_err(RpcError::from);

        Ok(rent?.minimum_balance(data_len))
    }

    async fn airdrop_lamports(
        &mut self,
        to: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, RpcError> {
        let payer = self.context.payer.insecure_clone();
        let transfer_instruction = system_instruction::transfer(&payer.pubkey(), to, lamports);
        let latest_blockhash = self.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[transfer_instruction],
            Some(&payer.pubkey()),
            &[&payer],
            latest_blockhash,
        );
        self.process_transaction(transaction).await
    }

    async fn get_balance(&mut self, pubkey: &Pubkey) -> Result<u64, RpcError> {
        self.context
            .banks_client
            .get_balance(*pubkey)
            .await
            .map_err(RpcError::from)
    }

    async fn get_latest_blockhash(&mut self) -> Result<Hash, RpcError> {
        // Identical transactions in a row need distinct blockhashes.
        self.context
            .get_new_latest_blockhash()
            .await
            .map_err(RpcError::from)
    }

    async fn get_clock(&mut self) -> Result<Clock, RpcError> {
        self.context
            .banks_client
            .get_sysvar::<Clock>()
            .await
            .map_err(RpcError::from)
    }
}
