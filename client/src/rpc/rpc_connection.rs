use std::fmt::Debug;

use async_trait::async_trait;
use solana_program::instruction::Instruction;
use solana_sdk::{
    account::{from_account, Account},
    clock::Clock,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    sysvar,
    transaction::Transaction,
};

use crate::rpc::errors::RpcError;

#[async_trait]
pub trait RpcConnection: Send + Sync + Debug + 'static {
    fn new<U: ToString>(url: U, commitment_config: Option<CommitmentConfig>) -> Self
    where
        Self: Sized;

    fn get_url(&self) -> String;

    async fn health(&self) -> Result<(), RpcError>;

    async fn process_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, RpcError>;

    async fn create_and_send_transaction<'a>(
        &'a mut self,
        instructions: &'a [Instruction],
        payer: &'a Pubkey,
        signers: &'a [&'a Keypair],
    ) -> Result<Signature, RpcError> {
        let blockhash = self.get_latest_blockhash().await?;
        let transaction =
            Transaction::new_signed_with_payer(instructions, Some(payer), signers, blockhash);
        self.process_transaction(transaction).await
    }

    async fn get_account(&mut self, address: Pubkey) -> Result<Option<Account>, RpcError>;
    async fn get_minimum_balance_for_rent_exemption(
        &mut self,
        data_len: usize,
    ) -> Result<u64, RpcError>;
    async fn airdrop_lamports(&mut self, to: &Pubkey, lamports: u64)
        -> Result<Signature, RpcError>;
    async fn get_balance(&mut self, pubkey: &Pubkey) -> Result<u64, RpcError>;
    async fn get_latest_blockhash(&mut self) -> Result<Hash, RpcError>;

    /// Cluster clock as seen by programs executing at the current slot.
    async fn get_clock(&mut self) -> Result<Clock, RpcError> {
        let account = self
            .get_account(sysvar::clock::id())
            .await?
            .ok_or_else(|| RpcError::CustomError("Clock sysvar not found".to_string()))?;
        from_account::<Clock, _>(&account)
            .ok_or_else(|| RpcError::CustomError("Failed to deserialize clock".to_string()))
    }
}
