use interest_client::rpc::RpcConnection;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use spl_associated_token_account::{
    get_associated_token_address_with_program_id,
    instruction::create_associated_token_account as create_ata_instruction,
};
use spl_token_2022::{
    extension::StateWithExtensions, instruction::mint_to as mint_to_instruction, state::Account,
};
use tracing::{debug, info};

use crate::errors::{InterestMintError, Result};

pub fn get_token_2022_ata(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, &spl_token_2022::ID)
}

/// Creates the Token-2022 associated token account of `owner` for `mint`,
/// funded by `payer`.
pub async fn create_associated_token_account<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Pubkey> {
    let instruction = create_ata_instruction(&payer.pubkey(), owner, mint, &spl_token_2022::ID);
    rpc.create_and_send_transaction(&[instruction], &payer.pubkey(), &[payer]).await?;

    let ata = get_token_2022_ata(owner, mint);
    info!("Created token account {} for owner {}", ata, owner);
    Ok(ata)
}

pub async fn mint_to<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    destination: &Pubkey,
    mint_authority: &Keypair,
    amount: u64,
) -> Result<Signature> {
    let instruction = mint_to_instruction(
        &spl_token_2022::ID,
        mint,
        destination,
        &mint_authority.pubkey(),
        &[],
        amount,
    )?;
    let signature = rpc
        .create_and_send_transaction(
            &[instruction],
            &payer.pubkey(),
            &[payer, mint_authority],
        )
        .await?;
    debug!("Minted {} of {} to {}", amount, mint, destination);
    Ok(signature)
}

/// Raw, unscaled token amount held by a Token-2022 account.
pub fn token_amount_from_account_data(data: &[u8]) -> Result<u64> {
    let account = StateWithExtensions::<Account>::unpack(data)?;
    Ok(account.base.amount)
}

pub async fn get_token_account_amount<R: RpcConnection>(
    rpc: &mut R,
    address: &Pubkey,
) -> Result<u64> {
    let account = rpc
        .get_account(*address)
        .await?
        .ok_or(InterestMintError::TokenAccountNotFound(*address))?;
    token_amount_from_account_data(&account.data)
}
