use interest_client::rpc::RpcConnection;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
};
use spl_token_2022::{
    extension::{interest_bearing_mint, ExtensionType},
    instruction::initialize_mint,
    state::Mint,
};
use tracing::{debug, info};

use crate::{constants::MINT_DECIMALS, errors::Result};

/// Account size of a Token-2022 mint carrying only the interest bearing config.
pub fn interest_bearing_mint_len() -> Result<usize> {
    Ok(ExtensionType::try_calculate_account_len::<Mint>(&[
        ExtensionType::InterestBearingConfig,
    ])?)
}

/// Allocates the mint account, attaches the interest bearing config and
/// initializes the mint. The extension must be initialized before the mint.
pub fn create_interest_bearing_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    rate_authority: &Pubkey,
    rate: i16,
    rent: u64,
) -> Result<[Instruction; 3]> {
    let mint_len = interest_bearing_mint_len()?;

    let create_account_ix = system_instruction::create_account(
        payer,
        mint,
        rent,
        mint_len as u64,
        &spl_token_2022::ID,
    );

    let init_interest_bearing_ix = interest_bearing_mint::instruction::initialize(
        &spl_token_2022::ID,
        mint,
        Some(*rate_authority),
        rate,
    )?;

    let init_mint_ix = initialize_mint(&spl_token_2022::ID, mint, payer, None, MINT_DECIMALS)?;

    Ok([create_account_ix, init_interest_bearing_ix, init_mint_ix])
}

/// Creates an interest bearing mint at `mint_keypair` in a single transaction.
/// The payer funds the account and becomes the mint authority.
pub async fn create_token_with_interest_rate_extension<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint_keypair: &Keypair,
    rate_authority: &Pubkey,
    rate: i16,
) -> Result<Signature> {
    let mint_len = interest_bearing_mint_len()?;
    let rent = rpc.get_minimum_balance_for_rent_exemption(mint_len).await?;
    debug!("Mint account length {} requires {} lamports", mint_len, rent);

    let payer_pubkey = payer.pubkey();
    let mint = mint_keypair.pubkey();
    let instructions = create_interest_bearing_mint_instructions(
        &payer_pubkey,
        &mint,
        rate_authority,
        rate,
        rent,
    )?;

    let signature = rpc
        .create_and_send_transaction(&instructions, &payer_pubkey, &[payer, mint_keypair])
        .await?;
    info!(
        "Created interest bearing mint {} with rate {} and rate authority {}",
        mint, rate, rate_authority
    );
    Ok(signature)
}
