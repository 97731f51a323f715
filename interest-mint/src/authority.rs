use interest_client::rpc::RpcConnection;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use spl_token_2022::{
    error::TokenError,
    extension::interest_bearing_mint,
    instruction::{set_authority, AuthorityType},
};
use tracing::{debug, info};

use crate::errors::{InterestMintError, Result};

/// Sets the mint's interest rate. `rate_authority` must match the rate
/// authority stored in the mint's config, otherwise the program rejects the
/// transaction. `fee_payer` and `rate_authority` may be the same keypair.
pub async fn update_rate<R: RpcConnection>(
    rpc: &mut R,
    fee_payer: &Keypair,
    mint: &Pubkey,
    rate_authority: &Keypair,
    rate: i16,
) -> Result<Signature> {
    let instruction = interest_bearing_mint::instruction::update_rate(
        &spl_token_2022::ID,
        mint,
        &rate_authority.pubkey(),
        &[],
        rate,
    )?;

    let signature = rpc
        .create_and_send_transaction(
            &[instruction],
            &fee_payer.pubkey(),
            &[fee_payer, rate_authority],
        )
        .await?;
    debug!(
        "Rate of mint {} set to {} by {}",
        mint,
        rate,
        rate_authority.pubkey()
    );
    Ok(signature)
}

/// Hands the interest rate authority to `new_authority`, or removes it when
/// `None`.
pub async fn set_rate_authority<R: RpcConnection>(
    rpc: &mut R,
    fee_payer: &Keypair,
    mint: &Pubkey,
    current_authority: &Keypair,
    new_authority: Option<&Pubkey>,
) -> Result<Signature> {
    let instruction = set_authority(
        &spl_token_2022::ID,
        mint,
        new_authority,
        AuthorityType::InterestRate,
        &current_authority.pubkey(),
        &[],
    )?;

    let signature = rpc
        .create_and_send_transaction(
            &[instruction],
            &fee_payer.pubkey(),
            &[fee_payer, current_authority],
        )
        .await?;
    info!(
        "Rate authority of mint {} moved from {} to {:?}",
        mint,
        current_authority.pubkey(),
        new_authority
    );
    Ok(signature)
}

/// Succeeds only if `result` is the program rejecting a signer that is not
/// the configured authority. Any other error is passed through.
pub fn expect_authority_rejection<T>(result: Result<T>, operation: &str) -> Result<()> {
    match result {
        Ok(_) => Err(InterestMintError::UnexpectedSuccess(format!(
            "{} succeeded without the rate authority",
            operation
        ))),
        Err(InterestMintError::Rpc(error))
            if matches!(
                error.custom_error_code(),
                Some((_, code)) if code == TokenError::OwnerMismatch as u32
            ) =>
        {
            Ok(())
        }
        Err(error) => Err(error),
    }
}
