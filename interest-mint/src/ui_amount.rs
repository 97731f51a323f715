use interest_client::rpc::RpcConnection;
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{
    amount_to_ui_amount_string_trimmed,
    extension::{interest_bearing_mint::InterestBearingConfig, StateWithExtensions},
    state::Mint,
};

use crate::{
    errors::{InterestMintError, Result},
    rate::interest_config_from_mint_data,
};

/// Display amount of `amount` raw tokens at `unix_timestamp`. Mints without
/// an interest bearing config only shift the decimal point.
pub fn ui_amount_with_interest(
    config: Option<&InterestBearingConfig>,
    amount: u64,
    decimals: u8,
    unix_timestamp: i64,
) -> String {
    config
        .and_then(|config| config.amount_to_ui_amount(amount, decimals, unix_timestamp))
        .unwrap_or_else(|| amount_to_ui_amount_string_trimmed(amount, decimals))
}

/// Converts a raw amount of `mint` into its display amount, including the
/// interest accrued up to the cluster's current time.
pub async fn amount_to_ui_amount<R: RpcConnection>(
    rpc: &mut R,
    mint: &Pubkey,
    amount: u64,
) -> Result<String> {
    let account = rpc
        .get_account(*mint)
        .await?
        .ok_or(InterestMintError::MintNotFound(*mint))?;
    let decimals = StateWithExtensions::<Mint>::unpack(&account.data)?
        .base
        .decimals;
    let config = interest_config_from_mint_data(&account.data)?;
    let clock = rpc.get_clock().await?;
    Ok(ui_amount_with_interest(
        config.as_ref(),
        amount,
        decimals,
        clock.unix_timestamp,
    ))
}
