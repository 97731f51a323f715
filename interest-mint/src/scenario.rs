use interest_client::rpc::RpcConnection;
use serde::Serialize;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use tracing::info;

use crate::{
    authority::{expect_authority_rejection, set_rate_authority, update_rate},
    constants::{EXAMPLE_RATE, MINT_AMOUNT, MINT_ITERATIONS, NEW_AUTHORITY_RATE, UPDATED_RATE},
    errors::{InterestMintError, Result},
    mint::create_token_with_interest_rate_extension,
    payer::make_keypairs,
    rate::{get_interest_bearing_mint_config, get_interest_bearing_rate, InterestConfigView},
    token_account::{create_associated_token_account, get_token_account_amount, mint_to},
    ui_amount::amount_to_ui_amount,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    pub initial_rate: i16,
    pub updated_rate: i16,
    pub new_authority_rate: i16,
    pub mint_amount: u64,
    pub mint_iterations: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial_rate: EXAMPLE_RATE,
            updated_rate: UPDATED_RATE,
            new_authority_rate: NEW_AUTHORITY_RATE,
            mint_amount: MINT_AMOUNT,
            mint_iterations: MINT_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub rate: Option<i16>,
    pub raw_amount: u64,
    pub ui_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub mint: String,
    pub token_account: String,
    pub initial_rate: i16,
    pub updated_rate: i16,
    pub unauthorized_update_rejected: bool,
    pub rejected_rate: i16,
    pub snapshots: Vec<BalanceSnapshot>,
    pub config: InterestConfigView,
    pub new_authority_rate: i16,
    pub former_authority_rejected: bool,
}

fn expect_rate(actual: Option<i16>, expected: i16, context: &str) -> Result<i16> {
    match actual {
        Some(rate) if rate == expected => Ok(rate),
        other => Err(InterestMintError::Expectation(format!(
            "{}: expected rate {}, read {:?}",
            context, expected, other
        ))),
    }
}

/// A rate that differs from `rate`, so a rejected update that slipped
/// through would show on read back.
fn other_rate(rate: i16) -> i16 {
    rate.wrapping_add(1)
}

/// Creates an interest bearing mint owned by `payer`, then walks through rate
/// updates, minting and an authority handover, checking each outcome.
///
/// The payer is the mint authority and the initial rate authority. A fresh
/// keypair plays the unrelated signer and later the new rate authority.
pub async fn run_scenario<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    config: &ScenarioConfig,
) -> Result<ScenarioReport> {
    let mut keypairs = make_keypairs(2);
    let mint_keypair = keypairs.pop().ok_or_else(|| {
        InterestMintError::Keypair("failed to generate mint keypair".to_string())
    })?;
    let other_account = keypairs.pop().ok_or_else(|| {
        InterestMintError::Keypair("failed to generate second keypair".to_string())
    })?;
    let mint = mint_keypair.pubkey();
    let rate_authority = payer;

    create_token_with_interest_rate_extension(
        rpc,
        payer,
        &mint_keypair,
        &rate_authority.pubkey(),
        config.initial_rate,
    )
    .await?;

    let token_account =
        create_associated_token_account(rpc, payer, &mint, &payer.pubkey()).await?;

    let initial_rate = expect_rate(
        get_interest_bearing_rate(rpc, &mint).await?,
        config.initial_rate,
        "after initialization",
    )?;

    update_rate(rpc, payer, &mint, rate_authority, config.updated_rate).await?;
    let updated_rate = expect_rate(
        get_interest_bearing_rate(rpc, &mint).await?,
        config.updated_rate,
        "after update by the rate authority",
    )?;
    info!(
        "✅ Rate authority updated the rate. Old rate: {}. New rate: {}",
        initial_rate, updated_rate
    );

    let rejected_rate = other_rate(config.updated_rate);
    expect_authority_rejection(
        update_rate(rpc, payer, &mint, &other_account, rejected_rate).await,
        "update_rate signed by an unrelated keypair",
    )?;
    expect_rate(
        get_interest_bearing_rate(rpc, &mint).await?,
        config.updated_rate,
        "after rejected update",
    )?;
    info!("✅ Update signed by an unrelated keypair was rejected");

    let snapshots = sample_accrued_interest(rpc, payer, &mint, &token_account, config).await?;

    let interest_config = get_interest_bearing_mint_config(rpc, &mint)
        .await?
        .ok_or(InterestMintError::MissingInterestBearingConfig(mint))?;
    let config_view = InterestConfigView::from(&interest_config);
    info!(
        "Mint config: {}",
        serde_json::to_string_pretty(&config_view)?
    );

    set_rate_authority(
        rpc,
        payer,
        &mint,
        rate_authority,
        Some(&other_account.pubkey()),
    )
    .await?;
    update_rate(rpc, payer, &mint, &other_account, config.new_authority_rate).await?;
    let new_authority_rate = expect_rate(
        get_interest_bearing_rate(rpc, &mint).await?,
        config.new_authority_rate,
        "after update by the new rate authority",
    )?;
    info!(
        "✅ New rate authority updated the rate. New rate: {}",
        new_authority_rate
    );

    expect_authority_rejection(
        update_rate(
            rpc,
            payer,
            &mint,
            rate_authority,
            other_rate(config.new_authority_rate),
        )
        .await,
        "update_rate signed by the former rate authority",
    )?;
    expect_rate(
        get_interest_bearing_rate(rpc, &mint).await?,
        config.new_authority_rate,
        "after update by the former rate authority",
    )?;
    info!("✅ Former rate authority can no longer update the rate");

    Ok(ScenarioReport {
        mint: mint.to_string(),
        token_account: token_account.to_string(),
        initial_rate,
        updated_rate,
        unauthorized_update_rejected: true,
        rejected_rate,
        snapshots,
        config: config_view,
        new_authority_rate,
        former_authority_rejected: true,
    })
}

/// Mints `mint_amount` per iteration and records rate, raw and display
/// balances. The raw balance must grow by exactly the minted amount.
pub async fn sample_accrued_interest<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    token_account: &Pubkey,
    config: &ScenarioConfig,
) -> Result<Vec<BalanceSnapshot>> {
    let mut snapshots = Vec::new();
    let mut previous_amount = get_token_account_amount(rpc, token_account).await?;

    for _ in 0..config.mint_iterations {
        let rate = get_interest_bearing_rate(rpc, mint).await?;
        mint_to(rpc, payer, mint, token_account, payer, config.mint_amount).await?;

        let raw_amount = get_token_account_amount(rpc, token_account).await?;
        if raw_amount != previous_amount + config.mint_amount {
            return Err(InterestMintError::Expectation(format!(
                "expected balance {} after minting {}, read {}",
                previous_amount + config.mint_amount,
                config.mint_amount,
                raw_amount
            )));
        }
        previous_amount = raw_amount;

        let ui_amount = amount_to_ui_amount(rpc, mint, raw_amount).await?;
        info!(
            "Amount with accrued interest at {:?}: {} tokens = {}",
            rate, raw_amount, ui_amount
        );
        snapshots.push(BalanceSnapshot {
            rate,
            raw_amount,
            ui_amount,
        });
    }
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScenarioConfig::default();
        assert_eq!(config.initial_rate, i16::MAX);
        assert_eq!(config.updated_rate, 0);
        assert_eq!(config.new_authority_rate, 10);
        assert_eq!(config.mint_amount, 100);
        assert_eq!(config.mint_iterations, 5);
    }

    #[test]
    fn test_other_rate_differs() {
        for rate in [i16::MIN, -1, 0, 10, i16::MAX] {
            assert_ne!(other_rate(rate), rate);
        }
    }

    #[test]
    fn test_expect_rate() {
        assert_eq!(expect_rate(Some(10), 10, "test").unwrap(), 10);
        assert!(matches!(
            expect_rate(Some(0), 10, "test"),
            Err(InterestMintError::Expectation(_))
        ));
        assert!(matches!(
            expect_rate(None, 10, "test"),
            Err(InterestMintError::Expectation(_))
        ));
    }
}
