use interest_client::rpc::RpcConnection;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{
    extension::{
        interest_bearing_mint::InterestBearingConfig, BaseStateWithExtensions, ExtensionType,
        StateWithExtensions,
    },
    state::Mint,
};

use crate::errors::{InterestMintError, Result};

/// Interest bearing config of a mint, `None` if the mint carries no such
/// extension.
pub fn interest_config_from_mint_data(data: &[u8]) -> Result<Option<InterestBearingConfig>> {
    let mint = StateWithExtensions::<Mint>::unpack(data)?;
    if !mint
        .get_extension_types()?
        .contains(&ExtensionType::InterestBearingConfig)
    {
        return Ok(None);
    }
    Ok(Some(*mint.get_extension::<InterestBearingConfig>()?))
}

pub async fn get_interest_bearing_mint_config<R: RpcConnection>(
    rpc: &mut R,
    mint: &Pubkey,
) -> Result<Option<InterestBearingConfig>> {
    let account = rpc
        .get_account(*mint)
        .await?
        .ok_or(InterestMintError::MintNotFound(*mint))?;
    interest_config_from_mint_data(&account.data)
}

/// Current rate in basis points.
pub async fn get_interest_bearing_rate<R: RpcConnection>(
    rpc: &mut R,
    mint: &Pubkey,
) -> Result<Option<i16>> {
    let config = get_interest_bearing_mint_config(rpc, mint).await?;
    Ok(config.map(|config| i16::from(config.current_rate)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestConfigView {
    pub rate_authority: Option<String>,
    pub initialization_timestamp: i64,
    pub pre_update_average_rate: i16,
    pub last_update_timestamp: i64,
    pub current_rate: i16,
}

impl From<&InterestBearingConfig> for InterestConfigView {
    fn from(config: &InterestBearingConfig) -> Self {
        Self {
            rate_authority: Option::<Pubkey>::from(config.rate_authority)
                .map(|authority| authority.to_string()),
            initialization_timestamp: i64::from(config.initialization_timestamp),
            pre_update_average_rate: i16::from(config.pre_update_average_rate),
            last_update_timestamp: i64::from(config.last_update_timestamp),
            current_rate: i16::from(config.current_rate),
        }
    }
}
