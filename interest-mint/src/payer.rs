use std::path::{Path, PathBuf};

use interest_client::rpc::RpcConnection;
use solana_sdk::{
    native_token::lamports_to_sol,
    signature::{read_keypair_file, Keypair, Signer},
};
use tracing::{info, warn};

use crate::errors::{InterestMintError, Result};

/// Keypair location of the Solana CLI, relative to the home directory.
pub const DEFAULT_KEYPAIR_PATH: &str = ".config/solana/id.json";

pub fn make_keypairs(count: usize) -> Vec<Keypair> {
    (0..count).map(|_| Keypair::new()).collect()
}

/// An explicit path always wins. Otherwise the Solana CLI keypair is used if
/// it exists.
pub fn resolve_keypair_path(explicit: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    home.map(|home| home.join(DEFAULT_KEYPAIR_PATH))
        .filter(|path| path.exists())
}

pub fn load_or_generate_keypair(path: Option<&Path>) -> Result<Keypair> {
    match path {
        Some(path) => read_keypair_file(path).map_err(|e| {
            InterestMintError::Keypair(format!("{}: {}", path.display(), e))
        }),
        None => {
            let keypair = Keypair::new();
            warn!(
                "No keypair file found, generated ephemeral payer {}",
                keypair.pubkey()
            );
            Ok(keypair)
        }
    }
}

/// Loads or generates the fee payer and tops it up through an airdrop when
/// its balance is below `minimum_balance`.
pub async fn initialize_keypair<R: RpcConnection>(
    rpc: &mut R,
    keypair_path: Option<&Path>,
    minimum_balance: u64,
    airdrop_amount: u64,
) -> Result<Keypair> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let path = resolve_keypair_path(keypair_path, home.as_deref());
    let payer = load_or_generate_keypair(path.as_deref())?;

    let balance = rpc.get_balance(&payer.pubkey()).await?;
    if balance < minimum_balance {
        info!(
            "Payer {} holds {} SOL, requesting airdrop of {} SOL",
            payer.pubkey(),
            lamports_to_sol(balance),
            lamports_to_sol(airdrop_amount)
        );
        rpc.airdrop_lamports(&payer.pubkey(), airdrop_amount).await?;
    }
    Ok(payer)
}
