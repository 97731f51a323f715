pub mod authority;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod mint;
pub mod payer;
pub mod rate;
pub mod scenario;
pub mod telemetry;
pub mod token_account;
pub mod ui_amount;

pub use authority::{expect_authority_rejection, set_rate_authority, update_rate};
pub use errors::{InterestMintError, Result};
pub use mint::create_token_with_interest_rate_extension;
pub use payer::initialize_keypair;
pub use rate::{get_interest_bearing_mint_config, get_interest_bearing_rate, InterestConfigView};
pub use scenario::{run_scenario, BalanceSnapshot, ScenarioConfig, ScenarioReport};
pub use ui_amount::amount_to_ui_amount;
