use solana_sdk::native_token::LAMPORTS_PER_SOL;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// Every mint created here uses nine decimals, like native SOL.
pub const MINT_DECIMALS: u8 = 9;

/// `i16::MAX` basis points, the largest rate the extension can store.
pub const EXAMPLE_RATE: i16 = 32_767;
pub const UPDATED_RATE: i16 = 0;
pub const NEW_AUTHORITY_RATE: i16 = 10;

pub const MINT_AMOUNT: u64 = 100;
pub const MINT_ITERATIONS: usize = 5;
pub const MAX_MINT_ITERATIONS: i64 = 1_000;

pub const MINIMUM_PAYER_BALANCE: u64 = LAMPORTS_PER_SOL / 2;
pub const PAYER_AIRDROP_AMOUNT: u64 = LAMPORTS_PER_SOL;
