use interest_client::rpc::{assert_rpc_error, ProgramTestRpcConnection, RpcConnection};
use interest_mint::{
    create_token_with_interest_rate_extension, expect_authority_rejection,
    get_interest_bearing_mint_config, get_interest_bearing_rate,
    mint::interest_bearing_mint_len,
    rate::InterestConfigView,
    set_rate_authority,
    token_account::{create_associated_token_account, get_token_account_amount},
    update_rate, InterestMintError,
};
use solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    signature::{Keypair, Signer},
};
use spl_token_2022::error::TokenError;

async fn setup() -> (ProgramTestRpcConnection, Keypair, Keypair) {
    let rpc = ProgramTestRpcConnection::start().await;
    let payer = rpc.get_payer().insecure_clone();
    let mint_keypair = Keypair::new();
    (rpc, payer, mint_keypair)
}

#[tokio::test]
async fn test_create_mint_reads_back_rate() {
    let (mut rpc, payer, mint_keypair) = setup().await;
    let mint = mint_keypair.pubkey();

    create_token_with_interest_rate_extension(
        &mut rpc,
        &payer,
        &mint_keypair,
        &payer.pubkey(),
        i16::MAX,
    )
    .await
    .unwrap();

    let account = rpc.get_account(mint).await.unwrap().unwrap();
    assert_eq!(account.owner, spl_token_2022::ID);
    assert_eq!(account.data.len(), interest_bearing_mint_len().unwrap());

    assert_eq!(
        get_interest_bearing_rate(&mut rpc, &mint).await.unwrap(),
        Some(i16::MAX)
    );
    let config = get_interest_bearing_mint_config(&mut rpc, &mint)
        .await
        .unwrap()
        .unwrap();
    let view = InterestConfigView::from(&config);
    assert_eq!(view.rate_authority, Some(payer.pubkey().to_string()));
    assert_eq!(view.pre_update_average_rate, i16::MAX);
    assert_eq!(view.initialization_timestamp, view.last_update_timestamp);
}

#[tokio::test]
async fn test_missing_mint() {
    let (mut rpc, _payer, mint_keypair) = setup().await;
    assert!(matches!(
        get_interest_bearing_rate(&mut rpc, &mint_keypair.pubkey()).await,
        Err(InterestMintError::MintNotFound(_))
    ));
}

#[tokio::test]
async fn test_authorized_and_unauthorized_update() {
    let (mut rpc, payer, mint_keypair) = setup().await;
    let mint = mint_keypair.pubkey();
    create_token_with_interest_rate_extension(
        &mut rpc,
        &payer,
        &mint_keypair,
        &payer.pubkey(),
        32_767,
    )
    .await
    .unwrap();

    update_rate(&mut rpc, &payer, &mint, &payer, 0).await.unwrap();
    assert_eq!(
        get_interest_bearing_rate(&mut rpc, &mint).await.unwrap(),
        Some(0)
    );

    let other = Keypair::new();
    let result = update_rate(&mut rpc, &payer, &mint, &other, 100).await;
    expect_authority_rejection(result, "update_rate").unwrap();
    assert_eq!(
        get_interest_bearing_rate(&mut rpc, &mint).await.unwrap(),
        Some(0)
    );
}

#[tokio::test]
async fn test_unauthorized_update_error_code() {
    let (mut rpc, payer, mint_keypair) = setup().await;
    let mint = mint_keypair.pubkey();
    create_token_with_interest_rate_extension(
        &mut rpc,
        &payer,
        &mint_keypair,
        &payer.pubkey(),
        10,
    )
    .await
    .unwrap();

    let other = Keypair::new();
    let result = match update_rate(&mut rpc, &payer, &mint, &other, 0).await {
        Ok(signature) => Ok(signature),
        Err(InterestMintError::Rpc(error)) => Err(error),
        Err(error) => panic!("Unexpected error: {:?}", error),
    };
    assert_rpc_error(result, 0, TokenError::OwnerMismatch as u32).unwrap();
}

#[tokio::test]
async fn test_reassign_rate_authority() {
    let (mut rpc, payer, mint_keypair) = setup().await;
    let mint = mint_keypair.pubkey();
    create_token_with_interest_rate_extension(
        &mut rpc,
        &payer,
        &mint_keypair,
        &payer.pubkey(),
        0,
    )
    .await
    .unwrap();

    let new_authority = Keypair::new();
    set_rate_authority(
        &mut rpc,
        &payer,
        &mint,
        &payer,
        Some(&new_authority.pubkey()),
    )
    .await
    .unwrap();
    let config = get_interest_bearing_mint_config(&mut rpc, &mint)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        InterestConfigView::from(&config).rate_authority,
        Some(new_authority.pubkey().to_string())
    );

    // The new authority holds no lamports, the payer covers the fees.
    update_rate(&mut rpc, &payer, &mint, &new_authority, 10)
        .await
        .unwrap();
    assert_eq!(
        get_interest_bearing_rate(&mut rpc, &mint).await.unwrap(),
        Some(10)
    );

    let result = update_rate(&mut rpc, &payer, &mint, &payer, 0).await;
    expect_authority_rejection(result, "update_rate").unwrap();
    assert_eq!(
        get_interest_bearing_rate(&mut rpc, &mint).await.unwrap(),
        Some(10)
    );
}

#[tokio::test]
async fn test_rate_authority_removed() {
    let (mut rpc, payer, mint_keypair) = setup().await;
    let mint = mint_keypair.pubkey();
    create_token_with_interest_rate_extension(
        &mut rpc,
        &payer,
        &mint_keypair,
        &payer.pubkey(),
        25,
    )
    .await
    .unwrap();

    set_rate_authority(&mut rpc, &payer, &mint, &payer, None)
        .await
        .unwrap();
    let config = get_interest_bearing_mint_config(&mut rpc, &mint)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(InterestConfigView::from(&config).rate_authority, None);

    assert!(update_rate(&mut rpc, &payer, &mint, &payer, 0)
        .await
        .is_err());
    assert_eq!(
        get_interest_bearing_rate(&mut rpc, &mint).await.unwrap(),
        Some(25)
    );
}

#[tokio::test]
async fn test_create_associated_token_account() {
    let (mut rpc, payer, mint_keypair) = setup().await;
    let mint = mint_keypair.pubkey();
    create_token_with_interest_rate_extension(
        &mut rpc,
        &payer,
        &mint_keypair,
        &payer.pubkey(),
        0,
    )
    .await
    .unwrap();

    let owner = Keypair::new();
    rpc.airdrop_lamports(&owner.pubkey(), LAMPORTS_PER_SOL)
        .await
        .unwrap();
    let token_account = create_associated_token_account(&mut rpc, &payer, &mint, &owner.pubkey())
        .await
        .unwrap();
    assert_eq!(
        get_token_account_amount(&mut rpc, &token_account)
            .await
            .unwrap(),
        0
    );

    let account = rpc.get_account(token_account).await.unwrap().unwrap();
    assert_eq!(account.owner, spl_token_2022::ID);
}
