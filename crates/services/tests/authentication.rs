mod common;

use auth::{InvalidTokenReason, TokenService};
use fixtures::{TestStore, USER_1_EMAIL, USER_1_PASSWORD};
use services::{AuthService, ServiceError};

#[tokio::test]
async fn test_generate_token_for_fixture_user() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let user = fixtures::user_1(&store.session).await;

    let tokens = services
        .auth
        .generate_token(USER_1_EMAIL, USER_1_PASSWORD)
        .await
        .unwrap();

    let identity = services.auth.tokens().validate(&tokens.access_token).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.email, USER_1_EMAIL);

    let headers = fixtures::bearer(&tokens.access_token);
    let current = services.auth.current_user_from_header(&headers).await.unwrap();
    assert_eq!(current, user);
}

#[tokio::test]
async fn test_generate_token_rejects_bad_password() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    fixtures::user_1(&store.session).await;

    let err = services.auth.generate_token(USER_1_EMAIL, "2222").await.unwrap_err();

    assert!(matches!(err, ServiceError::InvalidCredentials));
}

#[tokio::test]
async fn test_refresh_token_issues_new_pair() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let user = fixtures::user_1(&store.session).await;
    let tokens = services
        .auth
        .generate_token(USER_1_EMAIL, USER_1_PASSWORD)
        .await
        .unwrap();

    let refreshed = services
        .auth
        .approve_refresh_token(&tokens.refresh_token)
        .await
        .unwrap();

    assert_eq!(services.auth.current_user(&refreshed.access_token).await.unwrap(), user);

    let err = services
        .auth
        .approve_refresh_token(&tokens.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidToken(InvalidTokenReason::WrongKind)));
}

#[tokio::test]
async fn test_expired_token_is_invalid() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    fixtures::user_1(&store.session).await;
    let expiring = AuthService::new(
        services.users.clone(),
        TokenService::new(&store.config.auth.jwt_secret, -1, -1),
    );

    let tokens = expiring
        .generate_token(USER_1_EMAIL, USER_1_PASSWORD)
        .await
        .unwrap();

    let err = services.auth.current_user(&tokens.access_token).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidToken(InvalidTokenReason::Expired)));
}

#[tokio::test]
async fn test_token_from_other_key_is_invalid() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let user = fixtures::user_1(&store.session).await;
    let foreign = TokenService::new("another_secret", 60, 60)
        .issue(&auth::Identity {
            user_id: user.id,
            email: user.email.clone(),
        })
        .unwrap();

    let err = services.auth.current_user(&foreign.access_token).await.unwrap_err();

    assert!(matches!(err, ServiceError::InvalidToken(InvalidTokenReason::BadSignature)));
}

#[tokio::test]
async fn test_malformed_header() {
    let store = TestStore::new().await;
    let services = common::services(&store);

    let err = services
        .auth
        .current_user_from_header("Token abc")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidToken(InvalidTokenReason::Malformed)));
}

#[tokio::test]
async fn test_headers_resolve_to_user_1() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let user = fixtures::user_1(&store.session).await;

    let headers = common::headers(&services.auth).await;

    assert!(headers.starts_with("Bearer "));
    assert_eq!(services.auth.current_user_from_header(&headers).await.unwrap(), user);
}
