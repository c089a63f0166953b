use edubook_auth::{Claims, TokenError, create_access_token, encode_claims, verify_token};
use edubook_config::JwtConfig;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
        cookie_name: "jwt".to_string(),
        cookie_secure: false,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();

    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_verify_token_returns_subject() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_tokens_for_different_users_differ() {
    let jwt_config = get_test_jwt_config();

    let first = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();
    let second = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();

    let mut other = get_test_jwt_config();
    other.secret = "different_secret".to_string();

    assert_eq!(
        verify_token(&token, &other).unwrap_err(),
        TokenError::SignatureInvalid
    );
}

#[test]
fn test_verify_token_expired() {
    let jwt_config = get_test_jwt_config();
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };

    let token = encode_claims(&claims, &jwt_config).unwrap();

    assert_eq!(
        verify_token(&token, &jwt_config).unwrap_err(),
        TokenError::Expired
    );
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();

    assert_eq!(
        verify_token("invalid.token.here", &jwt_config).unwrap_err(),
        TokenError::Malformed
    );
    assert_eq!(
        verify_token("", &jwt_config).unwrap_err(),
        TokenError::Malformed
    );
}

#[test]
fn test_create_access_token_without_secret() {
    let mut jwt_config = get_test_jwt_config();
    jwt_config.secret = String::new();

    let err = create_access_token(Uuid::new_v4(), &jwt_config).unwrap_err();

    assert!(err.status.is_server_error());
}
