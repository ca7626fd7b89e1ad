use campus::campus_auth::{
    TokenType, create_access_token, create_password_reset_token, create_refresh_token,
    create_tokens, verify_access_token, verify_password_reset_token, verify_refresh_token,
};
use campus::campus_config::JwtConfig;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
        reset_token_expiry: 7200,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, &jwt_config).unwrap();
    let claims = verify_access_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_refresh_token_lifetime() {
    let jwt_config = get_test_jwt_config();
    let token = create_refresh_token(Uuid::new_v4(), &jwt_config).unwrap();
    let claims = verify_refresh_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.token_type, TokenType::Refresh);
    assert_eq!(claims.exp - claims.iat, 604800);
}

#[test]
fn test_token_types_are_not_interchangeable() {
    let jwt_config = get_test_jwt_config();
    let tokens = create_tokens(Uuid::new_v4(), &jwt_config).unwrap();

    assert!(verify_access_token(&tokens.refresh_token, &jwt_config).is_err());
    assert!(verify_refresh_token(&tokens.access_token, &jwt_config).is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();

    let wrong_config = JwtConfig {
        secret: "wrong_secret".to_string(),
        ..get_test_jwt_config()
    };

    let err = verify_access_token(&token, &wrong_config).unwrap_err();
    assert_eq!(err.status.as_u16(), 403);
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();

    for token in ["", "not.a.jwt", "eyJhbGciOiJIUzUxMiJ9.e30.c2ln"] {
        assert!(verify_access_token(token, &jwt_config).is_err());
    }
}

#[test]
fn test_password_reset_token_carries_email() {
    let jwt_config = get_test_jwt_config();
    let token = create_password_reset_token("reset@example.com", &jwt_config).unwrap();

    assert_eq!(
        verify_password_reset_token(&token, &jwt_config),
        Some("reset@example.com".to_string())
    );

    let access = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();
    assert_ne!(
        verify_password_reset_token(&access, &jwt_config),
        Some("reset@example.com".to_string())
    );
}
