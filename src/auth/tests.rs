use super::*;
use crate::application::errors::AppError;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

const TEST_JWT_SECRET: &str = "supersecretjwtsecretforunittesting123";

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_SECRET", TEST_JWT_SECRET);
    }
}

fn make_token(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_validate_bearer_jwt_success() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        phone: "+911234567890".to_string(),
        role: "USER".to_string(),
        exp: 9999999999, // far future
    };

    let token = make_token(&my_claims, TEST_JWT_SECRET);

    let claims = validate_bearer_jwt(&token).expect("Valid token should pass");
    assert_eq!(claims.sub, my_claims.sub);
    assert_eq!(claims.phone, my_claims.phone);
    assert_eq!(claims.role, "USER");
}

#[test]
fn test_validate_bearer_jwt_expired() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        phone: "+911234567890".to_string(),
        role: "USER".to_string(),
        exp: 1, // past
    };

    let token = make_token(&my_claims, TEST_JWT_SECRET);

    let result = validate_bearer_jwt(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_bearer_jwt_invalid_signature() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        phone: "+911234567890".to_string(),
        role: "ADMIN".to_string(),
        exp: 9999999999,
    };

    let token = make_token(&my_claims, "wrongsecret");

    let result = validate_bearer_jwt(&token);
    assert!(result.is_err());
}

#[tokio::test]
async fn missing_bearer_header_rejects_as_unauthorized() {
    set_env_vars();
    let (mut parts, _) = axum::http::Request::builder()
        .uri("/api/booking/orders")
        .body(())
        .unwrap()
        .into_parts();

    let result = AuthUser::from_request_parts(&mut parts, &()).await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn garbage_token_rejects_as_unauthorized() {
    set_env_vars();
    let (mut parts, _) = axum::http::Request::builder()
        .uri("/api/booking/orders")
        .header(axum::http::header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(())
        .unwrap()
        .into_parts();

    let result = AuthUser::from_request_parts(&mut parts, &()).await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}
