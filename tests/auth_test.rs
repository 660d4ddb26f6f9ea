///! Integration test for JWT auth validation.
///!
///! Mints tokens locally with the same HS256 layout the server uses, then
///! runs them through `validate_access_token_with_secret`. No running server
///! or database is needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use artizone_backend::auth::jwt::{Claims, validate_access_token_with_secret};
use artizone_backend::models::users::Role;

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

/// Helper: mint a JWT signed with HS256 using the test secret.
fn mint_test_token(sub: &str, email: &str, token_type: &str, lifetime_secs: i64) -> String {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        role: Role::Client,
        token_type: token_type.to_string(),
        exp: now + lifetime_secs,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[test]
fn test_valid_access_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let token = mint_test_token(&user_id.to_string(), "alice@example.com", "access", 3600);

    let claims =
        validate_access_token_with_secret(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.role, Role::Client);
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_expired_token_is_rejected() {
    // Expired 5 minutes ago, well past the 60s default leeway.
    let token = mint_test_token(
        &Uuid::new_v4().to_string(),
        "expired@example.com",
        "access",
        -300,
    );

    let result = validate_access_token_with_secret(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_refresh_token_cannot_authenticate() {
    let token = mint_test_token(
        &Uuid::new_v4().to_string(),
        "bob@example.com",
        "refresh",
        3600,
    );

    let result = validate_access_token_with_secret(&token, TEST_SECRET);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err(), "Not an access token");
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint_test_token(&Uuid::new_v4().to_string(), "bob@example.com", "access", 3600);

    let result =
        validate_access_token_with_secret(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_access_token_with_secret("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_non_uuid_sub_claim_is_surfaced() {
    let token = mint_test_token("not-a-uuid", "weird@example.com", "access", 3600);

    let claims =
        validate_access_token_with_secret(&token, TEST_SECRET).expect("Token should be valid");
    assert!(claims.user_id().is_err());
}
