use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::users;

/// Claims carried by both access and refresh tokens. `token_type`
/// distinguishes the two so a refresh token cannot authenticate a request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user UUID.
    pub sub: String,
    pub email: String,
    pub role: users::Role,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }
}

/// Access + refresh pair returned by login/register.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").expect("JWT_SECRET must be set")
}

fn mint(user: &users::Model, token_type: &str, lifetime: Duration) -> Result<String, String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        token_type: token_type.to_string(),
        exp: (now + lifetime).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .map_err(|e| format!("Failed to generate token: {e}"))
}

/// Mint a 1h access token and a 7-day refresh token for a user.
pub fn generate_token_pair(user: &users::Model) -> Result<TokenPair, String> {
    Ok(TokenPair {
        access: mint(user, "access", Duration::hours(1))?,
        refresh: mint(user, "refresh", Duration::days(7))?,
    })
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {e}"))
}

/// Validate an access token against a given secret and return its claims.
pub fn validate_access_token_with_secret(token: &str, secret: &str) -> Result<Claims, String> {
    let claims = decode_claims(token, secret)?;
    if claims.token_type != "access" {
        return Err("Not an access token".to_string());
    }
    Ok(claims)
}

/// Validate an access token using the `JWT_SECRET` env var.
pub fn validate_access_token(token: &str) -> Result<Claims, String> {
    validate_access_token_with_secret(token, &jwt_secret())
}
