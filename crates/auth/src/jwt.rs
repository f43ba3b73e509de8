use chrono::{Duration, Utc};
use cinema_core::AuthConfig;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, InvalidTokenReason, Result};

/// Distinguishes short-lived access tokens from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub kind: TokenKind,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for the identity, expiring after `expires_in_seconds`
    pub fn new(identity: &Identity, kind: TokenKind, expires_in_seconds: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expires_in_seconds);

        Self {
            sub: identity.user_id.to_string(),
            email: identity.email.clone(),
            kind,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    fn identity(&self) -> Result<Identity> {
        let user_id = self
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken(InvalidTokenReason::Malformed))?;

        Ok(Identity {
            user_id,
            email: self.email.clone(),
        })
    }
}

/// The user a token speaks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates HS256 bearer tokens with an injected signing secret.
///
/// Tokens cannot be revoked; they stop being accepted once `exp` passes.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// # Arguments
    /// * `secret` - The secret key for signing tokens
    /// * `access_ttl_seconds` - Access token lifetime (e.g., 1800 for 30 minutes)
    /// * `refresh_ttl_seconds` - Refresh token lifetime
    pub fn new(secret: &str, access_ttl_seconds: i64, refresh_ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.access_token_ttl_seconds,
            config.refresh_token_ttl_seconds,
        )
    }

    /// Issue an access/refresh pair for the identity
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(&Claims::new(identity, TokenKind::Access, self.access_ttl_seconds))?,
            refresh_token: self.sign(&Claims::new(identity, TokenKind::Refresh, self.refresh_ttl_seconds))?,
        })
    }

    /// Validate an access token and return the identity it carries
    pub fn validate(&self, token: &str) -> Result<Identity> {
        self.decode_kind(token, TokenKind::Access)?.identity()
    }

    /// Validate a refresh token and return the identity it carries
    pub fn validate_refresh(&self, token: &str) -> Result<Identity> {
        self.decode_kind(token, TokenKind::Refresh)?.identity()
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    fn decode_kind(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => InvalidTokenReason::Expired,
                    ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
                    _ => InvalidTokenReason::Malformed,
                };
                AuthError::InvalidToken(reason)
            })?
            .claims;

        // jsonwebtoken only rejects `exp < now`; a token is dead at `exp`.
        if claims.is_expired() {
            return Err(AuthError::InvalidToken(InvalidTokenReason::Expired));
        }
        if claims.kind != expected {
            return Err(AuthError::InvalidToken(InvalidTokenReason::WrongKind));
        }

        Ok(claims)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Result<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken(InvalidTokenReason::Malformed))
}
