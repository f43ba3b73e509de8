use auth::{bearer_token, Identity, TokenPair, TokenService};
use storage::User;

use crate::{Result, UsersService};

/// Exchanges credentials for bearer tokens and resolves tokens back to users
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UsersService,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: UsersService, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Log in with email and password
    #[tracing::instrument(skip(self, password))]
    pub async fn generate_token(&self, email: &str, password: &str) -> Result<TokenPair> {
        let user = self.users.authenticate(email, password).await?;
        Ok(self.tokens.issue(&identity_of(&user))?)
    }

    /// Trade a refresh token for a fresh pair, provided its user still exists
    #[tracing::instrument(skip_all)]
    pub async fn approve_refresh_token(&self, refresh_token: &str) -> Result<TokenPair> {
        let identity = self.tokens.validate_refresh(refresh_token)?;
        let user = self.users.get_by_id(identity.user_id).await?;
        Ok(self.tokens.issue(&identity_of(&user))?)
    }

    /// The user behind an access token
    #[tracing::instrument(skip_all)]
    pub async fn current_user(&self, access_token: &str) -> Result<User> {
        let identity = self.tokens.validate(access_token)?;
        self.users.get_by_id(identity.user_id).await
    }

    /// The user behind an `Authorization: Bearer <token>` header value
    pub async fn current_user_from_header(&self, header_value: &str) -> Result<User> {
        let token = bearer_token(header_value)?;
        self.current_user(token).await
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

fn identity_of(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        email: user.email.clone(),
    }
}
