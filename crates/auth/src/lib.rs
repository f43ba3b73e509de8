mod error;
mod jwt;
mod password;

pub use error::{AuthError, InvalidTokenReason, Result};

pub use password::{compute_password_hash, hash_password, verify_password, verify_password_hash};
pub use jwt::{bearer_token, Claims, Identity, TokenKind, TokenPair, TokenService};
