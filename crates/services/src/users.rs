use auth::{compute_password_hash, verify_password_hash};
use storage::{Dao, NewUser, User, UsersDao};

use crate::{complete, read, Result, ServiceError};

#[derive(Debug, Clone)]
pub struct UsersService {
    dao: UsersDao,
}

impl UsersService {
    pub fn new(dao: UsersDao) -> Self {
        Self { dao }
    }

    /// Register a new user; the password is hashed before it reaches the store
    #[tracing::instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        let outcome = self.insert(email, password).await;
        if outcome.is_ok() {
            tracing::info!("registered user");
        }
        complete(self.dao.session(), outcome).await
    }

    async fn insert(&self, email: &str, password: &str) -> Result<User> {
        if self.dao.get_by_email(email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail(email.to_string()));
        }

        let password_hash = compute_password_hash(password.to_string()).await?;

        // A concurrent registration can still win the race to the constraint.
        self.dao
            .create(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| {
                if e.is_integrity() {
                    ServiceError::DuplicateEmail(email.to_string())
                } else {
                    e.into()
                }
            })
    }

    /// Check credentials and return the matching user
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        read(self.dao.session(), self.check_credentials(email, password)).await
    }

    async fn check_credentials(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.dao.get_by_email(email).await? else {
            tracing::debug!("unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password_hash(password.to_string(), user.password_hash.clone()).await? {
            tracing::debug!("password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User> {
        read(self.dao.session(), async {
            self.dao.get_by_id(id).await?.ok_or(ServiceError::NotFound {
                entity: UsersDao::ENTITY,
                id,
            })
        })
        .await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        read(self.dao.session(), async {
            Ok::<_, ServiceError>(self.dao.get_by_email(email).await?)
        })
        .await
    }
}
