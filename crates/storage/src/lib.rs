//! Data access objects for the movie catalog
//!
//! One DAO per entity, all built on the generic [`Dao`] contract:
//! - Users, movies, genres, directors
//! - Favorites linking a user to a movie
//!
//! Every DAO runs its queries inside the [`Session`] it was constructed
//! with and never commits. The caller decides when the unit of work ends.

pub mod directors;
pub mod favorites;
pub mod filter;
pub mod genres;
pub mod model;
pub mod movies;
pub mod users;

pub use directors::DirectorsDao;
pub use favorites::FavoritesDao;
pub use filter::{FavoriteFilter, MovieFilter, Pagination};
pub use genres::GenresDao;
pub use model::{Director, Favorite, Genre, Movie, NewDirector, NewFavorite, NewGenre, NewMovie, NewUser, User};
pub use movies::MoviesDao;
pub use users::UsersDao;

use async_trait::async_trait;
use cinema_core::{DatabaseError, Session};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Integrity error on {entity}: {message}")]
    Integrity { entity: &'static str, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] DatabaseError),
}

impl StorageError {
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity { .. })
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Persistence operations shared by every entity
#[async_trait]
pub trait Dao: Send + Sync {
    type Entity: Send;
    type NewEntity: Send;
    type Filter: Default + Send + Sync;

    /// Entity name used in logs and errors
    const ENTITY: &'static str;

    async fn get_by_id(&self, id: i64) -> Result<Option<Self::Entity>>;

    async fn get_all(&self, filter: &Self::Filter) -> Result<Vec<Self::Entity>>;

    /// Persist and return the entity with its generated id.
    /// Fails with [`StorageError::Integrity`] on a uniqueness violation.
    async fn create(&self, attrs: Self::NewEntity) -> Result<Self::Entity>;

    /// Remove the entity. Returns `false` when it did not exist.
    async fn delete(&self, id: i64) -> Result<bool>;

    fn session(&self) -> &Session;
}

/// Translate unique-constraint violations into [`StorageError::Integrity`]
pub(crate) fn insert_error(entity: &'static str, error: sqlx::Error) -> StorageError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            return StorageError::Integrity {
                entity,
                message: db_error.message().to_string(),
            };
        }
    }
    StorageError::Database(error)
}

#[cfg(test)]
pub(crate) mod test_support {
    use cinema_core::{AppConfig, Database, Session};

    /// A migrated in-memory store, private to the calling test
    pub async fn session() -> Session {
        let db = Database::connect(&AppConfig::testing().database).await.unwrap();
        db.migrate().await.unwrap();
        db.session()
    }
}
