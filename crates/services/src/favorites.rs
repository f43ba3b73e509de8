use storage::{Dao, Favorite, FavoritesDao, Movie, NewFavorite};

use crate::{complete, read, MoviesService, Result, ServiceError, UsersService};

/// Manages the movies a user has marked as liked
#[derive(Debug, Clone)]
pub struct FavoritesService {
    dao: FavoritesDao,
    users: UsersService,
    movies: MoviesService,
}

impl FavoritesService {
    pub fn new(dao: FavoritesDao, users: UsersService, movies: MoviesService) -> Self {
        Self { dao, users, movies }
    }

    /// Mark a movie as a favorite. Both the user and the movie must exist.
    #[tracing::instrument(skip(self))]
    pub async fn add_favorite(&self, user_id: i64, movie_id: i64) -> Result<Favorite> {
        let outcome = self.insert(user_id, movie_id).await;
        complete(self.dao.session(), outcome).await
    }

    async fn insert(&self, user_id: i64, movie_id: i64) -> Result<Favorite> {
        self.users.get_by_id(user_id).await?;
        self.movies.get_one(movie_id).await?;

        if self.dao.get_by_pair(user_id, movie_id).await?.is_some() {
            return Err(ServiceError::DuplicateFavorite { user_id, movie_id });
        }

        self.dao
            .create(NewFavorite { user_id, movie_id })
            .await
            .map_err(|e| {
                if e.is_integrity() {
                    ServiceError::DuplicateFavorite { user_id, movie_id }
                } else {
                    e.into()
                }
            })
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_favorites(&self, user_id: i64) -> Result<Vec<Movie>> {
        read(self.dao.session(), async {
            Ok::<_, ServiceError>(self.dao.movies_for_user(user_id).await?)
        })
        .await
    }

    /// Unmark a movie. Returns `false` when it was not a favorite.
    #[tracing::instrument(skip(self))]
    pub async fn remove_favorite(&self, user_id: i64, movie_id: i64) -> Result<bool> {
        let outcome = self
            .dao
            .delete_by_pair(user_id, movie_id)
            .await
            .map_err(ServiceError::from);
        complete(self.dao.session(), outcome).await
    }
}
