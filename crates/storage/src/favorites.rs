use async_trait::async_trait;
use cinema_core::Session;
use sqlx::{QueryBuilder, Sqlite};

use crate::{insert_error, Dao, Favorite, FavoriteFilter, Movie, NewFavorite, Result};

/// DAO over the `user_movies` relationship table
#[derive(Debug, Clone)]
pub struct FavoritesDao {
    session: Session,
}

impl FavoritesDao {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_pair(&self, user_id: i64, movie_id: i64) -> Result<Option<Favorite>> {
        let mut conn = self.session.conn().await?;
        let favorite = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, movie_id FROM user_movies WHERE user_id = ? AND movie_id = ?",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(favorite)
    }

    /// Remove the (user, movie) mark. Returns `false` when there was none.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_pair(&self, user_id: i64, movie_id: i64) -> Result<bool> {
        let mut conn = self.session.conn().await?;
        let result = sqlx::query("DELETE FROM user_movies WHERE user_id = ? AND movie_id = ?")
            .bind(user_id)
            .bind(movie_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Movies the user marked, in the order they were marked
    #[tracing::instrument(skip(self))]
    pub async fn movies_for_user(&self, user_id: i64) -> Result<Vec<Movie>> {
        let mut conn = self.session.conn().await?;
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT m.id, m.title, m.description, m.trailer, m.year, m.rating, m.genre_id, m.director_id \
             FROM movies m \
             JOIN user_movies um ON um.movie_id = m.id \
             WHERE um.user_id = ? \
             ORDER BY um.id",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(movies)
    }
}

#[async_trait]
impl Dao for FavoritesDao {
    type Entity = Favorite;
    type NewEntity = NewFavorite;
    type Filter = FavoriteFilter;

    const ENTITY: &'static str = "favorite";

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<Favorite>> {
        let mut conn = self.session.conn().await?;
        let favorite =
            sqlx::query_as::<_, Favorite>("SELECT id, user_id, movie_id FROM user_movies WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(favorite)
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self, filter: &FavoriteFilter) -> Result<Vec<Favorite>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, user_id, movie_id FROM user_movies");
        if let Some(user_id) = filter.user_id {
            query.push(" WHERE user_id = ").push_bind(user_id);
        }
        query.push(" ORDER BY id");

        let mut conn = self.session.conn().await?;
        let favorites = query.build_query_as::<Favorite>().fetch_all(&mut *conn).await?;
        Ok(favorites)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, attrs: NewFavorite) -> Result<Favorite> {
        let mut conn = self.session.conn().await?;
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO user_movies (user_id, movie_id) VALUES (?, ?) RETURNING id, user_id, movie_id",
        )
        .bind(attrs.user_id)
        .bind(attrs.movie_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| insert_error(Self::ENTITY, e))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.session.conn().await?;
        let result = sqlx::query("DELETE FROM user_movies WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
