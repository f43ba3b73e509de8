use async_trait::async_trait;
use cinema_core::Session;
use sqlx::{QueryBuilder, Sqlite};

use crate::{insert_error, Dao, Movie, MovieFilter, NewMovie, Result};

const MOVIE_COLUMNS: &str =
    "id, title, description, trailer, year, rating, genre_id, director_id";

#[derive(Debug, Clone)]
pub struct MoviesDao {
    session: Session,
}

impl MoviesDao {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Dao for MoviesDao {
    type Entity = Movie;
    type NewEntity = NewMovie;
    type Filter = MovieFilter;

    const ENTITY: &'static str = "movie";

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<Movie>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?");
        let mut conn = self.session.conn().await?;
        let movie = sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(movie)
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {MOVIE_COLUMNS} FROM movies"));

        let mut clause = " WHERE ";
        if let Some(genre_id) = filter.genre_id {
            query.push(clause).push("genre_id = ").push_bind(genre_id);
            clause = " AND ";
        }
        if let Some(director_id) = filter.director_id {
            query.push(clause).push("director_id = ").push_bind(director_id);
        }

        if filter.newest_first {
            query.push(" ORDER BY year DESC, id DESC");
        } else {
            query.push(" ORDER BY id");
        }
        filter.pagination.push_limit(&mut query);

        let mut conn = self.session.conn().await?;
        let movies = query.build_query_as::<Movie>().fetch_all(&mut *conn).await?;
        Ok(movies)
    }

    #[tracing::instrument(skip(self), fields(title = %attrs.title))]
    async fn create(&self, attrs: NewMovie) -> Result<Movie> {
        let sql = format!(
            "INSERT INTO movies (title, description, trailer, year, rating, genre_id, director_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {MOVIE_COLUMNS}"
        );
        let mut conn = self.session.conn().await?;
        sqlx::query_as::<_, Movie>(&sql)
            .bind(attrs.title)
            .bind(attrs.description)
            .bind(attrs.trailer)
            .bind(attrs.year)
            .bind(attrs.rating)
            .bind(attrs.genre_id)
            .bind(attrs.director_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| insert_error(Self::ENTITY, e))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.session.conn().await?;
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
