use async_trait::async_trait;
use cinema_core::Session;
use sqlx::{QueryBuilder, Sqlite};

use crate::{insert_error, Dao, Genre, NewGenre, Pagination, Result};

#[derive(Debug, Clone)]
pub struct GenresDao {
    session: Session,
}

impl GenresDao {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Dao for GenresDao {
    type Entity = Genre;
    type NewEntity = NewGenre;
    type Filter = Pagination;

    const ENTITY: &'static str = "genre";

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<Genre>> {
        let mut conn = self.session.conn().await?;
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(genre)
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self, filter: &Pagination) -> Result<Vec<Genre>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name FROM genres ORDER BY id");
        filter.push_limit(&mut query);

        let mut conn = self.session.conn().await?;
        let genres = query.build_query_as::<Genre>().fetch_all(&mut *conn).await?;
        Ok(genres)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, attrs: NewGenre) -> Result<Genre> {
        let mut conn = self.session.conn().await?;
        sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES (?) RETURNING id, name")
            .bind(attrs.name)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| insert_error(Self::ENTITY, e))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.session.conn().await?;
        let result = sqlx::query("DELETE FROM genres WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn genre(name: &str) -> NewGenre {
        NewGenre {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let dao = GenresDao::new(test_support::session().await);

        let created = dao.create(genre("drama")).await.unwrap();
        let fetched = dao.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
        assert_eq!(dao.get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_pages() {
        let dao = GenresDao::new(test_support::session().await);
        for name in ["drama", "comedy", "horror"] {
            dao.create(genre(name)).await.unwrap();
        }

        let all = dao.get_all(&Pagination::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let second_page = dao.get_all(&Pagination::page(2, 2)).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].name, "horror");

        let past_end = dao.get_all(&Pagination::page(5, 2)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dao = GenresDao::new(test_support::session().await);
        let created = dao.create(genre("drama")).await.unwrap();

        assert!(dao.delete(created.id).await.unwrap());
        assert!(!dao.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_uncommitted_work_is_rolled_back() {
        let dao = GenresDao::new(test_support::session().await);
        dao.create(genre("drama")).await.unwrap();

        dao.session().rollback().await.unwrap();

        assert!(dao.get_all(&Pagination::default()).await.unwrap().is_empty());
    }
}
