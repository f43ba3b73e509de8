use async_trait::async_trait;
use cinema_core::Session;
use sqlx::{QueryBuilder, Sqlite};

use crate::{insert_error, Dao, Director, NewDirector, Pagination, Result};

#[derive(Debug, Clone)]
pub struct DirectorsDao {
    session: Session,
}

impl DirectorsDao {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Dao for DirectorsDao {
    type Entity = Director;
    type NewEntity = NewDirector;
    type Filter = Pagination;

    const ENTITY: &'static str = "director";

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<Director>> {
        let mut conn = self.session.conn().await?;
        Ok(
            sqlx::query_as::<_, Director>("SELECT id, name FROM directors WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self, filter: &Pagination) -> Result<Vec<Director>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name FROM directors ORDER BY id");
        filter.push_limit(&mut query);

        let mut conn = self.session.conn().await?;
        Ok(query.build_query_as::<Director>().fetch_all(&mut *conn).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, attrs: NewDirector) -> Result<Director> {
        let mut conn = self.session.conn().await?;
        sqlx::query_as::<_, Director>("INSERT INTO directors (name) VALUES (?) RETURNING id, name")
            .bind(attrs.name)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| insert_error(Self::ENTITY, e))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.session.conn().await?;
        let result = sqlx::query("DELETE FROM directors WHERE id = ?")
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

    #[tokio::test]
    async fn test_crud() {
        let dao = DirectorsDao::new(test_support::session().await);

        let director = dao
            .create(NewDirector {
                name: "director_1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(dao.get_all(&Pagination::default()).await.unwrap(), vec![director.clone()]);

        assert!(dao.delete(director.id).await.unwrap());
        assert_eq!(dao.get_by_id(director.id).await.unwrap(), None);
    }
}
