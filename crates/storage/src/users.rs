use async_trait::async_trait;
use cinema_core::Session;
use sqlx::{QueryBuilder, Sqlite};

use crate::{insert_error, Dao, NewUser, Pagination, Result, User};

#[derive(Debug, Clone)]
pub struct UsersDao {
    session: Session,
}

impl UsersDao {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = self.session.conn().await?;
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash FROM users WHERE email = ? LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl Dao for UsersDao {
    type Entity = User;
    type NewEntity = NewUser;
    type Filter = Pagination;

    const ENTITY: &'static str = "user";

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let mut conn = self.session.conn().await?;
        let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self, filter: &Pagination) -> Result<Vec<User>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, email, password_hash FROM users ORDER BY id");
        filter.push_limit(&mut query);

        let mut conn = self.session.conn().await?;
        let users = query.build_query_as::<User>().fetch_all(&mut *conn).await?;
        Ok(users)
    }

    #[tracing::instrument(skip_all, fields(email = %attrs.email))]
    async fn create(&self, attrs: NewUser) -> Result<User> {
        let mut conn = self.session.conn().await?;
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES (?, ?) RETURNING id, email, password_hash",
        )
        .bind(attrs.email)
        .bind(attrs.password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| insert_error(Self::ENTITY, e))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.session.conn().await?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
