use storage::{Dao, DirectorsDao, GenresDao, MoviesDao};

use crate::{complete, read, Result, ServiceError};

/// Pass-through CRUD over a single DAO
#[derive(Debug, Clone)]
pub struct CatalogService<D> {
    dao: D,
}

pub type GenresService = CatalogService<GenresDao>;
pub type DirectorsService = CatalogService<DirectorsDao>;
pub type MoviesService = CatalogService<MoviesDao>;

impl<D: Dao> CatalogService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub async fn get_one(&self, id: i64) -> Result<D::Entity> {
        read(self.dao.session(), async {
            self.dao
                .get_by_id(id)
                .await?
                .ok_or(ServiceError::NotFound { entity: D::ENTITY, id })
        })
        .await
    }

    pub async fn get_all(&self, filter: &D::Filter) -> Result<Vec<D::Entity>> {
        read(self.dao.session(), async {
            Ok::<_, ServiceError>(self.dao.get_all(filter).await?)
        })
        .await
    }

    pub async fn create(&self, attrs: D::NewEntity) -> Result<D::Entity> {
        let outcome = self.dao.create(attrs).await.map_err(ServiceError::from);
        complete(self.dao.session(), outcome).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let outcome = self.dao.delete(id).await.map_err(ServiceError::from);
        complete(self.dao.session(), outcome).await
    }
}
