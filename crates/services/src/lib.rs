//! Use-cases over the catalog DAOs.
//!
//! Services own the unit of work: a mutating operation commits the session
//! it shares with its DAOs on success and rolls it back on failure. A read
//! that opened the transaction itself closes it before returning.

mod error;

pub mod auth_service;
pub mod catalog;
pub mod favorites;
pub mod users;

pub use auth_service::AuthService;
pub use catalog::{CatalogService, DirectorsService, GenresService, MoviesService};
pub use error::{Result, ServiceError};
pub use favorites::FavoritesService;
pub use users::UsersService;

use std::future::Future;

use cinema_core::Session;

/// End the unit of work according to the outcome of the use-case
pub(crate) async fn complete<T>(session: &Session, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = session.rollback().await {
                tracing::warn!(error = %rollback_error, "rollback failed");
            }
            Err(error)
        }
    }
}

/// Run a read-only use-case. A transaction the read began is rolled back
/// afterwards; one already open belongs to an enclosing use-case and is
/// left alone.
pub(crate) async fn read<T, F>(session: &Session, query: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let owned = !session.in_transaction().await;
    let outcome = query.await;

    if owned {
        if let Err(rollback_error) = session.rollback().await {
            tracing::warn!(error = %rollback_error, "closing read failed");
        }
    }
    outcome
}
