use cinema_core::CatalogConfig;
use sqlx::{QueryBuilder, Sqlite};

/// Page selection for list queries. Pages are 1-based and `page: None`
/// returns every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default(), None)
    }
}

impl Pagination {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page,
        }
    }

    pub fn from_config(config: &CatalogConfig, page: Option<u32>) -> Self {
        Self {
            page,
            per_page: config.items_per_page,
        }
    }

    pub(crate) fn push_limit(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(page) = self.page {
            let per_page = i64::from(self.per_page.max(1));
            let offset = i64::from(page.max(1) - 1) * per_page;
            query
                .push(" LIMIT ")
                .push_bind(per_page)
                .push(" OFFSET ")
                .push_bind(offset);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MovieFilter {
    pub pagination: Pagination,
    /// Newest releases first instead of insertion order
    pub newest_first: bool,
    pub genre_id: Option<i64>,
    pub director_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FavoriteFilter {
    pub user_id: Option<i64>,
}
