use crate::core::predicate::Predicate;
use crate::core::sort::SortSpec;
use crate::domain::model::{Aircraft, Page, PageRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Dataset origin (file, HTTP). Loads the full record set once at startup.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<Aircraft>>> + Send;
}

/// Query boundary. The engines build `Predicate` and `SortSpec`; executing
/// them against actual storage happens behind this trait.
#[async_trait]
pub trait AircraftStore: Send + Sync {
    async fn query(
        &self,
        predicate: &Predicate,
        sort: SortSpec,
        page: PageRequest,
    ) -> Result<Page<Aircraft>>;

    /// Fetch records preserving the requested ID order. Every ID must
    /// resolve; missing IDs are reported together in the error.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Aircraft>>;

    async fn count(&self) -> Result<usize>;
}

/// Advisory cache. A miss must never change what the caller produces.
#[async_trait]
pub trait CatalogCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<serde_json::Value>;
    async fn put(&self, key: &str, value: serde_json::Value, ttl: Duration);
    async fn evict(&self, key: &str);
}
