use crate::domain::comparison::CompareRequest;
use crate::domain::criteria::FilterCriteria;
use crate::domain::ports::CatalogCache;
use crate::utils::error::Result;
use crate::utils::monitor::CatalogMetrics;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

fn digest_bytes(prefix: &str, bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let hash = hasher.finalize();
    // First half of the digest is plenty for a cache key.
    let hex: String = hash.iter().take(16).map(|b| format!("{:02x}", b)).collect();
    format!("{}:{}", prefix, hex)
}

/// Stable digest of a search request. ID lists are sorted and deduped and
/// text terms normalized first, so equivalent requests share a key.
pub fn criteria_digest(criteria: &FilterCriteria) -> Result<String> {
    let mut normalized = criteria.clone();
    for ids in [
        &mut normalized.manufacturer_ids,
        &mut normalized.family_ids,
        &mut normalized.type_ids,
        &mut normalized.production_state_ids,
        &mut normalized.size_category_ids,
    ]
    .into_iter()
    .flatten()
    {
        ids.sort_unstable();
        ids.dedup();
    }
    for term in [
        &mut normalized.search_term,
        &mut normalized.manufacturer_name,
        &mut normalized.family_name,
    ]
    .into_iter()
    .flatten()
    {
        *term = term.trim().to_lowercase();
    }
    normalized.sort_field = normalized.sort_field.trim().to_lowercase();
    normalized.sort_direction = normalized.sort_direction.trim().to_lowercase();

    let bytes = serde_json::to_vec(&normalized)?;
    Ok(digest_bytes("search", &bytes))
}

/// Digest of a comparison request. IDs are kept in request order because
/// the table's column order follows it; reordering the IDs is a
/// different result and must be a different key.
pub fn compare_digest(request: &CompareRequest) -> Result<String> {
    let bytes = serde_json::to_vec(request)?;
    Ok(digest_bytes("compare", &bytes))
}

/// Cache-aside around a computation. Purely advisory: a hit returns the
/// stored value, a miss computes and stores, and both paths yield the
/// same result.
pub async fn with_cache<C, T, F, Fut>(
    cache: &C,
    metrics: &CatalogMetrics,
    key: &str,
    ttl: Duration,
    compute: F,
) -> Result<T>
where
    C: CatalogCache + ?Sized,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    if let Some(value) = cache.get(key).await {
        match serde_json::from_value(value) {
            Ok(decoded) => {
                metrics.record_cache_hit();
                tracing::debug!("Cache hit for {}", key);
                return Ok(decoded);
            }
            Err(e) => {
                // A corrupt entry must not fail the request.
                tracing::warn!("Evicting undecodable cache entry {}: {}", key, e);
                cache.evict(key).await;
            }
        }
    }

    metrics.record_cache_miss();
    let result = compute().await?;
    match serde_json::to_value(&result) {
        Ok(value) => cache.put(key, value, ttl).await,
        Err(e) => tracing::warn!("Skipping cache store for {}: {}", key, e),
    }
    Ok(result)
}
