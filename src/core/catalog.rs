use crate::core::cache::{compare_digest, criteria_digest, with_cache};
use crate::core::comparison::build_comparison_table;
use crate::core::predicate::build_predicate;
use crate::core::sort::{lookup_sort_field, resolve_sort};
use crate::core::summary::summarize;
use crate::core::units::normalize_rows;
use crate::domain::comparison::{CompareRequest, ComparisonResult};
use crate::domain::criteria::FilterCriteria;
use crate::domain::model::{AircraftCard, Page, PageRequest};
use crate::domain::ports::{AircraftStore, CatalogCache};
use crate::utils::error::Result;
use crate::utils::monitor::CatalogMetrics;
use crate::utils::validation::Validate;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Request facade over the two engines. Stateless per request: every call
/// is a pure function of its inputs plus the store contents, so calls can
/// run concurrently without coordination.
pub struct CatalogService<S: AircraftStore, C: CatalogCache> {
    store: S,
    cache: C,
    cache_ttl: Duration,
    metrics: Arc<CatalogMetrics>,
}

impl<S: AircraftStore, C: CatalogCache> CatalogService<S, C> {
    pub fn new(store: S, cache: C) -> Self {
        Self::with_cache_ttl(store, cache, DEFAULT_CACHE_TTL)
    }

    pub fn with_cache_ttl(store: S, cache: C, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
            metrics: Arc::new(CatalogMetrics::new()),
        }
    }

    pub fn metrics(&self) -> Arc<CatalogMetrics> {
        Arc::clone(&self.metrics)
    }

    pub async fn record_count(&self) -> Result<usize> {
        self.store.count().await
    }

    /// Combinable filtered search with pagination.
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Page<AircraftCard>> {
        criteria.validate()?;
        self.metrics.record_search();

        if lookup_sort_field(&criteria.sort_field).is_none() {
            self.metrics.record_sort_fallback();
        }
        let sort = resolve_sort(&criteria.sort_field, &criteria.sort_direction);
        let predicate = build_predicate(criteria);
        let page = PageRequest {
            page: criteria.page,
            size: criteria.size,
        };

        tracing::debug!(
            "🔍 Searching catalog: sort {:?} {:?}, page {}/{}",
            sort.field,
            sort.direction,
            page.page,
            page.size
        );

        let key = criteria_digest(criteria)?;
        let result: Page<AircraftCard> =
            with_cache(&self.cache, &self.metrics, &key, self.cache_ttl, || async move {
                let records = self.store.query(&predicate, sort, page).await?;
                let cards: Vec<AircraftCard> =
                    records.items.iter().map(AircraftCard::from).collect();
                Ok(Page {
                    items: cards,
                    page: records.page,
                    size: records.size,
                    total_items: records.total_items,
                    total_pages: records.total_pages,
                })
            })
            .await?;

        tracing::info!(
            "Search returned {} of {} aircraft",
            result.items.len(),
            result.total_items
        );
        Ok(result)
    }

    /// Side-by-side comparison of 2-5 records with derived statistics.
    pub async fn compare(&self, request: &CompareRequest) -> Result<ComparisonResult> {
        request.validate()?;
        self.metrics.record_comparison();

        tracing::debug!("⚖️ Comparing aircraft {:?}", request.aircraft_ids);

        let key = compare_digest(request)?;
        let mut result: ComparisonResult =
            with_cache(&self.cache, &self.metrics, &key, self.cache_ttl, || async move {
                let mut aircraft = self.store.find_by_ids(&request.aircraft_ids).await?;

                let mut table =
                    build_comparison_table(&aircraft, request.include_specifications);
                // Summary works off the raw records, not the table, so it
                // is unaffected by the include toggles.
                let summary = summarize(&aircraft);

                if request.normalize_units {
                    normalize_rows(&mut table, request.unit_format);
                }

                if !request.include_images {
                    for plane in &mut aircraft {
                        plane.images.clear();
                    }
                }

                Ok(ComparisonResult {
                    total_compared: aircraft.len(),
                    aircraft,
                    table,
                    applied: request.options(),
                    summary,
                    generated_at: Utc::now(),
                })
            })
            .await?;

        // Stamp after the cache layer so hits and misses only ever differ
        // by the clock.
        result.generated_at = Utc::now();

        tracing::info!(
            "Comparison built: {} aircraft, {} rows",
            result.total_compared,
            result.table.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAircraftStore, InMemoryCache};
    use crate::domain::model::{Aircraft, ManufacturerRef};
    use crate::utils::error::CatalogError;

    fn plane(id: i64, name: &str, max_pax: i64, range: i64) -> Aircraft {
        Aircraft {
            id,
            name: name.to_string(),
            model: name.to_string(),
            manufacturer: ManufacturerRef {
                id: 1,
                name: "Airbus".to_string(),
            },
            family: None,
            aircraft_type_id: None,
            production_state_id: None,
            size_category_id: None,
            typical_passengers: None,
            max_passengers: Some(max_pax),
            range_km: Some(range),
            cruise_speed_knots: Some(450),
            introduction_year: Some(2000),
            active: true,
            specifications: None,
            images: Vec::new(),
        }
    }

    fn service() -> CatalogService<InMemoryAircraftStore, InMemoryCache> {
        let store = InMemoryAircraftStore::new(vec![
            plane(1, "A319", 160, 6950),
            plane(2, "A320", 194, 6300),
            plane(3, "A321", 244, 7400),
        ]);
        CatalogService::new(store, InMemoryCache::new())
    }

    #[tokio::test]
    async fn test_search_identity_with_no_filters() {
        let service = service();
        let criteria = FilterCriteria {
            only_active: false,
            ..Default::default()
        };
        let page = service.search(&criteria).await.unwrap();
        assert_eq!(page.total_items, 3);
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_criteria() {
        let service = service();
        let criteria = FilterCriteria {
            search_term: Some("a".to_string()),
            ..Default::default()
        };
        let err = service.search(&criteria).await.unwrap_err();
        assert!(matches!(err, CatalogError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_search_cache_hit_matches_miss() {
        let service = service();
        let criteria = FilterCriteria::default();

        let first = service.search(&criteria).await.unwrap();
        let second = service.search(&criteria).await.unwrap();

        assert_eq!(first.total_items, second.total_items);
        assert_eq!(
            first.items.iter().map(|c| c.id).collect::<Vec<_>>(),
            second.items.iter().map(|c| c.id).collect::<Vec<_>>()
        );

        let stats = service.metrics().snapshot();
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_unknown_sort_counts_fallback_but_succeeds() {
        let service = service();
        let criteria = FilterCriteria {
            sort_field: "bogus".to_string(),
            ..Default::default()
        };
        let page = service.search(&criteria).await.unwrap();
        assert!(!page.items.is_empty());
        // Fallback ordering is by name.
        assert_eq!(page.items[0].name, "A319");
        assert_eq!(service.metrics().snapshot().sort_fallbacks, 1);
    }

    #[tokio::test]
    async fn test_compare_missing_id_fails_whole_request() {
        let service = service();
        let request = CompareRequest::new(vec![1, 99]);
        let err = service.compare(&request).await.unwrap_err();
        match err {
            CatalogError::MissingAircraftError { ids } => assert_eq!(ids, vec![99]),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_compare_preserves_request_order() {
        let service = service();
        let request = CompareRequest::new(vec![3, 1]);
        let result = service.compare(&request).await.unwrap();
        let ids: Vec<i64> = result.aircraft.iter().map(|plane| plane.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(result.total_compared, 2);
    }

    #[tokio::test]
    async fn test_compare_count_validation_runs_first() {
        let service = service();
        let err = service
            .compare(&CompareRequest::new(vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ValidationError { .. }));

        let err = service
            .compare(&CompareRequest::new(vec![1, 2, 3, 4, 5, 6]))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_compare_strips_images_when_excluded() {
        let store = InMemoryAircraftStore::new(vec![
            {
                let mut p = plane(1, "A319", 160, 6950);
                p.images = vec![crate::domain::model::AircraftImage {
                    url: "a.jpg".to_string(),
                    primary: true,
                }];
                p
            },
            plane(2, "A320", 194, 6300),
        ]);
        let service = CatalogService::new(store, InMemoryCache::new());

        let mut request = CompareRequest::new(vec![1, 2]);
        request.include_images = false;
        let result = service.compare(&request).await.unwrap();
        assert!(result.aircraft.iter().all(|plane| plane.images.is_empty()));
    }
}
