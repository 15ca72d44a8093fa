use crate::core::predicate::Predicate;
use crate::core::sort::{SortDirection, SortField, SortSpec};
use crate::domain::model::{Aircraft, Page, PageRequest};
use crate::domain::ports::{AircraftStore, CatalogCache};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// In-memory query executor. Backs the CLI and the tests; the predicate
/// and sort contract it implements is the same one a database-backed
/// store would receive.
#[derive(Debug, Clone)]
pub struct InMemoryAircraftStore {
    aircraft: Arc<Vec<Aircraft>>,
}

enum SortKey {
    Number(i64),
    Text(String),
}

fn sort_key(aircraft: &Aircraft, field: SortField) -> Option<SortKey> {
    match field {
        SortField::Name => Some(SortKey::Text(aircraft.name.to_lowercase())),
        SortField::Model => Some(SortKey::Text(aircraft.model.to_lowercase())),
        SortField::MaxPassengers => aircraft.max_passengers.map(SortKey::Number),
        SortField::TypicalPassengers => aircraft.typical_passengers.map(SortKey::Number),
        SortField::RangeKm => aircraft.range_km.map(SortKey::Number),
        SortField::CruiseSpeedKnots => aircraft.cruise_speed_knots.map(SortKey::Number),
        SortField::IntroductionYear => aircraft.introduction_year.map(SortKey::Number),
        SortField::ManufacturerName => {
            Some(SortKey::Text(aircraft.manufacturer.name.to_lowercase()))
        }
        SortField::FamilyName => aircraft.family_name().map(|name| SortKey::Text(name.to_lowercase())),
    }
}

fn compare_keys(left: &SortKey, right: &SortKey) -> Ordering {
    match (left, right) {
        (SortKey::Number(a), SortKey::Number(b)) => a.cmp(b),
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        // Mixed keys cannot happen for a single field; keep a total order anyway.
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

fn compare_aircraft(left: &Aircraft, right: &Aircraft, sort: SortSpec) -> Ordering {
    let ordering = match (sort_key(left, sort.field), sort_key(right, sort.field)) {
        (Some(a), Some(b)) => {
            let ordering = compare_keys(&a, &b);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        // Records without the sort value go last in either direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    // Deterministic pagination needs a total order; break ties by id.
    ordering.then_with(|| left.id.cmp(&right.id))
}

impl InMemoryAircraftStore {
    pub fn new(aircraft: Vec<Aircraft>) -> Self {
        Self {
            aircraft: Arc::new(aircraft),
        }
    }
}

#[async_trait]
impl AircraftStore for InMemoryAircraftStore {
    async fn query(
        &self,
        predicate: &Predicate,
        sort: SortSpec,
        page: PageRequest,
    ) -> Result<Page<Aircraft>> {
        let mut matching: Vec<Aircraft> = self
            .aircraft
            .iter()
            .filter(|plane| predicate.matches(plane))
            .cloned()
            .collect();

        matching.sort_by(|left, right| compare_aircraft(left, right, sort));

        let total = matching.len();
        let items: Vec<Aircraft> = matching
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Aircraft>> {
        let by_id: HashMap<i64, &Aircraft> =
            self.aircraft.iter().map(|plane| (plane.id, plane)).collect();

        let missing: Vec<i64> = ids
            .iter()
            .filter(|id| !by_id.contains_key(*id))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::MissingAircraftError { ids: missing });
        }

        Ok(ids
            .iter()
            .filter_map(|id| by_id.get(id).map(|plane| (*plane).clone()))
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.aircraft.len())
    }
}

/// TTL cache behind a tokio mutex. Purely advisory; entries expire on read.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<Mutex<HashMap<String, (serde_json::Value, Instant)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogCache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, deadline)) if *deadline > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (value, Instant::now() + ttl));
    }

    async fn evict(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
    }
}
