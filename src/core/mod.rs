pub mod cache;
pub mod catalog;
pub mod comparison;
pub mod predicate;
pub mod sort;
pub mod summary;
pub mod units;

pub use crate::domain::comparison::{CompareRequest, ComparisonResult, UnitFormat};
pub use crate::domain::criteria::FilterCriteria;
pub use crate::domain::model::{Aircraft, AircraftCard, Page, PageRequest};
pub use crate::domain::ports::{AircraftStore, CatalogCache, CatalogSource};
pub use crate::utils::error::Result;
pub use catalog::CatalogService;
