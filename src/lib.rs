pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CatalogCommand, CliConfig};
pub use config::TomlConfig;

pub use adapters::file_source::FileCatalogSource;
pub use adapters::http_source::HttpCatalogSource;
pub use adapters::memory::{InMemoryAircraftStore, InMemoryCache};
pub use core::catalog::CatalogService;
pub use domain::comparison::{CompareRequest, ComparisonResult, UnitFormat};
pub use domain::criteria::FilterCriteria;
pub use domain::model::{Aircraft, AircraftCard, Page};
pub use utils::error::{CatalogError, Result};
