pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::domain::comparison::{CompareRequest, UnitFormat};
    use crate::domain::criteria::FilterCriteria;
    use crate::utils::error::{CatalogError, Result};
    use crate::utils::validation::Validate;
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "aero-catalog")]
    #[command(about = "Aircraft catalog: combinable search and side-by-side comparison")]
    pub struct CliConfig {
        #[arg(long, help = "TOML configuration file")]
        pub config: Option<String>,

        #[arg(long, help = "Dataset file (.json/.csv) or http(s) endpoint")]
        pub dataset: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log system stats around load and query phases")]
        pub monitor: bool,

        #[command(subcommand)]
        pub command: CatalogCommand,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum CatalogCommand {
        /// Filtered, paginated search over the catalog
        Search(SearchArgs),
        /// Side-by-side comparison of 2-5 aircraft
        Compare(CompareArgs),
        /// Print the sort-field alias table
        Fields,
    }

    #[derive(Debug, Clone, Args)]
    pub struct SearchArgs {
        #[arg(long)]
        pub manufacturer_id: Option<i64>,
        #[arg(long)]
        pub family_id: Option<i64>,
        #[arg(long)]
        pub type_id: Option<i64>,
        #[arg(long)]
        pub production_state_id: Option<i64>,
        #[arg(long)]
        pub size_category_id: Option<i64>,

        #[arg(long, value_delimiter = ',')]
        pub manufacturer_ids: Vec<i64>,
        #[arg(long, value_delimiter = ',')]
        pub family_ids: Vec<i64>,
        #[arg(long, value_delimiter = ',')]
        pub type_ids: Vec<i64>,
        #[arg(long, value_delimiter = ',')]
        pub production_state_ids: Vec<i64>,
        #[arg(long, value_delimiter = ',')]
        pub size_category_ids: Vec<i64>,

        #[arg(long)]
        pub min_passengers: Option<i64>,
        #[arg(long)]
        pub max_passengers: Option<i64>,
        #[arg(long)]
        pub min_range_km: Option<i64>,
        #[arg(long)]
        pub max_range_km: Option<i64>,
        #[arg(long)]
        pub min_cruise_speed: Option<i64>,
        #[arg(long)]
        pub max_cruise_speed: Option<i64>,
        #[arg(long)]
        pub min_year: Option<i64>,
        #[arg(long)]
        pub max_year: Option<i64>,

        #[arg(long, help = "Term matched against name, model and manufacturer")]
        pub search: Option<String>,
        #[arg(long)]
        pub manufacturer_name: Option<String>,
        #[arg(long)]
        pub family_name: Option<String>,

        #[arg(long, help = "Include inactive aircraft")]
        pub all: bool,
        #[arg(long)]
        pub with_specifications: bool,
        #[arg(long)]
        pub with_images: bool,
        #[arg(long)]
        pub with_primary_image: bool,

        #[arg(long, default_value = "0")]
        pub page: usize,
        #[arg(long, default_value = "20")]
        pub size: usize,
        #[arg(long, default_value = "name")]
        pub sort: String,
        #[arg(long, default_value = "asc")]
        pub direction: String,
    }

    impl SearchArgs {
        fn list(values: &[i64]) -> Option<Vec<i64>> {
            if values.is_empty() {
                None
            } else {
                Some(values.to_vec())
            }
        }

        fn toggle(flag: bool) -> Option<bool> {
            if flag {
                Some(true)
            } else {
                None
            }
        }

        pub fn to_criteria(&self) -> FilterCriteria {
            FilterCriteria {
                manufacturer_id: self.manufacturer_id,
                family_id: self.family_id,
                type_id: self.type_id,
                production_state_id: self.production_state_id,
                size_category_id: self.size_category_id,
                manufacturer_ids: Self::list(&self.manufacturer_ids),
                family_ids: Self::list(&self.family_ids),
                type_ids: Self::list(&self.type_ids),
                production_state_ids: Self::list(&self.production_state_ids),
                size_category_ids: Self::list(&self.size_category_ids),
                min_passengers: self.min_passengers,
                max_passengers: self.max_passengers,
                min_range_km: self.min_range_km,
                max_range_km: self.max_range_km,
                min_cruise_speed: self.min_cruise_speed,
                max_cruise_speed: self.max_cruise_speed,
                min_introduction_year: self.min_year,
                max_introduction_year: self.max_year,
                search_term: self.search.clone(),
                manufacturer_name: self.manufacturer_name.clone(),
                family_name: self.family_name.clone(),
                only_active: !self.all,
                only_with_specifications: Self::toggle(self.with_specifications),
                only_with_images: Self::toggle(self.with_images),
                only_with_primary_image: Self::toggle(self.with_primary_image),
                page: self.page,
                size: self.size,
                sort_field: self.sort.clone(),
                sort_direction: self.direction.clone(),
            }
        }
    }

    #[derive(Debug, Clone, Args)]
    pub struct CompareArgs {
        #[arg(long, value_delimiter = ',', required = true)]
        pub ids: Vec<i64>,

        #[arg(long, help = "Convert km/m/kg rows to imperial units")]
        pub imperial: bool,

        #[arg(long)]
        pub no_specifications: bool,

        #[arg(long)]
        pub no_images: bool,

        #[arg(long)]
        pub no_normalize: bool,
    }

    impl CompareArgs {
        pub fn to_request(&self) -> CompareRequest {
            CompareRequest {
                aircraft_ids: self.ids.clone(),
                include_specifications: !self.no_specifications,
                include_images: !self.no_images,
                normalize_units: !self.no_normalize,
                unit_format: if self.imperial {
                    UnitFormat::Imperial
                } else {
                    UnitFormat::Metric
                },
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            // `fields` only prints the alias table; everything else needs data.
            let needs_dataset = !matches!(self.command, CatalogCommand::Fields);
            if needs_dataset && self.config.is_none() && self.dataset.is_none() {
                return Err(CatalogError::MissingConfigError {
                    field: "dataset".to_string(),
                });
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_search_args_map_to_criteria() {
            let config = CliConfig::parse_from([
                "aero-catalog",
                "--dataset",
                "fleet.json",
                "search",
                "--manufacturer-ids",
                "1,7",
                "--min-passengers",
                "100",
                "--search",
                "neo",
                "--all",
                "--sort",
                "capacidad",
                "--direction",
                "desc",
            ]);
            let CatalogCommand::Search(args) = &config.command else {
                panic!("expected search command");
            };
            let criteria = args.to_criteria();

            assert_eq!(criteria.manufacturer_ids, Some(vec![1, 7]));
            assert_eq!(criteria.min_passengers, Some(100));
            assert_eq!(criteria.search_term.as_deref(), Some("neo"));
            assert!(!criteria.only_active);
            assert_eq!(criteria.only_with_images, None);
            assert_eq!(criteria.sort_field, "capacidad");
            assert_eq!(criteria.sort_direction, "desc");
        }

        #[test]
        fn test_compare_args_map_to_request() {
            let config = CliConfig::parse_from([
                "aero-catalog",
                "--dataset",
                "fleet.json",
                "compare",
                "--ids",
                "3,1,2",
                "--imperial",
                "--no-images",
            ]);
            let CatalogCommand::Compare(args) = &config.command else {
                panic!("expected compare command");
            };
            let request = args.to_request();

            assert_eq!(request.aircraft_ids, vec![3, 1, 2]);
            assert_eq!(request.unit_format, UnitFormat::Imperial);
            assert!(!request.include_images);
            assert!(request.include_specifications);
            assert!(request.normalize_units);
        }

        #[test]
        fn test_dataset_or_config_required_for_queries() {
            let config = CliConfig::parse_from(["aero-catalog", "search"]);
            assert!(config.validate().is_err());

            let config = CliConfig::parse_from(["aero-catalog", "fields"]);
            assert!(config.validate().is_ok());

            let config = CliConfig::parse_from(["aero-catalog", "--dataset", "x.json", "search"]);
            assert!(config.validate().is_ok());
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::{CatalogCommand, CliConfig, CompareArgs, SearchArgs};
