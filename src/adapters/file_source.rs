use crate::domain::model::{Aircraft, FamilyRef, ManufacturerRef};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_file_extension, Validate};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ALLOWED_EXTENSIONS: &[&str] = &["json", "csv"];

/// Loads the record set from a local JSON or CSV dataset.
pub struct FileCatalogSource {
    path: PathBuf,
}

/// Flat CSV row shape; cross-references are inlined as id/name column
/// pairs and specifications/images stay JSON-only.
#[derive(Debug, Deserialize)]
struct CsvAircraftRow {
    id: i64,
    name: String,
    model: String,
    manufacturer_id: i64,
    manufacturer_name: String,
    family_id: Option<i64>,
    family_name: Option<String>,
    aircraft_type_id: Option<i64>,
    production_state_id: Option<i64>,
    size_category_id: Option<i64>,
    typical_passengers: Option<i64>,
    max_passengers: Option<i64>,
    range_km: Option<i64>,
    cruise_speed_knots: Option<i64>,
    introduction_year: Option<i64>,
    active: bool,
}

impl From<CsvAircraftRow> for Aircraft {
    fn from(row: CsvAircraftRow) -> Self {
        let family = match (row.family_id, row.family_name) {
            (Some(id), Some(name)) if !name.is_empty() => Some(FamilyRef { id, name }),
            _ => None,
        };
        Self {
            id: row.id,
            name: row.name,
            model: row.model,
            manufacturer: ManufacturerRef {
                id: row.manufacturer_id,
                name: row.manufacturer_name,
            },
            family,
            aircraft_type_id: row.aircraft_type_id,
            production_state_id: row.production_state_id,
            size_category_id: row.size_category_id,
            typical_passengers: row.typical_passengers,
            max_passengers: row.max_passengers,
            range_km: row.range_km,
            cruise_speed_knots: row.cruise_speed_knots,
            introduction_year: row.introduction_year,
            active: row.active,
            specifications: None,
            images: Vec::new(),
        }
    }
}

impl FileCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        validate_file_extension("source.path", &display, ALLOWED_EXTENSIONS)?;
        Ok(Self { path })
    }

    fn read_json(&self) -> Result<Vec<Aircraft>> {
        let content = std::fs::read_to_string(&self.path)?;
        let records: Vec<Aircraft> = serde_json::from_str(&content)?;
        Ok(records)
    }

    fn read_csv(&self) -> Result<Vec<Aircraft>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let row: CsvAircraftRow = row?;
            records.push(Aircraft::from(row));
        }
        Ok(records)
    }
}

impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Vec<Aircraft>> {
        tracing::info!("📂 Loading catalog from: {}", self.path.display());

        let is_csv = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let records = if is_csv {
            self.read_csv()?
        } else {
            self.read_json()?
        };
        let total = records.len();

        let mut valid = Vec::with_capacity(total);
        for aircraft in records {
            match aircraft.validate() {
                Ok(()) => valid.push(aircraft),
                Err(e) => tracing::warn!("Skipping invalid record: {}", e),
            }
        }

        if valid.len() < total {
            tracing::warn!("Dropped {} invalid records of {}", total - valid.len(), total);
        }
        if valid.is_empty() {
            return Err(CatalogError::dataset(format!(
                "Dataset {} holds no usable records",
                self.path.display()
            )));
        }

        tracing::info!("Loaded {} aircraft", valid.len());
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_json_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "fleet.json",
            r#"[
                {
                    "id": 1,
                    "name": "A320",
                    "model": "A320-200",
                    "manufacturer": {"id": 1, "name": "Airbus"},
                    "max_passengers": 180,
                    "range_km": 6300,
                    "cruise_speed_knots": 450,
                    "introduction_year": 1988
                }
            ]"#,
        );

        let source = FileCatalogSource::new(&path).unwrap();
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A320");
        assert!(records[0].active);
    }

    #[tokio::test]
    async fn test_loads_csv_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "fleet.csv",
            "id,name,model,manufacturer_id,manufacturer_name,family_id,family_name,aircraft_type_id,production_state_id,size_category_id,typical_passengers,max_passengers,range_km,cruise_speed_knots,introduction_year,active\n\
             1,A320,A320-200,1,Airbus,5,A320 family,,,,150,180,6300,450,1988,true\n\
             2,737,737-800,2,Boeing,,,,,,162,189,5765,453,1998,true\n",
        );

        let source = FileCatalogSource::new(&path).unwrap();
        let records = source.load().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].family.as_ref().map(|f| f.name.as_str()), Some("A320 family"));
        assert!(records[1].family.is_none());
        assert_eq!(records[1].manufacturer.name, "Boeing");
    }

    #[tokio::test]
    async fn test_rejects_unknown_extension() {
        assert!(FileCatalogSource::new("fleet.xml").is_err());
    }

    #[tokio::test]
    async fn test_invalid_rows_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "fleet.json",
            r#"[
                {
                    "id": 1,
                    "name": "A320",
                    "model": "A320-200",
                    "manufacturer": {"id": 1, "name": "Airbus"}
                },
                {
                    "id": 2,
                    "name": "Bad",
                    "model": "Bad-1",
                    "manufacturer": {"id": 1, "name": "Airbus"},
                    "introduction_year": 1600
                }
            ]"#,
        );

        let source = FileCatalogSource::new(&path).unwrap();
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }

    #[tokio::test]
    async fn test_empty_dataset_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "fleet.json", "[]");
        let source = FileCatalogSource::new(&path).unwrap();
        assert!(source.load().await.is_err());
    }
}
