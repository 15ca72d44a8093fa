use crate::domain::model::Aircraft;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Loads the record set from a remote JSON endpoint returning an array of
/// aircraft objects.
pub struct HttpCatalogSource {
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            headers: HashMap::new(),
            timeout: None,
            client: Client::new(),
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Vec<Aircraft>> {
        tracing::info!("🌐 Loading catalog from: {}", self.endpoint);

        let mut request = self.client.get(&self.endpoint);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        tracing::debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CatalogError::dataset(format!(
                "Catalog endpoint returned status {}",
                response.status()
            )));
        }

        let records: Vec<Aircraft> = response.json().await?;
        let total = records.len();

        // Keep the valid records, drop and count the rest.
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
            return Err(CatalogError::dataset("Catalog endpoint returned no usable records"));
        }

        tracing::info!("Loaded {} aircraft", valid.len());
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn aircraft_json(id: i64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "model": format!("{}-200", name),
            "manufacturer": {"id": 1, "name": "Airbus"},
            "max_passengers": 180,
            "typical_passengers": 150,
            "range_km": 6300,
            "cruise_speed_knots": 450,
            "introduction_year": 1988,
            "active": true
        })
    }

    #[tokio::test]
    async fn test_loads_record_array() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/aircraft");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    aircraft_json(1, "A320"),
                    aircraft_json(2, "A321"),
                ]));
        });

        let source = HttpCatalogSource::new(server.url("/aircraft"));
        let records = source.load().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "A320");
        assert_eq!(records[1].manufacturer.name, "Airbus");
    }

    #[tokio::test]
    async fn test_invalid_records_are_skipped() {
        let server = MockServer::start();
        let mut broken = aircraft_json(2, "A321");
        broken["max_passengers"] = serde_json::json!(50);
        broken["typical_passengers"] = serde_json::json!(150);

        server.mock(|when, then| {
            when.method(GET).path("/aircraft");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([aircraft_json(1, "A320"), broken]));
        });

        let source = HttpCatalogSource::new(server.url("/aircraft"));
        let records = source.load().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }

    #[tokio::test]
    async fn test_error_status_fails_load() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/aircraft");
            then.status(500);
        });

        let source = HttpCatalogSource::new(server.url("/aircraft"));
        assert!(source.load().await.is_err());
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/aircraft")
                .header("x-api-key", "secret");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([aircraft_json(1, "A320")]));
        });

        let mut headers = HashMap::new();
        headers.insert("x-api-key".to_string(), "secret".to_string());
        let source = HttpCatalogSource::new(server.url("/aircraft")).with_headers(headers);

        let records = source.load().await.unwrap();
        api_mock.assert();
        assert_eq!(records.len(), 1);
    }
}
