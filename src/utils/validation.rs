use crate::utils::error::{CatalogError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CatalogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_file_extension(field_name: &str, path: &str, allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed.join(", ")
            ),
        }),
        None => Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| CatalogError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CatalogError::validation(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

/// Optional bound variant: absent values are unconstrained.
pub fn validate_optional_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: Option<T>,
    min: T,
    max: T,
) -> Result<()> {
    match value {
        Some(v) => validate_range(field_name, v, min, max),
        None => Ok(()),
    }
}

pub fn validate_text_term(field_name: &str, value: &str, min_len: usize, max_len: usize) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.len() < min_len || trimmed.len() > max_len {
        return Err(CatalogError::validation(
            field_name,
            format!(
                "Term must be between {} and {} characters, got {}",
                min_len,
                max_len,
                trimmed.len()
            ),
        ));
    }
    Ok(())
}

pub fn validate_id_list(field_name: &str, ids: &[i64], max_len: usize) -> Result<()> {
    if ids.is_empty() {
        return Err(CatalogError::validation(
            field_name,
            "ID list cannot be empty when present",
        ));
    }
    if ids.len() > max_len {
        return Err(CatalogError::validation(
            field_name,
            format!("ID list holds {} entries, maximum is {}", ids.len(), max_len),
        ));
    }
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(CatalogError::validation(
            field_name,
            format!("IDs must be positive, got {}", bad),
        ));
    }
    Ok(())
}

pub fn validate_positive_id(field_name: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(CatalogError::validation(
            field_name,
            format!("ID must be positive, got {}", id),
        ));
    }
    Ok(())
}
