//! Input validation utilities.
//!
//! Request fields and configuration values are checked here before they reach the store or
//! the enrichment service.

use crate::{CatalogError, CatalogResult};
use songlib_types::NonEmptyText;

/// Validates a required request field, naming it in the error.
///
/// # Errors
///
/// Returns `CatalogError::InvalidRequest` if the value is empty or whitespace-only.
pub fn require_text(field: &str, value: &str) -> CatalogResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| CatalogError::InvalidRequest(format!("{field} is required")))
}

/// Validates an optional request field: absent is fine, present-but-blank is not.
pub fn optional_text(field: &str, value: Option<&str>) -> CatalogResult<Option<NonEmptyText>> {
    value.map(|v| require_text(field, v)).transpose()
}

/// Validates the base URL of the enrichment service.
///
/// The URL must be an absolute `http` or `https` URL. A trailing slash is accepted and
/// stripped so the lookup path can be appended uniformly.
///
/// # Errors
///
/// Returns `CatalogError::InvalidConfig` if the URL is empty or has an unsupported scheme.
pub fn validate_enrichment_base_url(base_url: &str) -> CatalogResult<String> {
    let trimmed = base_url.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(CatalogError::InvalidConfig(
            "enrichment base URL cannot be empty".into(),
        ));
    }

    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));

    match rest {
        Some(host) if !host.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(CatalogError::InvalidConfig(format!(
            "enrichment base URL must be an absolute http(s) URL, got '{base_url}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_names_the_field() {
        let err = require_text("group", "   ").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest(msg) if msg == "group is required"));
    }

    #[test]
    fn test_optional_text_allows_absent_but_not_blank() {
        assert_eq!(optional_text("song", None).unwrap(), None);
        assert!(optional_text("song", Some("")).is_err());
        assert_eq!(
            optional_text("song", Some("Hysteria")).unwrap().unwrap().as_str(),
            "Hysteria"
        );
    }

    #[test]
    fn test_validate_enrichment_base_url() {
        assert_eq!(
            validate_enrichment_base_url("http://localhost:9000/").unwrap(),
            "http://localhost:9000"
        );
        assert_eq!(
            validate_enrichment_base_url("https://api.example.com/v1").unwrap(),
            "https://api.example.com/v1"
        );
        assert!(validate_enrichment_base_url("").is_err());
        assert!(validate_enrichment_base_url("ftp://example.com").is_err());
        assert!(validate_enrichment_base_url("http://").is_err());
        assert!(validate_enrichment_base_url("localhost:9000").is_err());
    }
}
