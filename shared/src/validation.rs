//! Validation utilities for the Mycoforage platform

use rust_decimal::Decimal;
use thiserror::Error;

/// A rejected input field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_SPECIES_LEN: usize = 100;
pub const MAX_LOCATION_NAME_LEN: usize = 200;
pub const MAX_JOURNAL_CONTENT_LEN: usize = 10_000;
pub const MAX_FORUM_BODY_LEN: usize = 20_000;

// ============================================================================
// Location Validations
// ============================================================================

/// Latitude must be within ±90 and longitude within ±180
pub fn validate_coordinates(latitude: Decimal, longitude: Decimal) -> ValidationResult {
    if latitude < Decimal::from(-90) || latitude > Decimal::from(90) {
        return Err(ValidationError::new(
            "latitude",
            "Latitude must be between -90 and 90",
        ));
    }
    if longitude < Decimal::from(-180) || longitude > Decimal::from(180) {
        return Err(ValidationError::new(
            "longitude",
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(())
}

/// Either both coordinates are given or neither
pub fn validate_optional_coordinates(
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
) -> ValidationResult {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => validate_coordinates(lat, lon),
        (None, None) => Ok(()),
        (Some(_), None) => Err(ValidationError::new(
            "longitude",
            "Longitude is required when latitude is given",
        )),
        (None, Some(_)) => Err(ValidationError::new(
            "latitude",
            "Latitude is required when longitude is given",
        )),
    }
}

// ============================================================================
// Account Validations
// ============================================================================

/// Usernames: 3-32 chars of letters, digits, `_`, `-` or `.`
pub fn validate_username(username: &str) -> ValidationResult {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(ValidationError::new(
            "username",
            "Username must be 3-32 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(ValidationError::new(
            "username",
            "Username may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> ValidationResult {
    if password.len() < 8 {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    Ok(())
}

// ============================================================================
// Journal & Forum Validations
// ============================================================================

pub fn validate_title(title: &str) -> ValidationResult {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::new("title", "Title is too long"));
    }
    Ok(())
}

pub fn validate_journal_content(content: &str) -> ValidationResult {
    if content.chars().count() > MAX_JOURNAL_CONTENT_LEN {
        return Err(ValidationError::new("content", "Journal entry is too long"));
    }
    Ok(())
}

pub fn validate_species(species: Option<&str>) -> ValidationResult {
    match species {
        Some(s) if s.chars().count() > MAX_SPECIES_LEN => Err(ValidationError::new(
            "species",
            "Species name is too long",
        )),
        _ => Ok(()),
    }
}

pub fn validate_location_name(location_name: Option<&str>) -> ValidationResult {
    match location_name {
        Some(s) if s.chars().count() > MAX_LOCATION_NAME_LEN => Err(ValidationError::new(
            "location_name",
            "Location name is too long",
        )),
        _ => Ok(()),
    }
}

pub fn validate_quantity(quantity: Option<i32>) -> ValidationResult {
    match quantity {
        Some(q) if q < 0 => Err(ValidationError::new(
            "quantity",
            "Quantity cannot be negative",
        )),
        _ => Ok(()),
    }
}

pub fn validate_forum_body(body: &str) -> ValidationResult {
    if body.trim().is_empty() {
        return Err(ValidationError::new("body", "Post body cannot be empty"));
    }
    if body.chars().count() > MAX_FORUM_BODY_LEN {
        return Err(ValidationError::new("body", "Post body is too long"));
    }
    Ok(())
}

/// Links and photo URLs must be http(s)
pub fn validate_url(field: &'static str, url: Option<&str>) -> ValidationResult {
    match url {
        Some(u) if !(u.starts_with("https://") || u.starts_with("http://")) => Err(
            ValidationError::new(field, "URL must start with http:// or https://"),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_coordinates_valid() {
        assert!(validate_coordinates(dec("46.2044"), dec("6.1432")).is_ok());
        assert!(validate_coordinates(dec("-90"), dec("180")).is_ok());
    }

    #[test]
    fn test_coordinates_invalid() {
        let err = validate_coordinates(dec("90.1"), dec("0")).unwrap_err();
        assert_eq!(err.field, "latitude");
        let err = validate_coordinates(dec("0"), dec("-180.5")).unwrap_err();
        assert_eq!(err.field, "longitude");
    }

    #[test]
    fn test_optional_coordinates_must_pair() {
        assert!(validate_optional_coordinates(None, None).is_ok());
        assert!(validate_optional_coordinates(Some(dec("1")), Some(dec("2"))).is_ok());
        assert_eq!(
            validate_optional_coordinates(Some(dec("1")), None).unwrap_err().field,
            "longitude"
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("mycelia_fan").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("chanterelle").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_title_rules() {
        assert!(validate_title("Porcini under the spruce").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"t".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(None).is_ok());
        assert!(validate_quantity(Some(0)).is_ok());
        assert!(validate_quantity(Some(-1)).is_err());
    }

    #[test]
    fn test_url() {
        assert!(validate_url("link", None).is_ok());
        assert!(validate_url("link", Some("https://example.org/a")).is_ok());
        assert!(validate_url("link", Some("javascript:alert(1)")).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("body", "Post body cannot be empty");
        assert_eq!(err.to_string(), "body: Post body cannot be empty");
    }
}
