pub mod events;

pub use events::{EventService, SaveDecision, SaveEventRequest};

use crate::store::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The requester has no identity allowed to perform the operation.
    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// Parses a store identifier submitted as text.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::Validation(format!("{field} must be an integer, got '{raw}'")))
}

/// Parses a coordinate submitted as text. NaN and infinities are rejected.
pub fn parse_coordinate(field: &str, raw: &str) -> Result<f64, ServiceError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ServiceError::Validation(format!(
            "{field} must be a number, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("event-id", " 42 ").unwrap(), 42);
        assert!(matches!(
            parse_id("event-id", "abc"),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("eventLatitude", "-73.5").unwrap(), -73.5);
        assert!(parse_coordinate("eventLatitude", "north").is_err());
        assert!(parse_coordinate("eventLatitude", "NaN").is_err());
        assert!(parse_coordinate("eventLatitude", "").is_err());
    }
}
