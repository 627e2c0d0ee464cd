use crate::errors::ServiceError;

/// Parse a path segment into a positional place id.
///
/// The whole segment must be a decimal integer. Negative values are
/// accepted here; the registry reports them as not found.
pub fn parse_place_id(raw: &str) -> Result<i64, ServiceError> {
    raw.parse::<i64>()
        .map_err(|_| ServiceError::Validation("place id must be a decimal integer".into()))
}
