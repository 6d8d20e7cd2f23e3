use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("search radius must be a positive number of meters")]
    Radius,
    #[error("unknown amenity '{0}'")]
    UnknownAmenity(String),
    #[error("{field} '{value}' is not a number")]
    Unparsable { field: &'static str, value: String },
}

impl QueryError {
    /// True when the problem lies in the latitude/longitude input.
    pub fn is_coordinate_error(&self) -> bool {
        matches!(
            self,
            QueryError::Latitude(_) | QueryError::Longitude(_) | QueryError::Unparsable { .. }
        )
    }
}
