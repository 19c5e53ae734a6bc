//! Geolocus: interchangeable Cartesian and spherical coordinates for located entities
//!
//! This crate models a point in 3D space in either Cartesian `(x, y, z)` or
//! spherical `(phi, theta, radius)` form, converts between the two on demand,
//! compares coordinates with a fixed tolerance and shares one canonical instance
//! per distinct value. A [`Location`] owns exactly one coordinate and knows how to
//! read and write it from a fixed four column row.

use thiserror::Error;

pub mod constants;
pub mod coordinates;
pub mod location;
pub mod numeric;

// Re-export commonly used types
pub use coordinates::cartesian::CartesianCoordinate;
pub use coordinates::spherical::SphericCoordinate;
pub use coordinates::{Coordinate, CoordinateType};
pub use location::row::{MemoryRow, Row, RowValue};
pub use location::{Located, Location};

/// Main error type for the geolocus library
#[derive(Debug, Error)]
pub enum CoordinateError {
    #[error("{field} must be a finite number, got {value}")]
    InvalidScalar { field: &'static str, value: f64 },

    #[error("radius must be non-negative, got {0}")]
    InvalidRadius(f64),

    #[error("{0} must be non-null")]
    NullArgument(&'static str),

    #[error("Unknown coordinate type: {0}")]
    UnknownCoordinateType(i16),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column {column} does not hold a {expected} value")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for geolocus operations
pub type Result<T> = std::result::Result<T, CoordinateError>;
