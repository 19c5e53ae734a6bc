//! Contract checks shared by every coordinate variant
//!
//! Preconditions reject bad input (`InvalidScalar`, `InvalidRadius`).
//! Invariant and postcondition checks report defects in this crate
//! (`InvariantViolation`) and are logged at error level when they fire.
//!
//! [`CoordinateHooks`] is the set of variant-specific operations the
//! [`Coordinate`](super::Coordinate) wrapper delegates to.

use std::sync::Arc;

use super::cartesian::CartesianCoordinate;
use super::spherical::SphericCoordinate;
use super::{Coordinate, CoordinateType};
use crate::location::row::Row;
use crate::{CoordinateError, Result};

/// Fails with `InvalidScalar` if `value` is NaN or infinite
pub fn assert_scalar(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoordinateError::InvalidScalar { field, value })
    }
}

/// Fails with `InvalidRadius` if `radius` is negative
pub fn assert_non_negative(radius: f64) -> Result<()> {
    if radius < 0.0 {
        Err(CoordinateError::InvalidRadius(radius))
    } else {
        Ok(())
    }
}

/// Builds an `InvariantViolation` and logs it
pub fn violation(message: String) -> CoordinateError {
    log::error!("coordinate invariant violated: {}", message);
    CoordinateError::InvariantViolation(message)
}

/// Re-labels a failed state check as an invariant violation
pub fn ensure_invariant(context: &str, check: Result<()>) -> Result<()> {
    check.map_err(|err| violation(format!("{}: {}", context, err)))
}

/// Postcondition for distances: `value >= 0` (NaN fails)
pub fn ensure_non_negative(operation: &str, value: f64) -> Result<f64> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(violation(format!(
            "{} returned {}, expected a non-negative value",
            operation, value
        )))
    }
}

/// Postcondition for bounded results: `lower <= value <= upper` (NaN fails)
pub fn ensure_between(operation: &str, value: f64, lower: f64, upper: f64) -> Result<f64> {
    if value >= lower && value <= upper {
        Ok(value)
    } else {
        Err(violation(format!(
            "{} returned {}, expected a value in [{}, {}]",
            operation, value, lower, upper
        )))
    }
}

/// Variant-specific logic behind the [`Coordinate`] operations
///
/// Hooks take `this: &Arc<Self>` so identity conversions can hand back the
/// canonical instance itself instead of a copy.
pub(crate) trait CoordinateHooks: Sized {
    /// Checks the stored fields against the variant's validity rules
    fn assert_class_invariants(&self) -> Result<()>;

    fn do_as_cartesian(this: &Arc<Self>) -> Result<Arc<CartesianCoordinate>>;

    fn do_as_spherical(this: &Arc<Self>) -> Result<Arc<SphericCoordinate>>;

    /// Euclidean distance between the Cartesian projections of both sides
    fn do_cartesian_distance(this: &Arc<Self>, other: &Coordinate) -> Result<f64> {
        let own = Self::do_as_cartesian(this)?;
        let other = other.as_cartesian()?;
        Ok(own.distance(&other))
    }

    /// Central angle between the spherical projections of both sides
    fn do_central_angle(this: &Arc<Self>, other: &Coordinate) -> Result<f64> {
        let own = Self::do_as_spherical(this)?;
        let other = other.as_spherical()?;
        Ok(own.central_angle_to(&other))
    }

    fn do_coordinate_type(&self) -> CoordinateType;

    /// Writes the three parameter columns
    fn do_write_on<R: Row + ?Sized>(&self, row: &mut R) -> Result<()>;
}
