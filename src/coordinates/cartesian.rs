//! # Cartesian Coordinate Module
//!
//! This module provides the Cartesian `(x, y, z)` variant of a [`Coordinate`].
//!
//! ## Canonical Instances
//!
//! `CartesianCoordinate` values are immutable and interned: [`CartesianCoordinate::get`]
//! returns one shared `Arc` per normalized `(x, y, z)` tuple. Two requests whose
//! components agree after rounding to [`COMPARE_ACCURACY`](crate::constants::COMPARE_ACCURACY)
//! receive the same instance, holding the components of whichever request
//! arrived first.
//!
//! ## Conversion to Spherical Form
//!
//! - `radius = sqrt(x² + y² + z²)`
//! - `phi = atan2(y, x)`
//! - `theta = atan2(sqrt(x² + y²), z)`
//!
//! The origin has no defined angles and converts to `SphericCoordinate(0, 0, 0)`.
//!
//! ## Examples
//!
//! ```rust
//! use geolocus::coordinates::cartesian::CartesianCoordinate;
//! use std::sync::Arc;
//!
//! let a = CartesianCoordinate::get(1.1, 2.2, 3.3).unwrap();
//! let b = CartesianCoordinate::get(6.6 - 5.5, 22.0 / 10.0, 1.1 * 3.0).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use std::sync::Arc;

use nalgebra::Vector3;
use serde::Serialize;

use super::cache::{cache_key, cartesian_cache};
use super::contract::{assert_scalar, ensure_invariant, CoordinateHooks};
use super::spherical::SphericCoordinate;
use super::{Coordinate, CoordinateType};
use crate::location::row::Row;
use crate::location::{COLUMN_NAME_PARAM_A, COLUMN_NAME_PARAM_B, COLUMN_NAME_PARAM_C};
use crate::Result;

/// Point in 3D space given by its distances along three orthogonal axes
///
/// Instances only exist behind the `Arc` handed out by [`CartesianCoordinate::get`];
/// there are no setters.
#[derive(Debug, Serialize)]
pub struct CartesianCoordinate {
    x: f64,
    y: f64,
    z: f64,
}

impl CartesianCoordinate {
    /// Returns the canonical instance for `(x, y, z)`
    ///
    /// # Errors
    ///
    /// `InvalidScalar` if any component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geolocus::coordinates::cartesian::CartesianCoordinate;
    ///
    /// let coord = CartesianCoordinate::get(1.0, 2.0, 3.0).unwrap();
    /// assert_eq!(coord.x(), 1.0);
    /// assert_eq!(coord.y(), 2.0);
    /// assert_eq!(coord.z(), 3.0);
    ///
    /// assert!(CartesianCoordinate::get(f64::NAN, 0.0, 0.0).is_err());
    /// ```
    pub fn get(x: f64, y: f64, z: f64) -> Result<Arc<CartesianCoordinate>> {
        Self::assert_valid(x, y, z)?;
        Ok(cartesian_cache().get_or_insert_with(cache_key(x, y, z), || CartesianCoordinate {
            x,
            y,
            z,
        }))
    }

    /// Returns the canonical origin `(0, 0, 0)`
    pub fn origin() -> Arc<CartesianCoordinate> {
        cartesian_cache().get_or_insert_with(cache_key(0.0, 0.0, 0.0), || CartesianCoordinate {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        })
    }

    /// Returns the canonical instance for a nalgebra vector
    pub fn from_vector3(vec: Vector3<f64>) -> Result<Arc<CartesianCoordinate>> {
        Self::get(vec.x, vec.y, vec.z)
    }

    /// Reads `(x, y, z)` from the three parameter columns of `row`
    pub fn read_from<R: Row + ?Sized>(row: &R) -> Result<Arc<CartesianCoordinate>> {
        Self::get(
            row.get_f64(COLUMN_NAME_PARAM_A)?,
            row.get_f64(COLUMN_NAME_PARAM_B)?,
            row.get_f64(COLUMN_NAME_PARAM_C)?,
        )
    }

    fn assert_valid(x: f64, y: f64, z: f64) -> Result<()> {
        assert_scalar("x", x)?;
        assert_scalar("y", y)?;
        assert_scalar("z", z)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Euclidean distance to another Cartesian coordinate, computed without
    /// intermediate overflow
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geolocus::coordinates::cartesian::CartesianCoordinate;
    ///
    /// let a = CartesianCoordinate::get(0.0, 0.0, 100.0).unwrap();
    /// let b = CartesianCoordinate::get(0.0, 0.0, -100.0).unwrap();
    /// assert_eq!(a.distance(&b), 200.0);
    /// ```
    pub fn distance(&self, other: &CartesianCoordinate) -> f64 {
        let delta = self.to_vector3() - other.to_vector3();
        delta.x.hypot(delta.y).hypot(delta.z)
    }

    /// Distance to the origin, computed without intermediate overflow
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Spherical `(phi, theta, radius)` components of this point
    ///
    /// Returns `(0, 0, 0)` at the origin, where both angles are undefined.
    pub fn to_spherical_components(&self) -> (f64, f64, f64) {
        let radius = self.magnitude();
        if radius == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let phi = self.y.atan2(self.x);
        let theta = self.x.hypot(self.y).atan2(self.z);
        (phi, theta, radius)
    }
}

impl CoordinateHooks for CartesianCoordinate {
    fn assert_class_invariants(&self) -> Result<()> {
        ensure_invariant("cartesian coordinate", Self::assert_valid(self.x, self.y, self.z))
    }

    fn do_as_cartesian(this: &Arc<Self>) -> Result<Arc<CartesianCoordinate>> {
        Ok(Arc::clone(this))
    }

    fn do_as_spherical(this: &Arc<Self>) -> Result<Arc<SphericCoordinate>> {
        let (phi, theta, radius) = this.to_spherical_components();
        SphericCoordinate::get(phi, theta, radius)
    }

    fn do_cartesian_distance(this: &Arc<Self>, other: &Coordinate) -> Result<f64> {
        let other = other.as_cartesian()?;
        Ok(this.distance(&other))
    }

    fn do_coordinate_type(&self) -> CoordinateType {
        CoordinateType::Cartesian
    }

    fn do_write_on<R: Row + ?Sized>(&self, row: &mut R) -> Result<()> {
        row.update_f64(COLUMN_NAME_PARAM_A, self.x)?;
        row.update_f64(COLUMN_NAME_PARAM_B, self.y)?;
        row.update_f64(COLUMN_NAME_PARAM_C, self.z)
    }
}

impl From<Arc<CartesianCoordinate>> for Coordinate {
    fn from(coordinate: Arc<CartesianCoordinate>) -> Self {
        Coordinate::Cartesian(coordinate)
    }
}
