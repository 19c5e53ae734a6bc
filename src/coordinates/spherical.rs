//! # Spherical Coordinate Module
//!
//! This module provides the spherical `(phi, theta, radius)` variant of a
//! [`Coordinate`].
//!
//! ## Angle Convention
//!
//! - **phi**: azimuth in radians, measured in the x-y plane from +x toward +y
//! - **theta**: polar angle in radians, measured from the +z axis (`theta = 0` is
//!   the pole, `theta = π/2` the equator)
//! - **radius**: distance from the origin, never negative
//!
//! Angles are stored as given; they are not wrapped into a principal range.
//!
//! ## Poles
//!
//! At `theta = 0` (or `π`) every `phi` describes the same point. The central
//! angle formula inherits this: two pole points that differ only in `phi`
//! report an angle of `0`. Callers must not treat `phi` as distinguishing
//! points on the pole axis.
//!
//! ## Interning Resolution
//!
//! Instances are interned on angles rounded to `1e-6` rad. Away from the unit
//! sphere that grid is coarser than the Cartesian tolerance: converting a point
//! of radius `r` to spherical form may return an instance created for a nearby
//! point, up to about `2e-6 · r + 1e-6` away.
//!
//! ## Examples
//!
//! ```rust
//! use geolocus::coordinates::spherical::SphericCoordinate;
//! use std::f64::consts::PI;
//!
//! let equator = SphericCoordinate::get(0.0, PI / 2.0, 1.0).unwrap();
//! let pole = SphericCoordinate::get(0.0, 0.0, 1.0).unwrap();
//! assert!((equator.central_angle_to(&pole) - PI / 2.0).abs() < 1e-12);
//! ```

use std::sync::Arc;

use serde::Serialize;

use super::cache::{cache_key, spheric_cache};
use super::cartesian::CartesianCoordinate;
use super::contract::{assert_non_negative, assert_scalar, ensure_invariant, CoordinateHooks};
use super::{Coordinate, CoordinateType};
use crate::constants::{DEG2RAD, QUARTER_TURN, RAD2DEG};
use crate::location::row::Row;
use crate::location::{COLUMN_NAME_PARAM_A, COLUMN_NAME_PARAM_B, COLUMN_NAME_PARAM_C};
use crate::Result;

/// Point in 3D space given by azimuth, polar angle and distance from the origin
#[derive(Debug, Serialize)]
pub struct SphericCoordinate {
    phi: f64,
    theta: f64,
    radius: f64,
}

impl SphericCoordinate {
    /// Returns the canonical instance for `(phi, theta, radius)`
    ///
    /// # Errors
    ///
    /// `InvalidScalar` if any component is NaN or infinite, `InvalidRadius` if
    /// `radius` is negative.
    pub fn get(phi: f64, theta: f64, radius: f64) -> Result<Arc<SphericCoordinate>> {
        Self::assert_valid(phi, theta, radius)?;
        Ok(spheric_cache().get_or_insert_with(cache_key(phi, theta, radius), || {
            SphericCoordinate { phi, theta, radius }
        }))
    }

    /// Returns the canonical instance for angles given in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geolocus::coordinates::spherical::SphericCoordinate;
    /// use std::f64::consts::PI;
    ///
    /// let coord = SphericCoordinate::from_degrees(180.0, 90.0, 2.0).unwrap();
    /// assert!((coord.phi() - PI).abs() < 1e-15);
    /// assert!((coord.theta_degrees() - 90.0).abs() < 1e-12);
    /// ```
    pub fn from_degrees(
        phi_deg: f64,
        theta_deg: f64,
        radius: f64,
    ) -> Result<Arc<SphericCoordinate>> {
        Self::get(phi_deg * DEG2RAD, theta_deg * DEG2RAD, radius)
    }

    /// Reads `(phi, theta, radius)` from the three parameter columns of `row`
    pub fn read_from<R: Row + ?Sized>(row: &R) -> Result<Arc<SphericCoordinate>> {
        Self::get(
            row.get_f64(COLUMN_NAME_PARAM_A)?,
            row.get_f64(COLUMN_NAME_PARAM_B)?,
            row.get_f64(COLUMN_NAME_PARAM_C)?,
        )
    }

    fn assert_valid(phi: f64, theta: f64, radius: f64) -> Result<()> {
        assert_scalar("phi", phi)?;
        assert_scalar("theta", theta)?;
        assert_scalar("radius", radius)?;
        assert_non_negative(radius)
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Get azimuth in degrees
    pub fn phi_degrees(&self) -> f64 {
        self.phi * RAD2DEG
    }

    /// Get polar angle in degrees
    pub fn theta_degrees(&self) -> f64 {
        self.theta * RAD2DEG
    }

    /// Cartesian `(x, y, z)` components of this point
    pub fn to_cartesian_components(&self) -> (f64, f64, f64) {
        let sin_theta = self.theta.sin();
        (
            self.radius * sin_theta * self.phi.cos(),
            self.radius * sin_theta * self.phi.sin(),
            self.radius * self.theta.cos(),
        )
    }

    /// Central angle to another spherical coordinate, in radians `[0, π]`
    ///
    /// Uses the spherical law of cosines on latitudes `π/2 - theta`. Radii do
    /// not enter the result. The cosine ratio is clamped to `[-1, 1]` before
    /// `acos` so rounding cannot leave its domain.
    pub fn central_angle_to(&self, other: &SphericCoordinate) -> f64 {
        let delta_phi = (self.phi - other.phi).abs();
        let latitude_a = QUARTER_TURN - self.theta;
        let latitude_b = QUARTER_TURN - other.theta;

        let ratio = latitude_a.sin() * latitude_b.sin()
            + latitude_a.cos() * latitude_b.cos() * delta_phi.cos();
        ratio.clamp(-1.0, 1.0).acos()
    }
}

impl CoordinateHooks for SphericCoordinate {
    fn assert_class_invariants(&self) -> Result<()> {
        ensure_invariant(
            "spherical coordinate",
            Self::assert_valid(self.phi, self.theta, self.radius),
        )
    }

    fn do_as_cartesian(this: &Arc<Self>) -> Result<Arc<CartesianCoordinate>> {
        let (x, y, z) = this.to_cartesian_components();
        CartesianCoordinate::get(x, y, z)
    }

    fn do_as_spherical(this: &Arc<Self>) -> Result<Arc<SphericCoordinate>> {
        Ok(Arc::clone(this))
    }

    fn do_central_angle(this: &Arc<Self>, other: &Coordinate) -> Result<f64> {
        let other = other.as_spherical()?;
        Ok(this.central_angle_to(&other))
    }

    fn do_coordinate_type(&self) -> CoordinateType {
        CoordinateType::Spherical
    }

    fn do_write_on<R: Row + ?Sized>(&self, row: &mut R) -> Result<()> {
        row.update_f64(COLUMN_NAME_PARAM_A, self.phi)?;
        row.update_f64(COLUMN_NAME_PARAM_B, self.theta)?;
        row.update_f64(COLUMN_NAME_PARAM_C, self.radius)
    }
}

impl From<Arc<SphericCoordinate>> for Coordinate {
    fn from(coordinate: Arc<SphericCoordinate>) -> Self {
        Coordinate::Spherical(coordinate)
    }
}
