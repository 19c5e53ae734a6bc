//! Coordinates module
//!
//! A [`Coordinate`] is a point in 3D space held in exactly one of two
//! representations, Cartesian or spherical. Every public operation runs through
//! the same contract: class invariants are checked before and after, arguments
//! are checked on the way in, and results are checked on the way out. Only the
//! core computation differs per variant (see `contract::CoordinateHooks`).

use std::f64::consts::PI;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

pub mod cache;
pub mod cartesian;
pub mod contract;
pub mod spherical;

pub use cache::{cache_stats, CacheStats};
pub use cartesian::CartesianCoordinate;
pub use spherical::SphericCoordinate;

use self::contract::{ensure_between, ensure_invariant, ensure_non_negative, CoordinateHooks};
use crate::location::row::Row;
use crate::numeric::{equal_normalized, normalized_key};
use crate::{CoordinateError, Result};

/// Persisted discriminant of a coordinate representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i16)]
pub enum CoordinateType {
    Cartesian = 1,
    Spherical = 2,
}

impl CoordinateType {
    /// The 16-bit tag written to the type column
    pub fn tag(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for CoordinateType {
    type Error = CoordinateError;

    fn try_from(tag: i16) -> Result<Self> {
        match tag {
            1 => Ok(CoordinateType::Cartesian),
            2 => Ok(CoordinateType::Spherical),
            other => Err(CoordinateError::UnknownCoordinateType(other)),
        }
    }
}

/// A point in 3D space in Cartesian or spherical form
///
/// Cloning is cheap: both arms hold the shared canonical instance.
///
/// Equality is representation independent. Two coordinates are equal when their
/// Cartesian projections agree component-wise after normalization, so a
/// Cartesian point and an equivalent spherical point compare (and hash) equal.
#[derive(Debug, Clone)]
pub enum Coordinate {
    Cartesian(Arc<CartesianCoordinate>),
    Spherical(Arc<SphericCoordinate>),
}

impl Coordinate {
    /// Canonical Cartesian coordinate `(x, y, z)`
    pub fn cartesian(x: f64, y: f64, z: f64) -> Result<Coordinate> {
        CartesianCoordinate::get(x, y, z).map(Coordinate::from)
    }

    /// Canonical spherical coordinate `(phi, theta, radius)`
    pub fn spherical(phi: f64, theta: f64, radius: f64) -> Result<Coordinate> {
        SphericCoordinate::get(phi, theta, radius).map(Coordinate::from)
    }

    /// Converts to Cartesian form; a Cartesian coordinate returns itself
    pub fn as_cartesian(&self) -> Result<Arc<CartesianCoordinate>> {
        self.guarded(|| {
            let result = match self {
                Coordinate::Cartesian(c) => CartesianCoordinate::do_as_cartesian(c)?,
                Coordinate::Spherical(s) => SphericCoordinate::do_as_cartesian(s)?,
            };
            ensure_invariant("as_cartesian result", result.assert_class_invariants())?;
            Ok(result)
        })
    }

    /// Converts to spherical form; a spherical coordinate returns itself
    pub fn as_spherical(&self) -> Result<Arc<SphericCoordinate>> {
        self.guarded(|| {
            let result = match self {
                Coordinate::Cartesian(c) => CartesianCoordinate::do_as_spherical(c)?,
                Coordinate::Spherical(s) => SphericCoordinate::do_as_spherical(s)?,
            };
            ensure_invariant("as_spherical result", result.assert_class_invariants())?;
            Ok(result)
        })
    }

    /// Euclidean distance between the two points, never negative
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geolocus::Coordinate;
    ///
    /// let a = Coordinate::spherical(0.33, 0.44, 100.0).unwrap();
    /// let b = Coordinate::spherical(0.33, 0.44, 101.0).unwrap();
    /// assert!((a.cartesian_distance(&b).unwrap() - 1.0).abs() < 1e-6);
    /// ```
    pub fn cartesian_distance(&self, other: &Coordinate) -> Result<f64> {
        self.guarded(|| {
            other.assert_class_invariants()?;
            let distance = match self {
                Coordinate::Cartesian(c) => CartesianCoordinate::do_cartesian_distance(c, other)?,
                Coordinate::Spherical(s) => SphericCoordinate::do_cartesian_distance(s, other)?,
            };
            ensure_non_negative("cartesian_distance", distance)
        })
    }

    /// Central angle between the two points as seen from the origin, in `[0, π]`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geolocus::Coordinate;
    /// use std::f64::consts::PI;
    ///
    /// let x_axis = Coordinate::cartesian(1.0, 0.0, 0.0).unwrap();
    /// let y_axis = Coordinate::cartesian(0.0, 1.0, 0.0).unwrap();
    /// assert!((x_axis.central_angle(&y_axis).unwrap() - PI / 2.0).abs() < 1e-6);
    /// ```
    pub fn central_angle(&self, other: &Coordinate) -> Result<f64> {
        self.guarded(|| {
            other.assert_class_invariants()?;
            let angle = match self {
                Coordinate::Cartesian(c) => CartesianCoordinate::do_central_angle(c, other)?,
                Coordinate::Spherical(s) => SphericCoordinate::do_central_angle(s, other)?,
            };
            ensure_between("central_angle", angle, 0.0, PI)
        })
    }

    /// Representation-independent equality; `None` is never equal
    pub fn is_equal(&self, other: Option<&Coordinate>) -> bool {
        let Some(other) = other else {
            return false;
        };
        if self.is_same_instance(other) {
            return true;
        }

        let (ax, ay, az) = self.cartesian_components();
        let (bx, by, bz) = other.cartesian_components();
        equal_normalized(ax, bx) && equal_normalized(ay, by) && equal_normalized(az, bz)
    }

    /// Returns true if both coordinates share one canonical instance
    pub fn is_same_instance(&self, other: &Coordinate) -> bool {
        match (self, other) {
            (Coordinate::Cartesian(a), Coordinate::Cartesian(b)) => Arc::ptr_eq(a, b),
            (Coordinate::Spherical(a), Coordinate::Spherical(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn coordinate_type(&self) -> CoordinateType {
        match self {
            Coordinate::Cartesian(c) => c.do_coordinate_type(),
            Coordinate::Spherical(s) => s.do_coordinate_type(),
        }
    }

    /// Reads a coordinate of the given type from the three parameter columns
    ///
    /// # Errors
    ///
    /// `MissingColumn` / `ColumnType` from the row, `InvalidScalar` for
    /// non-finite values and `InvalidRadius` for a negative spherical radius.
    pub fn read_from<R: Row + ?Sized>(
        coordinate_type: CoordinateType,
        row: &R,
    ) -> Result<Coordinate> {
        let coordinate = match coordinate_type {
            CoordinateType::Cartesian => Coordinate::from(CartesianCoordinate::read_from(row)?),
            CoordinateType::Spherical => Coordinate::from(SphericCoordinate::read_from(row)?),
        };
        coordinate.assert_class_invariants()?;
        Ok(coordinate)
    }

    /// Writes the three parameter columns; the type column belongs to the owner
    pub fn write_on<R: Row + ?Sized>(&self, row: &mut R) -> Result<()> {
        self.guarded(|| match self {
            Coordinate::Cartesian(c) => c.do_write_on(row),
            Coordinate::Spherical(s) => s.do_write_on(row),
        })
    }

    /// Cartesian projection computed in place, without touching the caches
    fn cartesian_components(&self) -> (f64, f64, f64) {
        match self {
            Coordinate::Cartesian(c) => (c.x(), c.y(), c.z()),
            Coordinate::Spherical(s) => s.to_cartesian_components(),
        }
    }

    fn assert_class_invariants(&self) -> Result<()> {
        match self {
            Coordinate::Cartesian(c) => c.assert_class_invariants(),
            Coordinate::Spherical(s) => s.assert_class_invariants(),
        }
    }

    /// Runs `operation` between two class invariant checks
    fn guarded<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.assert_class_invariants()?;
        let result = operation()?;
        self.assert_class_invariants()?;
        Ok(result)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(Some(other))
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (x, y, z) = self.cartesian_components();
        normalized_key(x).hash(state);
        normalized_key(y).hash(state);
        normalized_key(z).hash(state);
    }
}
