//! Location module
//!
//! A [`Location`] owns exactly one [`Coordinate`] on behalf of an entity such as
//! a photo or a building, and persists it into four columns of that entity's
//! row:
//!
//! | Column | Type | Meaning |
//! |---|---|---|
//! | `location_coordinate_type` | `i16` | 1 = Cartesian, 2 = Spherical |
//! | `location_coordinate_a` | `f64` | x, or phi |
//! | `location_coordinate_b` | `f64` | y, or theta |
//! | `location_coordinate_c` | `f64` | z, or radius |

use crate::coordinates::{Coordinate, CoordinateType};
use crate::{CoordinateError, Result};

pub mod row;

use self::row::Row;

pub const COLUMN_NAME_TYPE: &str = "location_coordinate_type";
pub const COLUMN_NAME_PARAM_A: &str = "location_coordinate_a";
pub const COLUMN_NAME_PARAM_B: &str = "location_coordinate_b";
pub const COLUMN_NAME_PARAM_C: &str = "location_coordinate_c";

/// Interface of entities that carry a location
pub trait Located {
    fn location(&self) -> Option<&Location>;

    fn set_location(&mut self, location: Location);
}

/// The single coordinate of an entity, with write tracking for persistence
#[derive(Debug, Clone)]
pub struct Location {
    coordinate: Coordinate,
    write_count: u32,
}

impl Location {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            write_count: 0,
        }
    }

    /// Builds a location from the type and parameter columns of `row`
    pub fn from_row<R: Row + ?Sized>(row: &R) -> Result<Self> {
        Ok(Self::new(Self::read_coordinate(row)?))
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Replaces the coordinate and marks the location as modified
    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
        self.inc_write_count();
    }

    /// Like [`Location::set_coordinate`], for callers holding an optional value
    ///
    /// # Errors
    ///
    /// `NullArgument` for `None`; the location is left untouched.
    pub fn try_set_coordinate(&mut self, coordinate: Option<Coordinate>) -> Result<()> {
        let coordinate = coordinate.ok_or(CoordinateError::NullArgument("coordinate"))?;
        self.set_coordinate(coordinate);
        Ok(())
    }

    pub fn coordinate_type(&self) -> CoordinateType {
        self.coordinate.coordinate_type()
    }

    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    /// Returns true if the location changed since the last reset
    pub fn is_dirty(&self) -> bool {
        self.write_count != 0
    }

    pub fn reset_write_count(&mut self) {
        self.write_count = 0;
    }

    fn inc_write_count(&mut self) {
        self.write_count = self.write_count.saturating_add(1);
    }

    /// Replaces the coordinate with the one stored in `row`
    ///
    /// The location is only modified if the whole row is valid. Loading is not
    /// a modification, so the write count is left as it was.
    ///
    /// # Errors
    ///
    /// `UnknownCoordinateType` for a type tag other than 1 or 2, plus any error
    /// of [`Coordinate::read_from`].
    pub fn read_from<R: Row + ?Sized>(&mut self, row: &R) -> Result<()> {
        self.coordinate = Self::read_coordinate(row)?;
        Ok(())
    }

    /// Writes the type tag followed by the coordinate's parameter columns
    pub fn write_on<R: Row + ?Sized>(&self, row: &mut R) -> Result<()> {
        let coordinate_type = self.coordinate_type();
        log::debug!("writing {:?} location", coordinate_type);
        row.update_i16(COLUMN_NAME_TYPE, coordinate_type.tag())?;
        self.coordinate.write_on(row)
    }

    fn read_coordinate<R: Row + ?Sized>(row: &R) -> Result<Coordinate> {
        let tag = row.get_i16(COLUMN_NAME_TYPE)?;
        let coordinate_type = CoordinateType::try_from(tag).map_err(|err| {
            log::warn!("refusing to read location with coordinate type {}", tag);
            err
        })?;
        log::debug!("reading {:?} location", coordinate_type);
        Coordinate::read_from(coordinate_type, row)
    }
}

impl TryFrom<Option<Coordinate>> for Location {
    type Error = CoordinateError;

    fn try_from(coordinate: Option<Coordinate>) -> Result<Self> {
        coordinate
            .map(Location::new)
            .ok_or(CoordinateError::NullArgument("coordinate"))
    }
}

#[cfg(test)]
mod tests {
    use super::row::MemoryRow;
    use super::*;
    use std::f64::consts::PI;

    /// Minimal owner used to exercise [`Located`]
    #[derive(Default)]
    struct Photo {
        location: Option<Location>,
    }

    impl Located for Photo {
        fn location(&self) -> Option<&Location> {
            self.location.as_ref()
        }

        fn set_location(&mut self, location: Location) {
            self.location = Some(location);
        }
    }

    fn spherical_row(tag: i16) -> MemoryRow {
        let mut row = MemoryRow::new();
        row.update_i16(COLUMN_NAME_TYPE, tag).unwrap();
        row.update_f64(COLUMN_NAME_PARAM_A, PI / 4.0).unwrap();
        row.update_f64(COLUMN_NAME_PARAM_B, PI / 3.0).unwrap();
        row.update_f64(COLUMN_NAME_PARAM_C, 2.0).unwrap();
        row
    }

    #[test]
    fn test_null_coordinate_constructor() {
        assert!(matches!(
            Location::try_from(None::<Coordinate>),
            Err(CoordinateError::NullArgument("coordinate"))
        ));
    }

    #[test]
    fn test_null_coordinate_setter() {
        let origin = Coordinate::cartesian(0.0, 0.0, 0.0).unwrap();
        let mut location = Location::new(origin.clone());

        let err = location.try_set_coordinate(None).unwrap_err();
        assert!(matches!(err, CoordinateError::NullArgument(_)));
        assert!(location.coordinate().is_same_instance(&origin));
        assert!(!location.is_dirty());
    }

    #[test]
    fn test_getter() {
        let c = Coordinate::cartesian(1.0, 2.0, 3.0).unwrap();
        let location = Location::try_from(Some(c.clone())).unwrap();
        assert_eq!(location.coordinate(), &c);
        assert!(!location.is_dirty());
    }

    #[test]
    fn test_setter_marks_dirty() {
        let c1 = Coordinate::cartesian(1.0, 2.0, 3.0).unwrap();
        let c2 = Coordinate::cartesian(4.0, 5.0, 6.0).unwrap();
        let mut location = Location::new(c1.clone());

        location.set_coordinate(c2.clone());

        assert_ne!(location.coordinate(), &c1);
        assert_eq!(location.coordinate(), &c2);
        assert!(location.is_dirty());
        assert_eq!(location.write_count(), 1);

        location.try_set_coordinate(Some(c1)).unwrap();
        assert_eq!(location.write_count(), 2);

        location.reset_write_count();
        assert!(!location.is_dirty());
    }

    #[test]
    fn test_type() {
        let location = Location::new(Coordinate::cartesian(1.0, 2.0, 3.0).unwrap());
        assert_eq!(location.coordinate_type(), CoordinateType::Cartesian);

        let location = Location::new(Coordinate::spherical(1.0, 2.0, 3.0).unwrap());
        assert_eq!(location.coordinate_type(), CoordinateType::Spherical);
    }

    #[test]
    fn test_write_on() {
        let location = Location::new(Coordinate::spherical(PI / 4.0, PI / 3.0, 2.0).unwrap());
        let mut row = MemoryRow::new();
        location.write_on(&mut row).unwrap();

        assert_eq!(row, spherical_row(2));
    }

    #[test]
    fn test_read_from_replaces_coordinate() {
        let mut location = Location::new(Coordinate::cartesian(0.0, 0.0, 0.0).unwrap());
        location.read_from(&spherical_row(2)).unwrap();

        assert_eq!(location.coordinate_type(), CoordinateType::Spherical);
        let spherical = location.coordinate().as_spherical().unwrap();
        assert_eq!(spherical.phi(), PI / 4.0);
        assert_eq!(spherical.radius(), 2.0);
        assert!(!location.is_dirty());
    }

    #[test]
    fn test_read_from_keeps_write_count() {
        let mut location = Location::new(Coordinate::cartesian(5.0, 5.0, 5.0).unwrap());
        location.set_coordinate(Coordinate::cartesian(6.0, 6.0, 6.0).unwrap());
        assert_eq!(location.write_count(), 1);

        location.read_from(&spherical_row(2)).unwrap();
        assert_eq!(location.write_count(), 1);

        location.reset_write_count();
        location.read_from(&spherical_row(1)).unwrap();
        assert_eq!(location.coordinate_type(), CoordinateType::Cartesian);
        assert!(!location.is_dirty());
    }

    #[test]
    fn test_read_from_unknown_type() {
        let original = Coordinate::cartesian(7.0, 7.0, 7.0).unwrap();
        let mut location = Location::new(original.clone());

        let err = location.read_from(&spherical_row(3)).unwrap_err();
        assert!(matches!(err, CoordinateError::UnknownCoordinateType(3)));
        assert!(location.coordinate().is_same_instance(&original));
        assert!(!location.is_dirty());

        assert!(matches!(
            Location::from_row(&spherical_row(0)),
            Err(CoordinateError::UnknownCoordinateType(0))
        ));
    }

    #[test]
    fn test_read_from_missing_type_column() {
        let mut row = MemoryRow::new();
        row.update_f64(COLUMN_NAME_PARAM_A, 1.0).unwrap();
        row.update_f64(COLUMN_NAME_PARAM_B, 1.0).unwrap();
        row.update_f64(COLUMN_NAME_PARAM_C, 1.0).unwrap();

        assert!(matches!(
            Location::from_row(&row),
            Err(CoordinateError::MissingColumn(column)) if column == COLUMN_NAME_TYPE
        ));
    }

    #[test]
    fn test_read_from_non_finite_value() {
        let mut row = spherical_row(1);
        row.update_f64(COLUMN_NAME_PARAM_B, f64::NAN).unwrap();

        assert!(matches!(
            Location::from_row(&row),
            Err(CoordinateError::InvalidScalar { field: "y", .. })
        ));
    }

    #[test]
    fn test_located_owner() {
        let mut photo = Photo::default();
        assert!(photo.location().is_none());

        let coordinate = Coordinate::spherical(0.0, PI / 2.0, 1.0).unwrap();
        photo.set_location(Location::new(coordinate.clone()));

        let location = photo.location().unwrap();
        assert_eq!(location.coordinate(), &coordinate);
        assert_eq!(
            location.coordinate(),
            &Coordinate::cartesian(1.0, 0.0, 0.0).unwrap()
        );
    }
}
