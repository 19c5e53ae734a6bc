//! Coordinate Information Tool
//!
//! Prints a point in both Cartesian and spherical form together with the row
//! its location would be persisted as. Given a second point, also prints the
//! distance, the central angle and whether both points are equal.
//!
//! Usage:
//!   cargo run --bin coord_info -- cartesian 1 0 0 --other 0 1 0
//!   cargo run --bin coord_info -- spherical --degrees 90 45 2 --json

use clap::{Parser, ValueEnum};
use geolocus::constants::{DEG2RAD, RAD2DEG};
use geolocus::{Coordinate, Location, MemoryRow};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Representation the three components are given in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// x, y, z
    Cartesian,
    /// phi, theta, radius
    Spherical,
}

/// Coordinate Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts a coordinate between Cartesian and spherical form and compares it to another",
    long_about = None
)]
struct Args {
    /// Representation of the point
    #[arg(value_enum)]
    kind: Kind,

    /// x, or phi
    #[arg(allow_negative_numbers = true)]
    a: f64,

    /// y, or theta
    #[arg(allow_negative_numbers = true)]
    b: f64,

    /// z, or radius
    #[arg(allow_negative_numbers = true)]
    c: f64,

    /// Read and print spherical angles in degrees
    #[arg(short, long)]
    degrees: bool,

    /// Second point to measure against
    #[arg(long, num_args = 3, value_names = ["A", "B", "C"], allow_negative_numbers = true)]
    other: Option<Vec<f64>>,

    /// Representation of the second point
    #[arg(long, value_enum, default_value_t = Kind::Cartesian)]
    other_kind: Kind,

    /// Print the coordinates and the persisted location row as JSON
    #[arg(long)]
    json: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{}: {}", name, value);
}

fn build_coordinate(kind: Kind, a: f64, b: f64, c: f64, degrees: bool) -> Result<Coordinate> {
    let coordinate = match kind {
        Kind::Cartesian => Coordinate::cartesian(a, b, c)?,
        Kind::Spherical if degrees => Coordinate::spherical(a * DEG2RAD, b * DEG2RAD, c)?,
        Kind::Spherical => Coordinate::spherical(a, b, c)?,
    };
    Ok(coordinate)
}

/// Displays both representations of a coordinate
fn display_coordinate(
    title: &str,
    coordinate: &Coordinate,
    degrees: bool,
    json: bool,
) -> Result<()> {
    print_section_header(title);

    let cartesian = coordinate.as_cartesian()?;
    let spherical = coordinate.as_spherical()?;
    if json {
        let document = serde_json::json!({
            "type": coordinate.coordinate_type(),
            "cartesian": &*cartesian,
            "spherical": &*spherical,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    print_named_value("Type", format!("{:?}", coordinate.coordinate_type()));
    print_named_value(
        "Cartesian",
        format!("x={:.6}, y={:.6}, z={:.6}", cartesian.x(), cartesian.y(), cartesian.z()),
    );

    let unit = if degrees { "°" } else { " rad" };
    let scale = if degrees { RAD2DEG } else { 1.0 };
    print_named_value(
        "Spherical",
        format!(
            "phi={:.6}{unit}, theta={:.6}{unit}, radius={:.6}",
            spherical.phi() * scale,
            spherical.theta() * scale,
            spherical.radius(),
        ),
    );
    Ok(())
}

/// Displays distance, central angle and equality between two coordinates
fn display_comparison(first: &Coordinate, second: &Coordinate) -> Result<()> {
    print_section_header("Comparison");
    print_named_value("Distance", format!("{:.6}", first.cartesian_distance(second)?));

    let angle = first.central_angle(second)?;
    print_named_value(
        "Central angle",
        format!("{:.6} rad ({:.4}°)", angle, angle * RAD2DEG),
    );
    print_named_value("Equal", first.is_equal(Some(second)));
    print_named_value("Same instance", first.is_same_instance(second));
    Ok(())
}

/// Displays the row the coordinate would be stored as
fn display_row(coordinate: &Coordinate, json: bool) -> Result<()> {
    let mut row = MemoryRow::new();
    Location::new(coordinate.clone()).write_on(&mut row)?;

    print_section_header("Persisted Row");
    if json {
        println!("{}", row.to_json()?);
    } else {
        for column in [
            geolocus::location::COLUMN_NAME_TYPE,
            geolocus::location::COLUMN_NAME_PARAM_A,
            geolocus::location::COLUMN_NAME_PARAM_B,
            geolocus::location::COLUMN_NAME_PARAM_C,
        ] {
            if let Some(value) = row.value(column) {
                print_named_value(column, format!("{:?}", value));
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let first = build_coordinate(args.kind, args.a, args.b, args.c, args.degrees)?;
    display_coordinate("Point", &first, args.degrees, args.json)?;
    display_row(&first, args.json)?;

    if let Some(other) = &args.other {
        let [a, b, c] = other.as_slice() else {
            return Err("--other takes exactly three values".into());
        };
        let second = build_coordinate(args.other_kind, *a, *b, *c, args.degrees)?;
        display_coordinate("Other Point", &second, args.degrees, args.json)?;
        display_comparison(&first, &second)?;
    }

    Ok(())
}
