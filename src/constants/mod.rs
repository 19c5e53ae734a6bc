//! Constants module for coordinate calculations

use std::f64::consts::PI;

// Comparison
/// Grid spacing used when normalizing doubles for equality and hashing
pub const COMPARE_ACCURACY: f64 = 1e-6;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Right angle in radians, the latitude of the pole
pub const QUARTER_TURN: f64 = PI / 2.0;
