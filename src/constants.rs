//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **unit
//! aliases** used throughout the `orrery` library.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ radians) and the `180/π` factor of the degree-based
//!   Kepler equation
//! - The reference instant of the epoch offset `d`
//! - Earth figure constants used for parallax and topocentric corrections
//! - Kepler solver defaults
//!
//! All orbital formulas in the crate work in **degrees**; radians only appear at the
//! boundary of the trigonometric helpers in [`crate::kepler`].

// -------------------------------------------------------------------------------------------------
// Angle conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees (the `180/π` factor of Kepler's equation written in degrees)
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Degrees in a full turn
pub const FULL_TURN: f64 = 360.0;

/// Degrees of Earth rotation per sidereal hour
pub const DEG_PER_HOUR: f64 = 15.0;

// -------------------------------------------------------------------------------------------------
// Time
// -------------------------------------------------------------------------------------------------

/// Julian Date of the reference instant of the epoch offset `d`
/// (1999-12-31T00:00:00 UTC, i.e. day 0.0 of January 2000)
pub const EPOCH_OFFSET_JD: f64 = 2_451_543.5;

/// Number of hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;

// -------------------------------------------------------------------------------------------------
// Earth figure
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Earth equatorial radius in kilometers (GRS1980/WGS84)
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.137;

/// Number of Earth equatorial radii in one astronomical unit
pub const EARTH_RADII_PER_AU: f64 = AU / EARTH_EQUATORIAL_RADIUS_KM;

/// Amplitude of the geodetic → geocentric latitude correction, in degrees
pub const GEOCENTRIC_LATITUDE_CORRECTION: Degree = 0.1924;

// -------------------------------------------------------------------------------------------------
// Obliquity of the ecliptic
// -------------------------------------------------------------------------------------------------

/// Obliquity of the ecliptic at `d = 0`, in degrees
pub const OBLIQUITY_AT_EPOCH: Degree = 23.4393;

/// Linear drift of the obliquity, in degrees per day
pub const OBLIQUITY_RATE: Degree = 3.563e-7;

// -------------------------------------------------------------------------------------------------
// Kepler solver
// -------------------------------------------------------------------------------------------------

/// Eccentricity at or below which the closed-form eccentric anomaly is used without iterating
pub const KEPLER_CLOSED_FORM_MAX_ECC: f64 = 0.006;

/// Default convergence threshold of the Newton iteration, in degrees
pub const KEPLER_TOLERANCE: Degree = 0.0005;

/// Default iteration bound of the Newton iteration
pub const KEPLER_MAX_ITERATIONS: usize = 30;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Time or angle in hours
pub type Hour = f64;
/// Continuous count of days
pub type Days = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
