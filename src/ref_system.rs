//! # Frame transforms
//!
//! Rotations and coordinate conversions between the frames a position goes through:
//!
//! ```text
//! ecliptic (rectangular) --rotate about X by ε--> equatorial (rectangular)
//!   |                                               |
//!   v                                               v
//! (lon, lat, r)                                  (RA, Dec, range) --hour angle, latitude--> (az, alt)
//!                                                                  \--parallax--> topocentric (RA, Dec, alt)
//! ```
//!
//! All angles are in **degrees** except the argument of [`rotmt`], which follows
//! `nalgebra`'s radians.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{Degree, Radian, DEG_PER_HOUR, EARTH_RADII_PER_AU, RADEG},
    kepler::{asind, atan2d, atand, cosd, principal_angle, sind, tand},
    observers::Observer,
    orrery_errors::{ensure_finite, OrreryError},
    positions::{HorizontalCoordinates, TopocentricCoordinates},
    time::SiderealTime,
};

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// The matrix performs an **active rotation** of a vector by `alpha` in the direct
/// (counter-clockwise) sense around the chosen axis.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `k` - Index of the axis of rotation: `0` → X, `1` → Y, `2` → Z.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
///
/// # See also
/// * [`ecliptic_to_equatorial`] – rotation about X by the obliquity
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("invalid rotation axis index {k} (must be 0, 1 or 2)"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotate a rectangular ecliptic vector into the equatorial frame.
///
/// ```text
/// xe = xg
/// ye = yg·cos ε − zg·sin ε
/// ze = yg·sin ε + zg·cos ε
/// ```
///
/// Arguments
/// ---------
/// * `ecliptic`: rectangular ecliptic vector (any length unit).
/// * `obliquity`: obliquity of the ecliptic ε, in degrees.
pub fn ecliptic_to_equatorial(ecliptic: &Vector3<f64>, obliquity: Degree) -> Vector3<f64> {
    rotmt(obliquity * RADEG, 0) * ecliptic
}

/// Rectangular vector from spherical coordinates in degrees.
pub fn spherical_to_cartesian(longitude: Degree, latitude: Degree, radius: f64) -> Vector3<f64> {
    let cos_lat = cosd(latitude);
    radius * Vector3::new(cosd(longitude) * cos_lat, sind(longitude) * cos_lat, sind(latitude))
}

/// Spherical coordinates of a rectangular vector.
///
/// Arguments
/// ---------
/// * `position`: rectangular vector, in an ecliptic or equatorial frame.
///
/// Return
/// ------
/// * `(λ, β, ρ)`: longitude (or right ascension) in `[0, 360)` degrees, latitude (or
///   declination) in `[−90, 90]` degrees, and the vector norm.
///
/// Remarks
/// -------
/// * The latitude is taken as `atan2(z, √(x² + y²))`, which stays well-conditioned at the
///   poles where `asin(z/ρ)` would lose precision.
/// * A zero vector yields `(0, 0, 0)`.
///
/// Errors
/// ------
/// * [`OrreryError::NonFinite`] if a component of the vector is NaN or infinite.
pub fn cartesian_to_spherical(position: &Vector3<f64>) -> Result<(Degree, Degree, f64), OrreryError> {
    ensure_finite("spherical conversion", position.as_slice())?;

    let norm = position.norm();
    if norm == 0.0 {
        return Ok((0.0, 0.0, 0.0));
    }

    let longitude = principal_angle(atan2d(position.y, position.x));
    let latitude = atan2d(position.z, position.x.hypot(position.y));
    Ok((longitude, latitude, norm))
}

/// Right ascension, declination and range of an equatorial rectangular vector.
///
/// Return
/// ------
/// * `(α, δ, ρ)` with `α ∈ [0, 360)` and `δ ∈ [−90, 90]` degrees.
///
/// # See also
/// * [`cartesian_to_spherical`] – the underlying conversion
pub fn cartesian_to_radec(equatorial: &Vector3<f64>) -> Result<(Degree, Degree, f64), OrreryError> {
    cartesian_to_spherical(equatorial)
}

/// Local hour angle of a body, in `[0, 360)` degrees: `HA = 15·LST − RA`.
pub fn hour_angle(sidereal: &SiderealTime, right_ascension: Degree) -> Degree {
    principal_angle(sidereal.lst * DEG_PER_HOUR - right_ascension)
}

/// Convert an equatorial direction into azimuth and altitude for an observer.
///
/// Arguments
/// ---------
/// * `hour_angle`: local hour angle, in degrees.
/// * `declination`: declination, in degrees.
/// * `latitude`: observer's geodetic latitude φ, in degrees.
///
/// Details
/// -------
/// ```text
/// x = cos HA·cos δ,  y = sin HA·cos δ,  z = sin δ
/// xhor = x·sin φ − z·cos φ
/// yhor = y
/// zhor = x·cos φ + z·sin φ
/// az   = atan2(yhor, xhor) + 180°
/// alt  = asin(zhor)
/// ```
/// Azimuth is measured from North through East.
///
/// Errors
/// ------
/// * [`OrreryError::DomainError`] if `zhor` leaves `[−1, 1]`.
/// * [`OrreryError::NonFinite`] on NaN inputs.
pub fn equatorial_to_horizontal(
    hour_angle: Degree,
    declination: Degree,
    latitude: Degree,
) -> Result<HorizontalCoordinates, OrreryError> {
    let x = cosd(hour_angle) * cosd(declination);
    let y = sind(hour_angle) * cosd(declination);
    let z = sind(declination);

    let xhor = x * sind(latitude) - z * cosd(latitude);
    let yhor = y;
    let zhor = x * cosd(latitude) + z * sind(latitude);
    ensure_finite("horizontal rotation", &[xhor, yhor, zhor])?;

    Ok(HorizontalCoordinates {
        hour_angle: principal_angle(hour_angle),
        azimuth: principal_angle(atan2d(yhor, xhor) + 180.0),
        altitude: asind(zhor, "altitude")?,
    })
}

/// Horizontal parallax of a body, in degrees: `asin(1 / ρ)` with ρ in Earth radii.
///
/// Arguments
/// ---------
/// * `range`: geocentric distance of the body, in AU.
///
/// Errors
/// ------
/// * [`OrreryError::DomainError`] if the body would sit inside the Earth (ρ < 1 Earth radius).
pub fn horizontal_parallax(range: f64) -> Result<Degree, OrreryError> {
    asind(1.0 / (range * EARTH_RADII_PER_AU), "parallax")
}

/// Correct a geocentric position for the observer's offset from the Earth's center.
///
/// Arguments
/// ---------
/// * `right_ascension`, `declination`: geocentric equatorial direction, degrees.
/// * `range`: geocentric distance, AU.
/// * `horizontal`: geocentric horizontal coordinates of the same body.
/// * `observer`: the observer, for its geocentric latitude and Earth radius.
///
/// Details
/// -------
/// ```text
/// mpar      = asin(1/ρ)                   (ρ in Earth radii)
/// alt_topoc = alt − mpar·cos alt
/// gclat     = φ − 0.1924°·sin 2φ
/// rho       = 0.99833 + 0.00167·cos 2φ
/// g         = atan(tan gclat / cos HA)
/// topRA     = RA  − mpar·rho·cos gclat·sin HA / cos Dec
/// topDec    = Dec − mpar·rho·sin gclat·sin(g − Dec) / sin g
/// ```
/// `topDec` is ill-conditioned when `sin g` vanishes (observer on the equator, or body on
/// the meridian with `gclat = 0`). In that case the equivalent limit
/// `Dec − mpar·rho·sin(−Dec)·cos HA` is used.
///
/// Errors
/// ------
/// * Any error of [`horizontal_parallax`], and [`OrreryError::NonFinite`] if the corrected
///   direction degenerates (e.g. a body exactly at a celestial pole).
pub fn topocentric_correction(
    right_ascension: Degree,
    declination: Degree,
    range: f64,
    horizontal: &HorizontalCoordinates,
    observer: &Observer,
) -> Result<TopocentricCoordinates, OrreryError> {
    const DEGENERATE_SIN_G: f64 = 1e-9;

    let mpar = horizontal_parallax(range)?;
    let altitude = horizontal.altitude - mpar * cosd(horizontal.altitude);

    let gclat = observer.geocentric_latitude();
    let rho = observer.rho();
    let ha = horizontal.hour_angle;

    let g = atand(tand(gclat) / cosd(ha));

    let top_ra = right_ascension - mpar * rho * cosd(gclat) * sind(ha) / cosd(declination);
    let top_dec = if sind(g).abs() > DEGENERATE_SIN_G {
        declination - mpar * rho * sind(gclat) * sind(g - declination) / sind(g)
    } else {
        declination - mpar * rho * sind(-declination) * cosd(ha)
    };
    ensure_finite("topocentric correction", &[altitude, top_ra, top_dec])?;

    Ok(TopocentricCoordinates {
        altitude,
        right_ascension: principal_angle(top_ra),
        declination: top_dec,
        parallax: mpar,
        auxiliary_angle: g,
    })
}
