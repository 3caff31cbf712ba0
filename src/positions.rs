//! # Position records
//!
//! The output side of the pipeline: one [`BodyPosition`] per body and request, built from the
//! coordinate records of each frame the body went through.
//!
//! | Record                     | Frame                                   | Angles              |
//! |----------------------------|-----------------------------------------|---------------------|
//! | [`EclipticCoordinates`]    | orbital (helio- or geocentric) ecliptic | λ, β                |
//! | [`EquatorialCoordinates`]  | geocentric equatorial of date           | RA, Dec             |
//! | [`HorizontalCoordinates`]  | observer's local horizon                | HA, azimuth, alt    |
//! | [`TopocentricCoordinates`] | parallax-corrected, observer-centered   | RA, Dec, alt        |
//!
//! All angles are in degrees; longitudes, right ascensions, hour angles and azimuths lie in
//! `[0, 360)`. Every record is `serde::Serialize`.
use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    bodies::Body,
    constants::{AstronomicalUnit, Degree},
    kepler::{angle_diff, principal_angle},
    orbit_type::OrbitalElements,
    orrery_errors::OrreryError,
    ref_system::{cartesian_to_spherical, spherical_to_cartesian},
    time::EpochOffset,
};

/// Spherical ecliptic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipticCoordinates {
    pub longitude: Degree,
    pub latitude: Degree,
    pub distance: f64,
}

impl EclipticCoordinates {
    pub fn new(longitude: Degree, latitude: Degree, distance: f64) -> Self {
        EclipticCoordinates {
            longitude,
            latitude,
            distance,
        }
    }

    /// Spherical coordinates of a rectangular ecliptic vector.
    pub fn from_cartesian(position: &Vector3<f64>) -> Result<Self, OrreryError> {
        let (longitude, latitude, distance) = cartesian_to_spherical(position)?;
        Ok(EclipticCoordinates::new(longitude, latitude, distance))
    }

    /// Rectangular ecliptic vector `(r·cos λ·cos β, r·sin λ·cos β, r·sin β)`.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        spherical_to_cartesian(self.longitude, self.latitude, self.distance)
    }
}

/// Geocentric equatorial coordinates of date.
///
/// `rectangular` holds `(xe, ye, ze)` in AU; `distance` is its norm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquatorialCoordinates {
    pub rectangular: Vector3<f64>,
    pub right_ascension: Degree,
    pub declination: Degree,
    pub distance: AstronomicalUnit,
}

/// Local horizontal coordinates (azimuth from North through East).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalCoordinates {
    pub hour_angle: Degree,
    pub azimuth: Degree,
    pub altitude: Degree,
}

/// Parallax-corrected position for the observer.
///
/// * `parallax`: horizontal parallax `mpar`, degrees.
/// * `auxiliary_angle`: the angle `g = atan(tan gclat / cos HA)` of the declination correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopocentricCoordinates {
    pub altitude: Degree,
    pub right_ascension: Degree,
    pub declination: Degree,
    pub parallax: Degree,
    pub auxiliary_angle: Degree,
}

/// Apparent position of one body for one request.
///
/// Fields
/// ------
/// * `body`: which body this is.
/// * `epoch`: epoch offset of the request.
/// * `elements`: the orbital elements used, absent for Pluto.
/// * `orbital`: coordinates in the body's own orbital frame, after perturbations:
///   heliocentric for the planets and Pluto (AU), geocentric for the Moon (Earth radii)
///   and for the Sun (AU).
/// * `geocentric`: geocentric ecliptic coordinates (AU). Its longitude is the one charts use.
/// * `equatorial`: geocentric equatorial coordinates.
/// * `horizontal`: local horizontal coordinates.
/// * `topocentric`: parallax-corrected coordinates, always present for the Moon and for the
///   other bodies only in extra-accuracy mode.
/// * `longitude_speed`: rate of the geocentric longitude in degrees per day, when requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyPosition {
    pub body: Body,
    pub epoch: EpochOffset,
    pub elements: Option<OrbitalElements>,
    pub orbital: EclipticCoordinates,
    pub geocentric: EclipticCoordinates,
    pub equatorial: EquatorialCoordinates,
    pub horizontal: HorizontalCoordinates,
    pub topocentric: Option<TopocentricCoordinates>,
    pub longitude_speed: Option<f64>,
}

impl BodyPosition {
    /// Geocentric ecliptic longitude, `[0, 360)` degrees.
    pub fn ecliptic_longitude(&self) -> Degree {
        self.geocentric.longitude
    }

    /// Geocentric ecliptic latitude, degrees.
    pub fn ecliptic_latitude(&self) -> Degree {
        self.geocentric.latitude
    }

    pub fn right_ascension(&self) -> Degree {
        self.equatorial.right_ascension
    }

    pub fn declination(&self) -> Degree {
        self.equatorial.declination
    }

    /// Geocentric distance, in AU.
    pub fn distance(&self) -> AstronomicalUnit {
        self.equatorial.distance
    }

    pub fn azimuth(&self) -> Degree {
        self.horizontal.azimuth
    }

    pub fn altitude(&self) -> Degree {
        self.horizontal.altitude
    }

    pub fn topocentric(&self) -> Option<&TopocentricCoordinates> {
        self.topocentric.as_ref()
    }

    /// `Some(true)` when the body moves backwards along the ecliptic, `None` if the speed
    /// was not computed.
    pub fn is_retrograde(&self) -> Option<bool> {
        self.longitude_speed.map(|speed| speed < 0.0)
    }
}

/// Angular distance between two bodies along the ecliptic, in `[0, 180]` degrees.
///
/// Only the longitudes are compared, as aspect computations do.
pub fn angular_separation(a: &BodyPosition, b: &BodyPosition) -> Degree {
    angle_diff(a.ecliptic_longitude(), b.ecliptic_longitude()).abs()
}

/// Signed elongation of a body from the Sun, in `[−180, 180)` degrees.
///
/// Positive values are east of the Sun (an evening object, or a waxing Moon).
pub fn elongation(body: &BodyPosition, sun: &BodyPosition) -> Degree {
    angle_diff(body.ecliptic_longitude(), sun.ecliptic_longitude())
}

/// Unwrap a longitude change across the 0°/360° seam, in `[−180, 180)` degrees.
pub fn longitude_delta(from: Degree, to: Degree) -> Degree {
    angle_diff(principal_angle(to), principal_angle(from))
}

#[cfg(test)]
pub(crate) mod positions_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    pub(crate) fn position_at(body: Body, longitude: Degree, speed: Option<f64>) -> BodyPosition {
        let ecliptic = EclipticCoordinates::new(longitude, 0.0, 1.0);
        BodyPosition {
            body,
            epoch: EpochOffset::new(0.0),
            elements: None,
            orbital: ecliptic,
            geocentric: ecliptic,
            equatorial: EquatorialCoordinates {
                rectangular: ecliptic.to_cartesian(),
                right_ascension: longitude,
                declination: 0.0,
                distance: 1.0,
            },
            horizontal: HorizontalCoordinates {
                hour_angle: 0.0,
                azimuth: 180.0,
                altitude: 10.0,
            },
            topocentric: None,
            longitude_speed: speed,
        }
    }

    #[test]
    fn test_accessors() {
        let pos = position_at(Body::Mars, 123.0, Some(-0.2));
        assert_eq!(pos.ecliptic_longitude(), 123.0);
        assert_eq!(pos.ecliptic_latitude(), 0.0);
        assert_eq!(pos.right_ascension(), 123.0);
        assert_eq!(pos.distance(), 1.0);
        assert_eq!(pos.azimuth(), 180.0);
        assert_eq!(pos.altitude(), 10.0);
        assert!(pos.topocentric().is_none());
        assert_eq!(pos.is_retrograde(), Some(true));

        assert_eq!(position_at(Body::Mars, 1.0, Some(0.5)).is_retrograde(), Some(false));
        assert_eq!(position_at(Body::Mars, 1.0, None).is_retrograde(), None);
    }

    #[test]
    fn test_separation_across_the_seam() {
        let a = position_at(Body::Venus, 355.0, None);
        let b = position_at(Body::Mars, 5.0, None);
        assert_abs_diff_eq!(angular_separation(&a, &b), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angular_separation(&b, &a), 10.0, epsilon = 1e-12);

        let opposite = position_at(Body::Jupiter, 185.0, None);
        assert_abs_diff_eq!(angular_separation(&b, &opposite), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_elongation_sign() {
        let sun = position_at(Body::Sun, 280.0, None);
        let evening = position_at(Body::Venus, 310.0, None);
        let morning = position_at(Body::Mercury, 262.0, None);
        assert_abs_diff_eq!(elongation(&evening, &sun), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(elongation(&morning, &sun), -18.0, epsilon = 1e-12);
    }

    #[test]
    fn test_longitude_delta() {
        assert_abs_diff_eq!(longitude_delta(359.5, 0.5), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(longitude_delta(0.5, 359.5), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_round_trip() {
        let ecl = EclipticCoordinates::new(200.0, -3.0, 5.2);
        let back = EclipticCoordinates::from_cartesian(&ecl.to_cartesian()).unwrap();
        assert_abs_diff_eq!(back.longitude, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.latitude, -3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.distance, 5.2, epsilon = 1e-12);
    }
}
