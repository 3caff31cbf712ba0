//! # Sun model
//!
//! The Sun is computed first in every request: its rectangular ecliptic position
//! `(xs, ys, 0)` is the offset that turns a heliocentric position into a geocentric one,
//! and its mean elements drive the sidereal time.
//!
//! The Sun's eccentricity (~0.0167) is small enough that the single closed-form step of
//! [`closed_form_eccentric_anomaly`] is used directly, without Newton iterations.
use nalgebra::Vector3;
use serde::Serialize;
use tracing::trace;

use crate::{
    constants::{AstronomicalUnit, Degree},
    kepler::{closed_form_eccentric_anomaly, cosd, principal_angle, sind},
    orbit_type::{AnomalySolution, OrbitalElements},
    orrery_errors::{ensure_finite, OrreryError},
    time::EpochOffset,
};

/// Mean orbital elements of the Sun (i.e. of the Earth's orbit, seen from the Earth).
///
/// ```text
/// N = 0, i = 0, a = 1
/// w = 282.9404 + 4.70935e-5·d
/// e = 0.016709 − 1.151e-9·d
/// M = 356.0470 + 0.9856002585·d
/// ```
pub fn sun_elements(d: EpochOffset) -> OrbitalElements {
    let t = d.days();
    OrbitalElements::new(
        d,
        0.0,
        0.0,
        282.9404 + 4.70935e-5 * t,
        1.0,
        0.016709 - 1.151e-9 * t,
        356.0470 + 0.9856002585 * t,
    )
}

/// The Sun's orbit at one epoch offset, shared read-only by every body of a request.
///
/// Fields
/// ------
/// * `elements`: the Sun's mean elements.
/// * `anomaly`: closed-form eccentric anomaly, true anomaly and distance (AU).
/// * `longitude`: true ecliptic longitude `v + w`, degrees in `[0, 360)`.
/// * `position`: geocentric rectangular ecliptic position `(xs, ys, 0)`, AU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunOrbit {
    pub elements: OrbitalElements,
    pub anomaly: AnomalySolution,
    pub longitude: Degree,
    pub position: Vector3<f64>,
}

impl SunOrbit {
    /// Compute the Sun's orbit at `d`.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::UnsupportedEccentricity`] once the eccentricity drift leaves
    ///   `[0, 1)` (beyond roughly 40 000 years from 2000).
    /// * [`OrreryError::NonFinite`] if `d` is so large that the orbit degenerates.
    pub fn at(d: EpochOffset) -> Result<Self, OrreryError> {
        let elements = sun_elements(d);
        let e = elements.eccentricity;
        if !(0.0..1.0).contains(&e) {
            return Err(OrreryError::UnsupportedEccentricity(e));
        }

        let eccentric_anomaly = closed_form_eccentric_anomaly(elements.mean_anomaly, e);
        let anomaly =
            AnomalySolution::from_eccentric_anomaly(eccentric_anomaly, elements.semi_major_axis, e, 0);

        let longitude = principal_angle(anomaly.true_anomaly + elements.periapsis_argument);
        let position = Vector3::new(
            anomaly.radius * cosd(longitude),
            anomaly.radius * sind(longitude),
            0.0,
        );
        ensure_finite("sun orbit", &[anomaly.radius, longitude])?;

        trace!(
            d = d.days(),
            longitude,
            distance = anomaly.radius,
            "Sun orbit computed"
        );

        Ok(SunOrbit {
            elements,
            anomaly,
            longitude,
            position,
        })
    }

    /// Geocentric distance of the Sun, in AU.
    pub fn distance(&self) -> AstronomicalUnit {
        self.anomaly.radius
    }

    /// Mean longitude `Ls = M + w`, in `[0, 360)`.
    pub fn mean_longitude(&self) -> Degree {
        principal_angle(self.elements.mean_anomaly + self.elements.periapsis_argument)
    }
}
