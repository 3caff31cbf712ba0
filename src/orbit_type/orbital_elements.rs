use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    constants::Degree,
    kepler::{cosd, principal_angle, sind, solve_kepler, KeplerSettings},
    orbit_type::AnomalySolution,
    orrery_errors::OrreryError,
    time::EpochOffset,
};

/// Osculating orbital elements of a body at an epoch offset.
///
/// Units
/// -----
/// * `reference_epoch`: epoch offset `d` the elements were evaluated at.
/// * `ascending_node_longitude`: degrees (N).
/// * `inclination`: degrees (i).
/// * `periapsis_argument`: degrees (w).
/// * `semi_major_axis`: AU, or Earth radii for the Moon (a).
/// * `eccentricity`: unitless (e).
/// * `mean_anomaly`: degrees (M).
///
/// Notes
/// -----
/// Angles are normalized into `[0, 360)` by [`OrbitalElements::new`]. The elements are
/// computed fresh for each request and never mutated afterwards.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct OrbitalElements {
    pub reference_epoch: EpochOffset,
    pub ascending_node_longitude: Degree,
    pub inclination: Degree,
    pub periapsis_argument: Degree,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub mean_anomaly: Degree,
}

impl OrbitalElements {
    /// Build an element set, normalizing the three angles that grow with time.
    ///
    /// Arguments
    /// ---------
    /// * `reference_epoch` – Epoch offset of validity.
    /// * `n` – Longitude of the ascending node (degrees).
    /// * `i` – Inclination (degrees).
    /// * `w` – Argument of perihelion (degrees).
    /// * `a` – Semi-major axis.
    /// * `e` – Eccentricity.
    /// * `m` – Mean anomaly (degrees).
    pub fn new(reference_epoch: EpochOffset, n: f64, i: f64, w: f64, a: f64, e: f64, m: f64) -> Self {
        OrbitalElements {
            reference_epoch,
            ascending_node_longitude: principal_angle(n),
            inclination: i,
            periapsis_argument: principal_angle(w),
            semi_major_axis: a,
            eccentricity: e,
            mean_anomaly: principal_angle(m),
        }
    }

    /// Mean longitude `L = M + w + N`, in `[0, 360)`.
    pub fn mean_longitude(&self) -> Degree {
        principal_angle(self.mean_anomaly + self.periapsis_argument + self.ascending_node_longitude)
    }

    /// Solve Kepler's equation and locate the body in its orbital plane.
    ///
    /// Return
    /// ------
    /// * The [`AnomalySolution`] `(E, v, r)`, where
    ///   `xv = a·(cos E − e)`, `yv = a·√(1−e²)·sin E`, `v = atan2(yv, xv)`, `r = √(xv² + yv²)`.
    ///
    /// Errors
    /// ------
    /// * Any error of [`solve_kepler`], and [`OrreryError::InvalidInput`] for a
    ///   non-positive semi-major axis.
    pub fn solve_anomaly(&self, settings: &KeplerSettings) -> Result<AnomalySolution, OrreryError> {
        if self.semi_major_axis.is_nan() || self.semi_major_axis <= 0.0 {
            return Err(OrreryError::InvalidInput {
                name: "semi-major axis",
                value: self.semi_major_axis,
            });
        }
        let solution = solve_kepler(self.mean_anomaly, self.eccentricity, settings)?;
        Ok(AnomalySolution::from_eccentric_anomaly(
            solution.eccentric_anomaly,
            self.semi_major_axis,
            self.eccentricity,
            solution.iterations,
        ))
    }

    /// Rotate the orbital-plane position into rectangular ecliptic coordinates.
    ///
    /// ```text
    /// xh = r·(cos N·cos(v+w) − sin N·sin(v+w)·cos i)
    /// yh = r·(sin N·cos(v+w) + cos N·sin(v+w)·cos i)
    /// zh = r·sin(v+w)·sin i
    /// ```
    pub fn ecliptic_position(&self, anomaly: &AnomalySolution) -> Vector3<f64> {
        let u = anomaly.true_anomaly + self.periapsis_argument;
        let (sin_n, cos_n) = (sind(self.ascending_node_longitude), cosd(self.ascending_node_longitude));
        let (sin_u, cos_u) = (sind(u), cosd(u));
        let (sin_i, cos_i) = (sind(self.inclination), cosd(self.inclination));

        anomaly.radius
            * Vector3::new(
                cos_n * cos_u - sin_n * sin_u * cos_i,
                sin_n * cos_u + cos_n * sin_u * cos_i,
                sin_u * sin_i,
            )
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Orbital Elements @ epoch offset (days): {:.6}",
            self.reference_epoch.days()
        )?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  N   (longitude of node)     = {:.6}°", self.ascending_node_longitude)?;
        writeln!(f, "  i   (inclination)           = {:.6}°", self.inclination)?;
        writeln!(f, "  w   (argument of perihelion)= {:.6}°", self.periapsis_argument)?;
        writeln!(f, "  a   (semi-major axis)       = {:.6}", self.semi_major_axis)?;
        writeln!(f, "  e   (eccentricity)          = {:.6}", self.eccentricity)?;
        writeln!(f, "  M   (mean anomaly)          = {:.6}°", self.mean_anomaly)
    }
}
