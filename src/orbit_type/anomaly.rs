use serde::Serialize;

use crate::{
    constants::Degree,
    kepler::{atan2d, cosd, principal_angle, sind},
};

/// Position of a body along its ellipse.
///
/// * `eccentric_anomaly`: E, degrees.
/// * `true_anomaly`: v, degrees in `[0, 360)`.
/// * `radius`: distance to the primary, same unit as the semi-major axis.
/// * `iterations`: Newton steps spent on E (0 for the closed form).
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct AnomalySolution {
    pub eccentric_anomaly: Degree,
    pub true_anomaly: Degree,
    pub radius: f64,
    pub iterations: usize,
}

impl AnomalySolution {
    /// Derive the true anomaly and the radius from the eccentric anomaly.
    pub fn from_eccentric_anomaly(
        eccentric_anomaly: Degree,
        semi_major_axis: f64,
        eccentricity: f64,
        iterations: usize,
    ) -> Self {
        let xv = semi_major_axis * (cosd(eccentric_anomaly) - eccentricity);
        let yv = semi_major_axis
            * ((1.0 - eccentricity * eccentricity).sqrt() * sind(eccentric_anomaly));

        AnomalySolution {
            eccentric_anomaly,
            true_anomaly: principal_angle(atan2d(yv, xv)),
            radius: xv.hypot(yv),
            iterations,
        }
    }
}
