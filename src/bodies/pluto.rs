//! # Pluto model
//!
//! Pluto's orbit is too strongly perturbed by Neptune for a single set of mean elements to
//! follow it. Its heliocentric ecliptic position is instead read off a fitted trigonometric
//! series in two slowly varying angles,
//!
//! ```text
//! S = 50.03  + 0.033459652·d   (Saturn-like mean anomaly)
//! P = 238.95 + 0.003968789·d   (Pluto mean anomaly)
//! ```
//!
//! valid for roughly 1800–2100. The result then joins the common pipeline at the
//! rectangular conversion step and is treated as any other heliocentric body.
use crate::{
    constants::Degree,
    kepler::{cosd, principal_angle, sind},
    positions::EclipticCoordinates,
    time::EpochOffset,
};

/// The two arguments `(S, P)` of the series, in degrees.
pub fn series_arguments(d: EpochOffset) -> (Degree, Degree) {
    let t = d.days();
    (50.03 + 0.033459652 * t, 238.95 + 0.003968789 * t)
}

/// Heliocentric ecliptic coordinates of Pluto at `d`.
///
/// Return
/// ------
/// * Longitude in `[0, 360)` and latitude in degrees, distance in AU.
pub fn heliocentric_position(d: EpochOffset) -> EclipticCoordinates {
    let (s, p) = series_arguments(d);

    let longitude = 238.9508 + 0.00400703 * d.days() - 19.799 * sind(p) + 19.848 * cosd(p)
        + 0.897 * sind(2.0 * p)
        - 4.956 * cosd(2.0 * p)
        + 0.610 * sind(3.0 * p)
        + 1.211 * cosd(3.0 * p)
        - 0.341 * sind(4.0 * p)
        - 0.190 * cosd(4.0 * p)
        + 0.128 * sind(5.0 * p)
        - 0.034 * cosd(5.0 * p)
        - 0.038 * sind(6.0 * p)
        + 0.031 * cosd(6.0 * p)
        + 0.020 * sind(s - p)
        - 0.010 * cosd(s - p);

    let latitude = -3.9082 - 5.453 * sind(p) - 14.975 * cosd(p) + 3.527 * sind(2.0 * p)
        + 1.673 * cosd(2.0 * p)
        - 1.051 * sind(3.0 * p)
        + 0.328 * cosd(3.0 * p)
        + 0.179 * sind(4.0 * p)
        - 0.292 * cosd(4.0 * p)
        + 0.019 * sind(5.0 * p)
        + 0.100 * cosd(5.0 * p)
        - 0.031 * sind(6.0 * p)
        - 0.026 * cosd(6.0 * p)
        + 0.011 * cosd(s - p);

    let distance = 40.72 + 6.68 * sind(p) + 6.90 * cosd(p) - 1.18 * sind(2.0 * p)
        - 0.03 * cosd(2.0 * p)
        + 0.15 * sind(3.0 * p)
        - 0.14 * cosd(3.0 * p);

    EclipticCoordinates::new(principal_angle(longitude), latitude, distance)
}
