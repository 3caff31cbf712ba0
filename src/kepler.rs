use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{
    Degree, DEGRAD, FULL_TURN, KEPLER_CLOSED_FORM_MAX_ECC, KEPLER_MAX_ITERATIONS,
    KEPLER_TOLERANCE, RADEG,
};
use crate::orrery_errors::OrreryError;

/// Sine of an angle given in degrees.
#[inline]
pub fn sind(x: Degree) -> f64 {
    (x * RADEG).sin()
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn cosd(x: Degree) -> f64 {
    (x * RADEG).cos()
}

/// Tangent of an angle given in degrees.
#[inline]
pub fn tand(x: Degree) -> f64 {
    (x * RADEG).tan()
}

/// Four-quadrant arctangent, in degrees.
#[inline]
pub fn atan2d(y: f64, x: f64) -> Degree {
    y.atan2(x) * DEGRAD
}

/// Arctangent, in degrees.
#[inline]
pub fn atand(x: f64) -> Degree {
    x.atan() * DEGRAD
}

/// Arcsine in degrees, checked against the `[-1, 1]` domain.
///
/// Arguments exceeding the domain by less than `1e-12` (rounding noise at the poles)
/// are clamped; anything further out is a [`OrreryError::DomainError`] tagged with `stage`.
pub fn asind(x: f64, stage: &'static str) -> Result<Degree, OrreryError> {
    const ROUNDING_SLACK: f64 = 1e-12;

    if !x.is_finite() {
        return Err(OrreryError::NonFinite(stage));
    }
    if x.abs() > 1.0 + ROUNDING_SLACK {
        return Err(OrreryError::DomainError { stage, value: x });
    }
    Ok(x.clamp(-1.0, 1.0).asin() * DEGRAD)
}

/// Return the principal value of an angle in degrees, in `[0, 360)`.
pub fn principal_angle(a: Degree) -> Degree {
    let r = a.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if r >= FULL_TURN {
        0.0
    } else {
        r
    }
}

/// Return the signed difference `a - b` between two angles in degrees, in `[-180, 180)`.
pub fn angle_diff(a: Degree, b: Degree) -> Degree {
    let diff = principal_angle(a - b);
    if diff >= 180.0 {
        diff - FULL_TURN
    } else {
        diff
    }
}

/// Convergence controls of the Newton iteration on Kepler's equation.
///
/// Fields
/// ------
/// * `tolerance`: stop once two successive eccentric anomalies differ by less than this (degrees).
/// * `max_iterations`: iteration bound; exhausting it yields [`OrreryError::KeplerNonConvergence`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeplerSettings {
    pub tolerance: Degree,
    pub max_iterations: usize,
}

impl Default for KeplerSettings {
    fn default() -> Self {
        KeplerSettings {
            tolerance: KEPLER_TOLERANCE,
            max_iterations: KEPLER_MAX_ITERATIONS,
        }
    }
}

/// Eccentric anomaly returned by [`solve_kepler`], with the number of Newton steps it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: Degree,
    pub iterations: usize,
}

/// Closed-form first-order eccentric anomaly, in degrees.
///
/// `E = M + (180/π)·e·sin(M)·(1 + e·cos(M))`
///
/// Accurate enough on its own for near-circular orbits, and the starting point of the
/// Newton iteration otherwise.
pub fn closed_form_eccentric_anomaly(mean_anomaly: Degree, eccentricity: f64) -> Degree {
    mean_anomaly
        + DEGRAD
            * eccentricity
            * sind(mean_anomaly)
            * (1.0 + eccentricity * cosd(mean_anomaly))
}

/// Solve Kepler's equation `M = E − (180/π)·e·sin(E)` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in degrees.
/// * `eccentricity`: eccentricity `e`, in `[0, 1)`.
/// * `settings`: tolerance and iteration bound of the Newton loop.
///
/// Return
/// ------
/// * The eccentric anomaly `E` in degrees (same revolution as `M`) and the number of
///   Newton steps performed.
///
/// Details
/// -------
/// For `e ≤ 0.006` the closed-form value of [`closed_form_eccentric_anomaly`] is returned
/// without iterating. Otherwise Newton's method starts from that value and stops when
/// `|E_n − E_{n−1}| < tolerance`.
///
/// The function `f(E) = E − (180/π)·e·sin(E) − M` is strictly increasing for `e < 1` and its
/// root lies in `[M − (180/π)·e, M + (180/π)·e]`. The iteration keeps that bracket up to date and
/// falls back to bisection whenever a Newton step would leave it, so it cannot diverge or cycle.
///
/// Errors
/// ------
/// * [`OrreryError::InvalidInput`] if `M` or `e` is not finite.
/// * [`OrreryError::UnsupportedEccentricity`] if `e ∉ [0, 1)`.
/// * [`OrreryError::KeplerNonConvergence`] if the bound is exhausted.
pub fn solve_kepler(
    mean_anomaly: Degree,
    eccentricity: f64,
    settings: &KeplerSettings,
) -> Result<KeplerSolution, OrreryError> {
    if !mean_anomaly.is_finite() {
        return Err(OrreryError::InvalidInput {
            name: "mean anomaly",
            value: mean_anomaly,
        });
    }
    if !eccentricity.is_finite() {
        return Err(OrreryError::InvalidInput {
            name: "eccentricity",
            value: eccentricity,
        });
    }
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(OrreryError::UnsupportedEccentricity(eccentricity));
    }

    let first_guess = closed_form_eccentric_anomaly(mean_anomaly, eccentricity);
    if eccentricity <= KEPLER_CLOSED_FORM_MAX_ECC {
        return Ok(KeplerSolution {
            eccentric_anomaly: first_guess,
            iterations: 0,
        });
    }

    let span = DEGRAD * eccentricity;
    let mut lower = mean_anomaly - span;
    let mut upper = mean_anomaly + span;
    let mut e0 = first_guess.clamp(lower, upper);

    for iteration in 1..=settings.max_iterations {
        let e1 = e0;
        let residual = e1 - DEGRAD * eccentricity * sind(e1) - mean_anomaly;

        if residual > 0.0 {
            upper = e1;
        } else {
            lower = e1;
        }

        let newton = e1 - residual / (1.0 - eccentricity * cosd(e1));
        e0 = if (lower..=upper).contains(&newton) {
            newton
        } else {
            0.5 * (lower + upper)
        };

        if (e0 - e1).abs() < settings.tolerance {
            trace!(iteration, eccentricity, "Kepler solver converged");
            return Ok(KeplerSolution {
                eccentric_anomaly: e0,
                iterations: iteration,
            });
        }
    }

    Err(OrreryError::KeplerNonConvergence {
        mean_anomaly,
        eccentricity,
        iterations: settings.max_iterations,
    })
}
