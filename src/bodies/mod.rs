//! # Bodies of the Solar-System model
//!
//! The ten bodies the pipeline knows about, and the per-body data that drives it:
//!
//! - [`Body`] – identifier of a body, in the canonical order of [`Body::ALL`].
//! - [`Body::orbital_elements`] – the linear element formulas in the epoch offset `d`.
//! - [`Body::perturbation`] – which [`Perturbation`] table corrects the body.
//! - [`sun`] – the Sun model, computed first because every other body depends on it.
//! - [`pluto`] – Pluto's fitted series, used instead of orbital elements.
//!
//! ## Element tables
//!
//! Angles are in degrees, `d` in days since 1999-12-31T00:00 UTC. Semi-major axes are in
//! AU, except the Moon's which is in Earth radii. The Sun's elements describe the Earth's
//! orbit seen from the Earth, so `N = i = 0` and `a = 1`.
//!
//! | Body    | N                       | i                   | w                      | a                   | e                      | M                          |
//! |---------|-------------------------|---------------------|------------------------|---------------------|------------------------|----------------------------|
//! | Sun     | 0                       | 0                   | 282.9404 + 4.70935e-5d | 1                   | 0.016709 − 1.151e-9d   | 356.0470 + 0.9856002585d   |
//! | Moon    | 125.1228 − 0.0529538083d| 5.1454              | 318.0634 + 0.1643573223d| 60.2666            | 0.0549                 | 115.3654 + 13.0649929509d  |
//! | Mercury | 48.3313 + 3.24587e-5d   | 7.0047 + 5.0e-8d    | 29.1241 + 1.01444e-5d  | 0.387098            | 0.205635 + 5.59e-10d   | 168.6562 + 4.0923344368d   |
//! | Venus   | 76.6799 + 2.46590e-5d   | 3.3946 + 2.75e-8d   | 54.8910 + 1.38374e-5d  | 0.723330            | 0.006773 − 1.302e-9d   | 48.0052 + 1.6021302244d    |
//! | Mars    | 49.5574 + 2.11081e-5d   | 1.8497 − 1.78e-8d   | 286.5016 + 2.92961e-5d | 1.523688            | 0.093405 + 2.516e-9d   | 18.6021 + 0.5240207766d    |
//! | Jupiter | 100.4542 + 2.76854e-5d  | 1.3030 + 1.557e-7d  | 273.8777 + 1.64505e-5d | 5.20256             | 0.048498 + 4.469e-9d   | 19.8950 + 0.0830853001d    |
//! | Saturn  | 113.6634 + 2.38980e-5d  | 2.4886 − 1.081e-7d  | 339.3939 + 2.97661e-5d | 9.55475             | 0.055546 − 9.499e-9d   | 316.9670 + 0.0334442282d   |
//! | Uranus  | 74.0005 + 1.3978e-5d    | 0.7733 + 1.9e-8d    | 96.6612 + 3.0565e-5d   | 19.18171 − 1.55e-8d | 0.047318 + 7.45e-9d    | 142.5905 + 0.011725806d    |
//! | Neptune | 131.7806 + 3.0173e-5d   | 1.7700 − 2.55e-7d   | 272.8461 − 6.027e-6d   | 30.05826 + 3.313e-8d| 0.008606 + 2.15e-9d    | 260.2471 + 0.005995147d    |

pub mod perturbations;
pub mod pluto;
pub mod sun;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::orbit_type::OrbitalElements;
use crate::orrery_errors::OrreryError;
use crate::time::EpochOffset;

pub use perturbations::{Perturbation, PerturbationContext, PerturbationCorrection};

/// A body whose apparent position the pipeline computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// How a body's position is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyModel {
    /// Closed-form solar orbit, the origin of every geocentric offset.
    Sun,
    /// Orbital elements, Kepler solve and perturbations, centered on the Earth.
    Geocentric,
    /// Orbital elements, Kepler solve and perturbations, centered on the Sun.
    Heliocentric,
    /// Fitted heliocentric series.
    PlutoSeries,
}

impl Body {
    /// Every body, in the order results are reported.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    pub fn model(&self) -> BodyModel {
        match self {
            Body::Sun => BodyModel::Sun,
            Body::Moon => BodyModel::Geocentric,
            Body::Pluto => BodyModel::PlutoSeries,
            _ => BodyModel::Heliocentric,
        }
    }

    /// Perturbation table applied after the Kepler solve.
    pub fn perturbation(&self) -> Perturbation {
        match self {
            Body::Moon => Perturbation::Moon,
            Body::Jupiter => Perturbation::Jupiter,
            Body::Saturn => Perturbation::Saturn,
            Body::Uranus => Perturbation::Uranus,
            _ => Perturbation::None,
        }
    }

    /// Whether the topocentric correction is always applied, regardless of the accuracy flag.
    ///
    /// Only the Moon is close enough for its parallax to matter at the model's precision.
    pub fn always_topocentric(&self) -> bool {
        matches!(self, Body::Moon)
    }

    /// Orbital elements of the body at epoch offset `d`.
    ///
    /// Return
    /// ------
    /// * `Some(elements)` for every body but Pluto, whose position comes from a fitted
    ///   series (see [`pluto`]) rather than from orbital elements.
    pub fn orbital_elements(&self, d: EpochOffset) -> Option<OrbitalElements> {
        let t = d.days();
        let el = match self {
            Body::Sun => return Some(sun::sun_elements(d)),
            Body::Moon => OrbitalElements::new(
                d,
                125.1228 - 0.0529538083 * t,
                5.1454,
                318.0634 + 0.1643573223 * t,
                60.2666,
                0.054900,
                115.3654 + 13.0649929509 * t,
            ),
            Body::Mercury => OrbitalElements::new(
                d,
                48.3313 + 3.24587e-5 * t,
                7.0047 + 5.00e-8 * t,
                29.1241 + 1.01444e-5 * t,
                0.387098,
                0.205635 + 5.59e-10 * t,
                168.6562 + 4.0923344368 * t,
            ),
            Body::Venus => OrbitalElements::new(
                d,
                76.6799 + 2.46590e-5 * t,
                3.3946 + 2.75e-8 * t,
                54.8910 + 1.38374e-5 * t,
                0.723330,
                0.006773 - 1.302e-9 * t,
                48.0052 + 1.6021302244 * t,
            ),
            Body::Mars => OrbitalElements::new(
                d,
                49.5574 + 2.11081e-5 * t,
                1.8497 - 1.78e-8 * t,
                286.5016 + 2.92961e-5 * t,
                1.523688,
                0.093405 + 2.516e-9 * t,
                18.6021 + 0.5240207766 * t,
            ),
            Body::Jupiter => jupiter_elements(d),
            Body::Saturn => saturn_elements(d),
            Body::Uranus => uranus_elements(d),
            Body::Neptune => OrbitalElements::new(
                d,
                131.7806 + 3.0173e-5 * t,
                1.7700 - 2.55e-7 * t,
                272.8461 - 6.027e-6 * t,
                30.05826 + 3.313e-8 * t,
                0.008606 + 2.15e-9 * t,
                260.2471 + 0.005995147 * t,
            ),
            Body::Pluto => return None,
        };
        Some(el)
    }
}

/// Jupiter's elements; its mean anomaly also drives the giant-planet perturbations.
pub fn jupiter_elements(d: EpochOffset) -> OrbitalElements {
    let t = d.days();
    OrbitalElements::new(
        d,
        100.4542 + 2.76854e-5 * t,
        1.3030 + 1.557e-7 * t,
        273.8777 + 1.64505e-5 * t,
        5.20256,
        0.048498 + 4.469e-9 * t,
        19.8950 + 0.0830853001 * t,
    )
}

pub fn saturn_elements(d: EpochOffset) -> OrbitalElements {
    let t = d.days();
    OrbitalElements::new(
        d,
        113.6634 + 2.38980e-5 * t,
        2.4886 - 1.081e-7 * t,
        339.3939 + 2.97661e-5 * t,
        9.55475,
        0.055546 - 9.499e-9 * t,
        316.9670 + 0.0334442282 * t,
    )
}

pub fn uranus_elements(d: EpochOffset) -> OrbitalElements {
    let t = d.days();
    OrbitalElements::new(
        d,
        74.0005 + 1.3978e-5 * t,
        0.7733 + 1.9e-8 * t,
        96.6612 + 3.0565e-5 * t,
        19.18171 - 1.55e-8 * t,
        0.047318 + 7.45e-9 * t,
        142.5905 + 0.011725806 * t,
    )
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Body {
    type Err = OrreryError;

    /// Parse a body from its English name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OrreryError::UnknownBody(s.to_string()))
    }
}
