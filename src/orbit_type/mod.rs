//! # Orbit representations
//!
//! This module groups the element set and the anomaly solution used by every elliptical
//! body of the pipeline:
//!
//! - [`OrbitalElements`] – the six classical elements `(N, i, w, a, e, M)` evaluated at an
//!   epoch offset, angles in degrees.
//! - [`AnomalySolution`] – eccentric anomaly, true anomaly and radius obtained from the
//!   elements through the [Kepler solver](crate::kepler::solve_kepler).
//!
//! ## Frames & conventions
//!
//! The elements are referred to the mean ecliptic and equinox of date. Positions built from
//! them ([`OrbitalElements::ecliptic_position`]) are rectangular ecliptic coordinates
//! centered on the body's primary: the Sun for the planets, the Earth for the Moon.
//!
//! ```text
//! (N, i, w, a, e, M) --Kepler--> (E, v, r) --rotate by N, i, w--> (xh, yh, zh)
//! ```
//!
//! ## Units
//!
//! - Angles: **degrees**
//! - Lengths: **AU** (Earth radii for the Moon)

pub mod anomaly;
pub mod orbital_elements;

pub use anomaly::AnomalySolution;
pub use orbital_elements::OrbitalElements;
