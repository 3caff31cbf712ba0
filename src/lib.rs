//! # Orrery
//!
//! Apparent positions of the Sun, the Moon, the planets Mercury to Neptune and Pluto, for
//! any instant and any observer on the Earth, from analytical orbital elements.
//!
//! ## Overview
//!
//! - [`time`] – the epoch offset `d` every formula is written in, and sidereal time.
//! - [`kepler`] – the bounded, safeguarded Kepler solver.
//! - [`bodies`] – per-body element tables, the Sun and Pluto models, perturbations.
//! - [`pipeline`] – heliocentric → geocentric → equatorial → horizontal → topocentric.
//! - [`orrery`] – the [`Orrery`](orrery::Orrery) façade, its configuration and snapshots.
//!
//! The model is a low/medium-precision one (arc-minute level for the planets, a few
//! arc-minutes for the Moon) valid for a few centuries around the year 2000.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per body, `warn` on per-body failures, `trace`
//! inside the Kepler solver) and installs no subscriber.

pub mod bodies;
pub mod constants;
pub mod earth_orientation;
pub mod kepler;
pub mod observers;
pub mod orbit_type;
pub mod orrery;
pub mod orrery_errors;
pub mod pipeline;
pub mod positions;
pub mod ref_system;
pub mod time;
