//! # Orrery façade
//!
//! [`Orrery`] holds the computation settings ([`OrreryConfig`]) and answers position
//! requests for an epoch offset and an [`Observer`]:
//!
//! - [`Orrery::positions`] – every body at once, as a [`SkySnapshot`];
//! - [`Orrery::body_position`] – a single body;
//! - [`Orrery::longitude_speed`] – the daily motion of a body along the ecliptic.
//!
//! ## Failure model
//!
//! A request fails as a whole only when its inputs are unusable (non-finite epoch offset,
//! invalid speed step) or when the Sun, which every other body depends on, cannot be
//! computed. Any other failure is confined to the body it happened in: its slot of the
//! snapshot holds an `Err` and a `warn!` event is emitted, the other bodies are unaffected.
//!
//! ## Parallelism
//!
//! With the `parallel` cargo feature the per-body pipelines of a snapshot run on rayon's
//! global pool. Results keep the order of [`Body::ALL`] and are identical to the
//! sequential ones.
//!
//! ## Example
//!
//! ```rust,no_run
//! use orrery::bodies::Body;
//! use orrery::observers::Observer;
//! use orrery::orrery::Orrery;
//! use orrery::time::EpochOffset;
//!
//! let orrery = Orrery::default();
//! let observer = Observer::new(50.123456, 3.123456)?;
//! let d = EpochOffset::from_gregorian_utc(2000, 1, 1, 5, 30, 0)?;
//!
//! let sky = orrery.positions(d, &observer)?;
//! let moon = sky.get(Body::Moon).unwrap().as_ref().unwrap();
//! println!("Moon at {:.2}°, retrograde: {:?}", moon.ecliptic_longitude(), moon.is_retrograde());
//! # Ok::<(), orrery::orrery_errors::OrreryError>(())
//! ```
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    bodies::{sun::SunOrbit, Body},
    constants::{Days, Degree},
    kepler::KeplerSettings,
    observers::Observer,
    orrery_errors::OrreryError,
    pipeline::{compute_body, RequestContext},
    positions::{longitude_delta, BodyPosition},
    time::{EpochOffset, SiderealTime},
};

/// Settings of an [`Orrery`].
///
/// Fields
/// ------
/// * `extra_accuracy`: apply the topocentric correction to every body, not only the Moon.
/// * `kepler`: tolerance and iteration bound of the Kepler solver.
/// * `compute_speed`: fill [`BodyPosition::longitude_speed`] in snapshots.
/// * `speed_step`: half-width `h` (days) of the central difference used for the speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub extra_accuracy: bool,
    pub kepler: KeplerSettings,
    pub compute_speed: bool,
    pub speed_step: Days,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        OrreryConfig {
            extra_accuracy: false,
            kepler: KeplerSettings::default(),
            compute_speed: true,
            speed_step: 0.01,
        }
    }
}

/// Positions of every body for one request.
///
/// `bodies` follows the order of [`Body::ALL`]; each slot holds either the position or the
/// error that stopped that body's pipeline.
#[derive(Debug, Clone)]
pub struct SkySnapshot {
    pub epoch: EpochOffset,
    pub observer: Observer,
    pub obliquity: Degree,
    pub sidereal: SiderealTime,
    pub sun: SunOrbit,
    pub bodies: Vec<(Body, Result<BodyPosition, OrreryError>)>,
}

impl SkySnapshot {
    /// The result for `body`.
    pub fn get(&self, body: Body) -> Option<&Result<BodyPosition, OrreryError>> {
        self.bodies
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, result)| result)
    }

    /// The positions that were computed successfully, in [`Body::ALL`] order.
    pub fn successes(&self) -> impl Iterator<Item = &BodyPosition> {
        self.bodies.iter().filter_map(|(_, result)| result.as_ref().ok())
    }

    /// The bodies that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (Body, &OrreryError)> {
        self.bodies
            .iter()
            .filter_map(|(body, result)| result.as_ref().err().map(|err| (*body, err)))
    }
}

/// Entry point of the position computations.
#[derive(Debug, Clone, Default)]
pub struct Orrery {
    config: OrreryConfig,
}

/// Request contexts on both sides of a central difference.
struct SpeedContexts<'a> {
    before: RequestContext<'a>,
    after: RequestContext<'a>,
    step: Days,
}

impl Orrery {
    pub fn new(config: OrreryConfig) -> Self {
        Orrery { config }
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    fn context<'a>(
        &self,
        d: EpochOffset,
        observer: &'a Observer,
    ) -> Result<RequestContext<'a>, OrreryError> {
        RequestContext::new(d, observer, self.config.extra_accuracy, self.config.kepler)
    }

    fn speed_contexts<'a>(
        &self,
        d: EpochOffset,
        observer: &'a Observer,
    ) -> Result<SpeedContexts<'a>, OrreryError> {
        let step = self.config.speed_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(OrreryError::InvalidInput {
                name: "speed step",
                value: step,
            });
        }

        Ok(SpeedContexts {
            before: self.context(d.shifted(-step), observer)?,
            after: self.context(d.shifted(step), observer)?,
            step,
        })
    }

    /// Compute the position of every body at `d` for `observer`.
    ///
    /// Arguments
    /// ---------
    /// * `d`: epoch offset of the request.
    /// * `observer`: the site the sky is seen from.
    ///
    /// Return
    /// ------
    /// * A [`SkySnapshot`] with one result per body. When `compute_speed` is on, each
    ///   successful position carries its longitude speed; a body whose speed cannot be
    ///   evaluated keeps its position with no speed.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::InvalidInput`] for a non-finite `d` or an invalid speed step.
    /// * Any error of the Sun's orbit, which every body depends on.
    pub fn positions(
        &self,
        d: EpochOffset,
        observer: &Observer,
    ) -> Result<SkySnapshot, OrreryError> {
        let ctx = self.context(d, observer)?;
        let speed = if self.config.compute_speed {
            Some(self.speed_contexts(ctx.d, observer)?)
        } else {
            None
        };

        let evaluate = |body: Body| {
            let result = compute_body(body, &ctx).map(|mut position| {
                if let Some(speed) = &speed {
                    position.longitude_speed = central_difference(body, speed)
                        .inspect_err(|err| {
                            warn!(body = %body, error = %err, "longitude speed failed")
                        })
                        .ok();
                }
                position
            });
            if let Err(err) = &result {
                warn!(body = %body, d = ctx.d.days(), error = %err, "body position failed");
            }
            (body, result)
        };

        #[cfg(feature = "parallel")]
        let bodies: Vec<_> = Body::ALL.par_iter().map(|&body| evaluate(body)).collect();
        #[cfg(not(feature = "parallel"))]
        let bodies: Vec<_> = Body::ALL.iter().map(|&body| evaluate(body)).collect();

        debug!(
            d = ctx.d.days(),
            failures = bodies.iter().filter(|(_, r)| r.is_err()).count(),
            "sky snapshot computed"
        );

        Ok(SkySnapshot {
            epoch: ctx.d,
            observer: observer.clone(),
            obliquity: ctx.obliquity,
            sidereal: ctx.sidereal,
            sun: ctx.sun,
            bodies,
        })
    }

    /// Compute the position of a single body at `d` for `observer`.
    ///
    /// The longitude speed is filled when `compute_speed` is on; unlike
    /// [`Orrery::positions`], a failure to evaluate it is returned as an error.
    pub fn body_position(
        &self,
        body: Body,
        d: EpochOffset,
        observer: &Observer,
    ) -> Result<BodyPosition, OrreryError> {
        let ctx = self.context(d, observer)?;
        let mut position = compute_body(body, &ctx)?;
        if self.config.compute_speed {
            let speed = self.speed_contexts(ctx.d, observer)?;
            position.longitude_speed = Some(central_difference(body, &speed)?);
        }
        Ok(position)
    }

    /// Daily motion of `body` along the ecliptic at `d`, in degrees per day.
    ///
    /// Details
    /// -------
    /// Central difference of the geocentric ecliptic longitude over `[d − h, d + h]`, with
    /// `h` the configured `speed_step`. The longitude change is unwrapped across the
    /// 0°/360° seam first. A negative value means the body is retrograde.
    pub fn longitude_speed(
        &self,
        body: Body,
        d: EpochOffset,
        observer: &Observer,
    ) -> Result<f64, OrreryError> {
        let d = EpochOffset::checked(d.days())?;
        central_difference(body, &self.speed_contexts(d, observer)?)
    }
}

fn central_difference(body: Body, speed: &SpeedContexts<'_>) -> Result<f64, OrreryError> {
    let before = compute_body(body, &speed.before)?.ecliptic_longitude();
    let after = compute_body(body, &speed.after)?.ecliptic_longitude();
    Ok(longitude_delta(before, after) / (2.0 * speed.step))
}
