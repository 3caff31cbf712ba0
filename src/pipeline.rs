//! # Position pipeline
//!
//! The per-body computation, from orbital elements to the observer's sky:
//!
//! ```text
//! elements(d) --Kepler--> (E, v, r) --rotate by N, i, w--> (xh, yh, zh)
//!     --> (λ, β, r) --perturbations--> (λ', β', r') --> (xh2, yh2, zh2)
//!     --(+ Sun offset unless geocentric)--> (xg, yg, zg)
//!     --rotate by ε--> (xe, ye, ze) --> (RA, Dec, range)
//!     --hour angle, latitude--> (az, alt) --parallax--> topocentric
//! ```
//!
//! Everything a body needs besides its own elements lives in a [`RequestContext`]: the
//! epoch offset, the obliquity, the sidereal time, the Sun's orbit and the perturbation
//! arguments. It is computed once per request and only read afterwards, so the bodies can
//! be evaluated in any order, or concurrently.
use nalgebra::Vector3;
use tracing::debug;

use crate::{
    bodies::{pluto, sun::SunOrbit, Body, BodyModel, PerturbationContext},
    constants::{Degree, EARTH_RADII_PER_AU},
    earth_orientation::obliquity,
    kepler::{principal_angle, KeplerSettings},
    observers::Observer,
    orbit_type::OrbitalElements,
    orrery_errors::OrreryError,
    positions::{BodyPosition, EclipticCoordinates, EquatorialCoordinates},
    ref_system::{
        cartesian_to_radec, ecliptic_to_equatorial, equatorial_to_horizontal, hour_angle,
        topocentric_correction,
    },
    time::{EpochOffset, SiderealTime},
};

/// Request-wide quantities shared read-only by every body.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    pub d: EpochOffset,
    pub obliquity: Degree,
    pub sidereal: SiderealTime,
    pub sun: SunOrbit,
    pub perturbations: PerturbationContext,
    pub observer: &'a Observer,
    pub extra_accuracy: bool,
    pub kepler: KeplerSettings,
}

impl<'a> RequestContext<'a> {
    /// Prepare a request: obliquity, Sun orbit, sidereal time and perturbation arguments.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::InvalidInput`] for a non-finite `d` or an observer outside the valid
    ///   coordinate range.
    /// * Any error of [`SunOrbit::at`]; every body depends on the Sun, so this fails the
    ///   whole request.
    pub fn new(
        d: EpochOffset,
        observer: &'a Observer,
        extra_accuracy: bool,
        kepler: KeplerSettings,
    ) -> Result<Self, OrreryError> {
        let d = EpochOffset::checked(d.days())?;
        observer.validate()?;
        let sun = SunOrbit::at(d)?;

        Ok(RequestContext {
            d,
            obliquity: obliquity(d),
            sidereal: SiderealTime::new(d, &sun.elements, observer.longitude),
            perturbations: PerturbationContext::new(d, &sun.elements),
            sun,
            observer,
            extra_accuracy,
            kepler,
        })
    }

    /// Whether the topocentric correction applies to `body`.
    pub fn wants_topocentric(&self, body: Body) -> bool {
        body.always_topocentric() || self.extra_accuracy
    }
}

/// Compute the apparent position of one body.
///
/// The longitude speed of the returned record is left empty; see
/// [`Orrery::longitude_speed`](crate::orrery::Orrery::longitude_speed).
pub fn compute_body(body: Body, ctx: &RequestContext<'_>) -> Result<BodyPosition, OrreryError> {
    match body.model() {
        BodyModel::Sun => sun_position(ctx),
        BodyModel::PlutoSeries => pluto_position(ctx),
        BodyModel::Geocentric | BodyModel::Heliocentric => {
            let elements = body
                .orbital_elements(ctx.d)
                .ok_or(OrreryError::InvalidInput {
                    name: "orbital elements",
                    value: ctx.d.days(),
                })?;
            keplerian_position(body, elements, ctx)
        }
    }
}

fn sun_position(ctx: &RequestContext<'_>) -> Result<BodyPosition, OrreryError> {
    let orbital = EclipticCoordinates::new(ctx.sun.longitude, 0.0, ctx.sun.distance());
    project(
        Body::Sun,
        Some(ctx.sun.elements),
        orbital,
        ctx.sun.position,
        ctx,
    )
}

fn pluto_position(ctx: &RequestContext<'_>) -> Result<BodyPosition, OrreryError> {
    let orbital = pluto::heliocentric_position(ctx.d);
    let geocentric = orbital.to_cartesian() + ctx.sun.position;
    project(Body::Pluto, None, orbital, geocentric, ctx)
}

/// Kepler solve, perturbations and geocentric assembly of an element-based body.
fn keplerian_position(
    body: Body,
    elements: OrbitalElements,
    ctx: &RequestContext<'_>,
) -> Result<BodyPosition, OrreryError> {
    let anomaly = elements.solve_anomaly(&ctx.kepler)?;
    let unperturbed = EclipticCoordinates::from_cartesian(&elements.ecliptic_position(&anomaly))?;

    let correction = body
        .perturbation()
        .correction(&elements, &ctx.perturbations);
    let orbital = EclipticCoordinates::new(
        principal_angle(unperturbed.longitude + correction.longitude),
        unperturbed.latitude + correction.latitude,
        unperturbed.distance + correction.distance,
    );

    let rectangular = orbital.to_cartesian();
    let geocentric = match body.model() {
        BodyModel::Geocentric => rectangular / EARTH_RADII_PER_AU,
        _ => rectangular + ctx.sun.position,
    };

    project(body, Some(elements), orbital, geocentric, ctx)
}

/// Shared tail of the pipeline: geocentric → equatorial → horizontal → topocentric.
fn project(
    body: Body,
    elements: Option<OrbitalElements>,
    orbital: EclipticCoordinates,
    geocentric: Vector3<f64>,
    ctx: &RequestContext<'_>,
) -> Result<BodyPosition, OrreryError> {
    let geocentric_ecliptic = EclipticCoordinates::from_cartesian(&geocentric)?;

    let rectangular = ecliptic_to_equatorial(&geocentric, ctx.obliquity);
    let (right_ascension, declination, distance) = cartesian_to_radec(&rectangular)?;

    let ha = hour_angle(&ctx.sidereal, right_ascension);
    let horizontal = equatorial_to_horizontal(ha, declination, ctx.observer.latitude)?;

    let topocentric = if ctx.wants_topocentric(body) {
        Some(topocentric_correction(
            right_ascension,
            declination,
            distance,
            &horizontal,
            ctx.observer,
        )?)
    } else {
        None
    };

    debug!(
        body = %body,
        d = ctx.d.days(),
        longitude = geocentric_ecliptic.longitude,
        latitude = geocentric_ecliptic.latitude,
        distance,
        "body position computed"
    );

    Ok(BodyPosition {
        body,
        epoch: ctx.d,
        elements,
        orbital,
        geocentric: geocentric_ecliptic,
        equatorial: EquatorialCoordinates {
            rectangular,
            right_ascension,
            declination,
            distance,
        },
        horizontal,
        topocentric,
        longitude_speed: None,
    })
}

#[cfg(test)]
mod pipeline_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn context(d: f64, observer: &Observer, extra_accuracy: bool) -> RequestContext<'_> {
        RequestContext::new(
            EpochOffset::new(d),
            observer,
            extra_accuracy,
            KeplerSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_context_rejects_non_finite_epoch() {
        let observer = Observer::new(0.0, 0.0).unwrap();
        assert!(matches!(
            RequestContext::new(
                EpochOffset::new(f64::NAN),
                &observer,
                false,
                KeplerSettings::default()
            ),
            Err(OrreryError::InvalidInput {
                name: "epoch offset",
                ..
            })
        ));
    }

    #[test]
    fn test_sun_is_on_the_ecliptic() {
        let observer = Observer::new(50.0, 3.0).unwrap();
        let ctx = context(1.2291667, &observer, false);
        let sun = compute_body(Body::Sun, &ctx).unwrap();

        assert_abs_diff_eq!(sun.ecliptic_latitude(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sun.ecliptic_longitude(), ctx.sun.longitude, epsilon = 1e-9);
        assert!(sun.declination().abs() <= ctx.obliquity + 1e-9);
        assert!(sun.topocentric().is_none());
        assert!(sun.elements.is_some());
    }

    #[test]
    fn test_moon_geocentric_distance_in_au() {
        let observer = Observer::new(50.0, 3.0).unwrap();
        let ctx = context(1.2291667, &observer, false);
        let moon = compute_body(Body::Moon, &ctx).unwrap();

        // orbital record in Earth radii, geocentric in AU
        assert!(moon.orbital.distance > 55.0 && moon.orbital.distance < 65.0);
        assert_abs_diff_eq!(
            moon.distance(),
            moon.orbital.distance / EARTH_RADII_PER_AU,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            moon.ecliptic_longitude(),
            moon.orbital.longitude,
            epsilon = 1e-9
        );
        assert!(moon.topocentric().is_some());
    }

    #[test]
    fn test_planets_add_the_sun_offset() {
        let observer = Observer::new(50.0, 3.0).unwrap();
        let ctx = context(1000.0, &observer, true);

        for body in [Body::Mars, Body::Pluto] {
            let pos = compute_body(body, &ctx).unwrap();
            let helio = pos.orbital.to_cartesian();
            let geo = pos.geocentric.to_cartesian();
            let offset = geo - helio;
            assert_abs_diff_eq!(offset.x, ctx.sun.position.x, epsilon = 1e-9);
            assert_abs_diff_eq!(offset.y, ctx.sun.position.y, epsilon = 1e-9);
            assert_abs_diff_eq!(offset.z, 0.0, epsilon = 1e-9);
            assert!(pos.topocentric().is_some());
        }
    }

    #[test]
    fn test_inner_planet_stays_near_the_sun() {
        let observer = Observer::new(-33.9, 18.4).unwrap();
        for k in 0..40 {
            let ctx = context(k as f64 * 29.3, &observer, false);
            let sun = compute_body(Body::Sun, &ctx).unwrap();
            let mercury = compute_body(Body::Mercury, &ctx).unwrap();
            let venus = compute_body(Body::Venus, &ctx).unwrap();

            assert!(crate::positions::angular_separation(&mercury, &sun) < 29.0);
            assert!(crate::positions::angular_separation(&venus, &sun) < 48.5);
        }
    }

    #[test]
    fn test_kepler_failure_is_reported() {
        let observer = Observer::new(10.0, 10.0).unwrap();
        let mut ctx = context(500.0, &observer, false);
        ctx.kepler = KeplerSettings {
            tolerance: 0.0,
            max_iterations: 1,
        };

        assert!(matches!(
            compute_body(Body::Mercury, &ctx),
            Err(OrreryError::KeplerNonConvergence { .. })
        ));
        // the Sun's closed form and Pluto's series never touch the solver
        assert!(compute_body(Body::Sun, &ctx).is_ok());
        assert!(compute_body(Body::Pluto, &ctx).is_ok());
    }

    #[test]
    fn test_context_rejects_invalid_observer() {
        let observer = Observer {
            latitude: 135.0,
            longitude: 0.0,
            name: None,
        };
        assert_eq!(
            RequestContext::new(EpochOffset::new(0.0), &observer, false, KeplerSettings::default())
                .map(|_| ()),
            Err(OrreryError::InvalidInput {
                name: "observer latitude",
                value: 135.0,
            })
        );
    }

    #[test]
    fn test_parallax_from_geocentric_range() {
        let observer = Observer::new(45.0, 7.0).unwrap();
        let ctx = context(2400.0, &observer, true);

        for body in [Body::Moon, Body::Mars, Body::Jupiter] {
            let pos = compute_body(body, &ctx).unwrap();
            let parallax = pos.topocentric().unwrap().parallax;
            let earth_radii = pos.distance() * EARTH_RADII_PER_AU;
            assert_abs_diff_eq!(parallax, (1.0 / earth_radii).asin().to_degrees(), epsilon = 1e-12);
        }

        // the heliocentric distance of a planet is in AU and would give tens of degrees
        let mars = compute_body(Body::Mars, &ctx).unwrap();
        assert!(mars.orbital.distance > 1.3 && mars.orbital.distance < 1.7);
        assert!(mars.topocentric().unwrap().parallax < 0.01);

        // for the Moon both distances are the same length
        let moon = compute_body(Body::Moon, &ctx).unwrap();
        assert_abs_diff_eq!(
            moon.topocentric().unwrap().parallax,
            (1.0 / moon.orbital.distance).asin().to_degrees(),
            epsilon = 1e-9
        );
    }
}
