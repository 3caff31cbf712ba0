//! # Perturbation corrections
//!
//! Pure two-body motion leaves visible errors for the Moon (pulled by the Sun) and for the
//! three giant planets that disturb each other. Each is corrected by a short table of
//! periodic terms added to the ecliptic longitude, latitude and distance obtained from the
//! Kepler solve.
//!
//! ## Arguments of the series
//!
//! Moon terms use the Sun's and the Moon's elements:
//!
//! ```text
//! Ls = Ms + ws            (Sun mean longitude)
//! Lm = Mm + wm + Nm       (Moon mean longitude)
//! D  = Lm − Ls            (mean elongation)
//! F  = Lm − Nm            (argument of latitude)
//! ```
//!
//! Planet terms use the mean anomalies `Mj`, `Ms`, `Mu` of **Jupiter, Saturn and Uranus**.
//!
//! All terms are in degrees, except the Moon's distance terms which are in Earth radii.
use serde::Serialize;

use crate::{
    bodies::{jupiter_elements, saturn_elements, uranus_elements},
    constants::Degree,
    kepler::{cosd, sind},
    orbit_type::OrbitalElements,
    time::EpochOffset,
};

/// Perturbation table attached to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbation {
    None,
    Moon,
    Jupiter,
    Saturn,
    Uranus,
}

/// Corrections to add to the spherical ecliptic coordinates of a body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PerturbationCorrection {
    pub longitude: Degree,
    pub latitude: Degree,
    pub distance: f64,
}

/// Angles shared by every perturbation table of one request.
///
/// Fields
/// ------
/// * `sun_mean_anomaly`, `sun_periapsis_argument`: `Ms`, `ws` of the Sun (Moon terms).
/// * `jupiter_mean_anomaly`, `saturn_mean_anomaly`, `uranus_mean_anomaly`: `Mj`, `Ms`, `Mu`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerturbationContext {
    pub sun_mean_anomaly: Degree,
    pub sun_periapsis_argument: Degree,
    pub jupiter_mean_anomaly: Degree,
    pub saturn_mean_anomaly: Degree,
    pub uranus_mean_anomaly: Degree,
}

impl PerturbationContext {
    /// Gather the perturbation arguments at `d` from the Sun's elements and the giant
    /// planets' element tables.
    pub fn new(d: EpochOffset, sun: &OrbitalElements) -> Self {
        PerturbationContext {
            sun_mean_anomaly: sun.mean_anomaly,
            sun_periapsis_argument: sun.periapsis_argument,
            jupiter_mean_anomaly: jupiter_elements(d).mean_anomaly,
            saturn_mean_anomaly: saturn_elements(d).mean_anomaly,
            uranus_mean_anomaly: uranus_elements(d).mean_anomaly,
        }
    }
}

impl Perturbation {
    /// Evaluate the correction for a body.
    ///
    /// Arguments
    /// ---------
    /// * `own`: the perturbed body's elements (only read by the Moon table).
    /// * `ctx`: the request-wide perturbation arguments.
    pub fn correction(&self, own: &OrbitalElements, ctx: &PerturbationContext) -> PerturbationCorrection {
        match self {
            Perturbation::None => PerturbationCorrection::default(),
            Perturbation::Moon => moon_correction(own, ctx),
            Perturbation::Jupiter => jupiter_correction(ctx),
            Perturbation::Saturn => saturn_correction(ctx),
            Perturbation::Uranus => uranus_correction(ctx),
        }
    }
}

fn moon_correction(moon: &OrbitalElements, ctx: &PerturbationContext) -> PerturbationCorrection {
    let ms = ctx.sun_mean_anomaly;
    let mm = moon.mean_anomaly;
    let nm = moon.ascending_node_longitude;

    let ls = ms + ctx.sun_periapsis_argument;
    let lm = mm + moon.periapsis_argument + nm;
    let d = lm - ls;
    let f = lm - nm;

    let longitude = -1.274 * sind(mm - 2.0 * d)
        + 0.658 * sind(2.0 * d)
        - 0.186 * sind(ms)
        - 0.059 * sind(2.0 * mm - 2.0 * d)
        - 0.057 * sind(mm - 2.0 * d + ms)
        + 0.053 * sind(mm + 2.0 * d)
        + 0.046 * sind(2.0 * d - ms)
        + 0.041 * sind(mm - ms)
        - 0.035 * sind(d)
        - 0.031 * sind(mm + ms)
        - 0.015 * sind(2.0 * f - 2.0 * d)
        + 0.011 * sind(mm - 4.0 * d);

    let latitude = -0.173 * sind(f - 2.0 * d)
        - 0.055 * sind(mm - f - 2.0 * d)
        - 0.046 * sind(mm + f - 2.0 * d)
        + 0.033 * sind(f + 2.0 * d)
        + 0.017 * sind(2.0 * mm + f);

    let distance = -0.58 * cosd(mm - 2.0 * d) - 0.46 * cosd(2.0 * d);

    PerturbationCorrection {
        longitude,
        latitude,
        distance,
    }
}

fn jupiter_correction(ctx: &PerturbationContext) -> PerturbationCorrection {
    let mj = ctx.jupiter_mean_anomaly;
    let ms = ctx.saturn_mean_anomaly;

    let longitude = -0.332 * sind(2.0 * mj - 5.0 * ms - 67.6)
        - 0.056 * sind(2.0 * mj - 2.0 * ms + 21.0)
        + 0.042 * sind(3.0 * mj - 5.0 * ms + 21.0)
        - 0.036 * sind(mj - 2.0 * ms)
        + 0.022 * cosd(mj - ms)
        + 0.023 * sind(2.0 * mj - 3.0 * ms + 52.0)
        - 0.016 * sind(mj - 5.0 * ms - 69.0);

    PerturbationCorrection {
        longitude,
        ..Default::default()
    }
}

fn saturn_correction(ctx: &PerturbationContext) -> PerturbationCorrection {
    let mj = ctx.jupiter_mean_anomaly;
    let ms = ctx.saturn_mean_anomaly;

    let longitude = 0.812 * sind(2.0 * mj - 5.0 * ms - 67.6)
        - 0.229 * cosd(2.0 * mj - 4.0 * ms - 2.0)
        + 0.119 * sind(mj - 2.0 * ms - 3.0)
        + 0.046 * sind(2.0 * mj - 6.0 * ms - 69.0)
        + 0.014 * sind(mj - 3.0 * ms + 32.0);

    let latitude =
        -0.020 * cosd(2.0 * mj - 4.0 * ms - 2.0) + 0.018 * sind(2.0 * mj - 6.0 * ms - 49.0);

    PerturbationCorrection {
        longitude,
        latitude,
        distance: 0.0,
    }
}

fn uranus_correction(ctx: &PerturbationContext) -> PerturbationCorrection {
    let mj = ctx.jupiter_mean_anomaly;
    let ms = ctx.saturn_mean_anomaly;
    let mu = ctx.uranus_mean_anomaly;

    let longitude = 0.040 * sind(ms - 2.0 * mu + 6.0)
        + 0.035 * sind(ms - 3.0 * mu + 33.0)
        - 0.015 * sind(mj - mu + 20.0);

    PerturbationCorrection {
        longitude,
        ..Default::default()
    }
}

#[cfg(test)]
mod perturbations_test {
    use super::*;
    use crate::bodies::sun::sun_elements;
    use crate::bodies::Body;
    use approx::assert_abs_diff_eq;

    fn context(d: f64) -> (OrbitalElements, PerturbationContext) {
        let d = EpochOffset::new(d);
        let sun = sun_elements(d);
        (sun, PerturbationContext::new(d, &sun))
    }

    #[test]
    fn test_none_is_zero() {
        let (sun, ctx) = context(100.0);
        assert_eq!(
            Perturbation::None.correction(&sun, &ctx),
            PerturbationCorrection::default()
        );
    }

    #[test]
    fn test_context_uses_giant_planets() {
        let (sun, ctx) = context(0.0);
        assert_eq!(ctx.sun_mean_anomaly, sun.mean_anomaly);
        assert_eq!(ctx.jupiter_mean_anomaly, 19.8950);
        assert_eq!(ctx.saturn_mean_anomaly, 316.9670);
        assert_eq!(ctx.uranus_mean_anomaly, 142.5905);
    }

    #[test]
    fn test_corrections_are_bounded_by_their_amplitudes() {
        let amplitude = |terms: &[f64]| terms.iter().map(|t| t.abs()).sum::<f64>();
        let moon_lon = amplitude(&[
            1.274, 0.658, 0.186, 0.059, 0.057, 0.053, 0.046, 0.041, 0.035, 0.031, 0.015, 0.011,
        ]);
        let moon_lat = amplitude(&[0.173, 0.055, 0.046, 0.033, 0.017]);
        let jupiter = amplitude(&[0.332, 0.056, 0.042, 0.036, 0.022, 0.023, 0.016]);
        let saturn = amplitude(&[0.812, 0.229, 0.119, 0.046, 0.014]);
        let uranus = amplitude(&[0.040, 0.035, 0.015]);

        for k in 0..200 {
            let t = -20_000.0 + 197.3 * k as f64;
            let (_, ctx) = context(t);
            let moon = Body::Moon.orbital_elements(EpochOffset::new(t)).unwrap();

            let c = Perturbation::Moon.correction(&moon, &ctx);
            assert!(c.longitude.abs() <= moon_lon);
            assert!(c.latitude.abs() <= moon_lat);
            assert!(c.distance.abs() <= 1.04 + 1e-12);

            let c = Perturbation::Jupiter.correction(&moon, &ctx);
            assert!(c.longitude.abs() <= jupiter);
            assert_eq!((c.latitude, c.distance), (0.0, 0.0));

            let c = Perturbation::Saturn.correction(&moon, &ctx);
            assert!(c.longitude.abs() <= saturn);
            assert!(c.latitude.abs() <= 0.038 + 1e-12);

            let c = Perturbation::Uranus.correction(&moon, &ctx);
            assert!(c.longitude.abs() <= uranus);
        }
    }

    #[test]
    fn test_moon_evection_dominates() {
        // with D = 0 and Mm = 90°, evection (−1.274·sin(Mm − 2D)) is at its extreme
        let (sun, mut ctx) = context(0.0);
        ctx.sun_mean_anomaly = 0.0;
        ctx.sun_periapsis_argument = 0.0;
        let moon = OrbitalElements::new(sun.reference_epoch, 0.0, 5.1454, 270.0, 60.2666, 0.0549, 90.0);

        let c = Perturbation::Moon.correction(&moon, &ctx);
        assert!(c.longitude < -1.0);
    }

    /// Corrections on 1990-04-19 0h UT (d = −3543).
    fn worked_example() -> (OrbitalElements, PerturbationContext) {
        let d = EpochOffset::new(-3543.0);
        let sun = sun_elements(d);
        let moon = Body::Moon.orbital_elements(d).unwrap();
        (moon, PerturbationContext::new(d, &sun))
    }

    #[test]
    fn test_moon_table_values() {
        let (moon, ctx) = worked_example();
        let c = Perturbation::Moon.correction(&moon, &ctx);
        assert_abs_diff_eq!(c.longitude, -1.413222, epsilon = 1e-5);
        assert_abs_diff_eq!(c.latitude, -0.191915, epsilon = 1e-5);
        assert_abs_diff_eq!(c.distance, 0.006561, epsilon = 1e-5);
    }

    #[test]
    fn test_giant_planet_table_values() {
        let (moon, ctx) = worked_example();
        assert_abs_diff_eq!(ctx.jupiter_mean_anomaly, 85.523782, epsilon = 1e-5);
        assert_abs_diff_eq!(ctx.saturn_mean_anomaly, 198.474099, epsilon = 1e-5);
        assert_abs_diff_eq!(ctx.uranus_mean_anomaly, 101.045969, epsilon = 1e-5);

        let jupiter = Perturbation::Jupiter.correction(&moon, &ctx);
        assert_abs_diff_eq!(jupiter.longitude, -0.012000, epsilon = 1e-5);

        let saturn = Perturbation::Saturn.correction(&moon, &ctx);
        assert_abs_diff_eq!(saturn.longitude, -0.069870, epsilon = 1e-5);
        assert_abs_diff_eq!(saturn.latitude, 0.005293, epsilon = 1e-5);
        assert_eq!(saturn.distance, 0.0);

        let uranus = Perturbation::Uranus.correction(&moon, &ctx);
        assert_abs_diff_eq!(uranus.longitude, -0.032731, epsilon = 1e-5);
    }

    #[test]
    fn test_giant_planet_terms_use_saturn_not_sun() {
        let (moon, ctx) = worked_example();
        let reference = [
            Perturbation::Jupiter.correction(&moon, &ctx),
            Perturbation::Saturn.correction(&moon, &ctx),
            Perturbation::Uranus.correction(&moon, &ctx),
        ];

        // the Sun's anomaly only enters the Moon table
        let mut moved_sun = ctx;
        moved_sun.sun_mean_anomaly += 97.0;
        for (table, expected) in [Perturbation::Jupiter, Perturbation::Saturn, Perturbation::Uranus]
            .iter()
            .zip(reference)
        {
            assert_eq!(table.correction(&moon, &moved_sun), expected);
        }

        // with the Sun's anomaly in Saturn's slot, Jupiter's correction becomes +0.3685°
        let mut swapped = ctx;
        swapped.saturn_mean_anomaly = ctx.sun_mean_anomaly;
        let wrong = Perturbation::Jupiter.correction(&moon, &swapped);
        assert_abs_diff_eq!(wrong.longitude, 0.368545, epsilon = 1e-5);
        assert!((wrong.longitude - reference[0].longitude).abs() > 0.3);
    }
}
