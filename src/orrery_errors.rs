use thiserror::Error;

use crate::constants::Degree;

/// Every failure the position pipeline can report.
///
/// None of these is fatal: a failing body yields an `Err` in its own slot of a
/// [`SkySnapshot`](crate::orrery::SkySnapshot) while the other bodies are still computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrreryError {
    #[error(
        "Kepler solver did not converge after {iterations} iterations (M = {mean_anomaly}°, e = {eccentricity})"
    )]
    KeplerNonConvergence {
        mean_anomaly: Degree,
        eccentricity: f64,
        iterations: usize,
    },

    #[error("Eccentricity {0} is outside the elliptic domain [0, 1)")]
    UnsupportedEccentricity(f64),

    #[error("Domain error during {stage}: argument {value} is outside [-1, 1]")]
    DomainError { stage: &'static str, value: f64 },

    #[error("Non-finite value produced during {0}")]
    NonFinite(&'static str),

    #[error("Invalid input {name}: {value}")]
    InvalidInput { name: &'static str, value: f64 },

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("Unknown body name: {0}")]
    UnknownBody(String),
}

/// Fail with [`OrreryError::NonFinite`] unless every value is finite.
pub(crate) fn ensure_finite(stage: &'static str, values: &[f64]) -> Result<(), OrreryError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(OrreryError::NonFinite(stage))
    }
}
