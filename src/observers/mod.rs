//! # Observer & site geometry
//!
//! An [`Observer`] is a point on the Earth's surface given by its geodetic latitude and
//! longitude. It is validated once, then shared read-only by every body of a request.
//!
//! Besides the raw coordinates it provides the two quantities the topocentric correction
//! needs:
//!
//! - the **geocentric latitude** `gclat = φ − 0.1924°·sin 2φ`, which accounts for the
//!   Earth's flattening;
//! - the **distance to the Earth's center** `ρ = 0.99833 + 0.00167·cos 2φ`, in equatorial
//!   Earth radii.
//!
//! ## Units
//!
//! - Latitude: **degrees**, north positive, in `[−90, 90]`.
//! - Longitude: **degrees**, east positive.
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, GEOCENTRIC_LATITUDE_CORRECTION},
    kepler::{cosd, sind},
    orrery_errors::OrreryError,
};

/// A site on the Earth's surface.
///
/// Deserialization goes through [`Observer::new`], so an out-of-range site read from a
/// configuration file is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObserverRecord")]
pub struct Observer {
    /// Geodetic latitude in **degrees**, north positive.
    pub latitude: Degree,

    /// Longitude in **degrees** east of Greenwich.
    pub longitude: Degree,

    /// Optional human-readable site name.
    pub name: Option<String>,
}

impl Observer {
    /// Create an observer from its geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: Geodetic latitude in **degrees**, within `[−90, 90]`.
    /// * `longitude`: Longitude in **degrees** (east positive).
    ///
    /// Errors
    /// ----------
    /// * [`OrreryError::InvalidInput`] if a coordinate is not finite or the latitude is
    ///   out of range.
    pub fn new(latitude: Degree, longitude: Degree) -> Result<Observer, OrreryError> {
        let observer = Observer {
            latitude,
            longitude,
            name: None,
        };
        observer.validate()?;
        Ok(observer)
    }

    /// Check the coordinates again.
    ///
    /// The fields are public, so an observer built as a struct literal or mutated after
    /// construction is re-checked here before any computation uses it.
    pub fn validate(&self) -> Result<(), OrreryError> {
        if !self.latitude.is_finite() || self.latitude.abs() > 90.0 {
            return Err(OrreryError::InvalidInput {
                name: "observer latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() {
            return Err(OrreryError::InvalidInput {
                name: "observer longitude",
                value: self.longitude,
            });
        }
        Ok(())
    }

    /// Attach a site name to the observer.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The observer at the Earth's center, at latitude and longitude zero.
    pub fn geocenter() -> Self {
        Observer {
            latitude: 0.0,
            longitude: 0.0,
            name: Some("geocenter".to_string()),
        }
    }

    /// Geocentric latitude, in degrees: `φ − 0.1924°·sin 2φ`.
    pub fn geocentric_latitude(&self) -> Degree {
        self.latitude - GEOCENTRIC_LATITUDE_CORRECTION * sind(2.0 * self.latitude)
    }

    /// Distance from the Earth's center, in equatorial Earth radii: `0.99833 + 0.00167·cos 2φ`.
    pub fn rho(&self) -> f64 {
        0.99833 + 0.00167 * cosd(2.0 * self.latitude)
    }
}

/// Unchecked wire form of an [`Observer`].
#[derive(Deserialize)]
struct ObserverRecord {
    latitude: Degree,
    longitude: Degree,
    name: Option<String>,
}

impl TryFrom<ObserverRecord> for Observer {
    type Error = OrreryError;

    fn try_from(record: ObserverRecord) -> Result<Self, Self::Error> {
        let observer = Observer::new(record.latitude, record.longitude)?;
        Ok(Observer {
            name: record.name,
            ..observer
        })
    }
}
