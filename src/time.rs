//! # Time scale of the position pipeline
//!
//! All orbital-element formulas are linear (or low-order) polynomials in a single
//! continuous day count `d`, the [`EpochOffset`]. Its reference instant is
//! **1999-12-31T00:00:00 UTC** (Julian Date 2451543.5), so `d = 1.0` is 2000-01-01 at 0h UT
//! and the fractional part of `d` is directly the Universal Time of day.
//!
//! The offset is *not* a Julian Date. Conversions from Julian Dates, from
//! [`hifitime::Epoch`] instants and from Gregorian UTC components happen here, at the
//! boundary, and nowhere else in the crate.
//!
//! The module also hosts [`SiderealTime`], computed once per request from the Sun's mean
//! longitude and shared read-only by every body.
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Days, Degree, Hour, DEG_PER_HOUR, EPOCH_OFFSET_JD, FULL_TURN, HOURS_PER_DAY,
};
use crate::kepler::principal_angle;
use crate::orbit_type::OrbitalElements;
use crate::orrery_errors::OrreryError;

/// Continuous day count since 1999-12-31T00:00:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct EpochOffset(Days);

impl EpochOffset {
    /// Wrap a raw day count. No validation is done; see [`EpochOffset::checked`].
    pub const fn new(d: Days) -> Self {
        EpochOffset(d)
    }

    /// Wrap a raw day count, rejecting NaN and infinities.
    pub fn checked(d: Days) -> Result<Self, OrreryError> {
        if d.is_finite() {
            Ok(EpochOffset(d))
        } else {
            Err(OrreryError::InvalidInput {
                name: "epoch offset",
                value: d,
            })
        }
    }

    /// Number of days since the reference instant.
    pub fn days(self) -> Days {
        self.0
    }

    /// Convert a UTC Julian Date into an epoch offset.
    pub fn from_julian_date(jd: f64) -> Self {
        EpochOffset(jd - EPOCH_OFFSET_JD)
    }

    /// UTC Julian Date of this epoch offset.
    pub fn julian_date(self) -> f64 {
        self.0 + EPOCH_OFFSET_JD
    }

    /// Convert a [`hifitime::Epoch`] into an epoch offset, through its UTC Julian Date.
    pub fn from_epoch(epoch: &Epoch) -> Self {
        Self::from_julian_date(epoch.to_jde_utc_days())
    }

    /// The [`hifitime::Epoch`] (UTC) of this epoch offset.
    pub fn to_epoch(self) -> Epoch {
        Epoch::from_jde_utc(self.julian_date())
    }

    /// Build an epoch offset from Gregorian UTC components.
    ///
    /// Arguments
    /// ---------
    /// * `year`, `month`, `day`, `hour`, `minute`, `second`: UTC calendar components.
    ///
    /// Return
    /// ------
    /// * The epoch offset, or [`OrreryError::InvalidDate`] if hifitime rejects the components.
    pub fn from_gregorian_utc(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, OrreryError> {
        let epoch = Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, 0)
            .map_err(|err| OrreryError::InvalidDate(err.to_string()))?;
        Ok(Self::from_epoch(&epoch))
    }

    /// Universal Time of day in hours, `[0, 24)`.
    pub fn universal_time_hours(self) -> Hour {
        (self.0 - self.0.floor()) * HOURS_PER_DAY
    }

    /// The epoch offset shifted by `dt` days.
    pub fn shifted(self, dt: Days) -> Self {
        EpochOffset(self.0 + dt)
    }
}

impl From<f64> for EpochOffset {
    fn from(d: f64) -> Self {
        EpochOffset(d)
    }
}

/// Wrap an hour angle or time of day into `[0, 24)`.
pub fn principal_hours(h: Hour) -> Hour {
    principal_angle(h * DEG_PER_HOUR) / DEG_PER_HOUR
}

/// Greenwich and local mean sidereal time of a request, in hours.
///
/// Fields
/// ------
/// * `gmst0`: sidereal time at Greenwich at 0h UT.
/// * `gmst`: sidereal time at Greenwich at the request instant.
/// * `lst`: local sidereal time at the observer's longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiderealTime {
    pub gmst0: Hour,
    pub gmst: Hour,
    pub lst: Hour,
}

impl SiderealTime {
    /// Compute the sidereal time triple from the Sun's mean elements.
    ///
    /// Arguments
    /// ---------
    /// * `d`: epoch offset of the request.
    /// * `sun`: the Sun's mean orbital elements at `d`.
    /// * `longitude`: observer longitude in degrees, east positive.
    ///
    /// Details
    /// -------
    /// ```text
    /// Ls    = (M☉ + w☉) mod 360
    /// GMST0 = Ls / 15 + 12h
    /// GMST  = GMST0 + UT
    /// LST   = GMST + longitude / 15
    /// ```
    /// Each value is wrapped into `[0, 24)`.
    pub fn new(d: EpochOffset, sun: &OrbitalElements, longitude: Degree) -> Self {
        let mean_longitude = principal_angle(sun.mean_anomaly + sun.periapsis_argument);

        let gmst0 = mean_longitude / DEG_PER_HOUR + FULL_TURN / 2.0 / DEG_PER_HOUR;
        let gmst = gmst0 + d.universal_time_hours();
        let lst = gmst + longitude / DEG_PER_HOUR;

        SiderealTime {
            gmst0: principal_hours(gmst0),
            gmst: principal_hours(gmst),
            lst: principal_hours(lst),
        }
    }

    /// Compute the sidereal time at `d` for an observer at `longitude`, deriving the Sun's
    /// mean elements itself.
    pub fn at(d: EpochOffset, longitude: Degree) -> Self {
        Self::new(d, &crate::bodies::sun::sun_elements(d), longitude)
    }

    /// Local sidereal time expressed as an angle, in degrees.
    pub fn local_degrees(&self) -> Degree {
        self.lst * DEG_PER_HOUR
    }
}
