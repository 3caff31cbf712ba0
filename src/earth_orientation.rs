use crate::constants::{Degree, OBLIQUITY_AT_EPOCH, OBLIQUITY_RATE};
use crate::time::EpochOffset;

/// Compute the mean obliquity of the ecliptic at a given epoch offset.
///
/// The obliquity ε is the angle between the Earth's equator and the ecliptic plane.
/// Over the few millennia this low-precision model is meant for, it is well described
/// by a straight line in the day count:
///
/// ```text
/// ε(d) = 23.4393° − 3.563·10⁻⁷ · d
/// ```
///
/// Arguments
/// ---------
/// * `d`: epoch offset in days.
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in degrees.
///
/// # See also
/// * [`ecliptic_to_equatorial`](crate::ref_system::ecliptic_to_equatorial) – rotates by this angle
pub fn obliquity(d: EpochOffset) -> Degree {
    OBLIQUITY_AT_EPOCH - OBLIQUITY_RATE * d.days()
}
