use approx::assert_abs_diff_eq;
use orrery::bodies::Body;
use orrery::observers::Observer;
use orrery::orrery::SkySnapshot;
use orrery::positions::BodyPosition;
use orrery::time::EpochOffset;

/// Observer used by the reference scenarios (northern France).
pub fn reference_observer() -> Observer {
    Observer::new(50.123456, 3.123456)
        .unwrap()
        .with_name("reference")
}

/// 2000-01-01T05:30:00Z
pub fn reference_epoch() -> EpochOffset {
    EpochOffset::from_gregorian_utc(2000, 1, 1, 5, 30, 0).unwrap()
}

pub fn position(sky: &SkySnapshot, body: Body) -> &BodyPosition {
    sky.get(body)
        .unwrap_or_else(|| panic!("{body} missing from snapshot"))
        .as_ref()
        .unwrap_or_else(|err| panic!("{body} failed: {err}"))
}

/// Zodiac sign index (0 = Aries, 9 = Capricorn, ...) of an ecliptic longitude.
pub fn sign_index(longitude: f64) -> usize {
    (longitude / 30.0).floor() as usize
}

pub fn assert_positions_identical(actual: &BodyPosition, expected: &BodyPosition) {
    assert_eq!(actual.body, expected.body);
    assert_abs_diff_eq!(
        actual.ecliptic_longitude(),
        expected.ecliptic_longitude(),
        epsilon = 0.0
    );
    assert_abs_diff_eq!(
        actual.ecliptic_latitude(),
        expected.ecliptic_latitude(),
        epsilon = 0.0
    );
    assert_abs_diff_eq!(actual.right_ascension(), expected.right_ascension(), epsilon = 0.0);
    assert_abs_diff_eq!(actual.declination(), expected.declination(), epsilon = 0.0);
    assert_abs_diff_eq!(actual.azimuth(), expected.azimuth(), epsilon = 0.0);
    assert_abs_diff_eq!(actual.altitude(), expected.altitude(), epsilon = 0.0);
    assert_eq!(actual, expected);
}
