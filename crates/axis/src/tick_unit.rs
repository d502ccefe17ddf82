//! Zoom density to tick granularity lookup

use serde::{Deserialize, Serialize};

const MINUTE: i64 = 60;
const HOUR: i64 = MINUTE * 60;
const DAY: i64 = HOUR * 24;
const FOUR_WEEKS: i64 = DAY * 28;

/// Labeled (major) and unlabeled (minor) tick spacing, in seconds.
/// `minor` always divides `major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeUnit {
    pub major: i64,
    pub minor: i64,
}

impl TimeUnit {
    pub const fn new(major: i64, minor: i64) -> Self {
        Self { major, minor }
    }

    pub fn minors_per_major(&self) -> i64 {
        self.major / self.minor
    }
}

/// `(exclusive upper bound on seconds-per-pixel, unit)`, ascending
pub const TICK_UNITS: [(f64, TimeUnit); 17] = [
    (0.2, TimeUnit::new(10, 1)),
    (1.0, TimeUnit::new(MINUTE, 10)),
    (2.5, TimeUnit::new(5 * MINUTE, MINUTE)),
    (5.0, TimeUnit::new(10 * MINUTE, MINUTE)),
    (12.5, TimeUnit::new(30 * MINUTE, 5 * MINUTE)),
    (25.0, TimeUnit::new(HOUR, 10 * MINUTE)),
    (50.0, TimeUnit::new(2 * HOUR, 20 * MINUTE)),
    (75.0, TimeUnit::new(3 * HOUR, 30 * MINUTE)),
    (150.0, TimeUnit::new(6 * HOUR, HOUR)),
    (300.0, TimeUnit::new(12 * HOUR, 2 * HOUR)),
    (600.0, TimeUnit::new(DAY, 6 * HOUR)),
    (1200.0, TimeUnit::new(2 * DAY, 12 * HOUR)),
    (2400.0, TimeUnit::new(4 * DAY, DAY)),
    (5000.0, TimeUnit::new(7 * DAY, DAY)),
    (10000.0, TimeUnit::new(14 * DAY, 2 * DAY)),
    (20000.0, TimeUnit::new(FOUR_WEEKS, 4 * DAY)),
    (40000.0, TimeUnit::new(2 * FOUR_WEEKS, 7 * DAY)),
];

/// Effectively unbounded unit for huge or degenerate ranges
pub const FALLBACK_UNIT: TimeUnit = TimeUnit::new(FOUR_WEEKS * 100_000, DAY * 10_000);

/// Pick the tick granularity for a zoom density
pub fn select_unit(seconds_per_pixel: f64) -> TimeUnit {
    if seconds_per_pixel.is_nan() {
        return FALLBACK_UNIT;
    }
    TICK_UNITS
        .iter()
        .find(|(threshold, _)| seconds_per_pixel < *threshold)
        .map(|(_, unit)| *unit)
        .unwrap_or(FALLBACK_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_coarsening() {
        for pair in TICK_UNITS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1.major <= pair[1].1.major);
        }
        assert!(TICK_UNITS.last().unwrap().1.major <= FALLBACK_UNIT.major);
    }

    #[test]
    fn test_minor_divides_major() {
        let units = TICK_UNITS.iter().map(|(_, unit)| unit);
        for unit in units.chain(std::iter::once(&FALLBACK_UNIT)) {
            assert_eq!(unit.major % unit.minor, 0, "{unit:?}");
            assert!(unit.minors_per_major() >= 2);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(select_unit(0.0), TimeUnit::new(10, 1));
        assert_eq!(select_unit(-3.0), TimeUnit::new(10, 1));
        assert_eq!(select_unit(0.15), TimeUnit::new(10, 1));
        assert_eq!(select_unit(0.2), TimeUnit::new(60, 10));
        assert_eq!(select_unit(40000.0), FALLBACK_UNIT);
        assert_eq!(select_unit(f64::INFINITY), FALLBACK_UNIT);
        assert_eq!(select_unit(f64::NAN), FALLBACK_UNIT);
    }

    #[test]
    fn test_day_granularity() {
        let unit = select_unit(3000.0);
        assert_eq!(unit, TimeUnit::new(7 * DAY, DAY));
        assert!(unit.major >= DAY);
    }
}
