// Tick value object
// The engine schedules everything in discrete server ticks.

use serde::{Deserialize, Serialize};

pub const TICKS_PER_SECOND: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticks(pub u32);

impl Ticks {
    /// Converts a seconds setting to ticks. Fractional results round down,
    /// but a configured interval always yields at least 1 tick: a value of 0
    /// means "as fast as possible", not "disabled".
    pub fn from_seconds(seconds: f64) -> Self {
        let ticks = (seconds * f64::from(TICKS_PER_SECOND)).floor();
        // Negated comparison so NaN falls into the floor branch too.
        if !(ticks >= 1.0) {
            Ticks(1)
        } else if ticks >= f64::from(u32::MAX) {
            Ticks(u32::MAX)
        } else {
            Ticks(ticks as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_seconds_floors_fractional_ticks() {
        assert_eq!(Ticks::from_seconds(1.0), Ticks(20));
        assert_eq!(Ticks::from_seconds(0.55), Ticks(11));
        assert_eq!(Ticks::from_seconds(0.59), Ticks(11));
    }

    #[test]
    fn from_seconds_has_a_floor_of_one_tick() {
        assert_eq!(Ticks::from_seconds(0.04), Ticks(1));
        assert_eq!(Ticks::from_seconds(0.0), Ticks(1));
        assert_eq!(Ticks::from_seconds(-3.0), Ticks(1));
    }

    #[test]
    fn from_seconds_treats_nan_as_the_minimum_interval() {
        // YAML `.nan` deserializes to a valid f64
        assert_eq!(Ticks::from_seconds(f64::NAN), Ticks(1));
    }
}
