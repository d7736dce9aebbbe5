//! Section distance type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a distance is not a positive integer in range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance {value}: {reason}")]
pub struct InvalidDistance {
    value: i64,
    reason: &'static str,
}

/// A strictly positive section distance.
///
/// Wire values arrive as signed integers so that a negative distance is
/// rejected here rather than by the JSON decoder.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Distance;
///
/// let d = Distance::new(10).unwrap();
/// assert_eq!(d.get(), 10);
///
/// assert!(Distance::new(0).is_err());
/// assert!(Distance::new(-3).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Distance(u32);

impl Distance {
    /// Largest representable distance.
    pub const MAX: Distance = Distance(u32::MAX);

    /// Parse a distance from a signed wire value.
    pub fn new(value: i64) -> Result<Self, InvalidDistance> {
        if value <= 0 {
            return Err(InvalidDistance {
                value,
                reason: "must be positive",
            });
        }
        u32::try_from(value).map(Distance).map_err(|_| InvalidDistance {
            value,
            reason: "out of range",
        })
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Sum of two distances, or `None` if it does not fit.
    pub fn checked_add(self, other: Distance) -> Option<Distance> {
        self.0.checked_add(other.0).map(Distance)
    }

    /// Difference of two distances, or `None` unless the result is positive.
    pub fn checked_sub(self, other: Distance) -> Option<Distance> {
        match self.0.checked_sub(other.0) {
            Some(0) | None => None,
            Some(rest) => Some(Distance(rest)),
        }
    }
}

impl TryFrom<i64> for Distance {
    type Error = InvalidDistance;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Distance::new(value)
    }
}

impl From<Distance> for u32 {
    fn from(d: Distance) -> u32 {
        d.0
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Distance {
        Distance::new(v).unwrap()
    }

    #[test]
    fn accepts_positive() {
        assert_eq!(d(1).get(), 1);
        assert_eq!(d(u32::MAX as i64), Distance::MAX);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(Distance::new(0).is_err());
        assert!(Distance::new(-1).is_err());
        assert!(Distance::new(i64::MIN).is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = Distance::new(u32::MAX as i64 + 1).unwrap_err();
        assert_eq!(err.to_string(), "invalid distance 4294967296: out of range");
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(d(5).checked_add(d(3)), Some(d(8)));
        assert_eq!(Distance::MAX.checked_add(d(1)), None);
    }

    #[test]
    fn checked_sub_requires_positive_result() {
        assert_eq!(d(10).checked_sub(d(4)), Some(d(6)));
        assert_eq!(d(10).checked_sub(d(10)), None);
        assert_eq!(d(10).checked_sub(d(11)), None);
    }

    #[test]
    fn serde_validates() {
        let ok: Distance = serde_json::from_str("7").unwrap();
        assert_eq!(ok, d(7));
        assert!(serde_json::from_str::<Distance>("0").is_err());
        assert!(serde_json::from_str::<Distance>("-2").is_err());
        assert_eq!(serde_json::to_string(&d(7)).unwrap(), "7");
    }
}
