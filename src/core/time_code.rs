//! Time coordinates for attribute samples.
//!
//! An attribute value lives either at the `Default` coordinate (constant
//! for all time) or at a specific sampled coordinate.

use crate::util::Chrono;
use std::cmp::Ordering;
use std::fmt;

/// Coordinate at which a sample is written.
#[derive(Clone, Copy, Debug, Default)]
pub enum TimeCode {
    /// Constant value, ordered before every sampled coordinate.
    #[default]
    Default,
    /// Sampled value at a time coordinate.
    Time(Chrono),
}

impl TimeCode {
    /// Create a sampled coordinate.
    #[inline]
    pub const fn at(time: Chrono) -> Self {
        Self::Time(time)
    }

    /// Check if this is the constant coordinate.
    #[inline]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Sampled time, `None` for the constant coordinate.
    #[inline]
    pub const fn time(&self) -> Option<Chrono> {
        match self {
            Self::Default => None,
            Self::Time(t) => Some(*t),
        }
    }
}

impl PartialEq for TimeCode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeCode {}

impl PartialOrd for TimeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Default, Self::Default) => Ordering::Equal,
            (Self::Default, Self::Time(_)) => Ordering::Less,
            (Self::Time(_), Self::Default) => Ordering::Greater,
            (Self::Time(a), Self::Time(b)) => a.total_cmp(b),
        }
    }
}

impl std::hash::Hash for TimeCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Default => 0u8.hash(state),
            Self::Time(t) => {
                1u8.hash(state);
                t.to_bits().hash(state);
            }
        }
    }
}

impl From<Chrono> for TimeCode {
    fn from(time: Chrono) -> Self {
        Self::Time(time)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Time(t) => write!(f, "{}", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_orders_first() {
        assert!(TimeCode::Default < TimeCode::at(-1.0e9));
        assert!(TimeCode::Default < TimeCode::at(0.0));
        assert!(TimeCode::at(1.0) < TimeCode::at(2.0));
        assert_eq!(TimeCode::Default, TimeCode::default());
    }

    #[test]
    fn test_time_accessors() {
        assert!(TimeCode::Default.is_default());
        assert_eq!(TimeCode::Default.time(), None);
        let t: TimeCode = 24.0.into();
        assert_eq!(t.time(), Some(24.0));
        assert_eq!(t.to_string(), "24");
    }
}
