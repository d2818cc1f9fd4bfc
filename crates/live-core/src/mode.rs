#![forbid(unsafe_code)]

//! Evaluation mode: whether a cell recomputes on every read or holds a
//! snapshot taken at construction.
//!
//! The mode is an explicit argument to every constructor. It is consulted
//! exactly once, when the cell is built; nothing re-checks it on read.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How a newly constructed cell stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvaluationMode {
    /// Keep the source function and call it on every read.
    #[default]
    Live,
    /// Call the source function once, now, and keep the result.
    Frozen,
}

impl EvaluationMode {
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    #[must_use]
    pub const fn is_frozen(self) -> bool {
        matches!(self, Self::Frozen)
    }

    /// Mode of a composite built from operands in `self` and `other`.
    ///
    /// Any frozen operand freezes the composite.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Live, Self::Live) => Self::Live,
            _ => Self::Frozen,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Frozen => "frozen",
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("live") {
            Ok(Self::Live)
        } else if trimmed.eq_ignore_ascii_case("frozen") {
            Ok(Self::Frozen)
        } else {
            Err(ConfigError::InvalidMode {
                value: s.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_live() {
        assert_eq!(EvaluationMode::default(), EvaluationMode::Live);
    }

    #[test]
    fn combine_freezes_on_any_frozen() {
        use EvaluationMode::*;
        assert_eq!(Live.combine(Live), Live);
        assert_eq!(Live.combine(Frozen), Frozen);
        assert_eq!(Frozen.combine(Live), Frozen);
        assert_eq!(Frozen.combine(Frozen), Frozen);
    }

    #[test]
    fn parse_round_trip() {
        assert_eq!("live".parse::<EvaluationMode>(), Ok(EvaluationMode::Live));
        assert_eq!(" FROZEN ".parse::<EvaluationMode>(), Ok(EvaluationMode::Frozen));
        assert_eq!(EvaluationMode::Frozen.to_string(), "frozen");
        assert!("paused".parse::<EvaluationMode>().is_err());
    }
}
