//! Disturbance (DIST) codes and the burn-severity vocabulary they are
//! derived from.
//!
//! A DIST code packs a fire's severity and its age relative to the effective
//! year into one three-digit value: `100 + severity * 10 + time_code`. Nine
//! codes exist; everything else in a disturbance grid is the
//! [`NO_DISTURBANCE`] sentinel.

use std::fmt;

/// Cell value marking the absence of disturbance in DIST and composite grids.
pub const NO_DISTURBANCE: i32 = 0;

/// Burn severity class as read from an annual severity raster (MTBS
/// convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnSeverity {
    /// Class 1: unburned to low severity.
    UnburnedToLow = 1,
    /// Class 2: low severity.
    Low = 2,
    /// Class 3: moderate severity.
    Moderate = 3,
    /// Class 4: high severity.
    High = 4,
    /// Class 5: increased greenness post-fire.
    IncreasedGreenness = 5,
}

impl BurnSeverity {
    /// Decode a raster cell. Anything outside the five classes (including
    /// the raster's nodata value) is `None`.
    #[must_use]
    pub const fn from_cell(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::UnburnedToLow),
            2 => Some(Self::Low),
            3 => Some(Self::Moderate),
            4 => Some(Self::High),
            5 => Some(Self::IncreasedGreenness),
            _ => None,
        }
    }

    /// The disturbance severity this burn class maps to.
    ///
    /// Unburned-to-low and increased greenness both count as low severity.
    #[must_use]
    pub const fn dist_severity(self) -> Severity {
        match self {
            Self::UnburnedToLow | Self::Low | Self::IncreasedGreenness => Severity::Low,
            Self::Moderate => Severity::Moderate,
            Self::High => Severity::High,
        }
    }
}

/// Disturbance severity, the tens digit of a DIST code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Low severity (digit 1).
    Low = 1,
    /// Moderate severity (digit 2).
    Moderate = 2,
    /// High severity (digit 3).
    High = 3,
}

impl Severity {
    /// The digit encoded into a DIST code.
    #[must_use]
    pub const fn digit(self) -> i32 {
        self as i32
    }

    /// Decode a tens digit.
    #[must_use]
    pub const fn from_digit(digit: i32) -> Option<Self> {
        match digit {
            1 => Some(Self::Low),
            2 => Some(Self::Moderate),
            3 => Some(Self::High),
            _ => None,
        }
    }
}

/// Years between the fire and the effective year, the ones digit of a DIST
/// code. Fires more than ten years old carry no code at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeSinceFire {
    /// Less than one year (digit 1).
    UnderOneYear = 1,
    /// One to five years (digit 2).
    OneToFive = 2,
    /// Six to ten years (digit 3).
    SixToTen = 3,
}

impl TimeSinceFire {
    /// The digit encoded into a DIST code.
    #[must_use]
    pub const fn digit(self) -> i32 {
        self as i32
    }

    /// Decode a ones digit.
    #[must_use]
    pub const fn from_digit(digit: i32) -> Option<Self> {
        match digit {
            1 => Some(Self::UnderOneYear),
            2 => Some(Self::OneToFive),
            3 => Some(Self::SixToTen),
            _ => None,
        }
    }

    /// Classify the gap between fire year and effective year.
    ///
    /// Returns `None` outside the ten-year aging window: fires dated after
    /// the effective year (negative gap) and fires more than ten years old
    /// contribute no disturbance.
    #[must_use]
    pub const fn from_years_elapsed(years: i32) -> Option<Self> {
        match years {
            0 => Some(Self::UnderOneYear),
            1..=5 => Some(Self::OneToFive),
            6..=10 => Some(Self::SixToTen),
            _ => None,
        }
    }
}

/// A validated DIST code.
///
/// The nine-value domain is `{111, 112, 113, 121, 122, 123, 131, 132, 133}`.
/// Severity and time components are resolved at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistCode {
    code: i32,
    severity: Severity,
    time_since: TimeSinceFire,
}

impl DistCode {
    /// Validate a raw cell value, returning `None` for anything outside the
    /// nine-code domain (fuel codes, nodata, garbage).
    #[must_use]
    pub const fn try_new(code: i32) -> Option<Self> {
        if code / 100 != 1 {
            return None;
        }
        let severity = match Severity::from_digit((code / 10) % 10) {
            Some(severity) => severity,
            None => return None,
        };
        let time_since = match TimeSinceFire::from_digit(code % 10) {
            Some(time_since) => time_since,
            None => return None,
        };
        Some(Self {
            code,
            severity,
            time_since,
        })
    }

    /// Build the code for a severity/age pair.
    #[must_use]
    pub const fn compose(severity: Severity, time_since: TimeSinceFire) -> Self {
        Self {
            code: 100 + severity.digit() * 10 + time_since.digit(),
            severity,
            time_since,
        }
    }

    /// The raw integer code.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.code
    }

    /// The severity component.
    #[must_use]
    pub const fn severity(self) -> Severity {
        self.severity
    }

    /// The time-since-fire component.
    #[must_use]
    pub const fn time_since(self) -> TimeSinceFire {
        self.time_since
    }

    /// Total order used when several years disturb the same pixel: severity
    /// first, then recency. Rank 1 (high severity, under one year) is the
    /// most impactful; rank 9 (low severity, six to ten years) the least.
    #[must_use]
    pub const fn impact_rank(self) -> u8 {
        ((3 - self.severity.digit()) * 3 + self.time_since.digit()) as u8
    }
}

impl fmt::Display for DistCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_matches_digit_encoding() {
        assert_eq!(
            DistCode::compose(Severity::High, TimeSinceFire::UnderOneYear).value(),
            131
        );
        assert_eq!(
            DistCode::compose(Severity::Low, TimeSinceFire::SixToTen).value(),
            113
        );
        assert_eq!(
            DistCode::compose(Severity::Moderate, TimeSinceFire::OneToFive).value(),
            122
        );
    }

    #[test]
    fn test_try_new_accepts_exactly_the_nine_codes() {
        for code in [111, 112, 113, 121, 122, 123, 131, 132, 133] {
            let dist = DistCode::try_new(code).unwrap();
            assert_eq!(dist.value(), code);
        }
        for code in [0, -1, 1, 100, 101, 110, 114, 120, 130, 134, 141, 143, 211, 1112, -9999] {
            assert!(DistCode::try_new(code).is_none(), "code {code}");
        }
    }

    #[test]
    fn test_components_roundtrip() {
        let dist = DistCode::try_new(123).unwrap();
        assert_eq!(dist.severity(), Severity::Moderate);
        assert_eq!(dist.time_since(), TimeSinceFire::SixToTen);
        assert_eq!(DistCode::compose(dist.severity(), dist.time_since()), dist);
    }

    #[test]
    fn test_impact_ranking_table() {
        let expected = [
            (131, 1),
            (132, 2),
            (133, 3),
            (121, 4),
            (122, 5),
            (123, 6),
            (111, 7),
            (112, 8),
            (113, 9),
        ];
        for (code, rank) in expected {
            assert_eq!(
                DistCode::try_new(code).unwrap().impact_rank(),
                rank,
                "code {code}"
            );
        }
    }

    #[test]
    fn test_ranking_prefers_severity_then_recency() {
        let rank = |code: i32| DistCode::try_new(code).unwrap().impact_rank();
        // Any high-severity code outranks any moderate one, regardless of age.
        assert!(rank(133) < rank(121));
        // Within a severity, more recent wins.
        assert!(rank(132) < rank(133));
        assert!(rank(111) < rank(112));
    }

    #[test]
    fn test_time_since_fire_window() {
        assert_eq!(
            TimeSinceFire::from_years_elapsed(0),
            Some(TimeSinceFire::UnderOneYear)
        );
        assert_eq!(
            TimeSinceFire::from_years_elapsed(1),
            Some(TimeSinceFire::OneToFive)
        );
        assert_eq!(
            TimeSinceFire::from_years_elapsed(5),
            Some(TimeSinceFire::OneToFive)
        );
        assert_eq!(
            TimeSinceFire::from_years_elapsed(6),
            Some(TimeSinceFire::SixToTen)
        );
        assert_eq!(
            TimeSinceFire::from_years_elapsed(10),
            Some(TimeSinceFire::SixToTen)
        );
        assert_eq!(TimeSinceFire::from_years_elapsed(11), None);
        assert_eq!(TimeSinceFire::from_years_elapsed(-1), None);
    }

    #[test]
    fn test_burn_severity_mapping() {
        assert_eq!(
            BurnSeverity::from_cell(1).unwrap().dist_severity(),
            Severity::Low
        );
        assert_eq!(
            BurnSeverity::from_cell(2).unwrap().dist_severity(),
            Severity::Low
        );
        assert_eq!(
            BurnSeverity::from_cell(3).unwrap().dist_severity(),
            Severity::Moderate
        );
        assert_eq!(
            BurnSeverity::from_cell(4).unwrap().dist_severity(),
            Severity::High
        );
        // Increased greenness still counts as a low-severity burn.
        assert_eq!(
            BurnSeverity::from_cell(5).unwrap().dist_severity(),
            Severity::Low
        );

        for value in [0, 6, -1, -9999, 131] {
            assert!(BurnSeverity::from_cell(value).is_none(), "value {value}");
        }
    }
}
