//! Scott & Burgan 40 (FM40) fuel model codes and classes.
//!
//! The baseline and output rasters carry FM40 codes. Every code belongs to
//! exactly one class; the non-burnable class can never be the target of a
//! remap rule.

use std::fmt;

/// FM40 fuel model class.
///
/// Burnable classes form the closed output vocabulary of a ruleset: a rule's
/// new code is always the representative code of one of these classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelClass {
    /// GR: grass (101-109)
    Grass,
    /// GS: grass-shrub (121-124)
    GrassShrub,
    /// SH: shrub (141-149)
    Shrub,
    /// TU: timber-understory (161-165)
    TimberUnderstory,
    /// TL: timber-litter (181-189)
    TimberLitter,
    /// SB: slash-blowdown (201-204)
    SlashBlowdown,
    /// NB: non-burnable (91-93, 98, 99)
    NonBurnable,
}

impl FuelClass {
    /// All classes, burnable first.
    pub const ALL: [Self; 7] = [
        Self::Grass,
        Self::GrassShrub,
        Self::Shrub,
        Self::TimberUnderstory,
        Self::TimberLitter,
        Self::SlashBlowdown,
        Self::NonBurnable,
    ];

    /// Classify a raw code, or `None` if it is not an FM40 code.
    #[must_use]
    pub const fn classify(code: i32) -> Option<Self> {
        match code {
            91..=93 | 98 | 99 => Some(Self::NonBurnable),
            101..=109 => Some(Self::Grass),
            121..=124 => Some(Self::GrassShrub),
            141..=149 => Some(Self::Shrub),
            161..=165 => Some(Self::TimberUnderstory),
            181..=189 => Some(Self::TimberLitter),
            201..=204 => Some(Self::SlashBlowdown),
            _ => None,
        }
    }

    /// Two-letter class label as it appears in ruleset files.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grass => "GR",
            Self::GrassShrub => "GS",
            Self::Shrub => "SH",
            Self::TimberUnderstory => "TU",
            Self::TimberLitter => "TL",
            Self::SlashBlowdown => "SB",
            Self::NonBurnable => "NB",
        }
    }

    /// Representative code of the class (its first member).
    ///
    /// A rule whose new code is written as a class label resolves to this
    /// code, so the whole class is represented by a single output value.
    #[must_use]
    pub const fn representative_code(self) -> i32 {
        match self {
            Self::Grass => 101,
            Self::GrassShrub => 121,
            Self::Shrub => 141,
            Self::TimberUnderstory => 161,
            Self::TimberLitter => 181,
            Self::SlashBlowdown => 201,
            Self::NonBurnable => 91,
        }
    }

    /// Parse a class label, case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for FuelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated FM40 fuel model code.
///
/// Construction via [`FuelCode::try_new`] guarantees the code is in the FM40
/// domain; the class is resolved once at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuelCode {
    code: i32,
    class: FuelClass,
}

impl FuelCode {
    /// Validate a raw code, returning `None` for anything outside the FM40
    /// domain.
    #[must_use]
    pub const fn try_new(code: i32) -> Option<Self> {
        match FuelClass::classify(code) {
            Some(class) => Some(Self { code, class }),
            None => None,
        }
    }

    /// The raw integer code.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.code
    }

    /// The class this code belongs to.
    #[must_use]
    pub const fn class(self) -> FuelClass {
        self.class
    }

    /// Whether the code can carry fire. Non-burnable codes are never remapped.
    #[must_use]
    pub const fn is_burnable(self) -> bool {
        !matches!(self.class, FuelClass::NonBurnable)
    }
}

impl fmt::Display for FuelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
