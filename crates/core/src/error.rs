//! Error types for the fuel-model update engine.
//!
//! All failures are fatal for the run that raised them: the engine never
//! writes partial output or degrades to a best-effort result.

use std::path::PathBuf;

/// Error raised while compiling a ruleset file into a lookup table.
///
/// Every variant is detected before any raster is read, so a bad ruleset
/// can never waste a grid pass.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RulesetError {
    /// Returned when the ruleset file cannot be opened or read.
    #[error("failed to read ruleset {}: {reason}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when the CSV stream itself breaks (encoding, truncation)
    /// rather than a specific row.
    #[error("failed to read ruleset data: {reason}")]
    Read {
        /// Description of the underlying reader failure.
        reason: String,
    },

    /// Returned when the header row differs from the required names/order.
    #[error(
        "ruleset header mismatch: expected 'DIST_code,original_FM40_code,new_FM40_code', found '{found}'"
    )]
    HeaderMismatch {
        /// The header row actually present, comma-joined.
        found: String,
    },

    /// Returned when a row cannot be parsed into its three columns.
    #[error("ruleset row {row}: {reason}")]
    MalformedRow {
        /// 1-based data row index (the header row is not counted).
        row: usize,
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when the disturbance column holds a value outside the
    /// nine-code DIST domain.
    #[error("ruleset row {row}: invalid disturbance code {code}")]
    InvalidDistCode {
        /// 1-based data row index.
        row: usize,
        /// The offending value.
        code: i32,
    },

    /// Returned when the original-fuel column is not an FM40 code.
    #[error("ruleset row {row}: {code} is not an FM40 code")]
    InvalidOriginalCode {
        /// 1-based data row index.
        row: usize,
        /// The offending value.
        code: i32,
    },

    /// Returned when the original-fuel column names a non-burnable code.
    #[error("ruleset row {row}: original code {code} is non-burnable and cannot be remapped")]
    NonBurnableOriginal {
        /// 1-based data row index.
        row: usize,
        /// The non-burnable code.
        code: i32,
    },

    /// Returned when the new-fuel column is neither an output class label
    /// nor the representative code of one.
    #[error("ruleset row {row}: new code '{value}' is not in the output class set")]
    InvalidNewCode {
        /// 1-based data row index.
        row: usize,
        /// The offending column text.
        value: String,
    },

    /// Returned when the same (disturbance, original fuel) key is given
    /// more than one outcome. All conflicting keys are collected before
    /// failing, so one fix-up pass suffices.
    #[error(
        "{} rule key(s) defined with conflicting outcomes: {conflicts:?}",
        conflicts.len()
    )]
    AmbiguousRules {
        /// Conflicting `(disturbance code, original fuel code)` keys, sorted.
        conflicts: Vec<(i32, i32)>,
    },
}

/// Error raised by the disturbance stack, remap engine, or temporal check.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateError {
    /// Returned when a run names no disturbance years at all.
    #[error("no disturbance years supplied")]
    NoDisturbanceYears,

    /// Returned when the effective year does not strictly postdate every
    /// disturbance year.
    #[error(
        "effective year {effective_year} must be later than every disturbance year (violating years: {violating:?})"
    )]
    EffectiveYearNotAfter {
        /// The requested effective year.
        effective_year: u16,
        /// Every supplied year equal to or later than it, sorted.
        violating: Vec<u16>,
    },

    /// Returned when an input grid does not share the baseline's geometry.
    #[error("{grid} is not aligned with the baseline: {mismatch}")]
    Misaligned {
        /// Which grid disagreed (named by role and year where known).
        grid: String,
        /// First differing property, as reported by the grid comparison.
        mismatch: String,
    },
}
