//! Ruleset compilation: turning the tabular remap definition into a
//! deterministic lookup.
//!
//! A ruleset row reads "pixels carrying this disturbance code and this
//! original fuel code become that fuel class". Compilation validates every
//! row against the code domains, rejects ambiguous definitions, and builds
//! a hash table the remap engine can query per pixel. Row order never
//! affects the result.

use std::collections::hash_map::Entry;
use std::io::Read;
use std::path::Path;

use csv::Trim;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::info;

use crate::codes::{DistCode, FuelClass, FuelCode};
use crate::error::RulesetError;

/// Required header row, in order.
const EXPECTED_HEADERS: [&str; 3] = ["DIST_code", "original_FM40_code", "new_FM40_code"];

#[derive(Debug, Deserialize)]
struct RuleRow {
    #[serde(rename = "DIST_code")]
    dist_code: i32,
    #[serde(rename = "original_FM40_code")]
    original_code: i32,
    #[serde(rename = "new_FM40_code")]
    new_code: String,
}

/// Result of querying the ruleset with raw cell values.
///
/// Only `Mapped` changes a pixel. `Absent` (no rule for a valid pair) and
/// `NotApplicable` (values outside the code domains, or a non-burnable
/// original) both mean "leave the pixel alone"; neither is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// A rule matched; the pixel takes this fuel code.
    Mapped(FuelCode),
    /// Both values are valid but no rule covers the pair.
    Absent,
    /// The pair can never match a rule: invalid disturbance value, invalid
    /// fuel value, or a non-burnable original fuel.
    NotApplicable,
}

/// A compiled, immutable remap table keyed by
/// `(disturbance code, original fuel code)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    rules: FxHashMap<(DistCode, FuelCode), FuelCode>,
}

impl Ruleset {
    /// Compile a ruleset from a CSV file.
    ///
    /// # Errors
    /// Returns [`RulesetError::Io`] if the file cannot be opened, otherwise
    /// any error [`Ruleset::from_csv_reader`] produces.
    pub fn from_csv_path(path: &Path) -> Result<Self, RulesetError> {
        let file = std::fs::File::open(path).map_err(|e| RulesetError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_csv_reader(file)
    }

    /// Compile a ruleset from any CSV source.
    ///
    /// The header must be exactly `DIST_code,original_FM40_code,new_FM40_code`.
    /// Field whitespace is trimmed. Rows repeating a key with the same
    /// outcome are collapsed; rows repeating a key with a different outcome
    /// are collected across the whole file and reported together.
    ///
    /// # Errors
    /// Returns a [`RulesetError`] describing the first malformed or
    /// out-of-domain row, or every ambiguous key if the rows conflict.
    pub fn from_csv_reader<R: Read>(source: R) -> Result<Self, RulesetError> {
        let mut reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(source);

        let headers = reader.headers().map_err(|e| RulesetError::Read {
            reason: e.to_string(),
        })?;
        let found: Vec<&str> = headers.iter().collect();
        if found != EXPECTED_HEADERS {
            return Err(RulesetError::HeaderMismatch {
                found: found.join(","),
            });
        }

        let mut rules: FxHashMap<(DistCode, FuelCode), FuelCode> = FxHashMap::default();
        let mut conflicts: Vec<(i32, i32)> = Vec::new();

        for (idx, record) in reader.deserialize::<RuleRow>().enumerate() {
            let row = idx + 1;
            let record = record.map_err(|e| row_error(row, &e))?;

            let dist = DistCode::try_new(record.dist_code).ok_or(RulesetError::InvalidDistCode {
                row,
                code: record.dist_code,
            })?;
            let original =
                FuelCode::try_new(record.original_code).ok_or(RulesetError::InvalidOriginalCode {
                    row,
                    code: record.original_code,
                })?;
            if !original.is_burnable() {
                return Err(RulesetError::NonBurnableOriginal {
                    row,
                    code: original.value(),
                });
            }
            let new_code =
                parse_output_code(&record.new_code).ok_or_else(|| RulesetError::InvalidNewCode {
                    row,
                    value: record.new_code.clone(),
                })?;

            match rules.entry((dist, original)) {
                Entry::Occupied(existing) => {
                    if *existing.get() != new_code {
                        conflicts.push((dist.value(), original.value()));
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(new_code);
                }
            }
        }

        if !conflicts.is_empty() {
            conflicts.sort_unstable();
            conflicts.dedup();
            return Err(RulesetError::AmbiguousRules { conflicts });
        }

        info!(rules = rules.len(), "ruleset compiled");
        Ok(Self { rules })
    }

    /// Look up a validated pair. `None` means no rule covers it.
    #[must_use]
    pub fn lookup(&self, dist: DistCode, fuel: FuelCode) -> Option<FuelCode> {
        self.rules.get(&(dist, fuel)).copied()
    }

    /// Look up raw cell values, classifying them on the way in.
    #[must_use]
    pub fn lookup_cells(&self, dist_cell: i32, fuel_cell: i32) -> RuleOutcome {
        let Some(dist) = DistCode::try_new(dist_cell) else {
            return RuleOutcome::NotApplicable;
        };
        let Some(fuel) = FuelCode::try_new(fuel_cell) else {
            return RuleOutcome::NotApplicable;
        };
        if !fuel.is_burnable() {
            return RuleOutcome::NotApplicable;
        }
        match self.lookup(dist, fuel) {
            Some(code) => RuleOutcome::Mapped(code),
            None => RuleOutcome::Absent,
        }
    }

    /// Number of distinct rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the ruleset holds no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn row_error(row: usize, err: &csv::Error) -> RulesetError {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => RulesetError::MalformedRow {
            row,
            reason: err.to_string(),
        },
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => RulesetError::MalformedRow {
            row,
            reason: format!("expected {expected_len} fields, found {len}"),
        },
        _ => RulesetError::Read {
            reason: err.to_string(),
        },
    }
}

/// Resolve the new-fuel column: a burnable class label (`GR`, `GS`, `SH`,
/// `TU`, `TL`, `SB`, any case) or the representative code of one.
fn parse_output_code(field: &str) -> Option<FuelCode> {
    let field = field.trim();
    if let Some(class) = FuelClass::from_label(field) {
        if class == FuelClass::NonBurnable {
            return None;
        }
        return FuelCode::try_new(class.representative_code());
    }
    let code: i32 = field.parse().ok()?;
    let fuel = FuelCode::try_new(code)?;
    if fuel.is_burnable() && fuel.class().representative_code() == code {
        Some(fuel)
    } else {
        None
    }
}
