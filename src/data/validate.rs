//! Roster validation: structural checks the importer cannot guarantee,
//! surfaced as a severity-graded report instead of a hard failure.

use std::collections::HashSet;
use std::fmt;

use crate::data::boss::BossTable;
use crate::data::digimon::{load_roster, Digimon};
use crate::engine::tiers::{non_standard_equivalent, SIDE_TRACK_DEFAULT_EQUIVALENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validate an in-memory roster, optionally cross-checking explicit boss
/// requirements against the boss table.
pub fn validate_roster(roster: &[Digimon], bosses: Option<&BossTable>) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_numbers = HashSet::new();
    let max_order = bosses.and_then(BossTable::required_max_order);

    for (index, digimon) in roster.iter().enumerate() {
        let context = format!("digimon[{index}]");

        if digimon.number.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "missing number");
        } else if !seen_numbers.insert(digimon.number.clone()) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("duplicate number '{}'", digimon.number),
            );
        }
        if digimon.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "missing name");
        }

        if !digimon.generation.is_standard()
            && non_standard_equivalent(&digimon.number, digimon.generation)
                == Some(SIDE_TRACK_DEFAULT_EQUIVALENT)
        {
            report.push(
                ValidationSeverity::Info,
                &context,
                format!(
                    "{} member '{}' has no equivalence entry; defaults to {}",
                    digimon.generation, digimon.number, SIDE_TRACK_DEFAULT_EQUIVALENT
                ),
            );
        }

        if let Some(requirements) = &digimon.requirements {
            if let (Some(required), Some(max)) = (requirements.min_boss_order, max_order) {
                if required > max {
                    report.push(
                        ValidationSeverity::Warning,
                        &context,
                        format!(
                            "min_boss_order {required} exceeds the last required boss ({max})"
                        ),
                    );
                }
            }
            if requirements.is_empty() {
                report.push(
                    ValidationSeverity::Info,
                    &context,
                    "empty requirements record; treated as unrestricted",
                );
            }
        }
    }

    if roster.is_empty() {
        report.push(ValidationSeverity::Warning, "roster", "roster is empty");
    }

    report
}

/// Load a roster file and validate it. A missing or unparsable file is a
/// single error diagnostic, mirroring how the loaders degrade elsewhere.
pub fn validate_roster_file(path: &str, bosses: Option<&BossTable>) -> ValidationReport {
    match load_roster(path) {
        Ok(roster) => validate_roster(&roster, bosses),
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push(
                ValidationSeverity::Error,
                "roster",
                format!("unable to load '{path}': {err}"),
            );
            report
        }
    }
}
