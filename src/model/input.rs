//! Parsing and validation of the work-unit text fields.

use thiserror::Error;

use super::project::Project;

/// The two numeric fields of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitField {
    Total,
    Current,
}

impl UnitField {
    pub fn label(&self) -> &'static str {
        match self {
            UnitField::Total => "Total Work Units",
            UnitField::Current => "Current Work Units",
        }
    }
}

/// Something the user should be told after a field was finalized. The field
/// has already been reverted or capped by the time one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldNotice {
    #[error("Please enter a valid number for {}.", .0.label())]
    NotANumber(UnitField),

    #[error("Total Work Units must be a positive number.")]
    TotalNotPositive,

    #[error("Total Work Units cannot be less than Current Work Units. Setting to Current Work Units.")]
    TotalBelowCurrent,

    #[error("Current Work Units cannot be negative.")]
    CurrentNegative,

    #[error("Current Work Units cannot exceed Total Work Units. Setting to Total Work Units.")]
    CurrentAboveTotal,
}

impl FieldNotice {
    pub fn is_info(&self) -> bool {
        matches!(self, FieldNotice::CurrentAboveTotal)
    }
}

/// Display format used for both fields.
pub fn format_units(value: f64) -> String {
    format!("{:.1}", value)
}

fn parse_units(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Value to display while the user is still typing.
pub fn parse_live(text: &str, fallback: f64) -> f64 {
    parse_units(text).unwrap_or(fallback)
}

/// Validate `text` for `field`, apply it to `project` and rewrite `text` in
/// display format.
///
/// Capping current at total while the timer runs stops the timer first, so
/// the capped value never counts as progress made during a running interval.
pub fn finalize(
    project: &mut Project,
    field: UnitField,
    text: &mut String,
    now: f64,
) -> Option<FieldNotice> {
    let committed = match field {
        UnitField::Total => project.total_units,
        UnitField::Current => project.current_units,
    };

    let (value, notice) = if text.trim() == format_units(committed) {
        (committed, None)
    } else {
        match parse_units(text) {
            None if text.trim().is_empty() => (committed, None),
            None => (committed, Some(FieldNotice::NotANumber(field))),
            Some(value) => check(project, field, value, committed),
        }
    };

    if field == UnitField::Current
        && notice == Some(FieldNotice::CurrentAboveTotal)
        && project.is_running
    {
        project.stop(now);
    }

    match field {
        UnitField::Total => project.total_units = value,
        UnitField::Current => project.current_units = value,
    }
    *text = format_units(value);
    notice
}

fn check(project: &Project, field: UnitField, value: f64, committed: f64) -> (f64, Option<FieldNotice>) {
    match field {
        UnitField::Total if value <= 0.0 => (committed, Some(FieldNotice::TotalNotPositive)),
        UnitField::Total if value < project.current_units => {
            (project.current_units, Some(FieldNotice::TotalBelowCurrent))
        }
        UnitField::Current if value < 0.0 => (committed, Some(FieldNotice::CurrentNegative)),
        UnitField::Current if value > project.total_units => {
            (project.total_units, Some(FieldNotice::CurrentAboveTotal))
        }
        _ => (value, None),
    }
}
