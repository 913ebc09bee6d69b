//! Input validation for timetable problems.
//!
//! Checks the structural preconditions of a [`ScheduleConstraints`]
//! value before solving. Detects:
//! - Empty entity lists (classes, teachers, subjects, periods, days)
//! - Day indices outside 0..=6
//! - Duplicate IDs within an entity kind
//!
//! Infeasibility (too few teachers, too few slots) is not checked here;
//! the solver reports it as data.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::MAX_DAY;
use crate::solver::ScheduleConstraints;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required entity list is empty.
    EmptyInput,
    /// A day index is outside 0..=6.
    InvalidDay,
    /// Two entities of one kind share the same ID.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structural preconditions of a timetable problem.
///
/// Checks:
/// 1. Classes, teachers, subjects, periods and days are non-empty
/// 2. Every configured day and every period day is in 0..=6
/// 3. No duplicate class, teacher, subject, room or period IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_constraints(constraints: &ScheduleConstraints) -> ValidationResult {
    let mut errors = Vec::new();

    let lists = [
        ("classes", constraints.classes.is_empty()),
        ("teachers", constraints.teachers.is_empty()),
        ("subjects", constraints.subjects.is_empty()),
        ("periods", constraints.periods.is_empty()),
        ("days", constraints.days.is_empty()),
    ];
    for (what, empty) in lists {
        if empty {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyInput,
                format!("No {what} provided"),
            ));
        }
    }

    for &day in &constraints.days {
        if day > MAX_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDay,
                format!("Invalid school day index: {day}"),
            ));
        }
    }
    for period in &constraints.periods {
        for &day in &period.days {
            if day > MAX_DAY {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDay,
                    format!("Period '{}' references invalid day index {day}", period.id),
                ));
            }
        }
    }

    check_unique("class", constraints.classes.iter().map(|c| c.id.as_str()), &mut errors);
    check_unique("teacher", constraints.teachers.iter().map(|t| t.id.as_str()), &mut errors);
    check_unique("subject", constraints.subjects.iter().map(|s| s.id.as_str()), &mut errors);
    check_unique("room", constraints.rooms.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("period", constraints.periods.iter().map(|p| p.id.as_str()), &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
}
