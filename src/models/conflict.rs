//! Conflict model.
//!
//! A conflict is a detected violation of exclusivity (double booking) or
//! of a teacher load limit within a set of lessons.

use serde::{Deserialize, Serialize};

/// A detected timetable violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Type of violation.
    pub conflict_type: ConflictType,
    /// Teacher, room or class the violation is about.
    pub entity_id: String,
    /// All lessons involved.
    pub lesson_ids: Vec<String>,
    /// Human-readable description.
    pub description: String,
    pub severity: Severity,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    /// A teacher has two or more lessons in one slot.
    TeacherDoubleBooked,
    /// A room hosts two or more lessons in one slot.
    RoomDoubleBooked,
    /// A class attends two or more lessons in one slot.
    ClassDoubleBooked,
    /// A teacher exceeds their daily lesson cap.
    TeacherMaxDaily,
    /// A teacher exceeds their weekly lesson cap.
    TeacherMaxWeekly,
}

/// Conflict severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// The timetable cannot be run as is.
    Error,
    /// The timetable runs, but breaks a load policy.
    Warning,
}

impl ConflictType {
    /// Default severity for this type.
    pub fn severity(self) -> Severity {
        match self {
            Self::TeacherDoubleBooked | Self::RoomDoubleBooked | Self::ClassDoubleBooked => {
                Severity::Error
            }
            Self::TeacherMaxDaily | Self::TeacherMaxWeekly => Severity::Warning,
        }
    }
}

impl Conflict {
    /// Creates a conflict with the type's default severity.
    pub fn new(
        conflict_type: ConflictType,
        entity_id: impl Into<String>,
        lesson_ids: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            conflict_type,
            entity_id: entity_id.into(),
            lesson_ids,
            description: description.into(),
            severity: conflict_type.severity(),
        }
    }

    /// Whether this conflict blocks the timetable.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Whether `lesson_id` is involved.
    pub fn involves(&self, lesson_id: &str) -> bool {
        self.lesson_ids.iter().any(|id| id == lesson_id)
    }
}
