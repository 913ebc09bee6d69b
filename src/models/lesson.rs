//! Lesson (assignment) model.
//!
//! A lesson records that a class is taught a subject by a teacher,
//! optionally in a room, at one slot of the week. Lesson ids are scoped
//! to one solve or one caller session; they are not long-lived keys.

use serde::{Deserialize, Serialize};

use super::{DayOfWeek, Slot, TeacherLimits};

/// One committed class × subject × teacher × room × slot assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Session-scoped identifier.
    pub id: String,
    pub class_id: String,
    pub subject_id: String,
    pub teacher_id: String,
    /// `None` when rooms are not modeled.
    #[serde(default)]
    pub room_id: Option<String>,
    pub period_id: String,
    pub day_of_week: DayOfWeek,
    /// Set by [`crate::conflicts::mark_conflicts`].
    #[serde(default)]
    pub is_conflict: bool,
    #[serde(default)]
    pub conflict_note: Option<String>,
    /// Teacher load limits at the time the lesson was produced.
    #[serde(default)]
    pub teacher_limits: Option<TeacherLimits>,
}

impl Lesson {
    /// Creates a lesson without room or teacher snapshot.
    pub fn new(
        id: impl Into<String>,
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
        day_of_week: DayOfWeek,
        period_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            room_id: None,
            period_id: period_id.into(),
            day_of_week,
            is_conflict: false,
            conflict_note: None,
            teacher_limits: None,
        }
    }

    /// Assigns a room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Attaches the teacher's load limits.
    pub fn with_teacher_limits(mut self, limits: TeacherLimits) -> Self {
        self.teacher_limits = Some(limits);
        self
    }

    /// The slot this lesson occupies.
    pub fn slot(&self) -> Slot {
        Slot::new(self.day_of_week, self.period_id.clone())
    }

    /// Whether the lesson occupies `(day, period_id)`.
    #[inline]
    pub fn is_at(&self, day: DayOfWeek, period_id: &str) -> bool {
        self.day_of_week == day && self.period_id == period_id
    }
}
