//! Substitute cover models.
//!
//! Inputs and outputs of the substitute matcher: the absent teacher's
//! affected slots, other teachers' existing bookings, candidates with
//! their current load, and the ranked matches.

use serde::{Deserialize, Serialize};

use super::{DayOfWeek, Teacher};

/// A lesson slot the absent teacher can no longer take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedSlot {
    pub day_of_week: DayOfWeek,
    pub period_id: String,
    pub subject_id: String,
}

/// An existing booking of some teacher on the absence day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedSlot {
    pub teacher_id: String,
    pub day_of_week: DayOfWeek,
    pub period_id: String,
}

/// A substitute candidate with their current weekly load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverCandidate {
    pub teacher: Teacher,
    /// Lessons the teacher already teaches this week.
    #[serde(default)]
    pub current_weekly_load: u32,
}

/// A scored substitute recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstituteMatch {
    pub teacher_id: String,
    pub teacher_name: String,
    /// 0–100, higher = better fit.
    pub score: u32,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    /// Affected slots the candidate is free for.
    pub available_slots: usize,
    /// Affected slots to cover.
    pub total_slots: usize,
}

/// Who covers one affected slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverAssignment {
    pub day_of_week: DayOfWeek,
    pub period_id: String,
    pub subject_id: String,
    /// `None` when no ranked candidate is free in this slot.
    pub teacher_id: Option<String>,
}

impl AffectedSlot {
    pub fn new(
        day_of_week: DayOfWeek,
        period_id: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            day_of_week,
            period_id: period_id.into(),
            subject_id: subject_id.into(),
        }
    }
}

impl BookedSlot {
    pub fn new(
        teacher_id: impl Into<String>,
        day_of_week: DayOfWeek,
        period_id: impl Into<String>,
    ) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            day_of_week,
            period_id: period_id.into(),
        }
    }
}

impl CoverCandidate {
    pub fn new(teacher: Teacher, current_weekly_load: u32) -> Self {
        Self {
            teacher,
            current_weekly_load,
        }
    }
}

impl SubstituteMatch {
    /// Whether the candidate is free for every affected slot.
    pub fn is_fully_available(&self) -> bool {
        self.available_slots == self.total_slots
    }
}
