//! Solver input and output containers.

use serde::{Deserialize, Serialize};

use crate::models::{Class, DayOfWeek, GradeCurriculum, Lesson, Period, Room, Subject, Teacher};

/// The complete constraint set for one timetable solve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleConstraints {
    pub classes: Vec<Class>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    /// Empty = rooms are not modeled.
    pub rooms: Vec<Room>,
    pub periods: Vec<Period>,
    /// Active school days, 0 = Monday … 6 = Sunday.
    pub days: Vec<DayOfWeek>,
    /// Per-grade weekly hours. `None` = flat default per subject.
    pub grade_curriculum: Option<GradeCurriculum>,
}

impl ScheduleConstraints {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: Class) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.periods.push(period);
        self
    }

    /// Replaces the active days.
    pub fn with_days(mut self, days: &[DayOfWeek]) -> Self {
        self.days = days.to_vec();
        self
    }

    pub fn with_curriculum(mut self, curriculum: GradeCurriculum) -> Self {
        self.grade_curriculum = Some(curriculum);
        self
    }

    /// Whether rooms take part in the search.
    pub fn models_rooms(&self) -> bool {
        !self.rooms.is_empty()
    }
}

/// Result of a solve: lessons plus statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Committed lessons, in commit order.
    pub lessons: Vec<Lesson>,
    pub stats: SolveStats,
    /// (class, subject) pairs that did not receive all their sessions.
    pub unmet: Vec<UnmetRequirement>,
}

/// Solve counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveStats {
    /// Slots skipped because of an occupancy or load conflict.
    pub conflicts_avoided: usize,
    /// Breakdown of `conflicts_avoided`.
    pub rejections: RejectionCounts,
    /// Sessions demanded by the curriculum (or the flat default).
    pub required_sessions: usize,
    pub lessons_created: usize,
    /// Sessions left unplaced, any reason.
    pub unmet_sessions: usize,
    /// Sessions unplaced because no teacher is qualified.
    pub no_eligible_teacher: usize,
    /// Slot evaluations performed by the constructive pass.
    pub slots_considered: usize,
    /// Sessions placed by the repair pass.
    pub repaired_sessions: usize,
    /// Whether the solve was aborted through its cancellation flag.
    pub cancelled: bool,
}

/// Why slots were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionCounts {
    pub class_busy: usize,
    pub no_teacher_available: usize,
    pub no_room_available: usize,
}

/// A (class, subject) pair short of its required sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmetRequirement {
    pub class_id: String,
    pub subject_id: String,
    pub required: u32,
    pub assigned: u32,
    pub reason: UnmetReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnmetReason {
    /// No teacher is qualified for the subject (and grade).
    NoEligibleTeacher,
    /// Every slot was rejected.
    NoFreeSlot,
}

impl UnmetRequirement {
    /// Sessions still missing.
    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.assigned)
    }
}

impl Solution {
    /// Whether every required session was placed.
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Lessons for a class.
    pub fn lessons_for_class(&self, class_id: &str) -> Vec<&Lesson> {
        self.lessons.iter().filter(|l| l.class_id == class_id).collect()
    }

    /// Lessons taught by a teacher.
    pub fn lessons_for_teacher(&self, teacher_id: &str) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|l| l.teacher_id == teacher_id)
            .collect()
    }

    /// Number of lessons for a (class, subject) pair.
    pub fn session_count(&self, class_id: &str, subject_id: &str) -> usize {
        self.lessons
            .iter()
            .filter(|l| l.class_id == class_id && l.subject_id == subject_id)
            .count()
    }
}

impl RejectionCounts {
    pub fn total(&self) -> usize {
        self.class_busy + self.no_teacher_available + self.no_room_available
    }
}
