//! Teacher model.
//!
//! Teachers are the human resources of a timetable. Each teacher has a
//! set of qualified subjects, an optional primary subject, optional grade
//! assignments, and daily/weekly workload caps.

use serde::{Deserialize, Serialize};

/// Default cap on lessons per teacher per day.
pub const DEFAULT_MAX_PERIODS_PER_DAY: u32 = 6;
/// Default cap on lessons per teacher per week.
pub const DEFAULT_MAX_PERIODS_PER_WEEK: u32 = 24;

/// A teacher who can be assigned to lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Subjects the teacher is qualified to teach. Treated as a set.
    #[serde(default)]
    pub subject_ids: Vec<String>,
    /// The teacher's flagged primary subject, if any.
    #[serde(default)]
    pub primary_subject_id: Option<String>,
    /// Grades this teacher may teach. Empty = no grade restriction.
    #[serde(default)]
    pub grade_ids: Vec<String>,
    /// Maximum lessons on a single day.
    #[serde(default = "default_max_per_day")]
    pub max_periods_per_day: u32,
    /// Maximum lessons across the week.
    #[serde(default = "default_max_per_week")]
    pub max_periods_per_week: u32,
    /// Never proposed as a substitute.
    #[serde(default)]
    pub exclude_from_cover: bool,
}

/// Denormalized snapshot of a teacher's load limits, carried on lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherLimits {
    pub max_periods_per_day: u32,
    pub max_periods_per_week: u32,
}

fn default_max_per_day() -> u32 {
    DEFAULT_MAX_PERIODS_PER_DAY
}

fn default_max_per_week() -> u32 {
    DEFAULT_MAX_PERIODS_PER_WEEK
}

impl Teacher {
    /// Creates a teacher with default limits and no qualifications.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subject_ids: Vec::new(),
            primary_subject_id: None,
            grade_ids: Vec::new(),
            max_periods_per_day: DEFAULT_MAX_PERIODS_PER_DAY,
            max_periods_per_week: DEFAULT_MAX_PERIODS_PER_WEEK,
            exclude_from_cover: false,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a qualified subject. Duplicates are ignored.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        let subject_id = subject_id.into();
        if !self.subject_ids.contains(&subject_id) {
            self.subject_ids.push(subject_id);
        }
        self
    }

    /// Flags a primary subject. Also adds it to the qualified set.
    pub fn with_primary_subject(mut self, subject_id: impl Into<String>) -> Self {
        let subject_id = subject_id.into();
        self = self.with_subject(subject_id.clone());
        self.primary_subject_id = Some(subject_id);
        self
    }

    /// Restricts the teacher to a grade (may be called repeatedly).
    pub fn with_grade(mut self, grade_id: impl Into<String>) -> Self {
        self.grade_ids.push(grade_id.into());
        self
    }

    /// Sets daily and weekly caps.
    pub fn with_limits(mut self, per_day: u32, per_week: u32) -> Self {
        self.max_periods_per_day = per_day;
        self.max_periods_per_week = per_week;
        self
    }

    /// Excludes the teacher from substitute cover.
    pub fn excluded_from_cover(mut self) -> Self {
        self.exclude_from_cover = true;
        self
    }

    /// Whether the teacher is qualified for a subject.
    ///
    /// The primary subject counts as qualified even when `subject_ids`
    /// does not list it.
    pub fn teaches(&self, subject_id: &str) -> bool {
        self.is_primary_for(subject_id) || self.subject_ids.iter().any(|s| s == subject_id)
    }

    /// Whether `subject_id` is this teacher's primary subject.
    pub fn is_primary_for(&self, subject_id: &str) -> bool {
        self.primary_subject_id.as_deref() == Some(subject_id)
    }

    /// Whether the teacher may teach a class of the given grade.
    ///
    /// Teachers without grade assignments and classes without a grade are
    /// unrestricted.
    pub fn covers_grade(&self, grade_id: Option<&str>) -> bool {
        match grade_id {
            None => true,
            Some(_) if self.grade_ids.is_empty() => true,
            Some(g) => self.grade_ids.iter().any(|own| own == g),
        }
    }

    /// Snapshot of the load limits.
    pub fn limits(&self) -> TeacherLimits {
        TeacherLimits {
            max_periods_per_day: self.max_periods_per_day,
            max_periods_per_week: self.max_periods_per_week,
        }
    }
}

impl Default for TeacherLimits {
    fn default() -> Self {
        Self {
            max_periods_per_day: DEFAULT_MAX_PERIODS_PER_DAY,
            max_periods_per_week: DEFAULT_MAX_PERIODS_PER_WEEK,
        }
    }
}
