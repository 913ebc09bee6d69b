//! Grade curriculum model.
//!
//! Maps each grade to the weekly hours it must receive per subject.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weekly session requirement for one subject within a grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumEntry {
    pub subject_id: String,
    pub hours_per_week: u32,
}

impl CurriculumEntry {
    pub fn new(subject_id: impl Into<String>, hours_per_week: u32) -> Self {
        Self {
            subject_id: subject_id.into(),
            hours_per_week,
        }
    }
}

/// Per-grade curriculum: grade id → subject requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeCurriculum {
    grades: HashMap<String, Vec<CurriculumEntry>>,
}

impl GradeCurriculum {
    /// Creates an empty curriculum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a requirement for a grade.
    pub fn with_entry(
        mut self,
        grade_id: impl Into<String>,
        subject_id: impl Into<String>,
        hours_per_week: u32,
    ) -> Self {
        self.add(grade_id, CurriculumEntry::new(subject_id, hours_per_week));
        self
    }

    /// Adds a requirement for a grade.
    pub fn add(&mut self, grade_id: impl Into<String>, entry: CurriculumEntry) {
        self.grades.entry(grade_id.into()).or_default().push(entry);
    }

    /// Requirements for a grade, if the grade is defined.
    pub fn for_grade(&self, grade_id: &str) -> Option<&[CurriculumEntry]> {
        self.grades.get(grade_id).map(|v| v.as_slice())
    }

    /// Weekly hours for a (grade, subject). Repeated entries are summed.
    ///
    /// Returns `None` if the grade is not defined.
    pub fn hours_for(&self, grade_id: &str, subject_id: &str) -> Option<u32> {
        self.for_grade(grade_id).map(|entries| {
            entries
                .iter()
                .filter(|e| e.subject_id == subject_id)
                .map(|e| e.hours_per_week)
                .sum()
        })
    }

    /// Iterates over grades and their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CurriculumEntry])> {
        self.grades.iter().map(|(g, e)| (g.as_str(), e.as_slice()))
    }

    /// Number of grades defined.
    pub fn grade_count(&self) -> usize {
        self.grades.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_lookup() {
        let c = GradeCurriculum::new()
            .with_entry("g7", "math", 4)
            .with_entry("g7", "art", 1)
            .with_entry("g7", "math", 1);

        assert_eq!(c.hours_for("g7", "math"), Some(5));
        assert_eq!(c.hours_for("g7", "bio"), Some(0));
        assert_eq!(c.hours_for("g8", "math"), None);
        assert_eq!(c.grade_count(), 1);
    }

    #[test]
    fn test_wire_format_is_plain_map() {
        let json = r#"{"g7":[{"subjectId":"math","hoursPerWeek":3}]}"#;
        let c: GradeCurriculum = serde_json::from_str(json).unwrap();
        assert_eq!(c.hours_for("g7", "math"), Some(3));
    }
}
