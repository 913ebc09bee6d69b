//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators from a solved timetable and its teachers.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fulfillment Rate | Lessons created / sessions required |
//! | Weekly Load | Lessons per teacher |
//! | Utilization | Weekly load / `max_periods_per_week` |
//! | Avg Utilization | Mean over all teachers |
//! | Peak Daily Load | Busiest (teacher, day) lesson count |

use std::collections::HashMap;

use crate::models::{Lesson, Teacher};
use crate::solver::Solution;

/// Counts lessons per teacher id.
pub fn weekly_loads(lessons: &[Lesson]) -> HashMap<String, u32> {
    let mut loads = HashMap::new();
    for lesson in lessons {
        *loads.entry(lesson.teacher_id.clone()).or_insert(0) += 1;
    }
    loads
}

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Fraction of required sessions placed (0.0..1.0).
    pub fulfillment_rate: f64,
    /// Lessons per teacher; every given teacher is present.
    pub load_by_teacher: HashMap<String, u32>,
    /// Weekly load over the teacher's weekly cap.
    pub utilization_by_teacher: HashMap<String, f64>,
    /// Average of `utilization_by_teacher` (0.0 without teachers).
    pub avg_utilization: f64,
    /// Largest lesson count of any teacher on any single day.
    pub peak_daily_load: u32,
}

impl TimetableKpi {
    /// Computes KPIs from a solution and the teachers it was solved for.
    pub fn calculate(solution: &Solution, teachers: &[Teacher]) -> Self {
        let required = solution.stats.required_sessions;
        let fulfillment_rate = if required == 0 {
            1.0
        } else {
            solution.lessons.len() as f64 / required as f64
        };

        let loads = weekly_loads(&solution.lessons);
        let mut load_by_teacher = HashMap::new();
        let mut utilization_by_teacher = HashMap::new();
        for teacher in teachers {
            let load = loads.get(&teacher.id).copied().unwrap_or(0);
            let utilization = if teacher.max_periods_per_week == 0 {
                0.0
            } else {
                f64::from(load) / f64::from(teacher.max_periods_per_week)
            };
            load_by_teacher.insert(teacher.id.clone(), load);
            utilization_by_teacher.insert(teacher.id.clone(), utilization);
        }

        let avg_utilization = if utilization_by_teacher.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_teacher.values().sum();
            sum / utilization_by_teacher.len() as f64
        };

        let mut daily: HashMap<(&str, u8), u32> = HashMap::new();
        for lesson in &solution.lessons {
            *daily
                .entry((lesson.teacher_id.as_str(), lesson.day_of_week))
                .or_insert(0) += 1;
        }
        let peak_daily_load = daily.values().copied().max().unwrap_or(0);

        Self {
            fulfillment_rate,
            load_by_teacher,
            utilization_by_teacher,
            avg_utilization,
            peak_daily_load,
        }
    }

    /// Whether every required session was placed.
    pub fn is_fulfilled(&self) -> bool {
        self.fulfillment_rate >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Class, GradeCurriculum, Period, Subject};
    use crate::solver::{ScheduleConstraints, TimetableSolver};

    #[test]
    fn test_weekly_loads() {
        let lessons = vec![
            Lesson::new("L1", "7A", "math", "T1", 0, "P1"),
            Lesson::new("L2", "7B", "math", "T1", 1, "P1"),
            Lesson::new("L3", "7B", "art", "T2", 1, "P2"),
        ];
        let loads = weekly_loads(&lessons);
        assert_eq!(loads["T1"], 2);
        assert_eq!(loads["T2"], 1);
        assert!(weekly_loads(&[]).is_empty());
    }

    #[test]
    fn test_kpi_from_solution() {
        let c = ScheduleConstraints::new()
            .with_days(&[0, 1])
            .with_period(Period::new("P1", 1))
            .with_period(Period::new("P2", 2))
            .with_class(Class::new("7A").with_grade("g7"))
            .with_subject(Subject::new("math"))
            .with_teacher(Teacher::new("T1").with_subject("math").with_limits(6, 4))
            .with_teacher(Teacher::new("T2").with_subject("art"))
            .with_curriculum(GradeCurriculum::new().with_entry("g7", "math", 3));

        let solution = TimetableSolver::new().solve(&c).unwrap();
        let kpi = TimetableKpi::calculate(&solution, &c.teachers);

        assert!(kpi.is_fulfilled());
        assert_eq!(kpi.load_by_teacher["T1"], 3);
        assert_eq!(kpi.load_by_teacher["T2"], 0);
        assert!((kpi.utilization_by_teacher["T1"] - 0.75).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.375).abs() < 1e-10);
        // Day 0 fills both periods first.
        assert_eq!(kpi.peak_daily_load, 2);
    }

    #[test]
    fn test_kpi_partial_fulfillment() {
        let c = ScheduleConstraints::new()
            .with_days(&[0])
            .with_period(Period::new("P1", 1))
            .with_class(Class::new("7A").with_grade("g7"))
            .with_subject(Subject::new("math"))
            .with_teacher(Teacher::new("T1").with_subject("math"))
            .with_curriculum(GradeCurriculum::new().with_entry("g7", "math", 2));

        let solution = TimetableSolver::new().solve(&c).unwrap();
        let kpi = TimetableKpi::calculate(&solution, &c.teachers);
        assert!(!kpi.is_fulfilled());
        assert!((kpi.fulfillment_rate - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let solution = Solution::default();
        let kpi = TimetableKpi::calculate(&solution, &[]);
        assert!((kpi.fulfillment_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.avg_utilization, 0.0);
        assert_eq!(kpi.peak_daily_load, 0);
    }
}
