//! Substitute teacher matching.
//!
//! Ranks candidate teachers to cover an absent teacher's lessons on one
//! day, and optionally turns the ranking into a per-slot cover plan.
//!
//! # Scoring
//!
//! Each candidate earns up to 100 points from subject coverage,
//! availability across the affected slots, remaining weekly capacity and
//! a primary-subject bonus (see the table in `scoring`). Only matches
//! scoring strictly above [`MatcherConfig::min_score`] are returned,
//! best first, ties kept in candidate order.
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{AffectedSlot, CoverCandidate, Teacher};
//! use u_timetable::substitute::{match_substitutes, SubstituteRequest};
//!
//! let request = SubstituteRequest {
//!     absent_teacher_id: "T0".into(),
//!     affected_slots: vec![AffectedSlot::new(0, "P1", "math")],
//!     candidates: vec![CoverCandidate::new(Teacher::new("T1").with_subject("math"), 10)],
//!     existing_lessons: vec![],
//! };
//!
//! let matches = match_substitutes(&request);
//! assert_eq!(matches[0].teacher_id, "T1");
//! assert_eq!(matches[0].score, 90);
//! ```

mod scoring;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MatcherConfig;
use crate::models::{
    AffectedSlot, BookedSlot, CoverAssignment, CoverCandidate, DayOfWeek, SubstituteMatch,
};

/// Input to the substitute matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubstituteRequest {
    pub absent_teacher_id: String,
    /// The absent teacher's lessons that need cover.
    pub affected_slots: Vec<AffectedSlot>,
    /// Teacher pool, absent teacher included or not.
    pub candidates: Vec<CoverCandidate>,
    /// Other teachers' bookings on the absence day.
    pub existing_lessons: Vec<BookedSlot>,
}

/// Bookings indexed by (teacher, day, period).
struct Bookings<'a>(HashSet<(&'a str, DayOfWeek, &'a str)>);

impl<'a> Bookings<'a> {
    fn new(lessons: &'a [BookedSlot]) -> Self {
        Self(
            lessons
                .iter()
                .map(|b| (b.teacher_id.as_str(), b.day_of_week, b.period_id.as_str()))
                .collect(),
        )
    }

    fn is_busy(&self, teacher: &str, slot: &AffectedSlot) -> bool {
        self.0.contains(&(teacher, slot.day_of_week, slot.period_id.as_str()))
    }
}

impl SubstituteRequest {
    /// Distinct subjects of the affected slots, in first-appearance order.
    pub fn needed_subjects(&self) -> Vec<&str> {
        let mut needed: Vec<&str> = Vec::new();
        for slot in &self.affected_slots {
            if !needed.contains(&slot.subject_id.as_str()) {
                needed.push(slot.subject_id.as_str());
            }
        }
        needed
    }

    fn is_eligible(&self, candidate: &CoverCandidate) -> bool {
        candidate.teacher.id != self.absent_teacher_id && !candidate.teacher.exclude_from_cover
    }
}

/// Ranks substitutes with default settings (score > 30, at most 5).
pub fn match_substitutes(request: &SubstituteRequest) -> Vec<SubstituteMatch> {
    match_substitutes_with(request, &MatcherConfig::default())
}

/// Ranks substitutes using `config` for the threshold and result count.
pub fn match_substitutes_with(
    request: &SubstituteRequest,
    config: &MatcherConfig,
) -> Vec<SubstituteMatch> {
    let total = request.affected_slots.len();
    if total == 0 {
        return Vec::new();
    }

    let needed = request.needed_subjects();
    let bookings = Bookings::new(&request.existing_lessons);

    let mut matches: Vec<SubstituteMatch> = request
        .candidates
        .iter()
        .filter(|c| request.is_eligible(c))
        .map(|candidate| {
            let teacher = &candidate.teacher;
            let free = request
                .affected_slots
                .iter()
                .filter(|slot| !bookings.is_busy(&teacher.id, slot))
                .count();
            let card = scoring::score(candidate, &needed, free, total);
            SubstituteMatch {
                teacher_id: teacher.id.clone(),
                teacher_name: if teacher.name.is_empty() {
                    teacher.id.clone()
                } else {
                    teacher.name.clone()
                },
                score: card.total(),
                reasons: card.reasons,
                warnings: card.warnings,
                available_slots: free,
                total_slots: total,
            }
        })
        .filter(|m| m.score > config.min_score)
        .collect();

    // Stable: equal scores keep candidate order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(config.max_results);

    debug!(
        absent = request.absent_teacher_id.as_str(),
        slots = total,
        matches = matches.len(),
        "ranked substitutes"
    );
    matches
}

/// Assigns each affected slot to the best-ranked match free there.
///
/// A teacher takes further slots only while both their daily and weekly
/// caps allow it, counting existing bookings and earlier cover. A teacher
/// never covers two slots at the same (day, period). Slots nobody can
/// take get `teacher_id: None`.
pub fn plan_cover(
    request: &SubstituteRequest,
    matches: &[SubstituteMatch],
) -> Vec<CoverAssignment> {
    let bookings = Bookings::new(&request.existing_lessons);
    let candidates: HashMap<&str, &CoverCandidate> = request
        .candidates
        .iter()
        .map(|c| (c.teacher.id.as_str(), c))
        .collect();

    let mut day_load: HashMap<(&str, DayOfWeek), u32> = HashMap::new();
    for booked in &request.existing_lessons {
        *day_load
            .entry((booked.teacher_id.as_str(), booked.day_of_week))
            .or_insert(0) += 1;
    }
    let mut week_taken: HashMap<&str, u32> = HashMap::new();
    let mut covering: HashSet<(&str, DayOfWeek, &str)> = HashSet::new();

    request
        .affected_slots
        .iter()
        .map(|slot| {
            let chosen = matches.iter().find(|m| {
                let id = m.teacher_id.as_str();
                let Some(candidate) = candidates.get(id) else {
                    return false;
                };
                let teacher = &candidate.teacher;
                let week = candidate.current_weekly_load
                    + week_taken.get(id).copied().unwrap_or(0);
                let day = day_load.get(&(id, slot.day_of_week)).copied().unwrap_or(0);

                week < teacher.max_periods_per_week
                    && day < teacher.max_periods_per_day
                    && !bookings.is_busy(id, slot)
                    && !covering.contains(&(id, slot.day_of_week, slot.period_id.as_str()))
            });
            if let Some(m) = chosen {
                let id = m.teacher_id.as_str();
                *week_taken.entry(id).or_insert(0) += 1;
                *day_load.entry((id, slot.day_of_week)).or_insert(0) += 1;
                covering.insert((id, slot.day_of_week, slot.period_id.as_str()));
            }
            CoverAssignment {
                day_of_week: slot.day_of_week,
                period_id: slot.period_id.clone(),
                subject_id: slot.subject_id.clone(),
                teacher_id: chosen.map(|m| m.teacher_id.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Teacher;
    use proptest::prelude::*;

    fn math_absence() -> SubstituteRequest {
        SubstituteRequest {
            absent_teacher_id: "T0".into(),
            affected_slots: vec![
                AffectedSlot::new(2, "P2", "math"),
                AffectedSlot::new(2, "P4", "math"),
            ],
            candidates: vec![
                CoverCandidate::new(Teacher::new("T0").with_subject("math"), 0),
                CoverCandidate::new(Teacher::new("C").with_name("Carol").with_subject("art"), 12),
                CoverCandidate::new(Teacher::new("B").with_subject("math"), 12),
                CoverCandidate::new(Teacher::new("A").with_subject("math"), 12),
            ],
            existing_lessons: vec![BookedSlot::new("B", 2, "P4"), BookedSlot::new("C", 2, "P1")],
        }
    }

    #[test]
    fn test_ranking_order() {
        let matches = match_substitutes(&math_absence());
        let ids: Vec<&str> = matches.iter().map(|m| m.teacher_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);

        assert_eq!(matches[0].score, 90);
        assert!(matches[0].is_fully_available());
        assert_eq!(matches[1].score, 75);
        assert_eq!(matches[1].available_slots, 1);

        let c = &matches[2];
        assert_eq!(c.score, 50);
        assert_eq!(c.teacher_name, "Carol");
        assert!(c.warnings.iter().any(|w| w == "Teaches a different subject area"));
    }

    #[test]
    fn test_threshold_excludes_weak_candidates() {
        let mut req = math_absence();
        req.existing_lessons.push(BookedSlot::new("C", 2, "P2"));
        req.existing_lessons.push(BookedSlot::new("C", 2, "P4"));
        req.candidates[1].current_weekly_load = 24;

        let matches = match_substitutes(&req);
        assert!(matches.iter().all(|m| m.teacher_id != "C"));
    }

    #[test]
    fn test_skips_absent_and_excluded() {
        let mut req = math_absence();
        req.candidates[3].teacher = req.candidates[3].teacher.clone().excluded_from_cover();
        let matches = match_substitutes(&req);
        assert!(matches.iter().all(|m| m.teacher_id != "T0" && m.teacher_id != "A"));
    }

    #[test]
    fn test_primary_subject_breaks_tie() {
        let req = SubstituteRequest {
            absent_teacher_id: "T0".into(),
            affected_slots: vec![AffectedSlot::new(0, "P1", "math")],
            candidates: vec![
                CoverCandidate::new(Teacher::new("X").with_subject("math"), 0),
                CoverCandidate::new(Teacher::new("Y").with_primary_subject("math"), 0),
            ],
            existing_lessons: vec![],
        };
        let matches = match_substitutes(&req);
        assert_eq!(matches[0].teacher_id, "Y");
        assert_eq!(matches[0].score, 100);
        assert!(matches[0].reasons.iter().any(|r| r == "Primary subject"));
        assert!(!matches[1].reasons.iter().any(|r| r == "Primary subject"));
    }

    #[test]
    fn test_primary_subject_from_json_is_qualified() {
        let teacher: Teacher =
            serde_json::from_str(r#"{"id":"P","primarySubjectId":"math"}"#).unwrap();
        let req = SubstituteRequest {
            absent_teacher_id: "T0".into(),
            affected_slots: vec![AffectedSlot::new(0, "P1", "math")],
            candidates: vec![CoverCandidate::new(teacher, 0)],
            existing_lessons: vec![],
        };
        let matches = match_substitutes(&req);
        assert_eq!(matches[0].score, 100);
        assert!(matches[0].warnings.is_empty());
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let req = SubstituteRequest {
            absent_teacher_id: "T0".into(),
            affected_slots: vec![AffectedSlot::new(0, "P1", "math")],
            candidates: ["M1", "M2", "M3"]
                .iter()
                .map(|id| CoverCandidate::new(Teacher::new(*id).with_subject("math"), 0))
                .collect(),
            existing_lessons: vec![],
        };
        let ids: Vec<String> = match_substitutes(&req).into_iter().map(|m| m.teacher_id).collect();
        assert_eq!(ids, vec!["M1", "M2", "M3"]);
    }

    #[test]
    fn test_no_affected_slots() {
        let mut req = math_absence();
        req.affected_slots.clear();
        assert!(match_substitutes(&req).is_empty());
        assert!(plan_cover(&req, &[]).is_empty());
    }

    #[test]
    fn test_config_limits() {
        let config = MatcherConfig {
            max_results: 1,
            min_score: 80,
        };
        let matches = match_substitutes_with(&math_absence(), &config);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].teacher_id, "A");
    }

    #[test]
    fn test_plan_cover_uses_ranking() {
        let mut req = math_absence();
        req.existing_lessons.push(BookedSlot::new("A", 2, "P4"));
        let matches = match_substitutes(&req);
        let plan = plan_cover(&req, &matches);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].period_id, "P2");
        // A and B are both busy at P4; C is the only one free.
        assert_eq!(plan[1].teacher_id.as_deref(), Some("C"));
        assert!(plan[0].teacher_id.is_some());
    }

    #[test]
    fn test_plan_cover_respects_weekly_capacity() {
        let req = SubstituteRequest {
            absent_teacher_id: "T0".into(),
            affected_slots: vec![
                AffectedSlot::new(0, "P1", "math"),
                AffectedSlot::new(0, "P2", "math"),
            ],
            candidates: vec![CoverCandidate::new(
                Teacher::new("A").with_subject("math").with_limits(6, 10),
                9,
            )],
            existing_lessons: vec![],
        };
        let matches = match_substitutes(&req);
        let plan = plan_cover(&req, &matches);
        assert_eq!(plan[0].teacher_id.as_deref(), Some("A"));
        assert_eq!(plan[1].teacher_id, None);
    }

    #[test]
    fn test_plan_cover_respects_daily_cap() {
        let req = SubstituteRequest {
            absent_teacher_id: "T0".into(),
            affected_slots: vec![
                AffectedSlot::new(1, "P3", "math"),
                AffectedSlot::new(1, "P4", "math"),
            ],
            candidates: vec![
                CoverCandidate::new(Teacher::new("A").with_subject("math").with_limits(2, 24), 5),
                CoverCandidate::new(Teacher::new("B").with_subject("math"), 5),
            ],
            existing_lessons: vec![BookedSlot::new("A", 1, "P1")],
        };
        let matches = match_substitutes(&req);
        assert_eq!(matches[0].teacher_id, "A");

        let plan = plan_cover(&req, &matches);
        assert_eq!(plan[0].teacher_id.as_deref(), Some("A"));
        // A already teaches P1 and now covers P3: two lessons, the daily cap.
        assert_eq!(plan[1].teacher_id.as_deref(), Some("B"));
    }

    #[test]
    fn test_plan_cover_never_doubles_a_slot() {
        let req = SubstituteRequest {
            absent_teacher_id: "T0".into(),
            affected_slots: vec![
                AffectedSlot::new(0, "P1", "math"),
                AffectedSlot::new(0, "P1", "bio"),
            ],
            candidates: vec![CoverCandidate::new(
                Teacher::new("A").with_subject("math").with_subject("bio"),
                0,
            )],
            existing_lessons: vec![],
        };
        let matches = match_substitutes(&req);
        let plan = plan_cover(&req, &matches);
        assert_eq!(plan[0].teacher_id.as_deref(), Some("A"));
        assert_eq!(plan[1].teacher_id, None);
    }

    #[test]
    fn test_request_wire_shape() {
        let json = r#"{
            "absentTeacherId": "T0",
            "affectedSlots": [{"dayOfWeek": 1, "periodId": "P1", "subjectId": "math"}],
            "candidates": [
                {"teacher": {"id": "T1", "subjectIds": ["math"]}, "currentWeeklyLoad": 3}
            ],
            "existingLessons": []
        }"#;
        let req: SubstituteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.candidates[0].current_weekly_load, 3);
        assert_eq!(match_substitutes(&req)[0].score, 90);
    }

    fn arb_request() -> impl Strategy<Value = SubstituteRequest> {
        let subjects = prop::sample::select(vec!["math", "art", "bio"]);
        let slot = (0u8..5, 1u8..6, subjects.clone())
            .prop_map(|(d, p, s)| AffectedSlot::new(d, format!("P{p}"), s));
        let candidate = (
            prop::collection::vec(subjects.clone(), 0..3),
            prop::option::of(subjects),
            0u32..30,
            1u32..30,
        );
        let booking = (0usize..8, 0u8..5, 1u8..6);

        (
            prop::collection::vec(slot, 0..5),
            prop::collection::vec(candidate, 0..8),
            prop::collection::vec(booking, 0..12),
        )
            .prop_map(|(slots, cands, books)| {
                let candidates = cands
                    .into_iter()
                    .enumerate()
                    .map(|(i, (subs, primary, load, cap))| {
                        let mut t = Teacher::new(format!("T{i}")).with_limits(6, cap);
                        for s in subs {
                            t = t.with_subject(s);
                        }
                        if let Some(p) = primary {
                            t = t.with_primary_subject(p);
                        }
                        CoverCandidate::new(t, load)
                    })
                    .collect();
                let existing_lessons = books
                    .into_iter()
                    .map(|(t, d, p)| BookedSlot::new(format!("T{t}"), d, format!("P{p}")))
                    .collect();
                SubstituteRequest {
                    absent_teacher_id: "T0".into(),
                    affected_slots: slots,
                    candidates,
                    existing_lessons,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_score_bounds(req in arb_request()) {
            let matches = match_substitutes(&req);
            prop_assert!(matches.len() <= 5);
            for m in &matches {
                prop_assert!(m.score > 30 && m.score <= 100);
                prop_assert!(m.teacher_id != "T0");
                prop_assert!(m.available_slots <= m.total_slots);
            }
            for pair in matches.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }

        #[test]
        fn prop_plan_cover_never_double_books(req in arb_request()) {
            let matches = match_substitutes(&req);
            let plan = plan_cover(&req, &matches);
            prop_assert_eq!(plan.len(), req.affected_slots.len());
            let mut covered = HashSet::new();
            for (slot, assignment) in req.affected_slots.iter().zip(&plan) {
                if let Some(t) = &assignment.teacher_id {
                    let busy = req.existing_lessons.iter().any(|b| {
                        &b.teacher_id == t
                            && b.day_of_week == slot.day_of_week
                            && b.period_id == slot.period_id
                    });
                    prop_assert!(!busy);
                    let key = (t.clone(), slot.day_of_week, slot.period_id.clone());
                    prop_assert!(covered.insert(key));
                }
            }
        }
    }
}
