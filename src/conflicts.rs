//! Conflict detection for finished timetables.
//!
//! Audits a lesson list for residual violations, whether it came from
//! the solver or was edited by hand:
//!
//! | Conflict | Grouping | Severity |
//! |----------|----------|----------|
//! | `TEACHER_DOUBLE_BOOKED` | (day, period) → teacher | ERROR |
//! | `ROOM_DOUBLE_BOOKED` | (day, period) → room, rooms only | ERROR |
//! | `CLASS_DOUBLE_BOOKED` | (day, period) → class | ERROR |
//! | `TEACHER_MAX_DAILY` | (teacher, day) count > daily cap | WARNING |
//! | `TEACHER_MAX_WEEKLY` | teacher count > weekly cap | WARNING |
//!
//! Caps come from each lesson's teacher snapshot, or from
//! [`DetectorConfig`] when a teacher has none. One lesson may appear in
//! several conflicts. Output order follows first appearance in the input.

use std::collections::HashMap;
use std::hash::Hash;

use crate::config::DetectorConfig;
use crate::models::{day_name, Conflict, ConflictType, Lesson, Slot, TeacherLimits};

/// Detects conflicts with default caps (6 per day, 24 per week).
///
/// # Example
/// ```
/// use u_timetable::conflicts::detect_conflicts;
/// use u_timetable::models::{ConflictType, Lesson};
///
/// let lessons = vec![
///     Lesson::new("L1", "7A", "math", "T1", 0, "P1"),
///     Lesson::new("L2", "7B", "math", "T1", 0, "P1"),
/// ];
/// let conflicts = detect_conflicts(&lessons);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].conflict_type, ConflictType::TeacherDoubleBooked);
/// ```
pub fn detect_conflicts(lessons: &[Lesson]) -> Vec<Conflict> {
    detect_conflicts_with(lessons, &DetectorConfig::default())
}

/// Detects conflicts using `config` for teachers without a snapshot.
pub fn detect_conflicts_with(lessons: &[Lesson], config: &DetectorConfig) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    let by_slot = group_by(lessons.iter(), |l| Some((l.day_of_week, l.period_id.as_str())));
    for ((day, period), members) in &by_slot {
        let slot = Slot::new(*day, *period);

        for (teacher, ids) in group_ids(members, |l| Some(l.teacher_id.as_str())) {
            conflicts.push(Conflict::new(
                ConflictType::TeacherDoubleBooked,
                teacher,
                ids.clone(),
                format!("Teacher {teacher} has {} lessons on {slot}", ids.len()),
            ));
        }
        for (room, ids) in group_ids(members, |l| l.room_id.as_deref()) {
            conflicts.push(Conflict::new(
                ConflictType::RoomDoubleBooked,
                room,
                ids.clone(),
                format!("Room {room} is booked {} times on {slot}", ids.len()),
            ));
        }
        for (class, ids) in group_ids(members, |l| Some(l.class_id.as_str())) {
            conflicts.push(Conflict::new(
                ConflictType::ClassDoubleBooked,
                class,
                ids.clone(),
                format!("Class {class} has {} lessons on {slot}", ids.len()),
            ));
        }
    }

    let limits = teacher_limits(lessons);
    let limit_for = |teacher: &str| limits.get(teacher).copied().unwrap_or(TeacherLimits {
        max_periods_per_day: config.default_max_per_day,
        max_periods_per_week: config.default_max_per_week,
    });

    let by_day = group_by(lessons.iter(), |l| Some((l.teacher_id.as_str(), l.day_of_week)));
    for ((teacher, day), members) in &by_day {
        let cap = limit_for(*teacher).max_periods_per_day;
        if members.len() > cap as usize {
            conflicts.push(Conflict::new(
                ConflictType::TeacherMaxDaily,
                *teacher,
                ids_of(members),
                format!(
                    "Teacher {teacher} has {} lessons on {} (max {cap})",
                    members.len(),
                    day_name(*day)
                ),
            ));
        }
    }

    let by_week = group_by(lessons.iter(), |l| Some(l.teacher_id.as_str()));
    for (teacher, members) in &by_week {
        let cap = limit_for(*teacher).max_periods_per_week;
        if members.len() > cap as usize {
            conflicts.push(Conflict::new(
                ConflictType::TeacherMaxWeekly,
                *teacher,
                ids_of(members),
                format!(
                    "Teacher {teacher} has {} lessons this week (max {cap})",
                    members.len()
                ),
            ));
        }
    }

    conflicts
}

/// Flags lessons involved in `conflicts`.
///
/// Involved lessons get `is_conflict = true` and a note joining the
/// descriptions of their conflicts with `"; "`. All other lessons are
/// cleared, so the call can be repeated after edits.
pub fn mark_conflicts(lessons: &mut [Lesson], conflicts: &[Conflict]) {
    let mut notes: HashMap<&str, Vec<&str>> = HashMap::new();
    for conflict in conflicts {
        for id in &conflict.lesson_ids {
            notes
                .entry(id.as_str())
                .or_default()
                .push(conflict.description.as_str());
        }
    }

    for lesson in lessons.iter_mut() {
        match notes.get(lesson.id.as_str()) {
            Some(descriptions) => {
                lesson.is_conflict = true;
                lesson.conflict_note = Some(descriptions.join("; "));
            }
            None => {
                lesson.is_conflict = false;
                lesson.conflict_note = None;
            }
        }
    }
}

/// First snapshot seen per teacher.
fn teacher_limits(lessons: &[Lesson]) -> HashMap<&str, TeacherLimits> {
    let mut limits = HashMap::new();
    for lesson in lessons {
        if let Some(snapshot) = lesson.teacher_limits {
            limits.entry(lesson.teacher_id.as_str()).or_insert(snapshot);
        }
    }
    limits
}

/// Groups lessons by key, keeping groups in first-appearance order.
/// Lessons whose key is `None` are skipped.
fn group_by<'a, K, I, F>(lessons: I, key: F) -> Vec<(K, Vec<&'a Lesson>)>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = &'a Lesson>,
    F: Fn(&'a Lesson) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a Lesson>)> = Vec::new();
    for lesson in lessons {
        let Some(k) = key(lesson) else {
            continue;
        };
        match index.get(&k) {
            Some(&i) => groups[i].1.push(lesson),
            None => {
                index.insert(k, groups.len());
                groups.push((k, vec![lesson]));
            }
        }
    }
    groups
}

/// Keys that occur more than once among `members`, with their lesson ids.
fn group_ids<'a, F>(members: &[&'a Lesson], key: F) -> Vec<(&'a str, Vec<String>)>
where
    F: Fn(&'a Lesson) -> Option<&'a str>,
{
    group_by(members.iter().copied(), key)
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .map(|(k, group)| (k, ids_of(&group)))
        .collect()
}

fn ids_of(lessons: &[&Lesson]) -> Vec<String> {
    lessons.iter().map(|l| l.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn lesson(id: &str, class: &str, teacher: &str, day: u8, period: &str) -> Lesson {
        Lesson::new(id, class, "math", teacher, day, period)
    }

    fn of_type(conflicts: &[Conflict], t: ConflictType) -> Vec<&Conflict> {
        conflicts.iter().filter(|c| c.conflict_type == t).collect()
    }

    #[test]
    fn test_clean_timetable() {
        let lessons = vec![
            lesson("L1", "7A", "T1", 0, "P1"),
            lesson("L2", "7B", "T1", 0, "P2"),
            lesson("L3", "7A", "T2", 0, "P2"),
        ];
        assert!(detect_conflicts(&lessons).is_empty());
        assert!(detect_conflicts(&[]).is_empty());
    }

    #[test]
    fn test_teacher_double_booked_once() {
        let lessons = vec![
            lesson("L1", "7A", "T1", 1, "P3"),
            lesson("L2", "7B", "T1", 1, "P3"),
        ];
        let conflicts = detect_conflicts(&lessons);
        let doubles = of_type(&conflicts, ConflictType::TeacherDoubleBooked);
        assert_eq!(doubles.len(), 1);
        assert_eq!(doubles[0].lesson_ids, vec!["L1", "L2"]);
        assert_eq!(doubles[0].entity_id, "T1");
        assert_eq!(doubles[0].severity, Severity::Error);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn test_three_way_teacher_clash() {
        let lessons = vec![
            lesson("A", "7A", "T1", 0, "P1"),
            lesson("B", "7B", "T1", 0, "P1"),
            lesson("C", "7C", "T1", 0, "P1"),
        ];
        let conflicts = detect_conflicts(&lessons);
        let doubles = of_type(&conflicts, ConflictType::TeacherDoubleBooked);
        assert_eq!(doubles.len(), 1);
        assert_eq!(doubles[0].lesson_ids, vec!["A", "B", "C"]);
        assert!(doubles[0].description.contains("3 lessons"));
    }

    #[test]
    fn test_room_and_class_double_booking() {
        let lessons = vec![
            lesson("L1", "7A", "T1", 0, "P1").with_room("R1"),
            lesson("L2", "7A", "T2", 0, "P1").with_room("R1"),
            lesson("L3", "7B", "T3", 0, "P1"),
            lesson("L4", "7C", "T4", 0, "P1"),
        ];
        let conflicts = detect_conflicts(&lessons);

        let rooms = of_type(&conflicts, ConflictType::RoomDoubleBooked);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].lesson_ids, vec!["L1", "L2"]);

        let classes = of_type(&conflicts, ConflictType::ClassDoubleBooked);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].entity_id, "7A");

        // L3 and L4 have no room: unassigned rooms never clash.
        assert_eq!(conflicts.len(), 2);
    }

    #[test]
    fn test_daily_and_weekly_limits_from_snapshot() {
        let limits = TeacherLimits {
            max_periods_per_day: 2,
            max_periods_per_week: 4,
        };
        let lessons: Vec<Lesson> = (0..5)
            .map(|i| {
                let day = if i < 3 { 0 } else { 1 };
                lesson(&format!("L{i}"), "7A", "T1", day, &format!("P{i}"))
                    .with_teacher_limits(limits)
            })
            .collect();

        let conflicts = detect_conflicts(&lessons);
        let daily = of_type(&conflicts, ConflictType::TeacherMaxDaily);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].lesson_ids, vec!["L0", "L1", "L2"]);
        assert_eq!(daily[0].severity, Severity::Warning);
        assert!(daily[0].description.contains("Monday"));

        let weekly = of_type(&conflicts, ConflictType::TeacherMaxWeekly);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].lesson_ids.len(), 5);
    }

    #[test]
    fn test_default_limits_without_snapshot() {
        let lessons: Vec<Lesson> = (0..7)
            .map(|i| lesson(&format!("L{i}"), "7A", "T1", 0, &format!("P{i}")))
            .collect();
        let conflicts = detect_conflicts(&lessons);
        assert_eq!(of_type(&conflicts, ConflictType::TeacherMaxDaily).len(), 1);
        assert!(of_type(&conflicts, ConflictType::TeacherMaxWeekly).is_empty());

        let strict = DetectorConfig {
            default_max_per_day: 10,
            default_max_per_week: 5,
        };
        let conflicts = detect_conflicts_with(&lessons, &strict);
        assert!(of_type(&conflicts, ConflictType::TeacherMaxDaily).is_empty());
        assert_eq!(of_type(&conflicts, ConflictType::TeacherMaxWeekly).len(), 1);
    }

    #[test]
    fn test_lesson_in_multiple_conflicts() {
        let limits = TeacherLimits {
            max_periods_per_day: 1,
            max_periods_per_week: 24,
        };
        let lessons = vec![
            lesson("L1", "7A", "T1", 0, "P1").with_teacher_limits(limits),
            lesson("L2", "7B", "T1", 0, "P1").with_teacher_limits(limits),
        ];
        let conflicts = detect_conflicts(&lessons);
        let involving_l1 = conflicts.iter().filter(|c| c.involves("L1")).count();
        assert_eq!(involving_l1, 2);
    }

    #[test]
    fn test_input_untouched_and_marking() {
        let mut lessons = vec![
            lesson("L1", "7A", "T1", 0, "P1"),
            lesson("L2", "7B", "T1", 0, "P1"),
            lesson("L3", "7C", "T2", 0, "P1"),
        ];
        let before = lessons.clone();
        let conflicts = detect_conflicts(&lessons);
        assert_eq!(lessons, before);

        mark_conflicts(&mut lessons, &conflicts);
        assert!(lessons[0].is_conflict);
        assert!(lessons[1].is_conflict);
        assert!(!lessons[2].is_conflict);
        assert!(lessons[0]
            .conflict_note
            .as_deref()
            .is_some_and(|n| n.contains("Teacher T1")));

        mark_conflicts(&mut lessons, &[]);
        assert!(lessons.iter().all(|l| !l.is_conflict && l.conflict_note.is_none()));
    }

    #[test]
    fn test_output_order_follows_input() {
        let lessons = vec![
            lesson("L1", "7A", "T9", 3, "P2"),
            lesson("L2", "7B", "T9", 3, "P2"),
            lesson("L3", "7C", "T1", 0, "P1"),
            lesson("L4", "7D", "T1", 0, "P1"),
        ];
        let conflicts = detect_conflicts(&lessons);
        let entities: Vec<&str> = conflicts.iter().map(|c| c.entity_id.as_str()).collect();
        assert_eq!(entities, vec!["T9", "T1"]);
    }
}
