//! Per-solve working data.
//!
//! Resolves the constraint set into index form (slot list, requirement
//! lookups, eligibility) and owns the mutable search state. Discarded
//! when the solve returns.

use std::collections::HashSet;

use tracing::{trace, warn};

use super::occupancy::{Occupancy, Placement};
use super::ranking::{SelectionContext, TeacherCandidate, TeacherRanker};
use super::ScheduleConstraints;
use crate::config::SolverConfig;
use crate::models::{DayOfWeek, Lesson};

/// A schedulable (day, period) pair by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotRef {
    pub day: DayOfWeek,
    pub period: usize,
}

/// Why a slot could not take a pending session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    ClassBusy,
    NoTeacherAvailable,
    NoRoomAvailable,
}

pub(crate) struct SolveContext<'a> {
    pub constraints: &'a ScheduleConstraints,
    pub config: &'a SolverConfig,
    pub ranker: &'a TeacherRanker,
    /// Days ascending, then periods by `order`.
    pub slots: Vec<SlotRef>,
    pub occupancy: Occupancy,
    /// Committed sessions; index = lesson sequence number.
    pub placements: Vec<Placement>,
}

impl<'a> SolveContext<'a> {
    pub fn new(
        constraints: &'a ScheduleConstraints,
        config: &'a SolverConfig,
        ranker: &'a TeacherRanker,
    ) -> Self {
        let slots = enumerate_slots(constraints);
        let occupancy = Occupancy::new(
            constraints.classes.len(),
            constraints.teachers.len(),
            constraints.rooms.len(),
            constraints.subjects.len(),
            slots.len(),
        );
        warn_unknown_curriculum_subjects(constraints);

        Self {
            constraints,
            config,
            ranker,
            slots,
            occupancy,
            placements: Vec::new(),
        }
    }

    /// Teachers qualified for (class, subject), in input order.
    pub fn eligible_teachers(&self, class: usize, subject: usize) -> Vec<usize> {
        let class = &self.constraints.classes[class];
        let subject_id = &self.constraints.subjects[subject].id;
        self.constraints
            .teachers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.teaches(subject_id) && t.covers_grade(class.grade_id.as_deref()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Weekly sessions required for (class, subject).
    ///
    /// Uses the class's grade curriculum when one is defined; otherwise
    /// the flat default applies to subjects that have an eligible teacher.
    pub fn required_sessions(&self, class: usize, subject: usize, has_eligible: bool) -> u32 {
        let class = &self.constraints.classes[class];
        let subject_id = &self.constraints.subjects[subject].id;

        let from_curriculum = class.grade_id.as_deref().and_then(|grade| {
            self.constraints
                .grade_curriculum
                .as_ref()
                .and_then(|c| c.hours_for(grade, subject_id))
        });

        match from_curriculum {
            Some(hours) => hours,
            None if has_eligible => self.config.default_hours_per_week,
            None => 0,
        }
    }

    /// Slot indices in search order for a pending (class, subject) session.
    pub fn search_order(&self, class: usize, subject: usize) -> Vec<usize> {
        let all = 0..self.slots.len();
        if !self.config.spread_across_days {
            return all.collect();
        }
        let (fresh, used): (Vec<usize>, Vec<usize>) = all.partition(|&s| {
            self.occupancy
                .subject_sessions_on(class, subject, self.slots[s].day)
                == 0
        });
        fresh.into_iter().chain(used).collect()
    }

    /// Checks whether `slot` can take a (class, subject) session.
    ///
    /// Returns the chosen teacher and room on success.
    pub fn try_slot(
        &self,
        class: usize,
        subject: usize,
        eligible: &[usize],
        slot: usize,
    ) -> Result<(usize, Option<usize>), Rejection> {
        if self.occupancy.class_at(class, slot).is_some() {
            return Err(Rejection::ClassBusy);
        }

        let day = self.slots[slot].day;
        let teachers = &self.constraints.teachers;
        let free: Vec<TeacherCandidate<'_>> = eligible
            .iter()
            .filter(|&&t| {
                self.occupancy.teacher_at(t, slot).is_none()
                    && self.occupancy.has_capacity(t, &teachers[t], day)
            })
            .map(|&t| TeacherCandidate {
                index: t,
                teacher: &teachers[t],
                week_load: self.occupancy.week_load(t),
                day_load: self.occupancy.day_load(t, day),
            })
            .collect();

        let selection = SelectionContext {
            class: &self.constraints.classes[class],
            subject: &self.constraints.subjects[subject],
            day,
        };
        let best = self
            .ranker
            .select_best(&free, &selection)
            .ok_or(Rejection::NoTeacherAvailable)?;

        let room = self.room_for(class, subject, slot)?;
        Ok((free[best].index, room))
    }

    /// Checks whether `slot` can take a session with a fixed teacher.
    pub fn try_slot_for_teacher(
        &self,
        class: usize,
        subject: usize,
        teacher: usize,
        slot: usize,
    ) -> Result<Option<usize>, Rejection> {
        if self.occupancy.class_at(class, slot).is_some() {
            return Err(Rejection::ClassBusy);
        }
        let day = self.slots[slot].day;
        if self.occupancy.teacher_at(teacher, slot).is_some()
            || !self
                .occupancy
                .has_capacity(teacher, &self.constraints.teachers[teacher], day)
        {
            return Err(Rejection::NoTeacherAvailable);
        }
        self.room_for(class, subject, slot)
    }

    /// Smallest free room that fits; `Ok(None)` when rooms are not modeled.
    fn room_for(
        &self,
        class: usize,
        subject: usize,
        slot: usize,
    ) -> Result<Option<usize>, Rejection> {
        if !self.constraints.models_rooms() {
            return Ok(None);
        }
        let students = self.constraints.classes[class].capacity;
        let room_type = self.constraints.subjects[subject].room_type.as_deref();

        self.constraints
            .rooms
            .iter()
            .enumerate()
            .filter(|(r, room)| {
                self.occupancy.room_at(*r, slot).is_none() && room.fits(students, room_type)
            })
            .min_by_key(|(_, room)| room.capacity)
            .map(|(r, _)| Some(r))
            .ok_or(Rejection::NoRoomAvailable)
    }

    /// Commits a session and returns its placement index.
    pub fn commit(
        &mut self,
        class: usize,
        subject: usize,
        teacher: usize,
        room: Option<usize>,
        slot: usize,
    ) -> usize {
        let placement = Placement {
            class,
            subject,
            teacher,
            room,
            slot,
            day: self.slots[slot].day,
        };
        let id = self.placements.len();
        self.occupancy.occupy(id, &placement);
        self.placements.push(placement);
        trace!(lesson = id, slot, teacher, "committed session");
        id
    }

    /// Moves an existing placement to another slot, teacher and room.
    pub fn move_placement(&mut self, id: usize, slot: usize, teacher: usize, room: Option<usize>) {
        let old = self.placements[id];
        self.occupancy.release(&old);
        let moved = Placement {
            slot,
            teacher,
            room,
            day: self.slots[slot].day,
            ..old
        };
        self.occupancy.occupy(id, &moved);
        self.placements[id] = moved;
    }

    /// Materializes placements as lessons, in commit order.
    pub fn into_lessons(self) -> Vec<Lesson> {
        let c = self.constraints;
        self.placements
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let teacher = &c.teachers[p.teacher];
                let mut lesson = Lesson::new(
                    format!("lesson-{}", i + 1),
                    c.classes[p.class].id.clone(),
                    c.subjects[p.subject].id.clone(),
                    teacher.id.clone(),
                    p.day,
                    c.periods[self.slots[p.slot].period].id.clone(),
                )
                .with_teacher_limits(teacher.limits());
                if let Some(r) = p.room {
                    lesson = lesson.with_room(c.rooms[r].id.clone());
                }
                lesson
            })
            .collect()
    }
}

/// Schedulable slots: days ascending (deduplicated), periods by `order`.
///
/// Break periods and periods not applicable on a day are skipped.
pub(crate) fn enumerate_slots(constraints: &ScheduleConstraints) -> Vec<SlotRef> {
    let mut days = constraints.days.clone();
    days.sort_unstable();
    days.dedup();

    let mut periods: Vec<usize> = (0..constraints.periods.len()).collect();
    periods.sort_by_key(|&p| constraints.periods[p].order);

    days.iter()
        .flat_map(|&day| {
            periods
                .iter()
                .filter(move |&&p| constraints.periods[p].is_schedulable_on(day))
                .map(move |&period| SlotRef { day, period })
        })
        .collect()
}

fn warn_unknown_curriculum_subjects(constraints: &ScheduleConstraints) {
    let Some(curriculum) = constraints.grade_curriculum.as_ref() else {
        return;
    };
    let known: HashSet<&str> = constraints.subjects.iter().map(|s| s.id.as_str()).collect();
    for (grade, entries) in curriculum.iter() {
        for entry in entries {
            if !known.contains(entry.subject_id.as_str()) {
                warn!(
                    grade,
                    subject = entry.subject_id.as_str(),
                    "curriculum entry references unknown subject; ignored"
                );
            }
        }
    }
}
