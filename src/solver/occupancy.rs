//! Per-solve occupancy tracking.
//!
//! Dense tables indexed by entity position and slot index. Each table
//! cell holds the index of the placement occupying it, so the repair pass
//! can find the lesson blocking a slot.

use crate::models::{DayOfWeek, Teacher};

/// One committed session, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub class: usize,
    pub subject: usize,
    pub teacher: usize,
    pub room: Option<usize>,
    pub slot: usize,
    pub day: DayOfWeek,
}

const DAYS: usize = 7;

#[derive(Debug, Clone)]
pub(crate) struct Occupancy {
    slots: usize,
    subjects: usize,
    class_at: Vec<Option<usize>>,
    teacher_at: Vec<Option<usize>>,
    room_at: Vec<Option<usize>>,
    teacher_day_load: Vec<u32>,
    teacher_week_load: Vec<u32>,
    /// (class, subject, day) → sessions on that day.
    subject_day_count: Vec<u32>,
}

impl Occupancy {
    pub fn new(
        classes: usize,
        teachers: usize,
        rooms: usize,
        subjects: usize,
        slots: usize,
    ) -> Self {
        Self {
            slots,
            subjects,
            class_at: vec![None; classes * slots],
            teacher_at: vec![None; teachers * slots],
            room_at: vec![None; rooms * slots],
            teacher_day_load: vec![0; teachers * DAYS],
            teacher_week_load: vec![0; teachers],
            subject_day_count: vec![0; classes * subjects * DAYS],
        }
    }

    #[inline]
    pub fn class_at(&self, class: usize, slot: usize) -> Option<usize> {
        self.class_at[class * self.slots + slot]
    }

    #[inline]
    pub fn teacher_at(&self, teacher: usize, slot: usize) -> Option<usize> {
        self.teacher_at[teacher * self.slots + slot]
    }

    #[inline]
    pub fn room_at(&self, room: usize, slot: usize) -> Option<usize> {
        self.room_at[room * self.slots + slot]
    }

    #[inline]
    pub fn day_load(&self, teacher: usize, day: DayOfWeek) -> u32 {
        self.teacher_day_load[teacher * DAYS + day as usize]
    }

    #[inline]
    pub fn week_load(&self, teacher: usize) -> u32 {
        self.teacher_week_load[teacher]
    }

    /// Sessions of (class, subject) already on `day`.
    #[inline]
    pub fn subject_sessions_on(&self, class: usize, subject: usize, day: DayOfWeek) -> u32 {
        self.subject_day_count[self.subject_day_index(class, subject, day)]
    }

    /// Whether one more lesson on `day` keeps the teacher within both caps.
    pub fn has_capacity(&self, teacher_idx: usize, teacher: &Teacher, day: DayOfWeek) -> bool {
        self.day_load(teacher_idx, day) < teacher.max_periods_per_day
            && self.week_load(teacher_idx) < teacher.max_periods_per_week
    }

    /// Marks every cell of `p` as occupied by placement `id`.
    pub fn occupy(&mut self, id: usize, p: &Placement) {
        self.set(p, Some(id));
        self.teacher_day_load[p.teacher * DAYS + p.day as usize] += 1;
        self.teacher_week_load[p.teacher] += 1;
        let idx = self.subject_day_index(p.class, p.subject, p.day);
        self.subject_day_count[idx] += 1;
    }

    /// Clears every cell of `p`.
    pub fn release(&mut self, p: &Placement) {
        self.set(p, None);
        let day = p.teacher * DAYS + p.day as usize;
        self.teacher_day_load[day] = self.teacher_day_load[day].saturating_sub(1);
        self.teacher_week_load[p.teacher] = self.teacher_week_load[p.teacher].saturating_sub(1);
        let idx = self.subject_day_index(p.class, p.subject, p.day);
        self.subject_day_count[idx] = self.subject_day_count[idx].saturating_sub(1);
    }

    fn set(&mut self, p: &Placement, value: Option<usize>) {
        self.class_at[p.class * self.slots + p.slot] = value;
        self.teacher_at[p.teacher * self.slots + p.slot] = value;
        if let Some(room) = p.room {
            self.room_at[room * self.slots + p.slot] = value;
        }
    }

    fn subject_day_index(&self, class: usize, subject: usize, day: DayOfWeek) -> usize {
        (class * self.subjects + subject) * DAYS + day as usize
    }
}
