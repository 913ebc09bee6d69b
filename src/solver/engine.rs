//! Constructive timetable solver.
//!
//! # Algorithm
//!
//! 1. Iterate classes, then subjects, in input order.
//! 2. For each required session, scan slots (days ascending, periods by
//!    order) and take the first slot where the class is free, an eligible
//!    teacher is free and within both load caps, and (when rooms are
//!    modeled) a fitting room is free.
//! 3. Pick the teacher with the [`TeacherRanker`]; pick the smallest
//!    fitting room.
//! 4. Sessions with no acceptable slot are recorded as unmet. Committed
//!    lessons are never revisited by this pass.
//!
//! An optional repair pass (see `repair`) runs afterwards.
//!
//! # Complexity
//! O(classes × subjects × hours × slots × (teachers + rooms)).

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace};

use super::context::{Rejection, SolveContext};
use super::problem::{
    RejectionCounts, ScheduleConstraints, Solution, SolveStats, UnmetReason, UnmetRequirement,
};
use super::ranking::TeacherRanker;
use super::repair;
use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::validation::validate_constraints;

/// Deterministic, greedy timetable solver.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Class, Period, Subject, Teacher, GradeCurriculum};
/// use u_timetable::solver::{ScheduleConstraints, TimetableSolver};
///
/// let constraints = ScheduleConstraints::new()
///     .with_class(Class::new("7A").with_grade("g7"))
///     .with_subject(Subject::new("math"))
///     .with_teacher(Teacher::new("T1").with_subject("math"))
///     .with_period(Period::new("P1", 1))
///     .with_period(Period::new("P2", 2))
///     .with_days(&[0, 1, 2, 3, 4])
///     .with_curriculum(GradeCurriculum::new().with_entry("g7", "math", 3));
///
/// let solution = TimetableSolver::new().solve(&constraints).unwrap();
/// assert_eq!(solution.lessons.len(), 3);
/// assert!(solution.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableSolver {
    config: SolverConfig,
    ranker: TeacherRanker,
}

impl TimetableSolver {
    /// Creates a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the teacher ranker.
    pub fn with_ranker(mut self, ranker: TeacherRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves a timetable.
    ///
    /// # Errors
    /// [`SolveError::InvalidInput`] when the constraint set fails
    /// structural validation. Infeasible instances return `Ok` with unmet
    /// requirements.
    pub fn solve(&self, constraints: &ScheduleConstraints) -> Result<Solution, SolveError> {
        self.solve_with_cancel(constraints, &AtomicBool::new(false))
    }

    /// Solves a timetable, checking `cancel` between (class, subject) pairs.
    ///
    /// A cancelled solve returns the lessons committed so far with
    /// `stats.cancelled` set.
    pub fn solve_with_cancel(
        &self,
        constraints: &ScheduleConstraints,
        cancel: &AtomicBool,
    ) -> Result<Solution, SolveError> {
        validate_constraints(constraints)?;

        let mut ctx = SolveContext::new(constraints, &self.config, &self.ranker);
        let mut stats = SolveStats::default();
        let mut unmet = Vec::new();

        'classes: for (ci, class) in constraints.classes.iter().enumerate() {
            for (si, subject) in constraints.subjects.iter().enumerate() {
                if cancel.load(Ordering::Relaxed) {
                    stats.cancelled = true;
                    break 'classes;
                }

                let eligible = ctx.eligible_teachers(ci, si);
                let required = ctx.required_sessions(ci, si, !eligible.is_empty());
                if required == 0 {
                    continue;
                }
                stats.required_sessions += required as usize;

                if eligible.is_empty() {
                    debug!(
                        class = class.id.as_str(),
                        subject = subject.id.as_str(),
                        required,
                        "no eligible teacher"
                    );
                    stats.no_eligible_teacher += required as usize;
                    unmet.push(UnmetRequirement {
                        class_id: class.id.clone(),
                        subject_id: subject.id.clone(),
                        required,
                        assigned: 0,
                        reason: UnmetReason::NoEligibleTeacher,
                    });
                    continue;
                }

                let mut assigned = 0;
                while assigned < required {
                    let before = AttemptCounts::of(&stats);
                    if !place_session(&mut ctx, ci, si, &eligible, &mut stats) {
                        // Nothing was committed, so every remaining repetition
                        // would be rejected by the same slots.
                        let remaining = (required - assigned - 1) as usize;
                        before.repeat_since(&mut stats, remaining);
                        break;
                    }
                    assigned += 1;
                }

                if assigned < required {
                    debug!(
                        class = class.id.as_str(),
                        subject = subject.id.as_str(),
                        required,
                        assigned,
                        "requirement not fully met"
                    );
                    unmet.push(UnmetRequirement {
                        class_id: class.id.clone(),
                        subject_id: subject.id.clone(),
                        required,
                        assigned,
                        reason: UnmetReason::NoFreeSlot,
                    });
                }
            }
        }

        if self.config.repair.enabled && !stats.cancelled {
            stats.repaired_sessions = repair::run(&mut ctx, &mut unmet, &self.config.repair);
        }

        let lessons = ctx.into_lessons();
        stats.lessons_created = lessons.len();
        stats.unmet_sessions = unmet.iter().map(|u| u.missing() as usize).sum();

        info!(
            lessons = stats.lessons_created,
            required = stats.required_sessions,
            unmet = stats.unmet_sessions,
            conflicts_avoided = stats.conflicts_avoided,
            repaired = stats.repaired_sessions,
            cancelled = stats.cancelled,
            "timetable solved"
        );

        Ok(Solution {
            lessons,
            stats,
            unmet,
        })
    }
}

/// Counters captured before one placement attempt.
struct AttemptCounts {
    slots_considered: usize,
    conflicts_avoided: usize,
    rejections: RejectionCounts,
}

impl AttemptCounts {
    fn of(stats: &SolveStats) -> Self {
        Self {
            slots_considered: stats.slots_considered,
            conflicts_avoided: stats.conflicts_avoided,
            rejections: stats.rejections.clone(),
        }
    }

    /// Adds what accrued since the snapshot `times` more times.
    fn repeat_since(self, stats: &mut SolveStats, times: usize) {
        let extra = |now: usize, then: usize| (now - then).saturating_mul(times);

        stats.slots_considered = stats
            .slots_considered
            .saturating_add(extra(stats.slots_considered, self.slots_considered));
        stats.conflicts_avoided = stats
            .conflicts_avoided
            .saturating_add(extra(stats.conflicts_avoided, self.conflicts_avoided));

        let r = &mut stats.rejections;
        r.class_busy = r
            .class_busy
            .saturating_add(extra(r.class_busy, self.rejections.class_busy));
        r.no_teacher_available = r.no_teacher_available.saturating_add(extra(
            r.no_teacher_available,
            self.rejections.no_teacher_available,
        ));
        r.no_room_available = r.no_room_available.saturating_add(extra(
            r.no_room_available,
            self.rejections.no_room_available,
        ));
    }
}

/// Places one session in the first acceptable slot. Returns `false` if none.
fn place_session(
    ctx: &mut SolveContext<'_>,
    class: usize,
    subject: usize,
    eligible: &[usize],
    stats: &mut SolveStats,
) -> bool {
    for slot in ctx.search_order(class, subject) {
        stats.slots_considered += 1;
        match ctx.try_slot(class, subject, eligible, slot) {
            Ok((teacher, room)) => {
                ctx.commit(class, subject, teacher, room, slot);
                return true;
            }
            Err(rejection) => {
                stats.conflicts_avoided += 1;
                match rejection {
                    Rejection::ClassBusy => stats.rejections.class_busy += 1,
                    Rejection::NoTeacherAvailable => stats.rejections.no_teacher_available += 1,
                    Rejection::NoRoomAvailable => stats.rejections.no_room_available += 1,
                }
                trace!(class, subject, slot, ?rejection, "slot rejected");
            }
        }
    }
    false
}
