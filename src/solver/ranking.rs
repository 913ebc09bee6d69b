//! Teacher preference rules and ranker.
//!
//! When several eligible teachers are free for a slot, the ranker picks
//! one by applying preference rules in sequence; a later rule is only
//! consulted when all earlier rules tie. Remaining ties keep input order.
//!
//! # Score Convention
//! **Lower score = more preferred.**

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{Class, DayOfWeek, Subject, Teacher};

/// A free, eligible teacher under consideration for one slot.
#[derive(Debug, Clone, Copy)]
pub struct TeacherCandidate<'a> {
    /// Position in the constraint set's teacher list.
    pub index: usize,
    pub teacher: &'a Teacher,
    /// Lessons already assigned this week.
    pub week_load: u32,
    /// Lessons already assigned on the slot's day.
    pub day_load: u32,
}

/// What the candidates are competing for.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub class: &'a Class,
    pub subject: &'a Subject,
    pub day: DayOfWeek,
}

/// A rule scoring how strongly a teacher is preferred.
pub trait TeacherPreference: Send + Sync + Debug {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Lower = more preferred.
    fn evaluate(&self, candidate: &TeacherCandidate<'_>, context: &SelectionContext<'_>) -> f64;
}

/// Teachers whose primary subject is the one being scheduled come first.
#[derive(Debug, Clone, Copy)]
pub struct PrimarySubjectFirst;

impl TeacherPreference for PrimarySubjectFirst {
    fn name(&self) -> &'static str {
        "PRIMARY_SUBJECT"
    }

    fn evaluate(&self, candidate: &TeacherCandidate<'_>, context: &SelectionContext<'_>) -> f64 {
        if candidate.teacher.is_primary_for(&context.subject.id) {
            0.0
        } else {
            1.0
        }
    }
}

/// Fewest lessons this week first.
#[derive(Debug, Clone, Copy)]
pub struct LeastLoaded;

impl TeacherPreference for LeastLoaded {
    fn name(&self) -> &'static str {
        "LEAST_LOADED"
    }

    fn evaluate(&self, candidate: &TeacherCandidate<'_>, _context: &SelectionContext<'_>) -> f64 {
        candidate.week_load as f64
    }
}

/// Fewest lessons on the slot's day first.
#[derive(Debug, Clone, Copy)]
pub struct LeastLoadedToday;

impl TeacherPreference for LeastLoadedToday {
    fn name(&self) -> &'static str {
        "LEAST_LOADED_TODAY"
    }

    fn evaluate(&self, candidate: &TeacherCandidate<'_>, _context: &SelectionContext<'_>) -> f64 {
        candidate.day_load as f64
    }
}

/// Sequential multi-rule teacher ranker.
///
/// # Example
/// ```
/// use u_timetable::solver::{LeastLoadedToday, TeacherRanker};
///
/// let ranker = TeacherRanker::default().with_rule(LeastLoadedToday);
/// assert_eq!(ranker.rule_names(), vec!["PRIMARY_SUBJECT", "LEAST_LOADED", "LEAST_LOADED_TODAY"]);
/// ```
#[derive(Clone)]
pub struct TeacherRanker {
    rules: Vec<Arc<dyn TeacherPreference>>,
    epsilon: f64,
}

impl TeacherRanker {
    /// Creates a ranker with no rules (pure input order).
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Appends a rule, consulted after the existing ones.
    pub fn with_rule<R: TeacherPreference + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Index of the most preferred candidate. Ties go to the earliest.
    pub fn select_best(
        &self,
        candidates: &[TeacherCandidate<'_>],
        context: &SelectionContext<'_>,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;
        for i in 0..candidates.len() {
            match best {
                None => best = Some(i),
                Some(b) => {
                    if self.compare(&candidates[i], &candidates[b], context) == Ordering::Less {
                        best = Some(i);
                    }
                }
            }
        }
        best
    }

    /// Candidate indices from most to least preferred (stable).
    pub fn sort_indices(
        &self,
        candidates: &[TeacherCandidate<'_>],
        context: &SelectionContext<'_>,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&candidates[a], &candidates[b], context));
        indices
    }

    fn compare(
        &self,
        a: &TeacherCandidate<'_>,
        b: &TeacherCandidate<'_>,
        context: &SelectionContext<'_>,
    ) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for TeacherRanker {
    /// Primary-subject holders first, then least loaded this week.
    fn default() -> Self {
        Self::empty()
            .with_rule(PrimarySubjectFirst)
            .with_rule(LeastLoaded)
    }
}

impl Debug for TeacherRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeacherRanker")
            .field("rules", &self.rule_names())
            .finish()
    }
}
