//! Candidate scoring.
//!
//! | Component | Points |
//! |-----------|--------|
//! | Subject coverage | 40 all, 20 some, 0 none |
//! | Availability | round(30 × free / total) |
//! | Remaining weekly capacity | 20 enough, 10 some, 0 none |
//! | Primary subject among needed | +10 |
//!
//! The total is capped at 100.

use crate::models::{CoverCandidate, Teacher};

pub(crate) const SUBJECT_FULL: u32 = 40;
pub(crate) const SUBJECT_PARTIAL: u32 = 20;
pub(crate) const AVAILABILITY_MAX: u32 = 30;
pub(crate) const WORKLOAD_FULL: u32 = 20;
pub(crate) const WORKLOAD_PARTIAL: u32 = 10;
pub(crate) const PRIMARY_BONUS: u32 = 10;
pub(crate) const MAX_SCORE: u32 = 100;

/// Accumulated score with its explanations.
#[derive(Debug, Default)]
pub(crate) struct ScoreCard {
    pub points: u32,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

impl ScoreCard {
    fn reason(&mut self, points: u32, text: String) {
        self.points += points;
        self.reasons.push(text);
    }

    fn warning(&mut self, points: u32, text: String) {
        self.points += points;
        self.warnings.push(text);
    }

    pub fn total(&self) -> u32 {
        self.points.min(MAX_SCORE)
    }
}

/// Scores one candidate.
///
/// `needed` holds the distinct subjects of the affected slots, `free` the
/// number of affected slots the candidate has no booking in.
pub(crate) fn score(
    candidate: &CoverCandidate,
    needed: &[&str],
    free: usize,
    total: usize,
) -> ScoreCard {
    let mut card = ScoreCard::default();
    subject_coverage(&mut card, &candidate.teacher, needed);
    availability(&mut card, free, total);
    workload(&mut card, candidate, total);
    primary_subject(&mut card, &candidate.teacher, needed);
    card
}

fn subject_coverage(card: &mut ScoreCard, teacher: &Teacher, needed: &[&str]) {
    let covered = needed.iter().filter(|s| teacher.teaches(s)).count();
    if covered == needed.len() {
        card.reason(SUBJECT_FULL, format!("Qualified for {}", needed.join(", ")));
    } else if covered > 0 {
        card.reason(
            SUBJECT_PARTIAL,
            format!("Qualified for {covered} of {} subjects", needed.len()),
        );
    } else {
        card.warning(0, "Teaches a different subject area".to_string());
    }
}

fn availability(card: &mut ScoreCard, free: usize, total: usize) {
    let points = rounded_share(free, total);
    if free == total {
        card.reason(points, format!("Free in all {total} slots"));
    } else {
        card.warning(points, format!("Busy in {} of {total} slots", total - free));
    }
}

fn workload(card: &mut ScoreCard, candidate: &CoverCandidate, total: usize) {
    let remaining = i64::from(candidate.teacher.max_periods_per_week)
        - i64::from(candidate.current_weekly_load);
    if remaining >= total as i64 {
        card.reason(WORKLOAD_FULL, format!("{remaining} periods left this week"));
    } else if remaining > 0 {
        card.warning(WORKLOAD_PARTIAL, format!("Only {remaining} periods left this week"));
    } else {
        card.warning(0, "Weekly limit reached".to_string());
    }
}

fn primary_subject(card: &mut ScoreCard, teacher: &Teacher, needed: &[&str]) {
    if needed.iter().any(|s| teacher.is_primary_for(s)) {
        card.reason(PRIMARY_BONUS, "Primary subject".to_string());
    }
}

/// `round(30 × free / total)` in integers, halves rounded up.
fn rounded_share(free: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (free, total) = (free as u64, total as u64);
    ((2 * u64::from(AVAILABILITY_MAX) * free + total) / (2 * total)) as u32
}
