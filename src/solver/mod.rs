//! Timetable scheduling engine.
//!
//! Turns a [`ScheduleConstraints`] value into a set of lessons plus
//! solve statistics.
//!
//! # Algorithm
//!
//! [`TimetableSolver`] is a deterministic, constructive, greedy solver:
//! classes and subjects are visited in input order, and every required
//! session takes the first slot where the class, a qualified teacher
//! within their load caps, and (optionally) a fitting room are all free.
//! It does not backtrack and does not prove optimality. Unplaceable
//! sessions are reported as [`UnmetRequirement`]s, never as errors.
//!
//! An opt-in repair pass ([`crate::config::RepairConfig`]) can then
//! relocate single lessons to place sessions the greedy pass stranded.
//!
//! # Teacher Choice
//!
//! Among free eligible teachers the [`TeacherRanker`] decides: by default
//! primary-subject holders first, then the least loaded this week, then
//! input order.

mod context;
mod engine;
mod occupancy;
mod problem;
mod ranking;
mod repair;

pub use engine::TimetableSolver;
pub use problem::{
    RejectionCounts, ScheduleConstraints, Solution, SolveStats, UnmetReason, UnmetRequirement,
};
pub use ranking::{
    LeastLoaded, LeastLoadedToday, PrimarySubjectFirst, SelectionContext, TeacherCandidate,
    TeacherPreference, TeacherRanker,
};
