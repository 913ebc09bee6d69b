//! School timetable engine.
//!
//! Builds weekly class timetables from curriculum requirements, audits
//! finished timetables for conflicts, and ranks substitute teachers for
//! absences. All entry points are synchronous pure functions over their
//! inputs; callers own persistence and display.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Class`, `Teacher`, `Subject`, `Room`,
//!   `Period`, `GradeCurriculum`, `Lesson`, `Conflict`, cover types
//! - **`solver`**: Constructive greedy solver with an optional repair pass
//! - **`conflicts`**: Double-booking and workload audit of a lesson list
//! - **`substitute`**: Substitute scoring, ranking and cover planning
//! - **`metrics`**: Timetable KPIs (fulfillment, teacher utilization)
//! - **`validation`**: Input integrity checks (empty sets, day range, duplicate IDs)
//! - **`config`**: Tunables for the solver, detector and matcher
//!
//! # Example
//!
//! ```
//! use u_timetable::conflicts::detect_conflicts;
//! use u_timetable::models::{Class, GradeCurriculum, Period, Subject, Teacher};
//! use u_timetable::solver::{ScheduleConstraints, TimetableSolver};
//!
//! let constraints = ScheduleConstraints::new()
//!     .with_days(&[0, 1, 2, 3, 4])
//!     .with_period(Period::new("P1", 1))
//!     .with_period(Period::new("P2", 2))
//!     .with_class(Class::new("7A").with_grade("g7"))
//!     .with_subject(Subject::new("math"))
//!     .with_teacher(Teacher::new("T1").with_subject("math"))
//!     .with_curriculum(GradeCurriculum::new().with_entry("g7", "math", 4));
//!
//! let solution = TimetableSolver::new().solve(&constraints).unwrap();
//! assert_eq!(solution.lessons.len(), 4);
//! assert!(detect_conflicts(&solution.lessons).is_empty());
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod config;
pub mod conflicts;
pub mod error;
pub mod metrics;
pub mod models;
pub mod solver;
pub mod substitute;
pub mod validation;

pub use error::SolveError;
