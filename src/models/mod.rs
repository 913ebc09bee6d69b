//! Timetable domain models.
//!
//! Pure data types for describing a school week and its lessons. All
//! entities are read-only snapshots passed into the solver, the conflict
//! detector, and the substitute matcher.
//!
//! # Domain Mappings
//!
//! | u-timetable | General scheduling |
//! |-------------|--------------------|
//! | Class | Task owner (demand) |
//! | Teacher | Human resource |
//! | Room | Primary resource |
//! | Slot | Time bucket |
//! | Lesson | Assignment |

mod class;
mod conflict;
mod cover;
mod curriculum;
mod lesson;
mod period;
mod subject;
mod teacher;

pub use class::{Class, Room};
pub use conflict::{Conflict, ConflictType, Severity};
pub use cover::{AffectedSlot, BookedSlot, CoverAssignment, CoverCandidate, SubstituteMatch};
pub use curriculum::{CurriculumEntry, GradeCurriculum};
pub use lesson::Lesson;
pub use period::{day_from_sunday_based, day_name, DayOfWeek, Period, Slot, MAX_DAY};
pub use subject::{Subject, SubjectCategory};
pub use teacher::{
    Teacher, TeacherLimits, DEFAULT_MAX_PERIODS_PER_DAY, DEFAULT_MAX_PERIODS_PER_WEEK,
};
