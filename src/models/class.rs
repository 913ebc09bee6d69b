//! Class and room models.
//!
//! A class is a group of students that attends lessons together. A room
//! hosts one lesson at a time. Rooms are optional: a timetable without
//! rooms leaves every lesson's room unassigned.

use serde::{Deserialize, Serialize};

/// A class (student group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Unique class identifier.
    pub id: String,
    /// Display name (e.g. "7B").
    #[serde(default)]
    pub name: String,
    /// Number of students.
    #[serde(default)]
    pub capacity: u32,
    /// Grade the class belongs to (keys the curriculum map).
    #[serde(default)]
    pub grade_id: Option<String>,
}

/// A room lessons can be held in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Type tag (e.g. "classroom", "lab", "gym").
    #[serde(default)]
    pub room_type: String,
    /// Seats available.
    #[serde(default)]
    pub capacity: u32,
}

impl Class {
    /// Creates a class with no grade and zero capacity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: 0,
            grade_id: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the student count.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the grade.
    pub fn with_grade(mut self, grade_id: impl Into<String>) -> Self {
        self.grade_id = Some(grade_id.into());
        self
    }
}

impl Room {
    /// Creates a room of the given type and capacity.
    pub fn new(id: impl Into<String>, room_type: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            room_type: room_type.into(),
            capacity,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the room seats `students` and matches `required_type`.
    pub fn fits(&self, students: u32, required_type: Option<&str>) -> bool {
        self.capacity >= students && required_type.map_or(true, |t| t == self.room_type)
    }
}
