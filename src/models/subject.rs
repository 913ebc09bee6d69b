//! Subject model.

use serde::{Deserialize, Serialize};

/// A taught subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Classification tag. Not consulted by the solver.
    #[serde(default)]
    pub category: SubjectCategory,
    /// Room type this subject must be taught in (e.g. "lab"), if any.
    #[serde(default)]
    pub room_type: Option<String>,
}

/// Subject classification.
///
/// Replaces ad hoc code-set membership checks ("is this a science code?")
/// with explicit tagged data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectCategory {
    Language,
    Mathematics,
    Science,
    SocialStudies,
    Sports,
    Arts,
    Technology,
    #[default]
    General,
    /// School-specific category.
    Custom(String),
}

impl Subject {
    /// Creates a general subject.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category: SubjectCategory::General,
            room_type: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: SubjectCategory) -> Self {
        self.category = category;
        self
    }

    /// Requires a room of the given type.
    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    /// Name for messages, falling back to the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
