use serde::{Deserialize, Serialize};

use crate::ProfileId;

/// Recorded sex of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Default for Sex {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Attributes for a new profile. Optional fields stay `None` when the user
/// left them blank; they are never defaulted to sentinel values.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub name: String,
    pub sex: Sex,
    pub age_months: Option<u32>,
    pub pattern: Option<String>,
    pub activity_areas: Vec<String>,
    pub personality: Vec<String>,
    pub food_preferences: Vec<String>,
    pub feeding_tips: Option<String>,
    pub notes: Option<String>,
}

impl NewProfile {
    pub fn new<S: Into<String>>(name: S, sex: Sex) -> Self {
        Self {
            name: name.into(),
            sex,
            age_months: None,
            pattern: None,
            activity_areas: Vec::new(),
            personality: Vec::new(),
            food_preferences: Vec::new(),
            feeding_tips: None,
            notes: None,
        }
    }

    pub fn with_age_months(mut self, months: u32) -> Self {
        self.age_months = Some(months);
        self
    }

    pub fn with_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_activity_areas(mut self, areas: Vec<String>) -> Self {
        self.activity_areas = areas;
        self
    }

    pub fn with_personality(mut self, traits: Vec<String>) -> Self {
        self.personality = traits;
        self
    }

    pub fn with_food_preferences(mut self, preferences: Vec<String>) -> Self {
        self.food_preferences = preferences;
        self
    }

    pub fn with_feeding_tips<S: Into<String>>(mut self, tips: S) -> Self {
        self.feeding_tips = Some(tips.into());
        self
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A stored photo as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub path: String,
    pub uploaded_at: i64,
}

/// Full profile as read back from the backend
#[derive(Debug, Clone, Deserialize)]
pub struct CatProfile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub sex: Sex,
    pub age_months: Option<u32>,
    pub pattern: Option<String>,
    #[serde(default)]
    pub activity_areas: Vec<String>,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub food_preferences: Vec<String>,
    pub feeding_tips: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}
