use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name used for messages whose sender no longer exists.
pub const GHOST_SENDER_NAME: &str = "Ghost";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    /// Only the exact literal "teacher" grants the teacher role.
    /// Everything else, including unknown values like "admin", is a student.
    pub fn coerce(requested: &str) -> Self {
        if requested == "teacher" {
            Self::Teacher
        } else {
            Self::Student
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Self::Normal),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

/// A registered account. The password hash never leaves the database layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// A chat message joined with a snapshot of its sender, resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub sender_name: String,
    pub sender_role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: Uuid,
    pub day: String,
    pub time: String,
    pub subject: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub score: u32,
    pub total: u32,
    pub topic: String,
    pub created_at: i64,
}

// -- AI payloads --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub hanzi: String,
    pub pinyin: String,
    pub translation_fr: String,
    pub translation_mg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswerIndex")]
    pub correct_answer_index: u32,
    pub explanation: String,
}

impl QuizQuestion {
    /// Number of answer options every question must carry.
    pub const OPTION_COUNT: usize = 4;

    pub fn is_well_formed(&self) -> bool {
        self.options.len() == Self::OPTION_COUNT
            && (self.correct_answer_index as usize) < Self::OPTION_COUNT
    }
}
