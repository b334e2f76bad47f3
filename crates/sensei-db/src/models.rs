/// Database row types — these map directly to SQLite rows.
/// Distinct from sensei-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

/// A message with its sender resolved through a LEFT JOIN.
/// `sender_name`/`sender_role` are `None` when the sender no longer exists.
pub struct MessageRow {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: i64,
    pub sender_name: Option<String>,
    pub sender_role: Option<String>,
}

pub struct AnnouncementRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub priority: String,
    pub created_at: i64,
}

pub struct ScheduleRow {
    pub id: String,
    pub day: String,
    pub time: String,
    pub subject: String,
    pub room: String,
}

pub struct QuizResultRow {
    pub id: String,
    pub user_id: String,
    pub score: u32,
    pub total: u32,
    pub topic: String,
    pub created_at: i64,
}
