use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Change notifications pushed over the WebSocket feed.
/// They only carry ids; clients re-query to pick up the new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChangeEvent {
    /// A new account was registered
    UserCreate { id: Uuid },

    /// A chat message was posted
    MessageCreate { id: Uuid },

    /// A teacher published an announcement
    AnnouncementCreate { id: Uuid },

    /// A teacher added a schedule slot
    ScheduleItemCreate { id: Uuid },

    /// A quiz result was saved for `user_id`
    QuizResultCreate { id: Uuid, user_id: Uuid },
}

impl ChangeEvent {
    /// Returns the owning user if this event must only reach that user.
    /// Events that return `None` are delivered to every client.
    pub fn owner(&self) -> Option<Uuid> {
        match self {
            Self::QuizResultCreate { user_id, .. } => Some(*user_id),
            _ => None,
        }
    }
}
