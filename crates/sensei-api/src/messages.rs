use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use sensei_db::Database;
use sensei_types::api::SendMessageRequest;
use sensei_types::events::ChangeEvent;
use sensei_types::models::{GHOST_SENDER_NAME, MessageView, Role};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::guard::require_user;
use crate::{blocking, now_millis, parse_id};

/// How many of the latest messages the chat shows.
pub const MESSAGE_WINDOW: u32 = 50;

/// The latest messages in display order (oldest first), each joined with its
/// sender's current name and role. Deleted senders show up as "Ghost".
pub fn list_messages(db: &Database) -> ApiResult<Vec<MessageView>> {
    let rows = db.recent_messages(MESSAGE_WINDOW)?;

    let mut messages: Vec<MessageView> = rows
        .into_iter()
        .map(|row| MessageView {
            id: parse_id(&row.id, "message id"),
            user_id: parse_id(&row.user_id, "message user_id"),
            content: row.content,
            created_at: row.created_at,
            sender_name: row.sender_name.unwrap_or_else(|| GHOST_SENDER_NAME.to_string()),
            sender_role: row
                .sender_role
                .as_deref()
                .map(Role::coerce)
                .unwrap_or(Role::Student),
        })
        .collect();

    // Fetched newest-first so the window is the latest 50
    messages.reverse();
    Ok(messages)
}

/// Posts a message. Content is not validated; empty messages are allowed.
pub fn send_message(db: &Database, user_id: Uuid, content: &str) -> ApiResult<Uuid> {
    require_user(db, user_id)?;

    let message_id = Uuid::new_v4();
    db.insert_message(&message_id.to_string(), &user_id.to_string(), content, now_millis())?;
    Ok(message_id)
}

pub async fn list_messages_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let messages = blocking(move || list_messages(&db.db)).await?;
    Ok(Json(messages))
}

pub async fn send_message_handler(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let id = blocking(move || send_message(&db.db, req.user_id, &req.content)).await?;

    state.dispatcher.broadcast(ChangeEvent::MessageCreate { id });

    Ok(StatusCode::NO_CONTENT)
}
