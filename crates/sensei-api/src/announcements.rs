use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;
use uuid::Uuid;

use sensei_db::Database;
use sensei_types::api::CreateAnnouncementRequest;
use sensei_types::events::ChangeEvent;
use sensei_types::models::{Announcement, Priority};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::guard::require_teacher;
use crate::{blocking, now_millis, parse_id};

/// How many announcements the board shows.
pub const ANNOUNCEMENT_WINDOW: u32 = 10;

/// The latest announcements, newest first.
pub fn get_announcements(db: &Database) -> ApiResult<Vec<Announcement>> {
    let rows = db.recent_announcements(ANNOUNCEMENT_WINDOW)?;

    Ok(rows
        .into_iter()
        .map(|row| Announcement {
            id: parse_id(&row.id, "announcement id"),
            priority: Priority::parse(&row.priority).unwrap_or_else(|| {
                warn!("Corrupt priority '{}' on announcement '{}'", row.priority, row.id);
                Priority::Normal
            }),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
        })
        .collect())
}

/// Teacher-only.
pub fn create_announcement(
    db: &Database,
    user_id: Uuid,
    title: &str,
    content: &str,
    priority: Priority,
) -> ApiResult<Uuid> {
    require_teacher(db, user_id)?;

    let id = Uuid::new_v4();
    db.insert_announcement(&id.to_string(), title, content, priority.as_str(), now_millis())?;
    Ok(id)
}

pub async fn get_announcements_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let announcements = blocking(move || get_announcements(&db.db)).await?;
    Ok(Json(announcements))
}

pub async fn create_announcement_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let id = blocking(move || {
        create_announcement(&db.db, req.user_id, &req.title, &req.content, req.priority)
    })
    .await?;

    state.dispatcher.broadcast(ChangeEvent::AnnouncementCreate { id });

    Ok(StatusCode::NO_CONTENT)
}
