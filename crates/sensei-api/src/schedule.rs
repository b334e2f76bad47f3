use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use sensei_db::Database;
use sensei_types::api::CreateScheduleItemRequest;
use sensei_types::events::ChangeEvent;
use sensei_types::models::ScheduleItem;

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::guard::require_teacher;
use crate::{blocking, parse_id};

/// The whole timetable. Order is unspecified.
pub fn get_schedule(db: &Database) -> ApiResult<Vec<ScheduleItem>> {
    let rows = db.all_schedule_items()?;

    Ok(rows
        .into_iter()
        .map(|row| ScheduleItem {
            id: parse_id(&row.id, "schedule id"),
            day: row.day,
            time: row.time,
            subject: row.subject,
            room: row.room,
        })
        .collect())
}

/// Teacher-only.
pub fn create_schedule_item(
    db: &Database,
    user_id: Uuid,
    day: &str,
    time: &str,
    subject: &str,
    room: &str,
) -> ApiResult<Uuid> {
    require_teacher(db, user_id)?;

    let id = Uuid::new_v4();
    db.insert_schedule_item(&id.to_string(), day, time, subject, room)?;
    Ok(id)
}

pub async fn get_schedule_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let items = blocking(move || get_schedule(&db.db)).await?;
    Ok(Json(items))
}

pub async fn create_schedule_item_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateScheduleItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let id = blocking(move || {
        create_schedule_item(&db.db, req.user_id, &req.day, &req.time, &req.subject, &req.room)
    })
    .await?;

    state.dispatcher.broadcast(ChangeEvent::ScheduleItemCreate { id });

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::register;
    use crate::error::ApiError;

    #[test]
    fn only_teachers_edit_the_timetable() {
        let db = Database::open_in_memory().unwrap();
        let student = register(&db, "s@x.io", "pw", "S", "admin").unwrap();
        let teacher = register(&db, "t@x.io", "pw", "T", "teacher").unwrap();

        let err = create_schedule_item(&db, student.id, "Lundi", "09:00", "HSK1", "B12").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let a = create_schedule_item(&db, teacher.id, "Lundi", "09:00", "HSK1", "B12").unwrap();
        let b = create_schedule_item(&db, teacher.id, "Mardi", "14:00", "Calligraphie", "A3").unwrap();

        let mut ids: Vec<Uuid> = get_schedule(&db).unwrap().into_iter().map(|i| i.id).collect();
        ids.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(ids, expected);
    }
}
