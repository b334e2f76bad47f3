use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use sensei_db::Database;
use sensei_types::api::SaveQuizResultRequest;
use sensei_types::events::ChangeEvent;
use sensei_types::models::QuizResult;

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::guard::require_user;
use crate::{blocking, now_millis, parse_id};

/// How many past results a user's history shows.
pub const HISTORY_WINDOW: usize = 10;

/// Records a finished quiz for an existing user. Scores above the total are rejected.
pub fn save_quiz_result(
    db: &Database,
    user_id: Uuid,
    score: u32,
    total: u32,
    topic: &str,
) -> ApiResult<Uuid> {
    require_user(db, user_id)?;
    if score > total {
        return Err(ApiError::InvalidScore { score, total });
    }

    let id = Uuid::new_v4();
    db.insert_quiz_result(&id.to_string(), &user_id.to_string(), score, total, topic, now_millis())?;
    Ok(id)
}

/// The latest results belonging to `user_id` and nobody else, newest first.
pub fn get_user_quiz_results(db: &Database, user_id: Uuid) -> ApiResult<Vec<QuizResult>> {
    let rows = db.quiz_results_for_user(&user_id.to_string(), HISTORY_WINDOW)?;

    Ok(rows
        .into_iter()
        .map(|row| QuizResult {
            id: parse_id(&row.id, "quiz result id"),
            user_id: parse_id(&row.user_id, "quiz result user_id"),
            score: row.score,
            total: row.total,
            topic: row.topic,
            created_at: row.created_at,
        })
        .collect())
}

pub async fn save_quiz_result_handler(
    State(state): State<AppState>,
    Json(req): Json<SaveQuizResultRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let user_id = req.user_id;
    let id = blocking(move || save_quiz_result(&db.db, req.user_id, req.score, req.total, &req.topic)).await?;

    state.dispatcher.broadcast(ChangeEvent::QuizResultCreate { id, user_id });

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_user_quiz_results_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let results = blocking(move || get_user_quiz_results(&db.db, user_id)).await?;
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::register;

    #[test]
    fn results_are_isolated_per_user() {
        let db = Database::open_in_memory().unwrap();
        let alice = register(&db, "a@x.io", "pw", "Alice", "student").unwrap();
        let bob = register(&db, "b@x.io", "pw", "Bob", "student").unwrap();

        save_quiz_result(&db, alice.id, 4, 5, "Couleurs (HSK1)").unwrap();
        for _ in 0..15 {
            save_quiz_result(&db, bob.id, 2, 5, "Nombres (HSK1)").unwrap();
        }

        let alice_results = get_user_quiz_results(&db, alice.id).unwrap();
        assert_eq!(alice_results.len(), 1);
        assert!(alice_results.iter().all(|r| r.user_id == alice.id));

        let bob_results = get_user_quiz_results(&db, bob.id).unwrap();
        assert_eq!(bob_results.len(), 10);
        assert!(bob_results.iter().all(|r| r.user_id == bob.id));
    }

    #[test]
    fn unknown_user_cannot_save() {
        let db = Database::open_in_memory().unwrap();
        let err = save_quiz_result(&db, Uuid::new_v4(), 1, 5, "t").unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }

    #[test]
    fn unknown_user_wins_over_bad_score() {
        let db = Database::open_in_memory().unwrap();
        let err = save_quiz_result(&db, Uuid::new_v4(), 6, 5, "t").unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }

    #[test]
    fn score_cannot_exceed_total() {
        let db = Database::open_in_memory().unwrap();
        let user = register(&db, "a@x.io", "pw", "A", "student").unwrap();

        let err = save_quiz_result(&db, user.id, 6, 5, "t").unwrap_err();
        assert!(matches!(err, ApiError::InvalidScore { score: 6, total: 5 }));

        // Boundaries are fine
        save_quiz_result(&db, user.id, 0, 5, "t").unwrap();
        save_quiz_result(&db, user.id, 5, 5, "t").unwrap();
        save_quiz_result(&db, user.id, 0, 0, "t").unwrap();
        assert_eq!(get_user_quiz_results(&db, user.id).unwrap().len(), 3);
    }
}
