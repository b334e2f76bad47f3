use axum::{Json, extract::State, response::IntoResponse};

use sensei_types::api::{GenerateQuizRequest, TranslateRequest};

use crate::auth::AppState;

/// Always 200: a failed model call still yields a translation-shaped body.
pub async fn translate_handler(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> impl IntoResponse {
    let outcome = state.ai.translate_text(&req.text).await;
    Json(outcome.into_inner())
}

/// Always 200: a failed model call still yields a one-question quiz.
pub async fn generate_quiz_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuizRequest>,
) -> impl IntoResponse {
    let outcome = state.ai.generate_quiz(&req.topic, &req.difficulty).await;
    Json(outcome.into_inner())
}
