use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::{ai, announcements, feed, messages, quiz, schedule};

/// Every route the presentation layer calls.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler))
        .route(
            "/messages",
            get(messages::list_messages_handler).post(messages::send_message_handler),
        )
        .route(
            "/announcements",
            get(announcements::get_announcements_handler)
                .post(announcements::create_announcement_handler),
        )
        .route(
            "/schedule",
            get(schedule::get_schedule_handler).post(schedule::create_schedule_item_handler),
        )
        .route("/quiz/results", post(quiz::save_quiz_result_handler))
        .route("/users/{user_id}/quiz-results", get(quiz::get_user_quiz_results_handler))
        .route("/ai/translate", post(ai::translate_handler))
        .route("/ai/quiz", post(ai::generate_quiz_handler))
        .route("/gateway", get(feed::feed_handler))
        .with_state(state)
}
