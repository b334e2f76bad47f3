use axum::{
    extract::{Query, State, WebSocketUpgrade},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use sensei_gateway::connection;

use crate::auth::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Identifies the viewer so their own quiz-result events are delivered.
    pub user_id: Option<Uuid>,
}

pub async fn feed_handler(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let dispatcher = state.dispatcher.clone();
    ws.on_upgrade(move |socket| connection::handle_connection(socket, dispatcher, query.user_id))
}
