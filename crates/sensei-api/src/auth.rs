use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;
use uuid::Uuid;

use sensei_ai::AiGateway;
use sensei_db::Database;
use sensei_db::models::UserRow;
use sensei_gateway::Dispatcher;
use sensei_types::api::{LoginRequest, RegisterRequest};
use sensei_types::events::ChangeEvent;
use sensei_types::models::{Role, User};

use crate::error::{ApiError, ApiResult};
use crate::{blocking, parse_id};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub ai: AiGateway,
    pub dispatcher: Dispatcher,
}

pub(crate) fn user_from_row(row: UserRow) -> User {
    User {
        id: parse_id(&row.id, "user id"),
        role: Role::coerce(&row.role),
        email: row.email,
        name: row.name,
    }
}

/// Returns the user only when the email exists and the password verifies.
/// Unknown email and wrong password both yield `Ok(None)`.
pub fn login(db: &Database, email: &str, password: &str) -> ApiResult<Option<User>> {
    let Some(row) = db.get_user_by_email(email)? else {
        return Ok(None);
    };

    let parsed_hash = PasswordHash::new(&row.password)
        .map_err(|e| anyhow::anyhow!("Stored password hash for {} is unreadable: {}", row.id, e))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(None);
    }

    Ok(Some(user_from_row(row)))
}

/// Creates an account. Any role other than "teacher" is stored as student.
pub fn register(
    db: &Database,
    email: &str,
    password: &str,
    name: &str,
    requested_role: &str,
) -> ApiResult<User> {
    if db.get_user_by_email(email)?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let role = Role::coerce(requested_role);

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();

    let user_id = Uuid::new_v4();

    // The UNIQUE index catches a concurrent registration that slipped past the check above
    db.create_user(&user_id.to_string(), email, &password_hash, name, role.as_str())
        .map_err(|e| {
            if sensei_db::is_unique_violation(&e) {
                ApiError::DuplicateEmail
            } else {
                ApiError::Internal(e)
            }
        })?;

    info!("Registered {} ({}) as {}", name, user_id, role.as_str());

    Ok(User {
        id: user_id,
        email: email.to_string(),
        name: name.to_string(),
        role,
    })
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let user = blocking(move || login(&db.db, &req.email, &req.password)).await?;
    Ok(Json(user))
}

pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let user = blocking(move || register(&db.db, &req.email, &req.password, &req.name, &req.role)).await?;

    state.dispatcher.broadcast(ChangeEvent::UserCreate { id: user.id });

    Ok((StatusCode::CREATED, Json(user)))
}
